//! Form state as typed in the browser, and the required-field checks that run
//! before anything is sent to the server.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use super::directory::EmployeeDirectory;
use crate::model::{AttendanceStatus, Department, NewAttendance, NewEmployee};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Transient message shown above a view until the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}

impl EmployeeForm {
    pub fn validate(&self) -> Result<NewEmployee, String> {
        let employee_id = required(&self.employee_id, "Employee ID")?;
        let full_name = required(&self.full_name, "Full Name")?;
        let email = required(&self.email, "Email Address")?;
        let department = required(&self.department, "Department")?;
        let department = Department::from_str(&department)
            .map_err(|_| format!("Unknown department: {department}"))?;

        Ok(NewEmployee {
            employee_id,
            full_name,
            email,
            department,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceForm {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
}

impl AttendanceForm {
    /// Blank employee, `today`, and `Present`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            employee_id: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            status: AttendanceStatus::default().to_string(),
        }
    }

    /// `employee_id` must name someone in `directory`; the dropdown only
    /// offers those, so anything else is a stale or forged submission.
    pub fn validate(&self, directory: &EmployeeDirectory) -> Result<NewAttendance, String> {
        let employee_id = required(&self.employee_id, "Employee")?;
        if !directory.contains(&employee_id) {
            return Err(format!("Employee {employee_id} is not in the directory"));
        }

        let date = required(&self.date, "Date")?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|_| format!("Invalid date: {date}"))?;

        let status = required(&self.status, "Status")?;
        let status = AttendanceStatus::from_str(&status)
            .map_err(|_| format!("Status must be \"Present\" or \"Absent\", got {status}"))?;

        Ok(NewAttendance {
            employee_id,
            date,
            status,
        })
    }
}

fn required(value: &str, label: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(format!("{label} is required"))
    } else {
        Ok(value.to_string())
    }
}
