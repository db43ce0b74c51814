//! In-memory stand-in for the remote HRMS service.
//!
//! Behaves like the real server for the rules the console relies on
//! (duplicate keys, unknown employees, one record per employee per day) and
//! records every call so tests can assert what the console asked for.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use hrms_console::client::{ApiError, HrmsApi};
use hrms_console::model::{
    AttendanceRecord, AttendanceStatus, Department, Employee, NewAttendance, NewEmployee,
};

#[derive(Default)]
pub struct FakeHrms {
    employees: Mutex<Vec<Employee>>,
    attendance: Mutex<Vec<AttendanceRecord>>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    stalled: Mutex<HashSet<&'static str>>,
}

pub fn employee(id: i64, key: &str, name: &str) -> Employee {
    Employee {
        id,
        employee_id: key.to_string(),
        full_name: name.to_string(),
        email: format!("{}@example.com", key.to_lowercase()),
        department: Department::IT,
    }
}

pub fn record(id: i64, key: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        id,
        employee_id: key.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        status,
    }
}

fn rejected(status: u16, detail: &str) -> ApiError {
    ApiError::Status {
        status,
        body: json!({ "detail": detail }).to_string(),
    }
}

impl FakeHrms {
    pub fn new(employees: Vec<Employee>, attendance: Vec<AttendanceRecord>) -> Self {
        let next_id = employees
            .iter()
            .map(|e| e.id)
            .chain(attendance.iter().map(|r| r.id))
            .max()
            .unwrap_or(0);
        Self {
            employees: Mutex::new(employees),
            attendance: Mutex::new(attendance),
            next_id: Mutex::new(next_id),
            ..Self::default()
        }
    }

    /// Makes `operation` answer with a 500 until further notice.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    /// Makes `operation` hang without answering, like a server that stopped
    /// responding mid-request.
    pub fn stall(&self, operation: &'static str) {
        self.stalled.lock().unwrap().insert(operation);
    }

    pub fn resume(&self, operation: &'static str) {
        self.stalled.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn attendance(&self) -> Vec<AttendanceRecord> {
        self.attendance.lock().unwrap().clone()
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.employees.lock().unwrap().clone()
    }

    async fn enter(&self, call: String, operation: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        let stalled = self.stalled.lock().unwrap().contains(operation);
        if stalled {
            std::future::pending::<()>().await;
        }
        if self.failing.lock().unwrap().contains(operation) {
            return Err(rejected(500, &format!("{operation} is unavailable")));
        }
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }

    fn require_employee(&self, employee_id: &str) -> Result<Employee, ApiError> {
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned()
            .ok_or_else(|| rejected(404, "Employee not found"))
    }
}

#[async_trait]
impl HrmsApi for FakeHrms {
    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ApiError> {
        self.enter(format!("create_employee {}", employee.employee_id), "create_employee").await?;
        {
            let employees = self.employees.lock().unwrap();
            if employees.iter().any(|e| e.employee_id == employee.employee_id) {
                return Err(rejected(400, "Employee ID already exists"));
            }
            if employees.iter().any(|e| e.email == employee.email) {
                return Err(rejected(400, "Email already exists"));
            }
        }
        let created = employee.clone().into_employee(self.next_id());
        self.employees.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.enter("list_employees".into(), "list_employees").await?;
        Ok(self.employees())
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ApiError> {
        self.enter(format!("get_employee {employee_id}"), "get_employee").await?;
        self.require_employee(employee_id)
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<(), ApiError> {
        self.enter(format!("delete_employee {employee_id}"), "delete_employee").await?;
        self.require_employee(employee_id)?;
        self.employees
            .lock()
            .unwrap()
            .retain(|e| e.employee_id != employee_id);
        // The server owns the cascade.
        self.attendance
            .lock()
            .unwrap()
            .retain(|r| r.employee_id != employee_id);
        Ok(())
    }

    async fn create_attendance(
        &self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, ApiError> {
        self.enter(
            format!("create_attendance {} {}", attendance.employee_id, attendance.date),
            "create_attendance",
        ).await?;
        self.require_employee(&attendance.employee_id)?;
        if self
            .attendance
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.employee_id == attendance.employee_id && r.date == attendance.date)
        {
            return Err(rejected(400, "Attendance record for this date already exists"));
        }
        let record = attendance.clone().into_record(self.next_id());
        self.attendance.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.enter("list_attendance".into(), "list_attendance").await?;
        Ok(self.attendance())
    }

    async fn list_employee_attendance(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.enter(
            format!("list_employee_attendance {employee_id}"),
            "list_employee_attendance",
        ).await?;
        self.require_employee(employee_id)?;
        Ok(self
            .attendance()
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect())
    }

    async fn present_days(&self, employee_id: &str) -> Result<u32, ApiError> {
        self.enter(format!("present_days {employee_id}"), "present_days").await?;
        self.require_employee(employee_id)?;
        Ok(self
            .attendance()
            .iter()
            .filter(|r| r.employee_id == employee_id && r.status == AttendanceStatus::Present)
            .count() as u32)
    }
}

/// Console app wired to a shared fake.
macro_rules! console_app {
    ($fake:expr) => {{
        let api: std::sync::Arc<dyn hrms_console::client::HrmsApi> = $fake.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(
                    hrms_console::state::ConsoleState::new(api),
                ))
                .configure(hrms_console::routes::configure),
        )
        .await
    }};
}

pub async fn body_text<B: actix_web::body::MessageBody>(
    resp: actix_web::dev::ServiceResponse<B>,
) -> String {
    let bytes = actix_web::test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}
