use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Body of `POST /api/attendance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    pub fn into_record(self, id: i64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: self.employee_id,
            date: self.date,
            status: self.status,
        }
    }
}

/// Response of `GET /api/attendance/{employee_id}/present-days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentDays {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub present_days: u32,
}
