use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Department {
    HR,
    IT,
    Finance,
    Marketing,
    Operations,
    /// Also absorbs department names this console does not know about.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,

    /// Business key, e.g. `EMP001`. Attendance records point here.
    pub employee_id: String,

    pub full_name: String,

    pub email: String,

    pub department: Department,
}

/// Body of `POST /api/employees`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: Department,
}

impl NewEmployee {
    /// The record the server would hand back once it assigned `id`.
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            employee_id: self.employee_id,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
        }
    }
}
