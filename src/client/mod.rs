//! Outbound side of the console: every read and write goes to the remote
//! HRMS REST service through [`HrmsApi`].

pub mod error;
pub mod http;

use async_trait::async_trait;

use crate::model::{AttendanceRecord, Employee, NewAttendance, NewEmployee};

pub use error::ApiError;
pub use http::ApiClient;

/// One method per endpoint of the HRMS REST contract.
#[async_trait]
pub trait HrmsApi: Send + Sync {
    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ApiError>;

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError>;

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ApiError>;

    /// Deletes by business key, not by the numeric `id`.
    async fn delete_employee(&self, employee_id: &str) -> Result<(), ApiError>;

    async fn create_attendance(
        &self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, ApiError>;

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, ApiError>;

    async fn list_employee_attendance(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ApiError>;

    /// Server count of `Present` records for one employee.
    async fn present_days(&self, employee_id: &str) -> Result<u32, ApiError>;
}
