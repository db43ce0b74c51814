//! Presentation-ready projections of server data. Nothing in here performs
//! I/O; [`crate::state::ConsoleState`] feeds these from the API client.

pub mod attendance;
pub mod directory;
pub mod employees;
pub mod form;
pub mod present_days;

pub use attendance::{AttendancePage, AttendanceRow, AttendanceViewModel, EmployeeOption, display_list};
pub use directory::EmployeeDirectory;
pub use employees::{EmployeeDetail, EmployeePage, EmployeeViewModel};
pub use form::{AttendanceForm, Banner, EmployeeForm};
pub use present_days::{PresentDayCounts, RequestToken};
