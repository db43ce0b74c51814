pub mod attendance;
pub mod employee;

pub use attendance::{AttendanceRecord, AttendanceStatus, NewAttendance, PresentDays};
pub use employee::{Department, Employee, NewEmployee};
