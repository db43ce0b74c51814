//! HTML views served by the console: the presentation shell and its two tabs.

pub mod attendance;
pub mod employee;
pub mod layout;
