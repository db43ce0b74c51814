use crate::model::Employee;

/// Employee list as last returned by the server. Never patched locally:
/// every refresh replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
}

impl EmployeeDirectory {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn find(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }

    pub fn contains(&self, employee_id: &str) -> bool {
        self.find(employee_id).is_some()
    }

    /// Full name for `employee_id`, or the key itself when the employee is
    /// unknown (stale directory, deleted employee) or has a blank name.
    pub fn display_name<'a>(&'a self, employee_id: &'a str) -> &'a str {
        match self.find(employee_id) {
            Some(e) if !e.full_name.trim().is_empty() => &e.full_name,
            _ => employee_id,
        }
    }
}
