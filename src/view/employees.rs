use super::attendance::AttendanceRow;
use super::directory::EmployeeDirectory;
use super::form::{Banner, EmployeeForm};
use crate::model::{Employee, NewEmployee};

/// One employee with their attendance history. History and count are
/// optional extras: when they fail to load the page still renders.
#[derive(Debug, Clone)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub rows: Vec<AttendanceRow>,
    pub present_days: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub form: Option<EmployeeForm>,
    pub submitting: bool,
    pub loading: bool,
    pub banner: Option<Banner>,
}

/// State behind the employee view: the directory plus the add-employee form.
#[derive(Debug, Default)]
pub struct EmployeeViewModel {
    directory: EmployeeDirectory,
    form: Option<EmployeeForm>,
    submitting: bool,
    loading: bool,
    banner: Option<Banner>,
}

impl EmployeeViewModel {
    pub fn replace_directory(&mut self, directory: EmployeeDirectory) {
        self.directory = directory;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    pub fn open_form(&mut self) {
        if self.form.is_none() {
            self.form = Some(EmployeeForm::default());
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    #[cfg(test)]
    pub fn form(&self) -> Option<&EmployeeForm> {
        self.form.as_ref()
    }

    /// Same contract as the attendance form: `None` when nothing should be
    /// sent, with validation problems reported through the banner.
    pub fn start_submission(&mut self, form: EmployeeForm) -> Option<NewEmployee> {
        if self.submitting {
            return None;
        }

        let result = form.validate();
        self.form = Some(form);
        match result {
            Ok(employee) => {
                self.submitting = true;
                Some(employee)
            }
            Err(message) => {
                self.banner = Some(Banner::Error(message));
                None
            }
        }
    }

    pub fn submission_succeeded(&mut self) {
        self.submitting = false;
        self.form = None;
        self.banner = Some(Banner::Success("Employee added successfully!".into()));
    }

    pub fn submission_failed(&mut self, message: String) {
        self.submitting = false;
        self.banner = Some(Banner::Error(message));
    }

    /// Unblocks the form after a request that never got an answer.
    pub fn abandon_submission(&mut self) {
        self.submitting = false;
    }

    pub fn page(&mut self) -> EmployeePage {
        EmployeePage {
            employees: self.directory.employees().to_vec(),
            form: self.form.clone(),
            submitting: self.submitting,
            loading: self.loading,
            banner: self.banner.take(),
        }
    }
}
