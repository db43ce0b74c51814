//! The console session: both view models plus the API client that feeds them.
//!
//! Locks are taken only to read or apply state and are always released
//! before awaiting the API, so a slow request never blocks another render.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDate};
use futures::future::join;
use tracing::{debug, error, info, warn};

use crate::client::{ApiError, HrmsApi};
use crate::view::{
    AttendanceForm, AttendancePage, AttendanceViewModel, Banner, EmployeeDetail,
    EmployeeDirectory, EmployeeForm, EmployeePage, EmployeeViewModel, RequestToken, display_list,
};

pub struct ConsoleState {
    api: Arc<dyn HrmsApi>,
    employees: Mutex<EmployeeViewModel>,
    attendance: Mutex<AttendanceViewModel>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Drop guard for a submission in flight. actix drops the handler future when
/// the client goes away, skipping whatever would have run after the `.await`;
/// this puts the view model back to an idle form in that case.
struct InFlight<'a, T> {
    vm: &'a Mutex<T>,
    release: fn(&mut T),
    settled: bool,
}

impl<'a, T> InFlight<'a, T> {
    fn new(vm: &'a Mutex<T>, release: fn(&mut T)) -> Self {
        Self {
            vm,
            release,
            settled: false,
        }
    }

    /// The outcome was applied; nothing left to undo.
    fn settle(mut self) {
        self.settled = true;
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Submission dropped before the API answered");
            (self.release)(&mut lock(self.vm));
        }
    }
}

impl ConsoleState {
    pub fn new(api: Arc<dyn HrmsApi>) -> Self {
        Self {
            api,
            employees: Mutex::new(EmployeeViewModel::default()),
            attendance: Mutex::new(AttendanceViewModel::default()),
        }
    }

    // -------------------- Employee view --------------------

    /// Tab activation: re-fetches the directory.
    pub async fn open_employees(&self, show_form: bool) -> EmployeePage {
        {
            let mut vm = lock(&self.employees);
            vm.set_loading(true);
            if show_form {
                vm.open_form();
            } else {
                vm.close_form();
            }
        }

        self.refresh_employees().await;
        lock(&self.employees).page()
    }

    pub async fn create_employee(&self, form: EmployeeForm) -> EmployeePage {
        let submission = lock(&self.employees).start_submission(form);
        let Some(employee) = submission else {
            return lock(&self.employees).page();
        };

        let in_flight = InFlight::new(&self.employees, EmployeeViewModel::abandon_submission);
        match self.api.create_employee(&employee).await {
            Ok(created) => {
                info!(employee_id = %created.employee_id, "Employee created");
                lock(&self.employees).submission_succeeded();
                in_flight.settle();
                self.refresh_employees().await;
            }
            Err(e) => {
                warn!(error = %e, employee_id = %employee.employee_id, "Failed to create employee");
                lock(&self.employees).submission_failed(e.user_message("Failed to add employee"));
                in_flight.settle();
            }
        }

        lock(&self.employees).page()
    }

    /// Attendance of the deleted employee is the server's business; nothing
    /// else is requested here.
    pub async fn delete_employee(&self, employee_id: &str) -> EmployeePage {
        match self.api.delete_employee(employee_id).await {
            Ok(()) => {
                info!(employee_id, "Employee deleted");
                lock(&self.employees)
                    .set_banner(Banner::Success("Employee deleted successfully!".into()));
                self.refresh_employees().await;
            }
            Err(e) => {
                warn!(error = %e, employee_id, "Failed to delete employee");
                lock(&self.employees)
                    .set_banner(Banner::Error(e.user_message("Failed to delete employee")));
            }
        }

        lock(&self.employees).page()
    }

    pub async fn employee_detail(&self, employee_id: &str) -> Result<EmployeeDetail, ApiError> {
        let employee = self.api.get_employee(employee_id).await?;

        let (records, present_days) = join(
            self.api.list_employee_attendance(employee_id),
            self.api.present_days(employee_id),
        )
        .await;

        let records = records.unwrap_or_else(|e| {
            warn!(error = %e, employee_id, "Failed to fetch employee attendance");
            Vec::new()
        });
        let present_days = present_days
            .map_err(|e| warn!(error = %e, employee_id, "Failed to fetch present days"))
            .ok();

        let directory = EmployeeDirectory::new(vec![employee.clone()]);
        let rows = display_list(&records, None, &directory);

        Ok(EmployeeDetail {
            employee,
            rows,
            present_days,
        })
    }

    async fn refresh_employees(&self) {
        let result = self.api.list_employees().await;

        let mut vm = lock(&self.employees);
        vm.set_loading(false);
        match result {
            Ok(employees) => {
                debug!(count = employees.len(), "Employee directory refreshed");
                vm.replace_directory(EmployeeDirectory::new(employees));
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch employees");
                vm.set_banner(Banner::Error(e.user_message("Failed to fetch employees")));
            }
        }
    }

    // -------------------- Attendance view --------------------

    /// Tab activation: loads both lists, then applies `filter`.
    pub async fn open_attendance(&self, filter: Option<String>, show_form: bool) -> AttendancePage {
        lock(&self.attendance).set_loading(true);
        self.load_attendance().await;

        let fetch = {
            let mut vm = lock(&self.attendance);
            if show_form {
                vm.open_form(today());
            } else {
                vm.close_form();
            }
            vm.select_employee(filter)
        };
        if let Some((employee_id, token)) = fetch {
            self.fetch_present_days(employee_id, token).await;
        }

        lock(&self.attendance).page()
    }

    /// Explicit reload: the only place cached present-day counts are dropped.
    pub async fn reload_attendance(&self, filter: Option<String>) -> AttendancePage {
        {
            let mut vm = lock(&self.attendance);
            vm.present_days_mut().clear();
            vm.set_loading(true);
        }
        self.load_attendance().await;

        let fetch = lock(&self.attendance).select_employee(filter);
        if let Some((employee_id, token)) = fetch {
            self.fetch_present_days(employee_id, token).await;
        }

        lock(&self.attendance).page()
    }

    pub async fn mark_attendance(
        &self,
        form: AttendanceForm,
        filter: Option<String>,
    ) -> AttendancePage {
        let (fetch, submission) = {
            let mut vm = lock(&self.attendance);
            let fetch = vm.select_employee(filter);
            if !vm.can_mark() {
                debug!("Ignoring attendance submission: employee directory is empty");
            }
            (fetch, vm.start_submission(form))
        };

        if let Some(attendance) = submission {
            let in_flight =
                InFlight::new(&self.attendance, AttendanceViewModel::abandon_submission);
            match self.api.create_attendance(&attendance).await {
                Ok(record) => {
                    info!(
                        id = record.id,
                        employee_id = %record.employee_id,
                        date = %record.date,
                        "Attendance marked"
                    );
                    lock(&self.attendance).submission_succeeded();
                    in_flight.settle();
                    self.reload_records().await;
                }
                Err(e) => {
                    warn!(error = %e, employee_id = %attendance.employee_id, "Failed to mark attendance");
                    lock(&self.attendance)
                        .submission_failed(e.user_message("Failed to mark attendance"));
                    in_flight.settle();
                }
            }
        }

        if let Some((employee_id, token)) = fetch {
            self.fetch_present_days(employee_id, token).await;
        }

        lock(&self.attendance).page()
    }

    /// Attendance and employee lists are fetched together and fail apart: an
    /// attendance failure reaches the banner, a directory failure only the log.
    async fn load_attendance(&self) {
        let (records, employees) =
            join(self.api.list_attendance(), self.api.list_employees()).await;

        let mut vm = lock(&self.attendance);
        vm.set_loading(false);

        match records {
            Ok(records) => vm.replace_records(records),
            Err(e) => {
                warn!(error = %e, "Failed to fetch attendance records");
                vm.set_banner(Banner::Error(
                    e.user_message("Failed to fetch attendance records"),
                ));
            }
        }

        match employees {
            Ok(employees) => vm.replace_directory(EmployeeDirectory::new(employees)),
            Err(e) => error!(error = %e, "Failed to fetch employees"),
        }
    }

    async fn reload_records(&self) {
        let result = self.api.list_attendance().await;

        let mut vm = lock(&self.attendance);
        match result {
            Ok(records) => vm.replace_records(records),
            Err(e) => {
                warn!(error = %e, "Failed to fetch attendance records");
                vm.set_banner(Banner::Error(
                    e.user_message("Failed to fetch attendance records"),
                ));
            }
        }
    }

    async fn fetch_present_days(&self, employee_id: String, token: RequestToken) {
        let result = self.api.present_days(&employee_id).await;

        let mut vm = lock(&self.attendance);
        match result {
            Ok(count) => {
                if !vm.present_days_mut().complete(&employee_id, token, count) {
                    debug!(employee_id = %employee_id, "Discarding superseded present-day count");
                }
            }
            Err(e) => {
                warn!(error = %e, employee_id = %employee_id, "Failed to fetch present days");
                vm.present_days_mut().abandon(&employee_id, token);
            }
        }
    }
}
