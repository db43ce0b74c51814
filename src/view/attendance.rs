use chrono::NaiveDate;

use super::directory::EmployeeDirectory;
use super::form::{AttendanceForm, Banner};
use super::present_days::{PresentDayCounts, RequestToken};
use crate::model::{AttendanceRecord, AttendanceStatus, NewAttendance};

/// One line of the attendance table.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub id: i64,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Entry of the employee dropdowns.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeOption {
    pub employee_id: String,
    pub full_name: String,
    pub present_days: Option<u32>,
}

/// Everything the attendance view needs for one render.
#[derive(Debug, Clone)]
pub struct AttendancePage {
    pub rows: Vec<AttendanceRow>,
    pub options: Vec<EmployeeOption>,
    pub filter: Option<String>,
    pub form: Option<AttendanceForm>,
    pub can_mark: bool,
    pub submitting: bool,
    pub loading: bool,
    pub banner: Option<Banner>,
}

/// Keeps the records of `filter` (all records when `None` or empty), newest
/// date first, and resolves employee names through `directory`.
///
/// Equal dates are ordered by record `id` descending, so the output is fully
/// determined by the input.
pub fn display_list(
    records: &[AttendanceRecord],
    filter: Option<&str>,
    directory: &EmployeeDirectory,
) -> Vec<AttendanceRow> {
    let filter = filter.filter(|key| !key.is_empty());

    let mut kept: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| match filter {
            Some(key) => r.employee_id == key,
            None => true,
        })
        .collect();

    kept.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

    kept.into_iter()
        .map(|r| AttendanceRow {
            id: r.id,
            employee_id: r.employee_id.clone(),
            employee_name: directory.display_name(&r.employee_id).to_string(),
            date: r.date,
            status: r.status,
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct AttendanceViewModel {
    records: Vec<AttendanceRecord>,
    directory: EmployeeDirectory,
    filter: Option<String>,
    present_days: PresentDayCounts,
    /// `Some` while the mark-attendance form is shown.
    form: Option<AttendanceForm>,
    submitting: bool,
    loading: bool,
    banner: Option<Banner>,
}

impl AttendanceViewModel {
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    #[cfg(test)]
    pub fn present_days(&self) -> &PresentDayCounts {
        &self.present_days
    }

    pub fn present_days_mut(&mut self) -> &mut PresentDayCounts {
        &mut self.present_days
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn replace_records(&mut self, records: Vec<AttendanceRecord>) {
        self.records = records;
    }

    pub fn replace_directory(&mut self, directory: EmployeeDirectory) {
        self.directory = directory;
    }

    /// Marking needs at least one employee to point at.
    pub fn can_mark(&self) -> bool {
        !self.directory.is_empty()
    }

    pub fn set_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    /// Sets the employee filter; a blank key clears it. Returns the key and
    /// token of the present-day fetch to run when the count is not cached yet.
    /// Clearing the filter leaves the cache alone.
    pub fn select_employee(&mut self, employee_id: Option<String>) -> Option<(String, RequestToken)> {
        self.filter = employee_id
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let key = self.filter.clone()?;
        if self.present_days.is_cached(&key) {
            return None;
        }
        let token = self.present_days.begin(&key);
        Some((key, token))
    }

    pub fn rows(&self) -> Vec<AttendanceRow> {
        display_list(&self.records, self.filter(), &self.directory)
    }

    #[cfg(test)]
    pub fn form(&self) -> Option<&AttendanceForm> {
        self.form.as_ref()
    }

    /// Shows a fresh form defaulted to `today`. Ignored while marking is
    /// unavailable.
    pub fn open_form(&mut self, today: NaiveDate) {
        if !self.can_mark() {
            return;
        }
        if self.form.is_none() {
            self.form = Some(AttendanceForm::new(today));
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    #[cfg(test)]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates `form` and marks the view as submitting. `None` means nothing
    /// should be sent: marking is unavailable, a submission is already in
    /// flight, or validation failed (reported through the banner).
    pub fn start_submission(&mut self, form: AttendanceForm) -> Option<NewAttendance> {
        if !self.can_mark() || self.submitting {
            return None;
        }

        match form.validate(&self.directory) {
            Ok(attendance) => {
                self.form = Some(form);
                self.submitting = true;
                Some(attendance)
            }
            Err(message) => {
                self.form = Some(form);
                self.banner = Some(Banner::Error(message));
                None
            }
        }
    }

    /// The form is cleared and hidden; reopening it starts from defaults.
    pub fn submission_succeeded(&mut self) {
        self.submitting = false;
        self.form = None;
        self.banner = Some(Banner::Success("Attendance marked successfully!".into()));
    }

    /// Keeps the entered values so the user can correct them.
    pub fn submission_failed(&mut self, message: String) {
        self.submitting = false;
        self.banner = Some(Banner::Error(message));
    }

    /// The request was dropped before the server answered. The form keeps its
    /// values and can be submitted again.
    pub fn abandon_submission(&mut self) {
        self.submitting = false;
    }

    /// Snapshot for rendering. The banner is handed out once.
    pub fn page(&mut self) -> AttendancePage {
        let options = self
            .directory
            .employees()
            .iter()
            .map(|e| EmployeeOption {
                employee_id: e.employee_id.clone(),
                full_name: e.full_name.clone(),
                present_days: self.present_days.get(&e.employee_id),
            })
            .collect();

        AttendancePage {
            rows: self.rows(),
            options,
            filter: self.filter.clone(),
            form: self.form.clone(),
            can_mark: self.can_mark(),
            submitting: self.submitting,
            loading: self.loading,
            banner: self.banner.take(),
        }
    }
}
