use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::debug;

use super::layout::{self, Tab, escape_html};
use crate::model::AttendanceStatus;
use crate::state::ConsoleState;
use crate::view::{AttendanceForm, AttendancePage, AttendanceRow};

#[derive(Debug, Deserialize)]
pub struct AttendanceViewQuery {
    /// Business key to filter by; empty means all employees.
    pub employee_id: Option<String>,
    /// `open` shows the mark-attendance form.
    pub form: Option<String>,
}

/// Mark-attendance submission. `filter` carries the current selection so
/// the page comes back filtered the same way.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceInput {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReloadInput {
    pub filter: Option<String>,
}

/// GET /attendance
pub async fn list_attendance(
    state: web::Data<ConsoleState>,
    query: web::Query<AttendanceViewQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let show_form = query.form.as_deref() == Some("open");
    let page = state.open_attendance(query.employee_id, show_form).await;
    layout::html(
        StatusCode::OK,
        layout::shell(Tab::Attendance, &render_attendance(&page)),
    )
}

/// POST /attendance
pub async fn mark_attendance(
    state: web::Data<ConsoleState>,
    input: web::Form<MarkAttendanceInput>,
) -> impl Responder {
    let input = input.into_inner();
    debug!(employee_id = %input.employee_id, date = %input.date, "Mark attendance submitted");

    let form = AttendanceForm {
        employee_id: input.employee_id,
        date: input.date,
        status: input.status,
    };
    let page = state.mark_attendance(form, input.filter).await;
    layout::html(
        StatusCode::OK,
        layout::shell(Tab::Attendance, &render_attendance(&page)),
    )
}

/// POST /attendance/reload
pub async fn reload_attendance(
    state: web::Data<ConsoleState>,
    input: web::Form<ReloadInput>,
) -> impl Responder {
    let page = state.reload_attendance(input.into_inner().filter).await;
    layout::html(
        StatusCode::OK,
        layout::shell(Tab::Attendance, &render_attendance(&page)),
    )
}

fn view_href(filter: Option<&str>, open_form: bool) -> String {
    let mut params = Vec::new();
    if let Some(key) = filter {
        params.push(format!("employee_id={}", urlencoding::encode(key)));
    }
    if open_form {
        params.push("form=open".to_string());
    }

    if params.is_empty() {
        "/attendance".to_string()
    } else {
        format!("/attendance?{}", params.join("&amp;"))
    }
}

fn hidden_filter(filter: Option<&str>) -> String {
    format!(
        "<input type=\"hidden\" name=\"filter\" value=\"{}\">",
        escape_html(filter.unwrap_or(""))
    )
}

fn render_form(page: &AttendancePage, form: &AttendanceForm) -> String {
    let employees = layout::options(
        std::iter::once(("", "Select Employee".to_string())).chain(
            page.options
                .iter()
                .map(|o| (o.employee_id.as_str(), format!("{} - {}", o.employee_id, o.full_name))),
        ),
        &form.employee_id,
    );
    let statuses = layout::options(
        AttendanceStatus::iter().map(|s| (<&'static str>::from(s), s.to_string())),
        &form.status,
    );
    let submit_label = if page.submitting { "Marking..." } else { "Mark Attendance" };
    let disabled = if page.submitting { " disabled" } else { "" };

    format!(
        r#"<form method="post" action="/attendance" class="form-container">
<h3>Mark Attendance</h3>
{filter}
<div class="form-row">
<div class="form-group"><label for="employee_id">Employee *</label><select id="employee_id" name="employee_id" required>{employees}</select></div>
<div class="form-group"><label for="date">Date *</label><input id="date" type="date" name="date" value="{date}" required></div>
<div class="form-group"><label for="status">Status *</label><select id="status" name="status" required>{statuses}</select></div>
</div>
<div class="button-group">
<button type="submit" class="button button-primary"{disabled}>{submit_label}</button>
<a class="button button-secondary" href="{cancel}">Cancel</a>
</div>
</form>
"#,
        filter = hidden_filter(page.filter.as_deref()),
        employees = employees,
        date = escape_html(&form.date),
        statuses = statuses,
        disabled = disabled,
        submit_label = submit_label,
        cancel = view_href(page.filter.as_deref(), false),
    )
}

fn render_filter(page: &AttendancePage) -> String {
    let employees = layout::options(
        std::iter::once(("", "All Employees".to_string())).chain(page.options.iter().map(|o| {
            (
                o.employee_id.as_str(),
                format!(
                    "{} - {} ({} days present)",
                    o.employee_id,
                    o.full_name,
                    o.present_days.unwrap_or(0)
                ),
            )
        })),
        page.filter.as_deref().unwrap_or(""),
    );

    format!(
        r#"<div class="filter">
<h3>Filter by Employee</h3>
<form method="get" action="/attendance">
<select name="employee_id" onchange="this.form.submit()">{employees}</select>
<noscript><button type="submit" class="button button-secondary">Apply</button></noscript>
</form>
<form method="post" action="/attendance/reload">{filter}<button type="submit" class="button button-secondary">Reload</button></form>
</div>
"#,
        employees = employees,
        filter = hidden_filter(page.filter.as_deref()),
    )
}

/// Attendance table body shared with the employee detail page.
pub fn render_rows(rows: &[AttendanceRow]) -> String {
    let mut html = String::from(
        "<table class=\"table\">\n<thead><tr><th>Employee</th><th>Employee ID</th><th>Date</th><th>Status</th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        let badge = match row.status {
            AttendanceStatus::Present => "badge-success",
            AttendanceStatus::Absent => "badge-danger",
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td><strong>{}</strong></td><td>{}</td><td><span class=\"badge {}\">{}</span></td></tr>\n",
            escape_html(&row.employee_name),
            escape_html(&row.employee_id),
            row.date.format("%Y-%m-%d"),
            badge,
            row.status,
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn render_attendance(page: &AttendancePage) -> String {
    let mut html = String::from("<div class=\"section\">\n");

    let toggle = if !page.can_mark {
        "<button class=\"button button-primary\" disabled title=\"Please add employees first\">&#10133; Mark Attendance</button>".to_string()
    } else if page.form.is_some() {
        format!(
            "<a class=\"button button-primary\" href=\"{}\">&#10005; Cancel</a>",
            view_href(page.filter.as_deref(), false)
        )
    } else {
        format!(
            "<a class=\"button button-primary\" href=\"{}\">&#10133; Mark Attendance</a>",
            view_href(page.filter.as_deref(), true)
        )
    };
    html.push_str(&format!(
        "<div class=\"section-header\"><h2 class=\"section-title\">Attendance Management</h2>{toggle}</div>\n"
    ));

    if !page.can_mark {
        html.push_str(&layout::warning(
            "No employees found. Please add employees first before marking attendance.",
        ));
    }

    html.push_str(&layout::banner(page.banner.as_ref()));

    if let Some(form) = page.form.as_ref().filter(|_| page.can_mark) {
        html.push_str(&render_form(page, form));
    }

    html.push_str(&render_filter(page));

    if page.loading {
        html.push_str("<div class=\"loading\">Loading...</div>\n");
    } else if page.rows.is_empty() {
        let text = if page.filter.is_some() {
            "No attendance records found for this employee."
        } else {
            "Start by marking attendance for your employees."
        };
        html.push_str(&layout::empty_state("No Attendance Records", text));
    } else {
        html.push_str(&render_rows(&page.rows));
    }

    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::EmployeeOption;
    use chrono::NaiveDate;

    fn page() -> AttendancePage {
        AttendancePage {
            rows: vec![],
            options: vec![EmployeeOption {
                employee_id: "EMP001".into(),
                full_name: "Ada Lovelace".into(),
                present_days: Some(3),
            }],
            filter: None,
            form: None,
            can_mark: true,
            submitting: false,
            loading: false,
            banner: None,
        }
    }

    #[test]
    fn filter_dropdown_shows_counts_and_selection() {
        let mut page = page();
        page.filter = Some("EMP001".into());
        let html = render_attendance(&page);
        assert!(html.contains("<option value=\"EMP001\" selected>EMP001 - Ada Lovelace (3 days present)</option>"));
        assert!(html.contains("No attendance records found for this employee."));
        assert!(html.contains("href=\"/attendance?employee_id=EMP001&amp;form=open\""));
    }

    #[test]
    fn unknown_count_renders_as_zero() {
        let mut page = page();
        page.options[0].present_days = None;
        assert!(render_attendance(&page).contains("(0 days present)"));
    }

    #[test]
    fn empty_directory_disables_marking() {
        let mut page = page();
        page.options.clear();
        page.can_mark = false;
        page.form = Some(AttendanceForm::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));

        let html = render_attendance(&page);
        assert!(html.contains("Please add employees first before marking attendance"));
        assert!(html.contains("disabled title=\"Please add employees first\""));
        assert!(!html.contains("action=\"/attendance\" class=\"form-container\""));
    }

    #[test]
    fn rows_render_status_badges() {
        let rows = vec![AttendanceRow {
            id: 1,
            employee_id: "EMP999".into(),
            employee_name: "EMP999".into(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            status: AttendanceStatus::Absent,
        }];
        let html = render_rows(&rows);
        assert!(html.contains("<td>EMP999</td><td><strong>EMP999</strong></td><td>2026-02-01</td>"));
        assert!(html.contains("badge badge-danger\">Absent"));
    }
}
