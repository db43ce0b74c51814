use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::debug;

use super::layout::{self, Tab, escape_html};
use crate::model::Department;
use crate::state::ConsoleState;
use crate::view::{Banner, EmployeeDetail, EmployeeForm, EmployeePage};

#[derive(Debug, Deserialize)]
pub struct EmployeeViewQuery {
    /// `open` shows the add-employee form.
    pub form: Option<String>,
}

/// GET /employees
pub async fn list_employees(
    state: web::Data<ConsoleState>,
    query: web::Query<EmployeeViewQuery>,
) -> impl Responder {
    let show_form = query.form.as_deref() == Some("open");
    let page = state.open_employees(show_form).await;
    layout::html(
        StatusCode::OK,
        layout::shell(Tab::Employees, &render_employees(&page)),
    )
}

/// POST /employees
pub async fn create_employee(
    state: web::Data<ConsoleState>,
    form: web::Form<EmployeeForm>,
) -> impl Responder {
    debug!(employee_id = %form.employee_id, "Add employee submitted");
    let page = state.create_employee(form.into_inner()).await;
    layout::html(
        StatusCode::OK,
        layout::shell(Tab::Employees, &render_employees(&page)),
    )
}

/// POST /employees/{employee_id}/delete
pub async fn delete_employee(
    state: web::Data<ConsoleState>,
    path: web::Path<String>,
) -> impl Responder {
    let employee_id = path.into_inner();
    let page = state.delete_employee(&employee_id).await;
    layout::html(
        StatusCode::OK,
        layout::shell(Tab::Employees, &render_employees(&page)),
    )
}

/// GET /employees/{employee_id}
pub async fn get_employee(
    state: web::Data<ConsoleState>,
    path: web::Path<String>,
) -> impl Responder {
    let employee_id = path.into_inner();

    match state.employee_detail(&employee_id).await {
        Ok(detail) => layout::html(
            StatusCode::OK,
            layout::shell(Tab::Employees, &render_employee_detail(&detail)),
        ),
        Err(e) => {
            let status = match e.status() {
                Some(404) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            let body = format!(
                "<div class=\"section\">{}<a class=\"button button-secondary\" href=\"/employees\">Back to employees</a></div>",
                layout::banner(Some(&Banner::Error(
                    e.user_message("Failed to fetch employee")
                ))),
            );
            layout::html(status, layout::shell(Tab::Employees, &body))
        }
    }
}

fn employee_href(employee_id: &str) -> String {
    format!("/employees/{}", urlencoding::encode(employee_id))
}

fn render_form(form: &EmployeeForm, submitting: bool) -> String {
    let departments = layout::options(
        std::iter::once(("", "Select Department".to_string())).chain(
            Department::iter().map(|d| (<&'static str>::from(d), d.to_string())),
        ),
        &form.department,
    );
    let submit_label = if submitting { "Adding..." } else { "Add Employee" };
    let disabled = if submitting { " disabled" } else { "" };

    format!(
        r#"<form method="post" action="/employees" class="form-container">
<h3>Add New Employee</h3>
<div class="form-row">
<div class="form-group"><label for="employee_id">Employee ID *</label><input id="employee_id" type="text" name="employee_id" value="{employee_id}" required placeholder="e.g., EMP001"></div>
<div class="form-group"><label for="full_name">Full Name *</label><input id="full_name" type="text" name="full_name" value="{full_name}" required placeholder="e.g., John Doe"></div>
</div>
<div class="form-row">
<div class="form-group"><label for="email">Email Address *</label><input id="email" type="email" name="email" value="{email}" required placeholder="e.g., john@example.com"></div>
<div class="form-group"><label for="department">Department *</label><select id="department" name="department" required>{departments}</select></div>
</div>
<div class="button-group">
<button type="submit" class="button button-primary"{disabled}>{submit_label}</button>
<a class="button button-secondary" href="/employees">Cancel</a>
</div>
</form>
"#,
        employee_id = escape_html(&form.employee_id),
        full_name = escape_html(&form.full_name),
        email = escape_html(&form.email),
        departments = departments,
        disabled = disabled,
        submit_label = submit_label,
    )
}

pub fn render_employees(page: &EmployeePage) -> String {
    let mut html = String::from("<div class=\"section\">\n");

    let toggle = if page.form.is_some() {
        "<a class=\"button button-primary\" href=\"/employees\">&#10005; Cancel</a>"
    } else {
        "<a class=\"button button-primary\" href=\"/employees?form=open\">&#10133; Add Employee</a>"
    };
    html.push_str(&format!(
        "<div class=\"section-header\"><h2 class=\"section-title\">Employee Management</h2>{toggle}</div>\n"
    ));

    html.push_str(&layout::banner(page.banner.as_ref()));

    if let Some(form) = &page.form {
        html.push_str(&render_form(form, page.submitting));
    }

    if page.loading {
        html.push_str("<div class=\"loading\">Loading...</div>\n");
    } else if page.employees.is_empty() {
        html.push_str(&layout::empty_state(
            "No Employees Found",
            "Start by adding your first employee to the system.",
        ));
    } else {
        html.push_str("<table class=\"table\">\n<thead><tr><th>Employee ID</th><th>Full Name</th><th>Email</th><th>Department</th><th>Actions</th></tr></thead>\n<tbody>\n");
        for employee in &page.employees {
            let key = escape_html(&employee.employee_id);
            let href = employee_href(&employee.employee_id);
            html.push_str(&format!(
                "<tr><td><strong><a href=\"{href}\">{key}</a></strong></td><td>{}</td><td>{}</td><td>{}</td>\
<td><form method=\"post\" action=\"{href}/delete\" data-employee=\"{key}\" \
onsubmit=\"return confirm('Are you sure you want to delete employee ' + this.dataset.employee + '?');\">\
<button type=\"submit\" class=\"button button-danger button-small\">Delete</button></form></td></tr>\n",
                escape_html(&employee.full_name),
                escape_html(&employee.email),
                employee.department,
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("</div>\n");
    html
}

pub fn render_employee_detail(detail: &EmployeeDetail) -> String {
    let employee = &detail.employee;
    let present = detail
        .present_days
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut html = format!(
        "<div class=\"section\">\n<div class=\"section-header\"><h2 class=\"section-title\">{name}</h2>\
<a class=\"button button-secondary\" href=\"/employees\">Back to employees</a></div>\n\
<table class=\"table\"><tbody>\
<tr><th>Employee ID</th><td>{key}</td></tr>\
<tr><th>Email</th><td>{email}</td></tr>\
<tr><th>Department</th><td>{department}</td></tr>\
<tr><th>Days present</th><td>{present}</td></tr>\
</tbody></table>\n<h3>Attendance</h3>\n",
        name = escape_html(&employee.full_name),
        key = escape_html(&employee.employee_id),
        email = escape_html(&employee.email),
        department = employee.department,
        present = present,
    );

    if detail.rows.is_empty() {
        html.push_str(&layout::empty_state(
            "No Attendance Records",
            "No attendance records found for this employee.",
        ));
    } else {
        html.push_str(&super::attendance::render_rows(&detail.rows));
    }

    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Employee;

    fn page(employees: Vec<Employee>) -> EmployeePage {
        EmployeePage {
            employees,
            form: None,
            submitting: false,
            loading: false,
            banner: None,
        }
    }

    #[test]
    fn empty_directory_shows_empty_state() {
        let html = render_employees(&page(vec![]));
        assert!(html.contains("No Employees Found"));
        assert!(html.contains("href=\"/employees?form=open\""));
    }

    #[test]
    fn rows_link_and_delete_by_encoded_business_key() {
        let html = render_employees(&page(vec![Employee {
            id: 1,
            employee_id: "EMP 1".into(),
            full_name: "Ada <Lovelace>".into(),
            email: "ada@example.com".into(),
            department: Department::HR,
        }]));
        assert!(html.contains("href=\"/employees/EMP%201\""));
        assert!(html.contains("action=\"/employees/EMP%201/delete\""));
        assert!(html.contains("Ada &lt;Lovelace&gt;"));
        assert!(html.contains("<td>HR</td>"));
    }

    #[test]
    fn form_keeps_entered_values_and_department() {
        let form = EmployeeForm {
            employee_id: "EMP002".into(),
            full_name: "Alan \"Turing\"".into(),
            email: "".into(),
            department: "Finance".into(),
        };
        let html = render_form(&form, false);
        assert!(html.contains("value=\"EMP002\""));
        assert!(html.contains("value=\"Alan &quot;Turing&quot;\""));
        assert!(html.contains("<option value=\"Finance\" selected>Finance</option>"));
        assert!(html.contains("<option value=\"\">Select Department</option>"));
    }
}
