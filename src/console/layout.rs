//! Page chrome shared by every view: header, tab navigation, banners, footer.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;

use crate::view::Banner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Employees,
    Attendance,
}

impl Tab {
    fn href(self) -> &'static str {
        match self {
            Tab::Employees => "/employees",
            Tab::Attendance => "/attendance",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Employees => "Employee Management",
            Tab::Attendance => "Attendance Management",
        }
    }
}

/// Escape HTML special characters; every server-supplied string goes through here.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn banner(banner: Option<&Banner>) -> String {
    match banner {
        Some(Banner::Success(message)) => format!(
            "<div class=\"alert alert-success\">&#10003; {}</div>\n",
            escape_html(message)
        ),
        Some(Banner::Error(message)) => format!(
            "<div class=\"alert alert-error\">&#9888; {}</div>\n",
            escape_html(message)
        ),
        None => String::new(),
    }
}

pub fn warning(message: &str) -> String {
    format!(
        "<div class=\"alert alert-warning\">&#9888; {}</div>\n",
        escape_html(message)
    )
}

pub fn empty_state(title: &str, text: &str) -> String {
    format!(
        "<div class=\"empty-state\"><h3>{}</h3><p>{}</p></div>\n",
        escape_html(title),
        escape_html(text)
    )
}

/// `<option>`s with `selected` set on the entry equal to `current`.
pub fn options<'a>(
    items: impl IntoIterator<Item = (&'a str, String)>,
    current: &str,
) -> String {
    items
        .into_iter()
        .map(|(value, label)| {
            let selected = if value == current { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{}>{}</option>",
                escape_html(value),
                selected,
                escape_html(&label)
            )
        })
        .collect()
}

fn styles() -> &'static str {
    r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; background: #f5f5f5; color: #1f2937; }
        .container { max-width: 1100px; margin: 0 auto; padding: 0 1.5rem; }
        .header { background: #4a90d9; color: white; padding: 1.25rem 0; }
        .header h1 { margin: 0; }
        .header p { margin: 0.25rem 0 0; opacity: 0.85; }
        .nav { background: white; border-bottom: 1px solid #e5e7eb; margin-bottom: 1.5rem; }
        .nav a { display: inline-block; padding: 0.9rem 1.2rem; color: #374151; text-decoration: none; border-bottom: 3px solid transparent; }
        .nav a.active { border-bottom-color: #4a90d9; color: #4a90d9; font-weight: 600; }
        .section { background: white; border-radius: 8px; padding: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        .section-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; }
        .alert { padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
        .alert-success { background: #dcfce7; color: #166534; }
        .alert-error { background: #fee2e2; color: #991b1b; }
        .alert-warning { background: #fef9c3; color: #854d0e; }
        .form-container { margin-bottom: 2rem; padding: 1.5rem; background: #f9fafb; border-radius: 8px; border: 1px solid #e5e7eb; }
        .form-row { display: flex; gap: 1rem; flex-wrap: wrap; }
        .form-group { display: flex; flex-direction: column; flex: 1; min-width: 200px; margin-bottom: 1rem; }
        .button { padding: 0.6rem 1.1rem; border-radius: 6px; border: none; cursor: pointer; text-decoration: none; font-size: 0.95rem; }
        .button[disabled] { opacity: 0.5; cursor: not-allowed; }
        .button-primary { background: #4a90d9; color: white; }
        .button-secondary { background: #e5e7eb; color: #374151; }
        .button-danger { background: #dc2626; color: white; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border-bottom: 1px solid #e5e7eb; padding: 0.6rem; text-align: left; }
        th { background: #f9fafb; }
        .badge { padding: 0.15rem 0.6rem; border-radius: 999px; font-size: 0.85em; }
        .badge-success { background: #dcfce7; color: #166534; }
        .badge-danger { background: #fee2e2; color: #991b1b; }
        .empty-state { text-align: center; padding: 2rem; color: #6b7280; }
        .loading { text-align: center; padding: 2rem; color: #6b7280; }
        .footer { text-align: center; padding: 2rem 0; color: #888; font-size: 0.85em; }
    "#
}

/// Wraps a view body in the console shell with `active` highlighted.
pub fn shell(active: Tab, body: &str) -> String {
    let tabs: String = [Tab::Employees, Tab::Attendance]
        .into_iter()
        .map(|tab| {
            let class = if tab == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{}\"{}>{}</a>", tab.href(), class, tab.label())
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>HRMS Lite - {title}</title>
<style>{styles}</style>
</head>
<body>
<header class="header"><div class="container"><h1>HRMS Lite</h1><p>Human Resource Management System</p></div></header>
<nav class="nav"><div class="container">{tabs}</div></nav>
<main class="container">
{body}
</main>
<footer class="footer"><p>&copy; 2026 HRMS Lite. All rights reserved.</p></footer>
</body>
</html>
"#,
        title = active.label(),
        styles = styles(),
        tabs = tabs,
        body = body,
    )
}

pub fn html(status: StatusCode, page: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(page)
}
