//! Server-rendered HTML pages.
//!
//! Small enough that a template engine would be overhead: each page is
//! assembled with `push_str` into a shared layout. Every value that
//! originates from user input goes through [`escape_markup`] before it is
//! interpolated.

use crate::analytics::AnalyticsSummary;
use crate::core::normalize::escape_markup;
use crate::core::sort::SortKey;

/// Form state echoed back so a failed submission keeps what the user
/// typed.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub channel: String,
    pub date_from: String,
    pub date_to: String,
    pub sort_type: String,
    pub direction: String,
    pub filename: String,
}

/// Data shown on a successful generation.
#[derive(Debug, Clone)]
pub struct SuccessInfo {
    pub pdf_filename: String,
    pub channel: String,
    pub date_from: String,
    pub date_to: String,
    pub sort_label: String,
    pub direction_label: String,
}

const STYLE: &str = "
body { font-family: system-ui, sans-serif; max-width: 640px; margin: 2rem auto; padding: 0 1rem; color: #333; }
h1 { font-size: 1.4rem; border-bottom: 2px solid #e0e0e0; padding-bottom: .5rem; }
label { display: block; margin-top: .8rem; font-weight: 600; }
input, select { width: 100%; padding: .4rem; margin-top: .2rem; box-sizing: border-box; }
button { margin-top: 1.2rem; padding: .5rem 1.5rem; font-size: 1rem; }
.error { background: #fdecea; border: 1px solid #f5c6cb; color: #721c24; padding: .8rem; margin: 1rem 0; }
.success { background: #e8f5e9; border: 1px solid #c3e6cb; color: #155724; padding: .8rem; margin: 1rem 0; }
.demo { background: #fff3cd; border: 1px solid #ffeeba; color: #856404; padding: .8rem; margin: 1rem 0; }
table { border-collapse: collapse; margin: 1rem 0; width: 100%; }
th, td { border: 1px solid #e0e0e0; padding: .4rem .6rem; text-align: left; }
";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_markup(title)
    )
}

fn selected(current: &str, value: &str) -> &'static str {
    if current == value { " selected" } else { "" }
}

/// The main form page, optionally with an inline error or a success block.
pub fn form_page(
    demo_mode: bool,
    error: Option<&str>,
    success: Option<&SuccessInfo>,
    form: &FormState,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>Channelpress — channel to PDF</h1>\n");

    if demo_mode {
        body.push_str(
            "<div class=\"demo\">Demo mode: API credentials are not configured, \
             reports use sample posts.</div>\n",
        );
    }

    if let Some(error) = error {
        body.push_str("<div class=\"error\">");
        body.push_str(&escape_markup(error));
        body.push_str("</div>\n");
    }

    if let Some(ok) = success {
        body.push_str("<div class=\"success\">Report for <b>");
        body.push_str(&escape_markup(&ok.channel));
        body.push_str("</b> (");
        body.push_str(&escape_markup(&ok.date_from));
        body.push_str(" to ");
        body.push_str(&escape_markup(&ok.date_to));
        body.push_str(", by ");
        body.push_str(&escape_markup(&ok.sort_label));
        body.push_str(", ");
        body.push_str(&escape_markup(&ok.direction_label));
        body.push_str(") is ready: <a href=\"/files/");
        body.push_str(&escape_markup(&ok.pdf_filename));
        body.push_str("\" download>");
        body.push_str(&escape_markup(&ok.pdf_filename));
        body.push_str("</a></div>\n");
    }

    body.push_str("<form method=\"post\" action=\"/generate\">\n");

    body.push_str("<label>Channel</label>\n<input name=\"channel\" value=\"");
    body.push_str(&escape_markup(&form.channel));
    body.push_str("\" placeholder=\"@channelname or t.me link\">\n");

    body.push_str("<label>From</label>\n<input name=\"date_from\" type=\"date\" value=\"");
    body.push_str(&escape_markup(&form.date_from));
    body.push_str("\">\n");

    body.push_str("<label>To</label>\n<input name=\"date_to\" type=\"date\" value=\"");
    body.push_str(&escape_markup(&form.date_to));
    body.push_str("\">\n");

    body.push_str("<label>Sort by</label>\n<select name=\"sort_type\">\n");
    for key in SortKey::ALL {
        body.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            key.as_str(),
            selected(&form.sort_type, key.as_str()),
            key.label()
        ));
    }
    body.push_str("</select>\n");

    body.push_str("<label>Direction</label>\n<select name=\"direction\">\n");
    body.push_str(&format!(
        "<option value=\"desc\"{}>descending</option>\n",
        selected(&form.direction, "desc")
    ));
    body.push_str(&format!(
        "<option value=\"asc\"{}>ascending</option>\n",
        selected(&form.direction, "asc")
    ));
    body.push_str("</select>\n");

    body.push_str("<label>File name (optional)</label>\n<input name=\"filename\" value=\"");
    body.push_str(&escape_markup(&form.filename));
    body.push_str("\">\n");

    body.push_str("<button type=\"submit\">Generate PDF</button>\n</form>\n");

    layout("Channelpress", &body)
}

/// The plain 404 page also used to hide the admin dashboard.
pub fn not_found_page() -> String {
    layout("404 Not Found", "<h1>404 Not Found</h1><p>Page not found</p>")
}

/// 403 page for rejected file names.
pub fn forbidden_page(reason: &str) -> String {
    let body = format!("<h1>403 Forbidden</h1><p>{}</p>", escape_markup(reason));
    layout("403 Forbidden", &body)
}

/// The admin analytics dashboard.
pub fn admin_page(summary: &AnalyticsSummary, env: &str) -> String {
    let mut body = String::new();
    body.push_str("<h1>Analytics</h1>\n");
    body.push_str(&format!(
        "<p>Environment: <b>{}</b> · {} log lines · {} events</p>\n",
        escape_markup(env),
        summary.total_lines,
        summary.valid_events
    ));

    body.push_str("<h2>Events</h2>\n<table><tr><th>Event</th><th>Count</th></tr>\n");
    for (event_type, count) in &summary.events_count {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{count}</td></tr>\n",
            escape_markup(event_type)
        ));
    }
    body.push_str("</table>\n");

    match summary.conversion_rate() {
        Some(rate) => body.push_str(&format!("<p>Conversion (success/started): {rate:.2}%</p>\n")),
        None => body.push_str("<p>Conversion: no exports yet</p>\n"),
    }

    body.push_str("<h2>Languages</h2>\n<table><tr><th>Language</th><th>Events</th></tr>\n");
    for (lang, count) in &summary.lang_distribution {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{count}</td></tr>\n",
            escape_markup(lang)
        ));
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Errors</h2>\n");
    if summary.errors_by_type.is_empty() {
        body.push_str("<p>No failed exports recorded.</p>\n");
    } else {
        body.push_str("<table><tr><th>Error</th><th>Count</th></tr>\n");
        for (error_type, count) in &summary.errors_by_type {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{count}</td></tr>\n",
                escape_markup(error_type)
            ));
        }
        body.push_str("</table>\n");
    }

    body.push_str("<h2>Last 30 days</h2>\n<table><tr><th>Day</th><th>Started</th><th>Success</th><th>Failed</th></tr>\n");
    for (day, counts) in summary.recent_days(30) {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_markup(&day),
            counts.started,
            counts.success,
            counts.failed
        ));
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Top channels</h2>\n<table><tr><th>Channel</th><th>Exports</th></tr>\n");
    for (channel, count) in summary.top_channels(10) {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{count}</td></tr>\n",
            escape_markup(&channel)
        ));
    }
    body.push_str("</table>\n");

    layout("Channelpress analytics", &body)
}
