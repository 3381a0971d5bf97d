use std::fmt::Write as _;
use std::io::IsTerminal;

use chrono::Duration;
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::github::types::IssueState;
use crate::metrics::{AggregateSummary, IssueMetrics};

/// Written in place of the report when a search matches nothing.
pub const NO_ISSUES_FOUND: &str = "no issues found for the given search criteria\n\n";

/// Placeholder for a missing duration. Never rendered as zero.
pub const NONE_MARKER: &str = "None";

/// Format a duration as `H:MM:SS`, prefixed with days when at least one day long.
/// Sub-second parts are dropped. Examples: "0:05:00", "1 day, 2:00:00"
pub fn format_duration(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let total_seconds = duration.num_seconds().unsigned_abs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    match days {
        0 => format!("{}{}:{:02}:{:02}", sign, hours, minutes, seconds),
        1 => format!("{}1 day, {}:{:02}:{:02}", sign, hours, minutes, seconds),
        _ => format!("{}{} days, {}:{:02}:{:02}", sign, days, hours, minutes, seconds),
    }
}

/// Format an optional duration, using [`NONE_MARKER`] when absent
pub fn format_optional_duration(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format_duration(d),
        None => NONE_MARKER.to_string(),
    }
}

/// Escape pipes so a title cannot break the table row
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Sort by time to first response ascending, issues without one last.
///
/// Stable, and sorts references so the caller's slice keeps its order.
pub fn sort_by_first_response(issues: &[IssueMetrics]) -> Vec<&IssueMetrics> {
    let mut sorted: Vec<&IssueMetrics> = issues.iter().collect();
    sorted.sort_by_key(|m| (m.time_to_first_response.is_none(), m.time_to_first_response));
    sorted
}

/// Render the Markdown report: summary table first, then one row per issue.
pub fn render_markdown(issues: &[IssueMetrics], summary: &AggregateSummary) -> String {
    if issues.is_empty() {
        return NO_ISSUES_FOUND.to_string();
    }

    let mut out = String::new();
    out.push_str("# Issue Metrics\n\n");
    out.push_str("| Metric | Value |\n");
    out.push_str("| --- | ---: |\n");

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "| Average time to first response | {} |",
        format_optional_duration(summary.average_time_to_first_response)
    );
    let _ = writeln!(
        out,
        "| Average time to close | {} |",
        format_optional_duration(summary.average_time_to_close)
    );
    let _ = writeln!(out, "| Number of issues that remain open | {} |", summary.open_count);
    let _ = writeln!(out, "| Number of issues closed | {} |", summary.closed_count);
    let _ = writeln!(out, "| Total number of issues created | {} |", summary.total_count);
    out.push('\n');

    out.push_str("| Title | URL | Time to first response | Time to close |\n");
    out.push_str("| --- | --- | ---: | ---: |\n");
    for issue in sort_by_first_response(issues) {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            escape_cell(&issue.title),
            issue.url,
            format_optional_duration(issue.time_to_first_response),
            format_optional_duration(issue.time_to_close)
        );
    }

    out
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Humanized form for the console, e.g. "2h 30m". Rounded to whole seconds.
fn humanize(duration: Option<Duration>) -> String {
    match duration.and_then(|d| d.to_std().ok()) {
        Some(d) => {
            let whole = std::time::Duration::from_secs(d.as_secs());
            humantime::format_duration(whole).to_string()
        }
        None => NONE_MARKER.to_string(),
    }
}

/// Console summary printed after the report is written
pub fn format_summary(summary: &AggregateSummary, use_colors: bool) -> String {
    let first_response = humanize(summary.average_time_to_first_response);
    let close = humanize(summary.average_time_to_close);

    if use_colors {
        format!(
            "{}\n  Average time to first response: {}\n  Average time to close: {}\n  Open: {}  Closed: {}  Total: {}",
            "Issue Metrics".bold(),
            first_response.cyan(),
            close.cyan(),
            summary.open_count.yellow(),
            summary.closed_count.green(),
            summary.total_count.bold()
        )
    } else {
        format!(
            "Issue Metrics\n  Average time to first response: {}\n  Average time to close: {}\n  Open: {}  Closed: {}  Total: {}",
            first_response,
            close,
            summary.open_count,
            summary.closed_count,
            summary.total_count
        )
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// One line per issue for verbose console output, in report order.
/// Format: "{state}  {first response}  {title}"
pub fn format_issue_list(issues: &[IssueMetrics], use_colors: bool) -> String {
    format_issue_list_with_width(issues, use_colors, get_terminal_width())
}

fn format_issue_list_with_width(
    issues: &[IssueMetrics],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if issues.is_empty() {
        return "No issues found.".to_string();
    }

    // state (6) + 2 spaces + duration column (16) + 2 spaces
    let state_width = 6;
    let duration_width = 16;
    let fixed_width = state_width + duration_width + 4;

    sort_by_first_response(issues)
        .into_iter()
        .map(|issue| {
            let state = format!("{:<width$}", issue.state.to_string(), width = state_width);
            let response = format!(
                "{:>width$}",
                format_optional_duration(issue.time_to_first_response),
                width = duration_width
            );

            let title = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_title(&issue.title, width - fixed_width)
                }
                Some(_) => truncate_title(&issue.title, 20),
                None => issue.title.clone(),
            };

            if use_colors {
                let state = match issue.state {
                    IssueState::Open => state.yellow().to_string(),
                    IssueState::Closed => state.green().to_string(),
                };
                format!("{}  {}  {}", state, response.bold(), title)
            } else {
                format!("{}  {}  {}", state, response, title)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
