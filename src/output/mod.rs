pub mod formatter;
pub mod report;

pub use formatter::{
    format_duration, format_issue_list, format_optional_duration, format_summary,
    render_markdown, should_use_colors, sort_by_first_response, NONE_MARKER, NO_ISSUES_FOUND,
};
pub use report::{write_report, DEFAULT_REPORT_FILE};
