use chrono::{DateTime, Duration, TimeZone, Utc};
use issue_metrics::fetch::build_report;
use issue_metrics::github::{IssueState, RawIssue};
use issue_metrics::metrics::{derive_all, summarize};
use issue_metrics::output::{render_markdown, NO_ISSUES_FOUND};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 5, 10, 0, 0).unwrap()
}

fn issue(number: u64, title: &str, state: IssueState) -> RawIssue {
    RawIssue {
        number,
        title: title.to_string(),
        url: format!("https://github.com/acme/widgets/issues/{}", number),
        created_at: t0(),
        state,
        closed_at: None,
        comment_timestamps: vec![],
        is_pull_request: false,
        review_timestamps: vec![],
    }
}

#[test]
fn test_end_to_end_closed_issue() {
    let mut closed = issue(1, "Widget spins forever", IssueState::Closed);
    closed.comment_timestamps = vec![t0() + Duration::hours(2)];
    closed.closed_at = Some(t0() + Duration::hours(5));

    let report = build_report(vec![closed]).unwrap();
    let metrics = &report.issues[0];
    assert_eq!(metrics.time_to_first_response, Some(Duration::hours(2)));
    assert_eq!(metrics.time_to_close, Some(Duration::hours(5)));

    let markdown = render_markdown(&report.issues, &report.summary);
    assert!(markdown.contains("| Average time to first response | 2:00:00 |"));
    assert!(markdown.contains("| Average time to close | 5:00:00 |"));
    assert!(markdown.contains("| Number of issues that remain open | 0 |"));
    assert!(markdown.contains("| Number of issues closed | 1 |"));
    assert!(markdown.contains("| Total number of issues created | 1 |"));
    assert!(markdown.contains(
        "| Widget spins forever | https://github.com/acme/widgets/issues/1 | 2:00:00 | 5:00:00 |"
    ));
}

#[test]
fn test_empty_search_renders_sentinel() {
    let (metrics, open, closed) = derive_all(Vec::new()).unwrap();
    assert!(metrics.is_empty());
    assert_eq!((open, closed), (0, 0));

    let summary = summarize(&metrics);
    assert_eq!(render_markdown(&metrics, &summary), NO_ISSUES_FOUND);
}

#[test]
fn test_sort_stability_absent_last() {
    let a = issue(1, "A", IssueState::Open);
    let mut b = issue(2, "B", IssueState::Open);
    b.comment_timestamps = vec![t0() + Duration::seconds(10)];
    let c = issue(3, "C", IssueState::Open);

    let report = build_report(vec![a, b, c]).unwrap();
    let markdown = render_markdown(&report.issues, &report.summary);

    let titles: Vec<&str> = markdown
        .lines()
        .filter(|line| line.contains("/issues/"))
        .map(|line| line.split(" | ").next().unwrap_or_default().trim_start_matches("| "))
        .collect();
    assert_eq!(titles, vec!["B", "A", "C"]);
}

#[test]
fn test_pull_request_review_counts_as_response() {
    let mut pr = issue(7, "Add gizmo support", IssueState::Open);
    pr.is_pull_request = true;
    pr.comment_timestamps = vec![t0() + Duration::hours(6)];
    pr.review_timestamps = vec![t0() + Duration::minutes(30)];

    let mut plain = issue(8, "Gizmo docs", IssueState::Open);
    plain.review_timestamps = vec![t0() + Duration::minutes(30)];

    let report = build_report(vec![pr, plain]).unwrap();
    assert_eq!(report.issues[0].time_to_first_response, Some(Duration::minutes(30)));
    // Reviews only count for pull requests
    assert_eq!(report.issues[1].time_to_first_response, None);
    assert_eq!(
        report.summary.average_time_to_first_response,
        Some(Duration::minutes(30))
    );
}

#[test]
fn test_absent_values_render_as_none_not_zero() {
    let open = issue(3, "Nobody answered", IssueState::Open);
    let report = build_report(vec![open]).unwrap();
    let markdown = render_markdown(&report.issues, &report.summary);

    assert!(markdown.contains("| Average time to first response | None |"));
    assert!(markdown.contains("| Average time to close | None |"));
    assert!(markdown.contains("| Nobody answered | https://github.com/acme/widgets/issues/3 | None | None |"));
    assert!(!markdown.contains("0:00:00"));
}

#[test]
fn test_render_is_byte_identical_across_calls() {
    let mut first = issue(1, "First", IssueState::Closed);
    first.closed_at = Some(t0() + Duration::days(3));
    let mut second = issue(2, "Second", IssueState::Open);
    second.comment_timestamps = vec![t0() + Duration::minutes(15)];

    let report = build_report(vec![first, second]).unwrap();
    let once = render_markdown(&report.issues, &report.summary);
    let twice = render_markdown(&report.issues, &report.summary);
    assert_eq!(once, twice);
    assert!(once.contains("3 days, 0:00:00"));
}

#[test]
fn test_closed_without_timestamp_fails_loudly() {
    let broken = issue(9, "Closed by magic", IssueState::Closed);
    let err = build_report(vec![broken]).unwrap_err();
    assert!(err.to_string().contains("no closed_at timestamp"));
}
