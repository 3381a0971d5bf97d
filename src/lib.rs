//! Measure time to first response and time to close for GitHub issues and
//! pull requests, and render the results as a Markdown report.
//!
//! The metrics core (`metrics`, `output::formatter`) is pure and synchronous.
//! `github`, `config`, `credentials` and `fetch` are the boundary around it.

pub mod config;
pub mod credentials;
pub mod fetch;
pub mod github;
pub mod metrics;
pub mod output;
