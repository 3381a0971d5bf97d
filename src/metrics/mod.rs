pub mod aggregate;
pub mod engine;
pub mod response;

pub use aggregate::{
    average_time_to_close, average_time_to_first_response, count_states, summarize,
    AggregateSummary,
};
pub use engine::{
    derive_all, derive_metrics, measure_time_to_close, measure_time_to_first_response,
    IssueMetrics, MetricsError,
};
pub use response::resolve_first_response;
