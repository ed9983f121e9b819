//! Problem aggregation and diagnostics.
//!
//! - [`Problem`] / [`ProblemKind`] - one recorded resolution failure
//! - [`ProblemCollector`] - ordered aggregation across a whole pass
//! - [`render_report`] - numbered report for console or log output
//! - [`render_properties_sample`] - properties file operators can fill in

pub mod report;
pub mod sample;
pub mod types;

pub use report::render_report;
pub use sample::render_properties_sample;
pub use types::{Problem, ProblemCollector, ProblemKind};
