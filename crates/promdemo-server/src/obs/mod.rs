//! In-process request metrics.
//!
//! Counters and histograms live in an explicitly constructed `HttpMetrics`
//! registry, updated by the request middleware and rendered by the
//! `/metrics` handler.

pub mod metrics;
pub mod middleware;
pub mod process;

pub use metrics::{Histogram, HttpMetrics, Series, SeriesKey};
