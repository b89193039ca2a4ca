//! promdemo server library entry.
//!
//! Wires config, the metrics registry, the request middleware and the demo
//! endpoints into one axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
