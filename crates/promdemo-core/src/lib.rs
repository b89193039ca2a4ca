//! promdemo core: transport-agnostic primitives shared by the server.
//!
//! Holds the error surface and the route normalizer that keeps metric label
//! cardinality bounded. Carries no runtime or HTTP dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod route;

/// Shared result type.
pub use error::{PromDemoError, Result};
pub use route::{normalize_route, status_class};
