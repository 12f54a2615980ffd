//! Tower middleware layers for the spotkit transport.
//!
//! Layers wrap the [`HyperClient`](crate::HyperClient) service through
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer). Every layer
//! sees a [`PreparedRequest`](crate::PreparedRequest), so the bearer token is
//! already attached.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `middleware-logging` | `.with_logging()` helper (on by default) |
//! | `middleware-concurrency` | `.with_concurrency_limit()` helper |
//!
//! There is no retry layer: a rate-limited request surfaces as an API
//! error carrying the `Retry-After` hint.

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::limit::ConcurrencyLimitLayer;
pub use tower::{Layer, ServiceBuilder};
