//! Client for the community Helldivers 2 API.
//!
//! [`UpstreamClient`] paces every request through a [`RateLimiter`], retries
//! HTTP 429 with exponential backoff, and collapses every other failure into
//! "no data" (`None`) after logging it. Consumers depend on the
//! [`GameDataSource`] trait rather than the concrete client.

pub mod backoff;
pub mod client;
pub mod error;
pub mod rate_limit;
pub mod source;

pub use backoff::BackoffConfig;
pub use client::{UpstreamClient, UpstreamConfig, DEFAULT_BASE_URL};
pub use error::UpstreamError;
pub use rate_limit::RateLimiter;
pub use source::GameDataSource;
