/// HTTP middleware utilities for post-service
///
/// Provides per-client rate limiting for the listing and creation endpoints.
pub mod rate_limit;

pub use rate_limit::{RateLimitConfig, RateLimiter};
