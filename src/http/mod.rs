//! HTTP client layer — `IssHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::IssHttp;
pub use retry::{RetryConfig, RetryPolicy};
