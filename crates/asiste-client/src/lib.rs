//! Data-access layer for the employee self-service app: an HTTP client for
//! the REST backend, a durable preference store for the session, a TTL
//! cache for home-screen reads, and the repositories that tie them
//! together. UI layers consume repositories only; no error ever crosses a
//! repository boundary as a panic or a raw transport error.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod repo;
pub mod store;
pub mod token;

pub use error::{ApiError, ApiResult};
