//! Retry orchestration for a single outbound HTTP request.
//!
//! Build a [`RetryPolicy`], wrap a [`Transport`] in a [`RetryController`] and
//! call [`RetryController::execute`] or one of the method aliases
//! (`get`, `head`, `options`, `delete`, `post`, `put`, `patch`).

pub mod config;
pub mod logging;
pub mod request;
pub mod response;
pub mod retry;
pub mod transport;

pub use request::{Method, RequestSpec};
pub use response::Response;
pub use retry::{AggregatedFailure, Evidence, RetryController, RetryError, RetryPolicy};
pub use transport::{CurlTransport, Transport, TransportError};
