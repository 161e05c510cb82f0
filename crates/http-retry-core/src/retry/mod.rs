//! Retry orchestration around a single HTTP request.
//!
//! [`RetryController`] issues attempts through a [`Transport`](crate::transport::Transport),
//! lets the policy's filter reclassify 2xx responses as failures, runs the
//! failure hook after each rejected attempt, and returns either the first
//! accepted response or an [`AggregatedFailure`] holding every attempt's evidence.

pub mod backoff;
mod error;
mod methods;
mod policy;
mod run;

pub use error::{AggregatedFailure, Evidence, RetryError};
pub use policy::{FailedAttemptHook, ResponseFilter, RetryPolicy};
pub use run::{RetryController, RetryResult};
