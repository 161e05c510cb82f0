//! Failure values produced by the retry loop.

use crate::response::Response;
use std::error::Error;
use std::fmt;

/// Why a single attempt was rejected.
#[derive(Debug)]
pub enum Evidence<E, T> {
    /// The transport failed (network error, non-2xx status, decode failure).
    Transport(E),
    /// The transport succeeded but the response filter flagged the response.
    Flagged(Response<T>),
}

impl<E, T> Evidence<E, T> {
    pub fn transport_error(&self) -> Option<&E> {
        match self {
            Evidence::Transport(e) => Some(e),
            Evidence::Flagged(_) => None,
        }
    }

    pub fn flagged_response(&self) -> Option<&Response<T>> {
        match self {
            Evidence::Transport(_) => None,
            Evidence::Flagged(r) => Some(r),
        }
    }
}

impl<E: fmt::Display, T> fmt::Display for Evidence<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evidence::Transport(e) => write!(f, "{}", e),
            Evidence::Flagged(r) => write!(f, "response flagged as failed (HTTP {})", r.status),
        }
    }
}

/// Terminal failure after every attempt was rejected.
///
/// Holds one evidence entry per attempt, in attempt order.
#[derive(Debug)]
pub struct AggregatedFailure<E, T> {
    message: String,
    evidence: Vec<Evidence<E, T>>,
}

impl<E, T> AggregatedFailure<E, T> {
    pub(crate) fn new(evidence: Vec<Evidence<E, T>>) -> Self {
        let n = evidence.len();
        let message = format!(
            "request failed after {} attempt{}",
            n,
            if n == 1 { "" } else { "s" }
        );
        Self { message, evidence }
    }

    /// Human-readable summary.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn evidence(&self) -> &[Evidence<E, T>] {
        &self.evidence
    }

    pub fn into_evidence(self) -> Vec<Evidence<E, T>> {
        self.evidence
    }

    /// Attempts made; equals the evidence length.
    pub fn attempts(&self) -> usize {
        self.evidence.len()
    }
}

impl<E: fmt::Display, T> fmt::Display for AggregatedFailure<E, T> {
    /// `{:#}` appends every attempt's evidence to the summary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if f.alternate() {
            for (i, e) in self.evidence.iter().enumerate() {
                write!(f, "\n  attempt {}: {}", i, e)?;
            }
        }
        Ok(())
    }
}

impl<E, T> Error for AggregatedFailure<E, T>
where
    E: Error + 'static,
    T: fmt::Debug,
{
    /// The most recent transport error, if any attempt failed at the transport.
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.evidence
            .iter()
            .rev()
            .find_map(|e| e.transport_error().map(|e| e as &(dyn Error + 'static)))
    }
}

/// Error returned by [`RetryController::execute`](super::RetryController::execute)
/// and the method aliases.
#[derive(Debug)]
pub enum RetryError<E, T> {
    /// Every attempt was rejected.
    Exhausted(AggregatedFailure<E, T>),
    /// The response filter or the failure hook returned an error. The loop
    /// stopped at that point and no aggregated failure was built.
    Hook(anyhow::Error),
}

impl<E, T> RetryError<E, T> {
    pub fn as_exhausted(&self) -> Option<&AggregatedFailure<E, T>> {
        match self {
            RetryError::Exhausted(a) => Some(a),
            RetryError::Hook(_) => None,
        }
    }

    pub fn into_exhausted(self) -> Option<AggregatedFailure<E, T>> {
        match self {
            RetryError::Exhausted(a) => Some(a),
            RetryError::Hook(_) => None,
        }
    }
}

impl<E: fmt::Display, T> fmt::Display for RetryError<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted(a) => fmt::Display::fmt(a, f),
            RetryError::Hook(e) => write!(f, "retry hook failed: {:#}", e),
        }
    }
}

impl<E, T> Error for RetryError<E, T>
where
    E: Error + 'static,
    T: fmt::Debug,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RetryError::Exhausted(a) => a.source(),
            RetryError::Hook(e) => Some(e.as_ref()),
        }
    }
}
