//! Retry loop: attempt, classify, record, hook, repeat until accepted or exhausted.

use super::error::{AggregatedFailure, Evidence, RetryError};
use super::policy::RetryPolicy;
use crate::request::RequestSpec;
use crate::response::Response;
use crate::transport::Transport;
use serde::de::DeserializeOwned;

/// Result of [`RetryController::execute`] for transport error `E` and payload `T`.
pub type RetryResult<T, E> = Result<Response<T>, RetryError<E, T>>;

/// Runs requests through a transport, retrying per [`RetryPolicy`].
///
/// Holds no per-request state, so one controller can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct RetryController<Tr> {
    transport: Tr,
}

impl<Tr: Transport> RetryController<Tr> {
    pub fn new(transport: Tr) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    /// Sends `spec` until a response is accepted or the policy's attempts run out.
    ///
    /// Attempts are sequential. After each rejected attempt the evidence is
    /// recorded and `on_failed_attempt(i)` is awaited, including after the
    /// final attempt, before the aggregated failure is returned. Transport
    /// errors never escape directly; filter/hook errors do, as
    /// [`RetryError::Hook`].
    pub async fn execute<T>(
        &self,
        policy: &RetryPolicy<T>,
        spec: RequestSpec,
    ) -> RetryResult<T, Tr::Error>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        if policy.max_attempts == 0 {
            tracing::warn!("max_attempts = 0 for {}; making a single attempt", spec.url);
        }
        let max_attempts = policy.effective_max_attempts();
        let method = spec.effective_method();
        let mut failures: Vec<Evidence<Tr::Error, T>> = Vec::with_capacity(max_attempts as usize);

        for attempt in 0..max_attempts {
            tracing::debug!(
                "{} {} attempt {}/{}",
                method,
                spec.url,
                attempt + 1,
                max_attempts
            );

            let evidence = match self.transport.perform(&spec).await {
                Ok(response) => {
                    let failed = match policy.is_response_failed(&response).await {
                        Ok(failed) => failed,
                        Err(e) => return Err(RetryError::Hook(e)),
                    };
                    if !failed {
                        if attempt > 0 {
                            tracing::info!(
                                "{} {} succeeded on attempt {}/{}",
                                method,
                                spec.url,
                                attempt + 1,
                                max_attempts
                            );
                        }
                        return Ok(response);
                    }
                    Evidence::Flagged(response)
                }
                Err(e) => Evidence::Transport(e),
            };

            tracing::warn!(
                "{} {} attempt {}/{} failed: {}",
                method,
                spec.url,
                attempt + 1,
                max_attempts,
                evidence
            );
            failures.push(evidence);
            if let Err(e) = policy.failed_attempt(attempt).await {
                return Err(RetryError::Hook(e));
            }
        }

        let failure = AggregatedFailure::new(failures);
        tracing::warn!("{} {}: {}", method, spec.url, failure);
        Err(RetryError::Exhausted(failure))
    }
}
