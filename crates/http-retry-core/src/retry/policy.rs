use crate::response::Response;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Async predicate deciding whether a 2xx response should count as a failure.
pub type ResponseFilter<T> =
    Arc<dyn for<'a> Fn(&'a Response<T>) -> BoxFuture<'a, anyhow::Result<bool>> + Send + Sync>;

/// Async callback run after each failed attempt, with the zero-based attempt index.
pub type FailedAttemptHook = Arc<dyn Fn(u32) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Retry parameters for one `execute` call.
///
/// Unset hooks fall back to their defaults when the loop consults them:
/// the filter accepts every response, the failure hook does nothing.
pub struct RetryPolicy<T = serde_json::Value> {
    /// Total attempts, including the first. `0` is treated as `1`.
    pub max_attempts: u32,
    response_failed_filter: Option<ResponseFilter<T>>,
    on_failed_attempt: Option<FailedAttemptHook>,
}

impl<T> Default for RetryPolicy<T> {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            response_failed_filter: None,
            on_failed_attempt: None,
        }
    }
}

impl<T> Clone for RetryPolicy<T> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            response_failed_filter: self.response_failed_filter.clone(),
            on_failed_attempt: self.on_failed_attempt.clone(),
        }
    }
}

impl<T> fmt::Debug for RetryPolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("response_failed_filter", &self.response_failed_filter.is_some())
            .field("on_failed_attempt", &self.on_failed_attempt.is_some())
            .finish()
    }
}

impl<T: 'static> RetryPolicy<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Installs an async filter that may borrow the response:
    ///
    /// ```
    /// # use http_retry_core::retry::RetryPolicy;
    /// let policy = RetryPolicy::<serde_json::Value>::new()
    ///     .with_response_failed_filter(|r| Box::pin(async move {
    ///         Ok(r.data["ok"] != serde_json::Value::Bool(true))
    ///     }));
    /// ```
    pub fn with_response_failed_filter<F>(mut self, filter: F) -> Self
    where
        F: for<'a> Fn(&'a Response<T>) -> BoxFuture<'a, anyhow::Result<bool>>
            + Send
            + Sync
            + 'static,
    {
        self.response_failed_filter = Some(Arc::new(filter));
        self
    }

    /// Installs a synchronous filter. Shorthand for filters that never await.
    pub fn with_response_failed_when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Response<T>) -> bool + Send + Sync + 'static,
    {
        self.with_response_failed_filter(move |response| {
            let failed = predicate(response);
            async move { Ok(failed) }.boxed()
        })
    }

    /// Installs the callback run after every failed attempt, the last one included.
    pub fn with_on_failed_attempt<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_failed_attempt = Some(Arc::new(move |attempt| hook(attempt).boxed()));
        self
    }

    /// Attempts the loop will actually make.
    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Runs the filter, or reports "not failed" when none is set.
    pub(crate) async fn is_response_failed(&self, response: &Response<T>) -> anyhow::Result<bool> {
        match &self.response_failed_filter {
            Some(filter) => filter(response).await,
            None => Ok(false),
        }
    }

    /// Runs the failure hook, or does nothing when none is set.
    pub(crate) async fn failed_attempt(&self, attempt: u32) -> anyhow::Result<()> {
        match &self.on_failed_attempt {
            Some(hook) => hook(attempt).await,
            None => Ok(()),
        }
    }
}
