//! Ready-made `on_failed_attempt` hooks that sleep between attempts.
//!
//! Nothing here is applied implicitly; pass a hook to
//! [`RetryPolicy::with_on_failed_attempt`](super::RetryPolicy::with_on_failed_attempt).

use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;

/// Delay after the failed attempt with zero-based index `attempt`:
/// `base * 2^attempt`, capped at `max`. The exponent stops growing at 8.
pub fn delay_for(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exp = 1u32 << attempt.min(8);
    base.saturating_mul(exp).min(max)
}

/// Exponential backoff hook. Sleeps after every failed attempt, the last one included.
pub fn exponential(
    base: Duration,
    max: Duration,
) -> impl Fn(u32) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync + Clone + 'static {
    move |attempt| sleep(delay_for(attempt, base, max))
}

/// Exponential backoff that skips the sleep once `max_attempts` have failed,
/// so exhaustion is reported without a trailing delay.
pub fn exponential_for(
    max_attempts: u32,
    base: Duration,
    max: Duration,
) -> impl Fn(u32) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync + Clone + 'static {
    let last = max_attempts.max(1) - 1;
    move |attempt| {
        if attempt >= last {
            return async { Ok(()) }.boxed();
        }
        sleep(delay_for(attempt, base, max))
    }
}

/// Constant delay after every failed attempt.
pub fn fixed(
    delay: Duration,
) -> impl Fn(u32) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync + Clone + 'static {
    move |_| sleep(delay)
}

fn sleep(delay: Duration) -> BoxFuture<'static, anyhow::Result<()>> {
    async move {
        if !delay.is_zero() {
            tracing::debug!("backing off for {:?}", delay);
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn delay_grows_and_is_capped() {
        let base = Duration::from_millis(250);
        let max = Duration::from_secs(30);
        assert_eq!(delay_for(0, base, max), Duration::from_millis(250));
        assert_eq!(delay_for(1, base, max), Duration::from_millis(500));
        assert_eq!(delay_for(3, base, max), Duration::from_secs(2));
        assert_eq!(delay_for(8, base, max), Duration::from_secs(30));
        assert_eq!(delay_for(u32::MAX, base, max), Duration::from_secs(30));
    }

    #[test]
    fn exponent_stops_at_eight() {
        let base = Duration::from_millis(1);
        let max = Duration::from_secs(3600);
        assert_eq!(delay_for(8, base, max), Duration::from_millis(256));
        assert_eq!(delay_for(20, base, max), Duration::from_millis(256));
    }

    #[tokio::test(start_paused = true)]
    async fn exponential_hook_sleeps() {
        let hook = exponential(Duration::from_secs(1), Duration::from_secs(10));
        let start = tokio::time::Instant::now();
        hook(2).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(4) && elapsed < Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn exponential_for_skips_final_attempt() {
        let hook = exponential_for(3, Duration::from_secs(1), Duration::from_secs(10));
        let start = tokio::time::Instant::now();
        hook(1).await.unwrap();
        let after_sleep = start.elapsed();
        assert!(after_sleep >= Duration::from_secs(2) && after_sleep < Duration::from_secs(3));
        hook(2).await.unwrap();
        assert_eq!(start.elapsed(), after_sleep);
    }

    #[tokio::test]
    async fn fixed_zero_returns_immediately() {
        let hook = fixed(Duration::ZERO);
        let start = Instant::now();
        hook(5).await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
