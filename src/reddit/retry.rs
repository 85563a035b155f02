// Bounded retry with exponential backoff for Reddit API calls.
//
// Reddit answers bursts with 429 and has the occasional 5xx. Those, plus
// connect/timeout failures, are retried a few times with capped exponential
// backoff and jitter. Everything else (401, 403, 404, bad JSON) is returned
// immediately.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

/// A non-success HTTP response, kept in the anyhow chain so callers can
/// classify it.
#[derive(Debug, Clone)]
pub struct HttpStatusError {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} returned {}: {}", self.url, self.status, self.body)
    }
}

impl std::error::Error for HttpStatusError {}

impl HttpStatusError {
    pub fn is_transient(&self) -> bool {
        self.status == 429 || (500..600).contains(&self.status)
    }
}

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each following one.
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            base_backoff: Duration::from_secs(2),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts. Used in tests.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Un-jittered backoff before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_backoff
            .saturating_mul(1u32 << exp)
            .min(self.max_backoff)
    }
}

/// Whether an error is worth retrying.
pub fn is_transient_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(status) = cause.downcast_ref::<HttpStatusError>() {
            return status.is_transient();
        }
        if let Some(http) = cause.downcast_ref::<reqwest::Error>() {
            return http.is_timeout() || http.is_connect();
        }
        false
    })
}

/// Run `operation`, retrying transient failures per `policy`.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient_error(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }

                attempt += 1;
                let backoff = policy.backoff(attempt);

                // +/- 25% jitter from the clock's sub-second nanos.
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .subsec_nanos();
                let jitter_factor = 0.75 + (nanos % 500) as f64 / 1000.0;
                let jittered = Duration::from_secs_f64(backoff.as_secs_f64() * jitter_factor);

                warn!(
                    attempt = attempt,
                    max_retries = policy.max_retries,
                    backoff_secs = jittered.as_secs_f64(),
                    error = %err,
                    "Transient Reddit API error, retrying in {:.1}s",
                    jittered.as_secs_f64(),
                );

                tokio::time::sleep(jittered).await;
            }
        }
    }
}
