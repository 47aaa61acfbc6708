//! Retry wrapper that adds exponential backoff to any [`Rasterizer`].

use std::time::{Duration, SystemTime};

use crate::config::RetryConfig;
use crate::{RasterError, RasterImage, Rasterizer};

/// Retries transient rasterization failures with exponential backoff.
///
/// Permanent failures (4xx other than 429, empty images, bad config) are
/// returned on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryRasterizer<R> {
    inner: R,
    retry_config: RetryConfig,
}

impl<R> RetryRasterizer<R> {
    /// Wrap `inner` with the given retry policy.
    pub fn new(inner: R, retry_config: RetryConfig) -> Self {
        Self {
            inner,
            retry_config,
        }
    }

    /// Unwrap, returning the inner rasterizer.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Shared reference to the inner rasterizer.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Rasterizer> Rasterizer for RetryRasterizer<R> {
    fn rasterize(&self, zpl: &str) -> Result<RasterImage, RasterError> {
        retry_op(&self.retry_config, || self.inner.rasterize(zpl))
    }
}

fn retry_op<T, F>(config: &RetryConfig, mut op: F) -> Result<T, RasterError>
where
    F: FnMut() -> Result<T, RasterError>,
{
    if config.max_attempts == 0 {
        return Err(RasterError::InvalidConfig(
            "max_attempts must be >= 1".into(),
        ));
    }

    let mut attempt = 0;
    loop {
        let err = match op() {
            Ok(val) => return Ok(val),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => e,
        };
        attempt += 1;
        if attempt == config.max_attempts {
            return Err(RasterError::RetriesExhausted {
                attempts: attempt,
                last_error: Box::new(err),
            });
        }
        let delay = compute_delay(config, attempt - 1);
        tracing::warn!(attempt, ?delay, error = %err, "rasterization failed, retrying");
        std::thread::sleep(delay);
    }
}

/// Backoff for the retry following failed attempt `attempt` (0-indexed):
/// `min(initial_delay * 2^attempt, max_delay)`, optionally jittered into
/// `[delay / 2, delay]`.
fn compute_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let capped = config
        .initial_delay
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(config.max_delay);
    if !config.jitter {
        return capped;
    }

    let half = capped / 2;
    let span = capped.as_nanos() - half.as_nanos();
    if span == 0 {
        return capped;
    }
    // Clock nanoseconds are entropy enough to spread concurrent retries.
    let seed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    let offset = u128::from(seed) % span;
    half + Duration::from_nanos(u64::try_from(offset).unwrap_or(u64::MAX))
}
