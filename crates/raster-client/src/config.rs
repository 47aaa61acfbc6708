//! Configuration types for the rasterization client.

use std::time::Duration;

use crate::RasterError;

/// Print densities (dots per millimetre) the service can emulate.
pub const SUPPORTED_DPMM: [u8; 4] = [6, 8, 12, 24];

/// Largest label edge, in inches, the service accepts.
pub const MAX_LABEL_INCHES: f64 = 15.0;

/// Where to send command streams and how to describe the emulated label.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Service root, e.g. `http://api.labelary.com/v1`.
    pub base_url: String,
    /// Print density in dots per millimetre.
    pub dpmm: u8,
    /// Label width in inches.
    pub width_in: f64,
    /// Label height in inches.
    pub height_in: f64,
    /// Which label of a multi-label stream to render (0-based).
    pub index: u32,
    /// HTTP timeouts.
    pub timeouts: RasterTimeouts,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.labelary.com/v1".into(),
            dpmm: 8,
            width_in: 3.94,
            height_in: 3.94,
            index: 0,
            timeouts: RasterTimeouts::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl RasterConfig {
    /// Config pointing at a different service root, other fields default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Check the label description and return the render endpoint URL:
    /// `{base_url}/printers/{dpmm}dpmm/labels/{width}x{height}/{index}/`.
    pub fn endpoint(&self) -> Result<String, RasterError> {
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(RasterError::InvalidConfig("base_url is empty".into()));
        }
        if !SUPPORTED_DPMM.contains(&self.dpmm) {
            return Err(RasterError::InvalidConfig(format!(
                "dpmm must be one of {SUPPORTED_DPMM:?}, got {}",
                self.dpmm
            )));
        }
        for (edge, value) in [("width", self.width_in), ("height", self.height_in)] {
            if value.is_nan() || value <= 0.0 || value > MAX_LABEL_INCHES {
                return Err(RasterError::InvalidConfig(format!(
                    "label {edge} must be in (0, {MAX_LABEL_INCHES}] inches, got {value}"
                )));
            }
        }
        Ok(format!(
            "{base}/printers/{}dpmm/labels/{}x{}/{}/",
            self.dpmm, self.width_in, self.height_in, self.index
        ))
    }
}

/// HTTP timeout settings.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RasterTimeouts {
    /// Maximum time to establish the connection.
    pub connect: Duration,
    /// Maximum time for the whole request, including the image download.
    pub request: Duration,
}

impl Default for RasterTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            request: Duration::from_secs(30),
        }
    }
}

/// Exponential backoff settings. Only errors where
/// [`RasterError::is_retryable`] is `true` are retried.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Randomize each delay within `[delay / 2, delay]`.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        assert_eq!(
            RasterConfig::default().endpoint().unwrap(),
            "http://api.labelary.com/v1/printers/8dpmm/labels/3.94x3.94/0/"
        );
    }

    #[test]
    fn trailing_slash_and_whole_inches() {
        let mut cfg = RasterConfig::with_base_url("http://localhost:9000/");
        cfg.width_in = 4.0;
        cfg.height_in = 6.0;
        cfg.index = 2;
        assert_eq!(
            cfg.endpoint().unwrap(),
            "http://localhost:9000/printers/8dpmm/labels/4x6/2/"
        );
    }

    #[test]
    fn rejects_bad_label_description() {
        let mut cfg = RasterConfig::default();
        cfg.dpmm = 7;
        assert!(matches!(cfg.endpoint(), Err(RasterError::InvalidConfig(_))));

        let mut cfg = RasterConfig::default();
        cfg.height_in = 0.0;
        assert!(matches!(cfg.endpoint(), Err(RasterError::InvalidConfig(_))));

        let mut cfg = RasterConfig::default();
        cfg.width_in = f64::NAN;
        assert!(cfg.endpoint().is_err());

        assert!(RasterConfig::with_base_url("").endpoint().is_err());
    }
}
