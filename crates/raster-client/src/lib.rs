//! Rasterization client: turn a ZPL command stream into a preview image by
//! calling a Labelary-compatible HTTP service.
//!
//! The API is synchronous (blocking `reqwest`), with no async runtime
//! required. Wrap any [`Rasterizer`] in a [`RetryRasterizer`] to retry
//! transient failures with exponential backoff.

mod config;
mod error;
mod http;
mod retry;

pub use config::{MAX_LABEL_INCHES, RasterConfig, RasterTimeouts, RetryConfig, SUPPORTED_DPMM};
pub use error::RasterError;
pub use http::HttpRasterizer;
pub use retry::RetryRasterizer;

/// A rendered label image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Encoded image bytes (PNG unless the service says otherwise).
    pub bytes: Vec<u8>,
    /// The response `Content-Type`, e.g. `image/png`.
    pub content_type: String,
}

impl RasterImage {
    /// Whether the service reported a PNG body.
    pub fn is_png(&self) -> bool {
        self.content_type.starts_with("image/png")
    }
}

/// Renders a ZPL command stream to an image.
pub trait Rasterizer {
    /// Render `zpl`. Implementations must not modify the stream.
    fn rasterize(&self, zpl: &str) -> Result<RasterImage, RasterError>;
}
