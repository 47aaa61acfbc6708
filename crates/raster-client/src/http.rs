//! HTTP transport for Labelary-compatible rasterization services.

use reqwest::blocking::{Client, multipart};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{RasterConfig, RasterError, RasterImage, Rasterizer};

/// Posts the command stream as multipart field `file` and returns the image.
#[derive(Debug, Clone)]
pub struct HttpRasterizer {
    client: Client,
    endpoint: String,
}

impl HttpRasterizer {
    /// Build a client for `config`, validating the label description.
    pub fn new(config: &RasterConfig) -> Result<Self, RasterError> {
        let endpoint = config.endpoint()?;
        let client = Client::builder()
            .connect_timeout(config.timeouts.connect)
            .timeout(config.timeouts.request)
            .build()
            .map_err(|e| RasterError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// The URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_error(&self, source: reqwest::Error) -> RasterError {
        RasterError::Request {
            url: self.endpoint.clone(),
            source,
        }
    }
}

impl Rasterizer for HttpRasterizer {
    fn rasterize(&self, zpl: &str) -> Result<RasterImage, RasterError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = zpl.len(), "rasterizing");

        let form = multipart::Form::new().text("file", zpl.to_owned());
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "image/png")
            .multipart(form)
            .send()
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RasterError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();
        let bytes = response.bytes().map_err(|e| self.request_error(e))?;
        if bytes.is_empty() {
            return Err(RasterError::EmptyImage);
        }

        Ok(RasterImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
