/// Errors raised inside the upstream client.
///
/// These never leave the client's resource operations, which log them and
/// return `None`. They exist so the failure can be classified and logged.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status other than 429.
    #[error("Upstream API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Still rate limited after exhausting every retry.
    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// The body parsed but is not the expected JSON shape.
    #[error("Unexpected response shape: expected {expected}")]
    Shape { expected: &'static str },

    /// A configured header value is not valid HTTP.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl UpstreamError {
    /// Transient failures may succeed on a later cycle; the rest point at a
    /// contract problem.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) | Self::RateLimited { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Shape { .. } | Self::InvalidHeader(_) => false,
        }
    }
}
