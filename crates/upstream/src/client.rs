//! REST client for the upstream game-data API.

use std::time::Duration;

use async_trait::async_trait;
use hc_core::types::DbId;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde_json::Value;

use crate::backoff::{next_delay, retry_wait, BackoffConfig};
use crate::error::UpstreamError;
use crate::rate_limit::RateLimiter;
use crate::source::GameDataSource;

/// Public community API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.helldivers2.dev/api/v1";

const USER_AGENT: &str = "High-Command-API/1.0";

const SUPER_CLIENT: HeaderName = HeaderName::from_static("x-super-client");
const SUPER_CONTACT: HeaderName = HeaderName::from_static("x-super-contact");

/// Connection and pacing settings for [`UpstreamClient`].
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Minimum interval between requests (upstream quota is 5 per 10 s).
    pub request_delay: Duration,
    pub backoff: BackoffConfig,
    /// Sent as `X-Super-Client`.
    pub client_name: String,
    /// Sent as `X-Super-Contact`.
    pub contact: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            request_delay: Duration::from_secs(2),
            backoff: BackoffConfig::default(),
            client_name: "high-command-api".to_string(),
            contact: "unknown".to_string(),
        }
    }
}

/// Expected top-level JSON shape of a response.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Object,
    Array,
}

impl Shape {
    fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// HTTP client for the upstream API.
#[derive(Debug)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
    backoff: BackoffConfig,
}

impl UpstreamClient {
    /// Build a client with the identifying headers the upstream asks for.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(SUPER_CLIENT, HeaderValue::from_str(&config.client_name)?);
        headers.insert(SUPER_CONTACT, HeaderValue::from_str(&config.contact)?);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(config.request_delay),
            backoff: config.backoff,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    /// GET `path`, retrying only on 429.
    async fn fetch_with_backoff(&self, path: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let mut delay = self.backoff.initial_delay;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            self.limiter.acquire().await;
            let response = self.client.get(&url).send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if attempt > self.backoff.max_retries {
                    return Err(UpstreamError::RateLimited { attempts: attempt });
                }
                let wait = retry_wait(response.headers(), delay, &self.backoff);
                tracing::warn!(
                    path,
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    "Upstream rate limited, backing off",
                );
                tokio::time::sleep(wait).await;
                delay = next_delay(delay, &self.backoff);
                continue;
            }

            let response = Self::ensure_success(response).await?;
            return Ok(response.json::<Value>().await?);
        }
    }

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Fetch `path` and check its shape, logging and swallowing any failure.
    async fn get(&self, resource: &'static str, path: &str, shape: Shape) -> Option<Value> {
        let result = self.fetch_with_backoff(path).await.and_then(|value| {
            if shape.matches(&value) {
                Ok(value)
            } else {
                Err(UpstreamError::Shape {
                    expected: shape.name(),
                })
            }
        });

        match result {
            Ok(value) => Some(value),
            Err(e) if e.is_transient() => {
                tracing::warn!(resource, error = %e, "Upstream fetch failed");
                None
            }
            Err(e) => {
                tracing::error!(resource, error = %e, "Upstream fetch failed");
                None
            }
        }
    }

    async fn get_object(&self, resource: &'static str, path: &str) -> Option<Value> {
        self.get(resource, path, Shape::Object).await
    }

    async fn get_list(&self, resource: &'static str, path: &str) -> Option<Vec<Value>> {
        match self.get(resource, path, Shape::Array).await? {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

#[async_trait]
impl GameDataSource for UpstreamClient {
    async fn war_status(&self) -> Option<Value> {
        self.get_object("war_status", "/war").await
    }

    async fn planets(&self) -> Option<Vec<Value>> {
        self.get_list("planets", "/planets").await
    }

    async fn planet(&self, index: DbId) -> Option<Value> {
        self.get_object("planet", &format!("/planets/{index}")).await
    }

    async fn campaigns(&self) -> Option<Vec<Value>> {
        self.get_list("campaigns", "/campaigns").await
    }

    async fn assignments(&self) -> Option<Vec<Value>> {
        self.get_list("assignments", "/assignments").await
    }

    async fn dispatches(&self) -> Option<Vec<Value>> {
        self.get_list("dispatches", "/dispatches").await
    }

    async fn planet_events(&self) -> Option<Vec<Value>> {
        self.get_list("planet_events", "/planet-events").await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = UpstreamClient::new(UpstreamConfig {
            base_url: "http://localhost:9999/api/v1/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/api/v1");
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let result = UpstreamClient::new(UpstreamConfig {
            contact: "line\nbreak".into(),
            ..Default::default()
        });
        assert_matches!(result, Err(UpstreamError::InvalidHeader(_)));
    }

    #[test]
    fn shape_matching() {
        assert!(Shape::Object.matches(&serde_json::json!({})));
        assert!(!Shape::Object.matches(&serde_json::json!([])));
        assert!(Shape::Array.matches(&serde_json::json!([])));
        assert!(!Shape::Array.matches(&serde_json::json!("text")));
    }
}
