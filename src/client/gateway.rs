//! Sentiment API REST Client
//!
//! HTTP client for the sentiment-analysis backend. Every call is a single
//! attempt; failures are normalized into [`FetchError`].

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::models::*;
use super::TrendsSource;

/// Sentiment API REST client
#[derive(Clone)]
pub struct SentimentApiClient {
    client: Client,
    config: ApiClientConfig,
}

/// Configuration for the sentiment API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the API, including the `/api` prefix
    pub base_url: String,
    /// Optional per-request timeout; `None` leaves requests unbounded
    pub request_timeout_ms: Option<u64>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001/api".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl SentimentApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiClientConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let client = builder.build().map_err(FetchError::from)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Build the full URL for an endpoint with percent-encoded query parameters
    pub fn url(&self, endpoint: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }

    /// Check whether the API reports itself healthy
    pub async fn health(&self) -> Result<(), FetchError> {
        let response = self.send(Method::GET, "/health", &[], None::<&()>).await?;
        tracing::debug!(status = %response.status(), "API health check passed");
        Ok(())
    }

    /// Analyze the sentiment of a single text
    pub async fn analyze_text(&self, text: &str) -> Result<AnalyzeResponse, FetchError> {
        let body = AnalyzeRequest {
            text: text.to_string(),
        };
        self.request(Method::POST, "/analyze/sentiment", &[], Some(&body))
            .await
    }

    /// Fetch and analyze recent tweets for a keyword
    pub async fn twitter_sentiment(
        &self,
        keyword: &str,
        count: u32,
    ) -> Result<TwitterSentimentResponse, FetchError> {
        let count = count.to_string();
        self.request(
            Method::GET,
            "/twitter/sentiment",
            &[("keyword", keyword), ("count", count.as_str())],
            None::<&()>,
        )
        .await
    }

    /// Fetch hourly sentiment trends for a keyword
    pub async fn trends(&self, keyword: &str) -> Result<TrendsResponse, FetchError> {
        self.request(
            Method::GET,
            "/twitter/trends",
            &[("keyword", keyword)],
            None::<&()>,
        )
        .await
    }

    /// Analyze a batch of texts
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<BatchResponse, FetchError> {
        let body = BatchRequest {
            texts: texts.to_vec(),
        };
        self.request(Method::POST, "/analyze/batch", &[], Some(&body))
            .await
    }

    /// Issue a request and return the raw JSON body
    pub async fn fetch_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<serde_json::Value, FetchError> {
        self.request(method, endpoint, query, body).await
    }

    /// Issue a request and decode the JSON body into `T`
    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, endpoint, query, body).await?;
        let bytes = response.bytes().await.map_err(FetchError::from)?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Send a request, turning transport failures and non-2xx statuses into errors
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Response, FetchError> {
        let url = self.url(endpoint, query);
        tracing::debug!(method = %method, url = %url, "Sending API request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(FetchError::from)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(FetchError::Status {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl TrendsSource for SentimentApiClient {
    async fn fetch_trends(&self, keyword: &str) -> Result<TrendsResponse, FetchError> {
        self.trends(keyword).await
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the sentiment API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced an HTTP response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered outside the 2xx range
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// A 2xx body that is not the expected JSON shape
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> SentimentApiClient {
        SentimentApiClient::new(ApiClientConfig {
            base_url: base_url.to_string(),
            request_timeout_ms: None,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5001/api");
        assert!(config.request_timeout_ms.is_none());
    }

    #[test]
    fn test_url_encodes_query() {
        let client = client("http://localhost:5001/api/");
        let url = client.url("/twitter/trends", &[("keyword", "rust & c#")]);
        assert_eq!(
            url,
            "http://localhost:5001/api/twitter/trends?keyword=rust%20%26%20c%23"
        );

        let url = client.url("twitter/sentiment", &[("keyword", "ai"), ("count", "10")]);
        assert_eq!(
            url,
            "http://localhost:5001/api/twitter/sentiment?keyword=ai&count=10"
        );
    }

    #[test]
    fn test_fetch_error_status() {
        let err = FetchError::Status {
            status: 404,
            message: "No tweets found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API error 404: No tweets found");
        assert_eq!(FetchError::Transport("refused".into()).status(), None);
    }
}
