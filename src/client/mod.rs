//! Sentiment API Gateway
//!
//! Outbound calls to the sentiment-analysis backend.
//!
//! ## Endpoints
//!
//! - `GET  /health`
//! - `POST /analyze/sentiment`
//! - `GET  /twitter/sentiment?keyword=&count=`
//! - `GET  /twitter/trends?keyword=`
//! - `POST /analyze/batch`

mod gateway;
mod models;

pub use gateway::{ApiClientConfig, FetchError, SentimentApiClient};
pub use models::{
    AnalyzeRequest, AnalyzeResponse, BatchRequest, BatchResponse, BatchResult, CurrentSentiment,
    HealthResponse, Sentiment, SentimentStatistics, TrendPoint, TrendsResponse, Tweet,
    TwitterSentimentResponse,
};

use async_trait::async_trait;

/// Anything that can produce trend data for a keyword
///
/// The refresh controller polls through this trait, so it can be driven by
/// the HTTP client or by an in-memory source.
#[async_trait]
pub trait TrendsSource: Send + Sync {
    /// Fetch hourly sentiment trends for `keyword`
    async fn fetch_trends(&self, keyword: &str) -> Result<TrendsResponse, FetchError>;
}
