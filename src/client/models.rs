//! Data Transfer Objects
//!
//! Request and response types for the sentiment API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// SENTIMENT LABELS
// ============================================

/// Sentiment label attached to a text by the backend
///
/// The backend's ML methods may emit labels other than the three canonical
/// ones; those are kept verbatim in [`Sentiment::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl Sentiment {
    /// Lowercase label, used as a display class
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            _ => Sentiment::Other(label),
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.as_str().to_string()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ============================================
// SINGLE TEXT DTOs
// ============================================

/// Single text analysis request
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Single text analysis response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyzeResponse {
    pub sentiment: Sentiment,
    pub text: String,
    pub method: String,
}

// ============================================
// TWITTER DTOs
// ============================================

/// Aggregate percentages over a set of analyzed texts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SentimentStatistics {
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
    /// Only present on keyword (Twitter) analysis
    #[serde(default)]
    pub total_tweets: Option<u64>,
}

/// A single analyzed tweet
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tweet {
    pub text: String,
    pub user: String,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub retweets: Option<u64>,
    #[serde(default)]
    pub favorites: Option<u64>,
}

/// Keyword sentiment response (`GET /twitter/sentiment`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TwitterSentimentResponse {
    pub keyword: String,
    pub statistics: SentimentStatistics,
    #[serde(default)]
    pub tweets: Vec<Tweet>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ============================================
// TREND DTOs
// ============================================

/// One hourly bucket of sentiment counts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrendPoint {
    pub hour: String,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl TrendPoint {
    pub fn new(hour: impl Into<String>, positive: u64, negative: u64, neutral: u64) -> Self {
        Self {
            hour: hour.into(),
            positive,
            negative,
            neutral,
        }
    }

    /// Sum of the three counts
    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }
}

/// Current sentiment distribution; absent labels count as zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrentSentiment {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub negative: u64,
    #[serde(default)]
    pub neutral: u64,
}

/// Trends response (`GET /twitter/trends`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrendsResponse {
    #[serde(default)]
    pub current_sentiment: CurrentSentiment,
    pub hourly_sentiment: Vec<TrendPoint>,
    #[serde(default)]
    pub sample_tweets: Vec<Tweet>,
}

// ============================================
// BATCH DTOs
// ============================================

/// Batch analysis request
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
}

/// A single result within a batch
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BatchResult {
    pub text: String,
    pub sentiment: Sentiment,
}

/// Batch analysis response (`POST /analyze/batch`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BatchResponse {
    pub statistics: SentimentStatistics,
    #[serde(default)]
    pub results: Vec<BatchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_labels() {
        let s: Sentiment = serde_json::from_str("\"Positive\"").unwrap();
        assert_eq!(s, Sentiment::Positive);

        let s: Sentiment = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(s, Sentiment::Other("mixed".to_string()));
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"mixed\"");
    }

    #[test]
    fn test_trends_response_missing_current_counts() {
        let json = r#"{
            "current_sentiment": {"positive": 7},
            "hourly_sentiment": [{"hour": "00:00", "positive": 5, "negative": 2, "neutral": 3}]
        }"#;

        let response: TrendsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.current_sentiment.positive, 7);
        assert_eq!(response.current_sentiment.negative, 0);
        assert_eq!(response.current_sentiment.neutral, 0);
        assert_eq!(response.hourly_sentiment[0].total(), 10);
        assert!(response.sample_tweets.is_empty());
    }

    #[test]
    fn test_trend_point_total_saturates() {
        let point = TrendPoint::new("00:00", u64::MAX, 1, 1);
        assert_eq!(point.total(), u64::MAX);
    }

    #[test]
    fn test_twitter_response_extra_fields() {
        let json = r#"{
            "keyword": "rust",
            "statistics": {
                "positive_percentage": 60.0,
                "negative_percentage": 20.0,
                "neutral_percentage": 20.0,
                "total_tweets": 5
            },
            "tweets": [{
                "id": "mock_0",
                "text": "Rust is great!",
                "created_at": "2024-01-01T00:00:00",
                "user": "user_0",
                "retweets": 0,
                "favorites": 0,
                "sentiment": "positive"
            }],
            "timestamp": "2024-01-01T00:00:00"
        }"#;

        let response: TwitterSentimentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.statistics.total_tweets, Some(5));
        assert_eq!(response.tweets[0].user, "user_0");
        assert_eq!(response.tweets[0].sentiment, Sentiment::Positive);
    }
}
