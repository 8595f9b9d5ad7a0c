//! Result Panels
//!
//! Pure view models built from API responses. Nothing here performs I/O;
//! the render coordinator decides when a panel changes.

use std::fmt;

use crate::client::{
    AnalyzeResponse, BatchResponse, CurrentSentiment, Sentiment, SentimentStatistics,
    TrendsResponse, TwitterSentimentResponse,
};

/// A panel's latest content plus its transient status
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    /// Last successfully rendered content, kept across failures
    pub content: Option<T>,
    pub status: PanelStatus,
}

/// Transient panel status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelStatus {
    Idle,
    Loading(String),
    Error(String),
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self {
            content: None,
            status: PanelStatus::Idle,
        }
    }
}

impl<T> Panel<T> {
    pub fn set_loading(&mut self, message: impl Into<String>) {
        self.status = PanelStatus::Loading(message.into());
    }

    pub fn set_content(&mut self, content: T) {
        self.content = Some(content);
        self.status = PanelStatus::Idle;
    }

    /// Record an error; previous content stays
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = PanelStatus::Error(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            PanelStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Panel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            PanelStatus::Loading(message) => writeln!(f, "{}", message)?,
            PanelStatus::Error(message) => writeln!(f, "Error: {}", message)?,
            PanelStatus::Idle => {}
        }
        if let Some(content) = &self.content {
            write!(f, "{}", content)?;
        }
        Ok(())
    }
}

/// Format a percentage with one decimal, e.g. `33.3%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// One of the three positive/negative/neutral cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub sentiment: Sentiment,
    pub value: String,
}

impl StatCard {
    fn label(&self) -> &str {
        match self.sentiment {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Other(ref label) => label.as_str(),
        }
    }
}

/// Cards for percentage statistics
pub fn percentage_cards(stats: &SentimentStatistics) -> [StatCard; 3] {
    [
        StatCard {
            sentiment: Sentiment::Positive,
            value: format_percentage(stats.positive_percentage),
        },
        StatCard {
            sentiment: Sentiment::Negative,
            value: format_percentage(stats.negative_percentage),
        },
        StatCard {
            sentiment: Sentiment::Neutral,
            value: format_percentage(stats.neutral_percentage),
        },
    ]
}

/// Cards for raw counts
pub fn count_cards(current: &CurrentSentiment) -> [StatCard; 3] {
    [
        StatCard {
            sentiment: Sentiment::Positive,
            value: current.positive.to_string(),
        },
        StatCard {
            sentiment: Sentiment::Negative,
            value: current.negative.to_string(),
        },
        StatCard {
            sentiment: Sentiment::Neutral,
            value: current.neutral.to_string(),
        },
    ]
}

fn write_cards(f: &mut fmt::Formatter<'_>, cards: &[StatCard; 3]) -> fmt::Result {
    let line = cards
        .iter()
        .map(|c| format!("{}: {}", c.label(), c.value))
        .collect::<Vec<_>>()
        .join("  |  ");
    writeln!(f, "{}", line)
}

// ============================================
// SINGLE TEXT
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct TextResultView {
    pub sentiment: Sentiment,
    pub text: String,
    pub method: String,
}

impl From<&AnalyzeResponse> for TextResultView {
    fn from(response: &AnalyzeResponse) -> Self {
        Self {
            sentiment: response.sentiment.clone(),
            text: response.text.clone(),
            method: response.method.clone(),
        }
    }
}

impl fmt::Display for TextResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] \"{}\"", self.sentiment, self.text)?;
        writeln!(f, "Analyzed using {} method", self.method)
    }
}

// ============================================
// KEYWORD (TWITTER)
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct TweetRow {
    pub text: String,
    pub user: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TwitterResultsView {
    pub cards: [StatCard; 3],
    pub summary: String,
    pub tweets: Vec<TweetRow>,
}

impl From<&TwitterSentimentResponse> for TwitterResultsView {
    fn from(response: &TwitterSentimentResponse) -> Self {
        let total = response
            .statistics
            .total_tweets
            .unwrap_or(response.tweets.len() as u64);

        Self {
            cards: percentage_cards(&response.statistics),
            summary: format!("Analyzed {} tweets for \"{}\"", total, response.keyword),
            tweets: response
                .tweets
                .iter()
                .map(|t| TweetRow {
                    text: t.text.clone(),
                    user: t.user.clone(),
                    sentiment: t.sentiment.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for TwitterResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cards(f, &self.cards)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "Recent Tweets")?;
        for tweet in &self.tweets {
            writeln!(f, "  {}", tweet.text)?;
            writeln!(f, "    @{} [{}]", tweet.user, tweet.sentiment)?;
        }
        Ok(())
    }
}

// ============================================
// TRENDS
// ============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyRow {
    pub hour: String,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub total: u64,
}

/// "Current Sentiment Distribution" and "Hourly Trends" from one response
#[derive(Debug, Clone, PartialEq)]
pub struct TrendsPanel {
    pub current: [StatCard; 3],
    pub hourly: Vec<HourlyRow>,
}

impl From<&TrendsResponse> for TrendsPanel {
    fn from(response: &TrendsResponse) -> Self {
        Self {
            current: count_cards(&response.current_sentiment),
            hourly: response
                .hourly_sentiment
                .iter()
                .map(|p| HourlyRow {
                    hour: p.hour.clone(),
                    positive: p.positive,
                    negative: p.negative,
                    neutral: p.neutral,
                    total: p.total(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for TrendsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Sentiment Distribution")?;
        write_cards(f, &self.current)?;
        writeln!(f)?;
        writeln!(f, "Hourly Trends")?;
        for row in &self.hourly {
            writeln!(
                f,
                "  {}  +{} pos  -{} neg  ~{} neu  Total: {}",
                row.hour, row.positive, row.negative, row.neutral, row.total
            )?;
        }
        Ok(())
    }
}

// ============================================
// BATCH
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    /// 1-based position in the submitted batch
    pub index: usize,
    pub text: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchResultsView {
    pub cards: [StatCard; 3],
    pub results: Vec<BatchRow>,
}

impl From<&BatchResponse> for BatchResultsView {
    fn from(response: &BatchResponse) -> Self {
        Self {
            cards: percentage_cards(&response.statistics),
            results: response
                .results
                .iter()
                .enumerate()
                .map(|(i, r)| BatchRow {
                    index: i + 1,
                    text: r.text.clone(),
                    sentiment: r.sentiment.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for BatchResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch Analysis Results")?;
        write_cards(f, &self.cards)?;
        for row in &self.results {
            writeln!(f, "  [{}] Text {}: \"{}\"", row.sentiment, row.index, row.text)?;
        }
        Ok(())
    }
}

// ============================================
// HEALTH
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Unknown,
    Healthy,
    Failed,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Unknown => write!(f, "API status unknown"),
            HealthStatus::Healthy => write!(f, "API is healthy and running"),
            HealthStatus::Failed => write!(f, "API connection failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BatchResult, TrendPoint};

    fn stats(p: f64, n: f64, u: f64) -> SentimentStatistics {
        SentimentStatistics {
            positive_percentage: p,
            negative_percentage: n,
            neutral_percentage: u,
            total_tweets: None,
        }
    }

    #[test]
    fn test_percentages_round_consistently() {
        let cards = percentage_cards(&stats(33.333, 33.333, 33.334));
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["33.3%", "33.3%", "33.3%"]);

        let sum: f64 = cards
            .iter()
            .map(|c| c.value.trim_end_matches('%').parse::<f64>().unwrap())
            .sum();
        assert!((sum - 100.0).abs() <= 0.1 + 1e-9);
    }

    #[test]
    fn test_trends_panel_totals_match_series() {
        let response = TrendsResponse {
            current_sentiment: CurrentSentiment {
                positive: 8,
                negative: 1,
                neutral: 0,
            },
            hourly_sentiment: vec![
                TrendPoint::new("10:00", 3, 1, 2),
                TrendPoint::new("11:00", 5, 0, 1),
            ],
            sample_tweets: vec![],
        };

        let panel = TrendsPanel::from(&response);
        assert_eq!(panel.current[0].value, "8");
        assert_eq!(panel.current[2].value, "0");
        assert_eq!(panel.hourly[0].total, 6);
        assert_eq!(panel.hourly[1].total, 6);

        let series = crate::chart::TrendSeries::from_response(&response);
        for (row, pos) in panel.hourly.iter().zip(series.positive()) {
            assert_eq!(row.positive, *pos);
        }
    }

    #[test]
    fn test_batch_rows_are_one_based() {
        let response = BatchResponse {
            statistics: stats(50.0, 50.0, 0.0),
            results: vec![
                BatchResult {
                    text: "good".into(),
                    sentiment: Sentiment::Positive,
                },
                BatchResult {
                    text: "bad".into(),
                    sentiment: Sentiment::Negative,
                },
            ],
        };

        let view = BatchResultsView::from(&response);
        assert_eq!(view.results[0].index, 1);
        assert_eq!(view.results[1].index, 2);
        assert!(view.to_string().contains("Text 2: \"bad\""));
    }

    #[test]
    fn test_panel_error_keeps_content() {
        let mut panel: Panel<String> = Panel::default();
        panel.set_content("first".to_string());
        panel.set_loading("Analyzing...");
        panel.set_error("Failed. Please try again.");

        assert_eq!(panel.content.as_deref(), Some("first"));
        assert_eq!(panel.error(), Some("Failed. Please try again."));
    }
}
