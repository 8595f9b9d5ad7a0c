//! Dashboard Session
//!
//! The one object owning the chart, the panels and the refresh timer.
//! Construct it at startup and call [`DashboardSession::shutdown`] when done.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::chart::{ChartStateStore, RenderSurface};
use crate::client::{SentimentApiClient, TrendsSource};
use crate::config::Config;
use crate::error::{DashboardError, DashboardResult};
use crate::panels::{
    BatchResultsView, HealthStatus, Panel, TextResultView, TrendsPanel, TwitterResultsView,
};
use crate::refresh::{RefreshController, RefreshState};
use crate::render::{Operation, Panels, RenderCoordinator, RenderOutcome, StalenessPolicy};

/// Process-wide dashboard state
pub struct DashboardSession {
    client: SentimentApiClient,
    chart: Arc<ChartStateStore>,
    coordinator: Arc<RenderCoordinator>,
    refresh: RefreshController,
    tweet_count: u32,
}

impl DashboardSession {
    /// Build a session from configuration
    pub fn new(config: &Config) -> DashboardResult<Self> {
        let client = SentimentApiClient::new(config.api.client_config())?;
        Ok(Self::with_client(
            client,
            config.refresh.staleness_policy(),
            config.refresh.interval(),
            config.api.tweet_count,
        ))
    }

    pub fn with_client(
        client: SentimentApiClient,
        policy: StalenessPolicy,
        refresh_interval: Duration,
        tweet_count: u32,
    ) -> Self {
        let chart = Arc::new(ChartStateStore::new());
        let coordinator = Arc::new(RenderCoordinator::new(Arc::clone(&chart), policy));
        let source: Arc<dyn TrendsSource> = Arc::new(client.clone());
        let refresh =
            RefreshController::with_default_interval(source, Arc::clone(&coordinator), refresh_interval);

        Self {
            client,
            chart,
            coordinator,
            refresh,
            tweet_count,
        }
    }

    pub fn chart(&self) -> &Arc<ChartStateStore> {
        &self.chart
    }

    pub fn coordinator(&self) -> &Arc<RenderCoordinator> {
        &self.coordinator
    }

    pub async fn panels(&self) -> Panels {
        self.coordinator.panels().await
    }

    /// Draw the current chart onto `surface`
    pub async fn redraw(&self, surface: &mut dyn RenderSurface) {
        self.chart.redraw(surface).await;
    }

    /// Draw the chart and return the trends panel from the same response
    pub async fn redraw_trends(&self, surface: &mut dyn RenderSurface) -> Panel<TrendsPanel> {
        self.coordinator.redraw_trends(surface).await
    }

    pub async fn check_health(&self) -> HealthStatus {
        let result = self.client.health().await;
        self.coordinator.on_health_checked(&result).await
    }

    /// Analyze one text
    pub async fn analyze_text(&self, input: &str) -> DashboardResult<TextResultView> {
        let text = input.trim();
        if text.is_empty() {
            return self.reject(Operation::AnalyzeText).await;
        }

        self.coordinator.begin(Operation::AnalyzeText).await;
        let result = self.client.analyze_text(text).await;
        self.coordinator.on_text_analyzed(&result).await;

        Ok(TextResultView::from(&result?))
    }

    /// Analyze recent tweets for a keyword; `count` defaults to the configured value
    pub async fn analyze_twitter(
        &self,
        keyword: &str,
        count: Option<u32>,
    ) -> DashboardResult<TwitterResultsView> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.reject(Operation::Twitter).await;
        }

        self.coordinator.begin(Operation::Twitter).await;
        let result = self
            .client
            .twitter_sentiment(keyword, count.unwrap_or(self.tweet_count))
            .await;
        self.coordinator.on_twitter_loaded(&result).await;

        Ok(TwitterResultsView::from(&result?))
    }

    /// Load trends once for a keyword
    pub async fn load_trends(&self, keyword: &str) -> DashboardResult<RenderOutcome> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.reject(Operation::Trends).await;
        }

        self.coordinator.begin(Operation::Trends).await;
        let ticket = self.coordinator.issue_ticket(keyword, None);
        let result = self.client.trends(keyword).await;
        let error = result.as_ref().err().cloned();
        let outcome = self.coordinator.on_trends_loaded(ticket, result).await;

        match error {
            Some(e) => Err(e.into()),
            None => Ok(outcome),
        }
    }

    /// Analyze one text per non-blank line of `input`
    pub async fn analyze_batch(&self, input: &str) -> DashboardResult<BatchResultsView> {
        let texts = parse_batch_input(input);
        if texts.is_empty() {
            return self.reject(Operation::Batch).await;
        }

        self.coordinator.begin(Operation::Batch).await;
        let result = self.client.analyze_batch(&texts).await;
        self.coordinator.on_batch_loaded(&result).await;

        Ok(BatchResultsView::from(&result?))
    }

    /// Start polling trends for `keyword`
    pub fn start_auto_refresh(
        &self,
        keyword: &str,
        interval: Option<Duration>,
    ) -> DashboardResult<Uuid> {
        self.refresh.start(keyword, interval)
    }

    pub fn stop_auto_refresh(&self) {
        self.refresh.stop();
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresh.state()
    }

    /// Cancel the refresh timer
    pub fn shutdown(&self) {
        self.refresh.stop();
        tracing::info!("Dashboard session shut down");
    }

    async fn reject<T>(&self, op: Operation) -> DashboardResult<T> {
        let message = op.empty_input_message();
        self.coordinator.reject(op, message).await;
        Err(DashboardError::validation(message))
    }
}

/// Split batch input into texts: one per line, blank lines dropped
pub fn parse_batch_input(input: &str) -> Vec<String> {
    input
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
