//! Render Coordinator
//!
//! Applies fetch results to the chart store and the result panels.
//!
//! A success replaces the chart series and the panel content built from the
//! same payload. A failure only sets an error status: the chart and the last
//! good panel content stay on screen.
//!
//! Trend fetches carry a [`FetchTicket`]. Under
//! [`StalenessPolicy::LastCompleted`] responses are applied in completion
//! order, so a slow older response can overwrite a newer one (the staleness
//! window). [`StalenessPolicy::LatestIssued`] drops responses older than the
//! last one applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use uuid::Uuid;

use crate::chart::{ChartStateStore, RenderSurface, TrendSeries};
use crate::client::{
    AnalyzeResponse, BatchResponse, FetchError, TrendsResponse, TwitterSentimentResponse,
};
use crate::panels::{
    BatchResultsView, HealthStatus, Panel, TextResultView, TrendsPanel, TwitterResultsView,
};

/// How out-of-order trend responses are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalenessPolicy {
    /// Apply every response as it completes
    #[default]
    LastCompleted,
    /// Drop responses issued before the last applied one
    LatestIssued,
}

/// Identity of one issued trends fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic per coordinator, starting at 1
    pub seq: u64,
    pub keyword: String,
    /// Refresh session that issued the fetch, `None` for manual loads
    pub session_id: Option<Uuid>,
}

/// What happened to a trends result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Chart replaced; carries the new chart revision
    Applied(u64),
    /// Error shown, chart untouched
    Failed,
    /// Older than the last applied response
    Discarded,
}

/// User-triggered operations and their panel messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AnalyzeText,
    Twitter,
    Trends,
    Batch,
}

impl Operation {
    pub fn loading_message(self) -> &'static str {
        match self {
            Operation::AnalyzeText => "Analyzing sentiment...",
            Operation::Twitter => "Fetching and analyzing tweets...",
            Operation::Trends => "Loading trends...",
            Operation::Batch => "Analyzing batch texts...",
        }
    }

    /// Generic message shown for any transport or status failure
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::AnalyzeText => "Failed to analyze text. Please try again.",
            Operation::Twitter => "Failed to fetch tweets. Please try again.",
            Operation::Trends => "Failed to load trends. Please try again.",
            Operation::Batch => "Failed to analyze batch texts. Please try again.",
        }
    }

    pub fn empty_input_message(self) -> &'static str {
        match self {
            Operation::AnalyzeText => "Please enter some text to analyze.",
            Operation::Twitter => "Please enter a keyword to search.",
            Operation::Trends => "Please enter a keyword for trends.",
            Operation::Batch => "Please enter some texts to analyze (one per line).",
        }
    }
}

/// All result panels of the dashboard
#[derive(Debug, Clone)]
pub struct Panels {
    pub health: HealthStatus,
    pub text: Panel<TextResultView>,
    pub twitter: Panel<TwitterResultsView>,
    pub trends: Panel<TrendsPanel>,
    pub batch: Panel<BatchResultsView>,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            health: HealthStatus::Unknown,
            text: Panel::default(),
            twitter: Panel::default(),
            trends: Panel::default(),
            batch: Panel::default(),
        }
    }
}

/// Applies results to the chart and panels
pub struct RenderCoordinator {
    chart: Arc<ChartStateStore>,
    panels: RwLock<Panels>,
    policy: StalenessPolicy,
    next_seq: AtomicU64,
    /// Seq of the last applied trends result; held for the whole apply and by
    /// [`RenderCoordinator::redraw_trends`]
    applied_seq: Mutex<u64>,
    redraw_tx: watch::Sender<u64>,
}

impl RenderCoordinator {
    pub fn new(chart: Arc<ChartStateStore>, policy: StalenessPolicy) -> Self {
        let (redraw_tx, _) = watch::channel(0);
        Self {
            chart,
            panels: RwLock::new(Panels::default()),
            policy,
            next_seq: AtomicU64::new(1),
            applied_seq: Mutex::new(0),
            redraw_tx,
        }
    }

    pub fn chart(&self) -> &Arc<ChartStateStore> {
        &self.chart
    }

    /// Receive the chart revision each time the chart or trends panel changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.redraw_tx.subscribe()
    }

    /// Snapshot of every panel
    pub async fn panels(&self) -> Panels {
        self.panels.read().await.clone()
    }

    /// Draw the chart and return the trends panel built from the same response
    ///
    /// Holds the apply lock, so no trends result can land between the two reads.
    pub async fn redraw_trends(&self, surface: &mut dyn RenderSurface) -> Panel<TrendsPanel> {
        let _applying = self.applied_seq.lock().await;
        self.chart.redraw(surface).await;
        self.panels.read().await.trends.clone()
    }

    /// Allocate a ticket for a trends fetch about to be issued
    pub fn issue_ticket(&self, keyword: &str, session_id: Option<Uuid>) -> FetchTicket {
        FetchTicket {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            keyword: keyword.to_string(),
            session_id,
        }
    }

    /// Show the loading message for `op`
    pub async fn begin(&self, op: Operation) {
        let message = op.loading_message();
        let mut panels = self.panels.write().await;
        match op {
            Operation::AnalyzeText => panels.text.set_loading(message),
            Operation::Twitter => panels.twitter.set_loading(message),
            Operation::Trends => panels.trends.set_loading(message),
            Operation::Batch => panels.batch.set_loading(message),
        }
    }

    /// Show a validation message for `op`
    pub async fn reject(&self, op: Operation, message: &str) {
        tracing::debug!(operation = ?op, reason = message, "Input rejected");
        let mut panels = self.panels.write().await;
        match op {
            Operation::AnalyzeText => panels.text.set_error(message),
            Operation::Twitter => panels.twitter.set_error(message),
            Operation::Trends => panels.trends.set_error(message),
            Operation::Batch => panels.batch.set_error(message),
        }
    }

    pub async fn on_health_checked(&self, result: &Result<(), FetchError>) -> HealthStatus {
        let status = match result {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                tracing::error!(error = %e, "Health check failed");
                HealthStatus::Failed
            }
        };
        self.panels.write().await.health = status;
        status
    }

    pub async fn on_text_analyzed(&self, result: &Result<AnalyzeResponse, FetchError>) {
        let mut panels = self.panels.write().await;
        match result {
            Ok(response) => panels.text.set_content(TextResultView::from(response)),
            Err(e) => {
                tracing::error!(error = %e, "Analysis error");
                panels.text.set_error(Operation::AnalyzeText.failure_message());
            }
        }
    }

    pub async fn on_twitter_loaded(&self, result: &Result<TwitterSentimentResponse, FetchError>) {
        let mut panels = self.panels.write().await;
        match result {
            Ok(response) => panels.twitter.set_content(TwitterResultsView::from(response)),
            Err(e) => {
                tracing::error!(error = %e, "Twitter analysis error");
                panels.twitter.set_error(Operation::Twitter.failure_message());
            }
        }
    }

    pub async fn on_batch_loaded(&self, result: &Result<BatchResponse, FetchError>) {
        let mut panels = self.panels.write().await;
        match result {
            Ok(response) => panels.batch.set_content(BatchResultsView::from(response)),
            Err(e) => {
                tracing::error!(error = %e, "Batch analysis error");
                panels.batch.set_error(Operation::Batch.failure_message());
            }
        }
    }

    /// Apply a trends result to the chart and the trends panel
    pub async fn on_trends_loaded(
        &self,
        ticket: FetchTicket,
        result: Result<TrendsResponse, FetchError>,
    ) -> RenderOutcome {
        let mut applied_seq = self.applied_seq.lock().await;

        if self.policy == StalenessPolicy::LatestIssued && ticket.seq < *applied_seq {
            tracing::debug!(
                seq = ticket.seq,
                applied_seq = *applied_seq,
                keyword = %ticket.keyword,
                "Discarding stale trends response"
            );
            return RenderOutcome::Discarded;
        }

        match result {
            Ok(response) => {
                let series = TrendSeries::from_response(&response);
                let panel = TrendsPanel::from(&response);

                let revision = self.chart.replace_series(series).await;
                self.panels.write().await.trends.set_content(panel);
                *applied_seq = ticket.seq;
                self.redraw_tx.send_replace(revision);

                tracing::info!(
                    seq = ticket.seq,
                    keyword = %ticket.keyword,
                    points = response.hourly_sentiment.len(),
                    revision,
                    "Trends rendered"
                );
                RenderOutcome::Applied(revision)
            }
            Err(e) => {
                tracing::error!(
                    seq = ticket.seq,
                    keyword = %ticket.keyword,
                    error = %e,
                    "Trends loading error"
                );
                self.panels
                    .write()
                    .await
                    .trends
                    .set_error(Operation::Trends.failure_message());
                self.redraw_tx.send_replace(self.chart.revision().await);
                RenderOutcome::Failed
            }
        }
    }
}
