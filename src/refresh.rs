//! Refresh Controller
//!
//! Periodic trend polling for one keyword at a time.
//!
//! The controller owns a single timer slot. `start` cancels whatever is in
//! the slot before installing a new polling task, so at most one timer is
//! live. Each tick spawns its own fetch; a slow fetch never delays the next
//! tick and `stop` does not cancel fetches already in flight.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::client::TrendsSource;
use crate::error::{DashboardError, DashboardResult};
use crate::render::RenderCoordinator;

/// Interval used when `start` is not given one
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(60_000);

/// Polls a trends source and hands results to the render coordinator
pub struct RefreshController {
    source: Arc<dyn TrendsSource>,
    coordinator: Arc<RenderCoordinator>,
    default_interval: Duration,
    slot: Mutex<Option<RefreshSession>>,
}

/// The keyword + interval binding currently being polled
#[derive(Debug)]
pub struct RefreshSession {
    pub id: Uuid,
    pub keyword: String,
    pub interval: Duration,
    pub started_at: DateTime<Utc>,
    handle: JoinHandle<()>,
}

/// Observable controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Polling {
        id: Uuid,
        keyword: String,
        interval: Duration,
        started_at: DateTime<Utc>,
    },
}

impl RefreshState {
    pub fn is_polling(&self) -> bool {
        matches!(self, RefreshState::Polling { .. })
    }
}

impl RefreshController {
    pub fn new(source: Arc<dyn TrendsSource>, coordinator: Arc<RenderCoordinator>) -> Self {
        Self::with_default_interval(source, coordinator, DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_default_interval(
        source: Arc<dyn TrendsSource>,
        coordinator: Arc<RenderCoordinator>,
        default_interval: Duration,
    ) -> Self {
        Self {
            source,
            coordinator,
            default_interval,
            slot: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<RefreshSession>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start polling `keyword`, replacing any running session
    ///
    /// The first tick fires one interval after the call. Must be called from
    /// within a tokio runtime.
    pub fn start(
        &self,
        keyword: impl Into<String>,
        interval: Option<Duration>,
    ) -> DashboardResult<Uuid> {
        let interval = interval.unwrap_or(self.default_interval);
        if interval.is_zero() {
            return Err(DashboardError::validation(
                "Refresh interval must be greater than zero.",
            ));
        }

        let keyword = keyword.into();
        let id = Uuid::new_v4();

        let mut slot = self.slot();
        if let Some(previous) = slot.take() {
            previous.handle.abort();
            tracing::debug!(session_id = %previous.id, "Replaced refresh session");
        }

        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.source),
            Arc::clone(&self.coordinator),
            id,
            keyword.clone(),
            interval,
        ));

        tracing::info!(
            session_id = %id,
            keyword = %keyword,
            interval_ms = interval.as_millis() as u64,
            "Auto-refresh started"
        );

        *slot = Some(RefreshSession {
            id,
            keyword,
            interval,
            started_at: Utc::now(),
            handle,
        });

        Ok(id)
    }

    /// Stop polling; no-op when idle
    pub fn stop(&self) {
        if let Some(session) = self.slot().take() {
            session.handle.abort();
            tracing::info!(
                session_id = %session.id,
                keyword = %session.keyword,
                ran_for_ms = (Utc::now() - session.started_at).num_milliseconds(),
                "Auto-refresh stopped"
            );
        }
    }

    pub fn state(&self) -> RefreshState {
        match self.slot().as_ref() {
            Some(session) => RefreshState::Polling {
                id: session.id,
                keyword: session.keyword.clone(),
                interval: session.interval,
                started_at: session.started_at,
            },
            None => RefreshState::Idle,
        }
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(
    source: Arc<dyn TrendsSource>,
    coordinator: Arc<RenderCoordinator>,
    session_id: Uuid,
    keyword: String,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Skip the first immediate tick
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if keyword.trim().is_empty() {
            tracing::trace!(session_id = %session_id, "Empty keyword, skipping tick");
            continue;
        }

        let ticket = coordinator.issue_ticket(&keyword, Some(session_id));
        tracing::debug!(session_id = %session_id, seq = ticket.seq, "Refresh tick");

        let source = Arc::clone(&source);
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move {
            let result = source.fetch_trends(&ticket.keyword).await;
            coordinator.on_trends_loaded(ticket, result).await;
        });
    }
}
