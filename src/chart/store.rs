//! Chart State Store
//!
//! Sole owner of the displayed trend series. The series is swapped whole
//! under one lock; readers see either the previous or the new series.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::series::TrendSeries;
use super::surface::{ChartLayout, RenderSurface, TREND_CHART};

/// Holds the currently displayed trend series
pub struct ChartStateStore {
    state: RwLock<ChartState>,
    layout: ChartLayout,
}

/// Point-in-time view of the chart
#[derive(Debug, Clone)]
pub struct ChartState {
    /// Displayed series
    pub series: Arc<TrendSeries>,
    /// Incremented on every replace
    pub revision: u64,
    /// Set by replace, cleared by redraw
    pub dirty: bool,
    /// When the series was last replaced
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ChartState {
    fn default() -> Self {
        Self {
            series: Arc::new(TrendSeries::empty()),
            revision: 0,
            dirty: false,
            updated_at: None,
        }
    }
}

impl ChartStateStore {
    /// Create a store for the sentiment trend chart
    pub fn new() -> Self {
        Self::with_layout(TREND_CHART)
    }

    pub fn with_layout(layout: ChartLayout) -> Self {
        Self {
            state: RwLock::new(ChartState::default()),
            layout,
        }
    }

    /// Replace the displayed series and mark the chart dirty
    ///
    /// # Panics
    ///
    /// Panics if `series` is not well formed.
    pub async fn replace_series(&self, series: TrendSeries) -> u64 {
        assert!(series.is_well_formed(), "replace_series given a malformed series");

        let mut state = self.state.write().await;
        state.series = Arc::new(series);
        state.revision += 1;
        state.dirty = true;
        state.updated_at = Some(Utc::now());

        tracing::debug!(
            revision = state.revision,
            points = state.series.len(),
            "Chart series replaced"
        );
        state.revision
    }

    /// Draw the stored series onto `surface` and clear the dirty flag
    ///
    /// Draws an empty chart if no series was ever set.
    pub async fn redraw(&self, surface: &mut dyn RenderSurface) {
        let mut state = self.state.write().await;
        surface.draw(&self.layout, &state.series);
        state.dirty = false;
    }

    /// Currently displayed series
    pub async fn snapshot(&self) -> Arc<TrendSeries> {
        Arc::clone(&self.state.read().await.series)
    }

    /// Full chart state
    pub async fn state(&self) -> ChartState {
        self.state.read().await.clone()
    }

    pub async fn is_dirty(&self) -> bool {
        self.state.read().await.dirty
    }

    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }
}

impl Default for ChartStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::TextSurface;
    use crate::client::TrendPoint;

    struct CountingSurface {
        draws: usize,
        last_len: usize,
    }

    impl RenderSurface for CountingSurface {
        fn draw(&mut self, _layout: &ChartLayout, series: &TrendSeries) {
            self.draws += 1;
            self.last_len = series.len();
        }
    }

    fn series(hours: &[&str]) -> TrendSeries {
        let points: Vec<_> = hours
            .iter()
            .enumerate()
            .map(|(i, h)| TrendPoint::new(*h, i as u64, 0, 1))
            .collect();
        TrendSeries::from_points(&points)
    }

    #[tokio::test]
    async fn test_redraw_without_series() {
        let store = ChartStateStore::new();
        let mut surface = TextSurface::default();

        store.redraw(&mut surface).await;
        assert!(surface.output().contains("(no data)"));
        assert_eq!(store.revision().await, 0);
        assert!(!store.is_dirty().await);
    }

    #[tokio::test]
    async fn test_replace_marks_dirty_until_redraw() {
        let store = ChartStateStore::new();
        let mut surface = CountingSurface {
            draws: 0,
            last_len: 0,
        };

        let revision = store.replace_series(series(&["00:00", "01:00"])).await;
        assert_eq!(revision, 1);
        assert!(store.is_dirty().await);

        store.redraw(&mut surface).await;
        assert!(!store.is_dirty().await);
        assert_eq!(surface.draws, 1);
        assert_eq!(surface.last_len, 2);
    }

    #[tokio::test]
    async fn test_replace_is_idempotent_in_content() {
        let store = ChartStateStore::new();
        store.replace_series(series(&["00:00"])).await;
        store.replace_series(series(&["00:00"])).await;

        assert_eq!(*store.snapshot().await, series(&["00:00"]));
        assert_eq!(store.revision().await, 2);
    }

    #[tokio::test]
    async fn test_snapshot_is_whole_series() {
        let store = ChartStateStore::new();
        store.replace_series(series(&["00:00", "01:00", "02:00"])).await;
        let before = store.snapshot().await;

        store.replace_series(series(&["05:00"])).await;
        let after = store.snapshot().await;

        assert_eq!(before.len(), 3);
        assert_eq!(after.labels(), ["05:00"]);
        assert!(after.is_well_formed());
    }
}
