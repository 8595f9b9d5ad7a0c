//! Sentiment Trend Chart
//!
//! - [`TrendSeries`]: pure projection of hourly trend points
//! - [`ChartStateStore`]: owner of the displayed series
//! - [`RenderSurface`]: where a redraw lands

mod series;
mod store;
mod surface;

pub use series::TrendSeries;
pub use store::{ChartState, ChartStateStore};
pub use surface::{ChartLayout, DatasetStyle, RenderSurface, TextSurface, TREND_CHART};
