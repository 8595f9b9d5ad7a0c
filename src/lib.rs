//! # Sentiment Dashboard
//!
//! Live sentiment trend chart and analysis client for a sentiment-analysis
//! HTTP API.
//!
//! ## Features
//!
//! - **Auto-refresh**: single-timer polling of keyword trends
//! - **Consistent chart**: whole-series swaps, failures never clear the chart
//! - **Result panels**: single text, keyword and batch analysis views
//! - **Staleness control**: optional guard against out-of-order responses
//!
//! ## Modules
//!
//! - [`client`]: HTTP gateway to the sentiment API
//! - [`chart`]: Trend series and the chart state store
//! - [`refresh`]: Periodic trend polling
//! - [`render`]: Applies results to the chart and panels
//! - [`session`]: Owns everything above for one dashboard
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sentiment_dashboard::{Config, DashboardSession, TextSurface};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = DashboardSession::new(&Config::default())?;
//!
//!     // One manual load, then poll every minute
//!     session.load_trends("rust").await?;
//!     session.start_auto_refresh("rust", None)?;
//!
//!     let mut surface = TextSurface::default();
//!     session.redraw(&mut surface).await;
//!     println!("{}", surface.output());
//!
//!     session.shutdown();
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod client;
pub mod config;
pub mod error;
pub mod panels;
pub mod refresh;
pub mod render;
pub mod session;

// Re-export top-level types for convenience
pub use chart::{ChartState, ChartStateStore, RenderSurface, TextSurface, TrendSeries};

pub use client::{
    ApiClientConfig, FetchError, SentimentApiClient, TrendPoint, TrendsResponse, TrendsSource,
};

pub use config::{generate_default_config, Config, ConfigError, DiscoveredConfig};

pub use error::{DashboardError, DashboardResult};

pub use refresh::{RefreshController, RefreshState, DEFAULT_REFRESH_INTERVAL};

pub use render::{FetchTicket, Operation, Panels, RenderCoordinator, RenderOutcome, StalenessPolicy};

pub use session::{parse_batch_input, DashboardSession};
