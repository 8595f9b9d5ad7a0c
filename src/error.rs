//! Dashboard error types
//!
//! Every failure is recovered where it happens and turned into a panel
//! message; these types carry the cause to that boundary.

use thiserror::Error;

use crate::client::FetchError;
use crate::config::ConfigError;

/// Errors surfaced by dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Required user input is missing; no request was sent
    #[error("{0}")]
    Validation(String),

    /// The API call failed (transport, status or body)
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Validation(_))
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
