use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Offline: {0}")]
    Offline(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl DashboardError {
    /// True for a 404 from the API or a cache miss in offline mode.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DashboardError::NotFound(_) | DashboardError::Api { status: 404, .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
