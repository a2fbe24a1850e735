use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Availability fetch failed: {0}")]
    Fetch(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Internal error")]
    Internal,
    #[error("Internal error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    /// True for failures the UI should present as "failed to load slots",
    /// never as "no slots available".
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, AppError::Fetch(_) | AppError::Transport(_))
    }
}
