//! Error types

use thiserror::Error;

/// Backend creation errors
#[derive(Error, Debug)]
pub enum BackendError {
    /// The renderer exists but could not be initialized
    #[error("Backend initialization failed: {0}")]
    InitializationFailed(String),
}

/// Window construction errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The backend could not be created; the window was rolled back
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}
