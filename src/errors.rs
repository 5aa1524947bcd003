use thiserror::Error;

#[derive(Error, Debug)]
pub enum LazyLoadError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Invalid tree operation: {0}")]
    InvalidTree(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript execution failed: {0}")]
    JavaScriptFailed(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Anyhow error: {0}")]
    AnyhowError(String),
}

pub type Result<T> = std::result::Result<T, LazyLoadError>;

// headless_chrome reports failures as anyhow::Error
impl From<anyhow::Error> for LazyLoadError {
    fn from(err: anyhow::Error) -> Self {
        LazyLoadError::AnyhowError(err.to_string())
    }
}

impl LazyLoadError {
    pub fn element_not_found<E: std::fmt::Debug>(handle: E) -> Self {
        LazyLoadError::ElementNotFound(format!("{:?}", handle))
    }
}
