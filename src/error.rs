use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Exchange API error ({status}): {message}")]
    ExchangeApi { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid position data: {0}")]
    InvalidPositionData(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TrackerError::Network(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            TrackerError::Network(format!("Connection error: {}", err))
        } else {
            TrackerError::Network(format!("HTTP error: {}", err))
        }
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Storage(format!("File I/O error: {}", err))
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        TrackerError::Storage(format!("CSV error: {}", err))
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
