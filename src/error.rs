use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApodError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Could not reach {url} after {attempts} attempts")]
    Unreachable { url: String, attempts: u32 },

    #[error("No image found today!")]
    NoImage,

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Script interpreter {0} not found")]
    InterpreterMissing(PathBuf),

    #[error("Error setting APOD picture to background: {0}")]
    Script(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApodError {
    /// Process exit status for this failure. A day without a picture is not an error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApodError::NoImage => 0,
            _ => 1,
        }
    }
}
