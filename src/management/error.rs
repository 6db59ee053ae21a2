use std::{fmt, io, time::Duration};

use reqwest::StatusCode;

#[derive(Debug)]
pub enum StoreError {
    IoError(io::Error),
    InvalidIndex(usize),
    NotFound(String),
    Duplicate(String),
    TransportError(reqwest::Error),
    Timeout(Duration),
    StatusError { status: StatusCode, detail: String },
    InvalidResponse(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "file error: {}", e),
            StoreError::InvalidIndex(index) => write!(f, "invalid movie index {}", index),
            StoreError::NotFound(name) => write!(f, "movie '{}' not found", name),
            StoreError::Duplicate(name) => {
                write!(f, "movie '{}' with the same year already exists", name)
            }
            StoreError::TransportError(e) => write!(f, "request failed: {}", e),
            StoreError::Timeout(after) => {
                write!(f, "no answer within {} ms", after.as_millis())
            }
            StoreError::StatusError { status, detail } => {
                write!(f, "backend responded {}: {}", status, detail)
            }
            StoreError::InvalidResponse(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::IoError(e) => Some(e),
            StoreError::TransportError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::TransportError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidResponse(err.to_string())
    }
}
