//! Error types shared by every service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by Binance on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Error)]
#[error("<APIError> code={code}, msg={msg}")]
pub struct ApiError {
    pub code: i64,
    #[serde(alias = "message")]
    pub msg: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing mandatory parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns the exchange error code when this is an API error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api(e) => Some(e.code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
