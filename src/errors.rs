use axum::http::StatusCode;
use reqwest::StatusCode as HttpStatus;

/// Failure outcome of a client operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or its response could not be read.
    #[error("network failure: {0}")]
    Network(String),
    /// The server answered with a non-success status or `success: false`.
    #[error("{message}")]
    ServerRejected { status: HttpStatus, message: String },
    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("track {0} is not loaded")]
    UnknownTrack(String),
}

impl ClientError {
    pub fn rejected(status: HttpStatus, message: impl Into<String>) -> Self {
        Self::ServerRejected {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Error returned by the dev proxy handlers.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: format!("upstream request failed: {err}"),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
