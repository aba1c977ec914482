//! Error taxonomy for calls against the storefront backend.
use crate::constants::STOCK_EXCEEDED_MARKER;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (fetch rejected, connection refused).
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
        /// `availableQuantity` carried by stock-limit rejections.
        available: Option<u32>,
    },
    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    #[must_use]
    pub fn from_status(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let available = body
            .get("availableQuantity")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok());
        Self::Status {
            status,
            message,
            available,
        }
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Server-supplied message, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Available stock when the backend rejected a quantity above it.
    ///
    /// Detection matches the backend's message text; a response carrying the
    /// marker but no quantity reports zero available.
    #[must_use]
    pub fn stock_exceeded(&self) -> Option<u32> {
        match self {
            Self::Status {
                message: Some(message),
                available,
                ..
            } if message.contains(STOCK_EXCEEDED_MARKER) => Some(available.unwrap_or(0)),
            _ => None,
        }
    }

    /// Text suitable for a notification or banner.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => String::from("Unable to reach the server. Please try again."),
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
