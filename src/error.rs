use serde_json::Value;

pub(crate) const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Normalized error produced by the API client for every failed call.
///
/// Callers see exactly one error shape regardless of whether the failure was
/// a local precondition, an HTTP error response, or a transport problem.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No identity session exists. Raised before any network call is made.
    #[error("User not authenticated. Please log in first.")]
    NotAuthenticated,

    /// The backend rejected the credential (401). The cached session token
    /// has already been cleared; the next protected call re-exchanges.
    #[error("Unauthorized: Please log in again")]
    Unauthorized { details: Option<Value> },

    /// The backend refused the action for this principal (403).
    #[error("Forbidden: You do not have permission to perform this action")]
    Forbidden { details: Option<Value> },

    /// Any other non-2xx response. The server-provided message is passed
    /// through when present.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// No response was received: connect failure, timeout, or an
    /// unparseable payload.
    #[error("{message}")]
    Transport { message: String },
}

impl ApiError {
    /// HTTP status associated with the error.
    ///
    /// Transport-level failures report 500. `NotAuthenticated` has no
    /// status; it never reaches the network.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::NotAuthenticated => None,
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport { .. } => Some(500),
        }
    }

    /// Structured detail payload from the error response, when the server
    /// sent one.
    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { details }
            | ApiError::Forbidden { details }
            | ApiError::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        ApiError::Transport {
            message: err.to_string(),
        }
    }
}

/// Loosely-typed error body returned by the backend.
///
/// The backend usually sends `{"message": ...}` or FastAPI-style
/// `{"detail": ...}`, but any shape is tolerated and degraded to a generic
/// message.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        if let Some(Value::String(detail)) = &self.detail {
            return detail.clone();
        }
        GENERIC_ERROR_MESSAGE.to_string()
    }
}
