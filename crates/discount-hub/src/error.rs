use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HubError>;

/// Problems with an invocation itself, as opposed to registry outcomes.
///
/// Registry refusals (bad count, unknown code, ...) are ordinary results and
/// never show up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HubError {
    #[error("malformed invocation: {0}")]
    MalformedMessage(String),
    #[error("binary frames are not supported")]
    BinaryFrame,
    #[error("unknown hub method '{0}'")]
    UnknownTarget(String),
    #[error("'{target}' expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        target: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid argument '{name}' for '{target}': {reason}")]
    InvalidArgument {
        target: &'static str,
        name: &'static str,
        reason: String,
    },
    #[error("connections from this origin are not allowed")]
    ForbiddenOrigin,
    #[error("registry worker failed: {0}")]
    Worker(String),
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = match self {
            HubError::ForbiddenOrigin => StatusCode::FORBIDDEN,
            HubError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
