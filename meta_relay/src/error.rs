use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to relay clients.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("unsupported content type `{0}`")]
    UnsupportedMediaType(String),

    /// Body could not be read or decoded; status comes from the extractor.
    #[error("{message}")]
    BadBody { status: StatusCode, message: String },

    #[error("frame {0} not found")]
    FrameNotFound(u64),

    #[error("no frame stored since the last init")]
    NoFrames,

    #[error("storage error: {context}")]
    Storage {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl RelayError {
    pub fn storage(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidField { .. } | Self::UnknownCommand(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::BadBody { status, .. } => *status,
            Self::FrameNotFound(_) | Self::NoFrames => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidField { .. } => "invalid_field",
            Self::UnknownCommand(_) => "unknown_command",
            Self::UnsupportedMediaType(_) => "unsupported_media_type",
            Self::BadBody { .. } => "bad_body",
            Self::FrameNotFound(_) | Self::NoFrames => "not_found",
            Self::Storage { .. } => "storage",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if let Self::Storage { context, source } = &self {
            error!("Storage failure while trying to {}: {}", context, source);
        }

        let body = ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
