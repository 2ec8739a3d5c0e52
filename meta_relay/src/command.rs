//! Commands accepted on the relay endpoint.
//!
//! The game posts either `{"command": "init"}` to start a fresh recording or
//! `{"command": "update", "frameInfo": N, "cachedMeta": "..."}` once per
//! frame. Bodies may be JSON or url-encoded forms.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::RelayError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    /// Drop every stored frame.
    Init,
    /// Store `payload` verbatim as frame `frame`.
    Update { frame: u64, payload: String },
}

/// Body as sent by the game, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct RawCommand {
    pub command: Option<String>,
    #[serde(rename = "frameInfo")]
    pub frame_info: Option<Value>,
    #[serde(rename = "cachedMeta")]
    pub cached_meta: Option<Value>,
}

impl TryFrom<RawCommand> for RelayCommand {
    type Error = RelayError;

    fn try_from(raw: RawCommand) -> Result<Self, Self::Error> {
        let command = raw.command.ok_or(RelayError::MissingField("command"))?;
        match command.as_str() {
            "init" => Ok(Self::Init),
            "update" => {
                let frame = parse_frame(raw.frame_info)?;
                let payload = match raw.cached_meta {
                    None | Some(Value::Null) => return Err(RelayError::MissingField("cachedMeta")),
                    Some(Value::String(s)) => s,
                    // An inline object is stored as its JSON text.
                    Some(other) => other.to_string(),
                };
                Ok(Self::Update { frame, payload })
            }
            _ => Err(RelayError::UnknownCommand(command)),
        }
    }
}

fn parse_frame(value: Option<Value>) -> Result<u64, RelayError> {
    let invalid = |reason: &str| RelayError::InvalidField {
        field: "frameInfo",
        reason: reason.to_string(),
    };

    match value {
        None | Some(Value::Null) => Err(RelayError::MissingField("frameInfo")),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| invalid("expected a non-negative integer")),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("expected a non-negative integer"));
            }
            s.parse().map_err(|_| invalid("frame number out of range"))
        }
        Some(_) => Err(invalid("expected a non-negative integer")),
    }
}

/// A body that decodes but has the wrong shape is reported like any other
/// malformed body. Length-limit and read failures keep their own status.
fn bad_body(status: StatusCode, message: String) -> RelayError {
    let status = if status == StatusCode::UNPROCESSABLE_ENTITY {
        StatusCode::BAD_REQUEST
    } else {
        status
    };
    RelayError::BadBody { status, message }
}

#[async_trait]
impl<S> FromRequest<S> for RelayCommand
where
    S: Send + Sync,
{
    type Rejection = RelayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let raw = if content_type.starts_with("application/json") {
            let Json(raw) = Json::<RawCommand>::from_request(req, state)
                .await
                .map_err(|rejection| bad_body(rejection.status(), rejection.body_text()))?;
            raw
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(raw) = Form::<RawCommand>::from_request(req, state)
                .await
                .map_err(|rejection| bad_body(rejection.status(), rejection.body_text()))?;
            raw
        } else {
            return Err(RelayError::UnsupportedMediaType(content_type));
        };

        Self::try_from(raw)
    }
}
