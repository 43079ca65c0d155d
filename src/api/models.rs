use serde::Serialize;
use serde_json::{json, Value};

/// Error kinds understood by the Alexa smart home skill API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidAuthorizationCredential,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidAuthorizationCredential => "INVALID_AUTHORIZATION_CREDENTIAL",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// `{ "event": { "payload": { "type": .., "message": .. } } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub event: ErrorEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEvent {
    pub payload: ErrorPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            event: ErrorEvent {
                payload: ErrorPayload { kind, message: message.into() },
            },
        }
    }

    /// Envelope for a backend reply with status >= 400.
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => ErrorKind::InvalidAuthorizationCredential,
            _ => ErrorKind::InternalError,
        };
        Self::new(kind, format!("{}: {}", status, body))
    }

    pub fn unparsable(body: &str) -> Self {
        Self::new(ErrorKind::InternalError, format!("Failed to parse response: {}", body))
    }

    pub fn request_failed(reason: &str) -> Self {
        Self::new(ErrorKind::InternalError, format!("Request failed: {}", reason))
    }

    pub fn kind(&self) -> ErrorKind {
        self.event.payload.kind
    }

    pub fn message(&self) -> &str {
        &self.event.payload.message
    }
}

/// What a successful invocation hands back to Alexa.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelayResponse {
    /// The backend's JSON body, untouched.
    Backend(Value),
    Error(ErrorEnvelope),
}

impl RelayResponse {
    pub fn into_value(self) -> Value {
        match self {
            RelayResponse::Backend(value) => value,
            RelayResponse::Error(envelope) => json!({
                "event": {
                    "payload": {
                        "type": envelope.kind().as_str(),
                        "message": envelope.message(),
                    }
                }
            }),
        }
    }
}

/// Authorization context carried by a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub kind: Option<String>,
    pub token: Option<String>,
}

impl Scope {
    pub const BEARER_TOKEN: &'static str = "BearerToken";

    pub fn is_bearer_token(&self) -> bool {
        self.kind.as_deref() == Some(Self::BEARER_TOKEN)
    }

    /// Non-empty token string, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
