use crate::transport::TransportError;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// A non-2xx response from the backend.
///
/// Carries the status code and every field of the parsed error body. A body
/// that was empty or not a JSON object leaves `payload` empty.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    pub status: u16,
    pub payload: Map<String, Value>,
}

impl HttpError {
    /// Build from a status code and an optionally parsed body.
    pub fn from_body(status: u16, body: Option<Value>) -> Self {
        let payload = match body {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self { status, payload }
    }

    pub fn detail(&self) -> Option<&Value> {
        self.payload.get("detail")
    }

    /// The merged object `{status, ...payload}`; body fields win on conflict.
    pub fn to_value(&self) -> Value {
        let mut merged = Map::new();
        merged.insert("status".to_string(), Value::from(self.status));
        for (k, v) in &self.payload {
            merged.insert(k.clone(), v.clone());
        }
        Value::Object(merged)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP {}: {}",
            self.status,
            crate::format::format_error(Some(&self.to_value()))
        )
    }
}

/// Discriminant of [`Error`], mostly useful for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Http,
    Network,
    Malformed,
    Configuration,
    Storage,
    Io,
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Network => "network",
            Self::Malformed => "malformed",
            Self::Configuration => "configuration",
            Self::Storage => "storage",
            Self::Io => "io",
            Self::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the client.
///
/// Everything produced at the HTTP boundary is one of `Http`, `Network` or
/// `Malformed`; the remaining variants come from the local layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Http(HttpError),

    #[error("Network transport error: {0}")]
    Network(#[from] TransportError),

    #[error("Malformed response: {message}")]
    Malformed { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::Malformed {
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage {
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(_) => ErrorKind::Http,
            Error::Network(_) => ErrorKind::Network,
            Error::Malformed { .. } => ErrorKind::Malformed,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Storage { .. } => ErrorKind::Storage,
            Error::Io(_) => ErrorKind::Io,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            _ => None,
        }
    }

    /// The single line shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(e) => crate::format::format_error(Some(&e.to_value())),
            Error::Network(e) => e.to_string(),
            Error::Malformed { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Self {
        Error::Http(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_error_merges_status_and_body() {
        let e = HttpError::from_body(404, Some(json!({"detail": "not found"})));
        assert_eq!(e.status, 404);
        assert_eq!(e.detail(), Some(&json!("not found")));
        assert_eq!(e.to_value(), json!({"status": 404, "detail": "not found"}));
    }

    #[test]
    fn non_object_body_leaves_payload_empty() {
        let e = HttpError::from_body(502, Some(json!(["bad", "gateway"])));
        assert!(e.payload.is_empty());
        let e = HttpError::from_body(500, None);
        assert_eq!(e.to_value(), json!({"status": 500}));
    }

    #[test]
    fn user_message_prefers_backend_message() {
        let err = Error::from(HttpError::from_body(
            401,
            Some(json!({"code": "invalid_credentials", "message": "Invalid email or password"})),
        ));
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[test]
    fn user_message_without_detail_serializes_status() {
        let err = Error::from(HttpError::from_body(503, None));
        assert_eq!(err.user_message(), r#"{"status":503}"#);
    }

    #[test]
    fn malformed_kind() {
        let err = Error::malformed("login: missing field `access_token`");
        assert_eq!(err.kind().as_str(), "malformed");
        assert_eq!(err.user_message(), "login: missing field `access_token`");
    }
}
