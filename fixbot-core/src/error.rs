//! Platform error types.
//!
//! [`PlatformError`] is what a [`crate::PlatformClient`] reports; its [`PlatformErrorKind`] is the
//! closed set the reply dispatcher classifies.

use std::fmt;

use thiserror::Error;

/// Documented platform failure kinds. Adding a variant forces every classification table to
/// be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformErrorKind {
    /// The request was malformed on our side (missing ids, bad arguments).
    Client,
    /// The platform accepted the HTTP call but rejected the action (`RATELIMIT`, `THREAD_LOCKED`, ...).
    Api,
    /// HTTP 429.
    RateLimited,
    /// HTTP 403: banned from the community, archived thread, blocked by the author.
    Forbidden,
    /// HTTP 5xx.
    ServerError,
    /// HTTP 404: the item no longer exists.
    NotFound,
    /// HTTP 401 or a failed token exchange.
    Unauthorized,
    /// Connection, TLS or timeout failure before a response arrived.
    Transport,
    /// The response body did not have the expected shape.
    Decode,
}

impl fmt::Display for PlatformErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformErrorKind::Client => "client",
            PlatformErrorKind::Api => "api",
            PlatformErrorKind::RateLimited => "rate_limited",
            PlatformErrorKind::Forbidden => "forbidden",
            PlatformErrorKind::ServerError => "server_error",
            PlatformErrorKind::NotFound => "not_found",
            PlatformErrorKind::Unauthorized => "unauthorized",
            PlatformErrorKind::Transport => "transport",
            PlatformErrorKind::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Failure reported by a platform client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct PlatformError {
    pub kind: PlatformErrorKind,
    pub message: String,
}

impl PlatformError {
    pub fn new(kind: PlatformErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::Client, message)
    }

    /// Platform-side rejection, formatted as `CODE: message`.
    pub fn api(code: &str, message: &str) -> Self {
        Self::new(PlatformErrorKind::Api, format!("{}: {}", code, message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::Forbidden, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::ServerError, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::Decode, message)
    }

    /// Maps an HTTP status of a failed response to a kind. Returns `None` for success codes.
    pub fn from_status(status: u16, message: impl Into<String>) -> Option<Self> {
        let kind = match status {
            200..=399 => return None,
            401 => PlatformErrorKind::Unauthorized,
            403 => PlatformErrorKind::Forbidden,
            404 => PlatformErrorKind::NotFound,
            429 => PlatformErrorKind::RateLimited,
            500..=599 => PlatformErrorKind::ServerError,
            _ => PlatformErrorKind::Client,
        };
        Some(Self::new(kind, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_http_codes() {
        assert!(PlatformError::from_status(200, "ok").is_none());
        assert_eq!(
            PlatformError::from_status(403, "x").unwrap().kind,
            PlatformErrorKind::Forbidden
        );
        assert_eq!(
            PlatformError::from_status(404, "x").unwrap().kind,
            PlatformErrorKind::NotFound
        );
        assert_eq!(
            PlatformError::from_status(429, "x").unwrap().kind,
            PlatformErrorKind::RateLimited
        );
        assert_eq!(
            PlatformError::from_status(503, "x").unwrap().kind,
            PlatformErrorKind::ServerError
        );
        assert_eq!(
            PlatformError::from_status(400, "x").unwrap().kind,
            PlatformErrorKind::Client
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = PlatformError::api("RATELIMIT", "try again in 5 minutes");
        assert_eq!(
            err.to_string(),
            "api error: RATELIMIT: try again in 5 minutes"
        );
    }
}
