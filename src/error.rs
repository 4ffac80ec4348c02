//! Error types for the service client and start-up configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("malformed response: {0}")]
    Decode(String),

    /// The service answered `ok: false`; carries its message when it sent one.
    #[error("rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
}

impl ServiceError {
    /// Text shown to the user, or `fallback` when the error carries nothing
    /// presentable.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Network(_) => "Network error. Is the backend running?".to_string(),
            ServiceError::Rejected(Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ServiceError::Http {
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u32 },

    #[error("api_base must be an http(s) URL, got {0:?}")]
    BadBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_use_backend_hint() {
        let e = ServiceError::Network("connection refused".into());
        assert_eq!(
            e.user_message("Invalid credentials."),
            "Network error. Is the backend running?"
        );
    }

    #[test]
    fn rejection_message_wins_over_fallback() {
        let e = ServiceError::Rejected(Some("Email already registered".into()));
        assert_eq!(e.user_message("Registration failed."), "Email already registered");
    }

    #[test]
    fn blank_rejection_uses_fallback() {
        assert_eq!(
            ServiceError::Rejected(Some("  ".into())).user_message("Invalid credentials."),
            "Invalid credentials."
        );
        assert_eq!(
            ServiceError::Rejected(None).user_message("Invalid credentials."),
            "Invalid credentials."
        );
        assert_eq!(
            ServiceError::Http { status: 500 }.user_message("Invalid credentials."),
            "Invalid credentials."
        );
    }

    #[test]
    fn json_errors_become_decode() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(ServiceError::from(err), ServiceError::Decode(_)));
    }

    #[test]
    fn display_messages() {
        assert_eq!(ServiceError::Http { status: 404 }.to_string(), "HTTP 404");
        assert_eq!(ServiceError::Rejected(None).to_string(), "rejected: no message");
        assert_eq!(
            ConfigError::NonPositive { field: "ticks_per_sec" }.to_string(),
            "ticks_per_sec must be greater than zero"
        );
    }
}
