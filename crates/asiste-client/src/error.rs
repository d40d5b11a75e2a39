use thiserror::Error;

/// Outcome type returned by every repository and remote operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// User-presentable failure. `message` is always ready for display;
/// `cause` is kept for diagnostics only and never shown to the user.
///
/// `is_auth_error` is true iff the root cause was an authentication
/// rejection (HTTP 401). Callers observing it are expected to force a
/// logout and redirect to the login screen.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub is_auth_error: bool,
    pub cause: Option<anyhow::Error>,
}

impl ApiError {
    /// Plain application-level error with a display-ready message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_auth_error: false,
            cause: None,
        }
    }

    /// Authentication rejection; the session should be discarded.
    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_auth_error: true,
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self {
            message: message.into(),
            is_auth_error: false,
            cause: Some(source),
        }
    }

    /// No stored token: the operation needs a session that does not exist.
    /// Matches the message historically returned by the repositories.
    pub fn not_authenticated() -> Self {
        Self::message("No token found")
    }

    /// Internal failure (store I/O, serialization) surfaced behind a
    /// generic message; the cause travels along for logs.
    pub fn internal(source: anyhow::Error) -> Self {
        Self::with_cause("Error al procesar la respuesta del servidor", source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_message_only() {
        let err = ApiError::with_cause("algo falló", anyhow::anyhow!("io: broken pipe"));
        assert_eq!(err.to_string(), "algo falló");
    }

    #[test]
    fn test_auth_flag() {
        assert!(ApiError::auth("expired").is_auth_error);
        assert!(!ApiError::message("other").is_auth_error);
    }
}
