//! Single chokepoint for every network round trip.
//!
//! Normalizes the three failure planes into [`ApiError`]: transport
//! failures (no response at all), HTTP-level failures (4xx/5xx) and body
//! decode failures. The application-level `header.code` inside an HTTP-200
//! response is deliberately NOT checked here; each repository owns that
//! second layer of the status contract.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use asiste_common::api::{Envelope, ResponseHeader};

use crate::error::{ApiError, ApiResult};

/// Sends the prepared request and parses the enveloped JSON body.
/// Never panics and never leaks a raw `reqwest::Error`.
pub async fn send_envelope<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> ApiResult<Envelope<T>> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => return Err(transport_error(err)),
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(http_error(status, &body));
    }

    match response.json::<Envelope<T>>().await {
        Ok(envelope) => Ok(envelope),
        Err(err) => Err(ApiError::with_cause(
            "Error al procesar la respuesta del servidor",
            anyhow::Error::new(err),
        )),
    }
}

/// Minimal view of an error body: only the header is needed, and servers
/// do not always include a `body` field on failures.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    header: ResponseHeader,
}

/// Maps an HTTP 4xx/5xx response. Prefers the server-supplied message when
/// the body parses as the standard envelope; otherwise falls back to a
/// canned message keyed by status class. 401 always flags an auth error.
fn http_error(status: StatusCode, body: &str) -> ApiError {
    let is_auth_error = status == StatusCode::UNAUTHORIZED;

    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.header.message,
        Err(_) => fallback_http_message(status),
    };

    ApiError {
        message,
        is_auth_error,
        cause: None,
    }
}

fn fallback_http_message(status: StatusCode) -> String {
    if status == StatusCode::UNAUTHORIZED {
        "Tu sesión ha expirado. Por favor, inicia sesión nuevamente.".to_string()
    } else if status.is_server_error() {
        "Error del servidor. Intenta nuevamente más tarde.".to_string()
    } else {
        format!(
            "Error al procesar la respuesta del servidor ({})",
            status.as_u16()
        )
    }
}

/// Maps a transport-level failure (no HTTP response was obtained) to a
/// canned connectivity message by matching known substrings of the error
/// chain. Transport failures are never auth errors.
fn transport_error(err: reqwest::Error) -> ApiError {
    let description = error_chain(&err);
    let message = if err.is_timeout() {
        "Tiempo de espera agotado. Intenta nuevamente."
    } else {
        transport_message(&description)
    };
    ApiError::with_cause(message, anyhow::Error::new(err))
}

/// Substring classification of the low-level error description.
fn transport_message(description: &str) -> &'static str {
    let lower = description.to_lowercase();
    if lower.contains("failed to lookup address") || lower.contains("dns error") {
        "No se pudo conectar al servidor. Verifica tu conexión."
    } else if lower.contains("timed out") || lower.contains("timeout") {
        "Tiempo de espera agotado. Intenta nuevamente."
    } else if lower.contains("connection refused") {
        "El servidor no está disponible. Contacta a soporte."
    } else if lower.contains("no address associated") {
        "No se pudo resolver la dirección del servidor."
    } else {
        "Error de conexión. Verifica tu red e intenta nuevamente."
    }
}

/// Flattens the full source chain into one searchable string; the
/// interesting substrings (dns, refused, timeout) usually live a few
/// levels below the top-level reqwest error.
fn error_chain(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut current: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(err);
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_dns() {
        assert_eq!(
            transport_message("error sending request: dns error: failed to lookup address information"),
            "No se pudo conectar al servidor. Verifica tu conexión."
        );
    }

    #[test]
    fn test_transport_message_timeout() {
        assert_eq!(
            transport_message("operation timed out"),
            "Tiempo de espera agotado. Intenta nuevamente."
        );
    }

    #[test]
    fn test_transport_message_refused() {
        assert_eq!(
            transport_message("tcp connect error: Connection refused (os error 111)"),
            "El servidor no está disponible. Contacta a soporte."
        );
    }

    #[test]
    fn test_transport_message_no_address() {
        assert_eq!(
            transport_message("No address associated with hostname"),
            "No se pudo resolver la dirección del servidor."
        );
    }

    #[test]
    fn test_transport_message_generic() {
        assert_eq!(
            transport_message("connection reset by peer"),
            "Error de conexión. Verifica tu red e intenta nuevamente."
        );
    }

    #[test]
    fn test_http_error_prefers_server_message() {
        let body = r#"{"header":{"code":422,"message":"DNI no registrado"}}"#;
        let err = http_error(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.message, "DNI no registrado");
        assert!(!err.is_auth_error);
    }

    #[test]
    fn test_http_error_401_is_auth_even_with_server_message() {
        let body = r#"{"header":{"code":401,"message":"Token inválido"}}"#;
        let err = http_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.message, "Token inválido");
        assert!(err.is_auth_error);
    }

    #[test]
    fn test_http_error_401_fallback_message() {
        let err = http_error(StatusCode::UNAUTHORIZED, "not json");
        assert_eq!(
            err.message,
            "Tu sesión ha expirado. Por favor, inicia sesión nuevamente."
        );
        assert!(err.is_auth_error);
    }

    #[test]
    fn test_http_error_5xx_fallback_message() {
        let err = http_error(StatusCode::BAD_GATEWAY, "<html>nginx</html>");
        assert_eq!(err.message, "Error del servidor. Intenta nuevamente más tarde.");
        assert!(!err.is_auth_error);
    }

    #[test]
    fn test_http_error_other_fallback_includes_status() {
        let err = http_error(StatusCode::NOT_FOUND, "");
        assert_eq!(
            err.message,
            "Error al procesar la respuesta del servidor (404)"
        );
        assert!(!err.is_auth_error);
    }
}
