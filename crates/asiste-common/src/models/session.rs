use serde::{Deserialize, Serialize};

/// Authenticated user snapshot, reconstructed from the stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub dni: String,
    pub name: String,
    pub token: String,
}

/// Identity claims carried in the payload segment of the bearer token.
/// Decoded client-side without signature verification; the server is the
/// only party that validates tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub dni: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}
