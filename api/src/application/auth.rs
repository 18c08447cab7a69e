use std::sync::Arc;

use axum::{
    RequestPartsExt,
    extract::{Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Shared secret the CRM presents as a bearer token.
#[derive(Clone)]
pub struct IngestSecret(Arc<str>);

impl IngestSecret {
    pub fn new(secret: &str) -> Self {
        Self(Arc::from(secret))
    }

    fn matches(&self, token: &str) -> bool {
        !self.0.is_empty() && self.0.as_ref() == token
    }
}

#[derive(Debug, Error, Deserialize, Serialize, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token not found")]
    TokenNotFound,
    #[error("Invalid token")]
    InvalidToken,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    code: String,
    message: String,
    status: i64,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let error_response = ErrorResponse {
            code: "E_UNAUTHORIZED".to_string(),
            message: "Unauthorized".to_string(),
            status: status.as_u16() as i64,
        };

        (status, axum::Json(error_response)).into_response()
    }
}

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Result<String, AuthError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AuthError::TokenNotFound)?;

    Ok(bearer.token().to_string())
}

/// Rejects requests whose bearer token is not the ingestion secret.
pub async fn require_ingest_token(
    State(secret): State<IngestSecret>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (mut parts, body) = req.into_parts();

    let token = match extract_token_from_bearer(&mut parts).await {
        Ok(token) => token,
        Err(e) => {
            warn!(uri = %parts.uri, "missing bearer token");
            return Err(e);
        }
    };

    if !secret.matches(&token) {
        warn!(uri = %parts.uri, "bearer token mismatch");
        return Err(AuthError::InvalidToken);
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
