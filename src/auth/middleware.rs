use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::app::AppState;
use crate::handlers::error::ApiError;
use crate::services::ServiceError;

/// Id of the member whose bearer token authorized the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedMember(pub i32);

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid, unexpired bearer token with 401.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(tokens) = state.tokens.as_ref() else {
        return Ok(next.run(request).await);
    };

    let token = bearer_token(&request).ok_or_else(|| {
        ServiceError::Unauthorized("Missing Authorization Header".to_string())
    })?;

    let member_id = tokens.verify(token).map_err(|e| {
        log::debug!("Rejected bearer token: {}", e);
        ServiceError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedMember(member_id));
    Ok(next.run(request).await)
}
