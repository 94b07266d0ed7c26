//! Bearer token guard for admin routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::config::token_matches;
use crate::error::AppError;
use crate::state::AppState;

/// Require `Authorization: Bearer <ADMIN_API_TOKEN>` when a token is configured.
///
/// With no token configured every request passes; the admin port is then
/// expected to be reachable only from a private network.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the header is missing or wrong.
pub async fn require_api_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config().api_token.as_ref() else {
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        Some(token) if token_matches(expected, token) => Ok(next.run(request).await),
        _ => Err(AppError::Unauthorized),
    }
}
