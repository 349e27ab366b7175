//! Session authentication.
//!
//! Resolves the bearer token into an [`Actor`] and stores it in the request
//! extensions for handlers and access checks.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError, models::actor::Actor, state::AppState, utils::jwt::verify_access_token,
};

pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let actor = authenticate_request(request.headers(), &state.config.jwt_secret)?;
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

fn authenticate_request(headers: &HeaderMap, secret: &str) -> Result<Actor, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

    let claims = verify_access_token(token, secret).map_err(|err| {
        tracing::debug!(error = %err, "Rejected session token");
        AppError::Unauthorized("Invalid or expired session".into())
    })?;

    if claims.tenant_id.is_empty() {
        return Err(AppError::Unauthorized("Session has no tenant".into()));
    }

    Ok(Actor::from(claims))
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}
