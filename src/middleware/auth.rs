use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::AuthError;
use crate::error::ApiError;

/// Authorization guard composed around protected routes with
/// `middleware::from_fn_with_state`, parameterized by the permission the
/// route requires:
///
/// ```ignore
/// get(drinks::list_detail).route_layer(middleware::from_fn_with_state(
///     state.clone(),
///     |state: State<AppState>, request: Request, next: Next| {
///         authorize(state, "get:drinks-detail", request, next)
///     },
/// ))
/// ```
///
/// Verifies the bearer token, checks the required permission against the
/// token's permission set, and injects the decoded claims into request
/// extensions for the handler. Every failure is a distinct 401 kind;
/// access is never granted silently.
pub async fn authorize(
    State(state): State<AppState>,
    permission: &'static str,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;
    let claims = state.verifier.verify(&token).await?;
    claims.require_permission(permission)?;

    tracing::debug!(sub = %claims.sub, permission, "request authorized");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extract the bearer credential from the Authorization header.
///
/// The header must hold exactly two space-separated tokens with a
/// case-insensitive `Bearer` scheme.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let header = headers
        .get("authorization")
        .ok_or(AuthError::MissingHeader)?;

    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(token.to_string())
        }
        _ => Err(AuthError::MalformedHeader),
    }
}
