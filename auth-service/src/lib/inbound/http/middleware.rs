use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use bearer_auth::resolve_bearer;

use super::handlers::ApiError;
use crate::domain::session::models::Principal;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

/// Extension type holding the caller resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

/// Extension type holding the raw bearer token, for handlers that act on it
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Middleware that validates bearer access tokens and adds the principal to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?.to_string();

    let principal = state.session_service.authorize(&token).map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut()
        .insert(AuthenticatedPrincipal(principal));
    req.extensions_mut().insert(BearerToken(token));

    Ok(next.run(req).await)
}

/// Middleware that admits only principals holding at least one of the `allowed` roles
///
/// Runs inside [`authenticate`], which supplies the principal.
pub async fn require_any_role(
    State(allowed): State<&'static [&'static str]>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let principal = req
        .extensions()
        .get::<AuthenticatedPrincipal>()
        .ok_or_else(|| unauthorized("Authentication required"))?;

    let permitted = principal
        .0
        .roles
        .iter()
        .any(|role| allowed.contains(&role.as_str()));

    if !permitted {
        tracing::warn!(
            subject = %principal.0.subject,
            required = ?allowed,
            "Access denied: missing role"
        );
        return Err(ApiError::Forbidden("Insufficient role".to_string()).into_response());
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    resolve_bearer(auth_str).ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
