use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::middleware::AuthenticatedPrincipal;
use crate::inbound::http::middleware::BearerToken;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<StatusCode, ApiError> {
    state.session_service.logout(&token).await?;
    tracing::info!(email = %principal.subject, "Logged out");

    Ok(StatusCode::NO_CONTENT)
}
