use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

pub async fn me(
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<PrincipalData> {
    ApiSuccess::new(
        StatusCode::OK,
        PrincipalData {
            subject: principal.subject,
            roles: principal.roles,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalData {
    pub subject: String,
    pub roles: Vec<String>,
}
