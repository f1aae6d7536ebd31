use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use bearer_auth::Argon2PasswordHasher;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_account::create_account;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_any_role;
use crate::domain::account::service::AccountService;
use crate::domain::session::service::SessionService;
use crate::outbound::repositories::user::InMemoryUserStore;

/// Roles allowed to create accounts.
pub const ACCOUNT_ADMIN_ROLES: &[&str] = &["ROLE_ADMIN", "ROLE_ADVISOR"];

/// Headers set on every response, replacing any a handler wrote.
fn security_headers() -> [(HeaderName, HeaderValue); 6] {
    [
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        (header::PRAGMA, HeaderValue::from_static("no-cache")),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        (
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; frame-ancestors 'self'; form-action 'self'",
            ),
        ),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000"),
        ),
    ]
}

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService<InMemoryUserStore, Argon2PasswordHasher>>,
    pub account_service: Arc<AccountService<InMemoryUserStore, Argon2PasswordHasher>>,
}

pub fn create_router(
    session_service: Arc<SessionService<InMemoryUserStore, Argon2PasswordHasher>>,
    account_service: Arc<AccountService<InMemoryUserStore, Argon2PasswordHasher>>,
) -> Router {
    let state = AppState {
        session_service,
        account_service,
    };

    let public_routes = Router::new()
        .route("/api/v1/login", post(login))
        .route("/api/v1/token/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/v1/logout", post(logout))
        .route("/api/v1/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Layers run outermost-last: authentication, then the role check
    let account_admin_routes = Router::new()
        .route("/api/v1/users", post(create_account))
        .route_layer(middleware::from_fn_with_state(
            ACCOUNT_ADMIN_ROLES,
            require_any_role,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(account_admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive());

    security_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
        .with_state(state)
}
