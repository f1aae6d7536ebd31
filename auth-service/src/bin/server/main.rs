use std::sync::Arc;

use auth_service::config::Config;
use auth_service::domain::account::service::AccountService;
use auth_service::domain::session::service::SessionService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserStore;
use bearer_auth::Argon2PasswordHasher;
use bearer_auth::RevocationStore;
use bearer_auth::TokenService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "auth_service=debug,bearer_auth=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.jwt.issuer,
        access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
        refresh_token_ttl_seconds = config.jwt.refresh_token_ttl_seconds,
        revocation_sweep_interval_seconds = config.jwt.revocation_sweep_interval_seconds,
        seed_users = config.users.len(),
        "Configuration loaded"
    );

    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let user_store =
        Arc::new(InMemoryUserStore::seeded(&config.users, password_hasher.as_ref()).await?);

    let revocations = Arc::new(RevocationStore::new());
    let token_service = Arc::new(TokenService::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_settings(),
        Arc::clone(&revocations),
    )?);

    let sweeper = revocations.start(config.jwt.sweep_interval());

    let session_service = Arc::new(SessionService::new(
        Arc::clone(&user_store),
        Arc::clone(&password_hasher),
        token_service,
    ));
    let account_service = Arc::new(AccountService::new(user_store, password_hasher));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(session_service, account_service);
    let served = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweeper.stop().await;

    match &served {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(e) => tracing::error!(error = %e, "Server error"),
    };

    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
