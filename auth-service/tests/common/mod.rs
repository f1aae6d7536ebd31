use std::sync::Arc;

use auth_service::config::SeedUserConfig;
use auth_service::domain::account::service::AccountService;
use auth_service::domain::session::service::SessionService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserStore;
use bearer_auth::Argon2PasswordHasher;
use bearer_auth::RevocationStore;
use bearer_auth::TokenService;
use bearer_auth::TokenSettings;
use serde_json::json;
use serde_json::Value;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const CLIENT_EMAIL: &str = "client@example.com";
pub const CLIENT_PASSWORD: &str = "client-password";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_service: Arc<TokenService>,
    pub revocations: Arc<RevocationStore>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let seeds = vec![
            SeedUserConfig {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
                roles: vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()],
            },
            SeedUserConfig {
                email: CLIENT_EMAIL.to_string(),
                password: CLIENT_PASSWORD.to_string(),
                roles: vec![],
            },
        ];

        let password_hasher = Arc::new(Argon2PasswordHasher::new());
        let user_store = Arc::new(
            InMemoryUserStore::seeded(&seeds, password_hasher.as_ref())
                .await
                .expect("Failed to seed user store"),
        );

        let revocations = Arc::new(RevocationStore::new());
        let token_service = Arc::new(
            TokenService::new(SECRET, TokenSettings::default(), Arc::clone(&revocations))
                .expect("Failed to create token service"),
        );

        let session_service = Arc::new(SessionService::new(
            Arc::clone(&user_store),
            Arc::clone(&password_hasher),
            Arc::clone(&token_service),
        ));
        let account_service = Arc::new(AccountService::new(user_store, password_hasher));
        let router = create_router(session_service, account_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_service,
            revocations,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Log in and return the response body's `data` object
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/v1/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}
