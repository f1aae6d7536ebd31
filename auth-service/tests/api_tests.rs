mod common;

use bearer_auth::TokenKind;
use common::TestApp;
use common::ADMIN_EMAIL;
use common::ADMIN_PASSWORD;
use common::CLIENT_EMAIL;
use common::CLIENT_PASSWORD;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/login")
        .json(&json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 86_400);

    let access_token = body["data"]["access_token"].as_str().unwrap();
    let refresh_token = body["data"]["refresh_token"].as_str().unwrap();
    assert!(app
        .token_service
        .validate_kind(access_token, TokenKind::Access));
    assert!(app
        .token_service
        .validate_kind(refresh_token, TokenKind::Refresh));
    assert_eq!(
        app.token_service.extract_roles(access_token).unwrap(),
        vec!["ROLE_ADMIN", "ROLE_USER"]
    );
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let app = TestApp::spawn().await;

    let data = app.login("Admin@Example.com", ADMIN_PASSWORD).await;

    let access_token = data["access_token"].as_str().unwrap();
    assert_eq!(
        app.token_service.extract_subject(access_token).unwrap(),
        ADMIN_EMAIL
    );
}

#[tokio::test]
async fn test_login_without_roles_gets_default_role() {
    let app = TestApp::spawn().await;

    let data = app.login(CLIENT_EMAIL, CLIENT_PASSWORD).await;

    let access_token = data["access_token"].as_str().unwrap();
    assert_eq!(
        app.token_service.extract_roles(access_token).unwrap(),
        vec!["ROLE_USER"]
    );
}

#[tokio::test]
async fn test_login_failures_share_one_response() {
    let app = TestApp::spawn().await;

    let attempts = [
        json!({ "email": ADMIN_EMAIL, "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
        json!({ "email": "not-an-email", "password": ADMIN_PASSWORD }),
    ];

    let mut bodies = Vec::new();
    for attempt in attempts {
        let response = app
            .post("/api/v1/login")
            .json(&attempt)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        bodies.push(body);
    }

    assert_eq!(bodies[0]["data"]["message"], "Invalid credentials");
    assert!(bodies.iter().all(|body| *body == bodies[0]));
}

#[tokio::test]
async fn test_me_returns_principal() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let access_token = data["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/me", access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["subject"], ADMIN_EMAIL);
    assert_eq!(body["data"]["roles"], json!(["ROLE_ADMIN", "ROLE_USER"]));
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["data"]["message"], "Missing Authorization header");
}

#[tokio::test]
async fn test_me_rejects_tampered_token() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let access_token = data["access_token"].as_str().unwrap();

    // Flip the first character of the signature segment
    let signature_start = access_token.rfind('.').unwrap() + 1;
    let mut tampered = access_token.to_string();
    let original = &access_token[signature_start..signature_start + 1];
    let replacement = if original == "A" { "B" } else { "A" };
    tampered.replace_range(signature_start..signature_start + 1, replacement);

    let response = app
        .get_authenticated("/api/v1/me", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_foreign_token() {
    let app = TestApp::spawn().await;
    let foreign = bearer_auth::TokenService::new(
        b"another-secret-key-that-is-also-32-bytes-long",
        bearer_auth::TokenSettings::default(),
        app.revocations.clone(),
    )
    .unwrap()
    .issue_access(ADMIN_EMAIL, &["ROLE_ADMIN".to_string()])
    .unwrap();

    let response = app
        .get_authenticated("/api/v1/me", &foreign)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_rejects_refresh_token() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let refresh_token = data["refresh_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/me", refresh_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_access_token() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let access_token = data["access_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/v1/logout", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(app.token_service.is_revoked(access_token));
    assert_eq!(app.revocations.len(), 1);

    let response = app
        .get_authenticated("/api/v1/me", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let refresh_token = data["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .post("/api/v1/token/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let new_access = body["data"]["access_token"].as_str().unwrap();
    let new_refresh = body["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, refresh_token);

    let response = app
        .get_authenticated("/api/v1/me", new_access)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // The old refresh token is spent
    let response = app
        .post("/api/v1/token/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let access_token = data["access_token"].as_str().unwrap();

    let response = app
        .post("/api/v1/token/refresh")
        .json(&json!({ "refresh_token": access_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_concurrent_refresh_with_same_token_succeeds_once() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let refresh_token = data["refresh_token"].as_str().unwrap();

    let send = || {
        app.post("/api/v1/token/refresh")
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
    };
    let (first, second) = tokio::join!(send(), send());

    let mut statuses = vec![
        first.expect("Failed to execute request").status(),
        second.expect("Failed to execute request").status(),
    ];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::UNAUTHORIZED]);
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["cache-control"], "no-store");
    assert_eq!(headers["pragma"], "no-cache");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_admin_creates_account_that_can_log_in() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let access_token = data["access_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/v1/users", access_token)
        .json(&json!({
            "email": "advisor@example.com",
            "password": "advisor-password",
            "roles": ["advisor"]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "advisor@example.com");
    assert_eq!(body["data"]["roles"], json!(["ROLE_ADVISOR"]));

    let data = app.login("advisor@example.com", "advisor-password").await;
    let advisor_token = data["access_token"].as_str().unwrap();
    assert_eq!(
        app.token_service.extract_roles(advisor_token).unwrap(),
        vec!["ROLE_ADVISOR"]
    );

    // Advisors may create accounts too
    let response = app
        .post_authenticated("/api/v1/users", advisor_token)
        .json(&json!({ "email": "new@example.com", "password": "new-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_account_requires_admin_or_advisor() {
    let app = TestApp::spawn().await;
    let data = app.login(CLIENT_EMAIL, CLIENT_PASSWORD).await;
    let access_token = data["access_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/v1/users", access_token)
        .json(&json!({ "email": "sneaky@example.com", "password": "password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 403);

    let response = app
        .post("/api/v1/login")
        .json(&json!({ "email": "sneaky@example.com", "password": "password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_account_rejects_duplicate_and_invalid_input() {
    let app = TestApp::spawn().await;
    let data = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let access_token = data["access_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/v1/users", access_token)
        .json(&json!({ "email": CLIENT_EMAIL, "password": "password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .post_authenticated("/api/v1/users", access_token)
        .json(&json!({ "email": "not-an-email", "password": "password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
