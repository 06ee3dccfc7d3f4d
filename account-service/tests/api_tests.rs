mod common;

use account_service::account::models::AccountId;
use account_service::account::ports::AccountRepository;
use auth::TokenService;
use chrono::Duration;
use common::RecordingMailer;
use common::TestApp;
use common::JWT_SECRET;
use common::LOGIN_URL;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_signup_success_sends_verification_email() {
    let app = TestApp::spawn().await;

    let response = app.signup("Ada", "ada@example.com", "secret123").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "Signup successful. Verification email sent."
    );
    assert!(body.get("token").is_none());

    let sent = app.mailer.last_to("ada@example.com");
    assert_eq!(sent.recipient_name, "Ada");
    assert!(sent
        .link
        .starts_with(&format!("{}/verify?token=", app.address)));

    let account = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .expect("Account not stored");
    assert!(!account.verified);
    assert_ne!(account.password_hash, "secret123");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn().await;

    app.signup("Ada", "ada@example.com", "secret123").await;
    let stored_before = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap();

    let response = app.signup("Ada Again", "ada@example.com", "other456").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User already exists");

    assert_eq!(app.repository.len().await, 1);
    assert_eq!(
        app.repository
            .find_by_email("ada@example.com")
            .await
            .unwrap(),
        stored_before
    );
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.signup("Ada", "not-an-email", "secret123").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_signup_blank_name() {
    let app = TestApp::spawn().await;

    let response = app.signup("   ", "ada@example.com", "secret123").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_signup_missing_field_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/signup")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("password"));
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_login_malformed_body_is_json_error() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_signup_delivery_failure_returns_500_and_keeps_account() {
    let app = TestApp::spawn_with_mailer(RecordingMailer::failing("535 authentication failed")).await;

    let response = app.signup("Ada", "ada@example.com", "secret123").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Signup failed");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("535 authentication failed"));

    let account = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .expect("Account should persist after delivery failure");
    assert!(!account.verified);

    // A retry now conflicts with the stored, unverified account
    let retry = app.signup("Ada", "ada@example.com", "secret123").await;
    assert_eq!(retry.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_before_verification() {
    let app = TestApp::spawn().await;
    app.signup("Ada", "ada@example.com", "secret123").await;

    let response = app.login("ada@example.com", "secret123").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Please verify your email first.");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.signup("Ada", "ada@example.com", "secret123").await;
    let token = app.mailer.last_to("ada@example.com").token();
    app.verify(&token).await;

    let wrong_password = app.login("ada@example.com", "wrong-password").await;
    let unknown_email = app.login("nobody@example.com", "secret123").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password_body: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email_body: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password_body, unknown_email_body);
    assert_eq!(wrong_password_body, json!({ "message": "Invalid credentials" }));
}

#[tokio::test]
async fn test_wrong_password_on_unverified_account_is_invalid_credentials() {
    let app = TestApp::spawn().await;
    app.signup("Ada", "ada@example.com", "secret123").await;

    let response = app.login("ada@example.com", "wrong-password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_full_signup_verify_login_flow() {
    let app = TestApp::spawn().await;

    let signup = app.signup("Ada", "ada@example.com", "secret123").await;
    assert_eq!(signup.status(), StatusCode::OK);

    let before = app.login("ada@example.com", "secret123").await;
    assert_eq!(before.status(), StatusCode::UNAUTHORIZED);

    let token = app.mailer.last_to("ada@example.com").token();
    let verify = app.verify(&token).await;
    assert_eq!(verify.status(), StatusCode::OK);
    assert!(verify
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let page = verify.text().await.unwrap();
    assert!(page.contains("Email verified!"));
    assert!(page.contains(LOGIN_URL));

    let account = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(account.verified);

    let response = app.login("ada@example.com", "secret123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"], json!({ "name": "Ada", "email": "ada@example.com" }));
    assert!(body["user"].get("password").is_none());

    let login_token = body["token"].as_str().unwrap();
    assert!(!login_token.is_empty());

    let claims = app
        .token_service
        .validate(login_token)
        .expect("Login token does not validate");
    assert_eq!(claims.id, account.id.to_string());
    assert_eq!(claims.email, "ada@example.com");
}

#[tokio::test]
async fn test_verify_twice_is_idempotent() {
    let app = TestApp::spawn().await;
    app.signup("Ada", "ada@example.com", "secret123").await;
    let token = app.mailer.last_to("ada@example.com").token();

    let first = app.verify(&token).await;
    assert_eq!(first.status(), StatusCode::OK);
    let after_first = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap();

    let second = app.verify(&token).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert!(second
        .text()
        .await
        .unwrap()
        .contains("Email already verified!"));

    let after_second = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap();
    assert_eq!(after_first, after_second);
    assert!(after_second.unwrap().verified);
}

#[tokio::test]
async fn test_verify_expired_token() {
    let app = TestApp::spawn().await;
    app.signup("Ada", "ada@example.com", "secret123").await;
    let account = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();

    let expired = TokenService::new(JWT_SECRET, Duration::seconds(-1))
        .issue(account.id, account.email.as_str())
        .unwrap();

    let response = app.verify(&expired).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Invalid or expired token"));

    let after = app.repository.find_by_id(&account.id).await.unwrap().unwrap();
    assert!(!after.verified);
}

#[tokio::test]
async fn test_verify_tampered_token() {
    let app = TestApp::spawn().await;
    app.signup("Ada", "ada@example.com", "secret123").await;
    app.signup("Eve", "eve@example.com", "secret456").await;

    let ada_token = app.mailer.last_to("ada@example.com").token();
    let eve_token = app.mailer.last_to("eve@example.com").token();

    // Eve's signature over Ada's payload
    let ada: Vec<&str> = ada_token.split('.').collect();
    let eve: Vec<&str> = eve_token.split('.').collect();
    let forged = format!("{}.{}.{}", ada[0], ada[1], eve[2]);

    let response = app.verify(&forged).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let forged_by_stranger = TokenService::with_default_ttl(b"some-other-secret-at-least-32-bytes!!")
        .issue(
            app.repository
                .find_by_email("ada@example.com")
                .await
                .unwrap()
                .unwrap()
                .id,
            "ada@example.com",
        )
        .unwrap();
    let response = app.verify(&forged_by_stranger).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let ada_account = app
        .repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!ada_account.verified);
}

#[tokio::test]
async fn test_verify_missing_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/verify")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_unknown_account() {
    let app = TestApp::spawn().await;

    let token = app
        .token_service
        .issue(AccountId::new(), "ghost@example.com")
        .unwrap();

    let response = app.verify(&token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("User not found"));
}

#[tokio::test]
async fn test_concurrent_signups_same_email() {
    let app = TestApp::spawn().await;

    let (first, second) = tokio::join!(
        app.signup("Ada", "ada@example.com", "secret123"),
        app.signup("Ada", "ada@example.com", "secret123"),
    );

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort_by_key(|status| status.as_u16());

    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);
    assert_eq!(app.repository.len().await, 1);
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_get_account_with_login_token() {
    let app = TestApp::spawn().await;
    app.signup("Ada", "ada@example.com", "secret123").await;
    let token = app.mailer.last_to("ada@example.com").token();
    app.verify(&token).await;

    let login: serde_json::Value = app
        .login("ada@example.com", "secret123")
        .await
        .json()
        .await
        .unwrap();
    let login_token = login["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/account", login_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["verified"], true);
}

#[tokio::test]
async fn test_get_account_requires_valid_token() {
    let app = TestApp::spawn().await;

    let missing = app
        .get("/api/account")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .get_authenticated("/api/account", "not-a-token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}
