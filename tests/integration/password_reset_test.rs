//! Integration tests for the password-reset code flow.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, TestUser};

async fn request_code(app: &TestApp, user: &TestUser) -> String {
    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-code",
            Some(json!({ "email": user.email })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    app.mailer
        .last_code_for(&user.email)
        .expect("reset email with code")
}

fn wrong_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_string()
    } else {
        "000000".to_string()
    }
}

#[tokio::test]
async fn test_reset_flow_changes_password_and_ends_sessions() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let mut user = app.signup("xuxa").await;
    let old_session = user.clone();

    let code = request_code(&app, &user).await;
    assert_eq!(code.len(), 6);

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-verify",
            Some(json!({ "email": user.email, "code": code })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset",
            Some(json!({
                "email": user.email,
                "code": code,
                "new_password": "Montanha!2027",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request("GET", "/api/auth/user", None, Some(&old_session))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.login(&mut user).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    user.password = "Montanha!2027".to_string();
    let response = app.login(&mut user).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_code_is_single_use() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.register("yuri").await;
    let code = request_code(&app, &user).await;

    let body = json!({
        "email": user.email,
        "code": code,
        "new_password": "Montanha!2027",
    });
    let response = app
        .request("POST", "/api/auth/password-reset", Some(body.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/api/auth/password-reset", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["code"].is_array());
}

#[tokio::test]
async fn test_wrong_code_counts_attempts_then_locks() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.register("zuza").await;
    let code = request_code(&app, &user).await;
    let bad = wrong_code(&code);

    for _ in 0..5 {
        let response = app
            .request(
                "POST",
                "/api/auth/password-reset-verify",
                Some(json!({ "email": user.email, "code": bad })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-verify",
            Some(json!({ "email": user.email, "code": code })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["details"]["code"][0].as_str().unwrap();
    assert!(message.contains("Too many"));

    let fresh = request_code(&app, &user).await;
    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-verify",
            Some(json!({ "email": user.email, "code": fresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_code_is_rejected() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.register("abel").await;
    let code = request_code(&app, &user).await;

    sqlx::query(
        "UPDATE users SET reset_code_sent_at = NOW() - INTERVAL '11 minutes' \
         WHERE LOWER(email) = LOWER($1)",
    )
    .bind(&user.email)
    .execute(&app.db_pool)
    .await
    .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-verify",
            Some(json!({ "email": user.email, "code": code })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["details"]["code"][0].as_str().unwrap();
    assert!(message.contains("expired"));
}

#[tokio::test]
async fn test_verify_without_code_reports_the_field() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.register("cida").await;

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-verify",
            Some(json!({ "email": user.email })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["code"].is_array());
}

#[tokio::test]
async fn test_unknown_email_is_not_found() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset-code",
            Some(json!({ "email": "ninguem@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_weak_new_password_is_rejected() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.register("bela").await;
    let code = request_code(&app, &user).await;

    let response = app
        .request(
            "POST",
            "/api/auth/password-reset",
            Some(json!({
                "email": user.email,
                "code": code,
                "new_password": "12345678",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["new_password"].is_array());
}
