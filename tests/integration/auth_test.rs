//! Integration tests for registration, sessions, CSRF and profiles.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{MultipartForm, PASSWORD, TestApp};

#[tokio::test]
async fn test_register_returns_created_user() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let username = TestApp::unique_name("ana");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": PASSWORD,
                "password2": PASSWORD,
                "first_name": "Ana",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["username"], username.as_str());
    assert_eq!(data["first_name"], "Ana");
    assert_eq!(data["total_moments"], 0);
    assert!(data.get("password_hash").is_none());
    assert!(!response.cookies.contains_key("sessionid"));
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let username = TestApp::unique_name("bia");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": PASSWORD,
                "password2": "Outra!2026x",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["password"].is_array());
}

#[tokio::test]
async fn test_register_empty_body_uses_error_envelope() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .request("POST", "/api/auth/register", Some(json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());
    assert!(response.body["details"].is_object());
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let existing = app.register("dup").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": existing.username.to_uppercase(),
                "email": format!("other_{}", existing.email),
                "password": PASSWORD,
                "password2": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body["details"]["username"].is_array());
}

#[tokio::test]
async fn test_login_sets_session_and_csrf_cookies() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let mut user = app.register("carla").await;

    let response = app.login(&mut user).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(user.session.is_some());
    let csrf = user.csrf.clone().expect("csrf cookie");
    assert_eq!(response.body["data"]["csrf_token"], csrf.as_str());
    assert_eq!(response.body["data"]["user"]["username"], user.username.as_str());
    assert!(response.body["data"]["user"]["last_login_at"].is_string());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let mut user = app.register("dani").await;
    user.password = "errada!2026".to_string();

    let response = app.login(&mut user).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(user.session.is_none());
}

#[tokio::test]
async fn test_current_user_requires_session() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/user", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_current_user_authenticated() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("edu").await;

    let response = app.request("GET", "/api/auth/user", None, Some(&user)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], user.username.as_str());
    assert_eq!(response.body["data"]["email"], user.email.as_str());
}

#[tokio::test]
async fn test_unsafe_request_without_csrf_is_forbidden() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let mut user = app.signup("fabi").await;
    user.csrf = None;

    let response = app
        .request(
            "PATCH",
            "/api/auth/user",
            Some(json!({ "bio": "Oi" })),
            Some(&user),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_csrf_endpoint_issues_cookie() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/csrf", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.cookies.get("csrftoken").expect("csrf cookie");
    assert_eq!(response.body["data"]["csrf_token"], token.as_str());
}

#[tokio::test]
async fn test_update_profile_with_json() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("gabi").await;

    let response = app
        .request(
            "PATCH",
            "/api/auth/user",
            Some(json!({
                "first_name": "Gabriela",
                "bio": "Surf e café",
                "birth_date": "1995-04-12",
                "is_private": true,
            })),
            Some(&user),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["first_name"], "Gabriela");
    assert_eq!(data["bio"], "Surf e café");
    assert_eq!(data["birth_date"], "1995-04-12");
    assert_eq!(data["is_private"], true);
}

#[tokio::test]
async fn test_update_profile_rejects_bad_date() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("hugo").await;

    let response = app
        .request(
            "PATCH",
            "/api/auth/user",
            Some(json!({ "birth_date": "12/04/1995" })),
            Some(&user),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["birth_date"].is_array());
}

#[tokio::test]
async fn test_update_avatar_with_multipart() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("iara").await;

    let form = MultipartForm::new()
        .text("bio", "Nova foto")
        .file("avatar", "me.png", "image/png", b"not really a png");
    let response = app
        .multipart("PATCH", "/api/auth/user", form, Some(&user))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let avatar = response.body["data"]["avatar"].as_str().expect("avatar url");
    assert!(avatar.starts_with("/media/avatars/"));
    assert!(avatar.ends_with(".png"));
}

#[tokio::test]
async fn test_update_avatar_rejects_unknown_extension() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("joao").await;

    let form = MultipartForm::new().file("avatar", "me.exe", "application/octet-stream", b"MZ");
    let response = app
        .multipart("PATCH", "/api/auth/user", form, Some(&user))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["avatar"].is_array());
}

#[tokio::test]
async fn test_logout_ends_session() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("leo").await;

    let response = app.request("POST", "/api/auth/logout", None, Some(&user)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/auth/user", None, Some(&user)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_profile_hides_private_fields() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("malu").await;

    let path = format!("/api/auth/profile/{}", user.username);
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let profile = &response.body["data"]["user"];
    assert_eq!(profile["username"], user.username.as_str());
    assert!(profile.get("email").is_none());
    assert!(profile.get("birth_date").is_none());
    assert_eq!(response.body["data"]["moments"]["total_items"], 0);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let path = format!("/api/auth/profile/{}", TestApp::unique_name("ghost"));
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_search_matches_substring() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.register("nina").await;
    let fragment = &user.username[5..15];

    let path = format!("/api/auth/search?search={fragment}");
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["username"], user.username.as_str());
    assert_eq!(response.body["data"]["page_size"], 5);
}

#[tokio::test]
async fn test_blank_user_search_returns_nothing() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/search?search=", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_health_reports_database() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
    assert_eq!(response.body["data"]["storage"], "available");
}
