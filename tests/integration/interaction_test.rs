//! Integration tests for likes, views, comments and notifications.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{TestApp, TestUser};

async fn notifications(app: &TestApp, user: &TestUser) -> Value {
    let response = app
        .request("GET", "/api/momentos/notificacoes", None, Some(user))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body["data"].clone()
}

#[tokio::test]
async fn test_like_and_unlike() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("fabio").await;
    let fan = app.signup("gina").await;
    let moment = app.create_moment(&owner, "Curtir", &[], false).await;
    let path = format!("/api/momentos/{}/like", moment["id"].as_str().unwrap());

    let response = app.request("POST", &path, None, Some(&fan)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["total_likes"], 1);

    let response = app.request("POST", &path, None, Some(&fan)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let detail = format!("/api/momentos/{}", moment["id"].as_str().unwrap());
    let response = app.request("GET", &detail, None, Some(&fan)).await;
    assert_eq!(response.body["data"]["is_liked"], true);
    assert_eq!(response.body["data"]["total_likes"], 1);

    let response = app.request("DELETE", &path, None, Some(&fan)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_likes"], 0);

    let response = app.request("DELETE", &path, None, Some(&fan)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_like_requires_login() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("hilda").await;
    let moment = app.create_moment(&owner, "Anônimo", &[], false).await;
    let path = format!("/api/momentos/{}/like", moment["id"].as_str().unwrap());

    let response = app.request("POST", &path, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_like_notifies_owner_but_self_like_does_not() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("igor").await;
    let fan = app.signup("julia").await;
    let moment = app.create_moment(&owner, "Notificar", &[], false).await;
    let path = format!("/api/momentos/{}/like", moment["id"].as_str().unwrap());

    app.request("POST", &path, None, Some(&owner)).await;
    assert_eq!(notifications(&app, &owner).await["total_items"], 0);

    app.request("POST", &path, None, Some(&fan)).await;
    let inbox = notifications(&app, &owner).await;
    assert_eq!(inbox["total_items"], 1);
    assert_eq!(inbox["unread_count"], 1);
    let item = &inbox["items"][0];
    assert_eq!(item["type"], "like");
    assert_eq!(item["actor_username"], fan.username.as_str());
    assert_eq!(item["moment_id"], moment["id"]);
    assert_eq!(item["is_read"], false);
}

#[tokio::test]
async fn test_mark_all_read() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("kaio").await;
    let fan = app.signup("lara").await;
    let moment = app.create_moment(&owner, "Lidas", &[], false).await;
    let path = format!("/api/momentos/{}/like", moment["id"].as_str().unwrap());
    app.request("POST", &path, None, Some(&fan)).await;

    let response = app
        .request(
            "POST",
            "/api/momentos/notificacoes/marcar-lidas",
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["updated"], 1);

    let inbox = notifications(&app, &owner).await;
    assert_eq!(inbox["unread_count"], 0);
    assert_eq!(inbox["items"][0]["is_read"], true);
}

#[tokio::test]
async fn test_notifications_require_login() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .request("GET", "/api/momentos/notificacoes", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_views_count_except_owner() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("mario").await;
    let moment = app.create_moment(&owner, "Assistir", &[], false).await;
    let path = format!("/api/momentos/{}/view", moment["id"].as_str().unwrap());

    let response = app.request("POST", &path, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["views"], 1);
    assert_eq!(response.body["data"]["counted"], true);

    let response = app.request("POST", &path, None, Some(&owner)).await;
    assert_eq!(response.body["data"]["views"], 1);
    assert_eq!(response.body["data"]["counted"], false);
}

#[tokio::test]
async fn test_view_milestone_notifies_once() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("nara").await;
    let moment = app.create_moment(&owner, "Viral", &[], false).await;
    let id = moment["id"].as_str().unwrap();
    app.set_views(id, 14).await;
    let path = format!("/api/momentos/{id}/view");

    let response = app.request("POST", &path, None, None).await;
    assert_eq!(response.body["data"]["views"], 15);
    app.request("POST", &path, None, None).await;

    let inbox = notifications(&app, &owner).await;
    assert_eq!(inbox["total_items"], 1);
    assert_eq!(inbox["items"][0]["type"], "view_milestone");
    assert_eq!(inbox["items"][0]["views"], 15);
}

#[tokio::test]
async fn test_view_of_private_moment_is_not_found() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("otto").await;
    let moment = app.create_moment(&owner, "Privado", &[], true).await;
    let path = format!("/api/momentos/{}/view", moment["id"].as_str().unwrap());

    let response = app.request("POST", &path, None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("pedro").await;
    let fan = app.signup("quiteria").await;
    let moment = app.create_moment(&owner, "Comentar", &[], false).await;
    let list_path = format!("/api/momentos/{}/comentarios", moment["id"].as_str().unwrap());

    let response = app
        .request(
            "POST",
            &list_path,
            Some(json!({ "text": "  Que lindo!  " })),
            Some(&fan),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["text"], "Que lindo!");
    assert_eq!(response.body["data"]["author"]["username"], fan.username.as_str());
    let comment_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app.request("GET", &list_path, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 1);

    let comment_path = format!("/api/comentarios/{comment_id}");
    let response = app
        .request(
            "PATCH",
            &comment_path,
            Some(json!({ "text": "Editado" })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PATCH",
            &comment_path,
            Some(json!({ "text": "Editado" })),
            Some(&fan),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["text"], "Editado");

    let response = app
        .request("DELETE", &comment_path, None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &list_path, None, None).await;
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_comment_notifies_owner() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("rafa").await;
    let fan = app.signup("samu").await;
    let moment = app.create_moment(&owner, "Aviso", &[], false).await;
    let path = format!("/api/momentos/{}/comentarios", moment["id"].as_str().unwrap());

    app.request("POST", &path, Some(json!({ "text": "Oi" })), Some(&fan))
        .await;

    let inbox = notifications(&app, &owner).await;
    assert_eq!(inbox["items"][0]["type"], "comentario");
}

#[tokio::test]
async fn test_third_party_cannot_delete_comment() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("teo").await;
    let author = app.signup("ugo").await;
    let stranger = app.signup("vivi").await;
    let moment = app.create_moment(&owner, "Apagar", &[], false).await;
    let path = format!("/api/momentos/{}/comentarios", moment["id"].as_str().unwrap());
    let response = app
        .request("POST", &path, Some(json!({ "text": "Meu" })), Some(&author))
        .await;
    let comment_path = format!(
        "/api/comentarios/{}",
        response.body["data"]["id"].as_str().unwrap()
    );

    let response = app
        .request("DELETE", &comment_path, None, Some(&stranger))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &comment_path, None, Some(&author))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("wal").await;
    let moment = app.create_moment(&owner, "Vazio", &[], false).await;
    let path = format!("/api/momentos/{}/comentarios", moment["id"].as_str().unwrap());

    let response = app
        .request("POST", &path, Some(json!({ "text": "   " })), Some(&owner))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
