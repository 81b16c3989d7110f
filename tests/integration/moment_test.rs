//! Integration tests for moment CRUD, the feed, and privacy.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{MultipartForm, TestApp};

fn titles(body: &Value) -> Vec<String> {
    body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_moment_stores_video_and_tags() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("olga").await;

    let moment = app
        .create_moment(&user, "Pôr do sol", &["Praia", " praia ", "Verão"], false)
        .await;

    assert_eq!(moment["title"], "Pôr do sol");
    assert_eq!(moment["duration_seconds"], 12);
    assert_eq!(moment["views"], 0);
    assert_eq!(moment["owner"]["username"], user.username.as_str());
    assert!(moment["video"].as_str().unwrap().starts_with("/media/videos/"));
    let tags: Vec<&str> = moment["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["praia", "verão"]);
    assert_eq!(moment["comments"], json!([]));
}

#[tokio::test]
async fn test_create_moment_requires_video() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("paulo").await;

    let form = MultipartForm::new().text("title", "Sem vídeo");
    let response = app
        .multipart("POST", "/api/momentos", form, Some(&user))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["video"].is_array());
}

#[tokio::test]
async fn test_create_moment_requires_title() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("quel").await;

    let form = MultipartForm::new().file("video", "clip.mp4", "video/mp4", b"bytes");
    let response = app
        .multipart("POST", "/api/momentos", form, Some(&user))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["title"].is_array());
}

#[tokio::test]
async fn test_create_moment_requires_login() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let form = MultipartForm::new()
        .text("title", "Anônimo")
        .file("video", "clip.mp4", "video/mp4", b"bytes");
    let response = app.multipart("POST", "/api/momentos", form, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_feed_filters_by_owner_and_paginates() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("rita").await;
    for i in 0..11 {
        app.create_moment(&user, &format!("Clip {i}"), &[], false)
            .await;
    }

    let path = format!("/api/momentos?usuario={}", user.username);
    let first = app.request("GET", &path, None, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["total_items"], 11);
    assert_eq!(first.body["data"]["page_size"], 9);
    assert_eq!(first.body["data"]["has_next"], true);
    assert_eq!(titles(&first.body)[0], "Clip 10");

    let second = app
        .request("GET", &format!("{path}&page=2"), None, None)
        .await;
    assert_eq!(titles(&second.body).len(), 2);
    assert_eq!(second.body["data"]["has_next"], false);
}

#[tokio::test]
async fn test_feed_filters_by_tag_slug() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("sara").await;
    let tag = TestApp::unique_name("Onda Grande");
    app.create_moment(&user, "Com tag", &[&tag], false).await;
    app.create_moment(&user, "Sem tag", &[], false).await;

    let slug = tag.to_lowercase().replace(' ', "-");
    let path = format!("/api/momentos?tag={slug}");
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Com tag"]);
}

#[tokio::test]
async fn test_feed_filters_by_accented_tag_slug() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("ines").await;
    let tag = TestApp::unique_name("Pôr do Sol");
    let moment = app.create_moment(&user, "Acentuada", &[&tag], false).await;

    let slug = tag.to_lowercase().replace(' ', "-");
    assert_eq!(moment["tags"][0]["slug"], slug.as_str());

    let path = format!("/api/momentos?tag={}", slug.replace('ô', "%C3%B4"));
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Acentuada"]);
}

#[tokio::test]
async fn test_feed_search_matches_title() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let user = app.signup("tati").await;
    let marker = TestApp::unique_name("Marcador");
    app.create_moment(&user, &format!("Vídeo {marker}"), &[], false)
        .await;

    let path = format!("/api/momentos?search={}", marker.to_lowercase());
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 1);
}

#[tokio::test]
async fn test_feed_trending_orders_by_likes() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("ulisses").await;
    let fan = app.signup("vera").await;
    app.create_moment(&owner, "Sem likes", &[], false).await;
    let liked = app.create_moment(&owner, "Curtido", &[], false).await;
    app.create_moment(&owner, "Mais novo", &[], false).await;

    let like_path = format!("/api/momentos/{}/like", liked["id"].as_str().unwrap());
    let response = app.request("POST", &like_path, None, Some(&fan)).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let path = format!("/api/momentos?usuario={}&sort=trending", owner.username);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(titles(&response.body)[0], "Curtido");

    let path = format!("/api/momentos?usuario={}", owner.username);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(titles(&response.body)[0], "Mais novo");
}

#[tokio::test]
async fn test_trending_breaks_like_ties_by_views_and_popular_sorts_by_views() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("wilma").await;
    let mut fans = Vec::new();
    for _ in 0..5 {
        fans.push(app.signup("fa").await);
    }

    let seeds = [("Cinco e dez", 5, 10), ("Cinco e um", 5, 1), ("Dois e vinte", 2, 20)];
    for (title, likes, views) in seeds {
        let moment = app.create_moment(&owner, title, &[], false).await;
        let id = moment["id"].as_str().unwrap();
        app.set_views(id, views).await;
        let like_path = format!("/api/momentos/{id}/like");
        for fan in fans.iter().take(likes) {
            let response = app.request("POST", &like_path, None, Some(fan)).await;
            assert_eq!(response.status, StatusCode::CREATED);
        }
    }

    let path = format!("/api/momentos?usuario={}&sort=trending", owner.username);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(
        titles(&response.body),
        vec!["Cinco e dez", "Cinco e um", "Dois e vinte"]
    );

    let path = format!("/api/momentos?usuario={}&sort=popular", owner.username);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(
        titles(&response.body),
        vec!["Dois e vinte", "Cinco e dez", "Cinco e um"]
    );
}

#[tokio::test]
async fn test_private_moment_hidden_from_others() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("wanda").await;
    let other = app.signup("xavier").await;
    let moment = app.create_moment(&owner, "Segredo", &[], true).await;
    let path = format!("/api/momentos/{}", moment["id"].as_str().unwrap());

    let response = app.request("GET", &path, None, Some(&other)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", &path, None, Some(&owner)).await;
    assert_eq!(response.status, StatusCode::OK);

    let feed = format!("/api/momentos?usuario={}", owner.username);
    let response = app.request("GET", &feed, None, Some(&other)).await;
    assert_eq!(response.body["data"]["total_items"], 0);
    let response = app.request("GET", &feed, None, Some(&owner)).await;
    assert_eq!(response.body["data"]["total_items"], 1);
}

#[tokio::test]
async fn test_private_profile_hides_all_moments() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("yara").await;
    let moment = app.create_moment(&owner, "Público", &[], false).await;

    let response = app
        .request(
            "PATCH",
            "/api/auth/user",
            Some(json!({ "is_private": true })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let path = format!("/api/momentos/{}", moment["id"].as_str().unwrap());
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let profile = format!("/api/auth/profile/{}", owner.username);
    let response = app.request("GET", &profile, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["moments"]["total_items"], 0);
}

#[tokio::test]
async fn test_owner_updates_moment() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("zeca").await;
    let moment = app.create_moment(&owner, "Antes", &["velha"], false).await;
    let path = format!("/api/momentos/{}", moment["id"].as_str().unwrap());

    let response = app
        .request(
            "PATCH",
            &path,
            Some(json!({ "title": "Depois", "tags": ["Nova"] })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["title"], "Depois");
    assert_eq!(response.body["data"]["description"], "Gravado na praia");
    assert_eq!(response.body["data"]["tags"][0]["name"], "nova");
    assert_eq!(response.body["data"]["tags"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_owner_cannot_edit_or_delete() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("alice").await;
    let other = app.signup("bruno").await;
    let moment = app.create_moment(&owner, "Meu", &[], false).await;
    let path = format!("/api/momentos/{}", moment["id"].as_str().unwrap());

    let response = app
        .request("PATCH", &path, Some(json!({ "title": "Seu" })), Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(&other)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_deletes_moment() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("caio").await;
    let moment = app.create_moment(&owner, "Apagar", &[], false).await;
    let path = format!("/api/momentos/{}", moment["id"].as_str().unwrap());

    let response = app.request("DELETE", &path, None, Some(&owner)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &path, None, Some(&owner)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_huge_page_returns_empty_page() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .request("GET", "/api/momentos?page=9223372036854775807", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"], json!([]));
    assert_eq!(response.body["data"]["has_next"], false);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let response = app
        .request("GET", "/api/momentos/not-a-uuid", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_suggestions_exclude_the_moment_itself() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("duda").await;
    let tag = TestApp::unique_name("relacionado");
    let base = app.create_moment(&owner, "Base", &[&tag], false).await;
    app.create_moment(&owner, "Parecido", &[&tag], false).await;
    let base_id = base["id"].as_str().unwrap();

    let path = format!("/api/momentos/{base_id}/suggestions");
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items[0]["title"], "Parecido");
    assert!(items.iter().all(|m| m["id"] != base_id));
}

#[tokio::test]
async fn test_tags_are_listed() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };
    let owner = app.signup("enzo").await;
    let tag = TestApp::unique_name("listada");
    app.create_moment(&owner, "Com tag", &[&tag], false).await;

    let response = app.request("GET", "/api/momentos/tags", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&tag.as_str()));
}
