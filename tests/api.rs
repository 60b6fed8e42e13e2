//! End-to-end tests: the real router on a loopback port, driven over HTTP by
//! `reqwest` and by the editor's `HttpTemplateStore`.

use std::net::SocketAddr;
use std::sync::Arc;

use editor::Dashboard;
use editor::decode::DecodedImage;
use editor::net::HttpTemplateStore;
use pinplate::config::DEFAULT_MAX_BODY_BYTES;
use pinplate::routes;
use pinplate::services::auth::AdminTokens;
use pinplate::state::AppState;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, COOKIE};
use scene::consts::{DEFAULT_POSITION_X, DEFAULT_POSITION_Y};
use scene::doc::{ObjectSpec, Shape};
use scene::memory::MemoryStore;
use scene::store::{StoreError, TemplateId, TemplateStore};
use serde_json::{Value, json};

const TOKEN: &str = "e2e-admin-token";

struct TestServer {
    base_url: String,
    store: Arc<MemoryStore>,
}

async fn spawn_server() -> TestServer {
    spawn_server_with_limit(DEFAULT_MAX_BODY_BYTES).await
}

async fn spawn_server_with_limit(max_body_bytes: usize) -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), AdminTokens::new([TOKEN]));
    let app = routes::app(state, true, max_body_bytes);

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    TestServer { base_url: format!("http://{addr}"), store }
}

fn remote(server: &TestServer) -> Arc<HttpTemplateStore> {
    Arc::new(HttpTemplateStore::new(server.base_url.clone(), Some(TOKEN.to_owned())))
}

// =============================================================================
// AUTH
// =============================================================================

#[tokio::test]
async fn healthz_needs_no_token() {
    let server = spawn_server().await;
    let resp = reqwest::get(format!("{}/healthz", server.base_url)).await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let server = spawn_server().await;
    let resp = reqwest::get(format!("{}/templates", server.base_url)).await.expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn unknown_token_is_forbidden_before_store() {
    let server = spawn_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/templates", server.base_url))
        .header(AUTHORIZATION, "Bearer not-the-token")
        .json(&json!({ "title": "sneaky", "data": {} }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["code"], "forbidden");
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let server = spawn_server().await;
    let resp = reqwest::Client::new()
        .get(format!("{}/templates", server.base_url))
        .header(COOKIE, format!("session_token={TOKEN}"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn remote_store_without_token_is_permission_denied() {
    let server = spawn_server().await;
    let store = HttpTemplateStore::new(server.base_url.clone(), None);
    assert_eq!(store.list().await, Err(StoreError::PermissionDenied));
}

// =============================================================================
// RAW REST SURFACE
// =============================================================================

#[tokio::test]
async fn post_create_then_update_statuses() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();
    let url = format!("{}/templates", server.base_url);

    let resp = client
        .post(&url)
        .bearer_auth(TOKEN)
        .json(&json!({ "title": "<b>Launch</b>", "data": { "background": "#eeeeee", "objects": [] } }))
        .send()
        .await
        .expect("create");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("json");
    assert_eq!(created["message"], "Template saved successfully");
    let id = created["id"].as_str().expect("id").to_owned();

    let resp = client
        .post(&url)
        .bearer_auth(TOKEN)
        .json(&json!({ "id": id, "title": "Launch v2", "data": {} }))
        .send()
        .await
        .expect("update");
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = client
        .get(format!("{url}/{id}"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .expect("get")
        .json()
        .await
        .expect("json");
    assert_eq!(fetched["title"], "Launch v2");
    assert_eq!(fetched["data"]["background"], "#ffffff");
    assert!(fetched["date"].is_string());
}

#[tokio::test]
async fn scene_schema_mismatch_is_unprocessable() {
    let server = spawn_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/templates", server.base_url))
        .bearer_auth(TOKEN)
        .json(&json!({ "title": "x", "data": { "objects": [{ "type": "hexagon" }] } }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["code"], "invalid_scene");
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn unparseable_body_is_invalid_request() {
    let server = spawn_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/templates", server.base_url))
        .bearer_auth(TOKEN)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["code"], "invalid_request");
}

#[tokio::test]
async fn body_over_limit_is_payload_too_large() {
    let server = spawn_server_with_limit(1024).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/templates", server.base_url))
        .bearer_auth(TOKEN)
        .json(&json!({ "title": "x".repeat(4096), "data": {} }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["code"], "payload_too_large");
    assert!(server.store.is_empty().await);
}

#[tokio::test]
async fn get_unknown_is_not_found_body() {
    let server = spawn_server().await;
    let resp = reqwest::Client::new()
        .get(format!("{}/templates/{}", server.base_url, TemplateId::new_v4()))
        .bearer_auth(TOKEN)
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["code"], "not_found");
    assert!(body["message"].is_string());
}

// =============================================================================
// EDITOR OVER HTTP
// =============================================================================

#[tokio::test]
async fn hello_scene_round_trips_over_http() {
    let server = spawn_server().await;
    let dashboard = Dashboard::new(remote(&server));

    let mut shell = dashboard.select_create_new();
    assert!(shell.document().is_empty());
    shell.add_object(ObjectSpec::text("Hello")).expect("add");
    let id = shell.save().await.expect("save").id.expect("id");
    shell.close();

    let reopened = dashboard.select_open(id).await.expect("open");
    let objects = &reopened.document().objects;
    assert_eq!(objects.len(), 1);
    assert_eq!((objects[0].x, objects[0].y), (DEFAULT_POSITION_X, DEFAULT_POSITION_Y));
    match &objects[0].shape {
        Shape::Text(text) => assert_eq!(text.text, "Hello"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[tokio::test]
async fn second_save_updates_same_remote_template() {
    let server = spawn_server().await;
    let dashboard = Dashboard::new(remote(&server));

    let mut shell = dashboard.select_create_new();
    let first = shell.save().await.expect("create").id.expect("id");
    shell.set_background_color("#ff0000").expect("color");
    let second = shell.save().await.expect("update").id.expect("id");
    assert_eq!(first, second);
    assert_eq!(server.store.len().await, 1);
    assert_eq!(server.store.get(first).await.expect("stored").data.background, "#ff0000");
}

#[tokio::test]
async fn multi_megabyte_photo_scene_saves_and_reopens() {
    let server = spawn_server().await;
    let dashboard = Dashboard::new(remote(&server));

    // Roughly 4 MB of base64 once inlined, well past axum's stock 2 MB cap.
    let data_uri = format!("data:image/jpeg;base64,{}", "A".repeat(4 * 1024 * 1024));
    let photo = DecodedImage { name: "photo.jpg".into(), data_uri: data_uri.clone(), width: 4000, height: 3000 };

    let mut shell = dashboard.select_create_new();
    shell.place_image(&photo).expect("place");
    let id = shell.save().await.expect("save").id.expect("id");

    let reopened = dashboard.select_open(id).await.expect("open");
    match &reopened.document().objects[0].shape {
        Shape::Image(image) => assert_eq!(image.src.len(), data_uri.len()),
        other => panic!("expected image, got {other:?}"),
    }
}

#[tokio::test]
async fn deleting_never_created_id_leaves_listing_alone() {
    let server = spawn_server().await;
    let dashboard = Dashboard::new(remote(&server));
    dashboard.select_create_new().save().await.expect("seed");
    let before = dashboard.list_templates().await.expect("list");

    let missing = TemplateId::new_v4();
    let err = dashboard.delete_template(missing).await.expect_err("missing");
    assert!(matches!(err, editor::EditorError::Store(StoreError::NotFound(id)) if id == missing));
    assert_eq!(dashboard.list_templates().await.expect("list"), before);
}

#[tokio::test]
async fn remote_listing_is_newest_first() {
    let server = spawn_server().await;
    let dashboard = Dashboard::new(remote(&server));
    for title in ["one", "two", "three"] {
        let mut shell = dashboard.select_create_new();
        shell.set_title(title).expect("title");
        shell.save().await.expect("save");
    }
    let titles: Vec<String> =
        dashboard.list_templates().await.expect("list").into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["three", "two", "one"]);
}
