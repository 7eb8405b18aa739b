mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use common::{ADMIN_TOKEN, BASE_URL, CLIENT_TOKEN, USER, bearer, spawn_app};

// ─── POST /api/reports ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_report_accepts_every_link_form() {
    let app = spawn_app();
    let future = Utc::now() + Duration::days(1);
    app.store.insert_link(USER, "rep1", "https://a.example", future);
    app.store.insert_link(USER, "rep2", "https://b.example", future);
    app.store.insert_link(USER, "rep3", "https://c.example", future);

    for link in [format!("{BASE_URL}/rep1"), "2lnx.ru/rep2".to_string(), "rep3".to_string()] {
        let response = app
            .server
            .post("/api/reports")
            .add_header("Authorization", bearer(CLIENT_TOKEN))
            .json(&json!({ "link": link }))
            .await;

        response.assert_status(StatusCode::ACCEPTED);
        assert_eq!(response.json::<Value>()["status"], "flagged");
    }

    assert_eq!(app.store.suspect_rows(), 3);
}

#[tokio::test]
async fn test_report_twice_keeps_one_flag() {
    let app = spawn_app();
    app.store
        .insert_link(USER, "dup1", "https://a.example", Utc::now() + Duration::days(1));

    let first = app
        .server
        .post("/api/reports")
        .add_header("Authorization", bearer(CLIENT_TOKEN))
        .json(&json!({ "link": "dup1" }))
        .await;
    let second = app
        .server
        .post("/api/reports")
        .add_header("Authorization", bearer(CLIENT_TOKEN))
        .json(&json!({ "link": "dup1" }))
        .await;

    first.assert_status(StatusCode::ACCEPTED);
    second.assert_status(StatusCode::ACCEPTED);
    assert_eq!(second.json::<Value>()["status"], "already_flagged");
    assert_eq!(app.store.suspect_rows(), 1);
}

#[tokio::test]
async fn test_report_unknown_code() {
    let app = spawn_app();

    app.server
        .post("/api/reports")
        .add_header("Authorization", bearer(CLIENT_TOKEN))
        .json(&json!({ "link": "nope" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_report_foreign_host() {
    let app = spawn_app();
    app.store
        .insert_link(USER, "host1", "https://a.example", Utc::now() + Duration::days(1));

    let response = app
        .server
        .post("/api/reports")
        .add_header("Authorization", bearer(CLIENT_TOKEN))
        .json(&json!({ "link": "https://evil.example/host1" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(app.store.suspect_rows(), 0);
}

// ─── /api/admin/suspects ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_suspects() {
    let app = spawn_app();
    app.store
        .insert_link(USER, "sus1", "https://bad.example", Utc::now() + Duration::days(1));

    app.server
        .post("/api/reports")
        .add_header("Authorization", bearer(CLIENT_TOKEN))
        .json(&json!({ "link": "sus1" }))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let response = app
        .server
        .get("/api/admin/suspects")
        .add_header("Authorization", bearer(ADMIN_TOKEN))
        .await;

    response.assert_status_ok();
    let items = response.json::<Vec<Value>>();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["short_code"], "sus1");
    assert_eq!(items[0]["original_url"], "https://bad.example");
}

#[tokio::test]
async fn test_resolve_suspect_deletes_link() {
    let app = spawn_app();
    app.store
        .insert_link(USER, "sus2", "https://bad.example", Utc::now() + Duration::days(1));

    app.server
        .post("/api/reports")
        .add_header("Authorization", bearer(CLIENT_TOKEN))
        .json(&json!({ "link": "sus2" }))
        .await
        .assert_status(StatusCode::ACCEPTED);

    app.server
        .delete("/api/admin/suspects/sus2")
        .add_header("Authorization", bearer(ADMIN_TOKEN))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(app.store.link("sus2").is_none());
    assert_eq!(app.store.suspect_rows(), 0);

    app.server.get("/sus2").await.assert_status_not_found();

    app.server
        .delete("/api/admin/suspects/sus2")
        .add_header("Authorization", bearer(ADMIN_TOKEN))
        .await
        .assert_status_not_found();
}

// ─── /api/admin/stats ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_summary_counts() {
    let app = spawn_app();
    app.store
        .insert_link(USER, "live", "https://a.example", Utc::now() + Duration::days(1));
    app.store
        .insert_link(USER, "dead", "https://b.example", Utc::now() - Duration::days(1));

    let response = app
        .server
        .get("/api/admin/stats")
        .add_header("Authorization", bearer(ADMIN_TOKEN))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "users": 1, "links": 2, "clicks": 0, "expired_links": 1 })
    );
}
