//! `ApiClient` against a mock content API.

mod common;

use std::time::Duration;

use blogsync_core::Slug;
use blogsync_renderer::Renderer;
use blogsync_sync::{
    ApiClient, ArticleSource, ArticleStatus, ContentStore, FetchError, Listing, RunLimits,
    SyncPipeline,
};
use httpmock::MockServer;
use serde_json::json;
use tempfile::TempDir;

use common::{content_json, summary_json, AUTHOR};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.url("/api/articles"), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn lists_articles_for_author() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method("GET")
            .path("/api/articles")
            .query_param("username", AUTHOR);
        then.status(200)
            .header("content-type", "application/json")
            .body(json!([summary_json("a", 1), summary_json("b", 2)]).to_string());
    }).await;

    let summaries = client(&server).fetch_summaries(AUTHOR).await.expect("list");
    mock.assert_async().await;
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[1].meta.slug, Slug::from("b"));
}

#[tokio::test]
async fn fetches_content_by_author_and_slug() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method("GET").path("/api/articles/jane/hello-1a2b");
        then.status(200)
            .header("content-type", "application/json")
            .body(content_json("hello-1a2b", 9, "Hello!").to_string());
    }).await;

    let content = client(&server)
        .fetch_content(AUTHOR, &Slug::from("hello-1a2b"))
        .await
        .expect("content");
    mock.assert_async().await;
    assert_eq!(content.body_markdown, "Hello!");
    assert_eq!(content.tag_list, vec!["rust", "testing"]);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method("GET").path("/api/articles/jane/gone");
        then.status(404).body(r#"{"error":"not found","status":404}"#);
    }).await;

    let err = client(&server)
        .fetch_content(AUTHOR, &Slug::from("gone"))
        .await
        .expect_err("404");
    assert!(
        matches!(err, FetchError::Status { status, .. } if status.as_u16() == 404),
        "{err}"
    );
}

#[tokio::test]
async fn malformed_json_is_an_error() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method("GET").path("/api/articles");
        then.status(200).body("<html>maintenance</html>");
    }).await;

    let err = client(&server).fetch_summaries(AUTHOR).await.expect_err("html");
    assert!(matches!(err, FetchError::Decode { .. }), "{err}");
}

#[tokio::test]
async fn shape_errors_carry_every_violation() {
    let server = MockServer::start_async().await;
    let mut bad = content_json("x", 1, "X");
    bad.as_object_mut().unwrap().remove("title");
    bad["reading_time_minutes"] = json!("five");
    server.mock_async(|when, then| {
        when.method("GET").path("/api/articles/jane/x");
        then.status(200).body(bad.to_string());
    }).await;

    let err = client(&server)
        .fetch_content(AUTHOR, &Slug::from("x"))
        .await
        .expect_err("invalid");
    let FetchError::Invalid { source, .. } = err else {
        panic!("expected Invalid, got {err}");
    };
    assert_eq!(source.violations.len(), 2);
    assert!(source.touches("title"));
    assert!(source.touches("reading_time_minutes"));
}

#[tokio::test]
async fn slow_responses_hit_the_request_timeout() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method("GET").path("/api/articles");
        then.status(200)
            .delay(Duration::from_secs(3))
            .body("[]");
    }).await;

    let client =
        ApiClient::new(&server.url("/api/articles"), Duration::from_millis(200)).unwrap();
    let err = client.fetch_summaries(AUTHOR).await.expect_err("timeout");
    assert!(err.is_timeout(), "{err}");
}

#[tokio::test]
async fn end_to_end_sync_over_http() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method("GET")
            .path("/api/articles")
            .query_param("username", AUTHOR);
        then.status(200)
            .body(json!([summary_json("a", 1), summary_json("b", 2)]).to_string());
    }).await;
    server.mock_async(|when, then| {
        when.method("GET").path("/api/articles/jane/a");
        then.status(200).body(content_json("a", 1, "Alpha").to_string());
    }).await;
    server.mock_async(|when, then| {
        when.method("GET").path("/api/articles/jane/b");
        then.status(500);
    }).await;

    let store = TempDir::new().unwrap();
    let pipeline = SyncPipeline::new(
        client(&server),
        Renderer::new().unwrap(),
        ContentStore::new(store.path(), "md"),
        RunLimits::default(),
    );
    let report = pipeline.run(AUTHOR, false).await;

    assert_eq!(report.listing, Listing::Fetched { count: 2 });
    assert!(matches!(report.articles[0].status, ArticleStatus::Written { .. }));
    assert!(matches!(report.articles[1].status, ArticleStatus::Skipped { .. }));
    let written = std::fs::read_to_string(store.path().join("a.md")).unwrap();
    assert!(written.starts_with("---\nid: 1\ntitle: \"Post a\"\n"));
    assert!(written.ends_with("\n---\n\nAlpha"));
    assert!(!store.path().join("b.md").exists());
}
