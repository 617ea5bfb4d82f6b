//! End-to-end upload tests
//!
//! These tests stand up mock servers for both the crawl API and the
//! knowledge-base service and exercise the structured upload path, the raw
//! HTTP fallback, and double-failure recording.

use crate::common::{scrape_markdown_body, test_config, upload_options};
use pagelift::{Coordinator, RunStatus, UploadStatus};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts the happy-path structured client mocks for one document
async fn mount_structured_kb(kb: &MockServer, document_id: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .and(query_param("name", "articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ { "id": "ds-1", "name": "articles" } ]
        })))
        .mount(kb)
        .await;

    // Document does not exist yet
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/ds-1/documents"))
        .and(query_param("id", document_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(kb)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/ds-1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": document_id }
        })))
        .mount(kb)
        .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/api/v1/datasets/ds-1/documents/{}/chunks",
            document_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(kb)
        .await;
}

#[tokio::test]
async fn test_structured_upload_path() {
    let crawl = MockServer::start().await;
    let kb = MockServer::start().await;
    let out_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(scrape_markdown_body("# Short article")),
        )
        .mount(&crawl)
        .await;

    mount_structured_kb(&kb, "doc-page-1").await;

    let config = test_config(&crawl.uri(), &kb.uri(), out_dir.path().to_str().unwrap());
    let coordinator = Coordinator::new(
        config,
        upload_options("https://example.com/article/", 1, 1),
    )
    .expect("coordinator");
    let summary = coordinator.process().await;

    assert_eq!(summary.status, RunStatus::Success);
    assert_eq!(summary.uploaded_pages, 1);
    assert_eq!(summary.details.len(), 1);

    let outcome = &summary.details[0];
    assert_eq!(outcome.status, UploadStatus::Success);
    assert_eq!(outcome.document_id, "doc-page-1");
    // "# Short article" fits in one chunk
    assert_eq!(outcome.chunk_count, 1);
}

#[tokio::test]
async fn test_fallback_engages_when_client_path_fails() {
    let crawl = MockServer::start().await;
    let kb = MockServer::start().await;
    let out_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(scrape_markdown_body("# Fallback article")),
        )
        .mount(&crawl)
        .await;

    // Structured path dies at dataset lookup
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("lookup down"))
        .mount(&kb)
        .await;

    // Raw fallback carries all chunks in one call
    Mock::given(method("POST"))
        .and(path("/knowledge_bases/articles/documents/doc-page-1"))
        .and(body_partial_json(serde_json::json!({
            "metadata": { "source": "crawl-api", "format": "markdown" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&kb)
        .await;

    let config = test_config(&crawl.uri(), &kb.uri(), out_dir.path().to_str().unwrap());
    let coordinator = Coordinator::new(
        config,
        upload_options("https://example.com/article/", 1, 1),
    )
    .expect("coordinator");
    let summary = coordinator.process().await;

    assert_eq!(summary.status, RunStatus::Success);
    assert_eq!(summary.uploaded_pages, 1);
    assert_eq!(summary.details[0].status, UploadStatus::Success);
}

#[tokio::test]
async fn test_double_failure_is_recorded_per_page() {
    let crawl = MockServer::start().await;
    let kb = MockServer::start().await;
    let out_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scrape_markdown_body("# Doomed")))
        .mount(&crawl)
        .await;

    // Both upload paths fail for every document
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("no datasets"))
        .mount(&kb)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("no fallback either"))
        .mount(&kb)
        .await;

    let config = test_config(&crawl.uri(), &kb.uri(), out_dir.path().to_str().unwrap());
    let coordinator = Coordinator::new(
        config,
        upload_options("https://example.com/article/", 1, 2),
    )
    .expect("coordinator");
    let summary = coordinator.process().await;

    // Partial success is success: the crawl worked, uploads did not
    assert_eq!(summary.status, RunStatus::Success);
    assert_eq!(summary.crawled_pages, 2);
    assert_eq!(summary.uploaded_pages, 0);

    // Every page got its own recorded outcome
    assert_eq!(summary.details.len(), 2);
    for (outcome, expected_doc) in summary.details.iter().zip(["doc-page-1", "doc-page-2"]) {
        assert_eq!(outcome.status, UploadStatus::Error);
        assert_eq!(outcome.document_id, expected_doc);
        assert!(outcome.error_detail.is_some());
    }
}

#[tokio::test]
async fn test_existing_document_is_not_recreated() {
    let crawl = MockServer::start().await;
    let kb = MockServer::start().await;
    let out_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scrape_markdown_body("# Existing")))
        .mount(&crawl)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .and(query_param("name", "articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ { "id": "ds-1", "name": "articles" } ]
        })))
        .mount(&kb)
        .await;

    // Document already exists
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/ds-1/documents"))
        .and(query_param("id", "doc-page-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ { "id": "doc-page-1" } ]
        })))
        .mount(&kb)
        .await;

    // Creation must never be called
    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/ds-1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "doc-page-1" }
        })))
        .expect(0)
        .mount(&kb)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/ds-1/documents/doc-page-1/chunks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&kb)
        .await;

    let config = test_config(&crawl.uri(), &kb.uri(), out_dir.path().to_str().unwrap());
    let coordinator = Coordinator::new(
        config,
        upload_options("https://example.com/article/", 1, 1),
    )
    .expect("coordinator");
    let summary = coordinator.process().await;

    assert_eq!(summary.uploaded_pages, 1);
}

#[tokio::test]
async fn test_ambiguous_dataset_falls_back() {
    let crawl = MockServer::start().await;
    let kb = MockServer::start().await;
    let out_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scrape_markdown_body("# Ambiguous")))
        .mount(&crawl)
        .await;

    // Two datasets share the name: the structured path must refuse to pick
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "id": "ds-1", "name": "articles" },
                { "id": "ds-2", "name": "articles" }
            ]
        })))
        .mount(&kb)
        .await;

    Mock::given(method("POST"))
        .and(path("/knowledge_bases/articles/documents/doc-page-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&kb)
        .await;

    let config = test_config(&crawl.uri(), &kb.uri(), out_dir.path().to_str().unwrap());
    let coordinator = Coordinator::new(
        config,
        upload_options("https://example.com/article/", 1, 1),
    )
    .expect("coordinator");
    let summary = coordinator.process().await;

    assert_eq!(summary.uploaded_pages, 1);
}
