//! Integration tests for `shelf browse`.
//!
//! Runs the browse handler against fixture files written to a temp dir.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use shelf_cli::cli::{BrowseArgs, Collection};
use shelf_cli::commands::browse::collect;
use shelf_core::config::ShelfConfig;
use shelf_paginator::failure::{GENERIC_MESSAGE, SERVER_ERROR_MESSAGE, UNREACHABLE_MESSAGE};

const BOOKS: &str = r#"[
  {"id": 1, "name": "Anna Karenina", "author": "Leo Tolstoy"},
  {"id": 2, "name": "Atonement", "author": "Ian McEwan"},
  {"id": 3, "name": "Beloved", "author": "Toni Morrison"},
  {"id": 4, "name": "Brave New World", "author": "Aldous Huxley"},
  {"id": 5, "name": "Catch-22", "author": "Joseph Heller"},
  {"id": 6, "name": "Dune", "author": "Frank Herbert"}
]"#;

fn fixture(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("books.json");
    fs::write(&path, content).expect("should write fixture");
    path
}

fn args(fixture: PathBuf) -> BrowseArgs {
    BrowseArgs {
        fixture,
        collection: Collection::Books,
        group_by: Some("name".to_owned()),
        no_groups: false,
        page_size: Some(2),
        pages: 1,
        all: false,
        fail_status: None,
    }
}

#[tokio::test]
async fn test_browse_first_page_only() {
    // Given: six books, page size 2
    let dir = TempDir::new().expect("should create temp dir");
    let args = args(fixture(&dir, BOOKS));

    // When
    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");

    // Then
    assert_eq!(report.pages_loaded, 1);
    assert_eq!(report.item_count, 2);
    assert_eq!(report.letters(), vec!['A']);
    assert!(report.has_more);
    assert_eq!(report.next_cursor.as_deref(), Some("2"));
    assert_eq!(report.total_count, Some(6));
}

#[tokio::test]
async fn test_browse_all_pages() {
    let dir = TempDir::new().expect("should create temp dir");
    let mut args = args(fixture(&dir, BOOKS));
    args.all = true;

    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");

    assert_eq!(report.pages_loaded, 3);
    assert_eq!(report.item_count, 6);
    assert_eq!(report.letters(), vec!['A', 'B', 'C', 'D']);
    assert!(!report.has_more);
    assert!(report.next_cursor.is_none());
    assert!(report.error.is_none());
}

#[tokio::test]
async fn test_browse_without_groups() {
    let dir = TempDir::new().expect("should create temp dir");
    let mut args = args(fixture(&dir, BOOKS));
    args.group_by = None;
    args.pages = 2;

    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");

    assert_eq!(report.item_count, 4);
    assert_eq!(report.entries.len(), 4, "no separators when grouping is off");
}

#[tokio::test]
async fn test_browse_injected_server_error() {
    // Given: the second fetch fails with 503 on the versioned books endpoint
    let dir = TempDir::new().expect("should create temp dir");
    let mut args = args(fixture(&dir, BOOKS));
    args.pages = 3;
    args.fail_status = Some(503);

    // When
    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");

    // Then: first page kept, error message set, list not ended
    assert_eq!(report.pages_loaded, 1);
    assert_eq!(report.item_count, 2);
    assert_eq!(report.error.as_deref(), Some(SERVER_ERROR_MESSAGE));
    assert!(report.has_more);
}

#[tokio::test]
async fn test_browse_collection_selects_backend_path() {
    // Given: browsing the series collection
    let dir = TempDir::new().expect("should create temp dir");
    let mut args = args(fixture(&dir, BOOKS));
    args.collection = Collection::Series;
    args.pages = 2;
    args.fail_status = Some(503);

    // When
    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");

    // Then: the series endpoint is reported and is still a versioned API path
    assert_eq!(report.endpoint, "http://localhost:8080/api/v1/series");
    assert_eq!(report.error.as_deref(), Some(SERVER_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_browse_unversioned_collection_path_uses_generic_message() {
    // Given: authors served from a path outside the versioned API
    let dir = TempDir::new().expect("should create temp dir");
    let mut config = ShelfConfig::default();
    config.backend.authors_path = "/legacy/authors".to_owned();
    let mut args = args(fixture(&dir, BOOKS));
    args.collection = Collection::Authors;
    args.pages = 2;
    args.fail_status = Some(503);

    // When
    let report = collect(&args, &config).await.expect("browse");

    // Then: a 5xx off the versioned API falls back to the generic message
    assert_eq!(report.endpoint, "http://localhost:8080/legacy/authors");
    assert_eq!(report.error.as_deref(), Some(GENERIC_MESSAGE));
}

#[tokio::test]
async fn test_browse_injected_unreachable_backend() {
    let dir = TempDir::new().expect("should create temp dir");
    let mut args = args(fixture(&dir, BOOKS));
    args.all = true;
    args.fail_status = Some(0);

    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");
    assert_eq!(report.error.as_deref(), Some(UNREACHABLE_MESSAGE));
}

#[tokio::test]
async fn test_browse_json_output_shape() {
    let dir = TempDir::new().expect("should create temp dir");
    let args = args(fixture(&dir, BOOKS));

    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");
    let json = serde_json::to_value(&report).expect("serialize report");

    assert_eq!(json["entries"][0]["kind"], "separator");
    assert_eq!(json["entries"][0]["value"]["letter"], "A");
    assert_eq!(json["entries"][1]["kind"], "item");
    assert_eq!(json["entries"][1]["value"]["name"], "Anna Karenina");
    assert!(json.get("error").is_none());
    assert!(json.get("label_field").is_none());
}

#[tokio::test]
async fn test_browse_empty_fixture() {
    let dir = TempDir::new().expect("should create temp dir");
    let args = args(fixture(&dir, "[]"));

    let report = collect(&args, &ShelfConfig::default()).await.expect("browse");
    assert_eq!(report.item_count, 0);
    assert!(!report.has_more);
    assert!(report.entries.is_empty());
}

#[tokio::test]
async fn test_browse_rejects_non_array_fixture() {
    let dir = TempDir::new().expect("should create temp dir");
    let args = args(fixture(&dir, r#"{"id": 1}"#));

    let err = collect(&args, &ShelfConfig::default())
        .await
        .expect_err("object fixture should fail");
    assert!(err.to_string().contains("expected a JSON array"));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_browse_missing_fixture_is_io_error() {
    let args = args(PathBuf::from("/nonexistent/books.json"));
    let err = collect(&args, &ShelfConfig::default())
        .await
        .expect_err("missing fixture should fail");
    assert_eq!(err.exit_code(), 10);
}

#[tokio::test]
async fn test_browse_demo_fixture() {
    let demo = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../demos/books.json");
    let mut args = args(demo);
    args.all = true;
    args.page_size = Some(20);

    let report = collect(&args, &ShelfConfig::default()).await.expect("browse demo");
    assert!(report.item_count > 20, "demo fixture spans several pages");
    assert!(report.pages_loaded >= 2);

    let letters = report.letters();
    let mut deduped = letters.clone();
    deduped.dedup();
    assert_eq!(letters, deduped, "sorted fixture yields one separator per letter");
}
