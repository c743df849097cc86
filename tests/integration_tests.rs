//! Integration tests using a mock HTTP server
//!
//! Tests the full end-to-end flow: fetch definition → HTTP requests → aggregated JSON

use depaginate::{
    paginate, AggregatedResult, CancelToken, Error, FetchDefinition, HttpExecutor,
    PaginationConfig, RequestDescriptor, Result,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run(request: RequestDescriptor, config: &PaginationConfig) -> Result<AggregatedResult> {
    let executor = HttpExecutor::new();
    paginate(&executor, request, config, &CancelToken::new()).await
}

// ============================================================================
// Offset Pagination
// ============================================================================

#[tokio::test]
async fn test_offset_pagination_end_to_end() {
    let mock_server = MockServer::start().await;

    // Page 1: no offset yet
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [1, 2]})))
        .mount(&mock_server)
        .await;

    // Page 2: offset advanced by the page size
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [3]})))
        .mount(&mock_server)
        .await;

    // Page 3: provider is out of data
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/api/items", mock_server.uri()))
        .query_param("limit", "2");
    let config = PaginationConfig::offset("limit", "offset", 0);

    let result = run(request, &config).await.unwrap();
    assert_eq!(
        result,
        AggregatedResult::Records(vec![json!(1), json!(2), json!(3)])
    );
}

// ============================================================================
// Cursor Pagination
// ============================================================================

#[tokio::test]
async fn test_cursor_pagination_replaces_query_between_pages() {
    let mock_server = MockServer::start().await;

    // Page 1 carries the caller's original query
    Mock::given(method("GET"))
        .and(path("/v1/activities"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activities": [{"id": 1}, {"id": 2}],
            "next": "tok_1"
        })))
        .mount(&mock_server)
        .await;

    // Page 2 carries the cursor and nothing else
    Mock::given(method("GET"))
        .and(path("/v1/activities"))
        .and(query_param("start", "tok_1"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activities": [{"id": 3}],
            "next": ""
        })))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/v1/activities", mock_server.uri()))
        .query_param("limit", "2");
    let config = PaginationConfig::cursor("next", "start", 0);

    let result = run(request, &config).await.unwrap();
    assert_eq!(
        result,
        AggregatedResult::Envelope(json!({
            "activities": [{"id": 1}, {"id": 2}, {"id": 3}],
            "next": ""
        }))
    );
}

// ============================================================================
// Next-Link Pagination
// ============================================================================

#[tokio::test]
async fn test_next_link_pagination_follows_relative_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": ["a", "b"],
            "paging": {"next": "/api/feed2"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feed2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": ["c"],
            "paging": {"next": null}
        })))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/api/feed", mock_server.uri()));
    let config = PaginationConfig::next_link("paging.next", 0);

    let result = run(request, &config).await.unwrap();
    assert_eq!(
        result,
        AggregatedResult::Envelope(json!({
            "entries": ["a", "b", "c"],
            "paging": {"next": null}
        }))
    );
}

#[tokio::test]
async fn test_headers_are_forwarded_on_every_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/feed"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": ["a"],
            "next": "/api/feed2"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/feed2"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [],
            "next": null
        })))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/api/feed", mock_server.uri()))
        .header("Authorization", "Bearer secret");
    let config = PaginationConfig::next_link("next", 0);

    // An unmatched second request would 404 and fail the run.
    let result = run(request, &config).await.unwrap();
    assert_eq!(
        result,
        AggregatedResult::Envelope(json!({"entries": ["a"], "next": null}))
    );
}

#[tokio::test]
async fn test_post_body_is_forwarded_on_every_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"filter": "active"})))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": ["a"]})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"filter": "active"})))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/api/search", mock_server.uri()))
        .method(depaginate::Method::POST)
        .json_body(json!({"filter": "active"}));
    let config = PaginationConfig::pages("page", 0);

    let result = run(request, &config).await.unwrap();
    assert_eq!(result, AggregatedResult::Records(vec![json!("a")]));
}

// ============================================================================
// Stripe Pagination
// ============================================================================

// The Stripe strategy paces itself between pages, so this test takes a
// few seconds of wall-clock time.
#[tokio::test]
async fn test_stripe_pagination_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/charges"))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("starting_after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "ch_1"}, {"id": "ch_2"}],
            "has_more": true
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/charges"))
        .and(query_param("starting_after", "ch_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "ch_3"}],
            "has_more": false
        })))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/v1/charges", mock_server.uri()));
    let config = PaginationConfig::stripe(0);

    let result = run(request, &config).await.unwrap();
    assert_eq!(
        result,
        AggregatedResult::Envelope(json!({
            "object": "list",
            "data": [{"id": "ch_1"}, {"id": "ch_2"}, {"id": "ch_3"}],
            "has_more": false
        }))
    );
}

// ============================================================================
// Failure Surface
// ============================================================================

#[tokio::test]
async fn test_http_error_stops_the_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such endpoint"))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/api/items", mock_server.uri()));
    let config = PaginationConfig::offset("limit", "offset", 0);

    let err = run(request, &config).await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("no such endpoint"));
        }
        other => panic!("Expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_response_is_rejected_with_its_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let request = RequestDescriptor::new(format!("{}/api/items", mock_server.uri()));
    let config = PaginationConfig::offset("limit", "offset", 0);

    let err = run(request, &config).await.unwrap_err();
    assert!(matches!(err, Error::InvalidJson { status: 200 }));
}

// ============================================================================
// Fetch Definition Files
// ============================================================================

#[tokio::test]
async fn test_definition_file_drives_a_full_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [1, 2]})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let definition_path = dir.path().join("fetch.yaml");
    std::fs::write(
        &definition_path,
        format!(
            r#"
request:
  url: "{}/api/items"
  query:
    limit: "2"
pagination:
  strategy: custom
  items_param: limit
  offset_param: offset
"#,
            mock_server.uri()
        ),
    )
    .unwrap();

    let definition = FetchDefinition::from_file(&definition_path).unwrap();
    let result = run(definition.request, &definition.pagination)
        .await
        .unwrap();

    assert_eq!(result, AggregatedResult::Records(vec![json!(1), json!(2)]));
}
