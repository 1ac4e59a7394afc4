// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use destrs::presentation::routes;

use crate::helpers;
use crate::helpers::DATABASE_PATH;

fn test_server(backend: &MockServer) -> TestServer {
    let aggregator = Arc::new(helpers::aggregator(backend));
    TestServer::new(routes::routes(aggregator)).expect("router must start")
}

#[tokio::test]
async fn test_search_endpoint_answers_with_success_envelope() {
    let backend = MockServer::start().await;
    helpers::mount_source(
        &backend,
        DATABASE_PATH,
        helpers::envelope(json!([helpers::place("Rome", "Italy", "city", "database")])),
    )
    .await;

    let server = test_server(&backend);
    let response = server
        .post("/v1/destinations/search")
        .json(&json!({ "query": "rome", "sources": ["database"] }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["query"], "rome");
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Rome");
    assert_eq!(body["results"][0]["source"], "database");
}

#[tokio::test]
async fn test_short_query_is_an_empty_success_not_an_error() {
    let backend = MockServer::start().await;
    let server = test_server(&backend);

    let response = server
        .post("/v1/destinations/search")
        .json(&json!({ "query": "r" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_out_of_range_limit_is_rejected() {
    let backend = MockServer::start().await;
    let server = test_server(&backend);

    let response = server
        .post("/v1/destinations/search")
        .json(&json!({ "query": "rome", "limit": 500 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cache_delete_forces_a_fresh_fetch() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DATABASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::envelope(json!([
            helpers::place("Rome", "Italy", "city", "database")
        ]))))
        .expect(2)
        .mount(&backend)
        .await;

    let server = test_server(&backend);
    let request = json!({ "query": "rome", "sources": ["database"] });

    server.post("/v1/destinations/search").json(&request).await;

    let cleared = server.delete("/v1/destinations/cache").await;
    cleared.assert_status(StatusCode::NO_CONTENT);

    server.post("/v1/destinations/search").json(&request).await;
}

#[tokio::test]
async fn test_unknown_sources_degrade_to_empty_success() {
    let backend = MockServer::start().await;
    let server = test_server(&backend);

    let response = server
        .post("/v1/destinations/search")
        .json(&json!({ "query": "rome", "sources": ["bing"] }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_health_and_version_endpoints() {
    let backend = MockServer::start().await;
    let server = test_server(&backend);

    let health = server.get("/health").await;
    health.assert_status(StatusCode::OK);
    health.assert_text("OK");

    let version = server.get("/v1/version").await;
    version.assert_status(StatusCode::OK);
    version.assert_text(env!("CARGO_PKG_VERSION"));
}
