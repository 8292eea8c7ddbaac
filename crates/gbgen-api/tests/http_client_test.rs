//! Integration tests for the HTTP Features API client
//!
//! These tests run the client and the fetcher against a local mock server.

use gbgen_api::{FeaturesApi, HttpFeaturesApi, MetadataFetcher};
use gbgen_core::{Error, ValueType};
use httpmock::prelude::*;
use secrecy::SecretString;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn client(server: &MockServer) -> HttpFeaturesApi {
    HttpFeaturesApi::new(
        &server.base_url(),
        SecretString::from("secret_test".to_string()),
    )
    .unwrap()
}

/// Tests query parameters and bearer authentication of list requests
#[tokio::test]
async fn test_list_features_sends_query_and_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/features")
            .query_param("limit", "100")
            .query_param("offset", "0")
            .query_param("projectId", "prj_1")
            .header("authorization", "Bearer secret_test");
        then.status(200).json_body(json!({
            "features": [{
                "id": "dark-mode",
                "description": "Dark theme",
                "valueType": "boolean",
                "environments": {"production": {"enabled": true}}
            }],
            "limit": 100,
            "offset": 0,
            "count": 1,
            "total": 1,
            "hasMore": false
        }));
    });

    let page = client(&server)
        .list_features(100, 0, Some("prj_1"))
        .await
        .unwrap()
        .unwrap();

    mock.assert();
    assert_eq!(page.features.len(), 1);
    assert_eq!(page.features[0].description, "Dark theme");
    assert!(!page.has_more);
}

/// Tests that an empty project filter is not sent
#[tokio::test]
async fn test_empty_project_is_omitted() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/features")
            .query_param_missing("projectId");
        then.status(200).json_body(json!({"features": [], "hasMore": false}));
    });

    client(&server).list_features(100, 0, Some("")).await.unwrap();
    mock.assert();
}

/// Tests that a base URL already ending in /api/v1 is not extended
#[tokio::test]
async fn test_base_url_with_prefix() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/feature-keys");
        then.status(200).json_body(json!(["a", "b"]));
    });

    let api = HttpFeaturesApi::new(
        &format!("{}/api/v1/", server.base_url()),
        SecretString::from("secret_test".to_string()),
    )
    .unwrap();

    assert_eq!(api.get_feature_keys(None).await.unwrap(), vec!["a", "b"]);
    mock.assert();
}

/// Tests that an empty body is reported as no payload
#[tokio::test]
async fn test_empty_body_is_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/features");
        then.status(200);
    });

    let page = client(&server).list_features(100, 0, None).await.unwrap();
    assert!(page.is_none());
}

/// Tests that JSON null is reported as no payload
#[tokio::test]
async fn test_null_body_is_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/features");
        then.status(200).body("null");
    });

    let page = client(&server).list_features(100, 0, None).await.unwrap();
    assert!(page.is_none());
}

/// Tests that null fields in a page decode to their zero values
#[tokio::test]
async fn test_fetcher_accepts_null_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/features");
        then.status(200).json_body(json!({
            "features": [{
                "id": "legacy-flag",
                "description": null,
                "environments": null,
                "valueType": null
            }],
            "hasMore": false,
            "nextOffset": null
        }));
    });

    let catalog = MetadataFetcher::new(&client(&server))
        .fetch_all(None, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].id, "legacy-flag");
    assert!(catalog[0].description.is_empty());
    assert!(catalog[0].no_active_environments);
    assert_eq!(catalog[0].value_type, ValueType::from(String::new()));
}

/// Tests error mapping of non-success statuses
#[tokio::test]
async fn test_unauthorized_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/features");
        then.status(401)
            .json_body(json!({"message": "Invalid API key"}));
    });

    let err = client(&server)
        .list_features(100, 0, None)
        .await
        .unwrap_err();

    assert!(err.is_api_error());
    assert_eq!(err.http_status(), Some(401));
    assert!(err.to_string().contains("Invalid API key"));
}

/// Tests error mapping of malformed payloads
#[tokio::test]
async fn test_malformed_json_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/features");
        then.status(200).body("{\"features\": [");
    });

    let err = client(&server)
        .list_features(100, 0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ApiError { status: Some(200), .. }));
}

/// Tests single feature lookup
#[tokio::test]
async fn test_get_feature() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/features/checkout-v2");
        then.status(200).json_body(json!({
            "feature": {"id": "checkout-v2", "valueType": "json", "environments": {}}
        }));
    });

    let feature = client(&server).get_feature("checkout-v2").await.unwrap();
    mock.assert();
    assert_eq!(feature.id, "checkout-v2");
    assert_eq!(feature.value_type, "json");
}

/// Tests unknown feature lookup
#[tokio::test]
async fn test_get_feature_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/features/missing");
        then.status(404)
            .json_body(json!({"message": "Could not find feature"}));
    });

    let err = client(&server).get_feature("missing").await.unwrap_err();
    assert_eq!(err.http_status(), Some(404));
}

/// Tests a full paginated fetch over HTTP
#[tokio::test]
async fn test_fetcher_walks_pages() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/features")
            .query_param("limit", "100")
            .query_param("offset", "0");
        then.status(200).json_body(json!({
            "features": [
                {"id": "zeta", "valueType": "string", "environments": {"prod": {"enabled": true}}},
                {"id": "", "valueType": "boolean"}
            ],
            "hasMore": true,
            "nextOffset": 2
        }));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/features")
            .query_param("offset", "2");
        then.status(200).json_body(json!({
            "features": [{"id": "alpha", "valueType": "number"}],
            "hasMore": false
        }));
    });

    let api = client(&server);
    let catalog = MetadataFetcher::new(&api)
        .fetch_all(None, &CancellationToken::new())
        .await
        .unwrap();

    first.assert();
    second.assert();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].id, "alpha");
    assert_eq!(catalog[0].value_type, ValueType::Number);
    assert!(catalog[0].no_active_environments);
    assert_eq!(catalog[1].id, "zeta");
    assert!(!catalog[1].no_active_environments);
}

/// Tests that a server repeating the same offset cannot loop forever
#[tokio::test]
async fn test_fetcher_stops_on_stalled_offset() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/features");
        then.status(200).json_body(json!({
            "features": [{"id": "a", "valueType": "boolean"}],
            "hasMore": true,
            "nextOffset": 0
        }));
    });

    let api = client(&server);
    let err = MetadataFetcher::new(&api)
        .fetch_all(None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PaginationStalled { offset: 0, .. }));
    assert_eq!(mock.calls(), 1);
}

/// Tests cancellation while a request is in flight
#[tokio::test]
async fn test_fetcher_cancelled_during_request() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/features");
        then.status(200)
            .delay(std::time::Duration::from_secs(5))
            .json_body(json!({"features": [], "hasMore": false}));
    });

    let api = client(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = MetadataFetcher::new(&api)
        .fetch_all(None, &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}
