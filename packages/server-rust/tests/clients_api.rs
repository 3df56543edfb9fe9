//! Integration tests for the `/api/clients` HTTP surface.
//!
//! Drives the fully assembled router (middleware included) in-process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use clientrisk_core::{Client, RiskProfile};
use clientrisk_server::network::{NetworkConfig, NetworkModule};
use clientrisk_server::storage::HashMapClientStore;
use clientrisk_server::ClientService;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(clients: &[(i64, RiskProfile)]) -> Router {
    let store = HashMapClientStore::with_clients(clients.iter().map(|&(id, risk_profile)| Client {
        id,
        risk_profile,
    }));
    let service = ClientService::new(Arc::new(store));
    NetworkModule::new(NetworkConfig::default(), service).build_router()
}

fn seeded_app() -> Router {
    app_with(&[
        (1, RiskProfile::High),
        (2, RiskProfile::Normal),
        (3, RiskProfile::Low),
    ])
}

fn request(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, req).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn list_returns_all_clients_in_id_order() {
    let app = seeded_app();

    let (status, body) = send_json(&app, request(Method::GET, "/api/clients", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 1, "riskProfile": "HIGH" },
            { "id": 2, "riskProfile": "NORMAL" },
            { "id": 3, "riskProfile": "LOW" },
        ])
    );
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
    let app = app_with(&[]);

    let (status, body) = send_json(&app, request(Method::GET, "/api/clients", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_existing_client() {
    let app = seeded_app();

    let (status, body) = send_json(&app, request(Method::GET, "/api/clients/2", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 2, "riskProfile": "NORMAL" }));
}

#[tokio::test]
async fn get_unknown_client_is_404_with_fixed_body() {
    let app = seeded_app();

    let (status, body) = send(&app, request(Method::GET, "/api/clients/10", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Client not found!");
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let app = seeded_app();

    let (status, body) = send_json(
        &app,
        request(Method::POST, "/api/clients", Some(r#"{"riskProfile":"LOW"}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 4, "riskProfile": "LOW" }));

    let (status, _) = send(&app, request(Method::GET, "/api/clients/4", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_with_unknown_profile_is_400_and_writes_nothing() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/clients",
            Some(r#"{"riskProfile":"DROP TABLE ..."}"#),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid risk profile!");

    let (_, list) = send_json(&app, request(Method::GET, "/api/clients", None)).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn create_with_lowercase_profile_is_400() {
    let app = seeded_app();

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/clients", Some(r#"{"riskProfile":"high"}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_missing_or_malformed_body_is_400() {
    let app = seeded_app();

    for body in ["{}", r#"{"riskProfile":null}"#, "not json", r#"{"riskProfile":7}"#] {
        let (status, text) = send(&app, request(Method::POST, "/api/clients", Some(body))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(text, "Invalid risk profile!");
    }

    let (status, _) = send(&app, request(Method::POST, "/api/clients", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_overwrites_profile_with_empty_200() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        request(Method::PUT, "/api/clients/2", Some(r#"{"riskProfile":"LOW"}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (_, client) = send_json(&app, request(Method::GET, "/api/clients/2", None)).await;
    assert_eq!(client, json!({ "id": 2, "riskProfile": "LOW" }));
}

#[tokio::test]
async fn update_unknown_client_is_404() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        request(Method::PUT, "/api/clients/99", Some(r#"{"riskProfile":"LOW"}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Client not found!");
}

#[tokio::test]
async fn update_with_invalid_profile_is_400_and_leaves_client() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/clients/1",
            Some(r#"{"riskProfile":"DROP TABLE ..."}"#),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid risk profile!");

    let (_, client) = send_json(&app, request(Method::GET, "/api/clients/1", None)).await;
    assert_eq!(client["riskProfile"], "HIGH");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = seeded_app();

    let (status, body) = send(&app, request(Method::DELETE, "/api/clients/2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = send(&app, request(Method::GET, "/api/clients/2", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_client_is_200() {
    let app = seeded_app();

    let (status, _) = send(&app, request(Method::DELETE, "/api/clients/77", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn merge_promotes_to_high() {
    let app = seeded_app();

    let (status, body) = send_json(&app, request(Method::GET, "/api/clients/merge", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 1, "riskProfile": "HIGH" },
            { "id": 2, "riskProfile": "HIGH" },
            { "id": 3, "riskProfile": "HIGH" },
        ])
    );
}

#[tokio::test]
async fn merge_without_high_promotes_to_normal() {
    let app = app_with(&[
        (1, RiskProfile::Low),
        (2, RiskProfile::Normal),
        (3, RiskProfile::Low),
    ]);

    let (_, body) = send_json(&app, request(Method::GET, "/api/clients/merge", None)).await;

    assert_eq!(
        body,
        json!([
            { "id": 1, "riskProfile": "NORMAL" },
            { "id": 2, "riskProfile": "NORMAL" },
            { "id": 3, "riskProfile": "NORMAL" },
        ])
    );
}

#[tokio::test]
async fn merge_on_empty_store_is_empty_array() {
    let app = app_with(&[]);

    let (status, body) = send_json(&app, request(Method::GET, "/api/clients/merge", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn merge_leaves_stored_profiles_untouched() {
    let app = seeded_app();

    send(&app, request(Method::GET, "/api/clients/merge", None)).await;
    let (_, body) = send_json(&app, request(Method::GET, "/api/clients", None)).await;

    assert_eq!(body[1], json!({ "id": 2, "riskProfile": "NORMAL" }));
    assert_eq!(body[2], json!({ "id": 3, "riskProfile": "LOW" }));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = seeded_app();

    let response = app
        .oneshot(request(Method::GET, "/api/clients", None))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = seeded_app();

    let (status, body) =
        send_json(&app, request(Method::GET, "/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/clients/{id}"].is_object());
}

#[tokio::test]
async fn health_reports_storage_backend() {
    let app = seeded_app();

    let (status, body) = send_json(&app, request(Method::GET, "/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["clients"], 3);
}
