//! Butterfly REST API end-to-end tests
//!
//! Drives the full router (health + /butterflies, tracing and CORS layers)
//! over an in-memory repository with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use butterfly_catalog::http_server::{build_router, HttpServerConfig};
use butterfly_catalog::repository::InMemoryRepository;

fn app() -> Router {
    build_router(
        &HttpServerConfig::default(),
        Arc::new(InMemoryRepository::new()),
    )
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn monarch() -> Value {
    json!({
        "commonName": "Monarch",
        "scientificName": "Danaus plexippus",
        "family": "Nymphalidae",
        "region": "North America",
        "habitat": "Open fields",
        "wingspan": 10.5,
        "wingspanUnit": "cm",
        "coordinates": {"latitude": 19.6, "longitude": -100.25},
        "flightSeason": ["July", "August"],
        "colorPrimary": "#FF8C00",
        "tags": ["migratory"]
    })
}

fn swallowtail() -> Value {
    json!({
        "commonName": "Old World Swallowtail",
        "scientificName": "Papilio machaon",
        "family": "Papilionidae",
        "region": "Europe"
    })
}

async fn create(app: &Router, payload: Value) -> Value {
    let (status, body) = send(app, Method::POST, "/butterflies", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"].clone()
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_root_and_health() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Hello Api!"));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// CREATE / READ
// =============================================================================

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/butterflies", Some(monarch())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Butterfly created successfully");

    let created = &body["data"];
    let id = created["id"].as_i64().unwrap();
    assert_eq!(id, 1);
    for (key, value) in monarch().as_object().unwrap() {
        assert_eq!(&created[key], value, "field {}", key);
    }
    assert!(created["createdAt"].is_string());
    assert_eq!(created["createdAt"], created["updatedAt"]);
    assert_eq!(created["hostPlants"], json!([]));
    assert_eq!(created["threatLevel"], Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/butterflies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body["data"], created);
}

#[tokio::test]
async fn test_integer_numbers_read_back_unchanged() {
    let app = app();
    let mut payload = monarch();
    payload["wingspan"] = json!(10);
    payload["coordinates"] = json!({"latitude": -90, "longitude": 180});

    let created = create(&app, payload).await;
    assert_eq!(created["wingspan"], json!(10));

    let (_, body) = send(&app, Method::GET, "/butterflies/1", None).await;
    assert_eq!(body["data"]["wingspan"], json!(10));
    assert_eq!(body["data"]["coordinates"], json!({"latitude": -90, "longitude": 180}));
}

#[tokio::test]
async fn test_create_trims_and_coerces() {
    let app = app();
    let mut payload = swallowtail();
    payload["commonName"] = json!("  Swallowtail  ");
    payload["wingspan"] = json!("8.5");

    let created = create(&app, payload).await;
    assert_eq!(created["commonName"], "Swallowtail");
    assert_eq!(created["wingspan"], json!(8.5));
}

#[tokio::test]
async fn test_create_ignores_client_identity() {
    let app = app();
    let mut payload = monarch();
    payload["id"] = json!(99);
    payload["createdAt"] = json!("1999-01-01T00:00:00Z");

    let created = create(&app, payload).await;
    assert_eq!(created["id"], 1);
    assert_ne!(created["createdAt"], "1999-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_create_invalid_payload_returns_field_errors() {
    let app = app();
    let payload = json!({"commonName": "M", "region": "Atlantis", "wingspan": 0});

    let (status, body) = send(&app, Method::POST, "/butterflies", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["commonName", "scientificName", "family", "region", "wingspan"]
    );

    let (_, body) = send(&app, Method::GET, "/butterflies", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_create_duplicate_scientific_name_conflicts() {
    let app = app();
    create(&app, monarch()).await;

    let mut duplicate = swallowtail();
    duplicate["scientificName"] = json!("Danaus plexippus");
    let (status, body) = send(&app, Method::POST, "/butterflies", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Danaus plexippus"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/butterflies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"commonName\": "))
        .unwrap();

    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_object_body_is_validation_error() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/butterflies", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "$root");
}

#[tokio::test]
async fn test_get_unknown_and_invalid_ids() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/butterflies/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Butterfly not found");

    let (status, body) = send(&app, Method::GET, "/butterflies/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// =============================================================================
// LIST / FILTER
// =============================================================================

#[tokio::test]
async fn test_list_and_filters() {
    let app = app();
    create(&app, monarch()).await;
    create(&app, swallowtail()).await;

    let (status, body) = send(&app, Method::GET, "/butterflies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["id"], 1);
    assert_eq!(body["data"][1]["id"], 2);

    let (_, body) = send(&app, Method::GET, "/butterflies/region/europe", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["scientificName"], "Papilio machaon");

    let (_, body) = send(&app, Method::GET, "/butterflies/region/North%20America", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["scientificName"], "Danaus plexippus");

    let (_, body) = send(&app, Method::GET, "/butterflies/family/NYMPHALIDAE", None).await;
    assert_eq!(body["count"], 1);

    let (status, body) = send(&app, Method::GET, "/butterflies/family/Pieridae", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
}

// =============================================================================
// UPDATE
// =============================================================================

#[tokio::test]
async fn test_partial_update_merges_fields() {
    let app = app();
    let created = create(&app, monarch()).await;

    let patch = json!({"commonName": "Monarch Butterfly", "habitat": Value::Null, "tags": ["iconic"]});
    let (status, body) = send(&app, Method::PUT, "/butterflies/1", Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Butterfly updated successfully");

    let updated = &body["data"];
    assert_eq!(updated["commonName"], "Monarch Butterfly");
    assert_eq!(updated["habitat"], Value::Null);
    assert_eq!(updated["tags"], json!(["iconic"]));
    assert_eq!(updated["scientificName"], created["scientificName"]);
    assert_eq!(updated["wingspan"], created["wingspan"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["id"], 1);
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let app = app();
    create(&app, monarch()).await;

    let (status, body) =
        send(&app, Method::PUT, "/butterflies/1", Some(json!({"commonName": "X"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "commonName");

    let (_, body) = send(&app, Method::GET, "/butterflies/1", None).await;
    assert_eq!(body["data"]["commonName"], "Monarch");
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/butterflies/7",
        Some(json!({"commonName": "Viceroy"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_to_existing_scientific_name_conflicts() {
    let app = app();
    create(&app, monarch()).await;
    create(&app, swallowtail()).await;

    let patch = json!({"scientificName": "Danaus plexippus"});
    let (status, _) = send(&app, Method::PUT, "/butterflies/2", Some(patch)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-submitting a record's own scientific name is fine
    let patch = json!({"scientificName": "Papilio machaon"});
    let (status, _) = send(&app, Method::PUT, "/butterflies/2", Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// DELETE
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = app();
    create(&app, monarch()).await;

    let (status, body) = send(&app, Method::DELETE, "/butterflies/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Butterfly deleted successfully");

    let (status, _) = send(&app, Method::GET, "/butterflies/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/butterflies/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let app = app();
    create(&app, monarch()).await;
    send(&app, Method::DELETE, "/butterflies/1", None).await;

    let created = create(&app, swallowtail()).await;
    assert_eq!(created["id"], 2);
}
