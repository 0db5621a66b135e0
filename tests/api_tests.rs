//! HTTP-level tests for the classification API.
//!
//! Drives the real router against the checked-in model and metadata
//! artifacts, covering the status endpoints, the happy path, every
//! validation failure class, and the opaque internal-error mapping.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use penguin_api::config::Config;
use penguin_api::model::gbdt::{GbdtClassifier, Tree, TreeNode};
use penguin_api::model::metadata::{load_metadata, ModelMetadata};
use penguin_api::model::service::PredictionService;
use penguin_api::server::routes::{build_router, AppState};

/// Router over the checked-in default artifacts.
fn app() -> Router {
    let model = GbdtClassifier::load(Path::new("data/model.json")).unwrap();
    let metadata = load_metadata(Path::new("data/metadata.json")).unwrap();
    router_for(model, metadata)
}

fn router_for(model: GbdtClassifier, metadata: ModelMetadata) -> Router {
    let state = Arc::new(AppState {
        service: PredictionService::new(model, metadata),
        config: Arc::new(Config::default()),
    });
    build_router(state)
}

fn valid_payload() -> Value {
    json!({
        "bill_length_mm": 40.0,
        "bill_depth_mm": 18.0,
        "flipper_length_mm": 195,
        "body_mass_g": 4000,
        "year": 2008,
        "sex": "male",
        "island": "Biscoe"
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_predict(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_read_root() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Hello! Welcome to the Penguins Classification API."})
    );
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_predict_valid_input() {
    let (status, body) = post_predict(app(), valid_payload().to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let species = body["species"].as_str().unwrap();
    let metadata = load_metadata(Path::new("data/metadata.json")).unwrap();
    assert!(metadata.label_classes.iter().any(|label| label == species));
}

#[tokio::test]
async fn test_predict_missing_field() {
    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove("bill_length_mm");

    let (status, body) = post_predict(app(), payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let detail = body["detail"].as_array().unwrap();
    assert!(!detail.is_empty());
    assert_eq!(detail[0]["loc"], json!(["body", "bill_length_mm"]));
    assert_eq!(detail[0]["type"], "missing");
}

#[tokio::test]
async fn test_predict_invalid_type() {
    let mut payload = valid_payload();
    payload["bill_length_mm"] = json!("not_a_float");

    let (status, body) = post_predict(app(), payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_array().is_some());
}

#[tokio::test]
async fn test_predict_invalid_enum() {
    let mut payload = valid_payload();
    payload["island"] = json!("Atka");

    let (status, body) = post_predict(app(), payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let detail = body["detail"].as_array().unwrap();
    assert_eq!(detail[0]["loc"], json!(["body", "island"]));
    assert_eq!(detail[0]["type"], "enum");
}

#[tokio::test]
async fn test_predict_empty_request() {
    let (status, body) = post_predict(app(), "{}".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_predict_malformed_json() {
    let (status, body) = post_predict(app(), "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_array().is_some());
}

#[tokio::test]
async fn test_predict_boundary_body_mass() {
    // Implausible but well-typed masses pass validation by design.
    for mass in [0, -3000] {
        let mut payload = valid_payload();
        payload["body_mass_g"] = json!(mass);

        let (status, body) = post_predict(app(), payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["species"].is_string());
    }
}

#[tokio::test]
async fn test_predict_internal_error() {
    // A forest referencing a feature the encoder never produces fails at
    // evaluation time, exercising the opaque 500 branch.
    let model = GbdtClassifier {
        n_classes: 3,
        base_score: 0.0,
        trees: vec![Tree {
            nodes: vec![
                TreeNode::Split {
                    feature: 99,
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: -1.0 },
            ],
        }],
    };
    let metadata = load_metadata(Path::new("data/metadata.json")).unwrap();

    let (status, body) = post_predict(router_for(model, metadata), valid_payload().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Internal prediction error"}));
}
