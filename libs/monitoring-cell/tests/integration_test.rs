// =====================================================================================
// MIS STATUS ENDPOINT TESTS
// =====================================================================================

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use monitoring_cell::{mis_status_routes, MisStatus, MisStatusService};
use shared_mis::client::OP_GET_DISTRICT_LIST;
use shared_utils::test_utils::{MockMisResponses, StubTransport};

async fn get_status(stub: Arc<StubTransport>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = mis_status_routes(Arc::new(MisStatusService::new(stub)))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_reachable_mis_reports_district_count() {
    let stub = Arc::new(StubTransport::new().with_districts(MockMisResponses::districts(&[
        ("1", "Центральный"),
        ("2", "Северный"),
        ("3", "Южный"),
    ])));

    let (status, body) = get_status(stub.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "data": { "districtsCount": 3 } }));
    assert_eq!(stub.call_count(OP_GET_DISTRICT_LIST), 1);
}

#[tokio::test]
async fn test_empty_district_list_is_still_ok() {
    let (status, body) = get_status(Arc::new(StubTransport::new())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["districtsCount"], 0);
}

#[tokio::test]
async fn test_transport_failure_reports_error_status() {
    let stub = Arc::new(StubTransport::new().with_districts(MockMisResponses::transport_failure()));

    let (status, body) = get_status(stub).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "status": "error", "error": "Сервис МИС недоступен" }));
}

#[tokio::test]
async fn test_business_failure_reports_aggregated_errors() {
    let stub = Arc::new(StubTransport::new().with_districts(MockMisResponses::failure(&[
        "Неверный GUID",
        "Доступ запрещён",
    ])));

    let (status, body) = get_status(stub).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "Неверный GUID; Доступ запрещён");
}

#[tokio::test]
async fn test_service_returns_typed_status() {
    let stub = Arc::new(StubTransport::new().with_districts(MockMisResponses::districts(&[("1", "Центральный")])));

    let status = MisStatusService::new(stub).check().await.unwrap();

    assert_eq!(status, MisStatus::ok(1));
}
