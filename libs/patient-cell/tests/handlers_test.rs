// libs/patient-cell/tests/handlers_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use patient_cell::{patient_routes, PatientSearchRequest, PatientService};
use shared_mis::client::OP_SEARCH_PATIENT;
use shared_mis::GatewayError;
use shared_utils::test_utils::{MockMisResponses, StubTransport};

async fn post_raw(stub: Arc<StubTransport>, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = patient_routes(Arc::new(PatientService::new(stub)))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(stub: Arc<StubTransport>, body: Value) -> (StatusCode, Value) {
    post_raw(stub, &body.to_string()).await
}

#[tokio::test]
async fn test_incomplete_body_returns_400_without_search() {
    let stub = Arc::new(StubTransport::new());

    let (status, json) = post_json(stub.clone(), json!({ "lastName": "Ivanov" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("firstName"));
    assert_eq!(stub.call_count(OP_SEARCH_PATIENT), 0);
}

#[tokio::test]
async fn test_invalid_birth_date_returns_400() {
    let stub = Arc::new(StubTransport::new());

    let (status, json) = post_json(
        stub.clone(),
        json!({ "lastName": "Иванов", "firstName": "Иван", "birthDate": "15/06/1985" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Некорректная дата рождения: 15/06/1985");
    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_returns_400_error_body() {
    let stub = Arc::new(StubTransport::new());

    let (status, json) = post_raw(stub.clone(), "{ not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn test_matches_are_returned() {
    let stub = Arc::new(StubTransport::new().with_patients(MockMisResponses::patients(&[
        ("5001", "Иванов", "Иван", "/Date(487641600000+0300)/"),
        ("5002", "Иванов", "Пётр", "/Date(-315619200000)/"),
    ])));

    let (status, json) = post_json(
        stub.clone(),
        json!({
            "lastName": "Иванов",
            "firstName": "Иван",
            "middleName": "Иванович",
            "birthDate": "1985-06-15"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let patients = json.as_array().unwrap();
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0]["id"], "5001");
    assert_eq!(patients[0]["lastName"], "Иванов");
    assert_eq!(patients[0]["firstName"], "Иван");
    assert_eq!(patients[0]["birthDate"], "1985-06-15T00:00:00Z");
    assert_eq!(patients[1]["birthDate"], "1960-01-01T00:00:00Z");
    assert_eq!(stub.calls(), vec!["SearchTop10Patient:Иванов".to_string()]);
}

#[tokio::test]
async fn test_business_error_returns_400() {
    let stub = Arc::new(StubTransport::new().with_patients(MockMisResponses::failure(&[
        "Пациент не найден",
    ])));

    let (status, json) = post_json(
        stub,
        json!({ "lastName": "Иванов", "firstName": "Иван", "birthDate": "1985-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Пациент не найден");
}

#[tokio::test]
async fn test_transport_error_returns_500() {
    let stub = Arc::new(StubTransport::new().with_patients(MockMisResponses::transport_failure()));

    let (status, json) = post_json(
        stub,
        json!({ "lastName": "Иванов", "firstName": "Иван", "birthDate": "1985-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Сервис МИС недоступен");
}

fn ivanov() -> PatientSearchRequest {
    PatientSearchRequest {
        last_name: Some("Иванов".to_string()),
        first_name: Some("Иван".to_string()),
        middle_name: None,
        birth_date: Some("1985-06-15".to_string()),
    }
}

#[tokio::test]
async fn test_service_classifies_failures() {
    let stub = Arc::new(StubTransport::new().with_patients(MockMisResponses::transport_failure()));
    let service = PatientService::new(stub.clone());

    let result = service.search_patients(ivanov()).await;
    assert_matches!(result, Err(GatewayError::Transport { operation: "SearchTop10Patient", .. }));

    stub.set_patients(MockMisResponses::failure(&["Пациент не найден"]));
    let result = service.search_patients(ivanov()).await;
    assert_matches!(result, Err(GatewayError::Business(msg)) if msg == "Пациент не найден");

    let incomplete = PatientSearchRequest {
        first_name: Some("  ".to_string()),
        ..ivanov()
    };
    let result = service.search_patients(incomplete).await;
    assert_matches!(result, Err(GatewayError::Validation(e)) if e.0.contains("firstName"));
    assert_eq!(stub.call_count(OP_SEARCH_PATIENT), 2);
}
