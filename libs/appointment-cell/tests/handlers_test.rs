// libs/appointment-cell/tests/handlers_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use appointment_cell::{slot_routes, SlotService};
use shared_cache::ManualClock;
use shared_mis::client::{OP_GET_DOCTOR_LIST, OP_GET_FREE_SLOTS};
use shared_mis::GatewayError;
use shared_utils::test_utils::{MockMisResponses, StubTransport, TestConfig};
use specialty_cell::SpecialtyService;

// 2024-03-01T09:00:00Z, 2024-03-01T10:00:00Z, 2024-03-02T09:00:00Z
const MAR_1_0900: &str = "/Date(1709283600000+0300)/";
const MAR_1_1000: &str = "/Date(1709287200000+0300)/";
const MAR_2_0900: &str = "/Date(1709370000000+0300)/";

fn scripted_stub() -> Arc<StubTransport> {
    Arc::new(
        StubTransport::new()
            .with_specialties(MockMisResponses::specialties(&[
                ("10", "Терапевт"),
                ("20", "Хирург"),
            ]))
            .with_doctors(MockMisResponses::doctors(&[
                ("101", "Иванов Иван Иванович"),
                ("102", "Петрова Анна Сергеевна"),
            ]))
            .with_slots("101", MockMisResponses::slots(&[
                ("s1", MAR_1_0900, "12"),
                ("s2", MAR_2_0900, "12"),
            ]))
            .with_slots("102", MockMisResponses::slots(&[("s3", MAR_1_1000, "7")])),
    )
}

fn service_with(stub: Arc<StubTransport>) -> Arc<SlotService> {
    let specialties = Arc::new(SpecialtyService::with_clock(
        &TestConfig::default().to_app_config(),
        stub.clone(),
        Arc::new(ManualClock::default()),
    ));
    Arc::new(SlotService::new(stub, specialties))
}

async fn get_json(service: Arc<SlotService>, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = slot_routes(service).oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_slots_by_slug_keep_doctor_order() {
    let stub = scripted_stub();

    let (status, json) = get_json(service_with(stub.clone()), "/terapevt").await;

    assert_eq!(status, StatusCode::OK);
    let slots = json.as_array().unwrap();
    let ids: Vec<&str> = slots.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);

    assert_eq!(slots[0]["datetime"], "2024-03-01T09:00:00Z");
    assert_eq!(slots[0]["specialty"], "Терапевт");
    assert_eq!(slots[0]["doctorName"], "Иванов Иван Иванович");
    assert_eq!(slots[0]["cabinet"], "12");
    assert_eq!(slots[0]["address"], "ул. Ленина, 1");
    assert_eq!(slots[0]["ticketNumber"], "s1");
    assert_eq!(slots[2]["doctorName"], "Петрова Анна Сергеевна");

    assert_eq!(stub.calls()[1], "GetDoctorList:1:10");
    assert_eq!(stub.call_count(OP_GET_FREE_SLOTS), 2);
}

#[tokio::test]
async fn test_slots_by_mis_id() {
    let stub = scripted_stub();

    let (status, json) = get_json(service_with(stub.clone()), "/20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["specialty"], "Хирург");
    assert_eq!(stub.calls()[1], "GetDoctorList:1:20");
}

#[tokio::test]
async fn test_unknown_specialty_returns_404() {
    let stub = scripted_stub();

    let (status, json) = get_json(service_with(stub.clone()), "/stomatolog").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("stomatolog"));
    assert_eq!(stub.call_count(OP_GET_DOCTOR_LIST), 0);
}

#[tokio::test]
async fn test_missing_specialty_returns_400() {
    let stub = scripted_stub();

    let (status, json) = get_json(service_with(stub.clone()), "/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Специальность не указана");

    let (status, _) = get_json(service_with(stub.clone()), "/%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn test_invalid_date_range_returns_400() {
    let stub = scripted_stub();

    let (status, json) = get_json(service_with(stub.clone()), "/terapevt?from=01.03.2024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Некорректная дата: 01.03.2024");
    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn test_explicit_range_is_accepted() {
    let stub = scripted_stub();

    let (status, json) =
        get_json(service_with(stub), "/terapevt?from=2024-03-01&to=2024-03-02").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_one_failing_doctor_fails_the_request() {
    let stub = scripted_stub();
    stub.set_slots("102", MockMisResponses::failure(&["Расписание недоступно"]));

    let (status, json) = get_json(service_with(stub), "/terapevt").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Расписание недоступно");
}

#[tokio::test]
async fn test_doctor_list_transport_failure_is_classified() {
    let stub = scripted_stub();
    stub.set_doctors(MockMisResponses::transport_failure());

    let result = service_with(stub.clone()).available_slots("terapevt", None).await;

    assert_matches!(result, Err(GatewayError::Transport { operation: "GetDoctorList", .. }));
    assert_eq!(stub.call_count(OP_GET_FREE_SLOTS), 0);
}

#[tokio::test]
async fn test_no_doctors_means_no_slots() {
    let stub = scripted_stub();
    stub.set_doctors(MockMisResponses::doctors(&[]));

    let slots = service_with(stub.clone()).available_slots("khirurg", None).await.unwrap();

    assert!(slots.is_empty());
    assert_eq!(stub.call_count(OP_GET_FREE_SLOTS), 0);
}

#[tokio::test]
async fn test_duplicated_range_key_is_json_400() {
    let stub = scripted_stub();

    let (status, json) =
        get_json(service_with(stub.clone()), "/terapevt?from=2024-03-01&from=2024-03-02").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Некорректные параметры запроса"));
    assert_eq!(stub.total_calls(), 0);
}
