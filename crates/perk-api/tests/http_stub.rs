//! Client behavior against a local stub server, including the unauthorized
//! path flowing through a live session manager.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use perk_api::{ApiClient, ApiError, CardType, CreateOfferRequest, Location};
use perk_auth::test_support::jwt_with_exp;
use perk_auth::{AuthEvents, MemoryTokenStore, SessionManager, TokenStore};
use perk_core::SessionState;
use pretty_assertions::assert_eq;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Serve exactly one request with the given status and JSON body, then stop.
fn spawn_stub(status: u16, body: &'static str) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind stub server");
    let addr = server.server_addr().to_ip().expect("ip address");
    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json")
                        .expect("header"),
                );
            let _ = request.respond(response);
        }
    });
    format!("http://{addr}/api")
}

fn offer_request() -> CreateOfferRequest {
    CreateOfferRequest {
        hotel_name: "Grand Hotel".into(),
        description: "Seaside stay".into(),
        location: Location {
            country: "LK".into(),
            province: "Western".into(),
            district: "Colombo".into(),
            city: "Colombo".into(),
        },
        bank_ids: vec![1],
        card_types: vec![CardType::Credit],
        discount: 15.0,
        valid_from: "2026-01-01".into(),
        valid_to: "2026-12-31".into(),
        terms: "T&C apply".into(),
        image_url: None,
        is_active: Some(true),
    }
}

#[tokio::test]
async fn banks_parses_a_json_list() {
    let base_url = spawn_stub(
        200,
        r#"[{"id":1,"name":"First Bank"},{"id":2,"name":"Metro Bank","logoUrl":"https://cdn.example.com/metro.png"}]"#,
    );
    let client = ApiClient::new(base_url, TIMEOUT, Arc::new(MemoryTokenStore::default()))
        .expect("client");

    let banks = client.banks().await.expect("banks");
    assert_eq!(banks.len(), 2);
    assert_eq!(banks[0].name, "First Bank");
    assert_eq!(banks[1].logo_url.as_deref(), Some("https://cdn.example.com/metro.png"));
}

#[tokio::test]
async fn cities_scoped_to_a_district_parse_the_hierarchy_keys() {
    let base_url = spawn_stub(
        200,
        r#"[{"id":9,"name":"Colombo","districtId":2,"isActive":true},{"id":10,"name":"Dehiwala","districtId":2,"isActive":false}]"#,
    );
    let client = ApiClient::new(base_url, TIMEOUT, Arc::new(MemoryTokenStore::default()))
        .expect("client");

    let cities = client.cities_by_district(2).await.expect("cities");
    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].name, "Colombo");
    assert_eq!(cities[1].district_id, 2);
    assert!(!cities[1].is_active);
}

#[tokio::test]
async fn countries_parse_without_a_token() {
    let base_url = spawn_stub(
        200,
        r#"[{"id":1,"name":"Sri Lanka","code":"LK","isActive":true}]"#,
    );
    let client = ApiClient::new(base_url, TIMEOUT, Arc::new(MemoryTokenStore::default()))
        .expect("client");

    let countries = client.countries().await.expect("countries");
    assert_eq!(countries[0].code, "LK");
}

#[tokio::test]
async fn rejected_write_surfaces_formatted_validation_errors() {
    let base_url = spawn_stub(400, r#"{"bankId":"must not be empty"}"#);
    let store = MemoryTokenStore::default();
    store
        .save(&jwt_with_exp((Utc::now() + TimeDelta::hours(1)).timestamp()))
        .expect("seed token");
    let client = ApiClient::new(base_url, TIMEOUT, Arc::new(store)).expect("client");

    let error = client
        .create_offer(&offer_request())
        .await
        .expect_err("validation must fail");
    match error {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "bankIds: must not be empty");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_response_logs_the_session_out() {
    let base_url = spawn_stub(401, r#"{"error":"token rejected"}"#);
    let store = MemoryTokenStore::default();
    store
        .save(&jwt_with_exp((Utc::now() + TimeDelta::hours(1)).timestamp()))
        .expect("seed token");

    let client = ApiClient::new(base_url, TIMEOUT, Arc::new(store.clone())).expect("client");
    let manager = SessionManager::start(
        client.clone(),
        Arc::new(store.clone()),
        AuthEvents::new(),
        Duration::from_secs(30),
    );
    assert!(manager.state().is_authenticated());

    let client = client.with_logout_handle(manager.logout_handle());
    let error = client
        .delete_offer(1)
        .await
        .expect_err("401 must fail the call");
    assert!(matches!(error, ApiError::SessionExpired));

    assert_eq!(manager.state(), SessionState::Unauthenticated);
    assert!(store.load().is_none(), "store cleared by the logout path");
}

#[tokio::test]
async fn expired_token_fails_preflight_without_a_request() {
    // No stub server: the pre-flight check must fail before any I/O
    let store = MemoryTokenStore::default();
    store
        .save(&jwt_with_exp((Utc::now() - TimeDelta::hours(1)).timestamp()))
        .expect("seed token");
    let client = ApiClient::new(
        "http://127.0.0.1:9/api",
        TIMEOUT,
        Arc::new(store.clone()),
    )
    .expect("client");

    let error = client
        .delete_offer(1)
        .await
        .expect_err("stale token must fail");
    assert!(matches!(error, ApiError::SessionExpired));
}
