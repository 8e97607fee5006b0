// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use mapd_api::AuthenticationService;
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tower::ServiceExt;

const PASSWORD: &str = "caseworker-secret";
const ADMIN_PASSWORD: &str = "admin-secret";

/// Helper to create test app state over the bundled fixture.
fn create_test_app_state() -> AppState {
    create_app_state_with_auth(AuthConfig {
        password: Some(String::from(PASSWORD)),
        admin_password: Some(String::from(ADMIN_PASSWORD)),
        skip_auth: false,
    })
}

fn create_app_state_with_auth(auth: AuthConfig) -> AppState {
    let client: MockProviderDataApi =
        MockProviderDataApi::with_default_fixture().expect("Failed to load bundled fixture");
    AppState::new(client, InMemorySessionStore::default(), auth)
}

async fn send(
    app_state: &AppState,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body: Body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&value).unwrap())
        }
        None => Body::empty(),
    };
    build_router(app_state.clone())
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn issued_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(String::from)
}

/// Logs in and returns the cookie to send with later requests.
async fn login(app_state: &AppState, password: &str) -> String {
    let response = send(
        app_state,
        "POST",
        "/login",
        None,
        Some(json!({ "password": password })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    issued_cookie(&response).expect("login should issue a session cookie")
}

#[tokio::test]
async fn test_health_does_not_require_login() {
    let app_state: AppState = create_test_app_state();

    let response = send(&app_state, "GET", "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_protected_route_requires_login() {
    let app_state: AppState = create_test_app_state();

    let response = send(&app_state, "GET", "/providers?search=smith", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(issued_cookie(&response).is_some());
    let body = body_json(response).await;
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        "POST",
        "/login",
        None,
        Some(json!({ "password": "guess" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_password_grants_admin_role() {
    let app_state: AppState = create_test_app_state();

    let response = send(
        &app_state,
        "POST",
        "/login",
        None,
        Some(json!({ "password": ADMIN_PASSWORD })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], "MAPD.Admin");
}

#[tokio::test]
async fn test_search_providers_after_login() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "GET",
        "/providers?search=smith",
        Some(&cookie),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(issued_cookie(&response).is_none());
    let body = body_json(response).await;
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["items"][0]["firm_name"], "SMITH & PARTNERS SOLICITORS");
}

#[tokio::test]
async fn test_logout_ends_the_login() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(&app_state, "POST", "/logout", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app_state, "GET", "/provider/1", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rotates_the_session_cookie() {
    let app_state: AppState = create_test_app_state();
    let response = send(&app_state, "GET", "/health", None, None).await;
    let before: String = issued_cookie(&response).expect("a session cookie");

    let response = send(
        &app_state,
        "POST",
        "/login",
        Some(&before),
        Some(json!({ "password": PASSWORD })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let after: String = issued_cookie(&response).expect("a rotated session cookie");
    assert_ne!(after, before);

    let response = send(&app_state, "GET", "/provider/1", Some(&before), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&app_state, "GET", "/provider/1", Some(&after), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unissued_session_cookies_are_replaced() {
    let app_state: AppState = create_test_app_state();
    login(&app_state, PASSWORD).await;

    for forged in [
        String::from("mapd_session=_global"),
        format!("mapd_session={}", AuthenticationService::new_session_id()),
    ] {
        let response = send(&app_state, "GET", "/provider/1", Some(&forged), None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let replacement: String = issued_cookie(&response).expect("a fresh session cookie");
        assert_ne!(replacement, forged);
    }
}

#[tokio::test]
async fn test_retrying_reads_do_not_block_other_requests() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;
    app_state.provider_data.lock().await.inner().fail_next_reads(2);

    let slow = tokio::spawn({
        let app_state: AppState = app_state.clone();
        async move { send(&app_state, "GET", "/provider/1", Some(&cookie), None).await }
    });
    tokio::time::timeout(Duration::from_secs(2), async {
        while app_state.provider_data.try_lock().is_ok() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("the provider request should reach the client");

    let started: Instant = Instant::now();
    let response = send(&app_state, "GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() < Duration::from_millis(150));

    let response = slow.await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_provider_is_not_found() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(&app_state, "GET", "/provider/999", Some(&cookie), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_office_view() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "GET",
        "/provider/1/office/1A001L",
        Some(&cookie),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["office"]["firm_office_code"], "1A001L");
    assert_eq!(body["firm"]["firm_id"], 1);
}

#[tokio::test]
async fn test_wizard_step_redirects_to_next_step() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "POST",
        "/add-provider/provider",
        Some(&cookie),
        Some(json!({ "firm_name": "Castle Law", "firm_type": "Legal Services Provider" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/add-provider/lsp-details"
    );

    let response = send(
        &app_state,
        "GET",
        "/add-provider/lsp-details",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["firm_name"], "Castle Law");
}

#[tokio::test]
async fn test_wizard_step_out_of_order_is_bad_request() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "POST",
        "/add-provider/vat-number",
        Some(&cookie),
        Some(json!({ "vat_registration_number": "" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_wizard_step_is_not_found() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "POST",
        "/add-provider/unknown-step",
        Some(&cookie),
        Some(json!({})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_failure_lists_field_errors() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "POST",
        "/provider/1/active",
        Some(&cookie),
        Some(json!({ "status": "" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "status");
    assert_eq!(body["errors"][0]["message"], "Select active or inactive");
}

#[tokio::test]
async fn test_failed_write_is_bad_gateway() {
    let app_state: AppState = create_test_app_state();
    app_state
        .provider_data
        .lock()
        .await
        .inner_mut()
        .fail_writes_for_office("1A002L");
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "POST",
        "/provider/1/office/1A002L/payment-method",
        Some(&cookie),
        Some(json!({ "payment_method": "Cheque" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "form");
}

#[tokio::test]
async fn test_new_office_flow() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "POST",
        "/provider/1/new-office",
        Some(&cookie),
        Some(json!({ "office_name": "Bristol office", "is_head_office": "no" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/provider/1/new-office/contact-details"
    );

    let response = send(
        &app_state,
        "POST",
        "/provider/1/new-office/contact-details",
        Some(&cookie),
        Some(json!({
            "address_line_1": "7 Castle Street",
            "city": "Bristol",
            "postcode": "BS1 3AA",
            "telephone_number": "0117 496 0000",
            "email_address": "office@castle.example",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location: String = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/provider/1/office/"));
}

#[tokio::test]
async fn test_contract_manager_directory_requires_admin() {
    let app_state: AppState = create_test_app_state();
    let cookie: String = login(&app_state, PASSWORD).await;

    let response = send(
        &app_state,
        "POST",
        "/contract-managers",
        Some(&cookie),
        Some(json!({ "name": "Dana Scully" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_skip_auth_acts_as_admin() {
    let app_state: AppState = create_app_state_with_auth(AuthConfig {
        skip_auth: true,
        ..AuthConfig::default()
    });

    let response = send(
        &app_state,
        "POST",
        "/contract-managers",
        None,
        Some(json!({ "name": "Dana Scully" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["contract_managers"]["items"][0], "Dana Scully");
}

#[tokio::test]
async fn test_purge_keeps_active_sessions() {
    let app_state: AppState = create_test_app_state();
    login(&app_state, PASSWORD).await;

    let removed: usize = purge_expired_sessions(&app_state).await;

    assert_eq!(removed, 0);
    assert!(app_state.sessions.lock().await.session_count() >= 1);
}
