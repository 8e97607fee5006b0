// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers.
//!
//! Each handler locks what it needs, calls into `mapd-api` and maps the
//! result onto a response. When a handler needs both locks it takes the
//! Provider Data client first and the session store second.
//!
//! Provider Data reads sleep between retries, so every call that reaches
//! the client runs on the blocking pool rather than an async worker.

use axum::{
    Json,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use mapd::{InMemorySessionStore, NewOfficeFragment, Page};
use mapd_api::{
    ActiveStatusRequest, AssignBankAccountRequest, BankAccountRequest, BankAccountResponse,
    BulkResponse, ChambersRequest, ChildDetailsRequest, ContactDetailsRequest,
    ContractManagerDirectoryResponse, ContractManagerNameRequest, ContractManagerRemovalRequest,
    ContractManagerRequest, FirmResponse, HeadOfficeRequest, HeadOfficeResponse,
    HoldPaymentsRequest, InterventionRequest, LiaisonManagerCheckRequest, LiaisonManagerRequest,
    LiaisonManagerResponse, LoginRequest, LspDetailsRequest, NewOfficeRequest,
    OfficeResponse, OfficeSelectionRequest, OfficeView, PaymentMethodRequest, ProviderRequest,
    ProviderView, RedirectResponse, SearchQuery, StatusResponse, StepResponse, VatNumberRequest,
    WizardStepView, YesNoRequest,
};
use mapd_domain::{BankAccount, Firm, Office};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::error::HttpError;
use crate::session::{SessionActor, SessionId, session_cookie_header};
use crate::{AppState, ProviderData};

type HttpResult<T> = Result<Json<T>, HttpError>;

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Redirects to the next page, carrying the response as the body.
fn see_other<T: Serialize>(location: &str, body: T) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location.to_string())],
        Json(body),
    )
        .into_response()
}

/// Runs a call against the Provider Data client on the blocking pool.
async fn with_client<T, E, F>(app_state: &AppState, call: F) -> Result<T, HttpError>
where
    F: FnOnce(&mut ProviderData) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<HttpError> + Send + 'static,
{
    let provider_data = Arc::clone(&app_state.provider_data);
    tokio::task::spawn_blocking(move || {
        let mut client = provider_data.blocking_lock();
        call(&mut client).map_err(Into::into)
    })
    .await
    .map_err(|e| HttpError::internal(format!("Provider Data call did not finish: {e}")))?
}

/// Like [`with_client`], also holding the session store.
async fn with_client_and_sessions<T, E, F>(app_state: &AppState, call: F) -> Result<T, HttpError>
where
    F: FnOnce(&mut ProviderData, &mut InMemorySessionStore) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<HttpError> + Send + 'static,
{
    let provider_data = Arc::clone(&app_state.provider_data);
    let sessions = Arc::clone(&app_state.sessions);
    tokio::task::spawn_blocking(move || {
        let mut client = provider_data.blocking_lock();
        let mut store = sessions.blocking_lock();
        call(&mut client, &mut store).map_err(Into::into)
    })
    .await
    .map_err(|e| HttpError::internal(format!("Provider Data call did not finish: {e}")))?
}

/// Reads a wizard form out of a JSON body.
fn form<T: DeserializeOwned>(body: Value) -> Result<T, HttpError> {
    serde_json::from_value(body)
        .map_err(|e| HttpError::bad_request(format!("Malformed form data: {e}")))
}

// ============================================================================
// Health and login
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[allow(clippy::unused_async)]
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    SessionId(session_id): SessionId,
    Json(req): Json<LoginRequest>,
) -> Result<Response, HttpError> {
    let mut sessions = app_state.sessions.lock().await;
    let response = mapd_api::login(&app_state.auth, &mut *sessions, &session_id, &req)?;
    drop(sessions);

    let mut reply: Response = Json(&response).into_response();
    if let Some(cookie) = session_cookie_header(&response.session_id) {
        reply.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(reply)
}

pub async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(_, SessionId(session_id)): SessionActor,
) -> StatusCode {
    let mut sessions = app_state.sessions.lock().await;
    mapd_api::logout(&mut *sessions, &session_id);
    drop(sessions);
    info!("User logged out");
    StatusCode::NO_CONTENT
}

// ============================================================================
// Add-provider wizard
// ============================================================================

pub async fn handle_get_wizard_step(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(_, SessionId(session_id)): SessionActor,
    Path(step): Path<String>,
    Query(query): Query<SearchQuery>,
) -> HttpResult<WizardStepView> {
    let view = with_client_and_sessions(&app_state, move |client, sessions| {
        mapd_api::get_wizard_step(&*client, &mut *sessions, &session_id, &step, &query)
    })
    .await?;
    Ok(Json(view))
}

/// Accepts one wizard page and redirects to the next.
///
/// The final `create` step writes the provider and answers with
/// `201 Created` instead.
pub async fn handle_submit_wizard_step(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(_, SessionId(session_id)): SessionActor,
    Path(step): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, HttpError> {
    info!(step = %step, "Handling wizard step");

    with_client_and_sessions(&app_state, move |client, store| -> Result<Response, HttpError> {
        let sid: &str = &session_id;
        let response: StepResponse = match step.as_str() {
            "provider" => mapd_api::submit_provider(store, sid, &form(body)?)?,
            "lsp-details" => mapd_api::submit_lsp_details(store, sid, &form(body)?, today())?,
            "contact-details" => mapd_api::submit_contact_details(store, sid, &form(body)?)?,
            "vat-number" => mapd_api::submit_vat_number(store, sid, &form(body)?)?,
            "bank-account" => mapd_api::submit_bank_account(store, sid, &form(body)?)?,
            "liaison-manager" => mapd_api::submit_liaison_manager(store, sid, &form(body)?)?,
            "assign-contract-manager" => {
                let req: ContractManagerRequest = form(body)?;
                mapd_api::submit_contract_manager(store, sid, &req)?
            }
            "assign-chambers" => {
                let req: ChambersRequest = form(body)?;
                mapd_api::submit_chambers(&*client, store, sid, &req)?
            }
            "advocate-details" => {
                let req: ChildDetailsRequest = form(body)?;
                mapd_api::submit_child_details(store, sid, &req)?
            }
            "liaison-manager-check" => {
                let req: LiaisonManagerCheckRequest = form(body)?;
                mapd_api::submit_liaison_manager_check(store, sid, &req)?
            }
            "create" => {
                let committed = mapd_api::commit_provider(client, store, sid, today())?;
                info!(firm_id = committed.firm.firm_id, "Provider created");
                let location: String = committed.redirect.clone();
                return Ok((
                    StatusCode::CREATED,
                    [(header::LOCATION, location)],
                    Json(committed),
                )
                    .into_response());
            }
            other => {
                return Err(HttpError::not_found(format!(
                    "No wizard step named '{other}'"
                )));
            }
        };

        Ok(see_other(&response.redirect.clone(), response))
    })
    .await
}

// ============================================================================
// Providers
// ============================================================================

pub async fn handle_search_providers(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Query(query): Query<SearchQuery>,
) -> HttpResult<Page<Firm>> {
    let page = with_client(&app_state, move |client| {
        mapd_api::search_providers(&*client, &query)
    })
    .await?;
    Ok(Json(page))
}

pub async fn handle_search_chambers(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Query(query): Query<SearchQuery>,
) -> HttpResult<Page<Firm>> {
    let page = with_client(&app_state, move |client| {
        mapd_api::search_chambers(&*client, &query)
    })
    .await?;
    Ok(Json(page))
}

pub async fn handle_get_provider(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
) -> HttpResult<ProviderView> {
    let view = with_client(&app_state, move |client| {
        mapd_api::get_provider(&*client, firm_id)
    })
    .await?;
    Ok(Json(view))
}

pub async fn handle_change_firm_name(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<ProviderRequest>,
) -> HttpResult<FirmResponse> {
    info!(firm_id, "Changing provider name");
    let response = with_client(&app_state, move |client| {
        mapd_api::change_firm_name(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_change_lsp_details(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<LspDetailsRequest>,
) -> HttpResult<FirmResponse> {
    let response = with_client(&app_state, move |client| {
        mapd_api::change_lsp_details(&mut *client, firm_id, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_change_advocate_details(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<ChildDetailsRequest>,
) -> HttpResult<FirmResponse> {
    let response = with_client(&app_state, move |client| {
        mapd_api::change_advocate_details(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_assign_chambers(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<ChambersRequest>,
) -> HttpResult<FirmResponse> {
    info!(firm_id, "Assigning chambers");
    let response = with_client(&app_state, move |client| {
        mapd_api::assign_chambers(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_change_firm_liaison_manager(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<LiaisonManagerRequest>,
) -> HttpResult<LiaisonManagerResponse> {
    info!(firm_id, "Changing liaison manager");
    let response = with_client(&app_state, move |client| {
        mapd_api::change_liaison_manager(&mut *client, firm_id, None, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_reassign_head_office(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<HeadOfficeRequest>,
) -> HttpResult<HeadOfficeResponse> {
    info!(firm_id, office_code = %req.office_code, "Reassigning head office");
    let response = with_client(&app_state, move |client| {
        mapd_api::reassign_head_office(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_search_bank_accounts(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> HttpResult<Page<BankAccount>> {
    let page = with_client(&app_state, move |client| {
        mapd_api::search_bank_accounts(&*client, firm_id, &query)
    })
    .await?;
    Ok(Json(page))
}

// ============================================================================
// Provider status flows
// ============================================================================

pub async fn handle_set_firm_active(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<ActiveStatusRequest>,
) -> HttpResult<StatusResponse<Firm>> {
    info!(firm_id, status = %req.status, "Changing provider active status");
    let response = with_client(&app_state, move |client| {
        mapd_api::set_firm_active(&mut *client, firm_id, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_firm_hold_payments(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<HoldPaymentsRequest>,
) -> HttpResult<StatusResponse<Firm>> {
    info!(firm_id, "Changing provider payment hold");
    let response = with_client(&app_state, move |client| {
        mapd_api::set_firm_hold_payments(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_firm_intervened(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<InterventionRequest>,
) -> HttpResult<StatusResponse<Office>> {
    info!(firm_id, "Changing provider intervention");
    let response = with_client(&app_state, move |client| {
        mapd_api::set_firm_intervened(&mut *client, firm_id, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_firm_false_balance(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<YesNoRequest>,
) -> HttpResult<StatusResponse<Office>> {
    let response = with_client(&app_state, move |client| {
        mapd_api::set_firm_false_balance(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_firm_debt_recovery(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<YesNoRequest>,
) -> HttpResult<StatusResponse<Office>> {
    let response = with_client(&app_state, move |client| {
        mapd_api::set_firm_debt_recovery(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_apply_hold_to_offices(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<OfficeSelectionRequest>,
) -> HttpResult<BulkResponse> {
    info!(firm_id, offices = req.office_codes.len(), "Holding payments on offices");
    let response = with_client(&app_state, move |client| {
        mapd_api::apply_hold_to_offices(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_apply_intervention_to_offices(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<OfficeSelectionRequest>,
) -> HttpResult<BulkResponse> {
    info!(firm_id, offices = req.office_codes.len(), "Intervening offices");
    let response = with_client(&app_state, move |client| {
        mapd_api::apply_intervention_to_offices(&mut *client, firm_id, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_remove_intervention_from_offices(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<OfficeSelectionRequest>,
) -> HttpResult<BulkResponse> {
    info!(firm_id, offices = req.office_codes.len(), "Removing office interventions");
    let response = with_client(&app_state, move |client| {
        mapd_api::remove_intervention_from_offices(&mut *client, firm_id, &req)
    })
    .await?;
    Ok(Json(response))
}

// ============================================================================
// Offices
// ============================================================================

pub async fn handle_get_office(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
) -> HttpResult<OfficeView> {
    let view = with_client(&app_state, move |client| {
        mapd_api::get_office(&*client, firm_id, &office_code)
    })
    .await?;
    Ok(Json(view))
}

pub async fn handle_set_office_active(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<ActiveStatusRequest>,
) -> HttpResult<StatusResponse<Office>> {
    info!(firm_id, office_code = %office_code, status = %req.status, "Changing office active status");
    let response = with_client(&app_state, move |client| {
        mapd_api::set_office_active(&mut *client, firm_id, &office_code, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_office_hold_payments(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<HoldPaymentsRequest>,
) -> HttpResult<StatusResponse<Office>> {
    info!(firm_id, office_code = %office_code, "Changing office payment hold");
    let response = with_client(&app_state, move |client| {
        mapd_api::set_office_hold_payments(&mut *client, firm_id, &office_code, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_office_intervened(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<InterventionRequest>,
) -> HttpResult<StatusResponse<Office>> {
    info!(firm_id, office_code = %office_code, "Changing office intervention");
    let response = with_client(&app_state, move |client| {
        mapd_api::set_office_intervened(&mut *client, firm_id, &office_code, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_office_false_balance(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<YesNoRequest>,
) -> HttpResult<StatusResponse<Office>> {
    let response = with_client(&app_state, move |client| {
        mapd_api::set_office_false_balance(&mut *client, firm_id, &office_code, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_set_office_debt_recovery(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<YesNoRequest>,
) -> HttpResult<StatusResponse<Office>> {
    let response = with_client(&app_state, move |client| {
        mapd_api::set_office_debt_recovery(&mut *client, firm_id, &office_code, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_change_office_liaison_manager(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<LiaisonManagerRequest>,
) -> HttpResult<LiaisonManagerResponse> {
    info!(firm_id, office_code = %office_code, "Changing office liaison manager");
    let response = with_client(&app_state, move |client| {
        mapd_api::change_liaison_manager(
            &mut *client,
            firm_id,
            Some(office_code.as_str()),
            &req,
            today(),
        )
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_assign_office_contract_manager(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<ContractManagerRequest>,
) -> HttpResult<OfficeResponse> {
    info!(firm_id, office_code = %office_code, "Assigning contract manager");
    let response = with_client_and_sessions(&app_state, move |client, sessions| {
        mapd_api::assign_office_contract_manager(
            &mut *client,
            &mut *sessions,
            firm_id,
            &office_code,
            &req,
        )
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_change_payment_method(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<PaymentMethodRequest>,
) -> HttpResult<OfficeResponse> {
    let response = with_client(&app_state, move |client| {
        mapd_api::change_payment_method(&mut *client, firm_id, &office_code, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_change_office_vat(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<VatNumberRequest>,
) -> HttpResult<OfficeResponse> {
    let response = with_client(&app_state, move |client| {
        mapd_api::change_office_vat(&mut *client, firm_id, &office_code, &req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_add_bank_account(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<BankAccountRequest>,
) -> HttpResult<BankAccountResponse> {
    info!(firm_id, office_code = %office_code, "Adding bank account");
    let response = with_client(&app_state, move |client| {
        mapd_api::add_bank_account(&mut *client, firm_id, &office_code, &req, today())
    })
    .await?;
    Ok(Json(response))
}

pub async fn handle_assign_bank_account(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Path((firm_id, office_code)): Path<(i64, String)>,
    Json(req): Json<AssignBankAccountRequest>,
) -> HttpResult<BankAccountResponse> {
    info!(firm_id, office_code = %office_code, "Assigning existing bank account");
    let response = with_client(&app_state, move |client| {
        mapd_api::assign_bank_account(&mut *client, firm_id, &office_code, &req)
    })
    .await?;
    Ok(Json(response))
}

// ============================================================================
// Add-office flow
// ============================================================================

pub async fn handle_start_new_office(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(_, SessionId(session_id)): SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<NewOfficeRequest>,
) -> Result<Response, HttpError> {
    let response: RedirectResponse = with_client_and_sessions(&app_state, move |client, sessions| {
        mapd_api::start_new_office(&*client, &mut *sessions, &session_id, firm_id, &req)
    })
    .await?;
    Ok(see_other(&response.redirect.clone(), response))
}

pub async fn handle_get_new_office(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(_, SessionId(session_id)): SessionActor,
    Path(firm_id): Path<i64>,
) -> HttpResult<NewOfficeFragment> {
    let mut sessions = app_state.sessions.lock().await;
    let fragment = mapd_api::get_new_office(&mut *sessions, &session_id, firm_id)?;
    drop(sessions);
    Ok(Json(fragment))
}

pub async fn handle_commit_new_office(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(_, SessionId(session_id)): SessionActor,
    Path(firm_id): Path<i64>,
    Json(req): Json<ContactDetailsRequest>,
) -> Result<Response, HttpError> {
    info!(firm_id, "Creating office");
    let response: OfficeResponse = with_client_and_sessions(&app_state, move |client, sessions| {
        mapd_api::commit_new_office(
            &mut *client,
            &mut *sessions,
            &session_id,
            firm_id,
            &req,
            today(),
        )
    })
    .await?;
    let location: String =
        mapd_api::office_path(firm_id, &response.office.firm_office_code);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    )
        .into_response())
}

// ============================================================================
// Contract manager directory
// ============================================================================

pub async fn handle_list_contract_managers(
    AxumState(app_state): AxumState<AppState>,
    _actor: SessionActor,
    Query(query): Query<SearchQuery>,
) -> HttpResult<ContractManagerDirectoryResponse> {
    let mut sessions = app_state.sessions.lock().await;
    let response = mapd_api::list_contract_managers(&mut *sessions, &query)?;
    drop(sessions);
    Ok(Json(response))
}

pub async fn handle_add_contract_manager(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<ContractManagerNameRequest>,
) -> HttpResult<ContractManagerDirectoryResponse> {
    info!(name = %req.name, "Adding contract manager");
    let mut sessions = app_state.sessions.lock().await;
    let response = mapd_api::add_contract_manager(&actor, &mut *sessions, &req)?;
    drop(sessions);
    Ok(Json(response))
}

pub async fn handle_remove_contract_managers(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor, _): SessionActor,
    Json(req): Json<ContractManagerRemovalRequest>,
) -> HttpResult<ContractManagerDirectoryResponse> {
    info!(count = req.names.len(), "Removing contract managers");
    let mut sessions = app_state.sessions.lock().await;
    let response = mapd_api::remove_contract_managers(&actor, &mut *sessions, &req)?;
    drop(sessions);
    Ok(Json(response))
}
