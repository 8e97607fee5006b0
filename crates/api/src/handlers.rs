// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for pages and form submissions.
//!
//! Handlers receive the Provider Data client and the session store
//! explicitly. Each one checks the guard of the page first, then validates
//! the form, then calls into core and translates whatever goes wrong into an
//! [`ApiError`].

use crate::auth::{
    AuthConfig, AuthenticatedActor, AuthenticationService, AuthorizationService, ISSUED_KEY, Role,
};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ActiveStatusRequest, AssignBankAccountRequest, BankAccountRequest, BankAccountResponse,
    BulkResponse, ChambersRequest, ChildDetailsRequest, CommitResponse, ContactDetailsRequest,
    ContractManagerDirectoryResponse, ContractManagerNameRequest, ContractManagerRemovalRequest,
    ContractManagerRequest, FirmResponse, HeadOfficeRequest, HeadOfficeResponse,
    HoldPaymentsRequest, InterventionRequest, LiaisonManagerCheckRequest, LiaisonManagerRequest,
    LiaisonManagerResponse, LoginRequest, LoginResponse, LspDetailsRequest, NewOfficeRequest,
    OfficeResponse, OfficeSelectionRequest, OfficeView, PaymentMethodRequest, ProviderRequest,
    ProviderView, RedirectResponse, SearchQuery, StatusResponse, StepResponse, VatNumberRequest,
    WizardStepView, YesNoRequest,
};
use crate::validation::{
    FormErrors, firm_name, optional_past_date, required_past_date, validate_bank_account,
    validate_child_details, validate_contact_details, validate_liaison_manager,
    validate_lsp_details, validate_payment_method, validate_provider, validate_search,
    validate_vat_number, yes_no,
};
use mapd::{
    ContractManagerDirectory, ContractManagerRoute, CoreError, DIRECTORY_PER_PAGE, Flash,
    FollowUp, NEW_OFFICE_KEY, NewOfficeFragment, Page, SELECT_CONTRACT_MANAGER_MESSAGE,
    SessionStore, StatusOutcome, StepSubmission, WizardState, WizardStep, check_guard,
    contract_manager_route, load_new_office, paginate, require_chambers,
};
use mapd_domain::{BankAccount, Firm, FirmType, Office, required_text};
use mapd_pda::{ProviderDataClient, ProviderDataError};
use time::Date;
use tracing::{debug, info};

/// Root path of the add-provider wizard.
pub const WIZARD_PATH: &str = "/add-provider";

#[must_use]
pub fn step_path(step: WizardStep) -> String {
    format!("{WIZARD_PATH}/{}", step.as_str())
}

#[must_use]
pub fn provider_path(firm_id: i64) -> String {
    format!("/provider/{firm_id}")
}

#[must_use]
pub fn office_path(firm_id: i64, office_code: &str) -> String {
    format!("/provider/{firm_id}/office/{office_code}")
}

fn follow_up_path(firm_id: i64, follow_up: &FollowUp) -> String {
    let provider: String = provider_path(firm_id);
    match follow_up {
        FollowUp::ApplyHoldToOffices { .. } => format!("{provider}/offices/hold-payments"),
        FollowUp::ApplyInterventionToOffices { .. } => format!("{provider}/offices/intervene"),
        FollowUp::RemoveInterventionFromOffices { .. } => {
            format!("{provider}/offices/remove-intervention")
        }
        FollowUp::AssignContractManager { office_code } => {
            format!("{}/contract-manager", office_path(firm_id, office_code))
        }
    }
}

fn status_response<T>(firm_id: i64, outcome: StatusOutcome<T>) -> StatusResponse<T> {
    let redirect: Option<String> = outcome
        .follow_up
        .as_ref()
        .map(|follow_up| follow_up_path(firm_id, follow_up));
    StatusResponse {
        updated: outcome.updated,
        flashes: outcome.flashes,
        follow_up: outcome.follow_up,
        redirect,
    }
}

fn provider_error(err: ProviderDataError) -> ApiError {
    translate_core_error(CoreError::ProviderData(err))
}

fn not_found(resource: &str, id: impl std::fmt::Display) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource.to_string(),
        message: format!("{resource} '{id}' does not exist"),
    }
}

/// A required yes/no radio answer.
fn answer(field: &'static str, value: &str, message: &str) -> Result<bool, ApiError> {
    yes_no(field, value, message).map_err(translate_domain_error)
}

fn optional_reason(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|r| !r.is_empty())
}

fn find_firm<C: ProviderDataClient + ?Sized>(client: &C, firm_id: i64) -> Result<Firm, ApiError> {
    client
        .get_provider_firm(firm_id)
        .map_err(provider_error)?
        .ok_or_else(|| not_found("Provider", firm_id))
}

fn find_firm_office<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
    office_code: &str,
) -> Result<Office, ApiError> {
    client
        .get_provider_offices(firm_id)
        .map_err(provider_error)?
        .into_iter()
        .find(|o| o.firm_office_code == office_code)
        .ok_or_else(|| not_found("Office", office_code))
}

// ============================================================================
// Login
// ============================================================================

/// Logs in with the shared password.
///
/// The login is recorded under a freshly issued session id, returned in the
/// response. The presented session is logged out and forgotten.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the password is wrong.
pub fn login<S: SessionStore + ?Sized>(
    config: &AuthConfig,
    store: &mut S,
    session_id: &str,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let role: Role = AuthenticationService::verify_password(config, &request.password)?;
    let new_session_id: String = AuthenticationService::issue_session(store);
    let actor: AuthenticatedActor =
        AuthenticationService::record_login(store, &new_session_id, role)?;

    logout(store, session_id);
    store.delete(session_id, ISSUED_KEY);

    Ok(LoginResponse {
        role: actor.role.as_str().to_string(),
        session_id: actor.id,
    })
}

/// Logs out and drops any half-finished flow of the session.
pub fn logout<S: SessionStore + ?Sized>(store: &mut S, session_id: &str) {
    AuthenticationService::logout(store, session_id);
    WizardState::clear(store, session_id);
    store.delete(session_id, NEW_OFFICE_KEY);
}

// ============================================================================
// Add-provider wizard
// ============================================================================

/// Shows a wizard step.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown step and
/// `ApiError::PreconditionFailed` if the session lacks the answers the step
/// builds on.
pub fn get_wizard_step<C, S>(
    client: &C,
    store: &mut S,
    session_id: &str,
    slug: &str,
    query: &SearchQuery,
) -> Result<WizardStepView, ApiError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let step: WizardStep = WizardStep::parse_slug(slug).map_err(translate_core_error)?;
    let state: WizardState = WizardState::load(store, session_id).map_err(translate_core_error)?;
    check_guard(step, &state).map_err(translate_core_error)?;

    let term: String = validate_search(&query.search)?;
    let page: usize = query.page.unwrap_or(1);
    let chambers: Option<Page<Firm>> = if step == WizardStep::AssignChambers {
        Some(mapd::search_chambers(client, &term, page).map_err(translate_core_error)?)
    } else {
        None
    };
    let contract_managers: Option<Page<String>> = if step == WizardStep::AssignContractManager {
        let names: Vec<String> = ContractManagerDirectory::new(store)
            .search(&term)
            .map_err(translate_core_error)?;
        Some(paginate(names, page, DIRECTORY_PER_PAGE))
    } else {
        None
    };

    Ok(WizardStepView {
        step: step.as_str().to_string(),
        firm_name: state.provider.as_ref().map(|p| p.firm_name.clone()),
        firm_type: state.firm_type().map(|t| t.as_str().to_string()),
        chambers,
        contract_managers,
    })
}

/// Runs one wizard step: guard, validation, merge into the state, save.
fn submit_step<S, F>(
    store: &mut S,
    session_id: &str,
    step: WizardStep,
    build: F,
) -> Result<StepResponse, ApiError>
where
    S: SessionStore + ?Sized,
    F: FnOnce(&mut S, &WizardState) -> Result<StepSubmission, ApiError>,
{
    let mut state: WizardState =
        WizardState::load(store, session_id).map_err(translate_core_error)?;
    check_guard(step, &state).map_err(translate_core_error)?;

    let submission: StepSubmission = build(store, &state)?;
    let next: WizardStep = state.submit(submission).map_err(translate_core_error)?;
    state.save(store, session_id).map_err(translate_core_error)?;

    debug!(step = step.as_str(), next = next.as_str(), "Wizard step saved");
    Ok(StepResponse {
        next_step: next.as_str().to_string(),
        redirect: step_path(next),
    })
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn submit_provider<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &ProviderRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(store, session_id, WizardStep::Provider, |_, _| {
        let (firm_name, firm_type) = validate_provider(request)?;
        Ok(StepSubmission::Provider {
            firm_name,
            firm_type,
        })
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` listing every failing field.
pub fn submit_lsp_details<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &LspDetailsRequest,
    today: Date,
) -> Result<StepResponse, ApiError> {
    submit_step(store, session_id, WizardStep::LspDetails, |_, _| {
        let details = validate_lsp_details(request, today)?;
        Ok(StepSubmission::LspDetails {
            constitutional_status: details.constitutional_status,
            company_house_number: details.company_house_number,
            indemnity_received_date: details.indemnity_received_date,
        })
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` listing every failing field.
pub fn submit_contact_details<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &ContactDetailsRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(store, session_id, WizardStep::ContactDetails, |_, _| {
        Ok(StepSubmission::ContactDetails(validate_contact_details(
            request,
        )?))
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` for a malformed number.
pub fn submit_vat_number<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &VatNumberRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(store, session_id, WizardStep::VatNumber, |_, _| {
        Ok(StepSubmission::VatNumber(validate_vat_number(
            &request.vat_registration_number,
        )?))
    })
}

/// Records the head office bank account, or that there is none.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` listing every failing field.
pub fn submit_bank_account<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &BankAccountRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(store, session_id, WizardStep::BankAccount, |_, _| {
        if request.skip {
            return Ok(StepSubmission::SkipBankAccount);
        }
        Ok(StepSubmission::BankAccount(validate_bank_account(request)?))
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` listing every failing field.
pub fn submit_liaison_manager<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &LiaisonManagerRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(store, session_id, WizardStep::LiaisonManager, |_, _| {
        Ok(StepSubmission::LiaisonManager(validate_liaison_manager(
            request,
        )?))
    })
}

/// Resolves a selected contract manager against the directory.
fn directory_choice<S: SessionStore + ?Sized>(
    store: &mut S,
    value: &str,
) -> Result<String, ApiError> {
    let value: &str = value.trim();
    let select = || ApiError::invalid_field("contract_manager", SELECT_CONTRACT_MANAGER_MESSAGE);
    if value.is_empty() {
        return Err(select());
    }
    ContractManagerDirectory::new(store)
        .list()
        .map_err(translate_core_error)?
        .into_iter()
        .find(|name| name.eq_ignore_ascii_case(value))
        .ok_or_else(select)
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` if no directory entry was selected.
pub fn submit_contract_manager<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &ContractManagerRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(
        store,
        session_id,
        WizardStep::AssignContractManager,
        |store, _| {
            if request.skip {
                return Ok(StepSubmission::SkipContractManager);
            }
            Ok(StepSubmission::ContractManager(directory_choice(
                store,
                &request.contract_manager,
            )?))
        },
    )
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable,
/// `ApiError::ValidationFailed` if no Chambers was selected, and
/// `ApiError::ResourceNotFound` if the selected firm does not exist.
pub fn submit_chambers<C, S>(
    client: &C,
    store: &mut S,
    session_id: &str,
    request: &ChambersRequest,
) -> Result<StepResponse, ApiError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    submit_step(store, session_id, WizardStep::AssignChambers, |_, _| {
        let parent_firm_id: i64 = request
            .parent_firm_id
            .ok_or_else(|| ApiError::invalid_field("parent_firm_id", "Select a chambers"))?;
        let chambers: Firm = require_chambers(client, parent_firm_id).map_err(translate_core_error)?;
        Ok(StepSubmission::Chambers {
            parent_firm_id: chambers.firm_id,
        })
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` listing every failing field.
pub fn submit_child_details<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &ChildDetailsRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(store, session_id, WizardStep::ChildDetails, |_, state| {
        let firm_type: FirmType = state.firm_type().ok_or_else(|| ApiError::PreconditionFailed {
            message: String::from("No provider type has been chosen"),
        })?;
        Ok(StepSubmission::ChildDetails(validate_child_details(
            request, firm_type,
        )?))
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the step is not reachable and
/// `ApiError::ValidationFailed` if nothing was selected.
pub fn submit_liaison_manager_check<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    request: &LiaisonManagerCheckRequest,
) -> Result<StepResponse, ApiError> {
    submit_step(
        store,
        session_id,
        WizardStep::LiaisonManagerCheck,
        |_, _| {
            let use_chambers_liaison_manager: bool = answer(
                "use_chambers_liaison_manager",
                &request.use_chambers_liaison_manager,
                "Select yes if the liaison manager of the chambers should be used",
            )?;
            Ok(StepSubmission::LiaisonManagerCheck {
                use_chambers_liaison_manager,
            })
        },
    )
}

/// Creates the provider from the answers in the session.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if answers are missing and
/// `ApiError::UpstreamFailure` if the firm itself could not be created.
/// Failures after the firm exists are reported as flash messages instead.
pub fn commit_provider<C, S>(
    client: &mut C,
    store: &mut S,
    session_id: &str,
    today: Date,
) -> Result<CommitResponse, ApiError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let outcome = mapd::commit_new_provider(client, store, session_id, today)
        .map_err(translate_core_error)?;
    let redirect: String = provider_path(outcome.firm.firm_id);
    Ok(CommitResponse {
        firm: outcome.firm,
        head_office: outcome.head_office,
        bank_account: outcome.bank_account,
        liaison_manager: outcome.liaison_manager,
        flashes: outcome.flashes,
        redirect,
    })
}

// ============================================================================
// Providers
// ============================================================================

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if the search term is too long.
pub fn search_providers<C: ProviderDataClient + ?Sized>(
    client: &C,
    query: &SearchQuery,
) -> Result<Page<Firm>, ApiError> {
    let term: String = validate_search(&query.search)?;
    mapd::search_providers(client, &term, query.page.unwrap_or(1)).map_err(translate_core_error)
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if the search term is too long.
pub fn search_chambers<C: ProviderDataClient + ?Sized>(
    client: &C,
    query: &SearchQuery,
) -> Result<Page<Firm>, ApiError> {
    let term: String = validate_search(&query.search)?;
    mapd::search_chambers(client, &term, query.page.unwrap_or(1)).map_err(translate_core_error)
}

/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the firm does not exist.
pub fn get_provider<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
) -> Result<ProviderView, ApiError> {
    let firm: Firm = find_firm(client, firm_id)?;
    let parent: Option<Firm> = match firm.parent_firm_id {
        Some(parent_id) => client.get_provider_firm(parent_id).map_err(provider_error)?,
        None => None,
    };
    let offices: Vec<Office> = client.get_provider_offices(firm_id).map_err(provider_error)?;
    Ok(ProviderView {
        firm,
        parent,
        offices,
    })
}

/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the firm or the office does not exist.
pub fn get_office<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
    office_code: &str,
) -> Result<OfficeView, ApiError> {
    let firm: Firm = find_firm(client, firm_id)?;
    let office: Office = find_firm_office(client, firm_id, office_code)?;
    let contacts = client
        .get_office_contacts(firm_id, office_code)
        .map_err(provider_error)?;
    let bank_accounts = client
        .get_office_bank_accounts(firm_id, office_code)
        .map_err(provider_error)?;
    Ok(OfficeView {
        firm,
        office,
        contacts,
        bank_accounts,
    })
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a blank or unchanged name.
pub fn change_firm_name<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &ProviderRequest,
) -> Result<FirmResponse, ApiError> {
    let name: String = firm_name(&request.firm_name).map_err(translate_domain_error)?;
    let firm: Firm =
        mapd::change_firm_name(client, firm_id, &name).map_err(translate_core_error)?;
    Ok(FirmResponse {
        firm,
        flashes: vec![Flash::success("Provider name changed")],
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the firm is not a Legal
/// Services Provider and `ApiError::ValidationFailed` for bad input.
pub fn change_lsp_details<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &LspDetailsRequest,
    today: Date,
) -> Result<FirmResponse, ApiError> {
    let details = validate_lsp_details(request, today)?;
    let firm: Firm =
        mapd::change_lsp_details(client, firm_id, details).map_err(translate_core_error)?;
    Ok(FirmResponse {
        firm,
        flashes: vec![Flash::success("Provider details changed")],
    })
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the firm is not a Barrister or
/// Advocate and `ApiError::ValidationFailed` for bad input.
pub fn change_advocate_details<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &ChildDetailsRequest,
) -> Result<FirmResponse, ApiError> {
    let firm_type: FirmType = find_firm(client, firm_id)?.firm_type;
    let details = validate_child_details(request, firm_type)?;
    let firm: Firm =
        mapd::change_advocate_details(client, firm_id, details).map_err(translate_core_error)?;
    Ok(FirmResponse {
        firm,
        flashes: vec![Flash::success(format!("{firm_type} details changed"))],
    })
}

/// Moves a Barrister or Advocate to another Chambers.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` if no Chambers was selected or the
/// selection is not a Chambers.
pub fn assign_chambers<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &ChambersRequest,
) -> Result<FirmResponse, ApiError> {
    let chambers_id: i64 = request
        .parent_firm_id
        .ok_or_else(|| ApiError::invalid_field("parent_firm_id", "Select a chambers"))?;
    let firm: Firm =
        mapd::assign_chambers(client, firm_id, chambers_id).map_err(translate_core_error)?;
    Ok(FirmResponse {
        firm,
        flashes: vec![Flash::success("Chambers changed")],
    })
}

// ============================================================================
// Status flows
// ============================================================================

fn active_status(request: &ActiveStatusRequest) -> Result<bool, ApiError> {
    match request.status.trim().to_ascii_lowercase().as_str() {
        "active" => Ok(true),
        "inactive" => Ok(false),
        _ => Err(ApiError::invalid_field("status", "Select active or inactive")),
    }
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a missing or unchanged status.
pub fn set_firm_active<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &ActiveStatusRequest,
    today: Date,
) -> Result<StatusResponse<Firm>, ApiError> {
    let active: bool = active_status(request)?;
    let outcome = mapd::set_firm_active(client, firm_id, active, today)
        .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a missing or unchanged status.
pub fn set_office_active<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &ActiveStatusRequest,
    today: Date,
) -> Result<StatusResponse<Office>, ApiError> {
    let active: bool = active_status(request)?;
    let outcome = mapd::set_office_active(client, firm_id, office_code, active, today)
        .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

const HOLD_PAYMENTS_MESSAGE: &str = "Select yes if payments should be held";

/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a missing answer or reason, or
/// an unchanged value.
pub fn set_firm_hold_payments<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &HoldPaymentsRequest,
) -> Result<StatusResponse<Firm>, ApiError> {
    let hold: bool = answer("hold_all_payments", &request.answer, HOLD_PAYMENTS_MESSAGE)?;
    let outcome = mapd::set_firm_hold_payments(
        client,
        firm_id,
        hold,
        optional_reason(&request.hold_reason),
    )
    .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

/// Holding payments on a head office offers to hold its branches too.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a missing answer or reason, or
/// an unchanged value.
pub fn set_office_hold_payments<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &HoldPaymentsRequest,
) -> Result<StatusResponse<Office>, ApiError> {
    let hold: bool = answer("hold_all_payments", &request.answer, HOLD_PAYMENTS_MESSAGE)?;
    let outcome = mapd::set_office_hold_payments(
        client,
        firm_id,
        office_code,
        hold,
        optional_reason(&request.hold_reason),
    )
    .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

fn intervention(request: &InterventionRequest, today: Date) -> Result<(bool, Option<Date>), ApiError> {
    let intervened: bool = answer(
        "intervened",
        &request.answer,
        "Select yes if the office has been intervened",
    )?;
    let date: Option<Date> = if intervened {
        optional_past_date("intervened_date", &request.intervened_date, false, today)
            .map_err(translate_domain_error)?
    } else {
        None
    };
    Ok((intervened, date))
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a missing answer or date, or an
/// unchanged value.
pub fn set_office_intervened<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &InterventionRequest,
    today: Date,
) -> Result<StatusResponse<Office>, ApiError> {
    let (intervened, date) = intervention(request, today)?;
    let outcome =
        mapd::set_office_intervened(client, firm_id, office_code, intervened, date, today)
            .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

/// Sets the intervened status of a Barrister or Advocate.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` for other firm types.
pub fn set_firm_intervened<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &InterventionRequest,
    today: Date,
) -> Result<StatusResponse<Office>, ApiError> {
    let (intervened, date) = intervention(request, today)?;
    let outcome = mapd::set_firm_intervened(client, firm_id, intervened, date, today)
        .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

const FALSE_BALANCE_MESSAGE: &str = "Select yes if the office has a false balance";
const DEBT_RECOVERY_MESSAGE: &str =
    "Select yes if the provider has been referred to the Debt Recovery Unit";

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the office is active or the
/// firm is not a Barrister or Advocate.
pub fn set_office_false_balance<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &YesNoRequest,
) -> Result<StatusResponse<Office>, ApiError> {
    let false_balance: bool = answer("false_balance", &request.answer, FALSE_BALANCE_MESSAGE)?;
    let outcome = mapd::set_office_false_balance(client, firm_id, office_code, false_balance)
        .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the head office is active or
/// the firm is not a Barrister or Advocate.
pub fn set_firm_false_balance<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &YesNoRequest,
) -> Result<StatusResponse<Office>, ApiError> {
    let false_balance: bool = answer("false_balance", &request.answer, FALSE_BALANCE_MESSAGE)?;
    let outcome = mapd::set_firm_false_balance(client, firm_id, false_balance)
        .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

/// Taking an office out of debt recovery leads on to assigning a contract
/// manager.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the office is inactive.
pub fn set_office_debt_recovery<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &YesNoRequest,
) -> Result<StatusResponse<Office>, ApiError> {
    let referred: bool = answer("debt_recovery", &request.answer, DEBT_RECOVERY_MESSAGE)?;
    let outcome = mapd::set_office_debt_recovery(client, firm_id, office_code, referred)
        .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the head office is inactive or
/// the firm is not a Barrister or Advocate.
pub fn set_firm_debt_recovery<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &YesNoRequest,
) -> Result<StatusResponse<Office>, ApiError> {
    let referred: bool = answer("debt_recovery", &request.answer, DEBT_RECOVERY_MESSAGE)?;
    let outcome = mapd::set_firm_debt_recovery(client, firm_id, referred)
        .map_err(translate_core_error)?;
    Ok(status_response(firm_id, outcome))
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if no reason was given.
pub fn apply_hold_to_offices<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &OfficeSelectionRequest,
) -> Result<BulkResponse, ApiError> {
    let outcome = mapd::apply_hold_to_offices(
        client,
        firm_id,
        &request.office_codes,
        optional_reason(&request.hold_reason),
    )
    .map_err(translate_core_error)?;
    Ok(BulkResponse {
        updated: outcome.updated,
        flashes: outcome.flashes,
    })
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a missing or future date.
pub fn apply_intervention_to_offices<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &OfficeSelectionRequest,
    today: Date,
) -> Result<BulkResponse, ApiError> {
    let date: Date = required_past_date("intervened_date", &request.intervened_date, today)
        .map_err(translate_domain_error)?;
    let outcome = mapd::apply_intervention_to_offices(client, firm_id, &request.office_codes, date)
        .map_err(translate_core_error)?;
    Ok(BulkResponse {
        updated: outcome.updated,
        flashes: outcome.flashes,
    })
}

/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the firm does not exist.
pub fn remove_intervention_from_offices<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &OfficeSelectionRequest,
) -> Result<BulkResponse, ApiError> {
    let outcome = mapd::remove_intervention_from_offices(client, firm_id, &request.office_codes)
        .map_err(translate_core_error)?;
    Ok(BulkResponse {
        updated: outcome.updated,
        flashes: outcome.flashes,
    })
}

// ============================================================================
// Liaison manager and head office
// ============================================================================

/// Replaces the liaison manager of one office, or of every office when
/// `office_code` is `None`.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn change_liaison_manager<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: Option<&str>,
    request: &LiaisonManagerRequest,
    today: Date,
) -> Result<LiaisonManagerResponse, ApiError> {
    let details = validate_liaison_manager(request)?;
    let outcome = mapd::change_liaison_manager(client, firm_id, office_code, &details, today)
        .map_err(translate_core_error)?;
    let mut flashes: Vec<Flash> = outcome.flashes;
    if !outcome.updated_offices.is_empty() {
        flashes.insert(0, Flash::success("Liaison manager changed"));
    }
    Ok(LiaisonManagerResponse {
        liaison_manager: outcome.representative,
        updated_offices: outcome.updated_offices,
        flashes,
    })
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if no office was selected or it
/// already is the head office.
pub fn reassign_head_office<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    request: &HeadOfficeRequest,
) -> Result<HeadOfficeResponse, ApiError> {
    let office_code: &str = request.office_code.trim();
    if office_code.is_empty() {
        return Err(ApiError::invalid_field("office_code", "Select an office"));
    }
    let outcome =
        mapd::reassign_head_office(client, firm_id, office_code).map_err(translate_core_error)?;
    Ok(HeadOfficeResponse {
        head_office: outcome.head_office,
        flashes: outcome.flashes,
    })
}

// ============================================================================
// Contract managers
// ============================================================================

/// Assigns a contract manager from the directory to an office.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the current value belongs to a
/// status flow, and `ApiError::ValidationFailed` if no directory entry was
/// selected.
pub fn assign_office_contract_manager<C, S>(
    client: &mut C,
    store: &mut S,
    firm_id: i64,
    office_code: &str,
    request: &ContractManagerRequest,
) -> Result<OfficeResponse, ApiError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let office: Office = find_firm_office(client, firm_id, office_code)?;
    if let ContractManagerRoute::StatusFlow(flow) = contract_manager_route(&office) {
        return Err(translate_core_error(CoreError::OwnedByStatusFlow {
            flow,
            office_code: office_code.to_string(),
        }));
    }
    let name: String = directory_choice(store, &request.contract_manager)?;
    let office: Office = mapd::assign_contract_manager(client, firm_id, office_code, &name)
        .map_err(translate_core_error)?;
    Ok(OfficeResponse {
        office,
        flashes: vec![Flash::success(format!("Contract manager changed to {name}"))],
    })
}

fn directory_page<S: SessionStore + ?Sized>(
    store: &mut S,
    query: &SearchQuery,
) -> Result<Page<String>, ApiError> {
    let term: String = validate_search(&query.search)?;
    let page: usize = query.page.unwrap_or(1);
    let mut directory = ContractManagerDirectory::new(store);
    let names: Vec<String> = directory.search(&term).map_err(translate_core_error)?;
    Ok(paginate(names, page, DIRECTORY_PER_PAGE))
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if the search term is too long.
pub fn list_contract_managers<S: SessionStore + ?Sized>(
    store: &mut S,
    query: &SearchQuery,
) -> Result<ContractManagerDirectoryResponse, ApiError> {
    Ok(ContractManagerDirectoryResponse {
        contract_managers: directory_page(store, query)?,
        flashes: Vec::new(),
    })
}

/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is an admin, and
/// `ApiError::ValidationFailed` for a blank, reserved or duplicate name.
pub fn add_contract_manager<S: SessionStore + ?Sized>(
    actor: &AuthenticatedActor,
    store: &mut S,
    request: &ContractManagerNameRequest,
) -> Result<ContractManagerDirectoryResponse, ApiError> {
    AuthorizationService::authorize_manage_contract_managers(actor)?;
    let name: String = ContractManagerDirectory::new(store)
        .add(&request.name)
        .map_err(translate_core_error)?;
    Ok(ContractManagerDirectoryResponse {
        contract_managers: directory_page(store, &SearchQuery::default())?,
        flashes: vec![Flash::success(format!("{name} added"))],
    })
}

/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is an admin, and
/// `ApiError::ValidationFailed` if nothing was selected.
pub fn remove_contract_managers<S: SessionStore + ?Sized>(
    actor: &AuthenticatedActor,
    store: &mut S,
    request: &ContractManagerRemovalRequest,
) -> Result<ContractManagerDirectoryResponse, ApiError> {
    AuthorizationService::authorize_manage_contract_managers(actor)?;
    if request.names.is_empty() {
        return Err(ApiError::invalid_field(
            "names",
            "Select at least one contract manager to remove",
        ));
    }
    let removal = ContractManagerDirectory::new(store)
        .remove_many(&request.names)
        .map_err(translate_core_error)?;
    Ok(ContractManagerDirectoryResponse {
        contract_managers: directory_page(store, &SearchQuery::default())?,
        flashes: removal.flashes,
    })
}

// ============================================================================
// Offices
// ============================================================================

#[must_use]
pub fn new_office_contact_path(firm_id: i64) -> String {
    format!("{}/new-office/contact-details", provider_path(firm_id))
}

/// First page of the add-office flow.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field and
/// `ApiError::PreconditionFailed` if a Chambers asks for a second head office.
pub fn start_new_office<C, S>(
    client: &C,
    store: &mut S,
    session_id: &str,
    firm_id: i64,
    request: &NewOfficeRequest,
) -> Result<RedirectResponse, ApiError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    find_firm(client, firm_id)?;
    let mut errors: FormErrors = FormErrors::new();
    let office_name: Option<String> = errors.check(required_text(
        "office_name",
        &request.office_name,
        320,
        "Enter the office name",
        "Office name must be 320 characters or less",
    ));
    let is_head_office: Option<bool> = errors.check(yes_no(
        "is_head_office",
        &request.is_head_office,
        "Select yes if this is the new head office",
    ));
    let (office_name, is_head_office) = errors.finish(office_name.zip(is_head_office))?;

    let fragment: NewOfficeFragment = NewOfficeFragment {
        firm_id,
        office_name,
        is_head_office,
    };
    mapd::start_new_office(client, store, session_id, &fragment).map_err(translate_core_error)?;
    Ok(RedirectResponse {
        redirect: new_office_contact_path(firm_id),
    })
}

/// Shows the second page of the add-office flow.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the first page was not completed
/// for this firm.
pub fn get_new_office<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    firm_id: i64,
) -> Result<NewOfficeFragment, ApiError> {
    load_new_office(store, session_id, firm_id).map_err(translate_core_error)
}

/// Creates the office from both pages of the add-office flow.
///
/// # Errors
///
/// Returns `ApiError::PreconditionFailed` if the first page was not completed,
/// `ApiError::ValidationFailed` listing every failing field, and
/// `ApiError::UpstreamFailure` if the office could not be created.
pub fn commit_new_office<C, S>(
    client: &mut C,
    store: &mut S,
    session_id: &str,
    firm_id: i64,
    request: &ContactDetailsRequest,
    today: Date,
) -> Result<OfficeResponse, ApiError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    load_new_office(store, session_id, firm_id).map_err(translate_core_error)?;
    let contact = validate_contact_details(request)?;
    let outcome = mapd::commit_new_office(client, store, session_id, firm_id, contact, today)
        .map_err(translate_core_error)?;
    info!(
        firm_id,
        office_code = %outcome.office.firm_office_code,
        "Office added"
    );
    Ok(OfficeResponse {
        office: outcome.office,
        flashes: outcome.flashes,
    })
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a missing or unchanged method.
pub fn change_payment_method<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &PaymentMethodRequest,
) -> Result<OfficeResponse, ApiError> {
    let method = validate_payment_method(&request.payment_method)?;
    let office: Office = mapd::change_payment_method(client, firm_id, office_code, method)
        .map_err(translate_core_error)?;
    Ok(OfficeResponse {
        office,
        flashes: vec![Flash::success(format!(
            "Payment method changed to {}",
            method.as_str()
        ))],
    })
}

/// A blank number removes the VAT registration.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a malformed number.
pub fn change_office_vat<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &VatNumberRequest,
) -> Result<OfficeResponse, ApiError> {
    let vat: Option<String> = validate_vat_number(&request.vat_registration_number)?;
    let office: Office = mapd::change_office_vat(client, firm_id, office_code, vat)
        .map_err(translate_core_error)?;
    Ok(OfficeResponse {
        office,
        flashes: vec![Flash::success("VAT registration number changed")],
    })
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field and
/// `ApiError::UpstreamFailure` if the account could not be created.
pub fn add_bank_account<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &BankAccountRequest,
    today: Date,
) -> Result<BankAccountResponse, ApiError> {
    let details = validate_bank_account(request)?;
    let bank_account: BankAccount =
        mapd::add_bank_account(client, firm_id, office_code, &details, today)
            .map_err(translate_core_error)?;
    Ok(BankAccountResponse {
        bank_account,
        flashes: vec![Flash::success("Bank account added")],
    })
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if the search term is too long.
pub fn search_bank_accounts<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
    query: &SearchQuery,
) -> Result<Page<BankAccount>, ApiError> {
    find_firm(client, firm_id)?;
    let term: String = validate_search(&query.search)?;
    mapd::search_firm_bank_accounts(client, firm_id, &term, query.page.unwrap_or(1))
        .map_err(translate_core_error)
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if no account was selected or it
/// already is the office's primary account.
pub fn assign_bank_account<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    request: &AssignBankAccountRequest,
) -> Result<BankAccountResponse, ApiError> {
    let bank_account_id: i64 = request
        .bank_account_id
        .ok_or_else(|| ApiError::invalid_field("bank_account_id", "Select a bank account"))?;
    let bank_account: BankAccount =
        mapd::assign_bank_account(client, firm_id, office_code, bank_account_id)
            .map_err(translate_core_error)?;
    Ok(BankAccountResponse {
        bank_account,
        flashes: vec![Flash::success("Bank account assigned")],
    })
}
