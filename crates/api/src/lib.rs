// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Manage a Provider's Data.
//!
//! This crate owns authentication, form validation and the translation of
//! core errors into API errors. It is transport-agnostic: the server crate
//! maps requests onto the handler functions and [`ApiError`] onto status
//! codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod request_response;
mod validation;

#[cfg(test)]
mod tests;

pub use auth::{
    AUTHENTICATED_KEY, AuthConfig, AuthenticatedActor, AuthenticationService,
    AuthorizationService, ISSUED_KEY, ROLE_KEY, Role,
};
pub use error::{ApiError, AuthError, FieldError, translate_core_error, translate_domain_error};
pub use handlers::{
    WIZARD_PATH, add_bank_account, add_contract_manager, apply_hold_to_offices,
    apply_intervention_to_offices, assign_bank_account, assign_chambers,
    assign_office_contract_manager, change_advocate_details, change_firm_name,
    change_liaison_manager, change_lsp_details, change_office_vat, change_payment_method,
    commit_new_office, commit_provider, get_new_office, get_office, get_provider,
    get_wizard_step, list_contract_managers, login, logout, new_office_contact_path, office_path,
    provider_path, reassign_head_office, remove_contract_managers,
    remove_intervention_from_offices, search_bank_accounts, search_chambers, search_providers,
    set_firm_active, set_firm_debt_recovery, set_firm_false_balance, set_firm_hold_payments,
    set_firm_intervened, set_office_active, set_office_debt_recovery, set_office_false_balance,
    set_office_hold_payments, set_office_intervened, start_new_office, step_path,
    submit_bank_account, submit_chambers, submit_child_details, submit_contact_details,
    submit_contract_manager, submit_liaison_manager, submit_liaison_manager_check,
    submit_lsp_details, submit_provider, submit_vat_number,
};
pub use request_response::{
    ActiveStatusRequest, AssignBankAccountRequest, BankAccountRequest, BankAccountResponse,
    BulkResponse, ChambersRequest, ChildDetailsRequest, CommitResponse, ContactDetailsRequest,
    ContractManagerDirectoryResponse, ContractManagerNameRequest, ContractManagerRemovalRequest,
    ContractManagerRequest, DateInput, FirmResponse, HeadOfficeRequest, HeadOfficeResponse,
    HoldPaymentsRequest, InterventionRequest, LiaisonManagerCheckRequest, LiaisonManagerRequest,
    LiaisonManagerResponse, LoginRequest, LoginResponse, LspDetailsRequest, NewOfficeRequest,
    OfficeResponse, OfficeSelectionRequest, OfficeView, PaymentMethodRequest, ProviderRequest,
    ProviderView, RedirectResponse, SearchQuery, StatusResponse, StepResponse, VatNumberRequest,
    WizardStepView, YesNoRequest,
};
pub use validation::SEARCH_MAX_LENGTH;
