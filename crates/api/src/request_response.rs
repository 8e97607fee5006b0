// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests mirror the forms of the service: every field arrives as the raw
//! text the user typed and missing fields default to empty. Validation into
//! typed values happens in the handlers.

use mapd::{Flash, FollowUp, Page};
use mapd_domain::{BankAccount, Contact, Firm, Office};
use serde::{Deserialize, Serialize};

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub role: String,
    /// The session the login was recorded under. Sent back as a cookie.
    #[serde(skip)]
    pub session_id: String,
}

/// First wizard step, also used to rename a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderRequest {
    pub firm_name: String,
    pub firm_type: String,
}

/// A date entered as separate day, month and year inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateInput {
    pub day: String,
    pub month: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LspDetailsRequest {
    pub constitutional_status: String,
    pub company_house_number: String,
    pub indemnity_received_date: DateInput,
}

/// Address and contact fields of an office.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactDetailsRequest {
    pub address_line_1: String,
    pub address_line_2: String,
    pub address_line_3: String,
    pub address_line_4: String,
    pub city: String,
    pub county: String,
    pub postcode: String,
    pub telephone_number: String,
    pub email_address: String,
    pub dx_number: String,
    pub dx_centre: String,
}

/// A blank value means no VAT registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VatNumberRequest {
    pub vat_registration_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BankAccountRequest {
    pub bank_account_name: String,
    pub sort_code: String,
    pub account_number: String,
    /// Skips the wizard step; payments will be made by cheque.
    pub skip: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LiaisonManagerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub telephone_number: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContractManagerRequest {
    pub contract_manager: String,
    /// Skips the wizard step; the default contract manager is used.
    pub skip: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChambersRequest {
    pub parent_firm_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChildDetailsRequest {
    pub advocate_level: String,
    pub bar_council_roll: String,
    pub solicitor_advocate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LiaisonManagerCheckRequest {
    pub use_chambers_liaison_manager: String,
}

/// Active or inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActiveStatusRequest {
    pub status: String,
}

/// A yes/no status question such as false balance or debt recovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct YesNoRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HoldPaymentsRequest {
    pub answer: String,
    pub hold_reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterventionRequest {
    pub answer: String,
    pub intervened_date: DateInput,
}

/// Offices picked on a follow-up page after a head office change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OfficeSelectionRequest {
    pub office_codes: Vec<String>,
    pub hold_reason: String,
    pub intervened_date: DateInput,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeadOfficeRequest {
    pub office_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewOfficeRequest {
    pub office_name: String,
    pub is_head_office: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentMethodRequest {
    pub payment_method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssignBankAccountRequest {
    pub bank_account_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContractManagerNameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContractManagerRemovalRequest {
    pub names: Vec<String>,
}

/// Query string of the search pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search: String,
    pub page: Option<usize>,
}

/// Where the browser goes after a wizard step was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResponse {
    /// Slug of the next step.
    pub next_step: String,
    /// Path of the next step.
    pub redirect: String,
}

/// What a wizard step page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardStepView {
    pub step: String,
    pub firm_name: Option<String>,
    pub firm_type: Option<String>,
    /// Chambers offered on the assign-chambers step.
    pub chambers: Option<Page<Firm>>,
    /// Names offered on the assign-contract-manager step.
    pub contract_managers: Option<Page<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitResponse {
    pub firm: Firm,
    pub head_office: Option<Office>,
    pub bank_account: Option<BankAccount>,
    pub liaison_manager: Option<Contact>,
    pub flashes: Vec<Flash>,
    pub redirect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderView {
    pub firm: Firm,
    pub parent: Option<Firm>,
    pub offices: Vec<Office>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeView {
    pub firm: Firm,
    pub office: Office,
    pub contacts: Vec<Contact>,
    pub bank_accounts: Vec<BankAccount>,
}

/// Outcome of a status change on a firm or office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse<T> {
    pub updated: T,
    pub flashes: Vec<Flash>,
    pub follow_up: Option<FollowUp>,
    /// Path of the follow-up page, if one is offered.
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkResponse {
    pub updated: Vec<String>,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiaisonManagerResponse {
    pub liaison_manager: Option<Contact>,
    pub updated_offices: Vec<String>,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadOfficeResponse {
    pub head_office: Option<Office>,
    pub flashes: Vec<Flash>,
}

/// An office update, or the status flow that owns the field instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeResponse {
    pub office: Office,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirmResponse {
    pub firm: Firm,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankAccountResponse {
    pub bank_account: BankAccount,
    pub flashes: Vec<Flash>,
}

/// Where to go next when a form only stores answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectResponse {
    pub redirect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractManagerDirectoryResponse {
    pub contract_managers: Page<String>,
    pub flashes: Vec<Flash>,
}
