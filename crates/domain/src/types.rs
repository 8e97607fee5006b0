// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed provider entities.
//!
//! The Provider Data API stores several statuses as magic strings. Here
//! they are explicit enums; the string forms only appear through the
//! `from_wire` / `as_wire` pairs used at the serialization boundary.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Marker the Provider Data API writes into `head_office` for the head office itself.
pub const HEAD_OFFICE_SENTINEL: &str = "N/A";

/// Job title carried by liaison manager contacts.
pub const LIAISON_MANAGER_JOB_TITLE: &str = "Liaison manager";

/// Hold reason written when an office is made inactive.
pub const INACTIVE_HOLD_REASON: &str = "Office made inactive";

/// The kind of legal aid provider a firm is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirmType {
    Barrister,
    Advocate,
    Chambers,
    LegalServicesProvider,
}

impl FirmType {
    /// Returns the display and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Barrister => "Barrister",
            Self::Advocate => "Advocate",
            Self::Chambers => "Chambers",
            Self::LegalServicesProvider => "Legal Services Provider",
        }
    }

    /// Parses a firm type from either its wire name or its form value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownValue` for anything else.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "barrister" => Ok(Self::Barrister),
            "advocate" => Ok(Self::Advocate),
            "chambers" => Ok(Self::Chambers),
            "legal services provider" | "lsp" => Ok(Self::LegalServicesProvider),
            _ => Err(DomainError::UnknownValue {
                kind: "firm type",
                value: s.to_string(),
            }),
        }
    }

    /// Chambers and Legal Services Providers own their own head office.
    #[must_use]
    pub const fn is_parent_type(&self) -> bool {
        matches!(self, Self::Chambers | Self::LegalServicesProvider)
    }

    /// Barristers and Advocates sit under a Chambers.
    #[must_use]
    pub const fn is_child_type(&self) -> bool {
        matches!(self, Self::Barrister | Self::Advocate)
    }
}

impl std::fmt::Display for FirmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstitutionalStatus {
    GovernmentFundedOrganisation,
    SolePractitioner,
    Charity,
    Partnership,
    Llp,
    LimitedCompany,
}

impl ConstitutionalStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GovernmentFundedOrganisation => "Government funded organisation",
            Self::SolePractitioner => "Sole practitioner",
            Self::Charity => "Charity",
            Self::Partnership => "Partnership",
            Self::Llp => "LLP",
            Self::LimitedCompany => "Limited company",
        }
    }

    /// # Errors
    ///
    /// Returns `DomainError::UnknownValue` if the value is not a known status.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "government funded organisation" => Ok(Self::GovernmentFundedOrganisation),
            "sole practitioner" => Ok(Self::SolePractitioner),
            "charity" => Ok(Self::Charity),
            "partnership" => Ok(Self::Partnership),
            "llp" => Ok(Self::Llp),
            "limited company" => Ok(Self::LimitedCompany),
            _ => Err(DomainError::UnknownValue {
                kind: "constitutional status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvocateLevel {
    Pupil,
    Junior,
    KingsCounsel,
}

impl AdvocateLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pupil => "Pupil",
            Self::Junior => "Junior",
            Self::KingsCounsel => "KC",
        }
    }

    /// # Errors
    ///
    /// Returns `DomainError::UnknownValue` if the value is not a known level.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pupil" => Ok(Self::Pupil),
            "junior" => Ok(Self::Junior),
            "kc" | "king's counsel" => Ok(Self::KingsCounsel),
            _ => Err(DomainError::UnknownValue {
                kind: "advocate level",
                value: s.to_string(),
            }),
        }
    }
}

/// A Yes/No answer as entered on a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> bool {
        matches!(self, Self::Yes)
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }

    /// Accepts `Yes`/`No` as well as the `Y`/`N` flags the API uses.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownValue` for anything else.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Self::Yes),
            "no" | "n" | "false" => Ok(Self::No),
            _ => Err(DomainError::UnknownValue {
                kind: "yes/no answer",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Electronic,
    Cheque,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Electronic => "Electronic",
            Self::Cheque => "Cheque",
        }
    }

    /// # Errors
    ///
    /// Returns `DomainError::UnknownValue` if the value is not a payment method.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electronic" | "eft" => Ok(Self::Electronic),
            "cheque" => Ok(Self::Cheque),
            _ => Err(DomainError::UnknownValue {
                kind: "payment method",
                value: s.to_string(),
            }),
        }
    }
}

/// Where an office sits in its firm's head-office structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum HeadOfficeRef {
    /// This office is the head office.
    IsHeadOffice,
    /// This office is a branch of the office with the given code.
    Branch(String),
}

impl HeadOfficeRef {
    /// Maps the API's `headOffice` string.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        if value == HEAD_OFFICE_SENTINEL {
            Self::IsHeadOffice
        } else {
            Self::Branch(value.to_string())
        }
    }

    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::IsHeadOffice => HEAD_OFFICE_SENTINEL,
            Self::Branch(code) => code,
        }
    }

    #[must_use]
    pub const fn is_head_office(&self) -> bool {
        matches!(self, Self::IsHeadOffice)
    }
}

/// The contract manager recorded against an office.
///
/// `Inactive`, `FalseBalance` and `DebtRecovery` are status workarounds:
/// they encode a status in the contract manager field because the Provider
/// Data API has nowhere else to keep it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ContractManager {
    /// No contract manager assigned yet.
    Default,
    Inactive,
    FalseBalance,
    DebtRecovery,
    Named(String),
}

impl ContractManager {
    pub const DEFAULT_NAME: &'static str = "Mr ISD Default";
    pub const INACTIVE_NAME: &'static str = "Mr Inactive";
    pub const FALSE_BALANCE_NAME: &'static str = "Mr False Balance";
    pub const DEBT_RECOVERY_NAME: &'static str = "Mr Debt Recovery";

    /// Maps the API's `contractManager` string onto the closed set of sentinels.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            Self::DEFAULT_NAME => Self::Default,
            Self::INACTIVE_NAME => Self::Inactive,
            Self::FALSE_BALANCE_NAME => Self::FalseBalance,
            Self::DEBT_RECOVERY_NAME => Self::DebtRecovery,
            other => Self::Named(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Default => Self::DEFAULT_NAME,
            Self::Inactive => Self::INACTIVE_NAME,
            Self::FalseBalance => Self::FALSE_BALANCE_NAME,
            Self::DebtRecovery => Self::DEBT_RECOVERY_NAME,
            Self::Named(name) => name,
        }
    }

    /// Returns true for values that encode a status rather than a person.
    #[must_use]
    pub const fn is_status_workaround(&self) -> bool {
        matches!(self, Self::Inactive | Self::FalseBalance | Self::DebtRecovery)
    }

    /// Returns true if the generic assign-contract-manager flow may replace this value.
    #[must_use]
    pub const fn is_changeable(&self) -> bool {
        !self.is_status_workaround()
    }
}

/// A legal aid provider firm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firm {
    pub firm_id: i64,
    pub firm_number: String,
    pub firm_name: String,
    pub firm_type: FirmType,
    pub parent_firm_id: Option<i64>,
    pub constitutional_status: Option<ConstitutionalStatus>,
    pub company_house_number: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub indemnity_received_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub inactive_date: Option<Date>,
    pub hold_all_payments: bool,
    pub hold_reason: Option<String>,
    pub advocate_level: Option<AdvocateLevel>,
    pub bar_council_roll: Option<String>,
    pub solicitor_advocate: Option<YesNo>,
    pub website_url: Option<String>,
}

impl Firm {
    /// Creates an unsaved firm. The Provider Data API assigns `firm_id` and `firm_number`.
    #[must_use]
    pub fn new(firm_name: impl Into<String>, firm_type: FirmType) -> Self {
        Self {
            firm_id: 0,
            firm_number: String::new(),
            firm_name: firm_name.into(),
            firm_type,
            parent_firm_id: None,
            constitutional_status: None,
            company_house_number: None,
            indemnity_received_date: None,
            inactive_date: None,
            hold_all_payments: false,
            hold_reason: None,
            advocate_level: None,
            bar_council_roll: None,
            solicitor_advocate: None,
            website_url: None,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.inactive_date.is_none()
    }
}

/// Postal address shared by offices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub address_line_3: Option<String>,
    pub address_line_4: Option<String>,
    pub city: String,
    pub county: Option<String>,
    pub postcode: String,
}

/// An office of a firm. Payments, contracts and contacts hang off offices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub firm_office_id: i64,
    pub firm_office_code: String,
    pub office_name: Option<String>,
    pub address: Address,
    pub telephone_number: Option<String>,
    pub email_address: Option<String>,
    pub dx_number: Option<String>,
    pub dx_centre: Option<String>,
    pub head_office: HeadOfficeRef,
    pub contract_manager: Option<ContractManager>,
    #[serde(default, with = "iso_date::option")]
    pub inactive_date: Option<Date>,
    pub hold_all_payments: bool,
    pub hold_reason: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub intervened_date: Option<Date>,
    pub payment_method: Option<PaymentMethod>,
    pub vat_registration_number: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub creation_date: Option<Date>,
}

impl Office {
    /// Creates an unsaved office at `address`.
    #[must_use]
    pub const fn new(address: Address, head_office: HeadOfficeRef) -> Self {
        Self {
            firm_office_id: 0,
            firm_office_code: String::new(),
            office_name: None,
            address,
            telephone_number: None,
            email_address: None,
            dx_number: None,
            dx_centre: None,
            head_office,
            contract_manager: None,
            inactive_date: None,
            hold_all_payments: false,
            hold_reason: None,
            intervened_date: None,
            payment_method: None,
            vat_registration_number: None,
            creation_date: None,
        }
    }

    #[must_use]
    pub const fn is_head_office(&self) -> bool {
        self.head_office.is_head_office()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.inactive_date.is_none()
    }

    #[must_use]
    pub const fn is_intervened(&self) -> bool {
        self.intervened_date.is_some()
    }

    /// Builds an unsaved copy with the same address and contact fields.
    ///
    /// The copy gets no id or code of its own; those come from the API when
    /// it is created.
    #[must_use]
    pub fn replicate(&self) -> Self {
        let mut copy: Self = Self::new(self.address.clone(), HeadOfficeRef::IsHeadOffice);
        copy.office_name.clone_from(&self.office_name);
        copy.telephone_number.clone_from(&self.telephone_number);
        copy.email_address.clone_from(&self.email_address);
        copy.dx_number.clone_from(&self.dx_number);
        copy.dx_centre.clone_from(&self.dx_centre);
        copy.vat_registration_number
            .clone_from(&self.vat_registration_number);
        copy.payment_method = Some(PaymentMethod::Electronic);
        copy
    }
}

/// A person attached to an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: i64,
    pub vendor_site_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub telephone_number: Option<String>,
    pub website: Option<String>,
    pub job_title: Option<String>,
    pub primary: bool,
    #[serde(default, with = "iso_date::option")]
    pub creation_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub inactive_date: Option<Date>,
}

impl Contact {
    /// Returns true for the office's current primary liaison manager.
    #[must_use]
    pub fn is_active_liaison_manager(&self) -> bool {
        self.primary
            && self.inactive_date.is_none()
            && self.job_title.as_deref() == Some(LIAISON_MANAGER_JOB_TITLE)
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A bank account paying an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub bank_account_id: i64,
    pub vendor_site_id: i64,
    pub bank_account_name: String,
    pub sort_code: String,
    pub account_number: String,
    pub bank_name: Option<String>,
    pub primary: bool,
    #[serde(default, with = "iso_date::option")]
    pub start_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub end_date: Option<Date>,
}

impl BankAccount {
    #[must_use]
    pub const fn is_active_primary(&self) -> bool {
        self.primary && self.end_date.is_none()
    }
}
