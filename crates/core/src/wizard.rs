// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The add-provider wizard.
//!
//! Each step submits one form. Accepted submissions are merged into a typed
//! [`WizardState`] that is persisted between requests as named session
//! fragments. Which step comes next, and which fragments a step needs
//! before it may be shown, are pure functions of that state.
//!
//! Routing by firm type:
//!
//! - Chambers: provider, contact details, liaison manager, commit
//! - Legal Services Provider: provider, LSP details, contact details, VAT
//!   number, bank account, liaison manager, assign contract manager, commit
//! - Barrister or Advocate: provider, assign chambers, advocate details,
//!   liaison manager check, then liaison manager or straight to commit

use crate::error::CoreError;
use crate::liaison::LiaisonManagerDetails;
use crate::session::{SessionStore, load, save};
use mapd_domain::{
    Address, AdvocateLevel, ConstitutionalStatus, ContractManager, FirmType, PaymentMethod,
    YesNo, iso_date,
};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::debug;

pub const PROVIDER_KEY: &str = "new_provider";
pub const HEAD_OFFICE_KEY: &str = "new_head_office";
pub const BANK_ACCOUNT_KEY: &str = "new_head_office_bank_account";
pub const LIAISON_MANAGER_KEY: &str = "new_liaison_manager";
pub const BARRISTER_KEY: &str = "new_barrister";
pub const ADVOCATE_KEY: &str = "new_advocate";

/// Steps of the add-provider wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Provider,
    LspDetails,
    ContactDetails,
    VatNumber,
    BankAccount,
    LiaisonManager,
    AssignContractManager,
    AssignChambers,
    ChildDetails,
    LiaisonManagerCheck,
    Commit,
}

impl WizardStep {
    /// URL slug of the step.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::LspDetails => "lsp-details",
            Self::ContactDetails => "contact-details",
            Self::VatNumber => "vat-number",
            Self::BankAccount => "bank-account",
            Self::LiaisonManager => "liaison-manager",
            Self::AssignContractManager => "assign-contract-manager",
            Self::AssignChambers => "assign-chambers",
            Self::ChildDetails => "advocate-details",
            Self::LiaisonManagerCheck => "liaison-manager-check",
            Self::Commit => "create",
        }
    }

    /// Parses a URL slug.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown slug.
    pub fn parse_slug(slug: &str) -> Result<Self, CoreError> {
        match slug {
            "provider" => Ok(Self::Provider),
            "lsp-details" => Ok(Self::LspDetails),
            "contact-details" => Ok(Self::ContactDetails),
            "vat-number" => Ok(Self::VatNumber),
            "bank-account" => Ok(Self::BankAccount),
            "liaison-manager" => Ok(Self::LiaisonManager),
            "assign-contract-manager" => Ok(Self::AssignContractManager),
            "assign-chambers" => Ok(Self::AssignChambers),
            "advocate-details" => Ok(Self::ChildDetails),
            "liaison-manager-check" => Ok(Self::LiaisonManagerCheck),
            "create" => Ok(Self::Commit),
            _ => Err(CoreError::not_found("Wizard step", slug)),
        }
    }
}

/// Firm-level answers. Created by the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFragment {
    pub firm_name: String,
    pub firm_type: FirmType,
    pub constitutional_status: Option<ConstitutionalStatus>,
    pub company_house_number: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub indemnity_received_date: Option<Date>,
}

/// Address and contact fields of an office.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeContactDetails {
    pub address: Address,
    pub telephone_number: Option<String>,
    pub email_address: Option<String>,
    pub dx_number: Option<String>,
    pub dx_centre: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadOfficeFragment {
    pub contact: OfficeContactDetails,
    pub vat_registration_number: Option<String>,
    /// `Cheque` once the bank account step was skipped.
    pub payment_method: Option<PaymentMethod>,
    /// `Default` once the contract manager step was skipped.
    pub contract_manager: Option<ContractManager>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountFragment {
    pub bank_account_name: String,
    pub sort_code: String,
    pub account_number: String,
}

/// Barrister and Advocate answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildFragment {
    pub parent_firm_id: i64,
    pub advocate_level: Option<AdvocateLevel>,
    pub bar_council_roll: Option<String>,
    pub solicitor_advocate: Option<YesNo>,
    pub details_complete: bool,
    pub use_chambers_liaison_manager: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDetails {
    pub advocate_level: AdvocateLevel,
    pub bar_council_roll: Option<String>,
    pub solicitor_advocate: Option<YesNo>,
}

/// A validated form submission for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSubmission {
    Provider {
        firm_name: String,
        firm_type: FirmType,
    },
    LspDetails {
        constitutional_status: ConstitutionalStatus,
        company_house_number: Option<String>,
        indemnity_received_date: Option<Date>,
    },
    ContactDetails(OfficeContactDetails),
    VatNumber(Option<String>),
    BankAccount(BankAccountFragment),
    SkipBankAccount,
    LiaisonManager(LiaisonManagerDetails),
    ContractManager(String),
    SkipContractManager,
    Chambers {
        parent_firm_id: i64,
    },
    ChildDetails(ChildDetails),
    LiaisonManagerCheck {
        use_chambers_liaison_manager: bool,
    },
}

impl StepSubmission {
    /// The step this submission belongs to.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        match self {
            Self::Provider { .. } => WizardStep::Provider,
            Self::LspDetails { .. } => WizardStep::LspDetails,
            Self::ContactDetails(_) => WizardStep::ContactDetails,
            Self::VatNumber(_) => WizardStep::VatNumber,
            Self::BankAccount(_) | Self::SkipBankAccount => WizardStep::BankAccount,
            Self::LiaisonManager(_) => WizardStep::LiaisonManager,
            Self::ContractManager(_) | Self::SkipContractManager => {
                WizardStep::AssignContractManager
            }
            Self::Chambers { .. } => WizardStep::AssignChambers,
            Self::ChildDetails(_) => WizardStep::ChildDetails,
            Self::LiaisonManagerCheck { .. } => WizardStep::LiaisonManagerCheck,
        }
    }
}

/// Everything the wizard has collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub provider: Option<ProviderFragment>,
    pub head_office: Option<HeadOfficeFragment>,
    pub bank_account: Option<BankAccountFragment>,
    pub liaison_manager: Option<LiaisonManagerDetails>,
    pub child: Option<ChildFragment>,
}

/// Session key of the Barrister or Advocate fragment.
#[must_use]
pub const fn child_key(firm_type: FirmType) -> Option<&'static str> {
    match firm_type {
        FirmType::Barrister => Some(BARRISTER_KEY),
        FirmType::Advocate => Some(ADVOCATE_KEY),
        FirmType::Chambers | FirmType::LegalServicesProvider => None,
    }
}

impl WizardState {
    /// Loads every fragment of the session.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Session` if a stored fragment has the wrong shape.
    pub fn load<S: SessionStore + ?Sized>(store: &mut S, session_id: &str) -> Result<Self, CoreError> {
        let provider: Option<ProviderFragment> = load(store, session_id, PROVIDER_KEY)?;
        let child: Option<ChildFragment> =
            match provider.as_ref().and_then(|p| child_key(p.firm_type)) {
                Some(key) => load(store, session_id, key)?,
                None => None,
            };
        Ok(Self {
            provider,
            head_office: load(store, session_id, HEAD_OFFICE_KEY)?,
            bank_account: load(store, session_id, BANK_ACCOUNT_KEY)?,
            liaison_manager: load(store, session_id, LIAISON_MANAGER_KEY)?,
            child,
        })
    }

    /// Writes present fragments and deletes absent ones.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Session` if a fragment cannot be serialized.
    pub fn save<S: SessionStore + ?Sized>(&self, store: &mut S, session_id: &str) -> Result<(), CoreError> {
        fn put<T: Serialize, S: SessionStore + ?Sized>(
            store: &mut S,
            session_id: &str,
            key: &str,
            value: Option<&T>,
        ) -> Result<(), CoreError> {
            match value {
                Some(v) => save(store, session_id, key, v),
                None => {
                    store.delete(session_id, key);
                    Ok(())
                }
            }
        }

        put(store, session_id, PROVIDER_KEY, self.provider.as_ref())?;
        put(store, session_id, HEAD_OFFICE_KEY, self.head_office.as_ref())?;
        put(store, session_id, BANK_ACCOUNT_KEY, self.bank_account.as_ref())?;
        put(store, session_id, LIAISON_MANAGER_KEY, self.liaison_manager.as_ref())?;
        let active_child_key: Option<&str> = self.firm_type().and_then(child_key);
        for key in [BARRISTER_KEY, ADVOCATE_KEY] {
            if Some(key) == active_child_key {
                put(store, session_id, key, self.child.as_ref())?;
            } else {
                store.delete(session_id, key);
            }
        }
        Ok(())
    }

    /// Deletes every wizard fragment from the session.
    pub fn clear<S: SessionStore + ?Sized>(store: &mut S, session_id: &str) {
        for key in [
            PROVIDER_KEY,
            HEAD_OFFICE_KEY,
            BANK_ACCOUNT_KEY,
            LIAISON_MANAGER_KEY,
            BARRISTER_KEY,
            ADVOCATE_KEY,
        ] {
            store.delete(session_id, key);
        }
    }

    #[must_use]
    pub fn firm_type(&self) -> Option<FirmType> {
        self.provider.as_ref().map(|p| p.firm_type)
    }

    /// Applies a submission and returns the step to go to next.
    ///
    /// The state is left untouched if the step's guard fails. Submitting the
    /// first step starts a new wizard and discards earlier fragments.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingWizardState` if the step is not reachable
    /// from the current state.
    pub fn submit(&mut self, submission: StepSubmission) -> Result<WizardStep, CoreError> {
        let step: WizardStep = submission.step();
        check_guard(step, self)?;

        match submission {
            StepSubmission::Provider {
                firm_name,
                firm_type,
            } => {
                *self = Self {
                    provider: Some(ProviderFragment {
                        firm_name,
                        firm_type,
                        constitutional_status: None,
                        company_house_number: None,
                        indemnity_received_date: None,
                    }),
                    ..Self::default()
                };
            }
            StepSubmission::LspDetails {
                constitutional_status,
                company_house_number,
                indemnity_received_date,
            } => {
                if let Some(provider) = self.provider.as_mut() {
                    provider.constitutional_status = Some(constitutional_status);
                    provider.company_house_number = company_house_number;
                    provider.indemnity_received_date = indemnity_received_date;
                }
            }
            StepSubmission::ContactDetails(contact) => {
                self.head_office.get_or_insert_with(HeadOfficeFragment::default).contact = contact;
            }
            StepSubmission::VatNumber(vat) => {
                if let Some(head_office) = self.head_office.as_mut() {
                    head_office.vat_registration_number = vat;
                }
            }
            StepSubmission::BankAccount(account) => {
                self.bank_account = Some(account);
                if let Some(head_office) = self.head_office.as_mut() {
                    head_office.payment_method = Some(PaymentMethod::Electronic);
                }
            }
            StepSubmission::SkipBankAccount => {
                self.bank_account = None;
                if let Some(head_office) = self.head_office.as_mut() {
                    head_office.payment_method = Some(PaymentMethod::Cheque);
                }
            }
            StepSubmission::LiaisonManager(details) => {
                self.liaison_manager = Some(details);
            }
            StepSubmission::ContractManager(name) => {
                if let Some(head_office) = self.head_office.as_mut() {
                    head_office.contract_manager = Some(ContractManager::Named(name));
                }
            }
            StepSubmission::SkipContractManager => {
                if let Some(head_office) = self.head_office.as_mut() {
                    head_office.contract_manager = Some(ContractManager::Default);
                }
            }
            StepSubmission::Chambers { parent_firm_id } => match self.child.as_mut() {
                Some(child) => child.parent_firm_id = parent_firm_id,
                None => {
                    self.child = Some(ChildFragment {
                        parent_firm_id,
                        advocate_level: None,
                        bar_council_roll: None,
                        solicitor_advocate: None,
                        details_complete: false,
                        use_chambers_liaison_manager: None,
                    });
                }
            },
            StepSubmission::ChildDetails(details) => {
                if let Some(child) = self.child.as_mut() {
                    child.advocate_level = Some(details.advocate_level);
                    child.bar_council_roll = details.bar_council_roll;
                    child.solicitor_advocate = details.solicitor_advocate;
                    child.details_complete = true;
                }
            }
            StepSubmission::LiaisonManagerCheck {
                use_chambers_liaison_manager,
            } => {
                if let Some(child) = self.child.as_mut() {
                    child.use_chambers_liaison_manager = Some(use_chambers_liaison_manager);
                }
                if use_chambers_liaison_manager {
                    self.liaison_manager = None;
                }
            }
        }

        let next: WizardStep = next_step(step, self).ok_or(CoreError::MissingWizardState {
            step,
            missing: PROVIDER_KEY,
        })?;
        debug!(step = step.as_str(), next = next.as_str(), "Wizard step accepted");
        Ok(next)
    }
}

fn missing(step: WizardStep, what: &'static str) -> CoreError {
    CoreError::MissingWizardState {
        step,
        missing: what,
    }
}

/// Checks that `step` may be shown or submitted given `state`.
///
/// # Errors
///
/// Returns `CoreError::MissingWizardState` naming the first missing fragment.
pub fn check_guard(step: WizardStep, state: &WizardState) -> Result<(), CoreError> {
    if step == WizardStep::Provider {
        return Ok(());
    }
    let provider: &ProviderFragment = state
        .provider
        .as_ref()
        .ok_or_else(|| missing(step, PROVIDER_KEY))?;
    let firm_type: FirmType = provider.firm_type;
    let is_lsp: bool = firm_type == FirmType::LegalServicesProvider;

    let require_head_office = || {
        state
            .head_office
            .as_ref()
            .map(|_| ())
            .ok_or_else(|| missing(step, HEAD_OFFICE_KEY))
    };
    let require_child = || {
        state
            .child
            .as_ref()
            .ok_or_else(|| missing(step, child_key(firm_type).unwrap_or(BARRISTER_KEY)))
    };
    let require_child_details = || {
        require_child().and_then(|child| {
            if child.details_complete {
                Ok(child)
            } else {
                Err(missing(step, "advocate details"))
            }
        })
    };

    match step {
        WizardStep::Provider => Ok(()),
        WizardStep::LspDetails => {
            if is_lsp {
                Ok(())
            } else {
                Err(missing(step, "a Legal Services Provider"))
            }
        }
        WizardStep::ContactDetails => {
            if firm_type.is_parent_type() {
                Ok(())
            } else {
                Err(missing(step, "a Chambers or Legal Services Provider"))
            }
        }
        WizardStep::VatNumber | WizardStep::BankAccount => {
            if !is_lsp {
                return Err(missing(step, "a Legal Services Provider"));
            }
            require_head_office()
        }
        WizardStep::LiaisonManager => {
            if firm_type.is_parent_type() {
                require_head_office()
            } else {
                require_child_details().map(|_| ())
            }
        }
        WizardStep::AssignContractManager => {
            if !is_lsp {
                return Err(missing(step, "a Legal Services Provider"));
            }
            require_head_office()?;
            state
                .liaison_manager
                .as_ref()
                .map(|_| ())
                .ok_or_else(|| missing(step, LIAISON_MANAGER_KEY))
        }
        WizardStep::AssignChambers => {
            if firm_type.is_child_type() {
                Ok(())
            } else {
                Err(missing(step, "a Barrister or Advocate"))
            }
        }
        WizardStep::ChildDetails => {
            if !firm_type.is_child_type() {
                return Err(missing(step, "a Barrister or Advocate"));
            }
            require_child().map(|_| ())
        }
        WizardStep::LiaisonManagerCheck => {
            if !firm_type.is_child_type() {
                return Err(missing(step, "a Barrister or Advocate"));
            }
            require_child_details().map(|_| ())
        }
        WizardStep::Commit => {
            if firm_type.is_parent_type() {
                require_head_office()?;
                state
                    .liaison_manager
                    .as_ref()
                    .map(|_| ())
                    .ok_or_else(|| missing(step, LIAISON_MANAGER_KEY))
            } else {
                let child: &ChildFragment = require_child_details()?;
                match child.use_chambers_liaison_manager {
                    Some(true) => Ok(()),
                    Some(false) if state.liaison_manager.is_some() => Ok(()),
                    Some(false) => Err(missing(step, LIAISON_MANAGER_KEY)),
                    None => Err(missing(step, "a liaison manager decision")),
                }
            }
        }
    }
}

/// The step that follows `step` for the state's firm type.
///
/// Returns `None` once the wizard has reached commit, or if no firm type
/// has been chosen yet.
#[must_use]
pub fn next_step(step: WizardStep, state: &WizardState) -> Option<WizardStep> {
    let firm_type: FirmType = state.firm_type()?;
    let is_lsp: bool = firm_type == FirmType::LegalServicesProvider;

    let next: WizardStep = match step {
        WizardStep::Provider => match firm_type {
            FirmType::Chambers => WizardStep::ContactDetails,
            FirmType::LegalServicesProvider => WizardStep::LspDetails,
            FirmType::Barrister | FirmType::Advocate => WizardStep::AssignChambers,
        },
        WizardStep::LspDetails => WizardStep::ContactDetails,
        WizardStep::ContactDetails if is_lsp => WizardStep::VatNumber,
        WizardStep::ContactDetails => WizardStep::LiaisonManager,
        WizardStep::VatNumber => WizardStep::BankAccount,
        WizardStep::BankAccount => WizardStep::LiaisonManager,
        WizardStep::LiaisonManager if is_lsp => WizardStep::AssignContractManager,
        WizardStep::LiaisonManager | WizardStep::AssignContractManager => WizardStep::Commit,
        WizardStep::AssignChambers => WizardStep::ChildDetails,
        WizardStep::ChildDetails => WizardStep::LiaisonManagerCheck,
        WizardStep::LiaisonManagerCheck => {
            let use_chambers: bool = state
                .child
                .as_ref()
                .and_then(|c| c.use_chambers_liaison_manager)
                .unwrap_or(false);
            if use_chambers {
                WizardStep::Commit
            } else {
                WizardStep::LiaisonManager
            }
        }
        WizardStep::Commit => return None,
    };
    Some(next)
}
