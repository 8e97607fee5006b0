// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Final step of the add-provider wizard.
//!
//! The firm is created first; if that fails nothing else is attempted and
//! the error is returned. Everything after it is best-effort: each entity
//! is created on its own, its session fragment is deleted as soon as it
//! exists, and each failure becomes one flash message. Nothing already
//! created is undone.

use crate::error::CoreError;
use crate::flash::{Flash, flash_failure};
use crate::liaison::change_liaison_manager;
use crate::offices::new_bank_account;
use crate::search::require_chambers;
use crate::session::SessionStore;
use crate::wizard::{
    BANK_ACCOUNT_KEY, ChildFragment, HEAD_OFFICE_KEY, HeadOfficeFragment, LIAISON_MANAGER_KEY,
    PROVIDER_KEY, ProviderFragment, WizardState, WizardStep, check_guard, child_key,
};
use mapd_domain::{
    BankAccount, Contact, ContractManager, Firm, FirmType, HeadOfficeRef, Office, PaymentMethod,
    check_parent_link,
};
use mapd_pda::ProviderDataClient;
use time::Date;
use tracing::{info, warn};

pub const SUCCESS_MESSAGE: &str = "New provider successfully created";

/// What the commit created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub firm: Firm,
    pub head_office: Option<Office>,
    pub bank_account: Option<BankAccount>,
    pub liaison_manager: Option<Contact>,
    pub flashes: Vec<Flash>,
}

impl CommitOutcome {
    const fn new(firm: Firm) -> Self {
        Self {
            firm,
            head_office: None,
            bank_account: None,
            liaison_manager: None,
            flashes: Vec::new(),
        }
    }
}

fn new_firm(provider: &ProviderFragment, child: Option<&ChildFragment>) -> Firm {
    let mut firm: Firm = Firm::new(provider.firm_name.clone(), provider.firm_type);
    firm.constitutional_status = provider.constitutional_status;
    firm.company_house_number.clone_from(&provider.company_house_number);
    firm.indemnity_received_date = provider.indemnity_received_date;
    if let Some(child) = child {
        firm.parent_firm_id = Some(child.parent_firm_id);
        firm.advocate_level = child.advocate_level;
        firm.bar_council_roll.clone_from(&child.bar_council_roll);
        firm.solicitor_advocate = child.solicitor_advocate;
    }
    firm
}

fn new_head_office(fragment: HeadOfficeFragment, firm_type: FirmType, today: Date) -> Office {
    let contact = fragment.contact;
    let mut office: Office = Office::new(contact.address, HeadOfficeRef::IsHeadOffice);
    office.telephone_number = contact.telephone_number;
    office.email_address = contact.email_address;
    office.dx_number = contact.dx_number;
    office.dx_centre = contact.dx_centre;
    office.vat_registration_number = fragment.vat_registration_number;
    office.payment_method = Some(fragment.payment_method.unwrap_or(PaymentMethod::Electronic));
    office.contract_manager = Some(match firm_type {
        FirmType::LegalServicesProvider => fragment
            .contract_manager
            .unwrap_or(ContractManager::Default),
        _ => ContractManager::Default,
    });
    office.creation_date = Some(today);
    office
}

/// Creates everything the wizard collected in this session.
///
/// # Errors
///
/// Returns `CoreError::MissingWizardState` if the wizard is incomplete, a
/// domain error if a Barrister or Advocate names a parent that is not a
/// Chambers, and `CoreError::ProviderData` if the firm itself cannot be
/// created. Later failures are reported as flashes in the outcome.
pub fn commit_new_provider<C, S>(
    client: &mut C,
    store: &mut S,
    session_id: &str,
    today: Date,
) -> Result<CommitOutcome, CoreError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let state: WizardState = WizardState::load(store, session_id)?;
    check_guard(WizardStep::Commit, &state)?;
    let Some(provider) = state.provider.clone() else {
        return Err(CoreError::MissingWizardState {
            step: WizardStep::Commit,
            missing: PROVIDER_KEY,
        });
    };

    let firm: Firm = new_firm(&provider, state.child.as_ref());
    let chambers: Option<Firm> = match state.child.as_ref() {
        Some(child) if provider.firm_type.is_child_type() => {
            let chambers: Firm = require_chambers(client, child.parent_firm_id)?;
            check_parent_link(&firm, Some(&chambers))?;
            Some(chambers)
        }
        _ => None,
    };

    let created: Firm = client.create_provider_firm(firm)?;
    store.delete(session_id, PROVIDER_KEY);
    if let Some(key) = child_key(provider.firm_type) {
        store.delete(session_id, key);
    }
    info!(
        firm_id = created.firm_id,
        firm_type = %created.firm_type,
        "Provider created"
    );

    let mut outcome: CommitOutcome = CommitOutcome::new(created);
    match chambers {
        Some(chambers) => commit_child(client, store, session_id, state, &chambers, today, &mut outcome),
        None => commit_parent(client, store, session_id, state, today, &mut outcome),
    }

    WizardState::clear(store, session_id);
    if outcome.flashes.is_empty() {
        info!(firm_id = outcome.firm.firm_id, "Provider commit complete");
    } else {
        warn!(
            firm_id = outcome.firm.firm_id,
            failed = outcome.flashes.len(),
            "Provider commit finished with failures"
        );
    }
    outcome.flashes.insert(0, Flash::success(SUCCESS_MESSAGE));
    Ok(outcome)
}

fn commit_parent<C, S>(
    client: &mut C,
    store: &mut S,
    session_id: &str,
    state: WizardState,
    today: Date,
    outcome: &mut CommitOutcome,
) where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let firm_id: i64 = outcome.firm.firm_id;
    let Some(fragment) = state.head_office else {
        return;
    };
    let office: Office = new_head_office(fragment, outcome.firm.firm_type, today);
    let head_office: Office = match client.create_provider_office(office, firm_id) {
        Ok(office) => office,
        Err(err) => {
            outcome
                .flashes
                .push(flash_failure(String::from("Failed to create the head office"), &err));
            return;
        }
    };
    store.delete(session_id, HEAD_OFFICE_KEY);
    let code: String = head_office.firm_office_code.clone();
    outcome.head_office = Some(head_office);

    if let Some(account) = state.bank_account {
        match client.create_office_bank_account(firm_id, &code, new_bank_account(&account, today)) {
            Ok(account) => {
                store.delete(session_id, BANK_ACCOUNT_KEY);
                outcome.bank_account = Some(account);
            }
            Err(err) => outcome.flashes.push(flash_failure(
                format!("Failed to create the bank account for office {code}"),
                &err,
            )),
        }
    }

    if let Some(details) = state.liaison_manager {
        match client.create_office_contact(firm_id, &code, details.to_contact(today)) {
            Ok(contact) => {
                store.delete(session_id, LIAISON_MANAGER_KEY);
                outcome.liaison_manager = Some(contact);
            }
            Err(err) => outcome.flashes.push(flash_failure(
                format!("Failed to create the liaison manager for office {code}"),
                &err,
            )),
        }
    }
}

/// Copies the chambers' head office and its contacts onto the new firm.
fn commit_child<C, S>(
    client: &mut C,
    store: &mut S,
    session_id: &str,
    state: WizardState,
    chambers: &Firm,
    today: Date,
    outcome: &mut CommitOutcome,
) where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let firm_id: i64 = outcome.firm.firm_id;
    let chambers_office: Office = match client.get_head_office(chambers.firm_id) {
        Ok(Some(office)) => office,
        Ok(None) => {
            outcome.flashes.push(Flash::warning(format!(
                "{} has no head office to copy",
                chambers.firm_name
            )));
            return;
        }
        Err(err) => {
            outcome.flashes.push(flash_failure(
                format!("Failed to read the head office of {}", chambers.firm_name),
                &err,
            ));
            return;
        }
    };

    let mut office: Office = chambers_office.replicate();
    office.contract_manager = Some(ContractManager::Default);
    office.creation_date = Some(today);
    let office: Office = match client.create_provider_office(office, firm_id) {
        Ok(office) => office,
        Err(err) => {
            outcome
                .flashes
                .push(flash_failure(String::from("Failed to create the office"), &err));
            return;
        }
    };
    let code: String = office.firm_office_code.clone();
    outcome.head_office = Some(office);

    match client.get_office_contacts(chambers.firm_id, &chambers_office.firm_office_code) {
        Ok(contacts) => {
            for contact in contacts {
                let name: String = contact.full_name();
                match client.create_office_contact(firm_id, &code, contact) {
                    Ok(copy) if copy.is_active_liaison_manager() => {
                        outcome.liaison_manager = Some(copy);
                    }
                    Ok(_) => {}
                    Err(err) => outcome.flashes.push(flash_failure(
                        format!("Failed to copy contact {name} to office {code}"),
                        &err,
                    )),
                }
            }
        }
        Err(err) => outcome.flashes.push(flash_failure(
            format!("Failed to read the contacts of {}", chambers.firm_name),
            &err,
        )),
    }

    let use_chambers: bool = state
        .child
        .as_ref()
        .and_then(|c| c.use_chambers_liaison_manager)
        .unwrap_or(true);
    if use_chambers {
        return;
    }
    let Some(details) = state.liaison_manager else {
        return;
    };
    match change_liaison_manager(client, firm_id, None, &details, today) {
        Ok(change) => {
            if change.representative.is_some() {
                store.delete(session_id, LIAISON_MANAGER_KEY);
                outcome.liaison_manager = change.representative;
            }
            outcome.flashes.extend(change.flashes);
        }
        Err(err) => {
            warn!(firm_id, error = %err, "Could not set the liaison manager");
            outcome.flashes.push(Flash::error(format!(
                "Failed to set the liaison manager for office {code}"
            )));
        }
    }
}
