// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Office maintenance: adding offices, payment method, VAT and bank accounts.

use crate::error::CoreError;
use crate::flash::Flash;
use crate::head_office::reassign_head_office;
use crate::search::{Page, paginate};
use crate::session::{SessionStore, load, save};
use crate::status::find_office;
use crate::wizard::{BankAccountFragment, OfficeContactDetails};
use mapd_domain::{
    BankAccount, ContractManager, DomainError, Firm, FirmType, HeadOfficeRef, Office,
    PaymentMethod,
};
use mapd_pda::{OfficePatch, ProviderDataClient};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{info, warn};

pub const NEW_OFFICE_KEY: &str = "new_office";
pub const BANK_ACCOUNTS_PER_PAGE: usize = 10;

/// Answers from the first page of the add-office flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOfficeFragment {
    pub firm_id: i64,
    pub office_name: String,
    pub is_head_office: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOfficeOutcome {
    pub office: Office,
    pub flashes: Vec<Flash>,
}

/// Records the first page of the add-office flow.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the firm does not exist, a domain error
/// if a Chambers that already has a head office asks for another one, and
/// `CoreError::Session` if the fragment cannot be stored.
pub fn start_new_office<C, S>(
    client: &C,
    store: &mut S,
    session_id: &str,
    fragment: &NewOfficeFragment,
) -> Result<(), CoreError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let firm: Firm = client
        .get_provider_firm(fragment.firm_id)?
        .ok_or_else(|| CoreError::not_found("Firm", fragment.firm_id))?;
    if fragment.is_head_office
        && firm.firm_type == FirmType::Chambers
        && client.get_head_office(firm.firm_id)?.is_some()
    {
        return Err(DomainError::NotApplicableToFirmType {
            operation: "change the head office",
            firm_type: firm.firm_type,
        }
        .into());
    }
    save(store, session_id, NEW_OFFICE_KEY, fragment)
}

/// Loads the add-office fragment for `firm_id`.
///
/// # Errors
///
/// Returns `CoreError::MissingSessionFragment` if there is none, or it was
/// started for a different firm.
pub fn load_new_office<S: SessionStore + ?Sized>(
    store: &mut S,
    session_id: &str,
    firm_id: i64,
) -> Result<NewOfficeFragment, CoreError> {
    load::<NewOfficeFragment, S>(store, session_id, NEW_OFFICE_KEY)?
        .filter(|f| f.firm_id == firm_id)
        .ok_or(CoreError::MissingSessionFragment {
            key: NEW_OFFICE_KEY,
        })
}

/// Creates the office collected by the add-office flow.
///
/// The office starts as a branch of the current head office. If it was
/// flagged as the new head office the designation is then moved to it;
/// failures while moving it are flashed.
///
/// # Errors
///
/// Returns `CoreError::MissingSessionFragment` without a first page, and
/// `CoreError::ProviderData` if the office cannot be created.
pub fn commit_new_office<C, S>(
    client: &mut C,
    store: &mut S,
    session_id: &str,
    firm_id: i64,
    contact: OfficeContactDetails,
    today: Date,
) -> Result<NewOfficeOutcome, CoreError>
where
    C: ProviderDataClient + ?Sized,
    S: SessionStore + ?Sized,
{
    let fragment: NewOfficeFragment = load_new_office(store, session_id, firm_id)?;
    let current_head: Option<Office> = client.get_head_office(firm_id)?;
    let head_office: HeadOfficeRef = current_head
        .as_ref()
        .map_or(HeadOfficeRef::IsHeadOffice, |h| {
            HeadOfficeRef::Branch(h.firm_office_code.clone())
        });

    let mut office: Office = Office::new(contact.address, head_office);
    office.office_name = Some(fragment.office_name.clone());
    office.telephone_number = contact.telephone_number;
    office.email_address = contact.email_address;
    office.dx_number = contact.dx_number;
    office.dx_centre = contact.dx_centre;
    office.payment_method = Some(PaymentMethod::Electronic);
    office.contract_manager = Some(ContractManager::Default);
    office.creation_date = Some(today);

    let created: Office = client.create_provider_office(office, firm_id)?;
    store.delete(session_id, NEW_OFFICE_KEY);
    let code: String = created.firm_office_code.clone();
    info!(firm_id, office_code = %code, "Office created");

    let mut flashes: Vec<Flash> = vec![Flash::success(format!("New office {code} created"))];
    let mut office: Office = created;
    if fragment.is_head_office && current_head.is_some() {
        match reassign_head_office(client, firm_id, &code) {
            Ok(outcome) => {
                flashes.extend(outcome.flashes);
                if let Some(head) = outcome.head_office.filter(|h| h.firm_office_code == code) {
                    office = head;
                }
            }
            Err(err) => {
                warn!(firm_id, office_code = %code, error = %err, "Could not make new office the head office");
                flashes.push(Flash::error(format!(
                    "Failed to make office {code} the head office"
                )));
            }
        }
    }
    Ok(NewOfficeOutcome { office, flashes })
}

/// # Errors
///
/// Returns `CoreError::NoChange` if the office already uses `method`, and
/// `CoreError::ProviderData` if the update fails.
pub fn change_payment_method<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    method: PaymentMethod,
) -> Result<Office, CoreError> {
    let office: Office = find_office(client, firm_id, office_code)?;
    if office.payment_method == Some(method) {
        return Err(CoreError::NoChange {
            field: "payment_method",
            message: format!(
                "The payment method is already {}. Cancel if you do not want to change it.",
                method.as_str()
            ),
        });
    }
    let patch: OfficePatch = OfficePatch {
        payment_method: Some(method),
        ..OfficePatch::default()
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;
    info!(firm_id, office_code, payment_method = method.as_str(), "Payment method changed");
    Ok(updated)
}

/// Sets or clears the VAT registration number of an office.
///
/// `vat_registration_number` is expected to be normalised already.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for an unknown office and
/// `CoreError::ProviderData` if the update fails.
pub fn change_office_vat<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    vat_registration_number: Option<String>,
) -> Result<Office, CoreError> {
    find_office(client, firm_id, office_code)?;
    let patch: OfficePatch = OfficePatch {
        vat_registration_number: Some(vat_registration_number),
        ..OfficePatch::default()
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;
    info!(firm_id, office_code, "VAT registration number changed");
    Ok(updated)
}

/// Adds a new primary bank account to an office. The API ends the previous one.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for an unknown office and
/// `CoreError::ProviderData` if the account is rejected.
pub fn add_bank_account<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    details: &BankAccountFragment,
    today: Date,
) -> Result<BankAccount, CoreError> {
    find_office(client, firm_id, office_code)?;
    let account: BankAccount = client.create_office_bank_account(
        firm_id,
        office_code,
        new_bank_account(details, today),
    )?;
    info!(
        firm_id,
        office_code,
        bank_account_id = account.bank_account_id,
        "Bank account added"
    );
    Ok(account)
}

pub(crate) fn new_bank_account(details: &BankAccountFragment, today: Date) -> BankAccount {
    BankAccount {
        bank_account_id: 0,
        vendor_site_id: 0,
        bank_account_name: details.bank_account_name.clone(),
        sort_code: details.sort_code.clone(),
        account_number: details.account_number.clone(),
        bank_name: None,
        primary: true,
        start_date: Some(today),
        end_date: None,
    }
}

/// Searches every bank account held by the firm's offices.
///
/// Separators in `query` are ignored; an account matches when its sort code
/// or account number contains the remaining digits.
///
/// # Errors
///
/// Returns `CoreError::ProviderData` if the accounts cannot be listed.
pub fn search_firm_bank_accounts<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
    query: &str,
    page: usize,
) -> Result<Page<BankAccount>, CoreError> {
    let needle: String = query
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let mut accounts: Vec<BankAccount> = client
        .get_provider_firm_bank_accounts(firm_id)?
        .into_iter()
        .filter(|a| {
            needle.is_empty() || a.sort_code.contains(&needle) || a.account_number.contains(&needle)
        })
        .collect();
    accounts.sort_by_key(|a| a.bank_account_id);
    accounts.dedup_by(|a, b| {
        a.sort_code == b.sort_code
            && a.account_number == b.account_number
            && a.bank_account_name == b.bank_account_name
    });
    Ok(paginate(accounts, page, BANK_ACCOUNTS_PER_PAGE))
}

/// Makes one of the firm's existing bank accounts the primary account of an office.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the office or account does not belong
/// to the firm, `CoreError::NoChange` if it already is the office's primary
/// account, and `CoreError::ProviderData` if the assignment fails.
pub fn assign_bank_account<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    bank_account_id: i64,
) -> Result<BankAccount, CoreError> {
    find_office(client, firm_id, office_code)?;
    let chosen: BankAccount = client
        .get_provider_firm_bank_accounts(firm_id)?
        .into_iter()
        .find(|a| a.bank_account_id == bank_account_id)
        .ok_or_else(|| CoreError::not_found("Bank account", bank_account_id))?;

    let already_primary: bool = client
        .get_office_bank_accounts(firm_id, office_code)?
        .iter()
        .filter(|a| a.is_active_primary())
        .any(|a| {
            a.bank_account_id == bank_account_id
                || (a.sort_code == chosen.sort_code && a.account_number == chosen.account_number)
        });
    if already_primary {
        return Err(CoreError::NoChange {
            field: "bank_account_id",
            message: String::from(
                "This is already the office's bank account. Cancel if you do not want to change it.",
            ),
        });
    }

    let account: BankAccount =
        client.assign_bank_account_to_office(firm_id, office_code, bank_account_id)?;
    info!(firm_id, office_code, bank_account_id, "Bank account assigned");
    Ok(account)
}

