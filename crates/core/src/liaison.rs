// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Liaison manager changes.
//!
//! A new liaison manager supersedes the current one on every target office.
//! The old contact is kept, marked non-primary and inactive.

use crate::error::CoreError;
use crate::flash::{Flash, flash_failure};
use mapd_domain::{Contact, LIAISON_MANAGER_JOB_TITLE, Office};
use mapd_pda::ProviderDataClient;
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::info;

/// The person being made liaison manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiaisonManagerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub telephone_number: Option<String>,
    pub website: Option<String>,
}

impl LiaisonManagerDetails {
    /// Builds the unsaved primary contact for an office.
    #[must_use]
    pub fn to_contact(&self, today: Date) -> Contact {
        Contact {
            contact_id: 0,
            vendor_site_id: 0,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email_address: self.email_address.clone(),
            telephone_number: self.telephone_number.clone(),
            website: self.website.clone(),
            job_title: Some(LIAISON_MANAGER_JOB_TITLE.to_string()),
            primary: true,
            creation_date: Some(today),
            inactive_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiaisonChangeOutcome {
    /// The contact created for the head office, or the first one created.
    pub representative: Option<Contact>,
    /// Codes of the offices that now have the new liaison manager.
    pub updated_offices: Vec<String>,
    pub flashes: Vec<Flash>,
}

/// Replaces the liaison manager of one office, or of every office of a firm.
///
/// Offices are processed in order. A failure on one office is flashed and
/// the remaining offices are still processed. An office whose current
/// liaison manager could not be superseded does not get a new one.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if `office_code` is given but is not an
/// office of the firm, or `CoreError::ProviderData` if the offices cannot
/// be listed.
pub fn change_liaison_manager<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: Option<&str>,
    details: &LiaisonManagerDetails,
    today: Date,
) -> Result<LiaisonChangeOutcome, CoreError> {
    let offices: Vec<Office> = client.get_provider_offices(firm_id)?;
    let targets: Vec<Office> = match office_code {
        Some(code) => vec![
            offices
                .into_iter()
                .find(|o| o.firm_office_code == code)
                .ok_or_else(|| CoreError::not_found("Office", code))?,
        ],
        None => offices,
    };

    let mut flashes: Vec<Flash> = Vec::new();
    let mut updated_offices: Vec<String> = Vec::new();
    let mut head_office_contact: Option<Contact> = None;
    let mut first_contact: Option<Contact> = None;

    for office in &targets {
        let code: &str = &office.firm_office_code;
        if !supersede_current(client, firm_id, code, today, &mut flashes) {
            continue;
        }
        match client.create_office_contact(firm_id, code, details.to_contact(today)) {
            Ok(contact) => {
                updated_offices.push(code.to_string());
                if office.is_head_office() && head_office_contact.is_none() {
                    head_office_contact = Some(contact.clone());
                }
                first_contact.get_or_insert(contact);
            }
            Err(err) => flashes.push(flash_failure(
                format!("Failed to add the new liaison manager to office {code}"),
                &err,
            )),
        }
    }

    info!(
        firm_id,
        updated = updated_offices.len(),
        failed = flashes.len(),
        "Liaison manager change finished"
    );

    Ok(LiaisonChangeOutcome {
        representative: head_office_contact.or(first_contact),
        updated_offices,
        flashes,
    })
}

/// Marks every current liaison manager of the office as superseded.
///
/// Returns false if the office should not receive a new liaison manager.
fn supersede_current<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    today: Date,
    flashes: &mut Vec<Flash>,
) -> bool {
    let contacts: Vec<Contact> = match client.get_office_contacts(firm_id, office_code) {
        Ok(contacts) => contacts,
        Err(err) => {
            flashes.push(flash_failure(
                format!("Failed to read the contacts of office {office_code}"),
                &err,
            ));
            return false;
        }
    };

    for mut contact in contacts
        .into_iter()
        .filter(Contact::is_active_liaison_manager)
    {
        contact.primary = false;
        contact.inactive_date = Some(today);
        if let Err(err) = client.update_contact(firm_id, office_code, contact) {
            flashes.push(flash_failure(
                format!("Failed to replace the liaison manager of office {office_code}"),
                &err,
            ));
            return false;
        }
    }
    true
}
