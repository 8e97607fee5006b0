// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::wizard::ChildDetails;
use mapd_domain::{ConstitutionalStatus, DomainError, Firm, FirmType};
use mapd_pda::{FirmPatch, ProviderDataClient};
use time::Date;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LspDetails {
    pub constitutional_status: ConstitutionalStatus,
    pub company_house_number: Option<String>,
    pub indemnity_received_date: Option<Date>,
}

fn firm_of_type<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
    operation: &'static str,
    allowed: impl Fn(FirmType) -> bool,
) -> Result<Firm, CoreError> {
    let firm: Firm = client
        .get_provider_firm(firm_id)?
        .ok_or_else(|| CoreError::not_found("Firm", firm_id))?;
    if !allowed(firm.firm_type) {
        return Err(DomainError::NotApplicableToFirmType {
            operation,
            firm_type: firm.firm_type,
        }
        .into());
    }
    Ok(firm)
}

fn apply<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    patch: &FirmPatch,
) -> Result<Firm, CoreError> {
    if patch.is_empty() {
        return Err(CoreError::NoChange {
            field: "form",
            message: String::from(
                "You have not changed anything. Cancel if you do not want to change the details.",
            ),
        });
    }
    let updated: Firm = client.patch_provider_firm(firm_id, patch)?;
    info!(firm_id, "Provider details changed");
    Ok(updated)
}

/// Renames a firm. `firm_name` is expected to be validated already.
///
/// # Errors
///
/// Returns `CoreError::NoChange` if the name is unchanged,
/// `CoreError::NotFound` for an unknown firm, and
/// `CoreError::ProviderData` if the update fails.
pub fn change_firm_name<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    firm_name: &str,
) -> Result<Firm, CoreError> {
    let firm: Firm = firm_of_type(client, firm_id, "change the name", |_| true)?;
    let patch: FirmPatch = FirmPatch {
        firm_name: (firm.firm_name != firm_name).then(|| firm_name.to_string()),
        ..FirmPatch::default()
    };
    apply(client, firm_id, &patch)
}

/// Changes the details only a Legal Services Provider has.
///
/// # Errors
///
/// Returns a domain error for other firm types, `CoreError::NoChange` if
/// nothing differs, and `CoreError::ProviderData` if the update fails.
pub fn change_lsp_details<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    details: LspDetails,
) -> Result<Firm, CoreError> {
    let firm: Firm = firm_of_type(client, firm_id, "change LSP details", |t| {
        t == FirmType::LegalServicesProvider
    })?;
    let patch: FirmPatch = FirmPatch {
        constitutional_status: (firm.constitutional_status != Some(details.constitutional_status))
            .then_some(details.constitutional_status),
        company_house_number: (firm.company_house_number != details.company_house_number)
            .then_some(details.company_house_number),
        indemnity_received_date: (firm.indemnity_received_date != details.indemnity_received_date)
            .then_some(details.indemnity_received_date),
        ..FirmPatch::default()
    };
    apply(client, firm_id, &patch)
}

/// Changes a Barrister's or Advocate's level, roll number and solicitor advocate answer.
///
/// # Errors
///
/// Returns a domain error for other firm types, `CoreError::NoChange` if
/// nothing differs, and `CoreError::ProviderData` if the update fails.
pub fn change_advocate_details<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    details: ChildDetails,
) -> Result<Firm, CoreError> {
    let firm: Firm = firm_of_type(client, firm_id, "change advocate details", |t| {
        t.is_child_type()
    })?;
    let patch: FirmPatch = FirmPatch {
        advocate_level: (firm.advocate_level != Some(details.advocate_level))
            .then_some(details.advocate_level),
        bar_council_roll: details
            .bar_council_roll
            .filter(|roll| firm.bar_council_roll.as_ref() != Some(roll)),
        solicitor_advocate: details
            .solicitor_advocate
            .filter(|answer| firm.solicitor_advocate != Some(*answer)),
        ..FirmPatch::default()
    };
    apply(client, firm_id, &patch)
}
