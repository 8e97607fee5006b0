// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::flash::{Flash, flash_failure};
use mapd_domain::{DomainError, Firm, FirmType, HeadOfficeRef, Office};
use mapd_pda::{OfficePatch, ProviderDataClient};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignmentOutcome {
    /// The head office as re-read after the updates.
    pub head_office: Option<Office>,
    pub flashes: Vec<Flash>,
}

/// Makes `new_head_office_code` the head office of the firm.
///
/// The new head office is marked `N/A` and every other office is pointed at
/// it. Each office is patched on its own; a failed patch is flashed and
/// does not undo the others.
///
/// # Errors
///
/// Returns a domain error if the firm is a Chambers or the office already is
/// the head office, and `CoreError::NotFound` if the firm or office does not
/// exist.
pub fn reassign_head_office<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    new_head_office_code: &str,
) -> Result<ReassignmentOutcome, CoreError> {
    let firm: Firm = client
        .get_provider_firm(firm_id)?
        .ok_or_else(|| CoreError::not_found("Firm", firm_id))?;
    if firm.firm_type == FirmType::Chambers {
        return Err(DomainError::NotApplicableToFirmType {
            operation: "change the head office",
            firm_type: firm.firm_type,
        }
        .into());
    }

    let offices: Vec<Office> = client.get_provider_offices(firm_id)?;
    let target: &Office = offices
        .iter()
        .find(|o| o.firm_office_code == new_head_office_code)
        .ok_or_else(|| CoreError::not_found("Office", new_head_office_code))?;
    if target.is_head_office() {
        return Err(DomainError::AlreadyHeadOffice {
            office_code: new_head_office_code.to_string(),
        }
        .into());
    }

    let mut flashes: Vec<Flash> = Vec::new();
    for office in &offices {
        let desired: HeadOfficeRef = if office.firm_office_code == new_head_office_code {
            HeadOfficeRef::IsHeadOffice
        } else {
            HeadOfficeRef::Branch(new_head_office_code.to_string())
        };
        if office.head_office == desired {
            continue;
        }
        let patch: OfficePatch = OfficePatch {
            head_office: Some(desired),
            ..OfficePatch::default()
        };
        if let Err(err) = client.patch_office(firm_id, &office.firm_office_code, &patch) {
            flashes.push(flash_failure(
                format!("Failed to update office {}", office.firm_office_code),
                &err,
            ));
        }
    }

    if flashes.is_empty() {
        info!(firm_id, new_head_office_code, "Head office reassigned");
    } else {
        warn!(
            firm_id,
            new_head_office_code,
            failed = flashes.len(),
            "Head office reassigned with failures"
        );
    }

    Ok(ReassignmentOutcome {
        head_office: client.get_head_office(firm_id)?,
        flashes,
    })
}
