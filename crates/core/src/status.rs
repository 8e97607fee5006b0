// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status toggles for firms and offices.
//!
//! Every toggle compares the requested value with the stored one first and
//! refuses a submission that would not change anything. Several statuses
//! have no column of their own in the Provider Data API and are encoded as
//! reserved contract manager values; see [`ContractManager`].

use crate::error::CoreError;
use crate::flash::{Flash, flash_failure};
use mapd_domain::{
    ContractManager, DomainError, Firm, INACTIVE_HOLD_REASON, Office, check_not_future,
};
use mapd_pda::{FirmPatch, OfficePatch, ProviderDataClient};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::info;

/// The flow that owns a status-workaround contract manager value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFlow {
    ActiveStatus,
    FalseBalance,
    DebtRecovery,
}

impl StatusFlow {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveStatus => "active",
            Self::FalseBalance => "false balance",
            Self::DebtRecovery => "debt recovery",
        }
    }

    /// URL slug of the flow's form.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::ActiveStatus => "active-status",
            Self::FalseBalance => "false-balance",
            Self::DebtRecovery => "debt-recovery",
        }
    }

    /// Returns the flow that must be used to change `manager`, if any.
    #[must_use]
    pub const fn owning(manager: &ContractManager) -> Option<Self> {
        match manager {
            ContractManager::Inactive => Some(Self::ActiveStatus),
            ContractManager::FalseBalance => Some(Self::FalseBalance),
            ContractManager::DebtRecovery => Some(Self::DebtRecovery),
            ContractManager::Default | ContractManager::Named(_) => None,
        }
    }
}

/// A secondary step offered after a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FollowUp {
    /// Offer to hold payments on these sibling offices as well.
    ApplyHoldToOffices { candidates: Vec<String> },
    /// Offer to mark these sibling offices as intervened as well.
    ApplyInterventionToOffices { candidates: Vec<String> },
    /// Offer to remove the intervention from these sibling offices as well.
    RemoveInterventionFromOffices { candidates: Vec<String> },
    /// The contract manager was reset and a real one should be assigned.
    AssignContractManager { office_code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOutcome<T> {
    pub updated: T,
    pub flashes: Vec<Flash>,
    pub follow_up: Option<FollowUp>,
}

impl<T> StatusOutcome<T> {
    fn done(updated: T, message: impl Into<String>) -> Self {
        Self {
            updated,
            flashes: vec![Flash::success(message)],
            follow_up: None,
        }
    }
}

/// Result of applying one change to a chosen set of offices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub updated: Vec<String>,
    pub flashes: Vec<Flash>,
}

fn ensure_changed(
    field: &'static str,
    current: bool,
    requested: bool,
    yes_phrase: &str,
    no_phrase: &str,
) -> Result<(), CoreError> {
    if current != requested {
        return Ok(());
    }
    let message: String = if requested {
        format!("Select no if {no_phrase}. Cancel if you do not want to change the answer.")
    } else {
        format!("Select yes if {yes_phrase}. Cancel if you do not want to change the answer.")
    };
    Err(CoreError::NoChange { field, message })
}

fn find_firm<C: ProviderDataClient + ?Sized>(client: &C, firm_id: i64) -> Result<Firm, CoreError> {
    client
        .get_provider_firm(firm_id)?
        .ok_or_else(|| CoreError::not_found("Firm", firm_id))
}

/// Finds an office among the firm's own offices.
pub(crate) fn find_office<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
    office_code: &str,
) -> Result<Office, CoreError> {
    client
        .get_provider_offices(firm_id)?
        .into_iter()
        .find(|o| o.firm_office_code == office_code)
        .ok_or_else(|| CoreError::not_found("Office", office_code))
}

fn find_head_office_code<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm: &Firm,
    operation: &'static str,
) -> Result<String, CoreError> {
    if !firm.firm_type.is_child_type() {
        return Err(DomainError::NotApplicableToFirmType {
            operation,
            firm_type: firm.firm_type,
        }
        .into());
    }
    client
        .get_head_office(firm.firm_id)?
        .map(|o| o.firm_office_code)
        .ok_or_else(|| CoreError::not_found("Head office of firm", firm.firm_id))
}

fn sibling_codes(offices: &[Office], office_code: &str, keep: impl Fn(&Office) -> bool) -> Vec<String> {
    offices
        .iter()
        .filter(|o| o.firm_office_code != office_code && keep(o))
        .map(|o| o.firm_office_code.clone())
        .collect()
}

fn inactive_patch(today: Date) -> OfficePatch {
    OfficePatch {
        inactive_date: Some(Some(today)),
        hold_all_payments: Some(true),
        hold_reason: Some(Some(INACTIVE_HOLD_REASON.to_string())),
        contract_manager: Some(ContractManager::Inactive),
        ..OfficePatch::default()
    }
}

/// Makes a firm active or inactive.
///
/// Making a firm inactive also makes each of its active offices inactive.
/// Making it active again leaves the offices as they are.
///
/// # Errors
///
/// Returns `CoreError::NoChange` if the firm already has the requested
/// status, `CoreError::NotFound` if it does not exist, and
/// `CoreError::ProviderData` if the firm itself cannot be updated.
pub fn set_firm_active<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    active: bool,
    today: Date,
) -> Result<StatusOutcome<Firm>, CoreError> {
    let firm: Firm = find_firm(client, firm_id)?;
    if firm.is_active() == active {
        let status: &str = if active { "active" } else { "inactive" };
        return Err(CoreError::NoChange {
            field: "status",
            message: format!(
                "The provider is already {status}. Cancel if you do not want to change the status."
            ),
        });
    }

    let patch: FirmPatch = FirmPatch {
        inactive_date: Some((!active).then_some(today)),
        ..FirmPatch::default()
    };
    let updated: Firm = client.patch_provider_firm(firm_id, &patch)?;

    let mut flashes: Vec<Flash> = Vec::new();
    if !active {
        match client.get_provider_offices(firm_id) {
            Ok(offices) => {
                for office in offices.iter().filter(|o| o.is_active()) {
                    let code: &str = &office.firm_office_code;
                    if let Err(err) = client.patch_office(firm_id, code, &inactive_patch(today)) {
                        flashes.push(flash_failure(
                            format!("Failed to make office {code} inactive"),
                            &err,
                        ));
                    }
                }
            }
            Err(err) => flashes.push(flash_failure(
                String::from("Failed to make the provider's offices inactive"),
                &err,
            )),
        }
    }

    info!(firm_id, active, failed = flashes.len(), "Firm status changed");
    let status: &str = if active { "active" } else { "inactive" };
    flashes.insert(0, Flash::success(format!("Provider marked as {status}")));
    Ok(StatusOutcome {
        updated,
        flashes,
        follow_up: None,
    })
}

/// Makes an office active or inactive.
///
/// An inactive office gets today's date, a payment hold and the inactive
/// contract manager value. Reactivating clears the date and any status
/// contract manager value but keeps the payment hold.
///
/// # Errors
///
/// Returns `CoreError::NoChange` if the office already has the requested
/// status, `CoreError::NotFound` if it does not exist, and
/// `CoreError::ProviderData` if the update fails.
pub fn set_office_active<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    active: bool,
    today: Date,
) -> Result<StatusOutcome<Office>, CoreError> {
    let office: Office = find_office(client, firm_id, office_code)?;
    if office.is_active() == active {
        let status: &str = if active { "active" } else { "inactive" };
        return Err(CoreError::NoChange {
            field: "status",
            message: format!(
                "The office is already {status}. Cancel if you do not want to change the status."
            ),
        });
    }

    let patch: OfficePatch = if active {
        let reset_manager: bool = matches!(
            office.contract_manager,
            Some(ContractManager::Inactive | ContractManager::FalseBalance)
        );
        OfficePatch {
            inactive_date: Some(None),
            contract_manager: reset_manager.then_some(ContractManager::Default),
            ..OfficePatch::default()
        }
    } else {
        inactive_patch(today)
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;
    info!(firm_id, office_code, active, "Office status changed");
    let status: &str = if active { "active" } else { "inactive" };
    Ok(StatusOutcome::done(
        updated,
        format!("Office {office_code} marked as {status}"),
    ))
}

fn require_hold_reason(hold: bool, reason: Option<&str>) -> Result<Option<String>, CoreError> {
    if !hold {
        return Ok(None);
    }
    reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .map(Some)
        .ok_or_else(|| {
            DomainError::invalid_field("hold_reason", "Enter the reason for holding payments")
                .into()
        })
}

/// Holds or releases payments for every office of a firm at once.
///
/// # Errors
///
/// Returns `CoreError::NoChange` if nothing would change, a domain error if
/// a hold is requested without a reason, and `CoreError::ProviderData` if
/// the firm cannot be updated.
pub fn set_firm_hold_payments<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    hold: bool,
    reason: Option<&str>,
) -> Result<StatusOutcome<Firm>, CoreError> {
    let firm: Firm = find_firm(client, firm_id)?;
    ensure_changed(
        "hold_all_payments",
        firm.hold_all_payments,
        hold,
        "payments to this provider should be held",
        "payments to this provider should no longer be held",
    )?;
    let reason: Option<String> = require_hold_reason(hold, reason)?;
    let patch: FirmPatch = FirmPatch {
        hold_all_payments: Some(hold),
        hold_reason: Some(reason),
        ..FirmPatch::default()
    };
    let updated: Firm = client.patch_provider_firm(firm_id, &patch)?;
    info!(firm_id, hold, "Firm payment hold changed");
    Ok(StatusOutcome::done(
        updated,
        if hold {
            "Payments held for this provider"
        } else {
            "Payments released for this provider"
        },
    ))
}

/// Holds or releases payments for one office.
///
/// Holding payments on a head office offers to hold the sibling offices too.
///
/// # Errors
///
/// Returns `CoreError::NoChange` if nothing would change, a domain error if
/// a hold is requested without a reason, and `CoreError::ProviderData` if
/// the office cannot be updated.
pub fn set_office_hold_payments<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    hold: bool,
    reason: Option<&str>,
) -> Result<StatusOutcome<Office>, CoreError> {
    let offices: Vec<Office> = client.get_provider_offices(firm_id)?;
    let office: &Office = offices
        .iter()
        .find(|o| o.firm_office_code == office_code)
        .ok_or_else(|| CoreError::not_found("Office", office_code))?;
    ensure_changed(
        "hold_all_payments",
        office.hold_all_payments,
        hold,
        "payments to this office should be held",
        "payments to this office should no longer be held",
    )?;
    let reason: Option<String> = require_hold_reason(hold, reason)?;
    let patch: OfficePatch = OfficePatch {
        hold_all_payments: Some(hold),
        hold_reason: Some(reason),
        ..OfficePatch::default()
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;

    let candidates: Vec<String> = if hold && office.is_head_office() {
        sibling_codes(&offices, office_code, |o| !o.hold_all_payments)
    } else {
        Vec::new()
    };
    info!(firm_id, office_code, hold, "Office payment hold changed");
    let mut outcome: StatusOutcome<Office> = StatusOutcome::done(
        updated,
        if hold {
            format!("Payments held for office {office_code}")
        } else {
            format!("Payments released for office {office_code}")
        },
    );
    if !candidates.is_empty() {
        outcome.follow_up = Some(FollowUp::ApplyHoldToOffices { candidates });
    }
    Ok(outcome)
}

fn apply_to_offices<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_codes: &[String],
    patch: &OfficePatch,
    action: &str,
) -> Result<BulkOutcome, CoreError> {
    let known: Vec<String> = client
        .get_provider_offices(firm_id)?
        .into_iter()
        .map(|o| o.firm_office_code)
        .collect();
    let mut outcome: BulkOutcome = BulkOutcome::default();
    for code in office_codes {
        if !known.contains(code) {
            outcome.flashes.push(Flash::warning(format!(
                "Office {code} is not an office of this provider"
            )));
            continue;
        }
        match client.patch_office(firm_id, code, patch) {
            Ok(_) => outcome.updated.push(code.clone()),
            Err(err) => outcome.flashes.push(flash_failure(
                format!("Failed to {action} for office {code}"),
                &err,
            )),
        }
    }
    info!(
        firm_id,
        action,
        updated = outcome.updated.len(),
        failed = outcome.flashes.len(),
        "Bulk office update finished"
    );
    Ok(outcome)
}

/// Holds payments on the chosen sibling offices.
///
/// # Errors
///
/// Returns a domain error without a reason, or `CoreError::ProviderData` if
/// the offices cannot be listed.
pub fn apply_hold_to_offices<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_codes: &[String],
    reason: Option<&str>,
) -> Result<BulkOutcome, CoreError> {
    let reason: Option<String> = require_hold_reason(true, reason)?;
    let patch: OfficePatch = OfficePatch {
        hold_all_payments: Some(true),
        hold_reason: Some(reason),
        ..OfficePatch::default()
    };
    apply_to_offices(client, firm_id, office_codes, &patch, "hold payments")
}

/// Marks an office as intervened, or removes the intervention.
///
/// Either way the sibling offices with the opposite status are offered for
/// the same change.
///
/// # Errors
///
/// Returns `CoreError::NoChange` if nothing would change, a domain error if
/// the date is missing or in the future, and `CoreError::ProviderData` if
/// the office cannot be updated.
pub fn set_office_intervened<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    intervened: bool,
    date: Option<Date>,
    today: Date,
) -> Result<StatusOutcome<Office>, CoreError> {
    let offices: Vec<Office> = client.get_provider_offices(firm_id)?;
    let office: &Office = offices
        .iter()
        .find(|o| o.firm_office_code == office_code)
        .ok_or_else(|| CoreError::not_found("Office", office_code))?;
    ensure_changed(
        "intervened",
        office.is_intervened(),
        intervened,
        "the office has been intervened",
        "the office is no longer intervened",
    )?;

    let date: Option<Date> = if intervened {
        let date: Date = date.ok_or_else(|| {
            DomainError::invalid_field("intervened_date", "Enter the date of the intervention")
        })?;
        check_not_future("intervened_date", date, today)?;
        Some(date)
    } else {
        None
    };
    let patch: OfficePatch = OfficePatch {
        intervened_date: Some(date),
        ..OfficePatch::default()
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;

    let follow_up: Option<FollowUp> = if intervened {
        let candidates: Vec<String> = sibling_codes(&offices, office_code, |o| !o.is_intervened());
        (!candidates.is_empty()).then_some(FollowUp::ApplyInterventionToOffices { candidates })
    } else {
        let candidates: Vec<String> = sibling_codes(&offices, office_code, Office::is_intervened);
        (!candidates.is_empty()).then_some(FollowUp::RemoveInterventionFromOffices { candidates })
    };
    info!(firm_id, office_code, intervened, "Office intervention changed");
    Ok(StatusOutcome {
        updated,
        flashes: vec![Flash::success(if intervened {
            format!("Office {office_code} marked as intervened")
        } else {
            format!("Intervention removed from office {office_code}")
        })],
        follow_up,
    })
}

/// Marks the chosen sibling offices as intervened on `date`.
///
/// # Errors
///
/// Returns `CoreError::ProviderData` if the offices cannot be listed.
pub fn apply_intervention_to_offices<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_codes: &[String],
    date: Date,
) -> Result<BulkOutcome, CoreError> {
    let patch: OfficePatch = OfficePatch {
        intervened_date: Some(Some(date)),
        ..OfficePatch::default()
    };
    apply_to_offices(client, firm_id, office_codes, &patch, "apply the intervention")
}

/// Removes the intervention from the chosen sibling offices.
///
/// # Errors
///
/// Returns `CoreError::ProviderData` if the offices cannot be listed.
pub fn remove_intervention_from_offices<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_codes: &[String],
) -> Result<BulkOutcome, CoreError> {
    let patch: OfficePatch = OfficePatch {
        intervened_date: Some(None),
        ..OfficePatch::default()
    };
    apply_to_offices(client, firm_id, office_codes, &patch, "remove the intervention")
}

/// Sets or clears the false balance status of an inactive office.
///
/// Only Barrister and Advocate offices carry this status.
///
/// # Errors
///
/// Returns a domain error for other firm types,
/// `CoreError::UnsupportedOperation` for an active office,
/// `CoreError::NoChange` if nothing would change, and
/// `CoreError::ProviderData` if the update fails.
pub fn set_office_false_balance<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    false_balance: bool,
) -> Result<StatusOutcome<Office>, CoreError> {
    let firm: Firm = find_firm(client, firm_id)?;
    if !firm.firm_type.is_child_type() {
        return Err(DomainError::NotApplicableToFirmType {
            operation: "change the false balance status",
            firm_type: firm.firm_type,
        }
        .into());
    }
    let office: Office = find_office(client, firm_id, office_code)?;
    if office.is_active() {
        return Err(CoreError::UnsupportedOperation(format!(
            "office {office_code} must be inactive to change its false balance status"
        )));
    }
    ensure_changed(
        "false_balance",
        office.contract_manager == Some(ContractManager::FalseBalance),
        false_balance,
        "the office has a false balance",
        "the office no longer has a false balance",
    )?;

    let patch: OfficePatch = OfficePatch {
        contract_manager: Some(if false_balance {
            ContractManager::FalseBalance
        } else {
            ContractManager::Inactive
        }),
        ..OfficePatch::default()
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;
    info!(firm_id, office_code, false_balance, "False balance changed");
    Ok(StatusOutcome::done(updated, "False balance status updated"))
}

/// Refers an active office to the Debt Recovery Unit, or withdraws the referral.
///
/// Withdrawing resets the contract manager to the default value and asks
/// for a real contract manager to be assigned.
///
/// # Errors
///
/// Returns `CoreError::UnsupportedOperation` for an inactive office,
/// `CoreError::NoChange` if nothing would change, and
/// `CoreError::ProviderData` if the update fails.
pub fn set_office_debt_recovery<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    referred: bool,
) -> Result<StatusOutcome<Office>, CoreError> {
    let office: Office = find_office(client, firm_id, office_code)?;
    if !office.is_active() {
        return Err(CoreError::UnsupportedOperation(format!(
            "office {office_code} must be active to change its debt recovery status"
        )));
    }
    ensure_changed(
        "debt_recovery",
        office.contract_manager == Some(ContractManager::DebtRecovery),
        referred,
        "they have been referred to the Debt Recovery Unit",
        "they are no longer referred to the Debt Recovery Unit",
    )?;

    let patch: OfficePatch = OfficePatch {
        contract_manager: Some(if referred {
            ContractManager::DebtRecovery
        } else {
            ContractManager::Default
        }),
        ..OfficePatch::default()
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;
    info!(firm_id, office_code, referred, "Debt recovery referral changed");
    let mut outcome: StatusOutcome<Office> =
        StatusOutcome::done(updated, "Debt recovery status updated");
    if !referred {
        outcome.follow_up = Some(FollowUp::AssignContractManager {
            office_code: office_code.to_string(),
        });
    }
    Ok(outcome)
}

/// Firm-level false balance toggle for a Barrister or Advocate; acts on the head office.
///
/// # Errors
///
/// As [`set_office_false_balance`], plus a domain error for other firm types.
pub fn set_firm_false_balance<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    false_balance: bool,
) -> Result<StatusOutcome<Office>, CoreError> {
    let firm: Firm = find_firm(client, firm_id)?;
    let code: String = find_head_office_code(client, &firm, "change the false balance status")?;
    set_office_false_balance(client, firm_id, &code, false_balance)
}

/// Firm-level debt recovery toggle for a Barrister or Advocate; acts on the head office.
///
/// # Errors
///
/// As [`set_office_debt_recovery`], plus a domain error for other firm types.
pub fn set_firm_debt_recovery<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    referred: bool,
) -> Result<StatusOutcome<Office>, CoreError> {
    let firm: Firm = find_firm(client, firm_id)?;
    let code: String = find_head_office_code(client, &firm, "change the debt recovery status")?;
    set_office_debt_recovery(client, firm_id, &code, referred)
}

/// Firm-level intervention toggle for a Barrister or Advocate; acts on the head office.
///
/// # Errors
///
/// As [`set_office_intervened`], plus a domain error for other firm types.
pub fn set_firm_intervened<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    intervened: bool,
    date: Option<Date>,
    today: Date,
) -> Result<StatusOutcome<Office>, CoreError> {
    let firm: Firm = find_firm(client, firm_id)?;
    let code: String = find_head_office_code(client, &firm, "change the intervened status")?;
    set_office_intervened(client, firm_id, &code, intervened, date, today)
}
