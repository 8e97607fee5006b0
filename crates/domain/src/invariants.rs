// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural rules over the provider graph.
//!
//! These are checked after multi-entity operations and in tests; the
//! Provider Data API itself does not enforce them.

use crate::error::DomainError;
use crate::types::{BankAccount, Contact, Firm, FirmType, Office};

/// Checks the one-level parent rule for a firm.
///
/// Barristers and Advocates must point at a Chambers. Chambers and Legal
/// Services Providers must not have a parent.
///
/// # Arguments
///
/// * `firm` - The firm to check
/// * `parent` - The firm referenced by `firm.parent_firm_id`, if it exists
///
/// # Errors
///
/// Returns `DomainError::InvalidParent` if the rule is broken.
pub fn check_parent_link(firm: &Firm, parent: Option<&Firm>) -> Result<(), DomainError> {
    match (firm.firm_type.is_child_type(), firm.parent_firm_id) {
        (false, None) => Ok(()),
        (false, Some(parent_id)) => Err(DomainError::InvalidParent {
            firm_id: firm.firm_id,
            reason: format!("a {} cannot have parent firm {parent_id}", firm.firm_type),
        }),
        (true, None) => Err(DomainError::InvalidParent {
            firm_id: firm.firm_id,
            reason: format!("a {} must belong to a Chambers", firm.firm_type),
        }),
        (true, Some(parent_id)) => match parent {
            Some(p) if p.firm_id == parent_id && p.firm_type == FirmType::Chambers => Ok(()),
            Some(p) if p.firm_id == parent_id => Err(DomainError::InvalidParent {
                firm_id: firm.firm_id,
                reason: format!("parent firm {parent_id} is a {}", p.firm_type),
            }),
            _ => Err(DomainError::InvalidParent {
                firm_id: firm.firm_id,
                reason: format!("parent firm {parent_id} does not exist"),
            }),
        },
    }
}

/// Checks that a firm with offices has exactly one head office.
///
/// # Errors
///
/// Returns `DomainError::HeadOfficeCount` otherwise.
pub fn check_single_head_office(firm_id: i64, offices: &[Office]) -> Result<(), DomainError> {
    if offices.is_empty() {
        return Ok(());
    }
    let count: usize = offices.iter().filter(|o| o.is_head_office()).count();
    if count != 1 {
        return Err(DomainError::HeadOfficeCount { firm_id, count });
    }
    Ok(())
}

/// Checks that an office has at most one current primary liaison manager.
///
/// # Errors
///
/// Returns `DomainError::MultipleLiaisonManagers` otherwise.
pub fn check_single_liaison_manager(
    office_code: &str,
    contacts: &[Contact],
) -> Result<(), DomainError> {
    let count: usize = contacts
        .iter()
        .filter(|c| c.is_active_liaison_manager())
        .count();
    if count > 1 {
        return Err(DomainError::MultipleLiaisonManagers {
            office_code: office_code.to_string(),
            count,
        });
    }
    Ok(())
}

/// Checks that an office has at most one active primary bank account.
///
/// # Errors
///
/// Returns `DomainError::MultiplePrimaryBankAccounts` otherwise.
pub fn check_single_primary_bank_account(
    office_code: &str,
    accounts: &[BankAccount],
) -> Result<(), DomainError> {
    let count: usize = accounts.iter().filter(|a| a.is_active_primary()).count();
    if count > 1 {
        return Err(DomainError::MultiplePrimaryBankAccounts {
            office_code: office_code.to_string(),
            count,
        });
    }
    Ok(())
}
