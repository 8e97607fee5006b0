// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::FirmType;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A submitted field failed validation. `message` is shown to the user as-is.
    InvalidField {
        /// The form field the message belongs to.
        field: &'static str,
        /// The user-facing message.
        message: String,
    },
    /// A value did not belong to a closed set of choices.
    UnknownValue {
        /// What kind of value was being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A firm points at a parent it may not have.
    InvalidParent {
        /// The firm with the bad parent link.
        firm_id: i64,
        /// Description of the broken rule.
        reason: String,
    },
    /// A firm does not have exactly one head office.
    HeadOfficeCount {
        /// The firm.
        firm_id: i64,
        /// The number of head offices found.
        count: usize,
    },
    /// An office has more than one active primary liaison manager.
    MultipleLiaisonManagers {
        /// The office code.
        office_code: String,
        /// The number of active primary liaison managers found.
        count: usize,
    },
    /// An office has more than one active primary bank account.
    MultiplePrimaryBankAccounts {
        /// The office code.
        office_code: String,
        /// The number of active primary accounts found.
        count: usize,
    },
    /// The operation is not available for this type of firm.
    NotApplicableToFirmType {
        /// The operation attempted.
        operation: &'static str,
        /// The firm type it was attempted on.
        firm_type: FirmType,
    },
    /// The office requested as head office already is the head office.
    AlreadyHeadOffice {
        /// The office code.
        office_code: String,
    },
}

impl DomainError {
    /// Shorthand for a field validation failure.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField { message, .. } => write!(f, "{message}"),
            Self::UnknownValue { kind, value } => write!(f, "Unknown {kind}: '{value}'"),
            Self::InvalidParent { firm_id, reason } => {
                write!(f, "Firm {firm_id} has an invalid parent: {reason}")
            }
            Self::HeadOfficeCount { firm_id, count } => {
                write!(
                    f,
                    "Firm {firm_id} must have exactly one head office, found {count}"
                )
            }
            Self::MultipleLiaisonManagers { office_code, count } => {
                write!(
                    f,
                    "Office {office_code} has {count} active primary liaison managers"
                )
            }
            Self::MultiplePrimaryBankAccounts { office_code, count } => {
                write!(
                    f,
                    "Office {office_code} has {count} active primary bank accounts"
                )
            }
            Self::NotApplicableToFirmType {
                operation,
                firm_type,
            } => {
                write!(f, "Cannot {operation} for a {firm_type}")
            }
            Self::AlreadyHeadOffice { office_code } => {
                write!(f, "Office {office_code} is already the head office")
            }
        }
    }
}

impl std::error::Error for DomainError {}
