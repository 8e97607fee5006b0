// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::StatusFlow;
use crate::wizard::WizardStep;
use mapd_domain::DomainError;
use mapd_pda::ProviderDataError;

/// Errors raised by wizard steps and provider workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule or field validation failed.
    DomainViolation(DomainError),
    /// A wizard step was reached without the session state it builds on.
    MissingWizardState {
        /// The step that was requested.
        step: WizardStep,
        /// The session fragment that was missing or unsuitable.
        missing: &'static str,
    },
    /// A follow-up form was reached without the session fragment it needs.
    MissingSessionFragment {
        /// The session key that was missing or belongs to another firm.
        key: &'static str,
    },
    /// The operation does not apply to the target firm or office.
    UnsupportedOperation(String),
    /// A referenced entity does not exist.
    NotFound {
        /// The kind of entity.
        resource: &'static str,
        /// The id or code that was looked up.
        id: String,
    },
    /// A status form was submitted with the value already stored.
    NoChange {
        /// The form field the message belongs to.
        field: &'static str,
        /// The user-facing message.
        message: String,
    },
    /// The contract manager holds a status value owned by another flow.
    OwnedByStatusFlow {
        /// The flow that must be used instead.
        flow: StatusFlow,
        /// The office concerned.
        office_code: String,
    },
    /// The Provider Data API call that was the point of the request failed.
    ProviderData(ProviderDataError),
    /// Session data could not be read or written.
    Session(String),
}

impl CoreError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::MissingWizardState { step, missing } => {
                write!(
                    f,
                    "Cannot show {} without {missing} in the session",
                    step.as_str()
                )
            }
            Self::MissingSessionFragment { key } => {
                write!(f, "Session fragment '{key}' is missing")
            }
            Self::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {msg}"),
            Self::NotFound { resource, id } => write!(f, "{resource} '{id}' not found"),
            Self::NoChange { message, .. } => write!(f, "{message}"),
            Self::OwnedByStatusFlow { flow, office_code } => {
                write!(
                    f,
                    "The contract manager for office {office_code} is set by the {} status",
                    flow.as_str()
                )
            }
            Self::ProviderData(err) => write!(f, "{err}"),
            Self::Session(msg) => write!(f, "Session error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<ProviderDataError> for CoreError {
    fn from(err: ProviderDataError) -> Self {
        Self::ProviderData(err)
    }
}
