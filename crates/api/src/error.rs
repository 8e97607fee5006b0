// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use mapd::CoreError;
use mapd_domain::DomainError;
use mapd_pda::ProviderDataError;
use serde::Serialize;
use tracing::error;

/// A message shown next to one form field.
///
/// The field `form` is used for messages that belong to the form as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The form field the message belongs to.
    pub field: String,
    /// The user-facing message.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The submitted form failed validation and should be shown again.
    ValidationFailed {
        /// One entry per failing field.
        errors: Vec<FieldError>,
    },
    /// The request is not allowed in the current state. The user has to
    /// start the flow again.
    PreconditionFailed {
        /// A description of the failed precondition.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The Provider Data API call the request exists for failed.
    UpstreamFailure {
        /// The form-level message.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Shorthand for a single field validation failure.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ValidationFailed { errors } => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            Self::PreconditionFailed { message } => write!(f, "Bad request: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::UpstreamFailure { message } => write!(f, "{message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidField { field, message } => ApiError::invalid_field(field, message),
        DomainError::UnknownValue { kind, value } => {
            ApiError::invalid_field("form", format!("'{value}' is not a valid {kind}"))
        }
        DomainError::InvalidParent { reason, .. } => {
            ApiError::invalid_field("parent_firm_id", reason)
        }
        DomainError::AlreadyHeadOffice { office_code } => ApiError::invalid_field(
            "office_code",
            format!("Office {office_code} is already the head office"),
        ),
        err @ DomainError::NotApplicableToFirmType { .. } => ApiError::PreconditionFailed {
            message: err.to_string(),
        },
        err @ (DomainError::HeadOfficeCount { .. }
        | DomainError::MultipleLiaisonManagers { .. }
        | DomainError::MultiplePrimaryBankAccounts { .. }) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// A failed Provider Data API call is logged here, since this is where the
/// request gives up on it.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoChange { field, message } => ApiError::invalid_field(field, message),
        err @ (CoreError::MissingWizardState { .. }
        | CoreError::MissingSessionFragment { .. }
        | CoreError::UnsupportedOperation(_)
        | CoreError::OwnedByStatusFlow { .. }) => ApiError::PreconditionFailed {
            message: err.to_string(),
        },
        CoreError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: format!("{resource} '{id}' does not exist"),
        },
        CoreError::ProviderData(provider_err) => translate_provider_error(&provider_err),
        CoreError::Session(msg) => ApiError::Internal {
            message: format!("Session error: {msg}"),
        },
    }
}

fn translate_provider_error(err: &ProviderDataError) -> ApiError {
    error!(error = %err, kind = err.kind(), "Provider Data API call failed");
    match err {
        ProviderDataError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: (*resource).to_string(),
            message: format!("{resource} '{id}' does not exist"),
        },
        _ => ApiError::UpstreamFailure {
            message: format!("The change could not be saved: {err}"),
        },
    }
}
