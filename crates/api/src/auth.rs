// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization.
//!
//! Users log in with a shared password. A second, optional password grants
//! the `MAPD.Admin` role, which is needed to maintain the contract manager
//! directory. The login state lives in the session store next to the wizard
//! fragments, so it expires with the session.

use crate::error::AuthError;
use mapd::{GLOBAL_SCOPE, SessionStore, load, save};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Session key set once the user has logged in.
pub const AUTHENTICATED_KEY: &str = "authenticated";
/// Session key holding the logged-in user's role.
pub const ROLE_KEY: &str = "role";
/// Session key marking an id the server handed out.
pub const ISSUED_KEY: &str = "issued";

const SESSION_ID_LENGTH: usize = 32;

/// Roles an authenticated user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Caseworkers maintaining provider data.
    ///
    /// Users may run every provider, office and status flow.
    User,
    /// `MAPD.Admin`: users who may also maintain the contract manager directory.
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "MAPD.User",
            Self::Admin => "MAPD.Admin",
        }
    }
}

/// An authenticated user, identified by their session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The session the user is logged in with.
    pub id: String,
    /// The role assigned at login.
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// Login configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// Password granting the `MAPD.User` role.
    pub password: Option<String>,
    /// Password granting the `MAPD.Admin` role.
    pub admin_password: Option<String>,
    /// Disables the login guard. Every request then acts as an admin.
    pub skip_auth: bool,
}

/// Compares two secrets without stopping at the first mismatch.
fn secrets_match(expected: &str, supplied: &str) -> bool {
    let (expected, supplied) = (expected.as_bytes(), supplied.as_bytes());
    expected.len() == supplied.len()
        && expected
            .iter()
            .zip(supplied)
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Authentication service for session-based login.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Generates a new random session id.
    #[must_use]
    pub fn new_session_id() -> String {
        format!("{:016x}{:016x}", rand::random::<u64>(), rand::random::<u64>())
    }

    /// Generates a session id and records it as issued.
    pub fn issue_session<S: SessionStore + ?Sized>(store: &mut S) -> String {
        let session_id: String = Self::new_session_id();
        store.set(&session_id, ISSUED_KEY, Value::Bool(true));
        debug!("Issued new session");
        session_id
    }

    /// Whether `session_id` was handed out by [`Self::issue_session`] and
    /// has not expired since.
    ///
    /// The global scope and ids of any other shape are never accepted.
    pub fn is_issued_session<S: SessionStore + ?Sized>(store: &mut S, session_id: &str) -> bool {
        session_id != GLOBAL_SCOPE
            && session_id.len() == SESSION_ID_LENGTH
            && session_id
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            && store.get(session_id, ISSUED_KEY).is_some()
    }

    /// Resolves the role a password grants.
    ///
    /// # Errors
    ///
    /// Returns an error if no password is configured or the password does
    /// not match.
    pub fn verify_password(config: &AuthConfig, password: &str) -> Result<Role, AuthError> {
        let matches = |candidate: Option<&String>| {
            candidate.is_some_and(|expected| secrets_match(expected, password))
        };

        if matches(config.admin_password.as_ref()) {
            Ok(Role::Admin)
        } else if matches(config.password.as_ref()) {
            Ok(Role::User)
        } else {
            warn!("Login rejected");
            Err(AuthError::AuthenticationFailed {
                reason: String::from("The password is incorrect"),
            })
        }
    }

    /// Records a login with `role` in the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the login cannot be stored.
    pub fn record_login<S: SessionStore + ?Sized>(
        store: &mut S,
        session_id: &str,
        role: Role,
    ) -> Result<AuthenticatedActor, AuthError> {
        save(store, session_id, AUTHENTICATED_KEY, &true).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: e.to_string(),
            }
        })?;
        save(store, session_id, ROLE_KEY, &role).map_err(|e| AuthError::AuthenticationFailed {
            reason: e.to_string(),
        })?;

        info!(role = role.as_str(), "User logged in");
        Ok(AuthenticatedActor::new(session_id.to_string(), role))
    }

    /// Removes the login from the session.
    pub fn logout<S: SessionStore + ?Sized>(store: &mut S, session_id: &str) {
        store.delete(session_id, AUTHENTICATED_KEY);
        store.delete(session_id, ROLE_KEY);
    }

    /// Resolves the actor behind a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session has not logged in, or has expired.
    pub fn authenticate<S: SessionStore + ?Sized>(
        config: &AuthConfig,
        store: &mut S,
        session_id: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        if config.skip_auth {
            return Ok(AuthenticatedActor::new(session_id.to_string(), Role::Admin));
        }

        let not_logged_in = || AuthError::AuthenticationFailed {
            reason: String::from("You must log in to continue"),
        };
        let authenticated: bool = load::<bool, S>(store, session_id, AUTHENTICATED_KEY)
            .map_err(|_| not_logged_in())?
            .unwrap_or(false);
        if !authenticated {
            return Err(not_logged_in());
        }
        let role: Role = load::<Role, S>(store, session_id, ROLE_KEY)
            .map_err(|_| not_logged_in())?
            .unwrap_or(Role::User);

        Ok(AuthenticatedActor::new(session_id.to_string(), role))
    }
}

/// Authorization service for checking role-based permissions.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may add or remove contract manager names.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_manage_contract_managers(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Unauthorized {
                action: String::from("manage_contract_managers"),
                required_role: String::from(Role::Admin.as_str()),
            }),
        }
    }
}
