// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session cookie middleware and authentication extractors.
//!
//! Every request is tied to a session through the `mapd_session` cookie.
//! The middleware only honours ids the server issued itself, handing out a
//! fresh one otherwise, and the extractors below resolve that id into the
//! logged-in user.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use mapd_api::{ApiError, AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::AppState;
use crate::error::HttpError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "mapd_session";

/// The session id of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

/// Reads the session id from the `Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Builds the `Set-Cookie` value carrying a session id.
pub fn session_cookie_header(session_id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .ok()
}

/// Attaches a session id to every request.
///
/// A cookie naming an id the server never issued, or one that has expired,
/// is ignored. In that case a new id is issued and returned to the browser
/// in a `Set-Cookie` header, unless the handler already set one.
pub async fn session_layer(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let presented: Option<String> = session_cookie(request.headers());
    let had_cookie: bool = presented.is_some();

    let mut sessions = app_state.sessions.lock().await;
    let existing: Option<String> = presented
        .filter(|id| AuthenticationService::is_issued_session(&mut *sessions, id));
    let issued: bool = existing.is_none();
    let session_id: String =
        existing.unwrap_or_else(|| AuthenticationService::issue_session(&mut *sessions));
    drop(sessions);

    if issued && had_cookie {
        debug!("Replacing unrecognised session cookie");
    }

    request
        .extensions_mut()
        .insert(SessionId(session_id.clone()));
    let mut response: Response = next.run(request).await;

    if issued
        && !response.headers().contains_key(header::SET_COOKIE)
        && let Some(value) = session_cookie_header(&session_id)
    {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Drops expired sessions.
///
/// Returns the number of sessions removed.
pub async fn purge_expired_sessions(app_state: &AppState) -> usize {
    let mut sessions = app_state.sessions.lock().await;
    let removed: usize = sessions.purge_expired_at(time::OffsetDateTime::now_utc());
    drop(sessions);
    if removed > 0 {
        debug!(removed, "Purged expired sessions");
    }
    removed
}

impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(SessionError::MissingSession)
    }
}

/// Extractor for logged-in users.
///
/// Resolves the session cookie into an `AuthenticatedActor`. Every route
/// apart from login and the health check takes one, so a request without
/// a login is rejected before its handler runs. When the server runs with
/// `--skip-auth` every session resolves to an admin.
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the session has not logged in, or has
/// been idle for longer than the session timeout.
pub struct SessionActor(pub AuthenticatedActor, pub SessionId);

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session: SessionId = SessionId::from_request_parts(parts, state).await?;

        let mut sessions = state.sessions.lock().await;
        let result = AuthenticationService::authenticate(&state.auth, &mut *sessions, &session.0);
        drop(sessions);

        match result {
            Ok(actor) => Ok(Self(actor, session)),
            Err(err) => {
                warn!(path = %parts.uri.path(), "Rejected request without a login");
                Err(SessionError::NotLoggedIn(ApiError::from(err)))
            }
        }
    }
}

/// Session rejection.
#[derive(Debug)]
pub enum SessionError {
    /// The session layer did not run for this route.
    MissingSession,
    /// The session has no login.
    NotLoggedIn(ApiError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSession => HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: String::from("No session attached to the request"),
                errors: Vec::new(),
            }
            .into_response(),
            Self::NotLoggedIn(err) => HttpError::from(err).into_response(),
        }
    }
}
