// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session key-value storage.
//!
//! Wizard fragments and other per-user state live here between requests,
//! scoped by session id. Entries expire after a period of inactivity.

use crate::error::CoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tracing::debug;

/// Scope for application-wide entries that are not tied to a browser session.
pub const GLOBAL_SCOPE: &str = "_global";

/// Idle timeout applied to browser sessions.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::minutes(30);

/// Key-value storage scoped by session id.
pub trait SessionStore {
    /// Returns the value stored under `key`, if any.
    fn get(&mut self, session_id: &str, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, session_id: &str, key: &str, value: Value);

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&mut self, session_id: &str, key: &str);
}

/// Reads and deserializes a value.
///
/// # Errors
///
/// Returns `CoreError::Session` if the stored value has the wrong shape.
pub fn load<T, S>(store: &mut S, session_id: &str, key: &str) -> Result<Option<T>, CoreError>
where
    T: DeserializeOwned,
    S: SessionStore + ?Sized,
{
    store
        .get(session_id, key)
        .map(|value| {
            serde_json::from_value(value).map_err(|e| CoreError::Session(format!("{key}: {e}")))
        })
        .transpose()
}

/// Serializes and stores a value.
///
/// # Errors
///
/// Returns `CoreError::Session` if the value cannot be serialized.
pub fn save<T, S>(store: &mut S, session_id: &str, key: &str, value: &T) -> Result<(), CoreError>
where
    T: Serialize,
    S: SessionStore + ?Sized,
{
    let value: Value =
        serde_json::to_value(value).map_err(|e| CoreError::Session(format!("{key}: {e}")))?;
    store.set(session_id, key, value);
    Ok(())
}

#[derive(Debug)]
struct SessionEntry {
    values: HashMap<String, Value>,
    last_seen: OffsetDateTime,
}

/// Process-local session store with an idle timeout.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: HashMap<String, SessionEntry>,
    idle_timeout: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            idle_timeout,
        }
    }

    fn is_expired(&self, session_id: &str, entry: &SessionEntry, now: OffsetDateTime) -> bool {
        session_id != GLOBAL_SCOPE && now - entry.last_seen > self.idle_timeout
    }

    /// [`SessionStore::get`] evaluated at `now`.
    pub fn get_at(&mut self, session_id: &str, key: &str, now: OffsetDateTime) -> Option<Value> {
        let expired: bool = self
            .sessions
            .get(session_id)
            .is_some_and(|entry| self.is_expired(session_id, entry, now));
        if expired {
            debug!(session_id, "Session expired");
            self.sessions.remove(session_id);
            return None;
        }
        let entry: &mut SessionEntry = self.sessions.get_mut(session_id)?;
        entry.last_seen = now;
        entry.values.get(key).cloned()
    }

    /// [`SessionStore::set`] evaluated at `now`.
    pub fn set_at(&mut self, session_id: &str, key: &str, value: Value, now: OffsetDateTime) {
        let expired: bool = self
            .sessions
            .get(session_id)
            .is_some_and(|entry| self.is_expired(session_id, entry, now));
        if expired {
            self.sessions.remove(session_id);
        }
        let entry: &mut SessionEntry =
            self.sessions
                .entry(session_id.to_string())
                .or_insert_with(|| SessionEntry {
                    values: HashMap::new(),
                    last_seen: now,
                });
        entry.last_seen = now;
        entry.values.insert(key.to_string(), value);
    }

    /// Drops every session idle for longer than the timeout.
    ///
    /// # Returns
    ///
    /// The number of sessions removed.
    pub fn purge_expired_at(&mut self, now: OffsetDateTime) -> usize {
        let before: usize = self.sessions.len();
        let timeout: Duration = self.idle_timeout;
        self.sessions
            .retain(|id, entry| id == GLOBAL_SCOPE || now - entry.last_seen <= timeout);
        before - self.sessions.len()
    }

    /// Number of live sessions, including the global scope.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&mut self, session_id: &str, key: &str) -> Option<Value> {
        self.get_at(session_id, key, OffsetDateTime::now_utc())
    }

    fn set(&mut self, session_id: &str, key: &str, value: Value) {
        self.set_at(session_id, key, value, OffsetDateTime::now_utc());
    }

    fn delete(&mut self, session_id: &str, key: &str) {
        if let Some(entry) = self.sessions.get_mut(session_id) {
            entry.values.remove(key);
        }
    }
}
