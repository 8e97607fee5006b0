// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, GLOBAL_SCOPE, InMemorySessionStore, SessionStore, load, save};
use serde_json::json;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

const START: OffsetDateTime = datetime!(2026-03-14 09:00 UTC);

#[test]
fn test_idle_session_expires() {
    let mut store = InMemorySessionStore::new(Duration::minutes(30));
    store.set_at("a", "k", json!(1), START);

    assert_eq!(store.get_at("a", "k", START + Duration::minutes(29)), Some(json!(1)));
    // Reading refreshed the session.
    assert_eq!(store.get_at("a", "k", START + Duration::minutes(58)), Some(json!(1)));
    assert_eq!(store.get_at("a", "k", START + Duration::minutes(89)), None);
}

#[test]
fn test_global_scope_never_expires() {
    let mut store = InMemorySessionStore::new(Duration::minutes(30));
    store.set_at(GLOBAL_SCOPE, "k", json!("kept"), START);
    store.set_at("a", "k", json!("dropped"), START);

    let removed = store.purge_expired_at(START + Duration::hours(5));

    assert_eq!(removed, 1);
    assert_eq!(store.session_count(), 1);
    assert_eq!(
        store.get_at(GLOBAL_SCOPE, "k", START + Duration::days(2)),
        Some(json!("kept"))
    );
}

#[test]
fn test_sessions_are_isolated() {
    let mut store = InMemorySessionStore::default();
    store.set("a", "k", json!(1));

    assert_eq!(store.get("b", "k"), None);
    store.delete("a", "k");
    assert_eq!(store.get("a", "k"), None);
}

#[test]
fn test_last_write_wins() {
    let mut store = InMemorySessionStore::default();
    save(&mut store, "a", "k", &1_u32).unwrap();
    save(&mut store, "a", "k", &2_u32).unwrap();

    assert_eq!(load::<u32, _>(&mut store, "a", "k").unwrap(), Some(2));
}

#[test]
fn test_wrong_shape_is_a_session_error() {
    let mut store = InMemorySessionStore::default();
    store.set("a", "k", json!("not a number"));

    let err = load::<u32, _>(&mut store, "a", "k").unwrap_err();

    assert!(matches!(err, CoreError::Session(_)));
}
