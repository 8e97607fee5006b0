// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_client, create_test_liaison_manager, today};
use crate::{CoreError, change_liaison_manager};
use mapd_domain::{Contact, check_single_liaison_manager};
use mapd_pda::{MockProviderDataApi, ProviderDataClient};

fn contacts(client: &MockProviderDataApi, firm_id: i64, code: &str) -> Vec<Contact> {
    client.get_office_contacts(firm_id, code).unwrap()
}

fn current_liaison_manager(client: &MockProviderDataApi, firm_id: i64, code: &str) -> Contact {
    let contacts = contacts(client, firm_id, code);
    check_single_liaison_manager(code, &contacts).unwrap();
    contacts
        .into_iter()
        .find(Contact::is_active_liaison_manager)
        .unwrap()
}

#[test]
fn test_firm_wide_change_updates_every_office() {
    let mut client = create_test_client();
    let details = create_test_liaison_manager();

    let outcome = change_liaison_manager(&mut client, 1, None, &details, today()).unwrap();

    assert_eq!(outcome.updated_offices, vec!["1A001L", "1A002L"]);
    assert!(outcome.flashes.is_empty());
    for code in ["1A001L", "1A002L"] {
        let current = current_liaison_manager(&client, 1, code);
        assert_eq!(current.full_name(), "Amira Khan");
        assert_eq!(current.creation_date, Some(today()));
    }
    let representative = outcome.representative.unwrap();
    let head_office = client.get_head_office(1).unwrap().unwrap();
    assert!(
        contacts(&client, 1, &head_office.firm_office_code)
            .iter()
            .any(|c| c.contact_id == representative.contact_id)
    );
}

#[test]
fn test_previous_manager_is_kept_but_superseded() {
    let mut client = create_test_client();

    change_liaison_manager(&mut client, 1, Some("1A002L"), &create_test_liaison_manager(), today())
        .unwrap();

    let old = contacts(&client, 1, "1A002L")
        .into_iter()
        .find(|c| c.contact_id == 2)
        .unwrap();
    assert!(!old.primary);
    assert_eq!(old.inactive_date, Some(today()));
    assert_eq!(current_liaison_manager(&client, 1, "1A001L").contact_id, 1);
}

#[test]
fn test_other_contacts_are_untouched() {
    let mut client = create_test_client();

    change_liaison_manager(&mut client, 2, None, &create_test_liaison_manager(), today()).unwrap();

    let clerk = contacts(&client, 2, "2B001C")
        .into_iter()
        .find(|c| c.contact_id == 4)
        .unwrap();
    assert_eq!(clerk.inactive_date, None);
}

#[test]
fn test_failure_on_one_office_does_not_stop_the_rest() {
    let mut client = create_test_client();
    client.fail_writes_for_office("1A001L");

    let outcome =
        change_liaison_manager(&mut client, 1, None, &create_test_liaison_manager(), today())
            .unwrap();

    assert_eq!(outcome.updated_offices, vec!["1A002L"]);
    assert_eq!(outcome.flashes.len(), 1);
    assert!(outcome.flashes[0].message.contains("1A001L"));
    assert_eq!(current_liaison_manager(&client, 1, "1A001L").contact_id, 1);
    assert_eq!(outcome.representative.unwrap().first_name, "Amira");
}

#[test]
fn test_unknown_office_is_not_found() {
    let mut client = create_test_client();

    let err = change_liaison_manager(
        &mut client,
        1,
        Some("5E001C"),
        &create_test_liaison_manager(),
        today(),
    )
    .unwrap_err();

    assert!(matches!(err, CoreError::NotFound { .. }));
}
