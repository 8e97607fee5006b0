// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_client;
use crate::{CoreError, FlashCategory, reassign_head_office};
use mapd_domain::{DomainError, HeadOfficeRef, Office, check_single_head_office};
use mapd_pda::{MockProviderDataApi, ProviderDataClient};

fn head_office_of(client: &MockProviderDataApi, code: &str) -> HeadOfficeRef {
    client.get_provider_office(code).unwrap().unwrap().head_office
}

#[test]
fn test_reassignment_swaps_and_restores() {
    let mut client = create_test_client();
    let original: Vec<Office> = client.get_provider_offices(1).unwrap();

    let outcome = reassign_head_office(&mut client, 1, "1A002L").unwrap();

    assert!(outcome.flashes.is_empty());
    assert_eq!(outcome.head_office.unwrap().firm_office_code, "1A002L");
    assert_eq!(head_office_of(&client, "1A002L"), HeadOfficeRef::IsHeadOffice);
    assert_eq!(
        head_office_of(&client, "1A001L"),
        HeadOfficeRef::Branch(String::from("1A002L"))
    );
    check_single_head_office(1, &client.get_provider_offices(1).unwrap()).unwrap();

    reassign_head_office(&mut client, 1, "1A001L").unwrap();

    assert_eq!(client.get_provider_offices(1).unwrap(), original);
}

#[test]
fn test_chambers_have_no_head_office_to_move() {
    let mut client = create_test_client();

    let err = reassign_head_office(&mut client, 2, "2B001C").unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::NotApplicableToFirmType { .. })
    ));
}

#[test]
fn test_current_head_office_is_rejected() {
    let mut client = create_test_client();

    let err = reassign_head_office(&mut client, 1, "1A001L").unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::AlreadyHeadOffice {
            office_code: String::from("1A001L"),
        })
    );
}

#[test]
fn test_office_of_another_firm_is_not_found() {
    let mut client = create_test_client();

    let err = reassign_head_office(&mut client, 1, "3C001B").unwrap_err();

    assert!(matches!(err, CoreError::NotFound { .. }));
}

#[test]
fn test_failed_office_is_flashed_and_others_kept() {
    let mut client = create_test_client();
    client.fail_writes_for_office("1A001L");

    let outcome = reassign_head_office(&mut client, 1, "1A002L").unwrap();

    assert_eq!(outcome.flashes.len(), 1);
    assert_eq!(outcome.flashes[0].category, FlashCategory::Error);
    assert_eq!(outcome.flashes[0].message, "Failed to update office 1A001L");
    assert_eq!(head_office_of(&client, "1A002L"), HeadOfficeRef::IsHeadOffice);
    assert_eq!(head_office_of(&client, "1A001L"), HeadOfficeRef::IsHeadOffice);
}
