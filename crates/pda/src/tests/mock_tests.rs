// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_bank_account, create_test_contact, create_test_mock, create_test_office,
};
use crate::{FirmPatch, MockProviderDataApi, OfficePatch, ProviderDataClient, ProviderDataError};
use mapd_domain::{
    BankAccount, ContractManager, Firm, FirmType, HeadOfficeRef, Office, PaymentMethod,
    check_single_head_office, check_single_primary_bank_account,
};

fn is_office_code_shape(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    chars.len() == 6
        && chars[0].is_ascii_digit()
        && chars[1].is_ascii_uppercase()
        && chars[2..5].iter().all(char::is_ascii_digit)
        && chars[5].is_ascii_uppercase()
}

#[test]
fn test_fixture_loads_typed_entities() {
    let mock: MockProviderDataApi = create_test_mock();

    let chambers: Firm = mock.get_provider_firm(2).unwrap().unwrap();
    assert_eq!(chambers.firm_type, FirmType::Chambers);
    assert_eq!(chambers.parent_firm_id, None);

    let barrister: Firm = mock.get_provider_firm(3).unwrap().unwrap();
    assert_eq!(barrister.parent_firm_id, Some(2));

    let head: Office = mock.get_head_office(1).unwrap().unwrap();
    assert_eq!(head.firm_office_code, "1A001L");
    assert_eq!(
        head.contract_manager,
        Some(ContractManager::Named(String::from("Alice Carter")))
    );
}

#[test]
fn test_reads_of_missing_resources_are_empty() {
    let mock: MockProviderDataApi = create_test_mock();
    assert!(mock.get_provider_firm(999).unwrap().is_none());
    assert!(mock.get_provider_offices(999).unwrap().is_empty());
    assert!(mock.get_provider_office("9Z999Z").unwrap().is_none());
    assert!(mock.get_office_contacts(1, "9Z999Z").unwrap().is_empty());
    assert!(mock.get_head_office(999).unwrap().is_none());
}

#[test]
fn test_create_firm_assigns_next_id_and_ignores_input_id() {
    let mut mock: MockProviderDataApi = create_test_mock();
    let mut firm: Firm = Firm::new("New Firm", FirmType::LegalServicesProvider);
    firm.firm_id = 42;

    let created: Firm = mock.create_provider_firm(firm).unwrap();

    assert_eq!(created.firm_id, 6);
    assert_eq!(mock.get_provider_firm(6).unwrap().unwrap().firm_name, "New Firm");
    assert!(mock.get_provider_firm(42).unwrap().is_none());
}

#[test]
fn test_create_office_generates_unique_code() {
    let mut mock: MockProviderDataApi = create_test_mock();

    let first: Office = mock.create_provider_office(create_test_office(), 5).unwrap();
    let second: Office = mock.create_provider_office(create_test_office(), 5).unwrap();

    assert!(is_office_code_shape(&first.firm_office_code));
    assert_ne!(first.firm_office_code, second.firm_office_code);
    assert_ne!(first.firm_office_id, second.firm_office_id);
    assert!(first.creation_date.is_some());
}

#[test]
fn test_create_office_for_missing_firm_fails() {
    let mut mock: MockProviderDataApi = create_test_mock();
    let result = mock.create_provider_office(create_test_office(), 999);
    assert!(matches!(result, Err(ProviderDataError::NotFound { .. })));
}

#[test]
fn test_patch_office_merges_fields() {
    let mut mock: MockProviderDataApi = create_test_mock();
    let patch: OfficePatch = OfficePatch {
        head_office: Some(HeadOfficeRef::Branch(String::from("1A002L"))),
        payment_method: Some(PaymentMethod::Cheque),
        vat_registration_number: Some(None),
        ..OfficePatch::default()
    };

    let updated: Office = mock.patch_office(1, "1A001L", &patch).unwrap();

    assert_eq!(
        updated.head_office,
        HeadOfficeRef::Branch(String::from("1A002L"))
    );
    assert_eq!(updated.payment_method, Some(PaymentMethod::Cheque));
    assert_eq!(updated.vat_registration_number, None);
    assert_eq!(updated.address.city, "London");
}

#[test]
fn test_patch_office_of_other_firm_is_not_found() {
    let mut mock: MockProviderDataApi = create_test_mock();
    let result = mock.patch_office(2, "1A001L", &OfficePatch::default());
    assert!(matches!(result, Err(ProviderDataError::NotFound { .. })));
}

#[test]
fn test_patch_firm() {
    let mut mock: MockProviderDataApi = create_test_mock();
    let patch: FirmPatch = FirmPatch {
        firm_name: Some(String::from("Renamed")),
        hold_all_payments: Some(true),
        hold_reason: Some(Some(String::from("Audit"))),
        ..FirmPatch::default()
    };

    let updated: Firm = mock.patch_provider_firm(1, &patch).unwrap();

    assert_eq!(updated.firm_name, "Renamed");
    assert!(updated.hold_all_payments);
    assert_eq!(updated.hold_reason.as_deref(), Some("Audit"));
}

#[test]
fn test_contact_create_and_update() {
    let mut mock: MockProviderDataApi = create_test_mock();

    let created = mock
        .create_office_contact(5, "5E001C", create_test_contact())
        .unwrap();
    assert_eq!(created.vendor_site_id, 6);
    assert!(created.contact_id > 4);

    let mut superseded = created.clone();
    superseded.primary = false;
    mock.update_contact(5, "5E001C", superseded).unwrap();

    let contacts = mock.get_office_contacts(5, "5E001C").unwrap();
    assert_eq!(contacts.len(), 1);
    assert!(!contacts[0].primary);
}

#[test]
fn test_update_missing_contact_fails() {
    let mut mock: MockProviderDataApi = create_test_mock();
    let mut contact = create_test_contact();
    contact.contact_id = 999;
    assert!(mock.update_contact(1, "1A001L", contact).is_err());
}

#[test]
fn test_new_bank_account_demotes_previous_primary() {
    let mut mock: MockProviderDataApi = create_test_mock();

    let created: BankAccount = mock
        .create_office_bank_account(1, "1A001L", create_test_bank_account())
        .unwrap();

    let accounts: Vec<BankAccount> = mock.get_office_bank_accounts(1, "1A001L").unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(check_single_primary_bank_account("1A001L", &accounts).is_ok());
    let old: &BankAccount = accounts.iter().find(|a| a.bank_account_id == 1).unwrap();
    assert!(!old.primary);
    assert!(old.end_date.is_some());
    assert!(created.is_active_primary());
    assert_eq!(created.vendor_site_id, 1);
}

#[test]
fn test_assign_bank_account_copies_record_to_office() {
    let mut mock: MockProviderDataApi = create_test_mock();

    let assigned: BankAccount = mock.assign_bank_account_to_office(1, "1A002L", 1).unwrap();

    assert_ne!(assigned.bank_account_id, 1);
    assert_eq!(assigned.vendor_site_id, 2);
    assert_eq!(assigned.sort_code, "309430");
    assert_eq!(mock.get_provider_firm_bank_accounts(1).unwrap().len(), 2);
    // The source account is untouched.
    let source = mock.get_office_bank_accounts(1, "1A001L").unwrap();
    assert!(source[0].is_active_primary());
}

#[test]
fn test_injected_office_failure_rejects_writes() {
    let mut mock: MockProviderDataApi = create_test_mock();
    mock.fail_writes_for_office("1A002L");

    let result = mock.patch_office(1, "1A002L", &OfficePatch::default());

    assert!(matches!(result, Err(ProviderDataError::Rejected(_))));
    assert!(mock.patch_office(1, "1A001L", &OfficePatch::default()).is_ok());
}

#[test]
fn test_injected_operation_failure_targets_new_offices() {
    let mut mock: MockProviderDataApi = create_test_mock();
    mock.fail_writes_for_operation("create_office_bank_account");

    let office: Office = mock.create_provider_office(create_test_office(), 1).unwrap();
    let result = mock.create_office_bank_account(
        1,
        &office.firm_office_code,
        create_test_bank_account(),
    );

    assert!(matches!(result, Err(ProviderDataError::Rejected(_))));
    assert!(
        mock.create_office_contact(1, &office.firm_office_code, create_test_contact())
            .is_ok()
    );
}

#[test]
fn test_injected_office_create_failure_leaves_offices_untouched() {
    let mut mock: MockProviderDataApi = create_test_mock();
    mock.fail_writes_for_operation("create_provider_office");
    let before: usize = mock.get_provider_offices(1).unwrap().len();

    let result = mock.create_provider_office(create_test_office(), 1);

    assert!(matches!(result, Err(ProviderDataError::Rejected(_))));
    assert_eq!(mock.get_provider_offices(1).unwrap().len(), before);
}

#[test]
fn test_fixture_has_one_head_office_per_firm() {
    let mock: MockProviderDataApi = create_test_mock();
    for firm in mock.get_all_provider_firms().unwrap() {
        let offices: Vec<Office> = mock.get_provider_offices(firm.firm_id).unwrap();
        assert!(check_single_head_office(firm.firm_id, &offices).is_ok());
    }
}
