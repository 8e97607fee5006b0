// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Address, BankAccount, Contact, DomainError, Firm, FirmType, HeadOfficeRef,
    LIAISON_MANAGER_JOB_TITLE, Office, check_parent_link, check_single_head_office,
    check_single_liaison_manager, check_single_primary_bank_account,
};
use time::macros::date;

fn create_test_firm(firm_id: i64, firm_type: FirmType, parent: Option<i64>) -> Firm {
    let mut firm: Firm = Firm::new("Test Firm", firm_type);
    firm.firm_id = firm_id;
    firm.parent_firm_id = parent;
    firm
}

fn create_test_office(code: &str, head_office: HeadOfficeRef) -> Office {
    let mut office: Office = Office::new(Address::default(), head_office);
    office.firm_office_code = code.to_string();
    office
}

fn create_test_liaison_manager(contact_id: i64, primary: bool) -> Contact {
    Contact {
        contact_id,
        vendor_site_id: 1,
        first_name: String::from("Jo"),
        last_name: String::from("Bloggs"),
        email_address: String::from("jo@example.com"),
        telephone_number: None,
        website: None,
        job_title: Some(LIAISON_MANAGER_JOB_TITLE.to_string()),
        primary,
        creation_date: None,
        inactive_date: None,
    }
}

#[test]
fn test_barrister_under_chambers_is_valid() {
    let chambers: Firm = create_test_firm(2, FirmType::Chambers, None);
    let barrister: Firm = create_test_firm(5, FirmType::Barrister, Some(2));
    assert!(check_parent_link(&barrister, Some(&chambers)).is_ok());
    assert!(check_parent_link(&chambers, None).is_ok());
}

#[test]
fn test_barrister_under_lsp_is_invalid() {
    let lsp: Firm = create_test_firm(3, FirmType::LegalServicesProvider, None);
    let barrister: Firm = create_test_firm(5, FirmType::Barrister, Some(3));
    assert!(matches!(
        check_parent_link(&barrister, Some(&lsp)),
        Err(DomainError::InvalidParent { firm_id: 5, .. })
    ));
}

#[test]
fn test_parent_types_cannot_have_parents() {
    let chambers: Firm = create_test_firm(2, FirmType::Chambers, Some(1));
    assert!(check_parent_link(&chambers, None).is_err());
    let orphan: Firm = create_test_firm(6, FirmType::Advocate, None);
    assert!(check_parent_link(&orphan, None).is_err());
}

#[test]
fn test_single_head_office() {
    let offices: Vec<Office> = vec![
        create_test_office("1A001L", HeadOfficeRef::IsHeadOffice),
        create_test_office("1A002L", HeadOfficeRef::Branch(String::from("1A001L"))),
    ];
    assert!(check_single_head_office(1, &offices).is_ok());
    assert!(check_single_head_office(1, &[]).is_ok());

    let two_heads: Vec<Office> = vec![
        create_test_office("1A001L", HeadOfficeRef::IsHeadOffice),
        create_test_office("1A002L", HeadOfficeRef::IsHeadOffice),
    ];
    assert_eq!(
        check_single_head_office(1, &two_heads),
        Err(DomainError::HeadOfficeCount {
            firm_id: 1,
            count: 2
        })
    );
}

#[test]
fn test_superseded_liaison_manager_does_not_count() {
    let mut old: Contact = create_test_liaison_manager(1, false);
    old.inactive_date = Some(date!(2025 - 01 - 01));
    let new: Contact = create_test_liaison_manager(2, true);
    assert!(check_single_liaison_manager("1A001L", &[old, new.clone()]).is_ok());
    assert!(check_single_liaison_manager("1A001L", &[new.clone(), new]).is_err());
}

#[test]
fn test_single_primary_bank_account() {
    let account = |id: i64, primary: bool, ended: bool| BankAccount {
        bank_account_id: id,
        vendor_site_id: 1,
        bank_account_name: String::from("Client account"),
        sort_code: String::from("309430"),
        account_number: String::from("12345678"),
        bank_name: None,
        primary,
        start_date: None,
        end_date: ended.then_some(date!(2025 - 01 - 01)),
    };
    assert!(
        check_single_primary_bank_account("1A001L", &[account(1, true, true), account(2, true, false)])
            .is_ok()
    );
    assert!(
        check_single_primary_bank_account("1A001L", &[account(1, true, false), account(2, true, false)])
            .is_err()
    );
}
