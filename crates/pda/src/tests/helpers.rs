// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::MockProviderDataApi;
use mapd_domain::{Address, BankAccount, Contact, HeadOfficeRef, LIAISON_MANAGER_JOB_TITLE, Office};

pub fn create_test_mock() -> MockProviderDataApi {
    MockProviderDataApi::with_default_fixture().expect("bundled fixture should parse")
}

pub fn create_test_office() -> Office {
    Office::new(
        Address {
            address_line_1: String::from("5 Market Street"),
            city: String::from("Manchester"),
            postcode: String::from("M1 1AE"),
            ..Address::default()
        },
        HeadOfficeRef::IsHeadOffice,
    )
}

pub fn create_test_contact() -> Contact {
    Contact {
        contact_id: 0,
        vendor_site_id: 0,
        first_name: String::from("Jo"),
        last_name: String::from("Bloggs"),
        email_address: String::from("jo.bloggs@example.com"),
        telephone_number: None,
        website: None,
        job_title: Some(LIAISON_MANAGER_JOB_TITLE.to_string()),
        primary: true,
        creation_date: None,
        inactive_date: None,
    }
}

pub fn create_test_bank_account() -> BankAccount {
    BankAccount {
        bank_account_id: 0,
        vendor_site_id: 0,
        bank_account_name: String::from("New Client Account"),
        sort_code: String::from("112233"),
        account_number: String::from("11223344"),
        bank_name: None,
        primary: true,
        start_date: None,
        end_date: None,
    }
}
