// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mapd_domain::{FirmType, PaymentMethod, YesNo};
use time::macros::date;

use crate::tests::helpers::{
    create_test_bank_request, create_test_contact_request, create_test_liaison_request,
    date_input, field_errors, today,
};
use crate::validation::{
    optional_past_date, required_past_date, validate_bank_account, validate_child_details,
    validate_contact_details, validate_liaison_manager, validate_payment_method,
    validate_search, validate_vat_number, yes_no,
};
use crate::{BankAccountRequest, ChildDetailsRequest, ContactDetailsRequest, DateInput};

#[test]
fn test_contact_details_collect_every_error_in_form_order() {
    let err = validate_contact_details(&ContactDetailsRequest::default()).unwrap_err();

    let fields: Vec<String> = field_errors(err).into_iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec!["address_line_1", "city", "postcode", "telephone_number"]
    );
}

#[test]
fn test_contact_details_trim_and_drop_blank_optionals() {
    let request: ContactDetailsRequest = ContactDetailsRequest {
        address_line_2: String::from("   "),
        postcode: String::from("bs1 3aa"),
        email_address: String::new(),
        ..create_test_contact_request()
    };

    let details = validate_contact_details(&request).unwrap();

    assert_eq!(details.address.address_line_2, None);
    assert_eq!(details.address.postcode, "BS1 3AA");
    assert_eq!(details.email_address, None);
}

#[test]
fn test_city_length_limit() {
    let request: ContactDetailsRequest = ContactDetailsRequest {
        city: "c".repeat(26),
        ..create_test_contact_request()
    };

    let errors = field_errors(validate_contact_details(&request).unwrap_err());

    assert_eq!(errors[0].message, "Town or city must be 25 characters or less");
}

#[test]
fn test_bank_account_normalises_sort_code() {
    let account = validate_bank_account(&create_test_bank_request()).unwrap();
    assert_eq!(account.sort_code, "203040");

    let err = validate_bank_account(&BankAccountRequest {
        sort_code: String::from("12-34"),
        ..create_test_bank_request()
    })
    .unwrap_err();
    assert_eq!(field_errors(err)[0].field, "sort_code");
}

#[test]
fn test_liaison_manager_email_is_checked() {
    let mut request = create_test_liaison_request();
    request.email_address = String::from("not-an-email");

    let errors = field_errors(validate_liaison_manager(&request).unwrap_err());

    assert_eq!(errors[0].field, "email_address");
    assert_eq!(errors[0].message, "Enter a valid email address");
}

#[test]
fn test_vat_number_is_optional_but_checked() {
    assert_eq!(validate_vat_number("  ").unwrap(), None);
    assert_eq!(
        validate_vat_number("gb 123 456 789").unwrap().as_deref(),
        Some("GB123456789")
    );
    assert!(validate_vat_number("123").is_err());
}

#[test]
fn test_solicitor_advocate_only_asked_of_advocates() {
    let request: ChildDetailsRequest = ChildDetailsRequest {
        advocate_level: String::from("pupil"),
        solicitor_advocate: String::from("yes"),
        ..ChildDetailsRequest::default()
    };

    let barrister = validate_child_details(&request, FirmType::Barrister).unwrap();
    assert_eq!(barrister.solicitor_advocate, None);

    let advocate = validate_child_details(&request, FirmType::Advocate).unwrap();
    assert_eq!(advocate.solicitor_advocate, Some(YesNo::Yes));
}

#[test]
fn test_payment_method_choice() {
    assert_eq!(validate_payment_method("EFT").unwrap(), PaymentMethod::Electronic);

    let errors = field_errors(validate_payment_method("").unwrap_err());
    assert_eq!(errors[0].message, "Select a payment method");
}

#[test]
fn test_yes_no_uses_the_given_message() {
    assert_eq!(yes_no("answer", "Y", "Pick one"), Ok(true));
    assert_eq!(yes_no("answer", "no", "Pick one"), Ok(false));
    assert!(yes_no("answer", "perhaps", "Pick one").is_err());
}

#[test]
fn test_dates_must_not_be_in_the_future() {
    assert_eq!(
        optional_past_date("date", &DateInput::default(), false, today()),
        Ok(None)
    );
    assert_eq!(
        required_past_date("date", &date_input("14", "3", "2026"), today()),
        Ok(date!(2026 - 03 - 14))
    );
    assert!(required_past_date("date", &date_input("15", "3", "2026"), today()).is_err());
    assert!(required_past_date("date", &DateInput::default(), today()).is_err());
}

#[test]
fn test_search_term_is_trimmed() {
    assert_eq!(validate_search("  smith ").unwrap(), "smith");
    assert_eq!(validate_search("").unwrap(), "");
}
