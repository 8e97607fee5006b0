// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mapd::FollowUp;
use mapd_domain::{ContractManager, Office};
use mapd_pda::{MockProviderDataApi, ProviderDataClient};
use time::macros::date;

use crate::tests::helpers::{create_test_client, date_input, field_errors, has_field_error, today};
use crate::{
    ActiveStatusRequest, ApiError, HoldPaymentsRequest, InterventionRequest,
    OfficeSelectionRequest, YesNoRequest, apply_hold_to_offices, apply_intervention_to_offices,
    remove_intervention_from_offices, set_firm_active, set_firm_debt_recovery,
    set_firm_false_balance, set_firm_hold_payments, set_office_active, set_office_debt_recovery,
    set_office_false_balance, set_office_hold_payments, set_office_intervened,
};

fn office(client: &MockProviderDataApi, code: &str) -> Office {
    client.get_provider_office(code).unwrap().unwrap()
}

fn status(value: &str) -> ActiveStatusRequest {
    ActiveStatusRequest {
        status: String::from(value),
    }
}

fn answer(value: &str) -> YesNoRequest {
    YesNoRequest {
        answer: String::from(value),
    }
}

fn hold(value: &str, reason: &str) -> HoldPaymentsRequest {
    HoldPaymentsRequest {
        answer: String::from(value),
        hold_reason: String::from(reason),
    }
}

#[test]
fn test_inactive_firm_sets_todays_date_on_every_office() {
    let mut client: MockProviderDataApi = create_test_client();

    let response = set_firm_active(&mut client, 1, &status("inactive"), today()).unwrap();

    assert_eq!(response.updated.inactive_date, Some(today()));
    for code in ["1A001L", "1A002L"] {
        assert_eq!(office(&client, code).inactive_date, Some(today()));
    }
    assert!(response.redirect.is_none());
}

#[test]
fn test_same_status_twice_is_a_validation_error() {
    let mut client: MockProviderDataApi = create_test_client();

    let err = set_firm_active(&mut client, 1, &status("active"), today()).unwrap_err();

    assert!(has_field_error(err, "status"));
}

#[test]
fn test_status_must_be_chosen() {
    let mut client: MockProviderDataApi = create_test_client();

    let err = set_office_active(&mut client, 1, "1A002L", &status(""), today()).unwrap_err();

    assert_eq!(field_errors(err)[0].message, "Select active or inactive");
}

#[test]
fn test_reactivated_office_keeps_its_payment_hold() {
    let mut client: MockProviderDataApi = create_test_client();
    set_office_active(&mut client, 1, "1A002L", &status("inactive"), today()).unwrap();

    let response =
        set_office_active(&mut client, 1, "1A002L", &status("active"), today()).unwrap();

    assert!(response.updated.inactive_date.is_none());
    assert!(response.updated.hold_all_payments);
}

#[test]
fn test_head_office_hold_redirects_to_sibling_selection() {
    let mut client: MockProviderDataApi = create_test_client();

    let response =
        set_office_hold_payments(&mut client, 1, "1A001L", &hold("yes", "Audit")).unwrap();

    assert!(response.updated.hold_all_payments);
    assert_eq!(
        response.follow_up,
        Some(FollowUp::ApplyHoldToOffices {
            candidates: vec![String::from("1A002L")],
        })
    );
    assert_eq!(
        response.redirect.as_deref(),
        Some("/provider/1/offices/hold-payments")
    );
}

#[test]
fn test_hold_needs_a_reason() {
    let mut client: MockProviderDataApi = create_test_client();

    let err = set_firm_hold_payments(&mut client, 1, &hold("yes", "   ")).unwrap_err();

    assert!(has_field_error(err, "hold_reason"));
}

#[test]
fn test_bulk_hold_applies_to_selected_offices() {
    let mut client: MockProviderDataApi = create_test_client();
    let request: OfficeSelectionRequest = OfficeSelectionRequest {
        office_codes: vec![String::from("1A002L"), String::from("9Z999Z")],
        hold_reason: String::from("Audit"),
        ..OfficeSelectionRequest::default()
    };

    let response = apply_hold_to_offices(&mut client, 1, &request).unwrap();

    assert_eq!(response.updated, vec![String::from("1A002L")]);
    assert_eq!(response.flashes.len(), 1);
    assert!(office(&client, "1A002L").hold_all_payments);
}

#[test]
fn test_bulk_hold_with_no_selection_updates_nothing() {
    let mut client: MockProviderDataApi = create_test_client();
    let request: OfficeSelectionRequest = OfficeSelectionRequest {
        hold_reason: String::from("Audit"),
        ..OfficeSelectionRequest::default()
    };

    let response = apply_hold_to_offices(&mut client, 1, &request).unwrap();

    assert!(response.updated.is_empty());
}

#[test]
fn test_intervention_needs_a_date() {
    let mut client: MockProviderDataApi = create_test_client();
    let request: InterventionRequest = InterventionRequest {
        answer: String::from("yes"),
        ..InterventionRequest::default()
    };

    let err = set_office_intervened(&mut client, 1, "1A001L", &request, today()).unwrap_err();

    assert!(has_field_error(err, "intervened_date"));
}

#[test]
fn test_intervention_round_trip_across_offices() {
    let mut client: MockProviderDataApi = create_test_client();
    let request: InterventionRequest = InterventionRequest {
        answer: String::from("yes"),
        intervened_date: date_input("10", "3", "2026"),
    };

    let response = set_office_intervened(&mut client, 1, "1A001L", &request, today()).unwrap();
    assert_eq!(response.updated.intervened_date, Some(date!(2026 - 03 - 10)));
    assert_eq!(
        response.redirect.as_deref(),
        Some("/provider/1/offices/intervene")
    );

    let bulk = apply_intervention_to_offices(
        &mut client,
        1,
        &OfficeSelectionRequest {
            office_codes: vec![String::from("1A002L")],
            intervened_date: date_input("10", "3", "2026"),
            ..OfficeSelectionRequest::default()
        },
        today(),
    )
    .unwrap();
    assert_eq!(bulk.updated, vec![String::from("1A002L")]);

    remove_intervention_from_offices(
        &mut client,
        1,
        &OfficeSelectionRequest {
            office_codes: vec![String::from("1A001L"), String::from("1A002L")],
            ..OfficeSelectionRequest::default()
        },
    )
    .unwrap();
    assert!(office(&client, "1A001L").intervened_date.is_none());
    assert!(office(&client, "1A002L").intervened_date.is_none());
}

#[test]
fn test_bulk_intervention_date_must_not_be_in_the_future() {
    let mut client: MockProviderDataApi = create_test_client();
    let request: OfficeSelectionRequest = OfficeSelectionRequest {
        office_codes: vec![String::from("1A002L")],
        intervened_date: date_input("1", "1", "2027"),
        ..OfficeSelectionRequest::default()
    };

    let err = apply_intervention_to_offices(&mut client, 1, &request, today()).unwrap_err();

    assert!(has_field_error(err, "intervened_date"));
}

#[test]
fn test_false_balance_applies_to_inactive_advocate_offices() {
    let mut client: MockProviderDataApi = create_test_client();

    let active = set_office_false_balance(&mut client, 3, "3C001B", &answer("yes"));
    assert!(matches!(active, Err(ApiError::PreconditionFailed { .. })));

    set_office_active(&mut client, 3, "3C001B", &status("inactive"), today()).unwrap();
    let response = set_firm_false_balance(&mut client, 3, &answer("yes")).unwrap();
    assert_eq!(
        response.updated.contract_manager,
        Some(ContractManager::FalseBalance)
    );
}

#[test]
fn test_firm_level_toggles_are_for_barristers_and_advocates() {
    let mut client: MockProviderDataApi = create_test_client();

    let result = set_firm_debt_recovery(&mut client, 1, &answer("yes"));

    assert!(matches!(result, Err(ApiError::PreconditionFailed { .. })));
}

#[test]
fn test_leaving_debt_recovery_redirects_to_contract_manager() {
    let mut client: MockProviderDataApi = create_test_client();
    set_office_debt_recovery(&mut client, 1, "1A001L", &answer("yes")).unwrap();

    let response = set_office_debt_recovery(&mut client, 1, "1A001L", &answer("no")).unwrap();

    assert_eq!(
        response.redirect.as_deref(),
        Some("/provider/1/office/1A001L/contract-manager")
    );
}

#[test]
fn test_yes_no_answer_is_required() {
    let mut client: MockProviderDataApi = create_test_client();

    let err = set_office_debt_recovery(&mut client, 1, "1A001L", &answer("maybe")).unwrap_err();

    assert!(has_field_error(err, "debt_recovery"));
}
