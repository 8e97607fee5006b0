// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_client, today};
use crate::{
    CoreError, FlashCategory, FollowUp, StatusFlow, apply_hold_to_offices,
    apply_intervention_to_offices, remove_intervention_from_offices, set_firm_active,
    set_firm_debt_recovery, set_firm_false_balance, set_firm_hold_payments, set_office_active,
    set_office_debt_recovery, set_office_false_balance, set_office_hold_payments,
    set_office_intervened,
};
use mapd_domain::{ContractManager, DomainError, INACTIVE_HOLD_REASON, Office};
use mapd_pda::{MockProviderDataApi, ProviderDataClient};
use time::macros::date;

fn office(client: &MockProviderDataApi, code: &str) -> Office {
    client.get_provider_office(code).unwrap().unwrap()
}

fn no_change_message(err: CoreError) -> String {
    match err {
        CoreError::NoChange { message, .. } => message,
        other => panic!("expected a no-change error, got {other:?}"),
    }
}

#[test]
fn test_inactive_firm_cascades_to_every_office() {
    let mut client = create_test_client();

    let outcome = set_firm_active(&mut client, 1, false, today()).unwrap();

    assert_eq!(outcome.updated.inactive_date, Some(today()));
    for code in ["1A001L", "1A002L"] {
        let office = office(&client, code);
        assert_eq!(office.inactive_date, Some(today()));
        assert!(office.hold_all_payments);
        assert_eq!(office.hold_reason.as_deref(), Some(INACTIVE_HOLD_REASON));
        assert_eq!(office.contract_manager, Some(ContractManager::Inactive));
    }
    assert_eq!(outcome.flashes[0].category, FlashCategory::Success);
}

#[test]
fn test_inactive_firm_leaves_already_inactive_offices_alone() {
    let mut client = create_test_client();
    let earlier = date!(2025 - 01 - 01);
    set_office_active(&mut client, 1, "1A002L", false, earlier).unwrap();

    set_firm_active(&mut client, 1, false, today()).unwrap();

    assert_eq!(office(&client, "1A002L").inactive_date, Some(earlier));
    assert_eq!(office(&client, "1A001L").inactive_date, Some(today()));
}

#[test]
fn test_reactivating_a_firm_does_not_touch_offices() {
    let mut client = create_test_client();
    set_firm_active(&mut client, 1, false, today()).unwrap();

    let outcome = set_firm_active(&mut client, 1, true, today()).unwrap();

    assert_eq!(outcome.updated.inactive_date, None);
    assert_eq!(office(&client, "1A001L").inactive_date, Some(today()));
}

#[test]
fn test_firm_cascade_failure_is_flashed_per_office() {
    let mut client = create_test_client();
    client.fail_writes_for_office("1A002L");

    let outcome = set_firm_active(&mut client, 1, false, today()).unwrap();

    assert_eq!(office(&client, "1A001L").inactive_date, Some(today()));
    assert_eq!(office(&client, "1A002L").inactive_date, None);
    let errors: Vec<_> = outcome
        .flashes
        .iter()
        .filter(|f| f.category == FlashCategory::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("1A002L"));
}

#[test]
fn test_same_status_is_rejected() {
    let mut client = create_test_client();

    let err = set_firm_active(&mut client, 1, true, today()).unwrap_err();
    assert!(no_change_message(err).contains("already active"));

    let err = set_office_active(&mut client, 1, "1A001L", true, today()).unwrap_err();
    assert!(matches!(err, CoreError::NoChange { field: "status", .. }));
}

#[test]
fn test_reactivated_office_keeps_its_hold() {
    let mut client = create_test_client();
    set_office_active(&mut client, 1, "1A002L", false, today()).unwrap();

    let outcome = set_office_active(&mut client, 1, "1A002L", true, today()).unwrap();

    assert_eq!(outcome.updated.inactive_date, None);
    assert!(outcome.updated.hold_all_payments);
    assert_eq!(outcome.updated.contract_manager, Some(ContractManager::Default));
}

#[test]
fn test_reactivated_office_keeps_a_named_manager() {
    let mut client = create_test_client();
    let patch = mapd_pda::OfficePatch {
        inactive_date: Some(Some(today())),
        ..mapd_pda::OfficePatch::default()
    };
    client.patch_office(1, "1A001L", &patch).unwrap();

    let outcome = set_office_active(&mut client, 1, "1A001L", true, today()).unwrap();

    assert_eq!(
        outcome.updated.contract_manager,
        Some(ContractManager::Named(String::from("Alice Carter")))
    );
}

#[test]
fn test_hold_needs_a_reason() {
    let mut client = create_test_client();

    let err = set_firm_hold_payments(&mut client, 1, true, Some("  ")).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::InvalidField {
            field: "hold_reason",
            ..
        })
    ));
}

#[test]
fn test_releasing_a_hold_clears_the_reason() {
    let mut client = create_test_client();
    set_firm_hold_payments(&mut client, 1, true, Some("Audit")).unwrap();

    let outcome = set_firm_hold_payments(&mut client, 1, false, None).unwrap();

    assert!(!outcome.updated.hold_all_payments);
    assert_eq!(outcome.updated.hold_reason, None);
}

#[test]
fn test_unchanged_hold_is_rejected_with_guidance() {
    let mut client = create_test_client();

    let err = set_office_hold_payments(&mut client, 1, "1A002L", false, None).unwrap_err();

    assert_eq!(
        no_change_message(err),
        "Select yes if payments to this office should be held. Cancel if you do not want to change the answer."
    );
}

#[test]
fn test_head_office_hold_offers_siblings() {
    let mut client = create_test_client();

    let outcome = set_office_hold_payments(&mut client, 1, "1A001L", true, Some("Audit")).unwrap();

    assert_eq!(
        outcome.follow_up,
        Some(FollowUp::ApplyHoldToOffices {
            candidates: vec![String::from("1A002L")],
        })
    );

    let bulk = apply_hold_to_offices(&mut client, 1, &[String::from("1A002L")], Some("Audit")).unwrap();
    assert_eq!(bulk.updated, vec![String::from("1A002L")]);
    assert!(office(&client, "1A002L").hold_all_payments);
}

#[test]
fn test_branch_hold_has_no_follow_up() {
    let mut client = create_test_client();

    let outcome = set_office_hold_payments(&mut client, 1, "1A002L", true, Some("Audit")).unwrap();

    assert_eq!(outcome.follow_up, None);
}

#[test]
fn test_bulk_apply_reports_unknown_and_failing_offices() {
    let mut client = create_test_client();
    client.fail_writes_for_office("1A002L");

    let bulk = apply_hold_to_offices(
        &mut client,
        1,
        &[String::from("1A002L"), String::from("2B001C")],
        Some("Audit"),
    )
    .unwrap();

    assert!(bulk.updated.is_empty());
    assert_eq!(bulk.flashes.len(), 2);
    assert!(!office(&client, "2B001C").hold_all_payments);
}

#[test]
fn test_intervention_needs_a_past_date() {
    let mut client = create_test_client();

    let missing = set_office_intervened(&mut client, 1, "1A001L", true, None, today());
    assert!(matches!(missing, Err(CoreError::DomainViolation(_))));

    let future = set_office_intervened(
        &mut client,
        1,
        "1A001L",
        true,
        Some(date!(2026 - 03 - 15)),
        today(),
    )
    .unwrap_err();
    assert_eq!(future.to_string(), "Date must be today or in the past");
}

#[test]
fn test_intervention_offers_siblings_both_ways() {
    let mut client = create_test_client();
    let when = date!(2026 - 03 - 01);

    let on = set_office_intervened(&mut client, 1, "1A001L", true, Some(when), today()).unwrap();
    assert_eq!(on.updated.intervened_date, Some(when));
    let Some(FollowUp::ApplyInterventionToOffices { candidates }) = on.follow_up else {
        panic!("expected an apply-intervention follow-up");
    };
    apply_intervention_to_offices(&mut client, 1, &candidates, when).unwrap();
    assert_eq!(office(&client, "1A002L").intervened_date, Some(when));

    let off = set_office_intervened(&mut client, 1, "1A001L", false, None, today()).unwrap();
    assert_eq!(off.updated.intervened_date, None);
    let Some(FollowUp::RemoveInterventionFromOffices { candidates }) = off.follow_up else {
        panic!("expected a remove-intervention follow-up");
    };
    remove_intervention_from_offices(&mut client, 1, &candidates).unwrap();
    assert_eq!(office(&client, "1A002L").intervened_date, None);
}

#[test]
fn test_false_balance_only_for_inactive_advocate_offices() {
    let mut client = create_test_client();

    let lsp = set_office_false_balance(&mut client, 1, "1A002L", true).unwrap_err();
    assert!(matches!(
        lsp,
        CoreError::DomainViolation(DomainError::NotApplicableToFirmType { .. })
    ));

    let active = set_office_false_balance(&mut client, 3, "3C001B", true).unwrap_err();
    assert!(matches!(active, CoreError::UnsupportedOperation(_)));

    set_office_active(&mut client, 3, "3C001B", false, today()).unwrap();
    let on = set_office_false_balance(&mut client, 3, "3C001B", true).unwrap();
    assert_eq!(on.updated.contract_manager, Some(ContractManager::FalseBalance));

    let off = set_firm_false_balance(&mut client, 3, false).unwrap();
    assert_eq!(off.updated.contract_manager, Some(ContractManager::Inactive));
}

#[test]
fn test_debt_recovery_round_trip_routes_to_assignment() {
    let mut client = create_test_client();

    let on = set_office_debt_recovery(&mut client, 1, "1A001L", true).unwrap();
    assert_eq!(on.updated.contract_manager, Some(ContractManager::DebtRecovery));
    assert_eq!(on.follow_up, None);

    let again = set_office_debt_recovery(&mut client, 1, "1A001L", true).unwrap_err();
    assert_eq!(
        no_change_message(again),
        "Select no if they are no longer referred to the Debt Recovery Unit. Cancel if you do not want to change the answer."
    );

    let off = set_office_debt_recovery(&mut client, 1, "1A001L", false).unwrap();
    assert_eq!(off.updated.contract_manager, Some(ContractManager::Default));
    assert_eq!(
        off.follow_up,
        Some(FollowUp::AssignContractManager {
            office_code: String::from("1A001L"),
        })
    );
}

#[test]
fn test_debt_recovery_needs_an_active_office() {
    let mut client = create_test_client();
    set_office_active(&mut client, 4, "4D001A", false, today()).unwrap();

    let err = set_firm_debt_recovery(&mut client, 4, true).unwrap_err();

    assert!(matches!(err, CoreError::UnsupportedOperation(_)));
}

#[test]
fn test_firm_level_toggles_are_for_advocates_only() {
    let mut client = create_test_client();

    let err = set_firm_debt_recovery(&mut client, 1, true).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::NotApplicableToFirmType { .. })
    ));
}

#[test]
fn test_flows_own_their_sentinels() {
    assert_eq!(
        StatusFlow::owning(&ContractManager::Inactive),
        Some(StatusFlow::ActiveStatus)
    );
    assert_eq!(
        StatusFlow::owning(&ContractManager::DebtRecovery),
        Some(StatusFlow::DebtRecovery)
    );
    assert_eq!(StatusFlow::owning(&ContractManager::Default), None);
}

#[test]
fn test_unknown_office_is_not_found() {
    let mut client = create_test_client();

    let err = set_office_active(&mut client, 1, "2B001C", false, today()).unwrap_err();

    assert!(matches!(err, CoreError::NotFound { resource: "Office", .. }));
}
