// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mapd::InMemorySessionStore;
use mapd_domain::ContractManager;
use mapd_pda::MockProviderDataApi;

use crate::tests::helpers::{
    create_test_admin, create_test_client, create_test_store, create_test_store_with_directory,
    create_test_user, field_errors, has_field_error,
};
use crate::{
    ApiError, ContractManagerNameRequest, ContractManagerRemovalRequest, ContractManagerRequest,
    SearchQuery, YesNoRequest, add_contract_manager, assign_office_contract_manager,
    list_contract_managers, remove_contract_managers, set_office_debt_recovery,
};

fn choose(name: &str) -> ContractManagerRequest {
    ContractManagerRequest {
        contract_manager: String::from(name),
        skip: false,
    }
}

fn name_request(name: &str) -> ContractManagerNameRequest {
    ContractManagerNameRequest {
        name: String::from(name),
    }
}

#[test]
fn test_assign_directory_name_to_office() {
    let mut client: MockProviderDataApi = create_test_client();
    let mut store: InMemorySessionStore = create_test_store_with_directory();

    let response =
        assign_office_contract_manager(&mut client, &mut store, 1, "1A002L", &choose("Bob Hughes"))
            .unwrap();

    assert_eq!(
        response.office.contract_manager,
        Some(ContractManager::Named(String::from("Bob Hughes")))
    );
}

#[test]
fn test_assignment_needs_a_directory_entry() {
    let mut client: MockProviderDataApi = create_test_client();
    let mut store: InMemorySessionStore = create_test_store_with_directory();

    let err = assign_office_contract_manager(&mut client, &mut store, 1, "1A002L", &choose(""))
        .unwrap_err();

    assert!(has_field_error(err, "contract_manager"));
}

#[test]
fn test_status_owned_value_is_routed_to_its_flow() {
    let mut client: MockProviderDataApi = create_test_client();
    let mut store: InMemorySessionStore = create_test_store_with_directory();
    set_office_debt_recovery(
        &mut client,
        1,
        "1A001L",
        &YesNoRequest {
            answer: String::from("yes"),
        },
    )
    .unwrap();

    let result =
        assign_office_contract_manager(&mut client, &mut store, 1, "1A001L", &choose("Bob Hughes"));

    assert!(matches!(result, Err(ApiError::PreconditionFailed { .. })));
}

#[test]
fn test_list_filters_the_directory() {
    let mut store: InMemorySessionStore = create_test_store_with_directory();

    let response = list_contract_managers(
        &mut store,
        &SearchQuery {
            search: String::from("HUG"),
            page: None,
        },
    )
    .unwrap();

    assert_eq!(
        response.contract_managers.items,
        vec![String::from("Bob Hughes")]
    );
}

#[test]
fn test_admin_adds_and_removes_names() {
    let mut store: InMemorySessionStore = create_test_store();
    let admin = create_test_admin();

    let added = add_contract_manager(&admin, &mut store, &name_request("Cara Jones")).unwrap();
    assert_eq!(added.contract_managers.items, vec![String::from("Cara Jones")]);

    let duplicate = add_contract_manager(&admin, &mut store, &name_request("cara jones"))
        .unwrap_err();
    assert!(has_field_error(duplicate, "name"));

    let removed = remove_contract_managers(
        &admin,
        &mut store,
        &ContractManagerRemovalRequest {
            names: vec![String::from("Cara Jones")],
        },
    )
    .unwrap();
    assert_eq!(removed.contract_managers.total_count, 0);
}

#[test]
fn test_reserved_name_cannot_be_added() {
    let mut store: InMemorySessionStore = create_test_store();

    let err = add_contract_manager(&create_test_admin(), &mut store, &name_request("Mr ISD Default"))
        .unwrap_err();

    assert!(has_field_error(err, "name"));
}

#[test]
fn test_users_cannot_change_the_directory() {
    let mut store: InMemorySessionStore = create_test_store();

    let result = add_contract_manager(&create_test_user(), &mut store, &name_request("Cara Jones"));

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_removal_needs_a_selection() {
    let mut store: InMemorySessionStore = create_test_store_with_directory();

    let err = remove_contract_managers(
        &create_test_admin(),
        &mut store,
        &ContractManagerRemovalRequest::default(),
    )
    .unwrap_err();

    assert_eq!(
        field_errors(err)[0].message,
        "Select at least one contract manager to remove"
    );
}
