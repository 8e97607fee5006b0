// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use mapd::{ContractManagerDirectory, InMemorySessionStore};
use mapd_pda::MockProviderDataApi;
use time::Date;
use time::macros::date;

use crate::{
    ApiError, AuthConfig, AuthenticatedActor, BankAccountRequest, ContactDetailsRequest,
    DateInput, FieldError, LiaisonManagerRequest, ProviderRequest, Role,
};

pub const SESSION_ID: &str = "session-1";

pub const fn today() -> Date {
    date!(2026 - 03 - 14)
}

pub fn create_test_client() -> MockProviderDataApi {
    MockProviderDataApi::with_default_fixture().expect("bundled fixture should parse")
}

pub fn create_test_store() -> InMemorySessionStore {
    InMemorySessionStore::default()
}

/// A store whose contract manager directory holds two names.
pub fn create_test_store_with_directory() -> InMemorySessionStore {
    let mut store: InMemorySessionStore = create_test_store();
    let mut directory = ContractManagerDirectory::new(&mut store);
    directory.add("Alice Carter").unwrap();
    directory.add("Bob Hughes").unwrap();
    store
}

pub fn create_test_auth_config() -> AuthConfig {
    AuthConfig {
        password: Some(String::from("caseworker-secret")),
        admin_password: Some(String::from("admin-secret")),
        skip_auth: false,
    }
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from(SESSION_ID), Role::Admin)
}

pub fn create_test_user() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from(SESSION_ID), Role::User)
}

pub fn provider_request(firm_name: &str, firm_type: &str) -> ProviderRequest {
    ProviderRequest {
        firm_name: String::from(firm_name),
        firm_type: String::from(firm_type),
    }
}

pub fn date_input(day: &str, month: &str, year: &str) -> DateInput {
    DateInput {
        day: String::from(day),
        month: String::from(month),
        year: String::from(year),
    }
}

pub fn create_test_contact_request() -> ContactDetailsRequest {
    ContactDetailsRequest {
        address_line_1: String::from("7 Castle Street"),
        city: String::from("Bristol"),
        postcode: String::from("BS1 3AA"),
        telephone_number: String::from("0117 496 0000"),
        email_address: String::from("office@castle.example"),
        ..ContactDetailsRequest::default()
    }
}

pub fn create_test_liaison_request() -> LiaisonManagerRequest {
    LiaisonManagerRequest {
        first_name: String::from("Amira"),
        last_name: String::from("Khan"),
        email_address: String::from("amira.khan@castle.example"),
        ..LiaisonManagerRequest::default()
    }
}

pub fn create_test_bank_request() -> BankAccountRequest {
    BankAccountRequest {
        bank_account_name: String::from("Castle Law Client Account"),
        sort_code: String::from("20-30-40"),
        account_number: String::from("55667788"),
        skip: false,
    }
}

/// The field errors of a validation failure. Panics on any other error.
pub fn field_errors(err: ApiError) -> Vec<FieldError> {
    match err {
        ApiError::ValidationFailed { errors } => errors,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

pub fn has_field_error(err: ApiError, field: &str) -> bool {
    field_errors(err).iter().any(|e| e.field == field)
}
