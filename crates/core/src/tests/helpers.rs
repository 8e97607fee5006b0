// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BankAccountFragment, ChildDetails, InMemorySessionStore, LiaisonManagerDetails,
    OfficeContactDetails, StepSubmission, WizardState,
};
use mapd_domain::{Address, AdvocateLevel, ConstitutionalStatus, FirmType};
use mapd_pda::MockProviderDataApi;
use time::Date;
use time::macros::date;

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

pub fn create_test_contact_details() -> OfficeContactDetails {
    OfficeContactDetails {
        address: Address {
            address_line_1: String::from("7 Castle Street"),
            city: String::from("Bristol"),
            postcode: String::from("BS1 3AA"),
            ..Address::default()
        },
        telephone_number: Some(String::from("0117 496 0000")),
        email_address: Some(String::from("office@castle.example")),
        dx_number: None,
        dx_centre: None,
    }
}

pub fn create_test_liaison_manager() -> LiaisonManagerDetails {
    LiaisonManagerDetails {
        first_name: String::from("Amira"),
        last_name: String::from("Khan"),
        email_address: String::from("amira.khan@castle.example"),
        telephone_number: None,
        website: None,
    }
}

pub fn create_test_bank_account() -> BankAccountFragment {
    BankAccountFragment {
        bank_account_name: String::from("Castle Law Client Account"),
        sort_code: String::from("203040"),
        account_number: String::from("55667788"),
    }
}

pub fn create_test_child_details() -> ChildDetails {
    ChildDetails {
        advocate_level: AdvocateLevel::Junior,
        bar_council_roll: Some(String::from("BC998877")),
        solicitor_advocate: None,
    }
}

/// Submits each step in order and saves the resulting state to the store.
pub fn run_wizard(store: &mut InMemorySessionStore, submissions: Vec<StepSubmission>) -> WizardState {
    let mut state: WizardState = WizardState::load(store, SESSION_ID).unwrap();
    for submission in submissions {
        state.submit(submission).unwrap();
    }
    state.save(store, SESSION_ID).unwrap();
    state
}

/// The minimal LSP journey, skipping every optional step.
pub fn lsp_minimal_steps() -> Vec<StepSubmission> {
    vec![
        StepSubmission::Provider {
            firm_name: String::from("Castle Law LLP"),
            firm_type: FirmType::LegalServicesProvider,
        },
        StepSubmission::LspDetails {
            constitutional_status: ConstitutionalStatus::Llp,
            company_house_number: None,
            indemnity_received_date: None,
        },
        StepSubmission::ContactDetails(create_test_contact_details()),
        StepSubmission::VatNumber(None),
        StepSubmission::SkipBankAccount,
        StepSubmission::LiaisonManager(create_test_liaison_manager()),
        StepSubmission::SkipContractManager,
    ]
}

pub fn chambers_steps() -> Vec<StepSubmission> {
    vec![
        StepSubmission::Provider {
            firm_name: String::from("Castle Chambers"),
            firm_type: FirmType::Chambers,
        },
        StepSubmission::ContactDetails(create_test_contact_details()),
        StepSubmission::LiaisonManager(create_test_liaison_manager()),
    ]
}

pub fn barrister_steps(parent_firm_id: i64, use_chambers_liaison_manager: bool) -> Vec<StepSubmission> {
    let mut steps: Vec<StepSubmission> = vec![
        StepSubmission::Provider {
            firm_name: String::from("Nadia Rahman"),
            firm_type: FirmType::Barrister,
        },
        StepSubmission::Chambers { parent_firm_id },
        StepSubmission::ChildDetails(create_test_child_details()),
        StepSubmission::LiaisonManagerCheck {
            use_chambers_liaison_manager,
        },
    ];
    if !use_chambers_liaison_manager {
        steps.push(StepSubmission::LiaisonManager(create_test_liaison_manager()));
    }
    steps
}
