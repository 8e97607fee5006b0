// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod commit;
mod contract_manager;
mod details;
mod error;
mod flash;
mod head_office;
mod liaison;
mod offices;
mod search;
mod session;
mod status;
mod wizard;

#[cfg(test)]
mod tests;

pub use commit::{CommitOutcome, SUCCESS_MESSAGE, commit_new_provider};
pub use contract_manager::{
    ContractManagerDirectory, ContractManagerRoute, DIRECTORY_KEY, DIRECTORY_PER_PAGE,
    DirectoryRemoval, SELECT_CONTRACT_MANAGER_MESSAGE, assign_contract_manager,
    contract_manager_route,
};
pub use details::{LspDetails, change_advocate_details, change_firm_name, change_lsp_details};
pub use error::CoreError;
pub use flash::{Flash, FlashCategory};
pub use head_office::{ReassignmentOutcome, reassign_head_office};
pub use liaison::{LiaisonChangeOutcome, LiaisonManagerDetails, change_liaison_manager};
pub use offices::{
    BANK_ACCOUNTS_PER_PAGE, NEW_OFFICE_KEY, NewOfficeFragment, NewOfficeOutcome,
    add_bank_account, assign_bank_account, change_office_vat, change_payment_method,
    commit_new_office, load_new_office, search_firm_bank_accounts, start_new_office,
};
pub use search::{
    CHAMBERS_PER_PAGE, PROVIDERS_PER_PAGE, Page, assign_chambers, paginate, require_chambers,
    search_chambers, search_providers,
};
pub use session::{
    DEFAULT_IDLE_TIMEOUT, GLOBAL_SCOPE, InMemorySessionStore, SessionStore, load, save,
};
pub use status::{
    BulkOutcome, FollowUp, StatusFlow, StatusOutcome, apply_hold_to_offices,
    apply_intervention_to_offices, remove_intervention_from_offices, set_firm_active,
    set_firm_debt_recovery, set_firm_false_balance, set_firm_hold_payments, set_firm_intervened,
    set_office_active, set_office_debt_recovery, set_office_false_balance,
    set_office_hold_payments, set_office_intervened,
};
pub use wizard::{
    ADVOCATE_KEY, BANK_ACCOUNT_KEY, BARRISTER_KEY, BankAccountFragment, ChildDetails,
    ChildFragment, HEAD_OFFICE_KEY, HeadOfficeFragment, LIAISON_MANAGER_KEY,
    OfficeContactDetails, PROVIDER_KEY, ProviderFragment, StepSubmission, WizardState,
    WizardStep, check_guard, child_key, next_step,
};
