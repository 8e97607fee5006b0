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

mod error;
mod invariants;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use invariants::{
    check_parent_link, check_single_head_office, check_single_liaison_manager,
    check_single_primary_bank_account,
};
pub use types::{
    Address, AdvocateLevel, BankAccount, ConstitutionalStatus, Contact, ContractManager, Firm,
    FirmType, HEAD_OFFICE_SENTINEL, HeadOfficeRef, INACTIVE_HOLD_REASON,
    LIAISON_MANAGER_JOB_TITLE, Office, PaymentMethod, YesNo, iso_date,
};
pub use validation::{
    check_max_length, check_not_future, is_valid_email, is_valid_postcode,
    normalise_companies_house_number, normalise_sort_code, normalise_vat_number, optional_text,
    parse_date_parts, require, required_text, validate_account_number, validate_email,
    validate_postcode,
};
