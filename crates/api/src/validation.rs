// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Form validation.
//!
//! Each form is validated as a whole: every failing field contributes one
//! message and the typed value is only produced when none failed.

use crate::error::{ApiError, FieldError};
use crate::request_response::{
    BankAccountRequest, ChildDetailsRequest, ContactDetailsRequest, DateInput,
    LiaisonManagerRequest, LspDetailsRequest, ProviderRequest,
};
use mapd::{BankAccountFragment, ChildDetails, LiaisonManagerDetails, LspDetails, OfficeContactDetails};
use mapd_domain::{
    Address, AdvocateLevel, ConstitutionalStatus, DomainError, FirmType, PaymentMethod, YesNo,
    check_not_future, normalise_companies_house_number, normalise_sort_code,
    normalise_vat_number, optional_text, parse_date_parts, required_text,
    validate_account_number, validate_email, validate_postcode,
};
use time::Date;

pub const SEARCH_MAX_LENGTH: usize = 100;

/// Collects field errors while a form is validated.
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of a failed check and passes the value through.
    pub fn check<T>(&mut self, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(DomainError::InvalidField { field, message }) => {
                self.add(field, message);
                None
            }
            Err(other) => {
                self.add("form", other.to_string());
                None
            }
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Returns the validated value, or every collected error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` if any check failed.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ApiError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ApiError::ValidationFailed {
                errors: self.errors,
            }),
        }
    }
}

/// Parses a value from a closed set of choices.
fn choice<T>(
    field: &'static str,
    value: &str,
    message: &str,
    parse: impl Fn(&str) -> Result<T, DomainError>,
) -> Result<T, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_field(field, message));
    }
    parse(value).map_err(|_| DomainError::invalid_field(field, message))
}

/// Parses a required yes/no radio answer.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` with `message` if nothing valid was picked.
pub fn yes_no(field: &'static str, value: &str, message: &str) -> Result<bool, DomainError> {
    choice(field, value, message, YesNo::parse_str).map(|answer| answer.as_bool())
}

/// Parses an optional date that must not lie in the future.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` with the GOV.UK date messages.
pub fn optional_past_date(
    field: &'static str,
    input: &DateInput,
    required: bool,
    today: Date,
) -> Result<Option<Date>, DomainError> {
    let date: Option<Date> =
        parse_date_parts(field, &input.day, &input.month, &input.year, required)?;
    if let Some(date) = date {
        check_not_future(field, date, today)?;
    }
    Ok(date)
}

/// Parses a date that must be given and not lie in the future.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` with the GOV.UK date messages.
pub fn required_past_date(
    field: &'static str,
    input: &DateInput,
    today: Date,
) -> Result<Date, DomainError> {
    optional_past_date(field, input, true, today)?
        .ok_or_else(|| DomainError::invalid_field(field, "Date must include a day, month and year"))
}

/// # Errors
///
/// Returns `DomainError::InvalidField` if the name is blank or too long.
pub fn firm_name(value: &str) -> Result<String, DomainError> {
    required_text(
        "firm_name",
        value,
        255,
        "Enter the provider name",
        "Provider name must be 255 characters or less",
    )
}

/// Validates the first wizard step.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn validate_provider(request: &ProviderRequest) -> Result<(String, FirmType), ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let name: Option<String> = errors.check(firm_name(&request.firm_name));
    let firm_type: Option<FirmType> = errors.check(choice(
        "firm_type",
        &request.firm_type,
        "Select a provider type",
        FirmType::parse_str,
    ));
    errors.finish(name.zip(firm_type))
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn validate_lsp_details(
    request: &LspDetailsRequest,
    today: Date,
) -> Result<LspDetails, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let constitutional_status: Option<ConstitutionalStatus> = errors.check(choice(
        "constitutional_status",
        &request.constitutional_status,
        "Select a constitutional status",
        ConstitutionalStatus::parse_str,
    ));
    let company_house_number: Option<Option<String>> = errors.check(
        match request.company_house_number.trim() {
            "" => Ok(None),
            value => normalise_companies_house_number(value).map(Some),
        },
    );
    let indemnity_received_date: Option<Option<Date>> = errors.check(optional_past_date(
        "indemnity_received_date",
        &request.indemnity_received_date,
        false,
        today,
    ));

    errors.finish((|| {
        Some(LspDetails {
            constitutional_status: constitutional_status?,
            company_house_number: company_house_number?,
            indemnity_received_date: indemnity_received_date?,
        })
    })())
}

fn blank_to_none(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn validate_contact_details(
    request: &ContactDetailsRequest,
) -> Result<OfficeContactDetails, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let address_line_1 = errors.check(required_text(
        "address_line_1",
        &request.address_line_1,
        240,
        "Enter address line 1, typically the building and street",
        "Address line 1 must be 240 characters or less",
    ));
    let address_line_2 = errors.check(optional_text(
        "address_line_2",
        Some(request.address_line_2.as_str()),
        240,
        "Address line 2 must be 240 characters or less",
    ));
    let address_line_3 = errors.check(optional_text(
        "address_line_3",
        Some(request.address_line_3.as_str()),
        240,
        "Address line 3 must be 240 characters or less",
    ));
    let address_line_4 = errors.check(optional_text(
        "address_line_4",
        Some(request.address_line_4.as_str()),
        560,
        "Address line 4 must be 560 characters or less",
    ));
    let city = errors.check(required_text(
        "city",
        &request.city,
        25,
        "Enter the town or city",
        "Town or city must be 25 characters or less",
    ));
    let county = errors.check(optional_text(
        "county",
        Some(request.county.as_str()),
        150,
        "County must be 150 characters or less",
    ));
    let postcode = errors.check(validate_postcode(&request.postcode));
    let telephone_number = errors.check(required_text(
        "telephone_number",
        &request.telephone_number,
        20,
        "Enter the telephone number",
        "Telephone number must be 20 characters or less",
    ));
    let email_address = errors.check(validate_email("email_address", &request.email_address, None));
    let dx_number = errors.check(optional_text(
        "dx_number",
        blank_to_none(&request.dx_number),
        20,
        "DX number must be 20 characters or less",
    ));
    let dx_centre = errors.check(optional_text(
        "dx_centre",
        blank_to_none(&request.dx_centre),
        50,
        "DX centre must be 50 characters or less",
    ));

    errors.finish((|| {
        Some(OfficeContactDetails {
            address: Address {
                address_line_1: address_line_1?,
                address_line_2: address_line_2?,
                address_line_3: address_line_3?,
                address_line_4: address_line_4?,
                city: city?,
                county: county?,
                postcode: postcode?,
            },
            telephone_number: Some(telephone_number?),
            email_address: email_address?,
            dx_number: dx_number?,
            dx_centre: dx_centre?,
        })
    })())
}

/// A blank VAT number means the office is not VAT registered.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` if a value was given in the wrong format.
pub fn validate_vat_number(value: &str) -> Result<Option<String>, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let vat: Option<Option<String>> = errors.check(match value.trim() {
        "" => Ok(None),
        value => normalise_vat_number(value).map(Some),
    });
    errors.finish(vat)
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn validate_bank_account(request: &BankAccountRequest) -> Result<BankAccountFragment, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let bank_account_name = errors.check(required_text(
        "bank_account_name",
        &request.bank_account_name,
        100,
        "Enter the account name",
        "Account name must be 100 characters or less",
    ));
    let sort_code = errors.check(normalise_sort_code(&request.sort_code));
    let account_number = errors.check(validate_account_number(&request.account_number));

    errors.finish((|| {
        Some(BankAccountFragment {
            bank_account_name: bank_account_name?,
            sort_code: sort_code?,
            account_number: account_number?,
        })
    })())
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn validate_liaison_manager(
    request: &LiaisonManagerRequest,
) -> Result<LiaisonManagerDetails, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let first_name = errors.check(required_text(
        "first_name",
        &request.first_name,
        100,
        "Enter the first name",
        "First name must be 100 characters or less",
    ));
    let last_name = errors.check(required_text(
        "last_name",
        &request.last_name,
        100,
        "Enter the last name",
        "Last name must be 100 characters or less",
    ));
    let email_address = errors.check(validate_email(
        "email_address",
        &request.email_address,
        Some("Enter the email address"),
    ));
    let telephone_number = errors.check(optional_text(
        "telephone_number",
        Some(request.telephone_number.as_str()),
        20,
        "Telephone number must be 20 characters or less",
    ));
    let website = errors.check(optional_text(
        "website",
        Some(request.website.as_str()),
        255,
        "Website must be 255 characters or less",
    ));

    errors.finish((|| {
        Some(LiaisonManagerDetails {
            first_name: first_name?,
            last_name: last_name?,
            email_address: email_address??,
            telephone_number: telephone_number?,
            website: website?,
        })
    })())
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every failing field.
pub fn validate_child_details(
    request: &ChildDetailsRequest,
    firm_type: FirmType,
) -> Result<ChildDetails, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let advocate_level = errors.check(choice(
        "advocate_level",
        &request.advocate_level,
        "Select the advocate level",
        AdvocateLevel::parse_str,
    ));
    let bar_council_roll = errors.check(optional_text(
        "bar_council_roll",
        Some(request.bar_council_roll.as_str()),
        100,
        "Bar Council roll number must be 100 characters or less",
    ));
    let solicitor_advocate: Option<Option<YesNo>> = match firm_type {
        FirmType::Advocate => errors
            .check(choice(
                "solicitor_advocate",
                &request.solicitor_advocate,
                "Select yes if the advocate is a solicitor advocate",
                YesNo::parse_str,
            ))
            .map(Some),
        _ => Some(None),
    };

    errors.finish((|| {
        Some(ChildDetails {
            advocate_level: advocate_level?,
            bar_council_roll: bar_council_roll?,
            solicitor_advocate: solicitor_advocate?,
        })
    })())
}

/// # Errors
///
/// Returns `ApiError::ValidationFailed` if no payment method was picked.
pub fn validate_payment_method(value: &str) -> Result<PaymentMethod, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let method = errors.check(choice(
        "payment_method",
        value,
        "Select a payment method",
        PaymentMethod::parse_str,
    ));
    errors.finish(method)
}

/// Trims a search term and enforces its length limit.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` if the term is too long.
pub fn validate_search(value: &str) -> Result<String, ApiError> {
    let mut errors: FormErrors = FormErrors::new();
    let term = errors.check(optional_text(
        "search",
        Some(value),
        SEARCH_MAX_LENGTH,
        "Search term must be 100 characters or less",
    ));
    errors.finish(term.map(Option::unwrap_or_default))
}
