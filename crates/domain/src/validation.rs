// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation rules shared by every form.
//!
//! Each validator trims its input and returns the normalised value on
//! success. Failures carry the exact message shown next to the field.

use crate::error::DomainError;
use time::{Date, Month};

/// Requires a non-blank value.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` with `message` if the value is blank.
pub fn require(field: &'static str, value: &str, message: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_field(field, message));
    }
    Ok(trimmed.to_string())
}

/// Rejects values longer than `max` characters.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` with `message` if the value is too long.
pub fn check_max_length(
    field: &'static str,
    value: &str,
    max: usize,
    message: &str,
) -> Result<(), DomainError> {
    if value.trim().chars().count() > max {
        return Err(DomainError::invalid_field(field, message));
    }
    Ok(())
}

/// Required text with a length limit.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the value is blank or too long.
pub fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
    missing_message: &str,
    too_long_message: &str,
) -> Result<String, DomainError> {
    let value: String = require(field, value, missing_message)?;
    check_max_length(field, &value, max, too_long_message)?;
    Ok(value)
}

/// Optional text with a length limit. Blank input becomes `None`.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the value is too long.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
    too_long_message: &str,
) -> Result<Option<String>, DomainError> {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    check_max_length(field, trimmed, max, too_long_message)?;
    Ok(Some(trimmed.to_string()))
}

/// Validates a sort code, allowing spaces and hyphens as separators.
///
/// # Returns
///
/// The six digits with separators removed.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the value is blank or not six digits.
pub fn normalise_sort_code(value: &str) -> Result<String, DomainError> {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if digits.is_empty() {
        return Err(DomainError::invalid_field("sort_code", "Enter a sort code"));
    }
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::invalid_field(
            "sort_code",
            "Enter a valid sort code like 309430",
        ));
    }
    Ok(digits)
}

/// Validates a bank account number of 6 to 8 digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the value is blank or the wrong shape.
pub fn validate_account_number(value: &str) -> Result<String, DomainError> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Err(DomainError::invalid_field(
            "account_number",
            "Enter an account number",
        ));
    }
    if !(6..=8).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::invalid_field(
            "account_number",
            "Account number must be between 6 and 8 digits",
        ));
    }
    Ok(digits)
}

/// Validates a UK VAT registration number: nine digits with an optional `GB` prefix.
///
/// # Returns
///
/// The number in upper case with whitespace removed.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the value is blank or the wrong shape.
pub fn normalise_vat_number(value: &str) -> Result<String, DomainError> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    if compact.is_empty() {
        return Err(DomainError::invalid_field(
            "vat_registration_number",
            "Enter the VAT registration number",
        ));
    }
    let digits: &str = compact.strip_prefix("GB").unwrap_or(&compact);
    if digits.len() != 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::invalid_field(
            "vat_registration_number",
            "Enter the VAT registration number in the correct format",
        ));
    }
    Ok(compact)
}

/// Validates a Companies House number: eight digits, or two letters then six digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the value is the wrong shape.
pub fn normalise_companies_house_number(value: &str) -> Result<String, DomainError> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    let valid: bool = compact.len() == 8
        && compact.chars().enumerate().all(|(i, c)| {
            if i < 2 {
                c.is_ascii_digit() || c.is_ascii_uppercase()
            } else {
                c.is_ascii_digit()
            }
        })
        && (compact[..2].chars().all(|c| c.is_ascii_digit())
            || compact[..2].chars().all(|c| c.is_ascii_uppercase()));
    if !valid {
        return Err(DomainError::invalid_field(
            "company_house_number",
            "Enter a valid Companies House number",
        ));
    }
    Ok(compact)
}

/// Checks the general shape of a UK postcode, such as `SW1A 1AA` or `M1 1AE`.
#[must_use]
pub fn is_valid_postcode(value: &str) -> bool {
    let compact: Vec<char> = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !(5..=7).contains(&compact.len()) {
        return false;
    }
    let (outward, inward) = compact.split_at(compact.len() - 3);
    let inward_ok: bool = inward[0].is_ascii_digit()
        && inward[1].is_ascii_alphabetic()
        && inward[2].is_ascii_alphabetic();
    let outward_ok: bool = outward[0].is_ascii_alphabetic()
        && outward.iter().all(char::is_ascii_alphanumeric)
        && outward.iter().any(char::is_ascii_digit);
    inward_ok && outward_ok
}

/// Validates a required UK postcode.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if the value is blank, too long or malformed.
pub fn validate_postcode(value: &str) -> Result<String, DomainError> {
    let postcode: String = required_text(
        "postcode",
        value,
        20,
        "Enter the postcode",
        "Postcode must be 20 characters or less",
    )?;
    if !is_valid_postcode(&postcode) {
        return Err(DomainError::invalid_field(
            "postcode",
            "Enter a valid UK postcode",
        ));
    }
    Ok(postcode.to_ascii_uppercase())
}

/// Checks the general shape of an email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Validates an email address of at most 100 characters.
///
/// `missing_message` makes the field required; `None` makes it optional.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if a required value is blank, or the
/// value is too long or malformed.
pub fn validate_email(
    field: &'static str,
    value: &str,
    missing_message: Option<&str>,
) -> Result<Option<String>, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return match missing_message {
            Some(message) => Err(DomainError::invalid_field(field, message)),
            None => Ok(None),
        };
    }
    check_max_length(
        field,
        trimmed,
        100,
        "Email address must be 100 characters or less",
    )?;
    if !is_valid_email(trimmed) {
        return Err(DomainError::invalid_field(
            field,
            "Enter a valid email address",
        ));
    }
    Ok(Some(trimmed.to_string()))
}

/// Parses a date entered as separate day, month and year inputs.
///
/// Blank inputs count as missing. When every part is blank the result is
/// `Ok(None)` unless `required` is set.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` naming the missing parts, for a year
/// that is not four digits, or for a date that does not exist.
pub fn parse_date_parts(
    field: &'static str,
    day: &str,
    month: &str,
    year: &str,
    required: bool,
) -> Result<Option<Date>, DomainError> {
    let (day, month, year) = (day.trim(), month.trim(), year.trim());
    let missing: Vec<&str> = [("day", day), ("month", month), ("year", year)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

    match missing.as_slice() {
        [] => {}
        ["day", "month", "year"] if !required => return Ok(None),
        [only] => {
            return Err(DomainError::invalid_field(
                field,
                format!("Date must include a {only}"),
            ));
        }
        [first, second] => {
            return Err(DomainError::invalid_field(
                field,
                format!("Date must include a {first} and {second}"),
            ));
        }
        _ => {
            return Err(DomainError::invalid_field(
                field,
                "Date must include a day, month and year",
            ));
        }
    }

    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::invalid_field(
            field,
            "Year must include 4 numbers",
        ));
    }

    let not_real = || DomainError::invalid_field(field, "Date must be a real date");
    let year: i32 = year.parse().map_err(|_| not_real())?;
    let month: u8 = month.parse().map_err(|_| not_real())?;
    let day: u8 = day.parse().map_err(|_| not_real())?;
    let month: Month = Month::try_from(month).map_err(|_| not_real())?;
    let date: Date = Date::from_calendar_date(year, month, day).map_err(|_| not_real())?;
    Ok(Some(date))
}

/// Rejects dates after `today`.
///
/// # Errors
///
/// Returns `DomainError::InvalidField` if `date` is in the future.
pub fn check_not_future(field: &'static str, date: Date, today: Date) -> Result<(), DomainError> {
    if date > today {
        return Err(DomainError::invalid_field(
            field,
            "Date must be today or in the past",
        ));
    }
    Ok(())
}
