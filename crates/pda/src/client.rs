// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Provider Data API surface consumed by the application.

use crate::error::ProviderDataError;
use mapd_domain::{
    AdvocateLevel, BankAccount, ConstitutionalStatus, Contact, ContractManager, Firm,
    HeadOfficeRef, Office, PaymentMethod, YesNo,
};
use time::Date;

/// Partial update of a firm.
///
/// `None` leaves a field untouched. For nullable fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirmPatch {
    pub firm_name: Option<String>,
    pub parent_firm_id: Option<Option<i64>>,
    pub constitutional_status: Option<ConstitutionalStatus>,
    pub company_house_number: Option<Option<String>>,
    pub indemnity_received_date: Option<Option<Date>>,
    pub inactive_date: Option<Option<Date>>,
    pub hold_all_payments: Option<bool>,
    pub hold_reason: Option<Option<String>>,
    pub advocate_level: Option<AdvocateLevel>,
    pub bar_council_roll: Option<String>,
    pub solicitor_advocate: Option<YesNo>,
}

impl FirmPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update of an office. Same `None` / `Some(None)` convention as [`FirmPatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficePatch {
    pub head_office: Option<HeadOfficeRef>,
    pub contract_manager: Option<ContractManager>,
    pub inactive_date: Option<Option<Date>>,
    pub hold_all_payments: Option<bool>,
    pub hold_reason: Option<Option<String>>,
    pub intervened_date: Option<Option<Date>>,
    pub payment_method: Option<PaymentMethod>,
    pub vat_registration_number: Option<Option<String>>,
}

impl OfficePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// CRUD access to firms, offices, contacts and bank accounts.
///
/// Every call is a single blocking request. Reads of missing resources
/// return `None` or an empty list; writes against missing resources fail
/// with `ProviderDataError::NotFound`.
pub trait ProviderDataClient {
    /// Fetches a firm by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_provider_firm(&self, firm_id: i64) -> Result<Option<Firm>, ProviderDataError>;

    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_all_provider_firms(&self) -> Result<Vec<Firm>, ProviderDataError>;

    /// Creates a firm. The API assigns `firm_id` and `firm_number`; any id on
    /// the input is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the firm.
    fn create_provider_firm(&mut self, firm: Firm) -> Result<Firm, ProviderDataError>;

    /// # Errors
    ///
    /// Returns an error if the firm does not exist or the API rejects the patch.
    fn patch_provider_firm(
        &mut self,
        firm_id: i64,
        patch: &FirmPatch,
    ) -> Result<Firm, ProviderDataError>;

    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_provider_offices(&self, firm_id: i64) -> Result<Vec<Office>, ProviderDataError>;

    /// Returns the office of the firm flagged as head office.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_head_office(&self, firm_id: i64) -> Result<Option<Office>, ProviderDataError> {
        let offices: Vec<Office> = self.get_provider_offices(firm_id)?;
        Ok(offices.into_iter().find(Office::is_head_office))
    }

    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_provider_office(&self, office_code: &str) -> Result<Option<Office>, ProviderDataError>;

    /// Creates an office for a firm. The API assigns `firm_office_id` and a
    /// unique `firm_office_code`.
    ///
    /// # Errors
    ///
    /// Returns an error if the firm does not exist or the API rejects the office.
    fn create_provider_office(
        &mut self,
        office: Office,
        firm_id: i64,
    ) -> Result<Office, ProviderDataError>;

    /// # Errors
    ///
    /// Returns an error if the office does not exist or the API rejects the patch.
    fn patch_office(
        &mut self,
        firm_id: i64,
        office_code: &str,
        patch: &OfficePatch,
    ) -> Result<Office, ProviderDataError>;

    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_office_contacts(
        &self,
        firm_id: i64,
        office_code: &str,
    ) -> Result<Vec<Contact>, ProviderDataError>;

    /// # Errors
    ///
    /// Returns an error if the office does not exist or the API rejects the contact.
    fn create_office_contact(
        &mut self,
        firm_id: i64,
        office_code: &str,
        contact: Contact,
    ) -> Result<Contact, ProviderDataError>;

    /// Replaces an existing contact, matched by `contact_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the contact does not exist or the API rejects the update.
    fn update_contact(
        &mut self,
        firm_id: i64,
        office_code: &str,
        contact: Contact,
    ) -> Result<Contact, ProviderDataError>;

    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_office_bank_accounts(
        &self,
        firm_id: i64,
        office_code: &str,
    ) -> Result<Vec<BankAccount>, ProviderDataError>;

    /// Every bank account held by any office of the firm.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    fn get_provider_firm_bank_accounts(
        &self,
        firm_id: i64,
    ) -> Result<Vec<BankAccount>, ProviderDataError>;

    /// Adds a primary bank account to an office, ending the previous primary.
    ///
    /// # Errors
    ///
    /// Returns an error if the office does not exist or the API rejects the account.
    fn create_office_bank_account(
        &mut self,
        firm_id: i64,
        office_code: &str,
        account: BankAccount,
    ) -> Result<BankAccount, ProviderDataError>;

    /// Copies an existing bank account of the firm onto another office as its primary.
    ///
    /// # Errors
    ///
    /// Returns an error if the office or account does not exist.
    fn assign_bank_account_to_office(
        &mut self,
        firm_id: i64,
        office_code: &str,
        bank_account_id: i64,
    ) -> Result<BankAccount, ProviderDataError>;
}
