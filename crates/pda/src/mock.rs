// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory Provider Data API for local development and tests.
//!
//! Data is held as wire records and seeded from a JSON fixture. Patches go
//! through the same camelCase merge a real PATCH request would.

use crate::client::{FirmPatch, OfficePatch, ProviderDataClient};
use crate::error::ProviderDataError;
use crate::wire::{BankAccountRecord, ContactRecord, FirmRecord, OfficeRecord, merge_patch};
use mapd_domain::{BankAccount, Contact, Firm, Office};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::HashSet;
use std::path::Path;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

const DEFAULT_FIXTURE: &str = include_str!("../fixtures/providers.json");

/// Fixture file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockData {
    #[serde(default)]
    pub firms: Vec<FirmRecord>,
    #[serde(default)]
    pub offices: Vec<OfficeRecord>,
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
    #[serde(default)]
    pub bank_accounts: Vec<BankAccountRecord>,
}

/// In-memory implementation of [`ProviderDataClient`].
#[derive(Debug, Default)]
pub struct MockProviderDataApi {
    data: MockData,
    failing_offices: HashSet<String>,
    failing_operations: HashSet<String>,
    pending_read_failures: Cell<u32>,
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

/// Generates an office code shaped like `1A001L`.
fn random_office_code() -> String {
    let letter = |n: u32| char::from(b'A' + u8::try_from(n % 26).unwrap_or(0));
    format!(
        "{}{}{:03}{}",
        rand::random::<u32>() % 10,
        letter(rand::random::<u32>()),
        rand::random::<u32>() % 1000,
        letter(rand::random::<u32>()),
    )
}

impl MockProviderDataApi {
    /// Creates an empty mock.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a mock seeded with the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns `ProviderDataError::InvalidData` if the bundled fixture does not parse.
    pub fn with_default_fixture() -> Result<Self, ProviderDataError> {
        Self::from_fixture_str(DEFAULT_FIXTURE)
    }

    /// Creates a mock seeded from fixture JSON.
    ///
    /// # Errors
    ///
    /// Returns `ProviderDataError::InvalidData` if the JSON is not a valid fixture.
    pub fn from_fixture_str(json: &str) -> Result<Self, ProviderDataError> {
        let data: MockData =
            serde_json::from_str(json).map_err(|e| ProviderDataError::InvalidData(e.to_string()))?;
        info!(
            firms = data.firms.len(),
            offices = data.offices.len(),
            contacts = data.contacts.len(),
            bank_accounts = data.bank_accounts.len(),
            "Loaded mock provider data"
        );
        Ok(Self {
            data,
            ..Self::default()
        })
    }

    /// Creates a mock seeded from a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `ProviderDataError::InvalidData` if the file cannot be read or parsed.
    pub fn from_fixture_file(path: &Path) -> Result<Self, ProviderDataError> {
        let json: String = std::fs::read_to_string(path).map_err(|e| {
            ProviderDataError::InvalidData(format!("{}: {e}", path.display()))
        })?;
        Self::from_fixture_str(&json)
    }

    /// Makes every subsequent write that targets `office_code` fail.
    pub fn fail_writes_for_office(&mut self, office_code: &str) {
        self.failing_offices.insert(office_code.to_string());
    }

    /// Makes every subsequent call of the named write operation fail, such
    /// as `"create_office_bank_account"`.
    pub fn fail_writes_for_operation(&mut self, operation: &str) {
        self.failing_operations.insert(operation.to_string());
    }

    /// Makes the next `count` reads fail with a connection error.
    pub fn fail_next_reads(&self, count: u32) {
        self.pending_read_failures.set(count);
    }

    /// The raw records, for inspection in tests.
    #[must_use]
    pub const fn data(&self) -> &MockData {
        &self.data
    }

    fn check_read(&self) -> Result<(), ProviderDataError> {
        let pending: u32 = self.pending_read_failures.get();
        if pending > 0 {
            self.pending_read_failures.set(pending - 1);
            return Err(ProviderDataError::Connection(String::from(
                "simulated connection failure",
            )));
        }
        Ok(())
    }

    fn check_operation(&self, operation: &str) -> Result<(), ProviderDataError> {
        if self.failing_operations.contains(operation) {
            return Err(ProviderDataError::Rejected(format!(
                "simulated failure for {operation}"
            )));
        }
        Ok(())
    }

    fn check_write(&self, operation: &str, office_code: &str) -> Result<(), ProviderDataError> {
        self.check_operation(operation)?;
        if self.failing_offices.contains(office_code) {
            return Err(ProviderDataError::Rejected(format!(
                "simulated failure for office {office_code}"
            )));
        }
        Ok(())
    }

    fn firm_exists(&self, firm_id: i64) -> bool {
        self.data.firms.iter().any(|f| f.firm_id == firm_id)
    }

    fn office_index(&self, firm_id: i64, office_code: &str) -> Result<usize, ProviderDataError> {
        self.data
            .offices
            .iter()
            .position(|o| o.firm_id == firm_id && o.firm_office_code == office_code)
            .ok_or_else(|| ProviderDataError::NotFound {
                resource: "Office",
                id: office_code.to_string(),
            })
    }

    fn office_id(&self, firm_id: i64, office_code: &str) -> Option<i64> {
        self.data
            .offices
            .iter()
            .find(|o| o.firm_id == firm_id && o.firm_office_code == office_code)
            .map(|o| o.firm_office_id)
    }

    fn unique_office_code(&self) -> String {
        loop {
            let code: String = random_office_code();
            if !self
                .data
                .offices
                .iter()
                .any(|o| o.firm_office_code == code)
            {
                return code;
            }
        }
    }

    /// Ends the current primary account of an office ahead of a new one.
    fn demote_primary_accounts(&mut self, vendor_site_id: i64) {
        let end: Date = today();
        for account in &mut self.data.bank_accounts {
            if account.vendor_site_id == vendor_site_id
                && account.primary_flag == "Y"
                && account.end_date.is_none()
            {
                account.primary_flag = String::from("N");
                account.end_date = Some(end);
            }
        }
    }

    fn insert_primary_account(
        &mut self,
        vendor_site_id: i64,
        mut record: BankAccountRecord,
    ) -> BankAccount {
        self.demote_primary_accounts(vendor_site_id);
        record.bank_account_id = next_id(self.data.bank_accounts.iter().map(|a| a.bank_account_id));
        record.vendor_site_id = vendor_site_id;
        record.primary_flag = String::from("Y");
        record.start_date = Some(today());
        record.end_date = None;
        self.data.bank_accounts.push(record.clone());
        BankAccount::from(record)
    }
}

impl ProviderDataClient for MockProviderDataApi {
    fn get_provider_firm(&self, firm_id: i64) -> Result<Option<Firm>, ProviderDataError> {
        self.check_read()?;
        self.data
            .firms
            .iter()
            .find(|f| f.firm_id == firm_id)
            .cloned()
            .map(Firm::try_from)
            .transpose()
    }

    fn get_all_provider_firms(&self) -> Result<Vec<Firm>, ProviderDataError> {
        self.check_read()?;
        self.data
            .firms
            .iter()
            .cloned()
            .map(Firm::try_from)
            .collect()
    }

    fn create_provider_firm(&mut self, firm: Firm) -> Result<Firm, ProviderDataError> {
        self.check_operation("create_provider_firm")?;
        if firm.firm_name.trim().is_empty() {
            return Err(ProviderDataError::InvalidArgument(String::from(
                "firmName is required",
            )));
        }
        let mut record: FirmRecord = FirmRecord::from(&firm);
        record.firm_id = next_id(self.data.firms.iter().map(|f| f.firm_id));
        record.firm_number = record.firm_id.to_string();
        info!(firm_id = record.firm_id, firm_type = %record.firm_type, "Mock created firm");
        self.data.firms.push(record.clone());
        Firm::try_from(record)
    }

    fn patch_provider_firm(
        &mut self,
        firm_id: i64,
        patch: &FirmPatch,
    ) -> Result<Firm, ProviderDataError> {
        self.check_operation("patch_provider_firm")?;
        let index: usize = self
            .data
            .firms
            .iter()
            .position(|f| f.firm_id == firm_id)
            .ok_or_else(|| ProviderDataError::NotFound {
                resource: "Firm",
                id: firm_id.to_string(),
            })?;
        let updated: FirmRecord = merge_patch(&self.data.firms[index], &patch.to_wire())?;
        let firm: Firm = Firm::try_from(updated.clone())?;
        self.data.firms[index] = updated;
        debug!(firm_id, "Mock patched firm");
        Ok(firm)
    }

    fn get_provider_offices(&self, firm_id: i64) -> Result<Vec<Office>, ProviderDataError> {
        self.check_read()?;
        self.data
            .offices
            .iter()
            .filter(|o| o.firm_id == firm_id)
            .cloned()
            .map(OfficeRecord::into_office)
            .collect()
    }

    fn get_provider_office(&self, office_code: &str) -> Result<Option<Office>, ProviderDataError> {
        self.check_read()?;
        self.data
            .offices
            .iter()
            .find(|o| o.firm_office_code == office_code)
            .cloned()
            .map(OfficeRecord::into_office)
            .transpose()
    }

    fn create_provider_office(
        &mut self,
        office: Office,
        firm_id: i64,
    ) -> Result<Office, ProviderDataError> {
        if !self.firm_exists(firm_id) {
            return Err(ProviderDataError::NotFound {
                resource: "Firm",
                id: firm_id.to_string(),
            });
        }
        self.check_operation("create_provider_office")?;
        let mut record: OfficeRecord = OfficeRecord::from_office(&office, firm_id);
        record.firm_office_id = next_id(self.data.offices.iter().map(|o| o.firm_office_id));
        record.firm_office_code = self.unique_office_code();
        record.creation_date = Some(today());
        info!(
            firm_id,
            office_code = %record.firm_office_code,
            "Mock created office"
        );
        self.data.offices.push(record.clone());
        record.into_office()
    }

    fn patch_office(
        &mut self,
        firm_id: i64,
        office_code: &str,
        patch: &OfficePatch,
    ) -> Result<Office, ProviderDataError> {
        let index: usize = self.office_index(firm_id, office_code)?;
        self.check_write("patch_office", office_code)?;
        let updated: OfficeRecord = merge_patch(&self.data.offices[index], &patch.to_wire())?;
        let office: Office = updated.clone().into_office()?;
        self.data.offices[index] = updated;
        debug!(firm_id, office_code, "Mock patched office");
        Ok(office)
    }

    fn get_office_contacts(
        &self,
        firm_id: i64,
        office_code: &str,
    ) -> Result<Vec<Contact>, ProviderDataError> {
        self.check_read()?;
        let Some(office_id) = self.office_id(firm_id, office_code) else {
            return Ok(Vec::new());
        };
        Ok(self
            .data
            .contacts
            .iter()
            .filter(|c| c.vendor_site_id == office_id)
            .cloned()
            .map(Contact::from)
            .collect())
    }

    fn create_office_contact(
        &mut self,
        firm_id: i64,
        office_code: &str,
        contact: Contact,
    ) -> Result<Contact, ProviderDataError> {
        let index: usize = self.office_index(firm_id, office_code)?;
        self.check_write("create_office_contact", office_code)?;
        let mut record: ContactRecord = ContactRecord::from(&contact);
        record.contact_id = next_id(self.data.contacts.iter().map(|c| c.contact_id));
        record.vendor_site_id = self.data.offices[index].firm_office_id;
        if record.creation_date.is_none() {
            record.creation_date = Some(today());
        }
        self.data.contacts.push(record.clone());
        Ok(Contact::from(record))
    }

    fn update_contact(
        &mut self,
        firm_id: i64,
        office_code: &str,
        contact: Contact,
    ) -> Result<Contact, ProviderDataError> {
        self.office_index(firm_id, office_code)?;
        self.check_write("update_contact", office_code)?;
        let existing: &mut ContactRecord = self
            .data
            .contacts
            .iter_mut()
            .find(|c| c.contact_id == contact.contact_id)
            .ok_or_else(|| ProviderDataError::NotFound {
                resource: "Contact",
                id: contact.contact_id.to_string(),
            })?;
        *existing = ContactRecord::from(&contact);
        Ok(contact)
    }

    fn get_office_bank_accounts(
        &self,
        firm_id: i64,
        office_code: &str,
    ) -> Result<Vec<BankAccount>, ProviderDataError> {
        self.check_read()?;
        let Some(office_id) = self.office_id(firm_id, office_code) else {
            return Ok(Vec::new());
        };
        Ok(self
            .data
            .bank_accounts
            .iter()
            .filter(|a| a.vendor_site_id == office_id)
            .cloned()
            .map(BankAccount::from)
            .collect())
    }

    fn get_provider_firm_bank_accounts(
        &self,
        firm_id: i64,
    ) -> Result<Vec<BankAccount>, ProviderDataError> {
        self.check_read()?;
        let office_ids: HashSet<i64> = self
            .data
            .offices
            .iter()
            .filter(|o| o.firm_id == firm_id)
            .map(|o| o.firm_office_id)
            .collect();
        Ok(self
            .data
            .bank_accounts
            .iter()
            .filter(|a| office_ids.contains(&a.vendor_site_id))
            .cloned()
            .map(BankAccount::from)
            .collect())
    }

    fn create_office_bank_account(
        &mut self,
        firm_id: i64,
        office_code: &str,
        account: BankAccount,
    ) -> Result<BankAccount, ProviderDataError> {
        let index: usize = self.office_index(firm_id, office_code)?;
        self.check_write("create_office_bank_account", office_code)?;
        let office_id: i64 = self.data.offices[index].firm_office_id;
        let created: BankAccount =
            self.insert_primary_account(office_id, BankAccountRecord::from(&account));
        info!(
            firm_id,
            office_code,
            bank_account_id = created.bank_account_id,
            "Mock created bank account"
        );
        Ok(created)
    }

    fn assign_bank_account_to_office(
        &mut self,
        firm_id: i64,
        office_code: &str,
        bank_account_id: i64,
    ) -> Result<BankAccount, ProviderDataError> {
        let index: usize = self.office_index(firm_id, office_code)?;
        self.check_write("assign_bank_account_to_office", office_code)?;
        let office_id: i64 = self.data.offices[index].firm_office_id;
        let source: BankAccountRecord = self
            .data
            .bank_accounts
            .iter()
            .find(|a| a.bank_account_id == bank_account_id)
            .cloned()
            .ok_or_else(|| ProviderDataError::NotFound {
                resource: "Bank account",
                id: bank_account_id.to_string(),
            })?;
        Ok(self.insert_primary_account(office_id, source))
    }
}
