// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bounded retry for reads.
//!
//! Reads are retried on transient failures with exponential backoff.
//! Writes pass straight through: retrying a create could duplicate records.

use crate::client::{FirmPatch, OfficePatch, ProviderDataClient};
use crate::error::ProviderDataError;
use mapd_domain::{BankAccount, Contact, Firm, Office};
use std::time::Duration;
use tracing::warn;

/// How many times to attempt a read and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each one after.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// A policy that retries without sleeping.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// Wraps a client and retries its reads.
///
/// The wait between attempts blocks the calling thread. Async callers
/// should run reads on a blocking pool.
#[derive(Debug)]
pub struct RetryingProviderData<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C> RetryingProviderData<C> {
    #[must_use]
    pub const fn new(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    pub const fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    fn read<T>(
        &self,
        operation: &'static str,
        call: impl Fn(&C) -> Result<T, ProviderDataError>,
    ) -> Result<T, ProviderDataError> {
        let mut attempt: u32 = 1;
        loop {
            match call(&self.inner) {
                Err(err) if err.is_transient() && attempt < self.policy.max_attempts => {
                    let delay: Duration = self.policy.delay_for(attempt);
                    warn!(
                        operation,
                        attempt,
                        error = %err,
                        kind = err.kind(),
                        "Transient Provider Data API failure, retrying"
                    );
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

impl<C: ProviderDataClient> ProviderDataClient for RetryingProviderData<C> {
    fn get_provider_firm(&self, firm_id: i64) -> Result<Option<Firm>, ProviderDataError> {
        self.read("get_provider_firm", |c| c.get_provider_firm(firm_id))
    }

    fn get_all_provider_firms(&self) -> Result<Vec<Firm>, ProviderDataError> {
        self.read("get_all_provider_firms", C::get_all_provider_firms)
    }

    fn create_provider_firm(&mut self, firm: Firm) -> Result<Firm, ProviderDataError> {
        self.inner.create_provider_firm(firm)
    }

    fn patch_provider_firm(
        &mut self,
        firm_id: i64,
        patch: &FirmPatch,
    ) -> Result<Firm, ProviderDataError> {
        self.inner.patch_provider_firm(firm_id, patch)
    }

    fn get_provider_offices(&self, firm_id: i64) -> Result<Vec<Office>, ProviderDataError> {
        self.read("get_provider_offices", |c| c.get_provider_offices(firm_id))
    }

    fn get_head_office(&self, firm_id: i64) -> Result<Option<Office>, ProviderDataError> {
        self.read("get_head_office", |c| c.get_head_office(firm_id))
    }

    fn get_provider_office(&self, office_code: &str) -> Result<Option<Office>, ProviderDataError> {
        self.read("get_provider_office", |c| c.get_provider_office(office_code))
    }

    fn create_provider_office(
        &mut self,
        office: Office,
        firm_id: i64,
    ) -> Result<Office, ProviderDataError> {
        self.inner.create_provider_office(office, firm_id)
    }

    fn patch_office(
        &mut self,
        firm_id: i64,
        office_code: &str,
        patch: &OfficePatch,
    ) -> Result<Office, ProviderDataError> {
        self.inner.patch_office(firm_id, office_code, patch)
    }

    fn get_office_contacts(
        &self,
        firm_id: i64,
        office_code: &str,
    ) -> Result<Vec<Contact>, ProviderDataError> {
        self.read("get_office_contacts", |c| {
            c.get_office_contacts(firm_id, office_code)
        })
    }

    fn create_office_contact(
        &mut self,
        firm_id: i64,
        office_code: &str,
        contact: Contact,
    ) -> Result<Contact, ProviderDataError> {
        self.inner.create_office_contact(firm_id, office_code, contact)
    }

    fn update_contact(
        &mut self,
        firm_id: i64,
        office_code: &str,
        contact: Contact,
    ) -> Result<Contact, ProviderDataError> {
        self.inner.update_contact(firm_id, office_code, contact)
    }

    fn get_office_bank_accounts(
        &self,
        firm_id: i64,
        office_code: &str,
    ) -> Result<Vec<BankAccount>, ProviderDataError> {
        self.read("get_office_bank_accounts", |c| {
            c.get_office_bank_accounts(firm_id, office_code)
        })
    }

    fn get_provider_firm_bank_accounts(
        &self,
        firm_id: i64,
    ) -> Result<Vec<BankAccount>, ProviderDataError> {
        self.read("get_provider_firm_bank_accounts", |c| {
            c.get_provider_firm_bank_accounts(firm_id)
        })
    }

    fn create_office_bank_account(
        &mut self,
        firm_id: i64,
        office_code: &str,
        account: BankAccount,
    ) -> Result<BankAccount, ProviderDataError> {
        self.inner
            .create_office_bank_account(firm_id, office_code, account)
    }

    fn assign_bank_account_to_office(
        &mut self,
        firm_id: i64,
        office_code: &str,
        bank_account_id: i64,
    ) -> Result<BankAccount, ProviderDataError> {
        self.inner
            .assign_bank_account_to_office(firm_id, office_code, bank_account_id)
    }
}
