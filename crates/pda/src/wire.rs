// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Provider Data API record shapes.
//!
//! Records use the API's camelCase names and its string encodings
//! (`Y`/`N` flags, the `N/A` head office marker, contract manager
//! sentinels). Conversions to and from the domain types live here and
//! nowhere else.

use crate::client::{FirmPatch, OfficePatch};
use crate::error::ProviderDataError;
use mapd_domain::{
    Address, AdvocateLevel, BankAccount, ConstitutionalStatus, Contact, ContractManager, Firm,
    FirmType, HeadOfficeRef, Office, PaymentMethod, YesNo, iso_date,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmRecord {
    pub firm_id: i64,
    #[serde(default)]
    pub firm_number: String,
    pub firm_name: String,
    pub firm_type: String,
    #[serde(default)]
    pub parent_firm_id: Option<i64>,
    #[serde(default)]
    pub constitutional_status: Option<String>,
    #[serde(default)]
    pub company_house_number: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub indemnity_received_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub inactive_date: Option<Date>,
    #[serde(default)]
    pub hold_all_payments_flag: Option<String>,
    #[serde(default)]
    pub hold_reason: Option<String>,
    #[serde(default)]
    pub advocate_level: Option<String>,
    #[serde(default)]
    pub bar_council_roll: Option<String>,
    #[serde(default, rename = "solicitorAdvocateYN")]
    pub solicitor_advocate: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeRecord {
    pub firm_id: i64,
    pub firm_office_id: i64,
    pub firm_office_code: String,
    #[serde(default)]
    pub office_name: Option<String>,
    #[serde(default, rename = "addressLine1")]
    pub address_line_1: String,
    #[serde(default, rename = "addressLine2")]
    pub address_line_2: Option<String>,
    #[serde(default, rename = "addressLine3")]
    pub address_line_3: Option<String>,
    #[serde(default, rename = "addressLine4")]
    pub address_line_4: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default, rename = "postCode")]
    pub postcode: String,
    #[serde(default)]
    pub telephone_number: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub dx_number: Option<String>,
    #[serde(default)]
    pub dx_centre: Option<String>,
    pub head_office: String,
    #[serde(default)]
    pub contract_manager: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub inactive_date: Option<Date>,
    #[serde(default)]
    pub hold_all_payments_flag: Option<String>,
    #[serde(default)]
    pub hold_reason: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub intervened_date: Option<Date>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub vat_registration_number: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub creation_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub contact_id: i64,
    pub vendor_site_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(default)]
    pub telephone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default = "flag_no")]
    pub primary: String,
    #[serde(default, with = "iso_date::option")]
    pub creation_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub inactive_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountRecord {
    pub bank_account_id: i64,
    pub vendor_site_id: i64,
    pub bank_account_name: String,
    pub sort_code: String,
    pub account_number: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default = "flag_no")]
    pub primary_flag: String,
    #[serde(default, with = "iso_date::option")]
    pub start_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub end_date: Option<Date>,
}

fn flag_no() -> String {
    String::from("N")
}

fn to_flag(value: bool) -> String {
    String::from(if value { "Y" } else { "N" })
}

fn from_flag(value: Option<&str>) -> bool {
    value == Some("Y")
}

fn invalid(err: &mapd_domain::DomainError) -> ProviderDataError {
    ProviderDataError::InvalidData(err.to_string())
}

impl TryFrom<FirmRecord> for Firm {
    type Error = ProviderDataError;

    fn try_from(record: FirmRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            firm_id: record.firm_id,
            firm_number: record.firm_number,
            firm_name: record.firm_name,
            firm_type: FirmType::parse_str(&record.firm_type).map_err(|e| invalid(&e))?,
            // The API reports "no parent" as 0.
            parent_firm_id: record.parent_firm_id.filter(|id| *id != 0),
            constitutional_status: record
                .constitutional_status
                .as_deref()
                .map(ConstitutionalStatus::parse_str)
                .transpose()
                .map_err(|e| invalid(&e))?,
            company_house_number: record.company_house_number,
            indemnity_received_date: record.indemnity_received_date,
            inactive_date: record.inactive_date,
            hold_all_payments: from_flag(record.hold_all_payments_flag.as_deref()),
            hold_reason: record.hold_reason,
            advocate_level: record
                .advocate_level
                .as_deref()
                .map(AdvocateLevel::parse_str)
                .transpose()
                .map_err(|e| invalid(&e))?,
            bar_council_roll: record.bar_council_roll,
            solicitor_advocate: record
                .solicitor_advocate
                .as_deref()
                .map(YesNo::parse_str)
                .transpose()
                .map_err(|e| invalid(&e))?,
            website_url: record.website_url,
        })
    }
}

impl From<&Firm> for FirmRecord {
    fn from(firm: &Firm) -> Self {
        Self {
            firm_id: firm.firm_id,
            firm_number: firm.firm_number.clone(),
            firm_name: firm.firm_name.clone(),
            firm_type: firm.firm_type.as_str().to_string(),
            parent_firm_id: firm.parent_firm_id,
            constitutional_status: firm
                .constitutional_status
                .map(|s| s.as_str().to_string()),
            company_house_number: firm.company_house_number.clone(),
            indemnity_received_date: firm.indemnity_received_date,
            inactive_date: firm.inactive_date,
            hold_all_payments_flag: Some(to_flag(firm.hold_all_payments)),
            hold_reason: firm.hold_reason.clone(),
            advocate_level: firm.advocate_level.map(|l| l.as_str().to_string()),
            bar_council_roll: firm.bar_council_roll.clone(),
            solicitor_advocate: firm.solicitor_advocate.map(|s| s.as_str().to_string()),
            website_url: firm.website_url.clone(),
        }
    }
}

impl OfficeRecord {
    /// Converts into the domain office, dropping the owning firm id.
    ///
    /// # Errors
    ///
    /// Returns `ProviderDataError::InvalidData` if an enumerated field holds
    /// an unknown value.
    pub fn into_office(self) -> Result<Office, ProviderDataError> {
        Ok(Office {
            firm_office_id: self.firm_office_id,
            firm_office_code: self.firm_office_code,
            office_name: self.office_name,
            address: Address {
                address_line_1: self.address_line_1,
                address_line_2: self.address_line_2,
                address_line_3: self.address_line_3,
                address_line_4: self.address_line_4,
                city: self.city,
                county: self.county,
                postcode: self.postcode,
            },
            telephone_number: self.telephone_number,
            email_address: self.email_address,
            dx_number: self.dx_number,
            dx_centre: self.dx_centre,
            head_office: HeadOfficeRef::from_wire(&self.head_office),
            contract_manager: self
                .contract_manager
                .as_deref()
                .map(ContractManager::from_wire),
            inactive_date: self.inactive_date,
            hold_all_payments: from_flag(self.hold_all_payments_flag.as_deref()),
            hold_reason: self.hold_reason,
            intervened_date: self.intervened_date,
            payment_method: self
                .payment_method
                .as_deref()
                .map(PaymentMethod::parse_str)
                .transpose()
                .map_err(|e| invalid(&e))?,
            vat_registration_number: self.vat_registration_number,
            creation_date: self.creation_date,
        })
    }

    /// Builds the record for `office` owned by `firm_id`.
    #[must_use]
    pub fn from_office(office: &Office, firm_id: i64) -> Self {
        Self {
            firm_id,
            firm_office_id: office.firm_office_id,
            firm_office_code: office.firm_office_code.clone(),
            office_name: office.office_name.clone(),
            address_line_1: office.address.address_line_1.clone(),
            address_line_2: office.address.address_line_2.clone(),
            address_line_3: office.address.address_line_3.clone(),
            address_line_4: office.address.address_line_4.clone(),
            city: office.address.city.clone(),
            county: office.address.county.clone(),
            postcode: office.address.postcode.clone(),
            telephone_number: office.telephone_number.clone(),
            email_address: office.email_address.clone(),
            dx_number: office.dx_number.clone(),
            dx_centre: office.dx_centre.clone(),
            head_office: office.head_office.as_wire().to_string(),
            contract_manager: office
                .contract_manager
                .as_ref()
                .map(|cm| cm.as_wire().to_string()),
            inactive_date: office.inactive_date,
            hold_all_payments_flag: Some(to_flag(office.hold_all_payments)),
            hold_reason: office.hold_reason.clone(),
            intervened_date: office.intervened_date,
            payment_method: office.payment_method.map(|p| p.as_str().to_string()),
            vat_registration_number: office.vat_registration_number.clone(),
            creation_date: office.creation_date,
        }
    }
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Self {
            contact_id: record.contact_id,
            vendor_site_id: record.vendor_site_id,
            first_name: record.first_name,
            last_name: record.last_name,
            email_address: record.email_address,
            telephone_number: record.telephone_number,
            website: record.website,
            job_title: record.job_title,
            primary: from_flag(Some(&record.primary)),
            creation_date: record.creation_date,
            inactive_date: record.inactive_date,
        }
    }
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            contact_id: contact.contact_id,
            vendor_site_id: contact.vendor_site_id,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email_address: contact.email_address.clone(),
            telephone_number: contact.telephone_number.clone(),
            website: contact.website.clone(),
            job_title: contact.job_title.clone(),
            primary: to_flag(contact.primary),
            creation_date: contact.creation_date,
            inactive_date: contact.inactive_date,
        }
    }
}

impl From<BankAccountRecord> for BankAccount {
    fn from(record: BankAccountRecord) -> Self {
        Self {
            bank_account_id: record.bank_account_id,
            vendor_site_id: record.vendor_site_id,
            bank_account_name: record.bank_account_name,
            sort_code: record.sort_code,
            account_number: record.account_number,
            bank_name: record.bank_name,
            primary: from_flag(Some(&record.primary_flag)),
            start_date: record.start_date,
            end_date: record.end_date,
        }
    }
}

impl From<&BankAccount> for BankAccountRecord {
    fn from(account: &BankAccount) -> Self {
        Self {
            bank_account_id: account.bank_account_id,
            vendor_site_id: account.vendor_site_id,
            bank_account_name: account.bank_account_name.clone(),
            sort_code: account.sort_code.clone(),
            account_number: account.account_number.clone(),
            bank_name: account.bank_name.clone(),
            primary_flag: to_flag(account.primary),
            start_date: account.start_date,
            end_date: account.end_date,
        }
    }
}

fn date_value(date: Option<Date>) -> Value {
    date.map_or(Value::Null, |d| {
        Value::String(format!(
            "{:04}-{:02}-{:02}",
            d.year(),
            u8::from(d.month()),
            d.day()
        ))
    })
}

fn text_value(text: Option<&str>) -> Value {
    text.map_or(Value::Null, |t| Value::String(t.to_string()))
}

impl FirmPatch {
    /// Renders the patch as the camelCase body of a PATCH request.
    #[must_use]
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut body: Map<String, Value> = Map::new();
        if let Some(name) = &self.firm_name {
            body.insert("firmName".into(), Value::String(name.clone()));
        }
        if let Some(parent) = self.parent_firm_id {
            body.insert("parentFirmId".into(), parent.map_or(Value::Null, Value::from));
        }
        if let Some(status) = self.constitutional_status {
            body.insert(
                "constitutionalStatus".into(),
                Value::String(status.as_str().to_string()),
            );
        }
        if let Some(number) = &self.company_house_number {
            body.insert("companyHouseNumber".into(), text_value(number.as_deref()));
        }
        if let Some(date) = self.indemnity_received_date {
            body.insert("indemnityReceivedDate".into(), date_value(date));
        }
        if let Some(date) = self.inactive_date {
            body.insert("inactiveDate".into(), date_value(date));
        }
        if let Some(hold) = self.hold_all_payments {
            body.insert("holdAllPaymentsFlag".into(), Value::String(to_flag(hold)));
        }
        if let Some(reason) = &self.hold_reason {
            body.insert("holdReason".into(), text_value(reason.as_deref()));
        }
        if let Some(level) = self.advocate_level {
            body.insert(
                "advocateLevel".into(),
                Value::String(level.as_str().to_string()),
            );
        }
        if let Some(roll) = &self.bar_council_roll {
            body.insert("barCouncilRoll".into(), Value::String(roll.clone()));
        }
        if let Some(answer) = self.solicitor_advocate {
            body.insert(
                "solicitorAdvocateYN".into(),
                Value::String(answer.as_str().to_string()),
            );
        }
        body
    }
}

impl OfficePatch {
    /// Renders the patch as the camelCase body of a PATCH request.
    #[must_use]
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut body: Map<String, Value> = Map::new();
        if let Some(head_office) = &self.head_office {
            body.insert(
                "headOffice".into(),
                Value::String(head_office.as_wire().to_string()),
            );
        }
        if let Some(manager) = &self.contract_manager {
            body.insert(
                "contractManager".into(),
                Value::String(manager.as_wire().to_string()),
            );
        }
        if let Some(date) = self.inactive_date {
            body.insert("inactiveDate".into(), date_value(date));
        }
        if let Some(hold) = self.hold_all_payments {
            body.insert("holdAllPaymentsFlag".into(), Value::String(to_flag(hold)));
        }
        if let Some(reason) = &self.hold_reason {
            body.insert("holdReason".into(), text_value(reason.as_deref()));
        }
        if let Some(date) = self.intervened_date {
            body.insert("intervenedDate".into(), date_value(date));
        }
        if let Some(method) = self.payment_method {
            body.insert(
                "paymentMethod".into(),
                Value::String(method.as_str().to_string()),
            );
        }
        if let Some(vat) = &self.vat_registration_number {
            body.insert("vatRegistrationNumber".into(), text_value(vat.as_deref()));
        }
        body
    }
}

/// Applies a PATCH body to a record, the way the API merges partial updates.
///
/// # Errors
///
/// Returns `ProviderDataError::InvalidArgument` if the merged record no
/// longer matches the record shape.
pub fn merge_patch<T>(record: &T, body: &Map<String, Value>) -> Result<T, ProviderDataError>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut value: Value = serde_json::to_value(record)
        .map_err(|e| ProviderDataError::InvalidArgument(e.to_string()))?;
    if let Value::Object(fields) = &mut value {
        for (key, field) in body {
            fields.insert(key.clone(), field.clone());
        }
    }
    serde_json::from_value(value).map_err(|e| ProviderDataError::InvalidArgument(e.to_string()))
}
