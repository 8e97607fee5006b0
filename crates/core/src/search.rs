// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Provider and chambers search, and moving a Barrister or Advocate to a
//! different chambers.

use crate::error::CoreError;
use mapd_domain::{DomainError, Firm, FirmType, check_parent_link};
use mapd_pda::{FirmPatch, ProviderDataClient};
use serde::Serialize;
use tracing::info;

pub const PROVIDERS_PER_PAGE: usize = 20;
pub const CHAMBERS_PER_PAGE: usize = 7;

/// One page of a longer list. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_count: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.total_count == 0 {
            1
        } else {
            self.total_count.div_ceil(self.per_page)
        }
    }
}

/// Cuts page `page` out of `items`. Page numbers below 1 are treated as 1.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page: usize = page.max(1);
    let per_page: usize = per_page.max(1);
    let total_count: usize = items.len();
    let start: usize = (page - 1).saturating_mul(per_page);
    let items: Vec<T> = items.into_iter().skip(start).take(per_page).collect();
    Page {
        has_next: start + items.len() < total_count,
        has_prev: page > 1,
        items,
        page,
        per_page,
        total_count,
    }
}

fn matches_query(firm: &Firm, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    firm.firm_name.to_lowercase().contains(&query.to_lowercase())
        || firm.firm_id.to_string() == query
        || firm.firm_number == query
}

/// Lists firms whose name contains `query` (case-insensitive) or whose id
/// equals it. An empty query lists every firm.
///
/// # Errors
///
/// Returns `CoreError::ProviderData` if the firms cannot be listed.
pub fn search_providers<C: ProviderDataClient + ?Sized>(
    client: &C,
    query: &str,
    page: usize,
) -> Result<Page<Firm>, CoreError> {
    let query: &str = query.trim();
    let mut firms: Vec<Firm> = client
        .get_all_provider_firms()?
        .into_iter()
        .filter(|f| matches_query(f, query))
        .collect();
    firms.sort_by(|a, b| a.firm_name.to_lowercase().cmp(&b.firm_name.to_lowercase()));
    Ok(paginate(firms, page, PROVIDERS_PER_PAGE))
}

/// Like [`search_providers`], restricted to Chambers.
///
/// # Errors
///
/// Returns `CoreError::ProviderData` if the firms cannot be listed.
pub fn search_chambers<C: ProviderDataClient + ?Sized>(
    client: &C,
    query: &str,
    page: usize,
) -> Result<Page<Firm>, CoreError> {
    let query: &str = query.trim();
    let mut chambers: Vec<Firm> = client
        .get_all_provider_firms()?
        .into_iter()
        .filter(|f| f.firm_type == FirmType::Chambers && matches_query(f, query))
        .collect();
    chambers.sort_by(|a, b| a.firm_name.to_lowercase().cmp(&b.firm_name.to_lowercase()));
    Ok(paginate(chambers, page, CHAMBERS_PER_PAGE))
}

/// Fetches a firm and checks that it is a Chambers.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the firm does not exist and a domain
/// error if it is not a Chambers.
pub fn require_chambers<C: ProviderDataClient + ?Sized>(
    client: &C,
    firm_id: i64,
) -> Result<Firm, CoreError> {
    let firm: Firm = client
        .get_provider_firm(firm_id)?
        .ok_or_else(|| CoreError::not_found("Chambers", firm_id))?;
    if firm.firm_type != FirmType::Chambers {
        return Err(DomainError::invalid_field(
            "parent_firm_id",
            "Select a chambers",
        )
        .into());
    }
    Ok(firm)
}

/// Moves an existing Barrister or Advocate under another chambers.
///
/// # Errors
///
/// Returns a domain error if the firm is not a Barrister or Advocate or the
/// parent is not a Chambers, `CoreError::NoChange` if it already belongs
/// to that chambers, and `CoreError::ProviderData` if the update fails.
pub fn assign_chambers<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    chambers_id: i64,
) -> Result<Firm, CoreError> {
    let firm: Firm = client
        .get_provider_firm(firm_id)?
        .ok_or_else(|| CoreError::not_found("Firm", firm_id))?;
    if !firm.firm_type.is_child_type() {
        return Err(DomainError::NotApplicableToFirmType {
            operation: "assign a chambers",
            firm_type: firm.firm_type,
        }
        .into());
    }
    let chambers: Firm = require_chambers(client, chambers_id)?;

    let mut moved: Firm = firm.clone();
    moved.parent_firm_id = Some(chambers.firm_id);
    check_parent_link(&moved, Some(&chambers))?;
    if firm.parent_firm_id == Some(chambers_id) {
        return Err(CoreError::NoChange {
            field: "parent_firm_id",
            message: format!(
                "{} already belongs to {}. Cancel if you do not want to change the chambers.",
                firm.firm_name, chambers.firm_name
            ),
        });
    }

    let patch: FirmPatch = FirmPatch {
        parent_firm_id: Some(Some(chambers_id)),
        ..FirmPatch::default()
    };
    let updated: Firm = client.patch_provider_firm(firm_id, &patch)?;
    info!(firm_id, chambers_id, "Chambers assigned");
    Ok(updated)
}
