// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract manager assignment and the directory of known contract managers.

use crate::error::CoreError;
use crate::flash::Flash;
use crate::search::{Page, paginate};
use crate::session::{GLOBAL_SCOPE, SessionStore, load, save};
use crate::status::{StatusFlow, find_office};
use mapd_domain::{ContractManager, DomainError, Office, check_max_length};
use mapd_pda::{OfficePatch, ProviderDataClient};
use tracing::info;

/// Global store key holding the directory.
pub const DIRECTORY_KEY: &str = "contract-managers";
pub const DIRECTORY_PER_PAGE: usize = 10;
const NAME_MAX_LENGTH: usize = 100;

/// Labels that stand for a status rather than a person.
const RESERVED_NAMES: [&str; 4] = [
    ContractManager::DEFAULT_NAME,
    ContractManager::INACTIVE_NAME,
    ContractManager::FALSE_BALANCE_NAME,
    ContractManager::DEBT_RECOVERY_NAME,
];

/// Shown when the assign step is submitted without a choice.
pub const SELECT_CONTRACT_MANAGER_MESSAGE: &str =
    "Select a contract manager, search again or skip this step if you do not know the contract manager";

/// Where a request to change an office's contract manager has to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractManagerRoute {
    /// The generic assign form may be used.
    Assign,
    /// The current value belongs to a status flow.
    StatusFlow(StatusFlow),
}

#[must_use]
pub fn contract_manager_route(office: &Office) -> ContractManagerRoute {
    office
        .contract_manager
        .as_ref()
        .and_then(StatusFlow::owning)
        .map_or(ContractManagerRoute::Assign, ContractManagerRoute::StatusFlow)
}

/// Assigns a named contract manager to an office.
///
/// # Errors
///
/// Returns `CoreError::OwnedByStatusFlow` if the current value is a status
/// workaround, a domain error if `name` is empty or is itself a reserved
/// value, and `CoreError::ProviderData` if the update fails.
pub fn assign_contract_manager<C: ProviderDataClient + ?Sized>(
    client: &mut C,
    firm_id: i64,
    office_code: &str,
    name: &str,
) -> Result<Office, CoreError> {
    let office: Office = find_office(client, firm_id, office_code)?;
    if let ContractManagerRoute::StatusFlow(flow) = contract_manager_route(&office) {
        return Err(CoreError::OwnedByStatusFlow {
            flow,
            office_code: office_code.to_string(),
        });
    }

    let name: &str = name.trim();
    if name.is_empty() {
        return Err(
            DomainError::invalid_field("contract_manager", SELECT_CONTRACT_MANAGER_MESSAGE).into(),
        );
    }
    let manager: ContractManager = ContractManager::from_wire(name);
    if manager.is_status_workaround() {
        return Err(DomainError::invalid_field(
            "contract_manager",
            format!("{name} is reserved and cannot be assigned"),
        )
        .into());
    }

    let patch: OfficePatch = OfficePatch {
        contract_manager: Some(manager),
        ..OfficePatch::default()
    };
    let updated: Office = client.patch_office(firm_id, office_code, &patch)?;
    info!(firm_id, office_code, contract_manager = name, "Contract manager assigned");
    Ok(updated)
}

/// Result of removing several names at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryRemoval {
    pub removed: Vec<String>,
    pub flashes: Vec<Flash>,
}

/// The application-wide list of contract manager names.
///
/// Kept in the store under [`GLOBAL_SCOPE`] so every session sees the same list.
pub struct ContractManagerDirectory<'a, S: SessionStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: SessionStore + ?Sized> ContractManagerDirectory<'a, S> {
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    fn write(&mut self, names: &[String]) -> Result<(), CoreError> {
        save(self.store, GLOBAL_SCOPE, DIRECTORY_KEY, &names)
    }

    /// All names, sorted case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Session` if the stored list is corrupt.
    pub fn list(&mut self) -> Result<Vec<String>, CoreError> {
        let mut names: Vec<String> =
            load(self.store, GLOBAL_SCOPE, DIRECTORY_KEY)?.unwrap_or_default();
        names.sort_by_key(|n| n.to_lowercase());
        Ok(names)
    }

    /// # Errors
    ///
    /// Returns `CoreError::Session` if the stored list is corrupt.
    pub fn page(&mut self, page: usize) -> Result<Page<String>, CoreError> {
        Ok(paginate(self.list()?, page, DIRECTORY_PER_PAGE))
    }

    /// Names containing `query`, case-insensitively. An empty query matches all.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Session` if the stored list is corrupt.
    pub fn search(&mut self, query: &str) -> Result<Vec<String>, CoreError> {
        let query: String = query.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|n| n.to_lowercase().contains(&query))
            .collect())
    }

    /// Adds a name and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the name is empty, too long, reserved or
    /// already present.
    pub fn add(&mut self, name: &str) -> Result<String, CoreError> {
        let name: String = name.trim().to_string();
        if name.is_empty() {
            return Err(
                DomainError::invalid_field("name", "Enter the contract manager's name").into(),
            );
        }
        check_max_length(
            "name",
            &name,
            NAME_MAX_LENGTH,
            "Contract manager name must be 100 characters or less",
        )?;
        if RESERVED_NAMES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(&name))
        {
            return Err(DomainError::invalid_field(
                "name",
                format!("{name} is reserved and cannot be added"),
            )
            .into());
        }

        let mut names: Vec<String> = self.list()?;
        if names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
            return Err(DomainError::invalid_field(
                "name",
                format!("{name} is already a contract manager"),
            )
            .into());
        }
        names.push(name.clone());
        self.write(&names)?;
        info!(contract_manager = %name, "Contract manager added");
        Ok(name)
    }

    /// Removes a name. Returns false if it was not present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Session` if the stored list is corrupt.
    pub fn remove(&mut self, name: &str) -> Result<bool, CoreError> {
        let mut names: Vec<String> = self.list()?;
        let before: usize = names.len();
        names.retain(|n| n != name);
        if names.len() == before {
            return Ok(false);
        }
        self.write(&names)?;
        info!(contract_manager = %name, "Contract manager removed");
        Ok(true)
    }

    /// Removes several names, reporting each one that was not present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Session` if the stored list is corrupt.
    pub fn remove_many(&mut self, names: &[String]) -> Result<DirectoryRemoval, CoreError> {
        let mut outcome: DirectoryRemoval = DirectoryRemoval::default();
        for name in names {
            if self.remove(name)? {
                outcome.removed.push(name.clone());
            } else {
                outcome
                    .flashes
                    .push(Flash::warning(format!("Failed to remove {name}")));
            }
        }
        if !outcome.removed.is_empty() {
            outcome.flashes.insert(
                0,
                Flash::success(format!("Removed {} contract manager(s)", outcome.removed.len())),
            );
        }
        Ok(outcome)
    }
}
