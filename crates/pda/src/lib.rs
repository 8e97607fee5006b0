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

mod client;
mod error;
mod mock;
mod retry;
mod wire;

#[cfg(test)]
mod tests;

pub use client::{FirmPatch, OfficePatch, ProviderDataClient};
pub use error::ProviderDataError;
pub use mock::{MockData, MockProviderDataApi};
pub use retry::{RetryPolicy, RetryingProviderData};
pub use wire::{BankAccountRecord, ContactRecord, FirmRecord, OfficeRecord, merge_patch};
