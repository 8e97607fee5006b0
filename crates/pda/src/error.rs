// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised by a Provider Data API client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderDataError {
    /// A write referenced a firm, office, contact or account that does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// The request was malformed before it was sent.
    #[error("Invalid request: {0}")]
    InvalidArgument(String),

    /// The API refused the write.
    #[error("Provider Data API rejected the request: {0}")]
    Rejected(String),

    /// The API could not be reached.
    #[error("Could not connect to the Provider Data API: {0}")]
    Connection(String),

    #[error("Provider Data API rate limited the request")]
    RateLimited,

    #[error("Provider Data API returned server error {status}")]
    Server { status: u16 },

    /// A record came back in a shape the domain cannot represent.
    #[error("Invalid data from the Provider Data API: {0}")]
    InvalidData(String),
}

impl ProviderDataError {
    /// Short name of the error kind, used as a structured logging field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::Rejected(_) => "Rejected",
            Self::Connection(_) => "Connection",
            Self::RateLimited => "RateLimited",
            Self::Server { .. } => "Server",
            Self::InvalidData(_) => "InvalidData",
        }
    }

    /// Returns true for failures worth retrying on an idempotent read.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::RateLimited | Self::Server { .. }
        )
    }
}
