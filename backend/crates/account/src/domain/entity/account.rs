//! Account Entity
//!
//! Identity record held by the identity provider. Status lives in the
//! provider's account metadata, so every status change is a metadata write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{account_id::AccountId, account_status::AccountStatus};

/// Account entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: AccountId,
    pub email: Option<String>,
    pub status: AccountStatus,
    /// Set while `status == Deactivated`
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// New active account
    pub fn new(account_id: AccountId, email: Option<String>) -> Self {
        Self {
            account_id,
            email,
            status: AccountStatus::Active,
            deactivated_at: None,
        }
    }

    pub fn is_deactivated(&self) -> bool {
        self.status.is_deactivated()
    }

    /// Metadata that marks this account deactivated
    ///
    /// An already-deactivated account keeps its original stamp, so a repeated
    /// deactivation rewrites identical values.
    pub fn deactivation_metadata(&self, now: DateTime<Utc>) -> AccountMetadata {
        let deactivated_at = match (self.status, self.deactivated_at) {
            (AccountStatus::Deactivated, Some(at)) => at,
            _ => now,
        };

        AccountMetadata {
            account_status: AccountStatus::Deactivated,
            deactivated_at: Some(deactivated_at),
        }
    }

    /// Apply metadata returned by (or written to) the provider
    pub fn apply_metadata(&mut self, metadata: &AccountMetadata) {
        self.status = metadata.account_status;
        self.deactivated_at = metadata.deactivated_at;
    }
}

/// Status fields stored in the provider's account metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountMetadata {
    #[serde(default)]
    pub account_status: AccountStatus,
    #[serde(default)]
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl AccountMetadata {
    /// Metadata of an active account
    pub fn active() -> Self {
        Self {
            account_status: AccountStatus::Active,
            deactivated_at: None,
        }
    }
}
