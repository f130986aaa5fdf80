//! Account Status Value Object
//!
//! Two states only. Deactivation is a reversible flag, distinct from
//! deletion; nothing in this crate removes an account.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account auth status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Normal account
    #[default]
    Active,

    /// Deactivated by its owner
    Deactivated,
}

impl AccountStatus {
    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deactivated => "deactivated",
        }
    }

    #[inline]
    pub const fn is_deactivated(&self) -> bool {
        matches!(self, Self::Deactivated)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "deactivated" => Some(Self::Deactivated),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
