//! Onboarding Step Value Object
//!
//! Ordered progress marker through mandatory account setup. Written by the
//! onboarding pages; read-only here.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    #[default]
    NotStarted,
    Interests,
    DealBreakers,
    Complete,
}

impl OnboardingStep {
    /// Get string code, as stored in `profiles.onboarding_step`
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Interests => "interests",
            Self::DealBreakers => "deal_breakers",
            Self::Complete => "complete",
        }
    }

    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "not_started" => Some(Self::NotStarted),
            "interests" => Some(Self::Interests),
            "deal_breakers" => Some(Self::DealBreakers),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
