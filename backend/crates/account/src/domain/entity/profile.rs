//! Profile Entity
//!
//! One-to-one with an account. Only read (and touched) by this crate.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{account_id::AccountId, onboarding_step::OnboardingStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub account_id: AccountId,
    /// `None` when the stored value is null or not a known step
    pub onboarding_step: Option<OnboardingStep>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChanges {
    /// Left unchanged when `None`
    pub onboarding_step: Option<OnboardingStep>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileChanges {
    /// Bump `updated_at` only
    pub fn touch(now: DateTime<Utc>) -> Self {
        Self {
            onboarding_step: None,
            updated_at: now,
        }
    }
}
