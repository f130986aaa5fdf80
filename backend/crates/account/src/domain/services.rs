//! Domain Services
//!
//! Pure functions over domain values.

use crate::domain::value_object::onboarding_step::OnboardingStep;

/// Where a signed-in account lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Main application
    Landing,
    /// Start of mandatory onboarding
    OnboardingEntry,
}

/// Map an onboarding step to a destination
///
/// Only `Complete` reaches the landing page. Intermediate steps do not
/// resume at their own page; onboarding sorts that out from its entry.
pub fn resolve_destination(step: Option<OnboardingStep>) -> Destination {
    match step {
        Some(OnboardingStep::Complete) => Destination::Landing,
        Some(OnboardingStep::NotStarted)
        | Some(OnboardingStep::Interests)
        | Some(OnboardingStep::DealBreakers)
        | None => Destination::OnboardingEntry,
    }
}
