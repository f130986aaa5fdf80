//! Value Object Module

pub mod account_id;
pub mod account_status;
pub mod authorization_code;
pub mod onboarding_step;
