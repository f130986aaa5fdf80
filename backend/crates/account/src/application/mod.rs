//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod deactivate_account;
pub mod exchange_session;
pub mod session_cookies;
pub mod sign_out;

// Re-exports
pub use check_session::{CheckSessionUseCase, CurrentSession};
pub use config::{AccountConfig, IdentityProviderConfig, RedirectTargets};
pub use deactivate_account::{DeactivateAccountUseCase, DeactivateOutput};
pub use exchange_session::{ExchangeInput, ExchangeSessionUseCase};
pub use sign_out::SignOutUseCase;
