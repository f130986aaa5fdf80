//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, collaborator traits, onboarding rules
//! - `application/` - Use cases and configuration
//! - `infra/` - Identity provider client, PostgreSQL, cookie and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - OAuth authorization-code callback that establishes a cookie session
//!   and routes the user to onboarding or the landing page
//! - Session status and explicit sign-out
//! - Self-service deactivation: required identity-record write, best-effort
//!   profile touch, then sign-out
//!
//! ## Security Model
//! - Authorization codes are exchanged at most once and never retried
//! - Callback failures redirect to a generic error page without detail
//! - Session tokens live only in HttpOnly cookies
//! - `next` is honoured only for local paths

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AccountConfig, IdentityProviderConfig};
pub use error::{AccountError, AccountResult};
pub use infra::{HttpIdentityProvider, PgProfileRepository};
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::*;
    pub use crate::infra::postgres::PgProfileRepository as ProfileStore;
}

#[cfg(test)]
mod tests;
