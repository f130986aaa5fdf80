//! Domain Layer
//!
//! Contains entities, value objects, collaborator traits and the pure
//! onboarding resolver.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{account::Account, profile::Profile, provider_session::ProviderSession};
pub use repository::{IdentityProvider, ProfileRepository, SessionStore};
