//! Collaborator Traits
//!
//! Interfaces for the identity provider, profile storage and the per-request
//! session cookie store. Implementations are in the infrastructure layer.

use platform::cookie::CookieOptions;

use crate::domain::entity::{
    account::{Account, AccountMetadata},
    profile::{Profile, ProfileChanges},
    provider_session::ProviderSession,
};
use crate::domain::value_object::{account_id::AccountId, authorization_code::AuthorizationCode};
use crate::error::AccountResult;

/// Identity provider (OAuth authorization server and identity record store)
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Exchange a single-use authorization code for a session
    ///
    /// Called at most once per code; a second call with the same code fails.
    async fn exchange_code(&self, code: &AuthorizationCode) -> AccountResult<ProviderSession>;

    /// Resolve the account behind an access token
    ///
    /// `Ok(None)` when the token is unknown, expired or revoked.
    async fn get_account(&self, access_token: &str) -> AccountResult<Option<Account>>;

    /// Overwrite the caller's account metadata
    async fn update_metadata(
        &self,
        access_token: &str,
        metadata: &AccountMetadata,
    ) -> AccountResult<Account>;

    /// Revoke the session behind an access token
    async fn sign_out(&self, access_token: &str) -> AccountResult<()>;
}

/// Profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Find the profile of an account; `Ok(None)` when no row exists
    async fn find_by_account_id(&self, account_id: &AccountId) -> AccountResult<Option<Profile>>;

    /// Apply a partial update
    async fn update(&self, account_id: &AccountId, changes: &ProfileChanges) -> AccountResult<()>;
}

/// Cookie-backed session storage scoped to one request/response cycle
///
/// A `set` followed by a `get` in the same handling may not observe the
/// write. Writes are durable once the response carrying them is sent.
pub trait SessionStore {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&mut self, name: &str, value: &str, options: &CookieOptions);

    fn remove(&mut self, name: &str, options: &CookieOptions);
}
