//! Sign Out Use Case
//!
//! Revokes the caller's session at the provider and drops its cookies.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::session_cookies;
use crate::domain::repository::{IdentityProvider, SessionStore};

/// Sign out use case
pub struct SignOutUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    config: Arc<AccountConfig>,
}

impl<P> SignOutUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>, config: Arc<AccountConfig>) -> Self {
        Self { provider, config }
    }

    /// Sign out from the current session
    ///
    /// Provider revocation is best-effort. Cookies are removed regardless, so
    /// this browser is signed out even if the provider call fails.
    pub async fn execute<S>(&self, store: &mut S)
    where
        S: SessionStore,
    {
        if let Some(token) = session_cookies::access_token(store, &self.config) {
            match self.provider.sign_out(&token).await {
                Ok(()) => tracing::info!("Session revoked"),
                Err(e) => tracing::warn!(error = %e, "Provider sign-out failed"),
            }
        }

        session_cookies::clear_session(store, &self.config);
    }
}
