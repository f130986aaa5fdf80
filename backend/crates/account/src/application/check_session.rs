//! Check Session Use Case
//!
//! Resolves the account behind the request's session cookie.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::session_cookies;
use crate::domain::entity::account::Account;
use crate::domain::repository::{IdentityProvider, SessionStore};
use crate::error::{AccountError, AccountResult};

/// A session the provider still honours
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub access_token: String,
    pub account: Account,
}

/// Check session use case
pub struct CheckSessionUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    config: Arc<AccountConfig>,
}

impl<P> CheckSessionUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>, config: Arc<AccountConfig>) -> Self {
        Self { provider, config }
    }

    /// Current session, or `Unauthorized` when there is none
    pub async fn execute<S>(&self, store: &S) -> AccountResult<CurrentSession>
    where
        S: SessionStore,
    {
        let access_token =
            session_cookies::access_token(store, &self.config).ok_or(AccountError::Unauthorized)?;

        let account = self
            .provider
            .get_account(&access_token)
            .await?
            .ok_or(AccountError::Unauthorized)?;

        Ok(CurrentSession {
            access_token,
            account,
        })
    }
}
