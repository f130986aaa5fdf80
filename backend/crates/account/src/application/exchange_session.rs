//! Exchange Session Use Case
//!
//! Handles the identity-provider redirect: exchanges the authorization code
//! for a session, stores it, and picks the post-login destination from the
//! account's onboarding step.
//!
//! Every failure ends in a redirect. Per invocation there is at most one
//! exchange call, one session write and one profile read. Codes are
//! single-use, so a failed exchange is never retried.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::session_cookies;
use crate::domain::entity::account::AccountMetadata;
use crate::domain::entity::provider_session::ProviderSession;
use crate::domain::repository::{IdentityProvider, ProfileRepository, SessionStore};
use crate::domain::services::resolve_destination;
use crate::domain::value_object::authorization_code::AuthorizationCode;
use crate::error::{AccountError, AccountResult};

/// Query parameters of the provider redirect
#[derive(Debug, Clone, Default)]
pub struct ExchangeInput {
    pub code: Option<String>,
    pub next: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Exchange session use case
pub struct ExchangeSessionUseCase<P, R>
where
    P: IdentityProvider,
    R: ProfileRepository,
{
    provider: Arc<P>,
    profile_repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<P, R> ExchangeSessionUseCase<P, R>
where
    P: IdentityProvider,
    R: ProfileRepository,
{
    pub fn new(provider: Arc<P>, profile_repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self {
            provider,
            profile_repo,
            config,
        }
    }

    /// Run the exchange and return the redirect location
    pub async fn execute<S>(&self, input: ExchangeInput, store: &mut S) -> String
    where
        S: SessionStore,
    {
        let next = self.config.redirects.sanitize_next(input.next.as_deref());

        match self.try_execute(input, store).await {
            Ok(location) => location,
            Err(err) => {
                err.log();
                self.failure_location(&err, next)
            }
        }
    }

    async fn try_execute<S>(&self, input: ExchangeInput, store: &mut S) -> AccountResult<String>
    where
        S: SessionStore,
    {
        // A provider error wins over any code that came with it
        if let Some(code) = input.error.filter(|e| !e.trim().is_empty()) {
            return Err(AccountError::ProviderError {
                description: input.error_description.unwrap_or_else(|| code.clone()),
                code,
            });
        }

        let code = input
            .code
            .as_deref()
            .and_then(AuthorizationCode::new)
            .ok_or(AccountError::MissingCredentials)?;

        let session = self
            .provider
            .exchange_code(&code)
            .await
            .map_err(|e| AccountError::ExchangeFailed(e.to_string()))?;

        session_cookies::store_session(store, &self.config, &session);

        let account_id = session.account.account_id;
        tracing::info!(account_id = %account_id, "Session established");

        if self.config.reactivate_on_login && session.account.is_deactivated() {
            self.reactivate(&session).await;
        }

        // Keyed by the identity the exchange just proved
        let profile = self
            .profile_repo
            .find_by_account_id(&account_id)
            .await
            .map_err(|e| AccountError::ProfileLookupFailed(e.to_string()))?;

        let step = match profile {
            Some(profile) => profile.onboarding_step,
            None => {
                tracing::debug!(account_id = %account_id, "No profile row, onboarding not started");
                None
            }
        };

        let destination = resolve_destination(step);
        tracing::debug!(account_id = %account_id, ?step, ?destination, "Resolved post-login destination");

        Ok(self.config.redirects.path_for(destination).to_string())
    }

    /// Clear the deactivated flag; failure only logs
    async fn reactivate(&self, session: &ProviderSession) {
        let account_id = session.account.account_id;

        match self
            .provider
            .update_metadata(&session.access_token, &AccountMetadata::active())
            .await
        {
            Ok(_) => tracing::info!(account_id = %account_id, "Account reactivated on sign-in"),
            Err(e) => tracing::warn!(
                account_id = %account_id,
                error = %e,
                "Failed to reactivate account on sign-in"
            ),
        }
    }

    fn failure_location(&self, err: &AccountError, next: String) -> String {
        let redirects = &self.config.redirects;

        match err {
            AccountError::ProviderError { description, .. } => {
                redirects.error_with_description(description)
            }
            // The session is already set; don't strand a signed-in user
            AccountError::ProfileLookupFailed(_) => next,
            _ => redirects.error_path.clone(),
        }
    }
}
