//! Deactivate Account Use Case
//!
//! Self-service deactivation of the caller's own account, run as a saga over
//! two independent stores:
//!
//! 1. Identity record: status = deactivated, deactivated_at stamped.
//!    Required; failure aborts before anything else runs.
//! 2. Profile: `updated_at` touched as a secondary marker. Best-effort;
//!    failure is logged and swallowed.
//! 3. Sign-out of the caller's session, once step 1 has succeeded.
//!
//! The two writes share no transaction. Repeating the call is safe: the
//! account stays deactivated and keeps its first `deactivated_at`.

use chrono::Utc;
use std::sync::Arc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AccountConfig;
use crate::application::sign_out::SignOutUseCase;
use crate::domain::entity::account::Account;
use crate::domain::entity::profile::ProfileChanges;
use crate::domain::repository::{IdentityProvider, ProfileRepository, SessionStore};
use crate::error::{AccountError, AccountResult};

pub const DEACTIVATED_MESSAGE: &str =
    "Your account has been deactivated. Sign in again at any time to reactivate it.";

/// Deactivate account output
#[derive(Debug, Clone)]
pub struct DeactivateOutput {
    pub account: Account,
    pub message: &'static str,
    /// False when the best-effort profile touch failed
    pub profile_touched: bool,
}

/// Deactivate account use case
pub struct DeactivateAccountUseCase<P, R>
where
    P: IdentityProvider,
    R: ProfileRepository,
{
    provider: Arc<P>,
    profile_repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<P, R> DeactivateAccountUseCase<P, R>
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

    /// Deactivate the account owning the request's session
    ///
    /// Takes no account parameter: the target is always the session's own
    /// account.
    pub async fn execute<S>(&self, store: &mut S) -> AccountResult<DeactivateOutput>
    where
        S: SessionStore,
    {
        let session = CheckSessionUseCase::new(self.provider.clone(), self.config.clone())
            .execute(&*store)
            .await
            .map_err(|e| match e {
                AccountError::Unauthorized => AccountError::Unauthorized,
                other => AccountError::Internal(format!("session check failed: {other}")),
            })?;

        let account_id = session.account.account_id;
        let already_deactivated = session.account.is_deactivated();

        // Step A: required
        let metadata = session.account.deactivation_metadata(Utc::now());
        let account = self
            .provider
            .update_metadata(&session.access_token, &metadata)
            .await
            .map_err(|e| AccountError::DeactivationWriteFailed(e.to_string()))?;

        // Step B: best-effort
        let profile_touched = match self
            .profile_repo
            .update(&account_id, &ProfileChanges::touch(Utc::now()))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                AccountError::ProfileTouchFailed(e.to_string()).log();
                false
            }
        };

        // Step C: always, once step A has succeeded
        SignOutUseCase::new(self.provider.clone(), self.config.clone())
            .execute(store)
            .await;

        tracing::info!(
            account_id = %account_id,
            already_deactivated,
            profile_touched,
            "Account deactivated"
        );

        Ok(DeactivateOutput {
            account,
            message: DEACTIVATED_MESSAGE,
            profile_touched,
        })
    }
}
