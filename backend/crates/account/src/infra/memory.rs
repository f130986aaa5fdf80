//! In-Memory Implementations
//!
//! Stand-ins for the identity provider, profile storage and cookie jar.
//! Used by tests and local runs without external services. Handles are
//! cheap to clone and share one state, so a test can keep a handle while
//! the router owns another.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use platform::cookie::CookieOptions;
use platform::crypto::random_token;

use crate::domain::entity::{
    account::{Account, AccountMetadata},
    profile::{Profile, ProfileChanges},
    provider_session::ProviderSession,
};
use crate::domain::repository::{IdentityProvider, ProfileRepository, SessionStore};
use crate::domain::value_object::{
    account_id::AccountId, authorization_code::AuthorizationCode, onboarding_step::OnboardingStep,
};
use crate::error::{AccountError, AccountResult};

const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(3600);

// ============================================================================
// Identity Provider
// ============================================================================

#[derive(Default)]
struct ProviderState {
    accounts: HashMap<AccountId, Account>,
    /// Outstanding single-use codes
    codes: HashMap<String, AccountId>,
    /// Live access tokens
    sessions: HashMap<String, AccountId>,
    exchange_calls: usize,
    metadata_writes: usize,
    sign_outs: usize,
    fail_metadata_writes: bool,
}

impl ProviderState {
    fn open_session(&mut self, account_id: AccountId) -> (String, String) {
        let access_token = random_token(32);
        let refresh_token = random_token(32);
        self.sessions.insert(access_token.clone(), account_id);
        (access_token, refresh_token)
    }
}

/// In-memory identity provider
#[derive(Clone, Default)]
pub struct MemoryIdentityProvider {
    state: Arc<Mutex<ProviderState>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_account(&self, account: Account) {
        self.state
            .lock()
            .await
            .accounts
            .insert(account.account_id, account);
    }

    /// Issue a single-use authorization code, as the provider's consent
    /// screen would
    pub async fn issue_code(&self, account_id: AccountId) -> String {
        let code = random_token(16);
        self.state
            .lock()
            .await
            .codes
            .insert(code.clone(), account_id);
        code
    }

    /// Open a session directly; returns the access token
    pub async fn open_session(&self, account_id: AccountId) -> String {
        self.state.lock().await.open_session(account_id).0
    }

    pub async fn account(&self, account_id: &AccountId) -> Option<Account> {
        self.state.lock().await.accounts.get(account_id).cloned()
    }

    pub async fn is_session_active(&self, access_token: &str) -> bool {
        self.state.lock().await.sessions.contains_key(access_token)
    }

    pub async fn exchange_calls(&self) -> usize {
        self.state.lock().await.exchange_calls
    }

    pub async fn metadata_writes(&self) -> usize {
        self.state.lock().await.metadata_writes
    }

    pub async fn sign_outs(&self) -> usize {
        self.state.lock().await.sign_outs
    }

    /// Make every metadata write fail until reset
    pub async fn fail_metadata_writes(&self, fail: bool) {
        self.state.lock().await.fail_metadata_writes = fail;
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    async fn exchange_code(&self, code: &AuthorizationCode) -> AccountResult<ProviderSession> {
        let mut state = self.state.lock().await;
        state.exchange_calls += 1;

        let account_id = state
            .codes
            .remove(code.as_str())
            .ok_or_else(|| AccountError::Provider("invalid_grant: unknown or used code".into()))?;

        let account = state
            .accounts
            .get(&account_id)
            .cloned()
            .ok_or_else(|| AccountError::Provider("invalid_grant: account gone".into()))?;

        let (access_token, refresh_token) = state.open_session(account_id);

        Ok(ProviderSession {
            access_token,
            refresh_token,
            expires_in: ACCESS_TOKEN_TTL,
            account,
        })
    }

    async fn get_account(&self, access_token: &str) -> AccountResult<Option<Account>> {
        let state = self.state.lock().await;

        Ok(state
            .sessions
            .get(access_token)
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn update_metadata(
        &self,
        access_token: &str,
        metadata: &AccountMetadata,
    ) -> AccountResult<Account> {
        let mut state = self.state.lock().await;
        state.metadata_writes += 1;

        if state.fail_metadata_writes {
            return Err(AccountError::Provider("metadata write rejected".into()));
        }

        let account_id = *state
            .sessions
            .get(access_token)
            .ok_or(AccountError::Unauthorized)?;

        let account = state
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| AccountError::Provider("account not found".into()))?;
        account.apply_metadata(metadata);

        Ok(account.clone())
    }

    async fn sign_out(&self, access_token: &str) -> AccountResult<()> {
        let mut state = self.state.lock().await;
        state.sign_outs += 1;
        state.sessions.remove(access_token);
        Ok(())
    }
}

// ============================================================================
// Profile Repository
// ============================================================================

#[derive(Default)]
struct ProfileState {
    profiles: HashMap<AccountId, Profile>,
    reads: usize,
    updates: usize,
    fail_reads: bool,
    fail_updates: bool,
}

/// In-memory profile repository
#[derive(Clone, Default)]
pub struct MemoryProfileRepository {
    state: Arc<Mutex<ProfileState>>,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, account_id: AccountId, step: Option<OnboardingStep>) {
        self.state.lock().await.profiles.insert(
            account_id,
            Profile {
                account_id,
                onboarding_step: step,
                updated_at: Utc::now(),
            },
        );
    }

    pub async fn profile(&self, account_id: &AccountId) -> Option<Profile> {
        self.state.lock().await.profiles.get(account_id).cloned()
    }

    pub async fn reads(&self) -> usize {
        self.state.lock().await.reads
    }

    pub async fn updates(&self) -> usize {
        self.state.lock().await.updates
    }

    /// Make every read fail until reset
    pub async fn fail_reads(&self, fail: bool) {
        self.state.lock().await.fail_reads = fail;
    }

    /// Make every update fail until reset
    pub async fn fail_updates(&self, fail: bool) {
        self.state.lock().await.fail_updates = fail;
    }
}

impl ProfileRepository for MemoryProfileRepository {
    async fn find_by_account_id(&self, account_id: &AccountId) -> AccountResult<Option<Profile>> {
        let mut state = self.state.lock().await;
        state.reads += 1;

        if state.fail_reads {
            return Err(AccountError::Internal("profile store unavailable".into()));
        }

        Ok(state.profiles.get(account_id).cloned())
    }

    async fn update(&self, account_id: &AccountId, changes: &ProfileChanges) -> AccountResult<()> {
        let mut state = self.state.lock().await;
        state.updates += 1;

        if state.fail_updates {
            return Err(AccountError::Internal("profile store unavailable".into()));
        }

        if let Some(profile) = state.profiles.get_mut(account_id) {
            if let Some(step) = changes.onboarding_step {
                profile.onboarding_step = Some(step);
            }
            profile.updated_at = changes.updated_at;
        }

        Ok(())
    }
}

// ============================================================================
// Session Store
// ============================================================================

/// One recorded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionWrite {
    Set {
        name: String,
        value: String,
        options: CookieOptions,
    },
    Remove {
        name: String,
    },
}

/// In-memory session store
///
/// Reads see only the request's cookies, never writes made while handling
/// it. Writes are recorded in order, as a response would carry them.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    incoming: HashMap<String, String>,
    writes: Vec<SessionWrite>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request cookie
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.incoming.insert(name.to_string(), value.to_string());
        self
    }

    pub fn writes(&self) -> &[SessionWrite] {
        &self.writes
    }

    /// Value the browser holds for `name` once the response is applied
    pub fn value_after(&self, name: &str) -> Option<String> {
        let mut value = self.incoming.get(name).cloned();
        for write in &self.writes {
            match write {
                SessionWrite::Set { name: n, value: v, .. } if n == name => {
                    value = Some(v.clone());
                }
                SessionWrite::Remove { name: n } if n == name => value = None,
                _ => {}
            }
        }
        value
    }

    /// Store for the browser's next request
    pub fn next_request(&self) -> Self {
        let mut next = Self::new();
        let names = self
            .incoming
            .keys()
            .chain(self.writes.iter().map(|w| match w {
                SessionWrite::Set { name, .. } | SessionWrite::Remove { name } => name,
            }));
        for name in names {
            if let Some(value) = self.value_after(name) {
                next.incoming.insert(name.clone(), value);
            }
        }
        next
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.incoming.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str, options: &CookieOptions) {
        self.writes.push(SessionWrite::Set {
            name: name.to_string(),
            value: value.to_string(),
            options: options.clone(),
        });
    }

    fn remove(&mut self, name: &str, _options: &CookieOptions) {
        self.writes.push(SessionWrite::Remove {
            name: name.to_string(),
        });
    }
}
