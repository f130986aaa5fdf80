//! Provider Session Entity
//!
//! Token pair issued by the identity provider for one account.

use std::fmt;
use std::time::Duration;

use crate::domain::entity::account::Account;

#[derive(Clone)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token
    pub expires_in: Duration,
    pub account: Account,
}

impl fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSession")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("expires_in", &self.expires_in)
            .field("account", &self.account)
            .finish()
    }
}
