//! Identity Provider HTTP Client
//!
//! Talks to the identity provider's REST endpoints: authorization-code
//! exchange at `/token`, account lookup and metadata update at `/user`, and
//! `/logout`. Every request carries the project key as `apikey`;
//! per-session calls add the access token as a bearer.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::application::config::IdentityProviderConfig;
use crate::domain::entity::{
    account::{Account, AccountMetadata},
    provider_session::ProviderSession,
};
use crate::domain::repository::IdentityProvider;
use crate::domain::value_object::{
    account_id::AccountId, account_status::AccountStatus, authorization_code::AuthorizationCode,
};
use crate::error::{AccountError, AccountResult};

/// Identity provider reached over HTTP
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    config: IdentityProviderConfig,
}

impl HttpIdentityProvider {
    pub fn new(config: IdentityProviderConfig) -> AccountResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AccountError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.config.api_key)
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    auth_code: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    user: UserResponse,
}

#[derive(Deserialize)]
struct UserResponse {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    /// Free-form; other apps write their own keys here too
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl UserResponse {
    fn into_account(self) -> Account {
        let metadata = self.account_metadata();
        let mut account = Account::new(AccountId::from_uuid(self.id), self.email);
        account.apply_metadata(&metadata);
        account
    }

    /// Read status fields leniently; anything unreadable counts as active
    fn account_metadata(&self) -> AccountMetadata {
        let status = match self.user_metadata.get("account_status") {
            None | Some(serde_json::Value::Null) => AccountStatus::Active,
            Some(value) => match value.as_str().and_then(AccountStatus::from_code) {
                Some(status) => status,
                None => {
                    tracing::warn!(
                        account_id = %self.id,
                        account_status = %value,
                        "Unrecognized account status in metadata, treating as active"
                    );
                    AccountStatus::Active
                }
            },
        };

        if !status.is_deactivated() {
            return AccountMetadata::active();
        }

        let deactivated_at = self
            .user_metadata
            .get("deactivated_at")
            .and_then(serde_json::Value::as_str)
            .and_then(|at| at.parse::<DateTime<Utc>>().ok());

        AccountMetadata {
            account_status: status,
            deactivated_at,
        }
    }
}

#[derive(Serialize)]
struct UpdateUserRequest<'a> {
    data: &'a AccountMetadata,
}

/// Turn a non-success response into a provider error
async fn ensure_success(response: Response) -> AccountResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AccountError::Provider(format!("{status}: {body}")))
}

impl IdentityProvider for HttpIdentityProvider {
    async fn exchange_code(&self, code: &AuthorizationCode) -> AccountResult<ProviderSession> {
        let response = self
            .request(self.client.post(self.url("/token")))
            .query(&[("grant_type", "authorization_code")])
            .json(&TokenRequest {
                auth_code: code.as_str(),
            })
            .send()
            .await?;

        let token: TokenResponse = ensure_success(response).await?.json().await?;

        Ok(ProviderSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: Duration::from_secs(token.expires_in),
            account: token.user.into_account(),
        })
    }

    async fn get_account(&self, access_token: &str) -> AccountResult<Option<Account>> {
        let response = self
            .request(self.client.get(self.url("/user")))
            .bearer_auth(access_token)
            .send()
            .await?;

        // Expired or revoked token
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let user: UserResponse = ensure_success(response).await?.json().await?;
        Ok(Some(user.into_account()))
    }

    async fn update_metadata(
        &self,
        access_token: &str,
        metadata: &AccountMetadata,
    ) -> AccountResult<Account> {
        let response = self
            .request(self.client.put(self.url("/user")))
            .bearer_auth(access_token)
            .json(&UpdateUserRequest { data: metadata })
            .send()
            .await?;

        let user: UserResponse = ensure_success(response).await?.json().await?;
        Ok(user.into_account())
    }

    async fn sign_out(&self, access_token: &str) -> AccountResult<()> {
        let response = self
            .request(self.client.post(self.url("/logout")))
            .bearer_auth(access_token)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}
