//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::time::Duration;

use platform::cookie::CookieOptions;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::services::Destination;

/// Redirect targets used by the callback handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    /// Main application, once onboarding is complete
    pub landing_path: String,
    /// Start of onboarding
    pub onboarding_path: String,
    /// Generic, non-leaking sign-in error page
    pub error_path: String,
    /// Used when `next` is absent or not a local path
    pub default_next: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            landing_path: "/dashboard".to_string(),
            onboarding_path: "/onboarding".to_string(),
            error_path: "/auth/auth-code-error".to_string(),
            default_next: "/".to_string(),
        }
    }
}

impl RedirectTargets {
    pub fn path_for(&self, destination: Destination) -> &str {
        match destination {
            Destination::Landing => &self.landing_path,
            Destination::OnboardingEntry => &self.onboarding_path,
        }
    }

    /// Error page carrying a user-visible description
    pub fn error_with_description(&self, description: &str) -> String {
        format!(
            "{}?error={}",
            self.error_path,
            urlencoding::encode(description)
        )
    }

    /// Accept `next` only when it is a local absolute path
    pub fn sanitize_next(&self, next: Option<&str>) -> String {
        match next {
            Some(path) if is_local_path(path) => path.to_string(),
            _ => self.default_next.clone(),
        }
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.chars().any(char::is_control)
}

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Access token cookie name
    pub access_cookie_name: String,
    /// Refresh token cookie name
    pub refresh_cookie_name: String,
    /// Lifetime of the refresh cookie
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    pub redirects: RedirectTargets,
    /// Clear the deactivated flag after a successful sign-in
    pub reactivate_on_login: bool,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "account_access_token".to_string(),
            refresh_cookie_name: "account_refresh_token".to_string(),
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            redirects: RedirectTargets::default(),
            reactivate_on_login: true,
        }
    }
}

impl AccountConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Set the `SameSite` policy
    ///
    /// Browsers drop `SameSite=None` cookies that lack `Secure`, so `None`
    /// also turns `Secure` on.
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.cookie_same_site = same_site;
        if same_site == SameSite::None {
            self.cookie_secure = true;
        }
        self
    }

    /// Options shared by both session cookies
    pub fn cookie_options(&self) -> CookieOptions {
        CookieOptions {
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age: None,
        }
    }
}

/// Identity provider client configuration
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    /// e.g. `https://id.example.com/auth/v1`
    pub base_url: String,
    /// Project key sent as the `apikey` header
    pub api_key: String,
    /// Applies to every provider request
    pub timeout: Duration,
}

impl IdentityProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }
}
