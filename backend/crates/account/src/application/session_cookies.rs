//! Session Cookies
//!
//! Reading and writing the access/refresh token pair through a
//! [`SessionStore`].

use crate::application::config::AccountConfig;
use crate::domain::entity::provider_session::ProviderSession;
use crate::domain::repository::SessionStore;

/// Persist a freshly issued session
pub fn store_session<S: SessionStore>(
    store: &mut S,
    config: &AccountConfig,
    session: &ProviderSession,
) {
    let access = config.cookie_options().with_max_age(session.expires_in);
    let refresh = config.cookie_options().with_max_age(config.session_ttl);

    store.set(&config.access_cookie_name, &session.access_token, &access);
    store.set(&config.refresh_cookie_name, &session.refresh_token, &refresh);
}

/// Access token of the incoming request, if any
pub fn access_token<S: SessionStore>(store: &S, config: &AccountConfig) -> Option<String> {
    store
        .get(&config.access_cookie_name)
        .filter(|token| !token.is_empty())
}

/// Drop both session cookies
pub fn clear_session<S: SessionStore>(store: &mut S, config: &AccountConfig) {
    let options = config.cookie_options();
    store.remove(&config.access_cookie_name, &options);
    store.remove(&config.refresh_cookie_name, &options);
}
