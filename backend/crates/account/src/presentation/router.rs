//! Account Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::{IdentityProvider, ProfileRepository};
use crate::infra::{HttpIdentityProvider, PgProfileRepository};
use crate::presentation::handlers::{self, AccountAppState};

/// Create the Account router with the HTTP provider and PostgreSQL profiles
pub fn account_router(
    provider: HttpIdentityProvider,
    profiles: PgProfileRepository,
    config: AccountConfig,
) -> Router {
    account_router_generic(provider, profiles, config)
}

/// Create a generic Account router for any collaborator implementation
pub fn account_router_generic<P, R>(provider: P, profiles: R, config: AccountConfig) -> Router
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        provider: Arc::new(provider),
        profiles: Arc::new(profiles),
        config: Arc::new(config),
    };

    Router::new()
        .route("/auth/callback", get(handlers::exchange_session::<P, R>))
        .route("/auth/session", get(handlers::session_status::<P, R>))
        .route("/auth/signout", post(handlers::sign_out::<P, R>))
        .route(
            "/api/account/deactivate",
            post(handlers::deactivate_account::<P, R>),
        )
        .with_state(state)
}
