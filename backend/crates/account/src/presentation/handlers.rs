//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    CheckSessionUseCase, DeactivateAccountUseCase, ExchangeSessionUseCase, SignOutUseCase,
};
use crate::domain::repository::{IdentityProvider, ProfileRepository};
use crate::error::{AccountError, AccountResult};
use crate::infra::cookie_store::CookieJarStore;
use crate::presentation::dto::{CallbackParams, DeactivateResponse, SessionStatusResponse};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<P, R>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    pub provider: Arc<P>,
    pub profiles: Arc<R>,
    pub config: Arc<AccountConfig>,
}

// ============================================================================
// Callback
// ============================================================================

/// GET /auth/callback
///
/// Always answers with a redirect; failures land on the error page.
pub async fn exchange_session<P, R>(
    State(state): State<AccountAppState<P, R>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = ExchangeSessionUseCase::new(
        state.provider.clone(),
        state.profiles.clone(),
        state.config.clone(),
    );

    let mut store = CookieJarStore::new(jar);
    let location = use_case.execute(params.into(), &mut store).await;

    (store.into_jar(), Redirect::to(&location))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /auth/session
pub async fn session_status<P, R>(
    State(state): State<AccountAppState<P, R>>,
    jar: CookieJar,
) -> Json<SessionStatusResponse>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = CheckSessionUseCase::new(state.provider.clone(), state.config.clone());

    match use_case.execute(&CookieJarStore::new(jar)).await {
        Ok(session) => Json(session.into()),
        Err(AccountError::Unauthorized) => Json(SessionStatusResponse::anonymous()),
        Err(e) => {
            e.log();
            Json(SessionStatusResponse::anonymous())
        }
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /auth/signout
pub async fn sign_out<P, R>(
    State(state): State<AccountAppState<P, R>>,
    jar: CookieJar,
) -> impl IntoResponse
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.provider.clone(), state.config.clone());

    let mut store = CookieJarStore::new(jar);
    use_case.execute(&mut store).await;

    (StatusCode::NO_CONTENT, store.into_jar())
}

// ============================================================================
// Deactivation
// ============================================================================

/// POST /api/account/deactivate
pub async fn deactivate_account<P, R>(
    State(state): State<AccountAppState<P, R>>,
    jar: CookieJar,
) -> AccountResult<(CookieJar, Json<DeactivateResponse>)>
where
    P: IdentityProvider + Clone + Send + Sync + 'static,
    R: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeactivateAccountUseCase::new(
        state.provider.clone(),
        state.profiles.clone(),
        state.config.clone(),
    );

    let mut store = CookieJarStore::new(jar);
    let output = use_case.execute(&mut store).await?;

    Ok((
        store.into_jar(),
        Json(DeactivateResponse {
            success: true,
            message: output.message.to_string(),
        }),
    ))
}
