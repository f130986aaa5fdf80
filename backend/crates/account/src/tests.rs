//! Scenario tests for the Account crate
//!
//! Use cases run against in-memory collaborators; router tests drive the
//! real handlers with `oneshot`.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use crate::application::config::AccountConfig;
    use crate::domain::entity::account::Account;
    use crate::domain::value_object::{account_id::AccountId, onboarding_step::OnboardingStep};
    use crate::infra::memory::{MemoryIdentityProvider, MemoryProfileRepository};

    pub struct Harness {
        pub provider: MemoryIdentityProvider,
        pub profiles: MemoryProfileRepository,
        pub config: Arc<AccountConfig>,
        pub account: Account,
    }

    impl Harness {
        pub fn provider(&self) -> Arc<MemoryIdentityProvider> {
            Arc::new(self.provider.clone())
        }

        pub fn profiles(&self) -> Arc<MemoryProfileRepository> {
            Arc::new(self.profiles.clone())
        }
    }

    /// One registered account; `None` leaves it without a profile row
    pub async fn harness(step: Option<Option<OnboardingStep>>) -> Harness {
        harness_with(step, AccountConfig::development()).await
    }

    pub async fn harness_with(
        step: Option<Option<OnboardingStep>>,
        config: AccountConfig,
    ) -> Harness {
        let provider = MemoryIdentityProvider::new();
        let profiles = MemoryProfileRepository::new();

        let account = Account::new(AccountId::new(), Some("member@example.com".to_string()));
        provider.insert_account(account.clone()).await;

        if let Some(step) = step {
            profiles.insert_profile(account.account_id, step).await;
        }

        Harness {
            provider,
            profiles,
            config: Arc::new(config),
            account,
        }
    }
}

#[cfg(test)]
mod exchange_tests {
    use super::support::*;
    use crate::application::config::AccountConfig;
    use crate::application::{ExchangeInput, ExchangeSessionUseCase};
    use crate::domain::repository::IdentityProvider;
    use crate::domain::value_object::onboarding_step::OnboardingStep;
    use crate::infra::memory::{
        MemoryIdentityProvider, MemoryProfileRepository, MemorySessionStore, SessionWrite,
    };

    fn use_case(h: &Harness) -> ExchangeSessionUseCase<MemoryIdentityProvider, MemoryProfileRepository> {
        ExchangeSessionUseCase::new(h.provider(), h.profiles(), h.config.clone())
    }

    fn with_code(code: &str) -> ExchangeInput {
        ExchangeInput {
            code: Some(code.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_complete_profile_lands() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let code = h.provider.issue_code(h.account.account_id).await;

        let mut store = MemorySessionStore::new();
        let location = use_case(&h).execute(with_code(&code), &mut store).await;

        assert_eq!(location, "/dashboard");
    }

    #[tokio::test]
    async fn test_incomplete_or_missing_profile_enters_onboarding() {
        for step in [
            None,
            Some(None),
            Some(Some(OnboardingStep::NotStarted)),
            Some(Some(OnboardingStep::Interests)),
            Some(Some(OnboardingStep::DealBreakers)),
        ] {
            let h = harness(step).await;
            let code = h.provider.issue_code(h.account.account_id).await;

            let mut store = MemorySessionStore::new();
            let location = use_case(&h).execute(with_code(&code), &mut store).await;

            assert_eq!(location, "/onboarding", "profile {step:?}");
        }
    }

    #[tokio::test]
    async fn test_success_stores_session_cookies() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let code = h.provider.issue_code(h.account.account_id).await;

        let mut store = MemorySessionStore::new();
        use_case(&h).execute(with_code(&code), &mut store).await;

        let access = store
            .value_after(&h.config.access_cookie_name)
            .expect("access cookie set");
        assert!(h.provider.is_session_active(&access).await);
        assert!(store.value_after(&h.config.refresh_cookie_name).is_some());

        for write in store.writes() {
            match write {
                SessionWrite::Set { options, .. } => {
                    assert!(options.http_only);
                    assert!(options.max_age.is_some());
                }
                SessionWrite::Remove { .. } => panic!("unexpected removal"),
            }
        }
    }

    #[tokio::test]
    async fn test_code_exchanges_at_most_once() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let code = h.provider.issue_code(h.account.account_id).await;
        let use_case = use_case(&h);

        let mut first = MemorySessionStore::new();
        assert_eq!(use_case.execute(with_code(&code), &mut first).await, "/dashboard");

        let mut second = MemorySessionStore::new();
        let location = use_case.execute(with_code(&code), &mut second).await;

        assert_eq!(location, "/auth/auth-code-error");
        assert!(second.writes().is_empty());
        assert_eq!(h.provider.exchange_calls().await, 2);
        // One profile read, from the first call only
        assert_eq!(h.profiles.reads().await, 1);
    }

    #[tokio::test]
    async fn test_provider_error_skips_exchange() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let code = h.provider.issue_code(h.account.account_id).await;

        let input = ExchangeInput {
            code: Some(code),
            error: Some("access_denied".to_string()),
            error_description: Some("User cancelled".to_string()),
            ..Default::default()
        };

        let mut store = MemorySessionStore::new();
        let location = use_case(&h).execute(input, &mut store).await;

        assert_eq!(location, "/auth/auth-code-error?error=User%20cancelled");
        let (_, encoded) = location.split_once("?error=").unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), "User cancelled");

        assert_eq!(h.provider.exchange_calls().await, 0);
        assert_eq!(h.profiles.reads().await, 0);
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_without_description_uses_code() {
        let h = harness(None).await;
        let input = ExchangeInput {
            error: Some("server_error".to_string()),
            ..Default::default()
        };

        let mut store = MemorySessionStore::new();
        let location = use_case(&h).execute(input, &mut store).await;

        assert_eq!(location, "/auth/auth-code-error?error=server_error");
    }

    #[tokio::test]
    async fn test_missing_code_and_error_matches_failed_exchange() {
        let h = harness(None).await;

        let mut store = MemorySessionStore::new();
        let missing = use_case(&h)
            .execute(ExchangeInput::default(), &mut store)
            .await;

        let mut store = MemorySessionStore::new();
        let failed = use_case(&h).execute(with_code("bogus"), &mut store).await;

        assert_eq!(missing, "/auth/auth-code-error");
        assert_eq!(missing, failed);
        // Only the bogus code reached the provider
        assert_eq!(h.provider.exchange_calls().await, 1);
    }

    #[tokio::test]
    async fn test_blank_code_is_missing() {
        let h = harness(None).await;

        let mut store = MemorySessionStore::new();
        let location = use_case(&h).execute(with_code("   "), &mut store).await;

        assert_eq!(location, "/auth/auth-code-error");
        assert_eq!(h.provider.exchange_calls().await, 0);
    }

    #[tokio::test]
    async fn test_profile_read_failure_returns_to_next() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        h.profiles.fail_reads(true).await;
        let code = h.provider.issue_code(h.account.account_id).await;

        let input = ExchangeInput {
            code: Some(code),
            next: Some("/settings".to_string()),
            ..Default::default()
        };

        let mut store = MemorySessionStore::new();
        let location = use_case(&h).execute(input, &mut store).await;

        assert_eq!(location, "/settings");
        // The session was already established
        assert!(store.value_after(&h.config.access_cookie_name).is_some());
    }

    #[tokio::test]
    async fn test_profile_read_failure_defaults_to_root() {
        let h = harness(None).await;
        h.profiles.fail_reads(true).await;

        for next in [None, Some("https://evil.example/"), Some("//evil.example")] {
            let code = h.provider.issue_code(h.account.account_id).await;
            let input = ExchangeInput {
                code: Some(code),
                next: next.map(str::to_string),
                ..Default::default()
            };

            let mut store = MemorySessionStore::new();
            let location = use_case(&h).execute(input, &mut store).await;

            assert_eq!(location, "/", "next {next:?}");
        }
    }

    #[tokio::test]
    async fn test_sign_in_reactivates_deactivated_account() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let token = h.provider.open_session(h.account.account_id).await;
        let metadata = h.account.deactivation_metadata(chrono::Utc::now());
        h.provider.update_metadata(&token, &metadata).await.unwrap();

        let code = h.provider.issue_code(h.account.account_id).await;
        let mut store = MemorySessionStore::new();
        let location = use_case(&h).execute(with_code(&code), &mut store).await;

        assert_eq!(location, "/dashboard");
        let account = h.provider.account(&h.account.account_id).await.unwrap();
        assert!(!account.is_deactivated());
        assert!(account.deactivated_at.is_none());
    }

    #[tokio::test]
    async fn test_failed_reactivation_keeps_destination() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let token = h.provider.open_session(h.account.account_id).await;
        h.provider
            .update_metadata(&token, &h.account.deactivation_metadata(chrono::Utc::now()))
            .await
            .unwrap();
        h.provider.fail_metadata_writes(true).await;

        let code = h.provider.issue_code(h.account.account_id).await;
        let mut store = MemorySessionStore::new();
        let location = use_case(&h).execute(with_code(&code), &mut store).await;

        assert_eq!(location, "/dashboard");
        let account = h.provider.account(&h.account.account_id).await.unwrap();
        assert!(account.is_deactivated());
    }

    #[tokio::test]
    async fn test_reactivation_can_be_disabled() {
        let config = AccountConfig {
            reactivate_on_login: false,
            ..AccountConfig::development()
        };
        let h = harness_with(Some(Some(OnboardingStep::Complete)), config).await;
        let token = h.provider.open_session(h.account.account_id).await;
        h.provider
            .update_metadata(&token, &h.account.deactivation_metadata(chrono::Utc::now()))
            .await
            .unwrap();

        let code = h.provider.issue_code(h.account.account_id).await;
        let mut store = MemorySessionStore::new();
        use_case(&h).execute(with_code(&code), &mut store).await;

        let account = h.provider.account(&h.account.account_id).await.unwrap();
        assert!(account.is_deactivated());
        assert_eq!(h.provider.metadata_writes().await, 1);
    }

    #[tokio::test]
    async fn test_active_account_sign_in_writes_no_metadata() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let code = h.provider.issue_code(h.account.account_id).await;

        let mut store = MemorySessionStore::new();
        use_case(&h).execute(with_code(&code), &mut store).await;

        assert_eq!(h.provider.metadata_writes().await, 0);
    }
}

#[cfg(test)]
mod deactivation_tests {
    use super::support::*;
    use crate::application::deactivate_account::DEACTIVATED_MESSAGE;
    use crate::application::{CheckSessionUseCase, DeactivateAccountUseCase};
    use crate::domain::value_object::{
        account_status::AccountStatus, onboarding_step::OnboardingStep,
    };
    use crate::error::{AccountError, SUPPORT_CONTACT_MESSAGE};
    use crate::infra::memory::{
        MemoryIdentityProvider, MemoryProfileRepository, MemorySessionStore, SessionWrite,
    };
    use axum::http::StatusCode;

    fn use_case(h: &Harness) -> DeactivateAccountUseCase<MemoryIdentityProvider, MemoryProfileRepository> {
        DeactivateAccountUseCase::new(h.provider(), h.profiles(), h.config.clone())
    }

    async fn signed_in(h: &Harness) -> (String, MemorySessionStore) {
        let token = h.provider.open_session(h.account.account_id).await;
        let store = MemorySessionStore::new().with_cookie(&h.config.access_cookie_name, &token);
        (token, store)
    }

    fn removed(store: &MemorySessionStore, name: &str) -> bool {
        store
            .writes()
            .iter()
            .any(|w| matches!(w, SessionWrite::Remove { name: n } if n == name))
    }

    #[tokio::test]
    async fn test_deactivation_runs_all_steps() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let before = h.profiles.profile(&h.account.account_id).await.unwrap();
        let (token, mut store) = signed_in(&h).await;

        let output = use_case(&h).execute(&mut store).await.unwrap();

        assert_eq!(output.message, DEACTIVATED_MESSAGE);
        assert!(output.profile_touched);
        assert_eq!(output.account.status, AccountStatus::Deactivated);

        let account = h.provider.account(&h.account.account_id).await.unwrap();
        assert!(account.is_deactivated());
        assert!(account.deactivated_at.is_some());

        let after = h.profiles.profile(&h.account.account_id).await.unwrap();
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.onboarding_step, before.onboarding_step);
        assert_eq!(h.profiles.updates().await, 1);

        assert!(!h.provider.is_session_active(&token).await);
        assert!(removed(&store, &h.config.access_cookie_name));
        assert!(removed(&store, &h.config.refresh_cookie_name));
    }

    #[tokio::test]
    async fn test_deactivation_twice_keeps_first_stamp() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;

        let (_, mut store) = signed_in(&h).await;
        use_case(&h).execute(&mut store).await.unwrap();
        let first = h.provider.account(&h.account.account_id).await.unwrap();

        // The first call signed the caller out; sign in again
        let (_, mut store) = signed_in(&h).await;
        let output = use_case(&h).execute(&mut store).await.unwrap();
        let second = h.provider.account(&h.account.account_id).await.unwrap();

        assert!(second.is_deactivated());
        assert_eq!(second.deactivated_at, first.deactivated_at);
        assert_eq!(output.account, second);
    }

    #[tokio::test]
    async fn test_profile_touch_failure_is_swallowed() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        h.profiles.fail_updates(true).await;
        let (token, mut store) = signed_in(&h).await;

        let output = use_case(&h).execute(&mut store).await.unwrap();

        assert!(!output.profile_touched);
        assert!(h.provider.account(&h.account.account_id).await.unwrap().is_deactivated());
        assert_eq!(h.provider.sign_outs().await, 1);
        assert!(!h.provider.is_session_active(&token).await);
        assert!(removed(&store, &h.config.access_cookie_name));
    }

    #[tokio::test]
    async fn test_missing_profile_row_still_succeeds() {
        let h = harness(None).await;
        let (_, mut store) = signed_in(&h).await;

        let output = use_case(&h).execute(&mut store).await.unwrap();

        assert!(output.profile_touched);
        assert!(h.provider.account(&h.account.account_id).await.unwrap().is_deactivated());
    }

    #[tokio::test]
    async fn test_no_session_is_unauthorized_without_writes() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;

        for mut store in [
            MemorySessionStore::new(),
            MemorySessionStore::new().with_cookie(&h.config.access_cookie_name, ""),
            MemorySessionStore::new().with_cookie(&h.config.access_cookie_name, "revoked"),
        ] {
            let err = use_case(&h).execute(&mut store).await.unwrap_err();

            assert!(matches!(err, AccountError::Unauthorized));
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
            assert!(store.writes().is_empty());
        }

        assert_eq!(h.provider.metadata_writes().await, 0);
        assert_eq!(h.provider.sign_outs().await, 0);
        assert_eq!(h.profiles.updates().await, 0);
    }

    #[tokio::test]
    async fn test_identity_write_failure_stops_saga() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        h.provider.fail_metadata_writes(true).await;
        let (token, mut store) = signed_in(&h).await;

        let err = use_case(&h).execute(&mut store).await.unwrap_err();

        assert!(matches!(err, AccountError::DeactivationWriteFailed(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), SUPPORT_CONTACT_MESSAGE);

        assert_eq!(h.profiles.updates().await, 0);
        assert_eq!(h.provider.sign_outs().await, 0);
        assert!(h.provider.is_session_active(&token).await);
        assert!(store.writes().is_empty());
        assert!(!h.provider.account(&h.account.account_id).await.unwrap().is_deactivated());
    }

    #[tokio::test]
    async fn test_session_is_gone_after_deactivation() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let (_, mut store) = signed_in(&h).await;

        use_case(&h).execute(&mut store).await.unwrap();

        let check = CheckSessionUseCase::new(h.provider(), h.config.clone());
        let result = check.execute(&store.next_request()).await;
        assert!(matches!(result, Err(AccountError::Unauthorized)));
    }
}

#[cfg(test)]
mod session_tests {
    use super::support::*;
    use crate::application::{CheckSessionUseCase, SignOutUseCase};
    use crate::error::AccountError;
    use crate::infra::memory::MemorySessionStore;

    #[tokio::test]
    async fn test_check_session_resolves_account() {
        let h = harness(None).await;
        let token = h.provider.open_session(h.account.account_id).await;
        let store = MemorySessionStore::new().with_cookie(&h.config.access_cookie_name, &token);

        let session = CheckSessionUseCase::new(h.provider(), h.config.clone())
            .execute(&store)
            .await
            .unwrap();

        assert_eq!(session.access_token, token);
        assert_eq!(session.account, h.account);
    }

    #[tokio::test]
    async fn test_check_session_without_cookie() {
        let h = harness(None).await;

        let result = CheckSessionUseCase::new(h.provider(), h.config.clone())
            .execute(&MemorySessionStore::new())
            .await;

        assert!(matches!(result, Err(AccountError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_sign_out_revokes_and_clears() {
        let h = harness(None).await;
        let token = h.provider.open_session(h.account.account_id).await;
        let mut store = MemorySessionStore::new()
            .with_cookie(&h.config.access_cookie_name, &token)
            .with_cookie(&h.config.refresh_cookie_name, "refresh");

        SignOutUseCase::new(h.provider(), h.config.clone())
            .execute(&mut store)
            .await;

        assert!(!h.provider.is_session_active(&token).await);
        assert_eq!(store.value_after(&h.config.access_cookie_name), None);
        assert_eq!(store.value_after(&h.config.refresh_cookie_name), None);
    }

    #[tokio::test]
    async fn test_sign_out_without_session_only_clears() {
        let h = harness(None).await;
        let mut store = MemorySessionStore::new();

        SignOutUseCase::new(h.provider(), h.config.clone())
            .execute(&mut store)
            .await;

        assert_eq!(h.provider.sign_outs().await, 0);
        assert_eq!(store.writes().len(), 2);
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::*;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::domain::value_object::onboarding_step::OnboardingStep;
    use crate::error::SUPPORT_CONTACT_MESSAGE;
    use crate::presentation::router::account_router_generic;

    fn router(h: &Harness) -> Router {
        account_router_generic(
            h.provider.clone(),
            h.profiles.clone(),
            (*h.config).clone(),
        )
    }

    fn get(uri: &str, cookie: Option<String>) -> Request<Body> {
        request("GET", uri, cookie)
    }

    fn post(uri: &str, cookie: Option<String>) -> Request<Body> {
        request("POST", uri, cookie)
    }

    fn request(method: &str, uri: &str, cookie: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn session_cookie(h: &Harness) -> (String, String) {
        let token = h.provider.open_session(h.account.account_id).await;
        let cookie = format!(
            "{}={}; {}=refresh",
            h.config.access_cookie_name, token, h.config.refresh_cookie_name
        );
        (token, cookie)
    }

    #[tokio::test]
    async fn test_callback_sets_cookies_and_redirects() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let code = h.provider.issue_code(h.account.account_id).await;

        let response = router(&h)
            .oneshot(get(&format!("/auth/callback?code={code}"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");

        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
        assert!(
            cookies
                .iter()
                .any(|c| c.starts_with(&format!("{}=", h.config.access_cookie_name)))
        );
    }

    #[tokio::test]
    async fn test_callback_error_redirects_without_cookies() {
        let h = harness(None).await;

        let response = router(&h)
            .oneshot(get(
                "/auth/callback?error=access_denied&error_description=User%20cancelled",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/auth/auth-code-error?error=User%20cancelled"
        );
        assert!(set_cookies(&response).is_empty());
        assert_eq!(h.provider.exchange_calls().await, 0);
    }

    #[tokio::test]
    async fn test_callback_without_params_redirects_to_error() {
        let h = harness(None).await;

        let response = router(&h)
            .oneshot(get("/auth/callback", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/auth-code-error");
    }

    #[tokio::test]
    async fn test_session_status() {
        let h = harness(None).await;
        let (_, cookie) = session_cookie(&h).await;

        let response = router(&h)
            .oneshot(get("/auth/session", Some(cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["accountId"], h.account.account_id.to_string());
        assert_eq!(body["email"], "member@example.com");
        assert_eq!(body["accountStatus"], "active");

        let response = router(&h)
            .oneshot(get("/auth/session", None))
            .await
            .unwrap();
        let body = json(response).await;
        assert_eq!(body["authenticated"], false);
        assert!(body["accountId"].is_null());
    }

    #[tokio::test]
    async fn test_sign_out_returns_no_content() {
        let h = harness(None).await;
        let (token, cookie) = session_cookie(&h).await;

        let response = router(&h)
            .oneshot(post("/auth/signout", Some(cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(set_cookies(&response).iter().any(|c| c.contains("Max-Age=0")));
        assert!(!h.provider.is_session_active(&token).await);
    }

    #[tokio::test]
    async fn test_deactivate_success() {
        let h = harness(Some(Some(OnboardingStep::Complete))).await;
        let (token, cookie) = session_cookie(&h).await;

        let response = router(&h)
            .oneshot(post("/api/account/deactivate", Some(cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let removals = set_cookies(&response)
            .into_iter()
            .filter(|c| c.contains("Max-Age=0"))
            .count();
        assert_eq!(removals, 2);

        let body = json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["message"].as_str().unwrap().contains("deactivated"));
        assert!(!h.provider.is_session_active(&token).await);
    }

    #[tokio::test]
    async fn test_deactivate_without_session_is_401() {
        let h = harness(None).await;

        let response = router(&h)
            .oneshot(post("/api/account/deactivate", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&response).is_empty());
        let body = json(response).await;
        assert!(body["error"].is_string());
        assert_eq!(h.provider.metadata_writes().await, 0);
    }

    #[tokio::test]
    async fn test_deactivate_write_failure_is_500() {
        let h = harness(None).await;
        h.provider.fail_metadata_writes(true).await;
        let (_, cookie) = session_cookie(&h).await;

        let response = router(&h)
            .oneshot(post("/api/account/deactivate", Some(cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json(response).await;
        assert_eq!(body["error"], SUPPORT_CONTACT_MESSAGE);
    }
}
