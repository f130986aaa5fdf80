//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Exchange-flow errors never reach the browser as errors: the callback
//! handler turns each of them into a redirect. Deactivation-flow errors are
//! rendered as `{ "error": message }` with a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Shown for any deactivation failure other than a missing session
pub const SUPPORT_CONTACT_MESSAGE: &str =
    "We could not deactivate your account. Please try again or contact support.";

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Error)]
pub enum AccountError {
    // ------------------------------------------------------------------
    // Session exchange
    // ------------------------------------------------------------------
    /// Callback carried neither a code nor a provider error
    #[error("Callback carried neither an authorization code nor an error")]
    MissingCredentials,

    /// Provider redirected back with an error instead of a code
    #[error("Identity provider returned {code}: {description}")]
    ProviderError { code: String, description: String },

    /// Code exchange rejected or failed in transport
    #[error("Authorization code exchange failed: {0}")]
    ExchangeFailed(String),

    /// Profile read failed (not "not found")
    #[error("Profile lookup failed: {0}")]
    ProfileLookupFailed(String),

    // ------------------------------------------------------------------
    // Deactivation
    // ------------------------------------------------------------------
    /// No currently valid session
    #[error("Unauthorized")]
    Unauthorized,

    /// Required identity-record write failed
    #[error("Deactivation write failed: {0}")]
    DeactivationWriteFailed(String),

    /// Best-effort profile touch failed
    #[error("Profile touch failed: {0}")]
    ProfileTouchFailed(String),

    // ------------------------------------------------------------------
    // Infrastructure
    // ------------------------------------------------------------------
    /// Identity provider rejected a request or was unreachable
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AccountError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AccountError::Provider(format!("request timed out: {err}"))
        } else {
            AccountError::Provider(err.to_string())
        }
    }
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::MissingCredentials | AccountError::ProviderError { .. } => {
                StatusCode::BAD_REQUEST
            }
            AccountError::Unauthorized => StatusCode::UNAUTHORIZED,
            AccountError::ExchangeFailed(_) | AccountError::Provider(_) => StatusCode::BAD_GATEWAY,
            AccountError::ProfileLookupFailed(_)
            | AccountError::DeactivationWriteFailed(_)
            | AccountError::ProfileTouchFailed(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::MissingCredentials | AccountError::ProviderError { .. } => {
                ErrorKind::BadRequest
            }
            AccountError::Unauthorized => ErrorKind::Unauthorized,
            AccountError::ExchangeFailed(_) | AccountError::Provider(_) => ErrorKind::BadGateway,
            AccountError::ProfileLookupFailed(_)
            | AccountError::DeactivationWriteFailed(_)
            | AccountError::ProfileTouchFailed(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to show a user; never carries internal detail
    pub fn public_message(&self) -> &'static str {
        match self {
            AccountError::Unauthorized => "Unauthorized",
            AccountError::MissingCredentials
            | AccountError::ProviderError { .. }
            | AccountError::ExchangeFailed(_)
            | AccountError::ProfileLookupFailed(_) => "Sign-in could not be completed",
            AccountError::DeactivationWriteFailed(_)
            | AccountError::ProfileTouchFailed(_)
            | AccountError::Provider(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => SUPPORT_CONTACT_MESSAGE,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AccountError::ProviderError { code, description } => {
                tracing::warn!(
                    error = %code,
                    error_description = %description,
                    "Identity provider returned an error"
                );
            }
            AccountError::ExchangeFailed(detail) => {
                tracing::error!(detail = %detail, "Authorization code exchange failed");
            }
            AccountError::ProfileLookupFailed(detail) => {
                tracing::error!(detail = %detail, "Profile lookup failed after sign-in");
            }
            AccountError::DeactivationWriteFailed(detail) => {
                tracing::error!(detail = %detail, "Account deactivation write failed");
            }
            AccountError::ProfileTouchFailed(detail) => {
                tracing::warn!(detail = %detail, "Profile touch failed");
            }
            AccountError::Provider(detail) => {
                tracing::error!(detail = %detail, "Identity provider error");
            }
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::MissingCredentials | AccountError::Unauthorized => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
