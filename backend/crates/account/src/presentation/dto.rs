//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::{CurrentSession, ExchangeInput};

// ============================================================================
// Callback
// ============================================================================

/// Query parameters of the identity-provider redirect
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    /// Relative path to return to when the profile can't be read
    pub next: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl From<CallbackParams> for ExchangeInput {
    fn from(params: CallbackParams) -> Self {
        Self {
            code: params.code,
            next: params.next,
            error: params.error,
            error_description: params.error_description,
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub account_id: Option<String>,
    pub email: Option<String>,
    pub account_status: Option<String>,
}

impl SessionStatusResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            account_id: None,
            email: None,
            account_status: None,
        }
    }
}

impl From<CurrentSession> for SessionStatusResponse {
    fn from(session: CurrentSession) -> Self {
        Self {
            authenticated: true,
            account_id: Some(session.account.account_id.to_string()),
            email: session.account.email,
            account_status: Some(session.account.status.code().to_string()),
        }
    }
}

// ============================================================================
// Deactivation
// ============================================================================

/// Deactivation response
#[derive(Debug, Clone, Serialize)]
pub struct DeactivateResponse {
    pub success: bool,
    pub message: String,
}
