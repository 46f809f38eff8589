use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user. Created on login/sign-up, immutable after,
/// cleared on logout. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Point-in-time view of the session store, shaped for the webview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            is_authenticated: false,
            is_loading: false,
            error: None,
        }
    }
}
