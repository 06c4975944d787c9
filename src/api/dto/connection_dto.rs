//! Connection listing and notification DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for `GET /active-connections`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveConnectionsResponse {
    /// Identities currently holding at least one live connection.
    pub active_connections: Vec<String>,
}

/// Request body for `POST /notify-user`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyUserRequest {
    /// Recipient identity. Anything other than a non-blank string is
    /// treated as missing.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub user_id: Option<serde_json::Value>,
    /// Usually an object (`message`, `type`, plus arbitrary extra fields)
    /// or a plain string used as the message; any JSON value is accepted.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub notification: serde_json::Value,
}

/// Response body for `POST /notify-user`.
///
/// Always the same: the endpoint does not report delivery.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotifyUserResponse {
    /// Fixed acknowledgement string.
    pub status: String,
}

impl NotifyUserResponse {
    /// Acknowledgement returned for every accepted request.
    #[must_use]
    pub fn sent() -> Self {
        Self {
            status: "Notification sent".to_string(),
        }
    }
}
