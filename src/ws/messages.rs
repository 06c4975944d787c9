//! WebSocket query parameters and close codes.

use serde::Deserialize;

/// Close code sent when a connection arrives without a user identity.
pub const CLOSE_MISSING_USER_ID: u16 = 4001;

/// Close reason paired with [`CLOSE_MISSING_USER_ID`].
pub const CLOSE_MISSING_USER_ID_REASON: &str = "User ID is required";

/// Query parameters accepted on `GET /ws`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectParams {
    /// Identity of the connecting user. Required; checked after the upgrade
    /// so the client receives a proper close frame.
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}
