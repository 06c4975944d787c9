//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;

use super::connection::run_connection;
use super::messages::{CLOSE_MISSING_USER_ID, CLOSE_MISSING_USER_ID_REASON, ConnectParams};
use crate::app_state::AppState;
use crate::domain::UserId;

/// `GET /ws?userId=<id>` — Upgrade HTTP connection to WebSocket.
///
/// Connections without a usable `userId` are upgraded and immediately
/// closed with code 4001; they never reach the registry.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> Response {
    let user_id = params.user_id.map(UserId::parse).and_then(Result::ok);

    match user_id {
        Some(user_id) => {
            let registry = Arc::clone(state.registry());
            let buffer = state.connection_buffer;
            ws.on_upgrade(move |socket| run_connection(socket, user_id, registry, buffer))
        }
        None => {
            tracing::warn!("ws connection rejected: user id is missing");
            ws.on_upgrade(reject_missing_user)
        }
    }
}

async fn reject_missing_user(mut socket: WebSocket) {
    let frame = CloseFrame {
        code: CLOSE_MISSING_USER_ID,
        reason: Utf8Bytes::from_static(CLOSE_MISSING_USER_ID_REASON),
    };
    if let Err(error) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!(%error, "failed to send close frame");
    }
}
