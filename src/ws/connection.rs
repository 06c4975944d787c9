//! WebSocket connection lifecycle.
//!
//! Registers the socket for its user, then runs the read/write loop:
//! inbound frames are echoed back, outbound frames queued by the registry
//! are written out. The connection is unregistered when the loop ends,
//! whatever the reason.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::domain::{ChannelConnection, ConnectionHandle, ConnectionRegistry, UserId};

/// Runs a registered WebSocket connection until it closes.
///
/// - Echoes text and binary frames from the client.
/// - Forwards frames queued through the registry to the client.
pub async fn run_connection(
    socket: WebSocket,
    user_id: UserId,
    registry: Arc<ConnectionRegistry>,
    buffer: usize,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (handle, mut outbound) = ChannelConnection::channel(buffer);
    let connection_id = handle.id();

    registry
        .register(user_id.clone(), Arc::new(handle) as Arc<dyn ConnectionHandle>)
        .await;
    tracing::info!(%user_id, %connection_id, "ws connection opened");

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!(%user_id, len = text.as_str().len(), "ws text received");
                        if ws_tx.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        tracing::debug!(%user_id, len = bytes.len(), "ws binary received");
                        if ws_tx.send(Message::Binary(bytes)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(error)) => {
                        tracing::debug!(%user_id, %error, "ws read failed");
                        break;
                    }
                    // Ping/pong are answered by the protocol layer.
                    Some(Ok(_)) => {}
                }
            }
            // Frame queued by the registry
            frame = outbound.recv() => {
                let Some(frame) = frame else { break };
                if let Err(error) = ws_tx.send(Message::text(frame)).await {
                    tracing::debug!(%user_id, %error, "ws write failed");
                    break;
                }
            }
        }
    }

    registry.unregister(&user_id, connection_id).await;
    tracing::info!(%user_id, %connection_id, "ws connection closed");
}
