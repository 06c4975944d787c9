//! Live connection tracking with per-user fan-out.
//!
//! [`ConnectionRegistry`] maps each [`UserId`] to the set of connections
//! that user currently holds open. A single [`tokio::sync::RwLock`] guards
//! the map and every per-user set: mutations take the write lock, fan-out
//! holds the read lock for the whole read-then-iterate.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::connection::{ConnectionHandle, ConnectionId};
use super::notification::Notification;
use super::user_id::UserId;
use crate::error::DeliveryError;

type ConnectionSet = HashMap<ConnectionId, Arc<dyn ConnectionHandle>>;

/// Process-local registry of live connections.
///
/// # Invariants
///
/// - A user key is present iff its connection set is non-empty.
/// - A connection appears at most once per user (keyed by [`ConnectionId`]).
///
/// Delivery is best effort: a failed send to one connection is logged and
/// never affects its siblings or the caller.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    users: RwLock<HashMap<UserId, ConnectionSet>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `connection` to the set of `user_id`, creating the set if needed.
    ///
    /// Registering the same handle again is a no-op.
    pub async fn register(&self, user_id: UserId, connection: Arc<dyn ConnectionHandle>) {
        let connection_id = connection.id();
        let mut users = self.users.write().await;
        let set = users.entry(user_id.clone()).or_default();
        let fresh = set.insert(connection_id, connection).is_none();
        tracing::debug!(
            %user_id,
            %connection_id,
            fresh,
            connections = set.len(),
            "connection registered"
        );
    }

    /// Removes a connection from the set of `user_id`.
    ///
    /// Drops the user entirely once its last connection is gone. Unknown
    /// users or connections are ignored.
    pub async fn unregister(&self, user_id: &UserId, connection_id: ConnectionId) {
        let mut users = self.users.write().await;
        let Some(set) = users.get_mut(user_id) else {
            tracing::debug!(%user_id, %connection_id, "unregister for unknown user ignored");
            return;
        };
        if set.remove(&connection_id).is_none() {
            tracing::debug!(%user_id, %connection_id, "unregister for unknown connection ignored");
            return;
        }
        let remaining = set.len();
        if remaining == 0 {
            users.remove(user_id);
            tracing::debug!(%user_id, "last connection closed, user removed");
        } else {
            tracing::debug!(%user_id, %connection_id, remaining, "connection unregistered");
        }
    }

    /// Sends `notification` to every connection of `user_id`.
    ///
    /// A user with no connections is a silent no-op; nothing is queued for
    /// later. Per-connection failures are logged and skipped.
    pub async fn notify(&self, user_id: &UserId, notification: &Notification) {
        let users = self.users.read().await;
        let Some(set) = users.get(user_id) else {
            tracing::debug!(%user_id, kind = notification.kind(), "no active connections");
            return;
        };

        let frame = match notification.to_frame() {
            Ok(frame) => frame,
            Err(error) => {
                tracing::error!(%user_id, %error, "failed to encode notification");
                return;
            }
        };

        let delivered = fan_out(set, &frame, user_id);
        tracing::debug!(
            %user_id,
            kind = notification.kind(),
            delivered,
            connections = set.len(),
            "notification dispatched"
        );
    }

    /// Sends a raw text frame to every registered connection.
    ///
    /// Returns the number of connections that accepted the frame.
    pub async fn broadcast(&self, frame: &str) -> usize {
        let users = self.users.read().await;
        users
            .iter()
            .map(|(user_id, set)| fan_out(set, frame, user_id))
            .sum()
    }

    /// Returns the identities that currently hold at least one connection.
    pub async fn active_users(&self) -> Vec<UserId> {
        let users = self.users.read().await;
        let mut ids: Vec<UserId> = users.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the number of live connections held by `user_id`.
    pub async fn connection_count(&self, user_id: &UserId) -> usize {
        self.users.read().await.get(user_id).map_or(0, HashMap::len)
    }

    /// Returns the number of users with at least one connection.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns the number of live connections across all users.
    pub async fn total_connections(&self) -> usize {
        self.users.read().await.values().map(HashMap::len).sum()
    }
}

/// Attempts delivery to every open connection in `set`, returning the
/// number of successful sends.
///
/// Closed handles are awaiting unregistration and are skipped quietly.
fn fan_out(set: &ConnectionSet, frame: &str, user_id: &UserId) -> usize {
    let mut delivered = 0;
    for (connection_id, connection) in set {
        if !connection.is_open() {
            tracing::debug!(%user_id, %connection_id, "skipping closed connection");
            continue;
        }
        match connection.send_text(frame) {
            Ok(()) => delivered += 1,
            Err(DeliveryError::Closed) => {
                tracing::debug!(%user_id, %connection_id, "connection closed before delivery");
            }
            Err(error) => {
                tracing::warn!(%user_id, %connection_id, %error, "failed to deliver frame");
            }
        }
    }
    delivered
}
