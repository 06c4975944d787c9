//! Notification service: the fire-and-forget entry point for product code.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{ConnectionRegistry, Notification, UserId};

/// Kind consumed by the client's toast handler.
pub const SHOW_NOTIFICATION: &str = "showNotification";

/// Icon shown next to a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastIcon {
    /// Green check.
    Success,
    /// Red cross.
    Error,
    /// Neutral info marker.
    Info,
    /// Amber warning marker.
    Warning,
}

impl ToastIcon {
    /// Wire name understood by the client.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Snapshot of registry occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Users holding at least one connection.
    pub users: usize,
    /// Live connections across all users.
    pub connections: usize,
}

/// Application-facing façade over the [`ConnectionRegistry`].
///
/// None of these methods report delivery: a user who is offline simply
/// misses the notification.
#[derive(Debug, Clone)]
pub struct NotificationService {
    registry: Arc<ConnectionRegistry>,
}

impl NotificationService {
    /// Creates a new `NotificationService`.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Returns a reference to the inner [`ConnectionRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Sends `message` tagged `kind` with `extra` merged into the envelope.
    pub async fn notify(
        &self,
        user_id: &UserId,
        message: &str,
        kind: &str,
        extra: Map<String, Value>,
    ) {
        let notification = Notification::new(message, kind).with_extra(extra);
        self.send(user_id, &notification).await;
    }

    /// Sends a prepared notification.
    pub async fn send(&self, user_id: &UserId, notification: &Notification) {
        self.registry.notify(user_id, notification).await;
    }

    /// Sends a toast rendered by the client's `showNotification` handler.
    pub async fn show_notification(&self, user_id: &UserId, message: &str, icon: ToastIcon) {
        let notification =
            Notification::new(message, SHOW_NOTIFICATION).with_field("icon", icon.as_str());
        self.send(user_id, &notification).await;
    }

    /// Identities with at least one live connection.
    pub async fn active_users(&self) -> Vec<UserId> {
        self.registry.active_users().await
    }

    /// Current user and connection counts.
    pub async fn stats(&self) -> ConnectionStats {
        ConnectionStats {
            users: self.registry.user_count().await,
            connections: self.registry.total_connections().await,
        }
    }
}
