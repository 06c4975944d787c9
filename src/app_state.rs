//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::ConnectionRegistry;
use crate::service::NotificationService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Notification service wrapping the connection registry.
    pub notification_service: Arc<NotificationService>,
    /// Outbound frame buffer allotted to each new WebSocket connection.
    pub connection_buffer: usize,
}

impl AppState {
    /// Builds state around an existing registry.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>, connection_buffer: usize) -> Self {
        Self {
            notification_service: Arc::new(NotificationService::new(registry)),
            connection_buffer,
        }
    }

    /// Returns the connection registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        self.notification_service.registry()
    }
}
