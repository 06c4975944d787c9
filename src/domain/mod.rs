//! Domain layer: identities, connection handles, notifications, and the
//! connection registry.
//!
//! Everything here is transport-agnostic. The WebSocket layer adapts live
//! sockets to [`ConnectionHandle`] and the admin API drives the registry
//! through the notification service.

pub mod connection;
pub mod connection_registry;
pub mod heartbeat;
pub mod notification;
pub mod user_id;

pub use connection::{ChannelConnection, ConnectionHandle, ConnectionId};
pub use connection_registry::ConnectionRegistry;
pub use heartbeat::spawn_heartbeat;
pub use notification::Notification;
pub use user_id::UserId;
