//! Connection handles held by the registry.
//!
//! A [`ConnectionHandle`] is anything that can accept a text frame for one
//! live client session. The WebSocket transport uses [`ChannelConnection`],
//! which forwards frames over a bounded channel to the socket's writer task.

use std::fmt;

use tokio::sync::mpsc;

use crate::error::DeliveryError;

/// Unique identifier for one live connection.
///
/// Wraps a UUID v4 generated when the handle is created. Set semantics in
/// the registry are keyed on this value, so registering the same handle
/// twice never yields duplicate delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a new random `ConnectionId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One live, bidirectional client session as seen by the registry.
///
/// Implementations must not block: `send_text` either enqueues the frame or
/// reports why it could not.
pub trait ConnectionHandle: Send + Sync + fmt::Debug {
    /// Stable identity of this connection.
    fn id(&self) -> ConnectionId;

    /// Hands a text frame to the connection.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the connection is closed or cannot
    /// accept more frames right now.
    fn send_text(&self, frame: &str) -> Result<(), DeliveryError>;

    /// Whether the connection can still accept frames. Closed handles are
    /// skipped during fan-out until their socket task unregisters them.
    fn is_open(&self) -> bool {
        true
    }
}

/// Connection handle backed by a bounded `mpsc` channel.
///
/// The receiving half is drained by the socket task, which writes each
/// frame to the WebSocket.
#[derive(Debug, Clone)]
pub struct ChannelConnection {
    id: ConnectionId,
    tx: mpsc::Sender<String>,
}

impl ChannelConnection {
    /// Creates a handle plus the receiver its writer task must drain.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                id: ConnectionId::new(),
                tx,
            },
            rx,
        )
    }
}

impl ConnectionHandle for ChannelConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send_text(&self, frame: &str) -> Result<(), DeliveryError> {
        self.tx.try_send(frame.to_owned()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::BufferFull,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
