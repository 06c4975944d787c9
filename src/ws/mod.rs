//! WebSocket layer: admission, per-connection read/write loop, frames.
//!
//! The endpoint at `/ws?userId=<id>` registers the socket with the
//! connection registry for the lifetime of the connection. Inbound frames
//! are echoed; outbound frames are notifications and heartbeats.

pub mod connection;
pub mod handler;
pub mod messages;
