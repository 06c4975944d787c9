//! # companion-gateway
//!
//! Real-time notification gateway for the companion chat backend.
//!
//! Clients hold WebSocket connections at `/ws?userId=<id>`; application
//! code fires notifications at a user identity and the gateway fans them
//! out to every live connection of that user. Delivery is best effort:
//! nothing is queued for offline users and nothing is retried.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket)        Operators / product code (HTTP)
//!     │                            │
//!     ├── WS Handler (ws/)         ├── Admin Handlers (api/)
//!     │                            │
//!     │                      NotificationService (service/)
//!     │                            │
//!     └──────── ConnectionRegistry (domain/) ──── Heartbeat
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
