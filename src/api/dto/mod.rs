//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names follow the camelCase convention the web client already
//! speaks (`userId`, `activeConnections`).

pub mod connection_dto;

pub use connection_dto::*;
