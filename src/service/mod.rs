//! Service layer: application-facing entry points over the domain.
//!
//! [`NotificationService`] is what product code and the admin API call to
//! reach a user's live sessions.

pub mod notification_service;

pub use notification_service::NotificationService;
