//! Notification recording and read-state queries.

pub mod service;

pub use service::NotificationService;
