//! # helphub-service
//!
//! Business logic for HelpHub. [`RequestService`] drives the help request
//! lifecycle and [`NotificationService`] records and serves the
//! notifications each committed transition produces.
//!
//! Services follow constructor injection: stores and collaborators are
//! handed in as `Arc<dyn Trait>` at construction time.

pub mod context;
pub mod notification;
pub mod request;

pub use context::RequestContext;
pub use notification::NotificationService;
pub use request::RequestService;
