//! In-process implementations of the store traits.
//!
//! Backed by `DashMap`; state lives as long as the value does. Used by the
//! unit and HTTP integration test suites.

pub mod notification;
pub mod request;
pub mod user;

pub use notification::MemoryNotificationStore;
pub use request::MemoryRequestStore;
pub use user::MemoryUserDirectory;
