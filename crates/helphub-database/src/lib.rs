//! # helphub-database
//!
//! Persistence for HelpHub. The service layer talks to the store traits in
//! [`store`]; [`repositories`] implements them on PostgreSQL and
//! [`memory`] implements them in process for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{NotificationStore, RequestStore, UserDirectory};
