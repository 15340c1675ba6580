//! User identity as seen by HelpHub.
//!
//! Accounts are owned by the external identity service; HelpHub only keeps
//! the fields it needs for ownership checks and notification text.

pub mod model;
pub mod role;

pub use model::UserIdentity;
pub use role::UserRole;
