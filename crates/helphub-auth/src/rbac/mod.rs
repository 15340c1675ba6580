//! Role-based capabilities.

pub mod enforcer;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use policies::{Capability, RbacPolicies};
