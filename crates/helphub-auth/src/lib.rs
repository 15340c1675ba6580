//! # helphub-auth
//!
//! Identity resolution and authorization primitives for HelpHub.
//!
//! ## Modules
//!
//! - `jwt`: session token claims, signing, and verification
//! - `resolver`: token → [`UserIdentity`](helphub_entity::user::UserIdentity)
//! - `rbac`: role-derived capabilities

pub mod jwt;
pub mod rbac;
pub mod resolver;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use rbac::{Capability, RbacEnforcer};
pub use resolver::{IdentityResolver, JwtIdentityResolver};
