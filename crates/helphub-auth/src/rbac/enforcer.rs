//! Ownership and capability checks.

use helphub_core::error::AppError;
use helphub_core::types::UserId;
use helphub_entity::user::UserRole;

use super::policies::{Capability, RbacPolicies};

/// Decides whether an actor may act on a resource owned by someone.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates an enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Whether `role` grants `capability`.
    pub fn has_capability(&self, role: &UserRole, capability: Capability) -> bool {
        self.policies.grants(role, capability)
    }

    /// Allows the owner, or anyone whose role grants `capability`.
    pub fn require_owner_or(
        &self,
        actor: UserId,
        role: &UserRole,
        owner: UserId,
        capability: Capability,
    ) -> Result<(), AppError> {
        if actor == owner || self.has_capability(role, capability) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "User {actor} does not own this resource"
            )))
        }
    }
}
