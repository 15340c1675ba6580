//! Role-to-capability mapping.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use helphub_entity::user::UserRole;

/// A privilege that does not depend on owning the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Update or delete requests posted by anyone.
    ManageAnyRequest,
    /// Mark notifications of other users as read.
    ManageAnyNotification,
}

/// Mapping from each role to the capabilities it grants.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<Capability>>,
}

impl RbacPolicies {
    /// Creates the default policy set: admins get every capability,
    /// members none.
    pub fn new() -> Self {
        let mut policies = HashMap::new();
        policies.insert(
            UserRole::Admin,
            HashSet::from([
                Capability::ManageAnyRequest,
                Capability::ManageAnyNotification,
            ]),
        );
        policies.insert(UserRole::Member, HashSet::new());
        Self { policies }
    }

    /// Checks whether `role` grants `capability`.
    pub fn grants(&self, role: &UserRole, capability: Capability) -> bool {
        self.policies
            .get(role)
            .is_some_and(|caps| caps.contains(&capability))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
