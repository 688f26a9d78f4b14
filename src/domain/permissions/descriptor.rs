//! Role descriptors: a scope, a description and four permission lists.

use serde::{Deserialize, Serialize};

use super::{Action, RoleRegistryError};

/// Object types a role may act on, per action.
///
/// Unknown action keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionSet {
    #[serde(default)]
    pub read: Vec<String>,
    #[serde(default)]
    pub create: Vec<String>,
    #[serde(default)]
    pub update: Vec<String>,
    #[serde(default)]
    pub delete: Vec<String>,
}

impl PermissionSet {
    /// Returns the object types granted for `action`.
    pub fn for_action(&self, action: Action) -> &[String] {
        match action {
            Action::Read => &self.read,
            Action::Create => &self.create,
            Action::Update => &self.update,
            Action::Delete => &self.delete,
        }
    }

    /// True if no action grants anything.
    pub fn is_empty(&self) -> bool {
        Action::ALL.iter().all(|a| self.for_action(*a).is_empty())
    }
}

/// The parent role and scopes from which a role is implied.
///
/// Holding `role` in a `parent_scope` object grants the described role in
/// the `child_scope` objects created under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpliedBy {
    pub role: String,
    pub parent_scope: String,
    pub child_scope: String,
}

/// A named role and what it grants within its scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleDescriptor {
    pub name: String,
    pub scope: String,
    pub description: String,
    #[serde(default)]
    pub permissions: PermissionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implied_by: Option<ImpliedBy>,
}

impl RoleDescriptor {
    /// Returns the object types this role grants for `action`.
    pub fn permissions_for(&self, action: Action) -> &[String] {
        self.permissions.for_action(action)
    }

    /// True if the role grants `action` on `object_type`.
    pub fn allows(&self, action: Action, object_type: &str) -> bool {
        self.permissions_for(action).iter().any(|t| t == object_type)
    }

    /// Checks the descriptor is complete.
    ///
    /// Name, scope and description must not be blank, every listed object
    /// type must be non-blank, and an `implied_by` rule must name all
    /// three of its parts.
    pub fn validate(&self) -> Result<(), RoleRegistryError> {
        let invalid = |reason: String| RoleRegistryError::Invalid {
            role: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty".to_string()));
        }
        if self.scope.trim().is_empty() {
            return Err(invalid("scope cannot be empty".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(invalid("description cannot be empty".to_string()));
        }
        for action in Action::ALL {
            if self.permissions_for(action).iter().any(|t| t.trim().is_empty()) {
                return Err(invalid(format!("'{}' lists an empty object type", action)));
            }
        }
        if let Some(rule) = &self.implied_by {
            if [&rule.role, &rule.parent_scope, &rule.child_scope]
                .iter()
                .any(|part| part.trim().is_empty())
            {
                return Err(invalid("implied_by must name role, parent_scope and child_scope".to_string()));
            }
        }
        Ok(())
    }
}
