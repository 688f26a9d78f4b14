//! The role registry: every role descriptor, keyed by role name.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::{ImpliedBy, PermissionSet, RoleDescriptor};

/// Errors raised while building the registry.
#[derive(Debug, Error)]
pub enum RoleRegistryError {
    #[error("Failed to read role file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse role file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid role '{role}': {reason}")]
    Invalid { role: String, reason: String },

    #[error("Role '{0}' is defined more than once")]
    Duplicate(String),
}

static BUILTIN_ROLES: Lazy<Vec<RoleDescriptor>> = Lazy::new(|| {
    vec![RoleDescriptor {
        name: "ProgramAuditReader".to_string(),
        scope: "AuditImplied".to_string(),
        description: "A user with the ProgramReader role for a private program will also have \
                      this role in the audit context for any audit created for that program."
            .to_string(),
        permissions: PermissionSet::default(),
        implied_by: Some(ImpliedBy {
            role: "ProgramReader".to_string(),
            parent_scope: "Program".to_string(),
            child_scope: "Audit".to_string(),
        }),
    }]
});

/// Validated, read-only set of role descriptors.
///
/// Built once at startup (from [`RoleRegistry::builtin`] or a YAML file)
/// and then only read.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: BTreeMap<String, RoleDescriptor>,
}

impl RoleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of roles shipped with the application.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for role in BUILTIN_ROLES.iter() {
            // Built-in descriptors are valid and unique.
            registry.roles.insert(role.name.clone(), role.clone());
        }
        registry
    }

    /// Parses a YAML list of role descriptors.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RoleRegistryError> {
        let descriptors: Vec<RoleDescriptor> = serde_yaml::from_str(yaml)?;
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Reads and parses a YAML role file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RoleRegistryError> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        let registry = Self::from_yaml_str(&yaml)?;
        tracing::info!(
            path = %path.as_ref().display(),
            roles = registry.len(),
            "Loaded role registry"
        );
        Ok(registry)
    }

    /// Validates and adds a descriptor.
    ///
    /// # Errors
    ///
    /// - `Invalid` if the descriptor fails [`RoleDescriptor::validate`]
    /// - `Duplicate` if a role with the same name is already registered
    pub fn register(&mut self, descriptor: RoleDescriptor) -> Result<(), RoleRegistryError> {
        descriptor.validate()?;
        if self.roles.contains_key(&descriptor.name) {
            return Err(RoleRegistryError::Duplicate(descriptor.name));
        }
        self.roles.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Looks up a role by name.
    pub fn get(&self, name: &str) -> Option<&RoleDescriptor> {
        self.roles.get(name)
    }

    /// All roles defined for `scope`.
    pub fn in_scope<'a>(&'a self, scope: &'a str) -> impl Iterator<Item = &'a RoleDescriptor> + 'a {
        self.roles.values().filter(move |r| r.scope == scope)
    }

    /// Roles granted implicitly to a holder of `role` in `parent_scope`.
    pub fn implied_by<'a>(
        &'a self,
        role: &'a str,
        parent_scope: &'a str,
    ) -> impl Iterator<Item = &'a RoleDescriptor> + 'a {
        self.roles.values().filter(move |r| {
            r.implied_by
                .as_ref()
                .map_or(false, |rule| rule.role == role && rule.parent_scope == parent_scope)
        })
    }

    /// Role names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
