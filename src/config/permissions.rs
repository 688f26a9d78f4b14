//! Role registry configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::permissions::{RoleRegistry, RoleRegistryError};

/// Where role descriptors come from
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PermissionsConfig {
    /// YAML file of role descriptors. When unset the built-in roles are used.
    #[serde(default)]
    pub roles_file: Option<PathBuf>,
}

impl PermissionsConfig {
    /// Loads the configured registry.
    ///
    /// A roles file replaces the built-in roles entirely.
    pub fn load_registry(&self) -> Result<RoleRegistry, RoleRegistryError> {
        match &self.roles_file {
            Some(path) => RoleRegistry::load(path),
            None => Ok(RoleRegistry::builtin()),
        }
    }

    /// Validate permissions configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.roles_file {
            Some(path) if !path.is_file() => Err(ValidationError::RolesFileNotFound(path.clone())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_registry_without_file() {
        let config = PermissionsConfig::default();
        assert!(config.validate().is_ok());

        let registry = config.load_registry().unwrap();
        assert!(registry.get("ProgramAuditReader").is_some());
    }

    #[test]
    fn missing_file_fails_validation() {
        let config = PermissionsConfig {
            roles_file: Some(PathBuf::from("/nonexistent/roles.yaml")),
        };
        assert!(matches!(config.validate(), Err(ValidationError::RolesFileNotFound(_))));
    }

    #[test]
    fn file_replaces_builtin_roles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "- name: WorkflowOwner\n  scope: Workflow\n  description: Owns a workflow\n  permissions:\n    read: [Workflow]\n    update: [Workflow]"
        )
        .unwrap();
        let config = PermissionsConfig {
            roles_file: Some(file.path().to_path_buf()),
        };

        assert!(config.validate().is_ok());
        let registry = config.load_registry().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["WorkflowOwner"]);
    }
}
