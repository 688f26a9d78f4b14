//! Integration tests for the role registry.
//!
//! Loads registries the way the binary does: from configuration, either the
//! built-in roles or a YAML file.

use std::io::Write;
use std::path::PathBuf;

use grc_workflows::config::{PermissionsConfig, ValidationError};
use grc_workflows::domain::permissions::{Action, RoleRegistry, RoleRegistryError};

fn roles_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn config_for(path: PathBuf) -> PermissionsConfig {
    PermissionsConfig {
        roles_file: Some(path),
    }
}

#[test]
fn builtin_program_audit_reader_grants_nothing_directly() {
    let registry = PermissionsConfig::default().load_registry().unwrap();
    let role = registry.get("ProgramAuditReader").unwrap();

    assert_eq!(role.scope, "AuditImplied");
    assert!(role.permissions.is_empty());
    for action in Action::ALL {
        assert!(!role.allows(action, "Audit"));
    }

    let rule = role.implied_by.as_ref().unwrap();
    assert_eq!(rule.role, "ProgramReader");
    assert_eq!(rule.parent_scope, "Program");
    assert_eq!(rule.child_scope, "Audit");
    assert_eq!(registry.in_scope("AuditImplied").count(), 1);
}

#[test]
fn roles_file_is_served_by_scope_and_action() {
    let file = roles_file(
        r#"
- name: WorkflowOwner
  scope: Workflow
  description: Manages a workflow and its task groups.
  permissions:
    read: [Workflow, TaskGroup, Cycle]
    create: [TaskGroup]
    update: [Workflow, TaskGroup]
    delete: [TaskGroup]
- name: WorkflowMember
  scope: Workflow
  description: Reads a workflow and works its cycle tasks.
  permissions:
    read: [Workflow, Cycle]
    update: [CycleTaskGroupObject]
- name: ProgramAuditReader
  scope: AuditImplied
  description: Program readers see audits created under the program.
  implied_by:
    role: ProgramReader
    parent_scope: Program
    child_scope: Audit
"#,
    );
    let config = config_for(file.path().to_path_buf());

    config.validate().unwrap();
    let registry = config.load_registry().unwrap();

    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec!["ProgramAuditReader", "WorkflowMember", "WorkflowOwner"]
    );
    assert_eq!(registry.in_scope("Workflow").count(), 2);

    let owner = registry.get("WorkflowOwner").unwrap();
    assert!(owner.allows(Action::Delete, "TaskGroup"));
    assert!(!owner.allows(Action::Delete, "Workflow"));

    let member = registry.get("WorkflowMember").unwrap();
    assert_eq!(member.permissions_for(Action::Create), &[] as &[String]);
    assert!(member.allows(Action::Update, "CycleTaskGroupObject"));

    let implied: Vec<_> = registry.implied_by("ProgramReader", "Program").map(|r| r.name.as_str()).collect();
    assert_eq!(implied, vec!["ProgramAuditReader"]);
}

#[test]
fn unknown_action_key_is_rejected() {
    let file = roles_file(
        r#"
- name: Broken
  scope: Workflow
  description: Uses a non-CRUD action.
  permissions:
    approve: [Workflow]
"#,
    );

    let err = config_for(file.path().to_path_buf()).load_registry().unwrap_err();

    assert!(matches!(err, RoleRegistryError::Parse(_)));
}

#[test]
fn blank_description_is_rejected() {
    let file = roles_file(
        r#"
- name: Silent
  scope: Workflow
  description: "   "
"#,
    );

    let err = config_for(file.path().to_path_buf()).load_registry().unwrap_err();

    assert!(matches!(err, RoleRegistryError::Invalid { ref role, .. } if role == "Silent"));
}

#[test]
fn duplicate_role_is_rejected() {
    let yaml = r#"
- name: Twice
  scope: Workflow
  description: First definition.
- name: Twice
  scope: Program
  description: Second definition.
"#;

    let err = RoleRegistry::from_yaml_str(yaml).unwrap_err();

    assert!(matches!(err, RoleRegistryError::Duplicate(ref name) if name == "Twice"));
}

#[test]
fn missing_file_is_caught_by_validation_and_loading() {
    let config = config_for(PathBuf::from("/definitely/not/here/roles.yaml"));

    assert!(matches!(config.validate(), Err(ValidationError::RolesFileNotFound(_))));
    assert!(matches!(config.load_registry(), Err(RoleRegistryError::Io(_))));
}
