//! Permissions module - Role descriptors consumed by the permission engine.
//!
//! Roles are plain data: a scope, a description and, per CRUD action, the
//! object types the role may act on. The engine that evaluates them lives
//! outside this crate; this module only loads, validates and serves them.
//!
//! A role may also be *implied*: holding a parent role in a parent scope
//! grants it in child scopes. `ProgramAuditReader` is the shipped example:
//! it grants nothing directly and marks program readers inside audits.

mod action;
mod descriptor;
mod registry;

pub use action::Action;
pub use descriptor::{ImpliedBy, PermissionSet, RoleDescriptor};
pub use registry::{RoleRegistry, RoleRegistryError};
