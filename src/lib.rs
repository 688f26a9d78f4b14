//! GRC Workflows - Workflow domain model and role registry
//!
//! Workflows define task groups that are executed in recurring cycles; the
//! state of every object taking part in a cycle is derived on read. Roles
//! consumed by the permission engine are served from a validated registry.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
