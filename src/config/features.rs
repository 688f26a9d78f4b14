//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Attach a document folder to every new workflow
    #[serde(default)]
    pub enable_folders: bool,
}
