//! Folder hierarchy limits.

use serde::{Deserialize, Serialize};

/// Limits enforced by the hierarchy operations before any write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Folders may not be nested deeper than this. A root folder has
    /// depth 0, so the deepest allowed folder has depth `max_depth - 1`.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Maximum folder name length in characters.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_name_length: default_max_name_length(),
        }
    }
}

fn default_max_depth() -> u32 {
    64
}

fn default_max_name_length() -> usize {
    255
}
