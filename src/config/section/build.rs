//! `[build]` configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory, relative to the project root.
    pub output: PathBuf,

    /// Remove the output directory before writing (CLI: `--clean`).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            clean: false,
        }
    }
}
