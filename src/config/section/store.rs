//! `[store]` configuration.
//!
//! ```toml
//! [store]
//! provider = "sanity"          # or "export"
//! project_id = "wbmh4kzh"
//! dataset = "production"
//! api_version = "2023-05-03"
//! use_cdn = true
//! token_env = "SANITY_READ_TOKEN"   # optional
//! export = "data/production.ndjson" # provider = "export"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Which backend serves CMS documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Sanity HTTP query API.
    #[default]
    Sanity,
    /// Local NDJSON dataset export.
    Export,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub provider: StoreProvider,
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Query the edge-cached API host.
    pub use_cdn: bool,
    /// Environment variable holding a read token. Unset: anonymous reads.
    pub token_env: Option<String>,
    /// Dataset export file, relative to the project root.
    pub export: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::Sanity,
            project_id: "wbmh4kzh".into(),
            dataset: "production".into(),
            api_version: "2023-05-03".into(),
            use_cdn: false,
            token_env: None,
            export: "data/production.ndjson".into(),
        }
    }
}

impl StoreConfig {
    pub const PROJECT_ID: FieldPath = FieldPath::new("store.project_id");
    pub const DATASET: FieldPath = FieldPath::new("store.dataset");
    pub const API_VERSION: FieldPath = FieldPath::new("store.api_version");
    pub const EXPORT: FieldPath = FieldPath::new("store.export");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        // Image URLs need project and dataset for either provider.
        if !is_identifier(&self.project_id) {
            diag.error_with_hint(
                Self::PROJECT_ID,
                format!("invalid project id '{}'", self.project_id),
                "use the id shown in the project settings, e.g. \"wbmh4kzh\"",
            );
        }
        if !is_identifier(&self.dataset) {
            diag.error_with_hint(
                Self::DATASET,
                format!("invalid dataset name '{}'", self.dataset),
                "e.g. \"production\"",
            );
        }

        match self.provider {
            StoreProvider::Sanity => {
                let version = self.api_version.trim_start_matches('v');
                if !is_api_version(version) {
                    diag.error_with_hint(
                        Self::API_VERSION,
                        format!("invalid API version '{}'", self.api_version),
                        "use a date like \"2023-05-03\" or \"1\"",
                    );
                }
            }
            StoreProvider::Export => {
                if !self.export.is_file() {
                    diag.error_with_hint(
                        Self::EXPORT,
                        format!("export file '{}' not found", self.export.display()),
                        "create one with `sanity dataset export production data/`",
                    );
                }
            }
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `1`, `2021-03-25` or `X` (experimental).
fn is_api_version(s: &str) -> bool {
    if s == "1" || s == "X" {
        return true;
    }
    let parts: Vec<&str> = s.split('-').collect();
    matches!(parts.as_slice(), [y, m, d]
        if y.len() == 4 && m.len() == 2 && d.len() == 2
            && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())))
}
