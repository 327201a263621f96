//! Site configuration management for `ctrm.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── booking    # [booking]
//! │   ├── build      # [build]
//! │   ├── pages      # [[pages]]
//! │   ├── site       # [site]
//! │   └── store      # [store]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | `[site]`      | Site root URL, OG locale                        |
//! | `[store]`     | CMS backend (Sanity API or dataset export)      |
//! | `[booking]`   | Embedded order form and resize bridge           |
//! | `[build]`     | Output directory                                |
//! | `[[pages]]`   | Routes with their SEO inputs                    |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{
    BookingConfig, BuildSectionConfig, PageConfig, SiteSectionConfig, StoreConfig, StoreProvider,
};

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing ctrm.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub booking: BookingConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::Validation(format!(
                "config file '{}' not found in this directory or any parent",
                cli.config.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;
        Ok(config)
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.set_root(&root);
        self.apply_command_options(cli);
        self.normalize_paths(&root);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Page entry for a route, ignoring leading/trailing slashes.
    pub fn page(&self, path: &str) -> Option<&PageConfig> {
        let route = path.trim_matches('/');
        self.pages.iter().find(|page| page.route_dir() == route)
    }

    /// Whether `page` is the one embedding the booking form.
    pub fn is_booking_page(&self, page: &PageConfig) -> bool {
        page.route_dir() == self.booking.path.trim_matches('/')
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => {
                crate::logger::set_verbose(build_args.verbose);
                Self::update_option(&mut self.build.output, build_args.output.as_ref());
                self.build.clean = build_args.clean;
            }
            Commands::Render { verbose, .. } => {
                crate::logger::set_verbose(*verbose);
            }
            Commands::Frame { args } => {
                crate::logger::set_verbose(args.verbose);
                if args.any_origin {
                    self.booking.any_origin = true;
                }
            }
            // Query output must stay machine-readable
            Commands::Query { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve relative paths against the project root.
    fn normalize_paths(&mut self, root: &Path) {
        self.build.output = root.join(&self.build.output);
        self.store.export = root.join(&self.store.export);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.store.validate(&mut diag);
        self.booking.validate(&mut diag);
        section::validate_pages(&self.pages, &mut diag);

        if self.page(&self.booking.path).is_none() {
            diag.warn(
                BookingConfig::PATH,
                format!(
                    "no [[pages]] entry for '{}', the order form will not be embedded",
                    self.booking.path
                ),
            );
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[site]
url = "https://www.ctrealtymedia.com"

[store]
provider = "sanity"
use_cdn = true

[booking]
height = 900

[[pages]]
path = "/"
slug = "home"

[[pages]]
path = "/book"
title = "Book Your Shoot"
breadcrumbs = [
    { name = "Home", url = "/" },
    { name = "Book", url = "/book" },
]

[pages.seo]
metaDescription = "Schedule your shoot online."
noIndex = false
"#;

    #[test]
    fn test_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[site\nurl = \"x\"").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.locale, "en_US");
        assert_eq!(config.store.provider, StoreProvider::Sanity);
        assert_eq!(config.booking.height, 800);
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_parse_sample() {
        let config = test_parse_config(SAMPLE);
        assert!(config.store.use_cdn);
        assert_eq!(config.store.dataset, "production");
        assert_eq!(config.booking.height, 900);
        assert_eq!(config.pages.len(), 2);

        let book = config.page("/book/").unwrap();
        assert_eq!(book.breadcrumbs.len(), 2);
        let seo = book.seo.as_ref().unwrap();
        assert_eq!(seo.meta_description.as_deref(), Some("Schedule your shoot online."));
        assert!(config.is_booking_page(book));
        assert!(!config.is_booking_page(config.page("/").unwrap()));
    }

    #[test]
    fn test_sample_validates() {
        let config = test_parse_config(SAMPLE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = test_parse_config(
            r#"
[site]
url = "www.ctrealtymedia.com"

[booking]
url = "ftp://media.example.com"
height = 0
"#,
        );
        let err = config.validate().unwrap_err();
        let ConfigError::Diagnostics(diag) = err.downcast::<ConfigError>().unwrap() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nurl = \"https://x.example\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.url, "https://x.example");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_unknown_seo_field_detected() {
        let content = "[[pages]]\npath = \"/\"\n[pages.seo]\nmetaTitel = \"typo\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.iter().any(|f| f.contains("metaTitel")));
    }

    #[test]
    fn test_normalize_paths() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/srv/site"));
        config.normalize_paths(Path::new("/srv/site"));
        assert_eq!(config.build.output, PathBuf::from("/srv/site/dist"));
        assert_eq!(
            config.store.export,
            PathBuf::from("/srv/site/data/production.ndjson")
        );
        assert_eq!(
            config.root_relative("/srv/site/dist/book/head.html"),
            PathBuf::from("dist/book/head.html")
        );
    }
}
