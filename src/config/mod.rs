//! Site configuration management for `lantern.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build/     # [build] and sub-sections (blog, feed, sitemap, robots)
//! │   ├── docs       # [docs]
//! │   └── site       # [site]
//! ├── types/         # ConfigError, ConfigDiagnostics
//! ├── util.rs        # Config file lookup
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section            | Purpose                                        |
//! |--------------------|------------------------------------------------|
//! | `[site]`           | Site metadata (title, author, url, extra)      |
//! | `[build]`          | Paths, blog layout, feed, sitemap, robots      |
//! | `[docs]`           | External Markdown documentation tree           |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildSectionConfig, DocsConfig, FeedFormat, SiteInfoConfig};
pub use types::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing lantern.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Docs ingestion settings
    #[serde(default)]
    pub docs: DocsConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file.
    /// The project root is determined by the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML and collect every key serde did not consume.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        // CLI path overrides are relative to the root, like the config values.
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.normalize_paths(&root);

        if let Commands::Build { build_args } = &cli.command {
            self.apply_build_args(build_args);
        }
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.base_url()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.feed.enable, args.rss.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        Self::update_option(&mut self.docs.enable, args.docs.as_ref());
        self.build.clean |= args.clean;

        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
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

    /// Normalize all paths relative to root directory.
    ///
    /// Feed, sitemap, robots and docs output paths stay relative; they are
    /// joined onto the output directory when artifacts are written.
    pub fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.build.data = normalize_path(&root.join(&self.build.data));
        self.docs.source = normalize_path(&root.join(&self.docs.source));
        self.set_root(&root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        let url_required =
            self.build.feed.enable || self.build.sitemap.enable || self.build.robots.enable;
        self.site.validate(url_required, &mut diag);
        self.build.validate(&mut diag);
        self.docs.validate(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!(
        "[site]\ntitle = \"Test\"\ndescription = \"Test\"\nurl = \"https://example.com\"\n{extra}"
    );
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Parse config and resolve its paths against `root`.
#[cfg(test)]
pub fn test_config_at(root: &Path, extra: &str) -> SiteConfig {
    let mut config = test_parse_config(extra);
    config.config_path = root.join("lantern.toml");
    config.normalize_paths(root);
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[site\ntitle = \"My Blog\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_root() {
        let mut config = SiteConfig::default();
        assert_eq!(config.root, Path::new(""));
        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.root, Path::new("/custom/path"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\n[build.blog]\ndir = \"posts\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_normalize_paths() {
        let config = test_config_at(Path::new("/srv/site"), "[build]\noutput = \"../public\"");
        assert_eq!(config.build.content, PathBuf::from("/srv/site/site"));
        assert_eq!(config.build.output, PathBuf::from("/srv/public"));
        assert_eq!(config.build.data, PathBuf::from("/srv/site/data"));
        assert_eq!(config.root, PathBuf::from("/srv/site"));
    }

    #[test]
    fn test_apply_build_args() {
        let cli = Cli::parse_from([
            "lantern",
            "-o",
            "out",
            "build",
            "--rss=false",
            "--minify",
            "-U",
            "https://staging.example.com/",
        ]);
        let mut config = test_parse_config("");
        config.config_path = PathBuf::from("/srv/site/lantern.toml");
        config.finalize(&cli);

        assert_eq!(config.build.output, PathBuf::from("/srv/site/out"));
        assert!(!config.build.feed.enable);
        assert!(config.build.sitemap.enable);
        assert!(config.build.minify);
        assert_eq!(config.base_url(), "https://staging.example.com");
        crate::logger::set_verbose(false);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = test_config_at(Path::new("/srv/site"), "[build.blog]\ndir = \"\"");
        config.site.url = None;
        config.build.output = config.build.content.clone();

        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err:?}");
        };
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["site.url", "build.output", "build.blog.dir"]);
    }

    #[test]
    fn test_validate_ok_without_url_when_nothing_needs_it() {
        let mut config = test_config_at(
            Path::new("/srv/site"),
            "[build.feed]\nenable = false\n[build.sitemap]\nenable = false\n[build.robots]\nenable = false",
        );
        config.site.url = None;
        assert!(config.validate().is_ok());
    }
}
