//! `[build]` section configuration.
//!
//! Contains build settings including paths, minification, and sub-configurations.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "site"                     # Source tree of pages and templates (relative to site root)
//! output = "build"                     # Output directory (relative to site root)
//! data = "data"                        # YAML/JSON data tables exposed to templates
//! partial_ext = "tmpl"                 # Include-only templates, never emitted
//! markdown = true                      # Render .md pages in the content tree
//! markdown_template = "markdown.tmpl"  # Wrapper template for .md pages
//! minify = false                       # Minify generated XML
//!
//! [build.blog]
//! dir = "blog"
//!
//! [build.feed]
//! enable = true
//! format = "atom"
//!
//! [build.sitemap]
//! enable = true
//!
//! [build.robots]
//! enable = true
//! ```
//!
//! See submodules for detailed options: [`blog`], [`feed`], [`sitemap`].

mod blog;
mod feed;
mod sitemap;

pub use blog::BlogConfig;
pub use feed::{FeedConfig, FeedFormat};
pub use sitemap::{RobotsConfig, SitemapConfig};

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content source directory (pages, posts, templates, assets).
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Data tables directory.
    pub data: PathBuf,

    /// Extension of include-only templates.
    pub partial_ext: String,

    /// Render `.md` files in the content tree.
    pub markdown: bool,

    /// Wrapper template for `.md` pages (content-relative name).
    pub markdown_template: String,

    /// Minify generated XML.
    pub minify: bool,

    /// Clean output directory before writing.
    pub clean: bool,

    /// Blog directory layout.
    pub blog: BlogConfig,

    /// Feed generation settings.
    pub feed: FeedConfig,

    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,

    /// robots.txt generation settings.
    pub robots: RobotsConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "site".into(),
            output: "build".into(),
            data: "data".into(),
            partial_ext: "tmpl".into(),
            markdown: true,
            markdown_template: "markdown.tmpl".into(),
            minify: false,
            clean: false,
            blog: BlogConfig::default(),
            feed: FeedConfig::default(),
            sitemap: SitemapConfig::default(),
            robots: RobotsConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    /// Validate build configuration.
    ///
    /// Expects `content` and `output` to be normalized already.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.content == self.output {
            diag.error_with_hint(
                "build.output",
                format!(
                    "output directory '{}' is the content directory",
                    self.output.display()
                ),
                "use a separate directory, e.g.: \"build\"",
            );
        } else if self.output.starts_with(&self.content) {
            diag.warn(
                "build.output",
                "output directory is inside the content directory",
            );
        }

        if self.partial_ext.is_empty() || self.partial_ext.starts_with('.') {
            diag.error_with_hint(
                "build.partial_ext",
                format!("invalid extension '{}'", self.partial_ext),
                "write the extension without a dot, e.g.: \"tmpl\"",
            );
        }

        for (field, path) in [
            ("build.feed.path", &self.feed.path),
            ("build.sitemap.path", &self.sitemap.path),
            ("build.robots.path", &self.robots.path),
        ] {
            if path.is_absolute() || path.as_os_str().is_empty() {
                diag.error(
                    field,
                    format!("'{}' must be relative to the output directory", path.display()),
                );
            }
        }

        self.blog.validate(diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.content, PathBuf::from("site"));
        assert_eq!(config.build.output, PathBuf::from("build"));
        assert_eq!(config.build.data, PathBuf::from("data"));
        assert_eq!(config.build.partial_ext, "tmpl");
        assert!(config.build.markdown);
        assert_eq!(config.build.markdown_template, "markdown.tmpl");
        assert!(!config.build.minify);
        assert!(!config.build.clean);
    }

    #[test]
    fn test_custom_paths() {
        let config = test_parse_config(
            r#"
[build]
content = "pages"
output = "public"
partial_ext = "part"
markdown = false
"#,
        );
        assert_eq!(config.build.content, PathBuf::from("pages"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.partial_ext, "part");
        assert!(!config.build.markdown);
    }

    #[test]
    fn test_validate_same_content_output() {
        let build = BuildSectionConfig {
            content: "/site".into(),
            output: "/site".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field, "build.output");
    }

    #[test]
    fn test_validate_absolute_feed_path() {
        let mut build = BuildSectionConfig {
            content: "/root/site".into(),
            output: "/root/build".into(),
            ..Default::default()
        };
        build.feed.path = "/feed.xml".into();
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, "build.feed.path");
    }
}
