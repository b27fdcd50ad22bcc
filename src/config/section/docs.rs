//! `[docs]` configuration.
//!
//! An external documentation tree (usually another repository's `docs/`)
//! converted from Markdown and merged into the output.
//!
//! ```toml
//! [docs]
//! enable = true
//! source = "../project/docs"
//! output = "docs"            # subdirectory of the build output
//! template = "docs.tmpl"     # wrapper template in the content tree
//! last_edited = true         # ask git for each page's last commit date
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub enable: bool,
    /// Docs source tree (relative to site root).
    pub source: PathBuf,
    /// Destination inside the output directory.
    pub output: PathBuf,
    /// Wrapper template name.
    pub template: String,
    /// Pass the git last-commit date to the template.
    pub last_edited: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            source: "docs".into(),
            output: "docs".into(),
            template: "docs.tmpl".into(),
            last_edited: true,
        }
    }
}

impl DocsConfig {
    /// Expects `source` to be normalized already.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        if !self.source.is_dir() {
            diag.error_with_hint(
                "docs.source",
                format!("directory '{}' not found", self.source.display()),
                "point docs.source at an existing directory or set docs.enable = false",
            );
        }
        if self.output.is_absolute() {
            diag.error(
                "docs.output",
                format!(
                    "'{}' must be relative to the output directory",
                    self.output.display()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(!config.docs.enable);
        assert_eq!(config.docs.output, PathBuf::from("docs"));
        assert_eq!(config.docs.template, "docs.tmpl");
        assert!(config.docs.last_edited);
    }

    #[test]
    fn test_validate_missing_source() {
        let docs = DocsConfig {
            enable: true,
            source: "/definitely/not/here".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        docs.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, "docs.source");
    }

    #[test]
    fn test_disabled_skips_validation() {
        let docs = DocsConfig {
            source: "/definitely/not/here".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        docs.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
