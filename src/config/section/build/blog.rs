//! `[build.blog]` configuration.
//!
//! ```toml
//! [build.blog]
//! dir = "blog"           # posts live under this content subdirectory
//! index = "index.html"   # listing page inside `dir`, rendered after all posts
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Blog directory, relative to the content root.
    pub dir: String,
    /// File name of the blog index page inside `dir`.
    pub index: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            dir: "blog".into(),
            index: "index.html".into(),
        }
    }
}

impl BlogConfig {
    /// Blog directory without surrounding slashes (`"/blog/"` -> `"blog"`).
    pub fn dir_name(&self) -> &str {
        self.dir.trim_matches('/')
    }

    /// Relative path of the blog index page (`blog/index.html`).
    pub fn index_path(&self) -> String {
        format!("{}/{}", self.dir_name(), self.index)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir_name().is_empty() {
            diag.error_with_hint(
                "build.blog.dir",
                "blog directory must not be empty",
                "set a content subdirectory, e.g.: \"blog\"",
            );
        } else if Path::new(self.dir_name())
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            diag.error_with_hint(
                "build.blog.dir",
                format!("'{}' must be a plain relative path", self.dir),
                "remove `..` and leading `/`",
            );
        }

        if self.index.is_empty() || self.index.contains('/') {
            diag.error(
                "build.blog.index",
                format!("'{}' must be a bare file name", self.index),
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
        assert_eq!(config.build.blog.dir_name(), "blog");
        assert_eq!(config.build.blog.index_path(), "blog/index.html");
    }

    #[test]
    fn test_dir_slashes_trimmed() {
        let config = test_parse_config("[build.blog]\ndir = \"/posts/\"\nindex = \"all.html\"");
        assert_eq!(config.build.blog.dir_name(), "posts");
        assert_eq!(config.build.blog.index_path(), "posts/all.html");
    }

    #[test]
    fn test_validate_empty_dir() {
        let blog = BlogConfig {
            dir: "/".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        blog.validate(&mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field, "build.blog.dir");
    }

    #[test]
    fn test_validate_parent_dir() {
        let blog = BlogConfig {
            dir: "../blog".into(),
            index: "nested/index.html".into(),
        };
        let mut diag = ConfigDiagnostics::new();
        blog.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
    }
}
