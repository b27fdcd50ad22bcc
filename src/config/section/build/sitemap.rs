//! Sitemap and robots generation configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    pub enable: bool,
    /// Output path for sitemap file.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

/// `robots.txt` pointing crawlers at the sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    pub enable: bool,
    pub path: PathBuf,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "robots.txt".into(),
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
        assert!(config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("sitemap.xml"));
        assert!(config.build.robots.enable);
        assert_eq!(config.build.robots.path, PathBuf::from("robots.txt"));
    }

    #[test]
    fn test_disable_robots() {
        let config = test_parse_config("[build.robots]\nenable = false");
        assert!(!config.build.robots.enable);
        assert!(config.build.sitemap.enable);
    }
}
