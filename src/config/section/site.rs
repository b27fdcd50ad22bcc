//! `[site]` configuration.
//!
//! Basic site information. The whole section is exposed to templates as
//! the `site` variable (`{{ site.title }}`, `{{ site.extra.twitter }}`).

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name, used as feed author.
    pub author: String,

    /// Author email, combined with post authors for RSS `<author>`.
    pub email: String,

    /// Site description.
    pub description: String,

    /// Base URL (e.g., "https://example.com").
    pub url: Option<String>,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Custom fields accessible via `site.extra.xxx` in templates.
    pub extra: BTreeMap<String, toml::Value>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            extra: BTreeMap::new(),
        }
    }
}

impl SiteInfoConfig {
    /// Base URL without a trailing slash, empty when unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `url_required`, `url` must be set
    /// - `url` must be a valid URL with scheme (e.g., `https://example.com`)
    pub fn validate(&self, url_required: bool, diag: &mut ConfigDiagnostics) {
        if url_required && self.url.is_none() {
            diag.error_with_hint(
                "site.url",
                "feed, sitemap or robots is enabled but site.url is not configured",
                "set site.url, e.g.: \"https://example.com\"",
            );
        }

        let Some(url_str) = &self.url else {
            return;
        };
        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        "site.url",
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        "site.url",
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    "site.url",
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_parse_site() {
        let config = test_parse_config(
            "[site.extra]\ntwitter = \"@lantern\"\n",
        );
        assert_eq!(config.site.title, "Test");
        assert_eq!(config.site.language, "en");
        assert_eq!(config.site.base_url(), "https://example.com");
        assert_eq!(
            config.site.extra.get("twitter").and_then(|v| v.as_str()),
            Some("@lantern")
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let site = SiteInfoConfig {
            url: Some("https://example.com/".into()),
            ..Default::default()
        };
        assert_eq!(site.base_url(), "https://example.com");
        assert_eq!(SiteInfoConfig::default().base_url(), "");
    }

    #[test]
    fn test_validate_missing_url() {
        let mut diag = ConfigDiagnostics::new();
        SiteInfoConfig::default().validate(true, &mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        SiteInfoConfig::default().validate(false, &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_validate_bad_scheme() {
        let site = SiteInfoConfig {
            url: Some("ftp://example.com".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        site.validate(true, &mut diag);
        assert!(diag.errors()[0].message.contains("ftp"));
    }

    #[test]
    fn test_validate_unparseable() {
        let site = SiteInfoConfig {
            url: Some("example.com".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        site.validate(true, &mut diag);
        assert!(diag.errors()[0].message.contains("invalid URL"));
    }
}
