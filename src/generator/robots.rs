//! `robots.txt` generation.

use crate::{
    config::SiteConfig,
    generator::absolute_url,
    page::OutputArtifact,
};

/// Allow everything; point crawlers at the sitemap when one is built.
pub fn build_robots(config: &SiteConfig) -> OutputArtifact {
    let mut text = String::from("User-agent: *\nAllow: /\n");
    if config.build.sitemap.enable {
        let sitemap = config.build.sitemap.path.to_string_lossy();
        text.push_str(&format!(
            "Sitemap: {}\n",
            absolute_url(config.base_url(), &sitemap)
        ));
    }
    OutputArtifact::new(&config.build.robots.path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_robots_with_sitemap() {
        let artifact = build_robots(&test_parse_config(""));
        assert!(artifact.is_at("robots.txt"));
        assert_eq!(
            artifact.text(),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn test_robots_without_sitemap() {
        let artifact = build_robots(&test_parse_config("[build.sitemap]\nenable = false"));
        assert_eq!(artifact.text(), "User-agent: *\nAllow: /\n");
    }
}
