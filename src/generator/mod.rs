//! Derived artifacts, generated from the sorted post collection:
//!
//! - **Blog index**: the blog listing page, rendered with every post
//! - **Feed**: Atom or RSS for blog readers (`feed.xml`)
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//! - **Robots**: `robots.txt` pointing at the sitemap
//!
//! All of them read the same [`PostCollection`], so they agree on which
//! posts exist and in which order. Nothing here touches the filesystem;
//! results are returned as [`OutputArtifact`]s for the writer.

pub mod blog;
pub mod feed;
pub mod robots;
pub mod sitemap;

use crate::{
    compiler::{RenderContext, TemplateSet},
    config::SiteConfig,
    log,
    page::{OutputArtifact, PostCollection},
    utils::plural::plural_count,
};
use anyhow::Result;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::borrow::Cow;

/// Path segment characters left unescaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Generate every enabled derived artifact.
pub fn emit_artifacts(
    config: &SiteConfig,
    templates: &TemplateSet,
    ctx: &RenderContext,
    posts: &PostCollection,
) -> Result<Vec<OutputArtifact>> {
    let mut artifacts = Vec::new();

    if let Some(index) = blog::build_index(config, templates, ctx, posts)? {
        log!("blog"; "{} with {}", index.path.display(), plural_count(posts.len(), "post"));
        artifacts.push(index);
    }
    if config.build.feed.enable {
        let feed = feed::build_feed(config, posts)?;
        log!("feed"; "{} ({})", feed.path.display(), config.build.feed.format.name());
        artifacts.push(feed);
    }
    if config.build.sitemap.enable {
        let sitemap = sitemap::build_sitemap(config, posts);
        log!("sitemap"; "{}", sitemap.path.display());
        artifacts.push(sitemap);
    }
    if config.build.robots.enable {
        artifacts.push(robots::build_robots(config));
    }

    Ok(artifacts)
}

/// Absolute URL for a site path: `base_url` + percent-encoded `path`.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let encoded = path
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", base_url.trim_end_matches('/'), encoded.trim_start_matches('/'))
}

/// Minify XML content if enabled.
pub fn minify_xml(content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if enabled {
        let xml_str = std::str::from_utf8(content).unwrap_or("");
        let minified = xml_str
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("");
        Cow::Owned(minified.into_bytes())
    } else {
        Cow::Borrowed(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::page::post::test_post;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://example.com", "/blog/a.html"),
            "https://example.com/blog/a.html"
        );
        assert_eq!(
            absolute_url("https://example.com/", "blog/hello world.html"),
            "https://example.com/blog/hello%20world.html"
        );
        assert_eq!(
            absolute_url("https://example.com", "/blog/café.html"),
            "https://example.com/blog/caf%C3%A9.html"
        );
    }

    #[test]
    fn test_minify_xml() {
        let xml = b"<root>\n\n  <item/>\n\n</root>";
        assert_eq!(&*minify_xml(xml, true), b"<root><item/></root>");
        assert_eq!(&*minify_xml(xml, false), xml.as_slice());
    }

    #[test]
    fn test_emit_counts_agree() {
        let root = Path::new("/srv/site");
        let config = test_config_at(root, "");
        let templates = TemplateSet::load(root, &[]).unwrap();
        let posts = PostCollection::new(vec![
            test_post("A", "January 1, 2021", &["x"]),
            test_post("B", "March 1, 2021", &["y"]),
        ]);

        let artifacts =
            emit_artifacts(&config, &templates, &RenderContext::default(), &posts).unwrap();
        let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
        // no blog index template: index skipped
        assert_eq!(
            paths,
            [
                PathBuf::from("feed.xml"),
                PathBuf::from("sitemap.xml"),
                PathBuf::from("robots.txt")
            ]
        );

        let feed = artifacts[0].text();
        let sitemap = artifacts[1].text();
        assert_eq!(feed.matches("<entry>").count(), posts.len());
        assert_eq!(sitemap.matches("<url>").count(), posts.len());
    }

    #[test]
    fn test_emit_disabled() {
        let root = Path::new("/srv/site");
        let config = test_config_at(
            root,
            "[build.feed]\nenable = false\n[build.sitemap]\nenable = false\n[build.robots]\nenable = false",
        );
        let templates = TemplateSet::load(root, &[]).unwrap();
        let artifacts = emit_artifacts(
            &config,
            &templates,
            &RenderContext::default(),
            &PostCollection::default(),
        )
        .unwrap();
        assert!(artifacts.is_empty());
    }
}
