//! Sitemap generation.
//!
//! One `<url>` per blog post, newest first, with the post date as
//! `<lastmod>`:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/hello.html</loc>
//!     <lastmod>2021-03-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    generator::{absolute_url, minify_xml},
    page::{OutputArtifact, PostCollection},
};
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub fn build_sitemap(config: &SiteConfig, posts: &PostCollection) -> OutputArtifact {
    let xml = Sitemap::from_posts(config.base_url(), posts).into_xml();
    let xml = minify_xml(xml.as_bytes(), config.build.minify);
    OutputArtifact::new(&config.build.sitemap.path, xml.into_owned())
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: String,
}

impl Sitemap {
    fn from_posts(base_url: &str, posts: &PostCollection) -> Self {
        let urls = posts
            .iter()
            .map(|post| UrlEntry {
                loc: absolute_url(base_url, &post.url),
                lastmod: post.date.ymd(),
            })
            .collect();
        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 128);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&entry.lastmod);
            xml.push_str("</lastmod>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::page::post::test_post;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(
            escape_xml("<q a=\"1\">it's</q>"),
            "&lt;q a=&quot;1&quot;&gt;it&apos;s&lt;/q&gt;"
        );
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::from_posts("https://example.com", &PostCollection::default()).into_xml();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_posts_in_order() {
        let posts = PostCollection::new(vec![
            test_post("A", "January 1, 2021", &["x"]),
            test_post("B", "March 1, 2021", &["y"]),
        ]);
        let xml = Sitemap::from_posts("https://example.com", &posts).into_xml();

        let b = xml.find("<loc>https://example.com/blog/b.html</loc>").unwrap();
        let a = xml.find("<loc>https://example.com/blog/a.html</loc>").unwrap();
        assert!(b < a);
        assert!(xml.contains("<lastmod>2021-03-01</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_build_sitemap_minified() {
        let config = test_parse_config("[build]\nminify = true\n[build.sitemap]\npath = \"map.xml\"");
        let posts = PostCollection::new(vec![test_post("A", "January 1, 2021", &["x"])]);
        let artifact = build_sitemap(&config, &posts);

        assert!(artifact.is_at("map.xml"));
        assert!(!artifact.text().contains('\n'));
        assert!(artifact.text().contains("<url><loc>"));
    }
}
