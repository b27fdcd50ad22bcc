//! Feed generation (Atom, RSS).
//!
//! One entry per post, newest first, with the full rendered post as
//! content. Dates are the post dates at UTC midnight; the feed itself is
//! "updated" at its newest post, so rebuilding an unchanged site produces
//! an identical file.

use crate::{
    config::{FeedFormat, SiteConfig},
    page::{OutputArtifact, PostCollection},
};
use anyhow::Result;

pub mod atom;
pub mod rss;

/// Build the feed in the configured format.
pub fn build_feed(config: &SiteConfig, posts: &PostCollection) -> Result<OutputArtifact> {
    let xml = match config.build.feed.format {
        FeedFormat::Atom => atom::AtomFeed::new(config, posts).into_xml()?,
        FeedFormat::Rss => rss::RssFeed::new(config, posts).into_xml()?,
    };
    Ok(OutputArtifact::new(&config.build.feed.path, xml))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::page::post::test_post;

    #[test]
    fn test_format_switch() {
        let posts = PostCollection::new(vec![test_post("A", "March 1, 2021", &["x"])]);

        let atom = build_feed(&test_parse_config(""), &posts).unwrap();
        assert!(atom.text().contains("<feed"));

        let config = test_parse_config("[build.feed]\nformat = \"rss\"\npath = \"rss.xml\"");
        let rss = build_feed(&config, &posts).unwrap();
        assert!(rss.is_at("rss.xml"));
        assert!(rss.text().contains("<rss"));
    }
}
