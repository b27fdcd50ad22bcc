//! RSS 2.0 feed generation.

use crate::{
    config::{SiteConfig, SiteInfoConfig},
    generator::absolute_url,
    page::{BlogPost, PostCollection},
};
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{
    CategoryBuilder, ChannelBuilder, GuidBuilder, Item, ItemBuilder,
    extension::dublincore::{self, DublinCoreExtensionBuilder},
    validation::Validate,
};
use std::{collections::BTreeMap, sync::LazyLock};

pub struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: &'a PostCollection,
}

impl<'a> RssFeed<'a> {
    pub fn new(config: &'a SiteConfig, posts: &'a PostCollection) -> Self {
        Self { config, posts }
    }

    pub fn into_xml(self) -> Result<String> {
        let site = &self.config.site;
        let base_url = self.config.base_url();

        let items: Vec<Item> = self
            .posts
            .iter()
            .map(|post| post_to_rss_item(post, base_url, site))
            .collect();

        let namespaces = BTreeMap::from([("dc".to_string(), dublincore::NAMESPACE.to_string())]);

        let channel = ChannelBuilder::default()
            .namespaces(namespaces)
            .title(&site.title)
            .link(format!("{base_url}/"))
            .description(&site.description)
            .language(site.language.clone())
            .generator(env!("CARGO_PKG_NAME").to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

fn post_to_rss_item(post: &BlogPost, base_url: &str, site: &SiteInfoConfig) -> Item {
    let link = absolute_url(base_url, &post.url);

    let categories = post
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
        .collect::<Vec<_>>();

    // `<author>` needs an email; the plain name always goes out as dc:creator
    let creator = DublinCoreExtensionBuilder::default()
        .creators(vec![post.author.clone()])
        .build();

    ItemBuilder::default()
        .title(post.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(post.content.clone())
        .pub_date(post.date.to_rfc2822())
        .author(normalize_rss_author(&post.author, site))
        .categories(categories)
        .dublin_core_ext(Some(creator))
        .build()
}

/// RSS wants `email (Name)`. Bare names are paired with the site email;
/// without one the field is left out.
fn normalize_rss_author(author: &str, site: &SiteInfoConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.to_string());
    }
    if site.email.is_empty() {
        return None;
    }
    Some(format!("{} ({})", site.email, author))
}
