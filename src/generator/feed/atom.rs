//! Atom 1.0 feed generation.

use crate::{
    config::{FeedFormat, SiteConfig},
    generator::absolute_url,
    page::{BlogPost, PostCollection},
    utils::date::PostDate,
};
use anyhow::{Context, Result};
use atom_syndication::{
    CategoryBuilder, ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime,
    GeneratorBuilder, Link, LinkBuilder, Person, PersonBuilder, Text,
};

/// Feed `updated` of an empty blog.
const EPOCH: &str = "1970-01-01T00:00:00Z";

pub struct AtomFeed<'a> {
    config: &'a SiteConfig,
    posts: &'a PostCollection,
}

impl<'a> AtomFeed<'a> {
    pub fn new(config: &'a SiteConfig, posts: &'a PostCollection) -> Self {
        Self { config, posts }
    }

    pub fn into_xml(self) -> Result<String> {
        let site = &self.config.site;
        let base_url = self.config.base_url();

        let entries = self
            .posts
            .iter()
            .map(|post| post_to_atom_entry(post, base_url))
            .collect::<Result<Vec<Entry>>>()?;

        // Collection is newest first
        let updated = match self.posts.iter().next() {
            Some(post) => parse_date(post.date)?,
            None => EPOCH.parse().context("invalid epoch timestamp")?,
        };

        let authors: Vec<Person> = if site.author.is_empty() {
            Vec::new()
        } else {
            vec![
                PersonBuilder::default()
                    .name(site.author.clone())
                    .email((!site.email.is_empty()).then(|| site.email.clone()))
                    .build(),
            ]
        };

        let self_link: Link = LinkBuilder::default()
            .href(absolute_url(
                base_url,
                &self.config.build.feed.path.to_string_lossy(),
            ))
            .rel("self".to_string())
            .mime_type(Some(FeedFormat::Atom.mime_type().to_string()))
            .build();

        let alternate_link: Link = LinkBuilder::default()
            .href(format!("{base_url}/"))
            .rel("alternate".to_string())
            .build();

        let feed: Feed = FeedBuilder::default()
            .title(Text::plain(site.title.clone()))
            .id(format!("{base_url}/"))
            .updated(updated)
            .authors(authors)
            .links(vec![self_link, alternate_link])
            .subtitle(Some(Text::plain(site.description.clone())))
            .generator(Some(
                GeneratorBuilder::default()
                    .value(env!("CARGO_PKG_NAME"))
                    .build(),
            ))
            .lang(site.language.clone())
            .entries(entries)
            .build();

        Ok(feed.to_string())
    }
}

fn parse_date(date: PostDate) -> Result<FixedDateTime> {
    date.to_rfc3339()
        .parse()
        .with_context(|| format!("invalid feed date {date}"))
}

fn post_to_atom_entry(post: &BlogPost, base_url: &str) -> Result<Entry> {
    let date = parse_date(post.date)?;
    let link = absolute_url(base_url, &post.url);

    let entry_link: Link = LinkBuilder::default()
        .href(&link)
        .rel("alternate".to_string())
        .build();

    let author: Person = PersonBuilder::default().name(post.author.clone()).build();

    let categories = post
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().term(tag.clone()).build())
        .collect::<Vec<_>>();

    let content = ContentBuilder::default()
        .value(Some(post.content.clone()))
        .content_type(Some("html".to_string()))
        .build();

    Ok(EntryBuilder::default()
        .title(Text::plain(post.title.clone()))
        .id(&link)
        .updated(date)
        .published(Some(date))
        .links(vec![entry_link])
        .authors(vec![author])
        .categories(categories)
        .content(Some(content))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::page::post::test_post;

    #[test]
    fn test_post_to_atom_entry() {
        let post = test_post("Hello", "January 5th, 2021", &["rust", "ssg"]);
        let entry = post_to_atom_entry(&post, "https://example.com").unwrap();

        assert_eq!(entry.title().as_str(), "Hello");
        assert_eq!(entry.id(), "https://example.com/blog/hello.html");
        assert_eq!(entry.updated().to_rfc3339(), "2021-01-05T00:00:00+00:00");
        assert_eq!(entry.published(), Some(entry.updated()));
        assert_eq!(entry.authors()[0].name(), "Ada");
        let terms: Vec<_> = entry.categories().iter().map(|c| c.term()).collect();
        assert_eq!(terms, ["rust", "ssg"]);
        let content = entry.content().unwrap();
        assert_eq!(content.value(), Some("<h1>Hello</h1>"));
        assert_eq!(content.content_type(), Some("html"));
    }

    #[test]
    fn test_feed_order_and_updated() {
        let config = test_parse_config("");
        let posts = PostCollection::new(vec![
            test_post("A", "January 1, 2021", &["x"]),
            test_post("B", "March 1, 2021", &["y"]),
        ]);
        let xml = AtomFeed::new(&config, &posts).into_xml().unwrap();

        let feed: Feed = xml.parse().unwrap();
        assert_eq!(feed.title().as_str(), "Test");
        assert_eq!(feed.id(), "https://example.com/");
        assert_eq!(feed.updated().to_rfc3339(), "2021-03-01T00:00:00+00:00");
        assert_eq!(feed.lang(), Some("en"));
        let titles: Vec<_> = feed.entries().iter().map(|e| e.title().as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
        assert!(feed.links().iter().any(|l| l.href() == "https://example.com/feed.xml"));
    }

    #[test]
    fn test_empty_feed_is_valid() {
        let config = test_parse_config("");
        let posts = PostCollection::default();
        let xml = AtomFeed::new(&config, &posts).into_xml().unwrap();

        let feed: Feed = xml.parse().unwrap();
        assert!(feed.entries().is_empty());
        assert_eq!(feed.updated().to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_feed_is_deterministic() {
        let config = test_parse_config("");
        let posts = PostCollection::new(vec![test_post("A", "January 1, 2021", &["x"])]);
        let first = AtomFeed::new(&config, &posts).into_xml().unwrap();
        let second = AtomFeed::new(&config, &posts).into_xml().unwrap();
        assert_eq!(first, second);
    }
}
