//! Markdown to HTML conversion using pulldown-cmark.
//!
//! Used for Markdown pages in the content tree and for the docs tree.
//! Relative links to other Markdown files are rewritten to their HTML
//! output (`guide.md#setup` -> `guide.html#setup`), and the first
//! level-one heading becomes the title. The docs tree publishes `README.md`
//! as `index.html`, so links there follow it when
//! [`MarkdownOptions::readme_index`] is set.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use std::sync::LazyLock;

/// A relative `*.md` link target, optionally followed by `?query` or `#fragment`.
static MD_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<dir>(?:[^/?#]*/)*)(?P<stem>[^/?#]+)\.md(?P<rest>[?#].*)?$")
        .unwrap()
});

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
    /// Link `README.md` as `index.html` instead of `README.html`
    pub readme_index: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
            readme_index: false,
        }
    }

    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        for (enabled, flag) in [
            (self.tables, Options::ENABLE_TABLES),
            (self.footnotes, Options::ENABLE_FOOTNOTES),
            (self.strikethrough, Options::ENABLE_STRIKETHROUGH),
            (self.task_lists, Options::ENABLE_TASKLISTS),
            (self.heading_attributes, Options::ENABLE_HEADING_ATTRIBUTES),
        ] {
            if enabled {
                opts.insert(flag);
            }
        }
        opts
    }
}

/// Converted Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPage {
    /// Text of the first `# heading`, if any.
    pub title: Option<String>,
    pub body: String,
}

/// Convert Markdown to an HTML fragment.
pub fn convert(markdown: &str, options: &MarkdownOptions) -> MarkdownPage {
    let mut title: Option<String> = None;
    let mut in_h1 = false;
    let mut heading_text = String::new();

    let events = Parser::new_ext(markdown, options.to_pulldown_options()).map(|event| {
        match &event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if title.is_none() => {
                in_h1 = true;
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_h1 => {
                in_h1 = false;
                title = Some(heading_text.trim().to_string());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => heading_text.push_str(text),
            _ => {}
        }
        rewrite_link(event, options.readme_index)
    });

    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, events);

    MarkdownPage {
        title: title.filter(|t| !t.is_empty()),
        body,
    }
}

fn rewrite_link(event: Event<'_>, readme_index: bool) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: rewrite_md_target(&dest_url, readme_index).map_or(dest_url, CowStr::from),
            title,
            id,
        }),
        other => other,
    }
}

/// New target for a relative link to a Markdown file, `None` to keep it.
pub fn rewrite_md_target(target: &str, readme_index: bool) -> Option<String> {
    if target.contains("://") || target.starts_with("mailto:") || target.starts_with('/') {
        return None;
    }
    let caps = MD_LINK.captures(target)?;
    let stem = &caps["stem"];
    let stem = if readme_index && stem.eq_ignore_ascii_case("readme") {
        "index"
    } else {
        stem
    };
    Some(format!(
        "{}{}.html{}",
        &caps["dir"],
        stem,
        caps.name("rest").map_or("", |m| m.as_str())
    ))
}

/// Output name for a docs Markdown file name (`README.md` -> `index.html`).
pub fn output_file_name(stem: &str) -> String {
    if stem.eq_ignore_ascii_case("readme") {
        "index.html".to_string()
    } else {
        format!("{stem}.html")
    }
}
