//! Blog posts: metadata extraction and the sorted collection.
//!
//! A post declares its metadata in four template blocks:
//!
//! | Block        | Example                 | Parsed as                     |
//! |--------------|-------------------------|-------------------------------|
//! | `postTitle`  | `Hello World`           | trimmed text                  |
//! | `postAuthor` | `Ada`                   | trimmed text                  |
//! | `postDate`   | `March 1, 2021`         | [`PostDate`]                  |
//! | `postTags`   | `rust, ssg`             | comma list, order preserved   |
//!
//! All four are required. The blocks are evaluated on their own (see
//! [`TemplateSet::resolve_region`]), then the page is rendered once more
//! with the metadata in context.

use super::SourceFile;
use crate::compiler::{BuildError, BuildResult, RenderContext, TemplateSet};
use crate::utils::date::PostDate;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::PathBuf;

pub const TITLE_BLOCK: &str = "postTitle";
pub const AUTHOR_BLOCK: &str = "postAuthor";
pub const DATE_BLOCK: &str = "postDate";
pub const TAGS_BLOCK: &str = "postTags";

/// Metadata resolved from a post's blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMeta {
    pub title: String,
    pub author: String,
    pub date: PostDate,
    pub tags: Vec<String>,
}

/// A rendered blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub title: String,
    pub author: String,
    pub date: PostDate,
    pub tags: Vec<String>,
    /// Site-absolute URL path (`/blog/a.html`).
    pub url: String,
    /// Fully rendered page.
    pub content: String,
    /// Source file, for error messages.
    #[serde(skip)]
    pub source: PathBuf,
}

impl BlogPost {
    pub fn new(meta: PostMeta, url: String, content: String, source: PathBuf) -> Self {
        Self {
            title: meta.title,
            author: meta.author,
            date: meta.date,
            tags: meta.tags,
            url,
            content,
            source,
        }
    }

    /// Metadata without the rendered content, as exposed to templates and
    /// printed by `lantern query`.
    pub fn summary(&self) -> Value {
        json!({
            "title": self.title,
            "author": self.author,
            "date": self.date,
            "date_iso": self.date.ymd(),
            "tags": self.tags,
            "url": self.url,
        })
    }

    /// Summary plus the rendered content, for the blog index.
    fn to_value(&self) -> Value {
        let mut value = self.summary();
        value["content"] = Value::from(self.content.as_str());
        value
    }
}

/// Split a tag list on commas, trimming and dropping empty pieces.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Resolve the four metadata blocks of `source`.
pub fn extract_meta(
    templates: &TemplateSet,
    source: &SourceFile,
    ctx: &RenderContext,
) -> BuildResult<PostMeta> {
    let name = source.name();
    let region = |field: &'static str| -> BuildResult<String> {
        templates
            .resolve_region(&name, field, ctx)?
            .ok_or_else(|| BuildError::MissingMetadata {
                path: source.path.clone(),
                field,
            })
    };

    let title = region(TITLE_BLOCK)?;
    let author = region(AUTHOR_BLOCK)?;
    let raw_date = region(DATE_BLOCK)?;
    let raw_tags = region(TAGS_BLOCK)?;

    let date = PostDate::parse_long(&raw_date).ok_or_else(|| BuildError::DateParse {
        path: source.path.clone(),
        value: raw_date.clone(),
    })?;

    let tags = parse_tags(&raw_tags);
    if tags.is_empty() {
        return Err(BuildError::MissingMetadata {
            path: source.path.clone(),
            field: TAGS_BLOCK,
        });
    }

    Ok(PostMeta {
        title,
        author,
        date,
        tags,
    })
}

/// Extract metadata, then render the post with it in context.
///
/// The post sees `title`, `tags` and a `post` object on top of `ctx`.
pub fn render_post(
    templates: &TemplateSet,
    source: &SourceFile,
    ctx: &RenderContext,
) -> BuildResult<BlogPost> {
    let meta = extract_meta(templates, source, ctx)?;
    let url = source.url();

    let post_value = json!({
        "title": meta.title,
        "author": meta.author,
        "date": meta.date,
        "date_iso": meta.date.ymd(),
        "tags": meta.tags,
        "url": url,
    });
    let post_ctx = ctx.with([
        ("title", Value::from(meta.title.as_str())),
        ("tags", json!(meta.tags)),
        ("post", post_value),
    ]);
    let content = templates.render(&source.name(), &post_ctx)?;

    Ok(BlogPost::new(meta, url, content, source.path.clone()))
}

// ============================================================================
// PostCollection
// ============================================================================

/// Every post of the site, newest first.
///
/// Only built from the complete list, after all sources are rendered.
/// Posts sharing a date keep their discovery order.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<BlogPost>,
}

impl PostCollection {
    pub fn new(mut posts: Vec<BlogPost>) -> Self {
        // sort_by is stable
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BlogPost> {
        self.posts.iter()
    }

    /// Posts with content, for the blog index template.
    pub fn to_value(&self) -> Value {
        Value::Array(self.posts.iter().map(BlogPost::to_value).collect())
    }

    /// Posts without content.
    pub fn summaries(&self) -> Vec<Value> {
        self.posts.iter().map(BlogPost::summary).collect()
    }
}

impl<'a> IntoIterator for &'a PostCollection {
    type Item = &'a BlogPost;
    type IntoIter = std::slice::Iter<'a, BlogPost>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

#[cfg(test)]
pub(crate) fn test_post(title: &str, date: &str, tags: &[&str]) -> BlogPost {
    BlogPost {
        title: title.into(),
        author: "Ada".into(),
        date: PostDate::parse_long(date).unwrap(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        url: format!("/blog/{}.html", title.to_lowercase()),
        content: format!("<h1>{title}</h1>"),
        source: format!("site/blog/{}.html", title.to_lowercase()).into(),
    }
}
