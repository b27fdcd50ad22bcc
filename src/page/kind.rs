//! Source classification.
//!
//! Every file under the content root gets exactly one [`PageKind`], decided
//! from its relative path alone:
//!
//! ```text
//! site/
//! ├── base.tmpl              Partial    include/layout only, never emitted
//! ├── index.html             Page
//! ├── about.md               Markdown   wrapped in build.markdown_template
//! ├── style.css              Asset      copied verbatim
//! └── blog/
//!     ├── index.html         BlogIndex  rendered after every post is known
//!     ├── a.html             Post
//!     └── 2021/b.html        Post
//! ```

use crate::config::BuildSectionConfig;
use std::path::{Component, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Plain rendered HTML page.
    Page,
    /// Blog post: rendered, then mined for metadata.
    Post,
    /// Blog listing; deferred until the post collection exists.
    BlogIndex,
    /// Markdown page rendered through a wrapper template.
    Markdown,
    /// Copied verbatim.
    Asset,
    /// Include-only template.
    Partial,
}

impl PageKind {
    /// Whether Tera should know this file as a template.
    #[inline]
    pub const fn is_template(self) -> bool {
        matches!(
            self,
            Self::Page | Self::Post | Self::BlogIndex | Self::Partial
        )
    }

    /// Whether the file produces rendered output in the per-page pass.
    #[inline]
    pub const fn is_rendered(self) -> bool {
        matches!(self, Self::Page | Self::Post | Self::Markdown)
    }
}

/// The parts of `[build]` that decide a file's kind.
#[derive(Debug, Clone)]
pub struct SourceRules {
    pub blog_dir: String,
    pub blog_index: String,
    pub partial_ext: String,
    pub markdown: bool,
}

impl SourceRules {
    pub fn from_config(build: &BuildSectionConfig) -> Self {
        Self {
            blog_dir: build.blog.dir_name().to_owned(),
            blog_index: build.blog.index.clone(),
            partial_ext: build.partial_ext.clone(),
            markdown: build.markdown,
        }
    }

    /// `true` when `relative` lies somewhere below the blog directory.
    fn in_blog(&self, relative: &Path) -> bool {
        let mut blog = Path::new(&self.blog_dir).components();
        let mut path = relative.components();
        loop {
            match (blog.next(), path.next()) {
                (None, Some(_)) => return true,
                (Some(Component::Normal(a)), Some(Component::Normal(b))) if a == b => {}
                _ => return false,
            }
        }
    }
}

impl Default for SourceRules {
    fn default() -> Self {
        Self::from_config(&BuildSectionConfig::default())
    }
}

/// Classify a content-relative path.
pub fn classify(relative: &Path, rules: &SourceRules) -> PageKind {
    let ext = relative
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    if ext == rules.partial_ext {
        return PageKind::Partial;
    }

    match ext {
        "html" if rules.in_blog(relative) => {
            let is_index_name = relative
                .file_name()
                .is_some_and(|name| name == rules.blog_index.as_str());
            let at_blog_root = relative.parent() == Some(Path::new(&rules.blog_dir));
            match (is_index_name, at_blog_root) {
                (true, true) => PageKind::BlogIndex,
                (true, false) => PageKind::Page,
                (false, _) => PageKind::Post,
            }
        }
        "html" => PageKind::Page,
        "md" if rules.markdown => PageKind::Markdown,
        _ => PageKind::Asset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(path: &str) -> PageKind {
        classify(Path::new(path), &SourceRules::default())
    }

    #[test]
    fn test_pages_and_posts() {
        assert_eq!(kind("index.html"), PageKind::Page);
        assert_eq!(kind("about/team.html"), PageKind::Page);
        assert_eq!(kind("blog/a.html"), PageKind::Post);
        assert_eq!(kind("blog/2021/b.html"), PageKind::Post);
    }

    #[test]
    fn test_blog_index() {
        assert_eq!(kind("blog/index.html"), PageKind::BlogIndex);
        // only the top-level index is the listing
        assert_eq!(kind("blog/2021/index.html"), PageKind::Page);
    }

    #[test]
    fn test_blog_prefix_is_a_directory() {
        assert_eq!(kind("blogroll.html"), PageKind::Page);
        assert_eq!(kind("blogs/a.html"), PageKind::Page);
        assert_eq!(kind("blog.html"), PageKind::Page);
    }

    #[test]
    fn test_partials_assets_markdown() {
        assert_eq!(kind("base.tmpl"), PageKind::Partial);
        assert_eq!(kind("blog/post.tmpl"), PageKind::Partial);
        assert_eq!(kind("style.css"), PageKind::Asset);
        assert_eq!(kind("images/logo.png"), PageKind::Asset);
        assert_eq!(kind("about.md"), PageKind::Markdown);
    }

    #[test]
    fn test_markdown_disabled_copies_source() {
        let rules = SourceRules {
            markdown: false,
            ..SourceRules::default()
        };
        assert_eq!(classify(Path::new("notes.md"), &rules), PageKind::Asset);
    }

    #[test]
    fn test_nested_blog_dir() {
        let rules = SourceRules {
            blog_dir: "news/posts".into(),
            ..SourceRules::default()
        };
        assert_eq!(classify(Path::new("news/posts/x.html"), &rules), PageKind::Post);
        assert_eq!(classify(Path::new("news/posts/index.html"), &rules), PageKind::BlogIndex);
        assert_eq!(classify(Path::new("news/x.html"), &rules), PageKind::Page);
        assert_eq!(classify(Path::new("blog/x.html"), &rules), PageKind::Page);
    }
}
