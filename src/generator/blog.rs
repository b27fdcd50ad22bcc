//! Blog index generation.
//!
//! The blog index template (`blog/index.html` by default) is held back
//! during the per-page pass and rendered here, once, with `posts` bound to
//! the sorted collection:
//!
//! ```text
//! {% for post in posts %}
//!   <a href="{{ post.url }}">{{ post.title }}</a> {{ post.date }}
//! {% endfor %}
//! ```

use crate::{
    compiler::{BuildResult, RenderContext, TemplateSet},
    config::SiteConfig,
    log,
    page::{OutputArtifact, PostCollection},
};
use serde_json::json;

/// Render the blog index, or `None` when the site has no index template.
pub fn build_index(
    config: &SiteConfig,
    templates: &TemplateSet,
    ctx: &RenderContext,
    posts: &PostCollection,
) -> BuildResult<Option<OutputArtifact>> {
    let name = config.build.blog.index_path();
    if !templates.contains(&name) {
        if !posts.is_empty() {
            log!("warning"; "no blog index template at {}, skipping listing", name);
        }
        return Ok(None);
    }

    let index_ctx = ctx.with([
        ("page", json!({ "path": name, "url": format!("/{name}") })),
        ("posts", posts.to_value()),
    ]);
    let html = templates.render(&name, &index_ctx)?;
    Ok(Some(OutputArtifact::new(name, html)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::page::{SourceFile, SourceRules, classify, post::test_post};
    use std::{fs, path::Path};
    use tempfile::TempDir;

    const INDEX: &str =
        "{% for post in posts %}[{{ post.title }}|{{ post.date_iso }}|{{ post.url }}]{% endfor %}";

    fn setup(index: Option<&str>) -> (TempDir, TemplateSet) {
        let dir = TempDir::new().unwrap();
        let mut files = Vec::new();
        if let Some(text) = index {
            let path = dir.path().join("blog/index.html");
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, text).unwrap();
            files.push(SourceFile {
                path,
                relative: "blog/index.html".into(),
                kind: classify(Path::new("blog/index.html"), &SourceRules::default()),
            });
        }
        let templates = TemplateSet::load(dir.path(), &files).unwrap();
        (dir, templates)
    }

    #[test]
    fn test_index_lists_posts_newest_first() {
        let (dir, templates) = setup(Some(INDEX));
        let config = test_config_at(dir.path(), "");
        let posts = PostCollection::new(vec![
            test_post("A", "January 1, 2021", &["x"]),
            test_post("B", "March 1, 2021", &["y"]),
        ]);

        let index = build_index(&config, &templates, &RenderContext::default(), &posts)
            .unwrap()
            .unwrap();
        assert!(index.is_at("blog/index.html"));
        assert_eq!(
            index.text(),
            "[B|2021-03-01|/blog/b.html][A|2021-01-01|/blog/a.html]"
        );
    }

    #[test]
    fn test_index_empty_blog() {
        let (dir, templates) = setup(Some("{% if posts | length == 0 %}none{% endif %}"));
        let config = test_config_at(dir.path(), "");
        let index = build_index(&config, &templates, &RenderContext::default(), &PostCollection::default())
            .unwrap()
            .unwrap();
        assert_eq!(index.text(), "none");
    }

    #[test]
    fn test_no_index_template() {
        let (dir, templates) = setup(None);
        let config = test_config_at(dir.path(), "");
        let index = build_index(&config, &templates, &RenderContext::default(), &PostCollection::default())
            .unwrap();
        assert!(index.is_none());
    }
}
