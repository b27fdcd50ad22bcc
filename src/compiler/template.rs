//! Template loading, rendering, and block introspection.
//!
//! All templates under the content root (rendered pages and partials) are
//! loaded into one [`Tera`] instance, each named by its `/`-separated
//! relative path, so `{% extends "base.tmpl" %}` and
//! `{% include "nav.tmpl" %}` resolve against the content root.
//!
//! Besides full renders, [`TemplateSet::resolve_region`] evaluates a single
//! `{% block %}` of a template in isolation. Blog posts carry their
//! metadata that way:
//!
//! ```text
//! {% extends "post.tmpl" %}
//! {% block postTitle %}Hello{% endblock %}
//! {% block postDate %}March 1, 2021{% endblock %}
//! ```

use super::{BuildError, BuildResult, RenderContext};
use crate::page::SourceFile;
use regex::Regex;
use serde_json::Value;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tera::Tera;

/// Block open/close tags, plus the spans Tera never parses for tags:
/// `{# comments #}` and `{% raw %}` sections.
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)\{#.*?#\}",
        r"|\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\}",
        r"|\{%-?\s*(?:block\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)|(?P<end>endblock)(?:\s+[A-Za-z_][A-Za-z0-9_]*)?)\s*-?%\}",
    ))
    .unwrap()
});

/// `{% extends "parent" %}`
static EXTENDS_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{%-?\s*extends\s+"(?P<parent>[^"]+)"\s*-?%\}"#).unwrap()
});

/// `{% import "macros.tmpl" as m %}`, needed by blocks calling `m::...`.
static IMPORT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{%-?\s*import\s+"[^"]+"\s+as\s+[A-Za-z_][A-Za-z0-9_]*\s*-?%\}"#).unwrap()
});

/// `{{ super() }}` inside a block body.
static SUPER_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{-?\s*super\(\)\s*-?\}\}").unwrap());

/// Name the region fragment is registered under.
const REGION_TEMPLATE: &str = "__region__";

/// Context key holding the parent's rendering of the block.
const SUPER_KEY: &str = "__region_super";

pub struct TemplateSet {
    tera: Tera,
    root: PathBuf,
    /// Raw source per template name, for block introspection.
    sources: HashMap<String, String>,
}

impl TemplateSet {
    /// Load every template-kind source. Inheritance chains are resolved
    /// here, so a missing parent fails the build before anything renders.
    pub fn load(root: &Path, files: &[SourceFile]) -> BuildResult<Self> {
        let mut sources = HashMap::new();
        for file in files.iter().filter(|f| f.kind.is_template()) {
            let text = fs::read_to_string(&file.path)
                .map_err(|e| BuildError::filesystem(&file.path, e))?;
            sources.insert(file.name(), text);
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(sources.iter().map(|(name, text)| (name.as_str(), text.as_str())))
            .map_err(|e| BuildError::template(root, e))?;

        crate::debug!("template"; "loaded {} templates", sources.len());
        Ok(Self {
            tera,
            root: root.to_path_buf(),
            sources,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Render a loaded template.
    pub fn render(&self, name: &str, ctx: &RenderContext) -> BuildResult<String> {
        self.tera
            .render(name, &ctx.to_tera())
            .map_err(|e| BuildError::template(self.path_of(name), e))
    }

    /// Render the wrapper `template` on behalf of `source` (a Markdown page
    /// or docs file). Errors are reported against `source`.
    pub fn render_with(
        &self,
        source: &Path,
        template: &str,
        ctx: &RenderContext,
    ) -> BuildResult<String> {
        if !self.contains(template) {
            return Err(BuildError::Markdown {
                path: source.to_path_buf(),
                message: format!("wrapper template `{template}` not found in content root"),
            });
        }
        self.tera
            .render(template, &ctx.to_tera())
            .map_err(|e| BuildError::template(source, e))
    }

    /// Evaluate block `block` as written in template `name` itself.
    ///
    /// The page is not rendered, and a block the page does not override
    /// counts as absent even if a parent defines it. Inside the block,
    /// includes, the page's macro imports and `{{ super() }}` work as in a
    /// full render. Returns the trimmed output, or `None` when the block is
    /// absent or renders to whitespace.
    pub fn resolve_region(
        &self,
        name: &str,
        block: &str,
        ctx: &RenderContext,
    ) -> BuildResult<Option<String>> {
        let Some(source) = self.sources.get(name) else {
            return Ok(None);
        };
        if find_block(source, block).is_none() {
            return Ok(None);
        }
        let rendered = self.render_block(name, block, ctx)?.unwrap_or_default();
        let trimmed = rendered.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    /// Render `block` of `name`, falling back along the `extends` chain.
    fn render_block(
        &self,
        name: &str,
        block: &str,
        ctx: &RenderContext,
    ) -> BuildResult<Option<String>> {
        let Some(source) = self.sources.get(name) else {
            return Ok(None);
        };
        let parent = EXTENDS_TAG
            .captures(source)
            .map(|caps| caps["parent"].to_string());

        let Some(fragment) = find_block(source, block) else {
            return match parent {
                Some(parent) => self.render_block(&parent, block, ctx),
                None => Ok(None),
            };
        };

        let mut ctx = ctx.clone();
        let mut body = fragment.to_string();
        if SUPER_CALL.is_match(&body) {
            let inherited = match &parent {
                Some(parent) => self.render_block(parent, block, &ctx)?,
                None => None,
            };
            ctx = ctx.with([(SUPER_KEY, Value::from(inherited.unwrap_or_default()))]);
            body = SUPER_CALL
                .replace_all(&body, format!("{{{{ {SUPER_KEY} }}}}").as_str())
                .into_owned();
        }

        let imports: String = IMPORT_TAG
            .find_iter(source)
            .map(|m| m.as_str())
            .collect();

        let mut tera = self.tera.clone();
        tera.add_raw_template(REGION_TEMPLATE, &format!("{imports}{body}"))
            .and_then(|()| tera.render(REGION_TEMPLATE, &ctx.to_tera()))
            .map(Some)
            .map_err(|e| BuildError::template(self.path_of(name), e))
    }
}

/// Body of the first `{% block name %}` in `source`, nested blocks included.
/// Tags inside comments and raw sections are not blocks.
fn find_block<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let mut tags = BLOCK_TAG
        .captures_iter(source)
        .filter(|caps| caps.name("name").is_some() || caps.name("end").is_some());

    let start = tags
        .by_ref()
        .find(|caps| caps.name("name").is_some_and(|n| n.as_str() == name))?
        .get(0)?
        .end();

    let mut depth = 0usize;
    for caps in tags {
        if caps.name("name").is_some() {
            depth += 1;
        } else if depth == 0 {
            return Some(&source[start..caps.get(0)?.start()]);
        } else {
            depth -= 1;
        }
    }
    None
}
