//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Collect** - Walk the content tree (and the docs tree when enabled)
//! - **Prepare** - Load data tables and templates, build the site context
//! - **Render** - Fold every source into a [`RenderOutcome`]
//! - **Emit** - Sort posts, then blog index, feed, sitemap, robots
//! - **Docs** - Convert the docs tree
//! - **Write** - Only once everything above succeeded
//!
//! Everything before **Write** stays in memory, so a failing page leaves
//! the output directory as it was.

use crate::{
    compiler::{
        BuildError, BuildResult, RenderContext, TemplateSet,
        markdown::{MarkdownOptions, convert},
        walk::collect_sources,
    },
    config::SiteConfig,
    data::load_tables,
    docs, generator, log,
    logger::ProgressLine,
    page::{BlogPost, OutputArtifact, PageKind, PostCollection, SourceFile, SourceRules},
    page::post::render_post,
    utils::{path::to_slash, plural::plural_count},
};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::{fs, path::Path};

/// Everything a build produces, in write order.
#[derive(Debug)]
pub struct SiteOutput {
    pub artifacts: Vec<OutputArtifact>,
    pub posts: PostCollection,
}

/// Per-source results, folded in discovery order.
#[derive(Default)]
struct RenderOutcome {
    artifacts: Vec<OutputArtifact>,
    posts: Vec<BlogPost>,
}

impl RenderOutcome {
    fn absorb(mut self, rendered: Rendered) -> Self {
        match rendered {
            Rendered::Page(artifact) => self.artifacts.push(artifact),
            Rendered::Post(post) => {
                self.artifacts
                    .push(OutputArtifact::new(post_output(&post), post.content.clone()));
                self.posts.push(post);
            }
            Rendered::Skipped => {}
        }
        self
    }
}

enum Rendered {
    Page(OutputArtifact),
    Post(BlogPost),
    /// Partials and the deferred blog index.
    Skipped,
}

/// Loaded inputs shared by every render.
struct Prepared {
    sources: Vec<SourceFile>,
    templates: TemplateSet,
    ctx: RenderContext,
}

fn prepare(config: &SiteConfig) -> Result<Prepared> {
    let content = &config.build.content;
    let sources = collect_sources(content, &SourceRules::from_config(&config.build))?;
    let data = load_tables(&config.build.data)?;
    let templates = TemplateSet::load(content, &sources)?;
    let ctx = RenderContext::for_site(config, data).context("failed to serialize [site] config")?;

    crate::debug!("build"; "{} in {}", plural_count(sources.len(), "source"), content.display());
    Ok(Prepared {
        sources,
        templates,
        ctx,
    })
}

/// Render every source. The first failure aborts the fold.
fn render_sources(
    config: &SiteConfig,
    prepared: &Prepared,
    progress: Option<&ProgressLine>,
) -> BuildResult<RenderOutcome> {
    prepared
        .sources
        .iter()
        .try_fold(RenderOutcome::default(), |outcome, source| {
            let rendered = render_source(config, &prepared.templates, &prepared.ctx, source)?;
            if let Some(progress) = progress
                && source.kind.is_rendered()
            {
                progress.inc("pages");
            }
            Ok(outcome.absorb(rendered))
        })
}

fn render_source(
    config: &SiteConfig,
    templates: &TemplateSet,
    ctx: &RenderContext,
    source: &SourceFile,
) -> BuildResult<Rendered> {
    let output = source.output_path();
    let page_ctx = ctx.with([(
        "page",
        json!({ "path": to_slash(&output), "url": source.url() }),
    )]);

    let rendered = match source.kind {
        PageKind::Page => {
            let html = templates.render(&source.name(), &page_ctx)?;
            Rendered::Page(OutputArtifact::new(output, html))
        }
        PageKind::Post => Rendered::Post(render_post(templates, source, &page_ctx)?),
        PageKind::Markdown => {
            let text = fs::read_to_string(&source.path)
                .map_err(|e| BuildError::filesystem(&source.path, e))?;
            let page = convert(&text, &MarkdownOptions::all());
            let title = page.title.unwrap_or_else(|| file_stem(source));
            let md_ctx = page_ctx.with([
                ("title", Value::from(title)),
                ("body", Value::from(page.body)),
                ("source", Value::from(source.name())),
            ]);
            let html =
                templates.render_with(&source.path, &config.build.markdown_template, &md_ctx)?;
            Rendered::Page(OutputArtifact::new(output, html))
        }
        PageKind::Asset => {
            let bytes =
                fs::read(&source.path).map_err(|e| BuildError::filesystem(&source.path, e))?;
            Rendered::Page(OutputArtifact::new(output, bytes))
        }
        PageKind::Partial | PageKind::BlogIndex => Rendered::Skipped,
    };
    Ok(rendered)
}

fn file_stem(source: &SourceFile) -> String {
    source
        .relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Output path of a post, from its site-absolute url.
fn post_output(post: &BlogPost) -> &str {
    post.url.trim_start_matches('/')
}

/// Build the entire site in memory.
///
/// Pipeline: collect -> prepare -> render -> emit -> docs
pub fn build_site(config: &SiteConfig) -> Result<SiteOutput> {
    let prepared = prepare(config)?;
    let doc_files = if config.docs.enable {
        docs::collect_docs(config)?
    } else {
        Vec::new()
    };

    let page_count = prepared
        .sources
        .iter()
        .filter(|s| s.kind.is_rendered())
        .count();
    let progress = ProgressLine::new(&[("pages", page_count), ("docs", doc_files.len())]);

    let outcome = render_sources(config, &prepared, Some(&progress))?;
    let posts = PostCollection::new(outcome.posts);
    let mut artifacts = outcome.artifacts;

    let docs = docs::ingest(
        config,
        &prepared.templates,
        &prepared.ctx,
        &doc_files,
        Some(&progress),
    )?;
    progress.finish();

    artifacts.extend(generator::emit_artifacts(
        config,
        &prepared.templates,
        &prepared.ctx,
        &posts,
    )?);
    artifacts.extend(docs);

    Ok(SiteOutput { artifacts, posts })
}

/// Render the content tree and return the sorted posts; nothing is emitted.
pub fn collect_posts(config: &SiteConfig) -> Result<PostCollection> {
    let prepared = prepare(config)?;
    let outcome = render_sources(config, &prepared, None)?;
    Ok(PostCollection::new(outcome.posts))
}

/// Write `artifacts` below `output`, clearing it first when `clean` is set.
pub fn write_artifacts(output: &Path, artifacts: &[OutputArtifact], clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    for artifact in artifacts {
        let path = output.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &artifact.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    log!("build"; "wrote {} to {}", plural_count(artifacts.len(), "file"), output.display());
    Ok(())
}
