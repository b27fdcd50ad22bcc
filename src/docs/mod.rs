//! Documentation ingestion.
//!
//! Converts an external Markdown tree (`[docs] source`) into pages under
//! `[docs] output`, each wrapped in the docs template:
//!
//! ```text
//! ../project/docs/README.md        ->  build/docs/index.html
//! ../project/docs/guide/setup.md   ->  build/docs/guide/setup.html
//! ../project/docs/img/arch.png     ->  build/docs/img/arch.png
//! ```
//!
//! The wrapper sees `title`, `body`, `source`, `last_edited` and `page`.

use crate::{
    compiler::{
        BuildError, BuildResult, RenderContext, TemplateSet,
        markdown::{MarkdownOptions, convert, output_file_name},
        walk::collect_sources,
    },
    config::SiteConfig,
    logger::ProgressLine,
    page::{OutputArtifact, PageKind, SourceFile, SourceRules},
    utils::{git, path::to_slash},
};
use serde_json::{Value, json};
use std::{fs, path::PathBuf};

/// Every file of the docs tree, in name order.
pub fn collect_docs(config: &SiteConfig) -> BuildResult<Vec<SourceFile>> {
    let rules = SourceRules {
        markdown: true,
        ..Default::default()
    };
    collect_sources(&config.docs.source, &rules)
}

/// Convert `files` (from [`collect_docs`]) into output artifacts.
pub fn ingest(
    config: &SiteConfig,
    templates: &TemplateSet,
    ctx: &RenderContext,
    files: &[SourceFile],
    progress: Option<&ProgressLine>,
) -> BuildResult<Vec<OutputArtifact>> {
    let options = MarkdownOptions {
        readme_index: true,
        ..MarkdownOptions::all()
    };
    let mut artifacts = Vec::with_capacity(files.len());

    for file in files {
        let artifact = if file.kind == PageKind::Markdown {
            render_doc(config, templates, ctx, file, &options)?
        } else {
            let bytes = fs::read(&file.path).map_err(|e| BuildError::filesystem(&file.path, e))?;
            OutputArtifact::new(config.docs.output.join(&file.relative), bytes)
        };
        artifacts.push(artifact);
        if let Some(progress) = progress {
            progress.inc("docs");
        }
    }

    crate::debug!("docs"; "{} files from {}", artifacts.len(), config.docs.source.display());
    Ok(artifacts)
}

fn doc_output_path(config: &SiteConfig, file: &SourceFile) -> PathBuf {
    let stem = file
        .relative
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let dir = file.relative.parent().map(PathBuf::from).unwrap_or_default();
    config.docs.output.join(dir).join(output_file_name(&stem))
}

fn render_doc(
    config: &SiteConfig,
    templates: &TemplateSet,
    ctx: &RenderContext,
    file: &SourceFile,
    options: &MarkdownOptions,
) -> BuildResult<OutputArtifact> {
    let text = fs::read_to_string(&file.path).map_err(|e| BuildError::filesystem(&file.path, e))?;
    let page = convert(&text, options);

    let title = page.title.unwrap_or_else(|| {
        file.relative
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let last_edited = if config.docs.last_edited {
        git::last_edited(&file.path).map_or(Value::Null, Value::from)
    } else {
        Value::Null
    };

    let output = doc_output_path(config, file);
    let url = format!("/{}", to_slash(&output));
    let doc_ctx = ctx.with([
        ("title", Value::from(title)),
        ("body", Value::from(page.body)),
        ("source", Value::from(file.name())),
        ("last_edited", last_edited),
        ("page", json!({ "path": to_slash(&output), "url": url })),
    ]);

    let html = templates.render_with(&file.path, &config.docs.template, &doc_ctx)?;
    Ok(OutputArtifact::new(output, html))
}
