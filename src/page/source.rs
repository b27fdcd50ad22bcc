//! Source files and the artifacts they turn into.

use super::PageKind;
use crate::utils::path::to_slash;
use std::path::{Path, PathBuf};

/// A file discovered under the content root.
///
/// ```text
/// SourceFile {
///     path:     /srv/site/site/blog/a.html
///     relative: blog/a.html
///     kind:     Post
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the content root.
    pub relative: PathBuf,
    pub kind: PageKind,
}

impl SourceFile {
    /// `/`-separated relative path; also the Tera template name.
    pub fn name(&self) -> String {
        to_slash(&self.relative)
    }

    /// Output path relative to the output root (`.md` becomes `.html`).
    pub fn output_path(&self) -> PathBuf {
        match self.kind {
            PageKind::Markdown => self.relative.with_extension("html"),
            _ => self.relative.clone(),
        }
    }

    /// Site-absolute URL path (`/blog/a.html`).
    pub fn url(&self) -> String {
        format!("/{}", to_slash(&self.output_path()))
    }
}

/// A file ready to be written, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl OutputArtifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Contents as text (lossy).
    #[cfg(test)]
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }

    #[cfg(test)]
    pub fn is_at(&self, path: impl AsRef<Path>) -> bool {
        self.path == path.as_ref()
    }
}
