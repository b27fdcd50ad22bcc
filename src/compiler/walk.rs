//! Source discovery.

use super::{BuildError, BuildResult};
use crate::page::{SourceFile, SourceRules, classify};
use jwalk::WalkDir;
use std::{io, path::Path};

const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Collect every file under `root`, classified, in name order.
///
/// A missing root is an error; an empty one yields an empty list.
pub fn collect_sources(root: &Path, rules: &SourceRules) -> BuildResult<Vec<SourceFile>> {
    if !root.is_dir() {
        return Err(BuildError::filesystem(
            root,
            io::Error::new(io::ErrorKind::NotFound, "content directory not found"),
        ));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(root).sort(true) {
        let entry = entry.map_err(|e| BuildError::filesystem(root, io::Error::other(e.to_string())))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root).map(Path::to_path_buf) else {
            continue;
        };
        let kind = classify(&relative, rules);
        sources.push(SourceFile {
            path,
            relative,
            kind,
        });
    }

    Ok(sources)
}
