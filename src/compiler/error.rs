//! Build errors.
//!
//! Every variant is fatal: the first one aborts the run before anything is
//! written. Each names the source file it came from.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{}: missing or empty `{field}` block", .path.display())]
    MissingMetadata { path: PathBuf, field: &'static str },

    #[error(
        "{}: cannot parse postDate `{value}`, expected a date like \"March 1, 2021\"",
        .path.display()
    )]
    DateParse { path: PathBuf, value: String },

    #[error("{}: template error", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("{}: filesystem error", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid data file: {message}", .path.display())]
    Data { path: PathBuf, message: String },

    #[error("{}: {message}", .path.display())]
    Markdown { path: PathBuf, message: String },
}

impl BuildError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn template(path: impl Into<PathBuf>, source: tera::Error) -> Self {
        Self::Template {
            path: path.into(),
            source,
        }
    }
}

pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_path_and_field() {
        let err = BuildError::MissingMetadata {
            path: "site/blog/a.html".into(),
            field: "postAuthor",
        };
        let msg = err.to_string();
        assert!(msg.contains("site/blog/a.html"));
        assert!(msg.contains("postAuthor"));

        let err = BuildError::DateParse {
            path: "site/blog/b.html".into(),
            value: "1/3/2021".into(),
        };
        assert!(err.to_string().contains("1/3/2021"));
    }

    #[test]
    fn test_filesystem_keeps_source() {
        let err = BuildError::filesystem(
            "site",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "no such directory");
    }
}
