//! `[build.feed]`: the blog's syndication feed.
//!
//! ```toml
//! [build.feed]
//! enable = true
//! path = "feed.xml"
//! format = "atom"   # or "rss"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    #[default]
    Atom,
    Rss,
}

impl FeedFormat {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Rss => "rss",
        }
    }

    /// Media type for `<link rel="self">` and `<link rel="alternate">` tags.
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Atom => "application/atom+xml",
            Self::Rss => "application/rss+xml",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    /// Relative to the output root.
    pub path: PathBuf,
    pub format: FeedFormat,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "feed.xml".into(),
            format: FeedFormat::default(),
        }
    }
}
