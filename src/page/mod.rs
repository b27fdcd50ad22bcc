//! Page types: source classification, blog posts, output artifacts.

mod kind;
pub mod post;
mod source;

pub use kind::{PageKind, SourceRules, classify};
pub use post::{BlogPost, PostCollection};
pub use source::{OutputArtifact, SourceFile};
