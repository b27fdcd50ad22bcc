//! Page rendering: source discovery, templates, and Markdown.
//!
//! | Module     | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | `walk`     | Collect and classify files under the content root    |
//! | `template` | Tera template set, block introspection               |
//! | `markdown` | pulldown-cmark conversion, `.md` link rewriting      |
//! | `context`  | Layered render context                               |
//! | `error`    | `BuildError`                                         |

mod context;
mod error;
pub mod markdown;
pub mod template;
pub mod walk;

pub use context::RenderContext;
pub use error::{BuildError, BuildResult};
pub use template::TemplateSet;
