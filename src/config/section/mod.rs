//! Configuration section definitions.
//!
//! Each module corresponds to a section in `lantern.toml`:
//!
//! | Module     | TOML Section   | Purpose                                |
//! |------------|----------------|----------------------------------------|
//! | `build`    | `[build]`      | Paths, blog layout, feed, sitemap      |
//! | `docs`     | `[docs]`       | External documentation ingestion       |
//! | `site`     | `[site]`       | Title, author, base URL, extra fields  |

pub mod build;
mod docs;
mod site;

pub use build::{BuildSectionConfig, FeedFormat};
pub use docs::DocsConfig;
pub use site::SiteInfoConfig;
