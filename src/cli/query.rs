//! Query command implementation.
//!
//! Renders the content tree without writing anything and prints the blog
//! post metadata as a JSON array, newest first:
//!
//! ```json
//! [{"title":"B","author":"Ada","date":"March 1, 2021","date_iso":"2021-03-01","tags":["news"],"url":"/blog/b.html"}]
//! ```

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use serde_json::Value;

use super::build::collect_posts;
use crate::cli::QueryArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::page::PostCollection;
use crate::utils::plural::plural_count;

/// Run the query command.
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let posts = collect_posts(config)?;
    let formatted = format_posts(&posts, args.pretty)?;

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        writeln!(file, "{formatted}")?;
        log!("query"; "wrote {} to {}", plural_count(posts.len(), "post"), output_path.display());
    } else {
        println!("{formatted}");
    }
    Ok(())
}

fn format_posts(posts: &PostCollection, pretty: bool) -> Result<String> {
    let value = Value::Array(posts.summaries());
    let formatted = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(formatted)
}
