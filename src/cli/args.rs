//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Lantern static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: lantern.toml)
    #[arg(short = 'C', long, default_value = "lantern.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the whole site into the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print blog post metadata as JSON, newest first
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before writing
    #[arg(long)]
    pub clean: bool,

    /// Minify generated XML (feed, sitemap)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Enable docs ingestion
    #[arg(short = 'D', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub docs: Option<bool>,

    /// Override the site base URL used for feed, sitemap and robots links.
    ///
    /// Example:
    ///   lantern build --site-url "https://staging.example.com"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from([
            "lantern",
            "-c",
            "pages",
            "build",
            "--clean",
            "--rss=false",
            "-U",
            "https://staging.example.com",
        ]);
        assert_eq!(cli.content, Some(PathBuf::from("pages")));
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build command");
        };
        assert!(build_args.clean);
        assert_eq!(build_args.rss, Some(false));
        assert_eq!(build_args.sitemap, None);
        assert_eq!(
            build_args.site_url.as_deref(),
            Some("https://staging.example.com")
        );
    }

    #[test]
    fn test_parse_query_alias() {
        let cli = Cli::parse_from(["lantern", "q", "--pretty"]);
        let Commands::Query { args } = cli.command else {
            panic!("expected query command");
        };
        assert!(args.pretty);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_default_config_name() {
        let cli = Cli::parse_from(["lantern", "build"]);
        assert_eq!(cli.config, PathBuf::from("lantern.toml"));
        assert!(matches!(cli.command, Commands::Build { .. }));
    }
}
