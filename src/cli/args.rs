//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Page metadata and booking-frame tooling for the CT Realty Media site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: ctrm.toml)
    #[arg(short = 'C', long, default_value = "ctrm.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render head fragments for every configured page
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the head HTML of one page
    #[command(visible_alias = "r")]
    Render {
        /// Site path of the page, e.g. `/services`
        path: String,

        /// Log every intermediate render
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Print CMS documents or resolved metadata as JSON
    #[command(visible_alias = "q")]
    Query {
        #[command(subcommand)]
        target: QueryTarget,

        /// Pretty-print JSON output
        #[arg(short, long, global = true)]
        pretty: bool,
    },

    /// Replay message events through the booking-frame resize bridge
    #[command(visible_alias = "f")]
    Frame {
        #[command(flatten)]
        args: FrameArgs,
    },
}

/// What `query` prints.
#[derive(Subcommand, Debug, Clone)]
pub enum QueryTarget {
    /// Site-wide SEO settings
    Site,
    /// SEO fields of one site page
    Page {
        /// `sitePage` slug
        slug: String,
    },
    /// All services, ordered by title
    Services,
    /// Testimonials, falling back to the built-in reviews
    Testimonials,
    /// Home page content
    Home,
    /// Fully resolved metadata of a configured page
    Metadata {
        /// Site path of the page, e.g. `/book`
        path: String,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Frame command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct FrameArgs {
    /// NDJSON file of `{"origin": .., "data": ..}` events.
    /// Use `-` or omit to read from stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Accept resize messages from any origin
    #[arg(short, long)]
    pub any_origin: bool,

    /// Log ignored messages
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
