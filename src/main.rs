//! ctrm - page metadata and booking-frame tooling for the CT Realty Media site.

mod bridge;
mod cli;
mod config;
mod content;
mod logger;
mod page;
mod seo;
mod utils;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{AnyStore, open_store};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = &SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => with_store(config, |store| async move {
            cli::build::build_site(config, store).await.map(|_| ())
        }),
        Commands::Render { path, .. } => {
            with_store(config, |store| cli::render::render_page(config, store, path))
        }
        Commands::Query { target, pretty } => with_store(config, |store| {
            cli::query::run_query(config, store, target, *pretty)
        }),
        Commands::Frame { args } => cli::frame::run_frame(config, args),
    }
}

/// Open the configured store once and drive `run` on a multi-threaded runtime.
fn with_store<F, Fut>(config: &SiteConfig, run: F) -> Result<()>
where
    F: FnOnce(Arc<AnyStore>) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let store = open_store(&config.store).context("failed to open content store")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run(Arc::new(store)))
}
