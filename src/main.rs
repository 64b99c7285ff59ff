mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::args::CliArgs;
use cli::console;
use listing_viewer::{HttpSource, Viewer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging; stdout is reserved for the rendered view
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("🏠 Listing Viewer");

    let config = args.config()?;
    let source = HttpSource::new(&config).context("Failed to create listing source")?;
    let mut viewer = Viewer::new(source);

    match args.query.as_deref() {
        Some(query) if !query.is_empty() => {
            viewer.set_main_query(query);
            viewer.submit_query().await;
        }
        _ => {
            viewer.activate().await;
        }
    }

    for (field, value) in args.filters() {
        viewer.set_filter(field, value);
    }
    viewer.set_page_size(args.page_size);
    if args.page != 1 && !viewer.go_to_page(args.page) {
        warn!("Page {} is out of range, showing page 1", args.page);
    }
    if let Some(id) = &args.show {
        if !viewer.select_by_id(id) {
            warn!("No listing with id {}", id);
        }
    }

    print!("{}", console::render(&viewer));

    if args.interactive {
        console::run_interactive(&mut viewer).await?;
    } else if let Some(error) = viewer.loader().error() {
        anyhow::bail!("{}", error);
    }

    Ok(())
}
