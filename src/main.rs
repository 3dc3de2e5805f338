//! pagekit - page interaction engine with a terminal demo frontend.
//!
//! Four behaviors run once against a fixed page snapshot: a current-year
//! stamp, a mobile menu toggle, a rotating floating-widget list, and an
//! exclusive FAQ accordion. The engine only talks to capability traits, so
//! the bundled in-memory page stands in for a real document.

mod config;
mod context;
mod interactions;
mod memory;
mod page;
mod task;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use context::PageContext;
use interactions::PageInteractions;
use memory::MemoryPage;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Parser)]
#[command(name = "pagekit")]
#[command(about = "Page interaction engine demo", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run without the terminal frontend (carousel only, logs to pagekit.log)
    #[arg(long)]
    headless: bool,

    /// Headless mode: exit after this many seconds instead of waiting for Ctrl-C
    #[arg(long, value_name = "SECS")]
    run_for: Option<u64>,

    /// Override the carousel rotation interval in milliseconds
    #[arg(long, value_name = "MS")]
    rotate_ms: Option<u64>,

    /// Override the slide transition duration in milliseconds
    #[arg(long, value_name = "MS")]
    slide_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to file (use RUST_LOG env var to control level).
    // The TUI owns stdout, so logs always go to a file.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("pagekit.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(ms) = cli.rotate_ms {
        config.timing.rotate_interval_ms = ms;
    }
    if let Some(ms) = cli.slide_ms {
        config.timing.slide_duration_ms = ms;
    }

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let page = MemoryPage::from_config(&config.page, events_tx);
    let mut engine = PageInteractions::attach(PageContext::capture(&page), &config.timing);

    if cli.headless {
        return run_headless(cli.run_for, page, engine, events_rx).await;
    }

    let mut frontend = tui::DemoFrontend::new()?;
    let result = frontend.run(&page, &engine, &mut events_rx).await;
    engine.shutdown();
    frontend.cleanup()?;
    result
}

async fn run_headless(
    run_for: Option<u64>,
    page: MemoryPage,
    engine: PageInteractions,
    events_rx: mpsc::UnboundedReceiver<page::PageEvent>,
) -> Result<()> {
    info!(
        "Running headless (carousel: {})",
        engine.carousel_running()
    );
    let engine_task = tokio::spawn(engine.run(events_rx));

    match run_for {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => {
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl-C")?;
            info!("Ctrl-C received");
        }
    }

    let snapshot = page.snapshot();
    if !snapshot.widget_labels.is_empty() {
        println!("Final widget order: {}", snapshot.widget_labels.join(", "));
    }
    let open = snapshot.faq_open().iter().filter(|o| **o).count();
    info!(
        "Exiting after {} page mutations ({} FAQ entries open)",
        page.mutation_count(),
        open
    );

    // Dropping the page closes the notification stream; the engine loop
    // drains, cancels the carousel, and returns.
    drop(page);
    engine_task.await.context("Engine task failed")?;
    Ok(())
}
