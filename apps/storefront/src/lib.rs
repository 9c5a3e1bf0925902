//! # Jackmar Storefront
//!
//! The shop's cart: a controller owning the cart state, render sinks that
//! draw it, and a console that stands in for the page's buttons.
//!
//! ## Module Organization
//! ```text
//! jackmar_storefront/
//! ├── lib.rs          ◄─── You are here (startup, tracing, CLI flags)
//! ├── config.rs       ◄─── StoreConfig: defaults → env → flags
//! ├── catalog.rs      ◄─── Products loaded from TOML
//! ├── controller.rs   ◄─── CartController: cart + sinks + transitions
//! ├── timer.rs        ◄─── TimerQueue of deferred UiEffects
//! ├── view/
//! │   ├── mod.rs      ◄─── RenderSink trait, CartView
//! │   ├── terminal.rs ◄─── Console rendering
//! │   └── markup.rs   ◄─── Page element state + HTML
//! ├── command.rs      ◄─── Console command parsing
//! ├── console.rs      ◄─── stdin / timer event loop
//! └── error.rs        ◄─── AppError for every operation
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Startup                                │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,jackmar=debug, override with RUST_LOG               │
//! │                                                                         │
//! │  2. Resolve Configuration ────────────────────────────────────────────► │
//! │     • defaults, JACKMAR_* variables, command line flags                 │
//! │                                                                         │
//! │  3. Load Catalog ─────────────────────────────────────────────────────► │
//! │     • optional TOML file, validated up front                            │
//! │                                                                         │
//! │  4. Build Controller ─────────────────────────────────────────────────► │
//! │     • render: terminal (+ markup when --html-out is given)              │
//! │     • export: PDF files in the receipt directory                        │
//! │                                                                         │
//! │  5. Run Console ──────────────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod timer;
pub mod view;

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use jackmar_receipt::PdfFileExporter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use config::StoreConfig;
use controller::CartController;
use error::AppResult;
use view::{MarkupRenderer, TerminalRenderer};

/// Command line flags. Each one overrides its `JACKMAR_*` variable.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "jackmar-storefront", version, about = "Jackmar Trading shopping cart")]
pub struct Cli {
    /// Product catalog (TOML)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Directory receipts are saved to
    #[arg(long, value_name = "DIR")]
    pub receipt_dir: Option<PathBuf>,

    /// Rewrite this HTML file with the page state after every command
    #[arg(long, value_name = "FILE")]
    pub html_out: Option<PathBuf>,
}

/// Runs the storefront console until `quit` or end of input.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = StoreConfig::from_env()
        .with_overrides(cli.catalog.as_deref(), cli.receipt_dir.as_deref());

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => {
            warn!("No catalog configured; 'add' will not find any products");
            Catalog::empty()
        }
    };

    info!(
        store = %config.branding.store_name,
        receipts = %config.receipt_dir.display(),
        products = catalog.len(),
        "Starting storefront"
    );

    let markup = cli
        .html_out
        .as_ref()
        .map(|_| MarkupRenderer::new(config.bindings.clone()));

    println!(
        "Welcome to {}. Type 'help' for commands.",
        config.branding.store_name
    );

    let render = (TerminalRenderer::stdout(), markup);
    let export = PdfFileExporter::new(config.receipt_dir.clone());
    let mut controller = CartController::from_config(render, export, &config);

    let html_out = cli.html_out.clone();
    let mut stdout = io::stdout();
    console::run_console(&mut controller, &catalog, &mut stdout, |controller| {
        let (Some(path), Some(markup)) = (&html_out, &controller.render_sink().1) else {
            return;
        };
        if let Err(e) = fs::write(path, markup.to_html_document()) {
            warn!(path = %path.display(), error = %e, "Could not write page snapshot");
        }
    })
    .await?;

    info!("Storefront closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=jackmar=trace` - Show trace for jackmar crates only
/// - Default: `info,jackmar=debug`
///
/// Logs go to stderr so they never interleave with console output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,jackmar=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
