//! Jackmar storefront console.
//!
//! ```text
//! $ jackmar-storefront --catalog demos/catalog.toml
//! Welcome to Jackmar Trading. Type 'help' for commands.
//! Cart: 0 items | Total: $0.00
//! add rice-25kg 2
//! Cart: 2 items | Total: $65.00
//! Added to cart!
//! checkout
//! Thank you for your order!
//! Cart: 0 items | Total: $0.00
//! Receipt saved to ~/Downloads/JackmarTrading_Receipt_2026-10-18.pdf
//! ```

use std::process::ExitCode;

use clap::Parser;
use jackmar_storefront::{init_tracing, run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = ?e.code, message = %e.message, "Storefront failed");
            eprintln!("{}", e.message);
            ExitCode::FAILURE
        }
    }
}
