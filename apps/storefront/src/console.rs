//! # Console Front End
//!
//! Reads commands from stdin and feeds them to the controller while firing
//! transition timers as they come due.
//!
//! ```text
//!            ┌──────────────── tokio::select! ────────────────┐
//!            │                                                │
//!   stdin ──►│ next_line() ──► Command ──► apply_command()    │
//!            │                                                │
//!   timers ─►│ sleep_until(next_deadline) ──► advance(now)    │
//!            └────────────────────────┬───────────────────────┘
//!                                     ▼
//!                              after_step(&controller)
//! ```
//!
//! Everything runs on one thread; a command is handled completely before
//! the next line or timer is looked at.

use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, FixedOffset, Local};
use jackmar_receipt::ExportSink;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::catalog::Catalog;
use crate::command::{Command, HELP};
use crate::controller::CartController;
use crate::error::{AppError, AppResult};
use crate::view::RenderSink;

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Executes one command against the controller.
///
/// Errors have already been shown to the user through the render sink when
/// this returns `Err`.
pub fn apply_command<R, E, W>(
    controller: &mut CartController<R, E>,
    catalog: &Catalog,
    command: Command,
    out: &mut W,
    now: Instant,
) -> AppResult<Flow>
where
    R: RenderSink,
    E: ExportSink,
    W: Write,
{
    match command {
        Command::Add {
            product_id,
            quantity,
        } => {
            let Some(product) = catalog.get(&product_id) else {
                let err = AppError::not_found("Product", &product_id);
                controller.report(&err);
                return Err(err);
            };
            controller.add_product(product, quantity, now)?;
        }
        Command::Remove { index } => {
            controller.remove_from_cart(index)?;
        }
        Command::Open => controller.open_cart(),
        Command::Close => controller.close_cart(now),
        Command::Zoom { product_id } => controller.open_modal(&product_id),
        Command::Unzoom { product_id } => controller.close_modal(&product_id, now),
        Command::Checkout => {
            let exported = controller.checkout(local_now(), now)?;
            match &exported.path {
                Some(path) => writeln!(out, "Receipt saved to {}", path.display())?,
                None => writeln!(out, "Receipt: {}", exported.file_name)?,
            }
        }
        Command::Products => write_products(catalog, out)?,
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn write_products<W: Write>(catalog: &Catalog, out: &mut W) -> std::io::Result<()> {
    if catalog.is_empty() {
        return writeln!(out, "The catalog is empty. Start with --catalog <file>.");
    }
    for product in catalog.products() {
        writeln!(
            out,
            "{:<16} {:<32} {:>12}",
            product.id,
            product.name,
            product.price.to_string()
        )?;
        if let Some(description) = &product.description {
            writeln!(out, "{:<16} {}", "", description)?;
        }
    }
    Ok(())
}

fn local_now() -> DateTime<FixedOffset> {
    DateTime::<FixedOffset>::from(Local::now())
}

/// Runs the console until `quit` or end of input.
///
/// `after_step` is called after every handled line or timer batch, e.g. to
/// write a page snapshot.
pub async fn run_console<R, E, W, F>(
    controller: &mut CartController<R, E>,
    catalog: &Catalog,
    out: &mut W,
    mut after_step: F,
) -> AppResult<()>
where
    R: RenderSink,
    E: ExportSink,
    W: Write,
    F: FnMut(&CartController<R, E>),
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = controller.next_deadline();
        let sleep_target = deadline
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(tokio::time::Instant::now);

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let flow = line
                    .parse::<Command>()
                    .map_err(|err| {
                        controller.report(&err);
                        err
                    })
                    .and_then(|command| {
                        apply_command(controller, catalog, command, out, Instant::now())
                    });

                match flow {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(err) => debug!(code = ?err.code, message = %err.message, "Command failed"),
                }
            }
            _ = tokio::time::sleep_until(sleep_target), if deadline.is_some() => {
                let applied = controller.advance(Instant::now());
                debug!(applied, "Timers fired");
            }
        }

        after_step(controller);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiTimings;
    use crate::view::MarkupRenderer;
    use jackmar_core::Money;
    use jackmar_receipt::{ExportResult, ExportedReceipt, Receipt, ReceiptBranding};

    struct MemoryExport;

    impl ExportSink for MemoryExport {
        fn export(&mut self, receipt: &Receipt) -> ExportResult<ExportedReceipt> {
            Ok(ExportedReceipt {
                file_name: receipt.file_name(),
                path: None,
                pages: 1,
                size_bytes: 0,
            })
        }
    }

    fn setup() -> (CartController<MarkupRenderer, MemoryExport>, Catalog) {
        let catalog = Catalog::from_toml_str(
            "[[products]]\nid = \"A\"\nname = \"Widget\"\nprice = \"10.00\"\n",
        )
        .unwrap();
        let controller = CartController::new(
            MarkupRenderer::new(Default::default()),
            MemoryExport,
            ReceiptBranding::default(),
            UiTimings::default(),
        );
        (controller, catalog)
    }

    fn run(
        controller: &mut CartController<MarkupRenderer, MemoryExport>,
        catalog: &Catalog,
        line: &str,
    ) -> (AppResult<Flow>, String) {
        let mut out = Vec::new();
        let result = line
            .parse::<Command>()
            .and_then(|c| apply_command(controller, catalog, c, &mut out, Instant::now()));
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_add_from_catalog() {
        let (mut controller, catalog) = setup();

        let (result, _) = run(&mut controller, &catalog, "add A 2");

        assert_eq!(result.unwrap(), Flow::Continue);
        assert_eq!(controller.cart().count(), 2);
        assert_eq!(controller.cart().total(), Money::from_cents(2000));
    }

    #[test]
    fn test_unknown_product_is_reported() {
        let (mut controller, catalog) = setup();

        let (result, _) = run(&mut controller, &catalog, "add B");

        assert_eq!(result.unwrap_err().code, crate::error::ErrorCode::NotFound);
        let alerts = controller.render_sink().alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].1, "Product not found: B");
    }

    #[test]
    fn test_oversized_quantity_is_rejected() {
        let (mut controller, catalog) = setup();
        run(&mut controller, &catalog, "add A 1").0.unwrap();

        let (result, _) = run(&mut controller, &catalog, "add A 10000000000000000");

        assert_eq!(result.unwrap_err().code, crate::error::ErrorCode::CartError);
        assert_eq!(controller.cart().count(), 1);
        assert_eq!(controller.cart().formatted_total(), "10.00");
        let alerts = controller.render_sink().alerts();
        assert_eq!(alerts.last().unwrap().0, crate::view::AlertLevel::Error);
    }

    #[test]
    fn test_checkout_prints_receipt_name() {
        let (mut controller, catalog) = setup();
        run(&mut controller, &catalog, "add A").0.unwrap();

        let (result, out) = run(&mut controller, &catalog, "checkout");

        result.unwrap();
        assert!(out.starts_with("Receipt: JackmarTrading_Receipt_"));
        assert!(controller.cart().is_empty());
    }

    #[test]
    fn test_products_and_quit() {
        let (mut controller, catalog) = setup();

        let (_, out) = run(&mut controller, &catalog, "products");
        assert!(out.contains("Widget"));
        assert!(out.contains("$10.00"));

        let (result, _) = run(&mut controller, &catalog, "quit");
        assert_eq!(result.unwrap(), Flow::Quit);
    }
}
