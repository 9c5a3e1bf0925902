//! Console rendering of the cart.
//!
//! ```text
//! Cart: 3 items | Total: $25.50
//! ┌ Your Cart
//! │ [0] Widget                   x2            $20.00
//! │ [1] Gadget                   x1             $5.50
//! └ Total: $25.50
//! ```

use std::io::{self, Write};

use tracing::warn;

use super::{AlertLevel, CartView, RenderSink, Visibility};

const NAME_WIDTH: usize = 24;

/// Writes cart state to a terminal (or any writer).
///
/// The list itself is only printed while the panel is open, the way the
/// web cart only shows it in the overlay.
pub struct TerminalRenderer<W: Write> {
    out: W,
    panel: Visibility,
    last_view: Option<CartView>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalRenderer::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer {
            out,
            panel: Visibility::Hidden,
            last_view: None,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Returns the writer, e.g. to inspect a buffer in tests.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_badge(&mut self, view: &CartView) -> io::Result<()> {
        let noun = if view.count == 1 { "item" } else { "items" };
        writeln!(
            self.out,
            "Cart: {} {} | Total: ${}",
            view.count,
            noun,
            view.formatted_total()
        )
    }

    fn write_panel(&mut self, view: &CartView) -> io::Result<()> {
        writeln!(self.out, "┌ Your Cart")?;
        if view.lines.is_empty() {
            writeln!(self.out, "│ (empty)")?;
        }
        for line in &view.lines {
            writeln!(
                self.out,
                "│ [{}] {:<width$} x{:<6} {:>12}",
                line.index,
                line.name,
                line.quantity,
                line.subtotal.to_string(),
                width = NAME_WIDTH
            )?;
        }
        writeln!(self.out, "└ Total: ${}", view.formatted_total())
    }

    fn report(result: io::Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "Terminal write failed");
        }
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render_cart(&mut self, view: &CartView) {
        let mut result = self.write_badge(view);
        if result.is_ok() && self.panel == Visibility::Shown {
            result = self.write_panel(view);
        }
        self.last_view = Some(view.clone());
        Self::report(result);
    }

    fn set_notification(&mut self, visible: bool) {
        if visible {
            Self::report(writeln!(self.out, "Added to cart!"));
        }
    }

    fn set_panel(&mut self, visibility: Visibility) {
        let opening = visibility == Visibility::Shown && self.panel != Visibility::Shown;
        self.panel = visibility;
        if opening {
            if let Some(view) = self.last_view.take() {
                let result = self.write_panel(&view);
                self.last_view = Some(view);
                Self::report(result);
            }
        }
    }

    fn set_modal(&mut self, product_id: &str, visibility: Visibility) {
        if visibility == Visibility::Shown {
            Self::report(writeln!(self.out, "[zoom] {}", product_id));
        }
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        let prefix = match level {
            AlertLevel::Info => "",
            AlertLevel::Warning => "Warning: ",
            AlertLevel::Error => "Error: ",
        };
        Self::report(writeln!(self.out, "{}{}", prefix, message));
    }
}
