//! # View Layer
//!
//! The presentation side of the storefront. The controller never formats
//! output itself; it hands state to a [`RenderSink`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Render Sinks                                    │
//! │                                                                         │
//! │   CartController ──► RenderSink                                         │
//! │                        │                                                │
//! │          ┌─────────────┼──────────────────────┐                        │
//! │          ▼             ▼                      ▼                        │
//! │  TerminalRenderer  MarkupRenderer     (A, B) / Option<R>               │
//! │  console output    element state +    fan-out and optional             │
//! │                    HTML fragments     composition                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod markup;
pub mod terminal;

use jackmar_core::{Cart, Money};
use serde::Serialize;

pub use markup::MarkupRenderer;
pub use terminal::TerminalRenderer;

/// Display state of the cart panel or a zoom modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Hidden,
    Shown,
    /// Still displayed while it fades out.
    Hiding,
}

impl Visibility {
    /// Whether the element occupies the screen (shown or fading).
    pub fn is_displayed(self) -> bool {
        !matches!(self, Visibility::Hidden)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Positional index reported back by the remove affordance.
    pub index: usize,
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Everything a sink needs to draw the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub count: i64,
    pub total: Money,
}

impl CartView {
    /// Total without the currency symbol, e.g. `25.50`.
    pub fn formatted_total(&self) -> String {
        self.total.to_amount_string()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartLine {
                    index,
                    id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    subtotal: item.line_total(),
                })
                .collect(),
            count: cart.count(),
            total: cart.total(),
        }
    }
}

/// Presentation collaborator of the cart controller.
///
/// Implementations should not fail: a sink that cannot draw logs and
/// carries on, the cart state stays authoritative.
pub trait RenderSink {
    /// Redraws the list, the count badge and the total.
    fn render_cart(&mut self, view: &CartView);

    /// Shows or hides the transient "added to cart" flash.
    fn set_notification(&mut self, visible: bool);

    fn set_panel(&mut self, visibility: Visibility);

    fn set_modal(&mut self, product_id: &str, visibility: Visibility);

    /// Blocking user message (empty cart warning, export failure, ...).
    fn alert(&mut self, level: AlertLevel, message: &str);
}

impl<R: RenderSink + ?Sized> RenderSink for &mut R {
    fn render_cart(&mut self, view: &CartView) {
        (**self).render_cart(view)
    }

    fn set_notification(&mut self, visible: bool) {
        (**self).set_notification(visible)
    }

    fn set_panel(&mut self, visibility: Visibility) {
        (**self).set_panel(visibility)
    }

    fn set_modal(&mut self, product_id: &str, visibility: Visibility) {
        (**self).set_modal(product_id, visibility)
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        (**self).alert(level, message)
    }
}

/// Fan-out to two sinks.
impl<A: RenderSink, B: RenderSink> RenderSink for (A, B) {
    fn render_cart(&mut self, view: &CartView) {
        self.0.render_cart(view);
        self.1.render_cart(view);
    }

    fn set_notification(&mut self, visible: bool) {
        self.0.set_notification(visible);
        self.1.set_notification(visible);
    }

    fn set_panel(&mut self, visibility: Visibility) {
        self.0.set_panel(visibility);
        self.1.set_panel(visibility);
    }

    fn set_modal(&mut self, product_id: &str, visibility: Visibility) {
        self.0.set_modal(product_id, visibility);
        self.1.set_modal(product_id, visibility);
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        self.0.alert(level, message);
        self.1.alert(level, message);
    }
}

impl<R: RenderSink> RenderSink for Option<R> {
    fn render_cart(&mut self, view: &CartView) {
        if let Some(sink) = self {
            sink.render_cart(view);
        }
    }

    fn set_notification(&mut self, visible: bool) {
        if let Some(sink) = self {
            sink.set_notification(visible);
        }
    }

    fn set_panel(&mut self, visibility: Visibility) {
        if let Some(sink) = self {
            sink.set_panel(visibility);
        }
    }

    fn set_modal(&mut self, product_id: &str, visibility: Visibility) {
        if let Some(sink) = self {
            sink.set_modal(product_id, visibility);
        }
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        if let Some(sink) = self {
            sink.alert(level, message);
        }
    }
}
