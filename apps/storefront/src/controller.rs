//! # Cart Controller
//!
//! Owns the cart and drives its two collaborators. Every UI event (button
//! click, console command) is one method call that runs to completion.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Controller Operations                           │
//! │                                                                         │
//! │  UI Event             Controller               Collaborators            │
//! │  ────────             ──────────               ─────────────            │
//! │                                                                         │
//! │  Click "Add" ───────► add_to_cart() ─────────► Cart::add                │
//! │                                      ├───────► render_cart              │
//! │                                      └───────► notification (2s timer)  │
//! │                                                                         │
//! │  Click "×" ─────────► remove_from_cart(i) ───► Cart::remove_at          │
//! │                                      └───────► render_cart              │
//! │                                                                         │
//! │  Click "Checkout" ──► checkout() ────────────► ExportSink::export       │
//! │                                      │  Ok  ─► alert, clear, render,    │
//! │                                      │         close panel              │
//! │                                      └  Err ─► alert, cart kept         │
//! │                                                                         │
//! │  Cart icon / ×  ────► open_cart / close_cart ► set_panel (300ms timer)  │
//! │  Zoom / close  ─────► open_modal / close_modal ► set_modal              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Time is passed in explicitly (`now: Instant`) so transitions can be
//! driven by the console loop and by tests alike.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, FixedOffset};
use jackmar_core::{AddOutcome, Cart, CoreError, LineItem, Money};
use jackmar_receipt::{ExportSink, ExportedReceipt, Receipt, ReceiptBranding};
use tracing::{debug, info, warn};

use crate::catalog::Product;
use crate::config::{StoreConfig, UiTimings};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::timer::{TimerQueue, UiEffect};
use crate::view::{AlertLevel, CartView, RenderSink, Visibility};

/// Shown after the receipt has been exported.
pub const ORDER_THANKS_MESSAGE: &str = "Thank you for your order!";

/// The storefront's cart state plus its render and export sinks.
pub struct CartController<R: RenderSink, E: ExportSink> {
    cart: Cart,
    render: R,
    export: E,
    branding: ReceiptBranding,
    timings: UiTimings,
    timers: TimerQueue,
    panel: Visibility,
    modals: BTreeMap<String, Visibility>,
    fade_generation: u64,
    panel_fade: u64,
    modal_fades: BTreeMap<String, u64>,
    notification_generation: u64,
    notification_visible: bool,
}

impl<R: RenderSink, E: ExportSink> CartController<R, E> {
    /// Creates a controller with an empty cart and draws the initial view.
    pub fn new(render: R, export: E, branding: ReceiptBranding, timings: UiTimings) -> Self {
        let mut controller = CartController {
            cart: Cart::new(),
            render,
            export,
            branding,
            timings,
            timers: TimerQueue::new(),
            panel: Visibility::Hidden,
            modals: BTreeMap::new(),
            fade_generation: 0,
            panel_fade: 0,
            modal_fades: BTreeMap::new(),
            notification_generation: 0,
            notification_visible: false,
        };
        controller.refresh();
        controller
    }

    pub fn from_config(render: R, export: E, config: &StoreConfig) -> Self {
        CartController::new(render, export, config.branding.clone(), config.timings)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn render_sink(&self) -> &R {
        &self.render
    }

    pub fn render_sink_mut(&mut self) -> &mut R {
        &mut self.render
    }

    pub fn export_sink(&self) -> &E {
        &self.export
    }

    pub fn panel(&self) -> Visibility {
        self.panel
    }

    /// Visibility of a product's zoom modal; never-opened modals are hidden.
    pub fn modal(&self, product_id: &str) -> Visibility {
        self.modals
            .get(product_id)
            .copied()
            .unwrap_or(Visibility::Hidden)
    }

    pub fn notification_visible(&self) -> bool {
        self.notification_visible
    }

    /// Earliest pending transition, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds `quantity` of a product and flashes the notification.
    ///
    /// ## Errors
    /// - `VALIDATION_ERROR` for quantity < 1 or a negative price
    /// - `CART_ERROR` when the merged quantity would overflow
    pub fn add_to_cart(
        &mut self,
        id: &str,
        name: &str,
        unit_price: Money,
        quantity: i64,
        now: Instant,
    ) -> AppResult<AddOutcome> {
        let outcome = match self.cart.add(id, name, unit_price, quantity) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.fail(e.into())),
        };

        debug!(id, quantity, ?outcome, count = self.cart.count(), "Added to cart");
        self.refresh();
        self.show_notification(now);
        Ok(outcome)
    }

    /// Adds a catalog product.
    pub fn add_product(
        &mut self,
        product: &Product,
        quantity: i64,
        now: Instant,
    ) -> AppResult<AddOutcome> {
        self.add_to_cart(&product.id, &product.name, product.price, quantity, now)
    }

    /// Removes the line at `index`, as reported by a rendered remove button.
    pub fn remove_from_cart(&mut self, index: usize) -> AppResult<LineItem> {
        let removed = match self.cart.remove_at(index) {
            Ok(item) => item,
            Err(e) => return Err(self.fail(e.into())),
        };

        debug!(index, id = %removed.id, "Removed from cart");
        self.refresh();
        Ok(removed)
    }

    /// Exports a receipt for the current cart, then empties it.
    ///
    /// ## Flow
    /// ```text
    /// empty cart? ── yes ──► warning alert, EMPTY_CART, nothing changes
    ///      │ no
    ///      ▼
    /// Receipt::new ──► ExportSink::export
    ///                        │
    ///         ┌──── Err ─────┴───── Ok ────┐
    ///         ▼                            ▼
    ///   error alert,                 "Thank you" alert,
    ///   EXPORT_ERROR,                clear cart, redraw,
    ///   cart kept                    close panel
    /// ```
    ///
    /// The cart is only cleared once the export sink has confirmed the
    /// receipt was produced.
    pub fn checkout(
        &mut self,
        issued_at: DateTime<FixedOffset>,
        now: Instant,
    ) -> AppResult<ExportedReceipt> {
        if self.cart.is_empty() {
            warn!("Checkout attempted with an empty cart");
            return Err(self.fail(CoreError::EmptyCartCheckout.into()));
        }

        let exported = Receipt::new(self.branding.clone(), self.cart.items(), issued_at)
            .and_then(|receipt| self.export.export(&receipt));

        let exported = match exported {
            Ok(exported) => exported,
            Err(e) => return Err(self.fail(e.into())),
        };

        info!(
            file = %exported.file_name,
            items = self.cart.count(),
            total = %self.cart.total(),
            "Checkout complete"
        );

        self.render.alert(AlertLevel::Info, ORDER_THANKS_MESSAGE);
        self.cart.clear();
        self.refresh();
        self.close_cart(now);
        Ok(exported)
    }

    // =========================================================================
    // Panel & Modals
    // =========================================================================

    pub fn open_cart(&mut self) {
        self.panel = Visibility::Shown;
        self.render.set_panel(Visibility::Shown);
    }

    /// Starts the panel fade-out; it is hidden once the transition elapses.
    /// Closing a panel that is not shown does nothing.
    ///
    /// Only the latest close finishes the fade: a timer left over from an
    /// earlier open/close cycle never cuts a newer fade short.
    pub fn close_cart(&mut self, now: Instant) {
        if self.panel != Visibility::Shown {
            return;
        }
        self.panel = Visibility::Hiding;
        self.render.set_panel(Visibility::Hiding);
        let generation = self.next_fade();
        self.panel_fade = generation;
        self.timers.schedule(
            now,
            self.timings.transition,
            UiEffect::FinishPanelHide { generation },
        );
    }

    pub fn open_modal(&mut self, product_id: &str) {
        self.modals
            .insert(product_id.to_string(), Visibility::Shown);
        self.render.set_modal(product_id, Visibility::Shown);
    }

    pub fn close_modal(&mut self, product_id: &str, now: Instant) {
        if self.modal(product_id) != Visibility::Shown {
            return;
        }
        self.modals
            .insert(product_id.to_string(), Visibility::Hiding);
        self.render.set_modal(product_id, Visibility::Hiding);
        let generation = self.next_fade();
        self.modal_fades.insert(product_id.to_string(), generation);
        self.timers.schedule(
            now,
            self.timings.transition,
            UiEffect::FinishModalHide {
                product_id: product_id.to_string(),
                generation,
            },
        );
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Applies every transition due at `now`. Returns how many took effect.
    pub fn advance(&mut self, now: Instant) -> usize {
        self.timers
            .take_due(now)
            .into_iter()
            .filter(|effect| self.apply(effect))
            .count()
    }

    fn apply(&mut self, effect: &UiEffect) -> bool {
        match effect {
            UiEffect::HideNotification { generation } => {
                if *generation != self.notification_generation || !self.notification_visible {
                    return false;
                }
                self.notification_visible = false;
                self.render.set_notification(false);
            }
            UiEffect::FinishPanelHide { generation } => {
                if *generation != self.panel_fade || self.panel != Visibility::Hiding {
                    return false;
                }
                self.panel = Visibility::Hidden;
                self.render.set_panel(Visibility::Hidden);
            }
            UiEffect::FinishModalHide {
                product_id,
                generation,
            } => {
                let latest = self.modal_fades.get(product_id) == Some(generation);
                if !latest || self.modal(product_id) != Visibility::Hiding {
                    return false;
                }
                self.modals.remove(product_id);
                self.modal_fades.remove(product_id);
                self.render.set_modal(product_id, Visibility::Hidden);
            }
        }
        true
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Shows an error raised outside the controller (unknown product, bad
    /// console input) the same way the controller shows its own.
    pub fn report(&mut self, err: &AppError) {
        let level = match err.code {
            ErrorCode::EmptyCart
            | ErrorCode::NotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidCommand => AlertLevel::Warning,
            _ => AlertLevel::Error,
        };
        self.render.alert(level, &err.message);
    }

    fn fail(&mut self, err: AppError) -> AppError {
        self.report(&err);
        err
    }

    fn refresh(&mut self) {
        let view = CartView::from(&self.cart);
        self.render.render_cart(&view);
    }

    fn next_fade(&mut self) -> u64 {
        self.fade_generation += 1;
        self.fade_generation
    }

    fn show_notification(&mut self, now: Instant) {
        self.notification_generation += 1;
        self.notification_visible = true;
        self.render.set_notification(true);
        self.timers.schedule(
            now,
            self.timings.notification,
            UiEffect::HideNotification {
                generation: self.notification_generation,
            },
        );
    }
}
