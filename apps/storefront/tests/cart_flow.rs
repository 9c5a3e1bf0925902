//! End-to-end cart flows through the controller with recording sinks.

use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset};
use jackmar_core::Money;
use jackmar_receipt::{
    ExportError, ExportResult, ExportSink, ExportedReceipt, PdfFileExporter, Receipt,
    ReceiptBranding,
};
use jackmar_storefront::config::{UiTimings, ViewBindings};
use jackmar_storefront::controller::CartController;
use jackmar_storefront::error::ErrorCode;
use jackmar_storefront::view::{
    AlertLevel, CartView, MarkupRenderer, RenderSink, TerminalRenderer, Visibility,
};

// =============================================================================
// Recording Sinks
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Render { count: i64, total: String, names: Vec<String> },
    Notification(bool),
    Panel(Visibility),
    Modal(String, Visibility),
    Alert(AlertLevel, String),
}

#[derive(Default)]
struct RecordingRender {
    events: Vec<Event>,
}

impl RecordingRender {
    fn alerts(&self) -> Vec<(AlertLevel, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Alert(level, message) => Some((*level, message.clone())),
                _ => None,
            })
            .collect()
    }

    fn last_render(&self) -> Option<&Event> {
        self.events
            .iter()
            .rev()
            .find(|e| matches!(e, Event::Render { .. }))
    }
}

impl RenderSink for RecordingRender {
    fn render_cart(&mut self, view: &CartView) {
        self.events.push(Event::Render {
            count: view.count,
            total: view.formatted_total(),
            names: view.lines.iter().map(|l| l.name.clone()).collect(),
        });
    }

    fn set_notification(&mut self, visible: bool) {
        self.events.push(Event::Notification(visible));
    }

    fn set_panel(&mut self, visibility: Visibility) {
        self.events.push(Event::Panel(visibility));
    }

    fn set_modal(&mut self, product_id: &str, visibility: Visibility) {
        self.events
            .push(Event::Modal(product_id.to_string(), visibility));
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        self.events.push(Event::Alert(level, message.to_string()));
    }
}

/// Keeps every receipt it is handed; can be switched to fail.
#[derive(Default)]
struct RecordingExport {
    receipts: Vec<Receipt>,
    unavailable: bool,
}

impl ExportSink for RecordingExport {
    fn export(&mut self, receipt: &Receipt) -> ExportResult<ExportedReceipt> {
        if self.unavailable {
            return Err(ExportError::Unavailable("PDF library not loaded".to_string()));
        }
        self.receipts.push(receipt.clone());
        Ok(ExportedReceipt {
            file_name: receipt.file_name(),
            path: None,
            pages: 1,
            size_bytes: 0,
        })
    }
}

fn controller_with(export: RecordingExport) -> CartController<RecordingRender, RecordingExport> {
    CartController::new(
        RecordingRender::default(),
        export,
        ReceiptBranding::default(),
        UiTimings::default(),
    )
}

fn issued_at() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2026-10-18T09:30:00-04:00").unwrap()
}

fn render(count: i64, total: &str, names: &[&str]) -> Event {
    Event::Render {
        count,
        total: total.to_string(),
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

// =============================================================================
// Worked Example
// =============================================================================

#[test]
fn test_add_remove_checkout_walkthrough() {
    let mut c = controller_with(RecordingExport::default());
    let now = Instant::now();

    c.add_to_cart("A", "Widget", Money::from_cents(1000), 2, now).unwrap();
    c.add_to_cart("B", "Gadget", Money::from_cents(550), 1, now).unwrap();
    assert_eq!(c.cart().count(), 3);
    assert_eq!(c.cart().formatted_total(), "25.50");
    assert_eq!(
        c.render_sink().last_render(),
        Some(&render(3, "25.50", &["Widget", "Gadget"]))
    );

    c.remove_from_cart(0).unwrap();
    assert_eq!(c.cart().count(), 1);
    assert_eq!(c.cart().formatted_total(), "5.50");

    let exported = c.checkout(issued_at(), now).unwrap();
    assert_eq!(exported.file_name, "JackmarTrading_Receipt_2026-10-18.pdf");
    assert_eq!(c.cart().count(), 0);
    assert_eq!(c.cart().formatted_total(), "0.00");
    assert_eq!(c.render_sink().last_render(), Some(&render(0, "0.00", &[])));

    let receipt = &c.export_sink().receipts[0];
    assert_eq!(receipt.rows.len(), 1);
    assert_eq!(
        receipt.rows[0].cells(),
        [
            "Gadget".to_string(),
            "1".to_string(),
            "$5.50".to_string(),
            "$5.50".to_string()
        ]
    );
    assert_eq!(receipt.grand_total_line(), "Grand Total: $5.50");

    // The cart is now empty: rejected with a warning, nothing changes.
    let events_before = c.render_sink().events.len();
    let err = c.checkout(issued_at(), now).unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
    assert_eq!(c.export_sink().receipts.len(), 1);
    assert_eq!(
        c.render_sink().events[events_before..],
        [Event::Alert(AlertLevel::Warning, "Your cart is empty!".to_string())]
    );
}

#[test]
fn test_repeat_add_merges_into_one_line() {
    let mut c = controller_with(RecordingExport::default());
    let now = Instant::now();

    c.add_to_cart("A", "Widget", Money::from_cents(1000), 2, now).unwrap();
    c.add_to_cart("A", "Widget", Money::from_cents(1000), 3, now).unwrap();

    assert_eq!(c.cart().len(), 1);
    assert_eq!(c.cart().count(), 5);
    assert_eq!(c.cart().formatted_total(), "50.00");
}

#[test]
fn test_remove_out_of_range_changes_nothing() {
    let mut c = controller_with(RecordingExport::default());
    c.add_to_cart("A", "Widget", Money::from_cents(1000), 1, Instant::now())
        .unwrap();

    let err = c.remove_from_cart(5).unwrap_err();

    assert_eq!(err.code, ErrorCode::CartError);
    assert_eq!(c.cart().count(), 1);
    assert_eq!(c.render_sink().alerts().len(), 1);
}

#[test]
fn test_thousands_grouping_in_total() {
    let mut c = controller_with(RecordingExport::default());
    c.add_to_cart("S", "Salt pallet", Money::from_cents(115_000), 2, Instant::now())
        .unwrap();

    assert_eq!(c.cart().formatted_total(), "2,300.00");
}

// =============================================================================
// Checkout Ordering
// =============================================================================

#[test]
fn test_successful_checkout_event_order() {
    let mut c = controller_with(RecordingExport::default());
    let now = Instant::now();
    c.add_to_cart("A", "Widget", Money::from_cents(1000), 1, now).unwrap();
    c.open_cart();

    let start = c.render_sink().events.len();
    c.checkout(issued_at(), now).unwrap();

    assert_eq!(
        c.render_sink().events[start..],
        [
            Event::Alert(AlertLevel::Info, "Thank you for your order!".to_string()),
            render(0, "0.00", &[]),
            Event::Panel(Visibility::Hiding),
        ]
    );
    assert_eq!(c.panel(), Visibility::Hiding);

    c.advance(now + Duration::from_millis(300));
    assert_eq!(c.panel(), Visibility::Hidden);
}

#[test]
fn test_failed_export_keeps_cart_and_alerts() {
    let mut c = controller_with(RecordingExport {
        unavailable: true,
        ..RecordingExport::default()
    });
    let now = Instant::now();
    c.add_to_cart("A", "Widget", Money::from_cents(1000), 2, now).unwrap();
    c.open_cart();

    let err = c.checkout(issued_at(), now).unwrap_err();

    assert_eq!(err.code, ErrorCode::ExportError);
    assert_eq!(c.cart().count(), 2);
    assert_eq!(c.panel(), Visibility::Shown);

    let alerts = c.render_sink().alerts();
    let (level, message) = alerts.last().unwrap();
    assert_eq!(*level, AlertLevel::Error);
    assert!(message.contains("PDF library not loaded"));
    assert!(!alerts
        .iter()
        .any(|(_, m)| m == "Thank you for your order!"));
}

// =============================================================================
// Transitions
// =============================================================================

#[test]
fn test_notification_hides_after_two_seconds() {
    let mut c = controller_with(RecordingExport::default());
    let start = Instant::now();

    c.add_to_cart("A", "Widget", Money::from_cents(1000), 1, start).unwrap();
    assert!(c.notification_visible());
    assert_eq!(c.next_deadline(), Some(start + Duration::from_millis(2000)));

    assert_eq!(c.advance(start + Duration::from_millis(1999)), 0);
    assert!(c.notification_visible());

    assert_eq!(c.advance(start + Duration::from_millis(2000)), 1);
    assert!(!c.notification_visible());
    assert_eq!(
        c.render_sink().events.last(),
        Some(&Event::Notification(false))
    );
}

#[test]
fn test_panel_close_fades_then_hides() {
    let mut c = controller_with(RecordingExport::default());
    let start = Instant::now();

    c.open_cart();
    c.close_cart(start);
    assert_eq!(c.panel(), Visibility::Hiding);

    c.advance(start + Duration::from_millis(299));
    assert_eq!(c.panel(), Visibility::Hiding);

    c.advance(start + Duration::from_millis(300));
    assert_eq!(c.panel(), Visibility::Hidden);

    let panel_events: Vec<&Event> = c
        .render_sink()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Panel(_)))
        .collect();
    assert_eq!(
        panel_events,
        [
            &Event::Panel(Visibility::Shown),
            &Event::Panel(Visibility::Hiding),
            &Event::Panel(Visibility::Hidden),
        ]
    );
}

#[test]
fn test_modals_are_independent() {
    let mut c = controller_with(RecordingExport::default());
    let start = Instant::now();

    c.open_modal("rice");
    c.open_modal("sugar");
    c.close_modal("rice", start);
    c.advance(start + Duration::from_millis(300));

    assert_eq!(c.modal("rice"), Visibility::Hidden);
    assert_eq!(c.modal("sugar"), Visibility::Shown);
    assert!(c
        .render_sink()
        .events
        .contains(&Event::Modal("rice".to_string(), Visibility::Hidden)));
}

#[test]
fn test_custom_timings() {
    let mut c = CartController::new(
        RecordingRender::default(),
        RecordingExport::default(),
        ReceiptBranding::default(),
        UiTimings {
            notification: Duration::from_millis(500),
            transition: Duration::from_millis(50),
        },
    );
    let start = Instant::now();

    c.add_to_cart("A", "Widget", Money::from_cents(1000), 1, start).unwrap();
    c.open_cart();
    c.close_cart(start);

    assert_eq!(c.advance(start + Duration::from_millis(50)), 1);
    assert_eq!(c.advance(start + Duration::from_millis(500)), 1);
    assert_eq!(c.pending_timers(), 0);
}

// =============================================================================
// Real Sinks
// =============================================================================

#[test]
fn test_checkout_writes_pdf_receipt() {
    let tmp = tempfile::tempdir().unwrap();
    let mut c = CartController::new(
        MarkupRenderer::new(ViewBindings::default()),
        PdfFileExporter::new(tmp.path()),
        ReceiptBranding::default(),
        UiTimings::default(),
    );
    let now = Instant::now();
    c.add_to_cart("A", "Widget", Money::from_cents(1000), 2, now).unwrap();
    c.add_to_cart("B", "Gadget", Money::from_cents(550), 1, now).unwrap();

    let exported = c.checkout(issued_at(), now).unwrap();

    let path = exported.path.unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "JackmarTrading_Receipt_2026-10-18.pdf"
    );
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(Grand Total: $25.50)"));
    assert!(text.contains("(Widget)"));

    let page = c.render_sink();
    assert_eq!(page.element("cart-count").unwrap().content, "0");
    assert_eq!(page.element("cart-items").unwrap().content, "");
}

#[test]
fn test_fan_out_to_terminal_and_markup() {
    let render = (
        TerminalRenderer::new(Vec::new()),
        Some(MarkupRenderer::new(ViewBindings::default())),
    );
    let mut c = CartController::new(
        render,
        RecordingExport::default(),
        ReceiptBranding::default(),
        UiTimings::default(),
    );
    c.add_to_cart("A", "Widget", Money::from_cents(1000), 2, Instant::now())
        .unwrap();

    let (terminal, markup) = c.render_sink();
    let markup = markup.as_ref().unwrap();
    assert_eq!(markup.element("cart-total").unwrap().content, "20.00");
    assert!(markup.element("notification").unwrap().has_class("show"));

    let text = String::from_utf8_lossy(terminal.get_ref());
    assert!(text.contains("Cart: 2 items | Total: $20.00"));
    assert!(text.contains("Added to cart!"));
}
