//! # Markup Renderer
//!
//! Keeps the state of the storefront page elements, keyed by the element
//! ids in [`ViewBindings`], and produces the cart list as HTML.
//!
//! ```text
//!  ViewBindings (resolved once)        MarkupRenderer.elements
//!  ─────────────────────────           ──────────────────────────────────────
//!  cart_items   "cart-items"    ──►    <div class="cart-item">…</div>…
//!  cart_count   "cart-count"    ──►    "3"
//!  cart_total   "cart-total"    ──►    "25.50"
//!  cart_overlay "cart-overlay"  ──►    display: block, class "show"
//!  notification "notification"  ──►    class "show" for 2s
//!  <id> + "Modal"               ──►    display: flex, class "show"
//! ```
//!
//! Product names are escaped before they are placed in markup.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use super::{AlertLevel, CartView, RenderSink, Visibility};
use crate::config::ViewBindings;

const SHOW: &str = "show";

/// State of one page element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Inner HTML or text content.
    pub content: String,
    pub classes: BTreeSet<String>,
    /// Inline `display` style, `None` when unset.
    pub display: Option<String>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Render sink that maintains page element state.
#[derive(Debug, Clone)]
pub struct MarkupRenderer {
    bindings: ViewBindings,
    elements: BTreeMap<String, Element>,
    alerts: Vec<(AlertLevel, String)>,
}

impl MarkupRenderer {
    pub fn new(bindings: ViewBindings) -> Self {
        let mut elements = BTreeMap::new();
        for id in [
            &bindings.cart_items,
            &bindings.cart_count,
            &bindings.cart_total,
            &bindings.notification,
        ] {
            elements.insert(id.clone(), Element::default());
        }
        elements.insert(
            bindings.cart_overlay.clone(),
            Element {
                display: Some("none".to_string()),
                ..Element::default()
            },
        );

        MarkupRenderer {
            bindings,
            elements,
            alerts: Vec::new(),
        }
    }

    pub fn bindings(&self) -> &ViewBindings {
        &self.bindings
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Alerts raised so far, oldest first.
    pub fn alerts(&self) -> &[(AlertLevel, String)] {
        &self.alerts
    }

    fn element_mut(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }

    fn apply_visibility(&mut self, id: &str, visibility: Visibility, shown_display: &str) {
        let element = self.element_mut(id);
        match visibility {
            Visibility::Shown => {
                element.display = Some(shown_display.to_string());
                element.classes.insert(SHOW.to_string());
            }
            Visibility::Hiding => {
                element.classes.remove(SHOW);
            }
            Visibility::Hidden => {
                element.classes.remove(SHOW);
                element.display = Some("none".to_string());
            }
        }
    }

    /// Serializes every element as a standalone HTML page, for snapshots.
    pub fn to_html_document(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<body>\n");
        for (id, element) in &self.elements {
            let _ = write!(html, "<div id=\"{}\"", escape_html(id));
            if !element.classes.is_empty() {
                let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
                let _ = write!(html, " class=\"{}\"", escape_html(&classes.join(" ")));
            }
            if let Some(display) = &element.display {
                let _ = write!(html, " style=\"display: {}\"", display);
            }
            let _ = writeln!(html, ">{}</div>", element.content);
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

impl RenderSink for MarkupRenderer {
    fn render_cart(&mut self, view: &CartView) {
        let items = cart_items_html(view);
        let count = view.count.to_string();
        let total = view.formatted_total();

        let bindings = self.bindings.clone();
        self.element_mut(&bindings.cart_items).content = items;
        self.element_mut(&bindings.cart_count).content = count;
        self.element_mut(&bindings.cart_total).content = total;
    }

    fn set_notification(&mut self, visible: bool) {
        let id = self.bindings.notification.clone();
        let element = self.element_mut(&id);
        if visible {
            element.classes.insert(SHOW.to_string());
        } else {
            element.classes.remove(SHOW);
        }
    }

    fn set_panel(&mut self, visibility: Visibility) {
        let id = self.bindings.cart_overlay.clone();
        self.apply_visibility(&id, visibility, "block");
    }

    fn set_modal(&mut self, product_id: &str, visibility: Visibility) {
        let id = self.bindings.modal_id(product_id);
        self.apply_visibility(&id, visibility, "flex");
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        self.alerts.push((level, message.to_string()));
    }
}

/// The cart list markup. Each row's remove button carries its position.
pub fn cart_items_html(view: &CartView) -> String {
    let mut html = String::new();
    for line in &view.lines {
        let _ = write!(
            html,
            "<div class=\"cart-item\">\n\
             \x20   <div class=\"cart-item-info\">\n\
             \x20       <h4>{name}</h4>\n\
             \x20       <p>Quantity: {quantity}</p>\n\
             \x20       <p>{subtotal}</p>\n\
             \x20   </div>\n\
             \x20   <button class=\"remove-item\" data-index=\"{index}\">×</button>\n\
             </div>\n",
            name = escape_html(&line.name),
            quantity = line.quantity,
            subtotal = line.subtotal,
            index = line.index,
        );
    }
    html
}

/// Escapes text for HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use jackmar_core::{Cart, Money};

    fn view_of(items: &[(&str, &str, i64, i64)]) -> CartView {
        let mut cart = Cart::new();
        for (id, name, cents, qty) in items {
            cart.add(*id, *name, Money::from_cents(*cents), *qty).unwrap();
        }
        CartView::from(&cart)
    }

    #[test]
    fn test_render_updates_bound_elements() {
        let mut renderer = MarkupRenderer::new(ViewBindings::default());
        renderer.render_cart(&view_of(&[("A", "Widget", 1000, 2), ("B", "Gadget", 550, 1)]));

        assert_eq!(renderer.element("cart-count").unwrap().content, "3");
        assert_eq!(renderer.element("cart-total").unwrap().content, "25.50");

        let items = &renderer.element("cart-items").unwrap().content;
        assert_eq!(items.matches("class=\"cart-item\"").count(), 2);
        assert!(items.contains("<h4>Widget</h4>"));
        assert!(items.contains("<p>Quantity: 2</p>"));
        assert!(items.contains("<p>$20.00</p>"));
        assert!(items.contains("data-index=\"1\""));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = cart_items_html(&view_of(&[("x", "<b>Rice & Beans</b>", 100, 1)]));
        assert!(html.contains("<h4>&lt;b&gt;Rice &amp; Beans&lt;/b&gt;</h4>"));
    }

    #[test]
    fn test_panel_transitions() {
        let mut renderer = MarkupRenderer::new(ViewBindings::default());
        let overlay = |r: &MarkupRenderer| r.element("cart-overlay").unwrap().clone();

        assert_eq!(overlay(&renderer).display.as_deref(), Some("none"));

        renderer.set_panel(Visibility::Shown);
        assert_eq!(overlay(&renderer).display.as_deref(), Some("block"));
        assert!(overlay(&renderer).has_class("show"));

        renderer.set_panel(Visibility::Hiding);
        assert_eq!(overlay(&renderer).display.as_deref(), Some("block"));
        assert!(!overlay(&renderer).has_class("show"));

        renderer.set_panel(Visibility::Hidden);
        assert_eq!(overlay(&renderer).display.as_deref(), Some("none"));
    }

    #[test]
    fn test_modal_uses_bound_suffix() {
        let mut renderer = MarkupRenderer::new(ViewBindings::default());
        renderer.set_modal("rice", Visibility::Shown);

        let modal = renderer.element("riceModal").unwrap();
        assert_eq!(modal.display.as_deref(), Some("flex"));
        assert!(modal.has_class("show"));
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = ViewBindings {
            cart_count: "badge".to_string(),
            ..ViewBindings::default()
        };
        let mut renderer = MarkupRenderer::new(bindings);
        renderer.render_cart(&view_of(&[("A", "Widget", 1000, 4)]));

        assert_eq!(renderer.element("badge").unwrap().content, "4");
        assert!(renderer.element("cart-count").is_none());
    }

    #[test]
    fn test_html_document_snapshot() {
        let mut renderer = MarkupRenderer::new(ViewBindings::default());
        renderer.set_notification(true);
        let html = renderer.to_html_document();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div id=\"notification\" class=\"show\"></div>"));
        assert!(html.contains("<div id=\"cart-overlay\" style=\"display: none\"></div>"));
    }
}
