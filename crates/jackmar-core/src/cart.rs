//! # Cart Store
//!
//! Owns the ordered list of line items for the current session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action                Operation               Cart Change           │
//! │  ─────────                ─────────               ───────────           │
//! │                                                                         │
//! │  Click Add ──────────────► add() ───────────────► push or qty += n     │
//! │                                                                         │
//! │  Click × on a line ──────► remove_at(i) ────────► items.remove(i)      │
//! │                                                                         │
//! │  Checkout succeeded ─────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Re-render ──────────────► total() / count() ───► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are recomputed on every query; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;

/// What `Cart::add` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended at `index`.
    Appended { index: usize },

    /// An existing line at `index` now holds `quantity` units.
    Merged { index: usize, quantity: i64 },
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same id increases quantity)
/// - Insertion order is preserved; removal shifts later lines down
/// - Every quantity is >= 1
/// - A line's unit price is the one given when it was first added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - `quantity < 1` → `InvalidQuantity`, cart unchanged
    /// - `unit_price < 0` → `InvalidPrice`, cart unchanged
    /// - id already in cart → quantity grows; name and price stay as first added
    /// - otherwise → new line appended at the end
    /// - item count would exceed `i64` → `QuantityOverflow`, cart unchanged
    /// - line or cart total would exceed `i64` cents → `TotalOverflow`,
    ///   cart unchanged
    pub fn add(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<AddOutcome> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity { quantity });
        }
        if unit_price.is_negative() {
            return Err(CoreError::InvalidPrice {
                cents: unit_price.cents(),
            });
        }

        let id = id.into();

        // A line's quantity never exceeds the item count, so this also
        // bounds the merged quantity.
        if self.count().checked_add(quantity).is_none() {
            return Err(CoreError::QuantityOverflow { id });
        }

        let existing = self.position(&id);
        let (line_price, line_quantity) = match existing {
            Some(index) => {
                let item = &self.items[index];
                (item.unit_price, item.quantity + quantity)
            }
            None => (unit_price, quantity),
        };
        if self.total_with(existing, line_price, line_quantity).is_none() {
            return Err(CoreError::TotalOverflow { id });
        }

        if let Some(index) = existing {
            self.items[index].quantity = line_quantity;
            return Ok(AddOutcome::Merged {
                index,
                quantity: line_quantity,
            });
        }

        self.items.push(LineItem {
            id,
            name: name.into(),
            unit_price,
            quantity,
        });
        Ok(AddOutcome::Appended {
            index: self.items.len() - 1,
        })
    }

    /// Removes the line at `index`, shifting later lines down.
    ///
    /// Returns the removed line.
    pub fn remove_at(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.items.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ(unit price × quantity).
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The total with two decimals and thousands grouping, e.g. `"1,234.50"`.
    pub fn formatted_total(&self) -> String {
        self.total().to_amount_string()
    }

    /// Σ(quantity) across all lines.
    pub fn count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Owned copy of the lines, for handing to the export sink.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// The cart total if the line at `replaced` (or a new line) held
    /// `quantity` units at `unit_price`; `None` if it does not fit.
    fn total_with(
        &self,
        replaced: Option<usize>,
        unit_price: Money,
        quantity: i64,
    ) -> Option<Money> {
        let line = unit_price.checked_multiply_quantity(quantity)?;
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != replaced)
            .try_fold(line, |total, (_, item)| total.checked_add(item.line_total()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn price(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();

        let outcome = cart.add("A", "Widget", price("9.99"), 2).unwrap();

        assert_eq!(outcome, AddOutcome::Appended { index: 0 });
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total().cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_id_increases_quantity() {
        let mut cart = Cart::new();

        cart.add("A", "Widget", price("9.99"), 2).unwrap();
        let outcome = cart.add("A", "Widget", price("9.99"), 3).unwrap();

        assert_eq!(outcome, AddOutcome::Merged { index: 0, quantity: 5 });
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_unit_price_frozen_on_first_add() {
        let mut cart = Cart::new();

        cart.add("A", "Widget", price("10.00"), 1).unwrap();
        cart.add("A", "Renamed", price("99.00"), 1).unwrap();

        let line = cart.get("A").unwrap();
        assert_eq!(line.unit_price, price("10.00"));
        assert_eq!(line.name, "Widget");
        assert_eq!(cart.formatted_total(), "20.00");
    }

    #[test]
    fn test_add_rejects_bad_input_without_mutation() {
        let mut cart = Cart::new();
        cart.add("A", "Widget", price("1.00"), 1).unwrap();

        assert_eq!(
            cart.add("B", "Gadget", price("1.00"), 0),
            Err(CoreError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            cart.add("A", "Widget", price("1.00"), -2),
            Err(CoreError::InvalidQuantity { quantity: -2 })
        );
        assert_eq!(
            cart.add("B", "Gadget", Money::from_cents(-1), 1),
            Err(CoreError::InvalidPrice { cents: -1 })
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_add_free_item() {
        let mut cart = Cart::new();
        cart.add("free", "Sticker", Money::zero(), 4).unwrap();
        assert_eq!(cart.count(), 4);
        assert_eq!(cart.formatted_total(), "0.00");
    }

    #[test]
    fn test_quantity_overflow_is_reported() {
        let mut cart = Cart::new();
        cart.add("A", "Widget", Money::zero(), i64::MAX).unwrap();

        assert!(matches!(
            cart.add("A", "Widget", Money::zero(), 1),
            Err(CoreError::QuantityOverflow { .. })
        ));
        assert_eq!(cart.get("A").unwrap().quantity, i64::MAX);

        // Separate lines count towards the same item count.
        assert!(matches!(
            cart.add("B", "Gadget", Money::zero(), 1),
            Err(CoreError::QuantityOverflow { .. })
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_line_total_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add("B", "Gadget", price("5.50"), 1).unwrap();

        assert_eq!(
            cart.add("A", "Widget", price("10.00"), 10_000_000_000_000_000),
            Err(CoreError::TotalOverflow { id: "A".to_string() })
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.formatted_total(), "5.50");
    }

    #[test]
    fn test_merged_total_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let max_units = i64::MAX / 1000;
        cart.add("A", "Widget", price("10.00"), max_units).unwrap();

        assert!(matches!(
            cart.add("A", "Widget", price("10.00"), 1),
            Err(CoreError::TotalOverflow { .. })
        ));
        assert_eq!(cart.get("A").unwrap().quantity, max_units);
        assert_eq!(cart.total().cents(), max_units * 1000);
    }

    #[test]
    fn test_cart_total_overflow_across_lines() {
        let mut cart = Cart::new();
        cart.add("A", "Widget", Money::from_cents(i64::MAX - 10), 1).unwrap();

        assert!(matches!(
            cart.add("B", "Gadget", Money::from_cents(11), 1),
            Err(CoreError::TotalOverflow { .. })
        ));
        cart.add("C", "Gizmo", Money::from_cents(10), 1).unwrap();
        assert_eq!(cart.total().cents(), i64::MAX);
    }

    #[test]
    fn test_remove_at_shifts_later_lines() {
        let mut cart = Cart::new();
        cart.add("A", "Widget", price("1.00"), 1).unwrap();
        cart.add("B", "Gadget", price("2.00"), 1).unwrap();
        cart.add("C", "Gizmo", price("3.00"), 1).unwrap();

        let removed = cart.remove_at(1).unwrap();

        assert_eq!(removed.id, "B");
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["A", "C"]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.remove_at(0),
            Err(CoreError::IndexOutOfRange { index: 0, len: 0 })
        );

        cart.add("A", "Widget", price("1.00"), 1).unwrap();
        assert_eq!(
            cart.remove_at(1),
            Err(CoreError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_worked_example() {
        let mut cart = Cart::new();
        cart.add("A", "Widget", price("10.00"), 2).unwrap();
        cart.add("B", "Gadget", price("5.50"), 1).unwrap();
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.formatted_total(), "25.50");

        cart.remove_at(0).unwrap();
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.formatted_total(), "5.50");

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.formatted_total(), "0.00");
    }

    #[test]
    fn test_total_is_grouped() {
        let mut cart = Cart::new();
        cart.add("tv", "Television", price("1,199.99"), 2).unwrap();
        assert_eq!(cart.formatted_total(), "2,399.98");
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut cart = Cart::new();
        cart.add("A", "Widget", price("1.00"), 1).unwrap();

        let snapshot = cart.snapshot();
        cart.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "A");
    }

    proptest! {
        #[test]
        fn prop_count_and_total_match_lines(
            adds in prop::collection::vec((0u8..6, 0i64..10_000, 1i64..50), 0..40)
        ) {
            let mut cart = Cart::new();
            for (id, cents, qty) in &adds {
                cart.add(format!("p{}", id), "Item", Money::from_cents(*cents), *qty).unwrap();
            }

            let qty_sum: i64 = adds.iter().map(|(_, _, q)| q).sum();
            prop_assert_eq!(cart.count(), qty_sum);

            let expected: i64 = cart
                .items()
                .iter()
                .map(|i| i.unit_price.cents() * i.quantity)
                .sum();
            prop_assert_eq!(cart.total().cents(), expected);

            let mut ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }

        #[test]
        fn prop_remove_preserves_relative_order(len in 1usize..20, pick in any::<prop::sample::Index>()) {
            let mut cart = Cart::new();
            for n in 0..len {
                cart.add(format!("p{}", n), "Item", Money::from_cents(100), 1).unwrap();
            }
            let index = pick.index(len);
            let mut expected: Vec<String> = cart.items().iter().map(|i| i.id.clone()).collect();
            expected.remove(index);

            cart.remove_at(index).unwrap();

            let actual: Vec<String> = cart.items().iter().map(|i| i.id.clone()).collect();
            prop_assert_eq!(cart.len(), len - 1);
            prop_assert_eq!(actual, expected);
        }
    }
}
