//! # Domain Types
//!
//! ## LineItem
//! ```text
//! ┌─────────────────────────┐
//! │        LineItem         │
//! │  ─────────────────────  │
//! │  id (opaque, cart key)  │
//! │  name (display label)   │
//! │  unit_price (Money)     │   frozen when first added
//! │  quantity (≥ 1)         │   grows when the same id is added again
//! └─────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Opaque product identifier, unique within a cart.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Price per unit, captured at add time and never recomputed.
    pub unit_price: Money,

    /// Always at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}
