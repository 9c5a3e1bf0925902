//! # Receipt Model
//!
//! A frozen copy of the cart at checkout time, plus the store branding
//! printed around it.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Jackmar Trading                │  store_name (20pt)
//! │                Order Receipt                 │  title
//! │              Date: 10/18/2026                │  date_line()
//! │ ┌──────────┬──────────┬──────────┬─────────┐ │
//! │ │   Item   │ Quantity │  Price   │  Total  │ │  COLUMNS
//! │ ├──────────┼──────────┼──────────┼─────────┤ │
//! │ │  Widget  │    2     │  $10.00  │ $20.00  │ │  ReceiptRow::cells()
//! │ └──────────┴──────────┴──────────┴─────────┘ │
//! │            Grand Total: $20.00               │  grand_total_line()
//! │        Thank you for your business!          │
//! │  For any inquiries, please contact support@… │
//! └──────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset};
use jackmar_core::{LineItem, Money};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// Table column headings.
pub const COLUMNS: [&str; 4] = ["Item", "Quantity", "Price", "Total"];

/// Store identity printed on every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReceiptBranding {
    /// Large heading at the top of the first page.
    pub store_name: String,

    /// Sub-heading under the store name.
    pub title: String,

    /// File name stem; the date and `.pdf` are appended.
    pub file_prefix: String,

    /// First footer line.
    pub thank_you: String,

    /// Contact address in the second footer line.
    pub support_email: String,
}

impl Default for ReceiptBranding {
    fn default() -> Self {
        ReceiptBranding {
            store_name: "Jackmar Trading".to_string(),
            title: "Order Receipt".to_string(),
            file_prefix: "JackmarTrading_Receipt".to_string(),
            thank_you: "Thank you for your business!".to_string(),
            support_email: "support@jackmartrading.com".to_string(),
        }
    }
}

impl ReceiptBranding {
    /// Second footer line.
    pub fn contact_line(&self) -> String {
        format!("For any inquiries, please contact {}", self.support_email)
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRow {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

impl ReceiptRow {
    /// `[name, quantity, "$price", "$total"]`
    pub fn cells(&self) -> [String; 4] {
        [
            self.name.clone(),
            self.quantity.to_string(),
            self.unit_price.to_string(),
            self.line_total.to_string(),
        ]
    }
}

impl From<&LineItem> for ReceiptRow {
    fn from(item: &LineItem) -> Self {
        ReceiptRow {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

/// Everything needed to lay out one receipt document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub branding: ReceiptBranding,
    pub issued_at: DateTime<FixedOffset>,
    pub rows: Vec<ReceiptRow>,
    pub grand_total: Money,
}

impl Receipt {
    /// Builds a receipt from the cart lines in their display order.
    ///
    /// ## Errors
    /// `ExportError::EmptyReceipt` when `items` is empty.
    pub fn new(
        branding: ReceiptBranding,
        items: &[LineItem],
        issued_at: DateTime<FixedOffset>,
    ) -> ExportResult<Self> {
        if items.is_empty() {
            return Err(ExportError::EmptyReceipt);
        }

        let rows: Vec<ReceiptRow> = items.iter().map(ReceiptRow::from).collect();
        let grand_total = rows.iter().map(|r| r.line_total).sum();

        Ok(Receipt {
            branding,
            issued_at,
            rows,
            grand_total,
        })
    }

    /// `Date: 10/18/2026` in the customer's local calendar.
    pub fn date_line(&self) -> String {
        format!("Date: {}", self.issued_at.format("%-m/%-d/%Y"))
    }

    /// `Grand Total: $1,234.50`
    pub fn grand_total_line(&self) -> String {
        format!("Grand Total: {}", self.grand_total)
    }

    /// `<prefix>_<YYYY-MM-DD>.pdf`, dated in UTC.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.pdf",
            self.branding.file_prefix,
            self.issued_at.naive_utc().date().format("%Y-%m-%d")
        )
    }

    /// Document title stored in the PDF metadata.
    pub fn document_title(&self) -> String {
        format!("{} {}", self.branding.store_name, self.branding.title)
    }
}
