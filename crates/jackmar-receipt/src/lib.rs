//! # jackmar-receipt: Checkout Receipts
//!
//! Materializes a cart snapshot into a downloadable PDF receipt.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Pipeline                                 │
//! │                                                                         │
//! │  &[LineItem] + grand total                                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Receipt::new ─────────► rows ["Widget", 2, "$10.00", "$20.00"]        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  layout::layout_receipt ► Document { pages: [DrawOp, ...] }            │
//! │        │                  header, grid table, grand total, footer      │
//! │        ▼                                                                │
//! │  pdf::render_pdf ───────► %PDF-1.4 bytes                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  PdfFileExporter ───────► JackmarTrading_Receipt_2026-10-18.pdf        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use jackmar_core::{Cart, Money};
//! use jackmar_receipt::{layout_receipt, render_pdf, Receipt, ReceiptBranding};
//!
//! let mut cart = Cart::new();
//! cart.add("A", "Widget", Money::from_cents(1000), 2).unwrap();
//!
//! let issued_at = FixedOffset::east_opt(0)
//!     .unwrap()
//!     .with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
//!     .unwrap();
//! let receipt = Receipt::new(ReceiptBranding::default(), cart.items(), issued_at).unwrap();
//! assert_eq!(receipt.file_name(), "JackmarTrading_Receipt_2026-10-18.pdf");
//!
//! let bytes = render_pdf(&layout_receipt(&receipt));
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! ```

pub mod error;
pub mod export;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod receipt;

pub use error::{ExportError, ExportResult};
pub use export::{ExportSink, ExportedReceipt, PdfFileExporter};
pub use layout::{layout_receipt, Document};
pub use pdf::render_pdf;
pub use receipt::{Receipt, ReceiptBranding, ReceiptRow, COLUMNS};
