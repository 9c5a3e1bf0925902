//! # Export Sink
//!
//! The seam between checkout and whatever materializes the receipt.
//!
//! ```text
//! CartController::checkout
//!        │  &Receipt
//!        ▼
//! ┌──────────────────┐      Ok(ExportedReceipt) ──► cart is cleared
//! │   ExportSink     │
//! │  (this trait)    │      Err(ExportError)    ──► cart is kept
//! └──────────────────┘
//!        ▲
//!        └── PdfFileExporter: lays out, renders, writes to a directory
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};
use crate::layout::layout_receipt;
use crate::pdf::render_pdf;
use crate::receipt::Receipt;

/// Where a receipt ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReceipt {
    /// Name offered to the user, e.g. `JackmarTrading_Receipt_2026-10-18.pdf`.
    pub file_name: String,

    /// Full path when the sink writes to disk.
    pub path: Option<PathBuf>,

    /// Number of pages in the document.
    pub pages: usize,

    /// Size of the encoded document.
    pub size_bytes: usize,
}

/// Materializes a receipt. Returning `Ok` is the confirmation checkout
/// waits for before it clears the cart.
pub trait ExportSink {
    fn export(&mut self, receipt: &Receipt) -> ExportResult<ExportedReceipt>;
}

impl<T: ExportSink + ?Sized> ExportSink for Box<T> {
    fn export(&mut self, receipt: &Receipt) -> ExportResult<ExportedReceipt> {
        (**self).export(receipt)
    }
}

/// Writes receipts as PDF files into a directory.
///
/// An existing file with the same name is never overwritten; the new file
/// gets a ` (1)`, ` (2)`, … suffix the way browsers name repeat downloads.
#[derive(Debug, Clone)]
pub struct PdfFileExporter {
    dir: PathBuf,
}

impl PdfFileExporter {
    /// Creates an exporter for `dir`. The directory is created on first export.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PdfFileExporter { dir: dir.into() }
    }

    /// The target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn free_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.dir.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, format!(".{}", ext)),
            None => (file_name, String::new()),
        };

        (1..)
            .map(|n| self.dir.join(format!("{} ({}){}", stem, n, ext)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

impl ExportSink for PdfFileExporter {
    fn export(&mut self, receipt: &Receipt) -> ExportResult<ExportedReceipt> {
        let document = layout_receipt(receipt);
        let bytes = render_pdf(&document);
        debug!(
            pages = document.pages.len(),
            size = bytes.len(),
            "Receipt rendered"
        );

        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Directory {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.free_path(&receipt.file_name());
        fs::write(&path, &bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Receipt saved");

        Ok(ExportedReceipt {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| receipt.file_name()),
            path: Some(path),
            pages: document.pages.len(),
            size_bytes: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::ReceiptBranding;
    use chrono::{FixedOffset, TimeZone};
    use jackmar_core::{LineItem, Money};

    fn receipt() -> Receipt {
        let items = [LineItem {
            id: "A".to_string(),
            name: "Widget".to_string(),
            unit_price: Money::from_cents(1000),
            quantity: 2,
        }];
        let issued_at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
            .unwrap();
        Receipt::new(ReceiptBranding::default(), &items, issued_at).unwrap()
    }

    #[test]
    fn test_writes_pdf_into_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let mut exporter = PdfFileExporter::new(tmp.path().join("receipts"));

        let exported = exporter.export(&receipt()).unwrap();

        assert_eq!(exported.file_name, "JackmarTrading_Receipt_2026-10-18.pdf");
        assert_eq!(exported.pages, 1);
        let path = exported.path.unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), exported.size_bytes);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_second_export_same_day_gets_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let mut exporter = PdfFileExporter::new(tmp.path());

        let first = exporter.export(&receipt()).unwrap();
        let second = exporter.export(&receipt()).unwrap();

        assert_eq!(first.file_name, "JackmarTrading_Receipt_2026-10-18.pdf");
        assert_eq!(second.file_name, "JackmarTrading_Receipt_2026-10-18 (1).pdf");
        assert!(first.path.unwrap().exists());
        assert!(second.path.unwrap().exists());
    }

    #[test]
    fn test_unusable_directory_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let mut exporter = PdfFileExporter::new(blocker.join("receipts"));
        let result = exporter.export(&receipt());

        assert!(matches!(result, Err(ExportError::Directory { .. })));
    }
}
