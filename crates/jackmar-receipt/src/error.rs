//! # Export Error Types
//!
//! ## Error Flow
//! ```text
//! std::io::Error (create dir / write file)
//!       │
//!       ▼
//! ExportError (this module) ← adds the path involved
//!       │
//!       ▼
//! AppError (storefront) ← code EXPORT_ERROR, cart is NOT cleared
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Receipt export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Receipts are only produced for carts with at least one line.
    #[error("Cannot export a receipt with no items")]
    EmptyReceipt,

    /// The receipt directory could not be created.
    #[error("Receipt directory {path} is not usable: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The PDF could not be written.
    #[error("Failed to write receipt {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The export facility is not available at all.
    ///
    /// `PdfFileExporter` never returns this; it is for `ExportSink`
    /// implementations outside this crate, such as a front end whose PDF
    /// backend failed to load.
    #[error("Receipt export unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results with ExportError.
pub type ExportResult<T> = Result<T, ExportError>;
