//! # Store Configuration
//!
//! Stores configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--catalog`, `--receipt-dir`)
//! 2. Environment variables (`JACKMAR_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only once the controller is built.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::UserDirs;
use jackmar_receipt::ReceiptBranding;
use serde::{Deserialize, Serialize};

/// Element ids the markup renderer writes into, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewBindings {
    /// Container for the rendered cart lines
    pub cart_items: String,

    /// Badge with the item count
    pub cart_count: String,

    /// Total amount display
    pub cart_total: String,

    /// Slide-over cart panel
    pub cart_overlay: String,

    /// "Added to cart" flash
    pub notification: String,

    /// Zoom modal ids are `<product id><modal_suffix>`
    pub modal_suffix: String,
}

impl Default for ViewBindings {
    fn default() -> Self {
        ViewBindings {
            cart_items: "cart-items".to_string(),
            cart_count: "cart-count".to_string(),
            cart_total: "cart-total".to_string(),
            cart_overlay: "cart-overlay".to_string(),
            notification: "notification".to_string(),
            modal_suffix: "Modal".to_string(),
        }
    }
}

impl ViewBindings {
    /// Element id of a product's zoom modal.
    pub fn modal_id(&self, product_id: &str) -> String {
        format!("{}{}", product_id, self.modal_suffix)
    }
}

/// Transition delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    /// How long the "added" notification stays up.
    pub notification: Duration,

    /// Panel and modal fade-out before they are hidden.
    pub transition: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        UiTimings {
            notification: Duration::from_millis(2000),
            transition: Duration::from_millis(300),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Printed on receipts
    pub branding: ReceiptBranding,

    /// Where receipts are saved
    pub receipt_dir: PathBuf,

    /// Optional TOML product catalog
    pub catalog_path: Option<PathBuf>,

    pub bindings: ViewBindings,

    pub timings: UiTimings,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            branding: ReceiptBranding::default(),
            receipt_dir: default_receipt_dir(),
            catalog_path: None,
            bindings: ViewBindings::default(),
            timings: UiTimings::default(),
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `JACKMAR_STORE_NAME`: store name on the receipt
    /// - `JACKMAR_SUPPORT_EMAIL`: contact address in the receipt footer
    /// - `JACKMAR_RECEIPT_DIR`: where receipts are saved
    /// - `JACKMAR_CATALOG`: path of the product catalog
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StoreConfig::default();

        if let Some(name) = lookup("JACKMAR_STORE_NAME") {
            config.branding.store_name = name;
        }

        if let Some(email) = lookup("JACKMAR_SUPPORT_EMAIL") {
            config.branding.support_email = email;
        }

        if let Some(dir) = lookup("JACKMAR_RECEIPT_DIR") {
            config.receipt_dir = PathBuf::from(dir);
        }

        if let Some(path) = lookup("JACKMAR_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Applies command line overrides.
    pub fn with_overrides(mut self, catalog: Option<&Path>, receipt_dir: Option<&Path>) -> Self {
        if let Some(path) = catalog {
            self.catalog_path = Some(path.to_path_buf());
        }
        if let Some(dir) = receipt_dir {
            self.receipt_dir = dir.to_path_buf();
        }
        self
    }
}

/// The user's download folder, or the working directory when the platform
/// has none.
pub fn default_receipt_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
