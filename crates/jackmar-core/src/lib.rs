//! # jackmar-core: Pure Cart Logic for the Jackmar Storefront
//!
//! This crate is the **heart** of the storefront. It owns the cart and the
//! money math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Jackmar Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  UI events (console / web)                      │   │
//! │  │     add ──► remove ──► open/close panel ──► checkout            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              CartController (apps/storefront)                   │   │
//! │  │       RenderSink ◄──── refresh ────► ExportSink                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ jackmar-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RENDERING • NO TIMERS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart store
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use jackmar_core::{Cart, Money};
//!
//! let mut cart = Cart::new();
//! cart.add("A", "Widget", Money::from_cents(1000), 2).unwrap();
//! cart.add("B", "Gadget", Money::from_cents(550), 1).unwrap();
//!
//! assert_eq!(cart.count(), 3);
//! assert_eq!(cart.formatted_total(), "25.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::LineItem;
