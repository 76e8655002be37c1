//! # dukan-core: Pure Business Logic for Dukan
//!
//! This crate is the **heart** of Dukan. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                       Dukan Architecture                          │
//! │                                                                   │
//! │  ┌─────────────────────────────────────────────────────────────┐  │
//! │  │                     Embedding UI                            │  │
//! │  │    Catalog view ──► Cart view ──► Reports ──► Settings      │  │
//! │  └────────────────────────────┬────────────────────────────────┘  │
//! │                               │ SharedStore                       │
//! │  ┌────────────────────────────▼────────────────────────────────┐  │
//! │  │                dukan-store (Engine)                         │  │
//! │  │    catalog, checkout, rentals, expenses, reports, persist   │  │
//! │  └────────────────────────────┬────────────────────────────────┘  │
//! │                               │                                   │
//! │  ┌────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ dukan-core (THIS CRATE) ★                    │  │
//! │  │                                                             │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────┐  │  │
//! │  │  │  types  │ │  money  │ │  cart   │ │timestamp│ │ valid │  │  │
//! │  │  │ records │ │  cents  │ │ merging │ │ parsing │ │ rules │  │  │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └───────┘  │  │
//! │  │                                                             │  │
//! │  │   NO I/O • NO DISK • NO NETWORK • PURE FUNCTIONS            │  │
//! │  └─────────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (CatalogItem, Sale, Rental, Expense, Settings)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`timestamp`] - Raw-string timestamps with tolerant parsing
//! - [`cart`] - The in-progress sale
//! - [`error`] - Validation error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic logic, the only clock access is
//!    stamping "now" on new records
//! 2. **No I/O**: disk, network, database access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), serialized
//!    as decimal strings
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use dukan_core::money::Money;
//! use dukan_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(10_000); // 100.00
//!
//! let tax_rate = TaxRate::from_bps(1400); // 14%
//! let tax = subtotal.calculate_tax(tax_rate);
//!
//! // 14% of 100.00 is exactly 14.00
//! assert_eq!(tax.cents(), 1400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod timestamp;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukan_core::Money` instead of
// `use dukan_core::money::Money`

pub use cart::{Cart, CartLine, CartTotals};
pub use error::ValidationError;
pub use money::Money;
pub use timestamp::Timestamp;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer name recorded when the till operator leaves the field blank.
///
/// ## Why a constant?
/// Walk-in sales are the common case; reports and receipts need one stable
/// spelling to group them under.
pub const GUEST_CUSTOMER: &str = "Guest";

/// Maximum quantity of a single item in cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_LINE_QUANTITY: i64 = 999;
