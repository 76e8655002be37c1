//! # dukan-store: Document Store Engine for Dukan
//!
//! This crate provides the storage and operations layer for the Dukan POS
//! system. It keeps the whole shop in one in-memory document, persisted as
//! a single JSON file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukan Data Flow                                  │
//! │                                                                         │
//! │  UI / embedding code (add_to_cart, checkout, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    dukan-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  SharedStore  │    │  Operations   │    │  Persistence │  │   │
//! │  │   │  (store.rs)   │    │ catalog.rs    │    │ (persist.rs) │  │   │
//! │  │   │               │    │ checkout.rs   │    │              │  │   │
//! │  │   │ Arc<Mutex<    │◄───│ rental.rs     │    │ temp file +  │  │   │
//! │  │   │   Store>>     │    │ expense.rs    │    │ rename       │  │   │
//! │  │   │               │    │ reports.rs    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Document File                               │   │
//! │  │   ./data/dukan.json (pretty-printed, backward compatible)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` engine and the `SharedStore` lock around it
//! - [`document`] - The persisted document and its load-time migration
//! - [`persist`] - Atomic JSON save, tolerant load
//! - [`error`] - Store error types
//! - [`catalog`] - Item create/edit/remove/stock operations
//! - [`checkout`] - Cart operations and the sale commit
//! - [`rental`] - Lending ledger
//! - [`expense`] - Expense ledger
//! - [`reports`] - Windowed totals, best sellers, alerts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukan_store::{SharedStore, ItemDraft};
//!
//! let shared = SharedStore::open("./data/dukan.json");
//!
//! let item = shared.with_mut(|store| {
//!     store.add_item(ItemDraft {
//!         name: "Pen".into(),
//!         price: "12.50".parse()?,
//!         stock: 40,
//!         ..ItemDraft::default()
//!     })
//! })?;
//!
//! shared.with_mut(|store| {
//!     store.add_to_cart(item.id, 2)?;
//!     let sale = store.checkout("Guest", Default::default())?;
//!     store.save()?;
//!     Ok::<_, dukan_store::StoreError>(sale)
//! })?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod document;
pub mod error;
pub mod expense;
pub mod persist;
pub mod rental;
pub mod reports;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::StoreDocument;
pub use error::{PersistError, StoreError, StoreResult};
pub use store::{SharedStore, Store};

// Operation input/output types for convenience
pub use catalog::ItemDraft;
pub use reports::{LedgerSummary, ReportWindow, TopSeller};
