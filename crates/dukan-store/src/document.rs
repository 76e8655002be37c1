//! # Store Document
//!
//! The single JSON document that holds everything the shop knows: catalog,
//! sale ledger, expense ledger, rental ledger, settings. One file on disk,
//! one struct in memory.
//!
//! ## Compatibility
//!
//! The predecessor app wrote this file for years and its shape drifted:
//! prices were floats, sales had no `subtotal`, there was no `rentals`
//! array and no id counter. Every field here is `#[serde(default)]`, and
//! [`StoreDocument::normalize`] patches up whatever defaults alone cannot,
//! so any historical document loads without a migration step.

use dukan_core::{CatalogItem, Expense, Rental, Sale, Settings, GUEST_CUSTOMER};
use serde::{Deserialize, Serialize};

/// The complete persisted state of a store.
///
/// Unknown top-level keys in older files (the predecessor kept a `customers`
/// array for a while) are ignored on load and dropped on the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Catalog items, keyed by their numeric `id`.
    #[serde(default)]
    pub inventory: Vec<CatalogItem>,

    /// Committed sales, append-only.
    #[serde(default)]
    pub sales: Vec<Sale>,

    /// Recorded expenses, append-only.
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// Lending ledger. Closed rentals stay here with `Returned` status.
    #[serde(default)]
    pub rentals: Vec<Rental>,

    /// Store-wide settings (tax rate, currency, low-stock threshold).
    #[serde(default)]
    pub settings: Settings,

    /// Next catalog id to hand out. Never decreases, never reuses.
    #[serde(default)]
    pub next_item_id: u64,
}

impl StoreDocument {
    /// Creates a fresh, empty document.
    pub fn new() -> Self {
        StoreDocument {
            inventory: Vec::new(),
            sales: Vec::new(),
            expenses: Vec::new(),
            rentals: Vec::new(),
            settings: Settings::default(),
            next_item_id: 1,
        }
    }

    /// Hands out the next catalog item id.
    ///
    /// Ids are never reused: removing item 7 and adding a new item yields 8
    /// (or higher), so old sale and rental lines keep pointing at the id
    /// they were written with.
    pub(crate) fn allocate_item_id(&mut self) -> u64 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }

    /// Load-time migration for fields `#[serde(default)]` cannot fix alone.
    ///
    /// Called once after deserializing, before the document is used:
    /// - seeds `next_item_id` past every existing item id (older files
    ///   had no counter at all)
    /// - backfills `subtotal` on sales that only stored a grand total
    /// - maps blank customer names to the guest placeholder
    /// - treats blank optional strings as absent
    pub fn normalize(&mut self) {
        let max_id = self.inventory.iter().map(|item| item.id).max().unwrap_or(0);
        if self.next_item_id <= max_id {
            self.next_item_id = max_id + 1;
        }
        if self.next_item_id == 0 {
            self.next_item_id = 1;
        }

        for sale in &mut self.sales {
            if sale.subtotal.is_zero() && !sale.total.is_zero() {
                sale.subtotal = sale.total - sale.tax;
            }
            if sale.customer.trim().is_empty() {
                sale.customer = GUEST_CUSTOMER.to_string();
            }
        }

        for item in &mut self.inventory {
            clear_blank(&mut item.description);
            clear_blank(&mut item.category);
            clear_blank(&mut item.barcode);
        }
    }
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// The predecessor wrote `""` where it meant "no value".
fn clear_blank(field: &mut Option<String>) {
    if field.as_deref().is_some_and(|text| text.trim().is_empty()) {
        *field = None;
    }
}
