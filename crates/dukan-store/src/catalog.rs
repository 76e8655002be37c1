//! # Catalog Operations
//!
//! Create, edit, remove and query catalog items.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  add_item(draft)      → validate, check uniqueness, assign id   │
//! │  edit_item(id, draft) → full replacement, id + created kept     │
//! │  remove_item(id)      → refused while rentals are out           │
//! │  adjust_stock(id, ±n) → the one primitive that moves stock      │
//! │                                                                 │
//! │  item / item_by_name / item_by_barcode / items / ...            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uniqueness rules: names are unique ignoring case, barcodes are unique
//! exactly. Items without a barcode never collide with each other.

use serde::{Deserialize, Serialize};
use tracing::debug;

use dukan_core::validation;
use dukan_core::{CatalogItem, Money, RentalStatus, Timestamp};

use crate::error::{StoreError, StoreResult};
use crate::store::{normalize_optional_text, Store};

/// Input for creating or editing a catalog item.
///
/// Edits are full replacements: every field of the item takes the draft's
/// value, only `id` and `created_date` survive from before.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
}

impl Store {
    /// Adds a new item to the catalog and returns it.
    ///
    /// ## Errors
    /// - `Validation` when a field is blank, too long or negative
    /// - `DuplicateName` when the name is taken (case-insensitive)
    /// - `DuplicateBarcode` when the barcode is taken
    pub fn add_item(&mut self, draft: ItemDraft) -> StoreResult<CatalogItem> {
        let name = draft.name.trim().to_string();
        validation::validate_item_name(&name)?;
        validation::validate_price(draft.price)?;
        validation::validate_stock(draft.stock)?;

        let barcode = normalize_optional_text(draft.barcode);
        if let Some(code) = &barcode {
            validation::validate_barcode(code)?;
        }

        self.ensure_unique(&name, barcode.as_deref(), None)?;

        let item = CatalogItem {
            id: self.document.allocate_item_id(),
            name,
            price: draft.price,
            stock: draft.stock,
            description: normalize_optional_text(draft.description),
            category: normalize_optional_text(draft.category),
            barcode,
            created_date: Timestamp::now(),
        };
        debug!(id = %item.id, name = %item.name, "Catalog item added");
        self.document.inventory.push(item.clone());
        Ok(item)
    }

    /// Replaces an item's fields with the draft's values.
    ///
    /// The id and creation date are preserved. Uniqueness checks skip the
    /// item itself, so saving an item back unchanged always succeeds.
    pub fn edit_item(&mut self, id: u64, draft: ItemDraft) -> StoreResult<CatalogItem> {
        let name = draft.name.trim().to_string();
        validation::validate_item_name(&name)?;
        validation::validate_price(draft.price)?;
        validation::validate_stock(draft.stock)?;

        let barcode = normalize_optional_text(draft.barcode);
        if let Some(code) = &barcode {
            validation::validate_barcode(code)?;
        }

        let idx = self
            .document
            .inventory
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;

        self.ensure_unique(&name, barcode.as_deref(), Some(id))?;

        let item = &mut self.document.inventory[idx];
        item.name = name;
        item.price = draft.price;
        item.stock = draft.stock;
        item.description = normalize_optional_text(draft.description);
        item.category = normalize_optional_text(draft.category);
        item.barcode = barcode;
        debug!(id = %id, name = %item.name, "Catalog item updated");
        Ok(item.clone())
    }

    /// Removes an item from the catalog.
    ///
    /// Refused while the item has open rentals; the lending ledger must
    /// stay able to restock on return. Past sales and closed rentals keep
    /// their frozen copies and are unaffected.
    pub fn remove_item(&mut self, id: u64) -> StoreResult<()> {
        let item = self
            .document
            .inventory
            .iter()
            .find(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;

        let open_rental = self
            .document
            .rentals
            .iter()
            .any(|rental| rental.item_id == id && rental.status == RentalStatus::Lent);
        if open_rental {
            return Err(StoreError::ReferencedByOpenRental {
                name: item.name.clone(),
            });
        }

        let name = item.name.clone();
        self.document.inventory.retain(|item| item.id != id);
        debug!(id = %id, name = %name, "Catalog item removed");
        Ok(())
    }

    /// Moves stock by `delta` (restock positive, correction negative).
    ///
    /// Returns the new stock level. Fails without changing anything when
    /// the result would be negative.
    pub fn adjust_stock(&mut self, id: u64, delta: i64) -> StoreResult<i64> {
        let item = self
            .document
            .inventory
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;

        let new_stock = item.stock + delta;
        if new_stock < 0 {
            return Err(StoreError::insufficient_stock(
                item.name.clone(),
                item.stock,
                -delta,
            ));
        }
        item.stock = new_stock;
        debug!(id = %id, delta = %delta, stock = %new_stock, "Stock adjusted");
        Ok(new_stock)
    }

    /// Shared uniqueness check; `exclude` skips the item being edited.
    fn ensure_unique(&self, name: &str, barcode: Option<&str>, exclude: Option<u64>) -> StoreResult<()> {
        let others = self
            .document
            .inventory
            .iter()
            .filter(|item| Some(item.id) != exclude);

        for item in others {
            if item.name_matches(name) {
                return Err(StoreError::duplicate_name(name));
            }
            if let Some(code) = barcode {
                if item.barcode.as_deref() == Some(code) {
                    return Err(StoreError::duplicate_barcode(code));
                }
            }
        }
        Ok(())
    }

    /// Looks up an item by id.
    pub fn item(&self, id: u64) -> Option<&CatalogItem> {
        self.document.inventory.iter().find(|item| item.id == id)
    }

    /// Looks up an item by exact name, ignoring case.
    pub fn item_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.document
            .inventory
            .iter()
            .find(|item| item.name_matches(name))
    }

    /// Looks up an item by barcode (exact match, input trimmed).
    pub fn item_by_barcode(&self, barcode: &str) -> Option<&CatalogItem> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return None;
        }
        self.document
            .inventory
            .iter()
            .find(|item| item.barcode.as_deref() == Some(barcode))
    }

    /// All catalog items in insertion order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.document.inventory
    }

    /// Items with at least one unit on the shelf.
    pub fn available_items(&self) -> Vec<&CatalogItem> {
        self.document
            .inventory
            .iter()
            .filter(|item| item.stock > 0)
            .collect()
    }

    /// Items in the given category, ignoring case.
    pub fn items_in_category(&self, category: &str) -> Vec<&CatalogItem> {
        let needle = category.trim().to_lowercase();
        self.document
            .inventory
            .iter()
            .filter(|item| {
                item.category
                    .as_deref()
                    .is_some_and(|label| label.to_lowercase() == needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StoreDocument;

    fn store() -> Store {
        Store::new(StoreDocument::new(), "unused.json")
    }

    fn draft(name: &str, cents: i64, stock: i64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            price: Money::from_cents(cents),
            stock,
            ..ItemDraft::default()
        }
    }

    #[test]
    fn test_add_item_assigns_sequential_ids() {
        let mut store = store();
        let pen = store.add_item(draft("Pen", 1_000, 5)).unwrap();
        let ruler = store.add_item(draft("Ruler", 500, 3)).unwrap();
        assert_eq!(pen.id, 1);
        assert_eq!(ruler.id, 2);
    }

    #[test]
    fn test_add_item_trims_name_and_optional_fields() {
        let mut store = store();
        let item = store
            .add_item(ItemDraft {
                name: "  Pen  ".to_string(),
                price: Money::from_cents(1_000),
                stock: 5,
                description: Some("   ".to_string()),
                category: Some(" stationery ".to_string()),
                barcode: Some("".to_string()),
            })
            .unwrap();
        assert_eq!(item.name, "Pen");
        assert_eq!(item.description, None);
        assert_eq!(item.category.as_deref(), Some("stationery"));
        assert_eq!(item.barcode, None);
    }

    #[test]
    fn test_add_item_rejects_blank_name_and_negative_numbers() {
        let mut store = store();
        assert!(store.add_item(draft("   ", 1_000, 5)).is_err());
        assert!(store.add_item(draft("Pen", -1, 5)).is_err());
        assert!(store.add_item(draft("Pen", 1_000, -5)).is_err());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_add_item_rejects_duplicate_name_case_insensitive() {
        let mut store = store();
        store.add_item(draft("Pen", 1_000, 5)).unwrap();

        let err = store.add_item(draft("  pEn ", 2_000, 1)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(name) if name == "pEn"));
    }

    #[test]
    fn test_add_item_rejects_duplicate_barcode() {
        let mut store = store();
        store
            .add_item(ItemDraft {
                barcode: Some("123456".to_string()),
                ..draft("Pen", 1_000, 5)
            })
            .unwrap();

        let err = store
            .add_item(ItemDraft {
                barcode: Some("123456".to_string()),
                ..draft("Ruler", 500, 3)
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateBarcode(_)));
    }

    #[test]
    fn test_items_without_barcode_do_not_collide() {
        let mut store = store();
        store.add_item(draft("Pen", 1_000, 5)).unwrap();
        store.add_item(draft("Ruler", 500, 3)).unwrap();
        assert_eq!(store.items().len(), 2);
    }

    #[test]
    fn test_edit_item_replaces_fields_but_keeps_identity() {
        let mut store = store();
        let pen = store.add_item(draft("Pen", 1_000, 5)).unwrap();

        let updated = store
            .edit_item(
                pen.id,
                ItemDraft {
                    category: Some("stationery".to_string()),
                    ..draft("Blue Pen", 1_200, 7)
                },
            )
            .unwrap();

        assert_eq!(updated.id, pen.id);
        assert_eq!(updated.created_date, pen.created_date);
        assert_eq!(updated.name, "Blue Pen");
        assert_eq!(updated.price, Money::from_cents(1_200));
        assert_eq!(updated.stock, 7);
        assert_eq!(updated.category.as_deref(), Some("stationery"));
    }

    #[test]
    fn test_edit_item_can_keep_its_own_name_and_barcode() {
        let mut store = store();
        let pen = store
            .add_item(ItemDraft {
                barcode: Some("123456".to_string()),
                ..draft("Pen", 1_000, 5)
            })
            .unwrap();

        // same name, same barcode, new price: not a duplicate of itself
        store
            .edit_item(
                pen.id,
                ItemDraft {
                    barcode: Some("123456".to_string()),
                    ..draft("Pen", 900, 5)
                },
            )
            .unwrap();
    }

    #[test]
    fn test_edit_item_cannot_take_anothers_name() {
        let mut store = store();
        store.add_item(draft("Pen", 1_000, 5)).unwrap();
        let ruler = store.add_item(draft("Ruler", 500, 3)).unwrap();

        let err = store.edit_item(ruler.id, draft("PEN", 500, 3)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));
    }

    #[test]
    fn test_edit_unknown_item() {
        let mut store = store();
        let err = store.edit_item(99, draft("Pen", 1_000, 5)).unwrap_err();
        assert!(matches!(err, StoreError::ItemNotFound(99)));
    }

    #[test]
    fn test_remove_item() {
        let mut store = store();
        let pen = store.add_item(draft("Pen", 1_000, 5)).unwrap();
        store.remove_item(pen.id).unwrap();
        assert!(store.items().is_empty());
        assert!(matches!(
            store.remove_item(pen.id).unwrap_err(),
            StoreError::ItemNotFound(_)
        ));
    }

    #[test]
    fn test_remove_item_blocked_while_rental_open() {
        let mut store = store();
        let pen = store.add_item(draft("Pen", 1_000, 5)).unwrap();
        let rental = store.lend_item(pen.id, "Ali", 7).unwrap();

        let err = store.remove_item(pen.id).unwrap_err();
        assert!(matches!(err, StoreError::ReferencedByOpenRental { name } if name == "Pen"));

        store.return_item(&rental.id).unwrap();
        store.remove_item(pen.id).unwrap();
    }

    #[test]
    fn test_removed_ids_are_never_reused() {
        let mut store = store();
        let pen = store.add_item(draft("Pen", 1_000, 5)).unwrap();
        store.remove_item(pen.id).unwrap();

        let ruler = store.add_item(draft("Ruler", 500, 3)).unwrap();
        assert!(ruler.id > pen.id);
    }

    #[test]
    fn test_adjust_stock() {
        let mut store = store();
        let pen = store.add_item(draft("Pen", 1_000, 5)).unwrap();

        assert_eq!(store.adjust_stock(pen.id, 10).unwrap(), 15);
        assert_eq!(store.adjust_stock(pen.id, -15).unwrap(), 0);
    }

    #[test]
    fn test_adjust_stock_cannot_go_negative() {
        let mut store = store();
        let pen = store.add_item(draft("Pen", 1_000, 3)).unwrap();

        let err = store.adjust_stock(pen.id, -5).unwrap_err();
        match err {
            StoreError::InsufficientStock {
                name,
                available,
                requested,
            } => {
                assert_eq!(name, "Pen");
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.item(pen.id).unwrap().stock, 3);
    }

    #[test]
    fn test_lookups() {
        let mut store = store();
        store
            .add_item(ItemDraft {
                barcode: Some("123456".to_string()),
                ..draft("Pen", 1_000, 5)
            })
            .unwrap();

        assert!(store.item_by_name("pen").is_some());
        assert!(store.item_by_name("pencil").is_none());
        assert!(store.item_by_barcode(" 123456 ").is_some());
        assert!(store.item_by_barcode("999").is_none());
        assert!(store.item_by_barcode("").is_none());
    }

    #[test]
    fn test_available_items_excludes_empty_shelves() {
        let mut store = store();
        store.add_item(draft("Pen", 1_000, 5)).unwrap();
        store.add_item(draft("Ruler", 500, 0)).unwrap();

        let available = store.available_items();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Pen");
    }

    #[test]
    fn test_items_in_category() {
        let mut store = store();
        store
            .add_item(ItemDraft {
                category: Some("Stationery".to_string()),
                ..draft("Pen", 1_000, 5)
            })
            .unwrap();
        store.add_item(draft("Mug", 2_000, 2)).unwrap();

        assert_eq!(store.items_in_category("stationery").len(), 1);
        assert!(store.items_in_category("toys").is_empty());
    }
}
