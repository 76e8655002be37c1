//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistError (this module) ← Adds the file path                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)   ← One type for every operation             │
//! │       │         ▲                                                       │
//! │       │         └── ValidationError (dukan-core)                        │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use dukan_core::ValidationError;
use thiserror::Error;

/// Store operation errors.
///
/// Field validation failures from dukan-core and persistence failures both
/// fold into this type with `#[from]`, so operations can use `?` throughout.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No catalog item with the given id.
    ///
    /// ## When This Occurs
    /// - Lookup with a stale or mistyped id
    /// - Checkout re-validation after the item was removed
    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    /// The cart has no line for the given item.
    #[error("Item {0} is not in the cart")]
    NotInCart(u64),

    /// Another catalog item already uses this name.
    ///
    /// ## When This Occurs
    /// - Adding an item whose name matches an existing one (case-insensitive)
    /// - Renaming an item onto another item's name
    #[error("An item named '{0}' already exists")]
    DuplicateName(String),

    /// Another catalog item already uses this barcode.
    #[error("Barcode '{0}' is already assigned to another item")]
    DuplicateBarcode(String),

    /// The operation would drive stock below zero.
    ///
    /// ## When This Occurs
    /// - Carting more than is on the shelf
    /// - Checkout re-validation after stock changed under the cart
    /// - Lending the last unit twice
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// No rental with the given id.
    #[error("Rental not found: {0}")]
    RentalNotFound(String),

    /// The rental was already closed by an earlier return.
    #[error("Rental {0} was already returned")]
    AlreadyReturned(String),

    /// The item still has rentals out and cannot be removed.
    #[error("Cannot remove '{name}': it has rentals still out")]
    ReferencedByOpenRental { name: String },

    /// A field failed validation before the operation touched any state.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing the document file failed.
    #[error(transparent)]
    Persistence(#[from] PersistError),
}

impl StoreError {
    /// Creates a DuplicateName error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        StoreError::DuplicateName(name.into())
    }

    /// Creates a DuplicateBarcode error.
    pub fn duplicate_barcode(barcode: impl Into<String>) -> Self {
        StoreError::DuplicateBarcode(barcode.into())
    }

    /// Creates an InsufficientStock error.
    pub fn insufficient_stock(name: impl Into<String>, available: i64, requested: i64) -> Self {
        StoreError::InsufficientStock {
            name: name.into(),
            available,
            requested,
        }
    }
}

/// Errors raised while loading or saving the document file.
///
/// Every variant that touches the filesystem carries the path it failed on;
/// "permission denied" without a path is useless in a support ticket.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading the document file failed.
    #[error("Unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the temporary file failed.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Directory permissions
    #[error("Unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming the temporary file over the document failed.
    #[error("Unable to replace {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid document.
    #[error("Malformed document in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding the in-memory document failed.
    #[error("Unable to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_the_item() {
        let err = StoreError::insufficient_stock("Pen", 3, 5);
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Pen: available 3, requested 5"
        );
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            StoreError::ItemNotFound(42).to_string(),
            "Item not found: 42"
        );
        assert_eq!(
            StoreError::RentalNotFound("r-1".to_string()).to_string(),
            "Rental not found: r-1"
        );
    }

    #[test]
    fn test_duplicate_helpers() {
        let err = StoreError::duplicate_name("Pen");
        assert_eq!(err.to_string(), "An item named 'Pen' already exists");

        let err = StoreError::duplicate_barcode("123456");
        assert_eq!(
            err.to_string(),
            "Barcode '123456' is already assigned to another item"
        );
    }

    #[test]
    fn test_validation_error_passes_through_transparently() {
        let err: StoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_persist_error_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PersistError::Write {
            path: PathBuf::from("/data/dukan.json"),
            source: io,
        };
        assert!(err.to_string().contains("/data/dukan.json"));
    }
}
