//! # Store Engine
//!
//! The central handle every operation goes through.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Engine                                    │
//! │                                                                         │
//! │  UI / embedding code                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SharedStore (Arc<Mutex<Store>>)  ← one coarse lock, cloned per thread  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store                                                                  │
//! │  ├── document: StoreDocument   ← catalog + ledgers + settings           │
//! │  ├── cart: Cart                ← in-progress sale, never persisted      │
//! │  └── data_path: PathBuf        ← where save() writes                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist::save() ── temp file + rename ──► dukan.json                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations mutate only the in-memory document; nothing touches disk
//! until [`Store::save`] is called. The embedding layer decides when to
//! save (typically after every committed mutation).
//!
//! The coarse lock is a deliberate trade: a single-counter shop produces a
//! handful of operations per minute, and one `Mutex` over the whole model
//! makes every operation trivially atomic with respect to every other.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::info;

use dukan_core::validation;
use dukan_core::{Cart, Expense, Rental, Sale, Settings, ValidationError};

use crate::document::StoreDocument;
use crate::error::StoreResult;
use crate::persist;

// =============================================================================
// Store
// =============================================================================

/// A store: one document, one cart, one data file.
///
/// All catalog, cart, rental, expense and report operations are methods on
/// this type, split across the modules that own them.
#[derive(Debug)]
pub struct Store {
    pub(crate) document: StoreDocument,
    pub(crate) cart: Cart,
    data_path: PathBuf,
}

impl Store {
    /// Creates a store from an already-loaded document.
    ///
    /// `path` is where [`Store::save`] will write; the file does not need
    /// to exist yet.
    pub fn new(document: StoreDocument, path: impl Into<PathBuf>) -> Self {
        Store {
            document,
            cart: Cart::new(),
            data_path: path.into(),
        }
    }

    /// Opens the store at `path`.
    ///
    /// ## What This Does
    /// 1. Loads and normalizes the document file
    /// 2. Falls back to an empty document when the file is missing or
    ///    unreadable (logged, never fatal)
    /// 3. Starts with an empty cart
    ///
    /// ## Example
    /// ```rust,ignore
    /// let store = Store::open("./data/dukan.json");
    /// ```
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let data_path = path.into();
        info!(path = %data_path.display(), "Opening store document");
        let document = persist::load_or_default(&data_path);
        Store::new(document, data_path)
    }

    /// Path of the document file this store saves to.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Read access to the full document, for views and tests.
    pub fn document(&self) -> &StoreDocument {
        &self.document
    }

    /// Committed sales, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.document.sales
    }

    /// Recorded expenses, oldest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.document.expenses
    }

    /// All rentals, open and closed.
    pub fn rentals(&self) -> &[Rental] {
        &self.document.rentals
    }

    /// Writes the document to its data file atomically.
    pub fn save(&self) -> StoreResult<()> {
        persist::save(&self.document, &self.data_path)?;
        Ok(())
    }

    /// Writes a copy of the current document to `dest`.
    ///
    /// The backup uses the same format as the primary file, so it can be
    /// opened directly or fed back through [`Store::restore_from`].
    pub fn backup_to(&self, dest: &Path) -> StoreResult<()> {
        persist::save(&self.document, dest)?;
        info!(dest = %dest.display(), "Document backed up");
        Ok(())
    }

    /// Replaces the current document with the one at `source`.
    ///
    /// Loading is strict here: a missing or malformed backup fails the
    /// restore and leaves the current state untouched. On success the
    /// cart is cleared and the new document saved to the primary file.
    pub fn restore_from(&mut self, source: &Path) -> StoreResult<()> {
        let document = persist::load(source)?;
        self.document = document;
        self.cart.clear();
        self.save()?;
        info!(source = %source.display(), "Document restored from backup");
        Ok(())
    }

    /// Current store settings.
    pub fn settings(&self) -> &Settings {
        &self.document.settings
    }

    /// Replaces the store settings.
    ///
    /// The tax rate must not exceed 100%, the currency label must be
    /// non-blank and the low-stock threshold non-negative.
    pub fn update_settings(&mut self, settings: Settings) -> StoreResult<()> {
        validation::validate_tax_rate(settings.tax_rate)?;
        validation::validate_low_stock_threshold(settings.low_stock_threshold)?;
        let currency = settings.currency.trim();
        if currency.is_empty() {
            return Err(ValidationError::Required {
                field: "currency".to_string(),
            }
            .into());
        }
        self.document.settings = Settings {
            currency: currency.to_string(),
            ..settings
        };
        Ok(())
    }
}

/// Trims an optional text field, treating blank input as absent.
pub(crate) fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

// =============================================================================
// SharedStore
// =============================================================================

/// Thread-safe handle to a [`Store`].
///
/// ## Usage
/// ```rust,ignore
/// let shared = SharedStore::open("./data/dukan.json");
///
/// let totals = shared.with_mut(|store| {
///     store.add_to_cart(item_id, 2)
/// })?;
///
/// let summary = shared.with(|store| store.summary());
/// ```
///
/// Closures run with the lock held; keep them short and do not call back
/// into the same `SharedStore` from inside one.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wraps an existing store.
    pub fn new(store: Store) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Opens the store at `path` and wraps it. See [`Store::open`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        SharedStore::new(Store::open(path))
    }

    /// Runs a closure with shared read access to the store.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.inner.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Runs a closure with exclusive access to the store.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.inner.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
