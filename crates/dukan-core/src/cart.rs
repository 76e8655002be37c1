//! # Cart
//!
//! The in-progress sale, before checkout commits it to the ledger.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                             │
//! │                                                                  │
//! │  Till Action             Store Operation        Cart Change      │
//! │  ───────────             ───────────────        ───────────      │
//! │                                                                  │
//! │  Pick item ────────────► add_to_cart() ───────► merge or push    │
//! │                                                                  │
//! │  Remove line ──────────► remove_from_cart() ──► lines.retain()   │
//! │                                                                  │
//! │  New customer ─────────► clear_cart() ────────► lines.clear()    │
//! │                                                                  │
//! │  Checkout ─────────────► checkout() ──────────► lines → Sale,    │
//! │                                                  then cleared    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself is pure bookkeeping. Stock checks happen in the store,
//! which sees the catalog; the cart only merges quantities and sums lines.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CatalogItem, TaxRate};

/// A line in the cart.
///
/// ## Design Notes
/// `name` and `unit_price` are frozen copies taken when the line is first
/// added. If the catalog item is edited afterwards, the cart (and the sale
/// it becomes) keeps the price the customer was quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog id of the item.
    pub item_id: u64,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity in cart.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a catalog item, freezing name and price.
    pub fn from_item(item: &CatalogItem, quantity: i64) -> Self {
        CartLine {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    /// unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `item_id`; adding the same item again merges by
///   summing quantities (the first-add snapshot is kept)
/// - Quantities are positive; bounds are enforced by the store before
///   lines get here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity currently carted for an item, 0 when absent.
    pub fn quantity_of(&self, item_id: u64) -> i64 {
        self.lines
            .iter()
            .find(|line| line.item_id == item_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Adds an item to the cart, merging into an existing line if present.
    pub fn add(&mut self, item: &CatalogItem, quantity: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += quantity;
            return;
        }
        self.lines.push(CartLine::from_item(item, quantity));
    }

    /// Removes a line by item id. Returns false when no such line exists.
    pub fn remove(&mut self, item_id: u64) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        self.lines.len() != initial_len
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals, before tax.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |sum, line| sum + line.line_total())
    }

    /// Totals preview for a given tax rate.
    pub fn totals(&self, rate: TaxRate) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.calculate_tax(rate);
        CartTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary handed to the till display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}
