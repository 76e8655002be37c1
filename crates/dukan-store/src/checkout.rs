//! # Cart and Checkout
//!
//! The cart holds the sale being rung up; checkout turns it into a ledger
//! entry.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(customer, payment_method)                                     │
//! │                                                                         │
//! │  1. Refuse an empty cart                                                │
//! │  2. Re-validate EVERY line against live stock ── any failure exits      │
//! │     here, before a single unit moves                                    │
//! │  3. Compute subtotal, tax, total from the frozen line prices            │
//! │  4. Apply the stock decrements                                          │
//! │  5. Append the sale, clear the cart                                     │
//! │                                                                         │
//! │  Steps 4-5 cannot fail: everything fallible happened in 1-3.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 2 exists because stock can change between carting and paying:
//! another terminal sells the last unit, the owner corrects a count, an
//! item gets removed. The cart's conservative check at add time is a
//! courtesy; this one is the gate.

use tracing::{debug, info};
use uuid::Uuid;

use dukan_core::validation;
use dukan_core::{
    Cart, CartTotals, PaymentMethod, Sale, SaleLine, Timestamp, GUEST_CUSTOMER,
};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Adds `quantity` units of an item to the cart.
    ///
    /// Merges into an existing line for the same item. The merged quantity
    /// must stay within line bounds and within current stock.
    pub fn add_to_cart(&mut self, item_id: u64, quantity: i64) -> StoreResult<CartTotals> {
        validation::validate_quantity(quantity)?;

        let item = self
            .document
            .inventory
            .iter()
            .find(|item| item.id == item_id)
            .ok_or(StoreError::ItemNotFound(item_id))?;

        let merged = self.cart.quantity_of(item_id) + quantity;
        validation::validate_quantity(merged)?;
        if merged > item.stock {
            return Err(StoreError::insufficient_stock(
                item.name.clone(),
                item.stock,
                merged,
            ));
        }

        self.cart.add(item, quantity);
        debug!(item_id = %item_id, quantity = %quantity, "Added to cart");
        Ok(self.cart_totals())
    }

    /// Drops an item's line from the cart entirely.
    pub fn remove_from_cart(&mut self, item_id: u64) -> StoreResult<CartTotals> {
        if !self.cart.remove(item_id) {
            return Err(StoreError::NotInCart(item_id));
        }
        debug!(item_id = %item_id, "Removed from cart");
        Ok(self.cart_totals())
    }

    /// Empties the cart without selling anything.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// The in-progress cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart totals at the store's current tax rate.
    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals(self.document.settings.tax_rate)
    }

    /// Commits the cart as a sale.
    ///
    /// All-or-nothing: either every line passes re-validation and the sale
    /// commits, or the first failure aborts with stock, ledger and cart
    /// exactly as they were. A blank `customer` records the guest
    /// placeholder.
    pub fn checkout(&mut self, customer: &str, payment_method: PaymentMethod) -> StoreResult<Sale> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        // Phase 1: validate every line, collecting the stock writes to
        // apply. Nothing is mutated until the whole cart has passed.
        let mut stock_writes: Vec<(usize, i64)> = Vec::with_capacity(self.cart.line_count());
        for line in self.cart.lines() {
            let idx = self
                .document
                .inventory
                .iter()
                .position(|item| item.id == line.item_id)
                .ok_or(StoreError::ItemNotFound(line.item_id))?;

            let item = &self.document.inventory[idx];
            if line.quantity > item.stock {
                return Err(StoreError::insufficient_stock(
                    item.name.clone(),
                    item.stock,
                    line.quantity,
                ));
            }
            stock_writes.push((idx, item.stock - line.quantity));
        }

        let totals = self.cart_totals();

        // Phase 2: commit.
        for (idx, new_stock) in stock_writes {
            self.document.inventory[idx].stock = new_stock;
        }

        let customer = customer.trim();
        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            date: Timestamp::now(),
            customer: if customer.is_empty() {
                GUEST_CUSTOMER.to_string()
            } else {
                customer.to_string()
            },
            payment_method,
            items: self
                .cart
                .lines()
                .iter()
                .map(|line| SaleLine {
                    product_id: line.item_id,
                    name: line.name.clone(),
                    price: line.unit_price,
                    quantity: line.quantity,
                    total: line.line_total(),
                })
                .collect(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
        };

        info!(
            sale_id = %sale.id,
            total = %sale.total,
            lines = sale.items.len(),
            "Sale committed"
        );
        self.document.sales.push(sale.clone());
        self.cart.clear();
        Ok(sale)
    }
}
