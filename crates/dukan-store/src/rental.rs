//! # Rental Ledger
//!
//! Lending moves one unit of stock out per rental; returning moves it back.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  lend_item ──► stock − 1, rental appended with status Lent      │
//! │                                                                 │
//! │  return_item ─► stock + 1, status → Returned, return date set   │
//! │                                                                 │
//! │  Closed rentals stay in the ledger forever; "overdue" is        │
//! │  derived from the due date, never stored.                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rental freezes the item name at lend time, the same way sale lines
//! freeze theirs, so renames and removals cannot rewrite history.

use chrono::{Duration, Local};
use tracing::info;
use uuid::Uuid;

use dukan_core::validation;
use dukan_core::{Rental, RentalStatus, Timestamp};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Lends one unit of an item to a borrower.
    ///
    /// The due date is `duration_days` from now. Lending is allowed at any
    /// price, including zero; it is stock that is the constraint. All
    /// validation happens before the stock moves.
    pub fn lend_item(
        &mut self,
        item_id: u64,
        borrower: &str,
        duration_days: i64,
    ) -> StoreResult<Rental> {
        let borrower = borrower.trim();
        validation::validate_borrower_name(borrower)?;
        validation::validate_duration_days(duration_days)?;

        let item_name = self
            .document
            .inventory
            .iter()
            .find(|item| item.id == item_id)
            .ok_or(StoreError::ItemNotFound(item_id))?
            .name
            .clone();

        self.adjust_stock(item_id, -1)?;

        let now = Local::now().naive_local();
        let rental = Rental {
            id: Uuid::new_v4().to_string(),
            item_id,
            item_name,
            borrower: borrower.to_string(),
            rented_at: Timestamp::from_datetime(now),
            due_date: Timestamp::from_datetime(now + Duration::days(duration_days)),
            status: RentalStatus::Lent,
            return_date: None,
        };

        info!(
            rental_id = %rental.id,
            item_id = %item_id,
            borrower = %rental.borrower,
            due = %rental.due_date,
            "Item lent"
        );
        self.document.rentals.push(rental.clone());
        Ok(rental)
    }

    /// Closes a rental and puts the unit back on the shelf.
    ///
    /// Returning twice fails with `AlreadyReturned` and does not touch
    /// stock again.
    pub fn return_item(&mut self, rental_id: &str) -> StoreResult<Rental> {
        let document = &mut self.document;

        let rental = document
            .rentals
            .iter_mut()
            .find(|rental| rental.id == rental_id)
            .ok_or_else(|| StoreError::RentalNotFound(rental_id.to_string()))?;

        if rental.status == RentalStatus::Returned {
            return Err(StoreError::AlreadyReturned(rental_id.to_string()));
        }

        // Restock first: if the item is somehow gone (hand-edited file),
        // the rental stays open rather than closing without a restock.
        let item = document
            .inventory
            .iter_mut()
            .find(|item| item.id == rental.item_id)
            .ok_or(StoreError::ItemNotFound(rental.item_id))?;
        item.stock += 1;

        rental.status = RentalStatus::Returned;
        rental.return_date = Some(Timestamp::now());

        info!(rental_id = %rental.id, item_id = %rental.item_id, "Item returned");
        Ok(rental.clone())
    }

    /// Rentals still out, oldest first.
    pub fn open_rentals(&self) -> Vec<&Rental> {
        self.document
            .rentals
            .iter()
            .filter(|rental| rental.status == RentalStatus::Lent)
            .collect()
    }
}
