//! # Expense Ledger
//!
//! Append-only record of money leaving the till. There is no edit and no
//! delete; a wrong entry is corrected by a compensating one, the way a
//! paper daybook works.

use tracing::debug;
use uuid::Uuid;

use dukan_core::validation;
use dukan_core::{Expense, Money, Timestamp};

use crate::error::StoreResult;
use crate::store::{normalize_optional_text, Store};

impl Store {
    /// Records an expense. The amount must be strictly positive.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: Money,
        category: Option<String>,
    ) -> StoreResult<Expense> {
        let description = description.trim();
        validation::validate_expense_description(description)?;
        validation::validate_expense_amount(amount)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            date: Timestamp::now(),
            description: description.to_string(),
            amount,
            category: normalize_optional_text(category),
        };
        debug!(expense_id = %expense.id, amount = %expense.amount, "Expense recorded");
        self.document.expenses.push(expense.clone());
        Ok(expense)
    }
}
