//! # Validation Module
//!
//! Input validation utilities for Dukan.
//!
//! ## Validation Strategy
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                            │
//! │                                                                   │
//! │  Layer 1: Embedding UI                                            │
//! │  ├── Basic format checks (empty, length)                          │
//! │  └── Immediate user feedback                                      │
//! │           │                                                       │
//! │           ▼                                                       │
//! │  Layer 2: THIS MODULE (field rules)                               │
//! │  ├── Required / length / range checks                             │
//! │  └── Runs before any store mutation                               │
//! │           │                                                       │
//! │           ▼                                                       │
//! │  Layer 3: Store operations (cross-record rules)                   │
//! │  ├── Name and barcode uniqueness                                  │
//! │  ├── Stock sufficiency                                            │
//! │  └── Open-rental references                                       │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukan_core::validation::{validate_item_name, validate_quantity};
//!
//! validate_item_name("Pen").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 120 characters
///
/// ## Example
/// ```rust
/// use dukan_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Pen").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a barcode, when one is supplied.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 64 characters
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a borrower name on a rental.
pub fn validate_borrower_name(borrower: &str) -> ValidationResult<()> {
    let borrower = borrower.trim();

    if borrower.is_empty() {
        return Err(ValidationError::Required {
            field: "borrower".to_string(),
        });
    }

    if borrower.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "borrower".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates an expense description.
pub fn validate_expense_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart or sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌──────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                  │
/// │                                                                  │
/// │  User enters quantity: 5                                         │
/// │       │                                                          │
/// │       ▼                                                          │
/// │  validate_quantity(5) ← THIS FUNCTION                            │
/// │       │                                                          │
/// │       ├── qty <= 0? → Error: "Quantity must be positive"         │
/// │       │                                                          │
/// │       ├── qty > 999? → Error: out of range                       │
/// │       │                                                          │
/// │       └── OK → Proceed to the stock check                        │
/// │                                                                  │
/// └──────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaway items)
///
/// ## Example
/// ```rust
/// use dukan_core::money::Money;
/// use dukan_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an expense amount.
///
/// ## Rules
/// - Must be positive (> 0); a zero expense records nothing
pub fn validate_expense_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a rental duration in days.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_duration_days(days: i64) -> ValidationResult<()> {
    if days <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "duration_days".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates the low-stock threshold setting.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_low_stock_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::OutOfRange {
            field: "low_stock_threshold".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
