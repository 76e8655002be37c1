//! # Domain Types
//!
//! Core domain types used throughout Dukan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                                 │
//! │                                                                       │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐        │
//! │  │  CatalogItem   │   │      Sale      │   │     Rental     │        │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │        │
//! │  │  id (sequence) │   │  id (UUID)     │   │  id (UUID)     │        │
//! │  │  name (unique) │   │  items[] ──────┼─┐ │  item_id       │        │
//! │  │  price, stock  │   │  subtotal/tax  │ │ │  due_date      │        │
//! │  └────────────────┘   └────────────────┘ │ └────────────────┘        │
//! │                                          │                           │
//! │  ┌────────────────┐   ┌────────────────┐ │ ┌────────────────┐        │
//! │  │    Expense     │   │    SaleLine    │◄┘ │    Settings    │        │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │        │
//! │  │  id (UUID)     │   │  name (frozen) │   │  currency      │        │
//! │  │  amount > 0    │   │  price (frozen)│   │  tax_rate      │        │
//! │  └────────────────┘   └────────────────┘   └────────────────┘        │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sale lines and rentals carry frozen copies of the item name and price,
//! so editing or deleting a catalog item never rewrites history.

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::money::Money;
use crate::timestamp::Timestamp;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1400 bps = 14%
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Stored as basis points.
impl Serialize for TaxRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

struct TaxRateVisitor;

impl de::Visitor<'_> for TaxRateVisitor {
    type Value = TaxRate;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a tax rate in basis points or a legacy fraction")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TaxRate, E> {
        if v > 10_000 {
            return Err(E::custom(format!("tax rate {v} bps is above 100%")));
        }
        Ok(TaxRate(v as u32))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TaxRate, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("tax rate {v} is negative")))
            .and_then(|v| self.visit_u64(v))
    }

    // The predecessor stored the rate as a bare fraction (0.14 = 14%).
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TaxRate, E> {
        if !(0.0..=1.0).contains(&v) {
            return Err(E::custom(format!("tax fraction {v} is out of range")));
        }
        Ok(TaxRate((v * 10_000.0).round() as u32))
    }
}

impl<'de> Deserialize<'de> for TaxRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TaxRateVisitor)
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An item available for sale or lending.
///
/// Field names follow the on-disk document; `category` also accepts the
/// predecessor's `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Sequence id, assigned once and never reused after a delete.
    pub id: u64,

    /// Display name, unique case-insensitively.
    pub name: String,

    /// Unit price. Never negative.
    pub price: Money,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Optional category label.
    #[serde(default, alias = "type")]
    pub category: Option<String>,

    /// Optional barcode, unique when present.
    #[serde(default)]
    pub barcode: Option<String>,

    /// When the item was added to the catalog.
    #[serde(default)]
    pub created_date: Timestamp,
}

impl CatalogItem {
    /// Classifies the stock level against a low-stock threshold.
    pub fn stock_status(&self, threshold: i64) -> StockStatus {
        if self.stock <= 0 {
            StockStatus::OutOfStock
        } else if self.stock <= threshold {
            StockStatus::Low
        } else {
            StockStatus::Available
        }
    }

    /// True when the name matches, ignoring case.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Stock level bucket shown in catalog views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Available,
    Low,
    OutOfStock,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// This is an open set: the known methods get variants, anything else the
/// till operator typed is preserved verbatim as `Other`. Old documents with
/// free-form values keep them across a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Pay-later / credit arrangement.
    Deferred,
    /// Card payment on an external terminal.
    Card,
    /// Mobile wallet transfer.
    Wallet,
    /// Direct bank transfer.
    BankTransfer,
    /// Any other free-form label, kept as written.
    Other(String),
}

impl PaymentMethod {
    /// Canonical string form, used in the document and for display.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Deferred => "deferred",
            PaymentMethod::Card => "card",
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Other(label) => label,
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "deferred" | "credit" => PaymentMethod::Deferred,
            "card" => PaymentMethod::Card,
            "wallet" => PaymentMethod::Wallet,
            "bank_transfer" | "bank-transfer" => PaymentMethod::BankTransfer,
            _ => PaymentMethod::Other(label.trim().to_string()),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(label: String) -> Self {
        PaymentMethod::from(label.as_str())
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(PaymentMethod::from(label))
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// When the sale was committed.
    pub date: Timestamp,

    /// Free-text customer name; walk-ins are recorded as "Guest".
    #[serde(default)]
    pub customer: String,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// Frozen line snapshots.
    pub items: Vec<SaleLine>,

    /// Sum of line totals. Legacy sales stored only `total`; the loader
    /// backfills this field.
    #[serde(default)]
    pub subtotal: Money,

    /// Tax charged on the subtotal.
    #[serde(default)]
    pub tax: Money,

    /// subtotal + tax.
    pub total: Money,
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze item data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    /// Catalog id of the item sold.
    pub product_id: u64,
    /// Item name at time of sale (frozen).
    pub name: String,
    /// Unit price at time of sale (frozen).
    pub price: Money,
    /// Quantity sold.
    pub quantity: i64,
    /// price × quantity.
    pub total: Money,
}

// =============================================================================
// Expense
// =============================================================================

/// A recorded cost of running the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// When the expense was recorded.
    pub date: Timestamp,

    /// What the money went on. Never empty.
    pub description: String,

    /// Always positive.
    pub amount: Money,

    /// Optional category label.
    #[serde(default)]
    pub category: Option<String>,
}

// =============================================================================
// Rental
// =============================================================================

/// Lifecycle state of a rental. "Overdue" is never stored; it is derived
/// from the due date at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    /// Item is out with the borrower.
    Lent,
    /// Item came back; stock was restored.
    Returned,
}

/// One item lent out for a fixed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Catalog id of the lent item.
    pub item_id: u64,

    /// Item name at time of lending (frozen).
    pub item_name: String,

    /// Who took the item. Never empty.
    pub borrower: String,

    /// When the item went out.
    pub rented_at: Timestamp,

    /// rented_at + agreed duration in days.
    pub due_date: Timestamp,

    pub status: RentalStatus,

    /// Set when the item comes back.
    #[serde(default)]
    pub return_date: Option<Timestamp>,
}

impl Rental {
    /// True when the item is still out and its due date has passed.
    /// A due date that fails to parse never counts as overdue.
    pub fn is_overdue(&self, as_of: NaiveDateTime) -> bool {
        self.status == RentalStatus::Lent
            && self.due_date.parse().map(|due| due < as_of).unwrap_or(false)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Shop-wide configuration stored inside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency label appended to formatted amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tax applied at checkout. Legacy documents store a fraction, current
    /// documents store basis points; both load.
    #[serde(default)]
    pub tax_rate: TaxRate,

    /// Stock level at or below which an item is flagged.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_currency() -> String {
    "EGP".to_string()
}

fn default_low_stock_threshold() -> i64 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: default_currency(),
            tax_rate: TaxRate::zero(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl Settings {
    /// Renders an amount with the currency label, e.g. `12.50 EGP`.
    pub fn format_amount(&self, amount: Money) -> String {
        format!("{} {}", amount, self.currency)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
