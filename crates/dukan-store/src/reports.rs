//! # Reports
//!
//! Read-only aggregations over the ledgers. Nothing here mutates the
//! document; every report is computed fresh from the records on each call,
//! which at single-shop ledger sizes costs nothing worth caching.
//!
//! ## Window Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  AllTime      every record, parseable timestamp or not          │
//! │  Day(d)       records whose timestamp parses onto that date     │
//! │  Range{..}    records whose timestamp parses into the range     │
//! │                                                                 │
//! │  A record with an unreadable timestamp cannot claim any         │
//! │  particular day, so dated windows skip it. Its money is still   │
//! │  real, so AllTime counts it.                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use dukan_core::{CatalogItem, Money, Rental, Sale, Timestamp};

use crate::store::Store;

/// Time window for ledger aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    /// Everything ever recorded.
    AllTime,
    /// One calendar day.
    Day(NaiveDate),
    /// Inclusive date range.
    Range { from: NaiveDate, to: NaiveDate },
}

impl ReportWindow {
    /// The `days`-day window ending on `today`, inclusive:
    /// `last_days(7, today)` covers today and the six days before it.
    pub fn last_days(days: i64, today: NaiveDate) -> Self {
        ReportWindow::Range {
            from: today - Duration::days(days - 1),
            to: today,
        }
    }

    /// True when a calendar date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            ReportWindow::AllTime => true,
            ReportWindow::Day(day) => date == *day,
            ReportWindow::Range { from, to } => *from <= date && date <= *to,
        }
    }

    /// True when a record with this timestamp belongs to the window.
    fn admits(&self, timestamp: &Timestamp) -> bool {
        match self {
            ReportWindow::AllTime => true,
            _ => timestamp
                .date()
                .map(|date| self.contains(date))
                .unwrap_or(false),
        }
    }
}

/// One line of the best-sellers report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSeller {
    pub name: String,
    pub quantity: i64,
}

/// All-time snapshot for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub sales_total: Money,
    pub expenses_total: Money,
    pub net_profit: Money,
    pub sales_count: usize,
    pub item_count: usize,
}

impl Store {
    /// Gross takings (totals including tax) in the window.
    pub fn sales_total(&self, window: ReportWindow) -> Money {
        self.document
            .sales
            .iter()
            .filter(|sale| window.admits(&sale.date))
            .fold(Money::zero(), |acc, sale| acc + sale.total)
    }

    /// Money spent in the window.
    pub fn expenses_total(&self, window: ReportWindow) -> Money {
        self.document
            .expenses
            .iter()
            .filter(|expense| window.admits(&expense.date))
            .fold(Money::zero(), |acc, expense| acc + expense.amount)
    }

    /// Takings minus expenses. Negative when the shop spent more than it
    /// took in.
    pub fn net_profit(&self, window: ReportWindow) -> Money {
        self.sales_total(window) - self.expenses_total(window)
    }

    /// All-time dashboard numbers.
    pub fn summary(&self) -> LedgerSummary {
        let sales_total = self.sales_total(ReportWindow::AllTime);
        let expenses_total = self.expenses_total(ReportWindow::AllTime);
        LedgerSummary {
            sales_total,
            expenses_total,
            net_profit: sales_total - expenses_total,
            sales_count: self.document.sales.len(),
            item_count: self.document.inventory.len(),
        }
    }

    /// Best-selling items by units sold, descending.
    ///
    /// Aggregates sale lines by the frozen line name, so history survives
    /// catalog renames and removals. Ties keep first-sold-first order.
    pub fn top_sold_items(&self, window: ReportWindow, limit: usize) -> Vec<TopSeller> {
        let mut sellers: Vec<TopSeller> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for sale in &self.document.sales {
            if !window.admits(&sale.date) {
                continue;
            }
            for line in &sale.items {
                match index.get(&line.name) {
                    Some(&at) => sellers[at].quantity += line.quantity,
                    None => {
                        index.insert(line.name.clone(), sellers.len());
                        sellers.push(TopSeller {
                            name: line.name.clone(),
                            quantity: line.quantity,
                        });
                    }
                }
            }
        }

        sellers.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        sellers.truncate(limit);
        sellers
    }

    /// The most recent sales, newest first, at most `limit`.
    ///
    /// Sales whose timestamp no longer parses cannot be placed in time and
    /// go last, keeping their ledger order.
    pub fn recent_sales(&self, limit: usize) -> Vec<&Sale> {
        let mut sales: Vec<&Sale> = self.document.sales.iter().collect();
        sales.sort_by_key(|sale| std::cmp::Reverse(sale.date.parse()));
        sales.truncate(limit);
        sales
    }

    /// Items at or below the given stock level.
    pub fn items_below_stock(&self, threshold: i64) -> Vec<&CatalogItem> {
        self.document
            .inventory
            .iter()
            .filter(|item| item.stock <= threshold)
            .collect()
    }

    /// Items at or below the store's configured low-stock threshold.
    pub fn low_stock_alerts(&self) -> Vec<&CatalogItem> {
        self.items_below_stock(self.document.settings.low_stock_threshold)
    }

    /// Open rentals whose due date has passed as of the given moment.
    pub fn overdue_rentals(&self, as_of: NaiveDateTime) -> Vec<&Rental> {
        self.document
            .rentals
            .iter()
            .filter(|rental| rental.is_overdue(as_of))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemDraft;
    use crate::document::StoreDocument;
    use dukan_core::{PaymentMethod, RentalStatus, Sale, SaleLine, GUEST_CUSTOMER};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(id: &str, date: &str, total_cents: i64, lines: &[(&str, i64)]) -> Sale {
        Sale {
            id: id.to_string(),
            date: Timestamp::from_raw(date),
            customer: GUEST_CUSTOMER.to_string(),
            payment_method: PaymentMethod::Cash,
            items: lines
                .iter()
                .map(|(name, quantity)| SaleLine {
                    product_id: 0,
                    name: name.to_string(),
                    price: Money::zero(),
                    quantity: *quantity,
                    total: Money::zero(),
                })
                .collect(),
            subtotal: Money::from_cents(total_cents),
            tax: Money::zero(),
            total: Money::from_cents(total_cents),
        }
    }

    fn expense(id: &str, date: &str, cents: i64) -> dukan_core::Expense {
        dukan_core::Expense {
            id: id.to_string(),
            date: Timestamp::from_raw(date),
            description: "test".to_string(),
            amount: Money::from_cents(cents),
            category: None,
        }
    }

    fn rental(id: &str, due: &str, status: RentalStatus) -> Rental {
        Rental {
            id: id.to_string(),
            item_id: 1,
            item_name: "Pen".to_string(),
            borrower: "Ali".to_string(),
            rented_at: Timestamp::from_raw("2023-06-01T10:00:00"),
            due_date: Timestamp::from_raw(due),
            status,
            return_date: None,
        }
    }

    #[test]
    fn test_window_contains() {
        let window = ReportWindow::Range {
            from: day(2023, 4, 1),
            to: day(2023, 4, 7),
        };
        assert!(window.contains(day(2023, 4, 1)));
        assert!(window.contains(day(2023, 4, 7)));
        assert!(!window.contains(day(2023, 3, 31)));
        assert!(!window.contains(day(2023, 4, 8)));
    }

    #[test]
    fn test_last_days_window() {
        let window = ReportWindow::last_days(7, day(2023, 4, 10));
        assert!(window.contains(day(2023, 4, 10)));
        assert!(window.contains(day(2023, 4, 4)));
        assert!(!window.contains(day(2023, 4, 3)));

        let today_only = ReportWindow::last_days(1, day(2023, 4, 10));
        assert!(today_only.contains(day(2023, 4, 10)));
        assert!(!today_only.contains(day(2023, 4, 9)));
    }

    #[test]
    fn test_sales_total_buckets_by_parsed_date() {
        let mut document = StoreDocument::new();
        // microsecond ISO form, space-separated form, and one broken date
        document.sales.push(sale("s1", "2023-04-05T09:30:00.123456", 1_000, &[]));
        document.sales.push(sale("s2", "2023-04-05 18:00:00", 2_000, &[]));
        document.sales.push(sale("s3", "2023-04-06T10:00:00", 4_000, &[]));
        document.sales.push(sale("s4", "not a date", 8_000, &[]));
        let store = Store::new(document, "unused.json");

        assert_eq!(
            store.sales_total(ReportWindow::Day(day(2023, 4, 5))),
            Money::from_cents(3_000)
        );
        assert_eq!(
            store.sales_total(ReportWindow::Day(day(2023, 4, 6))),
            Money::from_cents(4_000)
        );
        // the unreadable date is only visible all-time
        assert_eq!(
            store.sales_total(ReportWindow::AllTime),
            Money::from_cents(15_000)
        );
        assert_eq!(
            store.sales_total(ReportWindow::Range {
                from: day(2023, 4, 1),
                to: day(2023, 4, 30),
            }),
            Money::from_cents(7_000)
        );
    }

    #[test]
    fn test_net_profit_can_go_negative() {
        let mut document = StoreDocument::new();
        document.sales.push(sale("s1", "2023-04-05T10:00:00", 1_000, &[]));
        document.expenses.push(expense("e1", "2023-04-05T11:00:00", 2_500));
        let store = Store::new(document, "unused.json");

        assert_eq!(
            store.net_profit(ReportWindow::AllTime),
            Money::from_cents(-1_500)
        );
    }

    #[test]
    fn test_summary_counts_everything() {
        let mut document = StoreDocument::new();
        document.sales.push(sale("s1", "garbage", 1_000, &[]));
        document.expenses.push(expense("e1", "also garbage", 300));
        let mut store = Store::new(document, "unused.json");
        store
            .add_item(ItemDraft {
                name: "Pen".to_string(),
                price: Money::from_cents(500),
                stock: 5,
                ..ItemDraft::default()
            })
            .unwrap();

        let summary = store.summary();
        assert_eq!(summary.sales_total, Money::from_cents(1_000));
        assert_eq!(summary.expenses_total, Money::from_cents(300));
        assert_eq!(summary.net_profit, Money::from_cents(700));
        assert_eq!(summary.sales_count, 1);
        assert_eq!(summary.item_count, 1);
    }

    #[test]
    fn test_top_sellers_orders_and_truncates() {
        let mut document = StoreDocument::new();
        document.sales.push(sale(
            "s1",
            "2023-04-05T10:00:00",
            0,
            &[("Pen", 3), ("Ruler", 1)],
        ));
        document.sales.push(sale(
            "s2",
            "2023-04-06T10:00:00",
            0,
            &[("Pen", 2), ("Notebook", 5)],
        ));
        let store = Store::new(document, "unused.json");

        let top = store.top_sold_items(ReportWindow::AllTime, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], TopSeller { name: "Pen".to_string(), quantity: 5 });
        assert_eq!(top[1], TopSeller { name: "Notebook".to_string(), quantity: 5 });
    }

    #[test]
    fn test_top_sellers_tie_keeps_first_sold_order() {
        let mut document = StoreDocument::new();
        document.sales.push(sale(
            "s1",
            "2023-04-05T10:00:00",
            0,
            &[("Ruler", 2), ("Pen", 2)],
        ));
        let store = Store::new(document, "unused.json");

        let top = store.top_sold_items(ReportWindow::AllTime, 10);
        assert_eq!(top[0].name, "Ruler");
        assert_eq!(top[1].name, "Pen");
    }

    #[test]
    fn test_top_sellers_respects_window() {
        let mut document = StoreDocument::new();
        document.sales.push(sale("s1", "2023-04-05T10:00:00", 0, &[("Pen", 3)]));
        document.sales.push(sale("s2", "2023-05-01T10:00:00", 0, &[("Ruler", 9)]));
        let store = Store::new(document, "unused.json");

        let top = store.top_sold_items(ReportWindow::Day(day(2023, 4, 5)), 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Pen");
    }

    #[test]
    fn test_recent_sales_newest_first_unparseable_last() {
        let mut document = StoreDocument::new();
        document.sales.push(sale("s1", "2023-04-05T10:00:00", 0, &[]));
        document.sales.push(sale("s2", "broken", 0, &[]));
        document.sales.push(sale("s3", "2023-04-07T10:00:00", 0, &[]));
        document.sales.push(sale("s4", "2023-04-06T10:00:00", 0, &[]));
        let store = Store::new(document, "unused.json");

        let recent: Vec<&str> = store
            .recent_sales(10)
            .iter()
            .map(|sale| sale.id.as_str())
            .collect();
        assert_eq!(recent, vec!["s3", "s4", "s1", "s2"]);

        assert_eq!(store.recent_sales(2).len(), 2);
    }

    #[test]
    fn test_items_below_stock_includes_the_boundary() {
        let mut store = Store::new(StoreDocument::new(), "unused.json");
        for (name, stock) in [("Pen", 2), ("Ruler", 5), ("Notebook", 6)] {
            store
                .add_item(ItemDraft {
                    name: name.to_string(),
                    price: Money::from_cents(100),
                    stock,
                    ..ItemDraft::default()
                })
                .unwrap();
        }

        let low = store.items_below_stock(5);
        assert_eq!(low.len(), 2);
        // default threshold is 5 as well
        assert_eq!(store.low_stock_alerts().len(), 2);
    }

    #[test]
    fn test_overdue_rentals() {
        let mut document = StoreDocument::new();
        document.rentals.push(rental("r1", "2023-06-10T10:00:00", RentalStatus::Lent));
        document.rentals.push(rental("r2", "2023-06-20T10:00:00", RentalStatus::Lent));
        document.rentals.push(rental("r3", "2023-06-01T10:00:00", RentalStatus::Returned));
        document.rentals.push(rental("r4", "never", RentalStatus::Lent));
        let store = Store::new(document, "unused.json");

        let as_of = day(2023, 6, 15).and_hms_opt(12, 0, 0).unwrap();
        let overdue = store.overdue_rentals(as_of);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "r1");
    }
}
