//! # Period Aggregator
//!
//! Reporting windows and the financial summary behind the dashboard.
//!
//! ## Window Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fixed-Offset Windows                                 │
//! │                                                                         │
//! │   Day    midnight of `now`'s (UTC) calendar date                        │
//! │   Week   that midnight − 7 days                                         │
//! │   Month  that midnight − 30 days                                        │
//! │   Year   that midnight − 365 days                                       │
//! │                                                                         │
//! │   These are rolling offsets, NOT calendar months or ISO weeks.          │
//! │   "Month" on March 14th starts February 12th, not March 1st.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The simplified window arithmetic is intentional, documented behavior -
//! switching to calendar boundaries would silently change every historical
//! figure a user has already seen.
//!
//! ## Summary Asymmetry
//! Sales, expenses and purchases are filtered to the window; `stock_value`
//! and `low_stock_count` are point-in-time snapshots over the whole ledger
//! regardless of the selected range. That asymmetry is part of the
//! contract.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::classify::RecordKind;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::stock::{low_stock_count, stock_value, ProductLedger};
use crate::types::{Expense, Purchase, Sale, SaleStatus};
use crate::validation::{validate_expense, validate_purchase, validate_sale};
use crate::{DEFAULT_LOW_STOCK_THRESHOLD, RECENT_ACTIVITY_LIMIT};

// =============================================================================
// Report Range
// =============================================================================

/// The caller-selected reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReportRange {
    Day,
    Week,
    Month,
    Year,
}

impl ReportRange {
    /// Start of this window relative to `now`.
    ///
    /// `Day` truncates `now` to 00:00:00 of its UTC calendar date; the
    /// other ranges subtract a fixed number of days from that midnight.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use shopkeep_core::report::ReportRange;
    ///
    /// let now = Utc.with_ymd_and_hms(2026, 3, 14, 17, 45, 12).unwrap();
    /// let start = ReportRange::Day.window_start(now);
    /// assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());
    /// ```
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        match self {
            ReportRange::Day => midnight,
            ReportRange::Week => midnight - Duration::days(7),
            ReportRange::Month => midnight - Duration::days(30),
            ReportRange::Year => midnight - Duration::days(365),
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportRange::Day => "day",
            ReportRange::Week => "week",
            ReportRange::Month => "month",
            ReportRange::Year => "year",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ReportRange {
    type Err = ValidationError;

    /// Case-insensitive but otherwise strict: an unknown range is an
    /// error, never a silent default window.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(ReportRange::Day),
            "week" => Ok(ReportRange::Week),
            "month" => Ok(ReportRange::Month),
            "year" => Ok(ReportRange::Year),
            _ => Err(ValidationError::NotAllowed {
                field: "range".to_string(),
                allowed: ["day", "week", "month", "year"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityEntry {
    pub kind: RecordKind,
    pub id: String,
    pub amount: Money,
    #[ts(as = "String")]
    pub occurred_at: DateTime<Utc>,
}

/// The financial dashboard for one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Summary {
    /// Realized income: completed sales only.
    pub sales_total: Money,
    /// Non-binding quotes in the window, surfaced separately - never
    /// counted as revenue.
    pub quotes_total: Money,
    /// Cost of goods sold, from the costs frozen on each sale item.
    pub cogs_total: Money,
    pub expenses_total: Money,
    pub purchases_total: Money,
    /// sales_total − cogs_total.
    pub gross_profit: Money,
    /// gross_profit − expenses_total.
    pub net_profit: Money,
    /// Point-in-time stock valuation (NOT filtered to the window).
    pub stock_value: Money,
    /// Point-in-time low-stock product count (NOT filtered to the window).
    pub low_stock_count: usize,
    /// The most recent records in the window, newest first.
    pub recent: Vec<ActivityEntry>,
}

// =============================================================================
// Summarize
// =============================================================================

/// Computes the financial summary for everything on or after `start`.
///
/// Pure and idempotent: identical inputs produce an identical summary.
/// Empty inputs are not errors - they produce a zero-valued summary. Any
/// single invalid record fails the whole call naming the offender; no
/// partially-computed totals escape.
pub fn summarize(
    sales: &[Sale],
    expenses: &[Expense],
    purchases: &[Purchase],
    ledgers: &[ProductLedger],
    start: DateTime<Utc>,
) -> CoreResult<Summary> {
    for sale in sales {
        validate_sale(sale).map_err(|source| CoreError::InvalidRecord {
            kind: "sale",
            id: sale.id.clone(),
            source,
        })?;
    }
    for expense in expenses {
        validate_expense(expense).map_err(|source| CoreError::InvalidRecord {
            kind: "expense",
            id: expense.id.clone(),
            source,
        })?;
    }
    for purchase in purchases {
        validate_purchase(purchase).map_err(|source| CoreError::InvalidRecord {
            kind: "purchase",
            id: purchase.id.clone(),
            source,
        })?;
    }

    let window_sales: Vec<&Sale> = sales.iter().filter(|s| s.created_at >= start).collect();
    let window_expenses: Vec<&Expense> = expenses.iter().filter(|e| e.date >= start).collect();
    let window_purchases: Vec<&Purchase> =
        purchases.iter().filter(|p| p.created_at >= start).collect();

    // Realized income is completed sales only; quotes stay visible but
    // never count as revenue.
    let sales_total: Money = window_sales
        .iter()
        .filter(|s| s.status == SaleStatus::Completed)
        .map(|s| s.total())
        .sum();
    let quotes_total: Money = window_sales
        .iter()
        .filter(|s| s.status == SaleStatus::Quote)
        .map(|s| s.total())
        .sum();
    let cogs_total: Money = window_sales
        .iter()
        .filter(|s| s.status == SaleStatus::Completed)
        .map(|s| s.cogs())
        .sum();

    let expenses_total: Money = window_expenses.iter().map(|e| e.amount()).sum();
    let purchases_total: Money = window_purchases.iter().map(|p| p.total_cost()).sum();

    let gross_profit = sales_total - cogs_total;
    let net_profit = gross_profit - expenses_total;

    // Snapshots over the whole ledger, independent of the window.
    let stock_value = stock_value(ledgers)?;
    let low_stock_count = low_stock_count(ledgers, DEFAULT_LOW_STOCK_THRESHOLD)?;

    let recent = recent_activity(&window_sales, &window_expenses, &window_purchases);

    Ok(Summary {
        sales_total,
        quotes_total,
        cogs_total,
        expenses_total,
        purchases_total,
        gross_profit,
        net_profit,
        stock_value,
        low_stock_count,
        recent,
    })
}

/// Top-N most recent records across the filtered collections, newest first.
fn recent_activity(
    sales: &[&Sale],
    expenses: &[&Expense],
    purchases: &[&Purchase],
) -> Vec<ActivityEntry> {
    let mut feed: Vec<ActivityEntry> = Vec::with_capacity(sales.len() + expenses.len() + purchases.len());

    feed.extend(sales.iter().map(|s| ActivityEntry {
        kind: RecordKind::Sale,
        id: s.id.clone(),
        amount: s.total(),
        occurred_at: s.created_at,
    }));
    feed.extend(expenses.iter().map(|e| ActivityEntry {
        kind: RecordKind::Expense,
        id: e.id.clone(),
        amount: e.amount(),
        occurred_at: e.date,
    }));
    feed.extend(purchases.iter().map(|p| ActivityEntry {
        kind: RecordKind::Purchase,
        id: p.id.clone(),
        amount: p.total_cost(),
        occurred_at: p.created_at,
    }));

    feed.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    feed.truncate(RECENT_ACTIVITY_LIMIT);
    feed
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{MovementType, StockMovement};
    use crate::types::{Product, SaleItem};
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn sale(id: &str, status: SaleStatus, total_cents: i64, when: DateTime<Utc>) -> Sale {
        Sale {
            id: id.to_string(),
            status,
            total_amount_cents: total_cents,
            created_at: when,
            items: vec![],
        }
    }

    fn expense(id: &str, amount_cents: i64, when: DateTime<Utc>) -> Expense {
        Expense {
            id: id.to_string(),
            amount_cents,
            category: "Rent".to_string(),
            description: None,
            date: when,
        }
    }

    fn purchase(id: &str, quantity: i64, unit_cost_cents: i64, when: DateTime<Utc>) -> Purchase {
        Purchase {
            id: id.to_string(),
            product_id: "prod-1".to_string(),
            quantity,
            unit_cost_cents,
            total_cost_cents: quantity * unit_cost_cents,
            supplier_name: None,
            created_at: when,
        }
    }

    #[test]
    fn test_day_window_truncates_to_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 23, 59, 59).unwrap();
        let start = ReportRange::Day.window_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());

        // Regardless of time-of-day
        let early = Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 1).unwrap();
        assert_eq!(ReportRange::Day.window_start(early), start);
    }

    #[test]
    fn test_fixed_offset_windows() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap();

        assert_eq!(ReportRange::Week.window_start(now), midnight - Duration::days(7));
        assert_eq!(ReportRange::Month.window_start(now), midnight - Duration::days(30));
        assert_eq!(ReportRange::Year.window_start(now), midnight - Duration::days(365));
    }

    #[test]
    fn test_range_strict_parse() {
        assert_eq!("Day".parse::<ReportRange>().unwrap(), ReportRange::Day);
        assert_eq!("week".parse::<ReportRange>().unwrap(), ReportRange::Week);
        assert!(matches!(
            "Quarter".parse::<ReportRange>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_summary_scenario() {
        // Sales [100, 200] completed, expenses [30], purchases totalling 50,
        // per-item cost-at-sale totalling 60
        // ⇒ sales 300, cogs 60, gross 240, expenses 30, net 210, purchases 50
        let mut first = sale("sale-1", SaleStatus::Completed, 10_000, at(14, 10));
        first.items = vec![SaleItem {
            product_id: "prod-1".to_string(),
            quantity: 2,
            price_at_sale_cents: 5000,
            cost_at_sale_cents: 2000,
        }];
        let mut second = sale("sale-2", SaleStatus::Completed, 20_000, at(14, 11));
        second.items = vec![SaleItem {
            product_id: "prod-2".to_string(),
            quantity: 1,
            price_at_sale_cents: 20_000,
            cost_at_sale_cents: 2000,
        }];

        let sales = vec![first, second];
        let expenses = vec![expense("exp-1", 3000, at(14, 9))];
        let purchases = vec![purchase("pur-1", 5, 1000, at(14, 8))];

        let summary = summarize(&sales, &expenses, &purchases, &[], at(14, 0)).unwrap();

        assert_eq!(summary.sales_total.cents(), 30_000);
        assert_eq!(summary.cogs_total.cents(), 6000);
        assert_eq!(summary.gross_profit.cents(), 24_000);
        assert_eq!(summary.expenses_total.cents(), 3000);
        assert_eq!(summary.net_profit.cents(), 21_000);
        assert_eq!(summary.purchases_total.cents(), 5000);
    }

    #[test]
    fn test_quotes_are_not_revenue() {
        let sales = vec![
            sale("sale-1", SaleStatus::Completed, 10_000, at(14, 10)),
            sale("sale-2", SaleStatus::Quote, 99_000, at(14, 11)),
        ];

        let summary = summarize(&sales, &[], &[], &[], at(14, 0)).unwrap();
        assert_eq!(summary.sales_total.cents(), 10_000);
        assert_eq!(summary.quotes_total.cents(), 99_000);
    }

    #[test]
    fn test_window_filtering_excludes_older_records() {
        let sales = vec![
            sale("old", SaleStatus::Completed, 50_000, at(1, 10)),
            sale("new", SaleStatus::Completed, 10_000, at(14, 10)),
        ];
        let expenses = vec![expense("old-exp", 7000, at(1, 9))];

        let summary = summarize(&sales, &expenses, &[], &[], at(14, 0)).unwrap();
        assert_eq!(summary.sales_total.cents(), 10_000);
        assert!(summary.expenses_total.is_zero());
    }

    #[test]
    fn test_snapshots_ignore_the_window() {
        let ledgers = vec![ProductLedger {
            product: Product {
                id: "prod-1".to_string(),
                name: "Widget".to_string(),
                category: "Hardware".to_string(),
                unit: "pcs".to_string(),
                price_cents: 2000,
                cost_price_cents: Some(1250),
                created_at: at(1, 0),
            },
            movements: vec![
                StockMovement::record("prod-1", 100, MovementType::Purchase, None).unwrap(),
                StockMovement::record("prod-1", -35, MovementType::Sale, None).unwrap(),
            ],
        }];

        // Empty window: still a full valuation and low-stock snapshot
        let summary = summarize(&[], &[], &[], &ledgers, at(14, 0)).unwrap();
        assert_eq!(summary.stock_value.cents(), 81_250);
        assert_eq!(summary.low_stock_count, 0);
    }

    #[test]
    fn test_empty_inputs_yield_zero_summary() {
        let summary = summarize(&[], &[], &[], &[], at(14, 0)).unwrap();
        assert!(summary.sales_total.is_zero());
        assert!(summary.net_profit.is_zero());
        assert!(summary.stock_value.is_zero());
        assert_eq!(summary.low_stock_count, 0);
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let sales = vec![sale("sale-1", SaleStatus::Completed, 10_000, at(14, 10))];
        let expenses = vec![expense("exp-1", 3000, at(14, 9))];

        let first = summarize(&sales, &expenses, &[], &[], at(14, 0)).unwrap();
        let second = summarize(&sales, &expenses, &[], &[], at(14, 0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recent_activity_is_capped_and_sorted() {
        let sales: Vec<Sale> = (0..4)
            .map(|i| sale(&format!("sale-{i}"), SaleStatus::Completed, 1000, at(14, 10 + i)))
            .collect();
        let expenses = vec![expense("exp-1", 3000, at(14, 16))];
        let purchases = vec![
            purchase("pur-1", 5, 1000, at(14, 9)),
            purchase("pur-2", 5, 1000, at(14, 17)),
        ];

        let summary = summarize(&sales, &expenses, &purchases, &[], at(14, 0)).unwrap();

        assert_eq!(summary.recent.len(), RECENT_ACTIVITY_LIMIT);
        assert_eq!(summary.recent[0].id, "pur-2");
        assert_eq!(summary.recent[1].id, "exp-1");
        // Newest first throughout
        assert!(summary
            .recent
            .windows(2)
            .all(|pair| pair[0].occurred_at >= pair[1].occurred_at));
        // The oldest purchase fell off the end
        assert!(summary.recent.iter().all(|entry| entry.id != "pur-1"));
    }

    #[test]
    fn test_one_bad_record_fails_the_call() {
        let sales = vec![sale("sale-1", SaleStatus::Completed, 10_000, at(14, 10))];
        let expenses = vec![expense("exp-bad", 0, at(14, 9))];

        let err = summarize(&sales, &expenses, &[], &[], at(14, 0)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidRecord { kind: "expense", ref id, .. } if id == "exp-bad"
        ));
    }
}
