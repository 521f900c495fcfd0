//! # Transaction Classifier
//!
//! Partitions heterogeneous transaction records for reporting, and merges
//! them into one descending-by-date timeline.
//!
//! Every record carries an explicit `kind` tag set at creation time; the
//! classifier switches on that tag. There is no probing for the presence of
//! a `unit_cost` or `category` field to guess a record's type, so schema
//! evolution cannot silently reclassify records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Expense, Purchase, Sale, SaleStatus};

// =============================================================================
// Record Kind
// =============================================================================

/// The explicit type tag on a transaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Sale,
    Expense,
    Purchase,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Sale => "sale",
            RecordKind::Expense => "expense",
            RecordKind::Purchase => "purchase",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RecordKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(RecordKind::Sale),
            "expense" => Ok(RecordKind::Expense),
            "purchase" => Ok(RecordKind::Purchase),
            _ => Err(ValidationError::NotAllowed {
                field: "kind".to_string(),
                allowed: vec![
                    "sale".to_string(),
                    "expense".to_string(),
                    "purchase".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// One record in the shop's mixed transaction history.
///
/// Serializes with an internal `kind` tag, so the JSON form is
/// self-describing: `{"kind":"expense", "amount_cents":3000, ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionRecord {
    Sale(Sale),
    Expense(Expense),
    Purchase(Purchase),
}

impl TransactionRecord {
    /// The record's explicit type tag.
    pub fn kind(&self) -> RecordKind {
        match self {
            TransactionRecord::Sale(_) => RecordKind::Sale,
            TransactionRecord::Expense(_) => RecordKind::Expense,
            TransactionRecord::Purchase(_) => RecordKind::Purchase,
        }
    }

    /// The record's id.
    pub fn id(&self) -> &str {
        match self {
            TransactionRecord::Sale(s) => &s.id,
            TransactionRecord::Expense(e) => &e.id,
            TransactionRecord::Purchase(p) => &p.id,
        }
    }

    /// The timeline merge key: `created_at` for sales and purchases,
    /// `date` for expenses.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TransactionRecord::Sale(s) => s.created_at,
            TransactionRecord::Expense(e) => e.date,
            TransactionRecord::Purchase(p) => p.created_at,
        }
    }

    /// The headline amount shown in a feed.
    pub fn amount(&self) -> Money {
        match self {
            TransactionRecord::Sale(s) => s.total(),
            TransactionRecord::Expense(e) => e.amount(),
            TransactionRecord::Purchase(p) => p.total_cost(),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// The three record collections, split back out of a mixed history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classified {
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub purchases: Vec<Purchase>,
}

/// Partitions mixed records by their explicit tag. Nothing is dropped and
/// no discriminating field is lost; unknown kinds cannot exist once a
/// record has deserialized.
pub fn classify(records: Vec<TransactionRecord>) -> Classified {
    let mut classified = Classified::default();
    for record in records {
        match record {
            TransactionRecord::Sale(s) => classified.sales.push(s),
            TransactionRecord::Expense(e) => classified.expenses.push(e),
            TransactionRecord::Purchase(p) => classified.purchases.push(p),
        }
    }
    classified
}

/// Exact-match status filter over sales.
pub fn filter_by_status(sales: &[Sale], status: SaleStatus) -> Vec<Sale> {
    sales
        .iter()
        .filter(|sale| sale.status == status)
        .cloned()
        .collect()
}

/// Merges mixed records into one timeline, most recent first.
///
/// The sort is stable, so records sharing a timestamp keep their input
/// order - ties are not otherwise broken.
pub fn timeline(mut records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    records.sort_by(|a, b| b.occurred_at().cmp(&a.occurred_at()));
    records
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    fn sale(id: &str, status: SaleStatus, hour: u32) -> Sale {
        Sale {
            id: id.to_string(),
            status,
            total_amount_cents: 10_000,
            created_at: at(hour),
            items: vec![],
        }
    }

    fn expense(id: &str, hour: u32) -> Expense {
        Expense {
            id: id.to_string(),
            amount_cents: 3000,
            category: "Rent".to_string(),
            description: None,
            date: at(hour),
        }
    }

    fn purchase(id: &str, hour: u32) -> Purchase {
        Purchase {
            id: id.to_string(),
            product_id: "prod-1".to_string(),
            quantity: 5,
            unit_cost_cents: 1000,
            total_cost_cents: 5000,
            supplier_name: None,
            created_at: at(hour),
        }
    }

    #[test]
    fn test_classify_splits_by_tag() {
        let records = vec![
            TransactionRecord::Sale(sale("sale-1", SaleStatus::Completed, 9)),
            TransactionRecord::Expense(expense("exp-1", 10)),
            TransactionRecord::Purchase(purchase("pur-1", 11)),
            TransactionRecord::Sale(sale("sale-2", SaleStatus::Quote, 12)),
        ];

        let classified = classify(records);
        assert_eq!(classified.sales.len(), 2);
        assert_eq!(classified.expenses.len(), 1);
        assert_eq!(classified.purchases.len(), 1);
    }

    #[test]
    fn test_filter_by_status_exact_match() {
        let sales = vec![
            sale("sale-1", SaleStatus::Completed, 9),
            sale("sale-2", SaleStatus::Quote, 10),
            sale("sale-3", SaleStatus::Completed, 11),
        ];

        let completed = filter_by_status(&sales, SaleStatus::Completed);
        assert_eq!(completed.len(), 2);
        assert!(completed.iter().all(|s| s.status == SaleStatus::Completed));

        let quotes = filter_by_status(&sales, SaleStatus::Quote);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].id, "sale-2");
    }

    #[test]
    fn test_timeline_sorts_descending_across_kinds() {
        let records = vec![
            TransactionRecord::Expense(expense("exp-1", 10)),
            TransactionRecord::Sale(sale("sale-1", SaleStatus::Completed, 14)),
            TransactionRecord::Purchase(purchase("pur-1", 8)),
        ];

        let merged = timeline(records);
        let ids: Vec<&str> = merged.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["sale-1", "exp-1", "pur-1"]);
    }

    #[test]
    fn test_timeline_ties_keep_input_order() {
        let records = vec![
            TransactionRecord::Sale(sale("sale-1", SaleStatus::Completed, 9)),
            TransactionRecord::Expense(expense("exp-1", 9)),
        ];

        let merged = timeline(records);
        assert_eq!(merged[0].id(), "sale-1");
        assert_eq!(merged[1].id(), "exp-1");
    }

    #[test]
    fn test_record_kind_strict_parse() {
        assert_eq!("purchase".parse::<RecordKind>().unwrap(), RecordKind::Purchase);
        assert!("refund".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_serialized_records_carry_the_kind_tag() {
        let record = TransactionRecord::Expense(expense("exp-1", 10));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "expense");

        let back: TransactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), RecordKind::Expense);
    }
}
