//! # Domain Types
//!
//! Core domain records for the ledger and its aggregations.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  price_cents    │   │  status         │   │  quantity (+)   │       │
//! │  │  cost_price     │   │  total_amount   │   │  unit_cost      │       │
//! │  │  (NO stock!)    │   │  items[]        │   │  total_cost     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Expense      │   │   SaleStatus    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  amount_cents   │   │  Completed      │                             │
//! │  │  category       │   │  Quote          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product's stock level is deliberately absent from [`Product`]: it is a
//! derived attribute, always recomputed from the movement ledger (see
//! [`crate::stock::current_stock`]). Persisting it as an independently
//! mutable column is the one mistake this data model exists to prevent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_purchase;

// =============================================================================
// Product
// =============================================================================

/// A product in the shop's catalog.
///
/// Note there is no stock field here. Current stock is always the sum of the
/// product's movement ledger; see [`crate::stock`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form category label ("Beverages", "Hardware", ...).
    pub category: String,

    /// Unit of measure shown next to quantities ("pcs", "kg", ...).
    pub unit: String,

    /// Selling price in cents.
    pub price_cents: i64,

    /// Last known purchase unit cost in cents.
    ///
    /// Overwritten by every purchase (last cost wins - no weighted
    /// averaging). `None` until the first purchase is recorded.
    pub cost_price_cents: Option<i64>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the last known unit cost as Money, zero if never purchased.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_cents(self.cost_price_cents.unwrap_or(0))
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction.
///
/// Both variants are terminal. A quote never mutates into a completed sale;
/// converting one means creating a new completed [`Sale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Finalized transaction; deducts stock via one movement per item.
    Completed,
    /// Non-binding draft; MUST NOT produce any stock movement.
    Quote,
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleStatus::Completed => write!(f, "completed"),
            SaleStatus::Quote => write!(f, "quote"),
        }
    }
}

impl FromStr for SaleStatus {
    type Err = ValidationError;

    /// Strict parse: unknown values fail rather than defaulting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(SaleStatus::Completed),
            "quote" => Ok(SaleStatus::Quote),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["completed".to_string(), "quote".to_string()],
            }),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction: one or more line items and a total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub status: SaleStatus,
    /// Total charged in cents.
    pub total_amount_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Cost of goods sold for this sale: Σ quantity × cost-at-sale.
    pub fn cogs(&self) -> Money {
        self.items.iter().map(SaleItem::line_cost).sum()
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
///
/// Uses the snapshot pattern: both the selling price and the unit cost are
/// frozen at the time of sale, so later price or cost changes never rewrite
/// historical revenue or COGS.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItem {
    pub product_id: String,
    /// Quantity sold (positive; the ledger movement carries the sign).
    pub quantity: i64,
    /// Unit selling price in cents at time of sale (frozen).
    pub price_at_sale_cents: i64,
    /// Unit cost in cents at time of sale (frozen).
    pub cost_at_sale_cents: i64,
}

impl SaleItem {
    /// Revenue for this line (price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_at_sale_cents).multiply_quantity(self.quantity)
    }

    /// Cost for this line (cost × quantity).
    #[inline]
    pub fn line_cost(&self) -> Money {
        Money::from_cents(self.cost_at_sale_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A stock purchase from a supplier.
///
/// Every purchase produces exactly one positive stock movement (see
/// [`crate::ledger::movements_for_purchase`]) and overwrites the product's
/// `cost_price_cents` via [`Purchase::apply_cost`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub id: String,
    pub product_id: String,
    /// Units bought (always positive).
    pub quantity: i64,
    /// Unit cost in cents.
    pub unit_cost_cents: i64,
    /// quantity × unit_cost, precomputed at creation.
    pub total_cost_cents: i64,
    pub supplier_name: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Creates a purchase, computing `total_cost = quantity × unit_cost`.
    ///
    /// ## Example
    /// ```rust
    /// use shopkeep_core::types::Purchase;
    ///
    /// let purchase = Purchase::new("prod-1", 50, 800, Some("Acme Supply")).unwrap();
    /// assert_eq!(purchase.total_cost_cents, 40_000); // $400.00
    /// ```
    pub fn new(
        product_id: &str,
        quantity: i64,
        unit_cost_cents: i64,
        supplier_name: Option<&str>,
    ) -> CoreResult<Self> {
        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            unit_cost_cents,
            total_cost_cents: quantity * unit_cost_cents,
            supplier_name: supplier_name.map(str::to_string),
            created_at: Utc::now(),
        };
        validate_purchase(&purchase)?;
        Ok(purchase)
    }

    /// Returns the total cost as Money.
    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_cents(self.total_cost_cents)
    }

    /// Overwrites the product's cost price with this purchase's unit cost.
    ///
    /// Last cost wins: no weighted averaging, by documented policy.
    pub fn apply_cost(&self, product: &mut Product) {
        product.cost_price_cents = Some(self.unit_cost_cents);
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A financial ledger entry with no stock effect.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    pub id: String,
    /// Amount spent in cents (always positive).
    pub amount_cents: i64,
    /// Expense category ("Rent", "Utilities", ...).
    pub category: String,
    pub description: Option<String>,
    /// When the expense occurred. This is the merge key for the timeline,
    /// where sales and purchases use `created_at`.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
