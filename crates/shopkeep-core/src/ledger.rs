//! # Movement Ledger
//!
//! The append-only event log every stock figure derives from.
//!
//! ## Signing Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stock Movement Signs                               │
//! │                                                                         │
//! │   purchase    +quantity   stock arrives from a supplier                 │
//! │   return      +quantity   customer brings goods back                    │
//! │   sale        -quantity   stock leaves with a customer                  │
//! │   damage      -quantity   stock written off                             │
//! │   adjustment  ±quantity   manual correction, caller decides sign        │
//! │                                                                         │
//! │   current stock = Σ quantity over the product's movements               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Append-Only Invariant
//! A movement is never updated or deleted. This module exposes no mutation
//! API at all: a stock correction is a new offsetting movement. The storage
//! collaborator must uphold the same rule (once a movement is returned from
//! a fetch, it never changes).
//!
//! ## Write-Side Planning
//! The core performs no writes, but it does define what the written data
//! must look like. [`movements_for_sale`] and [`movements_for_purchase`]
//! produce the exact movement set a transaction must persist; the storage
//! collaborator is responsible for inserting them atomically with the
//! transaction itself (a sale without its movements is an inconsistent
//! ledger).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Purchase, Sale, SaleStatus};
use crate::validation::{validate_movement, validate_purchase, validate_sale};

// =============================================================================
// Movement Type
// =============================================================================

/// The reason a quantity of stock moved.
///
/// Parsing is strict: an unknown string is a [`ValidationError`], never a
/// silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Stock bought in; quantity is positive.
    Purchase,
    /// Stock sold; quantity is negative.
    Sale,
    /// Customer return; quantity is positive.
    Return,
    /// Manual correction; quantity may carry either sign.
    Adjustment,
    /// Write-off; quantity is negative.
    Damage,
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MovementType::Purchase => "purchase",
            MovementType::Sale => "sale",
            MovementType::Return => "return",
            MovementType::Adjustment => "adjustment",
            MovementType::Damage => "damage",
        };
        write!(f, "{s}")
    }
}

impl FromStr for MovementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(MovementType::Purchase),
            "sale" => Ok(MovementType::Sale),
            "return" => Ok(MovementType::Return),
            "adjustment" => Ok(MovementType::Adjustment),
            "damage" => Ok(MovementType::Damage),
            _ => Err(ValidationError::NotAllowed {
                field: "movement_type".to_string(),
                allowed: ["purchase", "sale", "return", "adjustment", "damage"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Stock Movement
// =============================================================================

/// A single signed quantity delta against one product's stock.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockMovement {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The product this movement affects.
    pub product_id: String,

    /// Signed quantity delta. See the module docs for the convention.
    pub quantity: i64,

    pub movement_type: MovementType,

    /// Optional link to the originating transaction (sale or purchase id).
    /// Informational only.
    pub reference_id: Option<String>,

    /// Immutable creation timestamp, used for ordering and bucketing.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    /// Records a new movement.
    ///
    /// The caller pre-signs `quantity` per the convention; this constructor
    /// validates the shape and the sign but never business legality -
    /// a movement that drives stock negative is accepted (oversold and
    /// backorder states are real).
    ///
    /// ## Example
    /// ```rust
    /// use shopkeep_core::ledger::{MovementType, StockMovement};
    ///
    /// let movement =
    ///     StockMovement::record("prod-1", -3, MovementType::Sale, Some("sale-9")).unwrap();
    /// assert_eq!(movement.quantity, -3);
    ///
    /// // Wrong sign for the type fails fast
    /// assert!(StockMovement::record("prod-1", 3, MovementType::Sale, None).is_err());
    /// ```
    pub fn record(
        product_id: &str,
        quantity: i64,
        movement_type: MovementType,
        reference_id: Option<&str>,
    ) -> CoreResult<Self> {
        let movement = StockMovement {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            movement_type,
            reference_id: reference_id.map(str::to_string),
            created_at: Utc::now(),
        };
        validate_movement(&movement)?;
        Ok(movement)
    }
}

// =============================================================================
// Write-Side Planning
// =============================================================================

/// Plans the stock movements a sale must persist.
///
/// - A `Completed` sale yields exactly one movement per line item with
///   `quantity = -|item.quantity|`, type `sale`, `reference_id = sale.id`.
/// - A `Quote` yields no movements at all - quotes are stock-neutral.
///
/// The storage collaborator must insert these in the same transaction as
/// the sale and its items.
pub fn movements_for_sale(sale: &Sale) -> CoreResult<Vec<StockMovement>> {
    validate_sale(sale).map_err(|source| CoreError::InvalidRecord {
        kind: "sale",
        id: sale.id.clone(),
        source,
    })?;

    match sale.status {
        SaleStatus::Quote => Ok(Vec::new()),
        SaleStatus::Completed => sale
            .items
            .iter()
            .map(|item| {
                StockMovement::record(
                    &item.product_id,
                    -item.quantity.abs(),
                    MovementType::Sale,
                    Some(&sale.id),
                )
            })
            .collect(),
    }
}

/// Plans the single positive stock movement a purchase must persist.
///
/// The cost-price overwrite that accompanies it lives on
/// [`Purchase::apply_cost`]; both belong in the purchase's transaction.
pub fn movements_for_purchase(purchase: &Purchase) -> CoreResult<StockMovement> {
    validate_purchase(purchase).map_err(|source| CoreError::InvalidRecord {
        kind: "purchase",
        id: purchase.id.clone(),
        source,
    })?;

    StockMovement::record(
        &purchase.product_id,
        purchase.quantity,
        MovementType::Purchase,
        Some(&purchase.id),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleItem;

    fn two_item_sale(status: SaleStatus) -> Sale {
        Sale {
            id: "sale-1".to_string(),
            status,
            total_amount_cents: 12_000,
            created_at: Utc::now(),
            items: vec![
                SaleItem {
                    product_id: "prod-1".to_string(),
                    quantity: 2,
                    price_at_sale_cents: 5000,
                    cost_at_sale_cents: 2000,
                },
                SaleItem {
                    product_id: "prod-2".to_string(),
                    quantity: 1,
                    price_at_sale_cents: 2000,
                    cost_at_sale_cents: 2000,
                },
            ],
        }
    }

    #[test]
    fn test_record_validates_shape() {
        assert!(StockMovement::record("prod-1", 100, MovementType::Purchase, None).is_ok());
        assert!(StockMovement::record("", 100, MovementType::Purchase, None).is_err());
        assert!(StockMovement::record("prod-1", 0, MovementType::Adjustment, None).is_err());
    }

    #[test]
    fn test_completed_sale_yields_one_movement_per_item() {
        let sale = two_item_sale(SaleStatus::Completed);
        let movements = movements_for_sale(&sale).unwrap();

        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].quantity, -2);
        assert_eq!(movements[1].quantity, -1);
        for movement in &movements {
            assert_eq!(movement.movement_type, MovementType::Sale);
            assert_eq!(movement.reference_id.as_deref(), Some("sale-1"));
        }
    }

    #[test]
    fn test_quote_yields_no_movements() {
        let quote = two_item_sale(SaleStatus::Quote);
        assert!(movements_for_sale(&quote).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_sale_fails_whole_call() {
        let mut sale = two_item_sale(SaleStatus::Completed);
        sale.items[1].quantity = 0;

        let err = movements_for_sale(&sale).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidRecord { kind: "sale", ref id, .. } if id == "sale-1"
        ));
    }

    #[test]
    fn test_purchase_movement_is_positive_and_linked() {
        let purchase = Purchase::new("prod-1", 50, 800, None).unwrap();
        let movement = movements_for_purchase(&purchase).unwrap();

        assert_eq!(movement.quantity, 50);
        assert_eq!(movement.movement_type, MovementType::Purchase);
        assert_eq!(movement.reference_id.as_deref(), Some(purchase.id.as_str()));
    }

    #[test]
    fn test_movement_type_strict_parse() {
        assert_eq!("damage".parse::<MovementType>().unwrap(), MovementType::Damage);
        assert!(matches!(
            "transfer".parse::<MovementType>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_movement_type_display_round_trips() {
        for t in [
            MovementType::Purchase,
            MovementType::Sale,
            MovementType::Return,
            MovementType::Adjustment,
            MovementType::Damage,
        ] {
            assert_eq!(t.to_string().parse::<MovementType>().unwrap(), t);
        }
    }
}
