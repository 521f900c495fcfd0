//! # Stock Aggregator
//!
//! Derives stock figures from a product's movement ledger. Nothing here is
//! stored: every number is recomputed from the movements on each call, so
//! there is no cached stock column to drift out of sync.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::ledger::StockMovement;
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_movement;

// =============================================================================
// Product Ledger
// =============================================================================

/// A product paired with its full movement ledger, as fetched by the
/// storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductLedger {
    pub product: Product,
    pub movements: Vec<StockMovement>,
}

impl ProductLedger {
    /// Derived stock for this product.
    pub fn current_stock(&self) -> CoreResult<i64> {
        current_stock(&self.movements)
    }
}

// =============================================================================
// Aggregations
// =============================================================================

/// Current stock: the sum of signed quantities over the movements.
///
/// Order-independent, and an empty ledger is simply 0 (not an error).
/// Every movement is validated first; one bad record fails the whole call.
///
/// ## Example
/// ```rust
/// use shopkeep_core::ledger::{MovementType, StockMovement};
/// use shopkeep_core::stock::current_stock;
///
/// let movements = vec![
///     StockMovement::record("prod-1", 100, MovementType::Purchase, None).unwrap(),
///     StockMovement::record("prod-1", -30, MovementType::Sale, None).unwrap(),
///     StockMovement::record("prod-1", -5, MovementType::Damage, None).unwrap(),
/// ];
/// assert_eq!(current_stock(&movements).unwrap(), 65);
/// assert_eq!(current_stock(&[]).unwrap(), 0);
/// ```
pub fn current_stock(movements: &[StockMovement]) -> CoreResult<i64> {
    let mut total = 0i64;
    for movement in movements {
        validate_movement(movement).map_err(|source| CoreError::InvalidRecord {
            kind: "movement",
            id: movement.id.clone(),
            source,
        })?;
        total += movement.quantity;
    }
    Ok(total)
}

/// Total stock valuation: Σ stock × cost price over products with positive
/// stock.
///
/// Products with zero or negative stock contribute nothing - an oversold
/// product must not subtract from the valuation. A product that was never
/// purchased (no cost price) values at zero.
pub fn stock_value(ledgers: &[ProductLedger]) -> CoreResult<Money> {
    let mut value = Money::zero();
    for ledger in ledgers {
        let stock = ledger.current_stock()?;
        if stock > 0 {
            value += ledger.product.cost_price().multiply_quantity(stock);
        }
    }
    Ok(value)
}

/// Counts products whose derived stock is below `threshold`.
///
/// The threshold is a parameter; [`crate::DEFAULT_LOW_STOCK_THRESHOLD`] is
/// the conventional default. A product with no movements has stock 0 and
/// counts as low under any positive threshold.
pub fn low_stock_count(ledgers: &[ProductLedger], threshold: i64) -> CoreResult<usize> {
    let mut count = 0;
    for ledger in ledgers {
        if ledger.current_stock()? < threshold {
            count += 1;
        }
    }
    Ok(count)
}

// =============================================================================
// Unit Tests
// =============================================================================
