//! # Validation Module
//!
//! Record and field validation for the ledger and its aggregations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host app (TypeScript)                                         │
//! │  ├── Basic form checks (empty, length)                                  │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                            │
//! │  ├── Shape contracts (non-empty ids, non-zero quantities)               │
//! │  └── Signing convention per movement type                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage layer                                                 │
//! │  └── NOT NULL / UNIQUE / foreign key constraints                        │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregations call the record-level validators (`validate_movement`,
//! `validate_sale`, ...) on every input record before folding. One bad
//! record fails the whole call; this module never coerces or drops.

use crate::error::ValidationError;
use crate::ledger::{MovementType, StockMovement};
use crate::types::{Expense, Purchase, Sale};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product reference.
///
/// Ids are opaque to the core; the only shape requirement is non-emptiness.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }
    Ok(())
}

/// Validates a transaction quantity (sale item or purchase).
///
/// Quantities on transactions are always positive; the signed form lives
/// only on stock movements.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a monetary amount that must not be negative (prices, costs).
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a stock movement's shape and signing convention.
///
/// ## Rules
/// - `product_id` must be non-empty
/// - `quantity` must be non-zero
/// - Sale and Damage movements must be negative
/// - Purchase and Return movements must be positive
/// - Adjustment may carry either sign (the caller decides direction)
///
/// Business legality (e.g. resulting stock going negative) is deliberately
/// NOT checked: oversold and backorder states must stay representable.
pub fn validate_movement(movement: &StockMovement) -> ValidationResult<()> {
    validate_product_id(&movement.product_id)?;

    if movement.quantity == 0 {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must not be zero".to_string(),
        });
    }

    match movement.movement_type {
        MovementType::Sale | MovementType::Damage => {
            if movement.quantity > 0 {
                return Err(ValidationError::MustBeNegative {
                    field: "quantity".to_string(),
                });
            }
        }
        MovementType::Purchase | MovementType::Return => {
            if movement.quantity < 0 {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                });
            }
        }
        MovementType::Adjustment => {}
    }

    Ok(())
}

/// Validates a sale and all of its line items.
pub fn validate_sale(sale: &Sale) -> ValidationResult<()> {
    if sale.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    validate_amount_cents("total_amount", sale.total_amount_cents)?;

    for item in &sale.items {
        validate_product_id(&item.product_id)?;
        validate_quantity(item.quantity)?;
        validate_amount_cents("price_at_sale", item.price_at_sale_cents)?;
        validate_amount_cents("cost_at_sale", item.cost_at_sale_cents)?;
    }

    Ok(())
}

/// Validates an expense record.
pub fn validate_expense(expense: &Expense) -> ValidationResult<()> {
    if expense.amount_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    if expense.category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }
    Ok(())
}

/// Validates a purchase record.
pub fn validate_purchase(purchase: &Purchase) -> ValidationResult<()> {
    validate_product_id(&purchase.product_id)?;
    validate_quantity(purchase.quantity)?;
    validate_amount_cents("unit_cost", purchase.unit_cost_cents)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
