//! # shopkeep-core: Ledger & Aggregation Engine
//!
//! This crate is the **heart** of Shopkeep. Stock levels are never stored:
//! they are derived on demand from an append-only ledger of signed stock
//! movements, and every financial figure on the dashboard is folded out of
//! the same immutable records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Host App                              │   │
//! │  │    Products ──► Billing ──► Inventory ──► Dashboard            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ fetches records, renders views         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopkeep-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │  │   stock   │  │ classify  │  │  report   │  │   │
//! │  │   │ Movements │  │ Derived   │  │ Tagged    │  │ Windows,  │  │   │
//! │  │   │ Planning  │  │ stock,    │  │ records,  │  │ Summary   │  │   │
//! │  │   │           │  │ valuation │  │ timeline  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Storage layer (out of scope)                   │   │
//! │  │   Owns persistence and the transactional boundary around        │   │
//! │  │   {Sale, SaleItems, StockMovements} writes                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, Sale, Purchase, Expense)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ledger`] - Append-only stock movements and movement planning
//! - [`stock`] - Current stock, valuation, low-stock counts
//! - [`classify`] - Tagged record partitioning and the merged timeline
//! - [`report`] - Reporting windows and the financial summary
//! - [`error`] - Domain error types
//! - [`validation`] - Record and field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64), rounding
//!    happens only at display time
//! 4. **Append-only ledger**: movements are never updated or deleted; a
//!    correction is another movement with the opposite sign
//! 5. **Fail fast, fail whole**: one malformed record aborts the whole
//!    aggregation call rather than leaking a silently-wrong total
//!
//! ## Example Usage
//!
//! ```rust
//! use shopkeep_core::ledger::{MovementType, StockMovement};
//! use shopkeep_core::stock::current_stock;
//!
//! let movements = vec![
//!     StockMovement::record("prod-1", 100, MovementType::Purchase, None).unwrap(),
//!     StockMovement::record("prod-1", -30, MovementType::Sale, Some("sale-1")).unwrap(),
//!     StockMovement::record("prod-1", -5, MovementType::Damage, None).unwrap(),
//! ];
//!
//! assert_eq!(current_stock(&movements).unwrap(), 65);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classify;
pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopkeep_core::Money` instead of
// `use shopkeep_core::money::Money`

pub use classify::{classify, filter_by_status, timeline, Classified, RecordKind, TransactionRecord};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{movements_for_purchase, movements_for_sale, MovementType, StockMovement};
pub use money::Money;
pub use report::{summarize, ActivityEntry, ReportRange, Summary};
pub use stock::{current_stock, low_stock_count, stock_value, ProductLedger};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default low-stock threshold, in units.
///
/// ## Business Reason
/// A product whose derived stock falls below this many units shows up in the
/// dashboard's low-stock counter. Callers can pass their own threshold to
/// [`stock::low_stock_count`]; this is only the default, never a hidden
/// constant inside the fold.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Number of entries in the recent-activity feed of a [`report::Summary`].
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
