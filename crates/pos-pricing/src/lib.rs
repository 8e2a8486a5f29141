//! pos-pricing
//!
//! Pricing model for the POS order engine: integer-cents money, item
//! options, line items with comp/discount semantics, and ticket totals.
//!
//! Architectural decisions:
//! - All internal amounts are integer cents; `f64` only at the
//!   display/ingest boundary
//! - Tax rates are basis points so round-up-to-the-cent is exact
//! - Comp/discount is a tagged `ItemKind` variant, not a subtype
//! - The confirm lock is a one-way latch enforced by every mutator
//!
//! Pure value logic. No IO, no wall-clock.

mod catalog;
mod item;
mod money;
mod option;

pub use catalog::{MenuCatalog, StaticMenu};
pub use item::{subtotal, total, ItemError, ItemKind, LineItem};
pub use money::{cents_to_price, price_to_cents, tax, Cents, MoneyError, TaxRate, CENTS_PER_UNIT};
pub use option::{ItemOption, OptionRelation};
