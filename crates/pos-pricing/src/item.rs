//! Line items and their comp/discount pricing semantics.
//!
//! # Design
//!
//! A [`LineItem`] is one orderable menu entry inside a ticket. Its lifecycle
//! flags form a one-way latch: the confirm transition (and only the confirm
//! transition) sets `confirmed` + `locked`, after which every mutator fails
//! with [`ItemError::Locked`]. There is no unlock — a confirmed item can only
//! leave the system by clearing the whole ticket.
//!
//! Comp and discount are a tagged [`ItemKind`] variant on the item, not a
//! subclass hierarchy: `Standard | Comp | Discount`, with an explicit
//! [`LineItem::is_notification`] capability check.
//!
//! # Pricing invariant
//!
//! `price = round((base_price + Σ option.effective_price) × scalar)` in
//! integer cents, with `scalar` clamped to ≤ 1.0 at every write site. A
//! manual discount can only ever reduce a price, never inflate it.

use serde::{Deserialize, Serialize};

use crate::money::{tax, Cents, TaxRate};
use crate::option::ItemOption;

// ---------------------------------------------------------------------------
// ItemError
// ---------------------------------------------------------------------------

/// Errors from line-item mutation and discount math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// Mutation attempted on a locked (confirmed) item. The lock is a
    /// one-way latch; callers must not retry.
    Locked,
    /// `set_discount_price` on an item whose gross is zero. The discount
    /// scalar is a ratio against gross, so a zero basis is a caller
    /// contract violation, not a computable discount.
    ZeroBasis,
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemError::Locked => write!(f, "line item is locked (confirmed); mutation refused"),
            ItemError::ZeroBasis => {
                write!(f, "set_discount_price: item gross is zero, no discount basis")
            }
        }
    }
}

impl std::error::Error for ItemError {}

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

/// Tagged pricing role of a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// A plain menu entry.
    Standard,
    /// Comped: price zeroed with a recorded reason. The item stays on the
    /// ticket and on the kitchen slip.
    Comp { reason: String },
    /// A synthetic adjustment line (negative or positive). Always reported
    /// as a notification item regardless of scalar.
    Discount { message: String },
}

// ---------------------------------------------------------------------------
// LineItem
// ---------------------------------------------------------------------------

/// One orderable entry on a ticket: price, options, notes, stars, and the
/// confirm/lock lifecycle latch.
///
/// Fields are private so the latch cannot be bypassed: all mutation goes
/// through setters that refuse to touch a locked item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    name: String,
    base_price: Cents,
    editable: bool,
    locked: bool,
    confirmed: bool,
    high_priority: bool,
    stars: u8,
    notes: String,
    options: Vec<ItemOption>,
    scalar: f64,
    kind: ItemKind,
}

impl LineItem {
    /// A fresh draft menu item: editable, unlocked, unconfirmed, scalar 1.0.
    pub fn new<S: Into<String>>(name: S, base_price: Cents) -> Self {
        Self {
            name: name.into(),
            base_price,
            editable: true,
            locked: false,
            confirmed: false,
            high_priority: false,
            stars: 0,
            notes: String::new(),
            options: Vec::new(),
            scalar: 1.0,
            kind: ItemKind::Standard,
        }
    }

    /// A synthetic discount line. `adjustment` may be negative (a reduction)
    /// or positive (a surcharge correction); the line always carries its
    /// message and is always a notification item. Discount lines are not
    /// staff-editable.
    pub fn discount_line<S: Into<String>>(name: S, adjustment: Cents, message: S) -> Self {
        let mut item = Self::new(name, adjustment);
        item.editable = false;
        item.kind = ItemKind::Discount {
            message: message.into(),
        };
        item
    }

    // --- read surface ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_price(&self) -> Cents {
        self.base_price
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn is_high_priority(&self) -> bool {
        self.high_priority
    }

    pub fn stars(&self) -> u8 {
        self.stars
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn options(&self) -> &[ItemOption] {
        &self.options
    }

    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Editable means the staff-facing flag is set AND the item is unlocked.
    pub fn is_editable(&self) -> bool {
        self.editable && !self.locked
    }

    /// Comped ⇔ scalar is exactly 0.0 AND a comp reason is recorded.
    pub fn is_comped(&self) -> bool {
        self.scalar == 0.0 && matches!(self.kind, ItemKind::Comp { .. })
    }

    /// Notification items are surfaced to the report/receipt consumers:
    /// discount lines always, comped items while the comp is active.
    pub fn is_notification(&self) -> bool {
        matches!(self.kind, ItemKind::Discount { .. }) || self.is_comped()
    }

    // --- pricing ---

    /// Base price plus all active option contributions, before the scalar.
    pub fn gross(&self) -> Cents {
        self.base_price + self.options.iter().map(|o| o.effective_price()).sum::<Cents>()
    }

    /// Evaluated price in cents: `round(gross × scalar)`.
    pub fn price(&self) -> Cents {
        (self.gross() as f64 * self.scalar).round() as Cents
    }

    /// Recompute the scalar so the item evaluates to `target` cents, clamped
    /// so a discount can only reduce the price (`scalar ≤ 1.0`).
    ///
    /// # Errors
    /// [`ItemError::Locked`] on a confirmed item; [`ItemError::ZeroBasis`]
    /// when the gross is zero (there is no basis to scale — rejected rather
    /// than dividing by zero).
    pub fn set_discount_price(&mut self, target: Cents) -> Result<(), ItemError> {
        self.ensure_unlocked()?;
        let gross = self.gross();
        if gross == 0 {
            return Err(ItemError::ZeroBasis);
        }
        self.scalar = (target as f64 / gross as f64).min(1.0);
        Ok(())
    }

    /// Toggle comp state. `on` zeroes the scalar and records the reason;
    /// `off` restores scalar 1.0 and reverts to a standard item. The comp
    /// state is overwritten, never stacked, so comp-then-uncomp restores the
    /// pre-comp price exactly.
    pub fn comp<S: Into<String>>(&mut self, on: bool, reason: S) -> Result<(), ItemError> {
        self.ensure_unlocked()?;
        if on {
            self.scalar = 0.0;
            self.kind = ItemKind::Comp {
                reason: reason.into(),
            };
        } else {
            self.scalar = 1.0;
            self.kind = ItemKind::Standard;
        }
        Ok(())
    }

    // --- mutators (all refuse a locked item) ---

    pub fn set_name<S: Into<String>>(&mut self, name: S) -> Result<(), ItemError> {
        self.ensure_unlocked()?;
        self.name = name.into();
        Ok(())
    }

    pub fn set_notes<S: Into<String>>(&mut self, notes: S) -> Result<(), ItemError> {
        self.ensure_unlocked()?;
        self.notes = notes.into();
        Ok(())
    }

    pub fn set_stars(&mut self, stars: u8) -> Result<(), ItemError> {
        self.ensure_unlocked()?;
        self.stars = stars;
        Ok(())
    }

    pub fn set_options(&mut self, options: Vec<ItemOption>) -> Result<(), ItemError> {
        self.ensure_unlocked()?;
        self.options = options;
        Ok(())
    }

    // --- lifecycle ---

    /// The one-way confirm latch: confirmed + locked + no longer editable.
    /// Called by the ticket's confirm transition only. Idempotent.
    pub fn mark_confirmed(&mut self, high_priority: bool) {
        if self.locked {
            return;
        }
        self.confirmed = true;
        self.locked = true;
        self.editable = false;
        self.high_priority = high_priority;
    }

    /// Value identity for priority matching and the edit-reconcile scan:
    /// name, base price, and options — lifecycle flags, stars, and notes are
    /// display state and do not participate.
    pub fn same_entry(&self, other: &LineItem) -> bool {
        self.name == other.name
            && self.base_price == other.base_price
            && self.options == other.options
    }

    /// Refresh the mutable display fields from a newer copy of the same
    /// entry. A locked item is left untouched (its snapshot already went to
    /// the kitchen).
    pub fn refresh_from(&mut self, newer: &LineItem) {
        if self.locked {
            return;
        }
        self.notes = newer.notes.clone();
        self.stars = newer.stars;
        self.options = newer.options.clone();
        self.scalar = newer.scalar.min(1.0);
        self.kind = newer.kind.clone();
    }

    fn ensure_unlocked(&self) -> Result<(), ItemError> {
        if self.locked {
            return Err(ItemError::Locked);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ticket totals
// ---------------------------------------------------------------------------

/// Sum of evaluated item prices, in cents.
pub fn subtotal(items: &[LineItem]) -> Cents {
    items.iter().map(|i| i.price()).sum()
}

/// Subtotal plus tax (tax rounds up to the cent; see [`crate::money::tax`]).
pub fn total(items: &[LineItem], rate: TaxRate) -> Cents {
    let sub = subtotal(items);
    sub + tax(sub, rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{ItemOption, OptionRelation};

    fn burger() -> LineItem {
        let mut b = LineItem::new("Burger", 800);
        b.set_options(vec![ItemOption::new(
            "Bacon",
            "Toppings",
            150,
            OptionRelation::Add,
        )])
        .unwrap();
        b
    }

    #[test]
    fn price_is_base_plus_options_times_scalar() {
        let b = burger();
        assert_eq!(b.gross(), 950);
        assert_eq!(b.price(), 950);
    }

    #[test]
    fn voided_option_contributes_nothing() {
        let mut b = burger();
        b.set_options(vec![
            ItemOption::new("Bacon", "Toppings", 150, OptionRelation::Add),
            ItemOption::new("Onions", "Toppings", 75, OptionRelation::No),
        ])
        .unwrap();
        assert_eq!(b.price(), 950);
    }

    #[test]
    fn discount_scalar_is_clamped_to_one() {
        let mut b = burger();
        // Target above gross: scalar must clamp, price cannot inflate.
        b.set_discount_price(2_000).unwrap();
        assert!(b.scalar() <= 1.0);
        assert_eq!(b.price(), 950);
    }

    #[test]
    fn discount_reduces_to_target() {
        let mut b = burger();
        b.set_discount_price(500).unwrap();
        assert_eq!(b.price(), 500);
        assert!(b.scalar() < 1.0);
    }

    #[test]
    fn discount_on_zero_gross_is_rejected() {
        let mut free = LineItem::new("Water", 0);
        assert_eq!(free.set_discount_price(0), Err(ItemError::ZeroBasis));
    }

    #[test]
    fn comp_then_uncomp_restores_price_exactly() {
        let mut b = burger();
        let before = b.price();
        b.comp(true, "dropped tray").unwrap();
        assert_eq!(b.price(), 0);
        assert!(b.is_comped());
        assert!(b.is_notification());
        b.comp(false, "").unwrap();
        assert_eq!(b.price(), before);
        assert!(!b.is_comped());
        assert!(!b.is_notification());
    }

    #[test]
    fn discount_line_is_always_a_notification() {
        let d = LineItem::discount_line("Manager comp", -300, "loyalty voucher");
        assert!(d.is_notification());
        assert_eq!(d.price(), -300);
        assert!(!d.is_editable());
    }

    #[test]
    fn locked_item_refuses_all_mutation() {
        let mut b = burger();
        b.mark_confirmed(false);
        assert!(b.is_locked());
        assert!(b.is_confirmed());
        assert!(!b.is_editable());
        assert_eq!(b.set_name("Cheeseburger"), Err(ItemError::Locked));
        assert_eq!(b.set_notes("no pickles"), Err(ItemError::Locked));
        assert_eq!(b.set_options(vec![]), Err(ItemError::Locked));
        assert_eq!(b.set_discount_price(100), Err(ItemError::Locked));
        assert_eq!(b.comp(true, "x"), Err(ItemError::Locked));
        // Unchanged.
        assert_eq!(b.name(), "Burger");
        assert_eq!(b.price(), 950);
    }

    #[test]
    fn mark_confirmed_is_idempotent_and_keeps_priority() {
        let mut b = burger();
        b.mark_confirmed(true);
        assert!(b.is_high_priority());
        // Second call must not demote the priority flag.
        b.mark_confirmed(false);
        assert!(b.is_high_priority());
    }

    #[test]
    fn refresh_from_skips_locked_items() {
        let mut b = burger();
        b.mark_confirmed(false);
        let mut newer = burger();
        newer.set_notes("extra rare").unwrap();
        b.refresh_from(&newer);
        assert_eq!(b.notes(), "");
    }

    #[test]
    fn same_entry_ignores_lifecycle_and_notes() {
        let a = burger();
        let mut b = burger();
        b.set_notes("rush").unwrap();
        b.mark_confirmed(true);
        assert!(a.same_entry(&b));
        let other = LineItem::new("Fries", 300);
        assert!(!a.same_entry(&other));
    }

    #[test]
    fn subtotal_tax_total_table3_scenario() {
        // Burger $8.00 + $1.50 option, Fries $3.00 → subtotal $12.50,
        // 8% tax = exactly $1.00, total $13.50.
        let items = vec![burger(), LineItem::new("Fries", 300)];
        let rate = TaxRate::from_bps(800);
        assert_eq!(subtotal(&items), 1_250);
        assert_eq!(total(&items, rate), 1_350);
    }

    #[test]
    fn serde_round_trip_preserves_everything() {
        let mut b = burger();
        b.set_notes("no pickles").unwrap();
        b.set_stars(2).unwrap();
        b.comp(true, "spilled").unwrap();
        let json = serde_json::to_string(&b).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
