//! Order ticket — the per-table / per-take-out aggregate and its lifecycle.
//!
//! # Design
//!
//! A [`OrderTicket`] is an ordered, append-only sequence of
//! [`LineItem`]s. Per-item lifecycle is a two-state latch
//! (`Draft → Confirmed`) driven by [`OrderTicket::confirm`], which enforces:
//!
//! 1. **One-way confirm.** A confirmed item is locked and no longer
//!    editable; there is no unconfirm. Confirmed items can only leave via
//!    [`OrderTicket::clear`] of the whole ticket.
//! 2. **Idempotent repeats.** Items already confirmed are skipped silently,
//!    so calling `confirm` twice converges to the same state.
//! 3. **Priority contract.** A priority subset longer than the ticket is a
//!    caller error ([`OrderError::PriorityContract`]) and leaves the ticket
//!    unmodified.
//!
//! # Edit reconciliation
//!
//! [`OrderTicket::edit_order`] reconciles the stored sequence against a
//! freshly supplied one with a greedy single-pass two-cursor scan. This is
//! deliberately NOT a minimal edit distance: reordering the same items can
//! produce more remove/append churn than strictly necessary. Downstream
//! display code relies on the low churn this scan produces for the common
//! small edits (append, in-place tweak, single removal), so the algorithm is
//! kept as-is rather than replaced with a smarter diff.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use pos_pricing::LineItem;

use crate::errors::OrderError;

/// Reserved take-out separator token. It survives staging-name
/// standardization (which rewrites only `.` and spaces), so the presence of
/// this token in a staged name is what classifies it as take-out.
pub const TAKEOUT_SEPARATOR: &str = "@";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Take-out identity: who ordered, how to reach them, when the session
/// opened. The triple makes same-name walk-ins on the same day distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TakeoutKey {
    pub name: String,
    pub phone: String,
    pub opened_at: DateTime<Utc>,
}

/// Ticket identity: a dine-in table number or a take-out key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderId {
    Table(u32),
    Takeout(TakeoutKey),
}

impl OrderId {
    /// The staging name handed to the order directory. Take-out names embed
    /// [`TAKEOUT_SEPARATOR`]; table names never do.
    pub fn staging_name(&self) -> String {
        match self {
            OrderId::Table(n) => format!("Table {n}"),
            OrderId::Takeout(k) => format!("{}{}{}", k.name, TAKEOUT_SEPARATOR, k.phone),
        }
    }

    /// Parse an identity back from a standardized staged file stem
    /// (underscores where spaces/periods were). `takeout` comes from the
    /// staged file's extension. Returns `None` for stems this engine did not
    /// produce.
    ///
    /// The staged payload is items-only, so a rehydrated take-out session
    /// gets `opened_at` = midnight of the staging date rather than a
    /// fabricated original timestamp.
    pub fn from_staged_stem(stem: &str, takeout: bool, date: NaiveDate) -> Option<OrderId> {
        if takeout {
            let (name, phone) = stem.split_once(TAKEOUT_SEPARATOR)?;
            let opened_at = date.and_hms_opt(0, 0, 0)?.and_utc();
            Some(OrderId::Takeout(TakeoutKey {
                name: name.to_string(),
                phone: phone.to_string(),
                opened_at,
            }))
        } else {
            let n = stem.strip_prefix("Table_")?.parse::<u32>().ok()?;
            Some(OrderId::Table(n))
        }
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderId::Table(n) => write!(f, "table {n}"),
            OrderId::Takeout(k) => write!(f, "take-out {}{}{}", k.name, TAKEOUT_SEPARATOR, k.phone),
        }
    }
}

// ---------------------------------------------------------------------------
// Confirm outcome / edit report
// ---------------------------------------------------------------------------

/// Items newly confirmed by one `confirm` call, partitioned for the kitchen
/// data contract (the print subsystem consumes this; we never call it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmOutcome {
    pub priority: Vec<LineItem>,
    pub regular: Vec<LineItem>,
}

impl ConfirmOutcome {
    pub fn confirmed_count(&self) -> usize {
        self.priority.len() + self.regular.len()
    }
}

/// Churn produced by one `edit_order` reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditReport {
    pub refreshed: usize,
    pub removed: usize,
    pub appended: usize,
}

// ---------------------------------------------------------------------------
// OrderTicket
// ---------------------------------------------------------------------------

/// One open order: identity plus its ordered line items.
///
/// Append-only at the API surface — there is no arbitrary insert or reorder.
/// Option/note "child rows" seen in a UI are a derived view of a parent item
/// (see [`crate::view`]), never independently stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTicket {
    /// Correlation id for logs and staged-snapshot audit; not identity.
    ticket_id: Uuid,
    id: OrderId,
    items: Vec<LineItem>,
}

impl OrderTicket {
    /// A fresh, empty ticket for a newly opened session.
    pub fn new(id: OrderId) -> Self {
        Self {
            ticket_id: Uuid::new_v4(),
            id,
            items: Vec::new(),
        }
    }

    /// Rebuild a ticket from rehydrated items (flags arrive as staged).
    pub fn from_items(id: OrderId, items: Vec<LineItem>) -> Self {
        Self {
            ticket_id: Uuid::new_v4(),
            id,
            items,
        }
    }

    pub fn ticket_id(&self) -> Uuid {
        self.ticket_id
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a line item. The item type is the whole contract: only
    /// `LineItem` values exist at this boundary, so "appending something
    /// else" is unrepresentable.
    pub fn append(&mut self, item: LineItem) {
        self.items.push(item);
    }

    // --- selection surface (UI routing) ---

    /// The "currently selected item" read path. `None` or an out-of-range
    /// index is [`OrderError::NoSelection`] — a normal interactive
    /// condition, recovered by the caller.
    pub fn selected(&self, selection: Option<usize>) -> Result<&LineItem, OrderError> {
        selection
            .and_then(|i| self.items.get(i))
            .ok_or(OrderError::NoSelection)
    }

    /// The mutable selection path. A locked item here is
    /// [`OrderError::InvalidItem`]: the caller asked to mutate something the
    /// kitchen already owns.
    pub fn selected_mut(&mut self, selection: Option<usize>) -> Result<&mut LineItem, OrderError> {
        let item = selection
            .and_then(|i| self.items.get_mut(i))
            .ok_or(OrderError::NoSelection)?;
        if item.is_locked() {
            return Err(OrderError::InvalidItem(format!(
                "'{}' is confirmed and locked",
                item.name()
            )));
        }
        Ok(item)
    }

    // --- lifecycle ---

    /// Confirm every draft item in insertion order, marking the ones that
    /// value-match a not-yet-consumed entry of `priority` as high-priority.
    /// Each priority entry is consumed by at most one item. Items already
    /// confirmed are skipped, so repeat calls are idempotent no-ops.
    ///
    /// # Errors
    /// [`OrderError::InvalidOrder`] on an empty ticket;
    /// [`OrderError::PriorityContract`] when `priority` is longer than the
    /// ticket. Both leave the ticket unmodified.
    pub fn confirm(&mut self, priority: &[LineItem]) -> Result<ConfirmOutcome, OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::InvalidOrder("cannot confirm an empty ticket"));
        }
        if priority.len() > self.items.len() {
            return Err(OrderError::PriorityContract {
                supplied: priority.len(),
                ticket_len: self.items.len(),
            });
        }

        let mut consumed = vec![false; priority.len()];
        let mut outcome = ConfirmOutcome::default();

        for item in &mut self.items {
            if item.is_locked() || item.is_confirmed() {
                continue;
            }
            let hit = priority
                .iter()
                .enumerate()
                .find(|(i, p)| !consumed[*i] && item.same_entry(p))
                .map(|(i, _)| i);
            let high_priority = match hit {
                Some(i) => {
                    consumed[i] = true;
                    true
                }
                None => false,
            };
            item.mark_confirmed(high_priority);
            if high_priority {
                outcome.priority.push(item.clone());
            } else {
                outcome.regular.push(item.clone());
            }
        }

        info!(
            ticket = %self.ticket_id,
            order = %self.id,
            confirmed = outcome.confirmed_count(),
            priority = outcome.priority.len(),
            "ticket confirmed"
        );
        Ok(outcome)
    }

    /// Reconcile the stored sequence with a freshly supplied one.
    ///
    /// Greedy single forward scan with two cursors: on a value match the
    /// stored item is refreshed in place and both cursors advance; otherwise
    /// the stored item is removed and only the stored-side cursor advances.
    /// When the stored side runs out, the remainder of `new_seq` is
    /// appended; when the new side runs out, the remaining stored items are
    /// removed. See the module docs for why this stays greedy.
    pub fn edit_order(&mut self, new_seq: Vec<LineItem>) -> EditReport {
        let mut report = EditReport::default();
        let mut update = 0; // cursor over new_seq
        let mut display = 0; // cursor over self.items

        while update < new_seq.len() && display < self.items.len() {
            if self.items[display].same_entry(&new_seq[update]) {
                self.items[display].refresh_from(&new_seq[update]);
                report.refreshed += 1;
                update += 1;
                display += 1;
            } else {
                self.items.remove(display);
                report.removed += 1;
            }
        }

        if update < new_seq.len() {
            report.appended = new_seq.len() - update;
            self.items.extend(new_seq.into_iter().skip(update));
        } else if display < self.items.len() {
            report.removed += self.items.len() - display;
            self.items.truncate(display);
        }

        report
    }

    /// Empty the ticket, returning the removed items for downstream
    /// archival. Registry detachment is the registry's half of this
    /// operation (`SessionRegistry::close`).
    pub fn clear(&mut self) -> Vec<LineItem> {
        info!(ticket = %self.ticket_id, order = %self.id, items = self.items.len(), "ticket cleared");
        std::mem::take(&mut self.items)
    }
}
