//! Session registry — open sessions by table number / take-out identity.
//!
//! # Problem
//!
//! Modifier edits arrive from the UI addressed to "table 3" or to a
//! take-out identity; something has to route them to the right
//! [`OrderTicket`]. After a restart, confirmed-but-not-checked-out orders
//! come back from the staging directory keyed only by their staged file
//! stems and must be reattached to live sessions.
//!
//! # Solution
//!
//! `SessionRegistry` is the lightweight in-memory store mapping
//!
//! ```text
//! table number        →  OrderTicket
//! take-out key        →  OrderTicket
//! ```
//!
//! Callers must:
//! 1. Call [`SessionRegistry::open_table`] / [`SessionRegistry::open_takeout`]
//!    when a session starts (get-or-create).
//! 2. Route edits through [`SessionRegistry::ticket_mut`].
//! 3. Call [`SessionRegistry::close`] when a ticket is cleared or checked
//!    out, to detach its identity.
//!
//! # Thread-safety
//! `SessionRegistry` is not `Sync`. It is owned by a single controller on
//! one logical thread; if you ever need concurrent access, wrap it in a
//! `Mutex` — synchronization is deliberately the caller's responsibility.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use pos_pricing::LineItem;

use crate::errors::OrderError;
use crate::ticket::{OrderId, OrderTicket, TakeoutKey};

/// Counts from one rehydration adoption pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdoptReport {
    pub tables: usize,
    pub takeout: usize,
    /// Staged stems that did not parse back to an identity (left on disk,
    /// skipped here).
    pub skipped: usize,
}

/// In-memory session map. Deterministic iteration order (BTreeMap) so logs
/// and tests are stable.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    tables: BTreeMap<u32, OrderTicket>,
    takeout: BTreeMap<TakeoutKey, OrderTicket>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the ticket for a dine-in table.
    pub fn open_table(&mut self, table: u32) -> &mut OrderTicket {
        self.tables
            .entry(table)
            .or_insert_with(|| OrderTicket::new(OrderId::Table(table)))
    }

    /// Get-or-create the ticket for a take-out session.
    pub fn open_takeout(&mut self, key: TakeoutKey) -> &mut OrderTicket {
        self.takeout
            .entry(key.clone())
            .or_insert_with(|| OrderTicket::new(OrderId::Takeout(key)))
    }

    pub fn ticket(&self, id: &OrderId) -> Option<&OrderTicket> {
        match id {
            OrderId::Table(n) => self.tables.get(n),
            OrderId::Takeout(k) => self.takeout.get(k),
        }
    }

    pub fn ticket_mut(&mut self, id: &OrderId) -> Option<&mut OrderTicket> {
        match id {
            OrderId::Table(n) => self.tables.get_mut(n),
            OrderId::Takeout(k) => self.takeout.get_mut(k),
        }
    }

    /// Like [`SessionRegistry::ticket`], but an absent/detached session is
    /// [`OrderError::InvalidOrder`] — for call sites that require an
    /// attached aggregate rather than probing for one.
    pub fn require_ticket(&self, id: &OrderId) -> Result<&OrderTicket, OrderError> {
        self.ticket(id)
            .ok_or(OrderError::InvalidOrder("no open session for this identity"))
    }

    pub fn require_ticket_mut(&mut self, id: &OrderId) -> Result<&mut OrderTicket, OrderError> {
        self.ticket_mut(id)
            .ok_or(OrderError::InvalidOrder("no open session for this identity"))
    }

    /// Detach a session, returning its ticket (e.g. to archive items after
    /// clear or checkout). Unknown ids return `None`.
    pub fn close(&mut self, id: &OrderId) -> Option<OrderTicket> {
        match id {
            OrderId::Table(n) => self.tables.remove(n),
            OrderId::Takeout(k) => self.takeout.remove(k),
        }
    }

    pub fn open_sessions(&self) -> usize {
        self.tables.len() + self.takeout.len()
    }

    pub fn table_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.tables.keys().copied()
    }

    pub fn takeout_keys(&self) -> impl Iterator<Item = &TakeoutKey> {
        self.takeout.keys()
    }

    /// Reattach rehydrated orders (staged stem → item sequence, as returned
    /// by the order directory at startup). Stems that fail to parse are
    /// skipped with a warning — the staged file stays on disk untouched.
    pub fn adopt_rehydrated(
        &mut self,
        tables: BTreeMap<String, Vec<LineItem>>,
        takeout: BTreeMap<String, Vec<LineItem>>,
        date: NaiveDate,
    ) -> AdoptReport {
        let mut report = AdoptReport::default();

        for (stem, items) in tables {
            match OrderId::from_staged_stem(&stem, false, date) {
                Some(OrderId::Table(n)) => {
                    self.tables
                        .insert(n, OrderTicket::from_items(OrderId::Table(n), items));
                    report.tables += 1;
                }
                _ => {
                    warn!(stem, "staged table order stem did not parse; skipping");
                    report.skipped += 1;
                }
            }
        }

        for (stem, items) in takeout {
            match OrderId::from_staged_stem(&stem, true, date) {
                Some(OrderId::Takeout(key)) => {
                    let id = OrderId::Takeout(key.clone());
                    self.takeout.insert(key, OrderTicket::from_items(id, items));
                    report.takeout += 1;
                }
                _ => {
                    warn!(stem, "staged take-out stem did not parse; skipping");
                    report.skipped += 1;
                }
            }
        }

        report
    }
}
