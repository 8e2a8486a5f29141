//! pos-order
//!
//! Order aggregate for the POS engine: the per-table / per-take-out ticket
//! state machine (draft → confirmed, one-way), the greedy edit
//! reconciliation, the derived row view, and the in-memory session
//! registry.
//!
//! Architectural decisions:
//! - Confirm is a one-way latch; there is no unconfirm transition
//! - Repeat confirms are idempotent no-ops
//! - An oversized priority subset is a caller contract violation
//! - Child rows (options/notes) are derived view state, never stored
//! - Single logical thread of control; the registry is not thread-safe
//!   by design

mod errors;
mod registry;
mod ticket;
mod view;

pub use errors::OrderError;
pub use registry::{AdoptReport, SessionRegistry};
pub use ticket::{
    ConfirmOutcome, EditReport, OrderId, OrderTicket, TakeoutKey, TAKEOUT_SEPARATOR,
};
pub use view::{ticket_rows, TicketRow};
