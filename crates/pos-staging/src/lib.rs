//! pos-staging
//!
//! Durable order directory: a date-partitioned, file-per-order staging
//! store with two stages per day — `confirmed/` (awaiting checkout,
//! overwrite-style, the crash-recovery surface) and `checkout/`
//! (append-only, time-stamped history).
//!
//! Architectural decisions:
//! - The staging date is an explicit [`DateContext`] value, never ambient
//!   process state; day rollover = constructing a new [`StagingArea`]
//! - Single active writer per date partition; no file locking
//! - Synchronous blocking writes; I/O failures propagate, never caught here
//! - Missing confirmed marker at checkout is fatal (preserves
//!   at-most-one-in-flight per name)

mod area;
mod paths;

pub use area::{ConfirmReceipt, KitchenTicket, RehydratedDay, StagingArea};
pub use paths::{
    checkout_file_name, confirmed_file_name, DateContext, CHECKOUT_EXT, TABLE_EXT, TOGO_EXT,
};
