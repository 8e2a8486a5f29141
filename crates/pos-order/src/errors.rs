//! Error taxonomy for ticket operations.
//!
//! Three of the four kinds are recoverable at the interactive boundary by
//! convention: the UI logs them and the operation simply does not proceed.
//! [`OrderError::PriorityContract`] is a programmer error in the caller and
//! always propagates.

use pos_pricing::ItemError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// An operation that requires a mutable line item received a locked one,
    /// or an otherwise unusable item payload.
    InvalidItem(String),
    /// An operation required a valid, attached, non-empty ticket.
    InvalidOrder(&'static str),
    /// "The currently selected item" was requested with nothing selected.
    /// Normal in interactive use; recovered locally by the UI layer.
    NoSelection,
    /// The caller-supplied priority subset is longer than the ticket being
    /// confirmed. Caller contract violation — the ticket is left unmodified.
    PriorityContract { supplied: usize, ticket_len: usize },
}

impl OrderError {
    /// Recoverable-by-convention kinds: log and stop, no retry needed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, OrderError::PriorityContract { .. })
    }
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderError::InvalidItem(why) => write!(f, "invalid line item: {why}"),
            OrderError::InvalidOrder(why) => write!(f, "invalid order: {why}"),
            OrderError::NoSelection => write!(f, "no line item is selected"),
            OrderError::PriorityContract {
                supplied,
                ticket_len,
            } => write!(
                f,
                "priority subset ({supplied} items) longer than ticket ({ticket_len} items)"
            ),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<ItemError> for OrderError {
    fn from(e: ItemError) -> Self {
        OrderError::InvalidItem(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_priority_contract_is_fatal() {
        assert!(OrderError::NoSelection.is_recoverable());
        assert!(OrderError::InvalidItem("locked".into()).is_recoverable());
        assert!(OrderError::InvalidOrder("empty").is_recoverable());
        assert!(!OrderError::PriorityContract {
            supplied: 3,
            ticket_len: 2
        }
        .is_recoverable());
    }
}
