//! Priority designations flow from the confirm transition into the kitchen
//! data contract, and an oversized priority subset is rejected before
//! anything is staged or mutated.

use pos_order::{OrderError, OrderId, OrderTicket};
use pos_testkit::{burger_with_bacon, fries, StagingHarness};

#[test]
fn priority_subset_partitions_the_kitchen_ticket() -> anyhow::Result<()> {
    let mut ticket = OrderTicket::new(OrderId::Table(9));
    ticket.append(burger_with_bacon());
    ticket.append(fries());

    let outcome = ticket.confirm(&[fries()])?;
    assert_eq!(outcome.priority.len(), 1);
    assert_eq!(outcome.regular.len(), 1);
    assert_eq!(outcome.priority[0].name(), "Fries");

    let harness = StagingHarness::new();
    let receipt = harness.area().confirm(
        &ticket.id().staging_name(),
        &outcome.priority,
        &outcome.regular,
        ticket.items(),
    )?;
    assert_eq!(receipt.kitchen.priority.len(), 1);
    assert_eq!(receipt.kitchen.regular.len(), 1);
    assert_eq!(receipt.kitchen.priority[0].name(), "Fries");
    Ok(())
}

#[test]
fn oversized_priority_subset_stops_the_whole_confirm() {
    let mut ticket = OrderTicket::new(OrderId::Table(9));
    ticket.append(burger_with_bacon());

    let err = ticket
        .confirm(&[burger_with_bacon(), fries(), fries()])
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::PriorityContract {
            supplied: 3,
            ticket_len: 1
        }
    );
    assert!(!err.is_recoverable(), "caller bug, must propagate");
    assert!(
        ticket.items().iter().all(|i| !i.is_confirmed()),
        "nothing may confirm on a contract violation"
    );
}
