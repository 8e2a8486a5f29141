//! The worked end-to-end example: Table 3 orders a burger with a bacon
//! option and fries; totals come out exact, confirming stages one file,
//! checking out removes it and leaves exactly one time-stamped history
//! file containing both items.

use chrono::NaiveTime;
use pos_order::{OrderId, OrderTicket};
use pos_pricing::{subtotal, tax, total, LineItem};
use pos_testkit::{burger_with_bacon, fries, scenario_tax_rate, StagingHarness};

#[test]
fn table3_totals_confirm_then_checkout() -> anyhow::Result<()> {
    let mut ticket = OrderTicket::new(OrderId::Table(3));
    ticket.append(burger_with_bacon());
    ticket.append(fries());

    // Burger $8.00 + $1.50 option + Fries $3.00 = $12.50; 8% tax rounds to
    // exactly $1.00; total $13.50.
    let rate = scenario_tax_rate();
    assert_eq!(subtotal(ticket.items()), 1_250);
    assert_eq!(tax(subtotal(ticket.items()), rate), 100);
    assert_eq!(total(ticket.items(), rate), 1_350);

    let outcome = ticket.confirm(&[])?;
    assert_eq!(outcome.confirmed_count(), 2);

    let harness = StagingHarness::new();
    let area = harness.area();
    let name = ticket.id().staging_name();
    let receipt = area.confirm(&name, &outcome.priority, &outcome.regular, ticket.items())?;
    assert!(receipt.path.ends_with("confirmed/Table_3.table"));
    assert!(receipt.path.exists());

    let when = NaiveTime::from_hms_opt(21, 7, 45).unwrap();
    let history = area.checkout(&name, ticket.items(), when)?;

    assert!(
        !area.confirmed_dir().join("Table_3.table").exists(),
        "confirmed marker must be gone after checkout"
    );
    assert!(history.ends_with("checkout/Table_3_21-07-45.checkout"));
    let files: Vec<_> = std::fs::read_dir(area.checkout_dir())?.collect();
    assert_eq!(files.len(), 1, "exactly one checkout file for one event");

    let staged: Vec<LineItem> = serde_json::from_str(&std::fs::read_to_string(&history)?)?;
    assert_eq!(staged, ticket.items(), "checkout payload holds both items, exactly");
    Ok(())
}
