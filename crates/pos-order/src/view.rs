//! Derived presentation rows for a ticket.
//!
//! The UI renders options and notes as child rows under their parent line
//! item, but those children are never independently stored, appended, or
//! removed — they are regenerated from the parent's current options/notes
//! every time this function is called. The item sequence in
//! [`OrderTicket`] stays the single source of truth.

use pos_pricing::{Cents, OptionRelation};

use crate::ticket::OrderTicket;

/// One display row. `item` is the index of the owning line item in the
/// ticket's sequence; child rows are addressable only through their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketRow {
    Item {
        item: usize,
        label: String,
        price: Cents,
        confirmed: bool,
        high_priority: bool,
        notification: bool,
    },
    OptionLine {
        item: usize,
        label: String,
    },
    NoteLine {
        item: usize,
        note: String,
    },
}

/// Regenerate the full row view for a ticket.
pub fn ticket_rows(ticket: &OrderTicket) -> Vec<TicketRow> {
    let mut rows = Vec::new();
    for (idx, item) in ticket.items().iter().enumerate() {
        rows.push(TicketRow::Item {
            item: idx,
            label: item.name().to_string(),
            price: item.price(),
            confirmed: item.is_confirmed(),
            high_priority: item.is_high_priority(),
            notification: item.is_notification(),
        });
        for opt in item.options() {
            let prefix = match opt.relation {
                OptionRelation::Add => "+",
                OptionRelation::Sub => "sub",
                OptionRelation::No => "no",
            };
            rows.push(TicketRow::OptionLine {
                item: idx,
                label: format!("{prefix} {}", opt.name),
            });
        }
        if !item.notes().is_empty() {
            rows.push(TicketRow::NoteLine {
                item: idx,
                note: item.notes().to_string(),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::OrderId;
    use pos_pricing::{ItemOption, LineItem};

    #[test]
    fn rows_regenerate_children_from_parent_state() {
        let mut t = OrderTicket::new(OrderId::Table(2));
        let mut burger = LineItem::new("Burger", 800);
        burger
            .set_options(vec![ItemOption::new(
                "Bacon",
                "Toppings",
                150,
                OptionRelation::Add,
            )])
            .unwrap();
        burger.set_notes("rare").unwrap();
        t.append(burger);

        let rows = ticket_rows(&t);
        assert_eq!(rows.len(), 3);
        assert!(matches!(&rows[0], TicketRow::Item { item: 0, price: 950, .. }));
        assert!(matches!(&rows[1], TicketRow::OptionLine { item: 0, label } if label == "+ Bacon"));
        assert!(matches!(&rows[2], TicketRow::NoteLine { item: 0, note } if note == "rare"));

        // Mutating the parent and regenerating reflects the change; no
        // stale child state exists anywhere.
        t.selected_mut(Some(0)).unwrap().set_notes("").unwrap();
        let rows = ticket_rows(&t);
        assert_eq!(rows.len(), 2);
    }
}
