//! Item options (modifiers) and their add/substitute/remove relation.

use serde::{Deserialize, Serialize};

use crate::money::Cents;

/// How an option relates to its parent line item.
///
/// Set by business rule from the catalog's price delta: positive ⇒ `Add`,
/// zero ⇒ `No` (effectively removed from the item), negative ⇒ `Sub`
/// (substitution). The derived `Ord` gives the display ordering: adds first,
/// then substitutions, then removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionRelation {
    Add,
    Sub,
    No,
}

impl OptionRelation {
    /// Classify a catalog price delta into a relation.
    pub fn from_delta(delta: Cents) -> Self {
        if delta > 0 {
            OptionRelation::Add
        } else if delta == 0 {
            OptionRelation::No
        } else {
            OptionRelation::Sub
        }
    }

    /// Price scalar applied to this option's contribution: 1.0 for `Add` and
    /// `Sub`, 0.0 for `No` (a voided option contributes nothing).
    pub fn scalar(&self) -> f64 {
        match self {
            OptionRelation::Add | OptionRelation::Sub => 1.0,
            OptionRelation::No => 0.0,
        }
    }
}

/// One modifier attached to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOption {
    pub name: String,
    pub category: String,
    pub price: Cents,
    pub relation: OptionRelation,
}

impl ItemOption {
    pub fn new<S: Into<String>>(name: S, category: S, price: Cents, relation: OptionRelation) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            relation,
        }
    }

    /// This option's contribution to the parent item's gross price.
    /// A `No` relation dominates: its contribution is always zero.
    pub fn effective_price(&self) -> Cents {
        match self.relation {
            OptionRelation::No => 0,
            OptionRelation::Add | OptionRelation::Sub => self.price,
        }
    }
}

impl PartialOrd for ItemOption {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemOption {
    /// Options sort by relation first, then name.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.relation
            .cmp(&other.relation)
            .then_with(|| self.name.cmp(&other.name))
    }
}
