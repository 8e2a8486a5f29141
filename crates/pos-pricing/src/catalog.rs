//! Catalog boundary for menu lookups.
//!
//! This module defines **only** the read-only lookup trait the engine
//! consumes. Concrete catalogs (database-backed, file-backed, a hard-coded
//! menu) live with the host application; the one implementation here is the
//! in-memory catalog used by tests and small deployments.

use crate::item::LineItem;
use crate::option::ItemOption;

/// Read-only menu lookup: available line items and options by category.
///
/// Lookups return fresh draft values — a catalog never hands out items that
/// are already confirmed or locked.
pub trait MenuCatalog {
    /// Item categories, in display order.
    fn categories(&self) -> Vec<String>;
    /// Draft line items available under a category.
    fn items_in(&self, category: &str) -> Vec<LineItem>;
    /// Options applicable to items of a category.
    fn options_in(&self, category: &str) -> Vec<ItemOption>;
}

/// A fixed in-memory menu.
#[derive(Debug, Clone, Default)]
pub struct StaticMenu {
    entries: Vec<(String, Vec<LineItem>, Vec<ItemOption>)>,
}

impl StaticMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category with its items and options. Categories keep insertion
    /// order.
    pub fn with_category<S: Into<String>>(
        mut self,
        name: S,
        items: Vec<LineItem>,
        options: Vec<ItemOption>,
    ) -> Self {
        self.entries.push((name.into(), items, options));
        self
    }
}

impl MenuCatalog for StaticMenu {
    fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|(c, _, _)| c.clone()).collect()
    }

    fn items_in(&self, category: &str) -> Vec<LineItem> {
        self.entries
            .iter()
            .find(|(c, _, _)| c == category)
            .map(|(_, items, _)| items.clone())
            .unwrap_or_default()
    }

    fn options_in(&self, category: &str) -> Vec<ItemOption> {
        let mut options = self
            .entries
            .iter()
            .find(|(c, _, _)| c == category)
            .map(|(_, _, opts)| opts.clone())
            .unwrap_or_default();
        options.sort();
        options
    }
}
