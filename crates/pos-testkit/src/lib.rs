//! pos-testkit
//!
//! Deterministic fixtures and a disposable staging harness for the
//! cross-crate scenario tests under `tests/`. Nothing here ships to
//! production crates.

use chrono::NaiveDate;
use tempfile::TempDir;

use pos_pricing::{ItemOption, LineItem, OptionRelation, TaxRate};
use pos_staging::{DateContext, StagingArea};

/// The fixed date every scenario runs on (stable paths in assertions).
pub fn scenario_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 29).expect("valid fixture date")
}

/// 8% — the rate used by the worked examples.
pub fn scenario_tax_rate() -> TaxRate {
    TaxRate::from_bps(800)
}

/// Burger $8.00 with one $1.50 add-on option.
pub fn burger_with_bacon() -> LineItem {
    let mut b = LineItem::new("Burger", 800);
    b.set_options(vec![ItemOption::new(
        "Bacon",
        "Toppings",
        150,
        OptionRelation::Add,
    )])
    .expect("draft item is mutable");
    b
}

/// Fries $3.00, no options.
pub fn fries() -> LineItem {
    LineItem::new("Fries", 300)
}

/// A temp-dir staging root pinned to [`scenario_date`].
///
/// `reopen` hands back a fresh [`StagingArea`] over the same root — the
/// scenario equivalent of a process restart: all in-memory state is gone,
/// only the directory tree survives.
pub struct StagingHarness {
    root: TempDir,
    ctx: DateContext,
}

impl StagingHarness {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp staging root"),
            ctx: DateContext::new(scenario_date()),
        }
    }

    pub fn area(&self) -> StagingArea {
        StagingArea::new(self.root.path(), self.ctx)
    }

    /// Simulate a restart: a brand-new handle over the surviving tree.
    pub fn reopen(&self) -> StagingArea {
        StagingArea::new(self.root.path(), self.ctx)
    }

    pub fn ctx(&self) -> DateContext {
        self.ctx
    }
}

impl Default for StagingHarness {
    fn default() -> Self {
        Self::new()
    }
}
