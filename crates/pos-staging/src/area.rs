//! The order directory: durable, date-partitioned staging for confirmed
//! and checked-out orders.
//!
//! # Design
//!
//! One directory tree per calendar day, created lazily on first touch:
//!
//! ```text
//! root/YYYY/MM/DD/confirmed/   one file per order name   (overwrite-style)
//! root/YYYY/MM/DD/checkout/    one file per checkout event (append-only)
//! ```
//!
//! The confirmed stage is the crash-recovery surface: an order that was
//! confirmed but never checked out before a restart is rebuilt from its
//! staged snapshot by [`StagingArea::rehydrate`], exactly once.
//!
//! Writes are synchronous and blocking; `confirm`/`checkout` return only
//! after the file write completes. `checkout` removes the confirmed marker
//! before writing its own file — the crash window between those two steps
//! is an accepted, narrow risk (there is no transactional rename dance
//! here), and a missing marker at checkout time is a fatal error, which is
//! what keeps at most one order in flight per name.
//!
//! I/O failures are never caught locally: there is no safe partial-write
//! recovery for a staging file, so everything propagates with context.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use tracing::{info, warn};

use pos_pricing::LineItem;

use crate::paths::{checkout_file_name, confirmed_file_name, DateContext, TABLE_EXT, TOGO_EXT};

/// Kitchen-facing data contract produced at confirm time. The print/report
/// subsystem consumes this; the staging area never calls it.
#[derive(Debug, Clone, Default)]
pub struct KitchenTicket {
    pub priority: Vec<LineItem>,
    pub regular: Vec<LineItem>,
}

/// What one `confirm` call produced.
#[derive(Debug, Clone)]
pub struct ConfirmReceipt {
    /// The confirmed-stage file that now holds the snapshot.
    pub path: PathBuf,
    pub kitchen: KitchenTicket,
}

/// Confirmed orders found on disk at startup, keyed by staged file stem.
#[derive(Debug, Clone, Default)]
pub struct RehydratedDay {
    pub tables: BTreeMap<String, Vec<LineItem>>,
    pub takeout: BTreeMap<String, Vec<LineItem>>,
}

impl RehydratedDay {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.takeout.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.tables.len() + self.takeout.len()
    }
}

/// Handle on one day's staging partition. Single active writer per
/// partition by design — no file locking is performed.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
    ctx: DateContext,
}

impl StagingArea {
    /// A staging handle for `ctx`'s date under `root`. Nothing is created
    /// until the first write.
    pub fn new(root: impl Into<PathBuf>, ctx: DateContext) -> Self {
        Self {
            root: root.into(),
            ctx,
        }
    }

    pub fn date_context(&self) -> DateContext {
        self.ctx
    }

    pub fn confirmed_dir(&self) -> PathBuf {
        self.ctx.day_dir(&self.root).join("confirmed")
    }

    pub fn checkout_dir(&self) -> PathBuf {
        self.ctx.day_dir(&self.root).join("checkout")
    }

    /// Stage a confirmed order. The **full** item snapshot (confirmed and
    /// not) is serialized to `confirmed/<standardized-name>`, overwriting
    /// any previous snapshot for that name — confirm is idempotent per
    /// name but NOT additive; re-confirming replaces the staged state. At
    /// most one confirmed-stage file exists per standardized name.
    ///
    /// `priority_items` / `non_priority_items` are passed through as the
    /// kitchen ticket in the receipt; they are not part of the staged
    /// payload.
    pub fn confirm(
        &self,
        name: &str,
        priority_items: &[LineItem],
        non_priority_items: &[LineItem],
        full_order: &[LineItem],
    ) -> Result<ConfirmReceipt> {
        let dir = self.confirmed_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create confirmed dir failed: {}", dir.display()))?;

        let path = dir.join(confirmed_file_name(name));
        let json = serde_json::to_string_pretty(full_order)
            .context("serialize confirmed snapshot failed")?;
        fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("write confirmed snapshot failed: {}", path.display()))?;

        info!(
            name,
            file = %path.display(),
            items = full_order.len(),
            priority = priority_items.len(),
            "order staged as confirmed"
        );
        Ok(ConfirmReceipt {
            path,
            kitchen: KitchenTicket {
                priority: priority_items.to_vec(),
                regular: non_priority_items.to_vec(),
            },
        })
    }

    /// Close out a confirmed order: remove its confirmed-stage marker, then
    /// write the final item list to a uniquely time-stamped file in
    /// `checkout/`. The checkout stage is append-only history — one new
    /// file per checkout event, never overwritten.
    ///
    /// A missing confirmed marker (never confirmed, or already checked out)
    /// is a fatal error: it means the at-most-one-in-flight invariant would
    /// be violated by proceeding.
    pub fn checkout(&self, name: &str, order_list: &[LineItem], time: NaiveTime) -> Result<PathBuf> {
        let marker = self.confirmed_dir().join(confirmed_file_name(name));
        fs::remove_file(&marker)
            .with_context(|| format!("remove confirmed marker failed: {}", marker.display()))?;

        let dir = self.checkout_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create checkout dir failed: {}", dir.display()))?;

        let path = dir.join(checkout_file_name(name, time));
        let json = serde_json::to_string_pretty(order_list)
            .context("serialize checkout snapshot failed")?;
        fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("write checkout snapshot failed: {}", path.display()))?;

        info!(
            name,
            file = %path.display(),
            items = order_list.len(),
            "order checked out"
        );
        Ok(path)
    }

    /// [`StagingArea::checkout`] stamped with the local wall clock.
    pub fn checkout_now(&self, name: &str, order_list: &[LineItem]) -> Result<PathBuf> {
        self.checkout(name, order_list, Local::now().time())
    }

    /// Startup recovery: scan `confirmed/` and rebuild the table / take-out
    /// order maps by deserializing every staged file, classified by
    /// extension. A missing day tree is a fresh day, not an error. Files
    /// with unknown extensions are skipped with a warning and left on disk.
    pub fn rehydrate(&self) -> Result<RehydratedDay> {
        let dir = self.confirmed_dir();
        let mut day = RehydratedDay::default();
        if !dir.exists() {
            return Ok(day);
        }

        for entry in fs::read_dir(&dir)
            .with_context(|| format!("read confirmed dir failed: {}", dir.display()))?
        {
            let entry = entry.context("read confirmed dir entry failed")?;
            let path = entry.path();
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) else {
                warn!(file = %path.display(), "unreadable staged file name; skipping");
                continue;
            };

            let bucket = match ext {
                TABLE_EXT => &mut day.tables,
                TOGO_EXT => &mut day.takeout,
                _ => {
                    warn!(file = %path.display(), "unknown staged extension; skipping");
                    continue;
                }
            };

            let items = read_snapshot(&path)?;
            bucket.insert(stem.to_string(), items);
        }

        info!(
            dir = %dir.display(),
            tables = day.tables.len(),
            takeout = day.takeout.len(),
            "rehydrated confirmed orders"
        );
        Ok(day)
    }
}

fn read_snapshot(path: &Path) -> Result<Vec<LineItem>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read staged snapshot failed: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parse staged snapshot failed: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pos_pricing::{ItemOption, OptionRelation};

    fn ctx() -> DateContext {
        DateContext::new(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap())
    }

    fn burger() -> LineItem {
        let mut b = LineItem::new("Burger", 800);
        b.set_options(vec![ItemOption::new(
            "Bacon",
            "Toppings",
            150,
            OptionRelation::Add,
        )])
        .unwrap();
        b
    }

    #[test]
    fn confirm_creates_day_tree_lazily_and_writes_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path(), ctx());
        assert!(!area.confirmed_dir().exists());

        let items = vec![burger()];
        let receipt = area.confirm("Table 3", &[], &items, &items).unwrap();
        assert!(receipt.path.ends_with("2026/08/29/confirmed/Table_3.table"));
        assert!(receipt.path.exists());
    }

    #[test]
    fn reconfirm_overwrites_not_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path(), ctx());

        area.confirm("Table 3", &[], &[], &[burger()]).unwrap();
        let two = vec![burger(), LineItem::new("Fries", 300)];
        area.confirm("Table 3", &[], &[], &two).unwrap();

        let files: Vec<_> = fs::read_dir(area.confirmed_dir()).unwrap().collect();
        assert_eq!(files.len(), 1, "one confirmed file per name, ever");
        let staged = area.rehydrate().unwrap();
        assert_eq!(staged.tables["Table_3"], two, "second snapshot replaced first");
    }

    #[test]
    fn checkout_removes_marker_and_stamps_history() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path(), ctx());
        let items = vec![burger()];
        area.confirm("Table 3", &[], &items, &items).unwrap();

        let t = NaiveTime::from_hms_opt(20, 15, 33).unwrap();
        let path = area.checkout("Table 3", &items, t).unwrap();
        assert!(path.ends_with("checkout/Table_3_20-15-33.checkout"));
        assert!(!area.confirmed_dir().join("Table_3.table").exists());

        let back: Vec<LineItem> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, items, "checkout payload must round-trip exactly");
    }

    #[test]
    fn double_checkout_is_a_fatal_error() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path(), ctx());
        let items = vec![burger()];
        area.confirm("Table 3", &[], &items, &items).unwrap();

        let t = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        area.checkout("Table 3", &items, t).unwrap();
        let err = area.checkout("Table 3", &items, t);
        assert!(err.is_err(), "marker is gone; second checkout must fail");
    }

    #[test]
    fn checkout_events_accumulate_history() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path(), ctx());
        let items = vec![burger()];

        for (h, name) in [(12, "Table 1"), (13, "Table 2")] {
            area.confirm(name, &[], &items, &items).unwrap();
            area.checkout(name, &items, NaiveTime::from_hms_opt(h, 0, 0).unwrap())
                .unwrap();
        }
        let files: Vec<_> = fs::read_dir(area.checkout_dir()).unwrap().collect();
        assert_eq!(files.len(), 2, "checkout stage is append-only history");
    }

    #[test]
    fn rehydrate_on_fresh_day_is_empty_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path(), ctx());
        let day = area.rehydrate().unwrap();
        assert!(day.is_empty());
    }

    #[test]
    fn rehydrate_classifies_by_extension_and_skips_strays() {
        let tmp = tempfile::tempdir().unwrap();
        let area = StagingArea::new(tmp.path(), ctx());
        area.confirm("Table 3", &[], &[], &[burger()]).unwrap();
        area.confirm("Walk in@555 0100", &[], &[], &[LineItem::new("Fries", 300)])
            .unwrap();
        fs::write(area.confirmed_dir().join("notes.txt"), "not an order").unwrap();

        let day = area.rehydrate().unwrap();
        assert_eq!(day.order_count(), 2);
        assert!(day.tables.contains_key("Table_3"));
        assert!(day.takeout.contains_key("Walk_in@555_0100"));
    }

    #[test]
    fn different_date_contexts_partition_separately() {
        let tmp = tempfile::tempdir().unwrap();
        let day1 = StagingArea::new(tmp.path(), ctx());
        let day2 = StagingArea::new(
            tmp.path(),
            DateContext::new(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()),
        );
        day1.confirm("Table 3", &[], &[], &[burger()]).unwrap();
        day2.confirm("Table 3", &[], &[], &[burger()]).unwrap();

        assert!(day1.confirmed_dir().join("Table_3.table").exists());
        assert!(day2.confirmed_dir().join("Table_3.table").exists());
        assert_ne!(day1.confirmed_dir(), day2.confirmed_dir());
    }
}
