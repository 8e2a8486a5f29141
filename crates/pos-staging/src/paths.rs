//! Date context and staged-name standardization.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveTime};

use pos_order::TAKEOUT_SEPARATOR;

/// Confirmed-stage file extension for dine-in orders.
pub const TABLE_EXT: &str = "table";
/// Confirmed-stage file extension for take-out orders.
pub const TOGO_EXT: &str = "togo";
/// Checkout-stage file extension.
pub const CHECKOUT_EXT: &str = "checkout";

/// The staging date, passed explicitly into the order directory.
///
/// The directory never watches the wall clock: the caller refreshes the
/// context once per logical day (constructing a new [`crate::StagingArea`]
/// with it), so there is no hidden global date state that mutates on
/// rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateContext {
    date: NaiveDate,
}

impl DateContext {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Today per the local wall clock. Convenience for hosts; tests pass
    /// explicit dates.
    pub fn today() -> Self {
        Self {
            date: Local::now().date_naive(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `root/YYYY/MM/DD` for this context's date.
    pub fn day_dir(&self, root: &Path) -> PathBuf {
        use chrono::Datelike;
        root.join(format!("{:04}", self.date.year()))
            .join(format!("{:02}", self.date.month()))
            .join(format!("{:02}", self.date.day()))
    }
}

/// Standardize a confirmed-stage file name: periods and spaces become
/// underscores; the extension classifies the order, `.togo` when the
/// take-out separator appears in the original name, else `.table`.
pub fn confirmed_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c == '.' || c == ' ' { '_' } else { c })
        .collect();
    let ext = if name.contains(TAKEOUT_SEPARATOR) {
        TOGO_EXT
    } else {
        TABLE_EXT
    };
    format!("{stem}.{ext}")
}

/// Checkout-stage file name: spaces become underscores, suffixed with a
/// time-of-day stamp so every checkout event gets its own file.
pub fn checkout_file_name(name: &str, time: NaiveTime) -> String {
    use chrono::Timelike;
    let stem: String = name
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!(
        "{stem}_{:02}-{:02}-{:02}.{CHECKOUT_EXT}",
        time.hour(),
        time.minute(),
        time.second()
    )
}
