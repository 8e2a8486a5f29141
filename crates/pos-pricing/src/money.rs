//! Integer-cents money representation
//!
//! # Design invariant
//!
//! All amounts on the **pricing decision surface** are represented as `i64`
//! integer cents (1 unit = 100 cents). This eliminates f64 drift in totals —
//! e.g. a subtotal of $12.50 taxed at 8% must yield exactly 100 cents of tax,
//! which `12.50 * 0.08` does not reliably produce in floating point.
//!
//! `f64` conversions are **only** performed at the display/ingest boundary:
//!
//! | Direction                   | Function          | Notes                    |
//! |-----------------------------|-------------------|--------------------------|
//! | internal → receipt/display  | [`cents_to_price`] | Rendering only          |
//! | menu catalog → internal     | [`price_to_cents`] | Parsing / ingestion only |
//!
//! The one sanctioned `f64` inside the engine is the per-item price scalar
//! (1.0 normal, 0.0 comped, fractional for manual discounts); its product
//! with a cents gross is rounded to the nearest cent at the single point of
//! evaluation in `LineItem::price`.
//!
//! Tax rates are basis points (`u32`), so the "tax always rounds UP to the
//! cent" rule is exact integer arithmetic, never a float `ceil`.

/// Scale factor: 1 price unit = 100 cents (2 decimal places).
pub const CENTS_PER_UNIT: i64 = 100;

/// Amount in integer cents. Negative values are legal (discount lines).
pub type Cents = i64;

// ---------------------------------------------------------------------------
// MoneyError
// ---------------------------------------------------------------------------

/// Errors returned by [`price_to_cents`] when the input is not representable.
///
/// Both variants fire in **all** build profiles (debug and release).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Input was `NaN` or infinite. These values indicate a broken upstream
    /// catalog and must not silently propagate into the `i64` representation.
    NotFinite,
    /// Input would overflow `i64` after scaling by [`CENTS_PER_UNIT`].
    OutOfRange,
}

impl std::fmt::Display for MoneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoneyError::NotFinite => write!(f, "price_to_cents: non-finite input (NaN or Inf)"),
            MoneyError::OutOfRange => write!(f, "price_to_cents: price out of i64 range after scaling"),
        }
    }
}

impl std::error::Error for MoneyError {}

// ---------------------------------------------------------------------------
// Wire-boundary conversion functions
// ---------------------------------------------------------------------------

/// Convert integer cents to `f64` for receipt/display rendering.
///
/// **Only call at the display boundary.** Internal amounts stay as `i64`.
pub fn cents_to_price(cents: Cents) -> f64 {
    cents as f64 / CENTS_PER_UNIT as f64
}

/// Convert an `f64` price (e.g. from a menu catalog file) into integer cents.
///
/// Rounds to the nearest cent, half away from zero, to avoid systematic
/// truncation bias.
///
/// # Errors
/// Returns [`MoneyError::NotFinite`] if `price` is `NaN` or infinite.
/// Returns [`MoneyError::OutOfRange`] if `price * CENTS_PER_UNIT` would
/// overflow `i64`.
pub fn price_to_cents(price: f64) -> Result<Cents, MoneyError> {
    if !price.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    let scaled = price * CENTS_PER_UNIT as f64;
    // Guard against f64→i64 cast overflow (Rust cast saturates; we must reject).
    if scaled > i64::MAX as f64 || scaled < i64::MIN as f64 {
        return Err(MoneyError::OutOfRange);
    }
    Ok(scaled.round() as i64)
}

// ---------------------------------------------------------------------------
// TaxRate
// ---------------------------------------------------------------------------

/// Sales tax rate in basis points (1 bp = 0.01%). 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate {
    bps: u32,
}

impl TaxRate {
    pub fn from_bps(bps: u32) -> Self {
        Self { bps }
    }

    pub fn bps(&self) -> u32 {
        self.bps
    }

    /// Fractional rate for display purposes only (e.g. "8%").
    pub fn as_f64(&self) -> f64 {
        self.bps as f64 / 10_000.0
    }
}

/// Tax on a subtotal, rounded UP to the next whole cent — never down.
///
/// Pure integer ceiling division: `ceil(subtotal * bps / 10_000)`. A
/// non-positive subtotal yields zero tax (comped-out or pure-discount
/// tickets do not produce negative tax).
pub fn tax(subtotal: Cents, rate: TaxRate) -> Cents {
    if subtotal <= 0 {
        return 0;
    }
    let numer = subtotal * rate.bps as i64;
    (numer + 9_999) / 10_000
}
