//! Currency rounding and percent-change helpers shared by the ledger and
//! the metrics aggregator.

/// Round to 2 decimal places, half away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to 1 decimal place, used for percent values.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Format an amount with the configured currency symbol, e.g. "$ 12.50".
pub fn fmt_amount(v: f64, currency: &str) -> String {
    format!("{} {:.2}", currency, round2(v))
}

/// Percent change between a current and a previous value.
///
/// A zero previous value would divide by zero, so it is special-cased:
/// any growth from zero reads as 100%, staying at zero reads as 0%.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 { 100.0 } else { 0.0 }
    } else {
        round1((current - previous) / previous * 100.0)
    }
}
