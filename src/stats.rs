//! Summary statistics over per-position series.
//!
//! Missing values are carried as NaN and skipped by every reduction here, so a
//! gap in one row does not poison the whole score.

use log::warn;
use statrs::statistics::Statistics;

fn present(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

/// Arithmetic mean of the non-NaN values, NaN when there are none
pub fn mean(values: &[f64]) -> f64 {
    present(values).mean()
}

/// Sum of squared deviations of a per-row mean series from its own mean.
///
/// This is the un-normalized population variance: the total is not divided by
/// the number of rows.
pub fn ellipticity(row_means: &[f64]) -> f64 {
    let centre = mean(row_means);
    present(row_means).map(|m| (centre - m) * (centre - m)).sum()
}

/// Expresses a raw ellipticity relative to a reference score.
///
/// A missing or zero reference leaves the raw value untouched.
pub fn relative_ellipticity(raw: f64, reference: Option<f64>) -> f64 {
    match reference {
        Some(r) if r != 0.0 => raw / r,
        _ => raw,
    }
}

/// Divides every value by the sum of the series so it reads as a distribution
pub fn normalize_by_sum(values: &[f64]) -> Vec<f64> {
    let total: f64 = present(values).sum();
    if total == 0.0 {
        warn!("normalizing a series that sums to zero");
    }
    values.iter().map(|v| v / total).collect()
}
