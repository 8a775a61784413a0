use crate::error::{PlotError, Result};
use crate::types::Side;

/// Gap between neighbouring rows, as a fraction of the paper height
pub const VERTICAL_SPACING: f64 = 0.03;

/// Fractional padding added on both ends of an autoscaled range
const RANGE_PADDING: f64 = 0.05;

/// Axis identifiers claimed by one figure row.
///
/// Row `r` of `n` owns x axes `2r-1, 2r` and y axes `4r-3..=4r`. The pin
/// overlays are numbered after every primary y axis of the grid, two per row,
/// so no id is shared between rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisIds {
    pub x: [usize; 2],
    pub primary: [usize; 4],
    pub overlay: [usize; 2],
}

/// The axes used by one cell of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAxes {
    pub x: usize,
    pub bubble: usize,
    pub bend: usize,
    pub pin: usize,
}

impl AxisIds {
    pub fn cell(&self, side: Side) -> CellAxes {
        match side {
            Side::Positive => CellAxes {
                x: self.x[0],
                bubble: self.primary[0],
                bend: self.primary[1],
                pin: self.overlay[0],
            },
            Side::Negative => CellAxes {
                x: self.x[1],
                bubble: self.primary[2],
                bend: self.primary[3],
                pin: self.overlay[1],
            },
        }
    }

    /// Every y axis id of the row
    pub fn y(&self) -> impl Iterator<Item = usize> + '_ {
        self.primary.iter().chain(self.overlay.iter()).copied()
    }
}

/// Computes the axis ids of a 1-based `row` in a grid of `total_rows` rows.
///
/// # Errors
/// * `PlotError::InvalidParameter` if `row` is not within `1..=total_rows`
pub fn axis_ids(row: usize, total_rows: usize) -> Result<AxisIds> {
    if row == 0 || row > total_rows {
        return Err(PlotError::invalid_parameter(
            "row",
            row,
            format!("must be within 1..={}", total_rows),
        ));
    }

    let overlay_base = 4 * total_rows + 2 * (row - 1);
    Ok(AxisIds {
        x: [2 * row - 1, 2 * row],
        primary: [4 * row - 3, 4 * row - 2, 4 * row - 1, 4 * row],
        overlay: [overlay_base + 1, overlay_base + 2],
    })
}

/// Vertical paper domain `(bottom, top)` of a 1-based row, row 1 on top
pub fn row_domain(row: usize, total_rows: usize) -> (f64, f64) {
    let n = total_rows as f64;
    let height = (1.0 - VERTICAL_SPACING * (n - 1.0)) / n;
    let top = 1.0 - (row as f64 - 1.0) * (height + VERTICAL_SPACING);
    (top - height, top)
}

/// Horizontal paper domain of the cell drawn for `side`
pub fn x_domain(side: Side) -> (f64, f64) {
    match side {
        Side::Positive => (0.24, 0.55),
        Side::Negative => (0.58, 0.89),
    }
}

/// Value range of a y axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub lo: f64,
    pub hi: f64,
}

impl ValueRange {
    /// Autoscales to the finite values with 5% padding. Filled traces keep
    /// zero as their lower bound when all values are non-negative.
    pub fn fit(values: &[f64], from_zero: bool) -> Self {
        let (mut lo, mut hi) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if lo > hi {
            return ValueRange { lo: 0.0, hi: 1.0 };
        }
        if from_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if hi == lo {
            let half = if lo == 0.0 { 1.0 } else { lo.abs() / 2.0 };
            return ValueRange {
                lo: lo - half,
                hi: hi + half,
            };
        }

        let pad = (hi - lo) * RANGE_PADDING;
        if !(from_zero && lo == 0.0) {
            lo -= pad;
        }
        hi += pad;
        ValueRange { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}
