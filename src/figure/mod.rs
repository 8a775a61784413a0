//! Comparison figure: one row per experiment, positive side on the left and
//! negative side on the right.
//!
//! ```text
//!   SeriesBundle x N
//!        │  compose
//!        ▼
//!   ┌────────┐   Cells with axis ids, domains, ranges and traces
//!   │ Figure │
//!   └────────┘
//!        │  render (plotters on PdfBackend)
//!        ▼
//!      .pdf
//! ```

pub mod axes;
pub mod render;
pub mod style;

pub use axes::{axis_ids, row_domain, x_domain, AxisIds, CellAxes, ValueRange};
pub use render::{draw_figure, export, render_pdf, render_pdf_bytes};

use crate::error::{PlotError, Result};
use crate::types::{SeriesBundle, Side};
use log::debug;

/// The three quantities overlaid in every cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Bubble,
    Bend,
    Pin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Left,
    Right,
}

/// Where an annotation sits relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Above,
    Below,
}

/// Pixel canvas of the figure and the paper area inside its margins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn for_rows(rows: usize) -> Self {
        Canvas {
            width: style::FIGURE_WIDTH,
            height: style::ROW_HEIGHT * rows as u32,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel column of a horizontal paper fraction
    pub fn paper_x(&self, frac: f64) -> i32 {
        let span = (self.width - style::MARGIN_LEFT - style::MARGIN_RIGHT) as f64;
        (style::MARGIN_LEFT as f64 + frac * span).round() as i32
    }

    /// Horizontal pixel extent `(left, width)` of the tick label strip of a y
    /// axis drawn at paper fraction `position`, clipped to the canvas. The
    /// strip includes the one pixel column of the axis line.
    pub fn y_label_strip(&self, position: f64, side: AxisSide) -> (i32, i32) {
        let at = self.paper_x(position);
        let area = style::Y_LABEL_AREA as i32;
        let (left, right) = match side {
            AxisSide::Left => (at - area, at + 1),
            AxisSide::Right => (at - 1, at + area),
        };
        let (left, right) = (left.max(0), right.min(self.width as i32));
        (left, (right - left).max(1))
    }

    /// Pixel row of a vertical paper fraction, measured from the bottom
    pub fn paper_y(&self, frac: f64) -> i32 {
        let span = (self.height - style::MARGIN_TOP - style::MARGIN_BOTTOM) as f64;
        (self.height as f64 - style::MARGIN_BOTTOM as f64 - frac * span).round() as i32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct XAxis {
    pub id: usize,
    pub domain: (f64, f64),
    pub tick_values: Vec<u32>,
    pub show_tick_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    pub id: usize,
    pub kind: SeriesKind,
    pub title: Option<&'static str>,
    pub side: AxisSide,
    /// Horizontal paper position of the axis line
    pub position: f64,
    /// Axis this one is drawn over, for the free-floating axes
    pub overlaying: Option<usize>,
    /// Whether the cell frame is drawn in this axis' line style
    pub framed: bool,
    pub range: ValueRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub kind: SeriesKind,
    pub x_axis: usize,
    pub y_axis: usize,
    pub points: Vec<(u32, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub side: Side,
    /// Vertical paper domain `(bottom, top)`
    pub domain: (f64, f64),
    pub x_axis: XAxis,
    pub y_axes: Vec<YAxis>,
    pub traces: Vec<Trace>,
}

impl Cell {
    pub fn y_axis(&self, id: usize) -> Option<&YAxis> {
        self.y_axes.iter().find(|axis| axis.id == id)
    }

    /// Inclusive span of positions covered by the traces
    pub fn x_extent(&self) -> (u32, u32) {
        let (lo, hi) = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|&(x, _)| x))
            .fold((u32::MAX, u32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        if lo > hi {
            (1, 1)
        } else {
            (lo, hi)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
}

/// In-memory description of the whole figure, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub canvas: Canvas,
    pub rows: usize,
    pub cells: Vec<Cell>,
    pub titles: Vec<Annotation>,
    pub x_title: Annotation,
}

impl Figure {
    pub fn cell(&self, row: usize, side: Side) -> Option<&Cell> {
        self.cells.iter().find(|c| c.row == row && c.side == side)
    }

    /// Every y axis id in the figure, in cell order
    pub fn y_axis_ids(&self) -> Vec<usize> {
        self.cells
            .iter()
            .flat_map(|c| c.y_axes.iter().map(|a| a.id))
            .collect()
    }
}

/// Title of one cell; the reference experiment is shown with unit ellipticity
pub fn subplot_title(bundle: &SeriesBundle, side: Side) -> String {
    let score = if bundle.is_reference {
        "1".to_string()
    } else {
        format!("{:.2}", bundle.side(side).ellipticity)
    };
    format!("{}: σ {} 0, p = {}", bundle.label, side.relation(), score)
}

fn points(position: &[u32], values: &[f64]) -> Vec<(u32, f64)> {
    position.iter().copied().zip(values.iter().copied()).collect()
}

fn build_cell(bundle: &SeriesBundle, ids: &AxisIds, row: usize, rows: usize, side: Side) -> Cell {
    let axes = ids.cell(side);
    let series = bundle.side(side);
    let domain = x_domain(side);

    // Free axes sit further out from the plot on the cell's outer side.
    let (axis_side, bubble_pos, bend_pos, pin_pos) = match side {
        Side::Positive => (AxisSide::Left, domain.0, 0.14, 0.08),
        Side::Negative => (AxisSide::Right, domain.1, 0.95, 1.0),
    };
    let title = |kind| match side {
        Side::Positive => Some(style::axis_title(kind)),
        Side::Negative => None,
    };

    let y_axes = vec![
        YAxis {
            id: axes.bubble,
            kind: SeriesKind::Bubble,
            title: title(SeriesKind::Bubble),
            side: axis_side,
            position: bubble_pos,
            overlaying: None,
            framed: true,
            range: ValueRange::fit(series.bubble, true),
        },
        YAxis {
            id: axes.bend,
            kind: SeriesKind::Bend,
            title: title(SeriesKind::Bend),
            side: axis_side,
            position: bend_pos,
            overlaying: Some(axes.bubble),
            framed: false,
            range: ValueRange::fit(series.bend, false),
        },
        YAxis {
            id: axes.pin,
            kind: SeriesKind::Pin,
            title: title(SeriesKind::Pin),
            side: axis_side,
            position: pin_pos,
            overlaying: Some(axes.bubble),
            framed: false,
            range: ValueRange::fit(series.pin, false),
        },
    ];

    let traces = [
        (SeriesKind::Bubble, axes.bubble, series.bubble),
        (SeriesKind::Bend, axes.bend, series.bend),
        (SeriesKind::Pin, axes.pin, series.pin),
    ]
    .into_iter()
    .map(|(kind, y_axis, values)| Trace {
        kind,
        x_axis: axes.x,
        y_axis,
        points: points(&bundle.position, values),
    })
    .collect();

    Cell {
        row,
        side,
        domain: row_domain(row, rows),
        x_axis: XAxis {
            id: axes.x,
            domain,
            tick_values: style::X_TICK_VALUES.to_vec(),
            show_tick_labels: row == rows,
        },
        y_axes,
        traces,
    }
}

/// Lays out one figure row per bundle, in the given order.
///
/// # Errors
/// * `PlotError::InvalidInput` if `bundles` is empty
pub fn compose(bundles: &[SeriesBundle]) -> Result<Figure> {
    if bundles.is_empty() {
        return Err(PlotError::InvalidInput("no series to plot".into()));
    }

    let rows = bundles.len();
    let mut cells = Vec::with_capacity(rows * 2);
    let mut titles = Vec::with_capacity(rows * 2);

    for (idx, bundle) in bundles.iter().enumerate() {
        let row = idx + 1;
        let ids = axis_ids(row, rows)?;
        debug!("row {} ({}): axes {:?}", row, bundle.label, ids);

        let (_, top) = row_domain(row, rows);
        for (col, side) in Side::ALL.into_iter().enumerate() {
            cells.push(build_cell(bundle, &ids, row, rows, side));
            titles.push(Annotation {
                text: subplot_title(bundle, side),
                x: style::SUBPLOT_TITLE_X[col],
                y: top,
                anchor: Anchor::Above,
            });
        }
    }

    Ok(Figure {
        canvas: Canvas::for_rows(rows),
        rows,
        cells,
        titles,
        x_title: Annotation {
            text: style::X_TITLE.to_string(),
            x: style::X_TITLE_POS.0,
            y: style::X_TITLE_POS.1,
            anchor: Anchor::Below,
        },
    })
}
