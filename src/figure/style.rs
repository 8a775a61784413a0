//! Fixed visual encoding of the comparison figure.

use super::SeriesKind;
use plotters::style::{RGBColor, BLACK};

pub const FIGURE_WIDTH: u32 = 2600;
pub const ROW_HEIGHT: u32 = 800;

pub const MARGIN_LEFT: u32 = 2;
/// Wide enough for the tick labels of the outermost right-hand axis
pub const MARGIN_RIGHT: u32 = 200;
pub const MARGIN_TOP: u32 = 100;
pub const MARGIN_BOTTOM: u32 = 200;

pub const FONT_FAMILY: &str = "sans-serif";
pub const TICK_FONT: u32 = 40;
pub const TITLE_FONT: u32 = 50;

pub const Y_TICKS: usize = 5;
pub const X_TICK_VALUES: [u32; 3] = [1, 107, 339];

/// Width of the frame drawn around each cell and its bottom axis
pub const FRAME_WIDTH: u32 = 3;

/// Room reserved next to a y axis for tick labels and the axis title
pub const Y_LABEL_AREA: u32 = 180;
/// Room reserved under the bottom row for x tick labels
pub const X_LABEL_AREA: u32 = 70;

pub const SUBPLOT_TITLE_X: [f64; 2] = [0.405, 0.74];
pub const X_TITLE: &str = "Position Along Minicircle";
pub const X_TITLE_POS: (f64, f64) = (0.575, -0.02);

pub const LIGHT_STEEL_BLUE: RGBColor = RGBColor(0xB0, 0xC4, 0xDE);
pub const GREY: RGBColor = RGBColor(0x80, 0x80, 0x80);

pub fn color(kind: SeriesKind) -> RGBColor {
    match kind {
        SeriesKind::Bubble => LIGHT_STEEL_BLUE,
        SeriesKind::Bend => GREY,
        SeriesKind::Pin => BLACK,
    }
}

pub fn line_width(kind: SeriesKind) -> u32 {
    match kind {
        SeriesKind::Bubble => 4,
        SeriesKind::Bend | SeriesKind::Pin => 5,
    }
}

pub fn axis_title(kind: SeriesKind) -> &'static str {
    match kind {
        SeriesKind::Bubble => "Bubble Density",
        SeriesKind::Bend => "Bend Angle",
        SeriesKind::Pin => "Pinning Propensity",
    }
}
