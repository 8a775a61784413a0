use polars::prelude::*;
use std::fmt;

/// A loaded simulation table (pin signal, bend angle or bubble counts)
pub type Table = DataFrame;

/// Which half of the tag range a column (and a figure column) belongs to.
///
/// Tags above the midpoint are `Positive` and are drawn in the left figure
/// column; tags below it are `Negative` and drawn on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Positive,
    Negative,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Positive, Side::Negative];

    /// Relation sign used in subplot titles
    pub fn relation(&self) -> &'static str {
        match self {
            Side::Positive => ">",
            Side::Negative => "<",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Positive => write!(f, "positive"),
            Side::Negative => write!(f, "negative"),
        }
    }
}

/// Ellipticity scores of the reference experiment, used as denominators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceScores {
    pub positive: f64,
    pub negative: f64,
}

impl ReferenceScores {
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Positive => self.positive,
            Side::Negative => self.negative,
        }
    }
}

/// All series prepared for one experiment.
///
/// Every position-indexed series has `position.len()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBundle {
    pub label: String,
    pub position: Vec<u32>,
    pub bubble_pos: Vec<f64>,
    pub bubble_neg: Vec<f64>,
    pub bend_pos: Vec<f64>,
    pub bend_neg: Vec<f64>,
    pub pin_pos: Vec<f64>,
    pub pin_neg: Vec<f64>,
    pub ellipticity_pos: f64,
    pub ellipticity_neg: f64,
    pub is_reference: bool,
}

/// Borrowed view of one side of a bundle
#[derive(Debug, Clone, Copy)]
pub struct SideSeries<'a> {
    pub bubble: &'a [f64],
    pub bend: &'a [f64],
    pub pin: &'a [f64],
    pub ellipticity: f64,
}

impl SeriesBundle {
    pub fn side(&self, side: Side) -> SideSeries<'_> {
        match side {
            Side::Positive => SideSeries {
                bubble: &self.bubble_pos,
                bend: &self.bend_pos,
                pin: &self.pin_pos,
                ellipticity: self.ellipticity_pos,
            },
            Side::Negative => SideSeries {
                bubble: &self.bubble_neg,
                bend: &self.bend_neg,
                pin: &self.pin_neg,
                ellipticity: self.ellipticity_neg,
            },
        }
    }

    pub fn reference_scores(&self) -> ReferenceScores {
        ReferenceScores {
            positive: self.ellipticity_pos,
            negative: self.ellipticity_neg,
        }
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }
}
