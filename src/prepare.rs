use crate::columns::{group_columns, ColumnGroups, TagLayout};
use crate::error::{PlotError, Result};
use crate::stats::{ellipticity, normalize_by_sum, relative_ellipticity};
use crate::types::*;
use log::{debug, info};
use polars::lazy::dsl::mean_horizontal;
use polars::prelude::*;
use std::path::{Path, PathBuf};

const PIN_TABLE: &str = "reWrLINE/combined.csv";
const BEND_TABLE: &str = "SerraLINE/bendangle.csv";
const BUBBLE_POS_TABLE: &str = "bubble/base1_counts_pos.csv";
const BUBBLE_NEG_TABLE: &str = "bubble/base1_counts_neg.csv";

const OCCURRENCES: &str = "Occurrences";
const MEAN_POSITIVE: &str = "mean_positive";
const MEAN_NEGATIVE: &str = "mean_negative";

/// Locations of the four tables that make up one experiment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSources {
    pub pin: PathBuf,
    pub bend: PathBuf,
    pub bubble_pos: PathBuf,
    pub bubble_neg: PathBuf,
}

impl TableSources {
    /// Standard layout of an experiment directory
    pub fn under(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        TableSources {
            pin: dir.join(PIN_TABLE),
            bend: dir.join(BEND_TABLE),
            bubble_pos: dir.join(BUBBLE_POS_TABLE),
            bubble_neg: dir.join(BUBBLE_NEG_TABLE),
        }
    }
}

/// Reads a CSV table with a header row into a DataFrame.
///
/// # Errors
/// * Returns `PlotError::Table` if the file is missing or cannot be parsed
pub fn read_table(path: &Path) -> Result<Table> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| PlotError::table(path, e))
}

fn column_names(table: &Table) -> Vec<String> {
    table
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Extracts a column as `f64` values, nulls becoming NaN
pub fn float_column(table: &Table, table_name: &str, column: &str) -> Result<Vec<f64>> {
    let values = table
        .column(column)
        .map_err(|_| PlotError::missing_column(table_name, column))?
        .cast(&DataType::Float64)?;

    Ok(values
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Row-wise mean over the present cells of `columns`; a row with no present
/// cell stays null
fn group_mean(side: Side, columns: &[String]) -> Result<Expr> {
    if columns.is_empty() {
        return Err(PlotError::InvalidInput(format!(
            "empty {} column group",
            side
        )));
    }
    let exprs: Vec<Expr> = columns
        .iter()
        .map(|name| col(name.as_str()).cast(DataType::Float64))
        .collect();
    Ok(mean_horizontal(exprs)?)
}

/// Computes the per-row mean of the positive and negative column groups.
///
/// Empty cells are skipped, so a row averages only the columns that hold a
/// value. A row with no value in a group yields NaN.
///
/// # Returns
/// * `(positive, negative)` mean series, one value per table row
pub fn group_means(table: &Table, groups: &ColumnGroups) -> Result<(Vec<f64>, Vec<f64>)> {
    let positive = group_mean(Side::Positive, &groups.positive)?;
    let negative = group_mean(Side::Negative, &groups.negative)?;

    let means = table
        .clone()
        .lazy()
        .select([positive.alias(MEAN_POSITIVE), negative.alias(MEAN_NEGATIVE)])
        .collect()?;

    Ok((
        float_column(&means, "group means", MEAN_POSITIVE)?,
        float_column(&means, "group means", MEAN_NEGATIVE)?,
    ))
}

fn check_len(series: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(PlotError::shape_mismatch(series, expected, values.len()));
    }
    Ok(())
}

/// Prepares every series of one experiment for plotting.
///
/// Loads the pin, bend and bubble tables under `dir`, averages the tagged
/// columns per side, scores the ellipticity of the pin means and normalizes
/// the bubble counts and pin means into distributions.
///
/// # Arguments
/// * `label` - Display label of the experiment
/// * `dir` - Experiment directory holding the `reWrLINE`, `SerraLINE` and `bubble` tables
/// * `reference` - Scores of the reference experiment; `None` keeps raw scores
///
/// # Errors
/// * `PlotError::Table` if a table cannot be read
/// * `PlotError::MissingColumn` / `PlotError::MissingColumns` for absent columns
/// * `PlotError::AmbiguousColumn` if two columns carry the same tag
/// * `PlotError::ShapeMismatch` if the tables disagree on the row count
pub fn prepare_bundle(
    label: &str,
    dir: impl AsRef<Path>,
    reference: Option<ReferenceScores>,
) -> Result<SeriesBundle> {
    let sources = TableSources::under(dir);

    let pin = read_table(&sources.pin)?;
    let bend = read_table(&sources.bend)?;
    let bubble_pos = read_table(&sources.bubble_pos)?;
    let bubble_neg = read_table(&sources.bubble_neg)?;

    let pin_groups = group_columns(PIN_TABLE, &column_names(&pin), TagLayout::Mixed)?;
    let bend_groups = group_columns(BEND_TABLE, &column_names(&bend), TagLayout::Repeats)?;
    debug!("{}: pin columns {:?}", label, pin_groups);
    debug!("{}: bend columns {:?}", label, bend_groups);

    let (pin_mean_pos, pin_mean_neg) = group_means(&pin, &pin_groups)?;
    let (bend_pos, bend_neg) = group_means(&bend, &bend_groups)?;

    let ellipticity_pos = relative_ellipticity(
        ellipticity(&pin_mean_pos),
        reference.map(|r| r.get(Side::Positive)),
    );
    let ellipticity_neg = relative_ellipticity(
        ellipticity(&pin_mean_neg),
        reference.map(|r| r.get(Side::Negative)),
    );

    let bubble_pos = normalize_by_sum(&float_column(&bubble_pos, BUBBLE_POS_TABLE, OCCURRENCES)?);
    let bubble_neg = normalize_by_sum(&float_column(&bubble_neg, BUBBLE_NEG_TABLE, OCCURRENCES)?);
    let pin_pos = normalize_by_sum(&pin_mean_pos);
    let pin_neg = normalize_by_sum(&pin_mean_neg);

    let rows = pin.height();
    for (series, values) in [
        ("bubble_pos", &bubble_pos),
        ("bubble_neg", &bubble_neg),
        ("bend_pos", &bend_pos),
        ("bend_neg", &bend_neg),
    ] {
        check_len(series, values, rows)?;
    }

    info!(
        "prepared {} ({} positions): ellipticity + {:.4}, - {:.4}",
        label, rows, ellipticity_pos, ellipticity_neg
    );

    Ok(SeriesBundle {
        label: label.to_string(),
        position: (1..=rows as u32).collect(),
        bubble_pos,
        bubble_neg,
        bend_pos,
        bend_neg,
        pin_pos,
        pin_neg,
        ellipticity_pos,
        ellipticity_neg,
        is_reference: false,
    })
}
