use super::style::{self, FONT_FAMILY};
use super::{Anchor, AxisSide, Canvas, Cell, Figure, SeriesKind, YAxis};
use crate::error::{PlotError, Result};
use crate::pdf::PdfBackend;
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;

/// Pixel rectangle of a cell's plotting area
#[derive(Debug, Clone, Copy)]
struct PlotRect {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl PlotRect {
    fn of(canvas: &Canvas, cell: &Cell) -> Self {
        let left = canvas.paper_x(cell.x_axis.domain.0);
        let right = canvas.paper_x(cell.x_axis.domain.1);
        let top = canvas.paper_y(cell.domain.1);
        let bottom = canvas.paper_y(cell.domain.0);
        PlotRect {
            left,
            top,
            width: (right - left).max(1),
            height: (bottom - top).max(1),
        }
    }
}

fn x_range(cell: &Cell) -> Range<i32> {
    let (lo, hi) = cell.x_extent();
    let (lo, hi) = (lo as i32, hi as i32);
    if hi > lo {
        lo..hi
    } else {
        lo..lo + 1
    }
}

fn draw_traces<DB: DrawingBackend>(plot: &DrawingArea<DB, Shift>, cell: &Cell) -> Result<()> {
    let x = x_range(cell);

    for trace in &cell.traces {
        let axis = cell.y_axis(trace.y_axis).ok_or_else(|| {
            PlotError::InvalidInput(format!("trace refers to unknown y axis {}", trace.y_axis))
        })?;
        let mut chart = ChartBuilder::on(plot)
            .build_cartesian_2d(x.clone(), axis.range.lo..axis.range.hi)
            .map_err(PlotError::render)?;

        let points: Vec<(i32, f64)> = trace
            .points
            .iter()
            .filter(|(_, y)| y.is_finite())
            .map(|&(x, y)| (x as i32, y))
            .collect();
        let color = style::color(trace.kind);
        let line = color.stroke_width(style::line_width(trace.kind));

        let drawn = match trace.kind {
            SeriesKind::Bubble => {
                let baseline = 0.0f64.clamp(axis.range.lo, axis.range.hi);
                chart.draw_series(
                    AreaSeries::new(points, baseline, color.filled()).border_style(line),
                )
            }
            SeriesKind::Bend | SeriesKind::Pin => chart.draw_series(LineSeries::new(points, line)),
        };
        drawn.map_err(PlotError::render)?;
    }

    Ok(())
}

fn draw_y_axis<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    rect: PlotRect,
    axis: &YAxis,
) -> Result<()> {
    let (strip_left, strip_width) = canvas.y_label_strip(axis.position, axis.side);
    let area = (strip_width - 1).max(0);
    let position = match axis.side {
        AxisSide::Left => LabelAreaPosition::Left,
        AxisSide::Right => LabelAreaPosition::Right,
    };

    let strip = root
        .clone()
        .shrink((strip_left, rect.top), (strip_width, rect.height));
    let mut chart = ChartBuilder::on(&strip)
        .set_label_area_size(position, area)
        .build_cartesian_2d(0..1, axis.range.lo..axis.range.hi)
        .map_err(PlotError::render)?;

    let color = style::color(axis.kind);
    let line = if axis.framed {
        BLACK.stroke_width(style::FRAME_WIDTH)
    } else {
        TRANSPARENT.stroke_width(1)
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .disable_x_axis()
        .y_labels(style::Y_TICKS)
        .y_label_style((FONT_FAMILY, style::TICK_FONT).into_font().color(&color))
        .axis_style(line);
    if let Some(title) = axis.title {
        mesh.y_desc(title)
            .axis_desc_style((FONT_FAMILY, style::TITLE_FONT).into_font().color(&color));
    }
    mesh.draw().map_err(PlotError::render)
}

fn draw_x_axis<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    rect: PlotRect,
    cell: &Cell,
) -> Result<()> {
    let x = x_range(cell);
    let ticks: Vec<i32> = cell
        .x_axis
        .tick_values
        .iter()
        .map(|&t| t as i32)
        .filter(|t| (x.start..=x.end).contains(t))
        .collect();

    let label_area = style::X_LABEL_AREA as i32;
    let strip = root
        .clone()
        .shrink((rect.left, rect.top), (rect.width, rect.height + label_area));
    let mut chart = ChartBuilder::on(&strip)
        .set_label_area_size(LabelAreaPosition::Bottom, label_area)
        .build_cartesian_2d(x.with_key_points(ticks), 0.0..1.0)
        .map_err(PlotError::render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_label_style((FONT_FAMILY, style::TICK_FONT).into_font().color(&BLACK))
        .axis_style(BLACK.stroke_width(style::FRAME_WIDTH))
        .draw()
        .map_err(PlotError::render)
}

fn draw_cell<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    cell: &Cell,
) -> Result<()> {
    let rect = PlotRect::of(canvas, cell);
    debug!("row {} {} cell at {:?}", cell.row, cell.side, rect);

    let plot = root
        .clone()
        .shrink((rect.left, rect.top), (rect.width, rect.height));
    draw_traces(&plot, cell)?;

    for axis in &cell.y_axes {
        draw_y_axis(root, canvas, rect, axis)?;
        if axis.framed {
            plot.draw(&Rectangle::new(
                [(0, 0), (rect.width - 1, rect.height - 1)],
                BLACK.stroke_width(style::FRAME_WIDTH),
            ))
            .map_err(PlotError::render)?;
        }
    }

    if cell.x_axis.show_tick_labels {
        draw_x_axis(root, rect, cell)?;
    }
    Ok(())
}

fn draw_annotation<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    annotation: &super::Annotation,
) -> Result<()> {
    let v_pos = match annotation.anchor {
        Anchor::Above => VPos::Bottom,
        Anchor::Below => VPos::Top,
    };
    let font = (FONT_FAMILY, style::TITLE_FONT)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, v_pos));
    let at = (canvas.paper_x(annotation.x), canvas.paper_y(annotation.y));

    root.draw(&Text::new(annotation.text.as_str(), at, font))
        .map_err(PlotError::render)
}

/// Draws the whole figure onto `root`, which must span `figure.canvas`
pub fn draw_figure<DB: DrawingBackend>(
    figure: &Figure,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    root.fill(&WHITE).map_err(PlotError::render)?;

    for cell in &figure.cells {
        draw_cell(root, &figure.canvas, cell)?;
    }
    for title in &figure.titles {
        draw_annotation(root, &figure.canvas, title)?;
    }
    draw_annotation(root, &figure.canvas, &figure.x_title)
}

/// Renders the figure into a PDF file at `path`
pub fn render_pdf(figure: &Figure, path: &Path) -> Result<()> {
    let root = PdfBackend::new(path, figure.canvas.size()).into_drawing_area();
    draw_figure(figure, &root)?;
    root.present().map_err(PlotError::render)
}

/// Renders the figure into an in-memory PDF document
pub fn render_pdf_bytes(figure: &Figure) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let root = PdfBackend::with_buffer(&mut buffer, figure.canvas.size()).into_drawing_area();
        draw_figure(figure, &root)?;
        root.present().map_err(PlotError::render)?;
    }
    Ok(buffer)
}

/// Writes the figure to `path` once per pass; the last write is the one that
/// stays on disk.
pub fn export(figure: &Figure, path: &Path, passes: u32) -> Result<()> {
    for pass in 1..=passes {
        render_pdf(figure, path)?;
        info!("wrote {} (pass {}/{})", path.display(), pass, passes);
    }
    Ok(())
}
