use seqdep_plot::error::PlotError;
use seqdep_plot::figure::{self, axis_ids, style, AxisSide, SeriesKind, ValueRange};
use seqdep_plot::pdf::PdfBackend;
use seqdep_plot::types::{SeriesBundle, Side};
use std::collections::HashSet;
use std::path::Path;

fn bundle(label: &str, is_reference: bool) -> SeriesBundle {
    SeriesBundle {
        label: label.to_string(),
        position: vec![1, 2, 3, 4],
        bubble_pos: vec![0.1, 0.2, 0.3, 0.4],
        bubble_neg: vec![0.4, 0.3, 0.2, 0.1],
        bend_pos: vec![10.0, 12.0, 11.0, 9.0],
        bend_neg: vec![8.0, 9.0, 10.0, 11.0],
        pin_pos: vec![0.25, 0.25, 0.25, 0.25],
        pin_neg: vec![0.1, 0.4, 0.4, 0.1],
        ellipticity_pos: 2.456,
        ellipticity_neg: 0.5,
        is_reference,
    }
}

#[test]
fn test_axis_ids() {
    let first = axis_ids(1, 2).unwrap();
    assert_eq!(first.x, [1, 2]);
    assert_eq!(first.primary, [1, 2, 3, 4]);
    assert_eq!(first.overlay, [9, 10]);

    let second = axis_ids(2, 2).unwrap();
    assert_eq!(second.x, [3, 4]);
    assert_eq!(second.primary, [5, 6, 7, 8]);
    assert_eq!(second.overlay, [11, 12]);

    let first_ids: HashSet<usize> = first.y().collect();
    assert!(second.y().all(|id| !first_ids.contains(&id)));
}

#[test]
fn test_axis_ids_unique_across_grid() {
    for rows in 1..=6 {
        let mut seen = HashSet::new();
        for row in 1..=rows {
            for id in axis_ids(row, rows).unwrap().y() {
                assert!(seen.insert(id), "y axis {} reused with {} rows", id, rows);
            }
        }
        assert_eq!(seen.len(), rows * 6);
    }
}

#[test]
fn test_axis_ids_out_of_range() {
    assert!(matches!(
        axis_ids(0, 2),
        Err(PlotError::InvalidParameter { .. })
    ));
    assert!(axis_ids(3, 2).is_err());
}

#[test]
fn test_row_domains_stack_downwards() {
    let (bottom, top) = figure::row_domain(1, 1);
    assert!((bottom - 0.0).abs() < 1e-12 && (top - 1.0).abs() < 1e-12);

    let (b1, t1) = figure::row_domain(1, 2);
    let (b2, t2) = figure::row_domain(2, 2);
    assert!((t1 - 1.0).abs() < 1e-12);
    assert!((b1 - t2 - figure::axes::VERTICAL_SPACING).abs() < 1e-12);
    assert!(b2.abs() < 1e-12);
}

#[test]
fn test_value_range() {
    let range = ValueRange::fit(&[0.1, 0.5], true);
    assert_eq!(range.lo, 0.0);
    assert!(range.hi > 0.5);

    let range = ValueRange::fit(&[10.0, 20.0], false);
    assert!(range.lo < 10.0 && range.hi > 20.0);
    assert!(range.contains(15.0));

    let range = ValueRange::fit(&[3.0, 3.0, f64::NAN], false);
    assert!(range.lo < 3.0 && range.hi > 3.0);

    let range = ValueRange::fit(&[], false);
    assert_eq!(range, ValueRange { lo: 0.0, hi: 1.0 });
}

#[test]
fn test_compose_grid() {
    let bundles = [bundle("Control", true), bundle("2bp (GG)", false)];
    let fig = figure::compose(&bundles).unwrap();

    assert_eq!(fig.rows, 2);
    assert_eq!(fig.cells.len(), 4);
    assert_eq!(fig.canvas.size(), (2600, 1600));

    for row in 1..=2 {
        for side in Side::ALL {
            let cell = fig.cell(row, side).unwrap();
            assert_eq!(cell.y_axes.len(), 3);
            assert_eq!(cell.traces.len(), 3);
            for trace in &cell.traces {
                assert_eq!(trace.x_axis, cell.x_axis.id);
                assert!(cell.y_axis(trace.y_axis).is_some());
                assert_eq!(trace.points.len(), 4);
            }
        }
    }

    let ids = fig.y_axis_ids();
    let unique: HashSet<usize> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 12);
    assert_eq!(unique.len(), 12);
}

#[test]
fn test_cell_axes() {
    let bundles = [bundle("Control", true), bundle("2bp (GG)", false)];
    let fig = figure::compose(&bundles).unwrap();

    let left = fig.cell(2, Side::Positive).unwrap();
    assert_eq!(left.x_axis.id, 3);
    assert_eq!(left.x_axis.domain, (0.24, 0.55));
    assert!(left.x_axis.show_tick_labels);
    let pin = left.y_axes.iter().find(|a| a.kind == SeriesKind::Pin).unwrap();
    assert_eq!(pin.id, 11);
    assert_eq!(pin.overlaying, Some(5));
    assert_eq!(pin.side, AxisSide::Left);
    assert_eq!(pin.title, Some("Pinning Propensity"));

    let right = fig.cell(1, Side::Negative).unwrap();
    assert_eq!(right.x_axis.id, 2);
    assert!(!right.x_axis.show_tick_labels);
    let bubble = right.y_axes.iter().find(|a| a.kind == SeriesKind::Bubble).unwrap();
    assert_eq!(bubble.id, 3);
    assert!(bubble.framed);
    assert_eq!(bubble.side, AxisSide::Right);
    assert_eq!(bubble.title, None);

    // positive side plots the positive series
    let bend = left.traces.iter().find(|t| t.kind == SeriesKind::Bend).unwrap();
    assert_eq!(bend.points[1], (2, 12.0));
}

#[test]
fn test_subplot_titles() {
    let bundles = [bundle("Control", true), bundle("2bp (GG)", false)];
    let fig = figure::compose(&bundles).unwrap();
    let titles: Vec<&str> = fig.titles.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(
        titles,
        [
            "Control: σ > 0, p = 1",
            "Control: σ < 0, p = 1",
            "2bp (GG): σ > 0, p = 2.46",
            "2bp (GG): σ < 0, p = 0.50",
        ]
    );
    assert_eq!(fig.x_title.text, "Position Along Minicircle");
}

#[test]
fn test_compose_requires_bundles() {
    assert!(matches!(
        figure::compose(&[]),
        Err(PlotError::InvalidInput(_))
    ));
}

#[test]
fn test_render_pdf_bytes() {
    let bundles = [bundle("Control", true), bundle("3bp (CTG)", false)];
    let fig = figure::compose(&bundles).unwrap();
    let pdf = figure::render_pdf_bytes(&fig).unwrap();

    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));

    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/MediaBox [0 0 2600 1600]"));
    assert!(text.contains("/BaseFont /Symbol"));
    assert!(text.contains("(3bp \\(CTG\\): )"));
}

#[test]
fn test_y_label_strips_fit_canvas() {
    let bundles = [bundle("Control", true), bundle("2bp (GG)", false)];
    let fig = figure::compose(&bundles).unwrap();
    let full = style::Y_LABEL_AREA as i32 + 1;

    for axis in fig.cells.iter().flat_map(|cell| &cell.y_axes) {
        let (left, width) = fig.canvas.y_label_strip(axis.position, axis.side);
        assert!(left >= 0);
        assert!(left + width <= fig.canvas.width as i32);
        // no axis loses label room to the page edge
        assert_eq!(width, full, "axis {} clipped", axis.id);
    }

    // an axis past the plot area keeps only the part of its strip on the page
    let (left, width) = fig.canvas.y_label_strip(1.05, AxisSide::Right);
    assert_eq!(left + width, fig.canvas.width as i32);
    assert!(width < full);
}

#[test]
fn test_dropped_backend_writes_buffer() {
    let mut buffer = Vec::new();
    drop(PdfBackend::with_buffer(&mut buffer, (100, 50)));
    assert!(buffer.starts_with(b"%PDF-1.4"));

    // an unwritable target is reported, not a panic
    let path = Path::new("tests/data/nonexistent/dropped.pdf");
    drop(PdfBackend::new(path, (100, 50)));
    assert!(!path.exists());
}
