//! A `plotters` drawing backend that writes single-page PDF documents.
//!
//! Drawing calls are buffered as PDF content stream operators in device space
//! (origin at the bottom left, one unit per backend pixel) and the document is
//! assembled when the backend is presented. Text uses the standard Helvetica
//! font; `σ` is set in the standard Symbol font.

use log::warn;
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TEXT_FONT: &str = "F1";
const SYMBOL_FONT: &str = "F2";

/// Average Helvetica advance width as a fraction of the font size
const ADVANCE: f64 = 0.55;
/// Cap height as a fraction of the font size
const ASCENT: f64 = 0.72;
/// Control point distance for a quarter circle drawn as a cubic Bezier
const KAPPA: f64 = 0.552_284_749_8;

enum Target<'a> {
    File(PathBuf),
    Buffer(&'a mut Vec<u8>),
}

/// Draws onto one PDF page of `size` points
pub struct PdfBackend<'a> {
    target: Target<'a>,
    size: (u32, u32),
    content: Vec<u8>,
    saved: bool,
}

type DrawResult = Result<(), DrawingErrorKind<io::Error>>;

impl<'a> PdfBackend<'a> {
    /// Backend that writes the document to `path` when presented
    pub fn new<P: AsRef<Path> + ?Sized>(path: &P, size: (u32, u32)) -> Self {
        PdfBackend {
            target: Target::File(path.as_ref().to_path_buf()),
            size,
            content: Vec::new(),
            saved: false,
        }
    }

    /// Backend that replaces the contents of `buffer` when presented
    pub fn with_buffer(buffer: &'a mut Vec<u8>, size: (u32, u32)) -> Self {
        PdfBackend {
            target: Target::Buffer(buffer),
            size,
            content: Vec::new(),
            saved: false,
        }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) -> DrawResult {
        self.content
            .write_fmt(args)
            .map_err(DrawingErrorKind::DrawingError)
    }

    fn point(&self, (x, y): BackendCoord) -> (f64, f64) {
        (x as f64, self.size.1 as f64 - y as f64)
    }

    fn stroke_style(&mut self, color: BackendColor, width: u32) -> DrawResult {
        let (r, g, b) = rgb(color);
        self.emit(format_args!(
            "{:.3} {:.3} {:.3} RG {} w\n",
            r,
            g,
            b,
            width.max(1)
        ))
    }

    fn fill_style(&mut self, color: BackendColor) -> DrawResult {
        let (r, g, b) = rgb(color);
        self.emit(format_args!("{:.3} {:.3} {:.3} rg\n", r, g, b))
    }

    fn trace_path<I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
    ) -> Result<usize, DrawingErrorKind<io::Error>> {
        let mut count = 0;
        for coord in path {
            let (x, y) = self.point(coord);
            let op = if count == 0 { "m" } else { "l" };
            self.emit(format_args!("{:.2} {:.2} {}\n", x, y, op))?;
            count += 1;
        }
        Ok(count)
    }

    /// Assembles the complete PDF document for the drawing so far
    pub fn document(&self) -> Vec<u8> {
        build_document(self.size, &self.content)
    }
}

fn rgb(color: BackendColor) -> (f64, f64, f64) {
    let (r, g, b) = color.rgb;
    (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

fn text_extent(text: &str, size: f64) -> (f64, f64) {
    (text.chars().count() as f64 * size * ADVANCE, size)
}

/// Splits text into runs per font, already escaped for a PDF string literal
fn text_runs(text: &str) -> Vec<(&'static str, String)> {
    let mut runs: Vec<(&'static str, String)> = Vec::new();
    for ch in text.chars() {
        let (font, encoded) = match ch {
            'σ' => (SYMBOL_FONT, "s".to_string()),
            '\\' | '(' | ')' => (TEXT_FONT, format!("\\{}", ch)),
            c if c.is_ascii() => (TEXT_FONT, c.to_string()),
            c if (c as u32) <= 0xFF => (TEXT_FONT, format!("\\{:03o}", c as u32)),
            _ => (TEXT_FONT, "?".to_string()),
        };
        if let Some((last, run)) = runs.last_mut() {
            if *last == font {
                run.push_str(&encoded);
                continue;
            }
        }
        runs.push((font, encoded));
    }
    runs
}

impl<'a> DrawingBackend for PdfBackend<'a> {
    type ErrorType = io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> DrawResult {
        self.saved = false;
        Ok(())
    }

    fn present(&mut self) -> DrawResult {
        let document = self.document();
        match &mut self.target {
            Target::File(path) => {
                fs::write(path, &document).map_err(DrawingErrorKind::DrawingError)?
            }
            Target::Buffer(buffer) => {
                buffer.clear();
                buffer.extend_from_slice(&document);
            }
        }
        self.saved = true;
        Ok(())
    }

    fn draw_pixel(&mut self, point: BackendCoord, color: BackendColor) -> DrawResult {
        if color.alpha == 0.0 {
            return Ok(());
        }
        let (x, y) = self.point(point);
        self.fill_style(color)?;
        self.emit(format_args!("{:.2} {:.2} 1 1 re f\n", x, y - 1.0))
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        self.stroke_style(style.color(), style.stroke_width())?;
        let (x0, y0) = self.point(from);
        let (x1, y1) = self.point(to);
        self.emit(format_args!(
            "{:.2} {:.2} m {:.2} {:.2} l S\n",
            x0, y0, x1, y1
        ))
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let (x0, y0) = self.point(upper_left);
        let (x1, y1) = self.point(bottom_right);
        let (x, y) = (x0.min(x1), y0.min(y1));
        let (w, h) = ((x1 - x0).abs(), (y1 - y0).abs());
        if fill {
            self.fill_style(style.color())?;
            self.emit(format_args!("{:.2} {:.2} {:.2} {:.2} re f\n", x, y, w, h))
        } else {
            self.stroke_style(style.color(), style.stroke_width())?;
            self.emit(format_args!("{:.2} {:.2} {:.2} {:.2} re S\n", x, y, w, h))
        }
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        self.stroke_style(style.color(), style.stroke_width())?;
        if self.trace_path(path)? < 2 {
            return self.emit(format_args!("n\n"));
        }
        self.emit(format_args!("S\n"))
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        self.fill_style(style.color())?;
        if self.trace_path(vert)? < 3 {
            return self.emit(format_args!("n\n"));
        }
        self.emit(format_args!("h f\n"))
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let (cx, cy) = self.point(center);
        let r = radius as f64;
        let k = r * KAPPA;

        if fill {
            self.fill_style(style.color())?;
        } else {
            self.stroke_style(style.color(), style.stroke_width())?;
        }
        self.emit(format_args!("{:.2} {:.2} m\n", cx + r, cy))?;
        for (c1, c2, end) in [
            ((cx + r, cy + k), (cx + k, cy + r), (cx, cy + r)),
            ((cx - k, cy + r), (cx - r, cy + k), (cx - r, cy)),
            ((cx - r, cy - k), (cx - k, cy - r), (cx, cy - r)),
            ((cx + k, cy - r), (cx + r, cy - k), (cx + r, cy)),
        ] {
            self.emit(format_args!(
                "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
                c1.0, c1.1, c2.0, c2.1, end.0, end.1
            ))?;
        }
        self.emit(format_args!("{}\n", if fill { "f" } else { "S" }))
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> DrawResult {
        let color = style.color();
        if color.alpha == 0.0 || text.is_empty() {
            return Ok(());
        }

        let size = style.size();
        let (width, _) = text_extent(text, size);
        let anchor = style.anchor();
        let dx = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let dy = match anchor.v_pos {
            VPos::Top => -size * ASCENT,
            VPos::Center => -size * ASCENT / 2.0,
            VPos::Bottom => 0.0,
        };

        // Rotations are clockwise on screen, so counter-clockwise in page space.
        let (a, b, c, d) = match style.transform() {
            FontTransform::None => (1.0, 0.0, 0.0, 1.0),
            FontTransform::Rotate90 => (0.0, -1.0, 1.0, 0.0),
            FontTransform::Rotate180 => (-1.0, 0.0, 0.0, -1.0),
            FontTransform::Rotate270 => (0.0, 1.0, -1.0, 0.0),
        };
        let (x, y) = self.point(pos);
        let (e, f) = (x + a * dx + c * dy, y + b * dx + d * dy);

        self.fill_style(color)?;
        self.emit(format_args!(
            "BT {} {} {} {} {:.2} {:.2} Tm\n",
            a, b, c, d, e, f
        ))?;
        for (font, run) in text_runs(text) {
            self.emit(format_args!("/{} {:.2} Tf ({}) Tj\n", font, size, run))?;
        }
        self.emit(format_args!("ET\n"))
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        let (w, h) = text_extent(text, style.size());
        Ok((w.ceil() as u32, h.ceil() as u32))
    }
}

impl Drop for PdfBackend<'_> {
    fn drop(&mut self) {
        // Callers present explicitly to see write errors; this only catches
        // backends dropped without it.
        if !self.saved {
            if let Err(e) = self.present() {
                warn!("failed to write PDF on drop: {}", e);
            }
        }
    }
}

/// Wraps one content stream into a PDF 1.4 document with a single page
fn build_document((width, height): (u32, u32), content: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut offsets = Vec::with_capacity(6);

    buf.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /{} 4 0 R /{} 5 0 R >> >> /Contents 6 0 R >>",
            width, height, TEXT_FONT, SYMBOL_FONT
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Symbol >>".to_string(),
    ];

    for (idx, object) in objects.iter().enumerate() {
        offsets.push(buf.len());
        let _ = write!(buf, "{} 0 obj\n{}\nendobj\n", idx + 1, object);
    }

    offsets.push(buf.len());
    let _ = write!(
        buf,
        "{} 0 obj\n<< /Length {} >>\nstream\n",
        objects.len() + 1,
        content.len()
    );
    buf.extend_from_slice(content);
    buf.extend_from_slice(b"\nendstream\nendobj\n");

    let xref_start = buf.len();
    let _ = write!(buf, "xref\n0 {}\n", offsets.len() + 1);
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        let _ = write!(buf, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        buf,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        xref_start
    );

    buf
}
