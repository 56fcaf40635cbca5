//! Drawing surfaces for the rain.

use binrain_core::{ColorTheme, blend};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Something the rain can paint glyphs onto.
///
/// Coordinates are in pixels. `y` is the text baseline, so a glyph drawn at
/// `y` occupies the cell-height band just above it.
pub trait GlyphSurface {
    /// Erase everything painted so far.
    fn clear(&mut self);

    /// Paint `glyph` at `(x, y)` with opacity in 0.0-1.0.
    fn draw_glyph(&mut self, x: f32, y: f32, glyph: char, opacity: f32);
}

/// A painted glyph cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintedGlyph {
    pub glyph: char,
    pub opacity: f32,
}

/// Terminal surface: a grid of cells, each `cell_size` pixels square.
///
/// The grid holds the last painted frame until the next tick repaints it.
#[derive(Debug, Clone)]
pub struct GlyphGrid {
    cols: u16,
    rows: u16,
    cell_size: u16,
    cells: Vec<Option<PaintedGlyph>>,
}

impl GlyphGrid {
    /// Create an empty grid.
    pub fn new(cols: u16, rows: u16, cell_size: u16) -> Self {
        Self {
            cols,
            rows,
            cell_size: cell_size.max(1),
            cells: vec![None; usize::from(cols) * usize::from(rows)],
        }
    }

    /// Match the grid to a new terminal size. Drops the painted frame.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols == self.cols && rows == self.rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; usize::from(cols) * usize::from(rows)];
    }

    /// The glyph painted at cell `(col, row)`, if any.
    pub fn glyph_at(&self, col: u16, row: u16) -> Option<PaintedGlyph> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[self.index(col, row)]
    }

    /// Number of painted cells.
    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn index(&self, col: u16, row: u16) -> usize {
        usize::from(row) * usize::from(self.cols) + usize::from(col)
    }

    /// Map a pixel position to a cell, clipping anything off-grid.
    fn cell_for(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let size = f32::from(self.cell_size);
        let col = (x / size).floor();
        // `y` is the baseline: the glyph sits in the row above the one
        // containing it.
        let row = (y / size).floor() - 1.0;
        if col < 0.0 || row < 0.0 || col >= f32::from(self.cols) || row >= f32::from(self.rows) {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Render the painted frame into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: ColorTheme) {
        let fg = theme.rain_rgb();
        let bg = theme.background_rgb();
        let height = area.height.min(self.rows);
        let width = area.width.min(self.cols);

        let lines: Vec<Line> = (0..height)
            .map(|row| {
                let spans: Vec<Span> = (0..width)
                    .map(|col| match self.glyph_at(col, row) {
                        Some(painted) => Span::styled(
                            painted.glyph.to_string(),
                            Style::new().fg(blend(fg, bg, painted.opacity)),
                        ),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl GlyphSurface for GlyphGrid {
    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn draw_glyph(&mut self, x: f32, y: f32, glyph: char, opacity: f32) {
        if let Some((col, row)) = self.cell_for(x, y) {
            let idx = self.index(col, row);
            self.cells[idx] = Some(PaintedGlyph { glyph, opacity });
        }
    }
}
