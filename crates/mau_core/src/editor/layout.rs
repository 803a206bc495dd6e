//! Pointer hit-testing seam between a host surface and the editor.

use crate::editor::CheckboxEditor;

/// Pointer position in host surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Maps a pointer position to the nearest char boundary in the document.
pub trait HitTest {
    fn offset_at(&self, editor: &CheckboxEditor, point: Point) -> usize;
}

/// Fixed-cell layout without wrapping: every char occupies one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceLayout {
    pub cell_width: f32,
    pub line_height: f32,
    pub origin: Point,
}

impl MonospaceLayout {
    pub fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width: cell_width.max(f32::EPSILON),
            line_height: line_height.max(f32::EPSILON),
            origin: Point::new(0.0, 0.0),
        }
    }

    /// Top-left corner of the cell holding `col` on `line`.
    pub fn cell_origin(&self, line: usize, col: usize) -> Point {
        Point::new(
            self.origin.x + col as f32 * self.cell_width,
            self.origin.y + line as f32 * self.line_height,
        )
    }
}

impl HitTest for MonospaceLayout {
    fn offset_at(&self, editor: &CheckboxEditor, point: Point) -> usize {
        let rows = ((point.y - self.origin.y) / self.line_height).floor().max(0.0) as usize;
        let line = rows.min(editor.line_count().saturating_sub(1));
        // Nearest boundary: the left half of a cell maps before the char.
        let cols = ((point.x - self.origin.x) / self.cell_width).round().max(0.0) as usize;
        let col = cols.min(editor.line_len(line));
        editor.line_start(line) + col
    }
}
