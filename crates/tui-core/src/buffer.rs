//! Buffer — a 2D grid of terminal cells and the diffing between two frames.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::Cell;
use crate::error::{Result, TuiError};
use crate::geometry::{Rect, Size};
use crate::style::Style;

/// A 2D grid of terminal cells representing one frame of terminal content.
#[derive(Clone, Debug)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// Create a new buffer filled with blank cells.
    pub fn new(size: Size) -> Self {
        let len = usize::from(size.width) * usize::from(size.height);
        Self {
            cells: vec![Cell::blank(); len],
            width: size.width,
            height: size.height,
        }
    }

    /// Create an empty (blank) buffer sized to `area`.
    pub fn empty(area: Rect) -> Self {
        Self::new(area.size)
    }

    /// Create a buffer sized to `area`, every cell set to `cell`.
    pub fn filled(area: Rect, cell: Cell) -> Self {
        let mut buf = Self::new(area.size);
        for c in &mut buf.cells {
            *c = cell.clone();
        }
        buf
    }

    /// Get the buffer dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the buffer width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Clear the buffer, resetting all cells to blank.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::blank();
        }
    }

    /// Resize the buffer. Contents are lost (filled with blanks).
    pub fn resize(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
        let len = usize::from(size.width) * usize::from(size.height);
        self.cells.clear();
        self.cells.resize(len, Cell::blank());
    }

    /// Get a reference to the cell at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells.get(idx)
        } else {
            None
        }
    }

    /// Get a mutable reference to the cell at (x, y), or `None` if out of bounds.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    /// Set a cell at (x, y). If the cell is wide (width > 1), the next
    /// cell is automatically set to a continuation cell. No-op if out of bounds.
    ///
    /// This method handles wide character edge cases:
    /// - If writing over a continuation cell, the preceding wide character's
    ///   primary cell is blanked to avoid leaving a half-rendered glyph.
    /// - If writing over a wide character's primary cell, the old continuation
    ///   cell at x+1 is blanked.
    /// - If a wide character would place its continuation cell beyond the last
    ///   column, the wide character is replaced with a single space instead.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }

        let is_wide = cell.is_wide();

        if is_wide && x + 1 >= self.width {
            let idx = self.index(x, y);
            if let Some(c) = self.cells.get_mut(idx) {
                *c = Cell::blank();
            }
            return;
        }

        let idx = self.index(x, y);
        if let Some(existing) = self.cells.get(idx)
            && existing.is_continuation()
            && x > 0
        {
            let prev_idx = self.index(x - 1, y);
            if let Some(prev) = self.cells.get_mut(prev_idx) {
                *prev = Cell::blank();
            }
        }

        if let Some(existing) = self.cells.get(idx)
            && existing.is_wide()
        {
            let next_x = x + 1;
            if next_x < self.width {
                let next_idx = self.index(next_x, y);
                if let Some(cont) = self.cells.get_mut(next_idx) {
                    *cont = Cell::blank();
                }
            }
        }

        if let Some(c) = self.cells.get_mut(idx) {
            *c = cell;
        }

        if is_wide {
            let next_x = x + 1;
            if next_x < self.width {
                let next_idx = self.index(next_x, y);
                if let Some(next_cell) = self.cells.get(next_idx)
                    && next_cell.is_wide()
                {
                    let after_next = next_x + 1;
                    if after_next < self.width {
                        let after_idx = self.index(after_next, y);
                        if let Some(after_cell) = self.cells.get_mut(after_idx) {
                            *after_cell = Cell::blank();
                        }
                    }
                }
                if let Some(c) = self.cells.get_mut(next_idx) {
                    *c = Cell::continuation();
                }
            }
        }
    }

    /// Write `text` at (x, y), splitting it into grapheme clusters and
    /// styling every resulting cell with `style`. Writing stops once the
    /// row is exhausted; it never wraps to the next line.
    ///
    /// A grapheme cluster with display width 0 (a stray combining mark or
    /// joiner that `unicode-segmentation` did not fold into the preceding
    /// cluster) is merged into the symbol of the last cell written, or
    /// dropped if nothing has been written yet on this row.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        if y >= self.height {
            return;
        }
        let mut cx: u32 = u32::from(x);
        let mut last_cell_x: Option<u16> = None;
        for grapheme in text.graphemes(true) {
            if cx >= u32::from(self.width) {
                break;
            }
            match UnicodeWidthStr::width(grapheme) {
                0 => {
                    if let Some(lx) = last_cell_x
                        && let Some(cell) = self.get_mut(lx, y)
                    {
                        cell.grapheme.push_str(grapheme);
                    }
                }
                1 => {
                    let gx = cx as u16;
                    self.set(gx, y, Cell::new(grapheme, style.clone()));
                    last_cell_x = Some(gx);
                    cx += 1;
                }
                _ => {
                    let gx = cx as u16;
                    self.set(gx, y, Cell::new(grapheme, style.clone()));
                    last_cell_x = Some(gx);
                    cx += 2;
                }
            }
        }
    }

    /// Patch `style` onto every cell within `area`, clipped to the buffer's
    /// bounds. The cell's grapheme and width are left untouched.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let bounds = Rect::new(0, 0, self.width, self.height);
        let Some(clipped) = area.intersection(&bounds) else {
            return;
        };
        for y in clipped.position.y..clipped.bottom() {
            for x in clipped.position.x..clipped.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.style = cell.style.patch(&style);
                }
            }
        }
    }

    /// Get a row of cells as a slice.
    pub fn get_row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            let end = start + usize::from(self.width);
            Some(&self.cells[start..end])
        } else {
            None
        }
    }

    /// Compute the differences between this buffer and a previous buffer.
    ///
    /// Buffers must be the same size — a size mismatch means the caller
    /// skipped the resize/reallocate step of the frame pipeline, which is a
    /// structural invariant violation rather than something to paper over
    /// with an implicit full redraw.
    ///
    /// A changed wide-leading cell and its continuation cell are always
    /// emitted together, even if only one of the pair actually differs
    /// (e.g. a `set_style` call whose area boundary splits the pair) — a
    /// backend must never receive a continuation cell without its leading
    /// half, or vice versa.
    pub fn diff(&self, previous: &Buffer) -> Result<Vec<CellChange>> {
        if self.width != previous.width || self.height != previous.height {
            return Err(TuiError::InvariantError(format!(
                "cannot diff buffers of different size: {}x{} vs {}x{}",
                self.width, self.height, previous.width, previous.height
            )));
        }

        let width = usize::from(self.width);
        let mut changed = vec![false; self.cells.len()];
        for (idx, (current, prev)) in self.cells.iter().zip(previous.cells.iter()).enumerate() {
            changed[idx] = current != prev;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                if !changed[idx] {
                    continue;
                }
                let cell = &self.cells[idx];
                if cell.is_continuation() && x > 0 {
                    changed[idx - 1] = true;
                } else if cell.is_wide() && usize::from(x) + 1 < width {
                    changed[idx + 1] = true;
                }
            }
        }

        let mut changes = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                if changed[idx] {
                    changes.push(CellChange {
                        x,
                        y,
                        cell: self.cells[idx].clone(),
                    });
                }
            }
        }
        Ok(changes)
    }

    /// Convert (x, y) to a linear index.
    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }
}

/// A single cell change: position + new cell value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellChange {
    /// Column position.
    pub x: u16,
    /// Row position.
    pub y: u16,
    /// New cell value.
    pub cell: Cell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, NamedColor};
    use crate::style::Style;

    #[test]
    fn new_buffer_all_blank() {
        let buf = Buffer::new(Size::new(10, 5));
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 5);
        for y in 0..5 {
            for x in 0..10 {
                let cell = buf.get(x, y);
                assert!(cell.is_some());
                assert!(cell.is_some_and(|c| c.is_blank()));
            }
        }
    }

    #[test]
    fn empty_from_area() {
        let buf = Buffer::empty(Rect::new(3, 4, 6, 2));
        assert_eq!(buf.size(), Size::new(6, 2));
        assert!(buf.get(0, 0).is_some_and(|c| c.is_blank()));
    }

    #[test]
    fn filled_from_area() {
        let cell = Cell::new("#", Style::default());
        let buf = Buffer::filled(Rect::new(0, 0, 3, 2), cell.clone());
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.get(x, y), Some(&cell));
            }
        }
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(Size::new(10, 5));
        let style = Style::new().fg(Color::Named(NamedColor::Red));
        let cell = Cell::new("A", style.clone());
        buf.set(3, 2, cell.clone());
        let got = buf.get(3, 2);
        assert_eq!(got, Some(&cell));
    }

    #[test]
    fn set_string_writes_each_grapheme() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set_string(0, 0, "abc", Style::default());
        assert_eq!(buf.get(0, 0).map(|c| c.grapheme.as_str()), Some("a"));
        assert_eq!(buf.get(1, 0).map(|c| c.grapheme.as_str()), Some("b"));
        assert_eq!(buf.get(2, 0).map(|c| c.grapheme.as_str()), Some("c"));
        assert!(buf.get(3, 0).is_some_and(|c| c.is_blank()));
    }

    #[test]
    fn set_string_advances_past_wide_chars() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set_string(0, 0, "\u{4e16}B", Style::default()); // 世B
        assert_eq!(buf.get(0, 0).map(|c| c.width), Some(2));
        assert!(buf.get(1, 0).is_some_and(|c| c.is_continuation()));
        assert_eq!(buf.get(2, 0).map(|c| c.grapheme.as_str()), Some("B"));
    }

    #[test]
    fn set_string_stops_at_row_boundary() {
        let mut buf = Buffer::new(Size::new(3, 1));
        buf.set_string(0, 0, "abcdef", Style::default());
        assert_eq!(buf.get(2, 0).map(|c| c.grapheme.as_str()), Some("c"));
    }

    #[test]
    fn set_style_patches_region() {
        let mut buf = Buffer::new(Size::new(5, 5));
        buf.set_string(0, 0, "hi", Style::default());
        buf.set_style(
            Rect::new(0, 0, 5, 1),
            Style::new().fg(Color::Named(NamedColor::Red)),
        );
        assert_eq!(
            buf.get(0, 0).map(|c| c.style.fg.clone()),
            Some(Some(Color::Named(NamedColor::Red)))
        );
        // Grapheme left untouched.
        assert_eq!(buf.get(0, 0).map(|c| c.grapheme.as_str()), Some("h"));
    }

    #[test]
    fn set_style_clips_to_buffer_bounds() {
        let mut buf = Buffer::new(Size::new(3, 3));
        buf.set_style(Rect::new(1, 1, 10, 10), Style::new().bold(true));
        assert!(
            buf.get(1, 1)
                .is_some_and(|c| c.style.has(crate::style::Modifier::Bold))
        );
    }

    #[test]
    fn wide_char_sets_continuation() {
        let mut buf = Buffer::new(Size::new(10, 5));
        let wide = Cell::new("\u{4e16}", Style::default());
        buf.set(3, 1, wide.clone());
        assert_eq!(buf.get(3, 1), Some(&wide));
        let cont = buf.get(4, 1);
        assert!(cont.is_some());
        assert_eq!(cont.map(|c| c.width), Some(0));
    }

    #[test]
    fn wide_char_at_right_edge() {
        let mut buf = Buffer::new(Size::new(5, 1));
        let wide = Cell::new("\u{4e16}", Style::default());
        buf.set(4, 0, wide);
        let cell = buf.get(4, 0);
        assert!(cell.is_some_and(|c| c.is_blank()));
    }

    #[test]
    fn out_of_bounds_returns_none() {
        let buf = Buffer::new(Size::new(5, 3));
        assert!(buf.get(5, 0).is_none());
        assert!(buf.get(0, 3).is_none());
        assert!(buf.get(100, 100).is_none());
    }

    #[test]
    fn out_of_bounds_set_is_noop() {
        let mut buf = Buffer::new(Size::new(5, 3));
        buf.set(10, 10, Cell::new("X", Style::default()));
    }

    #[test]
    fn get_row() {
        let buf = Buffer::new(Size::new(5, 3));
        let row = buf.get_row(0);
        assert!(row.is_some());
        assert_eq!(row.map(|r| r.len()), Some(5));
        assert!(buf.get_row(3).is_none());
    }

    #[test]
    fn clear_resets_all_cells() {
        let mut buf = Buffer::new(Size::new(5, 3));
        buf.set(2, 1, Cell::new("X", Style::new().bold(true)));
        buf.clear();
        for y in 0..3 {
            for x in 0..5 {
                assert!(buf.get(x, y).is_some_and(|c| c.is_blank()));
            }
        }
    }

    #[test]
    fn resize_fills_with_blank() {
        let mut buf = Buffer::new(Size::new(5, 3));
        buf.set(2, 1, Cell::new("X", Style::default()));
        buf.resize(Size::new(10, 8));
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 8);
        for y in 0..8 {
            for x in 0..10 {
                assert!(buf.get(x, y).is_some_and(|c| c.is_blank()));
            }
        }
    }

    #[test]
    fn diff_no_changes() {
        let buf1 = Buffer::new(Size::new(5, 3));
        let buf2 = Buffer::new(Size::new(5, 3));
        let changes = buf1.diff(&buf2).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn diff_single_change() {
        let mut current = Buffer::new(Size::new(5, 3));
        let previous = Buffer::new(Size::new(5, 3));
        current.set(2, 1, Cell::new("A", Style::default()));
        let changes = current.diff(&previous).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].x, 2);
        assert_eq!(changes[0].y, 1);
        assert_eq!(changes[0].cell.grapheme, "A");
    }

    #[test]
    fn diff_style_change() {
        let mut current = Buffer::new(Size::new(5, 3));
        let mut previous = Buffer::new(Size::new(5, 3));
        previous.set(0, 0, Cell::new("A", Style::default()));
        current.set(0, 0, Cell::new("A", Style::new().bold(true)));
        let changes = current.diff(&previous).unwrap();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn diff_size_mismatch_is_invariant_error() {
        let current = Buffer::new(Size::new(5, 3));
        let previous = Buffer::new(Size::new(10, 8));
        let err = current.diff(&previous).unwrap_err();
        assert!(matches!(err, TuiError::InvariantError(_)));
    }

    #[test]
    fn diff_wide_char_change() {
        let mut current = Buffer::new(Size::new(10, 1));
        let previous = Buffer::new(Size::new(10, 1));
        current.set(3, 0, Cell::new("\u{4e16}", Style::default()));
        let changes = current.diff(&previous).unwrap();
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn diff_pairs_wide_leading_cell_with_unchanged_continuation() {
        let mut current = Buffer::new(Size::new(10, 1));
        current.set(3, 0, Cell::new("\u{4e16}", Style::default()));
        let mut previous = current.clone();
        // Only the leading half's style changes; the continuation cell is
        // byte-for-byte identical in both buffers.
        current.set_style(Rect::new(3, 0, 1, 1), Style::new().fg(Color::Named(NamedColor::Red)));
        previous.set(3, 0, Cell::new("\u{4e16}", Style::default()));
        let changes = current.diff(&previous).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].x, 3);
        assert_eq!(changes[1].x, 4);
        assert!(changes[1].cell.is_continuation());
    }

    #[test]
    fn diff_pairs_wide_continuation_cell_with_unchanged_leading() {
        let mut current = Buffer::new(Size::new(10, 1));
        current.set(3, 0, Cell::new("\u{4e16}", Style::default()));
        let previous = current.clone();
        // Only the continuation half's style changes.
        current.set_style(Rect::new(4, 0, 1, 1), Style::new().fg(Color::Named(NamedColor::Red)));
        let changes = current.diff(&previous).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].x, 3);
        assert_eq!(changes[1].x, 4);
        assert!(changes[0].cell.is_wide());
    }

    #[test]
    fn overwrite_continuation_blanks_preceding_wide() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(3, 0, Cell::new("\u{4e16}", Style::default()));
        buf.set(4, 0, Cell::new("X", Style::default()));
        assert!(buf.get(3, 0).is_some_and(|c| c.is_blank()));
        assert_eq!(buf.get(4, 0).map(|c| c.grapheme.as_str()), Some("X"));
    }

    #[test]
    fn overwrite_wide_with_narrow_blanks_continuation() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(3, 0, Cell::new("\u{4e16}", Style::default()));
        buf.set(3, 0, Cell::new("A", Style::default()));
        assert_eq!(buf.get(3, 0).map(|c| c.grapheme.as_str()), Some("A"));
        assert!(buf.get(4, 0).is_some_and(|c| c.is_blank()));
    }

    #[test]
    fn wide_char_last_column_replaced_with_space() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(9, 0, Cell::new("\u{4e16}", Style::default()));
        assert!(buf.get(9, 0).is_some_and(|c| c.is_blank()));
    }

    #[test]
    fn wide_char_second_to_last_fits() {
        let mut buf = Buffer::new(Size::new(10, 1));
        let wide = Cell::new("\u{4e16}", Style::default());
        buf.set(8, 0, wide.clone());
        assert_eq!(buf.get(8, 0).map(|c| c.grapheme.clone()), Some(wide.grapheme));
        assert!(buf.get(9, 0).is_some_and(|c| c.is_continuation()));
    }

    #[test]
    fn set_narrow_over_narrow_no_side_effects() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(3, 0, Cell::new("A", Style::default()));
        buf.set(3, 0, Cell::new("B", Style::default()));
        assert_eq!(buf.get(3, 0).map(|c| c.grapheme.as_str()), Some("B"));
        assert!(buf.get(2, 0).is_some_and(|c| c.is_blank()));
        assert!(buf.get(4, 0).is_some_and(|c| c.is_blank()));
    }

    #[test]
    fn set_wide_over_wide_old_continuation_cleaned() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(2, 0, Cell::new("\u{4e16}", Style::default()));
        buf.set(2, 0, Cell::new("\u{754c}", Style::default()));
        assert_eq!(buf.get(2, 0).map(|c| c.grapheme.as_str()), Some("\u{754c}"));
        assert!(buf.get(3, 0).is_some_and(|c| c.is_continuation()));
    }

    #[test]
    fn multiple_wide_chars_in_sequence() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(0, 0, Cell::new("\u{4e16}", Style::default()));
        buf.set(2, 0, Cell::new("\u{754c}", Style::default()));
        buf.set(4, 0, Cell::new("\u{4eba}", Style::default()));

        for col in [0, 2, 4] {
            assert_eq!(buf.get(col, 0).map(|c| c.width), Some(2));
        }
        for col in [1, 3, 5] {
            assert!(buf.get(col, 0).is_some_and(|c| c.is_continuation()));
        }
    }

    #[test]
    fn overwrite_middle_of_adjacent_wide_chars() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(0, 0, Cell::new("\u{4e16}", Style::default()));
        buf.set(2, 0, Cell::new("\u{754c}", Style::default()));
        buf.set(1, 0, Cell::new("X", Style::default()));
        assert!(buf.get(0, 0).is_some_and(|c| c.is_blank()));
        assert_eq!(buf.get(1, 0).map(|c| c.grapheme.as_str()), Some("X"));
        assert_eq!(buf.get(2, 0).map(|c| c.width), Some(2));
    }

    #[test]
    fn wide_char_at_column_zero() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(0, 0, Cell::new("\u{4e16}", Style::default()));
        assert_eq!(buf.get(0, 0).map(|c| c.width), Some(2));
        assert!(buf.get(1, 0).is_some_and(|c| c.is_continuation()));
    }

    #[test]
    fn wide_char_continuation_exactly_at_last_column() {
        let mut buf = Buffer::new(Size::new(6, 1));
        buf.set(4, 0, Cell::new("\u{4e16}", Style::default()));
        assert_eq!(buf.get(4, 0).map(|c| c.width), Some(2));
        assert!(buf.get(5, 0).is_some_and(|c| c.is_continuation()));
    }

    #[test]
    fn get_row_with_cjk_primary_and_continuation() {
        let mut buf = Buffer::new(Size::new(10, 1));
        buf.set(0, 0, Cell::new("\u{4e16}", Style::default()));
        buf.set(2, 0, Cell::new("\u{754c}", Style::default()));
        buf.set(4, 0, Cell::new("\u{4eba}", Style::default()));

        let row = buf.get_row(0).unwrap();
        assert_eq!(row.len(), 10);
        assert_eq!(row[0].grapheme, "\u{4e16}");
        assert!(row[1].is_continuation());
        assert!(row[6].is_blank());
    }

    #[test]
    fn diff_with_wide_char_produces_two_change_entries() {
        let mut current = Buffer::new(Size::new(10, 1));
        let previous = Buffer::new(Size::new(10, 1));
        current.set(0, 0, Cell::new("\u{4e16}", Style::default()));
        current.set(4, 0, Cell::new("\u{754c}", Style::default()));
        let changes = current.diff(&previous).unwrap();
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0].x, 0);
        assert_eq!(changes[0].cell.width, 2);
        assert_eq!(changes[1].x, 1);
        assert_eq!(changes[1].cell.width, 0);
    }

    #[test]
    fn clear_after_wide_char_writes_all_blank() {
        let mut buf = Buffer::new(Size::new(10, 2));
        buf.set(0, 0, Cell::new("\u{4e16}", Style::default()));
        buf.set(2, 0, Cell::new("\u{754c}", Style::default()));
        buf.set(0, 1, Cell::new("\u{1f600}", Style::default()));
        assert!(buf.get(0, 0).is_some_and(|c| !c.is_blank()));
        buf.clear();
        for y in 0..2 {
            for x in 0..10 {
                assert!(buf.get(x, y).is_some_and(|c| c.is_blank()));
            }
        }
    }

    #[test]
    fn buffer_position_is_local_to_its_own_area() {
        // Buffer storage is always zero-based; the Rect's position only
        // determines the extracted size, not an offset into the grid.
        let buf = Buffer::empty(Rect::new(100, 100, 2, 2));
        assert_eq!(buf.size(), Size::new(2, 2));
        assert!(buf.get(0, 0).is_some());
    }
}
