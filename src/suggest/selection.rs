//! Selection cursor over the rendered rows.

use super::types::RenderedItem;
use tracing::trace;

/// Tracks which rendered row, if any, is highlighted.
///
/// The cursor owns the rows so the `selected` flags can never drift from
/// the cursor position: at most one row has `selected == true`. Movement
/// wraps at the number of rows and skips rows that are not selectable
/// (group headers). Skipping is bounded by the row count, so a list made
/// only of headers clears the selection instead of looping.
#[derive(Debug, Clone, Default)]
pub struct SelectionCursor {
    rows: Vec<RenderedItem>,
    selected: Option<usize>,
}

impl SelectionCursor {
    /// Creates an empty cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current rows and selection and takes `rows`.
    pub fn replace(&mut self, mut rows: Vec<RenderedItem>) {
        for row in &mut rows {
            row.selected = false;
        }
        self.rows = rows;
        self.selected = None;
    }

    /// Drops every row.
    pub fn discard(&mut self) {
        self.rows.clear();
        self.selected = None;
    }

    /// The rendered rows, headers included.
    pub fn rows(&self) -> &[RenderedItem] {
        &self.rows
    }

    /// Number of rows, headers included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of selectable (suggestion) rows.
    pub fn selectable_count(&self) -> usize {
        self.rows.iter().filter(|r| r.selectable).count()
    }

    /// Row position of the selection.
    pub fn current_position(&self) -> Option<usize> {
        self.selected
    }

    /// The selected row.
    pub fn current(&self) -> Option<&RenderedItem> {
        self.selected.and_then(|i| self.rows.get(i))
    }

    /// Moves to the next selectable row, wrapping past the end to the start.
    ///
    /// With nothing selected the search starts at the first row.
    pub fn select_next(&mut self) -> Option<&RenderedItem> {
        let n = self.rows.len();
        if n == 0 {
            return None;
        }
        let start = match self.selected {
            None => 0,
            Some(i) => (i + 1) % n,
        };
        self.settle(start, 1)
    }

    /// Moves to the previous selectable row, wrapping before the start to the end.
    ///
    /// With nothing selected the search starts at the last row.
    pub fn select_previous(&mut self) -> Option<&RenderedItem> {
        let n = self.rows.len();
        if n == 0 {
            return None;
        }
        let start = match self.selected {
            None => n - 1,
            Some(i) => (i + n - 1) % n,
        };
        self.settle(start, -1)
    }

    /// Selects the row at `position`, wrapping out-of-range positions and
    /// skipping forward over headers.
    pub fn select_at(&mut self, position: usize) -> Option<&RenderedItem> {
        let n = self.rows.len();
        if n == 0 {
            return None;
        }
        self.settle(position % n, 1)
    }

    /// Deselects the row at `position` if it is the selected one.
    pub fn deselect(&mut self, position: usize) {
        if self.selected == Some(position) {
            self.clear();
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        if let Some(row) = self.selected.and_then(|i| self.rows.get_mut(i)) {
            row.selected = false;
        }
        self.selected = None;
    }

    /// Walks from `start` in steps of `delta` until a selectable row is found,
    /// giving up after one full lap.
    fn settle(&mut self, start: usize, delta: isize) -> Option<&RenderedItem> {
        let n = self.rows.len();
        self.clear();
        let mut position = start;
        for _ in 0..n {
            if self.rows[position].selectable {
                self.rows[position].selected = true;
                self.selected = Some(position);
                trace!(position, "suggestion selected");
                return self.rows.get(position);
            }
            position = wrap(position, delta, n);
        }
        trace!("no selectable suggestion rows");
        None
    }
}

fn wrap(position: usize, delta: isize, n: usize) -> usize {
    if delta >= 0 {
        (position + delta.unsigned_abs()) % n
    } else {
        (position + n - delta.unsigned_abs() % n) % n
    }
}
