//! Single-line editable value with a grapheme-aware cursor.

use unicode_segmentation::UnicodeSegmentation;

/// The text the user types into, with a cursor measured in bytes and always
/// kept on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    value: String,
    pos: usize,
}

impl Input {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.pos = self.value.len();
    }

    /// Empties the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Inserts a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        self.value.insert(self.pos, ch);
        self.pos += ch.len_utf8();
    }

    /// Deletes the grapheme before the cursor.
    pub fn delete_backward(&mut self) -> bool {
        match self.value[..self.pos].grapheme_indices(true).next_back() {
            Some((start, _)) => {
                self.value.replace_range(start..self.pos, "");
                self.pos = start;
                true
            }
            None => false,
        }
    }

    /// Deletes the grapheme after the cursor.
    pub fn delete_forward(&mut self) -> bool {
        match self.value[self.pos..].graphemes(true).next() {
            Some(g) => {
                let end = self.pos + g.len();
                self.value.replace_range(self.pos..end, "");
                true
            }
            None => false,
        }
    }

    /// Moves the cursor one grapheme left.
    pub fn move_left(&mut self) {
        if let Some((start, _)) = self.value[..self.pos].grapheme_indices(true).next_back() {
            self.pos = start;
        }
    }

    /// Moves the cursor one grapheme right.
    pub fn move_right(&mut self) {
        if let Some(g) = self.value[self.pos..].graphemes(true).next() {
            self.pos += g.len();
        }
    }

    /// Moves the cursor to the start.
    pub fn move_start(&mut self) {
        self.pos = 0;
    }

    /// Moves the cursor to the end.
    pub fn move_end(&mut self) {
        self.pos = self.value.len();
    }
}
