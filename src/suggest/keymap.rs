//! Key bindings for the suggestion widget.

use crate::key::{self, Binding, KeyPress};
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings for navigating suggestions and editing the query.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Highlight the next suggestion.
    pub select_next: Binding,
    /// Highlight the previous suggestion.
    pub select_previous: Binding,
    /// Pick the highlighted suggestion or submit the query.
    pub submit: Binding,
    /// Clear the query, or leave the input when it is already empty.
    pub dismiss: Binding,
    /// Delete one character backward.
    pub delete_character_backward: Binding,
    /// Delete one character forward.
    pub delete_character_forward: Binding,
    /// Move the cursor left.
    pub character_backward: Binding,
    /// Move the cursor right.
    pub character_forward: Binding,
    /// Move to the start of the query.
    pub line_start: Binding,
    /// Move to the end of the query.
    pub line_end: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            select_next: Binding::new(vec![
                plain(KeyCode::Down),
                ctrl('n'),
            ])
            .with_help("↓/ctrl+n", "next suggestion"),
            select_previous: Binding::new(vec![
                plain(KeyCode::Up),
                ctrl('p'),
            ])
            .with_help("↑/ctrl+p", "previous suggestion"),
            submit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "pick"),
            dismiss: Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear / leave"),
            delete_character_backward: Binding::new(vec![
                plain(KeyCode::Backspace),
                ctrl('h'),
            ])
            .with_help("backspace", "delete"),
            delete_character_forward: Binding::new(vec![
                plain(KeyCode::Delete),
                ctrl('d'),
            ])
            .with_help("del", "delete forward"),
            character_backward: Binding::new(vec![
                plain(KeyCode::Left),
                ctrl('b'),
            ])
            .with_help("←", "left"),
            character_forward: Binding::new(vec![
                plain(KeyCode::Right),
                ctrl('f'),
            ])
            .with_help("→", "right"),
            line_start: Binding::new(vec![plain(KeyCode::Home), ctrl('a')])
                .with_help("home", "start"),
            line_end: Binding::new(vec![plain(KeyCode::End), ctrl('e')]).with_help("end", "end"),
        }
    }
}

fn plain(code: KeyCode) -> KeyPress {
    code.into()
}

fn ctrl(c: char) -> KeyPress {
    (KeyCode::Char(c), KeyModifiers::CONTROL).into()
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.select_next, &self.select_previous, &self.submit, &self.dismiss]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.select_next, &self.select_previous, &self.submit, &self.dismiss],
            vec![
                &self.delete_character_backward,
                &self.delete_character_forward,
                &self.character_backward,
                &self.character_forward,
                &self.line_start,
                &self.line_end,
            ],
        ]
    }
}
