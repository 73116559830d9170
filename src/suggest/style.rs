//! Styles for the suggestion widget.
//!
//! The defaults use a dark palette similar to the list component: dim
//! headers and label, a bordered accent for the selected row and an
//! underline for the parts of a label that match the query.

use lipgloss_extras::prelude::*;

/// Marker drawn in front of the selected row.
pub const SELECTED_MARKER: &str = "›";

/// Every style the widget draws with.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Prompt in front of the input value.
    pub prompt: Style,
    /// Input value.
    pub text: Style,
    /// Placeholder shown while the input is empty.
    pub placeholder: Style,
    /// Heading above the whole list.
    pub list_label: Style,
    /// Group header rows.
    pub header: Style,
    /// Unselected suggestion rows.
    pub item: Style,
    /// The selected suggestion row.
    pub selected_item: Style,
    /// Query occurrences inside a label.
    pub highlight: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            prompt: Style::new().foreground(Color::from("#EE6FF8")),
            text: Style::new(),
            placeholder: Style::new().foreground(Color::from("240")),
            list_label: Style::new()
                .foreground(Color::from("#777777"))
                .padding(0, 0, 0, 2),
            header: Style::new()
                .foreground(Color::from("#777777"))
                .bold(true)
                .padding(0, 0, 0, 2),
            item: Style::new()
                .foreground(Color::from("#dddddd"))
                .padding(0, 0, 0, 2),
            selected_item: Style::new()
                .foreground(Color::from("#EE6FF8"))
                .padding(0, 0, 0, 1),
            highlight: Style::new().underline(true),
        }
    }
}
