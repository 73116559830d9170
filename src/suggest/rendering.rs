//! Render pipeline: turns a result set into rows and rows into text.
//!
//! Rows are built fresh for every completed query. Suggestion rows get a
//! flat index that keeps counting across group boundaries; header rows are
//! emitted for non-empty groups and are not counted. Labels have every
//! case-insensitive occurrence of the current query highlighted. The query
//! is matched literally: regex metacharacters typed by the user are escaped.

use super::config::FormatFunc;
use super::model::Model;
use super::resolver::Resolver;
use super::style::{Styles, SELECTED_MARKER};
use super::types::{RenderedItem, ResultSet, SuggestionRecord};
use lipgloss_extras::prelude::*;
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Compiles the case-insensitive, literal pattern for `query`.
///
/// Returns `None` for an empty query.
fn highlight_pattern(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            tracing::warn!(%err, "could not build highlight pattern");
            None
        }
    }
}

fn matches_of(label: &str, pattern: Option<&Regex>) -> Vec<Range<usize>> {
    match pattern {
        Some(pattern) if !label.is_empty() => {
            pattern.find_iter(label).map(|m| m.range()).collect()
        }
        _ => Vec::new(),
    }
}

/// Byte ranges of every case-insensitive, literal occurrence of `query` in `label`.
pub fn find_matches(label: &str, query: &str) -> Vec<Range<usize>> {
    if label.is_empty() {
        return Vec::new();
    }
    matches_of(label, highlight_pattern(query).as_ref())
}

/// Renders `label` with `matches` wrapped in the highlight style.
pub fn highlight(label: &str, matches: &[Range<usize>], normal: &Style, emphasis: &Style) -> String {
    if matches.is_empty() {
        return normal.render(label);
    }
    let mut out = String::new();
    let mut pos = 0;
    for range in matches {
        if range.start > pos {
            out.push_str(&normal.render(&label[pos..range.start]));
        }
        out.push_str(&emphasis.render(&label[range.clone()]));
        pos = range.end;
    }
    if pos < label.len() {
        out.push_str(&normal.render(&label[pos..]));
    }
    out
}

/// Builds the rows for `result_set`.
///
/// `query` is the current input text used for highlighting. When a
/// formatter is configured, each suggestion row's styled content is passed
/// through it.
pub fn render_rows(
    result_set: &ResultSet,
    query: &str,
    resolver: &Resolver,
    styles: &Styles,
    formatter: Option<&FormatFunc>,
) -> Vec<RenderedItem> {
    let mut rows = Vec::with_capacity(result_set.len());
    let mut next_index = 0;
    let pattern = highlight_pattern(query);
    let pattern = pattern.as_ref();
    match result_set {
        ResultSet::Flat(records) => {
            push_records(&mut rows, records, &mut next_index, pattern, resolver, styles, formatter);
        }
        ResultSet::Grouped(groups) => {
            for group in groups.iter().filter(|g| !g.records.is_empty()) {
                let label = group.label.clone().unwrap_or_default();
                let content = styles.header.render(&label);
                rows.push(RenderedItem::header(label, content));
                push_records(
                    &mut rows,
                    &group.records,
                    &mut next_index,
                    pattern,
                    resolver,
                    styles,
                    formatter,
                );
            }
        }
    }
    rows
}

fn push_records(
    rows: &mut Vec<RenderedItem>,
    records: &[SuggestionRecord],
    next_index: &mut usize,
    pattern: Option<&Regex>,
    resolver: &Resolver,
    styles: &Styles,
    formatter: Option<&FormatFunc>,
) {
    for record in records {
        let label = resolver.label(record);
        let matches = matches_of(&label, pattern);
        let content = highlight(&label, &matches, &styles.text, &styles.highlight);
        let mut row = RenderedItem {
            record: Some(record.clone()),
            index: Some(*next_index),
            uri: resolver.uri(record),
            label,
            matches,
            content,
            selectable: true,
            selected: false,
        };
        if let Some(format) = formatter {
            row.content = format(&row, row.content.clone());
        }
        rows.push(row);
        *next_index += 1;
    }
}

/// Pads `line` with spaces up to `width` display columns, ignoring ANSI styling.
pub(super) fn pad_to_width(line: &str, width: usize) -> String {
    if width == 0 {
        return line.to_string();
    }
    let visible = strip_ansi_escapes::strip_str(line);
    let used = UnicodeWidthStr::width(visible.as_str());
    if used >= width {
        return line.to_string();
    }
    format!("{line}{}", " ".repeat(width - used))
}

impl Model {
    /// Renders the input line: prompt, then value or placeholder.
    pub(super) fn view_input(&self) -> String {
        let styles = self.controller.styles();
        let value = self.input.value();
        let body = if value.is_empty() && !self.placeholder.is_empty() {
            styles.placeholder.render(&self.placeholder)
        } else {
            styles.text.render(value)
        };
        format!("{}{}", styles.prompt.render(&self.prompt), body)
    }

    /// Renders the dropdown, or an empty string while it is hidden.
    pub(super) fn view_list(&self) -> String {
        if !self.controller.visible() {
            return String::new();
        }
        let styles = self.controller.styles();
        let mut lines = Vec::with_capacity(self.controller.rows().len() + 1);
        if !self.list_label.is_empty() {
            lines.push(styles.list_label.render(&self.list_label));
        }
        for row in self.controller.rows() {
            let line = if row.is_header() {
                row.content.clone()
            } else if row.selected {
                styles
                    .selected_item
                    .render(&format!("{SELECTED_MARKER} {}", row.content))
            } else {
                styles.item.render(&row.content)
            };
            lines.push(pad_to_width(&line, self.width));
        }
        lines.join("\n")
    }

    /// Applies the configured offset to a rendered block.
    pub(super) fn apply_offset(&self, block: &str) -> String {
        let left = " ".repeat(self.offset.left as usize);
        let right = " ".repeat(self.offset.right as usize);
        let mut out = "\n".repeat(self.offset.top as usize);
        let body: Vec<String> = block
            .lines()
            .map(|line| format!("{left}{line}{right}"))
            .collect();
        out.push_str(&body.join("\n"));
        out.push_str(&"\n".repeat(self.offset.bottom as usize));
        out
    }
}
