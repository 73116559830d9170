//! The suggestion widget component and its messages.

use super::config::{Config, FetchFunc, PickFunc, SearchEndFunc, SearchStartFunc};
use super::controller::Controller;
use super::error::FetchError;
use super::input::Input;
use super::keymap::KeyMap;
use super::resolver::Resolver;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Delivered when a fetch issued by a widget finishes.
#[derive(Debug, Clone)]
pub struct ResponseMsg {
    pub(crate) id: u64,
    pub(crate) sequence: u64,
    pub(crate) outcome: Result<Value, FetchError>,
}

/// Delivered when a blur grace period ends.
#[derive(Debug, Clone, Copy)]
pub struct HideMsg {
    pub(crate) id: u64,
    pub(crate) generation: u64,
}

/// Emitted when submitting free text should navigate to a search page.
///
/// The widget does not navigate itself; the host handles this message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateMsg {
    /// Target URL: the fallback prefix followed by the encoded query.
    pub url: String,
}

/// Kind of pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// The pointer moved onto a row.
    Enter,
    /// The pointer left a row.
    Leave,
    /// A row was clicked.
    Click,
}

/// Pointer interaction with a list row, sent by the host after mapping
/// mouse coordinates to a row position (headers count as rows).
///
/// `id` is the target widget's [`Model::id`]; other widgets ignore the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMsg {
    /// Widget the interaction is addressed to.
    pub id: u64,
    /// What happened.
    pub action: PointerAction,
    /// Row position, headers included.
    pub row: usize,
}

impl PointerMsg {
    /// The pointer moved onto `row` of widget `id`.
    pub fn enter(id: u64, row: usize) -> Self {
        Self { id, action: PointerAction::Enter, row }
    }

    /// The pointer left `row` of widget `id`.
    pub fn leave(id: u64, row: usize) -> Self {
        Self { id, action: PointerAction::Leave, row }
    }

    /// `row` of widget `id` was clicked.
    pub fn click(id: u64, row: usize) -> Self {
        Self { id, action: PointerAction::Click, row }
    }
}

/// Edge of the list an offset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Blank lines above the list.
    Top,
    /// Blank columns right of each row.
    Right,
    /// Blank lines below the list.
    Bottom,
    /// Blank columns left of each row.
    Left,
}

/// Blank space around the rendered list, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    /// Lines above.
    pub top: u16,
    /// Columns to the right.
    pub right: u16,
    /// Lines below.
    pub bottom: u16,
    /// Columns to the left.
    pub left: u16,
}

/// A typeahead input with a dropdown of remote suggestions.
///
/// The widget is embedded in a host bubbletea-rs model: forward messages to
/// [`Model::update`], return the commands it produces, and draw
/// [`Model::view`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_suggest::suggest::{fetch_fn, new, Config};
/// use serde_json::json;
///
/// let config = Config::builder("https://example.com/suggest?q=")
///     .fetch(fetch_fn(|_url| async { Ok(json!([{"title": "Dune"}])) }))
///     .on_pick(|pick| println!("{pick:?}"))
///     .group_labels(["Authors", "Titles"])
///     .build()
///     .unwrap();
/// let mut widget = new(config);
/// widget.focus();
/// assert!(widget.focused());
/// ```
pub struct Model {
    pub(super) id: u64,
    pub(super) focus: bool,
    pub(super) input: Input,
    pub(super) controller: Controller,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Prompt drawn before the value.
    pub prompt: String,
    /// Placeholder shown while the value is empty.
    pub placeholder: String,
    pub(super) list_label: String,
    pub(super) width: usize,
    pub(super) offset: Offset,
    pub(super) fetch: FetchFunc,
    pub(super) on_pick: PickFunc,
    pub(super) on_search_start: Option<SearchStartFunc>,
    pub(super) on_search_end: Option<SearchEndFunc>,
}

/// Creates a widget from a validated configuration.
///
/// The widget starts unfocused with an empty value.
pub fn new(config: Config) -> Model {
    let Config {
        settings,
        fetch,
        on_pick,
        on_search_start,
        on_search_end,
        label_with,
        uri_with,
        format_item,
    } = config;
    let resolver = Resolver::new(label_with, uri_with);
    let controller = Controller::new(&settings, resolver, format_item);
    Model {
        id: next_id(),
        focus: false,
        input: Input::new(),
        controller,
        key_map: KeyMap::default(),
        prompt: settings.prompt,
        placeholder: settings.placeholder,
        list_label: settings.list_label,
        width: settings.width,
        offset: Offset::default(),
        fetch,
        on_pick,
        on_search_start,
        on_search_end,
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("focus", &self.focus)
            .field("input", &self.input)
            .field("controller", &self.controller)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}
