//! Typeahead suggestion widget.
//!
//! The widget owns a single-line input. As the user types it queries a
//! remote endpoint through a caller-supplied fetch function, renders the
//! returned suggestions (flat, or grouped under headers) and lets the user
//! highlight one with the arrow keys or the pointer. Enter picks the
//! highlighted suggestion; with nothing highlighted the raw query is
//! submitted instead.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_suggest::suggest::{fetch_fn, new, Config, FetchError};
//!
//! let config = Config::builder("https://example.com/suggest?q=")
//!     .fetch(fetch_fn(|url| async move {
//!         // issue the GET with the HTTP client of your choice
//!         Err(FetchError::Transport(format!("offline: {url}")))
//!     }))
//!     .on_pick(|pick| println!("picked {pick:?}"))
//!     .fallback_search_prefix("https://example.com/search?q=")
//!     .build()
//!     .expect("valid configuration");
//!
//! let mut widget = new(config);
//! widget.focus();
//! ```
//!
//! # Layers
//!
//! - [`Controller`] is the state machine. It consumes [`Event`]s and returns
//!   [`Effect`]s and can be driven directly, without a terminal.
//! - [`Model`] is the bubbletea-rs component around it: it edits the input
//!   on key presses, runs fetches and timers as commands, and calls the
//!   configured hooks.
//!
//! # Response Format
//!
//! The endpoint answers with a JSON array. Elements are strings or objects;
//! labels come from `title`, `name`, `label` or `text` and links from `uri`
//! or `permalink`, unless overridden. An array of arrays is a grouped
//! response whose groups take their headers from the configured group
//! labels by position.

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod keymap;
pub mod methods;
pub mod model;
pub mod query;
pub mod rendering;
pub mod resolver;
pub mod selection;
pub mod style;
pub mod types;


pub use config::{
    fetch_fn, Config, ConfigBuilder, FetchFunc, FetchFuture, FormatFunc, PickFunc,
    SearchEndFunc, SearchStartFunc, SuggestSettings, DEFAULT_BLUR_GRACE,
};
pub use controller::{Controller, Effect, Event};
pub use error::{FetchError, SuggestError};
pub use input::Input;
pub use keymap::KeyMap;
pub use model::{
    new, Edge, HideMsg, Model, NavigateMsg, Offset, PointerAction, PointerMsg, ResponseMsg,
};
pub use query::{encode_query, QueryController, QueryDecision, QueryPhase};
pub use rendering::{find_matches, highlight, render_rows};
pub use resolver::{resolve_label, resolve_uri, Extractor, ResolveFunc, Resolver};
pub use selection::SelectionCursor;
pub use style::{Styles, SELECTED_MARKER};
pub use types::{Group, Pick, RenderedItem, ResultSet, SuggestionRecord};
