#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-suggest/")]

//! # bubbletea-suggest
//!
//! A typeahead suggestion widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications. The widget owns a single-line input, queries a remote
//! endpoint as the user types, and shows the returned suggestions in a
//! dropdown that can be driven from the keyboard or the pointer.
//!
//! ## Overview
//!
//! - Requests go out on every value change that meets the minimum query
//!   length; only the newest response is ever applied.
//! - Responses are flat arrays or arrays of groups, each group drawn under a
//!   configurable header.
//! - Labels are highlighted where they match the query.
//! - Enter picks the highlighted suggestion, or submits the raw query (or
//!   navigates to a search page when a fallback prefix is configured).
//!
//! ## Focus Management
//!
//! The widget implements the [`Component`] trait:
//!
//! ```rust
//! use bubbletea_suggest::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let config = SuggestConfig::builder("/api/suggest?q=")
//!     .fetch(fetch_fn(|_url| async { Ok(serde_json::json!([])) }))
//!     .on_pick(|_| {})
//!     .build()
//!     .unwrap();
//! let mut widget = suggest_new(config);
//! handle_focus(&mut widget);
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_suggest::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     search: Suggest,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let config = SuggestConfig::builder("https://example.com/suggest?q=")
//!             .fetch(fetch_fn(|_url| async { Ok(serde_json::json!(["Dune"])) }))
//!             .on_pick(|pick| eprintln!("picked {pick:?}"))
//!             .build()
//!             .unwrap();
//!         let mut search = suggest_new(config);
//!         let cmd = search.focus();
//!         (Self { search }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(nav) = msg.downcast_ref::<SuggestNavigateMsg>() {
//!             eprintln!("open {}", nav.url);
//!             return None;
//!         }
//!         self.search.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.search.view()
//!     }
//! }
//! ```

pub mod key;
pub mod suggest;

use bubbletea_rs::Cmd;

/// Components that can take and release keyboard focus.
///
/// `focus()` may return a command to run as a result of gaining focus.
/// `blur()` releases focus at once; components that animate their exit
/// expose a separate inherent method for that.
pub trait Component {
    /// Gives the component keyboard focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes keyboard focus away from the component.
    fn blur(&mut self);

    /// Whether the component currently has focus.
    fn focused(&self) -> bool;
}

pub use key::{matches_binding, Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use suggest::{
    fetch_fn, new as suggest_new, Config as SuggestConfig, Edge as SuggestEdge,
    KeyMap as SuggestKeyMap, Model as Suggest, NavigateMsg as SuggestNavigateMsg, Pick,
    PointerAction as SuggestPointerAction, PointerMsg as SuggestPointerMsg,
    Styles as SuggestStyles, SuggestError, SuggestSettings,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_suggest::prelude::*;
/// ```
pub mod prelude {
    pub use crate::key::{matches_binding, Binding, KeyMap, KeyPress};
    pub use crate::suggest::{
        fetch_fn, new as suggest_new, Config as SuggestConfig, Edge as SuggestEdge,
        FetchError, KeyMap as SuggestKeyMap, Model as Suggest,
        NavigateMsg as SuggestNavigateMsg, Pick, PointerMsg as SuggestPointerMsg,
        Styles as SuggestStyles, SuggestError, SuggestSettings,
    };
    pub use crate::Component;
}
