//! Widget configuration: plain settings plus the callbacks and collaborators.
//!
//! The data part lives in [`SuggestSettings`], which can be deserialized
//! from JSON so hosts can keep it alongside their own configuration. The
//! behavioral part (fetch function, pick callback, hooks, resolver
//! overrides, row formatter) is attached through [`ConfigBuilder`].
//!
//! ```rust
//! use bubbletea_suggest::suggest::{fetch_fn, Config};
//! use serde_json::json;
//!
//! let config = Config::builder("/api/suggest?q=")
//!     .fetch(fetch_fn(|_url| async { Ok(json!(["Dune", "Dune Messiah"])) }))
//!     .on_pick(|pick| println!("picked {pick:?}"))
//!     .fallback_search_prefix("/search?q=")
//!     .build()
//!     .expect("valid configuration");
//! assert_eq!(config.settings().min_query_length, 1);
//! ```

use super::error::{FetchError, SuggestError};
use super::resolver::ResolveFunc;
use super::types::{Pick, RenderedItem, SuggestionRecord};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Default delay between losing focus and hiding the list.
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(200);

/// Future returned by a fetch function.
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<Value, FetchError>> + Send>>;

/// Issues a GET to the given URL and resolves to the decoded JSON body.
pub type FetchFunc = Arc<dyn Fn(String) -> FetchFuture + Send + Sync>;

/// Receives the user's final choice.
pub type PickFunc = Box<dyn Fn(Pick) + Send>;

/// Called with the query when a request is issued.
pub type SearchStartFunc = Box<dyn Fn(&str) + Send>;

/// Called when the outstanding request ends, successfully or not.
pub type SearchEndFunc = Box<dyn Fn() + Send>;

/// Post-processes a suggestion row's styled content.
pub type FormatFunc = Arc<dyn Fn(&RenderedItem, String) -> String + Send + Sync>;

/// Wraps an async closure as a [`FetchFunc`].
pub fn fetch_fn<F, Fut>(f: F) -> FetchFunc
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, FetchError>> + Send + 'static,
{
    Arc::new(move |url| Box::pin(f(url)) as FetchFuture)
}

fn default_list_label() -> String {
    "Suggestions".to_string()
}

/// Plain-data settings of a widget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    /// URL the encoded query is appended to when searching.
    pub search_endpoint_prefix: String,
    /// When set, submitting free text navigates to this prefix plus the query.
    pub fallback_search_prefix: Option<String>,
    /// Header text for each group of a grouped response, by position.
    pub group_labels: Vec<String>,
    /// Heading above the whole list; empty hides it.
    pub list_label: String,
    /// Minimum number of characters before a search is issued.
    pub min_query_length: usize,
    /// Delay in milliseconds between blur and hiding the list.
    pub blur_grace_ms: u64,
    /// Width rows are padded to; 0 disables padding.
    pub width: usize,
    /// Prompt drawn before the input value.
    pub prompt: String,
    /// Placeholder shown while the input is empty.
    pub placeholder: String,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            search_endpoint_prefix: String::new(),
            fallback_search_prefix: None,
            group_labels: Vec::new(),
            list_label: default_list_label(),
            min_query_length: 1,
            blur_grace_ms: DEFAULT_BLUR_GRACE.as_millis() as u64,
            width: 0,
            prompt: "> ".to_string(),
            placeholder: String::new(),
        }
    }
}

impl SuggestSettings {
    /// Parses settings from JSON; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidSettings`] when the JSON is malformed
    /// or a key has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, SuggestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The blur grace delay.
    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

/// Complete, validated widget configuration.
pub struct Config {
    pub(crate) settings: SuggestSettings,
    pub(crate) fetch: FetchFunc,
    pub(crate) on_pick: PickFunc,
    pub(crate) on_search_start: Option<SearchStartFunc>,
    pub(crate) on_search_end: Option<SearchEndFunc>,
    pub(crate) label_with: Option<ResolveFunc>,
    pub(crate) uri_with: Option<ResolveFunc>,
    pub(crate) format_item: Option<FormatFunc>,
}

impl Config {
    /// Starts a configuration for the given search endpoint prefix.
    pub fn builder(search_endpoint_prefix: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::from_settings(SuggestSettings {
            search_endpoint_prefix: search_endpoint_prefix.into(),
            ..SuggestSettings::default()
        })
    }

    /// The plain settings.
    pub fn settings(&self) -> &SuggestSettings {
        &self.settings
    }
}

/// Builder for [`Config`].
#[derive(Default)]
pub struct ConfigBuilder {
    settings: SuggestSettings,
    fetch: Option<FetchFunc>,
    on_pick: Option<PickFunc>,
    on_search_start: Option<SearchStartFunc>,
    on_search_end: Option<SearchEndFunc>,
    label_with: Option<ResolveFunc>,
    uri_with: Option<ResolveFunc>,
    format_item: Option<FormatFunc>,
}

impl ConfigBuilder {
    /// Starts from previously loaded settings.
    pub fn from_settings(settings: SuggestSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Sets the fetch collaborator. Required.
    pub fn fetch(mut self, fetch: FetchFunc) -> Self {
        self.fetch = Some(fetch);
        self
    }

    /// Sets the pick callback. Required.
    pub fn on_pick(mut self, f: impl Fn(Pick) + Send + 'static) -> Self {
        self.on_pick = Some(Box::new(f));
        self
    }

    /// Hook called with the query whenever a request is issued.
    pub fn on_search_start(mut self, f: impl Fn(&str) + Send + 'static) -> Self {
        self.on_search_start = Some(Box::new(f));
        self
    }

    /// Hook called whenever the outstanding request ends.
    pub fn on_search_end(mut self, f: impl Fn() + Send + 'static) -> Self {
        self.on_search_end = Some(Box::new(f));
        self
    }

    /// Overrides label resolution.
    pub fn label_with(
        mut self,
        f: impl Fn(&SuggestionRecord) -> String + Send + Sync + 'static,
    ) -> Self {
        self.label_with = Some(Arc::new(f));
        self
    }

    /// Overrides URI resolution.
    pub fn uri_with(
        mut self,
        f: impl Fn(&SuggestionRecord) -> String + Send + Sync + 'static,
    ) -> Self {
        self.uri_with = Some(Arc::new(f));
        self
    }

    /// Post-processes each suggestion row.
    pub fn format_item(
        mut self,
        f: impl Fn(&RenderedItem, String) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format_item = Some(Arc::new(f));
        self
    }

    /// Header labels for grouped responses.
    pub fn group_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.settings.group_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Prefix for free-text submissions.
    pub fn fallback_search_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.fallback_search_prefix = Some(prefix.into());
        self
    }

    /// Heading above the list.
    pub fn list_label(mut self, label: impl Into<String>) -> Self {
        self.settings.list_label = label.into();
        self
    }

    /// Minimum query length in characters.
    pub fn min_query_length(mut self, length: usize) -> Self {
        self.settings.min_query_length = length;
        self
    }

    /// Delay between blur and hiding the list.
    pub fn blur_grace(mut self, delay: Duration) -> Self {
        self.settings.blur_grace_ms = delay.as_millis() as u64;
        self
    }

    /// Width rows are padded to.
    pub fn width(mut self, width: usize) -> Self {
        self.settings.width = width;
        self
    }

    /// Placeholder shown while the input is empty.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.settings.placeholder = placeholder.into();
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// - [`SuggestError::MissingEndpoint`] when the endpoint prefix is empty
    /// - [`SuggestError::MissingFetcher`] when no fetch function was given
    /// - [`SuggestError::MissingCallback`] when no pick callback was given
    pub fn build(self) -> Result<Config, SuggestError> {
        if self.settings.search_endpoint_prefix.trim().is_empty() {
            return Err(SuggestError::MissingEndpoint);
        }
        let fetch = self.fetch.ok_or(SuggestError::MissingFetcher)?;
        let on_pick = self
            .on_pick
            .ok_or(SuggestError::MissingCallback("on_pick"))?;
        Ok(Config {
            settings: self.settings,
            fetch,
            on_pick,
            on_search_start: self.on_search_start,
            on_search_end: self.on_search_end,
            label_with: self.label_with,
            uri_with: self.uri_with,
            format_item: self.format_item,
        })
    }
}
