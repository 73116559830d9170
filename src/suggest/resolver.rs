//! Label and URI resolution for suggestion records.
//!
//! Records come from the endpoint with no fixed shape, so the display label
//! and the navigation target are found by trying an ordered list of
//! extractors. The first non-empty result wins; when nothing matches the
//! result is an empty string. A configured override replaces the chain
//! entirely.

use super::types::SuggestionRecord;
use std::sync::Arc;

/// Caller-supplied override for label or URI resolution.
pub type ResolveFunc = Arc<dyn Fn(&SuggestionRecord) -> String + Send + Sync>;

/// One step of a resolution chain.
pub type Extractor = fn(&SuggestionRecord) -> Option<String>;

/// Fields probed for a label, in priority order.
pub const LABEL_FIELDS: [&str; 4] = ["title", "name", "label", "text"];

/// Fields probed for a URI, in priority order.
pub const URI_FIELDS: [&str; 2] = ["uri", "permalink"];

/// Uses the record itself when it is a plain string.
pub fn plain_string(record: &SuggestionRecord) -> Option<String> {
    record.as_str().map(str::to_string)
}

/// Reads the `title` field.
pub fn title_field(record: &SuggestionRecord) -> Option<String> {
    record.field("title")
}

/// Reads the `name` field.
pub fn name_field(record: &SuggestionRecord) -> Option<String> {
    record.field("name")
}

/// Reads the `label` field.
pub fn label_field(record: &SuggestionRecord) -> Option<String> {
    record.field("label")
}

/// Reads the `text` field.
pub fn text_field(record: &SuggestionRecord) -> Option<String> {
    record.field("text")
}

/// Reads the `uri` field.
pub fn uri_field(record: &SuggestionRecord) -> Option<String> {
    record.field("uri")
}

/// Reads the `permalink` field.
pub fn permalink_field(record: &SuggestionRecord) -> Option<String> {
    record.field("permalink")
}

/// Default label chain: the string itself, then [`LABEL_FIELDS`].
pub fn default_label_extractors() -> Vec<Extractor> {
    vec![plain_string, title_field, name_field, label_field, text_field]
}

/// Default URI chain: [`URI_FIELDS`].
pub fn default_uri_extractors() -> Vec<Extractor> {
    vec![uri_field, permalink_field]
}

fn first_non_empty(record: &SuggestionRecord, chain: &[Extractor]) -> String {
    chain
        .iter()
        .find_map(|extract| extract(record).filter(|s| !s.is_empty()))
        .unwrap_or_default()
}

/// Resolves a display label, honoring an optional override.
pub fn resolve_label(record: &SuggestionRecord, override_fn: Option<&ResolveFunc>) -> String {
    match override_fn {
        Some(f) => f(record),
        None => first_non_empty(record, &default_label_extractors()),
    }
}

/// Resolves a navigation target, honoring an optional override.
pub fn resolve_uri(record: &SuggestionRecord, override_fn: Option<&ResolveFunc>) -> String {
    match override_fn {
        Some(f) => f(record),
        None => first_non_empty(record, &default_uri_extractors()),
    }
}

/// Label and URI resolution configured for one widget.
#[derive(Clone)]
pub struct Resolver {
    label_override: Option<ResolveFunc>,
    uri_override: Option<ResolveFunc>,
    label_chain: Vec<Extractor>,
    uri_chain: Vec<Extractor>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("label_override", &self.label_override.is_some())
            .field("uri_override", &self.uri_override.is_some())
            .field("label_chain", &self.label_chain.len())
            .field("uri_chain", &self.uri_chain.len())
            .finish()
    }
}

impl Resolver {
    /// Creates a resolver with the default chains and optional overrides.
    pub fn new(label_override: Option<ResolveFunc>, uri_override: Option<ResolveFunc>) -> Self {
        Self {
            label_override,
            uri_override,
            label_chain: default_label_extractors(),
            uri_chain: default_uri_extractors(),
        }
    }

    /// Replaces the label chain used when no override is set.
    pub fn with_label_chain(mut self, chain: Vec<Extractor>) -> Self {
        self.label_chain = chain;
        self
    }

    /// Replaces the URI chain used when no override is set.
    pub fn with_uri_chain(mut self, chain: Vec<Extractor>) -> Self {
        self.uri_chain = chain;
        self
    }

    /// The display label for `record`.
    pub fn label(&self, record: &SuggestionRecord) -> String {
        match &self.label_override {
            Some(f) => f(record),
            None => first_non_empty(record, &self.label_chain),
        }
    }

    /// The navigation target for `record`.
    pub fn uri(&self, record: &SuggestionRecord) -> String {
        match &self.uri_override {
            Some(f) => f(record),
            None => first_non_empty(record, &self.uri_chain),
        }
    }
}
