//! Query controller: decides when a keystroke becomes a search request.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::debug;

/// Lifecycle of the current search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    /// No request outstanding.
    #[default]
    Idle,
    /// A request was issued and its response has not been applied.
    Pending,
}

/// Outcome of observing the input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDecision {
    /// The value did not change; nothing to do.
    Unchanged,
    /// The value became empty.
    Cleared,
    /// The value is shorter than the minimum query length.
    Rejected,
    /// A request should be issued.
    Search {
        /// Sequence number tagging the request.
        sequence: u64,
        /// Full request URL.
        url: String,
    },
}

/// Percent-encodes a query for use in a URL.
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, NON_ALPHANUMERIC).to_string()
}

/// Gates search requests on value changes and a minimum length, and tags
/// each request with a sequence number so only the newest response is
/// applied.
#[derive(Debug, Clone)]
pub struct QueryController {
    endpoint_prefix: String,
    min_length: usize,
    last_value: String,
    phase: QueryPhase,
    issued: u64,
}

impl QueryController {
    /// Creates a controller for `endpoint_prefix`.
    ///
    /// `min_length` is measured in characters; values below 1 are raised to 1.
    pub fn new(endpoint_prefix: impl Into<String>, min_length: usize) -> Self {
        Self {
            endpoint_prefix: endpoint_prefix.into(),
            min_length: min_length.max(1),
            last_value: String::new(),
            phase: QueryPhase::Idle,
            issued: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    /// True while a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.phase == QueryPhase::Pending
    }

    /// The last observed input value.
    pub fn last_value(&self) -> &str {
        &self.last_value
    }

    /// Sequence number of the most recently issued request.
    pub fn latest_sequence(&self) -> u64 {
        self.issued
    }

    /// Whether `query` is long enough to search for.
    pub fn is_valid(&self, query: &str) -> bool {
        query.chars().count() >= self.min_length
    }

    /// Request URL for `query`.
    pub fn url_for(&self, query: &str) -> String {
        format!("{}{}", self.endpoint_prefix, encode_query(query))
    }

    /// Records `value` and decides what it means.
    ///
    /// Empty and too-short values invalidate any outstanding request so its
    /// response is dropped when it arrives.
    pub fn observe(&mut self, value: &str) -> QueryDecision {
        if value == self.last_value {
            return QueryDecision::Unchanged;
        }
        self.last_value = value.to_string();

        if value.is_empty() {
            self.cancel();
            return QueryDecision::Cleared;
        }
        if !self.is_valid(value) {
            self.cancel();
            return QueryDecision::Rejected;
        }

        self.issued += 1;
        self.phase = QueryPhase::Pending;
        let url = self.url_for(value);
        debug!(sequence = self.issued, %url, "issuing suggestion query");
        QueryDecision::Search {
            sequence: self.issued,
            url,
        }
    }

    /// Accepts a response if it belongs to the newest request.
    ///
    /// Returns `false` for stale sequences and for responses that arrive
    /// after the request was cancelled; those must be dropped.
    pub fn settle(&mut self, sequence: u64) -> bool {
        if self.phase != QueryPhase::Pending || sequence != self.issued {
            debug!(
                sequence,
                latest = self.issued,
                "dropping stale suggestion response"
            );
            return false;
        }
        self.phase = QueryPhase::Idle;
        true
    }

    /// Invalidates the outstanding request, if any.
    ///
    /// Returns whether a request was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.phase = QueryPhase::Idle;
        was_pending
    }
}
