//! Error types for the suggestion widget.

/// Errors raised while configuring the widget or interpreting a response.
///
/// Configuration variants are fatal: [`ConfigBuilder::build`](super::ConfigBuilder::build)
/// returns them and no widget is constructed. `InvalidPayload` is recovered
/// inside the widget and treated exactly like a failed request.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// The search endpoint prefix is empty.
    #[error("Search endpoint prefix is empty. Pass the URL the query is appended to.")]
    MissingEndpoint,

    /// A required callback was not supplied.
    #[error("Required callback `{0}` was not configured.")]
    MissingCallback(&'static str),

    /// No fetch function was supplied.
    #[error("No fetch function configured. Supply one with `ConfigBuilder::fetch`.")]
    MissingFetcher,

    /// Settings could not be deserialized.
    #[error("Invalid suggestion settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// The endpoint returned JSON that is not a result set.
    #[error("Invalid suggestion payload: {0}")]
    InvalidPayload(String),
}

/// Failure reported by the fetch collaborator.
///
/// The widget only distinguishes success from failure; the variants exist so
/// fetch implementations can describe what went wrong in logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint returned status {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("Could not decode response body: {0}")]
    Decode(String),
}
