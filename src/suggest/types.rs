//! Core data types: suggestion records, result sets, rendered rows and picks.

use super::error::SuggestError;
use serde_json::Value;
use std::ops::Range;

/// One candidate returned by the search endpoint.
///
/// The record has no fixed shape. It is usually a string or a JSON object;
/// label and link extraction is left to the [`Resolver`](super::Resolver).
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRecord(Value);

impl SuggestionRecord {
    /// Wraps a JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The record as a string, when it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Returns a field of an object record rendered as text.
    ///
    /// Strings are returned as is, numbers and booleans are stringified.
    /// Missing fields, non-object records and nested values yield `None`.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The underlying JSON value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consumes the record and returns the JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for SuggestionRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for SuggestionRecord {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

/// A labelled run of suggestions rendered under a shared header.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Header text, taken positionally from the configured group labels.
    pub label: Option<String>,
    /// The suggestions in this group, in endpoint order.
    pub records: Vec<SuggestionRecord>,
}

/// The suggestions of one response, flat or grouped.
///
/// The shape is decided once in [`ResultSet::from_payload`] and never
/// re-inspected downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    /// An ordered list of suggestions.
    Flat(Vec<SuggestionRecord>),
    /// An ordered list of groups.
    Grouped(Vec<Group>),
}

impl ResultSet {
    /// Interprets a response body.
    ///
    /// The body must be a JSON array. When its first element is itself an
    /// array the body is grouped and every element must be an array; group
    /// `i` takes `labels[i]` as its header. Otherwise the body is flat and
    /// may not contain arrays.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidPayload`] for non-array bodies and for
    /// bodies that mix nested and flat elements.
    pub fn from_payload(payload: Value, labels: &[String]) -> Result<Self, SuggestError> {
        let elements = match payload {
            Value::Array(elements) => elements,
            other => {
                return Err(SuggestError::InvalidPayload(format!(
                    "expected an array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let grouped = matches!(elements.first(), Some(Value::Array(_)));
        if !grouped {
            if elements.iter().any(Value::is_array) {
                return Err(SuggestError::InvalidPayload(
                    "flat result set contains a nested array".to_string(),
                ));
            }
            return Ok(Self::Flat(
                elements.into_iter().map(SuggestionRecord::new).collect(),
            ));
        }

        let mut groups = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            let Value::Array(records) = element else {
                return Err(SuggestError::InvalidPayload(format!(
                    "grouped result set has a non-array element at position {i}"
                )));
            };
            if records.iter().any(Value::is_array) {
                return Err(SuggestError::InvalidPayload(format!(
                    "group {i} nests deeper than one level"
                )));
            }
            groups.push(Group {
                label: labels.get(i).cloned(),
                records: records.into_iter().map(SuggestionRecord::new).collect(),
            });
        }
        Ok(Self::Grouped(groups))
    }

    /// Number of leaf suggestions across all groups.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(records) => records.len(),
            Self::Grouped(groups) => groups.iter().map(|g| g.records.len()).sum(),
        }
    }

    /// True when there is not a single suggestion.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One row of the rendered dropdown.
///
/// Suggestion rows carry their record and a flat index that keeps counting
/// across group boundaries. Header rows carry neither and are never
/// selectable.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    /// The suggestion behind this row; `None` for headers.
    pub record: Option<SuggestionRecord>,
    /// Position among suggestion rows; `None` for headers.
    pub index: Option<usize>,
    /// Resolved label (or header text), unstyled.
    pub label: String,
    /// Byte ranges in `label` that match the current query.
    pub matches: Vec<Range<usize>>,
    /// Resolved navigation target; empty for headers and unresolved records.
    pub uri: String,
    /// Styled row text after the optional formatter hook.
    pub content: String,
    /// False only for headers.
    pub selectable: bool,
    /// Set by the selection cursor; at most one row at a time.
    pub selected: bool,
}

impl RenderedItem {
    /// Creates a header row.
    pub fn header(label: impl Into<String>, content: String) -> Self {
        Self {
            record: None,
            index: None,
            label: label.into(),
            matches: Vec::new(),
            uri: String::new(),
            content,
            selectable: false,
            selected: false,
        }
    }

    /// True for group header rows.
    pub fn is_header(&self) -> bool {
        self.record.is_none()
    }
}

/// The user's final choice, delivered to the pick callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Pick {
    /// A suggestion chosen from the list.
    Suggestion(SuggestionRecord),
    /// Free text submitted without a selected suggestion.
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_its_value() {
        let value = json!({"title": "Dune", "year": 1965});
        let record = SuggestionRecord::new(value.clone());
        assert_eq!(record.field("year").as_deref(), Some("1965"));
        assert_eq!(record.into_value(), value);
    }

    #[test]
    fn test_flat_payload() {
        let set = ResultSet::from_payload(json!(["a", {"title": "b"}]), &[]).unwrap();
        assert!(matches!(set, ResultSet::Flat(ref r) if r.len() == 2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_grouped_payload_takes_labels_by_position() {
        let labels = vec!["Authors".to_string()];
        let set = ResultSet::from_payload(json!([["a"], ["b", "c"]]), &labels).unwrap();
        let ResultSet::Grouped(groups) = set else {
            panic!("expected grouped result set");
        };
        assert_eq!(groups[0].label.as_deref(), Some("Authors"));
        assert_eq!(groups[1].label, None);
        assert_eq!(groups[1].records.len(), 2);
    }

    #[test]
    fn test_empty_array_is_empty_flat() {
        let set = ResultSet::from_payload(json!([]), &[]).unwrap();
        assert_eq!(set, ResultSet::Flat(Vec::new()));
        assert!(set.is_empty());
    }

    #[test]
    fn test_grouped_with_only_empty_groups_is_empty() {
        let set = ResultSet::from_payload(json!([[], []]), &[]).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_mixed_nesting_is_rejected() {
        assert!(ResultSet::from_payload(json!(["a", ["b"]]), &[]).is_err());
        assert!(ResultSet::from_payload(json!([["a"], "b"]), &[]).is_err());
    }

    #[test]
    fn test_non_array_is_rejected() {
        let err = ResultSet::from_payload(json!({"results": []}), &[]).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_record_field_stringifies_scalars() {
        let record = SuggestionRecord::new(json!({"id": 7, "ok": true, "nested": {}}));
        assert_eq!(record.field("id").as_deref(), Some("7"));
        assert_eq!(record.field("ok").as_deref(), Some("true"));
        assert_eq!(record.field("nested"), None);
        assert_eq!(record.field("missing"), None);
    }
}
