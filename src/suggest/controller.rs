//! Widget state machine.
//!
//! [`Controller::handle`] takes one [`Event`] and returns the side effects
//! the host must perform. It never touches the terminal, the network or a
//! callback itself, so the whole transition table can be exercised without
//! a runtime.

use super::config::{FormatFunc, SuggestSettings};
use super::query::{encode_query, QueryController, QueryDecision};
use super::rendering::render_rows;
use super::resolver::Resolver;
use super::selection::SelectionCursor;
use super::style::Styles;
use super::types::{Pick, RenderedItem, ResultSet};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Something that happened to the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// A blur grace period ended.
    HideElapsed {
        /// Generation the hide was scheduled for.
        generation: u64,
    },
    /// Escape was pressed.
    Escape,
    /// Move the highlight up.
    SelectPrevious,
    /// Move the highlight down.
    SelectNext,
    /// Enter was pressed.
    Submit,
    /// The input value after an edit.
    Input(String),
    /// A request finished with a body.
    Response {
        /// Sequence number of the request.
        sequence: u64,
        /// Decoded JSON body.
        payload: Value,
    },
    /// A request failed.
    Failure {
        /// Sequence number of the request.
        sequence: u64,
        /// Description of the failure.
        error: String,
    },
    /// The pointer moved onto the row at this position.
    PointerEnter(usize),
    /// The pointer left the row at this position.
    PointerLeave(usize),
    /// The row at this position was clicked.
    PointerClick(usize),
    /// Clear the input and hide the list.
    Reset,
}

/// Work the host performs on behalf of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue a GET to `url` and report back with `sequence`.
    Fetch {
        /// Sequence number to tag the response with.
        sequence: u64,
        /// Request URL.
        url: String,
    },
    /// Run the search-start hook with this query.
    SearchStarted(String),
    /// Run the search-end hook.
    SearchEnded,
    /// Deliver [`Event::HideElapsed`] with `generation` after `delay`.
    ScheduleHide {
        /// Generation to report back.
        generation: u64,
        /// How long to wait.
        delay: Duration,
    },
    /// Empty the input field.
    ClearInput,
    /// Take focus away from the input.
    BlurInput,
    /// Deliver a pick to the host.
    Pick(Pick),
    /// Navigate to a URL.
    Navigate(String),
}

/// The widget's behavioral state.
pub struct Controller {
    value: String,
    focused: bool,
    visible: bool,
    interactive: bool,
    result_set: Option<ResultSet>,
    cursor: SelectionCursor,
    query: QueryController,
    hide_generation: u64,
    fallback_search_prefix: Option<String>,
    group_labels: Vec<String>,
    blur_grace: Duration,
    resolver: Resolver,
    formatter: Option<FormatFunc>,
    styles: Styles,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("value", &self.value)
            .field("focused", &self.focused)
            .field("visible", &self.visible)
            .field("interactive", &self.interactive)
            .field("rows", &self.cursor.len())
            .field("query", &self.query)
            .field("hide_generation", &self.hide_generation)
            .field("resolver", &self.resolver)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Controller {
    /// Creates an idle, unfocused controller.
    pub fn new(settings: &SuggestSettings, resolver: Resolver, formatter: Option<FormatFunc>) -> Self {
        Self {
            value: String::new(),
            focused: false,
            visible: false,
            interactive: true,
            result_set: None,
            cursor: SelectionCursor::new(),
            query: QueryController::new(
                settings.search_endpoint_prefix.clone(),
                settings.min_query_length,
            ),
            hide_generation: 0,
            fallback_search_prefix: settings.fallback_search_prefix.clone(),
            group_labels: settings.group_labels.clone(),
            blur_grace: settings.blur_grace(),
            resolver,
            formatter,
            styles: Styles::default(),
        }
    }

    /// Current input value as last seen by the controller.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the input is considered focused.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Whether the list is shown.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether pointer interaction with rows is enabled.
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// The current result set.
    pub fn result_set(&self) -> Option<&ResultSet> {
        self.result_set.as_ref()
    }

    /// The rendered rows, headers included.
    pub fn rows(&self) -> &[RenderedItem] {
        self.cursor.rows()
    }

    /// The selected row.
    pub fn selected(&self) -> Option<&RenderedItem> {
        self.cursor.current()
    }

    /// The query controller.
    pub fn query(&self) -> &QueryController {
        &self.query
    }

    pub(crate) fn hide_generation(&self) -> u64 {
        self.hide_generation
    }

    /// Styles used for rendering rows.
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Replaces the styles. Takes effect from the next completed query.
    pub fn set_styles(&mut self, styles: Styles) {
        self.styles = styles;
    }

    /// Applies `event` and returns the effects to perform, in order.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Focus => {
                self.focused = true;
                // Invalidates any hide scheduled by an earlier blur.
                self.hide_generation += 1;
                self.visible = self.has_suggestions();
                Vec::new()
            }
            Event::Blur => {
                self.hide_generation += 1;
                vec![Effect::ScheduleHide {
                    generation: self.hide_generation,
                    delay: self.blur_grace,
                }]
            }
            Event::HideElapsed { generation } => {
                if generation == self.hide_generation {
                    self.focused = false;
                    self.visible = false;
                }
                Vec::new()
            }
            Event::Escape => self.escape(),
            Event::SelectPrevious => {
                self.cursor.select_previous();
                Vec::new()
            }
            Event::SelectNext => {
                self.cursor.select_next();
                Vec::new()
            }
            Event::Submit => self.submit(),
            Event::Input(value) => self.input(value),
            Event::Response { sequence, payload } => self.complete(sequence, payload),
            Event::Failure { sequence, error } => self.fail(sequence, &error),
            Event::PointerEnter(position) => {
                if self.pointer_enabled() {
                    self.cursor.select_at(position);
                }
                Vec::new()
            }
            Event::PointerLeave(position) => {
                if self.pointer_enabled() {
                    self.cursor.deselect(position);
                }
                Vec::new()
            }
            Event::PointerClick(position) => self.click(position),
            Event::Reset => {
                let mut effects = vec![Effect::ClearInput];
                effects.extend(self.input(String::new()));
                effects
            }
        }
    }

    fn has_suggestions(&self) -> bool {
        self.cursor.selectable_count() > 0
    }

    fn pointer_enabled(&self) -> bool {
        self.interactive && self.visible
    }

    fn escape(&mut self) -> Vec<Effect> {
        if !self.focused {
            return Vec::new();
        }
        if self.value.is_empty() {
            return vec![Effect::BlurInput];
        }
        let mut effects = vec![Effect::ClearInput];
        effects.extend(self.input(String::new()));
        effects
    }

    fn submit(&mut self) -> Vec<Effect> {
        if !self.focused || self.value.is_empty() {
            return Vec::new();
        }
        if let Some(record) = self.cursor.current().and_then(|row| row.record.clone()) {
            return vec![Effect::Pick(Pick::Suggestion(record))];
        }
        match &self.fallback_search_prefix {
            Some(prefix) => {
                let url = format!("{prefix}{}", encode_query(&self.value));
                debug!(%url, "submitting free-text search");
                vec![Effect::Navigate(url)]
            }
            None => vec![Effect::Pick(Pick::Query(self.value.clone()))],
        }
    }

    fn input(&mut self, value: String) -> Vec<Effect> {
        self.value = value;
        let was_pending = self.query.is_pending();
        match self.query.observe(&self.value) {
            QueryDecision::Unchanged => Vec::new(),
            QueryDecision::Cleared | QueryDecision::Rejected => {
                self.discard_suggestions();
                self.interactive = true;
                if was_pending {
                    vec![Effect::SearchEnded]
                } else {
                    Vec::new()
                }
            }
            QueryDecision::Search { sequence, url } => {
                self.interactive = false;
                vec![
                    Effect::SearchStarted(self.value.clone()),
                    Effect::Fetch { sequence, url },
                ]
            }
        }
    }

    fn complete(&mut self, sequence: u64, payload: Value) -> Vec<Effect> {
        if !self.query.settle(sequence) {
            return Vec::new();
        }
        self.interactive = true;
        match ResultSet::from_payload(payload, &self.group_labels) {
            Ok(result_set) => {
                debug!(sequence, suggestions = result_set.len(), "suggestion query completed");
                self.show_results(result_set);
            }
            Err(err) => warn!(sequence, %err, "ignoring suggestion response"),
        }
        vec![Effect::SearchEnded]
    }

    fn fail(&mut self, sequence: u64, error: &str) -> Vec<Effect> {
        if !self.query.settle(sequence) {
            return Vec::new();
        }
        warn!(sequence, error, "suggestion query failed");
        self.interactive = true;
        vec![Effect::SearchEnded]
    }

    fn click(&mut self, position: usize) -> Vec<Effect> {
        if !self.pointer_enabled() {
            return Vec::new();
        }
        // Only the clicked row itself can be picked; headers and positions
        // past the end are inert.
        let clickable = self
            .cursor
            .rows()
            .get(position)
            .is_some_and(|row| row.selectable);
        if !clickable {
            debug!(position, "ignoring click outside the suggestion rows");
            return Vec::new();
        }
        self.cursor.select_at(position);
        match self.cursor.current().and_then(|row| row.record.clone()) {
            Some(record) => vec![Effect::Pick(Pick::Suggestion(record))],
            None => Vec::new(),
        }
    }

    fn show_results(&mut self, result_set: ResultSet) {
        let rows = render_rows(
            &result_set,
            &self.value,
            &self.resolver,
            &self.styles,
            self.formatter.as_ref(),
        );
        self.cursor.replace(rows);
        self.result_set = (!result_set.is_empty()).then_some(result_set);
        self.visible = self.focused && self.has_suggestions();
    }

    fn discard_suggestions(&mut self) {
        self.result_set = None;
        self.cursor.discard();
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::types::SuggestionRecord;
    use serde_json::json;

    fn settings() -> SuggestSettings {
        SuggestSettings {
            search_endpoint_prefix: "/api/suggest?q=".to_string(),
            group_labels: vec!["Authors".to_string(), "Titles".to_string()],
            ..SuggestSettings::default()
        }
    }

    fn focused(settings: &SuggestSettings) -> Controller {
        let mut c = Controller::new(settings, Resolver::default(), None);
        c.handle(Event::Focus);
        c
    }

    fn fetched_sequence(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Fetch { sequence, .. } => Some(*sequence),
                _ => None,
            })
            .expect("a fetch effect")
    }

    fn with_results(payload: Value) -> Controller {
        let mut c = focused(&settings());
        let effects = c.handle(Event::Input("ab".into()));
        let sequence = fetched_sequence(&effects);
        c.handle(Event::Response { sequence, payload });
        c
    }

    #[test]
    fn test_typing_issues_search() {
        let mut c = focused(&settings());
        let effects = c.handle(Event::Input("du ne".into()));
        assert_eq!(
            effects,
            vec![
                Effect::SearchStarted("du ne".into()),
                Effect::Fetch {
                    sequence: 1,
                    url: "/api/suggest?q=du%20ne".into()
                },
            ]
        );
        assert!(!c.interactive());
    }

    #[test]
    fn test_unchanged_value_is_noop() {
        let mut c = focused(&settings());
        c.handle(Event::Input("ab".into()));
        assert!(c.handle(Event::Input("ab".into())).is_empty());
    }

    #[test]
    fn test_short_query_clears_without_request() {
        let mut c = with_results(json!(["Abacus"]));
        assert!(c.visible());
        let mut s = settings();
        s.min_query_length = 3;
        let mut short = focused(&s);
        assert!(short.handle(Event::Input("ab".into())).is_empty());
        assert!(!short.visible());

        // Clearing the input discards the old rows.
        c.handle(Event::Input(String::new()));
        assert!(c.rows().is_empty());
        assert!(!c.visible());
    }

    #[test]
    fn test_response_renders_and_shows() {
        let c = with_results(json!(["Abacus", "Crab"]));
        assert!(c.visible());
        assert!(c.interactive());
        assert_eq!(c.rows().len(), 2);
        assert_eq!(c.rows()[0].matches, vec![0..2]);
        assert_eq!(c.rows()[1].matches, vec![2..4]);
    }

    #[test]
    fn test_empty_response_hides_list() {
        let c = with_results(json!([]));
        assert!(!c.visible());
        assert!(c.rows().is_empty());
        assert!(c.result_set().is_none());
    }

    #[test]
    fn test_response_emits_search_ended() {
        let mut c = focused(&settings());
        let sequence = fetched_sequence(&c.handle(Event::Input("ab".into())));
        let effects = c.handle(Event::Response {
            sequence,
            payload: json!(["Abacus"]),
        });
        assert_eq!(effects, vec![Effect::SearchEnded]);
    }

    #[test]
    fn test_failure_preserves_list() {
        let mut c = with_results(json!(["Abacus"]));
        let sequence = fetched_sequence(&c.handle(Event::Input("abc".into())));
        let effects = c.handle(Event::Failure {
            sequence,
            error: "timeout".into(),
        });
        assert_eq!(effects, vec![Effect::SearchEnded]);
        assert!(c.visible());
        assert_eq!(c.rows().len(), 1);
        assert!(c.interactive());
    }

    #[test]
    fn test_invalid_payload_is_a_failure() {
        let mut c = with_results(json!(["Abacus"]));
        let sequence = fetched_sequence(&c.handle(Event::Input("abc".into())));
        let effects = c.handle(Event::Response {
            sequence,
            payload: json!({"error": "nope"}),
        });
        assert_eq!(effects, vec![Effect::SearchEnded]);
        assert_eq!(c.rows().len(), 1);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut c = focused(&settings());
        let first = fetched_sequence(&c.handle(Event::Input("a".into())));
        let second = fetched_sequence(&c.handle(Event::Input("ab".into())));
        assert!(c
            .handle(Event::Response {
                sequence: first,
                payload: json!(["stale"]),
            })
            .is_empty());
        assert!(c.rows().is_empty());
        c.handle(Event::Response {
            sequence: second,
            payload: json!(["fresh"]),
        });
        assert_eq!(c.rows()[0].label, "fresh");
    }

    #[test]
    fn test_clearing_input_drops_in_flight_response() {
        let mut c = focused(&settings());
        let sequence = fetched_sequence(&c.handle(Event::Input("ab".into())));
        assert_eq!(
            c.handle(Event::Input(String::new())),
            vec![Effect::SearchEnded]
        );
        assert!(c
            .handle(Event::Response {
                sequence,
                payload: json!(["late"]),
            })
            .is_empty());
        assert!(!c.visible());
        assert!(c.rows().is_empty());
    }

    #[test]
    fn test_pointer_ignored_while_pending() {
        let mut c = with_results(json!(["Abacus", "Crab"]));
        c.handle(Event::Input("abc".into()));
        c.handle(Event::PointerEnter(1));
        assert!(c.selected().is_none());
        assert!(c.handle(Event::PointerClick(1)).is_empty());
    }

    #[test]
    fn test_pointer_hover_and_leave() {
        let mut c = with_results(json!(["Abacus", "Crab"]));
        c.handle(Event::PointerEnter(1));
        assert_eq!(c.selected().map(|r| r.label.as_str()), Some("Crab"));
        c.handle(Event::PointerLeave(0));
        assert!(c.selected().is_some());
        c.handle(Event::PointerLeave(1));
        assert!(c.selected().is_none());
    }

    #[test]
    fn test_submit_selected_suggestion() {
        let mut c = with_results(json!([{"title": "Abacus", "uri": "/a"}]));
        c.handle(Event::SelectNext);
        let effects = c.handle(Event::Submit);
        assert_eq!(
            effects,
            vec![Effect::Pick(Pick::Suggestion(SuggestionRecord::new(
                json!({"title": "Abacus", "uri": "/a"})
            )))]
        );
    }

    #[test]
    fn test_submit_free_text_with_fallback_prefix() {
        let mut s = settings();
        s.fallback_search_prefix = Some("/search?q=".into());
        let mut c = focused(&s);
        c.handle(Event::Input("abc".into()));
        assert_eq!(
            c.handle(Event::Submit),
            vec![Effect::Navigate("/search?q=abc".into())]
        );
    }

    #[test]
    fn test_submit_free_text_without_prefix_picks_query() {
        let mut c = focused(&settings());
        c.handle(Event::Input("abc".into()));
        assert_eq!(
            c.handle(Event::Submit),
            vec![Effect::Pick(Pick::Query("abc".into()))]
        );
    }

    #[test]
    fn test_submit_empty_is_noop() {
        let mut c = focused(&settings());
        assert!(c.handle(Event::Submit).is_empty());
    }

    #[test]
    fn test_escape_clears_then_blurs() {
        let mut c = with_results(json!(["Abacus"]));
        let effects = c.handle(Event::Escape);
        assert_eq!(effects, vec![Effect::ClearInput]);
        assert_eq!(c.value(), "");
        assert!(c.focused());
        assert!(!c.visible());
        assert_eq!(c.handle(Event::Escape), vec![Effect::BlurInput]);
    }

    #[test]
    fn test_blur_hides_after_grace() {
        let mut c = with_results(json!(["Abacus"]));
        let effects = c.handle(Event::Blur);
        let [Effect::ScheduleHide { generation, delay }] = effects.as_slice() else {
            panic!("expected a scheduled hide, got {effects:?}");
        };
        assert_eq!(*delay, Duration::from_millis(200));
        assert!(c.visible());
        c.handle(Event::HideElapsed {
            generation: *generation,
        });
        assert!(!c.visible());
        assert!(!c.focused());
    }

    #[test]
    fn test_click_during_grace_still_picks() {
        let mut c = with_results(json!(["Abacus", "Crab"]));
        let effects = c.handle(Event::Blur);
        let generation = match effects[0] {
            Effect::ScheduleHide { generation, .. } => generation,
            ref other => panic!("unexpected {other:?}"),
        };
        let picked = c.handle(Event::PointerClick(1));
        assert_eq!(
            picked,
            vec![Effect::Pick(Pick::Suggestion(SuggestionRecord::from("Crab")))]
        );
        c.handle(Event::HideElapsed { generation });
        assert!(!c.visible());
    }

    #[test]
    fn test_click_on_header_picks_nothing() {
        let mut c = with_results(json!([["Abba", "Abbey"], ["Cab"]]));
        assert!(c.rows()[0].is_header());
        assert!(c.rows()[3].is_header());
        assert!(c.handle(Event::PointerClick(0)).is_empty());
        assert!(c.handle(Event::PointerClick(3)).is_empty());
        assert!(c.selected().is_none());

        assert_eq!(
            c.handle(Event::PointerClick(4)),
            vec![Effect::Pick(Pick::Suggestion(SuggestionRecord::from("Cab")))]
        );
    }

    #[test]
    fn test_click_past_last_row_picks_nothing() {
        let mut c = with_results(json!(["Abacus", "Crab"]));
        assert!(c.handle(Event::PointerClick(2)).is_empty());
        assert!(c.handle(Event::PointerClick(5)).is_empty());
        assert!(c.selected().is_none());
    }

    #[test]
    fn test_refocus_cancels_pending_hide_and_resumes() {
        let mut c = with_results(json!(["Abacus"]));
        let generation = match c.handle(Event::Blur)[0] {
            Effect::ScheduleHide { generation, .. } => generation,
            ref other => panic!("unexpected {other:?}"),
        };
        c.handle(Event::Focus);
        c.handle(Event::HideElapsed { generation });
        assert!(c.visible());

        let generation = match c.handle(Event::Blur)[0] {
            Effect::ScheduleHide { generation, .. } => generation,
            ref other => panic!("unexpected {other:?}"),
        };
        c.handle(Event::HideElapsed { generation });
        assert!(!c.visible());
        c.handle(Event::Focus);
        assert!(c.visible());
    }

    #[test]
    fn test_response_while_unfocused_stays_hidden() {
        let mut c = focused(&settings());
        let sequence = fetched_sequence(&c.handle(Event::Input("ab".into())));
        let generation = match c.handle(Event::Blur)[0] {
            Effect::ScheduleHide { generation, .. } => generation,
            ref other => panic!("unexpected {other:?}"),
        };
        c.handle(Event::HideElapsed { generation });
        c.handle(Event::Response {
            sequence,
            payload: json!(["Abacus"]),
        });
        assert!(!c.visible());
        c.handle(Event::Focus);
        assert!(c.visible());
    }

    #[test]
    fn test_grouped_keyboard_navigation_skips_headers() {
        let mut c = with_results(json!([["Abba", "Abbey", "Abbot"], ["Cab", "Dab"]]));
        let indices: Vec<usize> = c.rows().iter().filter_map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        let mut seen = Vec::new();
        for _ in 0..6 {
            c.handle(Event::SelectNext);
            seen.push(c.selected().and_then(|r| r.index));
        }
        assert_eq!(
            seen,
            vec![Some(0), Some(1), Some(2), Some(3), Some(4), Some(0)]
        );
    }

    #[test]
    fn test_reset_clears_and_hides() {
        let mut c = with_results(json!(["Abacus"]));
        let effects = c.handle(Event::Reset);
        assert_eq!(effects, vec![Effect::ClearInput]);
        assert!(!c.visible());
        assert_eq!(c.value(), "");
        // Typing the same query again searches again.
        assert!(!c.handle(Event::Input("ab".into())).is_empty());
    }
}
