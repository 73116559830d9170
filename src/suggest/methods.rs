//! Event handling for the widget: messages in, commands and callbacks out.

use super::controller::{Effect, Event};
use super::model::{Edge, HideMsg, Model, NavigateMsg, PointerAction, PointerMsg, ResponseMsg};
use super::style::Styles;
use super::types::RenderedItem;
use crate::Component;
use bubbletea_rs::{batch, tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

impl Model {
    /// Identifier tagging this widget's internal messages.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The current input value.
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Replaces the input value as if the user had typed it.
    ///
    /// Returns the fetch command when the new value triggers a search.
    pub fn set_value(&mut self, value: &str) -> Option<Cmd> {
        self.input.set_value(value);
        self.input_changed()
    }

    /// Whether the input has keyboard focus.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Whether the suggestion list is shown.
    pub fn visible(&self) -> bool {
        self.controller.visible()
    }

    /// The rendered rows, headers included.
    pub fn rows(&self) -> &[RenderedItem] {
        self.controller.rows()
    }

    /// The highlighted row.
    pub fn selected(&self) -> Option<&RenderedItem> {
        self.controller.selected()
    }

    /// True while a search request is outstanding.
    pub fn searching(&self) -> bool {
        self.controller.query().is_pending()
    }

    /// Styles used for drawing.
    pub fn styles(&self) -> &Styles {
        self.controller.styles()
    }

    /// Replaces the styles. Row styling changes with the next completed query.
    pub fn set_styles(&mut self, styles: Styles) {
        self.controller.set_styles(styles);
    }

    /// Gives the input focus and shows suggestions from the previous session.
    pub fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.dispatch(Event::Focus)
    }

    /// Takes focus away from the input.
    ///
    /// The list stays up for the grace delay so a click that caused the blur
    /// still lands on its row; the returned command hides it afterwards.
    pub fn blur(&mut self) -> Option<Cmd> {
        self.focus = false;
        self.dispatch(Event::Blur)
    }

    /// Clears the value and hides the list. Bindings stay in place.
    pub fn reset(&mut self) -> Option<Cmd> {
        self.dispatch(Event::Reset)
    }

    /// Sets the blank space on one edge of the list.
    pub fn set_offset(&mut self, edge: Edge, cells: u16) {
        match edge {
            Edge::Top => self.offset.top = cells,
            Edge::Right => self.offset.right = cells,
            Edge::Bottom => self.offset.bottom = cells,
            Edge::Left => self.offset.left = cells,
        }
    }

    /// Handles a message and returns the command to run next, if any.
    ///
    /// Responses, hide timers and pointer messages addressed to other widgets
    /// are ignored, as are key presses while the input is not focused.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(response) = msg.downcast_ref::<ResponseMsg>() {
            if response.id != self.id {
                return None;
            }
            let event = match &response.outcome {
                Ok(payload) => Event::Response {
                    sequence: response.sequence,
                    payload: payload.clone(),
                },
                Err(err) => Event::Failure {
                    sequence: response.sequence,
                    error: err.to_string(),
                },
            };
            return self.dispatch(event);
        }

        if let Some(hide) = msg.downcast_ref::<HideMsg>() {
            if hide.id != self.id {
                return None;
            }
            return self.dispatch(Event::HideElapsed {
                generation: hide.generation,
            });
        }

        if let Some(pointer) = msg.downcast_ref::<PointerMsg>() {
            if pointer.id != self.id {
                return None;
            }
            let event = match pointer.action {
                PointerAction::Enter => Event::PointerEnter(pointer.row),
                PointerAction::Leave => Event::PointerLeave(pointer.row),
                PointerAction::Click => Event::PointerClick(pointer.row),
            };
            return self.dispatch(event);
        }

        if !self.focus {
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }
        None
    }

    /// Renders the input line and, when shown, the suggestion list.
    pub fn view(&self) -> String {
        let mut out = self.view_input();
        let list = self.view_list();
        if !list.is_empty() {
            out.push('\n');
            out.push_str(&self.apply_offset(&list));
        }
        out
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let keys = &self.key_map;
        if keys.select_next.matches(key_msg) {
            return self.dispatch(Event::SelectNext);
        }
        if keys.select_previous.matches(key_msg) {
            return self.dispatch(Event::SelectPrevious);
        }
        if keys.submit.matches(key_msg) {
            return self.dispatch(Event::Submit);
        }
        if keys.dismiss.matches(key_msg) {
            return self.dispatch(Event::Escape);
        }
        if keys.delete_character_backward.matches(key_msg) {
            self.input.delete_backward();
            return self.input_changed();
        }
        if keys.delete_character_forward.matches(key_msg) {
            self.input.delete_forward();
            return self.input_changed();
        }
        if keys.character_backward.matches(key_msg) {
            self.input.move_left();
        } else if keys.character_forward.matches(key_msg) {
            self.input.move_right();
        } else if keys.line_start.matches(key_msg) {
            self.input.move_start();
        } else if keys.line_end.matches(key_msg) {
            self.input.move_end();
        } else if let KeyCode::Char(ch) = key_msg.key {
            if key_msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return None;
            }
            self.input.insert(ch);
            return self.input_changed();
        }
        None
    }

    fn input_changed(&mut self) -> Option<Cmd> {
        let value = self.input.value().to_string();
        self.dispatch(Event::Input(value))
    }

    fn dispatch(&mut self, event: Event) -> Option<Cmd> {
        let effects = self.controller.handle(event);
        self.perform(effects)
    }

    fn perform(&mut self, effects: Vec<Effect>) -> Option<Cmd> {
        let mut cmds = Vec::new();
        for effect in effects {
            match effect {
                Effect::Fetch { sequence, url } => cmds.push(self.fetch_cmd(sequence, url)),
                Effect::SearchStarted(query) => {
                    if let Some(hook) = &self.on_search_start {
                        hook(&query);
                    }
                }
                Effect::SearchEnded => {
                    if let Some(hook) = &self.on_search_end {
                        hook();
                    }
                }
                Effect::ScheduleHide { generation, delay } => {
                    cmds.push(self.hide_cmd(generation, delay));
                }
                Effect::ClearInput => self.input.reset(),
                Effect::BlurInput => cmds.extend(self.blur()),
                Effect::Pick(pick) => {
                    debug!(?pick, "suggestion picked");
                    (self.on_pick)(pick);
                }
                Effect::Navigate(url) => cmds.push(navigate_cmd(url)),
            }
        }
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(batch(cmds)),
        }
    }

    fn fetch_cmd(&self, sequence: u64, url: String) -> Cmd {
        let fetch = Arc::clone(&self.fetch);
        let id = self.id;
        Box::pin(async move {
            let outcome = fetch(url).await;
            Some(Box::new(ResponseMsg {
                id,
                sequence,
                outcome,
            }) as Msg)
        })
    }

    fn hide_cmd(&self, generation: u64, delay: Duration) -> Cmd {
        let id = self.id;
        bubbletea_tick(delay, move |_| Box::new(HideMsg { id, generation }) as Msg)
    }
}

fn navigate_cmd(url: String) -> Cmd {
    debug!(%url, "navigating to search page");
    Box::pin(async move { Some(Box::new(NavigateMsg { url }) as Msg) })
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        Model::focus(self)
    }

    /// Blurs and hides the list at once, without a grace delay.
    fn blur(&mut self) {
        self.focus = false;
        self.controller.handle(Event::Blur);
        let generation = self.controller.hide_generation();
        self.controller.handle(Event::HideElapsed { generation });
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
