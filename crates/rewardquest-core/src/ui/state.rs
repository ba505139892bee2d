//! Visible UI state held as plain slots.
//!
//! A rendering surface reads these fields and draws them; user input comes
//! back through the methods here. Nothing in this module touches a terminal
//! or a DOM.

use serde::Serialize;
use tracing::debug;

use crate::activity::{Category, SelectedReward};
use crate::error::ActivityError;
use crate::events::Event;
use crate::timer::{parse_time_input, CountdownEngine};

pub const HEADER_FOCUS: &str = "Reward Quest";
pub const DESCRIPTION_FOCUS: &str = "Set your focus time below.";
pub const DESCRIPTION_DONE: &str = "Great job staying on task! Time to treat yourself!";
pub const NO_REWARD_HTML: &str = "<p class=\"reward\">No reward available.</p>";
pub const LOADING_LABEL: &str = "Loading...";
pub const RESET_INPUT: &str = "00:00";

/// What the reward slot currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActivitySlot {
    Empty,
    /// Markup built from escaped text.
    Html(String),
    /// Plain message for empty results and fetch failures.
    Message(String),
}

impl ActivitySlot {
    pub fn is_empty(&self) -> bool {
        match self {
            ActivitySlot::Empty => true,
            ActivitySlot::Html(html) => html.trim().is_empty(),
            ActivitySlot::Message(text) => text.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UiState {
    pub header: String,
    pub header_visible: bool,
    pub description: String,
    pub activity: ActivitySlot,
    /// Last successful selection, kept until the next fetch.
    #[serde(skip)]
    pub reward: Option<SelectedReward>,
    pub category_buttons_visible: bool,
    pub fetch_busy: bool,
    /// Label of the button that triggered the in-flight fetch.
    pub busy_label: Option<String>,
    pub next_visible: bool,
    pub timer_area_visible: bool,
    pub controls_visible: bool,
    pub focus_mode: bool,
    pub time_input: String,
    pub time_input_disabled: bool,
    pub time_input_hidden: bool,
    pub start_pause_label: String,
}

impl UiState {
    /// Initial page state with the given input text.
    pub fn new(initial_input: &str) -> Self {
        Self {
            header: String::new(),
            header_visible: true,
            description: String::new(),
            activity: ActivitySlot::Empty,
            reward: None,
            category_buttons_visible: true,
            fetch_busy: false,
            busy_label: None,
            next_visible: true,
            timer_area_visible: false,
            controls_visible: true,
            focus_mode: false,
            time_input: initial_input.to_string(),
            time_input_disabled: false,
            time_input_hidden: false,
            start_pause_label: "Start".to_string(),
        }
    }

    /// Button caption for a category: capitalised tag.
    pub fn category_label(category: &Category) -> String {
        let tag = category.tag();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Mark a fetch as in flight. Returns false while another one is busy.
    pub fn begin_fetch(&mut self, category: &Category) -> bool {
        if self.fetch_busy {
            debug!("fetch already in flight; ignoring request");
            return false;
        }
        self.fetch_busy = true;
        self.busy_label = Some(LOADING_LABEL.to_string());
        self.activity = ActivitySlot::Empty;
        self.reward = None;
        debug!(category = category.tag(), "fetch started");
        true
    }

    pub fn finish_fetch(&mut self, outcome: Result<SelectedReward, ActivityError>) {
        match outcome {
            Ok(reward) => {
                self.activity = ActivitySlot::Html(reward.to_html());
                self.reward = Some(reward);
            }
            Err(e) => {
                self.activity = ActivitySlot::Message(e.user_message());
                self.reward = None;
            }
        }
        self.fetch_busy = false;
        self.busy_label = None;
    }

    pub fn enter_focus_mode(&mut self) {
        self.header = HEADER_FOCUS.to_string();
        self.description = DESCRIPTION_FOCUS.to_string();
        self.category_buttons_visible = false;
        self.next_visible = false;
        self.timer_area_visible = true;
        self.focus_mode = true;
        self.fill_missing_reward();
        self.fetch_busy = false;
        self.busy_label = None;
    }

    /// Start/pause button. Parses the input when idle or paused.
    pub fn press_start_pause(&mut self, engine: &mut CountdownEngine) -> Option<Event> {
        let event = if engine.is_running() {
            engine.pause()
        } else {
            match parse_time_input(&self.time_input) {
                Ok(requested) => engine.start(requested),
                Err(e) => {
                    debug!("resetting time input: {e}");
                    self.time_input = RESET_INPUT.to_string();
                    return None;
                }
            }
        };
        self.sync_countdown(engine);
        event
    }

    /// Edit the time input. Ignored while the countdown runs.
    pub fn set_time_input(&mut self, text: &str) -> bool {
        if self.time_input_disabled {
            return false;
        }
        self.time_input = text.to_string();
        true
    }

    /// Show or hide the time input; only meaningful in focus mode.
    pub fn toggle_time_input(&mut self) -> bool {
        if !self.focus_mode {
            return false;
        }
        self.time_input_hidden = !self.time_input_hidden;
        true
    }

    /// Mirror the engine's display and editability.
    pub fn sync_countdown(&mut self, engine: &CountdownEngine) {
        self.time_input = engine.display();
        self.time_input_disabled = !engine.input_editable();
        self.start_pause_label = if engine.is_running() { "Pause" } else { "Start" }.to_string();
    }

    /// Expiry: hide the timer and show the reward.
    pub fn reveal_reward(&mut self) {
        self.header_visible = true;
        self.description = DESCRIPTION_DONE.to_string();
        self.timer_area_visible = false;
        self.category_buttons_visible = false;
        self.controls_visible = false;
        self.fill_missing_reward();
    }

    fn fill_missing_reward(&mut self) {
        if self.activity.is_empty() {
            self.activity = ActivitySlot::Html(NO_REWARD_HTML.to_string());
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(RESET_INPUT)
    }
}
