//! Application model
//!
//! Wraps a `RatingBox` with the UI-only state (help overlay, quit flag) and
//! maps keyboard input to rating actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libratingbox::{Rating, RatingBox, MAX_STARS};

/// User intents understood by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Pick an exact rating
    Select(Rating),
    /// One star more
    Increase,
    /// One star less
    Decrease,
    /// Submit the current rating
    Submit,
    ToggleHelp,
    Quit,
}

/// Map a key press to an input
///
/// Keybindings live here so they can be tested without a terminal.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Input::Quit),
        (KeyCode::Char(c @ '0'..='5'), _) => Some(Input::Select(Rating::from(c as u8 - b'0'))),
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => Some(Input::Increase),
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => Some(Input::Decrease),
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::NONE) => Some(Input::Submit),
        (KeyCode::F(1), _) => Some(Input::ToggleHelp),
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Some(Input::Quit),
        _ => None,
    }
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("RATINGBOX_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

/// Root application state
pub struct App {
    pub rating_box: RatingBox,
    pub help_visible: bool,
    pub should_quit: bool,
    pub config: UiConfig,
}

impl App {
    pub fn new(rating_box: RatingBox) -> Self {
        Self {
            rating_box,
            help_visible: false,
            should_quit: false,
            config: UiConfig::default(),
        }
    }

    /// Apply a user input
    ///
    /// `Submit` requires a Tokio runtime context when the request is accepted.
    pub fn handle(&mut self, input: Input) {
        match input {
            Input::Select(rating) => self.rating_box.select_rating(rating),
            Input::Increase => {
                let next = (self.rating_box.current_rating() + 1).clamp(0, MAX_STARS);
                self.rating_box.select_rating(next);
            }
            Input::Decrease => {
                let next = (self.rating_box.current_rating() - 1).clamp(0, MAX_STARS);
                self.rating_box.select_rating(next);
            }
            Input::Submit => self.rating_box.request_submit(),
            Input::ToggleHelp => self.help_visible = !self.help_visible,
            Input::Quit if self.help_visible => self.help_visible = false,
            Input::Quit => self.should_quit = true,
        }
    }

    /// Pick up a finished submission, if any
    pub fn tick(&mut self) {
        if let Some(state) = self.rating_box.poll_completion() {
            tracing::debug!(state = %state, "Submission resolved");
        }
    }
}
