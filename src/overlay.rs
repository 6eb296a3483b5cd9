//! Overlay session state
//!
//! Owns the configuration for the lifetime of the clock process and applies
//! every mutation through `dispatch` (tray actions) or the pointer handlers
//! (drag and double-click). Each transition returns the window effects the
//! GUI shell has to perform; styling (opacity, font, color) is read straight
//! from `config()` when the shell redraws.

use crate::clock;
use crate::config::{ConfigError, ConfigStore, Configuration, FontConfig, WindowConfig};
use crate::drag::{ClickTracker, DragTracker};
use crate::exam::ExamMode;
use crate::geometry::{Dimensions, Position};
use crate::layout::fit_content;
use crate::palette::FontColor;
use crate::placement::{origin_for, Location};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::time::Instant;

/// Every user-triggered state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveTo(Location),
    IncreaseOpacity,
    DecreaseOpacity,
    IncreaseFontSize,
    DecreaseFontSize,
    ResetFontSize,
    SetColor(FontColor),
    EnableExamMode,
    Exit,
}

/// Window operations requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Move(Position),
    Resize(Dimensions),
    Close,
}

pub struct Overlay {
    config: Configuration,
    store: ConfigStore,
    exam: ExamMode,
    drag: DragTracker,
    clicks: ClickTracker,
    screen: Dimensions,
    position: Position,
    /// Last position reported by the platform, the frame of pointer events
    confirmed: Position,
    size: Dimensions,
    text: String,
    exited: bool,
    exit_error: Option<ConfigError>,
}

impl Overlay {
    /// Build a session from an already loaded configuration.
    /// The window starts fitted to its text at the configured location.
    pub fn new(config: Configuration, store: ConfigStore, screen: Dimensions) -> Self {
        let text = clock::local_now(&config.timer.template).unwrap_or_default();
        let size = fit_content(&text, config.font.size);
        let position = origin_for(config.window.location, screen, size);

        Overlay {
            config,
            store,
            exam: ExamMode::default(),
            drag: DragTracker::default(),
            clicks: ClickTracker::default(),
            screen,
            position,
            confirmed: position,
            size,
            text,
            exited: false,
            exit_error: None,
        }
    }

    /// Load the configuration from `store` and build a session
    pub fn load(store: ConfigStore, screen: Dimensions) -> Result<Self, ConfigError> {
        let config = store.load()?;
        Ok(Overlay::new(config, store, screen))
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn is_locked(&self) -> bool {
        self.config.window.locked
    }

    pub fn is_exam_mode(&self) -> bool {
        self.exam.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_tracking()
    }

    /// Effects that bring a freshly created window in line with the session
    pub fn initial_effects(&self) -> Vec<Effect> {
        vec![Effect::Resize(self.size), Effect::Move(self.position)]
    }

    /// Apply one tray action
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        tracing::debug!("Dispatching {:?}", action);

        match action {
            Action::MoveTo(location) => self.move_to(location),
            Action::IncreaseOpacity => self.adjust_opacity(WindowConfig::increase_opacity),
            Action::DecreaseOpacity => self.adjust_opacity(WindowConfig::decrease_opacity),
            Action::IncreaseFontSize => self.adjust_font(FontConfig::increase_size),
            Action::DecreaseFontSize => self.adjust_font(FontConfig::decrease_size),
            Action::ResetFontSize => self.adjust_font(FontConfig::reset_size),
            Action::SetColor(color) => self.set_color(color),
            Action::EnableExamMode => {
                if self.exam.enable(&mut self.config) {
                    self.drag.release();
                    self.refit()
                } else {
                    Vec::new()
                }
            }
            Action::Exit => {
                self.exit_error = match self.shutdown() {
                    Ok(()) => None,
                    Err(e) => {
                        tracing::error!("Failed to save config on exit: {}", e);
                        Some(e)
                    }
                };
                vec![Effect::Close]
            }
        }
    }

    /// Reformat the displayed text for `now`. Returns whether it changed.
    pub fn refresh<Tz>(&mut self, now: &DateTime<Tz>) -> bool
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match clock::format_time(&self.config.timer.template, now) {
            Ok(text) if text != self.text => {
                self.text = text;
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::warn!("Keeping previous time text: {}", e);
                false
            }
        }
    }

    /// Refresh for a timer tick. Refits the window when the text
    /// outgrows or undershoots its current size.
    pub fn tick<Tz>(&mut self, now: &DateTime<Tz>) -> Vec<Effect>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if !self.refresh(now) {
            return Vec::new();
        }
        let size = fit_content(&self.text, self.config.font.size);
        if size == self.size {
            return Vec::new();
        }
        tracing::debug!("Text resized to {:?}", size);
        self.resize_to(size)
    }

    /// Error from the last `Exit`, if the configuration could not be saved
    pub fn take_exit_error(&mut self) -> Option<ConfigError> {
        self.exit_error.take()
    }

    /// Left button pressed at a window-relative position
    pub fn pointer_pressed(&mut self, at: Position, now: Instant) -> Vec<Effect> {
        if self.clicks.click(now) {
            let locked = self.config.window.toggle_lock();
            self.drag.release();
            tracing::info!("Window {}", if locked { "locked" } else { "unlocked" });
        }

        if self.drag.press(at, self.config.window.locked) {
            tracing::debug!("Drag started at {:?}", at);
        }
        Vec::new()
    }

    /// Pointer moved to a window-relative position
    pub fn pointer_moved(&mut self, at: Position) -> Vec<Effect> {
        match self.drag.motion(at, self.config.window.locked) {
            Some(delta) => {
                let target = self.confirmed + delta;
                if target == self.position {
                    return Vec::new();
                }
                self.position = target;
                vec![Effect::Move(target)]
            }
            None => Vec::new(),
        }
    }

    /// Left button released
    pub fn pointer_released(&mut self) {
        if self.drag.is_tracking() {
            tracing::debug!("Drag finished at {:?}", self.position);
        }
        self.drag.release();
    }

    /// The platform reports where the window actually is
    pub fn window_moved(&mut self, position: Position) {
        self.position = position;
        self.confirmed = position;
    }

    /// Leave exam mode, lock the window and write the configuration.
    /// Only the first successful call writes; later calls are no-ops.
    pub fn shutdown(&mut self) -> Result<(), ConfigError> {
        if self.exited {
            return Ok(());
        }

        self.exam.disable(&mut self.config);
        self.config.window.locked = true;
        self.drag.release();

        tracing::info!("Shutting down, saving config");
        self.store.store(&self.config)?;
        self.exited = true;
        Ok(())
    }

    fn move_to(&mut self, location: Location) -> Vec<Effect> {
        self.config.window.location = location;
        self.position = origin_for(location, self.screen, self.size);
        self.confirmed = self.position;
        tracing::debug!("Moved to {} at {:?}", location, self.position);
        vec![Effect::Move(self.position)]
    }

    fn adjust_opacity(&mut self, step: fn(&mut WindowConfig) -> bool) -> Vec<Effect> {
        if self.exam.is_active() {
            tracing::debug!("Opacity is fixed in exam mode");
        } else if step(&mut self.config.window) {
            tracing::debug!("Opacity now {}", self.config.window.opacity);
        }
        Vec::new()
    }

    fn adjust_font(&mut self, step: fn(&mut FontConfig) -> bool) -> Vec<Effect> {
        if !step(&mut self.config.font) {
            return Vec::new();
        }
        tracing::debug!("Font size now {}", self.config.font.size);
        self.refit()
    }

    fn set_color(&mut self, color: FontColor) -> Vec<Effect> {
        if self.exam.is_active() {
            tracing::debug!("Font color is fixed in exam mode");
        } else if self.config.font.set_color(color) {
            tracing::debug!("Font color now {}", color);
        }
        Vec::new()
    }

    /// Re-render the text, shrink the window around it and re-anchor it
    fn refit(&mut self) -> Vec<Effect> {
        self.refresh(&Local::now());
        self.resize_to(fit_content(&self.text, self.config.font.size))
    }

    fn resize_to(&mut self, size: Dimensions) -> Vec<Effect> {
        self.size = size;
        let mut effects = vec![Effect::Resize(size)];
        effects.extend(self.move_to(self.config.window.location));
        effects
    }

    /// Parse a color tag from outside the palette. Unknown tags change nothing.
    pub fn set_color_tag(&mut self, tag: &str) -> Vec<Effect> {
        match tag.parse::<FontColor>() {
            Ok(color) => self.dispatch(Action::SetColor(color)),
            Err(e) => {
                tracing::warn!("{}", e);
                Vec::new()
            }
        }
    }
}
