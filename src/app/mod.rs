//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Field, Model, Toaster};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::form::FontSize;
use crate::relay::Relay;
use crate::ui::style::Theme;

/// Main application struct that owns the relay and runs the event loop.
pub struct App {
    relay: Box<dyn Relay>,
    recipient: Option<String>,
    font_size: FontSize,
    theme: Theme,
    dry_run: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application that delivers through `relay`.
    pub fn new(relay: impl Relay + 'static) -> Self {
        Self {
            relay: Box::new(relay),
            recipient: None,
            font_size: FontSize::default(),
            theme: Theme::default(),
            dry_run: false,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Prefill the recipient field.
    #[must_use]
    pub fn with_recipient(mut self, email: Option<String>) -> Self {
        self.recipient = email;
        self
    }

    /// Set the initial submission font size.
    #[must_use]
    pub const fn with_font_size(mut self, font_size: FontSize) -> Self {
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Mark the session as a dry run in the status bar.
    #[must_use]
    pub const fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the starting model for a terminal of `size`.
    pub fn initial_model(&self, size: (u16, u16)) -> Model {
        let mut model = Model::new(size);
        if let Some(email) = self.recipient.as_deref() {
            model = model.with_recipient(email);
        }
        model.font_size = self.font_size;
        model.theme = self.theme.clone();
        model.dry_run = self.dry_run;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("recipient", &self.recipient)
            .field("font_size", &self.font_size)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}
