// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. relay::RelayError)
    clippy::module_name_repetitions
)]

//! # Mailform
//!
//! A terminal email composer with a tag toggle editor.
//!
//! The message body is plain text with lightweight HTML-like markup. Toolbar
//! keys wrap the selection in `<b>`, `<i>`, `<u>` or an aligned `<div>`, or
//! unwrap the tag the caret is inside. Submitting wraps the body in a
//! font-size span and hands it to an SMTP relay.
//!
//! ## Architecture
//!
//! Mailform uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Tag toggling, previews and the text buffer
//! - [`form`]: Validation and submission
//! - [`relay`]: Delivering a submission by SMTP or a relay service
//! - [`notify`]: Notifications
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved defaults
//! - [`perf`]: Timing and debug event log

pub mod app;
pub mod config;
pub mod editor;
pub mod form;
pub mod notify;
pub mod perf;
pub mod relay;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{EditorBuffer, Selection, ToolbarAction};
    pub use crate::form::{FontSize, submit};
    pub use crate::notify::{NotificationSink, Severity};
    pub use crate::relay::{ConsoleRelay, HttpRelay, Relay, SmtpConfig, SmtpRelay};
}
