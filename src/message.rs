//! Application messages for the Elm-style update loop.
//!
//! Each variant represents an event that can update the application state.

use std::path::PathBuf;

use iced::keyboard::{Key, Modifiers};
use iced::widget::scrollable::Viewport;

use faultline::viewer::ViewerEvent;

/// Messages that can be sent to update the app
#[derive(Debug, Clone)]
pub enum Message {
    OpenDataDialog,
    DataFileSelected(Option<PathBuf>),
    OpenIssuesDialog,
    IssuesFileSelected(Option<PathBuf>),
    /// An interaction inside the rendered view (truncation toggle,
    /// union alternative switch)
    Viewer(ViewerEvent),
    Scrolled(Viewport),
    /// Keyboard events - Key and Modifiers tell us what was pressed
    KeyPressed(Key, Modifiers),
    /// Toggle between dark and light theme
    ToggleTheme,
}
