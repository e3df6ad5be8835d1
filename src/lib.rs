//! Faultline renders a line-numbered, syntax-highlighted view of a
//! JSON-like value annotated with the issues a schema validator reported
//! against it. Erroring nodes carry their message inline, union issues
//! get a per-node alternative switcher, and long arrays truncate around
//! their erroring region.
//!
//! The headless core lives in [`render`]; [`viewer`] turns its output
//! into iced widgets. Hosts own the inputs, a [`render::RenderSession`],
//! and route [`viewer::ViewerEvent`]s back into the session.

pub mod config;
pub mod issue;
pub mod lines;
pub mod loader;
pub mod path;
pub mod render;
pub mod resolve;
pub mod theme;
pub mod value;
pub mod viewer;
pub mod window;

// Re-export the types hosts touch on every interaction
pub use issue::{IssueKind, ValidationError, ValidationIssue};
pub use path::{Path, PathSeg};
pub use render::{RenderSession, RenderedLine};
pub use theme::{Theme, ThemeOverride};
pub use value::Value;
