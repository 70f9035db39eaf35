//! Output abstraction layer that routes to rich, plain or JSON output.
//!
//! Rich mode renders `rich_rust` tables built by [`components`]; plain mode
//! prints the line-oriented renderers in [`crate::format`].

pub mod components;
pub mod context;
pub mod theme;

pub use components::*;
pub use context::{OutputContext, OutputMode};
pub use theme::Theme;
