//! Interactive substring picker for the terminal.
//!
//! A [`Picker`] asks its [`ItemSource`] for candidates, lets the user narrow
//! them by typing and move a highlighted cursor through the matches, and hands
//! the confirmed item to an [`ActionSink`]. State transitions live in
//! [`PickerState`], drawing in [`Renderer`], and the blocking event loop in
//! [`Picker::run`].

mod config;
mod error;
pub mod filter;
pub mod input;
pub mod render;
mod runtime;
pub mod source;
pub mod state;
pub mod style;
pub mod surface;

pub use config::{ConfirmPolicy, Labels, PickerConfig};
pub use error::PickerError;
pub use input::Input;
pub use render::{Layout, Renderer};
pub use runtime::{ExitReason, Picker, PickerOutcome};
pub use source::{ActionSink, ItemSource};
pub use state::{ActionReport, PickerState, Transition};
pub use style::Theme;
pub use surface::{CrosstermSurface, EventSource, Surface, TerminalSurface};
