//! Terminal UI for Groupline
//!
//! A thin shell over [`groupline_client::Session`]. [`App`] and
//! [`InputState`] are pure state machines turning keys into [`AppAction`]s;
//! [`Runtime`] executes those actions against the session and feeds session
//! events back into the App.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod app;
pub mod commands;
pub mod input;
pub mod runtime;
pub mod terminal;
pub mod ui;

pub use app::{App, AppAction, AppEvent};
pub use input::{InputState, KeyInput};
pub use runtime::{Runtime, RuntimeError};
pub use terminal::Tui;
