//! User location browser
//!
//! A `userLocation` state slice (actions, reducer, epics, selectors) wired
//! into a slice-dispatch store, a REST client for the backend and a terminal
//! UI on top.

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod model;
pub mod reducer;
pub mod state;
pub mod ui;
pub mod user_location;

pub use action::Action;
pub use effect::{handle_effect, Effect};
pub use reducer::reducer;
pub use state::AppState;
