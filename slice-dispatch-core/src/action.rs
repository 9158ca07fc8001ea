//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: Results of async tasks are sent across threads
///
/// Use `#[derive(Action)]` from `slice-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Type tag of the action, e.g. `"userLocation/FETCH_REQUEST"`
    fn name(&self) -> &'static str;
}
