//! Core traits and types for slice-dispatch
//!
//! This crate provides the foundational abstractions for building applications
//! out of Redux-style state slices: actions, effect-emitting reducers, a store
//! that owns the state, and a task manager that runs side effects with
//! switch-latest semantics.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **EffectStore**: Centralized state container; reducers return effects
//! - **TaskManager**: Keyed async tasks where the latest spawn wins
//! - **EffectRuntime**: Headless loop tying store, queue and tasks together
//! - **Component**: Pure UI elements that render based on props
//!
//! # Request / Success / Failure
//!
//! Async work follows a two-phase action pattern:
//!
//! 1. **Request actions** make the reducer emit an effect (e.g., `FetchRequest`)
//! 2. **Result actions** carry the outcome back (e.g., `FetchSuccess`, `FetchFailure`)
//!
//! ```ignore
//! fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
//!     match effect {
//!         Effect::Fetch => {
//!             ctx.tasks().spawn("fetch", async move {
//!                 match api.fetch().await {
//!                     Ok(items) => Action::FetchSuccess(items),
//!                     Err(e) => Action::FetchFailure(e),
//!                 }
//!             });
//!         }
//!     }
//! }
//!
//! let mut runtime = EffectRuntime::new(AppState::default(), reducer);
//! runtime.enqueue(Action::FetchRequest);
//! while let Some(action) = runtime.next_action().await {
//!     runtime.dispatch(action, &mut handle_effect);
//! }
//! ```

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod middleware;
pub mod runtime;
pub mod tasks;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::Component;

// Event exports
pub use event::{spawn_event_poller, translate_event, EventKind};

// Store exports
pub use effect::{
    DispatchResult, EffectReducer, EffectStore, EffectStoreLike, EffectStoreWithMiddleware,
};
pub use middleware::{LoggingMiddleware, Middleware, NoopMiddleware};

// Runtime exports
pub use runtime::{EffectContext, EffectRuntime};
pub use tasks::{TaskKey, TaskManager};

// Testing exports
pub use testing::{buffer_to_string_plain, char_key, key, parse_key, RenderHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::component::Component;
    pub use crate::effect::{DispatchResult, EffectStore, EffectStoreWithMiddleware};
    pub use crate::event::{spawn_event_poller, translate_event, EventKind};
    pub use crate::middleware::{LoggingMiddleware, Middleware, NoopMiddleware};
    pub use crate::runtime::{EffectContext, EffectRuntime};
    pub use crate::tasks::{TaskKey, TaskManager};
}
