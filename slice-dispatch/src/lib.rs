//! slice-dispatch: Redux-style state slices for Rust apps
//!
//! Actions are tagged enums, reducers are plain functions that mutate owned
//! state and return declarative effects, and effects run as keyed tasks where
//! a new request supersedes the previous one (switch-latest).
//!
//! # Example
//! ```ignore
//! use slice_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(namespace = "todo")]
//! enum TodoAction {
//!     FetchRequest,
//!     FetchSuccess(Vec<String>),
//! }
//!
//! assert_eq!(TodoAction::FetchRequest.name(), "todo/FETCH_REQUEST");
//! ```

// Re-export everything from core
pub use slice_dispatch_core::*;

// Re-export derive macros
pub use slice_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use slice_dispatch_core::{Action, Component};

    // Store and effects
    pub use slice_dispatch_core::{
        DispatchResult, EffectContext, EffectRuntime, EffectStore, EffectStoreWithMiddleware,
        LoggingMiddleware, Middleware, NoopMiddleware, TaskKey, TaskManager,
    };

    // Events
    pub use slice_dispatch_core::{spawn_event_poller, translate_event, EventKind};

    // Derive macros
    pub use slice_dispatch_macros::Action;
}
