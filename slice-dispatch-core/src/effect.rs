//! Stores whose reducers return effects
//!
//! A reducer mutates the state and answers with a [`DispatchResult`]: whether
//! anything changed, plus effects describing work to start. Effects are plain
//! data; the runtime hands them to an effect handler that spawns the tasks.
//!
//! ```ignore
//! fn reducer(state: &mut LocationState, action: LocationAction) -> DispatchResult<LocationEffect> {
//!     match action {
//!         LocationAction::FetchRequest => {
//!             state.loading = true;
//!             DispatchResult::changed_with(LocationEffect::Fetch)
//!         }
//!         LocationAction::FetchSuccess(list) => {
//!             state.loading = false;
//!             state.locations = list;
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::middleware::Middleware;

/// Result of dispatching an action to an effect-aware store.
///
/// Contains both the state change indicator and any effects to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// Create a result indicating no state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// Create a result indicating state changed but no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// Create a result with a single effect but no state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// Create a result indicating state changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Convert the effects, keeping the changed flag.
    ///
    /// Used by root reducers to lift slice effects into the app effect type.
    pub fn map_effects<F, T>(self, f: F) -> DispatchResult<T>
    where
        F: FnMut(E) -> T,
    {
        DispatchResult {
            changed: self.changed,
            effects: self.effects.into_iter().map(f).collect(),
        }
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
///
/// Takes mutable state and an action, returns whether state changed
/// and any effects to process.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store that supports effect-emitting reducers.
///
/// The store is the sole owner of the state. Each dispatch that reports a
/// change bumps [`version`](Self::version), so observers can tell state
/// values apart without comparing them.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    version: u64,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            version: 0,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Number of state-changing dispatches so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let result = (self.reducer)(&mut self.state, action);
        if result.changed {
            self.version += 1;
        }
        result
    }
}

/// An effect store with middleware support.
///
/// Wraps an [`EffectStore`] and calls middleware hooks before and after
/// each dispatch. The middleware receives action references, the
/// state change indicator and the resulting version, but not the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Number of state-changing dispatches so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    /// Get a reference to the middleware.
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and store.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware
            .after(&action, result.changed, self.store.version());
        result
    }
}

/// Effect store interface used by [`EffectRuntime`](crate::EffectRuntime).
pub trait EffectStoreLike<S, A: Action, E> {
    /// Dispatch an action and return state changes plus effects.
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    /// Get the current state.
    fn state(&self) -> &S;
    /// Current state version.
    fn version(&self) -> u64;
}

impl<S, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }

    fn version(&self) -> u64 {
        EffectStore::version(self)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }

    fn version(&self) -> u64 {
        EffectStoreWithMiddleware::version(self)
    }
}
