//! Headless runtime for effect-based stores.
//!
//! Owns the store, the action queue and the task manager. The caller decides
//! where actions come from (terminal events, tests, timers) and how effects
//! are turned into tasks.

use std::marker::PhantomData;

use tokio::sync::mpsc;

use crate::effect::{EffectReducer, EffectStore, EffectStoreLike};
use crate::tasks::TaskManager;
use crate::Action;

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Build a context from its parts.
    ///
    /// The runtime builds one per dispatch; tests can build their own.
    pub fn new(action_tx: &'a mpsc::UnboundedSender<A>, tasks: &'a mut TaskManager<A>) -> Self {
        Self { action_tx, tasks }
    }

    /// Queue an action for dispatch.
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Access the action sender.
    pub fn action_tx(&self) -> &mpsc::UnboundedSender<A> {
        self.action_tx
    }

    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime helper for effect-based stores.
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    tasks: TaskManager<A>,
    _marker: PhantomData<(S, E)>,
}

impl<S: 'static, A: Action, E> EffectRuntime<S, A, E, EffectStore<S, A, E>> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Create a runtime from an existing effect store.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            action_tx,
            action_rx,
            tasks: TaskManager::new(),
            _marker: PhantomData,
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Current state version.
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    /// Access the task manager.
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Wait for the next action to dispatch.
    ///
    /// Queued actions win over task results: a request that was queued
    /// before a task finished gets to supersede that task first.
    /// Cancel safe.
    pub async fn next_action(&mut self) -> Option<A> {
        tokio::select! {
            biased;
            Some(action) = self.action_rx.recv() => Some(action),
            Some(action) = self.tasks.recv() => Some(action),
            else => None,
        }
    }

    /// Dispatch an action and hand its effects to `handle_effect`.
    ///
    /// Returns whether the state changed.
    pub fn dispatch<F>(&mut self, action: A, handle_effect: &mut F) -> bool
    where
        F: FnMut(E, &mut EffectContext<'_, A>),
    {
        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = EffectContext::new(&self.action_tx, &mut self.tasks);
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        result.changed
    }

    /// Dispatch queued actions and task results until nothing is left.
    ///
    /// Returns the number of dispatched actions.
    pub async fn run_until_idle<F>(&mut self, mut handle_effect: F) -> usize
    where
        F: FnMut(E, &mut EffectContext<'_, A>),
    {
        let mut dispatched = 0;
        loop {
            if let Ok(action) = self.action_rx.try_recv() {
                self.dispatch(action, &mut handle_effect);
                dispatched += 1;
                continue;
            }
            if self.tasks.is_empty() {
                break;
            }
            let action = tokio::select! {
                biased;
                Some(action) = self.action_rx.recv() => action,
                outcome = self.tasks.recv_outcome() => match outcome {
                    Some(Some(action)) => action,
                    // Panicked task, re-check for remaining work
                    Some(None) => continue,
                    None => break,
                },
            };
            self.dispatch(action, &mut handle_effect);
            dispatched += 1;
        }
        dispatched
    }

    /// Abort all running tasks.
    pub fn shutdown(&mut self) {
        self.tasks.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DispatchResult;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Load(u64),
        Loaded(u64),
        Note(String),
        Crash,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Load(_) => "Load",
                TestAction::Loaded(_) => "Loaded",
                TestAction::Note(_) => "Note",
                TestAction::Crash => "Crash",
            }
        }
    }

    enum TestEffect {
        Load { value: u64, delay_ms: u64 },
        Note(String),
        Crash,
    }

    #[derive(Default)]
    struct TestState {
        loaded: Vec<u64>,
        notes: Vec<String>,
    }

    fn reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Load(value) => DispatchResult::effect(TestEffect::Load {
                value,
                delay_ms: if value == 1 { 60 } else { 5 },
            }),
            TestAction::Loaded(value) => {
                state.loaded.push(value);
                DispatchResult::changed_with(TestEffect::Note(format!("loaded {value}")))
            }
            TestAction::Note(note) => {
                state.notes.push(note);
                DispatchResult::changed()
            }
            TestAction::Crash => DispatchResult::effect(TestEffect::Crash),
        }
    }

    fn handle_effect(effect: TestEffect, ctx: &mut EffectContext<'_, TestAction>) {
        match effect {
            TestEffect::Load { value, delay_ms } => {
                ctx.tasks().spawn("load", async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    TestAction::Loaded(value)
                });
            }
            TestEffect::Note(note) => ctx.emit(TestAction::Note(note)),
            TestEffect::Crash => {
                ctx.tasks().spawn("crash", async { panic!("handler bug") });
            }
        }
    }

    #[tokio::test]
    async fn test_run_until_idle_processes_effect_chain() {
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);
        runtime.enqueue(TestAction::Load(7));

        let dispatched = tokio::time::timeout(
            Duration::from_secs(1),
            runtime.run_until_idle(handle_effect),
        )
        .await
        .expect("runtime did not settle");

        assert_eq!(dispatched, 3);
        assert_eq!(runtime.state().loaded, vec![7]);
        assert_eq!(runtime.state().notes, vec!["loaded 7".to_string()]);
        assert_eq!(runtime.version(), 2);
    }

    #[tokio::test]
    async fn test_latest_request_wins() {
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);
        runtime.enqueue(TestAction::Load(1));
        runtime.enqueue(TestAction::Load(2));

        tokio::time::timeout(Duration::from_secs(1), runtime.run_until_idle(handle_effect))
            .await
            .expect("runtime did not settle");

        assert_eq!(runtime.state().loaded, vec![2]);
    }

    #[tokio::test]
    async fn test_queued_request_supersedes_finished_task() {
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);
        let mut handler = handle_effect;

        runtime.dispatch(TestAction::Load(3), &mut handler);
        // Task for 3 finishes while the next request is still queued
        tokio::time::sleep(Duration::from_millis(30)).await;
        runtime.enqueue(TestAction::Load(4));

        let next = runtime.next_action().await;
        assert_eq!(next, Some(TestAction::Load(4)));
        runtime.dispatch(TestAction::Load(4), &mut handler);

        let next = tokio::time::timeout(Duration::from_millis(200), runtime.next_action())
            .await
            .expect("no task result");
        assert_eq!(next, Some(TestAction::Loaded(4)));
    }

    #[tokio::test]
    async fn test_run_until_idle_settles_after_panicking_task() {
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);
        runtime.enqueue(TestAction::Crash);
        runtime.enqueue(TestAction::Load(5));

        let dispatched = tokio::time::timeout(
            Duration::from_secs(1),
            runtime.run_until_idle(handle_effect),
        )
        .await
        .expect("runtime did not settle");

        assert_eq!(dispatched, 4);
        assert!(runtime.tasks().is_empty());
        assert_eq!(runtime.state().loaded, vec![5]);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_tasks() {
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);
        let mut handler = handle_effect;
        runtime.dispatch(TestAction::Load(1), &mut handler);
        assert_eq!(runtime.tasks().len(), 1);

        runtime.shutdown();
        assert!(runtime.tasks().is_empty());
    }
}
