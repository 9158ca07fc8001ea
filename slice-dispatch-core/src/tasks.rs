//! Task manager for async operations
//!
//! Provides lifecycle management for async tasks with switch-latest semantics:
//! - Spawning with a key that is already running supersedes the old task
//! - Results of superseded or cancelled tasks are never delivered
//! - Manual cancellation
//! - A task that panics is cleared without a result
//!
//! # Example
//!
//! ```ignore
//! use slice_dispatch::{TaskKey, TaskManager};
//!
//! let mut tasks = TaskManager::new();
//!
//! // Spawn a task - any existing task with same key is superseded
//! tasks.spawn(TaskKey::new("fetch"), async {
//!     match api.fetch().await {
//!         Ok(items) => Action::FetchSuccess(items),
//!         Err(e) => Action::FetchFailure(e),
//!     }
//! });
//!
//! // Results come back through `recv`, in completion order
//! while let Some(action) = tasks.recv().await {
//!     store.dispatch(action);
//! }
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::Action;

/// Identifies a task family for cancellation and replacement.
///
/// Tasks with the same key are mutually exclusive - spawning a new task
/// with a key that's already running supersedes the existing task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

struct RunningTask {
    generation: u64,
    handle: AbortHandle,
}

struct Completion<A> {
    key: TaskKey,
    generation: u64,
    /// `None` if the task panicked
    action: Option<A>,
}

/// Manages async task lifecycle with switch-latest delivery.
///
/// Every spawned task gets a generation number. When a task finishes, its
/// action is queued together with that generation; [`recv`](Self::recv)
/// only yields it if the task is still the current one for its key.
/// Aborting the superseded task is best effort - a task that already
/// finished still has its result dropped.
///
/// # Type Parameters
///
/// - `A`: The action type that tasks produce
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, RunningTask>,
    next_generation: u64,
    completion_tx: mpsc::UnboundedSender<Completion<A>>,
    completion_rx: mpsc::UnboundedReceiver<Completion<A>>,
}

impl<A> Default for TaskManager<A>
where
    A: Action,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Create a new task manager.
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            tasks: HashMap::new(),
            next_generation: 0,
            completion_tx,
            completion_rx,
        }
    }

    /// Spawn a task, superseding any existing task with the same key.
    ///
    /// The future should return an action that is handed out by
    /// [`recv`](Self::recv) once the task completes. Must be called from
    /// within a tokio runtime.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();

        self.cancel(&key);

        let generation = self.next_generation;
        self.next_generation += 1;

        let tx = self.completion_tx.clone();
        let task_key = key.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = AssertUnwindSafe(future).catch_unwind().await.ok();
            let _ = tx.send(Completion {
                key: task_key,
                generation,
                action,
            });
        });

        tracing::trace!(task = %key.name(), generation, "Task spawned");
        self.tasks.insert(
            key,
            RunningTask {
                generation,
                handle: handle.abort_handle(),
            },
        );
        self
    }

    /// Wait for the next result of a current task.
    ///
    /// Results of superseded or cancelled tasks are discarded. Pending
    /// forever while no task is running, so it composes with `select!`.
    /// Cancel safe.
    pub async fn recv(&mut self) -> Option<A> {
        loop {
            if let Some(action) = self.recv_outcome().await? {
                return Some(action);
            }
        }
    }

    /// Wait for the next current task to finish.
    ///
    /// Yields `Some(None)` for a task that panicked; its key is no longer
    /// running afterwards. Cancel safe.
    pub async fn recv_outcome(&mut self) -> Option<Option<A>> {
        loop {
            let completion = self.completion_rx.recv().await?;
            let is_current = self
                .tasks
                .get(&completion.key)
                .is_some_and(|task| task.generation == completion.generation);

            if is_current {
                self.tasks.remove(&completion.key);
                if completion.action.is_none() {
                    tracing::warn!(
                        task = %completion.key.name(),
                        generation = completion.generation,
                        "Task panicked, no result delivered"
                    );
                }
                return Some(completion.action);
            }

            tracing::debug!(
                task = %completion.key.name(),
                generation = completion.generation,
                action = completion.action.as_ref().map(|a| a.name()),
                "Discarding stale task result"
            );
        }
    }

    /// Cancel a task by key.
    ///
    /// If no task exists with the given key, this is a no-op.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(task) = self.tasks.remove(key) {
            task.handle.abort();
        }
    }

    /// Cancel all running tasks.
    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Check if a task with the given key is currently running.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks.contains_key(key)
    }

    /// Get the number of running tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if there are no running tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get the keys of all running tasks.
    pub fn running_keys(&self) -> impl Iterator<Item = &TaskKey> {
        self.tasks.keys()
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }
}
