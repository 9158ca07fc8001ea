//! Epics - async handlers turning slice effects into follow-up actions
//!
//! Each family runs under its own task key, so a new request supersedes the
//! one still in flight (switch-latest) while fetch and create never cancel
//! each other. Every call ends in a success or failure action, even when the
//! client panics.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use slice_dispatch::{Action, TaskKey, TaskManager};

use super::action::UserLocationAction;
use crate::api::{ApiError, UserLocationApi};
use crate::model::CreateUserLocationPayload;

pub const FETCH_TASK: &str = "userLocation/fetch";
pub const CREATE_TASK: &str = "userLocation/create";

async fn guarded<T>(call: impl Future<Output = Result<T, ApiError>>) -> Result<T, ApiError> {
    AssertUnwindSafe(call)
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            tracing::warn!("API client panicked");
            Err(ApiError::Panicked)
        })
}

pub struct UserLocationEpics<C> {
    api: Arc<C>,
}

impl<C> Clone for UserLocationEpics<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<C: UserLocationApi> UserLocationEpics<C> {
    pub fn new(api: Arc<C>) -> Self {
        Self { api }
    }

    /// Load the list, answering with `FetchSuccess` or `FetchFailure`
    pub fn fetch<A>(&self, tasks: &mut TaskManager<A>)
    where
        A: Action + From<UserLocationAction>,
    {
        let api = Arc::clone(&self.api);
        tasks.spawn(TaskKey::new(FETCH_TASK), async move {
            let action = match guarded(api.fetch_user_locations()).await {
                Ok(locations) => UserLocationAction::FetchSuccess(locations),
                Err(error) => UserLocationAction::FetchFailure(error),
            };
            A::from(action)
        });
    }

    /// Register a location, answering with `CreateSuccess` or `CreateFailure`
    pub fn create<A>(&self, payload: CreateUserLocationPayload, tasks: &mut TaskManager<A>)
    where
        A: Action + From<UserLocationAction>,
    {
        let api = Arc::clone(&self.api);
        tasks.spawn(TaskKey::new(CREATE_TASK), async move {
            let action = match guarded(api.create_user_location(payload)).await {
                Ok(location) => UserLocationAction::CreateSuccess(location),
                Err(error) => UserLocationAction::CreateFailure(error),
            };
            A::from(action)
        });
    }
}
