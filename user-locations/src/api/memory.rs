//! In-process backend used by `--offline` and by tests

use std::sync::Mutex;
use std::time::Duration;

use super::{ApiError, UserLocationApi};
use crate::model::{CreateUserLocationPayload, UserLocation, UserLocationId};

#[derive(Debug, Default)]
struct Inner {
    locations: Vec<UserLocation>,
    next_id: u64,
    fail_next_fetch: Option<ApiError>,
}

/// Stores locations in memory and applies the backend's create validation
#[derive(Debug, Default)]
pub struct InMemoryApi {
    inner: Mutex<Inner>,
    latency: Duration,
}

impl InMemoryApi {
    pub fn new(locations: Vec<UserLocation>) -> Self {
        let next_id = locations.len() as u64 + 1;
        Self {
            inner: Mutex::new(Inner {
                locations,
                next_id,
                fail_next_fetch: None,
            }),
            latency: Duration::ZERO,
        }
    }

    /// A few well-known places for the offline mode
    pub fn with_sample_data() -> Self {
        Self::new(vec![
            UserLocation::new("1", "Kyiv", 50.4501, 30.5234),
            UserLocation::new("2", "Lisbon", 38.7223, -9.1393),
            UserLocation::new("3", "Reykjavik", 64.1466, -21.9426),
        ])
    }

    /// Delay every call, simulating a slow network
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next fetch fail with `error`
    pub fn fail_next_fetch(&self, error: ApiError) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_next_fetch = Some(error);
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, ApiError> {
        self.inner
            .lock()
            .map_err(|_| ApiError::Transport("in-memory store poisoned".into()))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn validate(payload: &CreateUserLocationPayload) -> Result<(), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Rejected("name must not be empty".into()));
    }
    if !(-90.0..=90.0).contains(&payload.latitude) {
        return Err(ApiError::Rejected(
            "latitude must be between -90 and 90".into(),
        ));
    }
    if !(-180.0..=180.0).contains(&payload.longitude) {
        return Err(ApiError::Rejected(
            "longitude must be between -180 and 180".into(),
        ));
    }
    Ok(())
}

impl UserLocationApi for InMemoryApi {
    async fn fetch_user_locations(&self) -> Result<Vec<UserLocation>, ApiError> {
        self.simulate_latency().await;
        let mut inner = self.lock()?;
        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(error);
        }
        Ok(inner.locations.clone())
    }

    async fn create_user_location(
        &self,
        payload: CreateUserLocationPayload,
    ) -> Result<UserLocation, ApiError> {
        self.simulate_latency().await;
        validate(&payload)?;

        let mut inner = self.lock()?;
        let id = UserLocationId::new(inner.next_id.to_string());
        inner.next_id += 1;

        let location = UserLocation {
            id,
            name: payload.name.trim().to_string(),
            latitude: payload.latitude,
            longitude: payload.longitude,
        };
        inner.locations.push(location.clone());
        Ok(location)
    }
}
