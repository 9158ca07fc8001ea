//! REST client on top of reqwest

use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{ApiError, UserLocationApi};
use crate::model::{CreateUserLocationPayload, UserLocation};

/// Error body returned by the backend on rejected requests
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP implementation of [`UserLocationApi`]
///
/// `GET {base}/user_locations` lists, `POST {base}/user_locations` creates.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpApi {
    /// Build a client with its own connection pool and request timeout
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Use an existing reqwest client
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Result<Self, ApiError> {
        let endpoint = directory_url(base_url).join("user_locations")?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `http://host/api` and `http://host/api/` both mean the `api` directory
fn directory_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { message }) => Err(ApiError::Rejected(message)),
        Err(_) => Err(ApiError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

impl UserLocationApi for HttpApi {
    async fn fetch_user_locations(&self) -> Result<Vec<UserLocation>, ApiError> {
        tracing::debug!(url = %self.endpoint, "Fetching user locations");
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let locations: Vec<UserLocation> = read_json(response).await?;
        tracing::debug!(count = locations.len(), "Fetched user locations");
        Ok(locations)
    }

    async fn create_user_location(
        &self,
        payload: CreateUserLocationPayload,
    ) -> Result<UserLocation, ApiError> {
        tracing::debug!(url = %self.endpoint, name = %payload.name, "Creating user location");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?;
        let created: UserLocation = read_json(response).await?;
        tracing::info!(id = %created.id, "Created user location");
        Ok(created)
    }
}
