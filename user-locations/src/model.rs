//! Records exchanged with the user location API

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a user location
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserLocationId(String);

impl UserLocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserLocationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserLocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserLocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A location registered by the user
///
/// The state slice only looks at `id`; everything else is display data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub id: UserLocationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl UserLocation {
    pub fn new(
        id: impl Into<UserLocationId>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Body of a create request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateUserLocationPayload {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
