//! Effects - side effects declared by the slice reducer

use crate::model::CreateUserLocationPayload;

#[derive(Debug, Clone, PartialEq)]
pub enum UserLocationEffect {
    /// Load the full list from the API
    Fetch,
    /// Register a new location
    Create(CreateUserLocationPayload),
    /// Blocking notification for the user
    Alert(String),
}
