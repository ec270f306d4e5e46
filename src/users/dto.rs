// ABOUTME: Request payloads bound by the user-management flows
// ABOUTME: Path parameters are merged into the body before deserialization

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    pub is_active: Option<bool>,
    pub metadata: Option<Map<String, JsonValue>>,
}

/// Partial update; empty strings and absent fields leave the stored value alone.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserIdRequest {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserNameRequest {
    pub username: String,
}

/// Listing takes everything from the pagination query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersRequest {}
