// ABOUTME: User entity stored by the user-management repository
// ABOUTME: The password hash is kept on the entity but never serialized

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub tenant_id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

impl User {
    pub fn new(
        tenant_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            tenant_id: tenant_id.into(),
            username: username.into(),
            email: email.into(),
            full_name: String::new(),
            password_hash: String::new(),
            is_active: true,
            metadata: Map::new(),
        }
    }
}

/// Account counts for one tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let mut user = User::new("default", "alice", "alice@example.com");
        user.password_hash = "sha256$salt$digest".to_string();

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "alice");
        assert_eq!(value["is_active"], true);
    }
}
