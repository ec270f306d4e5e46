// ABOUTME: User storage abstraction and its in-memory implementation
// ABOUTME: Handles validation on write, soft deletes, filtering, and pagination

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::model::{User, UserStats};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("user not found: {0}")]
    NotFound(String),

    #[error("username already exists: {0}")]
    Duplicate(String),

    #[error("{0}")]
    Invalid(String),

    #[error("tenant_id does not exist: {0}")]
    UnknownTenant(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
    pub filters: BTreeMap<String, String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            filters: BTreeMap::new(),
        }
    }
}

impl PageRequest {
    /// Bind `page` and `page_size` from a query string map; every other key
    /// becomes a filter. Unparseable numbers fall back to the defaults.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let mut request = Self::default();
        for (key, value) in query {
            match key.as_str() {
                "page" => {
                    request.page = value.parse().ok().filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
                }
                "page_size" => {
                    request.page_size = value
                        .parse::<usize>()
                        .map(|size| size.clamp(1, MAX_PAGE_SIZE))
                        .unwrap_or(DEFAULT_PAGE_SIZE);
                }
                _ => {
                    request.filters.insert(key.clone(), value.clone());
                }
            }
        }
        request
    }

    /// Saturates, so a page far past the end yields an empty listing.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1))
    }

    fn matches(&self, user: &User) -> bool {
        self.filters.iter().all(|(field, value)| match field.as_str() {
            "username" => contains_ignore_case(&user.username, value),
            "email" => contains_ignore_case(&user.email, value),
            "is_active" => match value.as_str() {
                "true" => user.is_active,
                "false" => !user.is_active,
                _ => true,
            },
            _ => true,
        })
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user, assigning an id when it has none.
    async fn create_user(&self, user: User) -> Result<User>;
    async fn get_user_by_id(&self, tenant_id: &str, id: &str) -> Result<User>;
    async fn get_user_by_name(&self, tenant_id: &str, username: &str) -> Result<User>;
    /// All users of the tenant ordered by username.
    async fn list_users(&self, tenant_id: &str) -> Result<Vec<User>>;
    /// One page of matching users plus the total match count.
    async fn list_users_paginated(
        &self,
        tenant_id: &str,
        page: &PageRequest,
    ) -> Result<(Vec<User>, usize)>;
    async fn update_user(&self, user: User) -> Result<User>;
    /// Soft delete: the user stays stored but becomes inactive.
    async fn delete_user(&self, tenant_id: &str, id: &str) -> Result<()>;
    async fn set_active(&self, tenant_id: &str, id: &str, active: bool) -> Result<User>;
    async fn stats(&self, tenant_id: &str) -> Result<UserStats>;
}

/// Process-local repository keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    tenants: HashSet<String>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new<I, S>(tenants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tenants: tenants.into_iter().map(Into::into).collect(),
            users: RwLock::new(HashMap::new()),
        }
    }

    fn validate(&self, user: &mut User) -> Result<()> {
        if user.id.is_empty() {
            user.id = Uuid::new_v4().to_string();
        }
        if user.tenant_id.is_empty() {
            return Err(RepositoryError::Invalid("tenant_id is required".to_string()));
        }
        if !self.tenants.contains(&user.tenant_id) {
            return Err(RepositoryError::UnknownTenant(user.tenant_id.clone()));
        }
        if user.username.is_empty() {
            return Err(RepositoryError::Invalid("username is required".to_string()));
        }
        if user.email.is_empty() {
            return Err(RepositoryError::Invalid("email is required".to_string()));
        }
        if user.password_hash.is_empty() {
            return Err(RepositoryError::Invalid("password_hash is required".to_string()));
        }
        Ok(())
    }

    fn find<'a>(users: &'a HashMap<String, User>, tenant_id: &str, id: &str) -> Result<&'a User> {
        users
            .get(id)
            .filter(|user| user.tenant_id == tenant_id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn username_taken(users: &HashMap<String, User>, user: &User) -> bool {
        users.values().any(|other| {
            other.id != user.id
                && other.tenant_id == user.tenant_id
                && other.username == user.username
        })
    }

    fn sorted(mut users: Vec<User>) -> Vec<User> {
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, mut user: User) -> Result<User> {
        self.validate(&mut user)?;

        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RepositoryError::Invalid(format!("user id already exists: {}", user.id)));
        }
        if Self::username_taken(&users, &user) {
            return Err(RepositoryError::Duplicate(user.username));
        }

        debug!(id = %user.id, username = %user.username, "Creating user");
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, tenant_id: &str, id: &str) -> Result<User> {
        let users = self.users.read().await;
        Self::find(&users, tenant_id, id).cloned()
    }

    async fn get_user_by_name(&self, tenant_id: &str, username: &str) -> Result<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.tenant_id == tenant_id && user.username == username)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(username.to_string()))
    }

    async fn list_users(&self, tenant_id: &str) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(Self::sorted(
            users
                .values()
                .filter(|user| user.tenant_id == tenant_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_users_paginated(
        &self,
        tenant_id: &str,
        page: &PageRequest,
    ) -> Result<(Vec<User>, usize)> {
        let users = self.users.read().await;
        let matching = Self::sorted(
            users
                .values()
                .filter(|user| user.tenant_id == tenant_id && page.matches(user))
                .cloned()
                .collect(),
        );

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(page.offset())
            .take(page.page_size)
            .collect();
        Ok((items, total))
    }

    async fn update_user(&self, mut user: User) -> Result<User> {
        self.validate(&mut user)?;

        let mut users = self.users.write().await;
        Self::find(&users, &user.tenant_id, &user.id)?;
        if Self::username_taken(&users, &user) {
            return Err(RepositoryError::Duplicate(user.username));
        }

        debug!(id = %user.id, "Updating user");
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user(&self, tenant_id: &str, id: &str) -> Result<()> {
        self.set_active(tenant_id, id, false).await.map(|_| ())
    }

    async fn set_active(&self, tenant_id: &str, id: &str, active: bool) -> Result<User> {
        let mut users = self.users.write().await;
        Self::find(&users, tenant_id, id)?;

        let user = users
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        user.is_active = active;
        debug!(id, active, "Changed user activation");
        Ok(user.clone())
    }

    async fn stats(&self, tenant_id: &str) -> Result<UserStats> {
        let users = self.users.read().await;
        let mut stats = UserStats::default();
        for user in users.values().filter(|user| user.tenant_id == tenant_id) {
            stats.total_users += 1;
            if user.is_active {
                stats.active_users += 1;
            } else {
                stats.inactive_users += 1;
            }
        }
        Ok(stats)
    }
}
