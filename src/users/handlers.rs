// ABOUTME: User-management flows and the axum handlers that drive them
// ABOUTME: Each endpoint binds its request parts into a FlowInput and runs one flow

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use super::dto::{CreateUserRequest, ListUsersRequest, UpdateUserRequest, UserIdRequest, UserNameRequest};
use super::flow::{ApiResponse, Flow, FlowContext, FlowError, FlowInput, FlowResult, Reply};
use super::model::User;
use super::password::hash_password;
use super::repository::UserRepository;
use super::validation::{FieldValidator, ValidationRule};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_USERNAME_LENGTH: usize = 64;
pub const SERVICE_NAME: &str = "user-management";

/// Repository plus the tenant every request acts on.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tenant_id: String,
}

pub type SharedService = Arc<UserService>;

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tenant_id: impl Into<String>) -> Self {
        Self {
            repo,
            tenant_id: tenant_id.into(),
        }
    }

    pub fn repo(&self) -> &dyn UserRepository {
        self.repo.as_ref()
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

type Ctx<T> = FlowContext<T, SharedService>;

/// The flows behind every user endpoint, built once per router.
pub struct UserFlows {
    pub create: Flow<CreateUserRequest, SharedService>,
    pub update: Flow<UpdateUserRequest, SharedService>,
    pub delete: Flow<UserIdRequest, SharedService>,
    pub list: Flow<ListUsersRequest, SharedService>,
    pub get_by_id: Flow<UserIdRequest, SharedService>,
    pub get_by_name: Flow<UserNameRequest, SharedService>,
    pub activate: Flow<UserIdRequest, SharedService>,
    pub deactivate: Flow<UserIdRequest, SharedService>,
}

impl UserFlows {
    pub fn new() -> Self {
        Self {
            create: Flow::new("CreateNewUser")
                .validate_required(&["username", "email", "password"])
                .validate_fields(vec![
                    FieldValidator::new("username", vec![ValidationRule::MaxLength(MAX_USERNAME_LENGTH)]),
                    FieldValidator::new("email", vec![ValidationRule::Email]),
                    FieldValidator::new("password", vec![ValidationRule::MinLength(MIN_PASSWORD_LENGTH)]),
                ])
                .action("create_user", create_user_action)
                .smart(),
            update: Flow::new("UpdateUser")
                .validate_required(&["id"])
                .validate_fields(vec![
                    FieldValidator::new("username", vec![ValidationRule::MaxLength(MAX_USERNAME_LENGTH)]),
                    FieldValidator::new("email", vec![ValidationRule::Email]),
                    FieldValidator::new("password", vec![ValidationRule::MinLength(MIN_PASSWORD_LENGTH)]),
                ])
                .action("update_user", update_user_action)
                .smart(),
            delete: Flow::new("DeleteUser")
                .validate_required(&["id"])
                .action("delete_user", delete_user_action)
                .smart(),
            list: Flow::new("ListUsers")
                .paginate()
                .action("list_users", list_users_action),
            get_by_id: Flow::new("GetUserByID")
                .validate_required(&["id"])
                .action("get_user_by_id", get_user_by_id_action),
            get_by_name: Flow::new("GetUserByName")
                .validate_required(&["username"])
                .action("get_user_by_name", get_user_by_name_action),
            activate: Flow::new("ActivateUser")
                .validate_required(&["id"])
                .action("activate_user", |ctx: Ctx<UserIdRequest>| set_active_action(ctx, true)),
            deactivate: Flow::new("DeactivateUser")
                .validate_required(&["id"])
                .action("deactivate_user", |ctx: Ctx<UserIdRequest>| set_active_action(ctx, false)),
        }
    }
}

impl Default for UserFlows {
    fn default() -> Self {
        Self::new()
    }
}

async fn create_user_action(ctx: Ctx<CreateUserRequest>) -> FlowResult<Reply> {
    let params = ctx.params;
    let service = ctx.state;

    let mut user = User::new(service.tenant_id(), params.username, params.email);
    user.full_name = params.full_name;
    user.is_active = params.is_active.unwrap_or(true);
    user.metadata = params.metadata.unwrap_or_default();
    user.password_hash = hash_password(&params.password);

    let created = service.repo().create_user(user).await?;
    Reply::ok(created)
}

async fn update_user_action(ctx: Ctx<UpdateUserRequest>) -> FlowResult<Reply> {
    let params = ctx.params;
    let service = ctx.state;

    let mut user = service
        .repo()
        .get_user_by_id(service.tenant_id(), &params.id)
        .await
        .map_err(|_| FlowError::NotFound("User not found".to_string()))?;

    if !params.username.is_empty() {
        user.username = params.username;
    }
    if !params.email.is_empty() {
        user.email = params.email;
    }
    if !params.password.is_empty() {
        user.password_hash = hash_password(&params.password);
    }
    if let Some(full_name) = params.full_name {
        user.full_name = full_name;
    }
    if let Some(is_active) = params.is_active {
        user.is_active = is_active;
    }
    if let Some(metadata) = params.metadata {
        user.metadata = metadata;
    }

    let updated = service.repo().update_user(user).await?;
    Reply::ok(updated)
}

async fn delete_user_action(ctx: Ctx<UserIdRequest>) -> FlowResult<Reply> {
    let service = ctx.state;
    service
        .repo()
        .delete_user(service.tenant_id(), &ctx.params.id)
        .await?;
    Ok(Reply::Empty)
}

async fn list_users_action(ctx: Ctx<ListUsersRequest>) -> FlowResult<Reply> {
    let page = ctx.pagination()?;
    let (users, total) = ctx
        .state
        .repo()
        .list_users_paginated(ctx.state.tenant_id(), page)
        .await
        .map_err(|_| FlowError::Internal("Failed to retrieve users".to_string()))?;
    Reply::page(users, total)
}

async fn get_user_by_id_action(ctx: Ctx<UserIdRequest>) -> FlowResult<Reply> {
    let id = ctx.params.id;
    let user = ctx
        .state
        .repo()
        .get_user_by_id(ctx.state.tenant_id(), &id)
        .await
        .map_err(|_| FlowError::NotFound(format!("User not found with ID: {}", id)))?;
    Reply::ok(user)
}

async fn get_user_by_name_action(ctx: Ctx<UserNameRequest>) -> FlowResult<Reply> {
    let username = ctx.params.username;
    let user = ctx
        .state
        .repo()
        .get_user_by_name(ctx.state.tenant_id(), &username)
        .await
        .map_err(|_| FlowError::NotFound(format!("User not found with username: {}", username)))?;
    Reply::ok(user)
}

async fn set_active_action(ctx: Ctx<UserIdRequest>, active: bool) -> FlowResult<Reply> {
    let user = ctx
        .state
        .repo()
        .set_active(ctx.state.tenant_id(), &ctx.params.id, active)
        .await?;
    let message = if active {
        "User activated successfully"
    } else {
        "User deactivated successfully"
    };
    Ok(Reply::ok(user)?.with_message(message))
}

/// Router state: the shared service plus the prebuilt flows.
#[derive(Clone)]
pub struct UsersApp {
    pub service: SharedService,
    pub flows: Arc<UserFlows>,
}

impl UsersApp {
    pub fn new(service: UserService) -> Self {
        Self {
            service: Arc::new(service),
            flows: Arc::new(UserFlows::new()),
        }
    }

    fn state(&self) -> SharedService {
        Arc::clone(&self.service)
    }
}

pub async fn create_user(State(app): State<UsersApp>, body: Bytes) -> Response {
    let input = FlowInput::new(Method::POST).body(body);
    app.flows.create.run(input, app.state()).await
}

pub async fn list_users(
    State(app): State<UsersApp>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let input = FlowInput::new(Method::GET).query(query);
    app.flows.list.run(input, app.state()).await
}

pub async fn get_user(State(app): State<UsersApp>, Path(id): Path<String>) -> Response {
    let input = FlowInput::new(Method::GET).path_param("id", id);
    app.flows.get_by_id.run(input, app.state()).await
}

pub async fn get_user_by_name(
    State(app): State<UsersApp>,
    Path(username): Path<String>,
) -> Response {
    let input = FlowInput::new(Method::GET).path_param("username", username);
    app.flows.get_by_name.run(input, app.state()).await
}

pub async fn update_user(
    State(app): State<UsersApp>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let input = FlowInput::new(Method::PUT).path_param("id", id).body(body);
    app.flows.update.run(input, app.state()).await
}

pub async fn delete_user(State(app): State<UsersApp>, Path(id): Path<String>) -> Response {
    let input = FlowInput::new(Method::DELETE).path_param("id", id);
    app.flows.delete.run(input, app.state()).await
}

pub async fn activate_user(State(app): State<UsersApp>, Path(id): Path<String>) -> Response {
    let input = FlowInput::new(Method::POST).path_param("id", id);
    app.flows.activate.run(input, app.state()).await
}

pub async fn deactivate_user(State(app): State<UsersApp>, Path(id): Path<String>) -> Response {
    let input = FlowInput::new(Method::POST).path_param("id", id);
    app.flows.deactivate.run(input, app.state()).await
}

pub async fn user_stats(State(app): State<UsersApp>) -> Response {
    match app.service.repo().stats(app.service.tenant_id()).await {
        Ok(stats) => Json(ApiResponse::success("Success", json!(stats))).into_response(),
        Err(e) => FlowError::from(e).into_response(),
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": Utc::now(),
        "version": crate::VERSION,
    }))
}
