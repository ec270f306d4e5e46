// ABOUTME: Declarative request pipeline for JSON endpoints
// ABOUTME: Binds, validates, paginates, runs an action, and shapes the response envelope

use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::repository::{PageRequest, RepositoryError};
use super::validation::{validate_fields, validate_required, FieldError, FieldValidator};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("{0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

pub type FlowResult<T> = std::result::Result<T, FlowError>;

impl FlowError {
    pub fn status(&self) -> StatusCode {
        match self {
            FlowError::BadRequest(_) | FlowError::Validation(_) => StatusCode::BAD_REQUEST,
            FlowError::NotFound(_) => StatusCode::NOT_FOUND,
            FlowError::Conflict(_) => StatusCode::CONFLICT,
            FlowError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FlowError::BadRequest(_) => "BAD_REQUEST",
            FlowError::Validation(_) => "VALIDATION_ERROR",
            FlowError::NotFound(_) => "NOT_FOUND",
            FlowError::Conflict(_) => "CONFLICT",
            FlowError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RepositoryError> for FlowError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => FlowError::NotFound(err.to_string()),
            RepositoryError::Duplicate(_) => FlowError::Conflict(err.to_string()),
            RepositoryError::Invalid(_) | RepositoryError::UnknownTenant(_) => {
                FlowError::BadRequest(err.to_string())
            }
        }
    }
}

impl IntoResponse for FlowError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match &self {
            FlowError::Validation(errors) => errors.clone(),
            _ => Vec::new(),
        };
        let body = ApiResponse::Error {
            code: self.code().to_string(),
            message: self.to_string(),
            errors,
        };
        (status, Json(body)).into_response()
    }
}

/// Paging details attached to listing responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// JSON envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse {
    Success {
        message: String,
        data: JsonValue,
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<PageMeta>,
    },
    Error {
        code: String,
        message: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        errors: Vec<FieldError>,
    },
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, data: JsonValue) -> Self {
        ApiResponse::Success {
            message: message.into(),
            data,
            meta: None,
        }
    }
}

/// Raw request parts a flow binds from.
#[derive(Debug, Clone, Default)]
pub struct FlowInput {
    pub method: Method,
    pub path: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl FlowInput {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// JSON body object with path parameters layered on top.
    fn bind(&self) -> FlowResult<Map<String, JsonValue>> {
        let mut payload = if self.body.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            match serde_json::from_slice(&self.body) {
                Ok(JsonValue::Object(map)) => map,
                Ok(_) => {
                    return Err(FlowError::BadRequest(
                        "request body must be a JSON object".to_string(),
                    ))
                }
                Err(e) => return Err(FlowError::BadRequest(format!("invalid JSON body: {}", e))),
            }
        };

        for (key, value) in &self.path {
            payload.insert(key.clone(), JsonValue::String(value.clone()));
        }
        Ok(payload)
    }
}

/// What an action hands back for shaping.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Data {
        data: JsonValue,
        message: Option<String>,
    },
    Page {
        items: JsonValue,
        total: usize,
    },
    Empty,
}

impl Reply {
    pub fn ok(data: impl Serialize) -> FlowResult<Self> {
        Ok(Reply::Data {
            data: to_json(data)?,
            message: None,
        })
    }

    pub fn page(items: impl Serialize, total: usize) -> FlowResult<Self> {
        Ok(Reply::Page {
            items: to_json(items)?,
            total,
        })
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Reply::Data { data, .. } => Reply::Data {
                data,
                message: Some(message.into()),
            },
            Reply::Empty => Reply::Data {
                data: JsonValue::Null,
                message: Some(message.into()),
            },
            page => page,
        }
    }
}

fn to_json(value: impl Serialize) -> FlowResult<JsonValue> {
    serde_json::to_value(value)
        .map_err(|e| FlowError::Internal(format!("failed to serialize response: {}", e)))
}

/// Everything an action sees: the bound params, pagination, and shared state.
pub struct FlowContext<T, S> {
    pub params: T,
    pub pagination: Option<PageRequest>,
    pub state: S,
}

impl<T, S> FlowContext<T, S> {
    pub fn pagination(&self) -> FlowResult<&PageRequest> {
        self.pagination
            .as_ref()
            .ok_or_else(|| FlowError::Internal("pagination context not found".to_string()))
    }
}

type ActionFn<T, S> =
    Arc<dyn Fn(FlowContext<T, S>) -> BoxFuture<'static, FlowResult<Reply>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseMode {
    Plain,
    /// Status and message follow the request method.
    Smart,
}

pub struct Flow<T, S> {
    name: String,
    required: Vec<String>,
    validators: Vec<FieldValidator>,
    paginate: bool,
    action: Option<(String, ActionFn<T, S>)>,
    mode: ResponseMode,
}

impl<T, S> Flow<T, S>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            validators: Vec::new(),
            paginate: false,
            action: None,
            mode: ResponseMode::Plain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate_required(mut self, fields: &[&str]) -> Self {
        self.required.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn validate_fields(mut self, validators: Vec<FieldValidator>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Bind `page`/`page_size`/filters from the query string.
    pub fn paginate(mut self) -> Self {
        self.paginate = true;
        self
    }

    pub fn action<F, Fut>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(FlowContext<T, S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FlowResult<Reply>> + Send + 'static,
    {
        let action: ActionFn<T, S> = Arc::new(
            move |ctx: FlowContext<T, S>| -> BoxFuture<'static, FlowResult<Reply>> {
                Box::pin(action(ctx))
            },
        );
        self.action = Some((name.into(), action));
        self
    }

    pub fn smart(mut self) -> Self {
        self.mode = ResponseMode::Smart;
        self
    }

    /// Run the pipeline and return the status plus envelope.
    pub async fn execute(&self, input: FlowInput, state: S) -> FlowResult<(StatusCode, ApiResponse)> {
        let payload = input.bind()?;

        let mut errors = validate_required(&payload, &self.required);
        errors.extend(validate_fields(&payload, &self.validators));
        if !errors.is_empty() {
            return Err(FlowError::Validation(errors));
        }

        let pagination = self.paginate.then(|| PageRequest::from_query(&input.query));

        let params: T = serde_json::from_value(JsonValue::Object(payload))
            .map_err(|e| FlowError::BadRequest(format!("invalid request: {}", e)))?;

        let (action_name, action) = self
            .action
            .as_ref()
            .ok_or_else(|| FlowError::Internal(format!("flow {} has no action", self.name)))?;

        debug!(flow = %self.name, action = %action_name, "Running flow action");
        let reply = action(FlowContext {
            params,
            pagination: pagination.clone(),
            state,
        })
        .await?;

        self.shape(&input.method, reply, pagination.as_ref())
    }

    /// Run the pipeline and turn the outcome into an HTTP response.
    pub async fn run(&self, input: FlowInput, state: S) -> Response {
        match self.execute(input, state).await {
            Ok((status, body)) => (status, Json(body)).into_response(),
            Err(e) => {
                if e.status().is_server_error() {
                    warn!(flow = %self.name, "Flow failed: {}", e);
                } else {
                    debug!(flow = %self.name, "Flow rejected request: {}", e);
                }
                e.into_response()
            }
        }
    }

    fn shape(
        &self,
        method: &Method,
        reply: Reply,
        pagination: Option<&PageRequest>,
    ) -> FlowResult<(StatusCode, ApiResponse)> {
        let (status, default_message) = match self.mode {
            ResponseMode::Smart => smart_outcome(method),
            ResponseMode::Plain => (StatusCode::OK, "Success"),
        };

        let body = match reply {
            Reply::Data { data, message } => ApiResponse::Success {
                message: message.unwrap_or_else(|| default_message.to_string()),
                data,
                meta: None,
            },
            Reply::Empty => ApiResponse::success(default_message, JsonValue::Null),
            Reply::Page { items, total } => {
                let page = pagination.ok_or_else(|| {
                    FlowError::Internal("pagination context not found".to_string())
                })?;
                ApiResponse::Success {
                    message: default_message.to_string(),
                    data: items,
                    meta: Some(PageMeta {
                        page: page.page,
                        page_size: page.page_size,
                        total,
                        total_pages: page.total_pages(total),
                    }),
                }
            }
        };

        Ok((status, body))
    }
}

fn smart_outcome(method: &Method) -> (StatusCode, &'static str) {
    if method == Method::POST {
        (StatusCode::CREATED, "Created successfully")
    } else if method == Method::PUT || method == Method::PATCH {
        (StatusCode::OK, "Updated successfully")
    } else if method == Method::DELETE {
        (StatusCode::OK, "Deleted successfully")
    } else {
        (StatusCode::OK, "Success")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::validation::ValidationRule;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Greeting {
        id: String,
        #[serde(default)]
        email: String,
    }

    fn echo_flow() -> Flow<Greeting, ()> {
        Flow::new("Echo")
            .validate_required(&["id"])
            .validate_fields(vec![FieldValidator::new("email", vec![ValidationRule::Email])])
            .action("echo", |ctx: FlowContext<Greeting, ()>| async move { Reply::ok(ctx.params) })
    }

    #[tokio::test]
    async fn test_path_params_override_body() {
        let input = FlowInput::new(Method::PUT)
            .path_param("id", "from-path")
            .body(Bytes::from_static(br#"{"id":"from-body","email":"a@example.com"}"#));

        let (status, body) = echo_flow().execute(input, ()).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["id"], "from-path");
        assert!(value.get("meta").is_none());
    }

    #[tokio::test]
    async fn test_validation_collects_all_errors() {
        let input = FlowInput::new(Method::POST)
            .body(Bytes::from_static(br#"{"email":"nope"}"#));

        let err = echo_flow().execute(input, ()).await.unwrap_err();
        match err {
            FlowError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["id", "email"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let input = FlowInput::new(Method::POST).body(Bytes::from_static(b"[1,2]"));
        let err = echo_flow().execute(input, ()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_smart_mode_follows_method() {
        let flow: Flow<Greeting, ()> = Flow::new("Touch")
            .action("touch", |_ctx: FlowContext<Greeting, ()>| async { Ok(Reply::Empty) })
            .smart();

        let created = FlowInput::new(Method::POST).path_param("id", "1");
        let (status, body) = flow.execute(created, ()).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, ApiResponse::success("Created successfully", JsonValue::Null));

        let deleted = FlowInput::new(Method::DELETE).path_param("id", "1");
        let (status, body) = flow.execute(deleted, ()).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ApiResponse::success("Deleted successfully", JsonValue::Null));
    }

    #[tokio::test]
    async fn test_pagination_meta() {
        #[derive(Deserialize)]
        struct Empty {}

        let flow: Flow<Empty, ()> = Flow::new("List").paginate().action(
            "list",
            |ctx: FlowContext<Empty, ()>| async move {
                let page = ctx.pagination()?;
                Reply::page(json!([page.page]), 45)
            },
        );

        let mut query = HashMap::new();
        query.insert("page".to_string(), "2".to_string());
        query.insert("page_size".to_string(), "20".to_string());

        let (_, body) = flow
            .execute(FlowInput::new(Method::GET).query(query), ())
            .await
            .unwrap();
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["data"], json!([2]));
        assert_eq!(
            value["meta"],
            json!({ "page": 2, "page_size": 20, "total": 45, "total_pages": 3 })
        );
    }

    #[tokio::test]
    async fn test_flow_without_action_is_internal_error() {
        let flow: Flow<Greeting, ()> = Flow::new("Broken");
        let input = FlowInput::new(Method::GET).path_param("id", "1");
        let err = flow.execute(input, ()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_repository_errors_map_to_statuses() {
        assert_eq!(
            FlowError::from(RepositoryError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            FlowError::from(RepositoryError::Duplicate("x".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            FlowError::from(RepositoryError::UnknownTenant("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
