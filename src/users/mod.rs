// ABOUTME: User-management JSON API for panelkit
// ABOUTME: Declarative flows over a tenant-scoped user repository

pub mod dto;
pub mod flow;
pub mod handlers;
pub mod model;
pub mod password;
pub mod repository;
pub mod routes;
pub mod validation;

pub use flow::{ApiResponse, Flow, FlowContext, FlowError, FlowInput, FlowResult, PageMeta, Reply};
pub use handlers::{SharedService, UserFlows, UserService, UsersApp};
pub use model::{User, UserStats};
pub use password::{hash_password, verify_password};
pub use repository::{MemoryUserRepository, PageRequest, RepositoryError, UserRepository};
pub use routes::{app, build_router, serve};
pub use validation::{FieldError, FieldValidator, ValidationRule};
