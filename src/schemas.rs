use common::{ErrorResponse, LoginRequest, NotFoundBody};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::{
    items::Items, resource, students::Students, subjects::Subjects, teachers::Teachers,
    users::{UserResponse, Users},
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation for the hand-written endpoints. The CRUD endpoints
/// are generated per resource, see [`api_doc`].
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::login,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            NotFoundBody,
            LoginRequest,
            UserResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "School inventory"),
        (name = "students", description = "Enrolled students"),
        (name = "subjects", description = "Subjects taught"),
        (name = "users", description = "Frontend accounts and login"),
        (name = "teachers", description = "Teaching staff"),
    ),
    info(
        title = "School API",
        description = "CRUD API for school administration: items, students, subjects, users and teachers",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Full OpenAPI document including every resource's CRUD endpoints.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    resource::document::<Items>(&mut doc);
    resource::document::<Students>(&mut doc);
    resource::document::<Subjects>(&mut doc);
    resource::document::<Users>(&mut doc);
    resource::document::<Teachers>(&mut doc);
    doc
}
