use crate::handlers::{
    health::health_check,
    items::Items,
    resource::{self, Resource},
    students::Students,
    subjects::Subjects,
    teachers::Teachers,
    users::{login, Users},
};
use crate::schemas::{api_doc, AppState};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use common::NotFoundBody;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

/// Cross-origin policy for the single frontend allowed to call the API.
pub fn cors_layer(frontend_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(frontend_origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60)))
}

/// Fixed response for every route the API does not serve, whatever the verb.
pub async fn not_found() -> (StatusCode, Json<NotFoundBody>) {
    (StatusCode::NOT_FOUND, Json(NotFoundBody::default()))
}

/// Mount the list/create and get/update/delete routes of one resource.
fn resource_routes<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    let collection = format!("/{}", R::COLLECTION);
    let member = format!("/{}/:{}", R::COLLECTION, R::KEY_NAME);

    router
        .route(
            &collection,
            get(resource::list::<R>)
                .post(resource::create::<R>)
                .fallback(not_found),
        )
        .route(
            &member,
            get(resource::get_one::<R>)
                .put(resource::update::<R>)
                .delete(resource::delete::<R>)
                .fallback(not_found),
        )
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health_check).fallback(not_found))
        // Static segment wins over `/users/:email`
        .route("/users/login", post(login).fallback(not_found));

    let router = resource_routes::<Items>(router);
    let router = resource_routes::<Students>(router);
    let router = resource_routes::<Subjects>(router);
    let router = resource_routes::<Users>(router);
    let router = resource_routes::<Teachers>(router);

    router
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc()))
        .fallback(not_found)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(cors),
        )
        .with_state(state)
}
