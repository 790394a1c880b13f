use crate::error::ApiError;
use crate::handlers::resource::{find_live, Resource};
use crate::schemas::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use common::{ApiResponse, CreateUserRequest, LoginRequest, UpdateUserRequest};
use model::entities::user;
use sea_orm::{sea_query::SimpleExpr, ColumnTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// User response model. The password hash is never serialized.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    #[serde(rename = "ID")]
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn hash(password: &str) -> Result<String, ApiError> {
    user::hash_password(password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::Internal("failed to hash password".to_string())
    })
}

/// `/users`, addressed by email rather than id.
pub struct Users;

impl Resource for Users {
    type Entity = user::Entity;
    type Model = user::Model;
    type ActiveModel = user::ActiveModel;
    type Key = String;
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;
    type Response = UserResponse;

    const NAME: &'static str = "User";
    const COLLECTION: &'static str = "users";
    const KEY_NAME: &'static str = "email";

    fn key_filter(email: &String) -> SimpleExpr {
        user::Column::Email.eq(email.as_str())
    }

    fn new_record(request: CreateUserRequest) -> Result<user::ActiveModel, ApiError> {
        debug!("Creating user with email: {}", request.email);
        Ok(user::ActiveModel {
            email: Set(request.email),
            password_hash: Set(hash(&request.password)?),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            ..Default::default()
        })
    }

    fn apply_update(active: &mut user::ActiveModel, request: UpdateUserRequest) -> Result<(), ApiError> {
        let mut updated_fields = Vec::new();

        if let Some(email) = request.email {
            active.email = Set(email);
            updated_fields.push("email");
        }
        if let Some(password) = request.password {
            active.password_hash = Set(hash(&password)?);
            updated_fields.push("password");
        }
        if let Some(first_name) = request.first_name {
            active.first_name = Set(first_name);
            updated_fields.push("first_name");
        }
        if let Some(last_name) = request.last_name {
            active.last_name = Set(last_name);
            updated_fields.push("last_name");
        }

        if updated_fields.is_empty() {
            debug!("No fields to update for user");
        } else {
            debug!("Updating fields: {}", updated_fields.join(", "));
        }
        Ok(())
    }
}

/// Check an email/password pair against a live user
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 400, description = "Invalid request", body = common::ErrorResponse),
        (status = 401, description = "Invalid email or password", body = common::ErrorResponse),
        (status = 500, description = "Internal server error", body = common::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    trace!("Entering login function");
    let Json(request) = body?;
    debug!("Login attempt for email: {}", request.email);

    match find_live::<Users>(&state.db, &request.email).await? {
        Some(user_model) if user_model.verify_password(&request.password) => {
            info!("User {} logged in", user_model.id);
            Ok(Json(ApiResponse::ok(
                UserResponse::from(user_model),
                "Login successful",
            )))
        }
        Some(user_model) => {
            warn!("Wrong password for user {}", user_model.id);
            Err(ApiError::Unauthorized)
        }
        None => {
            user::verify_password_without_user(&request.password);
            warn!("Login attempt for unknown or deleted email: {}", request.email);
            Err(ApiError::Unauthorized)
        }
    }
}
