//! Generic CRUD handlers shared by every school resource.
//!
//! A resource module only describes its payloads and how they map onto the
//! SeaORM active model; listing, lookup, partial update and soft delete are
//! implemented once here.

use std::fmt::{Debug, Display};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use common::ApiResponse;
use model::lifecycle::{self, Lifecycle};
use sea_orm::{
    sea_query::SimpleExpr, ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection,
    DbErr, FromQueryResult, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, SqlErr,
};
use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer, Serialize,
};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{
    openapi::{
        path::{OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemType},
        request_body::RequestBodyBuilder,
        ContentBuilder, OpenApi, Ref, Required, ResponseBuilder,
    },
    ToSchema,
};

use crate::error::ApiError;
use crate::schemas::AppState;

/// A table exposed through the five standard endpoints.
pub trait Resource: Send + Sync + 'static {
    type Entity: Lifecycle<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + From<Self::Model>
        + Send
        + Sync;

    /// Path key: the numeric id for most resources, the email for users.
    type Key: DeserializeOwned + Display + Debug + Send + Sync + 'static;
    type Create: DeserializeOwned + for<'s> ToSchema<'s> + Send + 'static;
    type Update: DeserializeOwned + for<'s> ToSchema<'s> + Send + 'static;
    type Response: Serialize + for<'s> ToSchema<'s> + From<Self::Model> + Send + 'static;

    /// Singular display name, e.g. "Teacher".
    const NAME: &'static str;
    /// URL segment and OpenAPI tag, e.g. "teachers".
    const COLLECTION: &'static str;
    /// Name of the path parameter identifying one record.
    const KEY_NAME: &'static str = "id";

    /// Condition selecting the record addressed by `key`.
    fn key_filter(key: &Self::Key) -> SimpleExpr;

    /// Build a fresh active model from a create request.
    fn new_record(request: Self::Create) -> Result<Self::ActiveModel, ApiError>;

    /// Overwrite the fields present in `request`, leaving the rest untouched.
    fn apply_update(active: &mut Self::ActiveModel, request: Self::Update) -> Result<(), ApiError>;
}

/// Numeric record id taken from the path.
///
/// Any integer parses, including ones too large for the id column; those
/// simply match no record, so the caller sees not-found instead of a bad request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordId {
    raw: String,
    value: Option<i32>,
}

impl RecordId {
    /// Condition on `column` matching this id.
    pub fn filter<C: ColumnTrait>(&self, column: C) -> SimpleExpr {
        match self.value {
            Some(id) => column.eq(id),
            // Primary keys are never null
            None => column.is_null(),
        }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let digits = raw.strip_prefix(['-', '+']).unwrap_or(&raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!("Cannot parse \"{}\" as an id", raw)));
        }
        let value = raw.parse::<i32>().ok();
        Ok(RecordId { raw, value })
    }
}

/// Find a live (not soft-deleted) record by its key.
pub async fn find_live<R: Resource>(
    db: &DatabaseConnection,
    key: &R::Key,
) -> Result<Option<R::Model>, DbErr> {
    R::Entity::find_live().filter(R::key_filter(key)).one(db).await
}

async fn find_live_or_404<R: Resource>(
    db: &DatabaseConnection,
    key: &R::Key,
) -> Result<R::Model, ApiError> {
    match find_live::<R>(db, key).await? {
        Some(model) => Ok(model),
        None => {
            warn!("{} with {} {} not found", R::NAME, R::KEY_NAME, key);
            Err(ApiError::NotFound(format!("{} {}", R::NAME, key)))
        }
    }
}

fn write_error<R: Resource>(err: DbErr) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!("Unique constraint violated on {}: {}", R::COLLECTION, detail);
            ApiError::Conflict(format!("{} already exists", R::NAME))
        }
        _ => ApiError::Database(err),
    }
}

/// List all live records, ordered by id.
#[instrument(skip_all, fields(resource = R::COLLECTION))]
pub async fn list<R: Resource>(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<R::Response>>>, ApiError> {
    trace!("Entering list handler");

    let records = R::Entity::find_live()
        .order_by_asc(R::Entity::id_column())
        .all(&state.db)
        .await?;
    let count = records.len();
    debug!("Retrieved {} {} from database", count, R::COLLECTION);

    let data: Vec<R::Response> = records.into_iter().map(R::Response::from).collect();
    info!("Successfully retrieved {} {}", count, R::COLLECTION);
    Ok(Json(ApiResponse::ok(
        data,
        format!("{} retrieved successfully", capitalize(R::COLLECTION)),
    )))
}

/// Insert a record from a JSON body.
#[instrument(skip_all, fields(resource = R::COLLECTION))]
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Result<Json<R::Create>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<R::Response>>), ApiError> {
    trace!("Entering create handler");
    let Json(request) = body.inspect_err(|e| warn!("Rejected create body: {}", e))?;

    let active = R::new_record(request)?;
    let model = active.insert(&state.db).await.map_err(write_error::<R>)?;

    info!("{} created successfully", R::NAME);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            R::Response::from(model),
            format!("{} created successfully", R::NAME),
        )),
    ))
}

/// Fetch a single live record.
#[instrument(skip_all, fields(resource = R::COLLECTION))]
pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    key: Result<Path<R::Key>, PathRejection>,
) -> Result<Json<ApiResponse<R::Response>>, ApiError> {
    let Path(key) = key?;
    debug!("Fetching {} with {}: {}", R::NAME, R::KEY_NAME, key);

    let model = find_live_or_404::<R>(&state.db, &key).await?;

    info!("Successfully retrieved {} {}", R::NAME, key);
    Ok(Json(ApiResponse::ok(
        R::Response::from(model),
        format!("{} retrieved successfully", R::NAME),
    )))
}

/// Partially update a live record.
#[instrument(skip_all, fields(resource = R::COLLECTION))]
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    key: Result<Path<R::Key>, PathRejection>,
    body: Result<Json<R::Update>, JsonRejection>,
) -> Result<Json<ApiResponse<R::Response>>, ApiError> {
    let Path(key) = key?;
    debug!("Updating {} with {}: {}", R::NAME, R::KEY_NAME, key);

    let existing = find_live_or_404::<R>(&state.db, &key).await?;
    let Json(request) = body.inspect_err(|e| warn!("Rejected update body: {}", e))?;

    let mut active: R::ActiveModel = existing.into();
    R::apply_update(&mut active, request)?;

    trace!("Attempting to update {} in database", R::NAME);
    let updated = active.update(&state.db).await.map_err(write_error::<R>)?;

    info!("{} {} updated successfully", R::NAME, key);
    Ok(Json(ApiResponse::ok(
        R::Response::from(updated),
        format!("{} updated successfully", R::NAME),
    )))
}

/// Soft-delete a live record. Deleting it again reports not found.
#[instrument(skip_all, fields(resource = R::COLLECTION))]
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    key: Result<Path<R::Key>, PathRejection>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let Path(key) = key?;
    debug!("Attempting to delete {} with {}: {}", R::NAME, R::KEY_NAME, key);

    let existing = find_live_or_404::<R>(&state.db, &key).await?;
    let mut active: R::ActiveModel = existing.into();
    lifecycle::mark_deleted(&mut active);
    active.update(&state.db).await?;

    info!("{} {} deleted successfully", R::NAME, key);
    Ok(Json(ApiResponse::ok(
        format!("{} {} deleted", R::NAME, key),
        format!("{} deleted successfully", R::NAME),
    )))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Register the five endpoints of `R` and its payload schemas in an OpenAPI document.
pub fn document<R: Resource>(openapi: &mut OpenApi) {
    let (create_name, create_schema) = <R::Create as ToSchema>::schema();
    let (update_name, update_schema) = <R::Update as ToSchema>::schema();
    let (response_name, response_schema) = <R::Response as ToSchema>::schema();

    let components = openapi.components.get_or_insert_with(Default::default);
    components.schemas.insert(create_name.to_string(), create_schema);
    components.schemas.insert(update_name.to_string(), update_schema);
    components.schemas.insert(response_name.to_string(), response_schema);

    let json_body = |schema: &str| {
        ContentBuilder::new()
            .schema(Ref::from_schema_name(schema))
            .build()
    };
    let record = |description: String| {
        ResponseBuilder::new()
            .description(description)
            .content("application/json", json_body(response_name))
            .build()
    };
    let request_body = |schema: &str| {
        RequestBodyBuilder::new()
            .content("application/json", json_body(schema))
            .required(Some(Required::True))
            .build()
    };
    let key_param = || {
        ParameterBuilder::new()
            .name(R::KEY_NAME)
            .parameter_in(ParameterIn::Path)
            .required(Required::True)
            .description(Some(format!("{} {}", R::NAME, R::KEY_NAME)))
            .build()
    };
    let operation = |verb: &str, summary: String| {
        OperationBuilder::new()
            .tag(R::COLLECTION)
            .operation_id(Some(format!("{}_{}", verb, R::COLLECTION)))
            .summary(Some(summary))
    };

    let list_op = operation("list", format!("List all {}", R::COLLECTION))
        .response("200", record(format!("{} retrieved successfully", capitalize(R::COLLECTION))))
        .response("500", ResponseBuilder::new().description("Internal server error").build())
        .build();
    let create_op = operation("create", format!("Create a {}", R::NAME))
        .request_body(Some(request_body(create_name)))
        .response("201", record(format!("{} created successfully", R::NAME)))
        .response("400", ResponseBuilder::new().description("Invalid request").build())
        .response("409", ResponseBuilder::new().description("Already exists").build())
        .build();
    let get_op = operation("get", format!("Get a {} by {}", R::NAME, R::KEY_NAME))
        .parameter(key_param())
        .response("200", record(format!("{} retrieved successfully", R::NAME)))
        .response("404", ResponseBuilder::new().description(format!("{} not found", R::NAME)).build())
        .build();
    let update_op = operation("update", format!("Update a {}", R::NAME))
        .parameter(key_param())
        .request_body(Some(request_body(update_name)))
        .response("200", record(format!("{} updated successfully", R::NAME)))
        .response("400", ResponseBuilder::new().description("Invalid request").build())
        .response("404", ResponseBuilder::new().description(format!("{} not found", R::NAME)).build())
        .build();
    let delete_op = operation("delete", format!("Soft-delete a {}", R::NAME))
        .parameter(key_param())
        .response("200", ResponseBuilder::new().description(format!("{} deleted successfully", R::NAME)).build())
        .response("404", ResponseBuilder::new().description(format!("{} not found", R::NAME)).build())
        .build();

    let mut collection = PathItem::new(PathItemType::Get, list_op);
    collection.operations.insert(PathItemType::Post, create_op);

    let mut member = PathItem::new(PathItemType::Get, get_op);
    member.operations.insert(PathItemType::Put, update_op);
    member.operations.insert(PathItemType::Delete, delete_op);

    openapi
        .paths
        .paths
        .insert(format!("/{}", R::COLLECTION), collection);
    openapi
        .paths
        .paths
        .insert(format!("/{}/{{{}}}", R::COLLECTION, R::KEY_NAME), member);
}

#[cfg(test)]
mod tests {
    use super::{capitalize, RecordId};

    fn parse_id(raw: &str) -> Result<RecordId, serde_json::Error> {
        serde_json::from_value(serde_json::Value::String(raw.to_string()))
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("teachers"), "Teachers");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_record_id_parses_integers() {
        let id = parse_id("42").unwrap();
        assert_eq!(id.value, Some(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(parse_id("-7").unwrap().value, Some(-7));
    }

    #[test]
    fn test_record_id_out_of_range_matches_nothing() {
        let id = parse_id("99999999999").unwrap();
        assert_eq!(id.value, None);
        assert_eq!(id.to_string(), "99999999999");
    }

    #[test]
    fn test_record_id_rejects_non_numeric() {
        assert!(parse_id("abc").is_err());
        assert!(parse_id("").is_err());
        assert!(parse_id("-").is_err());
        assert!(parse_id("12a").is_err());
    }
}
