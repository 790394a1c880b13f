use chrono::{DateTime, Utc};
use common::{CreateTeacherRequest, UpdateTeacherRequest};
use model::entities::teacher;
use sea_orm::{sea_query::SimpleExpr, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resource::{RecordId, Resource};
use crate::error::ApiError;

/// Teacher response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct TeacherResponse {
    #[serde(rename = "ID")]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<teacher::Model> for TeacherResponse {
    fn from(model: teacher::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            age: model.age,
            subject: model.subject,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// `/teachers`, keyed by numeric id.
pub struct Teachers;

impl Resource for Teachers {
    type Entity = teacher::Entity;
    type Model = teacher::Model;
    type ActiveModel = teacher::ActiveModel;
    type Key = RecordId;
    type Create = CreateTeacherRequest;
    type Update = UpdateTeacherRequest;
    type Response = TeacherResponse;

    const NAME: &'static str = "Teacher";
    const COLLECTION: &'static str = "teachers";

    fn key_filter(id: &RecordId) -> SimpleExpr {
        id.filter(teacher::Column::Id)
    }

    fn new_record(request: CreateTeacherRequest) -> Result<teacher::ActiveModel, ApiError> {
        Ok(teacher::ActiveModel {
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            age: Set(request.age),
            subject: Set(request.subject),
            ..Default::default()
        })
    }

    fn apply_update(
        active: &mut teacher::ActiveModel,
        request: UpdateTeacherRequest,
    ) -> Result<(), ApiError> {
        if let Some(first_name) = request.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = request.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(age) = request.age {
            active.age = Set(age);
        }
        if let Some(subject) = request.subject {
            active.subject = Set(subject);
        }
        Ok(())
    }
}
