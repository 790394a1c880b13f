use chrono::{DateTime, Utc};
use common::{CreateStudentRequest, UpdateStudentRequest};
use model::entities::student;
use sea_orm::{sea_query::SimpleExpr, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resource::{RecordId, Resource};
use crate::error::ApiError;

/// Student response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct StudentResponse {
    #[serde(rename = "ID")]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub class_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            age: model.age,
            class_name: model.class_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct Students;

impl Resource for Students {
    type Entity = student::Entity;
    type Model = student::Model;
    type ActiveModel = student::ActiveModel;
    type Key = RecordId;
    type Create = CreateStudentRequest;
    type Update = UpdateStudentRequest;
    type Response = StudentResponse;

    const NAME: &'static str = "Student";
    const COLLECTION: &'static str = "students";

    fn key_filter(id: &RecordId) -> SimpleExpr {
        id.filter(student::Column::Id)
    }

    fn new_record(request: CreateStudentRequest) -> Result<student::ActiveModel, ApiError> {
        Ok(student::ActiveModel {
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            age: Set(request.age),
            class_name: Set(request.class_name),
            ..Default::default()
        })
    }

    fn apply_update(
        active: &mut student::ActiveModel,
        request: UpdateStudentRequest,
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
        if let Some(class_name) = request.class_name {
            active.class_name = Set(class_name);
        }
        Ok(())
    }
}
