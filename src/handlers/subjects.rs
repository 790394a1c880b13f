use chrono::{DateTime, Utc};
use common::{CreateSubjectRequest, UpdateSubjectRequest};
use model::entities::subject;
use sea_orm::{sea_query::SimpleExpr, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resource::{RecordId, Resource};
use crate::error::ApiError;

/// Subject response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SubjectResponse {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    pub code: String,
    pub credits: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<subject::Model> for SubjectResponse {
    fn from(model: subject::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            credits: model.credits,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct Subjects;

impl Resource for Subjects {
    type Entity = subject::Entity;
    type Model = subject::Model;
    type ActiveModel = subject::ActiveModel;
    type Key = RecordId;
    type Create = CreateSubjectRequest;
    type Update = UpdateSubjectRequest;
    type Response = SubjectResponse;

    const NAME: &'static str = "Subject";
    const COLLECTION: &'static str = "subjects";

    fn key_filter(id: &RecordId) -> SimpleExpr {
        id.filter(subject::Column::Id)
    }

    fn new_record(request: CreateSubjectRequest) -> Result<subject::ActiveModel, ApiError> {
        Ok(subject::ActiveModel {
            name: Set(request.name),
            code: Set(request.code),
            credits: Set(request.credits),
            ..Default::default()
        })
    }

    fn apply_update(
        active: &mut subject::ActiveModel,
        request: UpdateSubjectRequest,
    ) -> Result<(), ApiError> {
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(code) = request.code {
            active.code = Set(code);
        }
        if let Some(credits) = request.credits {
            active.credits = Set(credits);
        }
        Ok(())
    }
}
