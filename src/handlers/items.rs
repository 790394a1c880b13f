use chrono::{DateTime, Utc};
use common::{CreateItemRequest, UpdateItemRequest};
use model::entities::item;
use sea_orm::{sea_query::SimpleExpr, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resource::{RecordId, Resource};
use crate::error::ApiError;

/// Item response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ItemResponse {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<item::Model> for ItemResponse {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            quantity: model.quantity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Inventory items, `/items`.
pub struct Items;

impl Resource for Items {
    type Entity = item::Entity;
    type Model = item::Model;
    type ActiveModel = item::ActiveModel;
    type Key = RecordId;
    type Create = CreateItemRequest;
    type Update = UpdateItemRequest;
    type Response = ItemResponse;

    const NAME: &'static str = "Item";
    const COLLECTION: &'static str = "items";

    fn key_filter(id: &RecordId) -> SimpleExpr {
        id.filter(item::Column::Id)
    }

    fn new_record(request: CreateItemRequest) -> Result<item::ActiveModel, ApiError> {
        Ok(item::ActiveModel {
            name: Set(request.name),
            description: Set(request.description),
            quantity: Set(request.quantity),
            ..Default::default()
        })
    }

    fn apply_update(active: &mut item::ActiveModel, request: UpdateItemRequest) -> Result<(), ApiError> {
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        // A present description replaces the old one; there is no way to clear it
        if let Some(description) = request.description {
            active.description = Set(Some(description));
        }
        if let Some(quantity) = request.quantity {
            active.quantity = Set(quantity);
        }
        Ok(())
    }
}
