//! Record lifecycle shared by every entity: audit timestamps and soft delete.
//!
//! Records are never purged. Deleting one flips its `status` to
//! [`RecordStatus::Deleted`] and records `deleted_at`; all default queries go
//! through [`Lifecycle::find_live`] and therefore only see active rows.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveEnum, QueryFilter};

/// Lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RecordStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Deleted")]
    Deleted,
}

/// Columns every lifecycle-managed entity carries.
pub trait Lifecycle: EntityTrait {
    /// Surrogate key, used for stable list ordering.
    fn id_column() -> Self::Column;
    fn status_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;

    /// Select only records that have not been soft-deleted.
    fn find_live() -> Select<Self> {
        Self::find().filter(Self::status_column().eq(RecordStatus::Active.to_value()))
    }
}

/// Fill in audit columns before a save.
///
/// Inserts get `created_at` and an `Active` status; every save refreshes
/// `updated_at`.
pub fn stamp<A>(active: &mut A, insert: bool)
where
    A: ActiveModelTrait,
    A::Entity: Lifecycle,
{
    let now: DateTimeUtc = Utc::now();
    if insert {
        active.set(<A::Entity as Lifecycle>::created_at_column(), now.into());
        active.set(
            <A::Entity as Lifecycle>::status_column(),
            RecordStatus::Active.to_value().into(),
        );
    }
    active.set(<A::Entity as Lifecycle>::updated_at_column(), now.into());
}

/// Flag a record as soft-deleted. The caller still has to save it.
pub fn mark_deleted<A>(active: &mut A)
where
    A: ActiveModelTrait,
    A::Entity: Lifecycle,
{
    let now: DateTimeUtc = Utc::now();
    tracing::trace!("Marking record as deleted at {}", now);
    active.set(
        <A::Entity as Lifecycle>::status_column(),
        RecordStatus::Deleted.to_value().into(),
    );
    active.set(<A::Entity as Lifecycle>::deleted_at_column(), Some(now).into());
}
