use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create items table
        manager
            .create_table(audited(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(pk_auto(Items::Id))
                    .col(string(Items::Name))
                    .col(string_null(Items::Description))
                    .col(integer(Items::Quantity).default(0))
                    .to_owned(),
            ))
            .await?;

        // Create students table
        manager
            .create_table(audited(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(string(Students::FirstName))
                    .col(string(Students::LastName))
                    .col(integer(Students::Age))
                    .col(string(Students::ClassName))
                    .to_owned(),
            ))
            .await?;

        // Create subjects table
        manager
            .create_table(audited(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(pk_auto(Subjects::Id))
                    .col(string(Subjects::Name))
                    .col(string(Subjects::Code))
                    .col(integer(Subjects::Credits))
                    .to_owned(),
            ))
            .await?;

        // Create users table
        manager
            .create_table(audited(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string(Users::FirstName))
                    .col(string(Users::LastName))
                    .to_owned(),
            ))
            .await?;

        // Create teachers table
        manager
            .create_table(audited(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(pk_auto(Teachers::Id))
                    .col(string(Teachers::FirstName))
                    .col(string(Teachers::LastName))
                    .col(integer(Teachers::Age))
                    .col(string(Teachers::Subject))
                    .to_owned(),
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Append the lifecycle columns shared by every table.
fn audited(mut table: TableCreateStatement) -> TableCreateStatement {
    table
        .col(string_len(Audit::Status, 16).default("Active"))
        .col(timestamp_with_time_zone(Audit::CreatedAt))
        .col(timestamp_with_time_zone(Audit::UpdatedAt))
        .col(timestamp_with_time_zone_null(Audit::DeletedAt));
    table
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Audit {
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Name,
    Description,
    Quantity,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    FirstName,
    LastName,
    Age,
    ClassName,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    Name,
    Code,
    Credits,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
    FirstName,
    LastName,
    Age,
    Subject,
}
