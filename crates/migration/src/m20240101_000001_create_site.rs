//! Create `site` table.
//!
//! `version` backs optimistic locking: every update bumps it by one and is
//! conditioned on the value the writer read.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Site::Table)
                    .if_not_exists()
                    .col(pk_auto(Site::Id))
                    .col(integer(Site::Version).default(0))
                    .col(string_len(Site::Name, 255).not_null())
                    .col(string_len(Site::Street, 255).not_null())
                    .col(string_len(Site::PostalCode, 16).not_null())
                    .col(string_len(Site::City, 128).not_null())
                    .col(string_len(Site::Province, 64).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Site::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Site { Table, Id, Version, Name, Street, PostalCode, City, Province }
