use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Grid sorts and filters by name and city most often
        manager
            .create_index(
                Index::create()
                    .name("idx_site_name")
                    .table(Site::Table)
                    .col(Site::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_site_city_province")
                    .table(Site::Table)
                    .col(Site::City)
                    .col(Site::Province)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_site_city_province").table(Site::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_site_name").table(Site::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Site { Table, Name, City, Province }
