//! Migrator registering the schema of the sites screen.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_site;
mod m20240101_000002_add_site_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_site::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_site_indexes::Migration),
        ]
    }
}
