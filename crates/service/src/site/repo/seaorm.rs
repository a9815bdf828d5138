use sea_orm::DatabaseConnection;

use models::site::Site;

use crate::db::site_service;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::site::filter::SiteFilter;
use crate::site::repository::SiteRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmSiteRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSiteRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl SiteRepository for SeaOrmSiteRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Site>, ServiceError> {
        site_service::get_site(&self.db, id).await
    }

    async fn save(&self, site: Site) -> Result<Site, ServiceError> {
        site_service::save_site(&self.db, &site).await
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        site_service::delete_site(&self.db, id).await
    }

    async fn find_all(&self, filter: Option<&SiteFilter>, request: &PageRequest) -> Result<Page<Site>, ServiceError> {
        site_service::list_sites(&self.db, filter, request).await
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        site_service::count_sites(&self.db).await
    }
}
