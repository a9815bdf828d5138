use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use models::site::Site;

use super::filter::SiteFilter;
use super::repository::SiteRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Application service for sites: delegates one-to-one to the repository.
pub struct SiteService<R: SiteRepository> {
    repo: Arc<R>,
}

impl<R: SiteRepository> SiteService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Site>, ServiceError> {
        let found = self.repo.find_by_id(id).await?;
        debug!(site_id = id, found = found.is_some(), "site_lookup");
        Ok(found)
    }

    /// Insert or overwrite a site.
    ///
    /// # Examples
    /// ```
    /// use service::site::{repository::mock::MockSiteRepository, Site, SiteService};
    /// use std::sync::Arc;
    /// let svc = SiteService::new(Arc::new(MockSiteRepository::default()));
    /// let saved = tokio_test::block_on(svc.update(Site::new("HQ", "Main 1", "00100", "Rome", "RM"))).unwrap();
    /// assert!(saved.id.is_some());
    /// assert_eq!(saved.version, Some(0));
    /// ```
    #[instrument(skip(self, site), fields(site_id = ?site.id, version = ?site.version))]
    pub async fn update(&self, site: Site) -> Result<Site, ServiceError> {
        match self.repo.save(site).await {
            Ok(saved) => {
                info!(site_id = ?saved.id, version = ?saved.version, "site_saved");
                Ok(saved)
            }
            Err(e @ ServiceError::ConcurrencyConflict { .. }) => {
                warn!(error = %e, "site_save_conflict");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete_by_id(id).await?;
        info!(site_id = id, deleted, "site_delete");
        Ok(deleted)
    }

    pub async fn list(&self, request: &PageRequest) -> Result<Page<Site>, ServiceError> {
        self.repo.find_all(None, request).await
    }

    /// Paged list restricted by `filter`.
    ///
    /// # Examples
    /// ```
    /// use service::site::{filter::SiteFilter, repository::mock::MockSiteRepository, Site, SiteService};
    /// use service::pagination::PageRequest;
    /// use std::sync::Arc;
    /// let repo = MockSiteRepository::with_sites(vec![
    ///     Site::new("HQ", "Main 1", "00100", "Rome", "RM"),
    ///     Site::new("Depot", "Dock 4", "16100", "Genoa", "GE"),
    /// ]);
    /// let svc = SiteService::new(Arc::new(repo));
    /// let page = tokio_test::block_on(svc.list_filtered(&PageRequest::default(), &SiteFilter::text("Genoa"))).unwrap();
    /// assert_eq!(page.total_elements, 1);
    /// ```
    pub async fn list_filtered(&self, request: &PageRequest, filter: &SiteFilter) -> Result<Page<Site>, ServiceError> {
        self.repo.find_all(Some(filter), request).await
    }

    pub async fn count(&self) -> Result<u64, ServiceError> { self.repo.count().await }
}
