use async_trait::async_trait;

use models::site::Site;

use super::filter::SiteFilter;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Persistence gateway for sites.
///
/// `save` inserts when the site has no id and otherwise overwrites the stored
/// row only if its version still equals the one carried by `site`; a mismatch
/// (or a row deleted meanwhile) is `ServiceError::ConcurrencyConflict`.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Site>, ServiceError>;
    async fn save(&self, site: Site) -> Result<Site, ServiceError>;
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
    async fn find_all(&self, filter: Option<&SiteFilter>, request: &PageRequest) -> Result<Page<Site>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    use crate::site::sort::{resolve, sort_sites};

    #[derive(Default)]
    struct Rows {
        by_id: BTreeMap<i32, Site>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockSiteRepository {
        rows: Mutex<Rows>,
    }

    impl MockSiteRepository {
        pub fn with_sites(sites: impl IntoIterator<Item = Site>) -> Self {
            let repo = Self::default();
            {
                let mut rows = repo.lock();
                for s in sites {
                    rows.last_id += 1;
                    let id = rows.last_id;
                    rows.by_id.insert(id, Site { id: Some(id), version: Some(0), ..s });
                }
            }
            repo
        }

        fn lock(&self) -> MutexGuard<'_, Rows> {
            // a panicking test must not cascade into unrelated assertions
            self.rows.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl SiteRepository for MockSiteRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Site>, ServiceError> {
            Ok(self.lock().by_id.get(&id).cloned())
        }

        async fn save(&self, site: Site) -> Result<Site, ServiceError> {
            models::site::validate(&site)?;
            let mut rows = self.lock();
            match site.id {
                None => {
                    rows.last_id += 1;
                    let id = rows.last_id;
                    let stored = Site { id: Some(id), version: Some(0), ..site };
                    rows.by_id.insert(id, stored.clone());
                    Ok(stored)
                }
                Some(id) => {
                    let current = rows.by_id.get(&id).and_then(|s| s.version);
                    let next = site.version.and_then(|held| held.checked_add(1));
                    match (current, site.version, next) {
                        (Some(stored), Some(held), Some(next)) if stored == held => {
                            let updated = Site { version: Some(next), ..site };
                            rows.by_id.insert(id, updated.clone());
                            Ok(updated)
                        }
                        _ => Err(ServiceError::ConcurrencyConflict { id }),
                    }
                }
            }
        }

        async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.lock().by_id.remove(&id).is_some())
        }

        async fn find_all(&self, filter: Option<&SiteFilter>, request: &PageRequest) -> Result<Page<Site>, ServiceError> {
            let keys = resolve(&request.sort)?;
            let (page, size) = request.normalize();
            let mut matching: Vec<Site> = self
                .lock()
                .by_id
                .values()
                .filter(|s| filter.map_or(true, |f| f.matches(s)))
                .cloned()
                .collect();
            sort_sites(&mut matching, &keys);
            let total = matching.len() as u64;
            let content = matching
                .into_iter()
                .skip(request.offset() as usize)
                .take(size as usize)
                .collect();
            Ok(Page::new(content, page, size, total))
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.lock().by_id.len() as u64)
        }
    }

}
