use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use models::site::{self, Entity as SiteEntity, Site};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::site::filter::SiteFilter;
use crate::site::sort::resolve;

/// Get a site by id.
pub async fn get_site<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Site>, ServiceError> {
    Ok(site::find(db, id).await?)
}

/// Insert a new site or overwrite an existing one under its held version.
pub async fn save_site<C: ConnectionTrait>(db: &C, s: &Site) -> Result<Site, ServiceError> {
    let saved = if s.is_new() {
        site::insert(db, s).await?
    } else {
        site::update_versioned(db, s).await?
    };
    Ok(saved)
}

/// Delete a site; returns true if deleted.
pub async fn delete_site<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    Ok(site::delete(db, id).await?)
}

/// One page of sites, optionally filtered, in the requested order.
pub async fn list_sites<C: ConnectionTrait>(
    db: &C,
    filter: Option<&SiteFilter>,
    request: &PageRequest,
) -> Result<Page<Site>, ServiceError> {
    let keys = resolve(&request.sort)?;
    let (page_idx, per_page) = request.normalize();

    let mut finder = SiteEntity::find();
    if let Some(f) = filter {
        finder = finder.filter(f.to_condition());
    }
    for (key, direction) in keys {
        finder = finder.order_by(key.column(), direction.into());
    }

    // 0-based page index; normalize keeps page * size within i64
    let paginator = finder.paginate(db, per_page);
    let total = paginator.num_items().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let rows = paginator.fetch_page(page_idx).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(Page::new(rows.into_iter().map(Site::from).collect(), page_idx, per_page, total))
}

/// Total number of stored sites.
pub async fn count_sites<C: ConnectionTrait>(db: &C) -> Result<u64, ServiceError> {
    let n = SiteEntity::find().count(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(n)
}
