use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::site::{repo::seaorm::SeaOrmSiteRepository, SiteService};

pub type Sites = SiteService<SeaOrmSiteRepository>;

/// Router state shared by all handlers.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub sites: Arc<Sites>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmSiteRepository::new(db.clone()));
        Self { db, sites: Arc::new(SiteService::new(repo)) }
    }
}
