//! Service layer for the sites screen.
//! - `site::repository` is the persistence gateway (SeaORM and in-memory).
//! - `site::service` is the pass-through application service.
//! - `site::view` is the list/detail view model driving the screen.

pub mod errors;
pub mod pagination;
pub mod db;
pub mod site;
#[cfg(test)]
pub mod test_support;
