//! Sites screen: gateway, application service and view model.
//!
//! Three layers: repository (domain, persistence), service (pass-through),
//! view (list/detail state machine independent of any web framework).

pub mod filter;
pub mod sort;
pub mod repository;
pub mod repo;
pub mod service;
pub mod view;

pub use models::site::Site;
pub use service::SiteService;
