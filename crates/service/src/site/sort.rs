use std::cmp::Ordering;
use std::str::FromStr;

use sea_orm::Order;

use models::site::{Column, Site};

use crate::errors::ServiceError;
use crate::pagination::{Direction, SortOrder};

/// Sortable site properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteSortKey {
    Id,
    Name,
    Street,
    PostalCode,
    City,
    Province,
}

impl FromStr for SiteSortKey {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "street" => Ok(Self::Street),
            "postal_code" | "postalCode" => Ok(Self::PostalCode),
            "city" => Ok(Self::City),
            "province" => Ok(Self::Province),
            other => Err(ServiceError::Validation(format!("cannot sort by '{other}'"))),
        }
    }
}

impl SiteSortKey {
    pub fn column(self) -> Column {
        match self {
            Self::Id => Column::Id,
            Self::Name => Column::Name,
            Self::Street => Column::Street,
            Self::PostalCode => Column::PostalCode,
            Self::City => Column::City,
            Self::Province => Column::Province,
        }
    }

    pub fn compare(self, a: &Site, b: &Site) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Street => a.street.cmp(&b.street),
            Self::PostalCode => a.postal_code.cmp(&b.postal_code),
            Self::City => a.city.cmp(&b.city),
            Self::Province => a.province.cmp(&b.province),
        }
    }
}

impl From<Direction> for Order {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        }
    }
}

/// Resolve a sort specification, appending `id` ascending unless present so
/// that paging is stable.
pub fn resolve(sort: &[SortOrder]) -> Result<Vec<(SiteSortKey, Direction)>, ServiceError> {
    let mut keys = sort
        .iter()
        .map(|o| Ok((o.property.parse::<SiteSortKey>()?, o.direction)))
        .collect::<Result<Vec<_>, ServiceError>>()?;
    if !keys.iter().any(|(k, _)| *k == SiteSortKey::Id) {
        keys.push((SiteSortKey::Id, Direction::Asc));
    }
    Ok(keys)
}

/// Order sites in memory by resolved keys.
pub fn sort_sites(sites: &mut [Site], keys: &[(SiteSortKey, Direction)]) {
    sites.sort_by(|a, b| {
        keys.iter()
            .map(|(k, d)| match d {
                Direction::Asc => k.compare(a, b),
                Direction::Desc => k.compare(a, b).reverse(),
            })
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}
