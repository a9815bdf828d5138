use sea_orm::{entity::prelude::*, sea_query::Expr, ActiveModelTrait, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub version: i32,
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub province: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX_LEN: usize = 255;
pub const STREET_MAX_LEN: usize = 255;
pub const POSTAL_CODE_MAX_LEN: usize = 16;
pub const CITY_MAX_LEN: usize = 128;
pub const PROVINCE_MAX_LEN: usize = 64;

/// A site as handled by the service and view layers.
///
/// `id` and `version` are both `None` until the first save; afterwards they
/// mirror the stored row. `version` is the value read, and an update only
/// succeeds while the stored row still carries it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: Option<i32>,
    pub version: Option<i32>,
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub province: String,
}

impl Site {
    pub fn new(name: &str, street: &str, postal_code: &str, city: &str, province: &str) -> Self {
        Self {
            id: None,
            version: None,
            name: name.to_string(),
            street: street.to_string(),
            postal_code: postal_code.to_string(),
            city: city.to_string(),
            province: province.to_string(),
        }
    }

    pub fn is_new(&self) -> bool { self.id.is_none() }
}

impl From<Model> for Site {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            version: Some(m.version),
            name: m.name,
            street: m.street,
            postal_code: m.postal_code,
            city: m.city,
            province: m.province,
        }
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), errors::ModelError> {
    if value.chars().count() > max {
        return Err(errors::ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

/// Column-width checks; the fields are otherwise free text.
pub fn validate(site: &Site) -> Result<(), errors::ModelError> {
    check_len("name", &site.name, NAME_MAX_LEN)?;
    check_len("street", &site.street, STREET_MAX_LEN)?;
    check_len("postal_code", &site.postal_code, POSTAL_CODE_MAX_LEN)?;
    check_len("city", &site.city, CITY_MAX_LEN)?;
    check_len("province", &site.province, PROVINCE_MAX_LEN)?;
    Ok(())
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Site>, errors::ModelError> {
    let found = Entity::find_by_id(id).one(db).await?;
    Ok(found.map(Site::from))
}

/// Insert a transient site; the stored row starts at version 0.
pub async fn insert<C: ConnectionTrait>(db: &C, site: &Site) -> Result<Site, errors::ModelError> {
    validate(site)?;
    let am = ActiveModel {
        id: NotSet,
        version: Set(0),
        name: Set(site.name.clone()),
        street: Set(site.street.clone()),
        postal_code: Set(site.postal_code.clone()),
        city: Set(site.city.clone()),
        province: Set(site.province.clone()),
    };
    let created = am.insert(db).await?;
    Ok(created.into())
}

/// Overwrite every field of a persisted site, compare-and-swapping `version`.
pub async fn update_versioned<C: ConnectionTrait>(db: &C, site: &Site) -> Result<Site, errors::ModelError> {
    validate(site)?;
    let id = site
        .id
        .ok_or_else(|| errors::ModelError::Validation("site id required for update".into()))?;
    let version = site.version.ok_or(errors::ModelError::StaleVersion { id })?;
    // a version that cannot be bumped never matches a writable row
    let next = version.checked_add(1).ok_or(errors::ModelError::StaleVersion { id })?;

    let res = Entity::update_many()
        .col_expr(Column::Name, Expr::value(site.name.clone()))
        .col_expr(Column::Street, Expr::value(site.street.clone()))
        .col_expr(Column::PostalCode, Expr::value(site.postal_code.clone()))
        .col_expr(Column::City, Expr::value(site.city.clone()))
        .col_expr(Column::Province, Expr::value(site.province.clone()))
        .col_expr(Column::Version, Expr::value(next))
        .filter(Column::Id.eq(id))
        .filter(Column::Version.eq(version))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(errors::ModelError::StaleVersion { id });
    }
    Ok(Site { version: Some(next), ..site.clone() })
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
