use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};

use models::site::{Column, Site};

/// Optional criteria for the site list; all present criteria must hold.
///
/// Blank values are ignored. `text` matches a substring of any field,
/// `postal_code` is a prefix match and `province` an exact match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteFilter {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
}

fn criterion(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SiteFilter {
    pub fn text(text: &str) -> Self { Self { text: Some(text.to_string()), ..Self::default() } }

    pub fn is_empty(&self) -> bool {
        criterion(&self.text).is_none()
            && criterion(&self.name).is_none()
            && criterion(&self.street).is_none()
            && criterion(&self.postal_code).is_none()
            && criterion(&self.city).is_none()
            && criterion(&self.province).is_none()
    }

    /// In-memory evaluation, same semantics as [`SiteFilter::to_condition`].
    pub fn matches(&self, site: &Site) -> bool {
        if let Some(t) = criterion(&self.text) {
            let any = [&site.name, &site.street, &site.postal_code, &site.city, &site.province]
                .iter()
                .any(|f| f.contains(t));
            if !any {
                return false;
            }
        }
        criterion(&self.name).map_or(true, |n| site.name.contains(n))
            && criterion(&self.street).map_or(true, |s| site.street.contains(s))
            && criterion(&self.postal_code).map_or(true, |p| site.postal_code.starts_with(p))
            && criterion(&self.city).map_or(true, |c| site.city.contains(c))
            && criterion(&self.province).map_or(true, |p| site.province == p)
    }

    pub fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(t) = criterion(&self.text) {
            cond = cond.add(
                Condition::any()
                    .add(Column::Name.contains(t))
                    .add(Column::Street.contains(t))
                    .add(Column::PostalCode.contains(t))
                    .add(Column::City.contains(t))
                    .add(Column::Province.contains(t)),
            );
        }
        if let Some(n) = criterion(&self.name) { cond = cond.add(Column::Name.contains(n)); }
        if let Some(s) = criterion(&self.street) { cond = cond.add(Column::Street.contains(s)); }
        if let Some(p) = criterion(&self.postal_code) { cond = cond.add(Column::PostalCode.starts_with(p)); }
        if let Some(c) = criterion(&self.city) { cond = cond.add(Column::City.contains(c)); }
        if let Some(p) = criterion(&self.province) { cond = cond.add(Column::Province.eq(p)); }
        cond
    }
}
