//! Pagination utilities for service layer
//!
//! `PageRequest` carries a 0-based page index, a page size and a sort
//! specification; `Page` is one slice of results plus the total count.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One `property:direction` entry of a sort specification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: &str) -> Self { Self { property: property.to_string(), direction: Direction::Asc } }
    pub fn desc(property: &str) -> Self { Self { property: property.to_string(), direction: Direction::Desc } }
}

/// Parse `name:desc,city` style sort specifications.
///
/// Entries without a direction sort ascending; blank entries are skipped.
/// Property names are not checked here.
pub fn parse_sort(spec: &str) -> Result<Vec<SortOrder>, String> {
    let mut orders = Vec::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (property, direction) = match entry.split_once(':') {
            Some((p, d)) => {
                let direction = match d.trim().to_ascii_lowercase().as_str() {
                    "asc" => Direction::Asc,
                    "desc" => Direction::Desc,
                    other => return Err(format!("invalid sort direction '{other}'")),
                };
                (p.trim(), direction)
            }
            None => (entry, Direction::Asc),
        };
        if property.is_empty() {
            return Err(format!("missing sort property in '{entry}'"));
        }
        orders.push(SortOrder { property: property.to_string(), direction });
    }
    Ok(orders)
}

/// Pagination parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
    #[serde(default)]
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn of(page: u64, size: u64) -> Self { Self { page, size, sort: Vec::new() } }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Clamp the size to `1..=MAX_PAGE_SIZE` and the page so that
    /// `page * size` fits a SQL `OFFSET`; returns `(page, size)`.
    pub fn normalize(&self) -> (u64, u64) {
        let size = self.size.clamp(1, MAX_PAGE_SIZE);
        let last_page = i64::MAX as u64 / size;
        (self.page.min(last_page), size)
    }

    pub fn offset(&self) -> u64 {
        let (page, size) = self.normalize();
        page.saturating_mul(size)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self::of(0, DEFAULT_PAGE_SIZE) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u64, size: u64, total_elements: u64) -> Self {
        let size = size.max(1);
        Self { content, number, size, total_elements, total_pages: total_elements.div_ceil(size) }
    }

    pub fn empty(request: &PageRequest) -> Self {
        let (page, size) = request.normalize();
        Self::new(Vec::new(), page, size, 0)
    }
}
