use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::IntoParams;

use common::types::Count;
use service::errors::ServiceError;
use service::pagination::{parse_sort, Page, PageRequest, DEFAULT_PAGE_SIZE};
use service::site::filter::SiteFilter;
use service::site::view::{not_found_message, MSG_SAVED};
use service::site::Site;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/sites", get(list).post(save))
        .route("/sites/count", get(count))
        .route("/sites/:id/edit", get(edit))
        .route("/sites/:id", put(update).delete(delete))
}

/// Paging, sorting and filter parameters of the site list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 0-based page index
    pub page: Option<u64>,
    /// Page size, clamped to 1..=100
    pub size: Option<u64>,
    /// `field[:asc|desc]` entries separated by commas
    pub sort: Option<String>,
    pub text: Option<String>,
    pub name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
}

impl ListQuery {
    fn page_request(&self) -> Result<PageRequest, JsonApiError> {
        let sort = parse_sort(self.sort.as_deref().unwrap_or_default()).map_err(JsonApiError::bad_request)?;
        Ok(PageRequest::of(self.page.unwrap_or(0), self.size.unwrap_or(DEFAULT_PAGE_SIZE)).with_sort(sort))
    }

    fn filter(&self) -> SiteFilter {
        SiteFilter {
            text: self.text.clone(),
            name: self.name.clone(),
            street: self.street.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
        }
    }
}

/// Form payload; missing text fields are read as empty.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SiteInput {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
}

impl From<SiteInput> for Site {
    fn from(i: SiteInput) -> Self {
        Site {
            id: i.id,
            version: i.version,
            name: i.name,
            street: i.street,
            postal_code: i.postal_code,
            city: i.city,
            province: i.province,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub message: String,
    pub site: Site,
}

#[utoipa::path(get, path = "/sites", tag = "sites", params(ListQuery), responses((status = 200, description = "Page of sites", body = crate::openapi::SitePageDoc), (status = 400, description = "Bad sort specification")))]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Page<Site>>, JsonApiError> {
    let request = q.page_request()?;
    let filter = q.filter();
    let page = if filter.is_empty() {
        state.sites.list(&request).await?
    } else {
        state.sites.list_filtered(&request, &filter).await?
    };
    info!(count = page.content.len(), total = page.total_elements, page = page.number, "list sites");
    Ok(Json(page))
}

#[utoipa::path(get, path = "/sites/count", tag = "sites", responses((status = 200, description = "Number of stored sites", body = crate::openapi::CountDoc)))]
pub async fn count(State(state): State<ServerState>) -> Result<Json<Count>, JsonApiError> {
    let count = state.sites.count().await?;
    Ok(Json(Count { count }))
}

#[utoipa::path(get, path = "/sites/{id}/edit", tag = "sites", params(("id" = i32, Path, description = "Site ID")), responses((status = 200, description = "Site to edit", body = crate::openapi::SiteDoc), (status = 404, description = "Not Found")))]
pub async fn edit(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Site>, JsonApiError> {
    match state.sites.get(id).await? {
        Some(site) => Ok(Json(site)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(not_found_message(id)))),
    }
}

#[utoipa::path(post, path = "/sites", tag = "sites", request_body = crate::openapi::SiteInputDoc, responses((status = 200, description = "Saved", body = crate::openapi::SaveResponseDoc), (status = 400, description = "Validation Error"), (status = 409, description = "Conflict")))]
pub async fn save(State(state): State<ServerState>, Json(input): Json<SiteInput>) -> Result<Json<SaveResponse>, JsonApiError> {
    let site = state.sites.update(input.into()).await?;
    Ok(Json(SaveResponse { message: MSG_SAVED.to_string(), site }))
}

#[utoipa::path(put, path = "/sites/{id}", tag = "sites", params(("id" = i32, Path, description = "Site ID")), request_body = crate::openapi::SiteInputDoc, responses((status = 200, description = "Saved", body = crate::openapi::SaveResponseDoc), (status = 400, description = "Validation Error"), (status = 409, description = "Conflict")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<SiteInput>,
) -> Result<Json<SaveResponse>, JsonApiError> {
    let site = state.sites.update(Site { id: Some(id), ..Site::from(input) }).await?;
    Ok(Json(SaveResponse { message: MSG_SAVED.to_string(), site }))
}

#[utoipa::path(delete, path = "/sites/{id}", tag = "sites", params(("id" = i32, Path, description = "Site ID")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    if state.sites.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::not_found("site", id).into())
    }
}
