use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CountDoc { pub count: u64 }

#[derive(ToSchema)]
pub struct SiteDoc {
    pub id: Option<i32>,
    pub version: Option<i32>,
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub province: String,
}

/// Omit `id` to create; send the `version` last read to update.
#[derive(ToSchema)]
pub struct SiteInputDoc {
    pub id: Option<i32>,
    pub version: Option<i32>,
    pub name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
}

#[derive(ToSchema)]
pub struct SaveResponseDoc { pub message: String, pub site: SiteDoc }

#[derive(ToSchema)]
pub struct SitePageDoc {
    pub content: Vec<SiteDoc>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sites::list,
        crate::routes::sites::count,
        crate::routes::sites::edit,
        crate::routes::sites::save,
        crate::routes::sites::update,
        crate::routes::sites::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CountDoc,
            SiteDoc,
            SiteInputDoc,
            SaveResponseDoc,
            SitePageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "sites")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_site_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/sites"));
        assert!(doc.paths.paths.contains_key("/sites/{id}/edit"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
