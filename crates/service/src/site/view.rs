//! List/detail view model for the sites screen.
//!
//! A grid of sites sits next to an edit form. Selecting a row navigates to
//! `sites/{id}/edit`, entering that route loads the record into the form, and
//! saving writes the form back through [`SiteService`]. Rendering is left to
//! whoever drives the view model; it only keeps state and queues notices.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use models::errors::ModelError;
use models::site::Site;

use super::filter::SiteFilter;
use super::repository::SiteRepository;
use super::service::SiteService;
use super::sort::resolve;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest, SortOrder};

pub const SITES_ROUTE: &str = "sites";

pub const MSG_SAVED: &str = "Data updated";
pub const MSG_CONFLICT: &str =
    "Error updating the data. Somebody else has updated the record while you were making changes.";
pub const MSG_INVALID: &str = "Failed to update the data. Check again that all values are valid";

pub const DEFAULT_NOTICE_MS: u64 = 5000;
pub const NOT_FOUND_NOTICE_MS: u64 = 3000;

pub fn not_found_message(id: i32) -> String {
    format!("The requested site was not found, ID = {id}")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),
    #[error("invalid site id: {0}")]
    InvalidId(String),
}

/// `sites` or `sites/{id}/edit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    Edit(i32),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => f.write_str(SITES_ROUTE),
            Route::Edit(id) => write!(f, "{SITES_ROUTE}/{id}/edit"),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    /// The trailing `edit` action is optional, as is a leading slash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim_matches('/').split('/').collect();
        match parts.as_slice() {
            [SITES_ROUTE] => Ok(Route::List),
            [SITES_ROUTE, id] | [SITES_ROUTE, id, "edit"] => id
                .parse::<i32>()
                .map(Route::Edit)
                .map_err(|_| RouteError::InvalidId((*id).to_string())),
            _ => Err(RouteError::Unknown(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorState {
    NoSelection,
    EditingExisting(i32),
    EditingNew,
}

/// Form fields, bound one-to-one to [`Site`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteForm {
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub province: String,
}

impl SiteForm {
    /// Field values of `site`, or an empty form.
    pub fn read(site: Option<&Site>) -> Self {
        match site {
            Some(s) => Self {
                name: s.name.clone(),
                street: s.street.clone(),
                postal_code: s.postal_code.clone(),
                city: s.city.clone(),
                province: s.province.clone(),
            },
            None => Self::default(),
        }
    }

    /// Validate the form values and copy them into `site`. On error `site` is
    /// left untouched.
    pub fn write_into(&self, site: &mut Site) -> Result<(), ModelError> {
        let candidate = Site {
            name: self.name.clone(),
            street: self.street.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
            ..site.clone()
        };
        models::site::validate(&candidate)?;
        *site = candidate;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticePosition {
    #[default]
    BottomStart,
    Middle,
}

/// Transient message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub position: NoticePosition,
    pub duration_ms: u64,
}

impl Notice {
    pub fn info(message: &str) -> Self {
        Self {
            message: message.to_string(),
            level: NoticeLevel::Info,
            position: NoticePosition::default(),
            duration_ms: DEFAULT_NOTICE_MS,
        }
    }

    pub fn not_found(id: i32) -> Self {
        Self { duration_ms: NOT_FOUND_NOTICE_MS, ..Self::info(&not_found_message(id)) }
    }

    pub fn conflict() -> Self {
        Self {
            level: NoticeLevel::Error,
            position: NoticePosition::Middle,
            ..Self::info(MSG_CONFLICT)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Site),
    /// Nothing persisted; carries the validation message.
    Invalid(String),
    /// Nothing persisted; the form keeps the user's edits.
    Conflict,
}

pub struct SiteView<R: SiteRepository> {
    service: Arc<SiteService<R>>,
    route: Route,
    bound: Option<Site>,
    creating: bool,
    form: SiteForm,
    request: PageRequest,
    filter: Option<SiteFilter>,
    rows: Page<Site>,
    selected: Option<i32>,
    notices: Vec<Notice>,
}

impl<R: SiteRepository> SiteView<R> {
    pub fn new(service: Arc<SiteService<R>>) -> Self {
        let request = PageRequest::default();
        Self {
            service,
            route: Route::List,
            bound: None,
            creating: false,
            form: SiteForm::default(),
            rows: Page::empty(&request),
            request,
            filter: None,
            selected: None,
            notices: Vec::new(),
        }
    }

    /// Load the grid and enter `route`.
    pub async fn open(&mut self, route: Route) -> Result<(), ServiceError> {
        self.reload().await?;
        self.navigate(route).await
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn form(&self) -> &SiteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SiteForm {
        &mut self.form
    }

    pub fn bound(&self) -> Option<&Site> {
        self.bound.as_ref()
    }

    pub fn rows(&self) -> &Page<Site> {
        &self.rows
    }

    pub fn selected(&self) -> Option<i32> {
        self.selected
    }

    pub fn page_request(&self) -> &PageRequest {
        &self.request
    }

    pub fn filter(&self) -> Option<&SiteFilter> {
        self.filter.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn state(&self) -> EditorState {
        if let Some(id) = self.bound.as_ref().and_then(|s| s.id) {
            return EditorState::EditingExisting(id);
        }
        if self.creating || !self.form.is_empty() {
            EditorState::EditingNew
        } else {
            EditorState::NoSelection
        }
    }

    /// Grid selection change. `None` deselects and returns to the list.
    pub async fn select(&mut self, id: Option<i32>) -> Result<(), ServiceError> {
        match id {
            Some(id) => {
                self.selected = Some(id);
                self.navigate(Route::Edit(id)).await
            }
            None => {
                self.selected = None;
                self.clear_form();
                self.navigate(Route::List).await
            }
        }
    }

    pub async fn navigate(&mut self, route: Route) -> Result<(), ServiceError> {
        debug!(%route, "navigate");
        self.route = route;
        self.before_enter().await
    }

    async fn before_enter(&mut self) -> Result<(), ServiceError> {
        let Route::Edit(id) = self.route else { return Ok(()) };
        match self.service.get(id).await? {
            Some(site) => {
                self.selected = Some(id);
                self.populate_form(Some(site));
            }
            None => {
                self.notify(Notice::not_found(id));
                self.route = Route::List;
                // the row may have been deleted by someone else
                self.refresh_grid().await?;
            }
        }
        Ok(())
    }

    /// Start a new entry: empty, unbound form pending creation.
    pub fn new_entry(&mut self) {
        self.selected = None;
        self.clear_form();
        self.creating = true;
        self.route = Route::List;
    }

    pub async fn save(&mut self) -> Result<SaveOutcome, ServiceError> {
        let mut site = self.bound.clone().unwrap_or_default();
        if let Err(e) = self.form.write_into(&mut site) {
            return Ok(self.reject_invalid(e.to_string()));
        }
        match self.service.update(site).await {
            Ok(saved) => {
                self.clear_form();
                self.notify(Notice::info(MSG_SAVED));
                self.route = Route::List;
                // the row is already stored; a failed refresh must not turn the save into an error
                if let Err(e) = self.refresh_grid().await {
                    warn!(error = %e, site_id = ?saved.id, "grid refresh after save failed");
                }
                Ok(SaveOutcome::Saved(saved))
            }
            Err(ServiceError::ConcurrencyConflict { id }) => {
                warn!(site_id = id, "save rejected, record changed concurrently");
                self.notify(Notice::conflict());
                Ok(SaveOutcome::Conflict)
            }
            Err(ServiceError::Validation(msg)) => Ok(self.reject_invalid(msg)),
            Err(e) => Err(e),
        }
    }

    pub async fn cancel(&mut self) -> Result<(), ServiceError> {
        self.clear_form();
        self.refresh_grid().await
    }

    /// Deselect and reload the grid. Dropping a selection clears the form.
    pub async fn refresh_grid(&mut self) -> Result<(), ServiceError> {
        if self.selected.take().is_some() {
            self.clear_form();
        }
        self.reload().await
    }

    pub async fn set_page(&mut self, page: u64) -> Result<(), ServiceError> {
        let request = PageRequest { page, ..self.request.clone() };
        self.apply(request, self.filter.clone()).await
    }

    pub async fn set_page_size(&mut self, size: u64) -> Result<(), ServiceError> {
        let request = PageRequest { page: 0, size, ..self.request.clone() };
        self.apply(request, self.filter.clone()).await
    }

    /// Unknown sort properties are rejected and the current order is kept.
    pub async fn set_sort(&mut self, sort: Vec<SortOrder>) -> Result<(), ServiceError> {
        resolve(&sort)?;
        let request = self.request.clone().with_sort(sort);
        self.apply(request, self.filter.clone()).await
    }

    pub async fn set_filter(&mut self, filter: Option<SiteFilter>) -> Result<(), ServiceError> {
        let request = PageRequest { page: 0, ..self.request.clone() };
        self.apply(request, filter.filter(|f| !f.is_empty())).await
    }

    /// Fetch rows for `request`/`filter` and adopt them only when the fetch succeeds.
    async fn apply(&mut self, request: PageRequest, filter: Option<SiteFilter>) -> Result<(), ServiceError> {
        let rows = self.fetch(&request, filter.as_ref()).await?;
        self.request = request;
        self.filter = filter;
        self.rows = rows;
        Ok(())
    }

    async fn reload(&mut self) -> Result<(), ServiceError> {
        self.rows = self.fetch(&self.request, self.filter.as_ref()).await?;
        Ok(())
    }

    async fn fetch(&self, request: &PageRequest, filter: Option<&SiteFilter>) -> Result<Page<Site>, ServiceError> {
        match filter {
            Some(f) => self.service.list_filtered(request, f).await,
            None => self.service.list(request).await,
        }
    }

    fn reject_invalid(&mut self, msg: String) -> SaveOutcome {
        debug!(error = %msg, "form rejected");
        self.notify(Notice::info(MSG_INVALID));
        SaveOutcome::Invalid(msg)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn clear_form(&mut self) {
        self.populate_form(None);
    }

    fn populate_form(&mut self, site: Option<Site>) {
        self.form = SiteForm::read(site.as_ref());
        self.bound = site;
        self.creating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::repository::mock::MockSiteRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn hq() -> Site { Site::new("HQ", "Main 1", "00100", "Rome", "RM") }

    async fn view_with(sites: Vec<Site>) -> (Arc<MockSiteRepository>, SiteView<MockSiteRepository>) {
        let repo = Arc::new(MockSiteRepository::with_sites(sites));
        let mut view = SiteView::new(Arc::new(SiteService::new(repo.clone())));
        view.open(Route::List).await.unwrap();
        (repo, view)
    }

    fn fill(form: &mut SiteForm, site: &Site) {
        *form = SiteForm::read(Some(site));
    }

    /// In-memory repository whose list queries can be switched off.
    struct FlakyRepo {
        inner: MockSiteRepository,
        fail_list: AtomicBool,
    }

    impl FlakyRepo {
        fn break_listing(&self) {
            self.fail_list.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SiteRepository for FlakyRepo {
        async fn find_by_id(&self, id: i32) -> Result<Option<Site>, ServiceError> {
            self.inner.find_by_id(id).await
        }

        async fn save(&self, site: Site) -> Result<Site, ServiceError> {
            self.inner.save(site).await
        }

        async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
            self.inner.delete_by_id(id).await
        }

        async fn find_all(&self, filter: Option<&SiteFilter>, request: &PageRequest) -> Result<Page<Site>, ServiceError> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("list unavailable".into()));
            }
            self.inner.find_all(filter, request).await
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            self.inner.count().await
        }
    }

    async fn flaky_view_with(sites: Vec<Site>) -> (Arc<FlakyRepo>, SiteView<FlakyRepo>) {
        let repo = Arc::new(FlakyRepo {
            inner: MockSiteRepository::with_sites(sites),
            fail_list: AtomicBool::new(false),
        });
        let mut view = SiteView::new(Arc::new(SiteService::new(repo.clone())));
        view.open(Route::List).await.unwrap();
        (repo, view)
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::Edit(12).to_string(), "sites/12/edit");
        assert_eq!("sites".parse::<Route>().unwrap(), Route::List);
        assert_eq!("/sites/12/edit".parse::<Route>().unwrap(), Route::Edit(12));
        assert_eq!("sites/12".parse::<Route>().unwrap(), Route::Edit(12));
        assert_eq!("sites/abc/edit".parse::<Route>(), Err(RouteError::InvalidId("abc".into())));
        assert!(matches!("people".parse::<Route>(), Err(RouteError::Unknown(_))));
    }

    #[test]
    fn form_write_rejects_without_touching_site() {
        let mut site = hq();
        let form = SiteForm { province: "X".repeat(65), ..SiteForm::read(Some(&site)) };
        assert!(form.write_into(&mut site).is_err());
        assert_eq!(site.province, "RM");
    }

    #[tokio::test]
    async fn open_loads_grid_with_no_selection() {
        let (_, view) = view_with(vec![hq()]).await;
        assert_eq!(view.state(), EditorState::NoSelection);
        assert_eq!(view.rows().total_elements, 1);
        assert!(view.form().is_empty());
    }

    #[tokio::test]
    async fn selecting_row_populates_form() {
        let (_, mut view) = view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        assert_eq!(view.route(), Route::Edit(1));
        assert_eq!(view.state(), EditorState::EditingExisting(1));
        assert_eq!(view.form().name, "HQ");
        assert_eq!(view.bound().and_then(|s| s.version), Some(0));
    }

    #[tokio::test]
    async fn deselecting_clears_form() {
        let (_, mut view) = view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        view.form_mut().city = "Milan".into();
        view.select(None).await.unwrap();
        assert_eq!(view.route(), Route::List);
        assert_eq!(view.state(), EditorState::NoSelection);
        assert!(view.form().is_empty());
        assert!(view.bound().is_none());
    }

    #[tokio::test]
    async fn missing_record_redirects_to_list() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.navigate(Route::Edit(42)).await.unwrap();
        assert_eq!(view.route(), Route::List);
        assert_eq!(view.state(), EditorState::NoSelection);
        let notices = view.take_notices();
        assert_eq!(notices, vec![Notice::not_found(42)]);
        assert_eq!(notices[0].message, "The requested site was not found, ID = 42");
        assert_eq!(notices[0].duration_ms, 3000);
        assert_eq!(view.rows().total_elements, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn row_deleted_elsewhere_is_not_found() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        repo.delete_by_id(1).await.unwrap();
        view.select(Some(1)).await.unwrap();
        assert_eq!(view.route(), Route::List);
        assert_eq!(view.selected(), None);
        assert_eq!(view.rows().total_elements, 0);
        assert_eq!(view.take_notices()[0].message, not_found_message(1));
    }

    #[tokio::test]
    async fn save_new_entry_creates_record() {
        let (repo, mut view) = view_with(vec![]).await;
        view.new_entry();
        assert_eq!(view.state(), EditorState::EditingNew);
        fill(view.form_mut(), &hq());

        let SaveOutcome::Saved(saved) = view.save().await.unwrap() else { panic!("expected a saved site") };
        assert!(saved.id.is_some());
        assert_eq!(saved.version, Some(0));

        assert_eq!(view.state(), EditorState::NoSelection);
        assert_eq!(view.route(), Route::List);
        assert!(view.rows().content.iter().any(|s| s.id == saved.id));
        assert_eq!(view.take_notices(), vec![Notice::info(MSG_SAVED)]);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn typing_without_selection_saves_new_record() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.form_mut().name = "Depot".into();
        assert_eq!(view.state(), EditorState::EditingNew);
        assert!(matches!(view.save().await.unwrap(), SaveOutcome::Saved(_)));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn save_existing_bumps_version() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        view.form_mut().street = "Main 2".into();
        assert!(matches!(view.save().await.unwrap(), SaveOutcome::Saved(_)));
        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.street, "Main 2");
        assert_eq!(stored.version, Some(1));
        assert_eq!(view.selected(), None);
    }

    #[tokio::test]
    async fn conflict_keeps_edits() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();

        // another user saves first
        let mut other = repo.find_by_id(1).await.unwrap().unwrap();
        other.name = "Head Office".into();
        repo.save(other).await.unwrap();

        view.form_mut().name = "Mine".into();
        assert_eq!(view.save().await.unwrap(), SaveOutcome::Conflict);
        assert_eq!(view.form().name, "Mine");
        assert_eq!(view.state(), EditorState::EditingExisting(1));
        assert_eq!(view.route(), Route::Edit(1));

        let notice = &view.take_notices()[0];
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.position, NoticePosition::Middle);
        assert_eq!(notice.message, MSG_CONFLICT);

        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Head Office");
    }

    #[tokio::test]
    async fn invalid_values_are_not_persisted() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        view.form_mut().postal_code = "0".repeat(40);
        let outcome = view.save().await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Invalid(ref m) if m.contains("postal_code")));
        assert_eq!(view.take_notices(), vec![Notice::info(MSG_INVALID)]);
        assert_eq!(view.form().postal_code.len(), 40);
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().version, Some(0));
    }

    #[tokio::test]
    async fn cancel_always_clears() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        view.form_mut().name = "Changed".into();
        view.cancel().await.unwrap();
        assert_eq!(view.state(), EditorState::NoSelection);
        assert!(view.form().is_empty());
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().name, "HQ");

        view.new_entry();
        view.form_mut().name = "Draft".into();
        view.cancel().await.unwrap();
        assert_eq!(view.state(), EditorState::NoSelection);

        view.cancel().await.unwrap();
        assert_eq!(view.state(), EditorState::NoSelection);
    }

    #[tokio::test]
    async fn grid_paging_sort_and_filter() {
        let sites = ["Delta", "Alpha", "Charlie", "Bravo"]
            .into_iter()
            .map(|n| Site::new(n, "", "", if n < "C" { "Rome" } else { "Genoa" }, ""))
            .collect();
        let (_, mut view) = view_with(sites).await;

        view.set_page_size(3).await.unwrap();
        view.set_sort(vec![SortOrder::asc("name")]).await.unwrap();
        let names: Vec<_> = view.rows().content.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, ["Alpha", "Bravo", "Charlie"]);

        view.set_page(1).await.unwrap();
        assert_eq!(view.rows().content.len(), 1);
        assert_eq!(view.rows().content[0].name, "Delta");

        view.set_filter(Some(SiteFilter { city: Some("Rome".into()), ..SiteFilter::default() })).await.unwrap();
        assert_eq!(view.page_request().page, 0);
        assert_eq!(view.rows().total_elements, 2);

        view.set_filter(Some(SiteFilter::default())).await.unwrap();
        assert!(view.filter().is_none());
        assert_eq!(view.rows().total_elements, 4);
    }

    #[tokio::test]
    async fn rejected_sort_keeps_grid_usable() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.set_sort(vec![SortOrder::asc("name")]).await.unwrap();

        let err = view.set_sort(vec![SortOrder::asc("colour")]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(view.page_request().sort, vec![SortOrder::asc("name")]);

        view.new_entry();
        view.form_mut().name = "Depot".into();
        assert!(matches!(view.save().await.unwrap(), SaveOutcome::Saved(_)));
        assert_eq!(view.take_notices(), vec![Notice::info(MSG_SAVED)]);
        assert_eq!(view.rows().total_elements, 2);
        assert_eq!(repo.count().await.unwrap(), 2);

        view.cancel().await.unwrap();
        assert_eq!(view.state(), EditorState::NoSelection);
    }

    #[tokio::test]
    async fn failed_page_change_keeps_previous_request() {
        let (repo, mut view) = flaky_view_with(vec![hq(), hq(), hq()]).await;
        view.set_page_size(2).await.unwrap();
        repo.break_listing();

        assert!(view.set_page(1).await.is_err());
        assert!(view.set_filter(Some(SiteFilter::text("Rome"))).await.is_err());
        assert_eq!(view.page_request().page, 0);
        assert_eq!(view.page_request().size, 2);
        assert!(view.filter().is_none());
        assert_eq!(view.rows().content.len(), 2);
    }

    #[tokio::test]
    async fn save_reports_success_when_grid_refresh_fails() {
        let (repo, mut view) = flaky_view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        view.form_mut().street = "Main 2".into();
        repo.break_listing();

        assert!(matches!(view.save().await.unwrap(), SaveOutcome::Saved(_)));
        assert_eq!(view.take_notices(), vec![Notice::info(MSG_SAVED)]);
        assert_eq!(view.state(), EditorState::NoSelection);
        assert_eq!(view.route(), Route::List);
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().street, "Main 2");
    }

    #[tokio::test]
    async fn cancel_clears_form_even_if_refresh_fails() {
        let (repo, mut view) = flaky_view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        view.form_mut().name = "Changed".into();
        repo.break_listing();

        assert!(view.cancel().await.is_err());
        assert_eq!(view.state(), EditorState::NoSelection);
        assert!(view.form().is_empty());
        assert!(view.bound().is_none());
    }

    #[tokio::test]
    async fn missing_record_leaves_edit_route_when_refresh_fails() {
        let (repo, mut view) = flaky_view_with(vec![hq()]).await;
        repo.break_listing();

        assert!(view.navigate(Route::Edit(42)).await.is_err());
        assert_eq!(view.route(), Route::List);
        assert_eq!(view.take_notices(), vec![Notice::not_found(42)]);
        assert_eq!(view.state(), EditorState::NoSelection);
    }

    #[tokio::test]
    async fn bound_record_without_version_conflicts() {
        let (repo, mut view) = view_with(vec![hq()]).await;
        view.select(Some(1)).await.unwrap();
        if let Some(bound) = view.bound.as_mut() {
            bound.version = None;
        }
        view.form_mut().name = "Mine".into();

        assert_eq!(view.save().await.unwrap(), SaveOutcome::Conflict);
        assert_eq!(view.take_notices(), vec![Notice::conflict()]);
        assert_eq!(view.form().name, "Mine");
        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "HQ");
        assert_eq!(stored.version, Some(0));
    }
}
