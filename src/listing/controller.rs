//! The list controller.
//!
//! A pure state machine owning criteria, page, sort and the displayed result.
//! It never performs I/O: operations that need data return a
//! [`FetchRequest`] which the owner runs (see [`crate::listing::fetch`]) and
//! hands back through [`ListController::on_loaded`]. Every request carries a
//! sequence number and only the latest one issued may update the result.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::entity::Entity;
use crate::listing::criteria::{FilterCriteria, ValidationError};
use crate::listing::fetch::{Fetched, ListQuery};
use crate::listing::page::{PageRequest, PageSize, PaginationStrategy, ResultPage};
use crate::listing::sort::{SortSpec, sort_by_spec, sort_newest_first};
use crate::search::Matcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// A fetch the owner must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: ListQuery,
}

/// Result of handing a fetch outcome back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Superseded by a later request and dropped.
    Stale,
    Loaded,
    /// The page was replaced with an empty one. Carries the message to show.
    Failed(String),
    /// The current page no longer exists; a fetch of the new last page.
    Refetch(FetchRequest),
}

pub struct ListController<E: Entity> {
    criteria: FilterCriteria,
    page: PageRequest,
    result: ResultPage<E>,
    /// Filtered and sorted full set, present when paginating locally.
    local: Option<Vec<E>>,
    sort: Option<SortSpec>,
    state: LoadState,
    latest_seq: u64,
    today: fn() -> NaiveDate,
    matcher: Matcher,
}

impl<E: Entity> ListController<E> {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            criteria: FilterCriteria::new(),
            page: PageRequest::first(page_size),
            result: ResultPage::empty(),
            local: None,
            sort: None,
            state: LoadState::Idle,
            latest_seq: 0,
            today: || Local::now().date_naive(),
            matcher: Matcher::new(),
        }
    }

    /// Replace the source of "today" used by date validation.
    #[must_use]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub const fn page(&self) -> PageRequest {
        self.page
    }

    pub const fn result(&self) -> &ResultPage<E> {
        &self.result
    }

    pub const fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub const fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Initial fetch of page one with empty criteria.
    pub fn load(&mut self) -> FetchRequest {
        self.page.number = 1;
        self.issue()
    }

    /// Validate `criteria`, then fetch page one under them.
    ///
    /// Invalid criteria leave the controller untouched and issue nothing.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> Result<FetchRequest, ValidationError> {
        criteria.validate(E::filter_fields(), (self.today)())?;
        self.criteria = criteria;
        self.page.number = 1;
        Ok(self.issue())
    }

    /// Clear every filter and fetch page one, keeping the page size.
    pub fn reset_filters(&mut self) -> FetchRequest {
        self.criteria.clear();
        self.page.number = 1;
        self.issue()
    }

    /// Move to `number`. Out of range or current pages are ignored.
    ///
    /// Locally paginated sets are re-sliced without a request.
    pub fn change_page(&mut self, number: usize) -> Option<FetchRequest> {
        if number == 0 || number > self.result.total_pages || number == self.page.number {
            return None;
        }
        self.page.number = number;
        if self.local.is_some() {
            self.slice_local();
            return None;
        }
        Some(self.issue())
    }

    /// Switch page size and go back to page one.
    pub fn change_page_size(&mut self, size: PageSize) -> Option<FetchRequest> {
        self.page = PageRequest::first(size);
        if self.local.is_some() {
            self.slice_local();
            return None;
        }
        Some(self.issue())
    }

    /// Refetch the current page under the current criteria.
    pub fn refresh(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Sort by `field`, flipping direction when it is already the sort column.
    ///
    /// Server pages only reorder the materialised items. Locally paginated
    /// sets are sorted whole and re-sliced.
    pub fn sort_by(&mut self, field: &'static str) {
        let spec = SortSpec::clicked(self.sort, field);
        self.sort = Some(spec);

        if let Some(mut all) = self.local.take() {
            sort_by_spec(&mut all, spec, |e: &E, key| e.field(key));
            self.local = Some(all);
            self.slice_local();
        } else {
            let mut items = std::mem::take(&mut self.result.items);
            sort_by_spec(&mut items, spec, |e: &E, key| e.field(key));
            self.result = ResultPage {
                items,
                total_count: self.result.total_count,
                total_pages: self.result.total_pages,
            };
        }
    }

    /// Apply the outcome of request `seq`.
    pub fn on_loaded(&mut self, seq: u64, outcome: Result<Fetched<E>, ApiError>) -> LoadOutcome {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, resource = E::RESOURCE, "discarding stale response");
            return LoadOutcome::Stale;
        }

        match outcome {
            Err(err) => {
                warn!(seq, resource = E::RESOURCE, %err, "fetch failed");
                self.result = ResultPage::empty();
                self.page.number = self.page.number.min(self.result.total_pages);
                self.local = None;
                self.state = LoadState::Failed;
                LoadOutcome::Failed(err.to_string())
            }
            Ok(Fetched::Page(page)) => {
                if page.is_empty() && self.page.number > page.total_pages {
                    self.page.number = page.total_pages;
                    info!(page = self.page.number, resource = E::RESOURCE, "page emptied, moving to last page");
                    return LoadOutcome::Refetch(self.issue());
                }
                let mut items = page.items;
                self.order(&mut items);
                self.result = ResultPage { items, ..page };
                self.local = None;
                self.state = LoadState::Loaded;
                LoadOutcome::Loaded
            }
            Ok(Fetched::All(items)) => {
                let mut all = if E::STRATEGY == PaginationStrategy::FetchAllLocal {
                    let fields = E::filter_fields();
                    items
                        .into_iter()
                        .filter(|e| self.criteria.matches(fields, &self.matcher, |key| e.field(key)))
                        .collect()
                } else {
                    items
                };
                self.order(&mut all);
                self.local = Some(all);
                self.slice_local();
                self.state = LoadState::Loaded;
                LoadOutcome::Loaded
            }
        }
    }

    fn order(&self, items: &mut [E]) {
        sort_newest_first(items, E::created_at);
        if let Some(spec) = self.sort {
            sort_by_spec(items, spec, |e: &E, key| e.field(key));
        }
    }

    /// Cut the current page out of the local set, clamping the page number.
    fn slice_local(&mut self) {
        let Some(all) = &self.local else {
            return;
        };
        let mut result = ResultPage::from_slice(all, self.page);
        if self.page.number > result.total_pages {
            self.page.number = result.total_pages;
            result = ResultPage::from_slice(all, self.page);
        }
        self.result = result;
    }

    fn issue(&mut self) -> FetchRequest {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        debug!(seq = self.latest_seq, page = self.page.number, resource = E::RESOURCE, "issuing fetch");
        FetchRequest {
            seq: self.latest_seq,
            query: ListQuery {
                criteria: self.criteria.clone(),
                page: self.page,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::entity::{Faq, User};
    use crate::listing::fetch::fetch;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn users(n: usize) -> Vec<User> {
        (0..n)
            .map(|i| {
                serde_json::from_value(json!({
                    "_id": format!("u{i}"),
                    "name": format!("User {i:03}"),
                    "status": "Y",
                    "createdAt": Utc.timestamp_opt(1_700_000_000 + i64::try_from(i).unwrap(), 0).unwrap().to_rfc3339(),
                }))
                .unwrap()
            })
            .collect()
    }

    fn page_of(n: usize, total: usize, size: usize) -> Result<Fetched<User>, ApiError> {
        Ok(Fetched::Page(ResultPage::from_server(
            users(n),
            total,
            PageSize::try_from(size).unwrap(),
        )))
    }

    fn controller() -> ListController<User> {
        ListController::new(PageSize::DEFAULT).with_clock(today)
    }

    fn loaded(total: usize) -> ListController<User> {
        let mut c = controller();
        let req = c.load();
        c.on_loaded(req.seq, page_of(10, total, 10));
        c
    }

    #[test]
    fn test_load_moves_through_loading_to_loaded() {
        let mut c = controller();
        assert_eq!(c.state(), LoadState::Idle);
        let req = c.load();
        assert!(c.is_loading());
        assert_eq!(c.on_loaded(req.seq, page_of(10, 40, 10)), LoadOutcome::Loaded);
        assert_eq!(c.state(), LoadState::Loaded);
        assert_eq!(c.result().total_pages, 4);
    }

    #[test]
    fn test_items_are_newest_first() {
        let c = loaded(10);
        let ids: Vec<_> = c.result().items.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"u9"));
        assert_eq!(ids.last(), Some(&"u0"));
    }

    #[test]
    fn test_change_page_is_idempotent() {
        let mut c = loaded(40);
        assert!(c.change_page(3).is_some());
        assert!(c.change_page(3).is_none());
        assert_eq!(c.page().number, 3);
    }

    #[test]
    fn test_change_page_out_of_range_is_ignored() {
        let mut c = loaded(40);
        assert!(c.change_page(0).is_none());
        assert!(c.change_page(5).is_none());
        assert_eq!(c.page().number, 1);
    }

    #[test]
    fn test_change_page_size_resets_to_first_page() {
        let mut c = loaded(40);
        let req = c.change_page(2).unwrap();
        c.on_loaded(req.seq, page_of(10, 40, 10));
        let req = c.change_page_size(PageSize::try_from(25).unwrap()).unwrap();
        assert_eq!(req.query.page.number, 1);
        assert_eq!(req.query.page.size.get(), 25);
    }

    #[test]
    fn test_reset_always_lands_on_page_one_with_empty_criteria() {
        let mut c = loaded(40);
        c.apply_filters(FilterCriteria::new().with("status", "N")).unwrap();
        c.change_page(3);
        let req = c.reset_filters();
        assert_eq!(c.page().number, 1);
        assert!(c.criteria().is_empty());
        assert!(req.query.criteria.is_empty());
        assert_eq!(req.query.page.size, PageSize::DEFAULT);
    }

    #[test]
    fn test_apply_filters_resets_page() {
        let mut c = loaded(40);
        let req = c.change_page(4).unwrap();
        c.on_loaded(req.seq, page_of(10, 40, 10));
        let req = c.apply_filters(FilterCriteria::new().with("role", "admin")).unwrap();
        assert_eq!(req.query.page.number, 1);
        assert_eq!(req.query.criteria.get("role"), Some("admin"));
    }

    #[test]
    fn test_stale_response_never_overwrites() {
        let mut c = controller();
        let first = c.load();
        let second = c.change_page_size(PageSize::try_from(25).unwrap()).unwrap();

        assert_eq!(c.on_loaded(second.seq, page_of(25, 62, 25)), LoadOutcome::Loaded);
        assert_eq!(c.on_loaded(first.seq, page_of(3, 3, 10)), LoadOutcome::Stale);

        assert_eq!(c.result().items.len(), 25);
        assert_eq!(c.result().total_count, 62);
    }

    #[test]
    fn test_failure_yields_empty_page_and_is_not_sticky() {
        let mut c = loaded(40);
        let req = c.refresh();
        let outcome = c.on_loaded(req.seq, Err(ApiError::Timeout));
        assert_eq!(outcome, LoadOutcome::Failed("The server did not respond in time".to_string()));
        assert_eq!(c.state(), LoadState::Failed);
        assert!(c.result().is_empty());
        assert_eq!(c.result().total_count, 0);

        let req = c.refresh();
        assert!(c.is_loading());
        assert_eq!(c.on_loaded(req.seq, page_of(10, 40, 10)), LoadOutcome::Loaded);
    }

    #[test]
    fn test_failure_on_later_page_clamps_page_number() {
        let mut c = loaded(40);
        let req = c.change_page(3).unwrap();
        c.on_loaded(req.seq, Err(ApiError::Timeout));
        assert_eq!(c.page().number, 1);
        assert!(c.page().number <= c.result().total_pages);

        let req = c.refresh();
        assert_eq!(req.query.page.number, 1);
        c.on_loaded(req.seq, page_of(10, 40, 10));
        let req = c.change_page(2).unwrap();
        assert_eq!(req.query.page.number, 2);
    }

    #[test]
    fn test_emptied_last_page_clamps_and_refetches() {
        let mut c = loaded(21);
        let req = c.change_page(3).unwrap();
        c.on_loaded(req.seq, page_of(1, 21, 10));

        // The only row on page three was deleted.
        let req = c.refresh();
        let outcome = c.on_loaded(req.seq, page_of(0, 20, 10));

        let LoadOutcome::Refetch(next) = outcome else {
            panic!("expected a refetch, got {outcome:?}");
        };
        assert_eq!(next.query.page.number, 2);
        assert_eq!(c.page().number, 2);
        assert!(c.is_loading());
    }

    #[test]
    fn test_sort_toggles_on_materialised_items() {
        let mut c = loaded(10);
        c.sort_by("name");
        assert_eq!(c.result().items[0].id, "u0");
        c.sort_by("name");
        assert_eq!(c.result().items[0].id, "u9");
        assert_eq!(c.result().total_count, 10);
    }

    #[test]
    fn test_future_from_date_is_rejected() {
        let mut c: ListController<Faq> = ListController::new(PageSize::DEFAULT).with_clock(today);
        let before = c.state();
        let err = c
            .apply_filters(FilterCriteria::new().with("fromDate", "2026-10-17"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::FutureDate { .. }));
        assert_eq!(c.state(), before);
        assert!(c.criteria().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_filters_never_reach_the_backend() {
        let backend = FakeBackend::new();
        let mut c: ListController<Faq> = ListController::new(PageSize::DEFAULT).with_clock(today);

        let attempts = [
            FilterCriteria::new().with("fromDate", "2030-01-01"),
            FilterCriteria::new()
                .with("fromDate", "2026-10-10")
                .with("toDate", "2026-10-01"),
        ];
        for criteria in attempts {
            if let Ok(req) = c.apply_filters(criteria) {
                let _ = fetch::<Faq>(&backend, &req.query, 100).await;
            }
        }

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_active_filter_with_page_size_25() {
        let records: Vec<_> = (0..25)
            .map(|i| json!({"_id": format!("u{i}"), "name": format!("Active {i}"), "status": "Y"}))
            .collect();
        let backend = FakeBackend::new().with_list("user", records, Some(62));
        let mut c = controller();

        c.apply_filters(FilterCriteria::new().with("status", "Y")).unwrap();
        let req = c.change_page_size(PageSize::try_from(25).unwrap()).unwrap();
        let fetched = fetch::<User>(&backend, &req.query, 100).await;
        assert_eq!(c.on_loaded(req.seq, fetched), LoadOutcome::Loaded);

        assert_eq!(c.result().total_pages, 3);
        assert_eq!(c.result().items.len(), 25);
        assert_eq!(c.result().total_count, 62);
        let sent = &backend.list_calls("user")[0];
        assert!(sent.contains(&("status".to_string(), "Y".to_string())));
        assert!(sent.contains(&("limit".to_string(), "25".to_string())));
    }

    #[tokio::test]
    async fn test_local_strategy_filters_and_pages_in_memory() {
        let faqs: Vec<_> = (0..23)
            .map(|i| {
                json!({
                    "_id": format!("f{i}"),
                    "question": if i % 2 == 0 { format!("How do fees work {i}?") } else { format!("Holiday {i}") },
                    "status": "Y",
                })
            })
            .collect();
        let backend = FakeBackend::new().with_list("faq", faqs, None);
        let mut c: ListController<Faq> = ListController::new(PageSize::DEFAULT).with_clock(today);

        let req = c.apply_filters(FilterCriteria::new().with("question", "fees")).unwrap();
        let fetched = fetch::<Faq>(&backend, &req.query, 100).await;
        c.on_loaded(req.seq, fetched);

        assert_eq!(c.result().total_count, 12);
        assert_eq!(c.result().total_pages, 2);
        assert!(c.change_page(2).is_none());
        assert_eq!(c.result().items.len(), 2);
        assert!(c.change_page_size(PageSize::try_from(25).unwrap()).is_none());
        assert_eq!(c.result().items.len(), 12);
        assert_eq!(backend.list_calls("faq").len(), 1);
    }

    #[test]
    fn test_items_never_exceed_page_size() {
        let mut c = controller();
        let req = c.load();
        c.on_loaded(req.seq, Ok(Fetched::Page(ResultPage::from_server(users(30), 30, PageSize::DEFAULT))));
        assert!(c.result().items.len() <= PageSize::DEFAULT.get());
        assert!(c.page().number <= c.result().total_pages);
    }
}
