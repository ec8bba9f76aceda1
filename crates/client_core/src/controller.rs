//! Generic remote list view controller: debounced search, sort, filter and
//! pagination state driving a paged REST endpoint, with a cancellation guard
//! so a superseded response can never overwrite a newer one.

use std::time::Instant;

use shared::{
    domain::{FilterParam, SortParam},
    protocol::{PageEnvelope, PageMeta},
};
use tracing::debug;

use crate::{
    debounce::Debouncer,
    error::ClientError,
    paged::{ListQuery, PageFetcher},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Handle for one fetch. Only the most recently issued ticket may update the
/// controller; anything older is discarded on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket<S, F> {
    pub token: u64,
    pub query: ListQuery<S, F>,
    /// Append the page to the current items instead of replacing them
    /// (typeahead "load more" variant).
    pub append: bool,
}

pub struct ListController<T, S, F> {
    query: ListQuery<S, F>,
    search_input: Debouncer<String>,
    phase: LoadPhase,
    items: Vec<T>,
    meta: Option<PageMeta>,
    error: Option<String>,
    fallback_message: String,
    next_token: u64,
    inflight: Option<u64>,
    append_next: bool,
}

impl<T, S: SortParam, F: FilterParam> ListController<T, S, F> {
    /// `fallback_message` is shown when a fetch fails without a
    /// server-provided message, e.g. "Gagal memuat katalog paket.".
    pub fn new(fallback_message: impl Into<String>) -> Self {
        Self {
            query: ListQuery::default(),
            search_input: Debouncer::new(String::new()),
            phase: LoadPhase::Idle,
            items: Vec::new(),
            meta: None,
            error: None,
            fallback_message: fallback_message.into(),
            next_token: 0,
            inflight: None,
            append_next: false,
        }
    }

    pub fn query(&self) -> &ListQuery<S, F> {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Last displayable failure. Cleared by the next successful load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_input(&self) -> &str {
        self.search_input.raw()
    }

    /// Starts a load for the current query. Exactly one fetch runs per
    /// `Loading` transition; issuing a new ticket supersedes the previous
    /// one.
    pub fn begin_load(&mut self) -> FetchTicket<S, F> {
        self.next_token += 1;
        let token = self.next_token;
        self.inflight = Some(token);
        self.phase = LoadPhase::Loading;
        FetchTicket {
            token,
            query: self.query.clone(),
            append: std::mem::take(&mut self.append_next),
        }
    }

    /// Feeds a fetch result back. Returns `true` when the result was applied,
    /// `false` when it belonged to a superseded ticket and was discarded.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket<S, F>,
        outcome: Result<PageEnvelope<T>, ClientError>,
    ) -> bool {
        if self.inflight != Some(ticket.token) {
            debug!(token = ticket.token, "discarding stale list response");
            return false;
        }
        match outcome {
            Ok(envelope) => {
                self.inflight = None;
                if ticket.append {
                    self.items.extend(envelope.data);
                } else {
                    self.items = envelope.data;
                }
                self.meta = Some(envelope.meta);
                self.error = None;
                self.phase = LoadPhase::Loaded;
                true
            }
            Err(err) if err.is_cancelled() => {
                // Cooperative abort resolved before the replacement ticket
                // was applied; the newer fetch owns the state now.
                false
            }
            Err(err) => {
                self.inflight = None;
                self.phase = LoadPhase::Errored;
                // Previous items and meta stay visible.
                self.error = Some(err.human_message(&self.fallback_message));
                true
            }
        }
    }

    /// Raw search text, updated on every keystroke.
    pub fn set_search_input(&mut self, value: impl Into<String>, now: Instant) {
        self.search_input.set(value.into(), now);
    }

    /// Advances the debounce clock. Returns `true` when the committed search
    /// changed; the caller must then `begin_load`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(committed) if committed != self.query.search => {
                self.query.search = committed;
                self.query.page = 1;
                true
            }
            _ => false,
        }
    }

    pub fn set_sort(&mut self, sort: S) -> bool {
        if self.query.sort == sort {
            return false;
        }
        self.query.sort = sort;
        self.query.page = 1;
        true
    }

    pub fn set_limit(&mut self, limit: u32) -> bool {
        if limit == 0 || self.query.limit == limit {
            return false;
        }
        self.query.limit = limit;
        self.query.page = 1;
        true
    }

    pub fn set_status_filter(&mut self, status: Option<F>) -> bool {
        if self.query.status == status {
            return false;
        }
        self.query.status = status;
        self.query.page = 1;
        true
    }

    /// No-op (no request, no state change) when there is no next page.
    pub fn next(&mut self) -> bool {
        if self.meta.is_some_and(|meta| meta.has_next) {
            self.query.page += 1;
            true
        } else {
            false
        }
    }

    /// No-op when already on the first page.
    pub fn prev(&mut self) -> bool {
        if self.meta.is_some_and(|meta| meta.has_prev) {
            self.query.page = self.query.page.saturating_sub(1).max(1);
            true
        } else {
            false
        }
    }

    /// Typeahead variant: fetch the next page and append it to the current
    /// items. `None` when there is no next page.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket<S, F>> {
        if !self.meta.is_some_and(|meta| meta.has_next) {
            return None;
        }
        self.query.page += 1;
        self.append_next = true;
        Some(self.begin_load())
    }

    /// Back to defaults, e.g. on tab switch. In-flight responses become
    /// stale; the token counter keeps counting.
    pub fn reset(&mut self) {
        self.query = ListQuery::default();
        self.search_input = Debouncer::new(String::new());
        self.phase = LoadPhase::Idle;
        self.items.clear();
        self.meta = None;
        self.error = None;
        self.inflight = None;
        self.append_next = false;
    }

    /// Convenience driver: begin, fetch, apply. Used by tests; the GUI
    /// splits the three steps across its worker bridge.
    pub async fn load_with<Ftr>(&mut self, fetcher: &Ftr) -> bool
    where
        Ftr: PageFetcher<T, S, F> + ?Sized,
    {
        let ticket = self.begin_load();
        let outcome = fetcher.fetch_page(&ticket.query).await;
        self.apply(&ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{OrderStatus, PackageSort};
    use std::time::Duration;

    type Controller = ListController<&'static str, PackageSort, OrderStatus>;

    fn envelope(
        items: Vec<&'static str>,
        page: u32,
        limit: u32,
        total: u64,
    ) -> PageEnvelope<&'static str> {
        let page_count = (total as u32).div_ceil(limit);
        PageEnvelope {
            status: "success".to_string(),
            meta: PageMeta {
                page,
                limit,
                total,
                page_count,
                has_next: page < page_count,
                has_prev: page > 1,
            },
            data: items,
        }
    }

    #[test]
    fn query_changes_reset_page_to_one() {
        let mut controller = Controller::new("gagal");
        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["a"; 10], 1, 10, 23)));
        assert!(controller.next());
        assert_eq!(controller.query().page, 2);

        assert!(controller.set_sort(PackageSort::Cheapest));
        assert_eq!(controller.query().page, 1);

        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["a"; 10], 1, 10, 23)));
        assert!(controller.next());
        assert!(controller.set_limit(20));
        assert_eq!(controller.query().page, 1);

        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["a"; 20], 1, 20, 23)));
        assert!(controller.next());
        assert!(controller.set_status_filter(Some(OrderStatus::Approved)));
        assert_eq!(controller.query().page, 1);
    }

    #[test]
    fn committed_search_resets_page() {
        let start = Instant::now();
        let mut controller = Controller::new("gagal");
        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["a"; 10], 1, 10, 23)));
        controller.next();
        assert_eq!(controller.query().page, 2);

        controller.set_search_input("silver", start);
        assert!(!controller.tick(start + Duration::from_millis(100)));
        assert!(controller.tick(start + Duration::from_millis(400)));
        assert_eq!(controller.query().search, "silver");
        assert_eq!(controller.query().page, 1);
    }

    #[test]
    fn slow_first_response_cannot_overwrite_newer_one() {
        let mut controller = Controller::new("gagal");

        let ticket_a = controller.begin_load();
        controller.set_sort(PackageSort::MostExpensive);
        let ticket_b = controller.begin_load();

        // B resolves first, then A arrives late.
        assert!(controller.apply(&ticket_b, Ok(envelope(vec!["b"], 1, 10, 1))));
        assert!(!controller.apply(&ticket_a, Ok(envelope(vec!["a"], 1, 10, 1))));

        assert_eq!(controller.items(), ["b"]);
        assert_eq!(controller.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn stale_failure_is_discarded_too() {
        let mut controller = Controller::new("gagal");
        let ticket_a = controller.begin_load();
        let ticket_b = controller.begin_load();

        assert!(controller.apply(&ticket_b, Ok(envelope(vec!["b"], 1, 10, 1))));
        assert!(!controller.apply(
            &ticket_a,
            Err(ClientError::Network("timed out".to_string()))
        ));
        assert!(controller.error().is_none());
    }

    #[test]
    fn cancelled_outcome_never_surfaces() {
        let mut controller = Controller::new("gagal");
        let ticket = controller.begin_load();
        assert!(!controller.apply(&ticket, Err(ClientError::Cancelled)));
        assert!(controller.error().is_none());
    }

    #[test]
    fn pagination_is_guarded_by_meta() {
        let mut controller = Controller::new("gagal");
        // No meta yet: both directions are no-ops.
        assert!(!controller.next());
        assert!(!controller.prev());
        assert_eq!(controller.query().page, 1);

        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["a"; 10], 1, 10, 23)));
        assert!(!controller.prev());
        assert!(controller.next());
        assert_eq!(controller.query().page, 2);

        let ticket = controller.begin_load();
        assert_eq!(ticket.query.page, 2);
        controller.apply(&ticket, Ok(envelope(vec!["a"; 10], 2, 10, 23)));
        assert!(controller.meta().is_some_and(|meta| meta.has_prev));

        // Last page: next is a no-op.
        controller.next();
        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["a"; 3], 3, 10, 23)));
        assert!(!controller.next());
        assert_eq!(controller.query().page, 3);
    }

    #[test]
    fn failure_keeps_previous_items_and_surfaces_message() {
        let mut controller = Controller::new("Gagal memuat katalog paket.");
        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["silver", "gold"], 1, 10, 2)));

        let ticket = controller.begin_load();
        controller.apply(
            &ticket,
            Err(ClientError::Server {
                status: 500,
                message: String::new(),
            }),
        );

        assert_eq!(controller.phase(), LoadPhase::Errored);
        assert_eq!(controller.items(), ["silver", "gold"]);
        assert_eq!(controller.error(), Some("Gagal memuat katalog paket."));

        // Retry recovers.
        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["silver"], 1, 10, 1)));
        assert_eq!(controller.phase(), LoadPhase::Loaded);
        assert!(controller.error().is_none());
    }

    #[test]
    fn load_more_appends_instead_of_replacing() {
        let mut controller = Controller::new("gagal");
        let ticket = controller.begin_load();
        controller.apply(&ticket, Ok(envelope(vec!["a", "b"], 1, 2, 5)));

        let ticket = controller.begin_load_more().expect("has next page");
        assert!(ticket.append);
        assert_eq!(ticket.query.page, 2);
        controller.apply(&ticket, Ok(envelope(vec!["c", "d"], 2, 2, 5)));
        assert_eq!(controller.items(), ["a", "b", "c", "d"]);

        // Regular reload goes back to replacing.
        let ticket = controller.begin_load();
        assert!(!ticket.append);
    }

    #[test]
    fn reset_clears_results_and_invalidates_inflight() {
        let mut controller = Controller::new("gagal");
        let ticket = controller.begin_load();
        controller.reset();
        assert!(!controller.apply(&ticket, Ok(envelope(vec!["late"], 1, 10, 1))));
        assert_eq!(controller.phase(), LoadPhase::Idle);
        assert!(controller.items().is_empty());
    }
}
