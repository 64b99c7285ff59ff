use crate::loader::{Committed, DataLoader, FetchOutcome, ListingSource, PendingFetch};
use crate::models::Record;
use crate::view::{DerivedView, FilterField, PageNav, PageSize, ViewState};
use tracing::debug;

/// One viewing session: the data loader plus the local view state, with
/// the rules that tie them together.
pub struct Viewer<S> {
    loader: DataLoader<S>,
    view: ViewState,
    activated: bool,
}

impl<S: ListingSource> Viewer<S> {
    pub fn new(source: S) -> Self {
        Self {
            loader: DataLoader::new(source),
            view: ViewState::new(),
            activated: false,
        }
    }

    pub fn loader(&self) -> &DataLoader<S> {
        &self.loader
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn records(&self) -> &[Record] {
        self.loader.data().unwrap_or_default()
    }

    /// Current page window over whatever has been loaded so far
    pub fn current_view(&self) -> DerivedView<'_> {
        self.view.derive(self.records())
    }

    /// Initial unfiltered load; later calls do nothing
    pub async fn activate(&mut self) -> Option<Committed> {
        if self.activated {
            return None;
        }
        self.activated = true;
        let pending = self.loader.begin(None);
        Some(self.apply(pending.run().await))
    }

    /// Issue a fetch for the main query without awaiting it; pass the
    /// outcome of `run()` to [`Viewer::apply`]
    #[must_use = "the loader stays in the loading state until the fetch is applied"]
    pub fn begin_query(&mut self) -> PendingFetch<S> {
        self.activated = true;
        self.view.reset_page();
        let query = self.view.main_query().to_string();
        debug!("Submitting main query {:?}", query);
        self.loader.begin(Some(&query))
    }

    /// Submit the main query and wait for the new record set
    pub async fn submit_query(&mut self) -> Committed {
        let pending = self.begin_query();
        self.apply(pending.run().await)
    }

    /// Fetch again with the current main query
    pub async fn reload(&mut self) -> Committed {
        self.submit_query().await
    }

    /// Commit a finished fetch; a new record set starts at page 1
    pub fn apply(&mut self, outcome: FetchOutcome) -> Committed {
        let committed = self.loader.commit(outcome);
        if committed == Committed::Loaded {
            self.view.reset_page();
        }
        committed
    }

    pub fn set_main_query(&mut self, value: impl Into<String>) {
        self.view.set_main_query(value);
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.view.set_filter(field, value);
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.view.set_page_size(page_size);
    }

    pub fn navigate(&mut self, nav: PageNav) -> bool {
        let total_pages = self.current_view().meta.total_pages;
        self.view.navigate(nav, total_pages)
    }

    pub fn first_page(&mut self) -> bool {
        self.navigate(PageNav::First)
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigate(PageNav::Previous)
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(PageNav::Next)
    }

    pub fn last_page(&mut self) -> bool {
        self.navigate(PageNav::Last)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.navigate(PageNav::To(page))
    }

    pub fn select(&mut self, record: &Record) {
        self.view.select(record);
    }

    /// Open the detail view for the loaded record with this id
    pub fn select_by_id(&mut self, raw_id: &str) -> bool {
        match self.loader.data().and_then(|d| d.iter().find(|r| r.id.matches_str(raw_id))) {
            Some(record) => {
                self.view.select(record);
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.view.deselect();
    }
}
