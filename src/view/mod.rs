pub mod filters;
pub mod pagination;

pub use filters::{FilterField, Filters};
pub use pagination::{PageMeta, PageNav, PageSize};

use crate::models::Record;

/// The page window currently on screen plus its pagination facts
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    pub items: Vec<&'a Record>,
    pub meta: PageMeta,
}

/// Filter `records`, then cut out page `page` of size `page_size`.
///
/// Pure and total: any page number is accepted, out-of-range pages simply
/// yield an empty window.
pub fn derive_view<'a>(
    records: &'a [Record],
    filters: &Filters,
    page: usize,
    page_size: PageSize,
) -> DerivedView<'a> {
    let subset: Vec<&Record> = records.iter().filter(|r| filters.matches(r)).collect();
    let meta = PageMeta::new(page, page_size, subset.len());
    let (start, end) = meta.window();

    DerivedView {
        items: subset[start..end].to_vec(),
        meta,
    }
}

/// Local, synchronous half of the viewer: filters, page cursor, selection.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    filters: Filters,
    main_query: String,
    page: usize,
    page_size: PageSize,
    selected: Option<Record>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn main_query(&self) -> &str {
        &self.main_query
    }

    pub fn derive<'a>(&self, records: &'a [Record]) -> DerivedView<'a> {
        derive_view(records, &self.filters, self.page(), self.page_size)
    }

    /// Change one filter; a changed value restarts at page 1
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        if self.filters.set(field, value) {
            self.reset_page();
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.set_filter(FilterField::Name, value);
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.set_filter(FilterField::Description, value);
    }

    pub fn set_price(&mut self, value: impl Into<String>) {
        self.set_filter(FilterField::Price, value);
    }

    pub fn set_country(&mut self, value: impl Into<String>) {
        self.set_filter(FilterField::Country, value);
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.set_filter(FilterField::City, value);
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.set_filter(FilterField::Address, value);
    }

    /// Edit the main query text; nothing is fetched until it is submitted
    pub fn set_main_query(&mut self, value: impl Into<String>) {
        self.main_query = value.into();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.reset_page();
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Move to `nav`'s target if it lies within `[1, total_pages]`.
    /// Returns whether the page changed.
    pub fn navigate(&mut self, nav: PageNav, total_pages: usize) -> bool {
        match nav.target(self.page(), total_pages) {
            Some(target) if (1..=total_pages).contains(&target) => {
                let changed = target != self.page();
                self.page = target;
                changed
            }
            _ => false,
        }
    }

    pub fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    pub fn detail_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn select(&mut self, record: &Record) {
        self.selected = Some(record.clone());
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }
}
