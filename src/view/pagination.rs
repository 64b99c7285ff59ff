use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows per page; only the sizes offered by the page-size picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Sixteen,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 5] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Sixteen,
        PageSize::TwentyFive,
        PageSize::Fifty,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Sixteen => 16,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("unsupported page size {value}, expected one of 5, 10, 16, 25, 50"))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Page movement requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
    To(usize),
}

impl PageNav {
    /// Page this movement aims at; `None` when it would go below zero
    pub fn target(self, current: usize, total_pages: usize) -> Option<usize> {
        match self {
            PageNav::First => Some(1),
            PageNav::Previous => current.checked_sub(1),
            PageNav::Next => current.checked_add(1),
            PageNav::Last => Some(total_pages),
            PageNav::To(page) => Some(page),
        }
    }
}

pub fn total_pages(total_items: usize, page_size: PageSize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// Pagination facts for one derived view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: usize,
    pub page_size: PageSize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl PageMeta {
    pub fn new(current_page: usize, page_size: PageSize, total_items: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size,
            total_pages: total_pages(total_items, page_size),
            total_items,
        }
    }

    /// Half-open index window `[start, end)` into the visible subset
    pub fn window(&self) -> (usize, usize) {
        let size = self.page_size.get();
        let start = (self.current_page - 1)
            .saturating_mul(size)
            .min(self.total_items);
        let end = self
            .current_page
            .saturating_mul(size)
            .min(self.total_items);
        (start, end)
    }

    /// 1-based inclusive item range shown, `None` when the page is empty
    pub fn shown_range(&self) -> Option<(usize, usize)> {
        let (start, end) = self.window();
        (start < end).then(|| (start + 1, end))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn accepts(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

impl fmt::Display for PageMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shown_range() {
            Some((first, last)) => write!(f, "{} - {} of {}", first, last, self.total_items),
            None => write!(f, "0 of {}", self.total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, PageSize::Five), 0);
        assert_eq!(total_pages(5, PageSize::Five), 1);
        assert_eq!(total_pages(12, PageSize::Five), 3);
        assert_eq!(total_pages(17, PageSize::Sixteen), 2);
        assert_eq!(total_pages(50, PageSize::Fifty), 1);
    }

    #[test]
    fn page_size_accepts_only_offered_values() {
        assert_eq!(PageSize::try_from(16), Ok(PageSize::Sixteen));
        assert!(PageSize::try_from(20).is_err());
        assert_eq!(PageSize::default().get(), 5);
    }

    #[test]
    fn window_is_clamped_to_subset() {
        let meta = PageMeta::new(3, PageSize::Five, 12);
        assert_eq!(meta.window(), (10, 12));
        assert_eq!(meta.shown_range(), Some((11, 12)));
        assert_eq!(meta.to_string(), "11 - 12 of 12");
    }

    #[test]
    fn empty_subset_keeps_page_one() {
        let meta = PageMeta::new(1, PageSize::Ten, 0);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.window(), (0, 0));
        assert_eq!(meta.to_string(), "0 of 0");
        assert!(!meta.accepts(1));
        assert!(!meta.has_next());
    }

    #[test]
    fn navigation_flags_follow_current_page() {
        let first = PageMeta::new(1, PageSize::Five, 12);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PageMeta::new(3, PageSize::Five, 12);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn nav_targets() {
        assert_eq!(PageNav::First.target(4, 9), Some(1));
        assert_eq!(PageNav::Previous.target(4, 9), Some(3));
        assert_eq!(PageNav::Previous.target(0, 9), None);
        assert_eq!(PageNav::Next.target(4, 9), Some(5));
        assert_eq!(PageNav::Last.target(4, 9), Some(9));
        assert_eq!(PageNav::To(7).target(4, 9), Some(7));
    }

    #[test]
    fn page_size_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PageSize::TwentyFive).unwrap(), "25");
        assert_eq!(serde_json::from_str::<PageSize>("10").unwrap(), PageSize::Ten);
        assert!(serde_json::from_str::<PageSize>("7").is_err());
    }
}
