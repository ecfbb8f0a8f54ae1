//! Fixed-size pagination for feeds.
//!
//! Out-of-range page numbers never fail: they resolve to the last page, and
//! unparsable ones to the first.

use serde::Serialize;

/// Posts per feed page.
pub const PAGE_SIZE: u64 = 10;

/// A page number as requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRequest {
    #[default]
    First,
    Number(i64),
}

impl PageRequest {
    /// Parse the raw `page` query value. Missing or non-numeric means first page.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map_or(PageRequest::First, PageRequest::Number)
    }
}

/// Slice of a result set to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Resolves page requests against a known total count.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: u64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(per_page: u64) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// An empty result still has one (empty) page.
    pub fn num_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.per_page).max(1)
    }

    /// 1-based page number actually served for `request`.
    pub fn resolve(&self, request: PageRequest, count: u64) -> u64 {
        let last = self.num_pages(count);
        match request {
            PageRequest::First => 1,
            PageRequest::Number(n) if n >= 1 && (n as u64) <= last => n as u64,
            PageRequest::Number(_) => last,
        }
    }

    pub fn window(&self, number: u64) -> Window {
        Window {
            offset: (number - 1) * self.per_page,
            limit: self.per_page,
        }
    }

    pub fn page<T>(&self, items: Vec<T>, number: u64, count: u64) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(count),
            count,
            per_page: self.per_page,
        }
    }
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    /// Total number of items across all pages.
    pub count: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_request() {
        assert_eq!(PageRequest::parse(None), PageRequest::First);
        assert_eq!(PageRequest::parse(Some("abc")), PageRequest::First);
        assert_eq!(PageRequest::parse(Some("")), PageRequest::First);
        assert_eq!(PageRequest::parse(Some("3")), PageRequest::Number(3));
        assert_eq!(PageRequest::parse(Some("-2")), PageRequest::Number(-2));
    }

    #[test]
    fn test_out_of_range_resolves_to_last_page() {
        let paginator = Paginator::default();

        assert_eq!(paginator.num_pages(15), 2);
        assert_eq!(paginator.resolve(PageRequest::Number(99), 15), 2);
        assert_eq!(paginator.resolve(PageRequest::Number(0), 15), 2);
        assert_eq!(paginator.resolve(PageRequest::Number(-1), 15), 2);
        assert_eq!(paginator.resolve(PageRequest::Number(1), 15), 1);
        assert_eq!(paginator.resolve(PageRequest::First, 15), 1);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let paginator = Paginator::default();

        assert_eq!(paginator.num_pages(0), 1);
        assert_eq!(paginator.resolve(PageRequest::Number(7), 0), 1);

        let page = paginator.page(Vec::<u8>::new(), 1, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_window_and_navigation() {
        let paginator = Paginator::default();

        assert_eq!(paginator.window(2), Window { offset: 10, limit: 10 });

        let page = paginator.page(vec![1, 2, 3], 2, 23);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.next_page_number(), Some(3));
        assert_eq!(page.previous_page_number(), Some(1));
        assert_eq!(page.map(|n| n * 10).items, vec![10, 20, 30]);
    }
}
