use serde::{Deserialize, Serialize};

/// Fallback page size when the client omits `per_page` or asks for zero.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Upper bound on `per_page`; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page-oriented query parameters (`?page=2&per_page=50`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default)]
    per_page: i64,
}

fn default_page() -> i64 {
    1
}

impl PageParams {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn per_page(&self) -> i64 {
        if self.per_page <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.per_page.min(MAX_PAGE_SIZE)
        }
    }

    /// LIMIT handed to the store; always in `[1, MAX_PAGE_SIZE]`.
    pub fn limit(&self) -> i64 {
        self.per_page()
    }

    /// OFFSET handed to the store; never negative. An offset past the end
    /// of the table is legal and yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// One page of an ordered result set. The item list and `total_count` are
/// independent reads and may disagree under concurrent writes.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub page: i64,
    pub per_page: i64,
    pub page_count: i64,
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(params: PageParams, total_count: i64, items: Vec<T>) -> Self {
        let per_page = params.per_page();
        Self {
            page: params.page(),
            per_page,
            page_count: (total_count + per_page - 1) / per_page,
            total_count,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_per_page_falls_back_to_default() {
        let params: PageParams = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert_eq!(params.per_page(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 2 * DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_per_page_falls_back_to_default() {
        let params = PageParams::new(1, 0);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn per_page_is_clamped_to_max() {
        let params = PageParams::new(1, 10_000);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn page_below_one_is_clamped() {
        let params = PageParams::new(-5, 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn offset_math() {
        let params = PageParams::new(4, 25);
        assert_eq!(params.offset(), 75);
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn page_count_rounds_up() {
        let page: Page<i64> = Page::new(PageParams::new(1, 10), 41, vec![]);
        assert_eq!(page.page_count, 5);

        let page: Page<i64> = Page::new(PageParams::new(1, 10), 40, vec![]);
        assert_eq!(page.page_count, 4);

        let page: Page<i64> = Page::new(PageParams::new(1, 10), 0, vec![]);
        assert_eq!(page.page_count, 0);
    }
}
