use serde::{Deserialize, Serialize};

/// Pagination of a list view. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u32,
    /// Total count of rows on all pages, as reported by the backend.
    pub total: u64,
}

impl PageInfo {
    pub fn new(page: u64, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
            total: 0,
        }
    }

    /// At least 1, even when there are no rows.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }

        let limit = u64::from(self.limit);
        let pages = self.total / limit + u64::from(self.total % limit != 0);

        pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// The following page, bounded by [`PageInfo::total_pages`].
    pub fn next_page(&self) -> u64 {
        self.page.saturating_add(1).min(self.total_pages())
    }

    /// The preceding page, bounded by the first one.
    pub fn previous_page(&self) -> u64 {
        self.page.saturating_sub(1).max(1)
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// Query of the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u64,
    pub limit: u32,
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn total_pages() {
        let cases = [
            (0, 20, 1),
            (1, 20, 1),
            (20, 20, 1),
            (21, 20, 2),
            (95, 10, 10),
            (7, 0, 1),
            (u64::MAX, 20, u64::MAX / 20 + 1),
            (u64::MAX, 1, u64::MAX),
        ];

        for (total, limit, expected) in cases {
            let info = PageInfo {
                page: 1,
                limit,
                total,
            };

            assert_eq!(expected, info.total_pages(), "total: {total}, limit: {limit}");
        }
    }

    #[test]
    fn next_and_previous_are_bounded() {
        let first = PageInfo {
            page: 1,
            limit: 20,
            total: 45,
        };
        assert_eq!(2, first.next_page());
        assert_eq!(1, first.previous_page());
        assert!(!first.has_previous());

        let last = PageInfo { page: 3, ..first };
        assert_eq!(3, last.next_page());
        assert_eq!(2, last.previous_page());
        assert!(!last.has_next());
    }

    #[test]
    fn huge_totals_do_not_overflow() {
        let info = PageInfo {
            page: u64::MAX,
            limit: 1,
            total: u64::MAX,
        };

        assert_eq!(u64::MAX, info.next_page());
        assert!(!info.has_next());
        assert_eq!(u64::MAX - 1, info.previous_page());
    }

    #[test]
    fn page_zero_is_the_first_page() {
        assert_eq!(1, PageInfo::new(0, 20).page);
    }
}
