//! Page navigation for rendering a [`PageResult`] to a client.

use serde::Serialize;

use crate::query::PageResult;

/// Builds the list of page links around `current_page`, `None` marking a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One listing page with one-based page numbers and navigation links.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_count: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, total_count: u64) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_count,
        }
    }
}

impl<T> From<PageResult<T>> for Paginated<T> {
    fn from(result: PageResult<T>) -> Self {
        let current_page = usize::try_from(result.page.page_index() + 1).unwrap_or(usize::MAX);
        let total_pages = usize::try_from(result.total_pages()).unwrap_or(usize::MAX);

        Self::new(result.items, current_page, total_pages, result.total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PageRequest;

    #[test]
    fn no_pages_for_an_empty_listing() {
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn short_listings_have_no_gaps() {
        assert_eq!(
            get_pages(5, 3, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
    }

    #[test]
    fn long_listings_collapse_into_gaps() {
        assert_eq!(
            get_pages(20, 10, 2, 2, 4, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn page_result_converts_to_one_based_pages() {
        let page = PageRequest::new(4, 2, 100).unwrap();
        let result = PageResult::new(vec!["e"], 5, page);

        let paginated = Paginated::from(result);

        assert_eq!(paginated.page, 3);
        assert_eq!(paginated.total_count, 5);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(paginated.items, vec!["e"]);
    }
}
