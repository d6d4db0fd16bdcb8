//! List state and its reducers.
//!
//! The state is mutated only by [`apply_success`](ListState::apply_success)
//! and [`apply_failure`](ListState::apply_failure), both synchronous, so
//! the reconciliation rules are testable without any channels or timers.

use crate::model::{Product, ProductPage};

/// Page size used for the initial load when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Transient state owned by the list controller.
///
/// `loading` is true strictly between request dispatch and the settlement
/// of the *newest* in-flight request; `search_term` is the last applied
/// (post-debounce) filter, empty meaning no filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub items: Vec<Product>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub loading: bool,
    pub search_term: String,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            loading: true,
            search_term: String::new(),
        }
    }
}

impl ListState {
    /// Applies a successful list response issued for `term`, replacing the
    /// items and pagination cursor wholesale.
    pub fn apply_success(&mut self, term: &str, page: ProductPage) {
        self.items = page.data;
        self.page = page.pagination.page.max(1);
        self.page_size = page.pagination.limit.max(1);
        self.total = page.pagination.total;
        self.search_term = term.to_string();
        self.loading = false;
    }

    /// Applies a failed load: last-known-good items and totals stay put so
    /// the view never flashes empty on a transient failure.
    pub fn apply_failure(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageInfo;

    fn page_of(titles: &[&str], page: u64, total: u64) -> ProductPage {
        ProductPage {
            data: titles
                .iter()
                .enumerate()
                .map(|(i, t)| Product::new(format!("product_{}", i), *t, 1.0))
                .collect(),
            pagination: PageInfo { page, limit: 10, total },
        }
    }

    #[test]
    fn defaults_match_the_mount_state() {
        let state = ListState::default();
        assert!(state.items.is_empty());
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.total, 0);
        assert!(state.loading);
        assert_eq!(state.search_term, "");
    }

    #[test]
    fn success_replaces_items_and_cursor() {
        let mut state = ListState::default();
        state.apply_success("jacket", page_of(&["Deck Jacket", "Rain Jacket"], 2, 12));

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.page, 2);
        assert_eq!(state.total, 12);
        assert_eq!(state.search_term, "jacket");
        assert!(!state.loading);
    }

    #[test]
    fn applying_the_same_response_twice_is_idempotent() {
        let mut first = ListState::default();
        first.apply_success("", page_of(&["A", "B"], 1, 2));
        let mut second = first.clone();
        second.apply_success("", page_of(&["A", "B"], 1, 2));

        assert_eq!(first, second);
    }

    #[test]
    fn failure_retains_last_known_good_data() {
        let mut state = ListState::default();
        state.apply_success("", page_of(&["A", "B"], 1, 2));
        let before = state.clone();

        state.loading = true;
        state.apply_failure();

        assert_eq!(state.items, before.items);
        assert_eq!(state.total, before.total);
        assert_eq!(state.search_term, before.search_term);
        assert!(!state.loading);
    }
}
