//! Paged listings and the per-view load state machine

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PageSpec, Selector};

/// One page of a server-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Build a page from whatever totals the backend reported.
    ///
    /// - a reported page total of 0 is read as 1 (an empty first page)
    /// - both missing: one page holding the returned items
    /// - only the item total: pages derived from `page_size`
    /// - only the page total: count falls back to the returned items
    pub fn from_reported(
        items: Vec<T>,
        total_pages: Option<u32>,
        total_count: Option<u64>,
        page_size: NonZeroU32,
    ) -> Self {
        let returned = items.len() as u64;
        let (total_pages, total_count) = match (total_pages, total_count) {
            (Some(pages), Some(count)) => (pages.max(1), count),
            (Some(pages), None) => (pages.max(1), returned),
            (None, Some(count)) => (pages_for(count, page_size), count),
            (None, None) => (1, returned),
        };

        Self {
            items,
            total_pages,
            total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self, page: NonZeroU32) -> bool {
        page.get() < self.total_pages
    }
}

fn pages_for(count: u64, page_size: NonZeroU32) -> u32 {
    let pages = count.div_ceil(u64::from(page_size.get())).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Load state of a listing view. There is no terminal state: success and
/// error both go back to `Loading` on the next page change, category change
/// or retry.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T, E> {
    Idle,
    Loading,
    Success(Page<T>),
    Error(E),
}

impl<T, E> LoadState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            Self::Success(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Tag attached to an in-flight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    spec: PageSpec,
}

impl RequestTicket {
    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }
}

/// State owned by one paged listing view.
///
/// Every request is issued through a `RequestTicket`; only the ticket of
/// the most recently issued request may change the displayed state, so a
/// slow response for an old page can never overwrite a newer one.
#[derive(Debug)]
pub struct ListingView<T, E> {
    spec: PageSpec,
    generation: u64,
    state: LoadState<T, E>,
}

impl<T, E> ListingView<T, E> {
    pub fn new(spec: PageSpec) -> Self {
        Self {
            spec,
            generation: 0,
            state: LoadState::Idle,
        }
    }

    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    pub fn state(&self) -> &LoadState<T, E> {
        &self.state
    }

    pub fn into_state(self) -> LoadState<T, E> {
        self.state
    }

    /// Enter `Loading` for `spec` and return the ticket of the new request.
    pub fn begin(&mut self, spec: PageSpec) -> RequestTicket {
        self.generation += 1;
        self.spec = spec;
        self.state = LoadState::Loading;
        RequestTicket {
            generation: self.generation,
            spec: self.spec.clone(),
        }
    }

    pub fn go_to_page(&mut self, page: NonZeroU32) -> RequestTicket {
        let spec = self.spec.with_page(page);
        self.begin(spec)
    }

    pub fn select_category(&mut self, category: Selector<String>) -> RequestTicket {
        let spec = self.spec.with_category(category);
        self.begin(spec)
    }

    /// Re-issue the current spec unchanged
    pub fn retry(&mut self) -> RequestTicket {
        let spec = self.spec.clone();
        self.begin(spec)
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation && ticket.spec == self.spec
    }

    /// Apply a response. Returns `false` and leaves the state untouched when
    /// the ticket is stale.
    pub fn resolve(&mut self, ticket: &RequestTicket, result: Result<Page<T>, E>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale response for page {} (generation {}, current {})",
                ticket.spec.page, ticket.generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(page) => LoadState::Success(page),
            Err(err) => LoadState::Error(err),
        };
        true
    }
}

impl<T, E> Default for ListingView<T, E> {
    fn default() -> Self {
        Self::new(PageSpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn page_of(items: Vec<u32>) -> Page<u32> {
        let count = items.len() as u64;
        Page::from_reported(items, Some(3), Some(count), size(9))
    }

    #[test]
    fn test_from_reported_defaults() {
        let page = Page::from_reported(vec![1, 2, 3], None, None, size(9));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 3);

        let page = Page::from_reported(vec![1; 9], None, Some(20), size(9));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 20);

        let page = Page::from_reported(vec![1; 2], Some(4), None, size(9));
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_count, 2);

        let page: Page<u32> = Page::from_reported(Vec::new(), None, Some(0), size(9));
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());

        let page: Page<u32> = Page::from_reported(Vec::new(), Some(0), Some(0), size(9));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 0);
        assert!(!page.has_next(size(1)));
    }

    #[test]
    fn test_has_next() {
        let page = page_of(vec![1]);
        assert!(page.has_next(size(2)));
        assert!(!page.has_next(size(3)));
    }

    #[test]
    fn test_state_transitions() {
        let mut view: ListingView<u32, String> = ListingView::default();
        assert_eq!(view.state(), &LoadState::Idle);

        let ticket = view.begin(PageSpec::default());
        assert!(view.state().is_loading());

        assert!(view.resolve(&ticket, Err("offline".to_string())));
        assert_eq!(view.state().error(), Some(&"offline".to_string()));

        let ticket = view.retry();
        assert!(view.state().is_loading());
        assert!(view.resolve(&ticket, Ok(page_of(vec![7, 8]))));
        assert_eq!(view.state().page().unwrap().items, vec![7, 8]);

        let ticket = view.go_to_page(size(2));
        assert_eq!(view.spec().page.get(), 2);
        assert!(view.state().is_loading());
        assert!(view.resolve(&ticket, Ok(page_of(vec![9]))));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view: ListingView<u32, String> = ListingView::default();

        let first = view.begin(PageSpec::new(1, 9).unwrap());
        let second = view.go_to_page(size(2));

        assert!(view.resolve(&second, Ok(page_of(vec![2]))));
        assert!(!view.resolve(&first, Ok(page_of(vec![1]))));

        assert_eq!(view.spec().page.get(), 2);
        assert_eq!(view.state().page().unwrap().items, vec![2]);
    }

    #[test]
    fn test_reissued_same_spec_only_latest_applies() {
        let mut view: ListingView<u32, String> = ListingView::default();

        let old = view.begin(PageSpec::default());
        let new = view.retry();
        assert_eq!(old.spec(), new.spec());

        assert!(!view.resolve(&old, Ok(page_of(vec![1]))));
        assert!(view.state().is_loading());
        assert!(view.resolve(&new, Ok(page_of(vec![2]))));
    }

    #[test]
    fn test_category_change_resets_page() {
        let mut view: ListingView<u32, String> = ListingView::new(PageSpec::new(3, 9).unwrap());
        let old = view.retry();
        assert!(view.resolve(&old, Ok(page_of(vec![3]))));

        let pending = view.go_to_page(size(4));
        let ticket = view.select_category(Selector::Only("restauri".to_string()));
        assert!(view.state().is_loading());
        assert_eq!(view.spec().page.get(), 1);
        assert_eq!(
            view.spec().category,
            Selector::Only("restauri".to_string())
        );

        assert!(!view.resolve(&pending, Ok(page_of(vec![4]))));
        assert!(view.state().is_loading());
        assert!(view.resolve(&ticket, Ok(page_of(vec![1]))));
        assert_eq!(view.state().page().unwrap().items, vec![1]);
    }
}
