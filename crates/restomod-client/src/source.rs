//! Server-side pagination adapter

use std::num::NonZeroU32;

use async_trait::async_trait;
use restomod_core::{BlogPost, ListingView, Page, PageSpec, RequestTicket, Selector};
use tokio::sync::{Mutex, MutexGuard};

use crate::{ApiClient, ListingFetchError, Result};

/// A backend listing that is paginated on the server
#[async_trait]
pub trait ListingSource: Send + Sync {
    type Item: Send;

    /// Issue exactly one request for `spec`. No caching, no clamping.
    async fn fetch_page(&self, spec: &PageSpec) -> Result<Page<Self::Item>>;
}

/// The blog listing (`GET /blog`)
#[derive(Debug, Clone)]
pub struct BlogSource {
    client: ApiClient,
}

impl BlogSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingSource for BlogSource {
    type Item = BlogPost;

    async fn fetch_page(&self, spec: &PageSpec) -> Result<Page<BlogPost>> {
        self.client.fetch_blog_page(spec).await
    }
}

/// A paged listing view bound to its source.
///
/// Navigation methods can be awaited concurrently; each request is tagged
/// when issued and only the most recent one is allowed to update the view.
/// They return whether the response was applied.
pub struct PagedListing<S: ListingSource> {
    source: S,
    view: Mutex<ListingView<S::Item, ListingFetchError>>,
}

impl<S: ListingSource> PagedListing<S> {
    pub fn new(source: S, spec: PageSpec) -> Self {
        Self {
            source,
            view: Mutex::new(ListingView::new(spec)),
        }
    }

    /// Load (or reload) the current spec. Also serves as the retry action.
    pub async fn load(&self) -> bool {
        let ticket = self.view.lock().await.retry();
        self.run(ticket).await
    }

    pub async fn go_to_page(&self, page: NonZeroU32) -> bool {
        let ticket = self.view.lock().await.go_to_page(page);
        self.run(ticket).await
    }

    pub async fn select_category(&self, category: Selector<String>) -> bool {
        let ticket = self.view.lock().await.select_category(category);
        self.run(ticket).await
    }

    /// Current view state. Do not hold the guard across an await on this
    /// listing.
    pub async fn view(&self) -> MutexGuard<'_, ListingView<S::Item, ListingFetchError>> {
        self.view.lock().await
    }

    pub fn into_view(self) -> ListingView<S::Item, ListingFetchError> {
        self.view.into_inner()
    }

    async fn run(&self, ticket: RequestTicket) -> bool {
        let result = self.source.fetch_page(ticket.spec()).await;
        self.view.lock().await.resolve(&ticket, result)
    }
}
