use std::time::Duration;

use restomod_core::{BlogPost, Brand, CatalogItem, JobPosting, Page, PageSpec, ServicePackage};
use restomod_forms::{LeadForm, LeadKind};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::normalize;
use crate::{FetchCause, ListingFetchError, Result, SubmitError};

/// Paths of the lead submission endpoints, relative to the API base URL.
/// `{id}` in the job application path is replaced with the job identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub contact: String,
    pub newsletter: String,
    pub custom_request: String,
    pub job_application: String,
    pub test_drive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            contact: "/contatti".to_string(),
            newsletter: "/newsletter".to_string(),
            custom_request: "/richieste-personalizzate".to_string(),
            job_application: "/jobs/{id}/candidature".to_string(),
            test_drive: "/test-drive".to_string(),
        }
    }
}

impl Endpoints {
    pub fn path_for(&self, kind: LeadKind, param: Option<&str>) -> String {
        let template = match kind {
            LeadKind::Contact => &self.contact,
            LeadKind::Newsletter => &self.newsletter,
            LeadKind::CustomRequest => &self.custom_request,
            LeadKind::JobApplication => &self.job_application,
            LeadKind::TestDrive => &self.test_drive,
        };
        match param {
            Some(value) => template.replace("{id}", value),
            None => template.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub endpoints: Endpoints,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("restomod/{}", env!("CARGO_PKG_VERSION")),
            endpoints: Endpoints::default(),
        }
    }
}

/// HTTP client for the restomod backend.
///
/// Every method issues exactly one request. There is no caching: callers
/// decide when to fetch again.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(options: ClientOptions) -> std::result::Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            endpoints: options.endpoints,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the body as JSON. Non-2xx is an error.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ListingFetchError::new(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingFetchError::new(
                &url,
                FetchCause::Status(status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ListingFetchError::new(&url, e))?;

        serde_json::from_str(&body).map_err(|e| ListingFetchError::new(&url, e))
    }

    async fn get_listing<T>(
        &self,
        path: &str,
        decode: fn(Value) -> std::result::Result<Vec<T>, FetchCause>,
    ) -> Result<Vec<T>> {
        let body = self.get_json(path, &[]).await?;
        let items = decode(body).map_err(|cause| ListingFetchError::new(self.url(path), cause))?;
        info!("Fetched {} records from {}", items.len(), path);
        Ok(items)
    }

    /// Full restomod catalog, normalized
    pub async fn fetch_restomods(&self) -> Result<Vec<CatalogItem>> {
        self.get_listing("/restomods", normalize::restomods).await
    }

    pub async fn fetch_brands(&self) -> Result<Vec<Brand>> {
        self.get_listing("/brands", normalize::brands).await
    }

    pub async fn fetch_jobs(&self) -> Result<Vec<JobPosting>> {
        self.get_listing("/jobs", normalize::jobs).await
    }

    pub async fn fetch_packages(&self) -> Result<Vec<ServicePackage>> {
        self.get_listing("/packages", normalize::packages).await
    }

    /// One page of the blog listing. `spec.page` is passed through verbatim;
    /// a page past the end yields whatever the backend returns.
    pub async fn fetch_blog_page(&self, spec: &PageSpec) -> Result<Page<BlogPost>> {
        let mut query = vec![
            ("page", spec.page.to_string()),
            ("limit", spec.page_size.to_string()),
        ];
        if let Some(category) = spec.category.as_only() {
            query.push(("categoria", category.clone()));
        }

        let body = self.get_json("/blog", &query).await?;
        let page = normalize::blog_page(body)
            .map_err(|cause| ListingFetchError::new(self.url("/blog"), cause))?;

        info!(
            "Fetched blog page {} ({} posts)",
            spec.page,
            page.posts.len()
        );

        Ok(Page::from_reported(
            page.posts,
            page.total_pages,
            page.total_posts,
            spec.page_size,
        ))
    }

    /// Validate `form` and POST it. Nothing is sent if validation fails.
    pub async fn submit<F: LeadForm>(&self, form: &F) -> std::result::Result<(), SubmitError> {
        form.validate()?;

        let path = self.endpoints.path_for(form.kind(), form.path_param());
        self.post_json(&path, form).await?;

        info!("Submitted {} lead", form.kind());
        Ok(())
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<(), SubmitError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| SubmitError::Transport {
                url: url.clone(),
                cause: e.into(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Transport {
                url,
                cause: FetchCause::Status(status.as_u16()),
            });
        }

        Ok(())
    }
}
