use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use restomod_client::{
    ApiClient, BlogSource, ClientOptions, FetchCause, PagedListing, SubmitError,
};
use restomod_core::{FilterSpec, ItemStatus, PageSpec, Selector, filter};
use restomod_forms::{ContactForm, JobApplication, NewsletterSignup};
use serde_json::{Value, json};

type Received = Arc<Mutex<Vec<(String, Value)>>>;

const TOTAL_POSTS: usize = 20;

async fn restomods() -> Json<Value> {
    Json(json!([
        {
            "_id": "r1",
            "nome": "Giulia",
            "costruttore": { "nome": "Alfa Romeo" },
            "prezzo": 80000,
            "stato": "available",
            "immagini": [{ "url": "/img/giulia.jpg" }]
        },
        {
            "_id": "r2",
            "nome": "208",
            "costruttore": { "nome": "Ferrari" },
            "prezzo": 250000,
            "stato": "sold"
        },
        {
            "_id": "r3",
            "nome": "Fulvia Coupé",
            "costruttore": "Lancia",
            "stato": "disponibile"
        }
    ]))
}

async fn blog(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(9);
    let category = params.get("categoria").cloned();

    let all: Vec<Value> = (1..=TOTAL_POSTS)
        .map(|n| {
            let categoria = if n % 2 == 0 { "restauri" } else { "eventi" };
            json!({
                "_id": format!("p{}", n),
                "titolo": format!("Post {}", n),
                "categoria": categoria,
            })
        })
        .filter(|post| match &category {
            Some(c) => post["categoria"] == c.as_str(),
            None => true,
        })
        .collect();

    let total = all.len();
    let posts: Vec<Value> = all
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    Json(json!({
        "posts": posts,
        "totalPages": total.div_ceil(limit),
        "totalPosts": total,
    }))
}

async fn brands() -> Json<Value> {
    Json(json!([{ "_id": "b1", "nome": "Lancia", "nazione": "Italia" }]))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn garbled() -> &'static str {
    "<html>not json</html>"
}

async fn record_lead(
    State(received): State<Received>,
    Path(path): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    received.lock().unwrap().push((path, body));
    StatusCode::CREATED
}

async fn record_application(
    State(received): State<Received>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    received
        .lock()
        .unwrap()
        .push((format!("jobs/{}/candidature", id), body));
    StatusCode::CREATED
}

/// Start a mock backend and return its API base URL
async fn spawn_backend() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/api/restomods", get(restomods))
        .route("/api/blog", get(blog))
        .route("/api/brands", get(brands))
        .route("/api/jobs", get(broken))
        .route("/api/packages", get(garbled))
        .route("/api/jobs/:id/candidature", post(record_application))
        .route("/api/:form", post(record_lead))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), received)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(ClientOptions::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_fetch_and_filter_catalog() {
    let (base_url, _) = spawn_backend().await;
    let items = client(&base_url).fetch_restomods().await.unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[2].brand_name.as_deref(), Some("Lancia"));
    assert_eq!(items[2].price, None);

    let spec = FilterSpec::for_items(&items).with_status(Selector::Only(ItemStatus::Available));
    let visible = filter(&items, &spec);
    let names: Vec<&str> = visible.iter().map(|item| item.name.as_str()).collect();
    // Fulvia is available but has no price
    assert_eq!(names, vec!["Giulia"]);

    let spec = FilterSpec::for_items(&items).with_search("fer");
    let visible = filter(&items, &spec);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "208");
}

#[tokio::test]
async fn test_blog_second_page() {
    let (base_url, _) = spawn_backend().await;
    let spec = PageSpec::new(2, 9).unwrap();

    let page = client(&base_url).fetch_blog_page(&spec).await.unwrap();
    assert_eq!(page.items.len(), 9);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_count, 20);
    assert_eq!(page.items[0].title, "Post 10");
}

#[tokio::test]
async fn test_blog_last_and_past_last_page() {
    let (base_url, _) = spawn_backend().await;
    let api = client(&base_url);

    let last = api
        .fetch_blog_page(&PageSpec::new(3, 9).unwrap())
        .await
        .unwrap();
    assert_eq!(last.items.len(), 2);

    let past = api
        .fetch_blog_page(&PageSpec::new(7, 9).unwrap())
        .await
        .unwrap();
    assert!(past.is_empty());
    assert_eq!(past.total_pages, 3);
}

#[tokio::test]
async fn test_blog_category_is_sent() {
    let (base_url, _) = spawn_backend().await;
    let spec = PageSpec::default().with_category(Selector::Only("restauri".to_string()));

    let page = client(&base_url).fetch_blog_page(&spec).await.unwrap();
    assert_eq!(page.total_count, 10);
    assert_eq!(page.total_pages, 2);
    assert!(
        page.items
            .iter()
            .all(|post| post.category.as_deref() == Some("restauri"))
    );
}

#[tokio::test]
async fn test_paged_listing_against_backend() {
    let (base_url, _) = spawn_backend().await;
    let listing = PagedListing::new(BlogSource::new(client(&base_url)), PageSpec::default());

    assert!(listing.load().await);
    {
        let view = listing.view().await;
        let page = view.state().page().unwrap();
        assert_eq!(page.items.len(), 9);
        assert!(page.has_next(view.spec().page));
    }

    let third = std::num::NonZeroU32::new(3).unwrap();
    assert!(listing.go_to_page(third).await);
    let view = listing.view().await;
    let page = view.state().page().unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(!page.has_next(view.spec().page));
}

#[tokio::test]
async fn test_non_success_status_is_listing_error() {
    let (base_url, _) = spawn_backend().await;
    let err = client(&base_url).fetch_jobs().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.url.ends_with("/api/jobs"));
}

#[tokio::test]
async fn test_invalid_body_is_listing_error() {
    let (base_url, _) = spawn_backend().await;
    let err = client(&base_url).fetch_packages().await.unwrap_err();

    assert!(matches!(err.cause, FetchCause::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on the discard port
    let err = client("http://127.0.0.1:9/api")
        .fetch_brands()
        .await
        .unwrap_err();

    assert!(matches!(err.cause, FetchCause::Network(_)));
}

#[tokio::test]
async fn test_brands() {
    let (base_url, _) = spawn_backend().await;
    let brands = client(&base_url).fetch_brands().await.unwrap();

    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].name, "Lancia");
}

#[tokio::test]
async fn test_submit_contact() {
    let (base_url, received) = spawn_backend().await;
    let form = ContactForm {
        name: "Mario Rossi".to_string(),
        email: "mario@example.it".to_string(),
        phone: Some("+39 333 1234567".to_string()),
        subject: None,
        message: "Quando posso vedere la Giulia?".to_string(),
    };

    client(&base_url).submit(&form).await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "contatti");
    assert_eq!(received[0].1["nome"], "Mario Rossi");
    assert_eq!(received[0].1["telefono"], "+39 333 1234567");
}

#[tokio::test]
async fn test_submit_job_application_uses_job_path() {
    let (base_url, received) = spawn_backend().await;
    let form = JobApplication {
        job_id: "j7".to_string(),
        name: "Luca".to_string(),
        email: "luca@example.com".to_string(),
        phone: None,
        cover_letter: Some("Dieci anni in carrozzeria".to_string()),
        cv_url: None,
    };

    client(&base_url).submit(&form).await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received[0].0, "jobs/j7/candidature");
    assert_eq!(received[0].1["letteraPresentazione"], "Dieci anni in carrozzeria");
}

#[tokio::test]
async fn test_invalid_form_is_never_sent() {
    let (base_url, received) = spawn_backend().await;
    let form = NewsletterSignup {
        email: "not-an-email".to_string(),
    };

    let err = client(&base_url).submit(&form).await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));
    assert!(received.lock().unwrap().is_empty());
}
