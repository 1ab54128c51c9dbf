//! End-to-end tests: the site server on an ephemeral port, content read
//! from a temporary public directory.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use autoflow_site::analytics::MemorySink;
use autoflow_site::config::SiteConfig;
use autoflow_site::content::{Collection, ContentLoader, ContentSource, HttpSource, LoadError};
use autoflow_site::{server, Site};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tempfile::TempDir;

const BLOG: &str = r#"{
    "n8n-vs-zapier": {
        "title": "n8n vs Zapier",
        "content": "<h2>Comparison</h2><p>Self-hosted <strong>wins</strong>.</p>",
        "date": "2024-12-15",
        "readTime": "6 min read",
        "category": "Guides"
    },
    "ai-invoices": {
        "title": "AI Invoice Processing",
        "description": "Stop typing invoices by hand.",
        "content": "<p>OCR plus LLMs.</p>",
        "date": "2024-12-20",
        "readTime": "4 min read",
        "category": "Finance"
    }
}"#;

const TEMPLATES: &str = r#"[{"data": {
    "financial-data-processing": {
        "title": "Financial Data Processing",
        "content": "<p>Reconcile statements.</p>",
        "date": "2024-11-02",
        "readTime": "10 min setup",
        "category": "Finance",
        "image": "/images/finance.png",
        "link": "https://n8n.io/workflows/42"
    }
}}]"#;

struct TestSite {
    _dir: TempDir,
    addr: SocketAddr,
    sink: Arc<MemorySink>,
}

impl TestSite {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = reqwest::get(self.url(path)).await.unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.text().await.unwrap())
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn start_site(config: SiteConfig, files: &[(&str, &str)]) -> TestSite {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join(&config.public_dir);
    std::fs::create_dir_all(&public).unwrap();
    for (name, body) in files {
        std::fs::write(public.join(name), body).unwrap();
    }

    let site = Site::with_config(dir.path(), config);
    let sink = Arc::new(MemorySink::new());
    let router = server::app(&site, sink.clone()).unwrap();
    let addr = serve(router).await;

    TestSite {
        _dir: dir,
        addr,
        sink,
    }
}

async fn default_site() -> TestSite {
    start_site(
        SiteConfig::default(),
        &[("blogPosts.json", BLOG), ("templatesPost.json", TEMPLATES)],
    )
    .await
}

/// Records every JSON body posted to it and answers with a fixed status
async fn start_webhook(status: StatusCode) -> (String, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let store = received.clone();
    let router = Router::new().route(
        "/hook",
        post(move |Json(body): Json<Value>| {
            let store = store.clone();
            async move {
                store.lock().unwrap().push(body);
                status
            }
        }),
    );
    let addr = serve(router).await;
    (format!("http://{}/hook", addr), received)
}

#[tokio::test]
async fn test_home_page() {
    let site = default_site().await;
    let (status, body) = site.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<span class=\"gradient\">Business Workflows</span>"));
    assert!(body.contains("href=\"/blog/ai-invoices\""));
    assert!(site.sink.names().contains(&"page_view".to_string()));
}

#[tokio::test]
async fn test_blog_list_newest_first() {
    let site = default_site().await;
    let (status, body) = site.get("/blog").await;

    assert_eq!(status, StatusCode::OK);
    let newer = body.find("AI Invoice Processing").unwrap();
    let older = body.find("n8n vs Zapier").unwrap();
    assert!(newer < older);
    // Derived excerpt for the entry without a description
    assert!(body.contains("ComparisonSelf-hosted wins...."));
}

#[tokio::test]
async fn test_detail_page() {
    let site = default_site().await;
    let (status, body) = site.get("/templates/financial-data-processing").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>Reconcile statements.</p>"));
    assert!(body.contains("data-scope=\"template-content\""));
    assert!(body.contains("href=\"https://n8n.io/workflows/42\""));

    let events = site.sink.events();
    let (_, params) = events
        .iter()
        .find(|(name, _)| name == "template_view")
        .unwrap();
    assert_eq!(params["template_slug"], "financial-data-processing");
}

#[tokio::test]
async fn test_detail_not_found() {
    let site = default_site().await;
    let (status, body) = site.get("/templates/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Template Not Found"));
    assert!(body.contains("Back to Templates"));
    assert!(!body.contains("data-scope="));
    assert!(site.sink.names().contains(&"template_not_found".to_string()));
}

#[tokio::test]
async fn test_missing_resource_renders_error() {
    let site = start_site(SiteConfig::default(), &[("blogPosts.json", BLOG)]).await;

    let (status, body) = site.get("/templates").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error loading templates"));
    assert!(body.contains("Failed to load templates"));

    let (status, body) = site.get("/templates/financial-data-processing").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to load template"));
}

#[tokio::test]
async fn test_query_alias_and_trailing_slash() {
    let site = default_site().await;

    let (status, body) = site.get("/?/blog/ai-invoices").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>OCR plus LLMs.</p>"));

    let (status, body) = site.get("/templates/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Financial Data Processing"));
}

#[tokio::test]
async fn test_static_files_and_not_found() {
    let site = start_site(
        SiteConfig::default(),
        &[("blogPosts.json", BLOG), ("robots.txt", "User-agent: *\n")],
    )
    .await;

    let (status, body) = site.get("/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "User-agent: *\n");

    let (status, body) = site.get("/blogPosts.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("n8n-vs-zapier"));

    let (status, body) = site.get("/pricing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Oops! Page not found"));
}

#[tokio::test]
async fn test_site_under_root_path() {
    let config = SiteConfig {
        root: "/site/".to_string(),
        ..SiteConfig::default()
    };
    let site = start_site(config, &[("blogPosts.json", BLOG)]).await;

    let (status, body) = site.get("/site/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/site/blog/ai-invoices\""));

    let (status, _) = site.get("/blog").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_forwarded_to_webhook() {
    let (hook, received) = start_webhook(StatusCode::OK).await;
    let mut config = SiteConfig::default();
    config.contact.webhook_url = Some(hook);
    let site = start_site(config, &[("blogPosts.json", BLOG)]).await;

    let response = reqwest::Client::new()
        .post(site.url("/contact"))
        .form(&[
            ("name", " Ada "),
            ("email", "ada@example.com"),
            ("company", ""),
            ("message", "Automate our invoices"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Message Sent!"));

    let received = received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["name"], "Ada");
    assert_eq!(received[0]["message"], "Automate our invoices");

    let events = site.sink.events();
    let (_, params) = events
        .iter()
        .find(|(name, _)| name == "contact_form_submit")
        .unwrap();
    assert_eq!(params["success"], true);
}

#[tokio::test]
async fn test_contact_webhook_failure() {
    let (hook, received) = start_webhook(StatusCode::INTERNAL_SERVER_ERROR).await;
    let mut config = SiteConfig::default();
    config.contact.webhook_url = Some(hook);
    let site = start_site(config, &[]).await;

    let response = reqwest::Client::new()
        .post(site.url("/contact"))
        .form(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("message", "Hello"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Message not sent"));
    // Submitted values stay in the form
    assert!(body.contains("value=\"ada@example.com\""));
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_contact_invalid_form_not_forwarded() {
    let (hook, received) = start_webhook(StatusCode::OK).await;
    let mut config = SiteConfig::default();
    config.contact.webhook_url = Some(hook);
    let site = start_site(config, &[]).await;

    let response = reqwest::Client::new()
        .post(site.url("/contact"))
        .form(&[("name", "Ada"), ("email", "not-an-email"), ("message", "Hi")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    assert!(response.text().await.unwrap().contains("Please check the form"));
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_source_reads_origin() {
    let router = Router::new()
        .route("/blogPosts.json", get(|| async { BLOG }))
        .route(
            "/templatesPost.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let origin = format!("http://{}", serve(router).await);

    let source = HttpSource::new(&origin);
    let fetched = source.fetch("/blogPosts.json").await.unwrap();
    assert!(fetched.is_success());

    let config = autoflow_site::config::ContentConfig {
        origin: Some(origin),
        ..Default::default()
    };
    let loader = ContentLoader::from_config(&config, std::path::Path::new("unused"));

    let posts = loader.try_load_list(Collection::Blog).await.unwrap();
    assert_eq!(posts[0].slug, "ai-invoices");

    let err = loader.try_load_list(Collection::Templates).await.unwrap_err();
    assert!(matches!(err, LoadError::Fetch { status: 500 }));
}

#[tokio::test]
async fn test_entry_with_null_fields_is_served() {
    let blog = r#"{
        "dated": { "title": "Dated Post", "date": "2024-12-20", "content": "<p>Dated.</p>" },
        "undated": { "title": "Undated Post", "date": null, "readTime": null, "content": "<p>Undated.</p>" }
    }"#;
    let site = start_site(SiteConfig::default(), &[("blogPosts.json", blog)]).await;

    let (status, body) = site.get("/blog").await;
    assert_eq!(status, StatusCode::OK);
    let dated = body.find("Dated Post").unwrap();
    let undated = body.find("Undated Post").unwrap();
    assert!(dated < undated);

    let (status, body) = site.get("/blog/undated").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>Undated.</p>"));
}
