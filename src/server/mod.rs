//! HTTP server: renders pages per request and serves the public directory

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Form, State},
    http::{Method, Request, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::analytics::EventSink;
use crate::contact::{ContactClient, ContactError, ContactForm, Toast};
use crate::content::{Collection, ContentLoader};
use crate::helpers::url_for;
use crate::router::{strip_root, Route};
use crate::templates::{SiteData, TemplateRenderer};
use crate::view::{DetailView, ListView, ViewState};
use crate::Site;

/// Server state
struct ServerState {
    root: String,
    public_dir: PathBuf,
    site: SiteData,
    renderer: TemplateRenderer,
    loader: ContentLoader,
    sink: Arc<dyn EventSink>,
    contact: ContactClient,
}

/// Build the application router for a site
pub fn app(site: &Site, sink: Arc<dyn EventSink>) -> Result<Router> {
    let renderer = TemplateRenderer::new(&site.config).context("Failed to load templates")?;

    let state = Arc::new(ServerState {
        root: site.config.root.clone(),
        public_dir: site.public_dir.clone(),
        site: SiteData::from_config(&site.config),
        renderer,
        loader: site.loader(),
        sink,
        contact: ContactClient::new(site.config.contact.webhook_url.clone()),
    });

    let contact_path = url_for(&site.config, "/contact");

    Ok(Router::new()
        .route(&contact_path, post(contact_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = app(site, site.event_sink())?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Fallback handler: site pages first, then files from the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let uri = request.uri().clone();
    let route = Route::resolve(&state.root, uri.path(), uri.query());
    tracing::debug!("{} -> {:?}", uri, route);

    match route {
        Route::Home => {
            render_home(&state, &uri, ContactForm::default(), None, StatusCode::OK).await
        }
        Route::List(collection) => render_list(&state, &uri, collection).await,
        Route::Detail(collection, slug) => render_detail(&state, &uri, collection, &slug).await,
        Route::NotFound => serve_static(&state, request).await,
    }
}

async fn render_home(
    state: &ServerState,
    uri: &Uri,
    form: ContactForm,
    toast: Option<Toast>,
    status: StatusCode,
) -> Response {
    let preview = state.loader.load_list(Collection::Blog).await;
    state.sink.track_page_view(&page_path(uri), &state.site.title);

    let html = state
        .renderer
        .render_home(&state.site, &preview, &form, toast.as_ref());
    respond(status, html)
}

async fn render_list(state: &ServerState, uri: &Uri, collection: Collection) -> Response {
    let view = ListView::mount(state.loader.clone(), collection);
    let view_state = view.settled().await;

    state.sink.track_page_view(&page_path(uri), collection.label());
    let html = state.renderer.render_list(&state.site, collection, &view_state);
    respond(StatusCode::OK, html)
}

async fn render_detail(
    state: &ServerState,
    uri: &Uri,
    collection: Collection,
    slug: &str,
) -> Response {
    // Dropping this future (client gone) drops the view, which discards
    // the load still in flight.
    let view = DetailView::mount(
        state.loader.clone(),
        collection,
        Arc::clone(&state.sink),
        slug,
    );
    let view_state = view.settled().await;

    let title = match &view_state {
        ViewState::Success(entry) => entry.title.as_str(),
        _ => collection.not_found_title(),
    };
    state.sink.track_page_view(&page_path(uri), title);

    let status = match view_state {
        ViewState::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    let html = state
        .renderer
        .render_detail(&state.site, collection, slug, &view_state);
    respond(status, html)
}

/// Serve a file from the public directory, or the not-found page
async fn serve_static(state: &ServerState, request: Request<Body>) -> Response {
    let uri = request.uri().clone();
    let Some(path) = strip_root(&state.root, uri.path()) else {
        return render_not_found(state, &uri);
    };

    let (mut parts, body) = request.into_parts();
    parts.uri = match path.parse() {
        Ok(uri) => uri,
        Err(_) => return render_not_found(state, &uri),
    };
    let request = Request::from_parts(parts, body);

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(false);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => render_not_found(state, &uri),
        Err(e) => {
            tracing::error!("Failed to serve {}: {}", uri, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn render_not_found(state: &ServerState, uri: &Uri) -> Response {
    tracing::debug!("404: {}", uri);
    state.sink.track_page_view(&page_path(uri), "Page Not Found");
    let path = strip_root(&state.root, uri.path()).unwrap_or(uri.path());
    let html = state.renderer.render_not_found(&state.site, path);
    respond(StatusCode::NOT_FOUND, html)
}

/// Contact form submission
async fn contact_handler(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    Form(form): Form<ContactForm>,
) -> Response {
    let form = form.normalized();
    let result = state.contact.submit(&form).await;

    state.sink.track_event(
        "contact_form_submit",
        json!({ "success": result.is_ok(), "has_company": !form.company.is_empty() }),
    );

    let toast = Toast::from_result(&result);
    // Keep what the visitor typed unless the message went out
    let (form, status) = match result {
        Ok(()) => (ContactForm::default(), StatusCode::OK),
        Err(ContactError::Invalid(_)) => (form, StatusCode::UNPROCESSABLE_ENTITY),
        Err(_) => (form, StatusCode::OK),
    };

    render_home(&state, &uri, form, Some(toast), status).await
}

fn page_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn respond(status: StatusCode, html: Result<String>) -> Response {
    match html {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
