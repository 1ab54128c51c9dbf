//! List and detail view controllers
//!
//! A controller owns the state of one mounted view. Each (re)load runs as
//! a spawned task tied to a fresh [`Liveness`]; mounting a newer load or
//! dropping the controller revokes the previous one, and a revoked load
//! never writes its result.

use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use super::{Liveness, ViewState};
use crate::analytics::EventSink;
use crate::content::{Collection, ContentEntry, ContentLoader, LoadError};

/// State cell shared between a controller and the loads it spawns
struct ViewCell<T> {
    state: Arc<watch::Sender<ViewState<T>>>,
    live: Liveness,
}

impl<T> ViewCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn new() -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            state: Arc::new(state),
            live: Liveness::new(),
        }
    }

    /// Revoke the running load, enter `Loading`, and run `load` in its place.
    ///
    /// `on_commit` runs only if the result was committed.
    fn start<F, C>(&mut self, load: F, on_commit: C)
    where
        F: Future<Output = ViewState<T>> + Send + 'static,
        C: FnOnce(&ViewState<T>) + Send + 'static,
    {
        self.live.revoke();
        self.live = Liveness::new();
        self.state.send_replace(ViewState::Loading);

        let live = self.live.clone();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let next = load.await;

            // Checked under the channel lock so a revoke that lands while
            // the result is being written still wins. `on_commit` runs before
            // any waiter can observe the new state.
            let committed = state.send_if_modified(|current| {
                if !live.is_alive() {
                    return false;
                }
                *current = next;
                on_commit(current);
                true
            });

            if !committed {
                tracing::debug!("Discarded result of a superseded load");
            }
        });
    }

    fn current(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    async fn settled(&self) -> ViewState<T> {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => ViewState::Loading,
        };
        settled
    }
}

impl<T> Drop for ViewCell<T> {
    fn drop(&mut self) {
        self.live.revoke();
    }
}

/// Controller of a list view (blog index, template gallery)
pub struct ListView {
    collection: Collection,
    loader: ContentLoader,
    cell: ViewCell<Vec<ContentEntry>>,
}

impl ListView {
    /// Mount the view and start loading the collection
    pub fn mount(loader: ContentLoader, collection: Collection) -> Self {
        let mut view = Self {
            collection,
            loader,
            cell: ViewCell::new(),
        };
        view.reload();
        view
    }

    /// Load the collection again, discarding any load still in flight
    pub fn reload(&mut self) {
        let loader = self.loader.clone();
        let collection = self.collection;

        self.cell.start(
            async move {
                match loader.try_load_list(collection).await {
                    Ok(entries) => ViewState::Success(entries),
                    Err(e) => {
                        tracing::error!("Error loading {}: {}", collection, e);
                        ViewState::Error(collection.list_error_message().to_string())
                    }
                }
            },
            |_| {},
        );
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn state(&self) -> ViewState<Vec<ContentEntry>> {
        self.cell.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Vec<ContentEntry>>> {
        self.cell.subscribe()
    }

    /// Wait until the current load settles
    pub async fn settled(&self) -> ViewState<Vec<ContentEntry>> {
        self.cell.settled().await
    }
}

/// Controller of a detail view (one post, one template)
pub struct DetailView {
    collection: Collection,
    loader: ContentLoader,
    sink: Arc<dyn EventSink>,
    slug: String,
    cell: ViewCell<ContentEntry>,
}

impl DetailView {
    /// Mount the view for `slug` and start loading it
    pub fn mount(
        loader: ContentLoader,
        collection: Collection,
        sink: Arc<dyn EventSink>,
        slug: &str,
    ) -> Self {
        let mut view = Self {
            collection,
            loader,
            sink,
            slug: String::new(),
            cell: ViewCell::new(),
        };
        view.navigate(slug);
        view
    }

    /// Switch to another slug; a load still running for the old one is
    /// discarded when it finishes.
    pub fn navigate(&mut self, slug: &str) {
        self.slug = slug.to_string();

        let loader = self.loader.clone();
        let collection = self.collection;
        let load_slug = self.slug.clone();
        let sink = Arc::clone(&self.sink);
        let event_slug = self.slug.clone();

        self.cell.start(
            async move {
                match loader.load_entry(collection, &load_slug).await {
                    Ok(entry) => ViewState::Success(entry),
                    Err(LoadError::NotFound { .. }) => ViewState::NotFound,
                    Err(e) => {
                        tracing::error!("Error loading {} {:?}: {}", collection, load_slug, e);
                        ViewState::Error(collection.detail_error_message().to_string())
                    }
                }
            },
            move |state| track_detail(sink.as_ref(), collection, &event_slug, state),
        );
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Slug of the most recent navigation
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn state(&self) -> ViewState<ContentEntry> {
        self.cell.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<ContentEntry>> {
        self.cell.subscribe()
    }

    /// Wait until the current load settles
    pub async fn settled(&self) -> ViewState<ContentEntry> {
        self.cell.settled().await
    }
}

fn track_detail(
    sink: &dyn EventSink,
    collection: Collection,
    slug: &str,
    state: &ViewState<ContentEntry>,
) {
    let prefix = collection.event_prefix();
    let mut params = serde_json::Map::new();
    params.insert(format!("{}_slug", prefix), json!(slug));

    match state {
        ViewState::Success(entry) => {
            params.insert(format!("{}_title", prefix), json!(entry.title));
            params.insert(format!("{}_category", prefix), json!(entry.category));
            sink.track_event(&format!("{}_view", prefix), params.into());
        }
        ViewState::NotFound => {
            sink.track_event(&format!("{}_not_found", prefix), params.into());
        }
        _ => {}
    }
}
