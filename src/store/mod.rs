//! Resource stores - client-side caches of server-owned data.
//!
//! A `ResourceStore<M, T>` holds two slices for one resource type (an
//! ordered collection and a single selected item) and runs remote calls
//! through a `Transport`. Every operation follows the same contract:
//!
//! 1. Loading is raised when the operation is *invoked*, before the
//!    returned future is first polled.
//! 2. Exactly one remote call is made.
//! 3. The response goes through a typed decode step; only a success that is
//!    still the latest call for its slice (or item) reconciles the cache.
//! 4. Failures leave the cache untouched and raise an error notice.
//! 5. Loading drops on every exit path, including the future being dropped.
//!
//! Read operations resolve to `()`, mutations to a success flag.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use marketplace_sync::{Endpoint, LogNotifier, ResourceStore, ScriptedTransport};
//!
//! const FETCH: Endpoint = Endpoint::read("fetch_rooms", "rooms", "Failed to load rooms");
//!
//! let store: ResourceStore<Room, _> =
//!     ResourceStore::new(ScriptedTransport::new(), Arc::new(LogNotifier));
//! let pending = store.read_collection(FETCH, "/hotels/h1/rooms".into());
//! assert!(store.loading());
//! pending.await;
//! ```

mod decode;
mod endpoint;
mod sequence;
mod status;

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use crate::notify::{Notice, Notifier};
use crate::resource::{remove_by_id, replace_by_id, Resource};
use crate::transport::{Request, Transport};

pub use decode::{decode_payload, interpret, Outcome};
pub use endpoint::{Endpoint, CREATE_OK, READ_OK, WRITE_OK};
pub use status::StoreStatus;

use sequence::{Sequencer, Ticket};
use status::Activity;

const COLLECTION_SLICE: &str = "collection";
const SELECTED_SLICE: &str = "selected";

/// What a page should render for the collection slice.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionView<M> {
    /// Never fetched, first fetch in flight.
    Loading,
    /// Never fetched successfully and nothing in flight.
    NotFound,
    /// Fetched, and the server had nothing.
    Empty,
    /// Last-known-good items, in server order.
    Items(Vec<M>),
}

struct Cache<M> {
    items: Vec<M>,
    selected: Option<M>,
    fetched: bool,
}

impl<M> Default for Cache<M> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            fetched: false,
        }
    }
}

struct Shared<M> {
    cache: RwLock<Cache<M>>,
    activity: Arc<Activity>,
    sequencer: Sequencer,
}

impl<M> Shared<M> {
    fn read(&self) -> RwLockReadGuard<'_, Cache<M>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one reconcile step; bump the revision if it changed anything.
    fn apply(&self, reconcile: impl FnOnce(&mut Cache<M>) -> bool) {
        let changed = {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            reconcile(&mut cache)
        };
        if changed {
            self.activity.touch();
        }
    }
}

/// Cached slices of one resource type plus the operations that sync them.
///
/// Clone-friendly: clones share the same cache and status, so one instance
/// built at startup can be handed to every page that needs it.
pub struct ResourceStore<M, T> {
    transport: T,
    notifier: Arc<dyn Notifier>,
    shared: Arc<Shared<M>>,
}

impl<M, T: Clone> Clone for ResourceStore<M, T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            notifier: Arc::clone(&self.notifier),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<M: Resource, T: Transport> ResourceStore<M, T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            shared: Arc::new(Shared {
                cache: RwLock::new(Cache::default()),
                activity: Arc::new(Activity::new()),
                sequencer: Sequencer::new(),
            }),
        }
    }

    // =========================================================================
    // Reactive reads
    // =========================================================================

    pub fn loading(&self) -> bool {
        self.shared.activity.current().loading
    }

    pub fn status(&self) -> StoreStatus {
        self.shared.activity.current()
    }

    /// Watch loading and cache revisions.
    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.shared.activity.subscribe()
    }

    /// The collection slice, in server order.
    pub fn items(&self) -> Vec<M> {
        self.shared.read().items.clone()
    }

    /// The single-item slice.
    pub fn selected(&self) -> Option<M> {
        self.shared.read().selected.clone()
    }

    pub fn find(&self, id: &str) -> Option<M> {
        self.shared
            .read()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Whether the collection has been filled by a successful fetch.
    pub fn is_fetched(&self) -> bool {
        self.shared.read().fetched
    }

    pub fn view(&self) -> CollectionView<M> {
        let loading = self.loading();
        let cache = self.shared.read();
        match (cache.fetched, cache.items.is_empty()) {
            (false, _) if loading => CollectionView::Loading,
            (false, _) => CollectionView::NotFound,
            (true, true) => CollectionView::Empty,
            (true, false) => CollectionView::Items(cache.items.clone()),
        }
    }

    /// Forget the selected item (e.g. when a detail page unmounts).
    pub fn clear_selected(&self) {
        self.shared.apply(|cache| cache.selected.take().is_some());
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Replace the collection slice with the server's collection.
    pub fn read_collection(
        &self,
        endpoint: Endpoint,
        path: String,
    ) -> impl Future<Output = ()> + Send + 'static {
        let run = self.dispatch::<Vec<M>, _>(
            endpoint,
            Ok(endpoint.request(path)),
            Some(COLLECTION_SLICE.to_string()),
            |cache, items| match items {
                Some(items) => {
                    cache.items = items;
                    cache.fetched = true;
                    true
                }
                None => false,
            },
        );
        async move {
            run.await;
        }
    }

    /// Replace the selected slice with one server record (`null` clears it).
    pub fn read_one(
        &self,
        endpoint: Endpoint,
        path: String,
    ) -> impl Future<Output = ()> + Send + 'static {
        let run = self.dispatch::<Option<M>, _>(
            endpoint,
            Ok(endpoint.request(path)),
            Some(SELECTED_SLICE.to_string()),
            |cache, item| match item {
                Some(item) => {
                    cache.selected = item;
                    true
                }
                None => false,
            },
        );
        async move {
            run.await;
        }
    }

    /// Create `item` remotely. With `track`, the created record returned by
    /// the server is appended to the collection slice.
    pub fn create(
        &self,
        endpoint: Endpoint,
        path: String,
        item: &M,
        track: bool,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.dispatch::<M, _>(
            endpoint,
            endpoint.request(path).with_json(item),
            None,
            move |cache, created| match created {
                Some(created) if track => {
                    cache.items.push(created);
                    true
                }
                _ => false,
            },
        )
    }

    /// Update `item` remotely and replace the entry with the same identity in
    /// place. A bodiless success keeps the submitted value.
    pub fn update(
        &self,
        endpoint: Endpoint,
        path: String,
        item: &M,
    ) -> impl Future<Output = bool> + Send + 'static {
        let submitted = item.clone();
        self.dispatch::<M, _>(
            endpoint,
            endpoint.request(path).with_json(item),
            Some(format!("update:{}", item.id())),
            move |cache, updated| replace_by_id(&mut cache.items, updated.unwrap_or(submitted)),
        )
    }

    /// Delete the resource with identity `id` remotely and drop it from the
    /// collection slice.
    pub fn delete(
        &self,
        endpoint: Endpoint,
        path: String,
        id: &str,
    ) -> impl Future<Output = bool> + Send + 'static {
        let id = id.to_string();
        self.dispatch::<Value, _>(
            endpoint,
            Ok(endpoint.request(path)),
            Some(format!("delete:{id}")),
            move |cache, _| remove_by_id(&mut cache.items, &id),
        )
    }

    /// Run a call that does not touch the cache (e.g. persisting a page section).
    pub fn send(
        &self,
        endpoint: Endpoint,
        request: Request,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.dispatch::<Value, _>(endpoint, Ok(request), None, |_, _| false)
    }

    fn dispatch<P, F>(
        &self,
        endpoint: Endpoint,
        request: Result<Request, serde_json::Error>,
        sequence_key: Option<String>,
        reconcile: F,
    ) -> impl Future<Output = bool> + Send + 'static
    where
        P: DeserializeOwned + Send + 'static,
        F: FnOnce(&mut Cache<M>, Option<P>) -> bool + Send + 'static,
    {
        let in_flight = self.shared.activity.enter();

        let call = request.map(|request| {
            tracing::debug!(
                collection = M::COLLECTION,
                op = endpoint.name,
                method = %request.method,
                path = %request.path,
                "store operation"
            );
            let ticket = sequence_key.map(|key| self.shared.sequencer.issue(key));
            (ticket, self.transport.send(request))
        });

        let shared = Arc::clone(&self.shared);
        let notifier = Arc::clone(&self.notifier);

        async move {
            let _in_flight = in_flight;

            let (ticket, call) = match call {
                Ok(call) => call,
                Err(err) => {
                    tracing::error!(
                        collection = M::COLLECTION,
                        op = endpoint.name,
                        error = %err,
                        "failed to encode request body"
                    );
                    notifier.notify(Notice::error(endpoint.fallback));
                    return false;
                }
            };

            let outcome = decode::interpret::<P>(&endpoint, call.await);
            let fresh = ticket.map_or(true, Ticket::settle);

            match outcome {
                Outcome::Failed(message) => {
                    notifier.notify(Notice::error(message));
                    return false;
                }
                Outcome::NotModified => {}
                Outcome::Payload(_) | Outcome::NoContent if !fresh => {
                    tracing::debug!(
                        collection = M::COLLECTION,
                        op = endpoint.name,
                        "discarding stale response"
                    );
                }
                Outcome::Payload(payload) => {
                    shared.apply(|cache| reconcile(cache, Some(payload)))
                }
                Outcome::NoContent => shared.apply(|cache| reconcile(cache, None)),
            }

            if let Some(message) = endpoint.success {
                notifier.notify(Notice::success(message));
            }
            true
        }
    }
}
