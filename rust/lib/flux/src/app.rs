use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::Router;
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// State store plus request router.
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on("gallery/back", |_, _, store| async move {
///     store.set("gallery/state", GalleryState::Browsing);
/// });
/// flux.subscribe("gallery/#", |path, _| println!("{} changed", path));
/// flux.emit("gallery/back", GalleryBackReq).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    // ====================================================================
    // State: read
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for every matching handler to finish.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.router
            .dispatch(path, Arc::new(payload), Arc::clone(&self.store))
            .await;
    }

    pub async fn emit_arc(&self, path: &str, payload: Arc<dyn Any + Send + Sync>) {
        self.router
            .dispatch(path, payload, Arc::clone(&self.store))
            .await;
    }

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Called synchronously on whichever thread performs the `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
