use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::trace;

use crate::pattern::Registry;
use crate::store::StateStore;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Handler arguments are owned so the future can be `'static`:
/// the request path, the type-erased payload and the state store.
type ErasedHandler =
    Arc<dyn Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Maps request patterns to async handlers. Every matching handler runs,
/// in registration order, one after another.
pub struct Router {
    handlers: Registry<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: Registry::new(),
        }
    }

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String,
                  payload: Arc<dyn Any + Send + Sync>,
                  store: Arc<StateStore>|
                  -> BoxFuture { Box::pin(handler(path, payload, store)) },
        );
        self.handlers.insert(pattern, handler);
    }

    /// Run every handler matching `path`. No match is a silent no-op.
    pub async fn dispatch(
        &self,
        path: &str,
        payload: Arc<dyn Any + Send + Sync>,
        store: Arc<StateStore>,
    ) {
        let handlers = self.handlers.matching(path);
        trace!(path, handlers = handlers.len(), "dispatch");
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    pub fn has_handler(&self, pattern: &str) -> bool {
        self.handlers.has_pattern(pattern)
    }

    pub fn matches(&self, path: &str) -> bool {
        !self.handlers.matching(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
