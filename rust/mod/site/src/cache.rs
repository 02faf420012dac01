//! Versioned asset cache in front of the network.
//!
//! CDN images are cache-first, everything else is network-first with the
//! cache as the offline fallback. Only one cache version is live; `activate`
//! drops the rest.

use std::collections::BTreeMap;
use std::sync::RwLock;

use reqwest::Url;
use studio_gallery::cdn::CDN_HOST;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CACHE_VERSION: &str = "studio-image-cache-v1";
pub const PRECACHE: [&str; 3] = ["/", "/index.html", "/manifest.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Basic,
    Cors,
    Opaque,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub kind: ResponseType,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            kind: ResponseType::Basic,
            body: body.to_vec(),
        }
    }

    /// Worth keeping: a full 200 that the page is allowed to read.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && matches!(self.kind, ResponseType::Basic | ResponseType::Cors)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("bad url: {0}")]
    BadUrl(String),
    #[error("network: {0}")]
    Network(String),
    #[error("offline and not cached: {0}")]
    NotCached(String),
}

#[async_trait::async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Response, CacheError>;
}

pub fn is_cdn_request(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| h == CDN_HOST || h.ends_with(&format!(".{}", CDN_HOST)))
}

pub struct AssetCache {
    version: String,
    origin: Url,
    caches: RwLock<BTreeMap<String, BTreeMap<String, Response>>>,
}

impl AssetCache {
    pub fn new(origin: &str) -> Result<Self, CacheError> {
        Self::with_version(origin, CACHE_VERSION)
    }

    pub fn with_version(origin: &str, version: &str) -> Result<Self, CacheError> {
        let origin = Url::parse(origin).map_err(|e| CacheError::BadUrl(e.to_string()))?;
        Ok(Self {
            version: version.to_string(),
            origin,
            caches: RwLock::new(BTreeMap::new()),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn cache_names(&self) -> Vec<String> {
        self.caches.read().unwrap().keys().cloned().collect()
    }

    fn resolve(&self, url: &str) -> Result<Url, CacheError> {
        self.origin
            .join(url)
            .map_err(|e| CacheError::BadUrl(format!("{}: {}", url, e)))
    }

    /// First hit across every cache, like `caches.match`.
    pub fn lookup(&self, url: &str) -> Option<Response> {
        let key = self.resolve(url).ok()?;
        let caches = self.caches.read().unwrap();
        caches.values().find_map(|c| c.get(key.as_str()).cloned())
    }

    fn put(&self, url: &Url, resp: Response) {
        let mut caches = self.caches.write().unwrap();
        caches
            .entry(self.version.clone())
            .or_default()
            .insert(url.to_string(), resp);
    }

    /// Precache the app shell into the current version. All or nothing.
    pub async fn install(&self, net: &dyn Network) -> Result<(), CacheError> {
        let mut fetched = Vec::with_capacity(PRECACHE.len());
        for path in PRECACHE {
            let url = self.resolve(path)?;
            let resp = net.fetch(&url).await?;
            if !resp.is_cacheable() {
                return Err(CacheError::Network(format!("{} returned {}", url, resp.status)));
            }
            fetched.push((url, resp));
        }
        for (url, resp) in fetched {
            self.put(&url, resp);
        }
        info!(version = %self.version, "asset cache installed");
        Ok(())
    }

    /// Delete every cache but the current version. Returns the deleted names.
    pub fn activate(&self) -> Vec<String> {
        let mut caches = self.caches.write().unwrap();
        let stale: Vec<String> = caches
            .keys()
            .filter(|name| **name != self.version)
            .cloned()
            .collect();
        for name in &stale {
            caches.remove(name);
        }
        if !stale.is_empty() {
            info!(deleted = ?stale, "stale asset caches removed");
        }
        stale
    }

    pub async fn fetch(&self, net: &dyn Network, url: &str) -> Result<Response, CacheError> {
        let url = self.resolve(url)?;

        if is_cdn_request(&url) {
            if let Some(hit) = self.lookup(url.as_str()) {
                debug!(url = %url, "cache hit");
                return Ok(hit);
            }
            let resp = net.fetch(&url).await?;
            if resp.is_cacheable() {
                self.put(&url, resp.clone());
            }
            return Ok(resp);
        }

        match net.fetch(&url).await {
            Ok(resp) => Ok(resp),
            Err(e) => {
                warn!(url = %url, error = %e, "network failed, trying cache");
                self.lookup(url.as_str())
                    .ok_or_else(|| CacheError::NotCached(url.to_string()))
            }
        }
    }

    /// Seed a named cache directly, as an older deployment would have left it.
    pub fn seed(&self, cache: &str, url: &str, resp: Response) -> Result<(), CacheError> {
        let url = self.resolve(url)?;
        let mut caches = self.caches.write().unwrap();
        caches
            .entry(cache.to_string())
            .or_default()
            .insert(url.to_string(), resp);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct ScriptedNetwork {
        responses: Mutex<HashMap<String, Response>>,
        offline: AtomicBool,
        calls: AtomicUsize,
    }

    impl ScriptedNetwork {
        fn respond(&self, url: &str, resp: Response) {
            self.responses.lock().unwrap().insert(url.to_string(), resp);
        }
    }

    #[async_trait::async_trait]
    impl Network for ScriptedNetwork {
        async fn fetch(&self, url: &Url) -> Result<Response, CacheError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(CacheError::Network("offline".into()));
            }
            self.responses
                .lock()
                .unwrap()
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| CacheError::Network(format!("404 {}", url)))
        }
    }

    const ORIGIN: &str = "https://studio.example/";
    const IMAGE: &str = "https://res.cloudinary.com/demo/image/upload/a.jpg";

    fn shell(net: &ScriptedNetwork) {
        for path in PRECACHE {
            net.respond(&format!("https://studio.example{}", path), Response::ok(path.as_bytes()));
        }
    }

    #[tokio::test]
    async fn install_precaches_shell() {
        let net = ScriptedNetwork::default();
        shell(&net);
        let cache = AssetCache::new(ORIGIN).unwrap();
        cache.install(&net).await.unwrap();
        assert_eq!(cache.cache_names(), vec![CACHE_VERSION.to_string()]);
        assert!(cache.lookup("/index.html").is_some());
    }

    #[tokio::test]
    async fn install_is_all_or_nothing() {
        let net = ScriptedNetwork::default();
        net.respond("https://studio.example/", Response::ok(b"/"));
        let cache = AssetCache::new(ORIGIN).unwrap();
        assert!(cache.install(&net).await.is_err());
        assert!(cache.lookup("/").is_none());
    }

    #[tokio::test]
    async fn images_are_cache_first() {
        let net = ScriptedNetwork::default();
        net.respond(IMAGE, Response::ok(b"jpeg"));
        let cache = AssetCache::new(ORIGIN).unwrap();

        assert_eq!(cache.fetch(&net, IMAGE).await.unwrap().body, b"jpeg");
        net.offline.store(true, Ordering::SeqCst);
        assert_eq!(cache.fetch(&net, IMAGE).await.unwrap().body, b"jpeg");
        assert_eq!(net.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn opaque_and_failed_images_not_stored() {
        let net = ScriptedNetwork::default();
        net.respond(
            IMAGE,
            Response {
                status: 200,
                kind: ResponseType::Opaque,
                body: vec![],
            },
        );
        let cache = AssetCache::new(ORIGIN).unwrap();
        cache.fetch(&net, IMAGE).await.unwrap();
        assert!(cache.lookup(IMAGE).is_none());

        net.respond(
            IMAGE,
            Response {
                status: 500,
                kind: ResponseType::Cors,
                body: vec![],
            },
        );
        assert_eq!(cache.fetch(&net, IMAGE).await.unwrap().status, 500);
        assert!(cache.lookup(IMAGE).is_none());
    }

    #[tokio::test]
    async fn pages_are_network_first_with_fallback() {
        let net = ScriptedNetwork::default();
        shell(&net);
        let cache = AssetCache::new(ORIGIN).unwrap();
        cache.install(&net).await.unwrap();

        net.respond("https://studio.example/index.html", Response::ok(b"fresh"));
        assert_eq!(cache.fetch(&net, "/index.html").await.unwrap().body, b"fresh");
        // Network-first responses are not written back.
        assert_eq!(cache.lookup("/index.html").unwrap().body, b"/index.html");

        net.offline.store(true, Ordering::SeqCst);
        assert_eq!(cache.fetch(&net, "/index.html").await.unwrap().body, b"/index.html");
        assert_eq!(
            cache.fetch(&net, "/about").await.unwrap_err(),
            CacheError::NotCached("https://studio.example/about".into())
        );
    }

    #[test]
    fn activate_purges_old_versions() {
        let cache = AssetCache::new(ORIGIN).unwrap();
        cache.seed("studio-image-cache-v0", "/", Response::ok(b"old")).unwrap();
        cache.seed(CACHE_VERSION, "/", Response::ok(b"new")).unwrap();
        assert_eq!(cache.activate(), vec!["studio-image-cache-v0".to_string()]);
        assert_eq!(cache.cache_names(), vec![CACHE_VERSION.to_string()]);
        assert_eq!(cache.lookup("/").unwrap().body, b"new");
    }

    #[test]
    fn cdn_host_detection() {
        assert!(is_cdn_request(&Url::parse(IMAGE).unwrap()));
        assert!(!is_cdn_request(&Url::parse("https://cloudinary.com.evil.net/x").unwrap()));
        assert!(!is_cdn_request(&Url::parse(ORIGIN).unwrap()));
    }
}
