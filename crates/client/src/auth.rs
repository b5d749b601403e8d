//! Admin bearer credential: in-memory holder plus pluggable persistence.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::warn;

/// Persistent slot for the admin bearer token, surviving restarts.
///
/// Persistence is best-effort: the in-memory token stays authoritative for
/// the session even when a store write fails.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// File-backed store under the user's data directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at the default location, `<data dir>/storefront-admin/token`.
    ///
    /// Returns `None` when the platform exposes no data directory.
    pub fn new() -> Option<Self> {
        let path = dirs::data_dir()?.join("storefront-admin").join("token");
        Some(Self { path })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim().to_owned();
        (!token.is_empty()).then_some(token)
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "failed to create token directory");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            warn!(path = %self.path.display(), error = %e, "failed to persist admin token");
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove persisted token");
            }
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_owned())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

/// Holds the admin bearer token for the process.
///
/// Loaded from the store at construction, written through on every change,
/// and read synchronously when requests are built. The lock is never held
/// across an await.
pub struct AdminAuth {
    token: RwLock<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl AdminAuth {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load();
        Self {
            token: RwLock::new(token),
            store,
        }
    }

    /// An auth context with no persistence at all.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// The current bearer token, if one is held.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_owned());
        }
        self.store.save(token);
    }

    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        self.store.clear();
    }
}
