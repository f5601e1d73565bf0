//! Session-scoped asset store: transient URLs for uploaded model bytes.
//!
//! Uploaded files never touch disk. Their bytes are held here and served to
//! the webview through the `session-asset` URI scheme until revoked. Every
//! URL handed out is unique for the life of the process.

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Custom URI scheme registered by the desktop shell.
pub const SCHEME: &str = "session-asset";

/// A stored upload.
#[derive(Debug, Clone)]
pub struct SessionAsset {
    pub bytes: Arc<[u8]>,
    pub content_type: &'static str,
    pub filename: String,
}

#[derive(Debug, Default)]
pub struct AssetStore {
    assets: HashMap<Uuid, SessionAsset>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes and return a fresh URL for them.
    pub fn create(&mut self, bytes: Vec<u8>, content_type: &'static str, filename: &str) -> String {
        let id = Uuid::new_v4();
        log::info!(
            "[ASSETS] Registered {} ({} bytes, {}) as {}",
            filename,
            bytes.len(),
            content_type,
            id
        );
        self.assets.insert(
            id,
            SessionAsset {
                bytes: Arc::from(bytes),
                content_type,
                filename: filename.to_string(),
            },
        );
        url_for(id)
    }

    /// Release the asset behind `url`. Returns false for URLs this store
    /// never issued (preset URLs) or already revoked.
    pub fn revoke(&mut self, url: &str) -> bool {
        let Some(id) = id_from_url(url) else {
            return false;
        };
        match self.assets.remove(&id) {
            Some(asset) => {
                log::info!("[ASSETS] Revoked {} ({})", id, asset.filename);
                true
            }
            None => false,
        }
    }

    /// Release every asset. Returns how many were live.
    pub fn revoke_all(&mut self) -> usize {
        let released = self.assets.len();
        self.assets.clear();
        if released > 0 {
            log::info!("[ASSETS] Released {} upload(s)", released);
        }
        released
    }

    pub fn resolve(&self, id: &Uuid) -> Option<&SessionAsset> {
        self.assets.get(id)
    }

    /// Resolve a request path of the form `/<uuid>` as seen by the
    /// protocol handler.
    pub fn resolve_path(&self, path: &str) -> Option<&SessionAsset> {
        let id = Uuid::parse_str(path.trim_start_matches('/')).ok()?;
        self.resolve(&id)
    }

    pub fn is_live(&self, url: &str) -> bool {
        id_from_url(url).is_some_and(|id| self.assets.contains_key(&id))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

// Windows and Android webviews only accept custom schemes as
// `http://<scheme>.localhost/`.
#[cfg(any(windows, target_os = "android"))]
fn url_prefix() -> String {
    format!("http://{}.localhost/", SCHEME)
}

#[cfg(not(any(windows, target_os = "android")))]
fn url_prefix() -> String {
    format!("{}://localhost/", SCHEME)
}

pub fn url_for(id: Uuid) -> String {
    format!("{}{}", url_prefix(), id)
}

pub fn id_from_url(url: &str) -> Option<Uuid> {
    let rest = url.strip_prefix(&url_prefix())?;
    Uuid::parse_str(rest).ok()
}
