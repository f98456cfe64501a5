//! Ephemeral, revocable preview handles.
//!
//! A `PreviewHandle` stands for a display-only reference to the selected
//! image's bytes. Handles are revoked when dropped, so a session that replaces
//! or clears its handle cannot leak it. The owning `PreviewStore` tracks which
//! handles are live.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::candidate::ValidatedImage;

#[derive(Default)]
struct StoreInner {
    next_id: AtomicU64,
    live: Mutex<BTreeSet<u64>>,
}

impl StoreInner {
    fn live(&self) -> std::sync::MutexGuard<'_, BTreeSet<u64>> {
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Issues preview handles and tracks which are still live.
#[derive(Clone, Default)]
pub struct PreviewStore {
    inner: Arc<StoreInner>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle for `image`. The handle is live until dropped.
    pub fn create(&self, image: &ValidatedImage) -> PreviewHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.live().insert(id);
        tracing::debug!(id, name = %image.name, "preview created");
        PreviewHandle {
            id,
            url: format!("preview://{id}/{}", image.name),
            bytes: Arc::clone(&image.bytes),
            store: Arc::clone(&self.inner),
        }
    }

    /// Number of handles created by this store and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.inner.live().len()
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.inner.live().contains(&id)
    }
}

/// A live preview reference. Revoked on drop.
pub struct PreviewHandle {
    id: u64,
    url: String,
    bytes: Arc<[u8]>,
    store: Arc<StoreInner>,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Opaque locator, unique per handle.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.store.live().remove(&self.id);
        tracing::debug!(id = self.id, "preview revoked");
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("url", &self.url)
            .finish()
    }
}
