//! Progress tracker: an in-memory collection of tracked vocabulary items,
//! synchronized whole to the key-value store on every mutation.
//!
//! Two instances exist app-wide (study list, learned items) with identical
//! contracts and independent id spaces; there is no automatic promotion
//! between them.
//!
//! Mutations are fire-and-forget for the caller: persistence failures are
//! logged and counted, never propagated, and the in-memory state stays
//! optimistic. Each mutation holds the write lock across its persist await,
//! so calls on one tracker are applied and written in call order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, instrument, warn};

use crate::domain::{NewTrackedItem, TrackedItem};
use crate::store::KeyValueStore;
use crate::util::{clamp_progress, Clock};

pub const STUDY_LIST_KEY: &str = "studyList";
pub const LEARNED_ITEMS_KEY: &str = "learnedItems";

pub struct ProgressTracker {
    items: RwLock<Vec<TrackedItem>>,
    store: Arc<dyn KeyValueStore>,
    key: String,
    clock: Arc<dyn Clock>,
    persist_failures: AtomicU64,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            store,
            key: key.into(),
            clock,
            persist_failures: AtomicU64::new(0),
        }
    }

    /// One-time startup read. A missing key means an empty collection; a
    /// corrupt payload is logged and the collection starts empty rather than
    /// failing the whole screen.
    #[instrument(level = "info", skip(self), fields(key = %self.key))]
    pub async fn hydrate(&self) {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                error!(target: "tracker", key = %self.key, error = %e, "hydrate read failed");
                return;
            }
        };
        match serde_json::from_str::<Vec<TrackedItem>>(&raw) {
            Ok(items) => *self.items.write().await = items,
            Err(e) => {
                warn!(target: "tracker", key = %self.key, error = %e, "stored collection unreadable; starting empty");
            }
        }
    }

    /// Insert a new item with progress 0. No-op when the id is already tracked.
    #[instrument(level = "debug", skip(self, item), fields(key = %self.key, id = %item.id))]
    pub async fn add(&self, item: NewTrackedItem) {
        let mut items = self.items.write().await;
        if items.iter().any(|i| i.id == item.id) {
            return;
        }
        let now = self.clock.now();
        items.push(TrackedItem {
            id: item.id,
            word: item.word,
            definition: item.definition,
            audio_url: item.audio_url,
            date_marked: now,
            progress: 0,
            last_review_date: Some(now),
        });
        self.persist(&items).await;
    }

    #[instrument(level = "debug", skip(self), fields(key = %self.key, %id))]
    pub async fn remove(&self, id: &str) {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() != before {
            self.persist(&items).await;
        }
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.items.read().await.iter().any(|i| i.id == id)
    }

    /// Clamp to [0, 100], stamp the review date, persist.
    /// Silently does nothing for an untracked id.
    #[instrument(level = "debug", skip(self), fields(key = %self.key, %id, progress))]
    pub async fn update_progress(&self, id: &str, progress: i64) {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return;
        };
        item.progress = clamp_progress(progress);
        item.last_review_date = Some(self.clock.now());
        self.persist(&items).await;
    }

    /// Returns 0 for an untracked id; never fails.
    pub async fn get_progress(&self, id: &str) -> u8 {
        self.items
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.progress)
            .unwrap_or(0)
    }

    pub async fn mark_learned(&self, id: &str) {
        self.update_progress(id, 100).await;
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Snapshot for rendering layers.
    pub async fn items(&self) -> Vec<TrackedItem> {
        self.items.read().await.clone()
    }

    /// Number of persist attempts that failed since construction. The caller
    /// contract stays fire-and-forget; this keeps the silent path observable.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    async fn persist(&self, items: &[TrackedItem]) {
        let payload = match serde_json::to_string(items) {
            Ok(p) => p,
            Err(e) => {
                error!(target: "tracker", key = %self.key, error = %e, "collection not serializable");
                self.persist_failures.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &payload).await {
            error!(target: "tracker", key = %self.key, error = %e, "persist failed; in-memory state kept");
            self.persist_failures.fetch_add(1, Ordering::Relaxed);
        }
    }
}
