//! Progress store for streaming story runs.

use kahovitz_interface::{ProgressSink, ProgressUpdate, SessionStatus};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, info};

struct SessionEntry {
    progress: ProgressUpdate,
    touched: Instant,
    task: Option<AbortHandle>,
}

/// Session id to latest progress, for runs streamed over SSE.
///
/// Entries are created when a streaming run is accepted, updated by the run,
/// and removed when a consumer reads a terminal state, the consumer
/// disconnects, or the entry sits idle longer than the TTL.
///
/// # Examples
///
/// ```
/// use kahovitz_interface::{ProgressUpdate, SessionStatus};
/// use kahovitz_server::SessionStore;
/// use std::time::Duration;
///
/// let store = SessionStore::new(Duration::from_secs(900));
/// let id = store.create();
/// store.update(&id, ProgressUpdate::new(SessionStatus::Generating, 40, "Turn 8/20"));
/// assert_eq!(*store.get(&id).unwrap().progress(), 40);
/// assert!(store.take_if_finished(&id).is_none());
/// ```
pub struct SessionStore {
    entries: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionStore {
    /// Empty store whose idle entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Register a new session in the `starting` state and return its id.
    pub fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let entry = SessionEntry {
            progress: ProgressUpdate::new(SessionStatus::Starting, 0, "Session created"),
            touched: Instant::now(),
            task: None,
        };
        self.entries.write().insert(id.clone(), entry);
        debug!(session = %id, "Session created");
        id
    }

    /// Record progress. Returns `false` for an unknown id.
    pub fn update(&self, id: &str, progress: ProgressUpdate) -> bool {
        match self.entries.write().get_mut(id) {
            Some(entry) => {
                entry.progress = progress;
                entry.touched = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Latest progress for a session.
    pub fn get(&self, id: &str) -> Option<ProgressUpdate> {
        self.entries.read().get(id).map(|e| e.progress.clone())
    }

    /// Remove a session, leaving its task running.
    pub fn remove(&self, id: &str) -> Option<ProgressUpdate> {
        self.entries.write().remove(id).map(|e| e.progress)
    }

    /// Remove and return a session only if it reached `complete` or `failed`.
    pub fn take_if_finished(&self, id: &str) -> Option<ProgressUpdate> {
        let mut entries = self.entries.write();
        if entries.get(id)?.progress.status().is_terminal() {
            entries.remove(id).map(|e| e.progress)
        } else {
            None
        }
    }

    /// Remember the task producing a session's progress.
    ///
    /// If the session is already gone the task is aborted and `false` returned.
    pub fn attach_task(&self, id: &str, task: AbortHandle) -> bool {
        match self.entries.write().get_mut(id) {
            Some(entry) => {
                entry.task = Some(task);
                true
            }
            None => {
                task.abort();
                false
            }
        }
    }

    /// Remove a session and abort its task.
    pub fn cancel(&self, id: &str) -> bool {
        let removed = self.entries.write().remove(id);
        match removed {
            Some(entry) => {
                if let Some(task) = entry.task {
                    if !entry.progress.status().is_terminal() {
                        info!(session = %id, "Aborting story run");
                    }
                    task.abort();
                }
                true
            }
            None => false,
        }
    }

    /// Number of tracked sessions.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no session is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop sessions idle longer than the TTL, aborting their tasks.
    pub fn sweep(&self) -> usize {
        let ttl = self.ttl;
        let mut entries = self.entries.write();
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, e)| e.touched.elapsed() > ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            if let Some(task) = entries.remove(id).and_then(|e| e.task) {
                task.abort();
            }
        }

        if !expired.is_empty() {
            info!(expired = expired.len(), "Swept abandoned sessions");
        }
        expired.len()
    }

    /// Sweep every `every` until the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match store.upgrade() {
                    Some(store) => {
                        store.sweep();
                    }
                    None => break,
                }
            }
        })
    }
}

/// Progress sink writing into one session.
#[derive(Debug, Clone)]
pub struct SessionSink {
    store: Arc<SessionStore>,
    id: String,
}

impl SessionSink {
    /// Sink for session `id`.
    pub fn new(store: Arc<SessionStore>, id: impl Into<String>) -> Self {
        Self {
            store,
            id: id.into(),
        }
    }
}

impl ProgressSink for SessionSink {
    fn report(&self, update: ProgressUpdate) {
        if !self.store.update(&self.id, update) {
            debug!(session = %self.id, "Progress for removed session dropped");
        }
    }
}
