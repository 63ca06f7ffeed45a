use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use codeshare_api::SnippetLink;
use codeshare_store_api::{SnippetDraft, SnippetStore, StoreError, StoreResult};

/// Store that keeps snippets in process memory and performs no external calls.
#[derive(Debug, Default)]
pub struct MemorySnippetStore {
    counter: AtomicU64,
    snippets: Mutex<Vec<(String, SnippetDraft)>>,
}

impl MemorySnippetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored snippet by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<SnippetDraft> {
        let snippets = self.snippets.lock().ok()?;
        snippets
            .iter()
            .find(|(stored, _)| stored == id)
            .map(|(_, draft)| draft.clone())
    }

    /// Number of snippets stored so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snippets.lock().map_or(0, |snippets| snippets.len())
    }

    /// Returns true when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnippetStore for MemorySnippetStore {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn create(&self, draft: &SnippetDraft) -> StoreResult<SnippetLink> {
        if draft.code.trim().is_empty() {
            return Err(StoreError::Rejected {
                status: 400,
                message: "code is required".into(),
            });
        }

        let id = format!("local-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1);
        self.snippets
            .lock()
            .map_err(|_| StoreError::transport("memory store lock poisoned"))?
            .push((id.clone(), draft.clone()));
        Ok(SnippetLink::new(id))
    }
}
