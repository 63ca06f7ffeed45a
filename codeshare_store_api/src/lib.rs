mod types;

pub use types::{ShareFailure, ShareReceipt, SnippetDraft, StoreError, StoreResult};

use codeshare_api::SnippetLink;

/// Trait implemented by backends that persist snippets for fallback links.
pub trait SnippetStore: Send + Sync {
    /// Stable identifier used for logging.
    fn id(&self) -> &'static str;

    /// Store a snippet and return the link payload identifying it.
    ///
    /// # Errors
    ///
    /// Implementors should surface transport failures and server-side
    /// rejections as [`StoreError`].
    fn create(&self, draft: &SnippetDraft) -> StoreResult<SnippetLink>;
}
