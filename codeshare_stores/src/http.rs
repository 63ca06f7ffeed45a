use std::time::Duration;

use codeshare_api::SnippetLink;
use codeshare_store_api::{
    ShareFailure, ShareReceipt, SnippetDraft, SnippetStore, StoreError, StoreResult,
};
use reqwest::blocking::Client;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SHARE_ENDPOINT: &str = "api/share";
const FALLBACK_REJECTION: &str = "failed to create snippet on server";

/// Snippet store reached over HTTP at `{base}/api/share`.
#[derive(Debug, Clone)]
pub struct HttpSnippetStore {
    client: Client,
    endpoint: String,
}

impl HttpSnippetStore {
    /// Build a store client for the given service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Build a store client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] when the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("codeshare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| StoreError::transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/{SHARE_ENDPOINT}", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL snippets are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SnippetStore for HttpSnippetStore {
    fn id(&self) -> &'static str {
        "http"
    }

    fn create(&self, draft: &SnippetDraft) -> StoreResult<SnippetLink> {
        log::debug!(
            "posting {} byte {} snippet to {}",
            draft.code.len(),
            draft.language,
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(draft)
            .send()
            .map_err(|err| StoreError::transport(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| StoreError::transport(format!("failed to read response: {err}")))?;

        interpret_response(status, &body)
    }
}

fn interpret_response(status: u16, body: &str) -> StoreResult<SnippetLink> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ShareFailure>(body)
            .ok()
            .and_then(|failure| failure.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_REJECTION.to_string());
        return Err(StoreError::Rejected { status, message });
    }

    let receipt: ShareReceipt =
        serde_json::from_str(body).map_err(|err| StoreError::InvalidResponse {
            message: err.to_string(),
        })?;

    let id = receipt.id.trim();
    if id.is_empty() {
        return Err(StoreError::InvalidResponse {
            message: "snippet id is empty".into(),
        });
    }
    // The id is pasted into the link path verbatim.
    if id
        .chars()
        .any(|ch| ch.is_whitespace() || matches!(ch, '/' | '?' | '#'))
    {
        return Err(StoreError::InvalidResponse {
            message: format!("snippet id {id:?} is not URL-safe"),
        });
    }

    Ok(SnippetLink::new(id))
}
