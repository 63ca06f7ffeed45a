mod bridge;
mod error;

pub use bridge::{
    decode_share_link, encode_share_link, encode_snippet_link, normalize_remote_url,
    resolve_link, select_remote, share_selection, FileLocation,
};
pub use error::CoreError;

#[allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::empty_line_after_doc_comments,
    clippy::missing_safety_doc
)]
mod scaffolding {
    use super::{
        decode_share_link, encode_share_link, encode_snippet_link, normalize_remote_url,
        resolve_link, select_remote, share_selection, CoreError, FileLocation,
    };
    use crate::{RemoteDescriptor, ShareLink, ShareRequest};

    uniffi::include_scaffolding!("codeshare_core");
}

pub use scaffolding::*;
