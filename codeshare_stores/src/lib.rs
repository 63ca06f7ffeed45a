mod http;
mod memory;

pub use http::HttpSnippetStore;
pub use memory::MemorySnippetStore;
