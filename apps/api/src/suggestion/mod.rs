// AI suggestions: request a rewrite, preview it against the original, then
// apply or discard it. All model calls go through llm_client via service.rs.

pub mod controller;
pub mod handlers;
pub mod lock;
pub mod prompts;
pub mod sanitizer;
pub mod service;
pub mod store;

pub use service::SuggestionError;
