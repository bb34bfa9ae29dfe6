// Resume analysis: text extraction, prompting, model reply cleanup.
// All model calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sanitizer;
pub mod service;
