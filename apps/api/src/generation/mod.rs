// Content generation: prompt construction, orchestration and the AI endpoints.
// All model calls go through llm_client::TextGenerator.

pub mod handlers;
pub mod orchestrator;
pub mod prompt_builder;
pub mod prompts;
