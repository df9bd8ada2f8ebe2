//! LLM-powered PlantUML generation
//!
//! This crate turns a natural-language description into a rendered diagram
//! link. It owns no rendering or parsing - PlantUML source comes from an
//! external LLM and the image from the public PlantUML server.
//!
//! ## Architecture
//!
//! ```text
//! Description + DiagramType → prompt → LlmClient → normalize → render URL
//! ```
//!
//! The LLM client is an injected dependency so tests can substitute a
//! scripted implementation.

pub mod error;
pub mod gemini_client;
pub mod generator;
pub mod llm_client;

// Re-exports for convenience
pub use error::GenerateError;
pub use gemini_client::GeminiClient;
pub use generator::{DiagramGenerator, RenderResult};
pub use llm_client::LlmClient;
