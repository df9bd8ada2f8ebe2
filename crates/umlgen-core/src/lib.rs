//! Core PlantUML document handling for umlgen.
//!
//! This crate is pure - no network or file I/O. It owns the diagram-type
//! registry with its prompt templates, the normalization of raw LLM output
//! into well-formed PlantUML, and the encoding of a document into a render
//! URL against the public PlantUML server. LLM orchestration lives in
//! `umlgen-agent`.

pub mod diagram_type;
pub mod encode;
pub mod normalize;
pub mod prompt;

// Re-exports for convenience
pub use diagram_type::DiagramType;
pub use encode::{decode, encode, render_url, RENDER_HOST};
pub use normalize::{normalize, DiagramDocument, END_MARKER, START_MARKER};
pub use prompt::compose_prompt;
