//! Error taxonomy for diagram generation
//!
//! Every failure is recovered at the request boundary; callers map variants
//! to HTTP status codes. Nothing here aborts the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Missing description or diagram type on the inbound request.
    /// No external call is attempted.
    #[error("description and diagram type are required")]
    InvalidInput,

    /// The generation credential is absent or unusable, detected before any
    /// external call is made.
    #[error("generation service not configured: {0}")]
    Configuration(String),

    /// The external generation call failed. Carries the upstream message for
    /// diagnostic display; never retried automatically.
    #[error("failed to generate diagram: {0}")]
    GenerationFailed(String),
}
