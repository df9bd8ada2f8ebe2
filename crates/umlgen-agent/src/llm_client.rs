//! LLM client abstraction
//!
//! Provider-agnostic seam between the generator and the external
//! text-generation service.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Request a single completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier sent to the provider
    fn model_name(&self) -> &str;

    /// Provider name for logs and diagnostics
    fn provider_name(&self) -> &str;
}
