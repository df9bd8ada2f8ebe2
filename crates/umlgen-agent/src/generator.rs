//! Diagram generator
//!
//! Composes the prompt, makes one completion call, normalizes the response
//! and builds the render link. Stateless across calls: no caching, no retry,
//! every invocation is independent.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use umlgen_core::{compose_prompt, normalize, render_url, DiagramDocument, DiagramType};

use crate::error::GenerateError;
use crate::gemini_client::GeminiClient;
use crate::llm_client::LlmClient;

/// Outcome of one successful generation request. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    /// Normalized PlantUML source
    pub plant_uml_code: DiagramDocument,
    /// Absolute URL of the rendered image on the PlantUML server
    pub image_url: String,
    /// Resolved diagram type (after fallback)
    pub diagram_type: DiagramType,
}

/// PlantUML generator over an injected LLM client
pub struct DiagramGenerator {
    client: Arc<dyn LlmClient>,
}

impl DiagramGenerator {
    /// Create with a specific LLM client
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Create from environment variables (`GEMINI_API_KEY`, `GEMINI_MODEL`)
    pub fn from_env() -> Result<Self, GenerateError> {
        let client =
            GeminiClient::from_env().map_err(|e| GenerateError::Configuration(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Generate a diagram for `description`, steered by `diagram_type_key`.
    ///
    /// Unknown keys silently fall back to the generic class-diagram template.
    /// Empty input is rejected before any external call.
    pub async fn generate(
        &self,
        description: &str,
        diagram_type_key: &str,
    ) -> Result<RenderResult, GenerateError> {
        if description.trim().is_empty() || diagram_type_key.trim().is_empty() {
            return Err(GenerateError::InvalidInput);
        }

        let diagram_type = DiagramType::resolve(diagram_type_key);
        let prompt = compose_prompt(diagram_type, description);

        debug!(
            provider = self.client.provider_name(),
            model = self.client.model_name(),
            diagram_type = %diagram_type,
            "requesting diagram completion"
        );

        let raw = self
            .client
            .complete(&prompt)
            .await
            .map_err(|e| GenerateError::GenerationFailed(e.to_string()))?;

        let plant_uml_code = normalize(&raw);
        let image_url = render_url(&plant_uml_code);

        Ok(RenderResult {
            plant_uml_code,
            image_url,
            diagram_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;

    /// Scripted stand-in for the external service
    struct ScriptedClient {
        reply: Result<String, String>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedClient {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(anyhow!("{}", message)),
            }
        }

        fn model_name(&self) -> &str {
            "scripted"
        }

        fn provider_name(&self) -> &str {
            "Scripted"
        }
    }

    #[tokio::test]
    async fn test_empty_description_rejected_without_external_call() {
        let client = ScriptedClient::replying("@startuml\nA -> B\n@enduml");
        let generator = DiagramGenerator::with_client(client.clone());

        let err = generator.generate("", "class").await.unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInput));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_diagram_type_rejected_without_external_call() {
        let client = ScriptedClient::replying("@startuml\nA -> B\n@enduml");
        let generator = DiagramGenerator::with_client(client.clone());

        let err = generator.generate("a login flow", "  ").await.unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInput));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_service_failure_carries_upstream_message() {
        let client = ScriptedClient::failing("quota exceeded for project");
        let generator = DiagramGenerator::with_client(client.clone());

        let err = generator
            .generate("a login flow", "sequence")
            .await
            .unwrap_err();
        match err {
            GenerateError::GenerationFailed(message) => {
                assert!(message.contains("quota exceeded for project"));
            }
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_generation_normalizes_and_links() {
        let client = ScriptedClient::replying("```plantuml\nAlice -> Bob: login\n```");
        let generator = DiagramGenerator::with_client(client.clone());

        let result = generator
            .generate("a user logs in", "sequence")
            .await
            .unwrap();

        assert_eq!(
            result.plant_uml_code.as_str(),
            "@startuml\nAlice -> Bob: login\n@enduml"
        );
        assert!(result
            .image_url
            .starts_with("https://www.plantuml.com/plantuml/png/"));
        assert_eq!(result.diagram_type, DiagramType::Sequence);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prompt_contains_template_and_description() {
        let client = ScriptedClient::replying("@startuml\nA\n@enduml");
        let generator = DiagramGenerator::with_client(client.clone());

        generator
            .generate("an order pipeline", "activity")
            .await
            .unwrap();

        let prompt = client.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.starts_with(DiagramType::Activity.prompt_template()));
        assert!(prompt.contains("an order pipeline"));
        assert!(prompt.contains("start with @startuml and end with @enduml"));
    }

    #[tokio::test]
    async fn test_unknown_key_falls_back_to_class() {
        let client = ScriptedClient::replying("@startuml\nclass Foo\n@enduml");
        let generator = DiagramGenerator::with_client(client.clone());

        let result = generator
            .generate("an inventory model", "mindmap")
            .await
            .unwrap();
        assert_eq!(result.diagram_type, DiagramType::Class);
    }

    #[tokio::test]
    async fn test_empty_completion_yields_degenerate_document() {
        let client = ScriptedClient::replying("   \n");
        let generator = DiagramGenerator::with_client(client.clone());

        let result = generator.generate("anything", "state").await.unwrap();
        assert_eq!(result.plant_uml_code.as_str(), "@startuml\n\n@enduml");
    }
}
