//! Prompt composition
//!
//! The final prompt is template + user description + a strict output-format
//! instruction, so the model returns PlantUML source and nothing else.

use crate::diagram_type::DiagramType;

/// Trailing instruction appended to every prompt
const OUTPUT_INSTRUCTION: &str = "\n\nPlease return ONLY the PlantUML code without any additional \
explanation or markdown formatting. The code should start with @startuml and end with @enduml.";

/// Compose the full prompt for one generation request.
pub fn compose_prompt(diagram_type: DiagramType, description: &str) -> String {
    format!(
        "{}{}{}",
        diagram_type.prompt_template(),
        description,
        OUTPUT_INSTRUCTION
    )
}
