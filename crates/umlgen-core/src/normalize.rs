//! Response normalization
//!
//! LLMs wrap diagram source in markdown fences, prepend commentary, or drop
//! the document delimiters entirely. `normalize` turns any non-empty raw
//! completion into a document that starts with `@startuml`, ends with
//! `@enduml` and carries no residual fences.

use serde::{Deserialize, Serialize};

/// Opening delimiter of a PlantUML document
pub const START_MARKER: &str = "@startuml";
/// Closing delimiter of a PlantUML document
pub const END_MARKER: &str = "@enduml";

const FENCE: &str = "```";
const FENCE_TAG: &str = "plantuml";

/// A normalized PlantUML source document.
///
/// Only produced by [`normalize`], so the delimiter invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagramDocument(String);

impl DiagramDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DiagramDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw LLM completion into a well-formed PlantUML document.
///
/// Pure function: trims, strips every code fence wherever it occurs (the
/// model sometimes nests the fenced block inside its own commentary), then
/// guarantees the start/end markers. A whitespace-only completion yields the
/// degenerate two-marker document.
pub fn normalize(raw: &str) -> DiagramDocument {
    let stripped = strip_fences(raw.trim());
    let mut code = stripped.trim().to_string();

    if !code.starts_with(START_MARKER) {
        code = format!("{START_MARKER}\n{code}");
    }
    if !code.ends_with(END_MARKER) {
        code.push('\n');
        code.push_str(END_MARKER);
    }

    DiagramDocument(code)
}

/// Remove every ``` fence, its optional `plantuml` language tag, and one
/// following newline - not just at the text boundaries.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if let Some(after_tag) = rest.strip_prefix(FENCE_TAG) {
            rest = after_tag;
        }
        if let Some(after_newline) = rest.strip_prefix('\n') {
            rest = after_newline;
        }
    }

    out.push_str(rest);
    out
}
