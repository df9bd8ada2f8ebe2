//! Diagram type registry
//!
//! Each diagram type carries a fixed prompt template that steers the LLM
//! toward the right PlantUML dialect features. Keys arriving over the wire
//! are resolved with a silent fallback to the default type - an unknown key
//! never errors.

use serde::{Deserialize, Serialize};

/// The diagram kinds the generator knows how to prompt for.
///
/// The `Software*`/`Hardware*` family covers the domain-scoped design flows;
/// the bare variants are the generic UML kinds offered by the chat picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramType {
    SoftwareSequence,
    SoftwareEr,
    SoftwareActivity,
    SoftwareClass,
    SoftwareFlowchart,
    HardwareSequence,
    Class,
    Sequence,
    Usecase,
    Activity,
    State,
    Component,
}

impl DiagramType {
    /// Fallback for unregistered keys
    pub const DEFAULT: DiagramType = DiagramType::Class;

    /// Every registered type, in wire-key order
    pub const ALL: [DiagramType; 12] = [
        Self::SoftwareSequence,
        Self::SoftwareEr,
        Self::SoftwareActivity,
        Self::SoftwareClass,
        Self::SoftwareFlowchart,
        Self::HardwareSequence,
        Self::Class,
        Self::Sequence,
        Self::Usecase,
        Self::Activity,
        Self::State,
        Self::Component,
    ];

    /// Exact lookup by wire key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "software_sequence" => Some(Self::SoftwareSequence),
            "software_er" => Some(Self::SoftwareEr),
            "software_activity" => Some(Self::SoftwareActivity),
            "software_class" => Some(Self::SoftwareClass),
            "software_flowchart" => Some(Self::SoftwareFlowchart),
            "hardware_sequence" => Some(Self::HardwareSequence),
            "class" => Some(Self::Class),
            "sequence" => Some(Self::Sequence),
            "usecase" => Some(Self::Usecase),
            "activity" => Some(Self::Activity),
            "state" => Some(Self::State),
            "component" => Some(Self::Component),
            _ => None,
        }
    }

    /// Lookup with silent fallback to [`DiagramType::DEFAULT`]
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or(Self::DEFAULT)
    }

    /// Wire key, as sent by the UI
    pub fn key(&self) -> &'static str {
        match self {
            Self::SoftwareSequence => "software_sequence",
            Self::SoftwareEr => "software_er",
            Self::SoftwareActivity => "software_activity",
            Self::SoftwareClass => "software_class",
            Self::SoftwareFlowchart => "software_flowchart",
            Self::HardwareSequence => "hardware_sequence",
            Self::Class => "class",
            Self::Sequence => "sequence",
            Self::Usecase => "usecase",
            Self::Activity => "activity",
            Self::State => "state",
            Self::Component => "component",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::SoftwareSequence => "Software Sequence Diagram",
            Self::SoftwareEr => "Software ER Diagram",
            Self::SoftwareActivity => "Software Activity Diagram",
            Self::SoftwareClass => "Software Class Diagram",
            Self::SoftwareFlowchart => "Software Flowchart",
            Self::HardwareSequence => "Hardware Sequence Diagram",
            Self::Class => "Class Diagram",
            Self::Sequence => "Sequence Diagram",
            Self::Usecase => "Use Case Diagram",
            Self::Activity => "Activity Diagram",
            Self::State => "State Diagram",
            Self::Component => "Component Diagram",
        }
    }

    /// The instructional prefix sent to the LLM for this diagram type.
    ///
    /// Templates are immutable and end with a `Description: ` lead-in that
    /// the user's text is appended to.
    pub fn prompt_template(&self) -> &'static str {
        match self {
            Self::SoftwareSequence => include_str!("prompts/software_sequence.md"),
            Self::SoftwareEr => include_str!("prompts/software_er.md"),
            Self::SoftwareActivity => include_str!("prompts/software_activity.md"),
            Self::SoftwareClass => include_str!("prompts/software_class.md"),
            Self::SoftwareFlowchart => include_str!("prompts/software_flowchart.md"),
            Self::HardwareSequence => include_str!("prompts/hardware_sequence.md"),
            Self::Class => include_str!("prompts/class.md"),
            Self::Sequence => include_str!("prompts/sequence.md"),
            Self::Usecase => include_str!("prompts/usecase.md"),
            Self::Activity => include_str!("prompts/activity.md"),
            Self::State => include_str!("prompts/state.md"),
            Self::Component => include_str!("prompts/component.md"),
        }
    }
}

impl std::fmt::Display for DiagramType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
