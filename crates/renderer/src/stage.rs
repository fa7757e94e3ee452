//! The fixed order in which directives are applied to an element.

use faintly_dom::Node;

/// One step of the per-element pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Test,
    Repeat,
    Attributes,
    Content,
    Include,
    Unwrap,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Test => "test",
            Stage::Repeat => "repeat",
            Stage::Attributes => "attributes",
            Stage::Content => "content",
            Stage::Include => "include",
            Stage::Unwrap => "unwrap",
        }
    }
}

/// Every element runs through these stages, in this order.
pub const PIPELINE: [Stage; 6] = [
    Stage::Test,
    Stage::Repeat,
    Stage::Attributes,
    Stage::Content,
    Stage::Include,
    Stage::Unwrap,
];

/// What a stage decided about the element it ran on.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// Go on with the next stage.
    Continue,
    /// The element produces no output.
    Removed,
    /// The element is replaced by these already rendered nodes.
    Replaced(Vec<Node>),
    /// The element's children were produced by the stage and must not be
    /// walked again.
    Finalized,
}
