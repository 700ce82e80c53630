use serde::{Deserialize, Serialize};

/// A `#define` with continuation lines already joined
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroDef {
    pub name: String,

    /// Replacement text; empty for bare `#define NAME`
    pub value: String,
}

impl MacroDef {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A macro found in a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroEntity {
    pub def: MacroDef,

    /// Line of the `#define` (1-indexed)
    pub line: usize,
}
