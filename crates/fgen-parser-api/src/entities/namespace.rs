use serde::{Deserialize, Serialize};

/// A namespace block found in a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceEntity {
    /// Namespace name; empty for anonymous namespaces
    pub name: String,

    /// Names of the enclosing namespaces, outermost first
    pub scope_path: Vec<String>,

    /// Line of the `namespace` keyword (1-indexed)
    pub line: usize,
}

impl NamespaceEntity {
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}
