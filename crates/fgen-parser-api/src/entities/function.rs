use super::signature::FunctionSignature;
use crate::scope::AccessLevel;
use serde::{Deserialize, Serialize};

/// Which grammar produced a function entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    Function,
    Constructor,
    Destructor,
}

/// A function, constructor or destructor declaration/definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntity {
    pub kind: FunctionKind,

    /// Extracted signature fields
    pub signature: FunctionSignature,

    /// Names of the enclosing namespaces and classes, outermost first
    pub scope_path: Vec<String>,

    /// `true` for a definition (has a body), `false` for a declaration
    pub is_definition: bool,

    /// Access level of the innermost enclosing class, if any
    pub access: Option<AccessLevel>,

    /// Declared somewhere inside a class template
    pub in_template_class: bool,

    /// Line the signature started on (1-indexed)
    pub line: usize,
}

impl FunctionEntity {
    pub fn new(kind: FunctionKind, signature: FunctionSignature, line: usize) -> Self {
        Self {
            kind,
            signature,
            scope_path: Vec::new(),
            is_definition: false,
            access: None,
            in_template_class: false,
            line,
        }
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    /// Name qualified with enclosing namespaces and classes
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = self.scope_path.iter().map(String::as_str).collect();
        parts.push(&self.signature.name);
        parts.join("::")
    }

    pub fn is_method(&self) -> bool {
        self.access.is_some()
    }
}
