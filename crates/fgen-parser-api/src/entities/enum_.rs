use serde::{Deserialize, Serialize};

/// An enum body as reported to listeners; member values are not kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumDecl {
    /// Enum name, absent for anonymous enums
    pub name: Option<String>,

    /// Member identifiers in declaration order
    pub members: Vec<String>,
}

impl EnumDecl {
    pub fn new<I, S>(name: Option<&str>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.map(str::to_string),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// An enum found in a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntity {
    pub decl: EnumDecl,

    /// Names of the enclosing namespaces and classes, outermost first
    pub scope_path: Vec<String>,

    /// Line the enum keyword appeared on (1-indexed)
    pub line: usize,
}
