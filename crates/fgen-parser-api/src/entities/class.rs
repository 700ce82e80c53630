use super::signature::TemplateParams;
use crate::scope::AccessLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword that introduced a class scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKey {
    Class,
    Struct,
}

impl ClassKey {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            _ => None,
        }
    }

    /// Access level of members declared before any access specifier
    pub fn default_access(self) -> AccessLevel {
        match self {
            Self::Class => AccessLevel::Private,
            Self::Struct => AccessLevel::Public,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
        }
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class or struct found in a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntity {
    /// Class name
    pub name: String,

    /// Name qualified with enclosing namespaces and classes (`ns::Outer::Inner`)
    pub qualified_name: String,

    /// `class` or `struct`
    pub key: ClassKey,

    /// Template prefix, for class templates
    pub template: Option<TemplateParams>,

    /// Access level in effect where the class was declared (nested classes only)
    pub declared_access: Option<AccessLevel>,

    /// Line of the class head (1-indexed)
    pub line: usize,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>, key: ClassKey, line: usize) -> Self {
        let name = name.into();
        Self {
            qualified_name: name.clone(),
            name,
            key,
            template: None,
            declared_access: None,
            line,
        }
    }

    pub fn with_qualified_name(mut self, qualified: impl Into<String>) -> Self {
        self.qualified_name = qualified.into();
        self
    }

    pub fn with_template(mut self, template: TemplateParams) -> Self {
        self.template = Some(template);
        self
    }

    pub fn is_template(&self) -> bool {
        self.template.is_some()
    }

    pub fn is_struct(&self) -> bool {
        self.key == ClassKey::Struct
    }
}
