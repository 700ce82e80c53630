//! Scope stack and the context classification derived from it

use crate::entities::{ClassKey, TemplateParams};
use serde::{Deserialize, Serialize};
use std::fmt;

/// C++ member access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
}

impl AccessLevel {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a class or class-template frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassScope {
    pub name: String,
    pub key: ClassKey,
    pub template: Option<TemplateParams>,

    /// Access level applied to the next member
    pub access: AccessLevel,

    opened: bool,
}

impl ClassScope {
    pub fn new(name: impl Into<String>, key: ClassKey) -> Self {
        Self {
            name: name.into(),
            key,
            template: None,
            access: key.default_access(),
            opened: false,
        }
    }

    pub fn with_template(mut self, template: TemplateParams) -> Self {
        self.template = Some(template);
        self
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }
}

/// One frame of the scope stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// `namespace N`, name empty when anonymous
    Namespace { name: String, opened: bool },
    Class(ClassScope),
    TemplateClass(ClassScope),
    /// Function, constructor or destructor body
    Function { name: String, opened: bool },
    /// `extern "C" { ... }`; declarations inside belong to the enclosing scope
    Linkage { opened: bool },
    /// Anonymous nested braces; only tracks depth
    Skip,
}

/// Tag of a [`Scope`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Namespace,
    Class,
    TemplateClass,
    Function,
    Linkage,
    Skip,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::TemplateClass => "template class",
            Self::Function => "function",
            Self::Linkage => "linkage",
            Self::Skip => "skip",
        })
    }
}

impl Scope {
    pub fn namespace(name: impl Into<String>) -> Self {
        Self::Namespace {
            name: name.into(),
            opened: false,
        }
    }

    /// Class frame; a template prefix makes it a class-template frame
    pub fn class(class: ClassScope) -> Self {
        if class.template.is_some() {
            Self::TemplateClass(class)
        } else {
            Self::Class(class)
        }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::Function {
            name: name.into(),
            opened: false,
        }
    }

    pub fn linkage() -> Self {
        Self::Linkage { opened: false }
    }

    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Namespace { .. } => ScopeKind::Namespace,
            Self::Class(_) => ScopeKind::Class,
            Self::TemplateClass(_) => ScopeKind::TemplateClass,
            Self::Function { .. } => ScopeKind::Function,
            Self::Linkage { .. } => ScopeKind::Linkage,
            Self::Skip => ScopeKind::Skip,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Namespace { name, .. } | Self::Function { name, .. } => Some(name.as_str()),
            Self::Class(class) | Self::TemplateClass(class) => Some(class.name.as_str()),
            Self::Linkage { .. } | Self::Skip => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassScope> {
        match self {
            Self::Class(class) | Self::TemplateClass(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassScope> {
        match self {
            Self::Class(class) | Self::TemplateClass(class) => Some(class),
            _ => None,
        }
    }

    /// Access level, meaningful only for class frames
    pub fn access(&self) -> Option<AccessLevel> {
        self.as_class().map(|class| class.access)
    }

    /// Whether the opening brace has been consumed; skip frames are born open
    pub fn is_opened(&self) -> bool {
        match self {
            Self::Namespace { opened, .. }
            | Self::Function { opened, .. }
            | Self::Linkage { opened } => *opened,
            Self::Class(class) | Self::TemplateClass(class) => class.opened,
            Self::Skip => true,
        }
    }

    pub fn mark_opened(&mut self) {
        match self {
            Self::Namespace { opened, .. }
            | Self::Function { opened, .. }
            | Self::Linkage { opened } => *opened = true,
            Self::Class(class) | Self::TemplateClass(class) => class.opened = true,
            Self::Skip => {}
        }
    }
}

/// Grammar eligibility class of the innermost scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Namespace,
    Class,
    Function,
    Skip,
}

/// Stack of open scopes, innermost last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeStack {
    frames: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.frames.push(scope);
    }

    /// Pop the innermost frame; `None` means the input closed more scopes than it opened
    pub fn pop(&mut self) -> Option<Scope> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&Scope> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Scope> {
        self.frames.last_mut()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Scope] {
        &self.frames
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Scope> {
        self.frames.iter()
    }

    /// Context of the innermost frame; linkage blocks are transparent
    pub fn current_context(&self) -> Context {
        let innermost = self
            .frames
            .iter()
            .rev()
            .find(|scope| !matches!(scope, Scope::Linkage { .. }));
        match innermost {
            None | Some(Scope::Namespace { .. }) => Context::Namespace,
            Some(Scope::Class(_)) | Some(Scope::TemplateClass(_)) => Context::Class,
            Some(Scope::Function { .. }) => Context::Function,
            Some(Scope::Skip) => Context::Skip,
            Some(Scope::Linkage { .. }) => unreachable!("linkage frames are filtered out above"),
        }
    }

    pub fn is_inside_template_class(&self) -> bool {
        self.frames
            .iter()
            .any(|scope| matches!(scope, Scope::TemplateClass(_)))
    }

    pub fn innermost_class(&self) -> Option<&ClassScope> {
        self.frames.iter().rev().find_map(Scope::as_class)
    }

    /// True when every enclosing class currently grants public access
    pub fn is_publicly_reachable(&self) -> bool {
        self.frames
            .iter()
            .filter_map(Scope::as_class)
            .all(|class| class.access == AccessLevel::Public)
    }

    /// Names of enclosing namespaces and classes, outermost first
    ///
    /// Anonymous namespaces, functions, linkage blocks and skip frames are
    /// left out.
    pub fn qualifier_path(&self) -> Vec<String> {
        self.frames
            .iter()
            .filter_map(|scope| match scope {
                Scope::Namespace { name, .. } if !name.is_empty() => Some(name.clone()),
                Scope::Class(class) | Scope::TemplateClass(class) => Some(class.name.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack_is_namespace_context() {
        let stack = ScopeStack::new();
        assert_eq!(stack.current_context(), Context::Namespace);
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_template_class_collapses_to_class_context() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::class(
            ClassScope::new("Box", ClassKey::Class).with_template(TemplateParams::new(["T"])),
        ));
        assert_eq!(stack.top().map(Scope::kind), Some(ScopeKind::TemplateClass));
        assert_eq!(stack.current_context(), Context::Class);
        assert!(stack.is_inside_template_class());
    }

    #[test]
    fn test_function_and_skip_contexts() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::namespace("n"));
        assert_eq!(stack.current_context(), Context::Namespace);
        stack.push(Scope::function("f"));
        assert_eq!(stack.current_context(), Context::Function);
        stack.push(Scope::Skip);
        assert_eq!(stack.current_context(), Context::Skip);
    }

    #[test]
    fn test_linkage_block_is_transparent() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::linkage());
        assert_eq!(stack.current_context(), Context::Namespace);
        assert!(!stack.top().is_some_and(Scope::is_opened));

        stack.push(Scope::namespace("n"));
        stack.push(Scope::class(ClassScope::new("C", ClassKey::Struct)));
        stack.push(Scope::linkage());
        assert_eq!(stack.current_context(), Context::Class);
        assert_eq!(stack.qualifier_path(), vec!["n", "C"]);
        assert_eq!(stack.top().map(Scope::kind), Some(ScopeKind::Linkage));
    }

    #[test]
    fn test_struct_defaults_to_public() {
        let class = ClassScope::new("S", ClassKey::Struct);
        assert_eq!(class.access, AccessLevel::Public);
        let class = ClassScope::new("C", ClassKey::Class);
        assert_eq!(class.access, AccessLevel::Private);
    }

    #[test]
    fn test_pop_empty_returns_none() {
        let mut stack = ScopeStack::new();
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_skip_is_born_open() {
        let mut ns = Scope::namespace("n");
        assert!(!ns.is_opened());
        ns.mark_opened();
        assert!(ns.is_opened());
        assert!(Scope::Skip.is_opened());
    }

    #[test]
    fn test_qualifier_path_skips_anonymous_and_functions() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::namespace("outer"));
        stack.push(Scope::namespace(""));
        stack.push(Scope::class(ClassScope::new("C", ClassKey::Class)));
        stack.push(Scope::function("f"));
        assert_eq!(stack.qualifier_path(), vec!["outer", "C"]);
    }

    #[test]
    fn test_publicly_reachable() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::class(ClassScope::new("S", ClassKey::Struct)));
        assert!(stack.is_publicly_reachable());
        stack.push(Scope::class(ClassScope::new("C", ClassKey::Class)));
        assert!(!stack.is_publicly_reachable());
        if let Some(class) = stack.top_mut().and_then(Scope::as_class_mut) {
            class.access = AccessLevel::Public;
        }
        assert!(stack.is_publicly_reachable());
    }
}
