use crate::assembler::{assemble_param_list, assemble_template, assemble_type};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names introduced by a `template <typename T, ...>` prefix
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateParams(pub Vec<String>);

impl TemplateParams {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TemplateParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&assemble_template(self))
    }
}

/// One piece of a type expression
///
/// Template arguments are kept as nested groups so that the assembler can
/// place the separating commas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFragment {
    Token(String),
    Group(TypeExpr),
}

/// A possibly nested type such as `const std::map<K, std::vector<V> >&`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeExpr {
    pub fragments: Vec<TypeFragment>,
}

impl TypeExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a flat expression from plain tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: tokens
                .into_iter()
                .map(|t| TypeFragment::Token(t.into()))
                .collect(),
        }
    }

    pub fn push_token(&mut self, token: impl Into<String>) {
        self.fragments.push(TypeFragment::Token(token.into()));
    }

    pub fn push_group(&mut self, group: TypeExpr) {
        self.fragments.push(TypeFragment::Group(group));
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// True for exactly `void` (not `void*`)
    pub fn is_void(&self) -> bool {
        matches!(self.fragments.as_slice(), [TypeFragment::Token(t)] if t == "void")
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&assemble_type(self))
    }
}

/// A function or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Declared type
    pub ty: TypeExpr,

    /// Parameter name, absent for unnamed parameters
    pub name: Option<String>,
}

impl Parameter {
    pub fn new(ty: TypeExpr) -> Self {
        Self { ty, name: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// `= 0`, `= default` or `= delete` after a member signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclSpecifier {
    PureVirtual,
    Defaulted,
    Deleted,
}

/// Structured fields of a function, operator, constructor or destructor
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Template prefix of a function template
    pub template: Option<TemplateParams>,

    /// Return type; absent for constructors, destructors and conversion operators
    pub return_type: Option<TypeExpr>,

    /// Function name, including `operator` or `~` where present
    pub name: String,

    /// Parameter list in declaration order
    pub params: Vec<Parameter>,

    /// Trailing `const` qualifier
    pub is_const: bool,

    /// Leading `static`
    pub is_static: bool,

    /// Leading `virtual`
    pub is_virtual: bool,

    /// Trailing `= 0` / `= default` / `= delete`
    pub specifier: Option<DeclSpecifier>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_return_type(mut self, ty: TypeExpr) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_params(mut self, params: Vec<Parameter>) -> Self {
        self.params = params;
        self
    }

    pub fn is_operator(&self) -> bool {
        self.name.starts_with("operator")
            && !self.name["operator".len()..]
                .starts_with(|c: char| c.is_alphanumeric() || c == '_')
    }

    pub fn is_pure_virtual(&self) -> bool {
        self.specifier == Some(DeclSpecifier::PureVirtual)
    }

    /// Whether a body could be written for this declaration
    pub fn needs_body(&self) -> bool {
        self.specifier.is_none()
    }

    /// True when the return type is missing or exactly `void`
    pub fn returns_void(&self) -> bool {
        self.return_type.as_ref().map_or(true, TypeExpr::is_void)
    }

    /// Canonical text of the parameter list, without parentheses
    pub fn param_list(&self) -> String {
        assemble_param_list(&self.params)
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(template) = &self.template {
            write!(f, "{template} ")?;
        }
        if let Some(ret) = &self.return_type {
            write!(f, "{ret} ")?;
        }
        write!(f, "{}({})", self.name, self.param_list())?;
        if self.is_const {
            f.write_str(" const")?;
        }
        Ok(())
    }
}
