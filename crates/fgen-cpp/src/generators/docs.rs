//! Documentation comment insertion
//!
//! [`DocTargets`] records where documentable constructs start while the
//! header is parsed; [`insert_doc_comments`] then writes `///` summary blocks
//! above those lines in the original text.

use fgen_parser_api::{
    ClassKey, EnumDecl, FunctionSignature, HeaderListener, ParseState, Parameter, TemplateParams,
    TypeExpr,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocKind {
    Class,
    Enum,
    Function {
        returns_value: bool,
        params: Vec<String>,
    },
    Constructor {
        params: Vec<String>,
    },
    Destructor,
}

/// A construct to document, by its 1-based line in the original file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTarget {
    pub line: usize,
    #[serde(flatten)]
    pub kind: DocKind,
}

/// Listener collecting [`DocTarget`]s in source order
#[derive(Debug, Default)]
pub struct DocTargets {
    targets: Vec<DocTarget>,
}

impl DocTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> &[DocTarget] {
        &self.targets
    }

    pub fn into_targets(self) -> Vec<DocTarget> {
        self.targets
    }

    fn push(&mut self, state: &ParseState<'_>, kind: DocKind) {
        self.targets.push(DocTarget {
            line: state.current_line_number(),
            kind,
        });
    }

    fn push_function(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        let returns_value = !function.return_type.as_ref().is_some_and(TypeExpr::is_void);
        self.push(
            state,
            DocKind::Function {
                returns_value,
                params: param_names(&function.params),
            },
        );
    }
}

fn param_names(params: &[Parameter]) -> Vec<String> {
    params.iter().filter_map(|param| param.name.clone()).collect()
}

impl HeaderListener for DocTargets {
    fn on_class(
        &mut self,
        state: &ParseState<'_>,
        _template: Option<&TemplateParams>,
        _key: ClassKey,
        _name: &str,
    ) {
        self.push(state, DocKind::Class);
    }

    fn on_enum(&mut self, state: &ParseState<'_>, _decl: &EnumDecl) {
        self.push(state, DocKind::Enum);
    }

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        self.push_function(state, function);
    }

    fn on_function_def(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        self.push_function(state, function);
    }

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, _name: &str, params: &[Parameter]) {
        self.push(state, DocKind::Constructor { params: param_names(params) });
    }

    fn on_ctor_def(&mut self, state: &ParseState<'_>, _name: &str, params: &[Parameter]) {
        self.push(state, DocKind::Constructor { params: param_names(params) });
    }

    fn on_dtor_decl(&mut self, state: &ParseState<'_>, _name: &str) {
        self.push(state, DocKind::Destructor);
    }

    fn on_dtor_def(&mut self, state: &ParseState<'_>, _name: &str) {
        self.push(state, DocKind::Destructor);
    }
}

fn write_doc(out: &mut String, indent: &str, kind: &DocKind) {
    let mut line = |text: &str| {
        out.push_str(indent);
        out.push_str("/// ");
        out.push_str(text);
        out.push('\n');
    };
    line("<summary>");
    line("</summary>");

    let (params, returns_value): (&[String], bool) = match kind {
        DocKind::Function {
            returns_value,
            params,
        } => (params, *returns_value),
        DocKind::Constructor { params } => (params, false),
        _ => (&[], false),
    };
    for param in params {
        line(&format!("<param name=\"{param}\"></param>"));
    }
    if returns_value {
        line("<returns></returns>");
    }
}

/// Insert a summary block above every target line
///
/// Only the first target on a line is documented. Lines already preceded by
/// a `///` or `/** */` comment, or starting with one, are left alone. Each
/// block takes the indentation of the line it documents.
pub fn insert_doc_comments(source: &str, targets: &[DocTarget]) -> String {
    let mut by_line: BTreeMap<usize, &DocKind> = BTreeMap::new();
    for target in targets {
        by_line.entry(target.line).or_insert(&target.kind);
    }

    let mut out = String::with_capacity(source.len() + targets.len() * 64);
    let mut documented = false;
    let mut in_doc_block = false;

    for (idx, line) in source.split_inclusive('\n').enumerate() {
        let trimmed = line.trim();
        let is_doc_line = trimmed.starts_with("///") || trimmed.starts_with("/**");

        if let Some(kind) = by_line.get(&(idx + 1)) {
            if !documented && !in_doc_block && !is_doc_line {
                let indent = &line[..line.len() - line.trim_start().len()];
                write_doc(&mut out, indent, kind);
            }
        }
        out.push_str(line);

        if trimmed.is_empty() {
            continue;
        }
        if in_doc_block {
            if trimmed.contains("*/") {
                in_doc_block = false;
                documented = true;
            }
        } else if trimmed.starts_with("///") {
            documented = true;
        } else if let Some(rest) = trimmed.strip_prefix("/**") {
            in_doc_block = !rest.contains("*/");
            documented = !in_doc_block;
        } else {
            documented = false;
        }
    }

    out
}
