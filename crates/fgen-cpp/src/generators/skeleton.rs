use fgen_parser_api::{FunctionSignature, HeaderListener, ParseState, Parameter};
use std::path::Path;

use super::{class_prefix, include_name};

/// Renders an implementation file with empty bodies for every declaration
///
/// Members of class templates are skipped since their bodies belong in the
/// header, and so are pure virtual, defaulted and deleted functions.
#[derive(Debug)]
pub struct ImplementationSkeleton {
    header: String,
    out: String,
}

impl ImplementationSkeleton {
    pub fn new(header: &Path) -> Self {
        Self {
            header: include_name(header),
            out: String::new(),
        }
    }

    /// Text rendered so far
    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write_body(&mut self, state: &ParseState<'_>, name: &str, params: &str, is_const: bool) {
        self.out.push_str(&class_prefix(state.scopes()));
        self.out.push_str(name);
        self.out.push('(');
        self.out.push_str(params);
        self.out.push(')');
        if is_const {
            self.out.push_str(" const");
        }
        self.out.push_str("\n{\n}\n\n");
    }
}

impl HeaderListener for ImplementationSkeleton {
    fn on_pre_parse(&mut self, _state: &ParseState<'_>) {
        self.out.push_str(&format!("#include \"{}\"\n\n", self.header));
    }

    fn on_namespace(&mut self, _state: &ParseState<'_>, name: &str) {
        if name.is_empty() {
            self.out.push_str("namespace\n");
        } else {
            self.out.push_str(&format!("namespace {name}\n"));
        }
    }

    fn on_namespace_start(&mut self, _state: &ParseState<'_>, _name: &str) {
        self.out.push_str("{\n\n");
    }

    fn on_namespace_end(&mut self, _state: &ParseState<'_>, _name: &str) {
        self.out.push_str("}\n");
    }

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        if state.is_inside_template_class() || !function.needs_body() {
            return;
        }
        if let Some(template) = &function.template {
            self.out.push_str(&format!("{template}\n"));
        }
        if let Some(ret) = &function.return_type {
            self.out.push_str(&format!("{ret} "));
        }
        self.write_body(state, &function.name, &function.param_list(), function.is_const);
    }

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, name: &str, params: &[Parameter]) {
        if state.is_inside_template_class() {
            return;
        }
        let params = fgen_parser_api::assemble_param_list(params);
        self.write_body(state, name, &params, false);
    }

    fn on_dtor_decl(&mut self, state: &ParseState<'_>, name: &str) {
        if state.is_inside_template_class() {
            return;
        }
        self.write_body(state, name, "", false);
    }
}
