//! Collect parser events into a [`HeaderIR`]

use fgen_parser_api::{
    ClassEntity, ClassKey, EnumDecl, EnumEntity, FunctionEntity, FunctionKind, FunctionSignature,
    HeaderIR, HeaderListener, MacroDef, MacroEntity, NamespaceEntity, ParseState, Parameter,
    ParserConfig, ParserResult, TemplateParams,
};
use std::path::Path;

use crate::parser_impl::CppHeaderParser;

/// Listener that records every construct in source order
#[derive(Debug, Default)]
pub struct HeaderCollector {
    ir: HeaderIR,
}

impl HeaderCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ir(&self) -> &HeaderIR {
        &self.ir
    }

    pub fn into_ir(self) -> HeaderIR {
        self.ir
    }

    fn push_function(
        &mut self,
        state: &ParseState<'_>,
        kind: FunctionKind,
        signature: FunctionSignature,
        is_definition: bool,
    ) {
        let scopes = state.scopes();
        let mut function = FunctionEntity::new(kind, signature, state.current_line_number());
        function.scope_path = scopes.qualifier_path();
        function.is_definition = is_definition;
        function.access = scopes.innermost_class().map(|class| class.access);
        function.in_template_class = state.is_inside_template_class();
        self.ir.functions.push(function);
    }
}

fn qualify(path: &[String], name: &str) -> String {
    path.iter()
        .map(String::as_str)
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join("::")
}

impl HeaderListener for HeaderCollector {
    fn on_macro(&mut self, state: &ParseState<'_>, macro_def: &MacroDef) {
        self.ir.macros.push(MacroEntity {
            def: macro_def.clone(),
            line: state.current_line_number(),
        });
    }

    fn on_namespace(&mut self, state: &ParseState<'_>, name: &str) {
        self.ir.namespaces.push(NamespaceEntity {
            name: name.to_string(),
            scope_path: state.scopes().qualifier_path(),
            line: state.current_line_number(),
        });
    }

    fn on_class(
        &mut self,
        state: &ParseState<'_>,
        template: Option<&TemplateParams>,
        key: ClassKey,
        name: &str,
    ) {
        let scopes = state.scopes();
        let mut class = ClassEntity::new(name, key, state.current_line_number())
            .with_qualified_name(qualify(&scopes.qualifier_path(), name));
        class.template = template.cloned();
        class.declared_access = scopes.innermost_class().map(|outer| outer.access);
        self.ir.classes.push(class);
    }

    fn on_enum(&mut self, state: &ParseState<'_>, decl: &EnumDecl) {
        self.ir.enums.push(EnumEntity {
            decl: decl.clone(),
            scope_path: state.scopes().qualifier_path(),
            line: state.current_line_number(),
        });
    }

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        self.push_function(state, FunctionKind::Function, function.clone(), false);
    }

    fn on_function_def(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        self.push_function(state, FunctionKind::Function, function.clone(), true);
    }

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, name: &str, params: &[Parameter]) {
        let signature = FunctionSignature::new(name).with_params(params.to_vec());
        self.push_function(state, FunctionKind::Constructor, signature, false);
    }

    fn on_ctor_def(&mut self, state: &ParseState<'_>, name: &str, params: &[Parameter]) {
        let signature = FunctionSignature::new(name).with_params(params.to_vec());
        self.push_function(state, FunctionKind::Constructor, signature, true);
    }

    fn on_dtor_decl(&mut self, state: &ParseState<'_>, name: &str) {
        self.push_function(state, FunctionKind::Destructor, FunctionSignature::new(name), false);
    }

    fn on_dtor_def(&mut self, state: &ParseState<'_>, name: &str) {
        self.push_function(state, FunctionKind::Destructor, FunctionSignature::new(name), true);
    }
}

/// Extract every construct from header source text
pub fn extract(source: &str, config: &ParserConfig) -> ParserResult<HeaderIR> {
    let mut collector = HeaderCollector::new();
    let mut parser = CppHeaderParser::with_config(config.clone());
    parser.add_listener(&mut collector);
    parser.parse_source(source)?;
    drop(parser);
    Ok(collector.into_ir())
}

/// Extract every construct from a header on disk
pub fn extract_file(path: &Path, config: &ParserConfig) -> ParserResult<HeaderIR> {
    let mut collector = HeaderCollector::new();
    let mut parser = CppHeaderParser::with_config(config.clone());
    parser.add_listener(&mut collector);
    parser.parse_file(path)?;
    drop(parser);

    let mut ir = collector.into_ir();
    ir.file_path = Some(path.to_path_buf());
    Ok(ir)
}
