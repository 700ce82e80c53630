//! Default listener that logs every structural event

use fgen_parser_api::{
    ClassKey, EnumDecl, FunctionSignature, HeaderListener, MacroDef, ParseState, Parameter,
    TemplateParams,
};
use log::debug;

/// Logs structural events at `debug` level
///
/// Installed ahead of user listeners unless the parser is configured
/// without it.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventTracer;

impl HeaderListener for EventTracer {
    fn on_pre_parse(&mut self, _state: &ParseState<'_>) {
        debug!("Parsing started...");
    }

    fn on_post_parse(&mut self, _state: &ParseState<'_>) {
        debug!("Parsing finished...");
    }

    fn on_macro(&mut self, state: &ParseState<'_>, macro_def: &MacroDef) {
        debug!("[{}] Parsing macro {}...", state.current_line_number(), macro_def.name);
    }

    fn on_namespace(&mut self, state: &ParseState<'_>, name: &str) {
        debug!("[{}] Parsing namespace {}...", state.current_line_number(), name);
    }

    fn on_namespace_end(&mut self, state: &ParseState<'_>, name: &str) {
        debug!("[{}] Finished parsing namespace {}...", state.current_line_number(), name);
    }

    fn on_class(
        &mut self,
        state: &ParseState<'_>,
        template: Option<&TemplateParams>,
        key: ClassKey,
        name: &str,
    ) {
        match template {
            Some(template) => debug!(
                "[{}] Parsing {} {} {}...",
                state.current_line_number(),
                template,
                key,
                name
            ),
            None => debug!("[{}] Parsing {} {}...", state.current_line_number(), key, name),
        }
    }

    fn on_class_end(&mut self, state: &ParseState<'_>, name: &str) {
        debug!("[{}] Finished parsing class {}...", state.current_line_number(), name);
    }

    fn on_enum(&mut self, state: &ParseState<'_>, decl: &EnumDecl) {
        debug!(
            "[{}] Parsing enum {}...",
            state.current_line_number(),
            decl.name.as_deref().unwrap_or("<anonymous>")
        );
    }

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        debug!("[{}] Parsing function {}...", state.current_line_number(), function);
    }

    fn on_function_def(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        debug!("[{}] Parsing function {}...", state.current_line_number(), function);
    }

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, name: &str, _params: &[Parameter]) {
        debug!("[{}] Parsing constructor {}...", state.current_line_number(), name);
    }

    fn on_ctor_def(&mut self, state: &ParseState<'_>, name: &str, _params: &[Parameter]) {
        debug!("[{}] Parsing constructor {}...", state.current_line_number(), name);
    }

    fn on_dtor_decl(&mut self, state: &ParseState<'_>, name: &str) {
        debug!("[{}] Parsing destructor {}...", state.current_line_number(), name);
    }

    fn on_dtor_def(&mut self, state: &ParseState<'_>, name: &str) {
        debug!("[{}] Parsing destructor {}...", state.current_line_number(), name);
    }
}
