use crate::entities::{ClassKey, EnumDecl, FunctionSignature, MacroDef, Parameter, TemplateParams};
use crate::scope::ScopeStack;

/// Read-only view of the parser handed to every listener callback
///
/// Carries the scope stack as it stands when the event fires and the
/// original line number of the fragment being dispatched.
#[derive(Debug, Clone, Copy)]
pub struct ParseState<'a> {
    scopes: &'a ScopeStack,
    line_number: usize,
}

impl<'a> ParseState<'a> {
    pub fn new(scopes: &'a ScopeStack, line_number: usize) -> Self {
        Self {
            scopes,
            line_number,
        }
    }

    pub fn scopes(&self) -> &'a ScopeStack {
        self.scopes
    }

    /// 1-based line number in the original file; 0 before the first line
    pub fn current_line_number(&self) -> usize {
        self.line_number
    }

    pub fn is_inside_template_class(&self) -> bool {
        self.scopes.is_inside_template_class()
    }
}

/// Observer of structural events emitted while a header is parsed
///
/// Every method has a no-op default; implement only the ones you need.
/// Callbacks run synchronously in registration order.
///
/// # Event order
/// `on_namespace`/`on_class` fire before the scope is pushed, the
/// `*_start` events after its opening brace has been consumed and the
/// `*_end` events before the scope is popped. `on_function_def`,
/// `on_ctor_def` and `on_dtor_def` fire before the body scope is pushed.
///
/// # Example
/// ```rust
/// use fgen_parser_api::{FunctionSignature, HeaderListener, ParseState};
///
/// #[derive(Default)]
/// struct FunctionNames(Vec<String>);
///
/// impl HeaderListener for FunctionNames {
///     fn on_function_decl(&mut self, _state: &ParseState<'_>, function: &FunctionSignature) {
///         self.0.push(function.name.clone());
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait HeaderListener {
    fn on_pre_parse(&mut self, state: &ParseState<'_>) {}

    fn on_post_parse(&mut self, state: &ParseState<'_>) {}

    /// A new original input line is about to be dispatched
    fn on_pre_line(&mut self, state: &ParseState<'_>, line: &str) {}

    /// Every fragment of the original line has been dispatched
    fn on_post_line(&mut self, state: &ParseState<'_>, line: &str) {}

    fn on_macro(&mut self, state: &ParseState<'_>, macro_def: &MacroDef) {}

    fn on_namespace(&mut self, state: &ParseState<'_>, name: &str) {}

    fn on_namespace_start(&mut self, state: &ParseState<'_>, name: &str) {}

    fn on_namespace_end(&mut self, state: &ParseState<'_>, name: &str) {}

    fn on_class(
        &mut self,
        state: &ParseState<'_>,
        template: Option<&TemplateParams>,
        key: ClassKey,
        name: &str,
    ) {
    }

    fn on_class_start(&mut self, state: &ParseState<'_>, name: &str) {}

    fn on_class_end(&mut self, state: &ParseState<'_>, name: &str) {}

    fn on_enum(&mut self, state: &ParseState<'_>, decl: &EnumDecl) {}

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {}

    fn on_function_def(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {}

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, name: &str, params: &[Parameter]) {}

    fn on_ctor_def(&mut self, state: &ParseState<'_>, name: &str, params: &[Parameter]) {}

    fn on_dtor_decl(&mut self, state: &ParseState<'_>, name: &str) {}

    fn on_dtor_def(&mut self, state: &ParseState<'_>, name: &str) {}
}

/// Lets a parser borrow a listener the caller keeps ownership of
impl<L: HeaderListener + ?Sized> HeaderListener for &mut L {
    fn on_pre_parse(&mut self, state: &ParseState<'_>) {
        (**self).on_pre_parse(state)
    }

    fn on_post_parse(&mut self, state: &ParseState<'_>) {
        (**self).on_post_parse(state)
    }

    fn on_pre_line(&mut self, state: &ParseState<'_>, line: &str) {
        (**self).on_pre_line(state, line)
    }

    fn on_post_line(&mut self, state: &ParseState<'_>, line: &str) {
        (**self).on_post_line(state, line)
    }

    fn on_macro(&mut self, state: &ParseState<'_>, macro_def: &MacroDef) {
        (**self).on_macro(state, macro_def)
    }

    fn on_namespace(&mut self, state: &ParseState<'_>, name: &str) {
        (**self).on_namespace(state, name)
    }

    fn on_namespace_start(&mut self, state: &ParseState<'_>, name: &str) {
        (**self).on_namespace_start(state, name)
    }

    fn on_namespace_end(&mut self, state: &ParseState<'_>, name: &str) {
        (**self).on_namespace_end(state, name)
    }

    fn on_class(
        &mut self,
        state: &ParseState<'_>,
        template: Option<&TemplateParams>,
        key: ClassKey,
        name: &str,
    ) {
        (**self).on_class(state, template, key, name)
    }

    fn on_class_start(&mut self, state: &ParseState<'_>, name: &str) {
        (**self).on_class_start(state, name)
    }

    fn on_class_end(&mut self, state: &ParseState<'_>, name: &str) {
        (**self).on_class_end(state, name)
    }

    fn on_enum(&mut self, state: &ParseState<'_>, decl: &EnumDecl) {
        (**self).on_enum(state, decl)
    }

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        (**self).on_function_decl(state, function)
    }

    fn on_function_def(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        (**self).on_function_def(state, function)
    }

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, name: &str, params: &[Parameter]) {
        (**self).on_ctor_decl(state, name, params)
    }

    fn on_ctor_def(&mut self, state: &ParseState<'_>, name: &str, params: &[Parameter]) {
        (**self).on_ctor_def(state, name, params)
    }

    fn on_dtor_decl(&mut self, state: &ParseState<'_>, name: &str) {
        (**self).on_dtor_decl(state, name)
    }

    fn on_dtor_def(&mut self, state: &ParseState<'_>, name: &str) {
        (**self).on_dtor_def(state, name)
    }
}
