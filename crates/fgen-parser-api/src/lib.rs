//! fgen Parser API
//!
//! Shared types for the fgen C++ header parser and the code generators that
//! listen to it.
//!
//! This crate defines:
//!
//! - **Scope model**: the stack of open namespaces, classes, function bodies
//!   and anonymous blocks, and the grammar context derived from it
//! - **Payload types**: template parameter lists, type expressions,
//!   parameters, function signatures, enums and macros
//! - **HeaderListener trait**: the event contract with no-op defaults
//! - **Assembler**: canonical text for types, parameter lists and templates
//! - **HeaderIR**: a flat record of one parsed header
//! - **Configuration, metrics and errors**
//!
//! # Example
//!
//! ```rust
//! use fgen_parser_api::{ClassKey, HeaderListener, ParseState, TemplateParams};
//!
//! struct ClassPrinter;
//!
//! impl HeaderListener for ClassPrinter {
//!     fn on_class(
//!         &mut self,
//!         state: &ParseState<'_>,
//!         _template: Option<&TemplateParams>,
//!         key: ClassKey,
//!         name: &str,
//!     ) {
//!         println!("{key} {name} at line {}", state.current_line_number());
//!     }
//! }
//! ```

pub mod assembler;
pub mod config;
pub mod entities;
pub mod errors;
pub mod ir;
pub mod metrics;
pub mod scope;
pub mod traits;


// Re-export commonly used types
pub use assembler::{assemble_param_list, assemble_template, assemble_type};
pub use config::ParserConfig;
pub use entities::{
    ClassEntity, ClassKey, DeclSpecifier, EnumDecl, EnumEntity, FunctionEntity, FunctionKind,
    FunctionSignature, MacroDef, MacroEntity, NamespaceEntity, Parameter, TemplateParams,
    TypeExpr, TypeFragment,
};
pub use errors::{ParserError, ParserResult};
pub use ir::HeaderIR;
pub use metrics::ParserMetrics;
pub use scope::{AccessLevel, ClassScope, Context, Scope, ScopeKind, ScopeStack};
pub use traits::{HeaderListener, ParseState};
