pub mod class;
pub mod enum_;
pub mod function;
pub mod macro_def;
pub mod namespace;
pub mod signature;

pub use class::{ClassEntity, ClassKey};
pub use enum_::{EnumDecl, EnumEntity};
pub use function::{FunctionEntity, FunctionKind};
pub use macro_def::{MacroDef, MacroEntity};
pub use namespace::NamespaceEntity;
pub use signature::{
    DeclSpecifier, FunctionSignature, Parameter, TemplateParams, TypeExpr, TypeFragment,
};
