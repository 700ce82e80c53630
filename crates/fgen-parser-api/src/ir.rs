use crate::entities::{
    ClassEntity, EnumEntity, FunctionEntity, FunctionKind, MacroEntity, NamespaceEntity,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Flat record of everything the parser reported for one header
///
/// This is what a collecting listener builds; generators that need a
/// whole-file view work from it instead of from live events.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderIR {
    /// Source file path, when parsed from disk
    pub file_path: Option<PathBuf>,

    pub macros: Vec<MacroEntity>,

    pub namespaces: Vec<NamespaceEntity>,

    pub classes: Vec<ClassEntity>,

    pub enums: Vec<EnumEntity>,

    /// Functions, constructors and destructors in source order
    pub functions: Vec<FunctionEntity>,
}

impl HeaderIR {
    /// Create a new empty IR
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            ..Default::default()
        }
    }

    /// Total number of entities
    pub fn entity_count(&self) -> usize {
        self.macros.len()
            + self.namespaces.len()
            + self.classes.len()
            + self.enums.len()
            + self.functions.len()
    }

    pub fn class(&self, qualified_name: &str) -> Option<&ClassEntity> {
        self.classes
            .iter()
            .find(|class| class.qualified_name == qualified_name)
    }

    pub fn function(&self, qualified_name: &str) -> Option<&FunctionEntity> {
        self.functions
            .iter()
            .find(|function| function.qualified_name() == qualified_name)
    }

    pub fn functions_of_kind(&self, kind: FunctionKind) -> impl Iterator<Item = &FunctionEntity> {
        self.functions
            .iter()
            .filter(move |function| function.kind == kind)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &FunctionEntity> {
        self.functions.iter().filter(|function| !function.is_definition)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &FunctionEntity> {
        self.functions.iter().filter(|function| function.is_definition)
    }
}
