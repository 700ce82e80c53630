//! Code generators driven by parser events
//!
//! Each generator is a [`HeaderListener`](fgen_parser_api::HeaderListener)
//! that renders text as events arrive. Policies such as skipping members of
//! class templates live here, not in the engine.

pub mod docs;
pub mod skeleton;
pub mod unittest;

use fgen_parser_api::ScopeStack;
use std::path::Path;
use thiserror::Error;

pub use docs::{insert_doc_comments, DocKind, DocTarget, DocTargets};
pub use skeleton::ImplementationSkeleton;
pub use unittest::UnitTestScaffold;

/// Failures detected by a generator's own bookkeeping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// A class ended that was not the one the generator had open
    #[error("Mismatched class names: expected end of {expected}, found {found}")]
    ClassMismatch { expected: String, found: String },
}

/// Result type for generator output
pub type GenerateResult<T> = Result<T, GenerateError>;

/// File name used in `#include "..."` lines
fn include_name(header: &Path) -> String {
    header
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `Outer::Inner::` for the enclosing classes, empty at namespace scope
fn class_prefix(scopes: &ScopeStack) -> String {
    scopes
        .iter()
        .filter_map(|scope| scope.as_class())
        .map(|class| format!("{}::", class.name))
        .collect()
}
