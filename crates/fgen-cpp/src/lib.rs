//! C++ header parser for fgen
//!
//! This crate reads a C++ header line by line and reports what it recognizes
//! (macros, namespaces, classes, enums, functions, constructors and
//! destructors) to registered [`HeaderListener`](fgen_parser_api::HeaderListener)s.
//! It is a pattern-driven recognizer rather than a full C++ front end: text
//! it cannot place is merged with the following line and retried.
//!
//! Code generators built on the event stream live in [`generators`].
//!
//! # Example
//!
//! ```rust
//! use fgen_cpp::{extract, ImplementationSkeleton, CppHeaderParser};
//! use fgen_parser_api::ParserConfig;
//! use std::path::Path;
//!
//! let source = r#"
//!     namespace shapes {
//!     class Square {
//!     public:
//!         explicit Square(double side);
//!         double area() const;
//!     };
//!     }
//! "#;
//!
//! let ir = extract(source, &ParserConfig::quiet()).unwrap();
//! assert_eq!(ir.classes[0].qualified_name, "shapes::Square");
//!
//! let mut skeleton = ImplementationSkeleton::new(Path::new("square.h"));
//! let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
//! parser.add_listener(&mut skeleton);
//! parser.parse_source(source).unwrap();
//! drop(parser);
//! assert!(skeleton.finish().contains("double Square::area() const"));
//! ```

mod extractor;
pub mod generators;
mod grammar;
mod line_queue;
mod parser_impl;
mod preprocessor;
mod tracer;
mod visitor;

pub use extractor::{extract, extract_file, HeaderCollector};
pub use generators::{
    insert_doc_comments, DocKind, DocTarget, DocTargets, GenerateError, GenerateResult,
    ImplementationSkeleton, UnitTestScaffold,
};
pub use line_queue::SourceLine;
pub use parser_impl::{CppHeaderParser, ListenerId, ParseSummary};
pub use preprocessor::preprocess;
pub use tracer::EventTracer;
