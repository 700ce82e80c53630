//! Public entry point: listener registry plus file and source parsing

use fgen_parser_api::{HeaderListener, ParserConfig, ParserError, ParserMetrics, ParserResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::preprocessor::preprocess;
use crate::tracer::EventTracer;
use crate::visitor::HeaderVisitor;

/// Handle returned by [`CppHeaderParser::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

pub(crate) struct RegisteredListener<'l> {
    pub id: ListenerId,
    pub listener: Box<dyn HeaderListener + 'l>,
}

/// Result of one completed parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    /// Physical lines in the input
    pub line_count: usize,

    /// Constructs reported to listeners
    pub constructs: usize,

    /// Scopes still open when input ran out; zero for a well-formed header
    pub unclosed_scopes: usize,

    pub parse_time: Duration,
}

/// Line-oriented C++ header parser
///
/// Listeners are called synchronously, in registration order, while
/// [`parse_file`](Self::parse_file) or [`parse_source`](Self::parse_source)
/// runs. Unless disabled by [`ParserConfig::install_tracer`], an
/// [`EventTracer`] is registered first.
///
/// ```rust
/// use fgen_cpp::CppHeaderParser;
/// use fgen_parser_api::{ClassKey, HeaderListener, ParseState, ParserConfig, TemplateParams};
///
/// #[derive(Default)]
/// struct Classes(Vec<String>);
///
/// impl HeaderListener for Classes {
///     fn on_class(&mut self, _: &ParseState<'_>, _: Option<&TemplateParams>, _: ClassKey, name: &str) {
///         self.0.push(name.to_string());
///     }
/// }
///
/// let mut classes = Classes::default();
/// let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
/// parser.add_listener(&mut classes);
/// parser.parse_source("namespace n { class A { }; struct B { }; }").unwrap();
/// drop(parser);
/// assert_eq!(classes.0, ["A", "B"]);
/// ```
pub struct CppHeaderParser<'l> {
    config: ParserConfig,
    listeners: Vec<RegisteredListener<'l>>,
    next_id: usize,
    metrics: ParserMetrics,
}

impl<'l> CppHeaderParser<'l> {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        let mut parser = Self {
            config,
            listeners: Vec::new(),
            next_id: 0,
            metrics: ParserMetrics::default(),
        };
        if parser.config.install_tracer {
            parser.add_listener(EventTracer);
        }
        parser
    }

    /// Register a listener; pass `&mut listener` to keep ownership
    pub fn add_listener<L: HeaderListener + 'l>(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(RegisteredListener {
            id,
            listener: Box::new(listener),
        });
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn HeaderListener + 'l>> {
        let idx = self.listeners.iter().position(|r| r.id == id)?;
        Some(self.listeners.remove(idx).listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn file_extensions(&self) -> &[&str] {
        &[".h", ".hpp", ".hh", ".hxx"]
    }

    pub fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.file_extensions()
                    .iter()
                    .any(|known| known.trim_start_matches('.') == ext)
            })
    }

    /// Read and parse a header from disk
    pub fn parse_file(&mut self, path: &Path) -> ParserResult<ParseSummary> {
        let metadata =
            fs::metadata(path).map_err(|e| ParserError::IoError(path.to_path_buf(), e))?;

        if metadata.len() as usize > self.config.max_file_size {
            return Err(ParserError::FileTooLarge(
                path.to_path_buf(),
                metadata.len() as usize,
            ));
        }

        let source =
            fs::read_to_string(path).map_err(|e| ParserError::IoError(path.to_path_buf(), e))?;
        debug!("Parsing header {}", path.display());
        self.parse_source(&source)
    }

    /// Parse header text already in memory
    pub fn parse_source(&mut self, source: &str) -> ParserResult<ParseSummary> {
        let start = Instant::now();
        let lines = preprocess(source);
        let outcome = HeaderVisitor::new(lines, &mut self.listeners).run()?;

        let parse_time = start.elapsed();
        let mut run = outcome.metrics;
        run.files_parsed = 1;
        run.total_parse_time = parse_time;
        self.metrics.merge(&run);

        debug!(
            "Parsed {} construct(s) in {:?} ({} merge(s), {} discarded)",
            outcome.constructs, parse_time, run.line_merges, run.fragments_discarded
        );
        Ok(ParseSummary {
            line_count: source.lines().count(),
            constructs: outcome.constructs,
            unclosed_scopes: outcome.unclosed_scopes,
            parse_time,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Metrics accumulated over every successful parse
    pub fn metrics(&self) -> ParserMetrics {
        self.metrics.clone()
    }

    pub fn reset_metrics(&mut self) {
        self.metrics = ParserMetrics::default();
    }
}

impl Default for CppHeaderParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}
