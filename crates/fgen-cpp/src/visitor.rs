//! Dispatch loop and scope state machine

use fgen_parser_api::{
    ClassScope, EnumDecl, HeaderListener, MacroDef, ParseState, ParserError, ParserMetrics,
    ParserResult, Scope, ScopeStack,
};
use log::{trace, warn};

use crate::grammar::{self, enums, Construct, RuleInput};
use crate::line_queue::{LineQueue, SourceLine};
use crate::parser_impl::RegisteredListener;

/// What one run of the dispatch loop produced
#[derive(Debug, Clone, Default)]
pub(crate) struct VisitOutcome {
    pub constructs: usize,
    pub unclosed_scopes: usize,
    pub metrics: ParserMetrics,
}

/// Owns the line queue and scope stack for the lifetime of one parse
pub(crate) struct HeaderVisitor<'v, 'l> {
    listeners: &'v mut [RegisteredListener<'l>],
    queue: LineQueue,
    scopes: ScopeStack,
    line_number: usize,
    constructs: usize,
    metrics: ParserMetrics,
}

impl<'v, 'l> HeaderVisitor<'v, 'l> {
    pub fn new(lines: Vec<SourceLine>, listeners: &'v mut [RegisteredListener<'l>]) -> Self {
        let metrics = ParserMetrics {
            lines_read: lines.len(),
            ..Default::default()
        };
        Self {
            listeners,
            queue: LineQueue::from(lines),
            scopes: ScopeStack::new(),
            line_number: 0,
            constructs: 0,
            metrics,
        }
    }

    /// Call `event` on every listener, in registration order
    fn emit(&mut self, mut event: impl FnMut(&mut (dyn HeaderListener + 'l), &ParseState<'_>)) {
        let state = ParseState::new(&self.scopes, self.line_number);
        for registered in self.listeners.iter_mut() {
            event(registered.listener.as_mut(), &state);
        }
    }

    /// Drain the queue; a structural error aborts without `on_post_parse`
    pub fn run(mut self) -> ParserResult<VisitOutcome> {
        self.emit(|l, s| l.on_pre_parse(s));

        let mut current: Option<(usize, String)> = None;
        while let Some(line) = self.queue.pop_front() {
            if current.as_ref().map(|(number, _)| *number) != Some(line.number) {
                if let Some((_, text)) = current.take() {
                    self.emit(|l, s| l.on_post_line(s, &text));
                }
                self.line_number = line.number;
                let text = line.text.clone();
                self.emit(|l, s| l.on_pre_line(s, &text));
                current = Some((line.number, text));
            }
            self.step(line)?;
        }
        if let Some((_, text)) = current.take() {
            self.emit(|l, s| l.on_post_line(s, &text));
        }

        if !self.scopes.is_empty() {
            warn!(
                "Input ended with {} open scope(s), innermost {:?}",
                self.scopes.len(),
                self.scopes.top().map(Scope::kind)
            );
        }
        self.emit(|l, s| l.on_post_parse(s));

        self.metrics.constructs_recognized = self.constructs;
        Ok(VisitOutcome {
            constructs: self.constructs,
            unclosed_scopes: self.scopes.len(),
            metrics: self.metrics,
        })
    }

    fn step(&mut self, line: SourceLine) -> ParserResult<()> {
        self.metrics.fragments_dispatched += 1;

        let context = self.scopes.current_context();
        let matched = grammar::dispatch(
            context,
            &RuleInput {
                text: &line.text,
                class_name: self
                    .scopes
                    .top()
                    .and_then(Scope::as_class)
                    .map(|class| class.name.as_str()),
            },
        );

        let Some(matched) = matched else {
            self.merge_unmatched(line);
            return Ok(());
        };
        trace!("Line {}: {} rule matched", line.number, matched.kind);

        match matched.construct {
            Construct::Enum => {
                self.parse_enum(line);
                return Ok(());
            }
            Construct::Macro { name, value } => self.on_macro(name, value),
            Construct::Directive | Construct::Statement => {}
            Construct::Access(level) => {
                if let Some(class) = self.scopes.top_mut().and_then(Scope::as_class_mut) {
                    class.access = level;
                }
            }
            Construct::Linkage { block } => {
                if block {
                    self.scopes.push(Scope::linkage());
                }
            }
            Construct::Namespace(name) => {
                self.constructs += 1;
                self.emit(|l, s| l.on_namespace(s, &name));
                self.scopes.push(Scope::namespace(name));
            }
            Construct::Class(head) => {
                self.constructs += 1;
                self.emit(|l, s| l.on_class(s, head.template.as_ref(), head.key, &head.name));
                let mut class = ClassScope::new(head.name, head.key);
                class.template = head.template;
                self.scopes.push(Scope::class(class));
            }
            Construct::Function {
                signature,
                terminated,
            } => {
                self.constructs += 1;
                if terminated {
                    self.emit(|l, s| l.on_function_decl(s, &signature));
                } else {
                    self.emit(|l, s| l.on_function_def(s, &signature));
                    self.scopes.push(Scope::function(signature.name));
                }
            }
            Construct::Constructor {
                name,
                params,
                terminated,
            } => {
                self.constructs += 1;
                if terminated {
                    self.emit(|l, s| l.on_ctor_decl(s, &name, &params));
                } else {
                    self.emit(|l, s| l.on_ctor_def(s, &name, &params));
                    self.scopes.push(Scope::function(name));
                }
            }
            Construct::Destructor { name, terminated } => {
                self.constructs += 1;
                if terminated {
                    self.emit(|l, s| l.on_dtor_decl(s, &name));
                } else {
                    self.emit(|l, s| l.on_dtor_def(s, &name));
                    self.scopes.push(Scope::function(name));
                }
            }
            Construct::OpenBrace => self.open_brace(),
            Construct::CloseBrace => self.close_brace(line.number)?,
        }

        if self.queue.requeue(line.number, &line.text[matched.consumed..]) {
            trace!("Line {}: requeued remainder", line.number);
        }
        Ok(())
    }

    /// Join continuation lines while the value ends with a backslash
    fn on_macro(&mut self, name: String, mut value: String) {
        while value.ends_with('\\') {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            value.pop();
            value.push_str(next.text.trim_end());
        }
        self.constructs += 1;
        let def = MacroDef::new(name, value);
        self.emit(|l, s| l.on_macro(s, &def));
    }

    fn open_brace(&mut self) {
        if self.scopes.top().map_or(true, Scope::is_opened) {
            self.scopes.push(Scope::Skip);
            return;
        }
        let Some(scope) = self.scopes.top_mut() else {
            return;
        };
        scope.mark_opened();

        match scope.clone() {
            Scope::Namespace { name, .. } => self.emit(|l, s| l.on_namespace_start(s, &name)),
            Scope::Class(class) | Scope::TemplateClass(class) => {
                self.emit(|l, s| l.on_class_start(s, &class.name))
            }
            Scope::Function { .. } | Scope::Linkage { .. } | Scope::Skip => {}
        }
    }

    fn close_brace(&mut self, line: usize) -> ParserResult<()> {
        // a head whose body never arrived cannot own this brace
        while let Some(scope) = self.scopes.top().filter(|scope| !scope.is_opened()) {
            trace!("Line {}: dropping unopened {} scope", line, scope.kind());
            self.scopes.pop();
        }

        let Some(top) = self.scopes.top().cloned() else {
            return Err(ParserError::UnbalancedBrace { line });
        };
        match &top {
            Scope::Namespace { name, .. } => self.emit(|l, s| l.on_namespace_end(s, name)),
            Scope::Class(class) | Scope::TemplateClass(class) => {
                self.emit(|l, s| l.on_class_end(s, &class.name))
            }
            Scope::Function { .. } | Scope::Linkage { .. } | Scope::Skip => {}
        }
        self.scopes.pop();
        Ok(())
    }

    /// Merge lines eagerly until the enum body is complete
    fn parse_enum(&mut self, line: SourceLine) {
        let number = line.number;
        let mut text = line.text;
        loop {
            if let Some((decl, consumed)) = enums::parse_enum(&text) {
                self.report_enum(decl);
                self.queue.requeue(number, &text[consumed..]);
                return;
            }
            if let Some(end) = enums::statement_end(&text) {
                trace!("Line {}: skipping enum statement without a body", number);
                self.queue.requeue(number, &text[end..]);
                return;
            }
            match self.queue.pop_front() {
                Some(next) => {
                    self.metrics.line_merges += 1;
                    text = format!("{} {}", text, next.text);
                }
                None => {
                    warn!("Line {}: discarding unterminated enum at end of input", number);
                    self.metrics.fragments_discarded += 1;
                    return;
                }
            }
        }
    }

    fn report_enum(&mut self, decl: EnumDecl) {
        self.constructs += 1;
        self.emit(|l, s| l.on_enum(s, &decl));
    }

    fn merge_unmatched(&mut self, line: SourceLine) {
        if self.queue.merge_with_next(line.number, &line.text) {
            self.metrics.line_merges += 1;
            trace!("Line {}: no rule matched, merged with next line", line.number);
        } else {
            self.metrics.fragments_discarded += 1;
            warn!(
                "Line {}: discarding unmatched text at end of input: {}",
                line.number, line.text
            );
        }
    }
}
