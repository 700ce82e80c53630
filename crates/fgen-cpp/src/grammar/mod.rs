//! Context-gated grammar rules
//!
//! Rules are tried in a fixed priority order and the first one that is
//! eligible in the current context and recognizes the fragment wins. Later
//! rules are strictly more general than earlier ones, so the order itself
//! breaks ties (a parenthesized identifier inside a class is a constructor
//! only because no function rule claimed it first).

pub(crate) mod declarations;
pub(crate) mod enums;
pub(crate) mod lexer;

use fgen_parser_api::{AccessLevel, Context, FunctionSignature, Parameter};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use declarations::ClassHead;
use lexer::{tokenize, TokenKind};

static RE_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*define\s+(\w+)(.*)$").unwrap());

static RE_ACCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(public|protected|private)\s*:").unwrap());

static RE_LINKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^extern\s*"[^"]*"\s*"#).unwrap());

static RE_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:inline\s+)?namespace\b\s*([A-Za-z_]\w*(?:\s*::\s*[A-Za-z_]\w*)*)?").unwrap()
});

/// Rule identities, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RuleKind {
    Macro,
    Directive,
    AccessModifier,
    Linkage,
    Namespace,
    Class,
    Enum,
    CallOperator,
    Operator,
    Function,
    Destructor,
    Constructor,
    OpenBrace,
    CloseBrace,
    Statement,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Macro => "macro",
            Self::Directive => "directive",
            Self::AccessModifier => "access modifier",
            Self::Linkage => "linkage specification",
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Enum => "enum",
            Self::CallOperator => "call operator",
            Self::Operator => "operator",
            Self::Function => "function",
            Self::Destructor => "destructor",
            Self::Constructor => "constructor",
            Self::OpenBrace => "open brace",
            Self::CloseBrace => "close brace",
            Self::Statement => "statement",
        };
        f.write_str(name)
    }
}

/// Contexts in which a rule may fire
#[derive(Debug, Clone, Copy)]
pub(crate) enum Eligibility {
    All,
    Only(&'static [Context]),
}

impl Eligibility {
    pub fn allows(self, context: Context) -> bool {
        match self {
            Self::All => true,
            Self::Only(contexts) => contexts.contains(&context),
        }
    }
}

/// What a recognizer sees: the fragment and the innermost class name
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleInput<'a> {
    pub text: &'a str,
    pub class_name: Option<&'a str>,
}

/// Structured result of a matched rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Construct {
    /// `#define`; continuation lines are joined by the dispatcher
    Macro { name: String, value: String },
    /// Any other preprocessor line, discarded
    Directive,
    Access(AccessLevel),
    /// `extern "C"`; `block` when a braced declaration list follows
    Linkage { block: bool },
    Namespace(String),
    Class(ClassHead),
    /// `enum` keyword seen; the body is matched by the dispatcher's enum sub-parse
    Enum,
    Function {
        signature: FunctionSignature,
        terminated: bool,
    },
    Constructor {
        name: String,
        params: Vec<Parameter>,
        terminated: bool,
    },
    Destructor {
        name: String,
        terminated: bool,
    },
    OpenBrace,
    CloseBrace,
    /// A `;`-terminated statement, discarded
    Statement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleMatch {
    pub kind: RuleKind,
    pub construct: Construct,
    /// Bytes of the fragment consumed; the rest is requeued
    pub consumed: usize,
}

pub(crate) struct Rule {
    pub kind: RuleKind,
    pub eligibility: Eligibility,
    recognize: fn(&RuleInput<'_>) -> Option<(Construct, usize)>,
}

const DECLARATION_CONTEXTS: &[Context] = &[Context::Namespace, Context::Class];
const CLASS_CONTEXT: &[Context] = &[Context::Class];
const NAMESPACE_CONTEXT: &[Context] = &[Context::Namespace];

pub(crate) static RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::Macro,
        eligibility: Eligibility::All,
        recognize: recognize_macro,
    },
    Rule {
        kind: RuleKind::Directive,
        eligibility: Eligibility::All,
        recognize: recognize_directive,
    },
    Rule {
        kind: RuleKind::AccessModifier,
        eligibility: Eligibility::Only(CLASS_CONTEXT),
        recognize: recognize_access,
    },
    Rule {
        kind: RuleKind::Linkage,
        eligibility: Eligibility::Only(NAMESPACE_CONTEXT),
        recognize: recognize_linkage,
    },
    Rule {
        kind: RuleKind::Namespace,
        eligibility: Eligibility::Only(NAMESPACE_CONTEXT),
        recognize: recognize_namespace,
    },
    Rule {
        kind: RuleKind::Class,
        eligibility: Eligibility::Only(DECLARATION_CONTEXTS),
        recognize: |input| {
            declarations::recognize_class(input.text)
                .map(|(head, consumed)| (Construct::Class(head), consumed))
        },
    },
    Rule {
        kind: RuleKind::Enum,
        eligibility: Eligibility::Only(DECLARATION_CONTEXTS),
        recognize: |input| enums::starts_enum(input.text).then_some((Construct::Enum, 0)),
    },
    Rule {
        kind: RuleKind::CallOperator,
        eligibility: Eligibility::Only(DECLARATION_CONTEXTS),
        recognize: |input| declarations::recognize_call_operator(input.text).map(function),
    },
    Rule {
        kind: RuleKind::Operator,
        eligibility: Eligibility::Only(DECLARATION_CONTEXTS),
        recognize: |input| declarations::recognize_operator(input.text).map(function),
    },
    Rule {
        kind: RuleKind::Function,
        eligibility: Eligibility::Only(DECLARATION_CONTEXTS),
        recognize: |input| declarations::recognize_function(input.text).map(function),
    },
    Rule {
        kind: RuleKind::Destructor,
        eligibility: Eligibility::Only(CLASS_CONTEXT),
        recognize: |input| {
            declarations::recognize_destructor(input.text).map(|(dtor, consumed)| {
                (
                    Construct::Destructor {
                        name: dtor.name,
                        terminated: dtor.terminated,
                    },
                    consumed,
                )
            })
        },
    },
    Rule {
        kind: RuleKind::Constructor,
        eligibility: Eligibility::Only(CLASS_CONTEXT),
        recognize: |input| {
            let class_name = input.class_name?;
            declarations::recognize_constructor(input.text, class_name).map(|(ctor, consumed)| {
                (
                    Construct::Constructor {
                        name: ctor.name,
                        params: ctor.params,
                        terminated: ctor.terminated,
                    },
                    consumed,
                )
            })
        },
    },
    Rule {
        kind: RuleKind::OpenBrace,
        eligibility: Eligibility::All,
        recognize: |input| match first_delimiter(input.text) {
            Some(("{", end)) => Some((Construct::OpenBrace, end)),
            _ => None,
        },
    },
    Rule {
        kind: RuleKind::CloseBrace,
        eligibility: Eligibility::All,
        recognize: recognize_close_brace,
    },
    Rule {
        kind: RuleKind::Statement,
        eligibility: Eligibility::All,
        recognize: |input| match first_delimiter(input.text) {
            Some((";", end)) => Some((Construct::Statement, end)),
            _ => None,
        },
    },
];

fn function((sig, consumed): (declarations::Signature, usize)) -> (Construct, usize) {
    (
        Construct::Function {
            signature: sig.signature,
            terminated: sig.terminated,
        },
        consumed,
    )
}

fn recognize_macro(input: &RuleInput<'_>) -> Option<(Construct, usize)> {
    let caps = RE_MACRO.captures(input.text)?;
    let construct = Construct::Macro {
        name: caps[1].to_string(),
        value: caps[2].trim().to_string(),
    };
    Some((construct, input.text.len()))
}

fn recognize_directive(input: &RuleInput<'_>) -> Option<(Construct, usize)> {
    input
        .text
        .starts_with('#')
        .then_some((Construct::Directive, input.text.len()))
}

fn recognize_access(input: &RuleInput<'_>) -> Option<(Construct, usize)> {
    let caps = RE_ACCESS.captures(input.text)?;
    let end = caps.get(0).map_or(0, |m| m.end());
    // `private::x` is a qualified name, not a label
    if input.text[end..].starts_with(':') {
        return None;
    }
    let level = AccessLevel::from_keyword(&caps[1])?;
    Some((Construct::Access(level), end))
}

fn recognize_linkage(input: &RuleInput<'_>) -> Option<(Construct, usize)> {
    let end = RE_LINKAGE.find(input.text)?.end();
    let block = input.text[end..].starts_with('{');
    Some((Construct::Linkage { block }, end))
}

fn recognize_namespace(input: &RuleInput<'_>) -> Option<(Construct, usize)> {
    let caps = RE_NAMESPACE.captures(input.text)?;
    let end = caps.get(0).map_or(0, |m| m.end());
    // `namespace fs = std::filesystem;` is an alias
    if input.text[end..].trim_start().starts_with('=') {
        return None;
    }
    let name: String = caps
        .get(1)
        .map_or("", |m| m.as_str())
        .split_whitespace()
        .collect();
    Some((Construct::Namespace(name), end))
}

fn recognize_close_brace(input: &RuleInput<'_>) -> Option<(Construct, usize)> {
    let tokens = tokenize(input.text);
    let idx = tokens.iter().position(|t| is_delimiter(t.kind, t.text))?;
    if tokens[idx].text != "}" {
        return None;
    }
    let end = tokens[idx + 1..]
        .iter()
        .take_while(|t| t.text == ";")
        .last()
        .map_or(tokens[idx].end, |t| t.end);
    Some((Construct::CloseBrace, end))
}

fn is_delimiter(kind: TokenKind, text: &str) -> bool {
    kind == TokenKind::Punct && matches!(text, "{" | "}" | ";")
}

/// The first brace or semicolon outside literals, with the offset just past it
fn first_delimiter(text: &str) -> Option<(&'static str, usize)> {
    tokenize(text)
        .into_iter()
        .find(|t| is_delimiter(t.kind, t.text))
        .map(|t| match t.text {
            "{" => ("{", t.end),
            "}" => ("}", t.end),
            _ => (";", t.end),
        })
}

/// Run the first eligible rule that recognizes `input`
pub(crate) fn dispatch(context: Context, input: &RuleInput<'_>) -> Option<RuleMatch> {
    RULES
        .iter()
        .filter(|rule| rule.eligibility.allows(context))
        .find_map(|rule| {
            (rule.recognize)(input).map(|(construct, consumed)| RuleMatch {
                kind: rule.kind,
                construct,
                consumed,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(context: Context, text: &str) -> Option<RuleMatch> {
        dispatch(
            context,
            &RuleInput {
                text,
                class_name: Some("Sample"),
            },
        )
    }

    fn kind(context: Context, text: &str) -> Option<RuleKind> {
        run(context, text).map(|m| m.kind)
    }

    #[test]
    fn test_rules_are_in_priority_order() {
        let kinds: Vec<RuleKind> = RULES.iter().map(|rule| rule.kind).collect();
        assert_eq!(kinds.first(), Some(&RuleKind::Macro));
        assert_eq!(kinds.last(), Some(&RuleKind::Statement));
        assert_eq!(kinds.len(), 15);
    }

    #[test]
    fn test_same_text_depends_on_context() {
        assert_eq!(kind(Context::Class, "Sample();"), Some(RuleKind::Constructor));
        assert_eq!(kind(Context::Namespace, "Sample();"), Some(RuleKind::Statement));
        assert_eq!(kind(Context::Class, "public:"), Some(RuleKind::AccessModifier));
        assert_eq!(kind(Context::Namespace, "public:"), None);
        assert_eq!(kind(Context::Class, "namespace x {"), Some(RuleKind::OpenBrace));
    }

    #[test]
    fn test_function_context_only_tracks_braces() {
        assert_eq!(kind(Context::Function, "int x = f();"), Some(RuleKind::Statement));
        assert_eq!(kind(Context::Function, "if (x) {"), Some(RuleKind::OpenBrace));
        assert_eq!(kind(Context::Skip, "void f();"), Some(RuleKind::Statement));
        assert_eq!(kind(Context::Skip, "#define X 1"), Some(RuleKind::Macro));
    }

    #[test]
    fn test_macro_value_is_trimmed() {
        let m = run(Context::Namespace, "#define MAX_SIZE   (1 << 10)").unwrap();
        assert_eq!(
            m.construct,
            Construct::Macro {
                name: "MAX_SIZE".to_string(),
                value: "(1 << 10)".to_string()
            }
        );
        assert_eq!(kind(Context::Namespace, "#include <vector>"), Some(RuleKind::Directive));
    }

    #[test]
    fn test_namespace_forms() {
        let m = run(Context::Namespace, "namespace outer :: inner {").unwrap();
        assert_eq!(m.construct, Construct::Namespace("outer::inner".to_string()));
        assert_eq!(&"namespace outer :: inner {"[m.consumed..], " {");

        let m = run(Context::Namespace, "namespace").unwrap();
        assert_eq!(m.construct, Construct::Namespace(String::new()));
        assert_eq!(
            kind(Context::Namespace, "namespace fs = std::filesystem;"),
            Some(RuleKind::Statement)
        );
    }

    #[test]
    fn test_linkage_specification() {
        let m = run(Context::Namespace, "extern \"C\" {").unwrap();
        assert_eq!(m.construct, Construct::Linkage { block: true });
        assert_eq!(&"extern \"C\" {"[m.consumed..], "{");

        let m = run(Context::Namespace, "extern \"C\" void f(int x);").unwrap();
        assert_eq!(m.construct, Construct::Linkage { block: false });
        assert_eq!(&"extern \"C\" void f(int x);"[m.consumed..], "void f(int x);");

        assert_eq!(kind(Context::Namespace, "extern int counter;"), Some(RuleKind::Statement));
        assert_eq!(kind(Context::Class, "extern \"C\" {"), Some(RuleKind::OpenBrace));
    }

    #[test]
    fn test_access_with_trailing_member() {
        let m = run(Context::Class, "protected: int x;").unwrap();
        assert_eq!(m.construct, Construct::Access(AccessLevel::Protected));
        assert_eq!(&"protected: int x;"[m.consumed..], " int x;");
    }

    #[test]
    fn test_braces_use_first_delimiter() {
        let m = run(Context::Function, "x = \"}\"; }").unwrap();
        assert_eq!(m.kind, RuleKind::Statement);

        let m = run(Context::Function, "} ;; int y;").unwrap();
        assert_eq!(m.kind, RuleKind::CloseBrace);
        assert_eq!(&"} ;; int y;"[m.consumed..], " int y;");

        let m = run(Context::Namespace, "int table[] = { 1, 2 };").unwrap();
        assert_eq!(m.kind, RuleKind::OpenBrace);
        assert_eq!(&"int table[] = { 1, 2 };"[m.consumed..], " 1, 2 };");
    }

    #[test]
    fn test_unmatched_fragment() {
        assert!(run(Context::Namespace, "template <typename T>").is_none());
        assert!(run(Context::Class, "void reset(int a,").is_none());
    }

    #[test]
    fn test_enum_keyword_defers_to_sub_parse() {
        let m = run(Context::Class, "enum Color {").unwrap();
        assert_eq!(m.construct, Construct::Enum);
        assert_eq!(m.consumed, 0);
    }
}
