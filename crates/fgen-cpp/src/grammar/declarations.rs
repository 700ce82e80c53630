//! Recognizers for class heads and function-like signatures
//!
//! Each recognizer matches a prefix of the fragment and reports how many
//! bytes it consumed. Anything after that is the caller's remainder.

use fgen_parser_api::{
    ClassKey, DeclSpecifier, FunctionSignature, Parameter, TemplateParams, TypeExpr,
};

use super::lexer::Cursor;

const NATIVE_TYPES: &[&str] = &[
    "unsigned", "int", "short", "long", "double", "float", "char", "wchar_t", "bool", "signed",
    "void",
];

/// Words that can never start a type or name a function
const RESERVED: &[&str] = &[
    "const", "volatile", "static", "virtual", "inline", "explicit", "constexpr", "friend",
    "typedef", "using", "return", "template", "typename", "class", "struct", "union", "enum",
    "namespace", "operator", "public", "protected", "private", "new", "delete", "extern",
    "throw", "if", "else", "while", "for", "do", "switch", "case", "goto", "sizeof", "default",
];

fn is_native(word: &str) -> bool {
    NATIVE_TYPES.contains(&word)
}

fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// A class or struct head, `template <...> class Name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassHead {
    pub template: Option<TemplateParams>,
    pub key: ClassKey,
    pub name: String,
}

/// A function or operator signature plus whether a `;` ended it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Signature {
    pub signature: FunctionSignature,
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CtorSignature {
    pub name: String,
    pub params: Vec<Parameter>,
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DtorSignature {
    pub name: String,
    pub terminated: bool,
}

/// Qualifiers after the closing parenthesis
#[derive(Debug, Default)]
struct Tail {
    is_const: bool,
    specifier: Option<DeclSpecifier>,
    terminated: bool,
}

/// Optional `template <typename T, class U = int>` prefix
///
/// `Some(None)` when there is no prefix, `None` when a prefix is malformed.
fn parse_template_decl(cur: &mut Cursor<'_>) -> Option<Option<TemplateParams>> {
    if !cur.eat("template") {
        return Some(None);
    }
    if !cur.eat("<") {
        return None;
    }

    let mut names = Vec::new();
    if cur.eat(">") {
        return Some(Some(TemplateParams(names)));
    }
    loop {
        if !(cur.eat("typename") || cur.eat("class")) {
            return None;
        }
        names.push(cur.eat_ident()?.to_string());
        if cur.eat("=") {
            skip_default(cur, &[",", ">"]);
        }
        if cur.eat(",") {
            continue;
        }
        if cur.eat(">") {
            return Some(Some(TemplateParams(names)));
        }
        return None;
    }
}

/// Skip a default value up to (not including) one of `stops` at nesting depth zero
fn skip_default(cur: &mut Cursor<'_>, stops: &[&str]) {
    let mut nesting = 0usize;
    let mut angles = 0usize;
    while let Some(token) = cur.peek() {
        match token.text {
            "(" | "[" | "{" => nesting += 1,
            ")" | "]" | "}" if nesting > 0 => nesting -= 1,
            ")" => return,
            "<" if stops.contains(&">") => angles += 1,
            ">" if angles > 0 => angles -= 1,
            text if nesting == 0 && angles == 0 && stops.contains(&text) => return,
            _ => {}
        }
        cur.bump();
    }
}

/// `ns::Name` as a single string; reserved words are rejected
fn parse_qualified_name(cur: &mut Cursor<'_>) -> Option<String> {
    let mut name = String::new();
    if cur.eat("::") {
        name.push_str("::");
    }
    let first = cur.eat_ident().filter(|word| !is_reserved(word))?;
    name.push_str(first);
    while cur.peek_is("::") && cur.peek_nth(1).is_some_and(|t| t.is_ident()) {
        cur.bump();
        let part = cur.eat_ident()?;
        name.push_str("::");
        name.push_str(part);
    }
    Some(name)
}

/// `const? (native+ | qualified<args>?) *... &{0,2}`
pub(crate) fn parse_type(cur: &mut Cursor<'_>) -> Option<TypeExpr> {
    let mut ty = TypeExpr::new();
    if cur.eat("const") {
        ty.push_token("const");
    }

    if cur.peek().is_some_and(|t| is_native(t.text)) {
        while let Some(token) = cur.peek().filter(|t| is_native(t.text)).copied() {
            cur.bump();
            ty.push_token(token.text);
        }
    } else {
        ty.push_token(parse_qualified_name(cur)?);
        if cur.eat("<") {
            ty.push_token("<");
            if !cur.eat(">") {
                loop {
                    let arg = match cur.peek() {
                        Some(token) if token.is_number() => {
                            let text = token.text;
                            cur.bump();
                            TypeExpr::from_tokens([text])
                        }
                        _ => parse_type(cur)?,
                    };
                    ty.push_group(arg);
                    if cur.eat(",") {
                        continue;
                    }
                    if cur.eat(">") {
                        break;
                    }
                    return None;
                }
            }
            ty.push_token(">");
        }
    }

    while cur.eat("*") {
        ty.push_token("*");
    }
    for _ in 0..2 {
        if cur.eat("&") {
            ty.push_token("&");
        }
    }
    Some(ty)
}

/// Parameter list after the opening parenthesis, through the closing one
fn parse_params(cur: &mut Cursor<'_>) -> Option<Vec<Parameter>> {
    let mut params = Vec::new();
    if cur.eat(")") {
        return Some(params);
    }
    if cur.peek_is("void") && cur.peek_nth(1).is_some_and(|t| t.text == ")") {
        cur.bump();
        cur.bump();
        return Some(params);
    }

    loop {
        if cur.eat("...") {
            params.push(Parameter::new(TypeExpr::from_tokens(["..."])));
        } else {
            let mut param = Parameter::new(parse_type(cur)?);
            if let Some(name) = cur.peek().filter(|t| t.is_ident() && !is_reserved(t.text)) {
                param = param.with_name(name.text);
                cur.bump();
            }
            if cur.eat("=") {
                skip_default(cur, &[",", ")"]);
            }
            params.push(param);
        }

        if cur.eat(",") {
            continue;
        }
        if cur.eat(")") {
            return Some(params);
        }
        return None;
    }
}

/// Skip a balanced `( ... )` group if one starts here
fn skip_parenthesized(cur: &mut Cursor<'_>) -> bool {
    if !cur.eat("(") {
        return false;
    }
    let mut depth = 1usize;
    while let Some(token) = cur.bump() {
        match token.text {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

fn parse_tail(cur: &mut Cursor<'_>) -> Option<Tail> {
    let mut tail = Tail::default();
    loop {
        if cur.eat("const") {
            tail.is_const = true;
        } else if cur.eat("noexcept") || cur.eat("throw") {
            if cur.peek_is("(") && !skip_parenthesized(cur) {
                return None;
            }
        } else if !(cur.eat("override") || cur.eat("final")) {
            break;
        }
    }

    if cur.peek_is("=") {
        let specifier = match cur.peek_nth(1).map(|t| t.text) {
            Some("0") => Some(DeclSpecifier::PureVirtual),
            Some("default") => Some(DeclSpecifier::Defaulted),
            Some("delete") => Some(DeclSpecifier::Deleted),
            _ => None,
        };
        if specifier.is_some() {
            cur.bump();
            cur.bump();
            tail.specifier = specifier;
        }
    }

    tail.terminated = cur.eat(";");
    if !tail.terminated && !opens_body(cur) {
        return None;
    }
    Some(tail)
}

/// An unterminated signature must be followed by its body, an initializer list or nothing
fn opens_body(cur: &Cursor<'_>) -> bool {
    match cur.peek() {
        None => true,
        Some(token) => matches!(token.text, "{" | ":" | "try"),
    }
}

/// Leading `static`, `virtual` and other specifiers, in any order
fn parse_specifiers(cur: &mut Cursor<'_>, signature: &mut FunctionSignature) {
    loop {
        if cur.eat("static") {
            signature.is_static = true;
        } else if cur.eat("virtual") {
            signature.is_virtual = true;
        } else if !(cur.eat("inline") || cur.eat("constexpr") || cur.eat("explicit")) {
            return;
        }
    }
}

fn finish_signature(
    cur: &mut Cursor<'_>,
    mut signature: FunctionSignature,
) -> Option<(Signature, usize)> {
    let tail = parse_tail(cur)?;
    signature.is_const = tail.is_const;
    signature.specifier = tail.specifier;
    Some((
        Signature {
            signature,
            terminated: tail.terminated,
        },
        cur.offset(),
    ))
}

/// `template <...>? (class|struct) Name`, rejecting forward declarations
pub(crate) fn recognize_class(text: &str) -> Option<(ClassHead, usize)> {
    let mut cur = Cursor::new(text);
    let template = parse_template_decl(&mut cur)?;
    let key = cur.bump().and_then(|t| ClassKey::from_keyword(t.text))?;
    let name = cur.eat_ident()?.to_string();
    let consumed = cur.offset();

    let heads_body = match cur.peek() {
        None => true,
        Some(token) => matches!(token.text, "{" | ":" | "final" | "<"),
    };
    heads_body.then_some((
        ClassHead {
            template,
            key,
            name,
        },
        consumed,
    ))
}

/// Ordinary function: `template? specifiers ret name(params) tail`
pub(crate) fn recognize_function(text: &str) -> Option<(Signature, usize)> {
    let mut cur = Cursor::new(text);
    let mut signature = FunctionSignature {
        template: parse_template_decl(&mut cur)?,
        ..Default::default()
    };
    parse_specifiers(&mut cur, &mut signature);
    signature.return_type = Some(parse_type(&mut cur)?);
    signature.name = parse_qualified_name(&mut cur)?;
    if !cur.eat("(") {
        return None;
    }
    signature.params = parse_params(&mut cur)?;
    finish_signature(&mut cur, signature)
}

/// Call operator: `ret operator()(params) tail`
pub(crate) fn recognize_call_operator(text: &str) -> Option<(Signature, usize)> {
    let mut cur = Cursor::new(text);
    let mut signature = FunctionSignature {
        template: parse_template_decl(&mut cur)?,
        ..Default::default()
    };
    parse_specifiers(&mut cur, &mut signature);
    signature.return_type = Some(parse_type(&mut cur)?);
    if !(cur.eat("operator") && cur.eat("(") && cur.eat(")") && cur.eat("(")) {
        return None;
    }
    signature.name = "operator()".to_string();
    signature.params = parse_params(&mut cur)?;
    finish_signature(&mut cur, signature)
}

/// Any other operator, with or without a return type (conversion operators)
pub(crate) fn recognize_operator(text: &str) -> Option<(Signature, usize)> {
    let mut cur = Cursor::new(text);
    let mut signature = FunctionSignature {
        template: parse_template_decl(&mut cur)?,
        ..Default::default()
    };
    parse_specifiers(&mut cur, &mut signature);

    let mark = cur.mark();
    match parse_type(&mut cur) {
        Some(ty) if cur.peek_is("operator") => signature.return_type = Some(ty),
        _ => cur.reset(mark),
    }
    if !cur.eat("operator") {
        return None;
    }

    let symbol_start = cur.offset();
    let paren = loop {
        let token = *cur.peek()?;
        if token.text == "(" {
            break token;
        }
        cur.bump();
    };
    let symbol = text[symbol_start..paren.start].trim();
    if symbol.is_empty() {
        return None;
    }
    signature.name = if symbol.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        format!("operator {}", symbol.split_whitespace().collect::<Vec<_>>().join(" "))
    } else {
        format!("operator{}", symbol.split_whitespace().collect::<String>())
    };

    cur.bump();
    signature.params = parse_params(&mut cur)?;
    finish_signature(&mut cur, signature)
}

/// `virtual? ~Name() tail`
pub(crate) fn recognize_destructor(text: &str) -> Option<(DtorSignature, usize)> {
    let mut cur = Cursor::new(text);
    while cur.eat("virtual") || cur.eat("inline") {}
    if !cur.eat("~") {
        return None;
    }
    let name = format!("~{}", cur.eat_ident()?);
    if !cur.eat("(") {
        return None;
    }
    cur.eat("void");
    if !cur.eat(")") {
        return None;
    }
    let tail = parse_tail(&mut cur)?;
    Some((
        DtorSignature {
            name,
            terminated: tail.terminated,
        },
        cur.offset(),
    ))
}

/// `explicit? ClassName(params) tail` where the name must equal `class_name`
pub(crate) fn recognize_constructor(text: &str, class_name: &str) -> Option<(CtorSignature, usize)> {
    let mut cur = Cursor::new(text);
    while cur.eat("explicit") || cur.eat("inline") || cur.eat("constexpr") {}
    let name = cur.eat_ident().filter(|name| *name == class_name)?;
    if !cur.eat("(") {
        return None;
    }
    let params = parse_params(&mut cur)?;
    let tail = parse_tail(&mut cur)?;
    Some((
        CtorSignature {
            name: name.to_string(),
            params,
            terminated: tail.terminated,
        },
        cur.offset(),
    ))
}
