//! Strict enum body recognition
//!
//! The enum rule only spots the keyword. The body is matched here once the
//! dispatcher has merged enough lines for the whole `enum ... { ... };` to
//! sit in one fragment.

use fgen_parser_api::EnumDecl;
use regex::Regex;
use std::sync::LazyLock;

use super::lexer::tokenize;

static RE_ENUM_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^enum\b").unwrap());

static RE_ENUM_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^enum\b\s*(?:(?:class|struct)\b\s*)?([A-Za-z_]\w*)?\s*(?::\s*[\w:\s]+?)?\s*\{([^{}]*)\}\s*;",
    )
    .unwrap()
});

static RE_ENUM_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]\w*)\s*(?:=.*)?$").unwrap());

pub(crate) fn starts_enum(text: &str) -> bool {
    RE_ENUM_KEYWORD.is_match(text)
}

/// Match a complete single-fragment enum declaration
///
/// Returns the declaration and the number of bytes consumed through the
/// closing `;`. Member values are checked for shape but not kept.
pub(crate) fn parse_enum(text: &str) -> Option<(EnumDecl, usize)> {
    let caps = RE_ENUM_BODY.captures(text)?;
    let name = caps.get(1).map(|m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let mut members = Vec::new();
    let items: Vec<&str> = body.split(',').map(str::trim).collect();
    for (idx, item) in items.iter().enumerate() {
        if item.is_empty() {
            // a trailing comma, or an empty body
            if idx + 1 == items.len() {
                continue;
            }
            return None;
        }
        let member = RE_ENUM_MEMBER.captures(item)?;
        members.push(member[1].to_string());
    }

    let consumed = caps.get(0).map_or(0, |m| m.end());
    Some((EnumDecl::new(name, members), consumed))
}

/// Byte offset just past the first `;` outside any braces
///
/// An enum fragment that is terminated here but still fails [`parse_enum`]
/// is a forward declaration or a variable, never a body awaiting more lines.
pub(crate) fn statement_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for token in tokenize(text) {
        match token.text {
            "{" => depth += 1,
            "}" => depth = depth.saturating_sub(1),
            ";" if depth == 0 => return Some(token.end),
            _ => {}
        }
    }
    None
}
