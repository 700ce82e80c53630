//! Canonical text for parsed declaration fragments

use crate::entities::{Parameter, TemplateParams, TypeExpr, TypeFragment};

/// `["T", "U"]` → `template <typename T, typename U>`
pub fn assemble_template(params: &TemplateParams) -> String {
    let names: Vec<String> = params
        .names()
        .iter()
        .map(|name| format!("typename {name}"))
        .collect();
    format!("template <{}>", names.join(", "))
}

/// Join type fragments into one string
///
/// Nested groups are template arguments: the first one follows `<`
/// directly, later ones get `", "`. Plain tokens are glued together unless
/// two identifier characters would touch, the previous text ends in a comma,
/// or two `>` would form a shift operator.
pub fn assemble_type(expr: &TypeExpr) -> String {
    let mut out = String::new();
    for fragment in &expr.fragments {
        match fragment {
            TypeFragment::Group(group) => {
                if !out.is_empty() && !out.ends_with('<') {
                    out.push_str(", ");
                }
                out.push_str(&assemble_type(group));
            }
            TypeFragment::Token(token) => {
                if needs_space(&out, token) {
                    out.push(' ');
                }
                out.push_str(token);
            }
        }
    }
    out
}

fn needs_space(out: &str, token: &str) -> bool {
    let (Some(prev), Some(next)) = (out.chars().last(), token.chars().next()) else {
        return false;
    };
    prev == ',' || (is_word_char(prev) && is_word_char(next)) || (prev == '>' && next == '>')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `type name` pairs joined with `", "`; unnamed parameters contribute only their type
pub fn assemble_param_list(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|param| {
            let ty = assemble_type(&param.ty);
            match &param.name {
                Some(name) => format!("{ty} {name}"),
                None => ty,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
