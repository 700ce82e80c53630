//! Comment stripping and line normalization
//!
//! Turns raw header text into the queue the dispatcher consumes: `//` and
//! `/* ... */` comments removed (block comments may span lines), every line
//! trimmed, and lines left empty dropped. Each surviving line keeps its
//! original 1-based number so that consumers which write back into the
//! source (documentation insertion) can find it again.
//!
//! An unterminated `/*` swallows the rest of the file.

use crate::line_queue::SourceLine;

/// Strip comments and blank lines from `source`
pub fn preprocess(source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut in_comment = false;

    for (idx, raw) in source.lines().enumerate() {
        let stripped = strip_line(raw, &mut in_comment);
        let text = stripped.trim();
        if !text.is_empty() {
            lines.push(SourceLine::new(idx + 1, text));
        }
    }

    lines
}

/// Remove comments from one physical line, carrying block-comment state across calls
fn strip_line(line: &str, in_comment: &mut bool) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        if *in_comment {
            match line[i..].find("*/") {
                Some(pos) => {
                    *in_comment = false;
                    i += pos + 2;
                    // a removed block comment still separates tokens
                    out.push(' ');
                    continue;
                }
                None => break,
            }
        }

        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' && i + 1 < bytes.len() {
                let escaped = line[i + 1..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&line[i..i + 1 + escaped]);
                i += 1 + escaped;
                continue;
            }
            if b == q {
                quote = None;
            }
        } else if b == b'"' || b == b'\'' {
            quote = Some(b);
        } else if b == b'/' && i + 1 < bytes.len() {
            match bytes[i + 1] {
                b'/' => break,
                b'*' => {
                    *in_comment = true;
                    i += 2;
                    continue;
                }
                _ => {}
            }
        }

        let ch_len = line[i..].chars().next().map_or(1, char::len_utf8);
        out.push_str(&line[i..i + ch_len]);
        i += ch_len;
    }

    out
}
