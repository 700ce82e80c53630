//! Token cursor over a single line fragment
//!
//! The declaration recognizers need just enough lexing to tell identifiers
//! from punctuation and to skip over string literals. Every token keeps its
//! byte span so a recognizer can report how much of the fragment it consumed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// `[A-Za-z0-9_]+`
    Word,
    /// `::`, `...` or any other single character
    Punct,
    /// Quoted string or character literal
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Token<'_> {
    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Word && !self.text.starts_with(|c: char| c.is_ascii_digit())
    }

    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Word && self.text.starts_with(|c: char| c.is_ascii_digit())
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// End of the literal opened at `start`; an unterminated literal runs to the end of the text
pub(crate) fn literal_end(text: &str, start: usize) -> usize {
    let quote = text[start..].chars().next();
    let mut escaped = false;
    for (offset, c) in text[start + 1..].char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if Some(c) == quote {
            return start + 1 + offset + 1;
        }
    }
    text.len()
}

pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let kind = if is_word_byte(b) {
            while i < bytes.len() && is_word_byte(bytes[i]) {
                i += 1;
            }
            TokenKind::Word
        } else if b == b'"' || b == b'\'' {
            i = literal_end(text, i);
            TokenKind::Literal
        } else if text[i..].starts_with("::") {
            i += 2;
            TokenKind::Punct
        } else if text[i..].starts_with("...") {
            i += 3;
            TokenKind::Punct
        } else {
            i += text[i..].chars().next().map_or(1, char::len_utf8);
            TokenKind::Punct
        };

        tokens.push(Token {
            kind,
            text: &text[start..i],
            start,
            end: i,
        });
    }

    tokens
}

/// Backtracking cursor over the tokens of one fragment
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: tokenize(text),
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub fn peek_nth(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + n)
    }

    pub fn peek_is(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.text == text)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if its text is exactly `text`
    pub fn eat(&mut self, text: &str) -> bool {
        if self.peek_is(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn eat_ident(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(token) if token.is_ident() => {
                let text = token.text;
                self.pos += 1;
                Some(text)
            }
            _ => None,
        }
    }

    pub fn mark(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    /// Byte offset just past the last consumed token
    pub fn offset(&self) -> usize {
        match self.pos {
            0 => 0,
            n => self.tokens[n - 1].end,
        }
    }
}
