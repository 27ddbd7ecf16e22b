//! JavaScript / TypeScript / JSX lexer
//!
//! Produces a flat token stream with byte spans. The analyses built on top
//! (directive stripping, export discovery, import scanning, style
//! extraction) only need to know where strings, templates, comments and
//! regular expressions start and end, so the lexer does not build a syntax
//! tree and never fails: every input yields a token stream.
//!
//! JSX text is not modelled. An apostrophe in JSX text opens a string that
//! ends at the line break at the latest, which keeps damage local to the line.

/// Token classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    /// Single or double quoted string, quotes included
    String,
    /// Template literal including any `${...}` substitutions
    Template,
    Regex,
    Punct,
    LineComment,
    BlockComment,
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A token spanning `start..end` bytes of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// A line break separates this token from the previous one
    pub newline_before: bool,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }

    pub fn is_punct(&self, src: &str, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text(src) == punct
    }

    pub fn is_ident(&self, src: &str, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(src) == name
    }

    /// Content of a string literal or a substitution-free template, without
    /// quotes and without unescaping.
    pub fn string_value<'a>(&self, src: &'a str) -> Option<&'a str> {
        let text = self.text(src);
        let quote = match self.kind {
            TokenKind::String => text.chars().next()?,
            TokenKind::Template if !text.contains("${") => '`',
            _ => return None,
        };
        let inner = &text[1..];
        Some(inner.strip_suffix(quote).unwrap_or(inner))
    }
}

/// Tokenize `src`, comments included.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).run()
}

/// Tokenize `src` and drop comments.
pub fn significant_tokens(src: &str) -> Vec<Token> {
    tokenize(src)
        .into_iter()
        .filter(|t| !t.kind.is_comment())
        .collect()
}

/// Keywords after which a `/` starts a regular expression
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

const MULTI_PUNCT: &[&str] = &[
    "...", "===", "!==", "=>", "==", "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--",
];

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    newline: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            newline: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            match b {
                b'\n' => {
                    self.newline = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.peek(1) == Some(b'/') => self.line_comment(),
                b'/' if self.peek(1) == Some(b'*') => self.block_comment(),
                b'/' => self.slash(),
                b'\'' | b'"' => {
                    let end = scan_string(self.bytes, self.pos);
                    self.push(TokenKind::String, end);
                }
                b'`' => {
                    let end = scan_template(self.bytes, self.pos);
                    self.push(TokenKind::Template, end);
                }
                b'0'..=b'9' => self.number(),
                b'.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
                _ if is_ident_start(b) => self.ident(),
                _ => self.punct(),
            }
        }
        self.tokens
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, end: usize) {
        let end = end.min(self.bytes.len());
        self.tokens.push(Token {
            kind,
            start: self.pos,
            end,
            newline_before: self.newline,
        });
        self.pos = end;
        if !kind.is_comment() {
            self.newline = false;
        }
    }

    fn line_comment(&mut self) {
        let end = self.bytes[self.pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| self.pos + i)
            .unwrap_or(self.bytes.len());
        self.push(TokenKind::LineComment, end);
    }

    fn block_comment(&mut self) {
        let body = &self.src[self.pos + 2..];
        let end = body
            .find("*/")
            .map(|i| self.pos + 2 + i + 2)
            .unwrap_or(self.bytes.len());
        let spans_lines = self.src[self.pos..end].contains('\n');
        self.push(TokenKind::BlockComment, end);
        if spans_lines {
            self.newline = true;
        }
    }

    fn number(&mut self) {
        let mut i = self.pos;
        while i < self.bytes.len()
            && (self.bytes[i].is_ascii_alphanumeric() || self.bytes[i] == b'.' || self.bytes[i] == b'_')
        {
            i += 1;
        }
        self.push(TokenKind::Number, i);
    }

    fn ident(&mut self) {
        let mut i = self.pos;
        while i < self.bytes.len() && is_ident_continue(self.bytes[i]) {
            i += 1;
        }
        self.push(TokenKind::Ident, i);
    }

    fn punct(&mut self) {
        let rest = &self.src[self.pos..];
        let len = MULTI_PUNCT
            .iter()
            .find(|p| rest.starts_with(**p))
            .map(|p| p.len())
            .unwrap_or(1);
        self.push(TokenKind::Punct, self.pos + len);
    }

    fn slash(&mut self) {
        if self.peek(1) != Some(b'>') && self.regex_allowed() {
            if let Some(end) = scan_regex(self.bytes, self.pos) {
                self.push(TokenKind::Regex, end);
                return;
            }
        }
        let len = if self.peek(1) == Some(b'=') { 2 } else { 1 };
        self.push(TokenKind::Punct, self.pos + len);
    }

    /// Decide whether a `/` at the current position opens a regex.
    fn regex_allowed(&self) -> bool {
        let Some(prev) = self.tokens.iter().rev().find(|t| !t.kind.is_comment()) else {
            return true;
        };
        match prev.kind {
            TokenKind::Number | TokenKind::String | TokenKind::Template | TokenKind::Regex => false,
            TokenKind::Ident => REGEX_PREFIX_KEYWORDS.contains(&prev.text(self.src)),
            TokenKind::Punct => {
                let p = prev.text(self.src);
                // `</` closes a JSX element
                if p == "<" && prev.end == self.pos {
                    return false;
                }
                !matches!(p, ")" | "]" | "}")
            }
            TokenKind::LineComment | TokenKind::BlockComment => true,
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// End of a quoted string starting at `start`. Unterminated strings stop
/// before the line break.
fn scan_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of a template literal starting at `start`, substitutions included.
fn scan_template(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return i + 1,
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = scan_substitution(bytes, i + 2),
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of a `${ ... }` substitution body starting after the opening brace.
fn scan_substitution(bytes: &[u8], start: usize) -> usize {
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            b'\'' | b'"' => {
                i = scan_string(bytes, i);
                continue;
            }
            b'`' => {
                i = scan_template(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// End of a regex literal (flags included) starting at `start`, or `None`
/// when the line ends first.
fn scan_regex(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let mut in_class = false;
    loop {
        let b = *bytes.get(i)?;
        match b {
            b'\n' | b'\r' => return None,
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                i += 1;
                break;
            }
            _ => {}
        }
        i += 1;
    }
    while i < bytes.len() && is_ident_continue(bytes[i]) {
        i += 1;
    }
    Some(i)
}
