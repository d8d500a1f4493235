//! Logos-based lexer for PHP source
//!
//! Produces the raw token stream the normalizer consumes: text outside
//! `<?php … ?>` becomes a single inline HTML token, multi-character tokens
//! are tagged with their kind and starting line, and single-character
//! punctuation is emitted as a bare `char`.

use logos::Logos;

use super::token::{RawToken, TokenKind};

/// Lexer wrapping the logos-generated tokenizer with PHP's HTML/code modes
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte position of the next unlexed text while outside PHP mode
    position: usize,
    /// Base offset and inner lexer while inside PHP mode
    php: Option<(usize, logos::Lexer<'a, LogosToken>)>,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            php: None,
            line: 1,
        }
    }

    fn tagged(&mut self, kind: TokenKind, text: &'a str) -> RawToken<'a> {
        let line = self.line;
        self.line += text.matches('\n').count() as u32;
        RawToken::Tagged { kind, text, line }
    }

    fn next_php(&mut self) -> Option<RawToken<'a>> {
        let (base, inner) = self.php.as_mut()?;
        let base = *base;
        let Some(result) = inner.next() else {
            self.php = None;
            self.position = self.source.len();
            return None;
        };
        let text = inner.slice();
        let span = inner.span();

        let token = match result {
            Ok(LogosToken::CloseTag) => {
                // The closing tag swallows a single trailing newline
                let mut end = base + span.end;
                let rest = &self.source[end..];
                if rest.starts_with("\r\n") {
                    end += 2;
                } else if rest.starts_with('\n') {
                    end += 1;
                }
                self.php = None;
                self.position = end;
                let text = &self.source[base + span.start..end];
                self.tagged(TokenKind::CloseTag, text)
            }
            Ok(LogosToken::Punct) => match text.chars().next() {
                Some(c) => RawToken::Char(c),
                None => self.tagged(TokenKind::Unknown, text),
            },
            Ok(token) => self.tagged(token.kind(), text),
            Err(()) => self.tagged(TokenKind::Unknown, text),
        };
        Some(token)
    }

    fn next_html(&mut self) -> Option<RawToken<'a>> {
        let source = self.source;
        let rest = &source[self.position..];
        if rest.is_empty() {
            return None;
        }

        let Some(found) = rest.find("<?") else {
            self.position = source.len();
            return Some(self.tagged(TokenKind::InlineHtml, rest));
        };
        if found > 0 {
            self.position += found;
            return Some(self.tagged(TokenKind::InlineHtml, &rest[..found]));
        }

        let (kind, len) = open_tag(rest);
        self.position += len;
        self.php = Some((self.position, LogosToken::lexer(&source[self.position..])));
        Some(self.tagged(kind, &rest[..len]))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = RawToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.php.is_some() {
            if let Some(token) = self.next_php() {
                return Some(token);
            }
        }
        self.next_html()
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<RawToken<'_>> {
    Lexer::new(input).collect()
}

/// Classify the open tag at the start of `rest`, returning its kind and length.
///
/// `<?php` includes one trailing whitespace character (or `\r\n`).
fn open_tag(rest: &str) -> (TokenKind, usize) {
    if rest.get(..5).is_some_and(|tag| tag.eq_ignore_ascii_case("<?php")) {
        let after = &rest[5..];
        if after.is_empty() {
            return (TokenKind::OpenTag, 5);
        }
        if after.starts_with("\r\n") {
            return (TokenKind::OpenTag, 7);
        }
        if after.starts_with(|c: char| c.is_ascii_whitespace()) {
            return (TokenKind::OpenTag, 6);
        }
    }
    if rest.starts_with("<?=") {
        return (TokenKind::OpenTagWithEcho, 3);
    }
    (TokenKind::OpenTag, 2)
}

fn line_comment(lex: &mut logos::Lexer<LogosToken>) {
    let rest = lex.remainder();
    let mut end = rest.find('\n').unwrap_or(rest.len());
    if let Some(close) = rest[..end].find("?>") {
        end = close;
    }
    lex.bump(end);
}

fn block_comment(lex: &mut logos::Lexer<LogosToken>) {
    let rest = lex.remainder();
    let end = rest.find("*/").map_or(rest.len(), |i| i + 2);
    lex.bump(end);
}

fn doc_comment(lex: &mut logos::Lexer<LogosToken>) {
    // `/**/` is an empty block comment, not the start of a doc comment
    if lex.remainder().starts_with('/') {
        lex.bump(1);
    } else {
        block_comment(lex);
    }
}

fn quoted(lex: &mut logos::Lexer<LogosToken>, quote: u8) {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                lex.bump(i + 1);
                return;
            }
            _ => i += 1,
        }
    }
    lex.bump(rest.len());
}

fn heredoc(lex: &mut logos::Lexer<LogosToken>) {
    let label: String = lex
        .slice()
        .trim_start_matches("<<<")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    let rest = lex.remainder();
    let mut line_start = 0;
    while line_start <= rest.len() {
        let line = &rest[line_start..];
        let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
        let candidate = &line[indent..];
        if let Some(after) = candidate.strip_prefix(label.as_str()) {
            let terminated = !after.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii());
            if terminated {
                lex.bump(line_start + indent + label.len());
                return;
            }
        }
        match line.find('\n') {
            Some(newline) => line_start += newline + 1,
            None => break,
        }
    }
    lex.bump(rest.len());
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("//", line_comment)]
    #[token("#", line_comment)]
    #[token("/*", block_comment)]
    Comment,

    #[token("/**", doc_comment)]
    DocComment,

    #[token("?>")]
    CloseTag,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"([a-zA-Z_]|[^\x00-\x7F])([a-zA-Z0-9_]|[^\x00-\x7F])*")]
    Ident,

    #[regex(r"\$([a-zA-Z_]|[^\x00-\x7F])([a-zA-Z0-9_]|[^\x00-\x7F])*")]
    Variable,

    #[regex(r"[0-9][0-9A-Za-z_]*")]
    #[regex(r"([0-9][0-9_]*)?\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Number,

    #[token("'", |lex| quoted(lex, b'\''))]
    #[token("\"", |lex| quoted(lex, b'"'))]
    #[token("`", |lex| quoted(lex, b'`'))]
    String,

    #[regex(r#"<<<[ \t]*("[A-Za-z_][A-Za-z0-9_]*"|'[A-Za-z_][A-Za-z0-9_]*'|[A-Za-z_][A-Za-z0-9_]*)\r?\n"#, heredoc)]
    Heredoc,

    #[token("\\")]
    NsSeparator,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("::")]
    DoubleColon,

    #[token("->")]
    #[token("?->")]
    ObjectOperator,

    #[token("=>")]
    DoubleArrow,

    #[token("#[")]
    AttributeOpen,

    #[token("++")]
    #[token("--")]
    #[token("==")]
    #[token("===")]
    #[token("!=")]
    #[token("!==")]
    #[token("<>")]
    #[token("<=")]
    #[token(">=")]
    #[token("<=>")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("??=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token(".=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<")]
    #[token(">>")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("**")]
    #[token("**=")]
    #[token("...")]
    Operator,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[regex(r"[{}()\[\];,.=<>!?:+\-*/%&|^~@$]")]
    Punct,

    // =========================================================================
    // KEYWORDS (case-insensitive, as in PHP)
    // =========================================================================
    #[token("namespace", ignore(case))]
    NamespaceKw,
    #[token("use", ignore(case))]
    UseKw,
    #[token("as", ignore(case))]
    AsKw,
    #[token("function", ignore(case))]
    FunctionKw,
    #[token("const", ignore(case))]
    ConstKw,
    #[token("class", ignore(case))]
    ClassKw,
    #[token("interface", ignore(case))]
    InterfaceKw,
    #[token("trait", ignore(case))]
    TraitKw,
    #[token("enum", ignore(case))]
    EnumKw,
    #[token("extends", ignore(case))]
    ExtendsKw,
    #[token("implements", ignore(case))]
    ImplementsKw,
    #[token("new", ignore(case))]
    NewKw,
}

impl LogosToken {
    fn kind(self) -> TokenKind {
        use LogosToken::*;
        match self {
            Whitespace => TokenKind::Whitespace,
            Comment => TokenKind::Comment,
            DocComment => TokenKind::DocComment,
            CloseTag => TokenKind::CloseTag,
            Ident => TokenKind::Identifier,
            Variable => TokenKind::Variable,
            Number => TokenKind::Number,
            String => TokenKind::String,
            Heredoc => TokenKind::Heredoc,
            NsSeparator => TokenKind::NsSeparator,
            DoubleColon => TokenKind::DoubleColon,
            ObjectOperator => TokenKind::ObjectOperator,
            DoubleArrow => TokenKind::DoubleArrow,
            AttributeOpen => TokenKind::AttributeOpen,
            Operator => TokenKind::Operator,
            Punct => TokenKind::Unknown,
            NamespaceKw => TokenKind::Namespace,
            UseKw => TokenKind::Use,
            AsKw => TokenKind::As,
            FunctionKw => TokenKind::Function,
            ConstKw => TokenKind::Const,
            ClassKw => TokenKind::Class,
            InterfaceKw => TokenKind::Interface,
            TraitKw => TokenKind::Trait,
            EnumKw => TokenKind::Enum,
            ExtendsKw => TokenKind::Extends,
            ImplementsKw => TokenKind::Implements,
            NewKw => TokenKind::New,
        }
    }
}
