//! Token normalizer: attaches line, column, byte offset, and size to every
//! raw token and appends a synthetic end-of-stream token.

use smol_str::SmolStr;
use text_size::TextSize;

use super::lexer::Lexer;
use super::token::{RawToken, Token, TokenKind};

/// Running position while walking the raw token stream.
struct Cursor {
    line: u32,
    column: u32,
    offset: TextSize,
}

impl Cursor {
    fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: TextSize::from(0),
        }
    }

    fn token(&self, kind: TokenKind, text: SmolStr) -> Token {
        Token {
            kind,
            size: TextSize::of(text.as_str()),
            text,
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    fn advance(&mut self, text: &str) {
        self.offset += TextSize::of(text);
        match text.rfind('\n') {
            Some(last_newline) => {
                self.line += text.matches('\n').count() as u32;
                self.column = (text.len() - last_newline) as u32;
            }
            None => self.column += text.len() as u32,
        }
    }
}

/// Convert a raw token stream into positioned [`Token`]s.
///
/// Tagged tokens keep the line the lexer reported; bare characters inherit
/// the running position. The result always ends with a [`TokenKind::End`]
/// token placed right after the last character.
pub fn normalize<'a, I>(raw: I) -> Vec<Token>
where
    I: IntoIterator<Item = RawToken<'a>>,
{
    let mut cursor = Cursor::new();
    let mut tokens = Vec::new();

    for raw in raw {
        let token = match raw {
            RawToken::Tagged { kind, text, line } => {
                if line != cursor.line {
                    cursor.line = line;
                }
                let token = cursor.token(kind, SmolStr::new(text));
                cursor.advance(text);
                token
            }
            RawToken::Char(c) => {
                let mut buf = [0u8; 4];
                let text: &str = c.encode_utf8(&mut buf);
                let token = cursor.token(TokenKind::Char(c), SmolStr::new(text));
                cursor.advance(text);
                token
            }
        };
        tokens.push(token);
    }

    tokens.push(cursor.token(TokenKind::End, SmolStr::default()));
    tokens
}

/// Lex and normalize `source` in one step.
pub fn tokenize(source: &str) -> Vec<Token> {
    normalize(Lexer::new(source))
}
