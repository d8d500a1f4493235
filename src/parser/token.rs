//! Token kinds, raw lexer tokens, and normalized tokens.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::Position;

/// The kind of a lexed token.
///
/// Single-character punctuation is carried as [`TokenKind::Char`]; every
/// other kind corresponds to a tagged token the lexer annotates with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Outside PHP mode
    InlineHtml,
    OpenTag,
    OpenTagWithEcho,
    CloseTag,

    // Trivia
    Whitespace,
    Comment,
    DocComment,

    // Literals and names
    Identifier,
    Variable,
    Number,
    String,
    Heredoc,
    NsSeparator,

    // Keywords the context parser reacts to
    Namespace,
    Use,
    As,
    Function,
    Const,
    Class,
    Interface,
    Trait,
    Enum,
    Extends,
    Implements,
    New,

    // Multi-character operators
    DoubleColon,
    ObjectOperator,
    DoubleArrow,
    AttributeOpen,
    Operator,

    /// A bare single-character punctuation token.
    Char(char),

    /// Bytes the lexer could not classify.
    Unknown,

    /// Synthetic end-of-stream marker appended by the normalizer.
    End,
}

impl TokenKind {
    /// Whitespace, comments, and text outside `<?php … ?>`.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::InlineHtml
                | Self::OpenTag
                | Self::OpenTagWithEcho
                | Self::CloseTag
                | Self::Whitespace
                | Self::Comment
                | Self::DocComment
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Namespace
                | Self::Use
                | Self::As
                | Self::Function
                | Self::Const
                | Self::Class
                | Self::Interface
                | Self::Trait
                | Self::Enum
                | Self::Extends
                | Self::Implements
                | Self::New
        )
    }

    /// Tokens whose text can stand as a name atom.
    pub fn is_name(self) -> bool {
        self == Self::Identifier || self.is_keyword()
    }
}

/// A token as produced by the lexer, before positions are attached.
///
/// Mirrors the shape of PHP tokenizer output: most tokens are tagged with a
/// kind and starting line, punctuation arrives as a bare character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    Tagged {
        kind: TokenKind,
        text: &'a str,
        line: u32,
    },
    Char(char),
}

/// A normalized token: kind, text, and its exact location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    /// 1-indexed line of the first character
    pub line: u32,
    /// 1-indexed column (in UTF-8 bytes) of the first character
    pub column: u32,
    pub offset: TextSize,
    pub size: TextSize,
}

impl Token {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, self.size)
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Char(c)
    }
}
