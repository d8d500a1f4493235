//! Values produced by the context parser, each carrying its source span.

use std::fmt;
use std::ops::Deref;

use super::{ResolutionContext, UseStatement, UseStatementType};
use crate::base::SourceSpan;
use crate::symbol::Symbol;

/// What kind of declaration produced a [`ParsedSymbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Class,
    Interface,
    Trait,
    Function,
    Constant,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Function => "function",
            Self::Constant => "constant",
        }
    }

    /// Class, interface, or trait.
    pub fn is_type(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Trait)
    }

    /// The import namespace this kind of symbol is used through.
    pub fn use_statement_type(self) -> UseStatementType {
        match self {
            Self::Class | Self::Interface | Self::Trait => UseStatementType::Type,
            Self::Function => UseStatementType::Function,
            Self::Constant => UseStatementType::Constant,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration found by the parser, resolved to its qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedSymbol {
    pub symbol: Symbol,
    pub kind: SymbolKind,
    pub span: SourceSpan,
}

impl ParsedSymbol {
    pub fn new(symbol: Symbol, kind: SymbolKind, span: SourceSpan) -> Self {
        Self { symbol, kind, span }
    }
}

/// A use statement together with where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedUseStatement {
    pub statement: UseStatement,
    pub span: SourceSpan,
}

impl ParsedUseStatement {
    pub fn new(statement: UseStatement, span: SourceSpan) -> Self {
        Self { statement, span }
    }
}

impl Deref for ParsedUseStatement {
    type Target = UseStatement;

    fn deref(&self) -> &UseStatement {
        &self.statement
    }
}

/// A namespace block found by the parser.
///
/// Dereferences to the [`ResolutionContext`] in effect inside the block, and
/// additionally records the block's span, its use statements with their
/// spans, and the symbols declared directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedResolutionContext {
    context: ResolutionContext,
    use_statements: Vec<ParsedUseStatement>,
    symbols: Vec<ParsedSymbol>,
    span: SourceSpan,
}

impl ParsedResolutionContext {
    pub fn new(
        primary_namespace: Symbol,
        use_statements: Vec<ParsedUseStatement>,
        symbols: Vec<ParsedSymbol>,
        span: SourceSpan,
    ) -> Self {
        let statements = use_statements
            .iter()
            .map(|parsed| parsed.statement.clone())
            .collect();
        Self {
            context: ResolutionContext::new(primary_namespace, statements),
            use_statements,
            symbols,
            span,
        }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// Drop the source information, keeping the resolution context.
    pub fn into_context(self) -> ResolutionContext {
        self.context
    }

    pub fn parsed_use_statements(&self) -> &[ParsedUseStatement] {
        &self.use_statements
    }

    pub fn symbols(&self) -> &[ParsedSymbol] {
        &self.symbols
    }

    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    /// The declaration of `symbol` with one of `kinds`, if it is in this block.
    pub fn find_symbol(&self, symbol: &Symbol, kinds: &[SymbolKind]) -> Option<&ParsedSymbol> {
        let symbol = symbol.to_qualified().normalize();
        self.symbols
            .iter()
            .find(|parsed| kinds.contains(&parsed.kind) && parsed.symbol == symbol)
    }
}

impl Deref for ParsedResolutionContext {
    type Target = ResolutionContext;

    fn deref(&self) -> &ResolutionContext {
        &self.context
    }
}

impl AsRef<ResolutionContext> for ParsedResolutionContext {
    fn as_ref(&self) -> &ResolutionContext {
        &self.context
    }
}
