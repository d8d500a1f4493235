//! Resolution context parser.
//!
//! Walks a normalized token stream with a small state machine and recovers,
//! for every namespace block, the namespace name, the use statements in
//! effect, and the classes, interfaces, traits, functions, and constants
//! declared directly inside it.
//!
//! This is not a PHP parser. Anything the state machine does not recognize
//! is skipped, so the parser never fails; malformed input simply yields
//! fewer constructs.
//!
//! ```text
//! Start ──namespace──▶ NamespaceName ──; / {──▶ NamespaceHeader
//!   │                                               │
//!   ├──use──▶ UseStatementSymbol ◀──▶ UseStatementAlias
//!   ├──const──▶ ConstantName ◀──▶ ConstantValue
//!   └──class / enum / function──▶ DeclarationName ─▶ DeclarationHeader
//!                                         │                 │
//!                                         └──{──▶ DeclarationBody ──}──▶ DeclarationEnd
//! ```

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::normalizer;
use super::token::{Token, TokenKind};
use crate::base::{SourceSpan, TextRange};
use crate::context::{
    ParsedResolutionContext, ParsedSymbol, ParsedUseStatement, SymbolKind, UseStatement,
    UseStatementClause, UseStatementType,
};
use crate::symbol::{NAMESPACE_SEPARATOR, Symbol};

/// Lex, normalize, and parse PHP source.
pub fn parse_source(source: &str) -> Vec<ParsedResolutionContext> {
    parse_tokens(&normalizer::tokenize(source))
}

/// Parse a normalized token stream into one context per namespace block.
///
/// Returns an empty list when the tokens declare no namespace, use
/// statement, or symbol.
pub fn parse_tokens(tokens: &[Token]) -> Vec<ParsedResolutionContext> {
    ResolutionContextParser::new(tokens).parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    NamespaceName,
    NamespaceHeader,
    UseStatementSymbol,
    UseStatementAlias,
    DeclarationName,
    DeclarationHeader,
    DeclarationBody,
    DeclarationEnd,
    ConstantName,
    ConstantValue,
}

/// The namespace block currently being collected.
struct ContextBuilder {
    namespace: Symbol,
    /// Opened by a `namespace` declaration rather than implied by content
    explicit: bool,
    braced: bool,
    start: usize,
    end: usize,
    use_statements: Vec<ParsedUseStatement>,
    symbols: Vec<ParsedSymbol>,
}

impl ContextBuilder {
    fn implicit(index: usize) -> Self {
        Self {
            namespace: Symbol::global(),
            explicit: false,
            braced: false,
            start: index,
            end: index,
            use_statements: Vec::new(),
            symbols: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.use_statements.is_empty() && self.symbols.is_empty()
    }
}

struct UseBuilder {
    start: usize,
    kind: UseStatementType,
    /// Atoms before `{` in a group use
    prefix: Option<Vec<SmolStr>>,
    buffer: Vec<SmolStr>,
    clauses: Vec<UseStatementClause>,
}

impl UseBuilder {
    fn is_fresh(&self) -> bool {
        self.prefix.is_none() && self.buffer.is_empty() && self.clauses.is_empty()
    }
}

struct DeclarationBuilder {
    kind: SymbolKind,
    start: usize,
    buffer: Vec<SmolStr>,
    symbol: Option<Symbol>,
    /// Anonymous classes and enums have their bodies skipped but are never recorded
    recorded: bool,
    /// Open parentheses before the body, e.g. `new class($a, $b)`
    parens: usize,
    depth: usize,
}

struct ConstantBuilder {
    symbol: Symbol,
    start: usize,
    end: usize,
}

/// Token-driven state machine behind [`parse_tokens`].
pub struct ResolutionContextParser<'t> {
    tokens: &'t [Token],
    states: Vec<State>,
    contexts: Vec<ParsedResolutionContext>,
    context: Option<ContextBuilder>,
    namespace_buffer: Vec<SmolStr>,
    namespace_start: usize,
    use_statement: Option<UseBuilder>,
    declaration: Option<DeclarationBuilder>,
    constant: Option<ConstantBuilder>,
    constant_depth: usize,
    /// Brace depth of top-level code inside the current namespace
    top_level_depth: usize,
    last_significant: Option<usize>,
    previous_kind: Option<TokenKind>,
}

impl<'t> ResolutionContextParser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            states: vec![State::Start],
            contexts: Vec::new(),
            context: None,
            namespace_buffer: Vec::new(),
            namespace_start: 0,
            use_statement: None,
            declaration: None,
            constant: None,
            constant_depth: 0,
            top_level_depth: 0,
            last_significant: None,
            previous_kind: None,
        }
    }

    pub fn parse(mut self) -> Vec<ParsedResolutionContext> {
        let tokens = self.tokens;
        for (index, token) in tokens.iter().enumerate() {
            if token.kind == TokenKind::End {
                break;
            }
            if token.is_trivia() {
                continue;
            }

            if self.state() != State::NamespaceName && token.kind != TokenKind::Namespace {
                if let Some(context) = &mut self.context {
                    context.end = index;
                }
            }

            self.dispatch(index, token);
            self.previous_kind = Some(token.kind);
            self.last_significant = Some(index);
        }
        self.finish();
        self.contexts
    }

    // =========================================================================
    // State stack
    // =========================================================================

    fn state(&self) -> State {
        self.states.last().copied().unwrap_or(State::Start)
    }

    fn switch(&mut self, state: State) {
        trace!(from = ?self.state(), to = ?state, "switch");
        match self.states.last_mut() {
            Some(top) => *top = state,
            None => self.states.push(state),
        }
    }

    fn push(&mut self, state: State) {
        trace!(from = ?self.state(), to = ?state, "push");
        self.states.push(state);
    }

    fn pop(&mut self) {
        self.states.pop();
        if self.states.is_empty() {
            self.states.push(State::Start);
        }
        trace!(to = ?self.state(), "pop");
    }

    fn reset(&mut self, state: State) {
        self.states.clear();
        self.states.push(state);
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn dispatch(&mut self, index: usize, token: &Token) {
        match self.state() {
            State::Start | State::NamespaceHeader | State::DeclarationEnd => {
                self.top_level(index, token)
            }
            State::NamespaceName => self.namespace_name(index, token),
            State::UseStatementSymbol => self.use_statement_symbol(index, token),
            State::UseStatementAlias => self.use_statement_alias(index, token),
            State::DeclarationName => self.declaration_name(index, token),
            State::DeclarationHeader => self.declaration_header(index, token),
            State::DeclarationBody => self.declaration_body(index, token),
            State::ConstantName => self.constant_name(index, token),
            State::ConstantValue => self.constant_value(index, token),
        }
    }

    fn top_level(&mut self, index: usize, token: &Token) {
        match token.kind {
            TokenKind::Namespace => {
                self.namespace_start = index;
                self.namespace_buffer.clear();
                self.push(State::NamespaceName);
            }
            TokenKind::Use => {
                self.use_statement = Some(UseBuilder {
                    start: index,
                    kind: UseStatementType::Type,
                    prefix: None,
                    buffer: Vec::new(),
                    clauses: Vec::new(),
                });
                self.push(State::UseStatementSymbol);
            }
            TokenKind::Class | TokenKind::Interface | TokenKind::Trait => {
                // Foo::class, $foo->class, and named arguments `class: ...`
                if self.follows_member_access() || self.is_named_argument(index) {
                    return;
                }
                if token.kind == TokenKind::Class && self.previous_kind == Some(TokenKind::New) {
                    self.begin_skipped_declaration(index);
                    return;
                }
                let kind = match token.kind {
                    TokenKind::Interface => SymbolKind::Interface,
                    TokenKind::Trait => SymbolKind::Trait,
                    _ => SymbolKind::Class,
                };
                self.begin_declaration(index, kind);
            }
            TokenKind::Enum => {
                // `enum` is only a keyword when a name follows it
                if !self.follows_member_access()
                    && self
                        .next_significant(index)
                        .is_some_and(|next| next.kind.is_name())
                {
                    self.begin_skipped_declaration(index);
                }
            }
            TokenKind::Function => {
                if self.follows_member_access() || self.is_named_argument(index) {
                    return;
                }
                self.begin_declaration(index, SymbolKind::Function);
            }
            TokenKind::Const => {
                self.constant = None;
                self.constant_depth = 0;
                self.push(State::ConstantName);
            }
            TokenKind::Char('{') => self.top_level_depth += 1,
            TokenKind::Char('}') => {
                if self.top_level_depth > 0 {
                    self.top_level_depth -= 1;
                } else if self.context.as_ref().is_some_and(|context| context.braced) {
                    self.flush_context();
                    self.reset(State::Start);
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    fn namespace_name(&mut self, index: usize, token: &Token) {
        match token.kind {
            kind if kind.is_name() => push_atoms(&mut self.namespace_buffer, &token.text),
            TokenKind::NsSeparator if self.namespace_buffer.is_empty() => {
                // `namespace\foo` is a relative name, not a declaration
                self.pop();
            }
            TokenKind::NsSeparator => {}
            TokenKind::Char(c @ (';' | '{')) => {
                self.flush_context();
                let atoms = std::mem::take(&mut self.namespace_buffer);
                let namespace = Symbol::from_atoms_unchecked(true, atoms).normalize();
                debug!(namespace = %namespace, "entering namespace");
                self.context = Some(ContextBuilder {
                    namespace,
                    explicit: true,
                    braced: c == '{',
                    start: self.namespace_start,
                    end: index,
                    use_statements: Vec::new(),
                    symbols: Vec::new(),
                });
                self.top_level_depth = 0;
                self.reset(State::NamespaceHeader);
            }
            _ => {
                // Something like `namespace\foo()` spelled with spacing we do not track
                self.namespace_buffer.clear();
                self.pop();
            }
        }
    }

    fn follows_member_access(&self) -> bool {
        matches!(
            self.previous_kind,
            Some(TokenKind::DoubleColon | TokenKind::ObjectOperator)
        )
    }

    fn is_named_argument(&self, index: usize) -> bool {
        self.next_significant(index)
            .is_some_and(|next| next.is_char(':'))
    }

    fn next_significant(&self, index: usize) -> Option<&'t Token> {
        let tokens = self.tokens;
        tokens.get(index + 1..)?.iter().find(|token| !token.is_trivia())
    }

    fn current_namespace(&self) -> Symbol {
        self.context
            .as_ref()
            .map(|context| context.namespace.clone())
            .unwrap_or_else(Symbol::global)
    }

    fn context_mut(&mut self, start: usize, end: usize) -> &mut ContextBuilder {
        let context = self
            .context
            .get_or_insert_with(|| ContextBuilder::implicit(start));
        context.end = context.end.max(end);
        context
    }

    fn flush_context(&mut self) {
        let Some(context) = self.context.take() else {
            return;
        };
        if !context.explicit && context.is_empty() {
            return;
        }
        debug!(
            namespace = %context.namespace,
            use_statements = context.use_statements.len(),
            symbols = context.symbols.len(),
            "parsed resolution context"
        );
        let span = self.span_between(context.start, context.end);
        self.contexts.push(ParsedResolutionContext::new(
            context.namespace,
            context.use_statements,
            context.symbols,
            span,
        ));
    }

    // =========================================================================
    // Use statements
    // =========================================================================

    fn use_statement_symbol(&mut self, index: usize, token: &Token) {
        let Some(builder) = self.use_statement.as_mut() else {
            self.pop();
            return;
        };

        match token.kind {
            TokenKind::Function | TokenKind::Const if builder.buffer.is_empty() => {
                // Mixed group imports keep the statement's type
                if builder.is_fresh() {
                    builder.kind = if token.kind == TokenKind::Function {
                        UseStatementType::Function
                    } else {
                        UseStatementType::Constant
                    };
                }
            }
            TokenKind::Char('(') if builder.is_fresh() => {
                // Closure import list: function () use ($x) {}
                self.use_statement = None;
                self.pop();
            }
            TokenKind::NsSeparator => {}
            TokenKind::As => self.switch(State::UseStatementAlias),
            TokenKind::Char(',') => self.emit_clause(None),
            TokenKind::Char('{') => {
                builder.prefix = Some(std::mem::take(&mut builder.buffer));
            }
            TokenKind::Char('}') => {
                self.emit_clause(None);
                if let Some(builder) = self.use_statement.as_mut() {
                    builder.prefix = None;
                }
            }
            TokenKind::Char(';') => {
                self.emit_clause(None);
                self.finish_use(index);
            }
            kind if kind.is_name() => push_atoms(&mut builder.buffer, &token.text),
            _ => {}
        }
    }

    fn use_statement_alias(&mut self, index: usize, token: &Token) {
        if token.kind.is_name() {
            self.emit_clause(Some(token.text.clone()));
            self.switch(State::UseStatementSymbol);
        } else {
            self.switch(State::UseStatementSymbol);
            self.use_statement_symbol(index, token);
        }
    }

    fn emit_clause(&mut self, alias: Option<SmolStr>) {
        let Some(builder) = self.use_statement.as_mut() else {
            return;
        };
        if builder.buffer.is_empty() {
            return;
        }
        let mut atoms = builder.prefix.clone().unwrap_or_default();
        atoms.append(&mut builder.buffer);
        let symbol = Symbol::from_atoms_unchecked(true, atoms);
        match UseStatementClause::new(symbol, alias) {
            Ok(clause) => builder.clauses.push(clause),
            Err(error) => trace!(%error, "dropping use clause"),
        }
    }

    fn finish_use(&mut self, index: usize) {
        self.pop();
        let Some(builder) = self.use_statement.take() else {
            return;
        };
        let Ok(statement) = UseStatement::new(builder.clauses, builder.kind) else {
            return;
        };
        trace!(statement = %statement, "parsed use statement");
        let span = self.span_between(builder.start, index);
        self.context_mut(builder.start, index)
            .use_statements
            .push(ParsedUseStatement::new(statement, span));
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn begin_declaration(&mut self, index: usize, kind: SymbolKind) {
        self.open_declaration(index, kind, true);
    }

    /// Track a class-like body that declares nothing at namespace level:
    /// `new class { ... }` and enums.
    fn begin_skipped_declaration(&mut self, index: usize) {
        self.open_declaration(index, SymbolKind::Class, false);
    }

    fn open_declaration(&mut self, index: usize, kind: SymbolKind, recorded: bool) {
        self.declaration = Some(DeclarationBuilder {
            kind,
            start: index,
            buffer: Vec::new(),
            symbol: None,
            recorded,
            parens: 0,
            depth: 0,
        });
        self.push(State::DeclarationName);
    }

    /// Resolve the buffered name against the current namespace.
    fn declare(&mut self) {
        let namespace = self.current_namespace();
        let Some(declaration) = self.declaration.as_mut() else {
            return;
        };
        if !declaration.recorded || declaration.symbol.is_some() || declaration.buffer.is_empty() {
            return;
        }
        let name = Symbol::from_atoms_unchecked(false, std::mem::take(&mut declaration.buffer));
        declaration.symbol = Some(namespace.join(&name).normalize());
    }

    fn declaration_name(&mut self, index: usize, token: &Token) {
        let Some(declaration) = self.declaration.as_mut() else {
            self.pop();
            return;
        };

        match token.kind {
            TokenKind::Char('(') if declaration.kind == SymbolKind::Function => {
                if declaration.buffer.is_empty() {
                    // Closure
                    self.declaration = None;
                    self.pop();
                } else {
                    self.declare();
                    self.switch(State::DeclarationHeader);
                }
            }
            TokenKind::Char('(') => declaration.parens += 1,
            TokenKind::Char(')') => declaration.parens = declaration.parens.saturating_sub(1),
            _ if declaration.parens > 0 => {}
            TokenKind::Extends | TokenKind::Implements if declaration.kind.is_type() => {
                self.declare();
                self.switch(State::DeclarationHeader);
            }
            TokenKind::Char('{') => {
                declaration.depth = 1;
                self.declare();
                self.switch(State::DeclarationBody);
            }
            TokenKind::Char(';') => {
                self.declare();
                self.complete_declaration(index);
            }
            TokenKind::Char('&') | TokenKind::NsSeparator => {}
            kind if kind.is_name() => push_atoms(&mut declaration.buffer, &token.text),
            _ => {}
        }
    }

    fn declaration_header(&mut self, index: usize, token: &Token) {
        match token.kind {
            TokenKind::Char('{') => {
                if let Some(declaration) = self.declaration.as_mut() {
                    declaration.depth = 1;
                }
                self.switch(State::DeclarationBody);
            }
            TokenKind::Char(';') => self.complete_declaration(index),
            _ => {}
        }
    }

    fn declaration_body(&mut self, index: usize, token: &Token) {
        let Some(declaration) = self.declaration.as_mut() else {
            self.pop();
            return;
        };
        match token.kind {
            TokenKind::Char('{') => declaration.depth += 1,
            TokenKind::Char('}') => {
                declaration.depth = declaration.depth.saturating_sub(1);
                if declaration.depth == 0 {
                    self.complete_declaration(index);
                }
            }
            _ => {}
        }
    }

    fn complete_declaration(&mut self, end: usize) {
        self.pop();
        self.switch(State::DeclarationEnd);
        let Some(declaration) = self.declaration.take() else {
            return;
        };
        let Some(symbol) = declaration.symbol else {
            return;
        };
        trace!(symbol = %symbol, kind = %declaration.kind, "parsed declaration");
        let span = self.span_between(declaration.start, end);
        self.context_mut(declaration.start, end)
            .symbols
            .push(ParsedSymbol::new(symbol, declaration.kind, span));
    }

    // =========================================================================
    // Constants
    // =========================================================================

    fn constant_name(&mut self, index: usize, token: &Token) {
        match token.kind {
            kind if kind.is_name() && self.constant.is_none() => {
                let name = Symbol::from_atoms_unchecked(false, vec![token.text.clone()]);
                self.constant = Some(ConstantBuilder {
                    symbol: self.current_namespace().join(&name).normalize(),
                    start: index,
                    end: index,
                });
            }
            TokenKind::Char('=') => {
                self.constant_depth = 0;
                self.switch(State::ConstantValue);
            }
            TokenKind::Char(',') => self.complete_constant(),
            TokenKind::Char(';') => {
                self.complete_constant();
                self.pop();
            }
            _ => {}
        }
    }

    fn constant_value(&mut self, index: usize, token: &Token) {
        match token.kind {
            TokenKind::Char(',') if self.constant_depth == 0 => {
                self.complete_constant();
                self.switch(State::ConstantName);
            }
            TokenKind::Char(';') if self.constant_depth == 0 => {
                self.complete_constant();
                self.pop();
            }
            kind => {
                match kind {
                    TokenKind::Char('(' | '[' | '{') => self.constant_depth += 1,
                    TokenKind::Char(')' | ']' | '}') => {
                        self.constant_depth = self.constant_depth.saturating_sub(1)
                    }
                    _ => {}
                }
                if let Some(constant) = self.constant.as_mut() {
                    constant.end = index;
                }
            }
        }
    }

    fn complete_constant(&mut self) {
        let Some(constant) = self.constant.take() else {
            return;
        };
        trace!(symbol = %constant.symbol, "parsed constant");
        let span = self.span_between(constant.start, constant.end);
        self.context_mut(constant.start, constant.end)
            .symbols
            .push(ParsedSymbol::new(constant.symbol, SymbolKind::Constant, span));
    }

    // =========================================================================
    // End of stream
    // =========================================================================

    fn finish(&mut self) {
        if self.declaration.is_some() {
            self.declare();
            let end = self
                .last_significant
                .or_else(|| self.declaration.as_ref().map(|declaration| declaration.start))
                .unwrap_or_default();
            self.complete_declaration(end);
        }
        self.complete_constant();
        self.flush_context();
    }

    /// Span covering tokens `start..=end`.
    fn span_between(&self, start: usize, end: usize) -> SourceSpan {
        let end = end.max(start);
        match (self.tokens.get(start), self.tokens.get(end)) {
            (Some(first), Some(last)) => SourceSpan::new(
                first.position(),
                TextRange::new(first.offset, last.range().end()),
                start,
                end - start + 1,
            ),
            _ => SourceSpan::default(),
        }
    }
}

/// Push the atoms of a name token. Names normally arrive one atom per token,
/// but a token spelling a whole qualified name is split.
fn push_atoms(buffer: &mut Vec<SmolStr>, text: &str) {
    if text.contains(NAMESPACE_SEPARATOR) {
        buffer.extend(
            text.split(NAMESPACE_SEPARATOR)
                .filter(|atom| !atom.is_empty())
                .map(SmolStr::new),
        );
    } else {
        buffer.push(SmolStr::new(text));
    }
}
