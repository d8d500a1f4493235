//! Assertion helpers for parsed resolution contexts.

use phpctx::{ParsedResolutionContext, ResolutionContext, Symbol, SymbolKind};

pub fn sym(text: &str) -> Symbol {
    Symbol::parse(text).unwrap_or_else(|e| panic!("Invalid symbol '{}': {}", text, e))
}

pub fn syms(texts: &[&str]) -> Vec<Symbol> {
    texts.iter().map(|text| sym(text)).collect()
}

/// Rendered use statements of a context, one string per statement.
pub fn use_lines(context: &ResolutionContext) -> Vec<String> {
    context
        .use_statements()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Declared symbols of a parsed context as `(qualified name, kind)` pairs.
pub fn declared(context: &ParsedResolutionContext) -> Vec<(String, SymbolKind)> {
    context
        .symbols()
        .iter()
        .map(|parsed| (parsed.symbol.to_string(), parsed.kind))
        .collect()
}

/// Assert every span of a parsed context slices `source` to the expected construct.
pub fn assert_spans_slice_source(source: &str, context: &ParsedResolutionContext) {
    let text = context
        .span()
        .text(source)
        .unwrap_or_else(|| panic!("Context span {:?} outside source", context.span()));
    assert!(!text.trim().is_empty(), "Context span should not be blank");
    assert_eq!(text, text.trim(), "Context span should start and end on tokens");

    for statement in context.parsed_use_statements() {
        let text = statement.span.text(source).unwrap_or_default();
        assert!(
            text.to_ascii_lowercase().starts_with("use") && text.ends_with(';'),
            "Use statement span should cover `use ... ;`, got {:?}",
            text
        );
    }

    for parsed in context.symbols() {
        let text = parsed.span.text(source).unwrap_or_default();
        let name = parsed.symbol.last_atom().unwrap_or_default();
        assert!(
            text.contains(name),
            "Span of {} should contain its name, got {:?}",
            parsed.symbol,
            text
        );
    }
}
