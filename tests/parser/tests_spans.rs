#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::context_assertions::*;
use crate::helpers::source_fixtures::*;
use phpctx::Position;
use phpctx::parser::{TokenKind, parse_source, tokenize};

#[test]
fn test_every_token_slices_source() {
    for source in [MULTIPLE_NAMESPACES, GLOBAL_ONLY, NOISY_SOURCE] {
        let tokens = tokenize(source);
        let rebuilt: String = tokens.iter().map(|token| token.text.as_str()).collect();
        assert_eq!(rebuilt, source);
        for token in &tokens {
            assert_eq!(&source[token.range()], token.text.as_str());
        }
        assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::End));
    }
}

#[test]
fn test_parsed_spans_slice_source() {
    for source in [MULTIPLE_NAMESPACES, GLOBAL_ONLY, NOISY_SOURCE] {
        for context in parse_source(source) {
            assert_spans_slice_source(source, &context);
        }
    }
}

#[test]
fn test_braced_namespace_spans() {
    let contexts = &*MULTIPLE_NAMESPACES_PARSED;

    let first = contexts[0].span().text(MULTIPLE_NAMESPACES).unwrap();
    assert!(first.starts_with("namespace NamespaceA\\NamespaceB\n{"));
    assert!(first.ends_with("function functionB() {}\n}"));

    let last = contexts[2].span().text(MULTIPLE_NAMESPACES).unwrap();
    assert!(last.starts_with("namespace\n{"));
    assert!(last.ends_with('}'));
}

#[test]
fn test_use_statement_positions() {
    let context = &MULTIPLE_NAMESPACES_PARSED[0];
    let statements = context.parsed_use_statements();

    assert_eq!(statements[0].span.position, Position::new(5, 5));
    assert_eq!(
        statements[0].span.text(MULTIPLE_NAMESPACES),
        Some("use NamespaceD\\ClassI;")
    );
    assert_eq!(statements[3].span.position, Position::new(8, 5));
    assert_eq!(
        statements[3].span.text(MULTIPLE_NAMESPACES),
        Some("use const NamespaceG\\CONSTANT_A;")
    );
}

#[test]
fn test_symbol_spans() {
    let context = &MULTIPLE_NAMESPACES_PARSED[1];
    let texts: Vec<&str> = context
        .symbols()
        .iter()
        .map(|parsed| parsed.span.text(MULTIPLE_NAMESPACES).unwrap())
        .collect();
    assert_eq!(
        texts,
        vec![
            "class ClassA extends \\NamespaceA\\NamespaceB\\ClassA {}",
            "trait TraitA {}",
            "CONSTANT_B = 1",
            "CONSTANT_C = [2, 3]",
        ]
    );
}

#[test]
fn test_token_spans_index_tokens() {
    let source = "<?php namespace A;\nuse B;\n";
    let tokens = tokenize(source);
    let contexts = parse_source(source);
    let span = contexts[0].parsed_use_statements()[0].span;

    let covered: String = tokens[span.token_offset..span.token_offset + span.token_size]
        .iter()
        .map(|token| token.text.as_str())
        .collect();
    assert_eq!(covered, "use B;");
    assert_eq!(span.offset() as usize, source.find("use").unwrap());
    assert_eq!(span.size(), 6);
}

#[test]
fn test_multibyte_columns_are_bytes() {
    let source = "<?php /* é */ namespace Ä;";
    let contexts = parse_source(source);
    let span = contexts[0].span();
    assert_eq!(span.text(source), Some("namespace Ä;"));
    assert_eq!(span.column() as usize, source.find("namespace").unwrap() + 1);
}
