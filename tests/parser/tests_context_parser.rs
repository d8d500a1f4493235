#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::context_assertions::*;
use crate::helpers::source_fixtures::*;
use phpctx::parser::{parse_source, parse_tokens, tokenize};
use phpctx::{SymbolKind, UseStatementType};
use rstest::rstest;

#[test]
fn test_multiple_namespaces_in_source_order() {
    let contexts = &*MULTIPLE_NAMESPACES_PARSED;
    assert_eq!(contexts.len(), 3);

    let namespaces: Vec<String> = contexts
        .iter()
        .map(|context| context.primary_namespace().to_string())
        .collect();
    assert_eq!(namespaces, vec!["\\NamespaceA\\NamespaceB", "\\NamespaceC", "\\"]);
}

#[test]
fn test_first_namespace_contents() {
    let context = &MULTIPLE_NAMESPACES_PARSED[0];
    assert_eq!(
        use_lines(context),
        vec![
            "use NamespaceD\\ClassI;",
            "use NamespaceE\\ClassJ as ClassK;",
            "use function NamespaceF\\functionA;",
            "use const NamespaceG\\CONSTANT_A;",
        ]
    );
    assert_eq!(
        declared(context),
        vec![
            ("\\NamespaceA\\NamespaceB\\ClassA".to_string(), SymbolKind::Class),
            ("\\NamespaceA\\NamespaceB\\InterfaceA".to_string(), SymbolKind::Interface),
            ("\\NamespaceA\\NamespaceB\\functionB".to_string(), SymbolKind::Function),
        ]
    );
}

#[test]
fn test_second_namespace_contents() {
    let context = &MULTIPLE_NAMESPACES_PARSED[1];
    assert_eq!(use_lines(context), vec!["use NamespaceA\\NamespaceB\\ClassA;"]);
    assert_eq!(
        declared(context),
        vec![
            ("\\NamespaceC\\ClassA".to_string(), SymbolKind::Class),
            ("\\NamespaceC\\TraitA".to_string(), SymbolKind::Trait),
            ("\\NamespaceC\\CONSTANT_B".to_string(), SymbolKind::Constant),
            ("\\NamespaceC\\CONSTANT_C".to_string(), SymbolKind::Constant),
        ]
    );
}

#[test]
fn test_global_namespace_contents() {
    let context = &MULTIPLE_NAMESPACES_PARSED[2];
    assert!(context.primary_namespace().is_global());
    assert_eq!(use_lines(context), vec!["use NamespaceC\\ClassA as ClassB;"]);
    assert_eq!(
        declared(context),
        vec![
            ("\\ClassA".to_string(), SymbolKind::Class),
            ("\\functionA".to_string(), SymbolKind::Function),
        ]
    );
}

#[test]
fn test_parsed_contexts_resolve_independently() {
    let contexts = &*MULTIPLE_NAMESPACES_PARSED;
    assert_eq!(contexts[0].resolve(&sym("ClassI")), sym("\\NamespaceD\\ClassI"));
    assert_eq!(contexts[0].resolve(&sym("ClassA")), sym("\\NamespaceA\\NamespaceB\\ClassA"));
    assert_eq!(contexts[1].resolve(&sym("ClassA")), sym("\\NamespaceA\\NamespaceB\\ClassA"));
    assert_eq!(contexts[2].resolve(&sym("ClassB")), sym("\\NamespaceC\\ClassA"));
    assert_eq!(contexts[2].resolve(&sym("ClassA")), sym("\\ClassA"));
    assert_eq!(
        contexts[0].resolve_function(&sym("functionA")),
        sym("\\NamespaceF\\functionA")
    );
    assert_eq!(contexts[2].resolve_function(&sym("functionA")), sym("\\functionA"));
}

#[test]
fn test_global_only_source() {
    let contexts = parse_source(GLOBAL_ONLY);
    assert_eq!(contexts.len(), 1);
    assert!(contexts[0].primary_namespace().is_global());
    assert_eq!(use_lines(&contexts[0]), vec!["use Vendor\\Package\\Thing;"]);
    assert_eq!(declared(&contexts[0]), vec![("\\helper".to_string(), SymbolKind::Function)]);
}

#[test]
fn test_noise_is_ignored() {
    let contexts = parse_source(NOISY_SOURCE);
    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts[0].primary_namespace(), &sym("\\Real"));
    assert_eq!(use_lines(&contexts[0]), vec!["use Real\\Thing;"]);
    assert_eq!(declared(&contexts[0]), vec![("\\Real\\Widget".to_string(), SymbolKind::Class)]);
}

#[test]
fn test_parse_tokens_matches_parse_source() {
    let tokens = tokenize(MULTIPLE_NAMESPACES);
    assert_eq!(parse_tokens(&tokens), *MULTIPLE_NAMESPACES_PARSED);
}

#[rstest]
#[case("<?php use Foo\\Bar;", UseStatementType::Type)]
#[case("<?php use function Foo\\bar;", UseStatementType::Function)]
#[case("<?php use FUNCTION Foo\\bar;", UseStatementType::Function)]
#[case("<?php use const Foo\\BAR;", UseStatementType::Constant)]
#[case("<?php use function Foo\\{bar, baz};", UseStatementType::Function)]
fn test_use_statement_type(#[case] source: &str, #[case] expected: UseStatementType) {
    let contexts = parse_source(source);
    assert_eq!(contexts[0].use_statements()[0].kind(), expected);
}

#[rstest]
#[case("<?php namespace A;", "\\A")]
#[case("<?php namespace A\\B\\C;", "\\A\\B\\C")]
#[case("<?php NAMESPACE A\\B { }", "\\A\\B")]
#[case("<?php namespace { }", "\\")]
#[case("<?php namespace A /* comment */ \\ B;", "\\A\\B")]
fn test_namespace_names(#[case] source: &str, #[case] expected: &str) {
    let contexts = parse_source(source);
    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts[0].primary_namespace().to_string(), expected);
}

#[rstest]
#[case("<?php $x = Foo::class;")]
#[case("<?php $x = new class {};")]
#[case("<?php return new class extends M { use T; const C = 1; function up() {} };")]
#[case("<?php enum Suit: string { case H = 'h'; const W = self::H; function label() {} }")]
#[case("<?php foo(class: Bar);")]
#[case("<?php $f = function () use ($y) {};")]
#[case("<?php $f = fn($x) => $x;")]
#[case("<?php $o->function();")]
#[case("<?php echo 'namespace A; use B;';")]
#[case("<?php // class A {}")]
fn test_non_declarations(#[case] source: &str) {
    assert!(parse_source(source).is_empty(), "Expected nothing from {:?}", source);
}

#[test]
fn test_malformed_source_degrades() {
    let contexts = parse_source("<?php namespace A; use ; use B as ; class { } function (");
    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts[0].primary_namespace(), &sym("\\A"));
    assert_eq!(use_lines(&contexts[0]), vec!["use B;"]);
    assert!(contexts[0].symbols().is_empty());
}
