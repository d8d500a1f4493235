#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::context_assertions::*;
use phpctx::context::normalize;
use phpctx::{
    ResolutionContext, Symbol, UseStatement, UseStatementClause, UseStatementError,
    UseStatementType, parse_source, render,
};
use rstest::rstest;
use smol_str::SmolStr;

fn context() -> ResolutionContext {
    parse_source(
        "<?php namespace NamespaceA\\NamespaceB;
         use NamespaceD\\ClassI, NamespaceE\\ClassJ as ClassK;
         use function NamespaceF\\functionA;
         use const NamespaceG\\CONSTANT_A as CONSTANT_B;",
    )
    .remove(0)
    .into_context()
}

#[rstest]
#[case("ClassI", "\\NamespaceD\\ClassI")]
#[case("ClassI\\Sub", "\\NamespaceD\\ClassI\\Sub")]
#[case("ClassK", "\\NamespaceE\\ClassJ")]
#[case("ClassJ", "\\NamespaceA\\NamespaceB\\ClassJ")]
#[case("Sub\\ClassX", "\\NamespaceA\\NamespaceB\\Sub\\ClassX")]
#[case("namespace\\ClassI", "\\NamespaceA\\NamespaceB\\ClassI")]
#[case("\\ClassI", "\\ClassI")]
fn test_resolve_types(#[case] reference: &str, #[case] expected: &str) {
    assert_eq!(context().resolve(&sym(reference)), sym(expected));
}

#[rstest]
#[case("functionA", "\\NamespaceF\\functionA")]
#[case("functionB", "\\NamespaceA\\NamespaceB\\functionB")]
#[case("ClassI\\staticHelper", "\\NamespaceD\\ClassI\\staticHelper")]
fn test_resolve_functions(#[case] reference: &str, #[case] expected: &str) {
    assert_eq!(context().resolve_function(&sym(reference)), sym(expected));
}

#[rstest]
#[case("CONSTANT_B", "\\NamespaceG\\CONSTANT_A")]
#[case("CONSTANT_A", "\\NamespaceA\\NamespaceB\\CONSTANT_A")]
fn test_resolve_constants(#[case] reference: &str, #[case] expected: &str) {
    assert_eq!(context().resolve_constant(&sym(reference)), sym(expected));
}

#[test]
fn test_resolve_parent_reference() {
    let reference = Symbol::reference(["..", "Sibling"]).unwrap();
    assert_eq!(context().resolve(&reference), sym("\\NamespaceA\\Sibling"));
}

#[test]
fn test_render_parsed_context() {
    assert_eq!(
        render(&context()),
        "namespace NamespaceA\\NamespaceB;\n\
         \n\
         use NamespaceD\\ClassI, NamespaceE\\ClassJ as ClassK;\n\
         use function NamespaceF\\functionA;\n\
         use const NamespaceG\\CONSTANT_A as CONSTANT_B;\n"
    );
}

#[test]
fn test_rendered_context_parses_back() {
    let original = context();
    let reparsed = parse_source(&format!("<?php\n{}", original)).remove(0);
    assert_eq!(reparsed.context(), &original);
}

#[test]
fn test_normalize_splits_grouped_statements() {
    let normalized = normalize(context().use_statements());
    let rendered: Vec<String> = normalized.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "use NamespaceD\\ClassI;",
            "use NamespaceE\\ClassJ as ClassK;",
            "use function NamespaceF\\functionA;",
            "use const NamespaceG\\CONSTANT_A as CONSTANT_B;",
        ]
    );
}

#[test]
fn test_construction_errors() {
    assert_eq!(
        UseStatementClause::new(sym("\\Foo"), Some(SmolStr::new("Not\\Alias"))),
        Err(UseStatementError::InvalidAlias {
            alias: "Not\\Alias".to_string()
        })
    );
    assert_eq!(
        UseStatement::new(vec![], UseStatementType::Function),
        Err(UseStatementError::EmptyUseStatement)
    );
    let error: UseStatementError = Symbol::parse("\\Foo\\").unwrap_err().into();
    assert!(matches!(error, UseStatementError::Symbol(_)));
}

#[test]
fn test_global_context_renders_without_namespace_line() {
    let context = ResolutionContext::new(
        Symbol::global(),
        vec![UseStatement::single(
            UseStatementClause::new(sym("\\Foo\\Bar"), None).unwrap(),
            UseStatementType::Type,
        )],
    );
    let rendered = render(&context);
    assert!(!rendered.contains("namespace"));
    assert_eq!(rendered, "use Foo\\Bar;\n");
}
