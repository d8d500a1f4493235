#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::helpers::context_assertions::*;
use phpctx::context::DEFAULT_MAX_REFERENCE_ATOMS;
use phpctx::{ResolutionContextGenerator, Symbol, UseStatementType, render};
use rstest::rstest;

#[test]
fn test_alias_prefixing_example() {
    let namespace = sym("\\VendorA\\PackageA");
    let context = ResolutionContextGenerator::new()
        .with_max_reference_atoms(3)
        .generate(
            Some(&namespace),
            &syms(&[
                "\\Bar\\Baz\\Qux",
                "\\Doom\\Bar\\Baz\\Qux",
                "\\Foo\\Bar\\Baz\\Qux",
                "\\VendorA\\PackageA\\Foo\\Bar\\Baz\\Doom",
            ]),
            &[],
            &[],
        );

    assert_eq!(
        render(&context),
        "namespace VendorA\\PackageA;\n\
         \n\
         use Bar\\Baz\\Qux as BarBazQux;\n\
         use Doom\\Bar\\Baz\\Qux as DoomBarBazQux;\n\
         use Foo\\Bar\\Baz\\Qux as FooBarBazQux;\n\
         use VendorA\\PackageA\\Foo\\Bar\\Baz\\Doom;\n"
    );
}

#[rstest]
#[case("\\VendorA\\PackageA\\Foo", false)]
#[case("\\VendorA\\PackageA\\Foo\\Bar", true)]
#[case("\\VendorA\\PackageA\\Foo\\Bar\\Baz", true)]
#[case("\\VendorA\\Foo", true)]
#[case("\\VendorA\\PackageA", true)]
fn test_namespace_relative_skipping(#[case] symbol: &str, #[case] imported: bool) {
    assert_eq!(DEFAULT_MAX_REFERENCE_ATOMS, 1);
    let namespace = sym("\\VendorA\\PackageA");
    let context =
        ResolutionContextGenerator::new().generate(Some(&namespace), &[sym(symbol)], &[], &[]);
    assert_eq!(!context.use_statements().is_empty(), imported);
}

#[test]
fn test_generated_context_resolves_every_symbol() {
    let namespace = sym("\\App\\Http");
    let types = syms(&[
        "\\App\\Http\\Request",
        "\\App\\Http\\Controllers\\HomeController",
        "\\Symfony\\Component\\HttpFoundation\\Request",
        "\\Psr\\Http\\Message\\RequestInterface",
        "\\Laminas\\Diactoros\\Request",
    ]);
    let functions = syms(&["\\App\\Http\\helper", "\\Vendor\\helper", "\\Other\\helper"]);
    let constants = syms(&["\\Vendor\\VERSION"]);

    let context =
        ResolutionContextGenerator::new().generate(Some(&namespace), &types, &functions, &constants);

    for symbol in &types {
        let reference = context.relative_reference(symbol, UseStatementType::Type);
        assert_eq!(&context.resolve(&reference), symbol, "via {}", reference);
    }
    for symbol in &functions {
        let reference = context.relative_reference(symbol, UseStatementType::Function);
        assert_eq!(&context.resolve_function(&reference), symbol, "via {}", reference);
    }
    for symbol in &constants {
        let reference = context.relative_reference(symbol, UseStatementType::Constant);
        assert_eq!(reference.atom_count(), 1);
        assert_eq!(&context.resolve_constant(&reference), symbol);
    }
}

#[test]
fn test_generated_request_aliases() {
    let namespace = sym("\\App\\Http");
    let context = ResolutionContextGenerator::new().generate(
        Some(&namespace),
        &syms(&[
            "\\App\\Http\\Request",
            "\\Symfony\\Component\\HttpFoundation\\Request",
            "\\Laminas\\Diactoros\\Request",
        ]),
        &[],
        &[],
    );
    assert_eq!(
        use_lines(&context),
        vec![
            "use Laminas\\Diactoros\\Request as DiactorosRequest;",
            "use Symfony\\Component\\HttpFoundation\\Request as HttpFoundationRequest;",
        ]
    );
}

#[test]
fn test_reference_inputs_are_treated_as_qualified() {
    let context = ResolutionContextGenerator::new().generate(
        None,
        &[Symbol::parse("Foo\\Bar").unwrap()],
        &[],
        &[],
    );
    assert_eq!(use_lines(&context), vec!["use Foo\\Bar;"]);
}

#[test]
fn test_generated_context_renders_without_global_namespace_line() {
    let context = ResolutionContextGenerator::new().generate(
        None,
        &syms(&["\\Foo\\Bar"]),
        &syms(&["\\Foo\\baz"]),
        &[],
    );
    assert_eq!(render(&context), "use Foo\\Bar;\nuse function Foo\\baz;\n");
}
