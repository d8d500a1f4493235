//! Source rendering of resolution contexts.

use std::fmt::{self, Write};

use super::ResolutionContext;

/// Render `context` as the namespace declaration and use statements that
/// would open a PHP file.
///
/// The namespace line is omitted for the global namespace. A blank line
/// separates the namespace from the use statements when both are present.
/// Every line ends with `\n`; an empty global context renders as `""`.
pub fn render(context: &ResolutionContext) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_context(&mut out, context);
    out
}

fn write_context(out: &mut impl Write, context: &ResolutionContext) -> fmt::Result {
    let namespace = context.primary_namespace();
    if !namespace.is_global() {
        writeln!(out, "namespace {};", namespace.to_relative_string())?;
        if !context.use_statements().is_empty() {
            writeln!(out)?;
        }
    }
    for statement in context.use_statements() {
        writeln!(out, "{}", statement)?;
    }
    Ok(())
}

impl fmt::Display for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_context(f, self)
    }
}
