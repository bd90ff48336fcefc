//! Helpers shared by rule tests.

use breakline_core::{
    apply_fixes, fix_until_stable, parse, FileContext, FixReport, ParseError, Rule, Violation,
};
use std::path::Path;

/// Runs `rule` over `code` parsed as `test.js`.
pub(crate) fn check(rule: &dyn Rule, code: &str) -> Vec<Violation> {
    let source = parse(code).expect("Failed to parse");
    let ctx = FileContext::new(Path::new("test.js"), Path::new("."));
    rule.check(&ctx, &source)
}

/// Applies a single pass of fixes.
pub(crate) fn fix_once(rule: &dyn Rule, code: &str) -> String {
    apply_fixes(code, &check(rule, code)).output
}

/// Fixes `code` until no fix applies.
pub(crate) fn fix(rule: &dyn Rule, code: &str) -> FixReport {
    let ctx = FileContext::new(Path::new("test.js"), Path::new("."));
    fix_until_stable(code, |text| -> Result<Vec<Violation>, ParseError> {
        let source = parse(text)?;
        Ok(rule.check(&ctx, &source))
    })
    .expect("fixed output should parse")
}

/// `(line, column)` of each violation, 1-indexed.
pub(crate) fn positions(violations: &[Violation]) -> Vec<(usize, usize)> {
    violations
        .iter()
        .map(|v| (v.location.line, v.location.column))
        .collect()
}
