//! Rule to put the parentheses of a multi-line `if` condition on their own lines.
//!
//! # Detected Patterns
//!
//! An `if` whose condition spans several lines and either starts on the
//! `if` line or is directly followed by its closing `)`:
//!
//! ```js
//! if (ready &&
//!     loaded) {
//! }
//! ```
//!
//! # Fix
//!
//! Moves the condition onto its own lines, leaving its inner line breaks
//! untouched:
//!
//! ```js
//! if (
//!     ready &&
//!     loaded
//! ) {
//! }
//! ```

use breakline_core::syntax::{walk, NodeId, NodeKind, SourceCode, SyntaxTree, Visitor};
use breakline_core::{FileContext, Replacement, Rule, Severity, Suggestion, Violation};

/// Rule code for multiline-if-statement.
pub const CODE: &str = "BL002";

/// Rule name for multiline-if-statement.
pub const NAME: &str = "multiline-if-statement";

/// Requires multi-line `if` conditions to open and close on their own lines.
#[derive(Debug, Clone)]
pub struct MultilineIfStatement {
    severity: Severity,
}

impl Default for MultilineIfStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl MultilineIfStatement {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MultilineIfStatement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Puts the parentheses of a multi-line if condition on their own lines"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext, source: &SourceCode) -> Vec<Violation> {
        let mut visitor = IfVisitor {
            ctx,
            source,
            severity: self.severity,
            violations: Vec::new(),
        };
        walk(source.tree(), &mut visitor);
        visitor.violations
    }
}

struct IfVisitor<'a> {
    ctx: &'a FileContext<'a>,
    source: &'a SourceCode,
    severity: Severity,
    violations: Vec<Violation>,
}

impl Visitor for IfVisitor<'_> {
    fn enter(&mut self, tree: &SyntaxTree, id: NodeId) {
        let NodeKind::If { test, .. } = tree.kind(id) else {
            return;
        };
        let statement = tree.node(id);
        let test = tree.node(*test);

        if !test.loc.is_multiline() {
            return;
        }
        let starts_on_if_line = test.loc.start.line == statement.loc.start.line;
        let closed_right_after = self
            .source
            .text()
            .get(test.range.end..)
            .is_some_and(|rest| rest.starts_with(')'));
        if !starts_on_if_line && !closed_right_after {
            return;
        }

        let replacement = format!(
            "\n{}{}\n{}",
            " ".repeat(test.loc.start.column.saturating_sub(1)),
            self.source.slice(test.range),
            " ".repeat(statement.loc.start.column),
        );

        self.violations.push(
            Violation::new(
                CODE,
                NAME,
                self.severity,
                self.ctx.location(self.source, statement.range),
                "Expected newline",
            )
            .with_suggestion(Suggestion::with_fix(
                "Move the condition onto its own lines",
                Replacement::new(self.ctx.location(self.source, test.range), replacement),
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check, fix, fix_once, positions};

    const BROKEN: &str = "
      if(someNumber === 0 &&
        withSeveralConditions ||
        anotherExpression &&
        extraExpression) {
        doSomething();
      }
      ";

    const FIXED: &str = "
      if(
        someNumber === 0 &&
        withSeveralConditions ||
        anotherExpression &&
        extraExpression
      ) {
        doSomething();
      }
      ";

    #[test]
    fn test_detects_condition_starting_on_if_line() {
        let violations = check(&MultilineIfStatement::new(), BROKEN);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Expected newline");
        assert_eq!(positions(&violations), vec![(2, 7)]);
    }

    #[test]
    fn test_fix_moves_parentheses_onto_own_lines() {
        let rule = MultilineIfStatement::new();
        assert_eq!(fix_once(&rule, BROKEN), FIXED);

        let report = fix(&rule, BROKEN);
        assert_eq!(report.output, FIXED);
        assert_eq!(report.passes, 1);
        assert!(report.remaining.is_empty());
    }

    #[test]
    fn test_allows_formatted_conditions() {
        let rule = MultilineIfStatement::new();
        assert!(check(&rule, FIXED).is_empty());
        assert!(check(
            &rule,
            "if(someNumber === 0 && withSeveralConditions || anotherExpression) {\n  go();\n}"
        )
        .is_empty());
    }

    #[test]
    fn test_detects_condition_closed_right_after_it() {
        let code = "if (\n  ready &&\n  loaded) {\n}\n";
        let rule = MultilineIfStatement::new();
        assert_eq!(check(&rule, code).len(), 1);
        assert_eq!(fix_once(&rule, code), "if (\n  \n ready &&\n  loaded\n) {\n}\n");
    }

    #[test]
    fn test_checks_else_if_branches() {
        let code = "if (a) {\n} else if (b &&\n  c) {\n}\n";
        let violations = check(&MultilineIfStatement::new(), code);
        assert_eq!(positions(&violations), vec![(2, 8)]);
    }
}
