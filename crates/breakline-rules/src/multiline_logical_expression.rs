//! Rule to break long logical, assignment and ternary expressions after
//! their operators.
//!
//! # Detected Patterns
//!
//! Each operator below is checked against the chain it belongs to:
//!
//! - `&&`, `||`, `??` (the whole logical chain is measured)
//! - `=` and compound assignment operators
//! - `?` and `:` of a conditional expression
//! - `=` of a variable declarator or class field with an initializer
//!
//! An operator is reported when the chain is at least `max_length`
//! characters long or has at least `max_items` operands, unless its right
//! operand already starts on the next line. Every operator of a qualifying
//! chain is reported.
//!
//! # Fix
//!
//! Appends a line break after the operator, indented to one column left of
//! where the chain starts.
//!
//! # Configuration
//!
//! - `max_length`: Chain length that forces a break (default: 80)
//! - `max_items`: Operand count that forces a break (default: 3)

use crate::aggregate::aggregate;
use breakline_core::syntax::{walk, NodeId, NodeKind, SourceCode, SyntaxTree, Visitor};
use breakline_core::{
    ConfigError, FileContext, Replacement, Rule, RuleConfig, Severity, Suggestion, Violation,
};
use tracing::debug;

/// Rule code for multiline-logical-expression.
pub const CODE: &str = "BL003";

/// Rule name for multiline-logical-expression.
pub const NAME: &str = "multiline-logical-expression";

const DEFAULT_MAX_LENGTH: usize = 80;
const DEFAULT_MAX_ITEMS: usize = 3;

/// Requires a newline after the operators of long expression chains.
#[derive(Debug, Clone)]
pub struct MultilineLogicalExpression {
    max_length: usize,
    max_items: usize,
    severity: Severity,
}

impl Default for MultilineLogicalExpression {
    fn default() -> Self {
        Self::new()
    }
}

impl MultilineLogicalExpression {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            max_items: DEFAULT_MAX_ITEMS,
            severity: Severity::Error,
        }
    }

    /// Builds the rule from its `[rules.multiline-logical-expression]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for negative or non-numeric values.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        Ok(Self::new()
            .max_length(config.get_usize(NAME, "max_length", DEFAULT_MAX_LENGTH, 0..=usize::MAX)?)
            .max_items(config.get_usize(NAME, "max_items", DEFAULT_MAX_ITEMS, 0..=usize::MAX)?))
    }

    /// Sets the chain length that forces a break.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the operand count that forces a break.
    #[must_use]
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MultilineLogicalExpression {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces newlines after the operators of long expressions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext, source: &SourceCode) -> Vec<Violation> {
        let mut visitor = OperatorVisitor {
            ctx,
            source,
            rule: self,
            violations: Vec::new(),
        };
        walk(source.tree(), &mut visitor);
        visitor.violations
    }
}

struct OperatorVisitor<'a> {
    ctx: &'a FileContext<'a>,
    source: &'a SourceCode,
    rule: &'a MultilineLogicalExpression,
    violations: Vec<Violation>,
}

impl OperatorVisitor<'_> {
    fn check_operator(&mut self, node: NodeId, right: NodeId, operator: &str) {
        let tree = self.source.tree();
        let right_start = tree.node(right).range.start;
        let Some(token) = self.source.token_before(right_start, |t| t.value == operator) else {
            debug!("No `{operator}` token before {:?}", tree.node(right).range);
            return;
        };

        let metrics = aggregate(self.source, node);
        if metrics.span < self.rule.max_length && metrics.operand_count < self.rule.max_items {
            return;
        }

        let already_broken = self
            .source
            .token_after(token.range.end, |_| true)
            .is_some_and(|next| next.loc.start.line != token.loc.end.line);
        if already_broken {
            return;
        }

        let indent = tree.node(metrics.root).loc.start.column.saturating_sub(1);
        let location = self.ctx.location(self.source, token.range);

        self.violations.push(
            Violation::new(CODE, NAME, self.rule.severity, location.clone(), "Expected newline")
                .with_suggestion(Suggestion::with_fix(
                    format!("Break the line after `{operator}`"),
                    Replacement::new(location, format!("{operator}\n{}", " ".repeat(indent))),
                )),
        );
    }
}

impl Visitor for OperatorVisitor<'_> {
    fn enter(&mut self, tree: &SyntaxTree, id: NodeId) {
        match tree.kind(id) {
            NodeKind::Logical {
                right, operator, ..
            } => self.check_operator(id, *right, operator.as_str()),
            NodeKind::Assignment {
                right, operator, ..
            } => self.check_operator(id, *right, operator),
            NodeKind::VariableDeclarator {
                init: Some(init), ..
            } => self.check_operator(id, *init, "="),
            NodeKind::PropertyDefinition {
                value: Some(value), ..
            } => self.check_operator(id, *value, "="),
            NodeKind::Conditional {
                consequent,
                alternate,
                ..
            } => {
                self.check_operator(id, *consequent, "?");
                self.check_operator(id, *alternate, ":");
            }
            _ => {}
        }
    }
}
