//! Rule to require a line break before deeply chained or overlong calls.
//!
//! # Rationale
//!
//! Long method chains on a single line are hard to scan and produce noisy
//! diffs. Breaking before each link keeps one call per line.
//!
//! # Detected Patterns
//!
//! - A call whose chain is deeper than `ignore_chain_with_depth` while its
//!   object and property share a line
//! - Any chained call on a line wider than `max_len` (when enabled)
//!
//! # Fix
//!
//! Inserts a line break before the link (`.`, `?.` or `[`) that follows
//! the object. Indentation is left to the formatter.
//!
//! # Configuration
//!
//! - `ignore_chain_with_depth`: Chain depth allowed on one line, 1..=10 (default: 2)
//! - `max_len`: Maximum line width, 0 disables the check (default: 0)
//! - `tab_width`: Columns per tab stop when measuring lines (default: 4)

use crate::chain::{chain_depth, property_text};
use crate::measure::line_length;
use breakline_core::syntax::{walk, NodeId, NodeKind, SourceCode, SyntaxTree, TextRange, Visitor};
use breakline_core::{
    ConfigError, FileContext, Replacement, Rule, RuleConfig, Severity, Suggestion, Violation,
};
use tracing::debug;

/// Rule code for max-len-newline-perchained-call.
pub const CODE: &str = "BL001";

/// Rule name for max-len-newline-perchained-call.
pub const NAME: &str = "max-len-newline-perchained-call";

const DEFAULT_IGNORE_CHAIN_WITH_DEPTH: usize = 2;
const DEFAULT_TAB_WIDTH: usize = 4;

/// Requires a newline before chained calls past a depth or line width.
#[derive(Debug, Clone)]
pub struct MaxLenNewlinePerChainedCall {
    ignore_chain_with_depth: usize,
    max_len: usize,
    tab_width: usize,
    severity: Severity,
}

impl Default for MaxLenNewlinePerChainedCall {
    fn default() -> Self {
        Self::new()
    }
}

impl MaxLenNewlinePerChainedCall {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ignore_chain_with_depth: DEFAULT_IGNORE_CHAIN_WITH_DEPTH,
            max_len: 0,
            tab_width: DEFAULT_TAB_WIDTH,
            severity: Severity::Error,
        }
    }

    /// Builds the rule from its `[rules.max-len-newline-perchained-call]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] when an option is out of range.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        Ok(Self::new()
            .ignore_chain_with_depth(config.get_usize(
                NAME,
                "ignore_chain_with_depth",
                DEFAULT_IGNORE_CHAIN_WITH_DEPTH,
                1..=10,
            )?)
            .max_len(config.get_usize(NAME, "max_len", 0, 0..=usize::MAX)?)
            .tab_width(config.get_usize(NAME, "tab_width", DEFAULT_TAB_WIDTH, 0..=usize::MAX)?))
    }

    /// Sets the chain depth tolerated on a single line.
    #[must_use]
    pub fn ignore_chain_with_depth(mut self, depth: usize) -> Self {
        self.ignore_chain_with_depth = depth;
        self
    }

    /// Sets the maximum line width; 0 disables the width check.
    #[must_use]
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Sets the tab stop width used to measure lines.
    #[must_use]
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn line_too_long(&self, line: &str) -> bool {
        self.max_len > 0 && line_length(line, self.tab_width) > self.max_len
    }
}

impl Rule for MaxLenNewlinePerChainedCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a newline after each call in a long method chain"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext, source: &SourceCode) -> Vec<Violation> {
        let mut visitor = ChainedCallVisitor {
            ctx,
            source,
            rule: self,
            violations: Vec::new(),
        };
        walk(source.tree(), &mut visitor);
        visitor.violations
    }
}

struct ChainedCallVisitor<'a> {
    ctx: &'a FileContext<'a>,
    source: &'a SourceCode,
    rule: &'a MaxLenNewlinePerChainedCall,
    violations: Vec<Violation>,
}

impl ChainedCallVisitor<'_> {
    fn check_call(&mut self, tree: &SyntaxTree, callee: NodeId) {
        let member = tree.skip_chain(callee);
        let NodeKind::Member {
            object, property, ..
        } = tree.kind(member)
        else {
            return;
        };
        let member_node = tree.node(member);
        let object_node = tree.node(*object);

        let line = self.source.line(member_node.loc.start.line).unwrap_or_default();
        let too_deep = chain_depth(tree, member) > self.rule.ignore_chain_with_depth
            && object_node.loc.end.line == tree.node(*property).loc.start.line;
        if !too_deep && !self.rule.line_too_long(line) {
            return;
        }

        let Some(link) = self
            .source
            .token_after(object_node.range.end, |t| !t.is_closing_paren())
        else {
            debug!("No token after the object of call at {:?}", member_node.range);
            return;
        };
        // Already broken before this link.
        if link.loc.start.line != object_node.loc.end.line {
            return;
        }

        let start = link.range.start;
        let location = self
            .ctx
            .location(self.source, TextRange::new(start, member_node.range.end));
        let insert_at = self.ctx.location(self.source, TextRange::new(start, start));
        let link_text = property_text(self.source, member);

        self.violations.push(
            Violation::new(
                CODE,
                NAME,
                self.rule.severity,
                location,
                format!("Expected line break before `{link_text}`."),
            )
            .with_suggestion(Suggestion::with_fix(
                format!("Break the line before `{link_text}`"),
                Replacement::new(insert_at, "\n"),
            )),
        );
    }
}

impl Visitor for ChainedCallVisitor<'_> {
    fn exit(&mut self, tree: &SyntaxTree, id: NodeId) {
        if let NodeKind::Call { callee, .. } = tree.kind(id) {
            self.check_call(tree, *callee);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{check, fix, fix_once, positions};

    fn chain_of(calls: usize) -> String {
        let mut code = "a".to_string();
        for i in 0..calls {
            code.push_str(&format!(".m{i}()"));
        }
        code.push(';');
        code
    }

    #[test]
    fn test_flags_third_call_in_chain() {
        let rule = MaxLenNewlinePerChainedCall::new();
        let violations = check(&rule, "foo.bar().baz().qux();");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Expected line break before `.qux`.");
        assert_eq!(violations[0].code, CODE);
        assert_eq!(positions(&violations), vec![(1, 16)]);
        assert_eq!(violations[0].location.end_column, 20);
        assert_eq!(fix_once(&rule, "foo.bar().baz().qux();"), "foo.bar().baz()\n.qux();");
    }

    #[test]
    fn test_depth_boundary() {
        for depth in 1..=4 {
            let rule = MaxLenNewlinePerChainedCall::new().ignore_chain_with_depth(depth);
            assert!(
                check(&rule, &chain_of(depth)).is_empty(),
                "chain of {depth} should pass"
            );
            assert_eq!(
                check(&rule, &chain_of(depth + 1)).len(),
                1,
                "chain of {} should fail",
                depth + 1
            );
        }
    }

    #[test]
    fn test_allows_already_broken_chain() {
        let rule = MaxLenNewlinePerChainedCall::new();
        let code = "foo\n  .bar()\n  .baz()\n  .qux();";
        assert!(check(&rule, code).is_empty());
    }

    #[test]
    fn test_optional_and_computed_links() {
        let rule = MaxLenNewlinePerChainedCall::new();

        let violations = check(&rule, "a?.b()?.c()?.d();");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Expected line break before `?.d`.");
        assert_eq!(fix_once(&rule, "a?.b()?.c()?.d();"), "a?.b()?.c()\n?.d();");

        let violations = check(&rule, "a.b().c()[key]();");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Expected line break before `[key]`.");
    }

    #[test]
    fn test_skips_closing_parens_after_object() {
        let rule = MaxLenNewlinePerChainedCall::new();
        let code = "(a.b().c()).d();";
        let violations = check(&rule, code);
        assert_eq!(positions(&violations), vec![(1, 12)]);
        assert_eq!(fix_once(&rule, code), "(a.b().c())\n.d();");
    }

    #[test]
    fn test_max_len_flags_shallow_calls() {
        let rule = MaxLenNewlinePerChainedCall::new().max_len(5);
        let violations = check(&rule, "foo.bar();");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Expected line break before `.bar`.");

        let report = fix(&rule, "foo.bar();");
        assert_eq!(report.output, "foo\n.bar();");
        assert!(report.remaining.is_empty());
    }

    #[test]
    fn test_max_len_allows_line_of_exact_width() {
        let code = "foo.bar()";
        assert!(check(&MaxLenNewlinePerChainedCall::new().max_len(9), code).is_empty());
        assert_eq!(check(&MaxLenNewlinePerChainedCall::new().max_len(8), code).len(), 1);
    }

    #[test]
    fn test_max_len_ignores_links_already_on_their_own_line() {
        let rule = MaxLenNewlinePerChainedCall::new().max_len(10);
        let code = "const value = someObject\n  .method();";
        assert!(check(&rule, code).is_empty());
    }

    #[test]
    fn test_max_len_expands_tabs() {
        let code = "\t\tfoo.bar();";
        let wide = MaxLenNewlinePerChainedCall::new().max_len(12).tab_width(4);
        assert_eq!(check(&wide, code).len(), 1);

        let narrow = MaxLenNewlinePerChainedCall::new().max_len(12).tab_width(1);
        assert!(check(&narrow, code).is_empty());
    }

    #[test]
    fn test_ignores_plain_calls() {
        let rule = MaxLenNewlinePerChainedCall::new().max_len(1);
        assert!(check(&rule, "foo(bar(baz()));").is_empty());
    }

    #[test]
    fn test_fix_is_stable() {
        let rule = MaxLenNewlinePerChainedCall::new();
        let report = fix(&rule, "foo.a().b().c().d();");

        assert_eq!(report.output, "foo.a().b()\n.c()\n.d();");
        assert!(report.remaining.is_empty());
        assert!(check(&rule, &report.output).is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = RuleConfig::default()
            .with_option("ignore_chain_with_depth", 3)
            .with_option("max_len", 100);
        let rule = MaxLenNewlinePerChainedCall::from_config(&config).expect("valid options");
        assert_eq!(rule.ignore_chain_with_depth, 3);
        assert_eq!(rule.max_len, 100);
        assert_eq!(rule.tab_width, DEFAULT_TAB_WIDTH);

        let zero = RuleConfig::default().with_option("ignore_chain_with_depth", 0);
        assert!(MaxLenNewlinePerChainedCall::from_config(&zero).is_err());
        let eleven = RuleConfig::default().with_option("ignore_chain_with_depth", 11);
        assert!(MaxLenNewlinePerChainedCall::from_config(&eleven).is_err());
    }
}
