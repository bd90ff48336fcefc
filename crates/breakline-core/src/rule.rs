//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::SourceCode;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a parsed JavaScript source.
///
/// Rules receive the parsed [`SourceCode`] (text, tokens and syntax tree) and
/// usually drive a [`Visitor`](crate::syntax::Visitor) over the tree.
/// A rule must be a pure function of its input: it may not keep state between
/// nodes or files.
///
/// # Example
///
/// ```ignore
/// use breakline_core::{FileContext, Rule, SourceCode, Violation};
///
/// pub struct NoEmptyFile;
///
/// impl Rule for NoEmptyFile {
///     fn name(&self) -> &'static str { "no-empty-file" }
///     fn code(&self) -> &'static str { "BL900" }
///
///     fn check(&self, ctx: &FileContext, source: &SourceCode) -> Vec<Violation> {
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "multiline-if-statement").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "BL002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether violations from this rule carry automatic fixes.
    fn fixable(&self) -> bool {
        false
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `source` - The parsed source file
    ///
    /// # Returns
    ///
    /// A vector of violations found in this file.
    fn check(&self, ctx: &FileContext, source: &SourceCode) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
