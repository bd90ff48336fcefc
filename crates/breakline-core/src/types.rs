//! Core types for lint violations and results.

use crate::syntax::{SourceCode, TextRange};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Line where the span ends (1-indexed).
    pub end_line: usize,
    /// Column where the span ends (1-indexed, exclusive).
    pub end_column: usize,
    /// Byte offset in file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a location covering `range` of a parsed file.
    #[must_use]
    pub fn from_range(file: PathBuf, source: &SourceCode, range: TextRange) -> Self {
        let loc = source.location(range);
        Self {
            file,
            line: loc.start.line,
            column: loc.start.column + 1,
            end_line: loc.end.line,
            end_column: loc.end.column + 1,
            offset: range.start,
            length: range.len(),
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            end_line: line,
            end_column: column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }

    /// Byte range covered by this location.
    #[must_use]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.offset, self.offset + self.length)
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
    /// Optional automatic replacement.
    pub replacement: Option<Replacement>,
}

impl Suggestion {
    /// Creates a new suggestion with automatic fix.
    #[must_use]
    pub fn with_fix(message: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement),
        }
    }
}

/// An automatic code replacement. Insertions have a zero-length location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Location to replace.
    pub location: Location,
    /// New text to insert.
    pub new_text: String,
}

impl Replacement {
    /// Creates a new replacement.
    #[must_use]
    pub fn new(location: Location, new_text: impl Into<String>) -> Self {
        Self {
            location,
            new_text: new_text.into(),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "BL001").
    pub code: String,
    /// Rule name (e.g., "multiline-if-statement").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Returns the automatic fix, if the violation carries one.
    #[must_use]
    pub fn fix(&self) -> Option<&Replacement> {
        self.suggestion.as_ref()?.replacement.as_ref()
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation paired with its file source for rich `miette` rendering.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` within `content`.
    #[must_use]
    pub fn new(violation: &Violation, content: String) -> Self {
        let name = violation.location.file.display().to_string();
        Self {
            message: format!("[{}] {}", violation.code, violation.message),
            help: violation.suggestion.as_ref().map(|s| s.message.clone()),
            source_code: NamedSource::new(name, content),
            span: SourceSpan::from((violation.location.offset, violation.location.length)),
            label_message: violation.rule.clone(),
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found (after fixing, the ones that remain).
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of files rewritten by automatic fixes.
    #[serde(default)]
    pub files_fixed: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violation meets or exceeds `threshold`.
    #[must_use]
    pub fn has_violations_at(&self, threshold: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= threshold)
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Counts violations as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(e, w, i), v| match v.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// Number of violations that carry an automatic fix.
    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.violations.iter().filter(|v| v.fix().is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "BL003",
            "multiline-logical-expression",
            severity,
            Location::new(PathBuf::from("src/app.js"), 4, 18).with_span(40, 2),
            "Expected newline",
        )
    }

    fn with_fix(violation: Violation) -> Violation {
        let replacement = Replacement::new(violation.location.clone(), "&&\n");
        violation.with_suggestion(Suggestion::with_fix("Break the line", replacement))
    }

    #[test]
    fn location_range_covers_offset_and_length() {
        let v = make_violation(Severity::Error);
        assert_eq!(v.location.range(), TextRange::new(40, 42));
    }

    #[test]
    fn fix_returns_replacement() {
        let v = with_fix(make_violation(Severity::Error));
        assert_eq!(v.fix().map(|r| r.new_text.as_str()), Some("&&\n"));
    }

    #[test]
    fn violation_display_is_one_line() {
        let v = make_violation(Severity::Error);
        assert_eq!(
            format!("{v}"),
            "src/app.js:4:18: error [BL003] Expected newline"
        );
    }

    #[test]
    fn violation_format_includes_help() {
        let v = with_fix(make_violation(Severity::Warning));
        let formatted = v.format();
        assert!(formatted.contains("warning: Expected newline"));
        assert!(formatted.contains("= help: Break the line"));
    }

    #[test]
    fn diagnostic_carries_code_and_rule() {
        let v = make_violation(Severity::Error);
        let diagnostic = ViolationDiagnostic::new(&v, "x".repeat(64));
        assert_eq!(diagnostic.to_string(), "[BL003] Expected newline");
    }

    // --- LintResult tests ---

    #[test]
    fn has_violations_at_error_only() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
    }

    #[test]
    fn fixable_count_skips_manual_suggestions() {
        let mut result = LintResult::new();
        result.violations.push(with_fix(make_violation(Severity::Error)));
        result.violations.push(make_violation(Severity::Error));
        assert_eq!(result.fixable_count(), 1);
    }

    #[test]
    fn count_by_severity_splits_levels() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Info));
        result.violations.push(make_violation(Severity::Error));
        assert_eq!(result.count_by_severity(), (2, 0, 1));
        assert!(result.has_errors());
    }
}
