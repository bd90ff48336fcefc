//! Applies automatic fixes carried by violations.
//!
//! One pass applies every fix that does not touch an earlier one; the rest
//! wait for the next pass, after the file has been re-linted. A fix whose
//! range starts where the previous applied fix ended is deferred too.

use crate::types::{Replacement, Violation};
use tracing::debug;

/// Upper bound on lint/fix passes over one file.
pub const MAX_FIX_PASSES: usize = 10;

/// Outcome of a single fix pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// Text after applying the accepted fixes.
    pub output: String,
    /// Number of fixes applied.
    pub applied: usize,
    /// Number of fixes deferred because they touched an applied one.
    pub deferred: usize,
}

/// Outcome of fixing a file until it is stable.
#[derive(Debug, Clone)]
pub struct FixReport {
    /// Final text.
    pub output: String,
    /// Passes that applied at least one fix.
    pub passes: usize,
    /// Total fixes applied across passes.
    pub applied: usize,
    /// Violations left in the final text.
    pub remaining: Vec<Violation>,
}

impl FixReport {
    /// Whether the text changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Applies the non-overlapping fixes of `violations` to `text`.
#[must_use]
pub fn apply_fixes(text: &str, violations: &[Violation]) -> FixOutcome {
    let mut fixes: Vec<&Replacement> = violations.iter().filter_map(Violation::fix).collect();
    fixes.sort_by(|a, b| {
        a.location
            .offset
            .cmp(&b.location.offset)
            .then(a.location.length.cmp(&b.location.length))
    });

    let mut accepted = Vec::with_capacity(fixes.len());
    let mut last_end: Option<usize> = None;
    let mut deferred = 0;

    for fix in fixes {
        let range = fix.location.range();
        let in_bounds = range.end <= text.len()
            && text.is_char_boundary(range.start)
            && text.is_char_boundary(range.end);
        if !in_bounds {
            debug!("Dropping fix with invalid range {}..{}", range.start, range.end);
            continue;
        }
        if last_end.is_some_and(|end| range.start <= end) {
            deferred += 1;
            continue;
        }
        last_end = Some(range.end);
        accepted.push(fix);
    }

    let mut output = text.to_string();
    for fix in accepted.iter().rev() {
        let range = fix.location.range();
        output.replace_range(range.start..range.end, &fix.new_text);
    }

    FixOutcome {
        output,
        applied: accepted.len(),
        deferred,
    }
}

/// Lints and fixes `text` repeatedly until no fix applies or
/// [`MAX_FIX_PASSES`] is reached.
///
/// # Errors
///
/// Propagates the first error returned by `lint`.
pub fn fix_until_stable<E>(
    text: &str,
    mut lint: impl FnMut(&str) -> Result<Vec<Violation>, E>,
) -> Result<FixReport, E> {
    let mut output = text.to_string();
    let mut passes = 0;
    let mut applied = 0;
    let mut remaining = lint(&output)?;

    while passes < MAX_FIX_PASSES {
        let outcome = apply_fixes(&output, &remaining);
        if outcome.applied == 0 {
            break;
        }
        passes += 1;
        applied += outcome.applied;
        output = outcome.output;
        remaining = lint(&output)?;
        debug!(
            "Fix pass {passes}: applied {}, deferred {}, {} violation(s) left",
            outcome.applied,
            outcome.deferred,
            remaining.len()
        );
    }

    Ok(FixReport {
        output,
        passes,
        applied,
        remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity, Suggestion};
    use std::convert::Infallible;
    use std::path::PathBuf;

    fn fix_at(offset: usize, length: usize, text: &str) -> Violation {
        let location = Location::new(PathBuf::from("a.js"), 1, offset + 1).with_span(offset, length);
        Violation::new("T1", "test", Severity::Error, location.clone(), "msg")
            .with_suggestion(Suggestion::with_fix("fix", Replacement::new(location, text)))
    }

    #[test]
    fn applies_fixes_back_to_front() {
        let outcome = apply_fixes("a && b || c", &[fix_at(7, 2, "||\n"), fix_at(2, 2, "&&\n")]);
        assert_eq!(outcome.output, "a &&\n b ||\n c");
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.deferred, 0);
    }

    #[test]
    fn defers_overlapping_and_adjacent_fixes() {
        let outcome = apply_fixes(
            "abcdef",
            &[fix_at(0, 3, "X"), fix_at(2, 2, "Y"), fix_at(3, 0, "Z")],
        );
        assert_eq!(outcome.output, "Xdef");
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.deferred, 2);
    }

    #[test]
    fn ignores_violations_without_fixes() {
        let plain = Violation::new(
            "T1",
            "test",
            Severity::Error,
            Location::new(PathBuf::from("a.js"), 1, 1),
            "msg",
        );
        let outcome = apply_fixes("abc", &[plain]);
        assert_eq!(outcome.output, "abc");
        assert_eq!(outcome.applied, 0);
    }

    #[test]
    fn drops_out_of_bounds_fixes() {
        let outcome = apply_fixes("abc", &[fix_at(2, 5, "x")]);
        assert_eq!(outcome.output, "abc");
        assert_eq!(outcome.applied, 0);
    }

    #[test]
    fn fix_until_stable_reruns_deferred_fixes() {
        // Each pass wants to wrap the first bare `x` in brackets.
        let lint = |text: &str| -> Result<Vec<Violation>, Infallible> {
            Ok(text
                .find("x")
                .filter(|&i| !text[..i].ends_with('['))
                .map(|i| vec![fix_at(i, 1, "[x]")])
                .unwrap_or_default())
        };
        let report = fix_until_stable("x", lint).expect("infallible");
        assert_eq!(report.output, "[x]");
        assert_eq!(report.passes, 1);
        assert!(report.remaining.is_empty());
        assert!(report.changed());
    }

    #[test]
    fn fix_until_stable_stops_after_max_passes() {
        let lint = |text: &str| -> Result<Vec<Violation>, Infallible> {
            Ok(vec![fix_at(text.len(), 0, "!")])
        };
        let report = fix_until_stable("", lint).expect("infallible");
        assert_eq!(report.passes, MAX_FIX_PASSES);
        assert_eq!(report.output, "!".repeat(MAX_FIX_PASSES));
    }
}
