//! Rule presets.

use crate::{max_len_newline_perchained_call, multiline_logical_expression};
use crate::{MaxLenNewlinePerChainedCall, MultilineIfStatement, MultilineLogicalExpression};
use breakline_core::{Config, ConfigError, RuleBox};

/// Returns every available rule with default options.
///
/// Includes:
/// - `max-len-newline-perchained-call` (BL001) - Breaks long call chains
/// - `multiline-if-statement` (BL002) - Puts multi-line if conditions on their own lines
/// - `multiline-logical-expression` (BL003) - Breaks long expressions after operators
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MaxLenNewlinePerChainedCall::new()),
        Box::new(MultilineIfStatement::new()),
        Box::new(MultilineLogicalExpression::new()),
    ]
}

/// Returns every available rule, reading options from `[rules.<name>]` tables.
///
/// Enabling and severity overrides are applied later by the analyzer.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOption`] when a rule option is invalid.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let chained_call = config.rule(max_len_newline_perchained_call::NAME);
    let logical = config.rule(multiline_logical_expression::NAME);

    Ok(vec![
        Box::new(MaxLenNewlinePerChainedCall::from_config(&chained_call)?),
        Box::new(MultilineIfStatement::new()),
        Box::new(MultilineLogicalExpression::from_config(&logical)?),
    ])
}
