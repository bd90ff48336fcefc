//! # breakline-rules
//!
//! Built-in layout rules for breakline.
//!
//! Each rule inspects the parsed tree and source text of a JavaScript file
//! and proposes line-break fixes.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | BL001 | `max-len-newline-perchained-call` | Requires a newline before deeply chained or overlong calls |
//! | BL002 | `multiline-if-statement` | Puts the parentheses of a multi-line `if` condition on their own lines |
//! | BL003 | `multiline-logical-expression` | Breaks long logical, assignment and ternary expressions after their operators |
//!
//! ## Usage
//!
//! ```ignore
//! use breakline_core::Analyzer;
//! use breakline_rules::{MaxLenNewlinePerChainedCall, MultilineLogicalExpression};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MaxLenNewlinePerChainedCall::new().max_len(100))
//!     .rule(MultilineLogicalExpression::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod chain;
pub mod measure;

mod max_len_newline_perchained_call;
mod multiline_if_statement;
mod multiline_logical_expression;
mod presets;

#[cfg(test)]
mod testing;

pub use max_len_newline_perchained_call::MaxLenNewlinePerChainedCall;
pub use multiline_if_statement::MultilineIfStatement;
pub use multiline_logical_expression::MultilineLogicalExpression;
pub use presets::{all_rules, rules_from_config};

/// Re-export core types for convenience.
pub use breakline_core::{Rule, Severity, Violation};
