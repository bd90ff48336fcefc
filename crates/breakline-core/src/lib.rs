//! # breakline-core
//!
//! Core framework for line-break linting of JavaScript sources.
//!
//! This crate plays the host role for layout rules. It includes:
//!
//! - [`parse`] turning source text into a [`SourceCode`] (text, tokens and
//!   an arena [`SyntaxTree`] with a parent index)
//! - [`Visitor`] / [`walk`] for enter/exit traversal
//! - [`Rule`] trait for per-file rules
//! - [`Violation`] and [`Replacement`] for findings and their fixes
//! - [`apply_fixes`] / [`fix_until_stable`] for non-overlapping fix application
//! - [`Analyzer`] for orchestrating lint execution over a directory
//!
//! ## Example
//!
//! ```ignore
//! use breakline_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod fixer;
mod parser;
mod rule;
mod types;

/// Syntax tree, tokens and traversal.
pub mod syntax;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use fixer::{apply_fixes, fix_until_stable, FixOutcome, FixReport, MAX_FIX_PASSES};
pub use parser::{parse, ParseError};
pub use rule::{Rule, RuleBox};
pub use syntax::{
    walk, NodeId, NodeKind, Position, SourceCode, SourceLocation, SyntaxTree, TextRange, Token,
    Visitor,
};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
