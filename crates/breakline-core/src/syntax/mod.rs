//! Syntax model shared by the parser frontend and the rules.

pub(crate) mod source;
mod tree;
mod visit;

pub use source::{SourceCode, Token};
pub use tree::{
    LogicalOperator, Node, NodeId, NodeKind, Position, SourceLocation, SyntaxTree, TextRange,
};
pub use visit::{walk, walk_node, Visitor};
