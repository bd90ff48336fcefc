//! Measures the logical chain an expression belongs to.

use breakline_core::syntax::{NodeId, NodeKind, SourceCode, SyntaxTree};

/// Size of the outermost chain around a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainMetrics {
    /// Outermost node of the chain.
    pub root: NodeId,
    /// Length of the root's source text, in characters.
    pub span: usize,
    /// Operands counted along the root's left and right spines.
    pub operand_count: usize,
}

/// Aggregates the chain around `node`.
///
/// Logical expressions climb to the outermost logical ancestor and count
/// operands from there. Every other kind is measured on its own with a
/// single operand.
#[must_use]
pub fn aggregate(source: &SourceCode, node: NodeId) -> ChainMetrics {
    let tree = source.tree();
    let (root, operand_count) = if is_logical(tree, node) {
        let root = logical_root(tree, node);
        (root, count_operands(tree, root))
    } else {
        (node, 1)
    };

    ChainMetrics {
        root,
        span: source.node_text(root).chars().count(),
        operand_count,
    }
}

fn is_logical(tree: &SyntaxTree, id: NodeId) -> bool {
    matches!(tree.kind(id), NodeKind::Logical { .. })
}

fn logical_root(tree: &SyntaxTree, node: NodeId) -> NodeId {
    let mut root = node;
    while let Some(parent) = tree.parent(root).filter(|&p| is_logical(tree, p)) {
        root = parent;
    }
    root
}

/// Counts operands along the root's left and right spines.
///
/// Each logical link passed on a spine adds one operand, so
/// `a && b && c && d` has three links on the left and one on the right.
/// Comparisons such as `x === 0` are single operands.
fn count_operands(tree: &SyntaxTree, root: NodeId) -> usize {
    let spine = |step: fn(&NodeKind) -> Option<NodeId>| {
        let mut count = 0;
        let mut node = root;
        while let NodeKind::Logical { .. } = tree.kind(node) {
            count += 1;
            match step(tree.kind(node)) {
                Some(next) => node = next,
                None => break,
            }
        }
        count
    };
    spine(NodeKind::left) + spine(NodeKind::right)
}
