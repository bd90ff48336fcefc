//! Depth-first traversal with enter/exit callbacks.

use super::tree::{NodeId, SyntaxTree};

/// Callbacks invoked while walking a [`SyntaxTree`].
///
/// Rules match on [`NodeKind`](super::NodeKind) inside these hooks instead
/// of registering per-kind handlers.
pub trait Visitor {
    /// Called before any child of `id` is visited.
    fn enter(&mut self, _tree: &SyntaxTree, _id: NodeId) {}

    /// Called after every child of `id` has been visited.
    fn exit(&mut self, _tree: &SyntaxTree, _id: NodeId) {}
}

/// Walks the whole tree from its root.
pub fn walk<V: Visitor + ?Sized>(tree: &SyntaxTree, visitor: &mut V) {
    if let Some(root) = tree.root() {
        walk_node(tree, root, visitor);
    }
}

/// Walks the subtree rooted at `id`.
///
/// Uses an explicit stack so deeply nested chains cannot overflow.
pub fn walk_node<V: Visitor + ?Sized>(tree: &SyntaxTree, id: NodeId, visitor: &mut V) {
    enum Step {
        Enter(NodeId),
        Exit(NodeId),
    }

    let mut stack = vec![Step::Enter(id)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                visitor.enter(tree, id);
                stack.push(Step::Exit(id));
                for &child in tree.node(id).children.iter().rev() {
                    stack.push(Step::Enter(child));
                }
            }
            Step::Exit(id) => visitor.exit(tree, id),
        }
    }
}
