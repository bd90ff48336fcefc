//! Arena-backed syntax tree.
//!
//! Nodes own their children by id; parent links are a side index built once
//! when the tree is finished, so lookups upward never hold references into
//! the arena.

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextRange {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl TextRange {
    /// Creates a new range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for a zero-width range.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// A line/column pair. Lines are 1-based, columns are 0-based and count
/// Unicode scalar values from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed).
    pub column: usize,
}

/// Start and end positions of a node or token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Position of the first character.
    pub start: Position,
    /// Position just past the last character.
    pub end: Position,
}

impl SourceLocation {
    /// Returns true when start and end sit on different lines.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}

/// Operators that join logical expressions into one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    Coalesce,
}

impl LogicalOperator {
    /// Parses an operator token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            "??" => Some(Self::Coalesce),
            _ => None,
        }
    }

    /// Returns the operator as written in source.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Coalesce => "??",
        }
    }
}

/// The closed set of node kinds the layout rules reason about.
///
/// Anything else in the grammar lowers to [`NodeKind::Other`] and is only
/// kept so traversal reaches the nodes below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `callee(arguments)`, `callee?.(arguments)`.
    Call {
        /// The called expression.
        callee: NodeId,
        /// Whether the call is written `?.()`.
        optional: bool,
    },
    /// `object.property`, `object?.property`, `object[property]`.
    Member {
        /// Expression left of the access.
        object: NodeId,
        /// Property name or computed key.
        property: NodeId,
        /// Whether the access uses brackets.
        computed: bool,
        /// Whether the access uses `?.`.
        optional: bool,
    },
    /// Wrapper around the outermost link of a chain containing `?.`.
    Chain {
        /// The wrapped member access or call.
        expression: NodeId,
    },
    /// `left && right`, `left || right`, `left ?? right`.
    Logical {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
        /// The joining operator.
        operator: LogicalOperator,
    },
    /// Any other binary operator (`===`, `+`, `instanceof`, ...).
    Binary {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
        /// The operator as written.
        operator: String,
    },
    /// `left = right` and compound assignments.
    Assignment {
        /// Assignment target.
        left: NodeId,
        /// Assigned value.
        right: NodeId,
        /// The operator as written.
        operator: String,
    },
    /// `test ? consequent : alternate`.
    Conditional {
        /// Condition.
        test: NodeId,
        /// Value when the condition holds.
        consequent: NodeId,
        /// Value otherwise.
        alternate: NodeId,
    },
    /// `id = init` inside a `let`/`const`/`var` declaration.
    VariableDeclarator {
        /// Binding pattern.
        id: NodeId,
        /// Initializer, if any.
        init: Option<NodeId>,
    },
    /// Class field `key = value`.
    PropertyDefinition {
        /// Field name.
        key: NodeId,
        /// Field initializer, if any.
        value: Option<NodeId>,
    },
    /// `if (test) consequent else alternate`.
    If {
        /// Condition, without its parentheses.
        test: NodeId,
        /// Branch taken when the condition holds.
        consequent: NodeId,
        /// `else` branch, if any.
        alternate: Option<NodeId>,
    },
    /// Every other grammar node, tagged with its grammar name.
    Other {
        /// Grammar node name (e.g. `identifier`, `program`).
        name: String,
    },
}

impl NodeKind {
    /// Left operand of binary-family nodes.
    #[must_use]
    pub fn left(&self) -> Option<NodeId> {
        match self {
            Self::Logical { left, .. } | Self::Binary { left, .. } | Self::Assignment { left, .. } => {
                Some(*left)
            }
            _ => None,
        }
    }

    /// Right operand of binary-family nodes.
    #[must_use]
    pub fn right(&self) -> Option<NodeId> {
        match self {
            Self::Logical { right, .. }
            | Self::Binary { right, .. }
            | Self::Assignment { right, .. } => Some(*right),
            _ => None,
        }
    }

    /// Short name used in logs and tests.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Call { .. } => "CallExpression",
            Self::Member { .. } => "MemberExpression",
            Self::Chain { .. } => "ChainExpression",
            Self::Logical { .. } => "LogicalExpression",
            Self::Binary { .. } => "BinaryExpression",
            Self::Assignment { .. } => "AssignmentExpression",
            Self::Conditional { .. } => "ConditionalExpression",
            Self::VariableDeclarator { .. } => "VariableDeclarator",
            Self::PropertyDefinition { .. } => "PropertyDefinition",
            Self::If { .. } => "IfStatement",
            Self::Other { name } => name.as_str(),
        }
    }
}

/// A single node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// What the node is.
    pub kind: NodeKind,
    /// Byte range covered by the node.
    pub range: TextRange,
    /// Line/column span of the node.
    pub loc: SourceLocation,
    /// Child nodes in source order.
    pub children: Vec<NodeId>,
}

/// An owned syntax tree with a parent index.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    /// Marks `root` as the top of the tree and builds the parent index.
    pub fn finish(&mut self, root: NodeId) {
        self.parents = vec![None; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            let parent = NodeId(u32::try_from(index).unwrap_or(u32::MAX));
            for child in &node.children {
                self.parents[child.index()] = Some(parent);
            }
        }
        self.root = Some(root);
    }

    /// Returns the root node, if the tree has been finished.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns a node by id.
    ///
    /// Ids are only handed out by this tree, so indexing cannot fail for
    /// ids obtained from it.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Returns the parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Strips any number of optional-chain wrappers.
    #[must_use]
    pub fn skip_chain(&self, mut id: NodeId) -> NodeId {
        while let NodeKind::Chain { expression } = self.kind(id) {
            id = *expression;
        }
        id
    }
}
