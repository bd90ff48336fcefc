//! JavaScript frontend: tree-sitter parse lowered into a [`SyntaxTree`].
//!
//! The lowering follows ESTree conventions where the rules depend on them:
//! parenthesized expressions are transparent, `&&`/`||`/`??` become logical
//! expressions, and a chain containing `?.` is wrapped in a
//! [`NodeKind::Chain`] node at its outermost link.

use crate::syntax::source::LineIndex;
use crate::syntax::{
    LogicalOperator, Node, NodeId, NodeKind, SourceCode, SyntaxTree, TextRange, Token,
};
use thiserror::Error;
use tracing::debug;

/// Errors raised while parsing a source file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("Failed to load JavaScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser returned no tree.
    #[error("Parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("Syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}

/// Grammar nodes never lowered into the tree.
const COMMENT_KINDS: &[&str] = &["comment", "html_comment"];

/// Grammar nodes emitted as one token even though they have children.
const ATOMIC_TOKEN_KINDS: &[&str] = &["string", "regex"];

/// Parses JavaScript source text.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when the text does not parse cleanly.
pub fn parse(text: impl Into<String>) -> Result<SourceCode, ParseError> {
    let text = text.into();
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
    let ts_tree = parser.parse(&text, None).ok_or(ParseError::NoTree)?;
    let root = ts_tree.root_node();

    let lines = LineIndex::new(&text);
    if root.has_error() {
        let offset = first_error(root).map_or(0, |n| n.start_byte());
        let position = lines.position(&text, offset);
        return Err(ParseError::Syntax {
            line: position.line,
            column: position.column + 1,
        });
    }

    let mut lowering = Lowering {
        text: &text,
        lines: &lines,
        tree: SyntaxTree::new(),
    };
    let program = lowering.lower(root);
    let mut tree = lowering.tree;
    tree.finish(program);

    let mut tokens = Vec::new();
    collect_tokens(root, &text, &lines, &mut tokens);
    debug!(
        "Lowered {} nodes and {} tokens",
        tree.len(),
        tokens.len()
    );

    Ok(SourceCode::new(text, tree, tokens))
}

/// Depth-first search for the first error or missing node.
fn first_error(root: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node
            .children(&mut cursor)
            .filter(tree_sitter::Node::has_error)
            .collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// Appends the tokens under `root` in source order.
fn collect_tokens(root: tree_sitter::Node<'_>, text: &str, lines: &LineIndex, out: &mut Vec<Token>) {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        let kind = node.kind();
        let is_token = node.child_count() == 0 || ATOMIC_TOKEN_KINDS.contains(&kind);

        if is_token && !COMMENT_KINDS.contains(&kind) {
            let range = TextRange::new(node.start_byte(), node.end_byte());
            if !range.is_empty() {
                out.push(Token {
                    value: text.get(range.start..range.end).unwrap_or("").to_string(),
                    range,
                    loc: lines.location(text, range),
                });
            }
        }

        let descend = !is_token && !COMMENT_KINDS.contains(&kind);
        if descend && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.node() == root {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

struct Lowering<'a> {
    text: &'a str,
    lines: &'a LineIndex,
    tree: SyntaxTree,
}

/// A lowered child together with the grammar field it was found in.
struct Child {
    field: Option<&'static str>,
    id: NodeId,
}

/// Pending work for the lowering loop.
enum Step<'tree> {
    /// Lower a grammar node; `in_chain` is set for the object or callee of a
    /// member access or call, where no chain wrapper may be placed.
    Visit {
        node: tree_sitter::Node<'tree>,
        in_chain: bool,
    },
    /// Build `node` from the last `fields.len()` lowered results.
    Build {
        node: tree_sitter::Node<'tree>,
        in_chain: bool,
        fields: Vec<Option<&'static str>>,
    },
}

impl Lowering<'_> {
    /// Lowers `root` and everything below it in post-order.
    ///
    /// Runs on an explicit stack; long call chains nest one level per link.
    fn lower(&mut self, root: tree_sitter::Node<'_>) -> NodeId {
        let mut steps = vec![Step::Visit {
            node: root,
            in_chain: false,
        }];
        let mut lowered: Vec<NodeId> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit { node, in_chain } => {
                    if node.kind() == "parenthesized_expression" {
                        if let Some(inner) = named_children(node).into_iter().next() {
                            steps.push(Step::Visit {
                                node: inner,
                                in_chain: false,
                            });
                            continue;
                        }
                    }
                    let children = lowerable_children(node);
                    steps.push(Step::Build {
                        node,
                        in_chain,
                        fields: children.iter().map(|(field, _, _)| *field).collect(),
                    });
                    steps.extend(children.into_iter().rev().map(|(_, child, in_chain)| {
                        Step::Visit {
                            node: child,
                            in_chain,
                        }
                    }));
                }
                Step::Build {
                    node,
                    in_chain,
                    fields,
                } => {
                    let ids = lowered.split_off(lowered.len().saturating_sub(fields.len()));
                    let children: Vec<Child> = fields
                        .into_iter()
                        .zip(ids)
                        .map(|(field, id)| Child { field, id })
                        .collect();
                    lowered.push(self.build(node, in_chain, &children));
                }
            }
        }

        lowered.pop().unwrap_or_else(|| self.push(root, other(root), Vec::new()))
    }

    /// Pushes the node for `node` whose children are already lowered.
    fn build(&mut self, node: tree_sitter::Node<'_>, in_chain: bool, children: &[Child]) -> NodeId {
        let field = |name: &str| {
            children
                .iter()
                .find(|c| c.field == Some(name))
                .map(|c| c.id)
        };
        let optional = has_child_kind(node, "optional_chain");

        let kind = match node.kind() {
            "call_expression" => match (field("function"), node.child_by_field_name("arguments")) {
                (Some(callee), Some(args)) if args.kind() != "template_string" => {
                    NodeKind::Call { callee, optional }
                }
                _ => other(node),
            },
            "member_expression" => match (field("object"), field("property")) {
                (Some(object), Some(property)) => NodeKind::Member {
                    object,
                    property,
                    computed: false,
                    optional,
                },
                _ => other(node),
            },
            "subscript_expression" => match (field("object"), field("index")) {
                (Some(object), Some(property)) => NodeKind::Member {
                    object,
                    property,
                    computed: true,
                    optional,
                },
                _ => other(node),
            },
            "binary_expression" => {
                let operator = self.field_text(node, "operator");
                match (field("left"), field("right")) {
                    (Some(left), Some(right)) => match LogicalOperator::from_token(&operator) {
                        Some(operator) => NodeKind::Logical {
                            left,
                            right,
                            operator,
                        },
                        None => NodeKind::Binary {
                            left,
                            right,
                            operator,
                        },
                    },
                    _ => other(node),
                }
            }
            "assignment_expression" | "augmented_assignment_expression" => {
                let operator = if node.kind() == "assignment_expression" {
                    "=".to_string()
                } else {
                    self.field_text(node, "operator")
                };
                match (field("left"), field("right")) {
                    (Some(left), Some(right)) => NodeKind::Assignment {
                        left,
                        right,
                        operator,
                    },
                    _ => other(node),
                }
            }
            "ternary_expression" => {
                match (field("condition"), field("consequence"), field("alternative")) {
                    (Some(test), Some(consequent), Some(alternate)) => NodeKind::Conditional {
                        test,
                        consequent,
                        alternate,
                    },
                    _ => other(node),
                }
            }
            "variable_declarator" => match field("name") {
                Some(id) => NodeKind::VariableDeclarator {
                    id,
                    init: field("value"),
                },
                None => other(node),
            },
            "field_definition" => match field("property") {
                Some(key) => NodeKind::PropertyDefinition {
                    key,
                    value: field("value"),
                },
                None => other(node),
            },
            "if_statement" => match (field("condition"), field("consequence")) {
                (Some(test), Some(consequent)) => NodeKind::If {
                    test,
                    consequent,
                    alternate: field("alternative"),
                },
                _ => other(node),
            },
            _ => other(node),
        };

        let id = self.push(node, kind, children.iter().map(|c| c.id).collect());
        if !in_chain && self.chain_has_optional(id) {
            let range = self.tree.node(id).range;
            return self.push_node(NodeKind::Chain { expression: id }, range, vec![id]);
        }
        id
    }

    /// Whether any link from `id` down its object/callee spine uses `?.`.
    fn chain_has_optional(&self, mut id: NodeId) -> bool {
        loop {
            match self.tree.kind(id) {
                NodeKind::Member {
                    object, optional, ..
                } => {
                    if *optional {
                        return true;
                    }
                    id = *object;
                }
                NodeKind::Call { callee, optional } => {
                    if *optional {
                        return true;
                    }
                    id = *callee;
                }
                _ => return false,
            }
        }
    }

    fn field_text(&self, node: tree_sitter::Node<'_>, name: &str) -> String {
        node.child_by_field_name(name)
            .and_then(|n| self.text.get(n.start_byte()..n.end_byte()))
            .unwrap_or("")
            .to_string()
    }

    fn push(&mut self, node: tree_sitter::Node<'_>, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        let range = TextRange::new(node.start_byte(), node.end_byte());
        self.push_node(kind, range, children)
    }

    fn push_node(&mut self, kind: NodeKind, range: TextRange, children: Vec<NodeId>) -> NodeId {
        self.tree.push(Node {
            kind,
            range,
            loc: self.lines.location(self.text, range),
            children,
        })
    }
}

/// Named, non-comment children of `node` with their field and whether they
/// sit in the object/callee position of a chain link.
fn lowerable_children(
    node: tree_sitter::Node<'_>,
) -> Vec<(Option<&'static str>, tree_sitter::Node<'_>, bool)> {
    let chain_field = matches!(
        node.kind(),
        "call_expression" | "member_expression" | "subscript_expression"
    );
    let mut children = Vec::new();
    let mut cursor = node.walk();
    if !cursor.goto_first_child() {
        return children;
    }
    loop {
        let child = cursor.node();
        let field = cursor.field_name();
        let skip = !child.is_named()
            || COMMENT_KINDS.contains(&child.kind())
            || child.kind() == "optional_chain";
        if !skip {
            let in_chain = chain_field && matches!(field, Some("function" | "object"));
            children.push((field, child, in_chain));
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }
    children
}

fn other(node: tree_sitter::Node<'_>) -> NodeKind {
    NodeKind::Other {
        name: node.kind().to_string(),
    }
}

fn named_children(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|n| !COMMENT_KINDS.contains(&n.kind()))
        .collect();
    children
}

fn has_child_kind(node: tree_sitter::Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}
