//! Call-chain helpers: depth of a chained call and the text of its link.

use breakline_core::syntax::{NodeId, NodeKind, SourceCode, SyntaxTree};

/// Counts the chained calls ending at the call whose callee is `member`.
///
/// A lone `a.b()` has depth 1; `a.b().c()` has depth 2 at `.c`. Optional
/// chain wrappers are looked through on every step.
#[must_use]
pub fn chain_depth(tree: &SyntaxTree, member: NodeId) -> usize {
    let NodeKind::Member { object, .. } = tree.kind(member) else {
        return 1;
    };

    let mut depth = 1;
    let mut current = tree.skip_chain(*object);
    while let NodeKind::Call { callee, .. } = tree.kind(current) {
        depth += 1;
        match tree.kind(tree.skip_chain(*callee)) {
            NodeKind::Member { object, .. } => current = tree.skip_chain(*object),
            _ => break,
        }
    }
    depth
}

/// Text naming the link at `member`, e.g. `.then`, `?.map` or `[key]`.
///
/// Multi-line computed keys are cut to their first line and left unclosed.
#[must_use]
pub fn property_text(source: &SourceCode, member: NodeId) -> String {
    let NodeKind::Member {
        property,
        computed,
        optional,
        ..
    } = source.tree().kind(member)
    else {
        return String::new();
    };

    let prefix = match (computed, optional) {
        (true, true) => "?.[",
        (true, false) => "[",
        (false, true) => "?.",
        (false, false) => ".",
    };

    let text = source.node_text(*property);
    let first_line = text
        .split(['\r', '\n', '\u{2028}', '\u{2029}'])
        .next()
        .unwrap_or_default();
    let single_line = first_line.len() == text.len();
    let suffix = if *computed && single_line { "]" } else { "" };

    format!("{prefix}{first_line}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakline_core::parse;
    use breakline_core::syntax::{walk, Visitor};

    /// Collects the callee member of every call, in exit order.
    #[derive(Default)]
    struct Callees(Vec<NodeId>);

    impl Visitor for Callees {
        fn exit(&mut self, tree: &SyntaxTree, id: NodeId) {
            if let NodeKind::Call { callee, .. } = tree.kind(id) {
                let callee = tree.skip_chain(*callee);
                if matches!(tree.kind(callee), NodeKind::Member { .. }) {
                    self.0.push(callee);
                }
            }
        }
    }

    fn callees(code: &str) -> (SourceCode, Vec<NodeId>) {
        let source = parse(code).expect("Failed to parse");
        let mut visitor = Callees::default();
        walk(source.tree(), &mut visitor);
        (source, visitor.0)
    }

    #[test]
    fn test_depth_counts_chained_calls() {
        let (source, members) = callees("foo.bar().baz().qux();");
        let depths: Vec<usize> = members
            .iter()
            .map(|&m| chain_depth(source.tree(), m))
            .collect();
        assert_eq!(depths, vec![1, 2, 3]);
    }

    #[test]
    fn test_depth_looks_through_optional_chains() {
        let (source, members) = callees("a?.b().c?.().d();");
        let last = members.last().copied().expect("has calls");
        assert_eq!(chain_depth(source.tree(), last), 3);
    }

    #[test]
    fn test_depth_stops_at_plain_member() {
        let (source, members) = callees("a.b.c().d.e();");
        let last = members.last().copied().expect("has calls");
        assert_eq!(chain_depth(source.tree(), last), 1);
    }

    #[test]
    fn test_property_text_prefixes() {
        let (source, members) = callees("a.b().c?.d()[e]()?.[f]();");
        let texts: Vec<String> = members
            .iter()
            .map(|&m| property_text(&source, m))
            .collect();
        assert_eq!(texts, vec![".b", "?.d", "[e]", "?.[f]"]);
    }

    #[test]
    fn test_property_text_truncates_multiline_keys() {
        let (source, members) = callees("a.b()[x +\n y]();");
        let last = members.last().copied().expect("has calls");
        assert_eq!(property_text(&source, last), "[x +");
    }
}
