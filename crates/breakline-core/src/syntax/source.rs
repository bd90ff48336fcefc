//! Source text accessor: lines, positions, tokens and the parsed tree.

use super::tree::{NodeId, Position, SourceLocation, SyntaxTree, TextRange};

/// A single lexical token. Comments are not tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text as written.
    pub value: String,
    /// Byte range of the token.
    pub range: TextRange,
    /// Line/column span of the token.
    pub loc: SourceLocation,
}

impl Token {
    /// Returns true for a `)` token.
    #[must_use]
    pub fn is_closing_paren(&self) -> bool {
        self.value == ")"
    }
}

/// A parsed source file: text, line index, tokens and syntax tree.
#[derive(Debug, Clone)]
pub struct SourceCode {
    text: String,
    line_index: LineIndex,
    tokens: Vec<Token>,
    tree: SyntaxTree,
}

impl SourceCode {
    /// Assembles a source file from already built parts.
    #[must_use]
    pub fn new(text: String, tree: SyntaxTree, tokens: Vec<Token>) -> Self {
        let line_index = LineIndex::new(&text);
        Self {
            text,
            line_index,
            tokens,
            tree,
        }
    }

    /// Full file text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text of a byte range. Out-of-bounds ranges yield an empty string.
    #[must_use]
    pub fn slice(&self, range: TextRange) -> &str {
        self.text.get(range.start..range.end).unwrap_or("")
    }

    /// Source text of a node.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> &str {
        self.slice(self.tree.node(id).range)
    }

    /// The syntax tree.
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// All tokens in source order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of lines in the file.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_index.starts.len()
    }

    /// Text of line `line` (1-indexed) without its terminator.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        let index = line.checked_sub(1)?;
        let start = *self.line_index.starts.get(index)?;
        let end = self
            .line_index
            .starts
            .get(index + 1)
            .map_or(self.text.len(), |&next| {
                next - terminator_len(&self.text[..next])
            });
        self.text.get(start..end)
    }

    /// Iterates over all lines without terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        (1..=self.line_count()).filter_map(|n| self.line(n))
    }

    /// Converts a byte offset into a line/column position.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        self.line_index.position(&self.text, offset)
    }

    /// Converts a byte range into start/end positions.
    #[must_use]
    pub fn location(&self, range: TextRange) -> SourceLocation {
        self.line_index.location(&self.text, range)
    }

    /// Last token ending at or before `offset` that satisfies `predicate`.
    pub fn token_before(
        &self,
        offset: usize,
        mut predicate: impl FnMut(&Token) -> bool,
    ) -> Option<&Token> {
        let upper = self.tokens.partition_point(|t| t.range.end <= offset);
        self.tokens[..upper].iter().rev().find(|t| predicate(t))
    }

    /// First token starting at or after `offset` that satisfies `predicate`.
    pub fn token_after(
        &self,
        offset: usize,
        mut predicate: impl FnMut(&Token) -> bool,
    ) -> Option<&Token> {
        let lower = self.tokens.partition_point(|t| t.range.start < offset);
        self.tokens[lower..].iter().find(|t| predicate(t))
    }
}

/// Byte offsets at which each line starts.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    /// Indexes `text`, treating `\r\n`, `\r`, `\n`, U+2028 and U+2029 as breaks.
    pub(crate) fn new(text: &str) -> Self {
        let mut starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((index, ch)) = chars.next() {
            match ch {
                '\r' => {
                    if let Some(&(next, '\n')) = chars.peek() {
                        chars.next();
                        starts.push(next + 1);
                    } else {
                        starts.push(index + 1);
                    }
                }
                '\n' | '\u{2028}' | '\u{2029}' => starts.push(index + ch.len_utf8()),
                _ => {}
            }
        }
        Self { starts }
    }

    pub(crate) fn position(&self, text: &str, offset: usize) -> Position {
        let offset = offset.min(text.len());
        let index = self
            .starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.starts.get(index).copied().unwrap_or(0);
        let column = text
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        Position {
            line: index + 1,
            column,
        }
    }

    pub(crate) fn location(&self, text: &str, range: TextRange) -> SourceLocation {
        SourceLocation {
            start: self.position(text, range.start),
            end: self.position(text, range.end),
        }
    }
}

/// Length of the line terminator that `prefix` ends with.
fn terminator_len(prefix: &str) -> usize {
    if prefix.ends_with("\r\n") {
        2
    } else {
        prefix.chars().next_back().map_or(0, char::len_utf8)
    }
}
