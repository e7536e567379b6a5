//! Lookup structures compiled once per parser.
//!
//! [`TokenIndex`] is a character trie used for greedy longest-match of
//! multi-character tokens (combinators, attribute operators). [`NameIndex`]
//! is a plain membership set for single-word options such as attribute
//! case-sensitivity modifiers.

use std::collections::{HashMap, HashSet};

// ============================================================================
// TOKEN INDEX
// ============================================================================

/// One trie node: children keyed by the next character, plus the token that
/// ends exactly here (if any).
#[derive(Debug, Clone, Default)]
struct TokenNode {
    children: HashMap<char, TokenNode>,
    token: Option<String>,
}

/// Trie over a list of tokens with longest-match lookup at a position.
///
/// # Examples
///
/// ```rust
/// use cssel::indexes::TokenIndex;
/// let index = TokenIndex::new([">", "|", "||"]);
/// let input: Vec<char> = "||div".chars().collect();
/// assert_eq!(index.match_at(&input, 0), Some("||"));
/// assert_eq!(index.match_at(&input, 1), Some("|"));
/// assert_eq!(index.match_at(&input, 2), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    root: TokenNode,
}

impl TokenIndex {
    /// Builds the trie. Duplicate tokens collapse into one entry.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for token in tokens {
            index.insert(token.as_ref());
        }
        index
    }

    /// An index that never matches.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    fn insert(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for c in token.chars() {
            node = node.children.entry(c).or_default();
        }
        node.token = Some(token.to_string());
    }

    /// Returns the longest registered token starting at `pos`, if any.
    pub fn match_at(&self, input: &[char], pos: usize) -> Option<&str> {
        Self::match_from(&self.root, input, pos)
    }

    // Longest path first: recurse on the next character, then fall back to
    // the token terminating at the current node.
    fn match_from<'i>(node: &'i TokenNode, input: &[char], pos: usize) -> Option<&'i str> {
        let child = node.children.get(input.get(pos)?)?;
        Self::match_from(child, input, pos + 1).or(child.token.as_deref())
    }
}

// ============================================================================
// NAME INDEX
// ============================================================================

/// Set of accepted names (case-sensitive).
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: HashSet<String>,
}

impl NameIndex {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
