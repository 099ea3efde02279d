use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::keys::KeySeparators;

/// One heading of the outline, or the synthetic root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineNode {
    /// 0 for the root, 1..=N for headings
    pub level: usize,
    /// Numbering token as written, punctuation included
    pub raw_number: String,
    /// Heading text without the numbering token
    pub title: String,
    /// Numbering token used for key composition
    pub number_key: String,
    /// Number keys from level 1 down to this node
    pub full_number_key: String,
    /// Titles from level 1 down to this node
    pub content_key: String,
    /// Body lines owned directly by this heading
    pub contents: Vec<String>,
    /// Child headings in document order
    pub children: Vec<Index>,
}

impl OutlineNode {
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// The heading line as it appears in text: `rawNumber title`.
    pub fn heading(&self) -> String {
        format!("{} {}", self.raw_number, self.title)
    }
}

impl fmt::Display for OutlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]  {}", self.full_number_key, self.content_key)
    }
}

/// Arena-backed outline tree.
///
/// Nodes are never removed, so every index handed out stays valid for the
/// lifetime of the outline. The root always exists.
#[derive(Debug)]
pub struct Outline {
    arena: Arena<OutlineNode>,
    root: Index,
    separators: KeySeparators,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new(KeySeparators::default())
    }
}

impl Outline {
    pub fn new(separators: KeySeparators) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(OutlineNode::default());
        Self {
            arena,
            root,
            separators,
        }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &OutlineNode {
        &self.arena[self.root]
    }

    pub fn separators(&self) -> &KeySeparators {
        &self.separators
    }

    pub fn get_node(&self, idx: Index) -> Option<&OutlineNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut OutlineNode> {
        self.arena.get_mut(idx)
    }

    #[instrument(level = "trace", skip(self, node), fields(level = node.level))]
    pub fn append_child(&mut self, parent: Index, node: OutlineNode) -> Index {
        let idx = self.arena.insert(node);
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(idx);
        }
        idx
    }

    pub fn push_content(&mut self, idx: Index, line: impl Into<String>) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.contents.push(line.into());
        }
    }

    /// Direct children of a node, in document order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = (Index, &OutlineNode)> + '_ {
        self.arena
            .get(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&child| self.arena.get(child).map(|n| (child, n)))
    }

    /// Number of headings (root excluded).
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest heading level present, 0 for an outline without headings.
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, _, n)| n.level).max().unwrap_or(0)
    }

    /// All headings in document order (pre-order), root excluded.
    /// Depth is relative: level-1 headings are at depth 0.
    pub fn iter(&self) -> OutlineIter<'_> {
        let mut stack = Vec::new();
        if let Some(root) = self.arena.get(self.root) {
            for &child in root.children.iter().rev() {
                stack.push((child, 0));
            }
        }
        OutlineIter {
            outline: self,
            stack,
        }
    }

    /// The subtree under `idx` in document order, `idx` itself at depth 0.
    /// Iterating from the root behaves like [`Outline::iter`].
    pub fn iter_from(&self, idx: Index) -> OutlineIter<'_> {
        if idx == self.root {
            return self.iter();
        }
        OutlineIter {
            outline: self,
            stack: vec![(idx, 0)],
        }
    }
}

pub struct OutlineIter<'a> {
    outline: &'a Outline,
    stack: Vec<(Index, usize)>,
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = (Index, usize, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.outline.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current_idx, depth, node));
            }
        }
        None
    }
}
