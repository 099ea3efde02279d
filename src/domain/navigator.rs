//! Lookup and serialization over a built outline.
//!
//! Content keys are not guaranteed unique. Lookups return the first match in
//! document order; `find_all_by_content_key` and `duplicate_content_keys`
//! expose the ambiguity to callers that care.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{Outline, OutlineNode};

/// Indent unit used for extraction and key rendering.
pub const DEFAULT_INDENT: &str = "    ";

impl Outline {
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_content_key(&self, key: &str) -> Option<Index> {
        self.iter()
            .find(|(_, _, node)| node.content_key == key)
            .map(|(idx, _, _)| idx)
    }

    pub fn find_node_by_content_key(&self, key: &str) -> Option<&OutlineNode> {
        self.find_by_content_key(key).and_then(|idx| self.get_node(idx))
    }

    pub fn find_all_by_content_key(&self, key: &str) -> Vec<Index> {
        self.iter()
            .filter(|(_, _, node)| node.content_key == key)
            .map(|(idx, _, _)| idx)
            .collect()
    }

    /// Content keys used by more than one heading, in order of first use.
    pub fn duplicate_content_keys(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for (_, _, node) in self.iter() {
            let count = counts.entry(node.content_key.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(node.content_key.clone());
            }
        }
        order
    }

    /// Serialize the section with content key `key` back into lines.
    ///
    /// The section heading sits at indent depth 0, its body one level
    /// deeper, and each descendant heading one level below its parent.
    /// Returns an empty vector when the key is unknown.
    #[instrument(level = "debug", skip(self, indent))]
    pub fn extract_section(&self, key: &str, indent: &str) -> Vec<String> {
        let Some(start) = self.find_by_content_key(key) else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        for (_, depth, node) in self.iter_from(start) {
            lines.push(format!("{}{}", indent.repeat(depth), node.heading()));
            let body_indent = indent.repeat(depth + 1);
            for body in &node.contents {
                lines.push(format!("{body_indent}{body}"));
            }
        }
        lines
    }

    /// Diagnostic rendering: `[fullNumberKey]  contentKey` per heading with
    /// body lines marked `└─` below it.
    pub fn render_keys(&self, indent: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for (_, depth, node) in self.iter() {
            let prefix = indent.repeat(depth);
            lines.push(format!("{prefix}{node}"));
            for body in &node.contents {
                lines.push(format!("{prefix}{indent}└─ {body}"));
            }
        }
        lines
    }

    /// Every heading's content key with the body lines it owns directly.
    pub fn section_map(&self) -> Vec<(String, Vec<String>)> {
        self.iter()
            .map(|(_, _, node)| (node.content_key.clone(), node.contents.clone()))
            .collect()
    }
}
