//! Outline builder: turns a flat line sequence into a heading tree.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{Outline, OutlineNode};
use crate::domain::classifier::HeadingPatterns;
use crate::domain::keys::KeySeparators;

/// Builds outlines with a fixed pattern cascade and key separators.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    patterns: HeadingPatterns,
    separators: KeySeparators,
}

impl OutlineBuilder {
    pub fn new(patterns: HeadingPatterns, separators: KeySeparators) -> Self {
        Self {
            patterns,
            separators,
        }
    }

    pub fn patterns(&self) -> &HeadingPatterns {
        &self.patterns
    }

    pub fn separators(&self) -> &KeySeparators {
        &self.separators
    }

    /// Build the outline for `lines`.
    ///
    /// Lines are trimmed, blank lines skipped. A heading is attached under the
    /// most recent heading one level up; without one it is an orphan and gets
    /// dropped. Any other line is body text of the deepest open heading, or of
    /// the root before the first heading.
    #[instrument(level = "debug", skip_all, fields(lines = lines.len()))]
    pub fn build<S: AsRef<str>>(&self, lines: &[S]) -> Outline {
        let mut outline = Outline::new(self.separators.clone());
        // slot 0 stays empty; slot L holds the open level-L heading
        let mut cursor: Vec<Option<Index>> = vec![None; self.patterns.len() + 1];

        for (line_no, line) in lines.iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let Some(heading) = self.patterns.classify(line) else {
                let target = cursor
                    .iter()
                    .rev()
                    .flatten()
                    .next()
                    .copied()
                    .unwrap_or_else(|| outline.root());
                outline.push_content(target, line);
                continue;
            };

            let level = heading.level;
            let parent = if level == 1 {
                outline.root()
            } else if let Some(parent) = cursor[level - 1] {
                parent
            } else {
                debug!(line_no, level, line, "dropping orphan heading");
                continue;
            };

            let number = self
                .patterns
                .format_number(level, heading.numeral)
                .unwrap_or_else(|| heading.numeral.to_string());
            let node = self.create_node(&outline, parent, level, number, heading.title);
            let idx = outline.append_child(parent, node);

            cursor[level] = Some(idx);
            for slot in cursor.iter_mut().skip(level + 1) {
                *slot = None;
            }
        }

        debug!(headings = outline.len(), depth = outline.depth(), "outline built");
        outline
    }

    fn create_node(
        &self,
        outline: &Outline,
        parent: Index,
        level: usize,
        number: String,
        title: &str,
    ) -> OutlineNode {
        let (parent_number, parent_content) = outline
            .get_node(parent)
            .map(|p| (p.full_number_key.as_str(), p.content_key.as_str()))
            .unwrap_or_default();

        OutlineNode {
            level,
            full_number_key: self.separators.full_number_key(parent_number, &number),
            content_key: self.separators.content_key(parent_content, title),
            raw_number: number.clone(),
            number_key: number,
            title: title.to_string(),
            contents: Vec::new(),
            children: Vec::new(),
        }
    }
}
