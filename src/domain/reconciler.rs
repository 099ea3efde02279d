//! Template-driven renumbering.
//!
//! A template outline defines canonical numbering per heading wording. A
//! report outline with the same wording gets its numbering tokens rewritten
//! to the template's, after which full number keys are rebuilt top-down.
//! Content keys are never touched.

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::Outline;

/// Content key -> numbering tokens seen in the template, document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateNumberMap {
    seen: BTreeMap<String, Vec<String>>,
}

impl TemplateNumberMap {
    #[instrument(level = "debug", skip_all, fields(headings = template.len()))]
    pub fn from_outline(template: &Outline) -> Self {
        let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (_, _, node) in template.iter() {
            seen.entry(node.content_key.clone())
                .or_default()
                .push(node.number_key.clone());
        }
        Self { seen }
    }

    /// The authoritative token: the first one seen for this wording.
    pub fn canonical(&self, content_key: &str) -> Option<&str> {
        self.seen
            .get(content_key)
            .and_then(|tokens| tokens.first())
            .map(String::as_str)
    }

    pub fn occurrences(&self, content_key: &str) -> &[String] {
        self.seen
            .get(content_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Wordings the template numbers in more than one way, sorted by key.
    pub fn conflicts(&self) -> Vec<(&str, Vec<&str>)> {
        self.seen
            .iter()
            .filter_map(|(key, tokens)| {
                let distinct: Vec<&str> = tokens.iter().map(String::as_str).unique().collect();
                (distinct.len() > 1).then_some((key.as_str(), distinct))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// One numbering rewrite applied to a report heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub content_key: String,
    pub from: String,
    pub to: String,
}

/// Rewrite the report's numbering to the template's and rebuild its full
/// number keys. Headings whose wording the template lacks keep their numbers.
#[instrument(level = "debug", skip_all, fields(headings = report.len(), template = map.len()))]
pub fn reconcile(report: &mut Outline, map: &TemplateNumberMap) -> Vec<Correction> {
    let order: Vec<_> = report.iter().map(|(idx, _, _)| idx).collect();
    let mut corrections = Vec::new();

    for idx in order {
        let Some(node) = report.get_node_mut(idx) else {
            continue;
        };
        let Some(canonical) = map.canonical(&node.content_key) else {
            continue;
        };
        if canonical == node.number_key {
            continue;
        }
        debug!(key = %node.content_key, from = %node.number_key, to = canonical, "renumber");
        corrections.push(Correction {
            content_key: node.content_key.clone(),
            from: std::mem::replace(&mut node.number_key, canonical.to_string()),
            to: canonical.to_string(),
        });
        node.raw_number = canonical.to_string();
    }

    report.rebuild_full_number_keys();
    corrections
}

impl Outline {
    /// Recompute every full number key from the current number keys,
    /// parents before children.
    pub fn rebuild_full_number_keys(&mut self) {
        let separators = self.separators().clone();
        let mut stack: Vec<_> = self
            .children(self.root())
            .map(|(idx, _)| (idx, String::new()))
            .collect();
        stack.reverse();

        while let Some((idx, parent_key)) = stack.pop() {
            let Some(node) = self.get_node_mut(idx) else {
                continue;
            };
            node.full_number_key = separators.full_number_key(&parent_key, &node.number_key);
            let key = node.full_number_key.clone();
            for &child in node.children.iter().rev() {
                stack.push((child, key.clone()));
            }
        }
    }
}
