use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::Outline;

pub trait OutlineTreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl OutlineTreeConvert for Outline {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(outline: &Outline, node_idx: Index, parent_tree: &mut Tree<String>) {
            for (child_idx, child) in outline.children(node_idx) {
                let mut child_tree = Tree::new(child.to_string());
                build_tree(outline, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }

        let root = self.root_node();
        let label = if root.contents.is_empty() {
            "ROOT".to_string()
        } else {
            format!("ROOT ({} lines)", root.contents.len())
        };
        let mut tree = Tree::new(label);
        build_tree(self, self.root(), &mut tree);
        tree
    }
}
