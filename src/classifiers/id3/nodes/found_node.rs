use crate::classifiers::id3::nodes::{DecisionNode, LeafNode};

/// Where a record ends up when filtered down a tree.
#[derive(Debug, Clone, Copy)]
pub enum FoundNode<'a> {
    Leaf(&'a LeafNode),
    /// Traversal stopped at `parent`, which has no branch for `value`.
    Unrouted {
        parent: &'a DecisionNode,
        value: &'a str,
    },
}
