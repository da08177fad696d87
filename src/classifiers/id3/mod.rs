mod id3_tree;
pub mod nodes;
pub mod split_criteria;
mod tree_builder;
mod unseen_value_policy;

pub use id3_tree::Id3Tree;
pub use nodes::{DecisionNode, FoundNode, LeafNode, LeafOrigin, Node};
pub use tree_builder::{SplitValues, SplitValuesKind, TreeBuilder, majority_label};
pub use unseen_value_policy::UnseenValuePolicy;
