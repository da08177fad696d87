mod decision_node;
mod found_node;
mod leaf_node;
mod node;

pub use decision_node::DecisionNode;
pub use found_node::FoundNode;
pub use leaf_node::{LeafNode, LeafOrigin};
pub use node::Node;
