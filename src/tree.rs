//! Defines the decision tree and its node model.

mod node;
mod split;
mod dtree;

pub use node::{Node, NodeId};
pub use split::binary_entropy;
pub use dtree::DecisionTree;
