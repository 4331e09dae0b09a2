pub mod predict;
pub mod setters;
pub mod tree;

pub use predict::{classify, predict, Evaluation};
pub use tree::{build_tree, DecisionTree};
