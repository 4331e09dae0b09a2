//! gini-cart
//!
//! Grow a binary CART classification tree from labelled rows by greedily
//! picking the question with the highest Gini information gain, then
//! classify new rows and report per-label confidence.
//!
//! ```
//! use gini_cart::{row, Dataset, DecisionTree};
//!
//! let data = Dataset::new(vec![
//!     row!["Green", 3, "Apple"],
//!     row!["Red", 1, "Grape"],
//!     row!["Yellow", 7, "Banana"],
//! ])
//! .unwrap();
//! let mut tree = DecisionTree::new();
//! tree.fit(&data).unwrap();
//! let p = tree.predict(&row!["Red", 1, "Grape"]).unwrap();
//! assert_eq!(p["Grape"], "100%");
//! ```

// Modules
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod node;
pub mod question;
pub mod splitter;
pub mod tree;

// Individual classes, and functions
pub use config::{ConfigIO, TreeConfig};
pub use data::{Dataset, LabelCounts, Predictions, Row, Value};
pub use errors::CartError;
pub use node::Node;
pub use question::Question;
pub use tree::{build_tree, classify, predict, DecisionTree};
