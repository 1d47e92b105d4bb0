#![warn(missing_docs)]

//!
//! A crate that builds decision tree classifiers
//! over tables of binary (0/1) attributes with a binary class label.
//!
//! The induction algorithm is the classic ID3 scheme:
//! starting from a root that sees the whole training table,
//! nodes are processed in first-in-first-out order and
//! each one splits on the attribute of maximal information gain,
//! computed from the base-2 entropy of the class distribution
//! among the rows reaching the node.
//! An attribute used by an ancestor is never reused,
//! so the tree depth is bounded by the number of attributes
//! and induction always terminates.
//!
//! ```no_run
//! use minitrees::{TableReader, DecisionTree, accuracy};
//!
//! let train = TableReader::default()
//!     .file("data/train.txt")
//!     .n_rows(800)
//!     .read()
//!     .unwrap();
//! let test = TableReader::default()
//!     .file("data/test.txt")
//!     .read()
//!     .unwrap();
//!
//! let tree = DecisionTree::fit(&train);
//! println!("{tree}");
//! println!("accuracy: {}%", accuracy(&test, &tree));
//! ```

pub mod constants;
pub mod checkers;
pub mod table;
pub mod tree;
pub mod classifier;
pub mod evaluation;
pub mod cross_validation;

pub use table::{Table, TableReader};
pub use tree::{DecisionTree, Node, NodeId};
pub use classifier::Classifier;
pub use evaluation::{accuracy, zero_one_loss};
pub use cross_validation::CrossValidation;
