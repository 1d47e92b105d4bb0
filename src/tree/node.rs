//! Defines the inner representation
//! of the decision tree.
use serde::{Serialize, Deserialize};

use std::fmt;

use super::split::SideStats;

/// Index of a node in the tree arena.
/// This is just a wrapper for `usize`.
/// Nodes refer to each other by `NodeId`,
/// so the tree carries no reference cycles
/// and serializes as plain data.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub(crate) usize);

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        Self(id)
    }
}

/// The id of the root node.
/// The root is always the first node pushed into the arena.
pub(crate) const ROOT: NodeId = NodeId(0);

/// A single vertex of the decision tree.
///
/// Statistics (`entropy`, `n_reaching`, `frac_zero`) describe
/// the class distribution of the training rows reaching the node
/// at induction time.
/// A node is a leaf **iff** `predicted_class` is set;
/// `split_attribute` is set **iff** the node is a branch.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) entropy: f64,
    pub(crate) n_reaching: usize,
    pub(crate) frac_zero: f64,
    pub(crate) split_attribute: Option<usize>,
    pub(crate) branch_value: u8,
    pub(crate) predicted_class: Option<u8>,
    pub(crate) lineage: Vec<(usize, u8)>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// Construct the root node from the global class distribution.
    pub(crate) fn root(entropy: f64, n_reaching: usize, frac_zero: f64)
        -> Self
    {
        Self {
            entropy,
            n_reaching,
            frac_zero,
            split_attribute: None,
            branch_value: 0,
            predicted_class: None,
            lineage: Vec::new(),
            left: None,
            right: None,
            parent: None,
        }
    }

    /// Construct a child node for one side of a split.
    /// The child inherits the parent's lineage,
    /// prefixed with the pair `(split_attribute, branch_value)`,
    /// and becomes a leaf immediately when its side was pure.
    pub(crate) fn child(
        parent_lineage: &[(usize, u8)],
        parent: NodeId,
        split_attribute: usize,
        branch_value: u8,
        stats: &SideStats,
    ) -> Self
    {
        let mut lineage = Vec::with_capacity(parent_lineage.len() + 1);
        lineage.push((split_attribute, branch_value));
        lineage.extend_from_slice(parent_lineage);

        Self {
            entropy: stats.entropy,
            n_reaching: stats.n_reaching,
            frac_zero: stats.frac_zero,
            split_attribute: None,
            branch_value,
            predicted_class: stats.pure_class,
            lineage,
            left: None,
            right: None,
            parent: Some(parent),
        }
    }

    /// `true` iff this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.predicted_class.is_some()
    }

    /// Base-2 entropy of the class distribution
    /// of the training rows reaching this node.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Number of training rows reaching this node.
    pub fn n_reaching(&self) -> usize {
        self.n_reaching
    }

    /// Fraction of the reaching rows whose class is `0`.
    pub fn frac_zero(&self) -> f64 {
        self.frac_zero
    }

    /// The attribute this node splits on.
    /// `None` for leaves.
    pub fn split_attribute(&self) -> Option<usize> {
        self.split_attribute
    }

    /// Which branch (`0` or `1`) of the parent's split this node is.
    /// Meaningless for the root.
    pub fn branch_value(&self) -> u8 {
        self.branch_value
    }

    /// The class this node predicts.
    /// `None` for branch nodes.
    pub fn predicted_class(&self) -> Option<u8> {
        self.predicted_class
    }

    /// Every ancestor's `(split attribute, branch value)` pair,
    /// most recent first.
    /// Empty only for the root.
    pub fn lineage(&self) -> &[(usize, u8)] {
        &self.lineage[..]
    }

    /// Depth of this node.
    /// The root has depth `0`.
    pub fn depth(&self) -> usize {
        self.lineage.len()
    }

    /// The left (branch value `0`) child, if any.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The right (branch value `1`) child, if any.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The parent node.
    /// `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

impl fmt::Debug for Node {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            f.debug_struct("Leaf")
                .field("class", &self.predicted_class)
                .field("entropy", &self.entropy)
                .field("reaching", &self.n_reaching)
                .field("frac0", &self.frac_zero)
                .finish()
        } else {
            f.debug_struct("Branch")
                .field("attribute", &self.split_attribute)
                .field("entropy", &self.entropy)
                .field("reaching", &self.n_reaching)
                .field("frac0", &self.frac_zero)
                .field("left", &self.left)
                .field("right", &self.right)
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_lineage_01() {
        let root = Node::root(1.0, 4, 0.5);
        let stats = SideStats {
            entropy: 0.0,
            n_reaching: 2,
            frac_zero: 1.0,
            pure_class: Some(0),
        };
        let child = Node::child(root.lineage(), ROOT, 3, 0, &stats);

        assert_eq!(child.lineage(), &[(3, 0)]);
        assert_eq!(child.depth(), 1);
        assert!(child.is_leaf());
        assert_eq!(child.predicted_class(), Some(0));
    }

    #[test]
    fn test_child_lineage_02() {
        // The most recent ancestor comes first.
        let root = Node::root(1.0, 4, 0.5);
        let stats = SideStats {
            entropy: 1.0,
            n_reaching: 2,
            frac_zero: 0.5,
            pure_class: None,
        };
        let child = Node::child(root.lineage(), ROOT, 1, 1, &stats);
        let grandchild = Node::child(
            child.lineage(), NodeId(1), 0, 0, &stats,
        );

        assert_eq!(grandchild.lineage(), &[(0, 0), (1, 1)]);
        assert_eq!(grandchild.depth(), 2);
        assert!(!grandchild.is_leaf());
    }
}
