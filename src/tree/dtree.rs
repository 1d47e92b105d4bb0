//! Defines the decision tree classifier
//! and its induction algorithm.
use fixedbitset::FixedBitSet;
use serde::{Serialize, Deserialize};

use crate::{Classifier, Table};
use crate::checkers;
use crate::constants::RULE_INDENT;

use super::node::{Node, NodeId, ROOT};
use super::split::{self, binary_entropy};

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

/// A decision tree classifier over binary tables.
///
/// Nodes live in an arena indexed by [`NodeId`];
/// the root is always the first entry.
/// [`DecisionTree::fit`] grows the tree greedily by information gain
/// and the resulting tree classifies a row by walking from the root
/// to a leaf, descending left on attribute value `0`
/// and right on value `1`.
///
/// # Example
/// ```no_run
/// use minitrees::{Classifier, DecisionTree, TableReader};
///
/// let table = TableReader::default()
///     .file("/path/to/table/file.txt")
///     .n_rows(100)
///     .read()
///     .unwrap();
///
/// let tree = DecisionTree::fit(&table);
///
/// // Print the tree as indented decision rules.
/// println!("{tree}");
///
/// let predictions = tree.predict_all(&table);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    attributes: Vec<String>,
}

impl DecisionTree {
    /// Build a decision tree from the given training table.
    ///
    /// This method proceeds as follows;
    /// 1. seed the root with the class distribution of the whole table,
    /// 2. process nodes in first-in-first-out order:
    ///    score every attribute on the rows reaching the node
    ///    (an attribute used by an ancestor never qualifies),
    /// 3. split on the attribute of maximal information gain,
    ///    or turn the node into a majority-class leaf
    ///    when the best gain is negative.
    ///
    /// Children of a split are created with the statistics computed
    /// for their side; a side that is already pure becomes a leaf
    /// on the spot.
    /// The worklist is drained to completion before the tree
    /// is returned, so a partially built tree is never observable.
    pub fn fit(table: &Table) -> Self {
        checkers::table(table);

        let (n_rows, n_attributes) = table.shape();

        let n_zero = (0..n_rows)
            .filter(|&row| table.class_of(row) == 0)
            .count();
        let root_frac_zero = n_zero as f64 / n_rows as f64;
        let root = Node::root(
            binary_entropy(root_frac_zero), n_rows, root_frac_zero,
        );

        let mut nodes = vec![root];
        let mut worklist = VecDeque::from([ROOT]);

        while let Some(id) = worklist.pop_front() {
            if nodes[id.0].is_leaf() { continue; }

            let lineage = nodes[id.0].lineage.clone();
            let mut used = FixedBitSet::with_capacity(n_attributes);
            lineage.iter()
                .for_each(|&(attribute, _)| used.insert(attribute));

            // The rows consistent with every ancestor's branch.
            let reaching = (0..n_rows)
                .filter(|&row| {
                    lineage.iter().all(|&(attribute, value)| {
                        table.value(row, attribute) == value
                    })
                })
                .collect::<Vec<_>>();

            let candidates = split::scan(
                table,
                &reaching[..],
                &used,
                nodes[id.0].entropy,
                nodes[id.0].n_reaching,
                root_frac_zero,
            );
            let best = split::best_candidate(candidates);

            if best.gain < 0.0 {
                // Every attribute is exhausted.
                // The node becomes a leaf predicting its majority class.
                let node = &mut nodes[id.0];
                node.predicted_class = Some(
                    majority_class(node.frac_zero, root_frac_zero)
                );
                continue;
            }

            let left = Node::child(
                &lineage[..], id, best.attribute, 0, &best.left,
            );
            let right = Node::child(
                &lineage[..], id, best.attribute, 1, &best.right,
            );

            let left_id = NodeId(nodes.len());
            nodes.push(left);
            let right_id = NodeId(nodes.len());
            nodes.push(right);

            let node = &mut nodes[id.0];
            node.split_attribute = Some(best.attribute);
            node.left = Some(left_id);
            node.right = Some(right_id);

            // A pure child enters the worklist too;
            // it is skipped on its pop since it is already a leaf.
            worklist.push_back(left_id);
            worklist.push_back(right_id);
        }

        let attributes = table.attribute_names().to_vec();
        Self { nodes, attributes }
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.nodes[ROOT.0]
    }

    /// Returns the node of the given id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the number of nodes of this tree.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves of this tree.
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter()
            .filter(|node| node.is_leaf())
            .count()
    }

    /// Returns the attribute names this tree was trained on,
    /// the class column name included last.
    pub fn attribute_names(&self) -> &[String] {
        &self.attributes[..]
    }

    /// Write the current decision tree to a JSON file.
    /// The arena representation has no reference cycles,
    /// so the whole tree serializes as plain data.
    #[inline]
    pub fn to_json_file<P>(&self, path: P) -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        let json = serde_json::to_string(self)?;
        f.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Read a decision tree from a JSON file
    /// written by [`DecisionTree::to_json_file`].
    #[inline]
    pub fn from_json_file<P>(path: P) -> std::io::Result<Self>
        where P: AsRef<Path>
    {
        let json = std::fs::read_to_string(path)?;
        let tree = serde_json::from_str::<Self>(&json)?;

        Ok(tree)
    }

    /// Write the current decision tree to a dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph DecisionTree {")?;

        let info = self.to_dot_info(ROOT, 0).0;
        for line in info {
            f.write_all(line.as_bytes())?;
        }

        f.write_all(b"}")?;

        Ok(())
    }

    fn to_dot_info(&self, id: NodeId, dot_id: usize)
        -> (Vec<String>, usize)
    {
        let node = self.node(id);
        match node.split_attribute {
            Some(attribute) => {
                let name = &self.attributes[attribute];
                let label = format!(
                    "\tnode_{dot_id} [ label = \"{name}\" ];\n",
                );

                let left = node.left
                    .expect("a branch node is missing its left child");
                let right = node.right
                    .expect("a branch node is missing its right child");

                let left_id = dot_id + 1;
                let (left_info, right_id) = self.to_dot_info(left, left_id);
                let (mut right_info, return_id) =
                    self.to_dot_info(right, right_id);

                let mut info = left_info;
                info.push(label);
                info.append(&mut right_info);

                let left_edge = format!(
                    "\tnode_{dot_id} -- node_{left_id} [ label = \"0\" ];\n",
                );
                info.push(left_edge);
                let right_edge = format!(
                    "\tnode_{dot_id} -- node_{right_id} [ label = \"1\" ];\n",
                );
                info.push(right_edge);

                (info, return_id)
            },
            None => {
                let class = node.predicted_class
                    .expect("a leaf node is missing its class");
                let info = format!(
                    "\tnode_{dot_id} [ label = \"{class}\", shape = box ];\n",
                );

                (vec![info], dot_id + 1)
            },
        }
    }

    /// Emit the split rules below `id` as indented lines.
    /// Each line shows one branch of a split;
    /// a leaf child prints its class on the same line,
    /// a branch child recurses one level deeper.
    fn write_rules(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
    ) -> fmt::Result
    {
        let node = self.node(id);
        let attribute = match node.split_attribute {
            Some(attribute) => attribute,
            None => { return Ok(()); },
        };
        let name = &self.attributes[attribute];

        let children = [(0_u8, node.left), (1_u8, node.right)];
        for (value, child) in children {
            let child = child.expect("a branch node is missing a child");

            for _ in 0..depth {
                f.write_str(RULE_INDENT)?;
            }
            write!(f, "{name} = {value} :")?;

            match self.node(child).predicted_class {
                Some(class) => { writeln!(f, "  {class}")?; },
                None => {
                    writeln!(f)?;
                    self.write_rules(f, child, depth + 1)?;
                },
            }
        }

        Ok(())
    }
}

impl fmt::Display for DecisionTree {
    /// Formats the tree as one rule line per split branch,
    /// `"| "` repeated `depth` times as prefix.
    /// A tree whose root is a leaf prints nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rules(f, ROOT, 0)
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, table: &Table, row: usize) -> u8 {
        let mut current = self.root();
        while let Some(attribute) = current.split_attribute {
            let next = if table.value(row, attribute) == 0 {
                current.left
            } else {
                current.right
            };
            let next = next.expect("a branch node is missing a child");
            current = self.node(next);
        }

        current.predicted_class
            .expect("a leaf node is missing its class")
    }
}

/// The majority class of a node by its class-0 fraction.
/// An exact tie falls back to the root's global fraction.
fn majority_class(frac_zero: f64, root_frac_zero: f64) -> u8 {
    if frac_zero > 0.5 {
        0
    } else if frac_zero < 0.5 {
        1
    } else if root_frac_zero >= 0.5 {
        0
    } else {
        1
    }
}
