//! Constants shared across the crate.

/// The gain assigned to an attribute already used by an ancestor.
/// Such attributes never win the split selection
/// as long as an unused attribute remains.
pub const EXCLUDED_GAIN: f64 = -1.0;

/// The indentation marker emitted once per depth level
/// when printing the tree as rules.
pub const RULE_INDENT: &str = "| ";
