//! This file defines some functions that check some pre-conditions
//! E.g., shape of the table, binary cell values.

use crate::Table;

/// Check whether the training table is valid or not.
#[inline(always)]
pub fn table(table: &Table) {
    let (n_rows, n_attributes) = table.shape();

    assert!(n_rows > 0, "the table has no rows.");
    assert!(n_attributes > 0, "the table has no predictive attributes.");
}

/// Check whether the test table can be evaluated.
/// An empty test table would divide by zero, so fail here instead.
#[inline(always)]
pub fn test_table(table: &Table) {
    let n_rows = table.shape().0;
    assert!(n_rows > 0, "cannot evaluate on an empty test table.");
}

/// Check that every row has `width` cells and every cell is `0` or `1`.
#[inline(always)]
pub fn rows(width: usize, rows: &[Vec<u8>]) {
    for (i, row) in rows.iter().enumerate() {
        let got = row.len();
        assert_eq!(
            got, width,
            "row {i} has {got} values. expected {width}."
        );
        for &x in row {
            assert!(x <= 1, "non-binary value {x} in row {i}.");
        }
    }
}
