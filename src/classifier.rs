//! Defines the classifier trait.
use rayon::prelude::*;

use crate::Table;

/// A trait that defines the behavior of a classifier
/// over binary tables.
/// You only need to implement the `predict` method.
pub trait Classifier {
    /// Predicts the class label of the `row`-th row of `table`.
    /// The returned value is `0` or `1`.
    fn predict(&self, table: &Table, row: usize) -> u8;

    /// Predicts the class labels of all rows of `table`.
    /// Rows are independent, so they are classified in parallel.
    fn predict_all(&self, table: &Table) -> Vec<u8>
        where Self: Sync,
    {
        let n_rows = table.shape().0;
        (0..n_rows)
            .into_par_iter()
            .map(|row| self.predict(table, row))
            .collect::<Vec<_>>()
    }
}
