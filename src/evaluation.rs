//! Evaluation of a classifier over a test table.
use rayon::prelude::*;

use crate::{Classifier, Table};
use crate::checkers;

/// Returns the accuracy of `f` on `table` as a percentage in `[0, 100]`.
/// A prediction counts as correct when it equals the class column
/// of its row.
/// Rows are independent, so they are evaluated in parallel.
///
/// This function panics when `table` has no rows.
pub fn accuracy<H>(table: &Table, f: &H) -> f64
    where H: Classifier + Sync,
{
    checkers::test_table(table);

    let n_rows = table.shape().0;
    let n_correct = (0..n_rows)
        .into_par_iter()
        .filter(|&row| f.predict(table, row) == table.class_of(row))
        .count();

    100.0 * n_correct as f64 / n_rows as f64
}

/// Returns the fraction of rows of `table` that `f` misclassifies.
///
/// This function panics when `table` has no rows.
pub fn zero_one_loss<H>(table: &Table, f: &H) -> f64
    where H: Classifier + Sync,
{
    checkers::test_table(table);

    let n_rows = table.shape().0;
    let n_wrong = (0..n_rows)
        .into_par_iter()
        .filter(|&row| f.predict(table, row) != table.class_of(row))
        .count();

    n_wrong as f64 / n_rows as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantClass(u8);

    impl Classifier for ConstantClass {
        fn predict(&self, _table: &Table, _row: usize) -> u8 {
            self.0
        }
    }

    fn test_examples() -> Table {
        let attributes = ["a", "class"].iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        let rows = vec![
            vec![0, 0],
            vec![1, 0],
            vec![0, 1],
            vec![1, 0],
        ];
        Table::from_raw(attributes, rows)
    }

    #[test]
    fn test_accuracy_01() {
        let table = test_examples();
        let h = ConstantClass(0);
        assert_eq!(accuracy(&table, &h), 75.0);
    }

    #[test]
    fn test_accuracy_02() {
        let table = test_examples();
        let h = ConstantClass(1);
        assert_eq!(accuracy(&table, &h), 25.0);
    }

    #[test]
    fn test_zero_one_loss_01() {
        let table = test_examples();
        let h = ConstantClass(0);
        assert_eq!(zero_one_loss(&table, &h), 0.25);
    }

    #[test]
    #[should_panic]
    fn test_accuracy_failure_01() {
        let table = Table::from_raw(
            vec!["a".to_string(), "class".to_string()],
            Vec::new(),
        );
        let h = ConstantClass(0);
        accuracy(&table, &h);
    }
}
