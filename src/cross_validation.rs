//! Train/test fold generation for cross validation.
use rand::prelude::*;
use colored::Colorize;

use crate::Table;

/// A struct that generates
/// pairs of training/test tables for cross validation.
///
/// The table rows are dealt round-robin into `n_folds` disjoint folds,
/// so the folds partition the table and
/// every row lands in the test table of exactly one pair.
/// Dealing happens when the first pair is requested;
/// with [`CrossValidation::stratified`],
/// each class is dealt separately and
/// every fold keeps roughly the class balance of the whole table.
/// # Example
/// ```no_run
/// use minitrees::{accuracy, CrossValidation, DecisionTree, TableReader};
///
/// let table = TableReader::default()
///     .file("/path/to/table/file.txt")
///     .read()
///     .unwrap();
/// let cv = CrossValidation::new(&table)
///     .n_folds(5)
///     .seed(777)
///     .shuffle()
///     .stratified()
///     .verbose(true);
/// for (train, test) in cv {
///     let tree = DecisionTree::fit(&train);
///     println!("[test accuracy: {}]", accuracy(&test, &tree));
/// }
/// ```
pub struct CrossValidation<'a> {
    table: &'a Table,
    n_folds: usize,
    seed: u64,
    shuffle: bool,
    stratified: bool,
    verbose: bool,
    current_fold: usize,
    folds: Option<Vec<Vec<usize>>>,
}

impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            n_folds: 5,
            seed: 1234,
            shuffle: false,
            stratified: false,
            verbose: false,
            current_fold: 0,
            folds: None,
        }
    }

    /// Set the number of folds.
    /// Default value is `5.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        assert!(
            n_folds >= 2,
            "cross validation needs at least 2 folds. got {n_folds}."
        );
        self.n_folds = n_folds;
        self
    }

    /// Set the seed of the randomness for shuffling.
    /// Default value is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Shuffle the rows before dealing them into folds.
    /// By default, `CrossValidation` deals the rows in table order.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        self.shuffle = true;
        self
    }

    /// Deal the rows of each class separately,
    /// so that every fold keeps roughly the class balance
    /// of the whole table.
    /// By default, `CrossValidation` ignores the class column
    /// when dealing.
    #[inline]
    pub fn stratified(mut self) -> Self {
        self.stratified = true;
        self
    }

    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair.
    /// Default value is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Deal every row index into a fold.
    /// Rows dealt round-robin differ by at most one per fold;
    /// stratified dealing orders the rows class by class first,
    /// which spreads each class evenly over the folds.
    fn deal(&self) -> Vec<Vec<usize>> {
        let n_rows = self.table.shape().0;
        let mut order = (0..n_rows).collect::<Vec<_>>();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            order.shuffle(&mut rng);
        }
        if self.stratified {
            let (zeros, ones): (Vec<_>, Vec<_>) = order.into_iter()
                .partition(|&row| self.table.class_of(row) == 0);
            order = zeros;
            order.extend(ones);
        }

        let mut folds = vec![Vec::new(); self.n_folds];
        for (i, row) in order.into_iter().enumerate() {
            folds[i % self.n_folds].push(row);
        }
        folds
    }
}

impl<'a> Iterator for CrossValidation<'a> {
    type Item = (Table, Table);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }
        if self.folds.is_none() {
            self.folds = Some(self.deal());
        }
        let folds = self.folds.as_ref()
            .expect("the folds are dealt before the first pair");

        let test_fold = self.current_fold;
        let mut ix = folds.iter()
            .enumerate()
            .filter(|&(fold, _)| fold != test_fold)
            .flat_map(|(_, rows)| rows.iter().copied())
            .collect::<Vec<_>>();
        let n_train = ix.len();
        ix.extend(folds[test_fold].iter().copied());

        let output = self.table.split(&ix, n_train, ix.len());
        self.current_fold += 1;

        if self.verbose {
            let (train, test) = (&output.0, &output.1);
            let n_test = test.shape().0;
            let n_zeros = (0..n_test)
                .filter(|&row| test.class_of(row) == 0)
                .count();
            println!(
                "{}    {}    {}",
                format!("  [fold {:>2}/{}]", self.current_fold, self.n_folds)
                    .bold().cyan(),
                format!("[TRAIN {:>6}]", train.shape().0).bold().green(),
                format!("[TEST {n_test:>6} | {n_zeros} of class 0]")
                    .bold().yellow(),
            );
        }

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_table() -> Table {
        let attributes = ["a", "b", "class"].iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        let rows = (0..10)
            .map(|i| vec![(i % 2) as u8, (i / 5) as u8, (i % 3 == 0) as u8])
            .collect::<Vec<_>>();
        Table::from_raw(attributes, rows)
    }

    #[test]
    fn test_folds_partition_01() {
        let table = toy_table();
        let cv = CrossValidation::new(&table).n_folds(5);

        let mut n_tested = 0;
        for (train, test) in cv {
            assert_eq!(train.shape().0, 8);
            assert_eq!(test.shape().0, 2);
            n_tested += test.shape().0;
        }
        assert_eq!(n_tested, 10);
    }

    #[test]
    fn test_folds_partition_02() {
        // 10 rows over 4 folds: fold sizes differ by at most one.
        let table = toy_table();
        let cv = CrossValidation::new(&table).n_folds(4);
        let sizes = cv.map(|(_, test)| test.shape().0)
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
    }

    #[test]
    fn test_stratified_balance_01() {
        // Five of the ten rows are class 1, so every stratified
        // test fold of size 2 holds exactly one row per class.
        let attributes = ["a", "class"].iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        let rows = (0..10)
            .map(|i| vec![(i % 2) as u8, (i < 5) as u8])
            .collect::<Vec<_>>();
        let table = Table::from_raw(attributes, rows);

        let cv = CrossValidation::new(&table).stratified();
        for (_, test) in cv {
            let n_test = test.shape().0;
            let n_zeros = (0..n_test)
                .filter(|&row| test.class_of(row) == 0)
                .count();
            assert_eq!(n_test, 2);
            assert_eq!(n_zeros, 1);
        }
    }

    #[test]
    fn test_shuffle_determinism_01() {
        let table = toy_table();
        let folds_a = CrossValidation::new(&table)
            .seed(777)
            .shuffle()
            .collect::<Vec<_>>();
        let folds_b = CrossValidation::new(&table)
            .seed(777)
            .shuffle()
            .collect::<Vec<_>>();
        assert_eq!(folds_a, folds_b);
    }
}
