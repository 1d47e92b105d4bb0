use std::io::{self, BufRead, BufReader, Read};
use std::ops::Index;

use crate::checkers;

/// A table of binary training/test examples.
///
/// Every column but the last is a predictive attribute
/// taking values in `{0, 1}`;
/// the last column is the binary class label.
/// Rows are stored row-major since the induction algorithm
/// repeatedly partitions row subsets per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) attributes: Vec<String>,
    pub(crate) rows: Vec<Vec<u8>>,
}

impl Table {
    /// Construct a `Table` from raw parts.
    /// Every row must have `attributes.len()` cells,
    /// each of them `0` or `1`.
    pub fn from_raw(attributes: Vec<String>, rows: Vec<Vec<u8>>) -> Self {
        assert!(
            !attributes.is_empty(),
            "the attribute name row is empty."
        );
        checkers::rows(attributes.len(), &rows[..]);
        Self { attributes, rows }
    }

    /// Read a whitespace-delimited table from a [`BufReader`].
    ///
    /// The first non-blank line holds the attribute names;
    /// the last name is the class column.
    /// Each following non-blank line is one row of `0`/`1` integers.
    /// Blank lines are skipped and do not count toward `n_rows`.
    /// If `n_rows` is `Some(n)`, reading stops after `n` data rows
    /// and fewer than `n` rows is an error;
    /// if `None`, all remaining rows are read.
    pub fn from_reader<R>(reader: BufReader<R>, n_rows: Option<usize>)
        -> io::Result<Self>
        where R: Read,
    {
        let mut lines = lines_skipping_blank(reader);

        let attributes = lines.next()
            .unwrap_or_else(|| panic!("the table has no attribute name row."))?
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for line in lines {
            if n_rows.is_some_and(|n| rows.len() >= n) { break; }

            let line = line?;
            let row = line.split_whitespace()
                .map(|x| {
                    x.parse::<u8>()
                        .unwrap_or_else(|_| {
                            let i = rows.len();
                            panic!(
                                "the table contains a non-integer value. \
                                got {x} in row {i}."
                            )
                        })
                })
                .collect::<Vec<_>>();
            rows.push(row);
        }

        if let Some(n) = n_rows {
            let got = rows.len();
            assert_eq!(got, n, "expected {n} data rows. got {got}.");
        }

        Ok(Self::from_raw(attributes, rows))
    }

    /// Returns the pair of the number of rows and
    /// the number of predictive attributes (the class column excluded).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.attributes.len() - 1)
    }

    /// Returns the attribute names, the class column name included last.
    pub fn attribute_names(&self) -> &[String] {
        &self.attributes[..]
    }

    /// Returns the name of the class column.
    pub fn class_name(&self) -> &str {
        self.attributes.last()
            .expect("the attribute name row is empty.")
    }

    /// Returns the value of the `attr`-th attribute in the `row`-th row.
    #[inline]
    pub fn value(&self, row: usize, attr: usize) -> u8 {
        self.rows[row][attr]
    }

    /// Returns the class label of the `row`-th row.
    #[inline]
    pub fn class_of(&self, row: usize) -> u8 {
        self.rows[row][self.attributes.len() - 1]
    }

    /// Split `self` into two tables.
    /// Rows whose position in `ix` falls in `start..end` go to the
    /// second (test) table, all others to the first (train) table.
    pub fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Table, Table)
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();

        let mut train = Vec::with_capacity(self.rows.len() - (end - start));
        let mut test = Vec::with_capacity(end - start);
        for (i, &ii) in ix.iter().enumerate() {
            let row = self.rows[ii].clone();
            if (start..end).contains(&i) {
                test.push(row);
            } else {
                train.push(row);
            }
        }

        let train = Self { attributes: self.attributes.clone(), rows: train };
        let test = Self { attributes: self.attributes.clone(), rows: test };
        (train, test)
    }
}

impl Index<usize> for Table {
    type Output = [u8];

    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row][..]
    }
}

fn lines_skipping_blank<R: Read>(reader: BufReader<R>)
    -> impl Iterator<Item = io::Result<String>>
{
    reader.lines()
        .filter(|line| {
            line.as_ref()
                .map(|l| !l.trim().is_empty())
                .unwrap_or(true)
        })
}
