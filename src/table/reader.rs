use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use super::table_struct::Table;

/// A struct that returns [`Table`].
/// Using this struct, one can read a whitespace-delimited table file
/// to [`Table`].
/// # Example
/// The following code reads at most `100` data rows.
/// ```no_run
/// use minitrees::TableReader;
/// let filename = "/path/to/table/file.txt";
/// let table = TableReader::default()
///     .file(filename)
///     .n_rows(100)
///     .read()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct TableReader<P> {
    file: Option<P>,
    n_rows: Option<usize>,
}

impl<P> TableReader<P> {
    /// Set the number of data rows to read.
    /// By default, the reader consumes every row in the file.
    pub fn n_rows(mut self, n_rows: usize) -> Self {
        self.n_rows = Some(n_rows);
        self
    }
}

impl<P> TableReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }

    /// Reads the file based on the arguments,
    /// and returns `std::io::Result<Table>`.
    /// This method consumes `self.`
    pub fn read(self) -> io::Result<Table> {
        if self.file.is_none() {
            panic!("The file name for the table is not set");
        }
        let file = self.file.unwrap();
        let file = File::open(file)?;
        let reader = BufReader::new(file);

        Table::from_reader(reader, self.n_rows)
    }
}
