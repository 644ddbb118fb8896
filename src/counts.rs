// quasicons: Consensus sequences and base frequency matrices from aligned quasispecies reads.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Per-column symbol counts over a set of aligned sequences.
//!
//! [BaseCounts] is built once from the input and is read by both the
//! [consensus](crate::consensus) and [frequency](crate::frequency) builders.
//! It has no mutating methods after construction.
//!
//! Two ways of reading the input are supported:
//!
//!   - Line mode ([BaseCounts::from_lines], [BaseCounts::from_read]): every
//!     line that does not start with `>` is one row, and symbol `i` of the line
//!     is counted in column `i`.
//!   - Record mode ([BaseCounts::from_fastx_read]): every FASTA/FASTQ record is
//!     one row, so records wrapped over several lines are joined first.
//!
//! No alphabet validation is done. Any character found in a sequence row is
//! counted, with bytes that are not valid UTF-8 counted as U+FFFD.
//!
//! ## Usage
//!
//! ```rust
//! use quasicons::counts::BaseCounts;
//!
//! let lines = vec![">s1", "ACTG", ">s2", "AATG", ">s3", "ACAG"];
//! let counts = BaseCounts::from_lines(&lines);
//!
//! assert_eq!(counts.len(), 4);
//! assert_eq!(counts.n_rows(), 3);
//! assert_eq!(counts.column(1).unwrap().count('C'), 2);
//! assert_eq!(counts.column(1).unwrap().count('A'), 1);
//! ```
//!

use std::cmp::Reverse;
use std::io::BufReader;
use std::io::Read;

use bstr::io::BufReadExt;
use bstr::ByteSlice;
use indexmap::map::IndexMap;
use needletail::errors::ParseErrorKind;

type E = Box<dyn std::error::Error>;

/// Symbols treated as gaps: alignment gap and unresolved base.
pub const GAP_SYMBOLS: [char; 2] = ['-', 'N'];

/// Returns true if `symbol` is one of [GAP_SYMBOLS].
pub fn is_gap(symbol: char) -> bool {
    GAP_SYMBOLS.contains(&symbol)
}

/// Symbol counts at a single alignment column.
///
/// Symbols are kept in the order they were first seen. Only symbols that were
/// observed at least once are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Column {
    counts: IndexMap<char, u64>,
}

impl Column {
    fn add(&mut self, symbol: char) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Number of times `symbol` was seen, 0 if never.
    pub fn count(&self, symbol: char) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Total number of symbols counted in this column.
    pub fn depth(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(symbol, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(symbol, count)| (*symbol, *count))
    }

    /// Symbol with the highest count.
    ///
    /// Ties between equally common symbols prefer a non-gap symbol over a
    /// gap, and then the smallest code point. Returns None for an empty
    /// column.
    pub fn majority(&self) -> Option<char> {
        self.iter()
            .max_by_key(|(symbol, count)| (*count, !is_gap(*symbol), Reverse(*symbol)))
            .map(|(symbol, _)| symbol)
    }

    /// Most common symbol that is not a gap.
    ///
    /// Ties prefer the smallest code point. Returns None if the column only
    /// contains gaps.
    pub fn best_non_gap(&self) -> Option<char> {
        self.iter()
            .filter(|(symbol, count)| !is_gap(*symbol) && *count > 0)
            .max_by_key(|(symbol, count)| (*count, Reverse(*symbol)))
            .map(|(symbol, _)| symbol)
    }

    /// True if every symbol counted here is a gap.
    pub fn is_gap_only(&self) -> bool {
        self.iter().all(|(symbol, _)| is_gap(symbol))
    }
}

impl FromIterator<(char, u64)> for Column {
    fn from_iter<T: IntoIterator<Item = (char, u64)>>(iter: T) -> Self {
        let mut counts: IndexMap<char, u64> = IndexMap::new();
        iter.into_iter().filter(|(_, count)| *count > 0).for_each(|(symbol, count)| {
            *counts.entry(symbol).or_insert(0) += count;
        });
        Column { counts }
    }
}

/// Symbol counts for every column of an alignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseCounts {
    columns: Vec<Column>,
    n_rows: usize,
}

impl BaseCounts {
    /// Count symbols from FASTA formatted lines.
    ///
    /// Header lines starting with `>` are skipped and do not affect column
    /// numbering. Trailing whitespace is removed from the other lines before
    /// counting.
    pub fn from_lines<I, T>(
        lines: I,
    ) -> Self where I: IntoIterator<Item = T>, T: AsRef<[u8]> {
        let mut counts = BaseCounts::default();
        lines.into_iter().for_each(|line| counts.add_line(line.as_ref()));
        log::debug!("Counted {} rows over {} columns", counts.n_rows, counts.columns.len());
        counts
    }

    /// Count symbols from FASTA formatted lines read from `conn`.
    ///
    /// Same rules as [from_lines](BaseCounts::from_lines). Both `\n` and `\r\n`
    /// line endings are accepted.
    pub fn from_read<R: Read>(
        conn: &mut R,
    ) -> Result<Self, E> {
        let mut counts = BaseCounts::default();
        let mut reader = BufReader::new(conn);
        reader.for_byte_line(|line| {
            counts.add_line(line);
            Ok(true)
        })?;
        log::debug!("Counted {} rows over {} columns", counts.n_rows, counts.columns.len());
        Ok(counts)
    }

    /// Count symbols from whole FASTA or FASTQ records read from `conn`.
    ///
    /// Each record is one row, regardless of how many lines its sequence was
    /// wrapped over. Gzip compressed input is detected automatically. An empty
    /// input results in an empty table.
    pub fn from_fastx_read<R: Read + Send>(
        conn: &mut R,
    ) -> Result<Self, E> {
        let mut counts = BaseCounts::default();
        let mut reader = match needletail::parse_fastx_reader(conn) {
            Ok(reader) => reader,
            Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => {
                log::debug!("Empty input");
                return Ok(counts)
            },
            Err(e) => return Err(Box::new(e)),
        };
        while let Some(record) = reader.next() {
            let record = record?;
            counts.add_row(&record.seq());
        }
        log::debug!("Counted {} records over {} columns", counts.n_rows, counts.columns.len());
        Ok(counts)
    }

    fn add_line(&mut self, line: &[u8]) {
        if line.starts_with(b">") {
            return
        }
        self.add_row(line.trim_end());
    }

    // Symbols are UTF-8 characters, invalid bytes become U+FFFD.
    fn add_row(&mut self, row: &[u8]) {
        let symbols: Vec<char> = row.chars().collect();
        if symbols.is_empty() {
            return
        }
        if self.columns.len() < symbols.len() {
            self.columns.resize_with(symbols.len(), Column::default);
        }
        symbols.into_iter().zip(self.columns.iter_mut()).for_each(|(symbol, column)| {
            column.add(symbol);
        });
        self.n_rows += 1;
    }

    /// Number of columns, ie. the length of the longest row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of non-empty sequence rows that were counted.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// All columns in ascending position order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column at 0-based `position`.
    pub fn column(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }
}

/// Assemble a table from columns already counted elsewhere.
///
/// The row count is taken to be the depth of the deepest column.
impl FromIterator<Column> for BaseCounts {
    fn from_iter<T: IntoIterator<Item = Column>>(iter: T) -> Self {
        let columns: Vec<Column> = iter.into_iter().collect();
        let n_rows = columns.iter().map(|column| column.depth()).max().unwrap_or(0) as usize;
        BaseCounts { columns, n_rows }
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn count_with_headers() {
        use super::BaseCounts;
        use super::Column;

        let lines = vec![">seq1", "ACTG", ">seq2", "AATG", ">seq3", "ACAG"];

        let expected: Vec<Column> = vec![
            Column::from_iter([('A', 3)]),
            Column::from_iter([('C', 2), ('A', 1)]),
            Column::from_iter([('T', 2), ('A', 1)]),
            Column::from_iter([('G', 3)]),
        ];

        let got = BaseCounts::from_lines(&lines);

        assert_eq!(got.columns(), &expected);
        assert_eq!(got.n_rows(), 3);
    }

    #[test]
    fn headers_do_not_change_counts() {
        use super::BaseCounts;

        let with_headers = BaseCounts::from_lines([">s1", "ACTG", ">s2", "AATG"]);
        let without_headers = BaseCounts::from_lines(["ACTG", "AATG"]);

        assert_eq!(with_headers, without_headers);
    }

    #[test]
    fn count_unequal_lengths() {
        use super::BaseCounts;
        use super::Column;

        let lines = vec!["AATGA", "AAAG", "ACA"];

        let expected: Vec<Column> = vec![
            Column::from_iter([('A', 3)]),
            Column::from_iter([('C', 1), ('A', 2)]),
            Column::from_iter([('T', 1), ('A', 2)]),
            Column::from_iter([('G', 2)]),
            Column::from_iter([('A', 1)]),
        ];

        let got = BaseCounts::from_lines(&lines);

        assert_eq!(got.columns(), &expected);
        assert_eq!(got.column(3).unwrap().depth(), 2);
        assert_eq!(got.column(4).unwrap().depth(), 1);
        assert!(got.column(5).is_none());
    }

    #[test]
    fn depth_matches_rows_reaching_column() {
        use super::BaseCounts;

        let lines = vec!["ACGT-N", "AC", "ACG-", "A", "", "ACGTNNNN"];
        let got = BaseCounts::from_lines(&lines);

        got.columns().iter().enumerate().for_each(|(pos, column)| {
            let expected = lines.iter().filter(|line| line.len() > pos).count() as u64;
            assert_eq!(column.depth(), expected);
        });
        assert_eq!(got.n_rows(), 5);
    }

    #[test]
    fn trailing_whitespace_not_counted() {
        use super::BaseCounts;

        let got = BaseCounts::from_lines(["ACGT\n", "ACGT \r\n", "ACGT"]);

        assert_eq!(got.len(), 4);
        assert_eq!(got.column(3).unwrap().count('T'), 3);
    }

    #[test]
    fn unexpected_symbols_are_counted() {
        use super::BaseCounts;

        let got = BaseCounts::from_lines(["AXG", "AxG", "A?G"]);

        assert_eq!(got.column(1).unwrap().count('X'), 1);
        assert_eq!(got.column(1).unwrap().count('x'), 1);
        assert_eq!(got.column(1).unwrap().count('?'), 1);
    }

    #[test]
    fn multibyte_symbol_is_one_column() {
        use super::BaseCounts;
        use super::Column;

        let got = BaseCounts::from_lines([">a", "AéG", ">b", "ACG"]);

        let expected: Vec<Column> = vec![
            Column::from_iter([('A', 2)]),
            Column::from_iter([('é', 1), ('C', 1)]),
            Column::from_iter([('G', 2)]),
        ];

        assert_eq!(got.columns(), &expected);
    }

    #[test]
    fn invalid_utf8_is_one_symbol() {
        use super::BaseCounts;

        let got = BaseCounts::from_lines([b"A\xffG".to_vec(), b"ACG".to_vec()]);

        assert_eq!(got.len(), 3);
        assert_eq!(got.column(1).unwrap().count('\u{FFFD}'), 1);
        assert_eq!(got.column(2).unwrap().count('G'), 2);
    }

    #[test]
    fn count_from_read() {
        use super::BaseCounts;
        use std::io::Cursor;

        let data: Vec<u8> = b">seq1\nACTG\r\n>seq2\nAATG\n>seq3\nACAG".to_vec();
        let mut input: Cursor<Vec<u8>> = Cursor::new(data);

        let got = BaseCounts::from_read(&mut input).unwrap();
        let expected = BaseCounts::from_lines(["ACTG", "AATG", "ACAG"]);

        assert_eq!(got, expected);
    }

    #[test]
    fn count_from_read_is_repeatable() {
        use super::BaseCounts;
        use std::io::Cursor;

        let data: Vec<u8> = b">a\nAC-T\n>b\nACNT\n>c\nGC-A\n".to_vec();

        let first = BaseCounts::from_read(&mut Cursor::new(data.clone())).unwrap();
        let second = BaseCounts::from_read(&mut Cursor::new(data)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn count_empty_input() {
        use super::BaseCounts;
        use std::io::Cursor;

        let got = BaseCounts::from_read(&mut Cursor::new(Vec::<u8>::new())).unwrap();

        assert!(got.is_empty());
        assert_eq!(got.n_rows(), 0);
    }

    #[test]
    fn count_wrapped_records() {
        use super::BaseCounts;
        use std::io::Cursor;

        let data: Vec<u8> = b">seq1\nAC\nTG\n>seq2\nAA\nTG\n>seq3\nACAG\n".to_vec();
        let mut input: Cursor<Vec<u8>> = Cursor::new(data);

        let got = BaseCounts::from_fastx_read(&mut input).unwrap();
        let expected = BaseCounts::from_lines(["ACTG", "AATG", "ACAG"]);

        assert_eq!(got, expected);
        assert_eq!(got.n_rows(), 3);
    }

    #[test]
    fn count_records_empty_input() {
        use super::BaseCounts;
        use std::io::Cursor;

        let got = BaseCounts::from_fastx_read(&mut Cursor::new(Vec::<u8>::new())).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn collect_columns() {
        use super::BaseCounts;
        use super::Column;

        let got: BaseCounts = [
            Column::from_iter([('A', 3)]),
            Column::from_iter([('C', 2)]),
        ].into_iter().collect();

        assert_eq!(got, BaseCounts::from_lines(["AC", "AC", "A"]));
    }

    #[test]
    fn majority_simple() {
        use super::Column;

        let column = Column::from_iter([('C', 2), ('A', 1)]);

        assert_eq!(column.majority(), Some('C'));
    }

    #[test]
    fn majority_tie_prefers_smallest_symbol() {
        use super::Column;

        let forward = Column::from_iter([('A', 2), ('C', 2)]);
        let reverse = Column::from_iter([('C', 2), ('A', 2)]);

        assert_eq!(forward.majority(), Some('A'));
        assert_eq!(reverse.majority(), Some('A'));
    }

    #[test]
    fn majority_tie_prefers_non_gap() {
        use super::Column;

        let column = Column::from_iter([('-', 2), ('T', 2), ('N', 2)]);

        assert_eq!(column.majority(), Some('T'));
    }

    #[test]
    fn majority_gap() {
        use super::Column;

        let column = Column::from_iter([('C', 1), ('-', 2)]);

        assert_eq!(column.majority(), Some('-'));
        assert_eq!(column.best_non_gap(), Some('C'));
        assert!(!column.is_gap_only());
    }

    #[test]
    fn best_non_gap_of_gap_only_column() {
        use super::Column;

        let column = Column::from_iter([('-', 3), ('N', 1)]);

        assert_eq!(column.best_non_gap(), None);
        assert!(column.is_gap_only());
    }

    #[test]
    fn empty_column() {
        use super::Column;

        let column = Column::default();

        assert_eq!(column.majority(), None);
        assert_eq!(column.depth(), 0);
        assert_eq!(column.count('A'), 0);
    }
}
