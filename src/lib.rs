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

//! quasicons is a library and a command-line client for:
//!
//!   - Building a consensus sequence from a set of aligned reads.
//!   - Tabulating the base frequencies at every position of the alignment.
//!
//! The input is a FASTA file where every sequence covers the same region, eg.
//! the quasispecies reads of a viral sample after alignment. The consensus is
//! used as the reference for downstream read mapping (bwa, smalt) and variant
//! calling (quasi_bam), which are run separately.
//!
//! ## Usage
//!
//! ### Command line
//!
//! The quasicons CLI supports the following subcommands:
//!   - `quasicons run` write both the consensus and the frequency matrix.
//!   - `quasicons consensus` write only the consensus.
//!   - `quasicons matrix` write only the frequency matrix.
//!
//! Outputs are written next to each input file, see [paths] for the naming.
//!
//! ### Rust API
//!
//! All computation goes through a [BaseCounts](counts::BaseCounts) table
//! which is built once from the input and then passed by reference to:
//!
//!   - [make_consensus](consensus::make_consensus): one symbol per column, avoiding gaps.
//!   - [make_frequency_matrix](frequency::make_frequency_matrix): percentages of A, C, G, T and gaps per column.
//!
//! The functions in this module wrap these for use cases where an entire
//! stream implementing [Read] should be processed into something that
//! implements [Write].
//!
//! ## Gap handling
//!
//! The symbols `-` and `N` are both treated as gaps. In the consensus a
//! column whose most common symbol is a gap uses the most common other symbol
//! instead, and a column that only contains gaps is left out. In the frequency
//! matrix a column whose most common symbol is a gap is skipped, and the `-`
//! and `N` counts of the other columns are reported together.
//!
//! When two symbols are equally common a non-gap symbol wins over a gap, and
//! otherwise the alphabetically first symbol wins.
//!

use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use counts::BaseCounts;
use paths::OutputPaths;

pub mod consensus;
pub mod counts;
pub mod frequency;
pub mod paths;
pub mod printer;

type E = Box<dyn std::error::Error>;

/// How rows are read from the input.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Every non-header line is one row.
    #[default]
    Lines,
    /// Every FASTA/FASTQ record is one row.
    Records,
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(InputMode::Lines),
            "records" => Ok(InputMode::Records),
            _ => Err(format!("'{}' is not a valid InputMode", s)),
        }
    }
}

/// Settings for [process_file].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Header of the consensus record.
    pub name: String,
    pub mode: InputMode,
    /// Add the dominant base column to the frequency matrix.
    pub with_dominant: bool,
    pub write_consensus: bool,
    pub write_frequency_matrix: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            name: "consensus".to_string(),
            mode: InputMode::default(),
            with_dominant: false,
            write_consensus: true,
            write_frequency_matrix: true,
        }
    }
}

/// Count symbols per column from [Read](std::io::Read).
///
/// ## Usage
/// ```rust
/// use quasicons::{count_from_read, InputMode};
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b">r1\nAC\nGT\n>r2\nAC\nGA\n".to_vec());
/// let counts = count_from_read(InputMode::Records, &mut input).unwrap();
///
/// // Wrapped records are joined in record mode
/// assert_eq!(counts.len(), 4);
/// assert_eq!(counts.n_rows(), 2);
/// ```
///
pub fn count_from_read<R: Read + Send>(
    mode: InputMode,
    conn_in: &mut R,
) -> Result<BaseCounts, E> {
    match mode {
        InputMode::Lines => BaseCounts::from_read(conn_in),
        InputMode::Records => BaseCounts::from_fastx_read(conn_in),
    }
}

/// Read aligned sequences from [Read](std::io::Read) and write their consensus to [Write](std::io::Write).
///
/// ## Usage
/// ```rust
/// use quasicons::{consensus_from_read_to_write, InputMode};
/// use std::io::Cursor;
///
/// // Column 2 is mostly gaps but also has a C
/// // Column 3 has only gaps
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b">read1\nA--T\n".to_vec());
/// input_bytes.append(&mut b">read2\nAC-T\n".to_vec());
/// input_bytes.append(&mut b">read3\nA--G\n".to_vec());
/// let mut input: Cursor<Vec<u8>> = Cursor::new(input_bytes);
///
/// let mut output: Vec<u8> = Vec::new();
/// consensus_from_read_to_write("sample", InputMode::Lines, &mut input, &mut output).unwrap();
///
/// assert_eq!(output, b">sample\nACT\n".to_vec());
/// ```
///
pub fn consensus_from_read_to_write<R: Read + Send, W: Write>(
    name: &str,
    mode: InputMode,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<(), E> {
    let counts = count_from_read(mode, conn_in)?;
    let consensus = consensus::make_consensus(&counts);
    printer::fasta::format_consensus(name, &consensus, conn_out)?;
    Ok(())
}

/// Read aligned sequences from [Read](std::io::Read) and write their frequency matrix to [Write](std::io::Write).
///
/// ## Usage
/// ```rust
/// use quasicons::{frequency_matrix_from_read_to_write, InputMode};
/// use std::io::Cursor;
///
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b">read1\nAC\n".to_vec());
/// input_bytes.append(&mut b">read2\nAN\n".to_vec());
/// input_bytes.append(&mut b">read3\nTC\n".to_vec());
/// input_bytes.append(&mut b">read4\nAG\n".to_vec());
/// let mut input: Cursor<Vec<u8>> = Cursor::new(input_bytes);
///
/// let mut output: Vec<u8> = Vec::new();
/// frequency_matrix_from_read_to_write(false, InputMode::Lines, &mut input, &mut output).unwrap();
///
/// let mut expected: Vec<u8> = Vec::new();
/// expected.append(&mut b"Position\tA\tC\tG\tT\tGap\tDepth\n".to_vec());
/// expected.append(&mut b"1\t75\t0\t0\t25\t0\t4\n".to_vec());
/// expected.append(&mut b"2\t0\t50\t25\t0\t25\t4\n".to_vec());
///
/// assert_eq!(output, expected);
/// ```
///
pub fn frequency_matrix_from_read_to_write<R: Read + Send, W: Write>(
    with_dominant: bool,
    mode: InputMode,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<(), E> {
    let counts = count_from_read(mode, conn_in)?;
    let matrix = frequency::make_frequency_matrix(&counts);
    printer::tsv::format_frequency_matrix(&matrix, with_dominant, conn_out)?;
    Ok(())
}

/// Open `path` for reading.
///
/// In line mode files ending in `.gz` are decompressed here. In record mode
/// compression is detected by the parser.
pub fn open_input(
    path: &Path,
    mode: InputMode,
) -> Result<Box<dyn Read + Send>, E> {
    let file = File::open(path)?;
    if mode == InputMode::Lines && paths::is_gzipped(path) {
        Ok(Box::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Compute and write the outputs for the FASTA file at `path`.
///
/// The input is read once and the outputs selected in `opts` are written
/// next to it, see [paths] for the file names.
///
/// ## Errors and panics
///
/// Returns an [InputError](paths::InputError) before reading anything if
/// `path` does not exist or does not have a FASTA suffix. I/O and parsing
/// errors are returned as they occur.
///
pub fn process_file(
    path: &Path,
    opts: &Options,
) -> Result<OutputPaths, E> {
    let out_paths = paths::check_input(path)?;

    log::info!("Counting bases in {}", path.display());
    let mut conn_in = open_input(path, opts.mode)?;
    let counts = count_from_read(opts.mode, &mut conn_in)?;
    log::info!("Read {} sequences covering {} columns", counts.n_rows(), counts.len());

    if opts.write_consensus {
        let consensus = consensus::make_consensus(&counts);
        let mut conn_out = BufWriter::new(File::create(&out_paths.consensus)?);
        printer::fasta::format_consensus(&opts.name, &consensus, &mut conn_out)?;
        log::info!("Wrote consensus of length {} to {}", consensus.chars().count(), out_paths.consensus.display());
    }

    if opts.write_frequency_matrix {
        let matrix = frequency::make_frequency_matrix(&counts);
        let mut conn_out = BufWriter::new(File::create(&out_paths.frequency_matrix)?);
        printer::tsv::format_frequency_matrix(&matrix, opts.with_dominant, &mut conn_out)?;
        log::info!("Wrote {} positions to {}", matrix.len(), out_paths.frequency_matrix.display());
    }

    Ok(out_paths)
}

/// Run [process_file] on every path in `inputs`.
///
/// All paths are checked before the first one is read, so a bad path
/// anywhere in `inputs` means no outputs are written.
///
/// ## Errors and panics
///
/// Returns the [InputError](paths::InputError) of the first bad path, or the
/// first error from [process_file].
///
pub fn process_files(
    inputs: &[PathBuf],
    opts: &Options,
) -> Result<Vec<OutputPaths>, E> {
    paths::check_inputs(inputs)?;
    inputs.iter().map(|input| process_file(input, opts)).collect()
}
