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

//! Input file checks and output file naming.
//!
//! Output files are written next to the input. The FASTA suffix of the input
//! is replaced with `_consensus` plus the same FASTA extension for the
//! consensus, and with `_frequency_matrix.tsv` for the frequency matrix.
//! Downstream tools (bwa, quasi_bam, lastz) locate the consensus by this
//! name.
//!
//! ```rust
//! use quasicons::paths::OutputPaths;
//! use std::path::{Path, PathBuf};
//!
//! let got = OutputPaths::from_input(Path::new("data/170908_1_quasi.fas")).unwrap();
//!
//! assert_eq!(got.consensus, PathBuf::from("data/170908_1_quasi_consensus.fas"));
//! assert_eq!(got.frequency_matrix, PathBuf::from("data/170908_1_quasi_frequency_matrix.tsv"));
//! ```
//!

use std::path::Path;
use std::path::PathBuf;

/// Recognized FASTA file extensions.
///
/// Each may additionally be followed by `.gz`.
pub const FASTA_SUFFIXES: [&str; 4] = [".fas", ".fasta", ".fa", ".fna"];

const GZIP_SUFFIX: &str = ".gz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Missing(PathBuf),
    UnrecognizedSuffix(PathBuf),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InputError::Missing(path) => write!(f, "Input file {} does not exist", path.display()),
            InputError::UnrecognizedSuffix(path) => write!(
                f, "Input file {} must end with one of {} (optionally followed by {})",
                path.display(), FASTA_SUFFIXES.join(", "), GZIP_SUFFIX,
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Paths of the files written for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub consensus: PathBuf,
    pub frequency_matrix: PathBuf,
}

impl OutputPaths {
    /// Derive the output paths from the name of `input`.
    pub fn from_input(
        input: &Path,
    ) -> Result<Self, InputError> {
        let unrecognized = || InputError::UnrecognizedSuffix(input.to_path_buf());

        let file_name = input.file_name().and_then(|x| x.to_str()).ok_or_else(unrecognized)?;
        let file_name = file_name.strip_suffix(GZIP_SUFFIX).unwrap_or(file_name);

        let (stem, extension) = FASTA_SUFFIXES.iter().find_map(|extension| {
            file_name.strip_suffix(extension)
                .filter(|stem| !stem.is_empty())
                .map(|stem| (stem, *extension))
        }).ok_or_else(unrecognized)?;

        let dir = input.parent().unwrap_or(Path::new(""));
        Ok(OutputPaths {
            consensus: dir.join(format!("{}_consensus{}", stem, extension)),
            frequency_matrix: dir.join(format!("{}_frequency_matrix.tsv", stem)),
        })
    }
}

/// Returns true if `path` names a gzip compressed file.
pub fn is_gzipped(path: &Path) -> bool {
    path.to_str().is_some_and(|x| x.ends_with(GZIP_SUFFIX))
}

/// Check that `input` exists and has a recognized suffix.
///
/// Returns the paths the outputs for `input` should be written to.
pub fn check_input(
    input: &Path,
) -> Result<OutputPaths, InputError> {
    if !input.is_file() {
        return Err(InputError::Missing(input.to_path_buf()))
    }
    OutputPaths::from_input(input)
}

/// Check every path in `inputs` with [check_input].
///
/// Stops at the first failing path. Returns the output paths in the same
/// order as `inputs`.
pub fn check_inputs<P: AsRef<Path>>(
    inputs: &[P],
) -> Result<Vec<OutputPaths>, InputError> {
    inputs.iter().map(|input| check_input(input.as_ref())).collect()
}
