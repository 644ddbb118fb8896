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

//! Plain text output for the consensus and the frequency matrix.
//!
//! The consensus is written as a FASTA record with a single header line and
//! the whole sequence on one line ([format_consensus](fasta::format_consensus)).
//!
//! The frequency matrix is written as tab-separated text with a header line
//! followed by one line per retained position
//! ([format_frequency_matrix](tsv::format_frequency_matrix)).
//!
//! ## Usage
//!
//! ```rust
//! use quasicons::counts::BaseCounts;
//! use quasicons::consensus::make_consensus;
//! use quasicons::frequency::make_frequency_matrix;
//! use quasicons::printer::fasta::format_consensus;
//! use quasicons::printer::tsv::format_frequency_matrix;
//!
//! let counts = BaseCounts::from_lines([">r1", "ACTG", ">r2", "AATG", ">r3", "ACAG"]);
//!
//! let mut fasta: Vec<u8> = Vec::new();
//! format_consensus("consensus", &make_consensus(&counts), &mut fasta).unwrap();
//! assert_eq!(fasta, b">consensus\nACTG\n".to_vec());
//!
//! let mut tsv: Vec<u8> = Vec::new();
//! format_frequency_matrix(&make_frequency_matrix(&counts), true, &mut tsv).unwrap();
//!
//! let mut expected: Vec<u8> = Vec::new();
//! expected.append(&mut b"Position\tA\tC\tG\tT\tGap\tDepth\tRefN\n".to_vec());
//! expected.append(&mut b"1\t100\t0\t0\t0\t0\t3\tA\n".to_vec());
//! expected.append(&mut b"2\t33.33\t66.67\t0\t0\t0\t3\tC\n".to_vec());
//! expected.append(&mut b"3\t33.33\t0\t0\t66.67\t0\t3\tT\n".to_vec());
//! expected.append(&mut b"4\t0\t0\t100\t0\t0\t3\tG\n".to_vec());
//!
//! assert_eq!(tsv, expected);
//! ```
//!

// Format specific implementations
pub mod fasta;
pub mod tsv;
