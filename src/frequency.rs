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

//! Per-position base frequencies.
//!
//! Columns whose most common symbol is a gap are skipped. For the remaining
//! columns the `-` and `N` counts are merged into one gap bucket and all
//! counts are converted to percentages of the column depth, rounded to two
//! decimals.
//!
//! The skip test here only looks at the raw majority symbol. It is
//! separate from [call_base](crate::consensus::call_base),
//! which falls back to the best non-gap symbol instead of skipping.
//!
//! ## Usage
//!
//! ```rust
//! use quasicons::counts::BaseCounts;
//! use quasicons::frequency::{make_frequency_matrix, Base};
//!
//! let counts = BaseCounts::from_lines(["AC", "AA", "A-"]);
//! let matrix = make_frequency_matrix(&counts);
//!
//! assert_eq!(matrix.len(), 2);
//! assert_eq!(matrix[1].position, 2);
//! assert_eq!(matrix[1].a, 33.33);
//! assert_eq!(matrix[1].c, 33.33);
//! assert_eq!(matrix[1].gap, 33.33);
//! assert_eq!(matrix[1].depth, 3);
//! assert_eq!(matrix[1].dominant, Base::A);
//! ```
//!

use crate::counts::is_gap;
use crate::counts::BaseCounts;
use crate::counts::Column;
use crate::counts::GAP_SYMBOLS;

/// Labels reported in the frequency matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Base {
    #[default]
    A,
    C,
    G,
    T,
    Gap,
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            Base::A => "A",
            Base::C => "C",
            Base::G => "G",
            Base::T => "T",
            Base::Gap => "Gap",
        };
        write!(f, "{}", label)
    }
}

/// Base frequencies at one retained position.
///
/// Percentages are rounded to two decimals. `depth` is the number of symbols
/// counted at the position, including gaps and any unexpected symbols.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseFrequency {
    /// 1-based position among the retained columns.
    pub position: usize,
    pub a: f64,
    pub c: f64,
    pub g: f64,
    pub t: f64,
    /// Combined `-` and `N`.
    pub gap: f64,
    pub depth: u64,
    /// Label with the highest percentage.
    pub dominant: Base,
}

impl BaseFrequency {
    /// Sum of all five percentages.
    pub fn total(&self) -> f64 {
        self.a + self.c + self.g + self.t + self.gap
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage(count: u64, depth: u64) -> f64 {
    round_to_hundredths(count as f64 * 100.0 / depth as f64)
}

/// Compute base frequencies for a single column.
///
/// Does not apply the gap skip rule, see [make_frequency_matrix] for that.
///
/// ## Errors and panics
///
/// Panics if the column is empty. Columns built by [BaseCounts] always
/// contain at least one symbol.
///
pub fn base_frequency(
    column: &Column,
    position: usize,
) -> BaseFrequency {
    let depth = column.depth();
    assert!(depth > 0, "Column at position {} has zero depth", position);

    let gap_count: u64 = GAP_SYMBOLS.iter().map(|symbol| column.count(*symbol)).sum();

    let a = percentage(column.count('A'), depth);
    let c = percentage(column.count('C'), depth);
    let g = percentage(column.count('G'), depth);
    let t = percentage(column.count('T'), depth);
    let gap = percentage(gap_count, depth);

    let mut dominant = (Base::A, a);
    [(Base::C, c), (Base::G, g), (Base::T, t), (Base::Gap, gap)].into_iter().for_each(|(base, value)| {
        if value > dominant.1 {
            dominant = (base, value);
        }
    });

    BaseFrequency { position, a, c, g, t, gap, depth, dominant: dominant.0 }
}

/// Compute base frequencies for every column that is not dominated by a gap.
///
/// Positions are numbered 1..K over the retained columns only.
pub fn make_frequency_matrix(
    counts: &BaseCounts,
) -> Vec<BaseFrequency> {
    let matrix: Vec<BaseFrequency> = counts.columns().iter()
        .filter(|column| column.majority().is_some_and(|symbol| !is_gap(symbol)))
        .enumerate()
        .map(|(idx, column)| base_frequency(column, idx + 1))
        .collect();

    log::debug!("Frequency matrix retained {} of {} columns", matrix.len(), counts.len());

    matrix
}
