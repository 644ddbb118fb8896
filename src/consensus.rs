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

//! Majority-vote consensus with gap avoidance.
//!
//! Each column contributes its most common symbol. If that symbol is a gap
//! (`-` or `N`) the most common non-gap symbol is used instead. Columns that
//! contain nothing but gaps are left out, so the consensus is shorter than
//! the alignment whenever such columns exist.
//!
//! ## Usage
//!
//! ```rust
//! use quasicons::counts::BaseCounts;
//! use quasicons::consensus::make_consensus;
//!
//! let counts = BaseCounts::from_lines(["AC-G", "A--G", "AT-G"]);
//!
//! assert_eq!(make_consensus(&counts), "ACG");
//! ```
//!

use crate::counts::is_gap;
use crate::counts::BaseCounts;
use crate::counts::Column;

/// Pick the consensus symbol for a single column.
///
/// Returns None if the column only contains gaps.
pub fn call_base(
    column: &Column,
) -> Option<char> {
    let majority = column.majority()?;
    if !is_gap(majority) {
        Some(majority)
    } else {
        column.best_non_gap()
    }
}

/// Build the consensus sequence over all columns of `counts`.
pub fn make_consensus(
    counts: &BaseCounts,
) -> String {
    let mut dropped: usize = 0;
    let consensus: String = counts.columns().iter().enumerate().filter_map(|(pos, column)| {
        let base = call_base(column);
        if base.is_none() {
            dropped += 1;
            log::debug!("Column {} contains only gaps, leaving it out of the consensus", pos + 1);
        }
        base
    }).collect();

    if dropped > 0 {
        log::warn!("Consensus dropped {} gap-only columns", dropped);
    }

    consensus
}
