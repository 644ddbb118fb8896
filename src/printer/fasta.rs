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
use std::io::Write;

type E = Box<dyn std::error::Error>;

/// Format a consensus sequence as a single FASTA record
///
/// Writes the header line `>name` followed by `seq` on one line. The sequence
/// is not wrapped.
///
pub fn format_consensus<W: Write>(
    name: &str,
    seq: &str,
    conn: &mut W,
) -> Result<(), E> {
    conn.write_all(b">")?;
    conn.write_all(name.as_bytes())?;
    conn.write_all(b"\n")?;
    conn.write_all(seq.as_bytes())?;
    conn.write_all(b"\n")?;
    conn.flush()?;
    Ok(())
}
