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

use crate::frequency::BaseFrequency;

type E = Box<dyn std::error::Error>;

/// Column names of the frequency matrix, in output order.
pub const FREQUENCY_FIELDS: [&str; 7] = ["Position", "A", "C", "G", "T", "Gap", "Depth"];

/// Name of the optional dominant base column.
pub const DOMINANT_FIELD: &str = "RefN";

/// Format the header line of a frequency matrix
///
/// Adds the [DOMINANT_FIELD] column if `with_dominant` is true.
///
pub fn format_frequency_header<W: Write>(
    with_dominant: bool,
    conn: &mut W,
) -> Result<(), E> {
    let separator: char = '\t';
    let mut formatted: String = FREQUENCY_FIELDS.join("\t");
    if with_dominant {
        formatted += &separator.to_string();
        formatted += DOMINANT_FIELD;
    }
    formatted += "\n";

    conn.write_all(formatted.as_bytes())?;
    Ok(())
}

/// Format a single position of a frequency matrix
///
/// Numbers are written with their shortest exact representation, eg. `33.33`,
/// `0` or `100`.
///
pub fn format_frequency_line<W: Write>(
    record: &BaseFrequency,
    with_dominant: bool,
    conn: &mut W,
) -> Result<(), E> {
    let separator: char = '\t';
    let mut formatted: String = record.position.to_string();
    [record.a, record.c, record.g, record.t, record.gap].iter().for_each(|value| {
        formatted += &separator.to_string();
        formatted += &value.to_string();
    });
    formatted += &separator.to_string();
    formatted += &record.depth.to_string();
    if with_dominant {
        formatted += &separator.to_string();
        formatted += &record.dominant.to_string();
    }
    formatted += "\n";

    conn.write_all(formatted.as_bytes())?;
    Ok(())
}

/// Format a complete frequency matrix
///
/// The header line is always written, also when `records` is empty.
///
pub fn format_frequency_matrix<W: Write>(
    records: &[BaseFrequency],
    with_dominant: bool,
    conn: &mut W,
) -> Result<(), E> {
    format_frequency_header(with_dominant, conn)?;
    for record in records {
        format_frequency_line(record, with_dominant, conn)?;
    }
    conn.flush()?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_header() {
        use super::format_frequency_header;

        let mut got: Vec<u8> = Vec::new();
        format_frequency_header(false, &mut got).unwrap();
        assert_eq!(got, b"Position\tA\tC\tG\tT\tGap\tDepth\n".to_vec());

        let mut got: Vec<u8> = Vec::new();
        format_frequency_header(true, &mut got).unwrap();
        assert_eq!(got, b"Position\tA\tC\tG\tT\tGap\tDepth\tRefN\n".to_vec());
    }

    #[test]
    fn format_line() {
        use crate::frequency::Base;
        use crate::frequency::BaseFrequency;
        use super::format_frequency_line;

        let record = BaseFrequency { position: 2, a: 7.41, c: 11.11, g: 14.81, t: 18.52, gap: 48.15, depth: 27, dominant: Base::Gap };

        let mut got: Vec<u8> = Vec::new();
        format_frequency_line(&record, false, &mut got).unwrap();
        assert_eq!(got, b"2\t7.41\t11.11\t14.81\t18.52\t48.15\t27\n".to_vec());

        let mut got: Vec<u8> = Vec::new();
        format_frequency_line(&record, true, &mut got).unwrap();
        assert_eq!(got, b"2\t7.41\t11.11\t14.81\t18.52\t48.15\t27\tGap\n".to_vec());
    }

    #[test]
    fn format_line_whole_numbers() {
        use crate::frequency::Base;
        use crate::frequency::BaseFrequency;
        use super::format_frequency_line;

        let record = BaseFrequency { position: 1, a: 100.0, c: 0.0, g: 0.0, t: 0.0, gap: 0.0, depth: 5, dominant: Base::A };

        let mut got: Vec<u8> = Vec::new();
        format_frequency_line(&record, true, &mut got).unwrap();

        assert_eq!(got, b"1\t100\t0\t0\t0\t0\t5\tA\n".to_vec());
    }

    #[test]
    fn format_empty_matrix() {
        use super::format_frequency_matrix;

        let mut got: Vec<u8> = Vec::new();
        format_frequency_matrix(&[], false, &mut got).unwrap();

        assert_eq!(got, b"Position\tA\tC\tG\tT\tGap\tDepth\n".to_vec());
    }
}
