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
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // Write consensus and frequency matrix next to each input
    Run {
        // Input aligned fasta file(s)
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Header of the consensus record
        #[arg(long = "name", default_value = "consensus")]
        name: String,

        // Read rows as `lines` or whole `records`
        #[arg(long = "mode", default_value = "lines")]
        mode: String,

        // Add the dominant base column to the frequency matrix
        #[arg(long = "dominant", default_value_t = false)]
        with_dominant: bool,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Write only the consensus
    Consensus {
        // Input aligned fasta file(s)
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Header of the consensus record
        #[arg(long = "name", default_value = "consensus")]
        name: String,

        // Read rows as `lines` or whole `records`
        #[arg(long = "mode", default_value = "lines")]
        mode: String,

        // Print to stdout instead of a file
        #[arg(short = 'c', long = "stdout", default_value_t = false)]
        write_to_stdout: bool,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Write only the frequency matrix
    Matrix {
        // Input aligned fasta file(s)
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Read rows as `lines` or whole `records`
        #[arg(long = "mode", default_value = "lines")]
        mode: String,

        // Add the dominant base column
        #[arg(long = "dominant", default_value_t = false)]
        with_dominant: bool,

        // Print to stdout instead of a file
        #[arg(short = 'c', long = "stdout", default_value_t = false)]
        write_to_stdout: bool,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
