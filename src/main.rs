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

use clap::CommandFactory;
use clap::Parser;

use quasicons::InputMode;
use quasicons::Options;

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) -> Result<(), E> {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()?;
    Ok(())
}

fn run(cli: &cli::Cli) -> Result<(), E> {
    // Subcommands:
    match &cli.command {
        // Consensus and frequency matrix
        Some(cli::Commands::Run {
            input_files,
            name,
            mode,
            with_dominant,
            verbose,
        }) => {
            init_log(if *verbose { 3 } else { 1 })?;
            let opts = Options {
                name: name.clone(),
                mode: mode.parse::<InputMode>()?,
                with_dominant: *with_dominant,
                ..Default::default()
            };

            quasicons::process_files(input_files, &opts)?;
        },

        // Consensus
        Some(cli::Commands::Consensus {
            input_files,
            name,
            mode,
            write_to_stdout,
            verbose,
        }) => {
            init_log(if *verbose { 3 } else { 1 })?;
            let mode = mode.parse::<InputMode>()?;

            if *write_to_stdout {
                quasicons::paths::check_inputs(input_files)?;
                let mut conn_out = std::io::stdout().lock();
                for file in input_files {
                    let mut conn_in = quasicons::open_input(file, mode)?;
                    quasicons::consensus_from_read_to_write(name, mode, &mut conn_in, &mut conn_out)?;
                }
                conn_out.flush()?;
            } else {
                let opts = Options {
                    name: name.clone(),
                    mode,
                    write_frequency_matrix: false,
                    ..Default::default()
                };
                quasicons::process_files(input_files, &opts)?;
            }
        },

        // Frequency matrix
        Some(cli::Commands::Matrix {
            input_files,
            mode,
            with_dominant,
            write_to_stdout,
            verbose,
        }) => {
            init_log(if *verbose { 3 } else { 1 })?;
            let mode = mode.parse::<InputMode>()?;

            if *write_to_stdout {
                quasicons::paths::check_inputs(input_files)?;
                let mut conn_out = std::io::stdout().lock();
                for file in input_files {
                    let mut conn_in = quasicons::open_input(file, mode)?;
                    quasicons::frequency_matrix_from_read_to_write(*with_dominant, mode, &mut conn_in, &mut conn_out)?;
                }
                conn_out.flush()?;
            } else {
                let opts = Options {
                    mode,
                    with_dominant: *with_dominant,
                    write_consensus: false,
                    ..Default::default()
                };
                quasicons::process_files(input_files, &opts)?;
            }
        },
        None => {
            cli::Cli::command().print_help()?;
        },
    }
    Ok(())
}

fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
