//! `taskdeck` executable entry point.

use clap::Parser;
use std::process::ExitCode;
use taskdeck_cli::{run, Config};

fn main() -> ExitCode {
    let config = Config::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskdeck: {err}");
            ExitCode::FAILURE
        }
    }
}
