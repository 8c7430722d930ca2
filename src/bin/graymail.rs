//! Graymail CLI binary.

use clap::Parser;
use graymail::cli::{args::GraymailArgs, commands::execute_command};
use std::process;

fn main() {
    let args = GraymailArgs::parse();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
