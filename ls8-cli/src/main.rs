//! LS-8 CLI — load a program listing and run it.
//!
//! Exit codes:
//! - 0: Halted normally
//! - 1: Usage, input, or load error
//! - 2: Runtime error

mod commands;
mod logger;

use std::process;

fn main() {
    logger::init();

    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        None => {
            print_usage();
            process::exit(1);
        }
        Some("--help" | "-h") => {
            print_usage();
            process::exit(0);
        }
        Some(path) if args.len() == 2 => commands::run(path),
        Some(_) => {
            eprintln!("error: expected exactly one program file");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: ls8 <program.ls8>");
    eprintln!();
    eprintln!("Loads one binary word per line (blank lines and # comments skipped)");
    eprintln!("into memory at address 0 and runs it until HLT.");
}
