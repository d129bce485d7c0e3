//! Command-line front end for moneyfmt
//!
//! Formats numbers given as arguments, or read one per line from stdin, as
//! localized monetary strings.

use anyhow::Result;
use clap::Parser;
use std::env;
use std::process;

mod cli;
mod dispatch;
mod session;

use cli::Cli;
use dispatch::Dispatcher;
use session::Session;

fn main() -> Result<()> {
    // Logging level flags must be seen before the logger starts
    handle_debug_options();
    env_logger::init();

    let cli = Cli::parse();
    if cli.debug || cli.trace {
        log::debug!("diagnostic logging enabled");
    }

    let session = match Session::new(&cli) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error initializing session: {:#}", e);
            process::exit(1);
        }
    };

    let dispatcher = Dispatcher::new(session);

    match dispatcher.execute(&cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);

            if cli.verbose {
                for cause in e.chain().skip(1) {
                    eprintln!("Caused by: {}", cause);
                }
            }

            process::exit(1);
        }
    }
}

/// Map --debug/--trace onto RUST_LOG
fn handle_debug_options() {
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--debug" => env::set_var("RUST_LOG", "debug"),
            "--trace" => env::set_var("RUST_LOG", "trace"),
            _ => {}
        }
    }
}
