//! `json-splice`: set or remove one value in a JSON document, keeping its
//! formatting.
//!
//! Usage:
//!   json-splice [--strict] <path> <value>
//!   json-splice [--strict] --remove <path>
//!
//! Put `--` before a path or value that looks like a flag.
//!
//! The document is read from stdin and the edited document written to stdout.
//! Set `RUST_LOG=json_splice=debug` to see the computed edits on stderr.

use std::io::{self, Read, Write};

use json_splice::cli::{parse_args, run};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&args, &buf) {
        Ok(mut result) => {
            if !result.ends_with('\n') {
                result.push('\n');
            }
            if let Err(e) = io::stdout().write_all(result.as_bytes()) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
