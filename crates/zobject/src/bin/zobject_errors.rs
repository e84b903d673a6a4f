//! `zobject-errors`: summarize an error (stdin) as JSON (stdout).
//!
//! Usage:
//!   zobject-errors
//!
//! The input is a `Z5` error or a `Z22` function-call response.

use std::io::{self, Read};

use zobject::cli::{extract_errors, init_tracing};

fn main() {
    init_tracing();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match extract_errors(buf.trim()) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
