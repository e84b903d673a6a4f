//! `zobject-key-path`: look up a dotted key path in a document.
//!
//! Usage:
//!   zobject-key-path '<path>'
//!
//! The document is read from stdin. The path is the first argument, e.g.
//! `Z2K2.Z12K1.1.Z11K2`; an empty path prints the whole document.

use std::io::{self, Read};

use zobject::cli::{init_tracing, lookup_key_path};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let Some(key_path) = args.get(1) else {
        eprintln!("First argument must be a key path.");
        std::process::exit(1);
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match lookup_key_path(buf.trim(), key_path) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
